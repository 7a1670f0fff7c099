use std::future::Future;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;
use url::Url;

/// A boxed stream type for HTTP response bodies.
pub type BoxStream<'a, T> = Pin<Box<dyn Stream<Item = T> + Send + 'a>>;

/// Status and headers of a `HEAD` response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadResponse {
    pub status:  u16,
    /// Header names are stored lowercase.
    pub headers: Vec<(String, String)>,
}

impl HeadResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_ascii_lowercase(), value.into()));
        self
    }

    /// First value of header `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Status line and streaming body of a `GET` response.
pub struct GetResponse<E> {
    pub status:         u16,
    pub reason:         String,
    pub content_length: Option<u64>,
    pub body:           BoxStream<'static, Result<Bytes, E>>,
}

impl<E> GetResponse<E> {
    pub fn is_success(&self) -> bool { (200..300).contains(&self.status) }
}

/// Asynchronous HTTP client abstraction.
///
/// This trait provides the minimal interface needed for cached downloads.
/// Implementations follow redirects themselves and report non-success
/// statuses through the response rather than as errors.
///
/// # Implementations
///
/// - [`ReqwestClient`]: Production implementation using `reqwest`
/// - Mock implementations for testing
pub trait HttpClient: Send + Sync {
    /// Error type for transport failures.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Issue a `HEAD` request. The body is never transferred.
    fn head(&self, url: &Url) -> impl Future<Output = Result<HeadResponse, Self::Error>> + Send;

    /// Issue a `GET` request and return the body as a stream.
    fn get(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<GetResponse<Self::Error>, Self::Error>> + Send;
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use super::*;

    const USER_AGENT: &str = concat!("stowage/", env!("CARGO_PKG_VERSION"));

    /// Production HTTP client implementation using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    #[derive(Debug, Clone)]
    pub struct ReqwestClientBuilder {
        connect_timeout: Option<Duration>,
        user_agent:      String,
    }

    impl Default for ReqwestClientBuilder {
        fn default() -> Self {
            Self {
                connect_timeout: None,
                user_agent:      USER_AGENT.to_string(),
            }
        }
    }

    impl ReqwestClientBuilder {
        pub fn connect_timeout(mut self, timeout: Duration) -> Self {
            self.connect_timeout = Some(timeout);
            self
        }

        pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
            self.user_agent = user_agent.into();
            self
        }

        pub fn build(self) -> Result<ReqwestClient, reqwest::Error> {
            let mut builder = reqwest::Client::builder().user_agent(self.user_agent);
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            Ok(ReqwestClient {
                client: builder.build()?,
            })
        }
    }

    impl ReqwestClient {
        /// Create a new ReqwestClient with default configuration.
        pub fn new() -> Result<Self, reqwest::Error> { Self::builder().build() }

        pub fn builder() -> ReqwestClientBuilder { ReqwestClientBuilder::default() }
    }

    impl From<reqwest::Client> for ReqwestClient {
        fn from(client: reqwest::Client) -> Self { Self { client } }
    }

    impl HttpClient for ReqwestClient {
        type Error = reqwest::Error;

        async fn head(&self, url: &Url) -> Result<HeadResponse, Self::Error> {
            let response = self.client.head(url.clone()).send().await?;
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_string(), v.to_string()))
                })
                .collect();

            Ok(HeadResponse {
                status: response.status().as_u16(),
                headers,
            })
        }

        async fn get(&self, url: &Url) -> Result<GetResponse<Self::Error>, Self::Error> {
            let response = self.client.get(url.clone()).send().await?;
            let status = response.status();
            let content_length = response.content_length();

            Ok(GetResponse {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                content_length,
                body: Box::pin(response.bytes_stream()),
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::{ReqwestClient, ReqwestClientBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_head_header_lookup_ignores_case() {
        let response = HeadResponse::new(200)
            .with_header("X-Checksum-Sha256", "abc")
            .with_header("Content-Length", "3");

        assert_eq!(response.header("x-checksum-sha256"), Some("abc"));
        assert_eq!(response.header("CONTENT-LENGTH"), Some("3"));
        assert_eq!(response.header("etag"), None);
    }
}
