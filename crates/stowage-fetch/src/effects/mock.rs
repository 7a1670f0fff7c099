use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use futures_util::stream;
use stowage_verify::Sha256Hasher;
use url::Url;

use crate::CHECKSUM_HEADER;
use crate::effects::{GetResponse, HeadResponse, HttpClient};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockError(pub String);

impl fmt::Display for MockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl std::error::Error for MockError {}

#[derive(Debug, Clone)]
enum HeadReply {
    Respond(HeadResponse),
    Fail(String),
    Hang,
}

#[derive(Debug, Clone)]
enum GetReply {
    Body(Vec<u8>),
    Status(u16),
    Broken(Vec<u8>),
    Fail(String),
    Hang,
}

#[derive(Debug, Clone)]
struct Route {
    head: HeadReply,
    get:  GetReply,
}

/// Scripted in-memory [`HttpClient`] that counts the requests it receives.
///
/// Unknown URLs fail like an unreachable host.
///
/// # Examples
///
/// ```
/// use stowage_fetch::effects::MockClient;
///
/// let client = MockClient::new()
///     .serve_with_checksum("https://example.com/a.tar", b"payload".to_vec())
///     .head_unreachable("https://example.com/a.tar");
/// assert_eq!(client.get_count(), 0);
/// ```
#[derive(Debug, Default)]
pub struct MockClient {
    routes: HashMap<String, Route>,
    heads:  AtomicUsize,
    gets:   AtomicUsize,
}

impl MockClient {
    pub fn new() -> Self { Self::default() }

    /// `GET` returns `body`; `HEAD` reports its length only.
    pub fn serve(mut self, url: &str, body: Vec<u8>) -> Self {
        let head = HeadResponse::new(200).with_header("Content-Length", body.len().to_string());
        self.routes.insert(url.to_string(), Route {
            head: HeadReply::Respond(head),
            get:  GetReply::Body(body),
        });
        self
    }

    /// Like [`serve`](Self::serve), with the SHA-256 of `body` in `X-Checksum-Sha256`.
    pub fn serve_with_checksum(mut self, url: &str, body: Vec<u8>) -> Self {
        let head = HeadResponse::new(200)
            .with_header(CHECKSUM_HEADER, Sha256Hasher::hex_digest(&body))
            .with_header("Content-Length", body.len().to_string());
        self.routes.insert(url.to_string(), Route {
            head: HeadReply::Respond(head),
            get:  GetReply::Body(body),
        });
        self
    }

    /// Replace the `HEAD` reply for `url`.
    pub fn head(mut self, url: &str, response: HeadResponse) -> Self {
        self.route(url).head = HeadReply::Respond(response);
        self
    }

    /// `HEAD` fails with a transport error; `GET` is unaffected.
    pub fn head_unreachable(mut self, url: &str) -> Self {
        self.route(url).head = HeadReply::Fail("connection refused".to_string());
        self
    }

    /// Both methods answer with `status` and an empty body.
    pub fn status(mut self, url: &str, status: u16) -> Self {
        let route = self.route(url);
        route.head = HeadReply::Respond(HeadResponse::new(status));
        route.get = GetReply::Status(status);
        self
    }

    /// `GET` yields `prefix` and then a connection reset.
    pub fn broken_body(mut self, url: &str, prefix: Vec<u8>) -> Self {
        self.route(url).get = GetReply::Broken(prefix);
        self
    }

    /// `GET` fails with a transport error.
    pub fn get_unreachable(mut self, url: &str) -> Self {
        self.route(url).get = GetReply::Fail("connection refused".to_string());
        self
    }

    /// Neither method ever completes.
    pub fn hang(mut self, url: &str) -> Self {
        let route = self.route(url);
        route.head = HeadReply::Hang;
        route.get = GetReply::Hang;
        self
    }

    pub fn head_count(&self) -> usize { self.heads.load(Ordering::SeqCst) }

    pub fn get_count(&self) -> usize { self.gets.load(Ordering::SeqCst) }

    fn route(&mut self, url: &str) -> &mut Route {
        self.routes.entry(url.to_string()).or_insert_with(|| Route {
            head: HeadReply::Fail("no route to host".to_string()),
            get:  GetReply::Fail("no route to host".to_string()),
        })
    }

    fn lookup(&self, url: &Url) -> Option<Route> { self.routes.get(url.as_str()).cloned() }
}

impl HttpClient for MockClient {
    type Error = MockError;

    async fn head(&self, url: &Url) -> Result<HeadResponse, Self::Error> {
        self.heads.fetch_add(1, Ordering::SeqCst);
        match self.lookup(url).map(|route| route.head) {
            Some(HeadReply::Respond(response)) => Ok(response),
            Some(HeadReply::Fail(reason)) => Err(MockError(reason)),
            Some(HeadReply::Hang) => std::future::pending().await,
            None => Err(MockError("no route to host".to_string())),
        }
    }

    async fn get(&self, url: &Url) -> Result<GetResponse<Self::Error>, Self::Error> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        let reply = self
            .lookup(url)
            .map(|route| route.get)
            .unwrap_or_else(|| GetReply::Fail("no route to host".to_string()));

        match reply {
            GetReply::Body(body) => {
                let length = body.len() as u64;
                // Split into small chunks so progress sees more than one.
                let chunks: Vec<Result<Bytes, MockError>> = body
                    .chunks(4)
                    .map(|c| Ok(Bytes::copy_from_slice(c)))
                    .collect();
                Ok(GetResponse {
                    status:         200,
                    reason:         "OK".to_string(),
                    content_length: Some(length),
                    body:           Box::pin(stream::iter(chunks)),
                })
            }
            GetReply::Status(status) => Ok(GetResponse {
                status,
                reason: String::new(),
                content_length: Some(0),
                body: Box::pin(stream::empty()),
            }),
            GetReply::Broken(prefix) => {
                let chunks = vec![
                    Ok(Bytes::from(prefix)),
                    Err(MockError("connection reset by peer".to_string())),
                ];
                Ok(GetResponse {
                    status:         200,
                    reason:         "OK".to_string(),
                    content_length: None,
                    body:           Box::pin(stream::iter(chunks)),
                })
            }
            GetReply::Fail(reason) => Err(MockError(reason)),
            GetReply::Hang => std::future::pending().await,
        }
    }
}
