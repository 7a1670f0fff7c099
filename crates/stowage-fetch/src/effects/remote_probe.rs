use url::Url;

use crate::core::validate_scheme;
use crate::data::{RemoteDescriptor, Timeouts};
use crate::effects::{HttpClient, with_deadline};
use crate::error::{Error, Result, Stage, error_chain};

const CONTENT_LENGTH: &str = "Content-Length";

/// Asks the server for a resource's hash and length without its body.
pub struct RemoteProbe<'a, C: HttpClient> {
    client:          &'a C,
    checksum_header: &'a str,
    timeouts:        Timeouts,
}

impl<'a, C: HttpClient> RemoteProbe<'a, C> {
    pub fn new(client: &'a C, checksum_header: &'a str, timeouts: Timeouts) -> Self {
        Self {
            client,
            checksum_header,
            timeouts,
        }
    }

    /// Issue `HEAD` and read the checksum and `Content-Length` headers.
    ///
    /// Non-HTTP(S) URLs fail with [`Error::UnsupportedScheme`] before any
    /// request. Only an unreachable server or an expired deadline is a probe
    /// failure. Any status the server answers with is read like a success, so
    /// a `404` without matching headers leads to a purge and the `GET` reports
    /// the status.
    pub async fn probe(&self, url: &Url) -> Result<RemoteDescriptor> {
        validate_scheme(url)?;

        with_deadline(self.timeouts.probe, url.as_str(), Stage::Probe, async {
            let response = self.client.head(url).await.map_err(|e| Error::Probe {
                url:    url.to_string(),
                reason: error_chain(&e),
            })?;

            Ok(RemoteDescriptor::new(
                response.header(self.checksum_header),
                response.header(CONTENT_LENGTH),
            ))
        })
        .await
    }
}
