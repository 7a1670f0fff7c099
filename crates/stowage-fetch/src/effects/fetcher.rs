use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures_util::StreamExt;
use stowage_fs::StagedFile;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::core::validate_scheme;
use crate::effects::{BoxStream, GetResponse, HttpClient, LogSink, ProgressObserver, ProgressStream, with_deadline};
use crate::error::{Error, Result, Stage, error_chain};

/// Streams a remote body into the cache.
///
/// The body is written to a staging file beside the destination and
/// renamed over it once complete, so the destination never holds a
/// partial or mixed file. On any failure the staging file is removed and
/// the destination is left as it was.
pub struct Fetcher<'a, C: HttpClient> {
    client:   &'a C,
    sink:     &'a dyn LogSink,
    observer: Option<Arc<dyn ProgressObserver>>,
    timeout:  Option<Duration>,
}

impl<'a, C: HttpClient> Fetcher<'a, C> {
    pub fn new(client: &'a C, sink: &'a dyn LogSink) -> Self {
        Self {
            client,
            sink,
            observer: None,
            timeout: None,
        }
    }

    /// Report progress of the body to `observer`.
    pub fn observer(mut self, observer: Option<Arc<dyn ProgressObserver>>) -> Self {
        self.observer = observer;
        self
    }

    /// Deadline for the whole transfer, from request to last byte.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Download `url` to `destination` and return `destination`.
    pub async fn fetch(&self, url: &Url, destination: &Path) -> Result<PathBuf> {
        validate_scheme(url)?;

        let (staged, file) = StagedFile::create(destination)?;
        self.sink.info(format_args!("downloading {url}"));

        let written = with_deadline(
            self.timeout,
            url.as_str(),
            Stage::Transfer,
            self.transfer(url, tokio::fs::File::from_std(file), staged.path()),
        )
        .await?;

        let path = staged.commit()?;
        self.sink
            .debug(format_args!("stored {written} bytes of {url} at {}", path.display()));
        Ok(path)
    }

    async fn transfer(&self, url: &Url, mut file: tokio::fs::File, staging: &Path) -> Result<u64> {
        let response = self.client.get(url).await.map_err(|e| Error::Request {
            url:    url.to_string(),
            reason: error_chain(&e),
        })?;

        if !response.is_success() {
            return Err(Error::Status {
                url:    url.to_string(),
                status: response.status,
                reason: response.reason,
            });
        }

        let GetResponse {
            content_length,
            body,
            ..
        } = response;
        let mut body: BoxStream<'static, std::result::Result<Bytes, C::Error>> = match &self.observer {
            Some(observer) => Box::pin(ProgressStream::new(
                body,
                Arc::clone(observer),
                url.as_str(),
                content_length,
            )),
            None => body,
        };

        let write_err = |source: std::io::Error| Error::Write {
            path: staging.to_path_buf(),
            source,
        };

        let mut written = 0u64;
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| Error::Transfer {
                url:    url.to_string(),
                reason: error_chain(&e),
            })?;
            file.write_all(&chunk).await.map_err(write_err)?;
            written += chunk.len() as u64;
        }

        file.flush().await.map_err(write_err)?;
        file.sync_all().await.map_err(write_err)?;
        Ok(written)
    }
}
