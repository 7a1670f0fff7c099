use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use crate::core::{CacheHit, Decision, cache_path, decide, parse_url};
use crate::data::{DownloadRequest, FetchOptions};
use crate::effects::{
    CacheProbe, Fetcher, HttpClient, LogObserver, LogSink, ProgressObserver, RemoteProbe,
    TracingSink,
};
use crate::error::{Result, error_chain};

/// Which path a download took.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No cached copy existed; the artifact was downloaded.
    Fetched,
    /// Cached copy reused: remote hash matched.
    VerifiedHit,
    /// Cached copy reused: remote length matched.
    WeakHit,
    /// Cached copy reused without validation because the remote was unreachable.
    OfflineHit,
    /// Cached copy was stale, removed and downloaded again.
    Refetched,
}

impl Outcome {
    pub fn is_cache_hit(self) -> bool {
        matches!(self, Outcome::VerifiedHit | Outcome::WeakHit | Outcome::OfflineHit)
    }
}

impl From<CacheHit> for Outcome {
    fn from(hit: CacheHit) -> Self {
        match hit {
            CacheHit::Verified => Outcome::VerifiedHit,
            CacheHit::Weak => Outcome::WeakHit,
            CacheHit::Offline => Outcome::OfflineHit,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Fetched => write!(f, "fetched"),
            Outcome::VerifiedHit => write!(f, "cached (hash verified)"),
            Outcome::WeakHit => write!(f, "cached (length matched)"),
            Outcome::OfflineHit => write!(f, "cached (offline)"),
            Outcome::Refetched => write!(f, "refetched"),
        }
    }
}

/// Downloads into a cache directory, reusing valid entries.
///
/// One call runs every step to completion in order: inspect the cache
/// path, probe the remote when an entry exists, then reuse, purge and
/// fetch, or fall back to the cached copy when the probe fails. Calls for
/// the same cache path must not overlap.
pub struct Downloader<C: HttpClient> {
    client:   C,
    sink:     Arc<dyn LogSink>,
    observer: Option<Arc<dyn ProgressObserver>>,
    options:  FetchOptions,
}

impl<C: HttpClient> Downloader<C> {
    /// Create a downloader logging through [`TracingSink`].
    pub fn new(client: C) -> Self {
        Self {
            client,
            sink: Arc::new(TracingSink),
            observer: None,
            options: FetchOptions::default(),
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Display collaborator used for requests with progress enabled.
    ///
    /// Without one, progress goes to the log sink as periodic lines.
    pub fn with_observer(mut self, observer: Arc<dyn ProgressObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn with_options(mut self, options: FetchOptions) -> Self {
        self.options = options;
        self
    }

    pub fn client(&self) -> &C { &self.client }

    pub fn options(&self) -> &FetchOptions { &self.options }

    /// Make `request.url()` available in `request.cache_dir()` and return its path.
    pub async fn download(&self, request: &DownloadRequest) -> Result<PathBuf> {
        self.download_with_outcome(request)
            .await
            .map(|(path, _)| path)
    }

    /// Like [`download`](Self::download), also reporting which branch ran.
    pub async fn download_with_outcome(
        &self,
        request: &DownloadRequest,
    ) -> Result<(PathBuf, Outcome)> {
        let url = parse_url(request.url())?;
        let path = cache_path(request.cache_dir(), &url)?;
        let sink = self.sink.as_ref();

        let Some(local) = CacheProbe.inspect(&path).await? else {
            let path = self.fetcher(request).fetch(&url, &path).await?;
            return Ok((path, Outcome::Fetched));
        };
        sink.debug(format_args!(
            "local file: hash: {} length: {}",
            local.hash, local.size
        ));

        let probe = RemoteProbe::new(
            &self.client,
            &self.options.checksum_header,
            self.options.timeouts,
        );
        let remote = match probe.probe(&url).await {
            Ok(remote) => {
                sink.debug(format_args!(
                    "remote file: hash: {} length: {}",
                    remote.hash().unwrap_or_default(),
                    remote.length().unwrap_or_default()
                ));
                Some(remote)
            }
            Err(e) if e.is_probe_failure() => {
                sink.debug(format_args!("metadata probe failed: {}", error_chain(&e)));
                None
            }
            Err(e) => return Err(e),
        };

        match decide(&local, remote.as_ref(), self.options.strict_hash) {
            Decision::Reuse(hit) => {
                match hit {
                    CacheHit::Verified => {
                        sink.info(format_args!("matched hash of {url}, using cached copy"));
                    }
                    CacheHit::Weak => sink.info(format_args!(
                        "matched content length of {url}, using cached copy without hash verification"
                    )),
                    CacheHit::Offline => sink.info(format_args!(
                        "cannot obtain file info of {url}, using cached copy"
                    )),
                }
                Ok((path, hit.into()))
            }
            Decision::Purge => {
                sink.info(format_args!(
                    "cached copy of {url} is stale, removing {}",
                    path.display()
                ));
                stowage_fs::remove_entry(&path)?;
                let path = self.fetcher(request).fetch(&url, &path).await?;
                Ok((path, Outcome::Refetched))
            }
        }
    }

    fn fetcher(&self, request: &DownloadRequest) -> Fetcher<'_, C> {
        let observer = request.show_progress().then(|| {
            self.observer.clone().unwrap_or_else(|| {
                Arc::new(LogObserver::new(Arc::clone(&self.sink))) as Arc<dyn ProgressObserver>
            })
        });

        Fetcher::new(&self.client, self.sink.as_ref())
            .observer(observer)
            .timeout(self.options.timeouts.transfer)
    }
}

/// Download `url` into `cache_dir` with default settings.
///
/// Uses [`ReqwestClient`](crate::ReqwestClient) and logs through `tracing`.
#[cfg(feature = "reqwest")]
pub async fn download(
    cache_dir: impl AsRef<std::path::Path>,
    url: &str,
    progress: bool,
) -> Result<PathBuf> {
    let client =
        crate::ReqwestClient::new().map_err(|e| crate::Error::Client(error_chain(&e)))?;
    let request = DownloadRequest::new(cache_dir.as_ref(), url).progress(progress);
    Downloader::new(client).download(&request).await
}
