use std::path::{Path, PathBuf};

/// Parameters of one download call.
///
/// # Examples
///
/// ```
/// use stowage_fetch::DownloadRequest;
///
/// let request = DownloadRequest::new("/var/cache/stowage", "https://example.com/rootfs.tar")
///     .progress(true);
/// assert!(request.show_progress());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    cache_dir: PathBuf,
    url:       String,
    progress:  bool,
}

impl DownloadRequest {
    pub fn new(cache_dir: impl Into<PathBuf>, url: impl Into<String>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            url:       url.into(),
            progress:  false,
        }
    }

    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    pub fn cache_dir(&self) -> &Path { &self.cache_dir }

    pub fn url(&self) -> &str { &self.url }

    pub fn show_progress(&self) -> bool { self.progress }
}
