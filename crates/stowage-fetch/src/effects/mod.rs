//! I/O operations behind trait seams.
//!
//! The network sits behind [`HttpClient`], logging behind [`LogSink`] and
//! progress display behind [`ProgressObserver`], so the decision flow can
//! be driven entirely by in-memory fakes in tests.

mod cache_probe;
mod fetcher;
mod http;
mod log;
mod mock;
mod progress;
mod remote_probe;

pub use cache_probe::CacheProbe;
pub use fetcher::Fetcher;
pub use http::{BoxStream, GetResponse, HeadResponse, HttpClient};
pub use log::{LogSink, MemorySink, NullSink, TracingSink};
pub use mock::{MockClient, MockError};
pub use progress::{LogObserver, ProgressObserver, ProgressStream};
pub use remote_probe::RemoteProbe;

#[cfg(feature = "reqwest")]
pub use http::{ReqwestClient, ReqwestClientBuilder};

use std::future::Future;
use std::time::Duration;

use crate::error::{Error, Result, Stage};

/// Run `fut` under an optional deadline, mapping expiry to [`Error::Timeout`].
pub(crate) async fn with_deadline<T>(
    deadline: Option<Duration>,
    url: &str,
    stage: Stage,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    match deadline {
        Some(after) => tokio::time::timeout(after, fut)
            .await
            .map_err(|_| Error::Timeout {
                url: url.to_string(),
                stage,
                after,
            })?,
        None => fut.await,
    }
}
