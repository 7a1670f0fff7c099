use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use bytes::Bytes;
use futures_util::Stream;

use crate::data::Progress;
use crate::effects::LogSink;

/// Receives transfer progress. Implementations render it somewhere.
pub trait ProgressObserver: Send + Sync {
    /// The body is about to stream. `total_bytes` comes from `Content-Length`.
    fn start(&self, url: &str, total_bytes: Option<u64>);

    fn update(&self, progress: &Progress);

    /// The body ended normally.
    fn finish(&self, progress: &Progress);

    /// The body failed or was dropped before its end.
    fn abandon(&self, _progress: &Progress) {}
}

/// Pass-through body stream that reports progress as chunks go by.
///
/// Chunks are yielded exactly as the inner stream produced them.
pub struct ProgressStream<S> {
    inner:       S,
    observer:    Arc<dyn ProgressObserver>,
    started:     Instant,
    transferred: u64,
    total:       Option<u64>,
    done:        bool,
}

impl<S> ProgressStream<S> {
    pub fn new(
        inner: S,
        observer: Arc<dyn ProgressObserver>,
        url: &str,
        total: Option<u64>,
    ) -> Self {
        observer.start(url, total);
        Self {
            inner,
            observer,
            started: Instant::now(),
            transferred: 0,
            total,
            done: false,
        }
    }

    pub fn snapshot(&self) -> Progress {
        Progress {
            bytes_transferred: self.transferred,
            total_bytes:       self.total,
            elapsed:           self.started.elapsed(),
        }
    }
}

impl<S, E> Stream for ProgressStream<S>
where
    S: Stream<Item = Result<Bytes, E>> + Unpin,
{
    type Item = Result<Bytes, E>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        let polled = Pin::new(&mut this.inner).poll_next(cx);

        match &polled {
            Poll::Ready(Some(Ok(chunk))) => {
                this.transferred += chunk.len() as u64;
                this.observer.update(&this.snapshot());
            }
            Poll::Ready(Some(Err(_))) if !this.done => {
                this.done = true;
                this.observer.abandon(&this.snapshot());
            }
            Poll::Ready(None) if !this.done => {
                this.done = true;
                this.observer.finish(&this.snapshot());
            }
            _ => {}
        }

        polled
    }
}

impl<S> Drop for ProgressStream<S> {
    fn drop(&mut self) {
        if !self.done {
            self.observer.abandon(&self.snapshot());
        }
    }
}

const LOG_INTERVAL: Duration = Duration::from_millis(500);

/// Reports progress as throttled log lines.
pub struct LogObserver {
    sink:     Arc<dyn LogSink>,
    interval: Duration,
    state:    Mutex<LogState>,
}

#[derive(Default)]
struct LogState {
    url:         String,
    last_report: Option<Instant>,
}

impl LogObserver {
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            interval: LOG_INTERVAL,
            state: Mutex::new(LogState::default()),
        }
    }

    /// Minimum gap between two progress lines.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    fn url(&self) -> String {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .url
            .clone()
    }
}

impl ProgressObserver for LogObserver {
    fn start(&self, url: &str, total_bytes: Option<u64>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.url = url.to_string();
        state.last_report = Some(Instant::now());
        drop(state);

        match total_bytes {
            Some(total) => self
                .sink
                .info(format_args!("{url}: receiving {}", format_bytes(total))),
            None => self.sink.info(format_args!("{url}: receiving (size unknown)")),
        }
    }

    fn update(&self, progress: &Progress) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let due = state
            .last_report
            .is_none_or(|last| last.elapsed() >= self.interval);
        if !due {
            return;
        }
        state.last_report = Some(Instant::now());
        let url = state.url.clone();
        drop(state);

        self.sink.info(format_args!("{url}: {}", describe(progress)));
    }

    fn finish(&self, progress: &Progress) {
        self.sink.info(format_args!(
            "{}: complete, {} in {:.1}s",
            self.url(),
            format_bytes(progress.bytes_transferred),
            progress.elapsed.as_secs_f64()
        ));
    }

    fn abandon(&self, progress: &Progress) {
        self.sink.warn(format_args!(
            "{}: transfer stopped after {}",
            self.url(),
            format_bytes(progress.bytes_transferred)
        ));
    }
}

fn describe(progress: &Progress) -> String {
    let mut line = match (progress.total_bytes, progress.percentage()) {
        (Some(total), Some(pct)) => format!(
            "{}/{} ({pct:.0}%)",
            format_bytes(progress.bytes_transferred),
            format_bytes(total)
        ),
        _ => format_bytes(progress.bytes_transferred),
    };
    if let Some(rate) = progress.rate_bps() {
        line.push_str(&format!(", {}/s", format_bytes(rate as u64)));
    }
    if let Some(left) = progress.remaining() {
        line.push_str(&format!(", {}s left", left.as_secs()));
    }
    line
}

pub(crate) fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KiB", "MiB", "GiB", "TiB"];
    let mut size = bytes as f64;
    let mut unit = 0;

    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} {}", UNITS[0])
    } else {
        format!("{size:.1} {}", UNITS[unit])
    }
}
