use std::time::Duration;

/// Snapshot of a running transfer, handed to progress observers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Bytes received so far.
    pub bytes_transferred: u64,

    /// Expected size from `Content-Length`, if the server sent one.
    pub total_bytes: Option<u64>,

    /// Time since the body started streaming.
    pub elapsed: Duration,
}

impl Progress {
    /// Average rate since the start, in bytes per second.
    #[must_use]
    pub fn rate_bps(&self) -> Option<f64> {
        let secs = self.elapsed.as_secs_f64();
        (secs > 0.0).then(|| self.bytes_transferred as f64 / secs)
    }

    /// Estimated time left at the average rate; `None` when it cannot be
    /// represented as a `Duration`.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        let total = self.total_bytes?;
        let left = total.saturating_sub(self.bytes_transferred);
        if left == 0 {
            return Some(Duration::ZERO);
        }
        let rate = self.rate_bps().filter(|r| *r > 0.0)?;
        Duration::try_from_secs_f64(left as f64 / rate).ok()
    }

    /// Percentage of completion; `None` if the total is unknown.
    #[must_use]
    pub fn percentage(&self) -> Option<f64> {
        self.total_bytes.map(|total| {
            if total == 0 {
                100.0
            } else {
                (self.bytes_transferred as f64 / total as f64) * 100.0
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(bytes: u64, total: Option<u64>, secs: u64) -> Progress {
        Progress {
            bytes_transferred: bytes,
            total_bytes:       total,
            elapsed:           Duration::from_secs(secs),
        }
    }

    #[test]
    fn test_rate_and_remaining() {
        let p = snapshot(500, Some(1500), 5);
        assert_eq!(p.rate_bps(), Some(100.0));
        assert_eq!(p.remaining(), Some(Duration::from_secs(10)));
        assert_eq!(p.percentage().map(f64::round), Some(33.0));
    }

    #[test]
    fn test_unknown_total() {
        let p = snapshot(500, None, 5);
        assert_eq!(p.remaining(), None);
        assert_eq!(p.percentage(), None);
    }

    #[test]
    fn test_no_elapsed_time() {
        let p = snapshot(0, Some(10), 0);
        assert_eq!(p.rate_bps(), None);
        assert_eq!(p.remaining(), None);
    }

    #[test]
    fn test_complete() {
        let p = snapshot(10, Some(10), 1);
        assert_eq!(p.remaining(), Some(Duration::ZERO));
        assert_eq!(p.percentage(), Some(100.0));
    }

    #[test]
    fn test_remaining_beyond_duration_range() {
        let p = Progress {
            bytes_transferred: 1,
            total_bytes:       Some(u64::MAX),
            elapsed:           Duration::from_secs(2),
        };
        assert_eq!(p.remaining(), None);
    }
}
