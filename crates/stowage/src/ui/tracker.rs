use std::sync::{Mutex, PoisonError};

use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use once_cell::sync::Lazy;
use stowage_fetch::{Progress, ProgressObserver};

const PB_STYLE: &str = "{spinner:.blue} {msg:.cyan} [{elapsed_precise}] {wide_bar:.cyan/blue} {bytes}/{total_bytes} ({bytes_per_sec}, {eta})";

const PB_STYLE_UNKNOWN: &str = "{spinner:.blue} {msg:.cyan} [{elapsed_precise}] {bytes} ({bytes_per_sec})";

const TICK: &str = "⠁⠂⠄⡀⢀⠠⠐⠈ ";

const PB_CHARS: &str = "█▓▒░  ";

static PB_TEMPLATE: Lazy<Option<ProgressStyle>> = Lazy::new(|| style(PB_STYLE));

static PB_TEMPLATE_UNKNOWN: Lazy<Option<ProgressStyle>> = Lazy::new(|| style(PB_STYLE_UNKNOWN));

fn style(template: &str) -> Option<ProgressStyle> {
    match ProgressStyle::with_template(template) {
        Ok(pb_style) => Some(pb_style.tick_chars(TICK).progress_chars(PB_CHARS)),
        Err(_) => None,
    }
}

/// Renders a download as an `indicatif` bar on stderr.
pub struct BarObserver {
    pb:     Mutex<Option<ProgressBar>>,
    target: fn() -> ProgressDrawTarget,
}

impl Default for BarObserver {
    fn default() -> Self { Self::new() }
}

impl BarObserver {
    pub fn new() -> Self {
        Self {
            pb:     Mutex::new(None),
            target: ProgressDrawTarget::stderr,
        }
    }

    #[cfg(test)]
    fn hidden() -> Self {
        Self {
            pb:     Mutex::new(None),
            target: ProgressDrawTarget::hidden,
        }
    }

    fn with_bar(&self, f: impl FnOnce(&ProgressBar)) {
        let guard = self.pb.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pb) = guard.as_ref() {
            f(pb);
        }
    }
}

impl ProgressObserver for BarObserver {
    fn start(&self, url: &str, total_bytes: Option<u64>) {
        let (pb, template) = match total_bytes {
            Some(len) => (ProgressBar::new(len), PB_TEMPLATE.as_ref()),
            None => (ProgressBar::no_length(), PB_TEMPLATE_UNKNOWN.as_ref()),
        };
        pb.set_draw_target((self.target)());

        let pb = match template {
            Some(style) => pb.with_style(style.clone()),
            None => pb,
        };
        let name = url.rsplit('/').next().unwrap_or(url).to_string();
        let pb = pb.with_message(name);

        *self.pb.lock().unwrap_or_else(PoisonError::into_inner) = Some(pb);
    }

    fn update(&self, progress: &Progress) {
        self.with_bar(|pb| pb.set_position(progress.bytes_transferred));
    }

    fn finish(&self, progress: &Progress) {
        self.with_bar(|pb| {
            pb.set_position(progress.bytes_transferred);
            pb.finish();
        });
    }

    fn abandon(&self, progress: &Progress) {
        self.with_bar(|pb| {
            pb.set_position(progress.bytes_transferred);
            pb.abandon();
        });
    }
}
