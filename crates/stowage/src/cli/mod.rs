mod app;

pub use app::App;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, anyhow};
use stowage_fetch::{DownloadRequest, Downloader, FetchOptions, ReqwestClient, Timeouts};

use crate::ui::BarObserver;

pub async fn run(app: App) -> anyhow::Result<()> {
    let cache_dir = match app.cache_dir.clone() {
        Some(dir) => dir,
        None => default_cache_dir()?,
    };
    std::fs::create_dir_all(&cache_dir)
        .with_context(|| format!("failed to create cache directory {}", cache_dir.display()))?;

    let mut builder = ReqwestClient::builder();
    if let Some(secs) = app.connect_timeout {
        builder = builder.connect_timeout(Duration::from_secs(secs));
    }
    let client = builder.build().context("failed to build HTTP client")?;

    let mut downloader = Downloader::new(client).with_options(options(&app));
    if app.progress {
        downloader = downloader.with_observer(Arc::new(BarObserver::new()));
    }

    let request = DownloadRequest::new(&cache_dir, &app.url).progress(app.progress);
    let (path, outcome) = downloader
        .download_with_outcome(&request)
        .await
        .with_context(|| format!("failed to fetch {}", app.url))?;

    tracing::debug!("{}: {outcome}", app.url);
    println!("{}", path.display());
    Ok(())
}

fn options(app: &App) -> FetchOptions {
    let mut timeouts = Timeouts::new();
    if let Some(secs) = app.probe_timeout {
        timeouts = timeouts.probe(Duration::from_secs(secs));
    }
    if let Some(secs) = app.transfer_timeout {
        timeouts = timeouts.transfer(Duration::from_secs(secs));
    }

    FetchOptions::default()
        .timeouts(timeouts)
        .checksum_header(app.checksum_header.clone())
        .strict_hash(app.strict_hash)
}

fn default_cache_dir() -> anyhow::Result<PathBuf> {
    home::home_dir()
        .map(|home| home.join(".cache").join("stowage"))
        .ok_or_else(|| anyhow!("cannot determine home directory; pass --cache-dir"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_options_from_flags() {
        let app = App::try_parse_from([
            "stowage",
            "https://example.com/a.tar",
            "--probe-timeout",
            "3",
            "--transfer-timeout",
            "60",
            "--checksum-header",
            "X-Sha256",
        ])
        .unwrap();

        let options = options(&app);
        assert_eq!(options.timeouts.probe, Some(Duration::from_secs(3)));
        assert_eq!(options.timeouts.transfer, Some(Duration::from_secs(60)));
        assert_eq!(options.checksum_header, "X-Sha256");
        assert!(!options.strict_hash);
    }
}
