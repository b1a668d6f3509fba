//! Display-ready progress values.

use serde::Serialize;

use crate::format::{readable_size, readable_size_with_precision, readable_time};
use crate::torrent_client::TransferProgress;

/// One redraw of the progress display, already in human units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressUpdate {
    /// Completion in percent (0.0 - 100.0), for bar position.
    pub percent: f64,
    /// e.g. "42.7%"
    pub percentage: String,
    /// e.g. "912.40 MB"
    pub downloaded: String,
    /// Catalog size of the release, e.g. "2.1 GB"
    pub size: String,
    /// e.g. "3.2 MB/s"
    pub speed: String,
    /// e.g. "5m 12s"
    pub eta: String,
}

impl ProgressUpdate {
    /// State shown as soon as metadata resolves.
    pub fn initial(size: &str) -> Self {
        Self {
            percent: 0.0,
            percentage: "0%".to_string(),
            downloaded: "0 B".to_string(),
            size: size.to_string(),
            speed: "- B/s".to_string(),
            eta: "\u{221E}".to_string(),
        }
    }

    pub fn from_transfer(progress: &TransferProgress, size: &str) -> Self {
        let percent = (progress.fraction * 100.0).clamp(0.0, 100.0);

        Self {
            percent,
            percentage: format!("{:.1}%", percent),
            downloaded: readable_size(progress.downloaded_bytes),
            size: size.to_string(),
            speed: format!(
                "{}/s",
                readable_size_with_precision(progress.download_speed, 1)
            ),
            eta: progress
                .eta_secs
                .map(readable_time)
                .unwrap_or_else(|| "\u{221E}".to_string()),
        }
    }

    /// Final state: the whole release is on disk.
    pub fn finished(size: &str) -> Self {
        Self {
            percent: 100.0,
            percentage: "100%".to_string(),
            downloaded: size.to_string(),
            size: size.to_string(),
            speed: "-".to_string(),
            eta: "0s".to_string(),
        }
    }
}
