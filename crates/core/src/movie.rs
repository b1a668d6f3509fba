//! The release chosen for download and its lifecycle.

use serde::{Deserialize, Serialize};

/// Download lifecycle of the active movie.
///
/// Ordered: a status only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DownloadStatus {
    /// Torrent handed to the engine, metadata not yet resolved.
    Pending = 0,
    /// Metadata resolved, payload transfer under way.
    MetadataReady = 1,
    /// All pieces downloaded.
    Complete = 2,
}

impl DownloadStatus {
    /// Returns the string representation for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            DownloadStatus::Pending => "pending",
            DownloadStatus::MetadataReady => "metadata_ready",
            DownloadStatus::Complete => "complete",
        }
    }
}

/// A release the user picked, at the quality they picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Display title, e.g. "Inception (2010)".
    pub name: String,
    /// Encode label, e.g. "1080p".
    pub quality: String,
    /// Size as reported by the catalog, e.g. "2.1 GB".
    pub size: String,
    /// BitTorrent info hash.
    pub hash: String,
    status: DownloadStatus,
}

impl Movie {
    /// Create a movie in the `Pending` state.
    pub fn new(
        name: impl Into<String>,
        quality: impl Into<String>,
        size: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            quality: quality.into(),
            size: size.into(),
            hash: hash.into(),
            status: DownloadStatus::Pending,
        }
    }

    pub fn status(&self) -> DownloadStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.status == DownloadStatus::Complete
    }

    /// Magnet URI for this release.
    pub fn magnet_uri(&self) -> String {
        format!("magnet:?xt=urn:btih:{}", self.hash)
    }

    /// Move to `next` if it is exactly one step ahead of the current status.
    ///
    /// Returns `false` and leaves the status untouched otherwise.
    pub fn advance(&mut self, next: DownloadStatus) -> bool {
        if next as u8 == self.status as u8 + 1 {
            self.status = next;
            true
        } else {
            false
        }
    }
}
