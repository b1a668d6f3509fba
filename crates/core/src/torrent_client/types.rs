//! Types for transfer engine operations.

use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during transfer engine operations.
#[derive(Debug, Error)]
pub enum TransferError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Torrent not found: {0}")]
    TorrentNotFound(String),

    #[error("Invalid magnet link: {0}")]
    InvalidLocator(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// State of a torrent as sampled from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TorrentState {
    /// Checking existing files before transfer.
    Checking,
    /// Downloading from peers.
    Downloading,
    /// Every piece is present.
    Seeding,
    /// Transfer is paused.
    Paused,
    /// Engine reported an error.
    Error,
}

impl TorrentState {
    /// Returns the string representation for logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            TorrentState::Checking => "checking",
            TorrentState::Downloading => "downloading",
            TorrentState::Seeding => "seeding",
            TorrentState::Paused => "paused",
            TorrentState::Error => "error",
        }
    }
}

/// One sample of a torrent's state and counters.
#[derive(Debug, Clone, PartialEq)]
pub struct TorrentSnapshot {
    pub state: TorrentState,
    /// Bytes verified on disk.
    pub progress_bytes: u64,
    /// Payload size in bytes.
    pub total_bytes: u64,
    /// Current download speed in bytes/second.
    pub download_speed: u64,
    /// Engine error message, when `state` is `Error`.
    pub error: Option<String>,
}

/// Raw progress counters reported while downloading.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferProgress {
    /// Fraction complete (0.0 - 1.0).
    pub fraction: f64,
    /// Downloaded bytes.
    pub downloaded_bytes: u64,
    /// Payload size in bytes.
    pub total_bytes: u64,
    /// Current download speed in bytes/second.
    pub download_speed: u64,
    /// Estimated seconds until done (None while the speed is 0).
    pub eta_secs: Option<u64>,
}

impl TransferProgress {
    /// Derive progress from a snapshot.
    pub fn from_snapshot(snapshot: &TorrentSnapshot) -> Self {
        let fraction = if snapshot.total_bytes > 0 {
            snapshot.progress_bytes as f64 / snapshot.total_bytes as f64
        } else {
            0.0
        };

        let eta_secs = if snapshot.download_speed > 0 {
            let remaining = snapshot.total_bytes.saturating_sub(snapshot.progress_bytes);
            Some(remaining / snapshot.download_speed)
        } else {
            None
        };

        Self {
            fraction,
            downloaded_bytes: snapshot.progress_bytes,
            total_bytes: snapshot.total_bytes,
            download_speed: snapshot.download_speed,
            eta_secs,
        }
    }
}

/// Lifecycle signal delivered by a running transfer.
#[derive(Debug, Clone, PartialEq)]
pub enum TransferEvent {
    /// Metadata resolved; payload transfer can begin.
    Ready { total_bytes: u64 },
    /// Progress sample.
    Progress(TransferProgress),
    /// Every piece downloaded.
    Done { total_bytes: u64 },
    /// The engine reported a problem. The transfer may or may not recover.
    Error(String),
}

/// Request to start a transfer.
#[derive(Debug, Clone, PartialEq)]
pub struct TransferRequest {
    /// Magnet URI.
    pub uri: String,
    /// Where the payload is written.
    pub download_path: PathBuf,
}

impl TransferRequest {
    /// Create a magnet request writing into the current directory.
    pub fn magnet(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            download_path: PathBuf::from("."),
        }
    }

    /// Set the download path.
    pub fn with_download_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.download_path = path.into();
        self
    }

    /// Info hash named by the magnet URI, lowercased.
    pub fn info_hash(&self) -> Option<String> {
        extract_hash_from_magnet(&self.uri)
    }
}

/// Extract the info hash from the `xt=urn:btih:` parameter of a magnet URI.
pub fn extract_hash_from_magnet(uri: &str) -> Option<String> {
    let query = uri.strip_prefix("magnet:?")?;
    query
        .split('&')
        .find_map(|param| param.strip_prefix("xt=urn:btih:"))
        .filter(|hash| !hash.is_empty())
        .map(|hash| hash.to_lowercase())
}

/// A started transfer: its id and the stream of its lifecycle signals.
#[derive(Debug)]
pub struct TransferHandle {
    id: String,
    events: mpsc::Receiver<TransferEvent>,
}

impl TransferHandle {
    pub fn new(id: impl Into<String>, events: mpsc::Receiver<TransferEvent>) -> Self {
        Self {
            id: id.into(),
            events,
        }
    }

    /// Identifier to pass back to [`TransferClient::release`].
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Next lifecycle signal. `None` once the engine stops reporting.
    pub async fn next_event(&mut self) -> Option<TransferEvent> {
        self.events.recv().await
    }
}

/// Trait for transfer engine backends.
#[async_trait]
pub trait TransferClient: Send + Sync {
    /// Backend name for logging.
    fn name(&self) -> &str;

    /// Hand a magnet to the engine and start reporting its lifecycle.
    ///
    /// Returns as soon as the engine has accepted the request. Metadata
    /// resolution happens in the background and is reported as `Ready`.
    async fn start(&self, request: TransferRequest) -> Result<TransferHandle, TransferError>;

    /// Stop the transfer and free engine resources. Downloaded files are kept.
    async fn release(&self, id: &str) -> Result<(), TransferError>;
}
