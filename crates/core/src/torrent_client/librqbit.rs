//! librqbit embedded torrent client implementation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use librqbit::{
    AddTorrent as RqbitAddTorrent, AddTorrentOptions, AddTorrentResponse, ManagedTorrent, Session,
    SessionOptions,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::events::EventTranslator;
use super::{
    TorrentSnapshot, TorrentState, TransferClient, TransferError, TransferEvent, TransferHandle,
    TransferRequest,
};
use crate::config::DownloadConfig;

/// Lifecycle signals buffered between the sampler and the consumer.
const EVENT_BUFFER: usize = 64;

/// Embedded librqbit torrent client.
pub struct LibrqbitClient {
    session: Arc<Session>,
    poll_interval: Duration,
}

impl LibrqbitClient {
    /// Create a new librqbit client from configuration.
    pub async fn new(config: &DownloadConfig) -> Result<Self, TransferError> {
        let download_path = PathBuf::from(&config.path);

        // Ensure download directory exists
        if !download_path.exists() {
            std::fs::create_dir_all(&download_path).map_err(|e| {
                TransferError::ConnectionFailed(format!(
                    "Failed to create download directory: {}",
                    e
                ))
            })?;
        }

        let mut opts = SessionOptions::default();

        if !config.enable_dht {
            opts.disable_dht = true;
        }

        // Range, not RangeInclusive
        if let Some(port) = config.listen_port {
            opts.listen_port_range = Some(port..port.saturating_add(1));
        }

        info!(
            download_path = %download_path.display(),
            dht_enabled = !opts.disable_dht,
            "Initializing librqbit session"
        );

        let session = Session::new_with_opts(download_path, opts)
            .await
            .map_err(|e| {
                TransferError::ConnectionFailed(format!(
                    "Failed to initialize librqbit session: {}",
                    e
                ))
            })?;

        if let Some(port) = session.tcp_listen_port() {
            info!(port = port, "librqbit listening on TCP port");
        }

        Ok(Self {
            session,
            poll_interval: Duration::from_millis(config.poll_interval_ms),
        })
    }

    /// Format info hash as lowercase hex string.
    fn format_hash(hash: &librqbit_core::Id20) -> String {
        hash.as_string()
    }

    /// Sample a managed torrent.
    fn snapshot(torrent: &ManagedTorrent) -> TorrentSnapshot {
        let stats = torrent.stats();
        let state = Self::map_state(&stats.state, torrent.is_paused(), stats.finished);

        // librqbit's "mbps" is MiB/s, see its Display impl
        let download_speed = stats
            .live
            .as_ref()
            .map(|live| (live.download_speed.mbps * 1024.0 * 1024.0) as u64)
            .unwrap_or(0);

        TorrentSnapshot {
            state,
            progress_bytes: stats.progress_bytes,
            total_bytes: stats.total_bytes,
            download_speed,
            error: None,
        }
    }

    /// Map librqbit state to our TorrentState.
    fn map_state(
        state: &librqbit::TorrentStatsState,
        is_paused: bool,
        is_finished: bool,
    ) -> TorrentState {
        use librqbit::TorrentStatsState;

        if is_paused {
            return TorrentState::Paused;
        }

        match state {
            TorrentStatsState::Initializing => TorrentState::Checking,
            TorrentStatsState::Live => {
                if is_finished {
                    TorrentState::Seeding
                } else {
                    TorrentState::Downloading
                }
            }
            TorrentStatsState::Paused => TorrentState::Paused,
            TorrentStatsState::Error => TorrentState::Error,
        }
    }

    /// Find a torrent by hash.
    fn find_torrent(&self, hash: &str) -> Option<Arc<ManagedTorrent>> {
        let hash_lower = hash.to_lowercase();

        self.session.with_torrents(|iter| {
            for (_, torrent) in iter {
                if Self::format_hash(&torrent.info_hash()) == hash_lower {
                    return Some(torrent.clone());
                }
            }
            None
        })
    }

    /// Report `message`, then hold the channel open until the receiver goes
    /// away. The download stalls; the session keeps waiting on input.
    async fn stall(tx: mpsc::Sender<TransferEvent>, message: String) {
        warn!(error = %message, "Transfer stalled");
        if tx.send(TransferEvent::Error(message)).await.is_ok() {
            tx.closed().await;
        }
    }

    /// Resolve metadata, then sample the torrent until it completes or the
    /// receiver goes away.
    async fn drive(
        session: Arc<Session>,
        request: TransferRequest,
        poll_interval: Duration,
        tx: mpsc::Sender<TransferEvent>,
    ) {
        let opts = AddTorrentOptions {
            overwrite: true,
            output_folder: Some(request.download_path.display().to_string()),
            ..Default::default()
        };

        // Rare torrents may resolve slowly; there is no deadline
        let response = match session
            .add_torrent(RqbitAddTorrent::from_url(request.uri.clone()), Some(opts))
            .await
        {
            Ok(response) => response,
            Err(e) => {
                Self::stall(tx, format!("Failed to add torrent: {}", e)).await;
                return;
            }
        };

        let handle = match response {
            AddTorrentResponse::Added(_, handle) => handle,
            AddTorrentResponse::AlreadyManaged(_, handle) => {
                warn!(hash = %Self::format_hash(&handle.info_hash()), "Torrent already exists");
                handle
            }
            AddTorrentResponse::ListOnly(_) => {
                Self::stall(tx, "Torrent was added in list-only mode".to_string()).await;
                return;
            }
        };

        debug!(
            hash = %Self::format_hash(&handle.info_hash()),
            name = ?handle.name(),
            "Torrent metadata resolved"
        );

        let mut translator = EventTranslator::new();
        let mut ticker = tokio::time::interval(poll_interval);

        loop {
            ticker.tick().await;

            for event in translator.observe(&Self::snapshot(&handle)) {
                if tx.send(event).await.is_err() {
                    debug!("Transfer event receiver dropped, stopping sampler");
                    return;
                }
            }

            if translator.is_finished() {
                return;
            }
        }
    }
}

#[async_trait]
impl TransferClient for LibrqbitClient {
    fn name(&self) -> &str {
        "librqbit"
    }

    async fn start(&self, request: TransferRequest) -> Result<TransferHandle, TransferError> {
        let id = request
            .info_hash()
            .ok_or_else(|| TransferError::InvalidLocator(request.uri.clone()))?;

        let (tx, rx) = mpsc::channel(EVENT_BUFFER);

        debug!(hash = %id, path = %request.download_path.display(), "Starting transfer");

        tokio::spawn(Self::drive(
            Arc::clone(&self.session),
            request,
            self.poll_interval,
            tx,
        ));

        Ok(TransferHandle::new(id, rx))
    }

    async fn release(&self, id: &str) -> Result<(), TransferError> {
        let torrent = self
            .find_torrent(id)
            .ok_or_else(|| TransferError::TorrentNotFound(id.to_string()))?;

        self.session
            .delete(torrent.id().into(), false)
            .await
            .map_err(|e| TransferError::ApiError(format!("Failed to remove torrent: {}", e)))?;

        debug!(hash = %id, "Torrent released");

        Ok(())
    }
}
