//! Drives a single download from start to farewell.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::{sleep_until, Instant};
use tracing::{debug, info, warn};

use super::progress::ProgressUpdate;
use super::throttle::ProgressThrottle;
use crate::config::DownloadConfig;
use crate::console::{Console, Severity};
use crate::farewell::ExitSequence;
use crate::movie::{DownloadStatus, Movie};
use crate::torrent_client::{
    TransferClient, TransferError, TransferEvent, TransferHandle, TransferRequest,
};

/// How [`DownloadCoordinator::run`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The payload finished and the farewell ran.
    Completed,
    /// The engine stopped reporting before the payload finished.
    Disconnected,
}

/// Whether more signals are expected after handling one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventFlow {
    Continue,
    Finished,
}

/// Owns the active movie and reacts to its transfer signals.
pub struct DownloadCoordinator {
    client: Arc<dyn TransferClient>,
    exit: ExitSequence,
    download_path: PathBuf,
    throttle: ProgressThrottle<ProgressUpdate>,
    movie: Option<Movie>,
    handle: Option<TransferHandle>,
}

impl DownloadCoordinator {
    pub fn new(client: Arc<dyn TransferClient>, exit: ExitSequence, config: &DownloadConfig) -> Self {
        Self {
            client,
            exit,
            download_path: config.path.clone(),
            throttle: ProgressThrottle::new(Duration::from_millis(config.throttle_ms)),
            movie: None,
            handle: None,
        }
    }

    /// The movie being downloaded, once started.
    pub fn movie(&self) -> Option<&Movie> {
        self.movie.as_ref()
    }

    pub fn status(&self) -> Option<DownloadStatus> {
        self.movie.as_ref().map(Movie::status)
    }

    /// Hand the movie's magnet to the engine and announce the download.
    ///
    /// On failure the coordinator stays idle and can be started again.
    pub async fn start(
        &mut self,
        movie: Movie,
        console: &mut dyn Console,
    ) -> Result<(), TransferError> {
        let request = TransferRequest::magnet(movie.magnet_uri())
            .with_download_path(self.download_path.clone());

        let handle = self.client.start(request).await?;

        info!(
            name = %movie.name,
            quality = %movie.quality,
            hash = %handle.id(),
            client = self.client.name(),
            "Download started"
        );
        console.log(
            Severity::Info,
            &format!("Downloading {}, {}", movie.name, movie.quality),
        );

        self.throttle.discard();
        self.movie = Some(movie);
        self.handle = Some(handle);
        Ok(())
    }

    /// Consume transfer signals until the download completes or the engine
    /// goes quiet for good.
    pub async fn run(&mut self, console: &mut dyn Console) -> DownloadOutcome {
        loop {
            let deadline = self.throttle.deadline();
            let Some(handle) = self.handle.as_mut() else {
                return DownloadOutcome::Disconnected;
            };

            let received = tokio::select! {
                event = handle.next_event() => Some(event),
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => None,
            };

            let now = Instant::now();
            match received {
                Some(Some(event)) => {
                    self.flush_due(now, console);
                    if self.handle_event(event, now, console).await == EventFlow::Finished {
                        return DownloadOutcome::Completed;
                    }
                }
                Some(None) => {
                    warn!(status = ?self.status(), "Transfer stopped reporting");
                    self.handle = None;
                    return DownloadOutcome::Disconnected;
                }
                None => self.flush_due(now, console),
            }
        }
    }

    /// React to one transfer signal observed at `now`.
    pub async fn handle_event(
        &mut self,
        event: TransferEvent,
        now: Instant,
        console: &mut dyn Console,
    ) -> EventFlow {
        let Some(movie) = self.movie.as_mut() else {
            debug!(?event, "Signal with no active download");
            return EventFlow::Continue;
        };

        match event {
            TransferEvent::Ready { total_bytes } => {
                if movie.advance(DownloadStatus::MetadataReady) {
                    debug!(total_bytes, "Metadata ready");
                    console.progress_start(&ProgressUpdate::initial(&movie.size));
                }
                EventFlow::Continue
            }
            TransferEvent::Progress(progress) => {
                if movie.status() == DownloadStatus::MetadataReady {
                    self.throttle
                        .offer(ProgressUpdate::from_transfer(&progress, &movie.size), now);
                }
                EventFlow::Continue
            }
            TransferEvent::Done { total_bytes } => {
                if movie.status() != DownloadStatus::MetadataReady {
                    debug!(status = movie.status().as_str(), "Ignoring early done signal");
                    return EventFlow::Continue;
                }

                self.throttle.discard();
                console.progress_finish(&ProgressUpdate::finished(&movie.size));
                movie.advance(DownloadStatus::Complete);
                info!(name = %movie.name, total_bytes, "Download complete");

                if let Some(handle) = self.handle.take() {
                    if let Err(e) = self.client.release(handle.id()).await {
                        warn!(hash = %handle.id(), error = %e, "Failed to release transfer");
                    }
                }

                self.exit.on_complete(console).await;
                EventFlow::Finished
            }
            TransferEvent::Error(message) => {
                debug!(error = %message, "Transfer error");
                console.log(Severity::Error, &format!("Download error: {}", message));
                EventFlow::Continue
            }
        }
    }

    /// Render the throttled progress value if its window has closed.
    pub fn flush_due(&mut self, now: Instant, console: &mut dyn Console) {
        if let Some(update) = self.throttle.take_due(now) {
            console.progress_update(&update);
        }
    }

    /// The input stream closed: say goodbye according to the download state.
    pub fn abandon(&self, console: &mut dyn Console) {
        self.exit.on_input_closed(self.movie.as_ref(), console);
    }
}
