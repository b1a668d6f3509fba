//! Turns periodic torrent snapshots into lifecycle signals.

use super::{TorrentSnapshot, TorrentState, TransferEvent, TransferProgress};

/// Emits `Ready` once, `Progress` while downloading, `Done` once, and an
/// `Error` each time the torrent enters the error state.
#[derive(Debug, Default)]
pub struct EventTranslator {
    ready: bool,
    done: bool,
    in_error: bool,
}

impl EventTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `Done` has been emitted. Later snapshots produce nothing.
    pub fn is_finished(&self) -> bool {
        self.done
    }

    /// Signals implied by a new snapshot, in delivery order.
    pub fn observe(&mut self, snapshot: &TorrentSnapshot) -> Vec<TransferEvent> {
        let mut events = Vec::new();
        if self.done {
            return events;
        }

        if snapshot.state == TorrentState::Error {
            if !self.in_error {
                self.in_error = true;
                let message = snapshot
                    .error
                    .clone()
                    .unwrap_or_else(|| "torrent entered error state".to_string());
                events.push(TransferEvent::Error(message));
            }
            return events;
        }
        self.in_error = false;

        match snapshot.state {
            TorrentState::Downloading | TorrentState::Seeding if !self.ready => {
                self.ready = true;
                events.push(TransferEvent::Ready {
                    total_bytes: snapshot.total_bytes,
                });
            }
            _ => {}
        }

        match snapshot.state {
            TorrentState::Seeding => {
                self.done = true;
                events.push(TransferEvent::Done {
                    total_bytes: snapshot.total_bytes,
                });
            }
            TorrentState::Downloading => {
                events.push(TransferEvent::Progress(TransferProgress::from_snapshot(
                    snapshot,
                )));
            }
            _ => {}
        }

        events
    }
}
