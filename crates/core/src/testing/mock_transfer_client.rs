//! Mock transfer client for testing.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{mpsc, RwLock};

use crate::torrent_client::{
    TransferClient, TransferError, TransferEvent, TransferHandle, TransferRequest,
};

/// A lifecycle signal delivered `after` the previous one.
#[derive(Debug, Clone)]
pub struct ScriptedEvent {
    pub after: Duration,
    pub event: TransferEvent,
}

impl ScriptedEvent {
    pub fn now(event: TransferEvent) -> Self {
        Self::after(Duration::ZERO, event)
    }

    pub fn after(after: Duration, event: TransferEvent) -> Self {
        Self { after, event }
    }
}

/// Mock implementation of the TransferClient trait.
///
/// Provides controllable behavior for testing:
/// - Track started transfers and releases for assertions
/// - Replay a script of lifecycle signals on every start
/// - Simulate start failures
#[derive(Debug)]
pub struct MockTransferClient {
    /// Recorded start requests.
    requests: Arc<RwLock<Vec<TransferRequest>>>,
    /// Recorded release ids.
    releases: Arc<RwLock<Vec<String>>>,
    /// Signals replayed for each started transfer.
    script: Arc<RwLock<Vec<ScriptedEvent>>>,
    /// Keep the signal channel open once the script is played out.
    hold_open: Arc<RwLock<bool>>,
    /// If set, the next start will fail with this error.
    next_error: Arc<RwLock<Option<TransferError>>>,
}

impl Default for MockTransferClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransferClient {
    /// Create a mock client with an empty script.
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(Vec::new())),
            releases: Arc::new(RwLock::new(Vec::new())),
            script: Arc::new(RwLock::new(Vec::new())),
            hold_open: Arc::new(RwLock::new(false)),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Signals to replay on the next start.
    pub async fn set_script(&self, script: Vec<ScriptedEvent>) {
        *self.script.write().await = script;
    }

    /// Leave the channel open after the script, as a stalled engine would.
    pub async fn hold_open(&self) {
        *self.hold_open.write().await = true;
    }

    /// Configure the next start to fail with the given error.
    pub async fn set_next_error(&self, error: TransferError) {
        *self.next_error.write().await = Some(error);
    }

    pub async fn requests(&self) -> Vec<TransferRequest> {
        self.requests.read().await.clone()
    }

    pub async fn releases(&self) -> Vec<String> {
        self.releases.read().await.clone()
    }
}

#[async_trait]
impl TransferClient for MockTransferClient {
    fn name(&self) -> &str {
        "mock"
    }

    async fn start(&self, request: TransferRequest) -> Result<TransferHandle, TransferError> {
        self.requests.write().await.push(request.clone());

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        let id = request
            .info_hash()
            .ok_or_else(|| TransferError::InvalidLocator(request.uri.clone()))?;

        let script = self.script.read().await.clone();
        let hold_open = *self.hold_open.read().await;
        let (tx, rx) = mpsc::channel(script.len().max(1));

        tokio::spawn(async move {
            for step in script {
                if !step.after.is_zero() {
                    tokio::time::sleep(step.after).await;
                }
                if tx.send(step.event).await.is_err() {
                    return;
                }
            }
            if hold_open {
                tx.closed().await;
            }
        });

        Ok(TransferHandle::new(id, rx))
    }

    async fn release(&self, id: &str) -> Result<(), TransferError> {
        self.releases.write().await.push(id.to_string());
        Ok(())
    }
}
