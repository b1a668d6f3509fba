//! Orchestrator types.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::MovieCatalog;
use crate::config::Config;
use crate::farewell::ExitSequence;
use crate::torrent_client::TransferClient;

pub const QUERY_PROMPT: &str = "> Enter Movie name: ";
pub const MORE_PROMPT: &str = "> Press Enter to continue... or enter # of Movie to download: ";
pub const LAST_PROMPT: &str = "> Enter # of Movie to download: ";
pub const QUALITY_PROMPT: &str = "> Please select # of desired quality: ";

/// Shared collaborators for a session.
#[derive(Clone)]
pub struct AppContext {
    pub config: Config,
    pub catalog: Arc<dyn MovieCatalog>,
    pub transfers: Arc<dyn TransferClient>,
    pub exit: ExitSequence,
}

impl AppContext {
    pub fn new(
        config: Config,
        catalog: Arc<dyn MovieCatalog>,
        transfers: Arc<dyn TransferClient>,
        exit: ExitSequence,
    ) -> Self {
        Self {
            config,
            catalog,
            transfers,
            exit,
        }
    }
}

/// How a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEnd {
    /// The download finished.
    Completed,
    /// The input stream closed first.
    InputClosed,
    /// The engine stopped reporting before the download finished.
    Disconnected,
}

/// Why the interactive loop stopped without a started download.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("Input stream closed")]
    InputClosed,
}
