pub mod catalog;
pub mod config;
pub mod console;
pub mod download;
pub mod farewell;
pub mod format;
pub mod movie;
pub mod orchestrator;
pub mod search;
pub mod testing;
pub mod torrent_client;

pub use catalog::{
    CandidateRelease, CatalogError, CatalogPage, MovieCatalog, ReleaseVariant, YtsClient,
};
pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, ExhaustedPolicy,
};
pub use console::{Console, Prompter, Severity};
pub use download::{DownloadCoordinator, DownloadOutcome, ProgressThrottle, ProgressUpdate};
pub use farewell::{DadJokeClient, ExitSequence, FarewellError, JokeSource};
pub use movie::{DownloadStatus, Movie};
pub use orchestrator::{AppContext, Orchestrator, OrchestratorError, SessionEnd};
pub use search::{PageOutcome, SearchSession};
pub use torrent_client::{
    LibrqbitClient, TransferClient, TransferError, TransferEvent, TransferHandle,
    TransferProgress, TransferRequest,
};
