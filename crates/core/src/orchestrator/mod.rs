//! Interactive session driver.
//!
//! The orchestrator runs the query / page / select / quality loop until a
//! download has been handed to the transfer engine:
//! - **Search**: one `SearchSession` per query, paged on demand
//! - **Selection**: movie number, then quality number
//! - **Start**: failures to start go back to the query prompt

mod runner;
mod types;

pub use runner::Orchestrator;
pub use types::{
    AppContext, OrchestratorError, SessionEnd, LAST_PROMPT, MORE_PROMPT, QUALITY_PROMPT,
    QUERY_PROMPT,
};
