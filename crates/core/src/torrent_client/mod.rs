//! Transfer engine abstraction.
//!
//! This module provides a `TransferClient` trait that starts a magnet transfer
//! and reports its lifecycle over a channel. `LibrqbitClient` embeds the
//! librqbit engine and samples it periodically.

mod events;
mod librqbit;
mod types;

pub use events::EventTranslator;
pub use librqbit::LibrqbitClient;
pub use types::*;
