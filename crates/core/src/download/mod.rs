//! Download coordination.
//!
//! `DownloadCoordinator` reacts to the ready/progress/done/error signals of a
//! single transfer, advances the movie's status and redraws the progress
//! display at a throttled rate.

mod coordinator;
mod progress;
mod throttle;

pub use coordinator::{DownloadCoordinator, DownloadOutcome, EventFlow};
pub use progress::ProgressUpdate;
pub use throttle::ProgressThrottle;
