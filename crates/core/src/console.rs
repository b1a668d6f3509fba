//! Terminal collaborators: where lines come from and where output goes.

use async_trait::async_trait;

use crate::catalog::{CandidateRelease, ReleaseVariant};
use crate::download::ProgressUpdate;

/// Severity tag of a user-facing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// Source of user input lines.
#[async_trait]
pub trait Prompter: Send {
    /// Show `prompt` and wait for a line, without its line terminator.
    ///
    /// `None` means the input stream closed.
    async fn read_line(&mut self, prompt: &str) -> Option<String>;

    /// Resolve once the input stream closes. Lines typed meanwhile are discarded.
    async fn closed(&mut self);
}

/// Everything the engine shows to the user.
pub trait Console: Send {
    fn log(&mut self, severity: Severity, message: &str);

    /// Show a block of results numbered from `first_number`.
    fn show_releases(&mut self, first_number: usize, releases: &[CandidateRelease]);

    /// Show the downloadable encodes of a release, numbered from 1.
    fn show_variants(&mut self, release: &CandidateRelease, variants: &[ReleaseVariant]);

    fn progress_start(&mut self, update: &ProgressUpdate);

    fn progress_update(&mut self, update: &ProgressUpdate);

    fn progress_finish(&mut self, update: &ProgressUpdate);

    /// Show the closing joke.
    fn farewell(&mut self, joke: &str);
}
