//! Scripted input and recorded output for testing.

use std::collections::VecDeque;
use std::time::Duration;

use async_trait::async_trait;

use crate::catalog::{CandidateRelease, ReleaseVariant};
use crate::console::{Console, Prompter, Severity};
use crate::download::ProgressUpdate;

/// Replays a fixed list of input lines, then reports the input as closed.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    lines: VecDeque<String>,
    prompts: Vec<String>,
    close_after: Option<Duration>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            prompts: Vec::new(),
            close_after: None,
        }
    }

    /// Make [`Prompter::closed`] resolve after `delay`. Without this it never
    /// resolves.
    pub fn close_after(mut self, delay: Duration) -> Self {
        self.close_after = Some(delay);
        self
    }

    /// Every prompt shown, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.clone()
    }
}

#[async_trait]
impl Prompter for ScriptedPrompter {
    async fn read_line(&mut self, prompt: &str) -> Option<String> {
        self.prompts.push(prompt.to_string());
        self.lines.pop_front()
    }

    async fn closed(&mut self) {
        self.lines.clear();
        match self.close_after {
            Some(delay) => tokio::time::sleep(delay).await,
            None => std::future::pending().await,
        }
    }
}

/// Records everything shown instead of drawing it.
#[derive(Debug, Default)]
pub struct RecordingConsole {
    lines: Vec<(Severity, String)>,
    release_blocks: Vec<(usize, usize)>,
    variant_blocks: Vec<String>,
    starts: Vec<ProgressUpdate>,
    updates: Vec<ProgressUpdate>,
    finishes: Vec<ProgressUpdate>,
    jokes: Vec<String>,
}

impl RecordingConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[(Severity, String)] {
        &self.lines
    }

    pub fn has_line(&self, severity: Severity, text: &str) -> bool {
        self.lines
            .iter()
            .any(|(s, line)| *s == severity && line == text)
    }

    pub fn lines_with(&self, severity: Severity) -> Vec<String> {
        self.lines
            .iter()
            .filter(|(s, _)| *s == severity)
            .map(|(_, line)| line.clone())
            .collect()
    }

    /// (first number, row count) of each results block shown.
    pub fn release_blocks(&self) -> Vec<(usize, usize)> {
        self.release_blocks.clone()
    }

    /// Titles of each quality table shown.
    pub fn variant_blocks(&self) -> Vec<String> {
        self.variant_blocks.clone()
    }

    pub fn progress_starts(&self) -> &[ProgressUpdate] {
        &self.starts
    }

    pub fn progress_updates(&self) -> &[ProgressUpdate] {
        &self.updates
    }

    pub fn progress_finishes(&self) -> &[ProgressUpdate] {
        &self.finishes
    }

    pub fn jokes(&self) -> Vec<String> {
        self.jokes.clone()
    }
}

impl Console for RecordingConsole {
    fn log(&mut self, severity: Severity, message: &str) {
        self.lines.push((severity, message.to_string()));
    }

    fn show_releases(&mut self, first_number: usize, releases: &[CandidateRelease]) {
        self.release_blocks.push((first_number, releases.len()));
    }

    fn show_variants(&mut self, release: &CandidateRelease, _variants: &[ReleaseVariant]) {
        self.variant_blocks.push(release.title.clone());
    }

    fn progress_start(&mut self, update: &ProgressUpdate) {
        self.starts.push(update.clone());
    }

    fn progress_update(&mut self, update: &ProgressUpdate) {
        self.updates.push(update.clone());
    }

    fn progress_finish(&mut self, update: &ProgressUpdate) {
        self.finishes.push(update.clone());
    }

    fn farewell(&mut self, joke: &str) {
        self.jokes.push(joke.to_string());
    }
}
