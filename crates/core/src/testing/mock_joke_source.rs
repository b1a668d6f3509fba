//! Mock joke source for testing.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::farewell::{FarewellError, JokeSource};

/// Serves a fixed joke, or always fails.
#[derive(Debug)]
pub struct MockJokeSource {
    joke: Option<String>,
    fetches: AtomicUsize,
}

impl MockJokeSource {
    pub fn with_joke(joke: impl Into<String>) -> Self {
        Self {
            joke: Some(joke.into()),
            fetches: AtomicUsize::new(0),
        }
    }

    /// Every fetch fails with [`FarewellError::Empty`].
    pub fn failing() -> Self {
        Self {
            joke: None,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JokeSource for MockJokeSource {
    async fn fetch_joke(&self) -> Result<String, FarewellError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        self.joke.clone().ok_or(FarewellError::Empty)
    }
}
