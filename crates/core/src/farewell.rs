//! Closing messages.
//!
//! A finished download ends with a thank-you and a dad joke fetched from
//! icanhazdadjoke.com. An early exit with an unfinished download ends with a
//! note that the transfer resumes on the next run.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::config::FarewellConfig;
use crate::console::{Console, Severity};
use crate::movie::Movie;

pub const THANK_YOU: &str =
    "Thank you for using Torrential! I hope we continue to make you smile :)";

pub const RESUME_NOTICE: &str = "We are sorry to see you go :( We'll resume from where we left off if you download again at the same location.";

/// Errors from fetching a joke.
#[derive(Debug, Error)]
pub enum FarewellError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Joke API returned status {0}")]
    Status(u16),

    #[error("Joke API returned an empty joke")]
    Empty,
}

/// Where closing jokes come from.
#[async_trait]
pub trait JokeSource: Send + Sync {
    async fn fetch_joke(&self) -> Result<String, FarewellError>;
}

#[derive(Debug, Deserialize)]
struct DadJokeResponse {
    joke: String,
}

/// icanhazdadjoke.com client.
pub struct DadJokeClient {
    client: Client,
    url: String,
}

impl DadJokeClient {
    pub fn new(config: &FarewellConfig) -> Result<Self, FarewellError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl JokeSource for DadJokeClient {
    async fn fetch_joke(&self) -> Result<String, FarewellError> {
        let response = self
            .client
            .get(&self.url)
            .header(ACCEPT, "application/json")
            .header(
                USER_AGENT,
                concat!("torrential/", env!("CARGO_PKG_VERSION")),
            )
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FarewellError::Status(response.status().as_u16()));
        }

        let body: DadJokeResponse = response.json().await?;
        let joke = body.joke.trim();
        if joke.is_empty() {
            return Err(FarewellError::Empty);
        }

        Ok(joke.to_string())
    }
}

/// The two ways a session can end.
#[derive(Clone, Default)]
pub struct ExitSequence {
    jokes: Option<Arc<dyn JokeSource>>,
}

impl ExitSequence {
    /// `None` disables jokes; the thank-you is still shown.
    pub fn new(jokes: Option<Arc<dyn JokeSource>>) -> Self {
        Self { jokes }
    }

    /// Closing after a completed download.
    pub async fn on_complete(&self, console: &mut dyn Console) {
        // Nothing is shown when the joke can't be fetched
        if let Err(e) = self.thank_and_joke(console).await {
            debug!(error = %e, "Skipping farewell joke");
        }
    }

    async fn thank_and_joke(&self, console: &mut dyn Console) -> Result<(), FarewellError> {
        let Some(jokes) = &self.jokes else {
            console.log(Severity::Info, THANK_YOU);
            return Ok(());
        };

        let joke = jokes.fetch_joke().await?;
        console.log(Severity::Info, THANK_YOU);
        console.farewell(&joke);
        Ok(())
    }

    /// Closing after the input stream ends. `movie` is the active download, if any.
    pub fn on_input_closed(&self, movie: Option<&Movie>, console: &mut dyn Console) {
        if movie.is_some_and(|m| !m.is_complete()) {
            console.log(Severity::Warning, RESUME_NOTICE);
        }
    }
}
