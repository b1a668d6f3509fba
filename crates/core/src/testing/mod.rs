//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of every collaborator trait,
//! allowing the whole interactive flow to run without a terminal, a network
//! or a torrent engine.
//!
//! # Example
//!
//! ```rust,ignore
//! use torrential_core::testing::{fixtures, MockCatalog, MockTransferClient, ScriptedPrompter};
//!
//! let catalog = MockCatalog::new();
//! catalog.push_page(fixtures::inception_page()).await;
//!
//! let transfers = MockTransferClient::new();
//! transfers.set_script(vec![ScriptedEvent::now(TransferEvent::Ready { total_bytes: 10 })]).await;
//!
//! let mut prompter = ScriptedPrompter::new(["inception", "1", "2"]);
//! ```

mod mock_catalog;
mod mock_console;
mod mock_joke_source;
mod mock_transfer_client;

pub use mock_catalog::MockCatalog;
pub use mock_console::{RecordingConsole, ScriptedPrompter};
pub use mock_joke_source::MockJokeSource;
pub use mock_transfer_client::{MockTransferClient, ScriptedEvent};

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::catalog::{CandidateRelease, CatalogPage, ReleaseVariant};

    /// Create a release variant with a derived size.
    pub fn variant(quality: &str, hash: &str) -> ReleaseVariant {
        ReleaseVariant {
            quality: quality.to_string(),
            kind: "bluray".to_string(),
            size: "1.0 GB".to_string(),
            hash: hash.to_string(),
        }
    }

    /// Releases titled "Movie 1 (2000)" through "Movie n (2000)", one 720p variant each.
    pub fn numbered_releases(n: usize) -> Vec<CandidateRelease> {
        (1..=n)
            .map(|i| CandidateRelease {
                title: format!("Movie {} (2000)", i),
                runtime_minutes: 90 + i as u32,
                variants: vec![variant("720p", &format!("{:040X}", i))],
            })
            .collect()
    }

    /// Inception with a 720p and a 1080p encode.
    pub fn inception() -> CandidateRelease {
        CandidateRelease {
            title: "Inception (2010)".to_string(),
            runtime_minutes: 148,
            variants: vec![
                ReleaseVariant {
                    quality: "720p".to_string(),
                    kind: "bluray".to_string(),
                    size: "1.1 GB".to_string(),
                    hash: "DEF456".to_string(),
                },
                ReleaseVariant {
                    quality: "1080p".to_string(),
                    kind: "bluray".to_string(),
                    size: "2.1 GB".to_string(),
                    hash: "ABC123".to_string(),
                },
            ],
        }
    }

    /// Inception with only its 1080p encode listed.
    pub fn inception_1080p_only() -> CandidateRelease {
        let mut release = inception();
        release.variants.retain(|v| v.quality == "1080p");
        release
    }

    /// A single-result page holding [`inception`].
    pub fn inception_page() -> CatalogPage {
        CatalogPage {
            total_count: 1,
            movies: vec![inception()],
        }
    }
}
