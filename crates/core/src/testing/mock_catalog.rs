//! Mock movie catalog for testing.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::catalog::{CandidateRelease, CatalogError, CatalogPage, MovieCatalog};

/// Mock implementation of the MovieCatalog trait.
///
/// Pages queued with [`push_page`](Self::push_page) are served first, in
/// order. Once the queue is empty, pages are cut from the listing set with
/// [`set_catalog`](Self::set_catalog).
#[derive(Debug, Default)]
pub struct MockCatalog {
    /// Full listing served page by page.
    listing: Arc<RwLock<Vec<CandidateRelease>>>,
    /// Canned pages, served before the listing.
    pages: Arc<RwLock<VecDeque<CatalogPage>>>,
    /// Recorded (query, page) requests.
    requests: Arc<RwLock<Vec<(String, u32)>>>,
    /// If set, the next request will fail with this error.
    next_error: Arc<RwLock<Option<CatalogError>>>,
}

impl MockCatalog {
    /// Create an empty mock catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full listing.
    pub async fn set_catalog(&self, releases: Vec<CandidateRelease>) {
        *self.listing.write().await = releases;
    }

    /// Queue a canned page.
    pub async fn push_page(&self, page: CatalogPage) {
        self.pages.write().await.push_back(page);
    }

    /// Configure the next request to fail with the given error.
    pub async fn set_next_error(&self, error: CatalogError) {
        *self.next_error.write().await = Some(error);
    }

    /// Page numbers requested so far, failed requests included.
    pub async fn requested_pages(&self) -> Vec<u32> {
        self.requests.read().await.iter().map(|(_, page)| *page).collect()
    }

    /// Queries searched so far, one entry per first-page request.
    pub async fn queries(&self) -> Vec<String> {
        self.requests
            .read()
            .await
            .iter()
            .filter(|(_, page)| *page == 1)
            .map(|(query, _)| query.clone())
            .collect()
    }
}

#[async_trait]
impl MovieCatalog for MockCatalog {
    fn name(&self) -> &str {
        "mock"
    }

    async fn list_movies(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<CatalogPage, CatalogError> {
        self.requests.write().await.push((query.to_string(), page));

        if let Some(error) = self.next_error.write().await.take() {
            return Err(error);
        }

        if let Some(page) = self.pages.write().await.pop_front() {
            return Ok(page);
        }

        let listing = self.listing.read().await;
        let start = (page.saturating_sub(1) as usize) * limit as usize;
        let movies = listing
            .iter()
            .skip(start)
            .take(limit as usize)
            .cloned()
            .collect();

        Ok(CatalogPage {
            total_count: listing.len() as u32,
            movies,
        })
    }
}
