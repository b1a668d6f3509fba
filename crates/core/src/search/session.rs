//! Paginated accumulation of one query's results.

use tracing::debug;

use crate::catalog::{CandidateRelease, CatalogError, MovieCatalog};

/// What a page fetch added to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Entries `first..=last` (1-based) are newly shown.
    Shown { first: usize, last: usize },
    /// The query matched nothing. Ask for a different query.
    NoResults,
    /// The catalog ran dry before reaching its advertised total.
    Exhausted,
}

/// Results of a single query, fetched forward one page at a time.
///
/// `shown_count <= results.len() <= total_count` holds after every fetch.
#[derive(Debug, Clone)]
pub struct SearchSession {
    query: String,
    page_size: u32,
    results: Vec<CandidateRelease>,
    total_count: usize,
    shown_count: usize,
    pages_fetched: u32,
}

impl SearchSession {
    pub fn new(query: impl Into<String>, page_size: u32) -> Self {
        Self {
            query: query.into(),
            page_size,
            results: Vec::new(),
            total_count: 0,
            shown_count: 0,
            pages_fetched: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub fn total_count(&self) -> usize {
        self.total_count
    }

    pub fn shown_count(&self) -> usize {
        self.shown_count
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }

    /// Everything shown to the user so far, in server order.
    pub fn shown(&self) -> &[CandidateRelease] {
        &self.results[..self.shown_count]
    }

    /// A shown result by its 1-based display number.
    pub fn get(&self, number: usize) -> Option<&CandidateRelease> {
        number
            .checked_sub(1)
            .and_then(|i| self.shown().get(i))
    }

    /// Whether the catalog has results beyond those already shown.
    pub fn has_more(&self) -> bool {
        self.shown_count < self.total_count
    }

    /// Fetch and show the next page.
    ///
    /// Nothing changes on error, so the same page can be requested again.
    pub async fn fetch_next_page(
        &mut self,
        catalog: &dyn MovieCatalog,
    ) -> Result<PageOutcome, CatalogError> {
        let page_number = self.pages_fetched + 1;
        let page = catalog
            .list_movies(&self.query, page_number, self.page_size)
            .await?;

        self.pages_fetched = page_number;
        self.total_count = (page.total_count as usize).max(self.results.len());

        let remaining = self.total_count - self.results.len();
        let take = page.movies.len().min(remaining);

        debug!(
            query = %self.query,
            page = page_number,
            received = page.movies.len(),
            total = self.total_count,
            "Fetched catalog page"
        );

        if take == 0 {
            if self.results.is_empty() {
                self.total_count = 0;
                return Ok(PageOutcome::NoResults);
            }
            self.total_count = self.results.len();
            return Ok(PageOutcome::Exhausted);
        }

        let first = self.shown_count + 1;
        self.results.extend(page.movies.into_iter().take(take));
        self.shown_count = self.results.len();

        Ok(PageOutcome::Shown {
            first,
            last: self.shown_count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogPage;
    use crate::testing::{fixtures, MockCatalog};

    #[tokio::test]
    async fn test_first_page_sets_total_and_shown() {
        let catalog = MockCatalog::new();
        catalog.set_catalog(fixtures::numbered_releases(40)).await;

        let mut session = SearchSession::new("movie", 15);
        let outcome = session.fetch_next_page(&catalog).await.unwrap();

        assert_eq!(outcome, PageOutcome::Shown { first: 1, last: 15 });
        assert_eq!(session.total_count(), 40);
        assert_eq!(session.shown_count(), 15);
        assert!(session.has_more());
    }

    #[tokio::test]
    async fn test_shown_count_accounting() {
        let catalog = MockCatalog::new();
        catalog.set_catalog(fixtures::numbered_releases(40)).await;

        let mut session = SearchSession::new("movie", 15);
        for k in 1..=3usize {
            session.fetch_next_page(&catalog).await.unwrap();
            assert_eq!(session.shown_count(), (k * 15).min(40));
            assert!(session.shown_count() <= session.total_count());
        }
        assert!(!session.has_more());
        assert_eq!(session.pages_fetched(), 3);
    }

    #[tokio::test]
    async fn test_last_page_is_remainder() {
        let catalog = MockCatalog::new();
        catalog.set_catalog(fixtures::numbered_releases(20)).await;

        let mut session = SearchSession::new("movie", 15);
        session.fetch_next_page(&catalog).await.unwrap();
        let outcome = session.fetch_next_page(&catalog).await.unwrap();

        assert_eq!(outcome, PageOutcome::Shown { first: 16, last: 20 });
        assert_eq!(session.get(20).unwrap().title, "Movie 20 (2000)");
        assert!(session.get(21).is_none());
        assert!(session.get(0).is_none());
    }

    #[tokio::test]
    async fn test_no_results() {
        let catalog = MockCatalog::new();

        let mut session = SearchSession::new("nothing", 15);
        let outcome = session.fetch_next_page(&catalog).await.unwrap();

        assert_eq!(outcome, PageOutcome::NoResults);
        assert_eq!(session.shown_count(), 0);
        assert!(!session.has_more());
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_session_untouched() {
        let catalog = MockCatalog::new();
        catalog.set_catalog(fixtures::numbered_releases(30)).await;

        let mut session = SearchSession::new("movie", 15);
        session.fetch_next_page(&catalog).await.unwrap();

        catalog.set_next_error(CatalogError::Timeout).await;
        let result = session.fetch_next_page(&catalog).await;
        assert!(matches!(result, Err(CatalogError::Timeout)));
        assert_eq!(session.shown_count(), 15);
        assert_eq!(session.pages_fetched(), 1);

        // retrying requests the same page
        let outcome = session.fetch_next_page(&catalog).await.unwrap();
        assert_eq!(outcome, PageOutcome::Shown { first: 16, last: 30 });
        assert_eq!(catalog.requested_pages().await, vec![1, 2, 2]);
    }

    #[tokio::test]
    async fn test_catalog_running_dry_marks_exhausted() {
        let catalog = MockCatalog::new();
        catalog
            .push_page(CatalogPage {
                total_count: 50,
                movies: fixtures::numbered_releases(15),
            })
            .await;
        catalog
            .push_page(CatalogPage {
                total_count: 50,
                movies: vec![],
            })
            .await;

        let mut session = SearchSession::new("movie", 15);
        session.fetch_next_page(&catalog).await.unwrap();
        let outcome = session.fetch_next_page(&catalog).await.unwrap();

        assert_eq!(outcome, PageOutcome::Exhausted);
        assert_eq!(session.total_count(), 15);
        assert!(!session.has_more());
    }

    #[tokio::test]
    async fn test_oversized_page_is_capped_at_total() {
        let catalog = MockCatalog::new();
        catalog
            .push_page(CatalogPage {
                total_count: 3,
                movies: fixtures::numbered_releases(5),
            })
            .await;

        let mut session = SearchSession::new("movie", 15);
        let outcome = session.fetch_next_page(&catalog).await.unwrap();

        assert_eq!(outcome, PageOutcome::Shown { first: 1, last: 3 });
        assert_eq!(session.shown().len(), 3);
    }
}
