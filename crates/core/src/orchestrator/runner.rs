//! Orchestrator implementation.

use tracing::{debug, info, warn};

use crate::catalog::CandidateRelease;
use crate::console::{Console, Prompter, Severity};
use crate::download::{DownloadCoordinator, DownloadOutcome};
use crate::movie::Movie;
use crate::search::{
    interpret_quality_input, interpret_release_input, PageOutcome, QualityChoice, ReleaseChoice,
    SearchSession,
};

use super::types::{
    AppContext, OrchestratorError, SessionEnd, LAST_PROMPT, MORE_PROMPT, QUALITY_PROMPT,
    QUERY_PROMPT,
};

/// Drives the interactive loop until a download is running.
pub struct Orchestrator<'a> {
    ctx: &'a AppContext,
}

impl<'a> Orchestrator<'a> {
    pub fn new(ctx: &'a AppContext) -> Self {
        Self { ctx }
    }

    /// Run a whole session: select a movie, download it, say goodbye.
    ///
    /// Closing the input at any point ends the session, with a resume notice
    /// if a download was left unfinished.
    pub async fn run_session(
        &self,
        prompter: &mut dyn Prompter,
        console: &mut dyn Console,
    ) -> SessionEnd {
        let mut coordinator = match self.run(prompter, console).await {
            Ok(coordinator) => coordinator,
            Err(OrchestratorError::InputClosed) => {
                self.ctx.exit.on_input_closed(None, console);
                return SessionEnd::InputClosed;
            }
        };

        let outcome = tokio::select! {
            outcome = coordinator.run(console) => Some(outcome),
            _ = prompter.closed() => None,
        };

        match outcome {
            Some(DownloadOutcome::Completed) => SessionEnd::Completed,
            Some(DownloadOutcome::Disconnected) => {
                console.log(Severity::Error, "Transfer engine stopped reporting");
                coordinator.abandon(console);
                SessionEnd::Disconnected
            }
            None => {
                info!(status = ?coordinator.status(), "Input closed during download");
                coordinator.abandon(console);
                SessionEnd::InputClosed
            }
        }
    }

    /// Loop until a download has started, then hand its coordinator back.
    ///
    /// Catalog and transfer failures are reported and the loop goes back to
    /// the query prompt; only a closed input stream ends it early.
    pub async fn run(
        &self,
        prompter: &mut dyn Prompter,
        console: &mut dyn Console,
    ) -> Result<DownloadCoordinator, OrchestratorError> {
        loop {
            let release = self.search(prompter, console).await?;

            let Some(movie) = self.choose_quality(&release, prompter, console).await? else {
                continue;
            };

            let mut coordinator = DownloadCoordinator::new(
                self.ctx.transfers.clone(),
                self.ctx.exit.clone(),
                &self.ctx.config.download,
            );

            match coordinator.start(movie, console).await {
                Ok(()) => return Ok(coordinator),
                Err(e) => {
                    warn!(error = %e, "Failed to start download");
                    console.log(Severity::Error, &e.to_string());
                }
            }
        }
    }

    /// Ask for queries and page through results until a movie is picked.
    pub async fn search(
        &self,
        prompter: &mut dyn Prompter,
        console: &mut dyn Console,
    ) -> Result<CandidateRelease, OrchestratorError> {
        let catalog = self.ctx.catalog.as_ref();
        let page_size = self.ctx.config.catalog.page_size;
        let policy = self.ctx.config.selection.exhausted_invalid;

        'query: loop {
            let query = read(prompter, QUERY_PROMPT).await?;
            let query = query.trim();
            if query.is_empty() {
                continue;
            }

            info!(query = %query, catalog = catalog.name(), "Searching");
            let mut session = SearchSession::new(query, page_size);

            'page: loop {
                match session.fetch_next_page(catalog).await {
                    Ok(PageOutcome::Shown { first, last }) => {
                        if first == 1 {
                            console.log(
                                Severity::Info,
                                &format!("Found {} result(s)", session.total_count()),
                            );
                        }
                        console.log(
                            Severity::Info,
                            &format!(
                                "Showing {}-{} of {} result(s). Note: Run-time=0s might not be accurate.",
                                first,
                                last,
                                session.total_count()
                            ),
                        );
                        console.show_releases(first, &session.shown()[first - 1..last]);
                    }
                    Ok(PageOutcome::NoResults) => {
                        console.log(Severity::Info, "Found 0 result(s)");
                        continue 'query;
                    }
                    Ok(PageOutcome::Exhausted) => {
                        debug!(query = %query, shown = session.shown_count(), "Catalog exhausted early");
                        console.log(
                            Severity::Info,
                            &format!("No more results. Showing all {} result(s).", session.shown_count()),
                        );
                    }
                    Err(e) => {
                        warn!(query = %query, error = %e, network = e.is_network(), "Catalog request failed");
                        console.log(Severity::Error, &e.to_string());
                        continue 'query;
                    }
                }

                loop {
                    let prompt = if session.has_more() {
                        MORE_PROMPT
                    } else {
                        LAST_PROMPT
                    };
                    let input = read(prompter, prompt).await?;

                    match interpret_release_input(
                        &input,
                        session.shown_count(),
                        session.has_more(),
                        policy,
                    ) {
                        ReleaseChoice::Selected(number) => {
                            if let Some(release) = session.get(number) {
                                return Ok(release.clone());
                            }
                        }
                        ReleaseChoice::NextPage => continue 'page,
                        ReleaseChoice::Reprompt => {}
                        ReleaseChoice::RestartQuery => continue 'query,
                    }
                }
            }
        }
    }

    /// Ask which encode of `release` to download.
    ///
    /// `Ok(None)` means the user went back to searching.
    pub async fn choose_quality(
        &self,
        release: &CandidateRelease,
        prompter: &mut dyn Prompter,
        console: &mut dyn Console,
    ) -> Result<Option<Movie>, OrchestratorError> {
        if release.variants.is_empty() {
            console.log(
                Severity::Warning,
                &format!("No downloads available for {}", release.title),
            );
            return Ok(None);
        }

        console.show_variants(release, &release.variants);

        loop {
            let input = read(prompter, QUALITY_PROMPT).await?;

            match interpret_quality_input(&input, release.variants.len()) {
                QualityChoice::Selected(number) => {
                    let variant = &release.variants[number - 1];
                    return Ok(Some(Movie::new(
                        release.title.clone(),
                        variant.quality.clone(),
                        variant.size.clone(),
                        variant.hash.clone(),
                    )));
                }
                QualityChoice::Reprompt => {}
                QualityChoice::BackToSearch => return Ok(None),
            }
        }
    }
}

async fn read(prompter: &mut dyn Prompter, prompt: &str) -> Result<String, OrchestratorError> {
    prompter
        .read_line(prompt)
        .await
        .ok_or(OrchestratorError::InputClosed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::catalog::{CatalogError, CatalogPage, ReleaseVariant};
    use crate::config::{Config, ExhaustedPolicy};
    use crate::farewell::ExitSequence;
    use crate::testing::{
        fixtures, MockCatalog, MockTransferClient, RecordingConsole, ScriptedPrompter,
    };
    use crate::torrent_client::TransferError;

    fn context(catalog: Arc<MockCatalog>, transfers: Arc<MockTransferClient>) -> AppContext {
        AppContext::new(Config::default(), catalog, transfers, ExitSequence::default())
    }

    fn paged(total: u32, count: usize) -> CatalogPage {
        CatalogPage {
            total_count: total,
            movies: fixtures::numbered_releases(count),
        }
    }

    #[tokio::test]
    async fn test_empty_query_reprompts() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_page(paged(1, 1)).await;
        let ctx = context(catalog.clone(), Arc::new(MockTransferClient::new()));
        let mut prompter = ScriptedPrompter::new(["", "   ", "movie", "1"]);
        let mut console = RecordingConsole::new();

        let release = Orchestrator::new(&ctx)
            .search(&mut prompter, &mut console)
            .await
            .unwrap();

        assert_eq!(release.title, "Movie 1 (2000)");
        assert_eq!(catalog.queries().await, vec!["movie".to_string()]);
        assert_eq!(
            prompter.prompts(),
            vec![QUERY_PROMPT, QUERY_PROMPT, QUERY_PROMPT, LAST_PROMPT]
        );
    }

    #[tokio::test]
    async fn test_paging_and_selection() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_page(paged(20, 15)).await;
        catalog.push_page(CatalogPage {
            total_count: 20,
            movies: fixtures::numbered_releases(20).split_off(15),
        }).await;
        let ctx = context(catalog.clone(), Arc::new(MockTransferClient::new()));
        let mut prompter = ScriptedPrompter::new(["movie", "", "18"]);
        let mut console = RecordingConsole::new();

        let release = Orchestrator::new(&ctx)
            .search(&mut prompter, &mut console)
            .await
            .unwrap();

        assert_eq!(release.title, "Movie 18 (2000)");
        assert_eq!(catalog.requested_pages().await, vec![1, 2]);
        assert_eq!(prompter.prompts()[1], MORE_PROMPT);
        assert_eq!(prompter.prompts()[2], LAST_PROMPT);
        assert!(console.has_line(Severity::Info, "Found 20 result(s)"));
        assert!(console.has_line(
            Severity::Info,
            "Showing 16-20 of 20 result(s). Note: Run-time=0s might not be accurate."
        ));
        assert_eq!(console.release_blocks(), vec![(1, 15), (16, 5)]);
    }

    #[tokio::test]
    async fn test_invalid_entry_while_more_pages_reprompts() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_page(paged(30, 15)).await;
        let ctx = context(catalog.clone(), Arc::new(MockTransferClient::new()));
        let mut prompter = ScriptedPrompter::new(["movie", "abc", "16", "0", "3"]);
        let mut console = RecordingConsole::new();

        let release = Orchestrator::new(&ctx)
            .search(&mut prompter, &mut console)
            .await
            .unwrap();

        assert_eq!(release.title, "Movie 3 (2000)");
        assert_eq!(catalog.requested_pages().await, vec![1]);
    }

    #[tokio::test]
    async fn test_exhausted_invalid_restarts_when_configured() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_page(paged(2, 2)).await;
        catalog.push_page(paged(1, 1)).await;
        let mut ctx = context(catalog.clone(), Arc::new(MockTransferClient::new()));
        ctx.config.selection.exhausted_invalid = ExhaustedPolicy::RestartQuery;
        let mut prompter = ScriptedPrompter::new(["first", "9", "second", "1"]);
        let mut console = RecordingConsole::new();

        Orchestrator::new(&ctx)
            .search(&mut prompter, &mut console)
            .await
            .unwrap();

        assert_eq!(catalog.queries().await, vec!["first".to_string(), "second".to_string()]);
    }

    #[tokio::test]
    async fn test_exhausted_invalid_reprompts_by_default() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_page(paged(2, 2)).await;
        let ctx = context(catalog.clone(), Arc::new(MockTransferClient::new()));
        let mut prompter = ScriptedPrompter::new(["first", "9", "2"]);
        let mut console = RecordingConsole::new();

        let release = Orchestrator::new(&ctx)
            .search(&mut prompter, &mut console)
            .await
            .unwrap();

        assert_eq!(release.title, "Movie 2 (2000)");
        assert_eq!(catalog.queries().await.len(), 1);
    }

    #[tokio::test]
    async fn test_catalog_error_reprompts_query() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.set_next_error(CatalogError::ConnectionFailed("no route".to_string())).await;
        catalog.push_page(paged(1, 1)).await;
        let ctx = context(catalog.clone(), Arc::new(MockTransferClient::new()));
        let mut prompter = ScriptedPrompter::new(["movie", "movie", "1"]);
        let mut console = RecordingConsole::new();

        let release = Orchestrator::new(&ctx)
            .search(&mut prompter, &mut console)
            .await
            .unwrap();

        assert_eq!(release.title, "Movie 1 (2000)");
        assert_eq!(console.lines_with(Severity::Error).len(), 1);
    }

    #[tokio::test]
    async fn test_no_results_reprompts_query() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_page(CatalogPage::default()).await;
        let ctx = context(catalog.clone(), Arc::new(MockTransferClient::new()));
        let mut prompter = ScriptedPrompter::new(["nothing"]);
        let mut console = RecordingConsole::new();

        let result = Orchestrator::new(&ctx)
            .search(&mut prompter, &mut console)
            .await;

        assert_eq!(result.unwrap_err(), OrchestratorError::InputClosed);
        assert!(console.has_line(Severity::Info, "Found 0 result(s)"));
        assert_eq!(prompter.prompts(), vec![QUERY_PROMPT, QUERY_PROMPT]);
    }

    #[tokio::test]
    async fn test_quality_selection() {
        let ctx = context(
            Arc::new(MockCatalog::new()),
            Arc::new(MockTransferClient::new()),
        );
        let release = fixtures::inception();
        let mut prompter = ScriptedPrompter::new(["5", "x", "2"]);
        let mut console = RecordingConsole::new();

        let movie = Orchestrator::new(&ctx)
            .choose_quality(&release, &mut prompter, &mut console)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(movie.quality, "1080p");
        assert_eq!(movie.hash, "ABC123");
        assert_eq!(prompter.prompts().len(), 3);
        assert_eq!(console.variant_blocks(), vec!["Inception (2010)".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_quality_goes_back() {
        let ctx = context(
            Arc::new(MockCatalog::new()),
            Arc::new(MockTransferClient::new()),
        );
        let mut prompter = ScriptedPrompter::new([""]);
        let mut console = RecordingConsole::new();

        let movie = Orchestrator::new(&ctx)
            .choose_quality(&fixtures::inception(), &mut prompter, &mut console)
            .await
            .unwrap();

        assert!(movie.is_none());
    }

    #[tokio::test]
    async fn test_release_without_variants() {
        let ctx = context(
            Arc::new(MockCatalog::new()),
            Arc::new(MockTransferClient::new()),
        );
        let release = CandidateRelease {
            title: "Lost Film (1920)".to_string(),
            runtime_minutes: 0,
            variants: Vec::<ReleaseVariant>::new(),
        };
        let mut prompter = ScriptedPrompter::new(Vec::<&str>::new());
        let mut console = RecordingConsole::new();

        let movie = Orchestrator::new(&ctx)
            .choose_quality(&release, &mut prompter, &mut console)
            .await
            .unwrap();

        assert!(movie.is_none());
        assert!(prompter.prompts().is_empty());
        assert!(console.has_line(Severity::Warning, "No downloads available for Lost Film (1920)"));
    }

    #[tokio::test]
    async fn test_start_failure_returns_to_query() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_page(fixtures::inception_page()).await;
        catalog.push_page(fixtures::inception_page()).await;
        let transfers = Arc::new(MockTransferClient::new());
        transfers.set_next_error(TransferError::ConnectionFailed("engine down".to_string())).await;
        let ctx = context(catalog.clone(), transfers.clone());
        let mut prompter = ScriptedPrompter::new(["inception", "1", "1", "inception", "1", "1"]);
        let mut console = RecordingConsole::new();

        let coordinator = Orchestrator::new(&ctx)
            .run(&mut prompter, &mut console)
            .await
            .unwrap();

        assert_eq!(transfers.requests().await.len(), 2);
        assert_eq!(console.lines_with(Severity::Error).len(), 1);
        assert_eq!(coordinator.movie().map(|m| m.quality.as_str()), Some("720p"));
    }

    #[tokio::test]
    async fn test_input_closed_mid_search() {
        let catalog = Arc::new(MockCatalog::new());
        catalog.push_page(paged(30, 15)).await;
        let ctx = context(catalog, Arc::new(MockTransferClient::new()));
        let mut prompter = ScriptedPrompter::new(["movie"]);
        let mut console = RecordingConsole::new();

        let result = Orchestrator::new(&ctx)
            .run(&mut prompter, &mut console)
            .await;

        assert!(matches!(result, Err(OrchestratorError::InputClosed)));
    }
}
