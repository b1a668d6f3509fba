//! YTS list_movies API client.
//!
//! No API key. Unused filters are left out of the query string entirely.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::types::{CandidateRelease, CatalogPage, ReleaseVariant};
use super::{CatalogError, MovieCatalog};
use crate::config::CatalogConfig;

/// YTS API client.
pub struct YtsClient {
    client: Client,
    config: CatalogConfig,
}

impl YtsClient {
    /// Create a new client. The configured timeout applies to every request.
    pub fn new(config: CatalogConfig) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs as u64))
            .build()?;

        Ok(Self { client, config })
    }

    fn params<'a>(&'a self, query: &'a str, page: u32, limit: u32) -> ListMoviesParams<'a> {
        ListMoviesParams {
            limit,
            page: page.to_string(),
            quality: self.config.quality.as_deref(),
            minimum_rating: self.config.minimum_rating,
            query_term: query,
            genre: self.config.genre.as_deref(),
            sort_by: &self.config.sort_by,
            order_by: self.config.order_by.as_deref(),
            with_rt_ratings: self.config.with_rt_ratings,
        }
    }
}

#[async_trait]
impl MovieCatalog for YtsClient {
    fn name(&self) -> &str {
        "yts"
    }

    async fn list_movies(
        &self,
        query: &str,
        page: u32,
        limit: u32,
    ) -> Result<CatalogPage, CatalogError> {
        debug!(query = %query, page, limit, "YTS movie search");

        let response = self
            .client
            .get(&self.config.url)
            .query(&self.params(query, page, limit))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(CatalogError::ApiError {
                status: status.as_u16(),
                message: body.chars().take(200).collect(),
            });
        }

        let body = response.text().await?;
        parse_list_movies(&body)
    }
}

/// Turn a list_movies response body into a page, rejecting non-"ok" answers.
fn parse_list_movies(body: &str) -> Result<CatalogPage, CatalogError> {
    let envelope: YtsEnvelope = serde_json::from_str(body).map_err(|e| {
        CatalogError::ParseError(format!("Failed to parse movie list response: {}", e))
    })?;

    if envelope.status != "ok" {
        return Err(CatalogError::Rejected {
            status: envelope.status,
            message: envelope.status_message,
        });
    }

    let data = envelope
        .data
        .ok_or_else(|| CatalogError::ParseError("Response has no data section".to_string()))?;

    Ok(data.into())
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct ListMoviesParams<'a> {
    limit: u32,
    page: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    minimum_rating: Option<u8>,
    query_term: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    genre: Option<&'a str>,
    sort_by: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    order_by: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    with_rt_ratings: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct YtsEnvelope {
    status: String,
    #[serde(default)]
    status_message: String,
    #[serde(default)]
    data: Option<YtsData>,
}

#[derive(Debug, Deserialize)]
struct YtsData {
    movie_count: u32,
    /// Absent once the query has no (more) matches.
    #[serde(default)]
    movies: Option<Vec<YtsMovie>>,
}

#[derive(Debug, Deserialize)]
struct YtsMovie {
    title_long: String,
    #[serde(default)]
    runtime: u32,
    #[serde(default)]
    torrents: Vec<YtsTorrent>,
}

#[derive(Debug, Deserialize)]
struct YtsTorrent {
    quality: String,
    #[serde(rename = "type", default)]
    kind: String,
    size: String,
    hash: String,
}

impl From<YtsData> for CatalogPage {
    fn from(d: YtsData) -> Self {
        Self {
            total_count: d.movie_count,
            movies: d
                .movies
                .unwrap_or_default()
                .into_iter()
                .map(|m| m.into())
                .collect(),
        }
    }
}

impl From<YtsMovie> for CandidateRelease {
    fn from(m: YtsMovie) -> Self {
        Self {
            title: m.title_long,
            runtime_minutes: m.runtime,
            variants: m.torrents.into_iter().map(|t| t.into()).collect(),
        }
    }
}

impl From<YtsTorrent> for ReleaseVariant {
    fn from(t: YtsTorrent) -> Self {
        Self {
            quality: t.quality,
            kind: t.kind,
            size: t.size,
            hash: t.hash,
        }
    }
}
