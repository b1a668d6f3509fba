//! Catalog listing types.

use serde::{Deserialize, Serialize};

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogPage {
    /// Total matches for the query across all pages.
    pub total_count: u32,
    /// Releases on this page, in server order.
    pub movies: Vec<CandidateRelease>,
}

/// A release as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRelease {
    /// Title with year, e.g. "Inception (2010)".
    pub title: String,
    /// Runtime in minutes. Often 0 when the catalog does not know it.
    pub runtime_minutes: u32,
    /// Available encodes.
    #[serde(default)]
    pub variants: Vec<ReleaseVariant>,
}

/// A single downloadable encode of a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseVariant {
    /// e.g. "720p", "1080p", "2160p", "3D".
    pub quality: String,
    /// e.g. "bluray", "web".
    pub kind: String,
    /// Human-readable size, e.g. "1.4 GB".
    pub size: String,
    /// BitTorrent info hash.
    pub hash: String,
}
