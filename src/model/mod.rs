use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod configuration;
pub mod raw_entry;

pub const STATUS_OK: &str = "ok";

/// Feed source, over da web
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub url: String,
}

impl Source {
    pub fn new(id: &str, url: &str) -> Self {
        Source {
            id: id.to_owned(),
            url: url.to_owned(),
        }
    }
}

/// Canonical article, built from one feed entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub published_at: Option<DateTime<Utc>>,
    pub summary: String,
    pub image: Option<String>,
    pub source: String,
}

/// Article as sent to the client, with its display date computed at response time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedArticle {
    pub title: String,
    pub link: String,
    pub published: Option<DateTime<Utc>>,
    pub display_date: String,
    pub summary: String,
    pub image: Option<String>,
    pub source: String,
}

/// Window of a sorted sequence
#[derive(Debug, PartialEq, Eq)]
pub struct Page<T> {
    /// Actual content.
    pub content: Vec<T>,
    /// Number of elements before windowing.
    pub total: usize,
    /// Offset of the window.
    pub skip: usize,
    /// Requested size of the window.
    pub limit: usize,
}

impl<T> Page<T> {
    /// Build a page from the whole sorted sequence, the offset and the size of the window
    pub fn new(source: Vec<T>, skip: usize, limit: usize) -> Self {
        let total = source.len();
        let content = source.into_iter().skip(skip).take(limit).collect();

        Page {
            content,
            total,
            skip,
            limit,
        }
    }
}

/// Query parameters of the news endpoint, before validation
#[derive(Debug, Default, Deserialize)]
pub struct NewsParameters {
    /// Comma separated list of source identifiers
    pub sources: Option<String>,
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

/// Response envelope of the news endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct NewsPage {
    pub status: String,
    pub articles: Vec<RenderedArticle>,
    pub total: usize,
    pub skip: usize,
    pub limit: usize,
}

/// Response envelope of the sources endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct SourceList {
    pub status: String,
    pub sources: Vec<Source>,
}
