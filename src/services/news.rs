use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::model::{Article, NewsPage, NewsParameters, RenderedArticle, Source, STATUS_OK};
use crate::services::aggregation::{aggregate, paginate};
use crate::services::dates::{self, DisplayLocale};
use crate::services::fetching::Fetcher;
use crate::services::normalize::normalize_all;
use crate::services::sources::SourceRegistry;

const DEFAULT_LIMIT: usize = 200;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum RequestError {
    #[error("skip must be a non-negative integer, got {0}")]
    NegativeSkip(i64),
    #[error("limit must be a positive integer, got {0}")]
    NonPositiveLimit(i64),
    #[error("limit must not be greater than {max}, got {requested}")]
    LimitTooLarge { requested: i64, max: usize },
}

/// A validated news request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsRequest {
    /// Requested source identifiers, everything when empty
    pub sources: Vec<String>,
    pub skip: usize,
    pub limit: usize,
}

impl NewsParameters {
    /// Check the parameters and fill in the defaults. Out of range values are refused, never clamped.
    pub fn validate(self, default_limit: usize, max_limit: usize) -> Result<NewsRequest, RequestError> {
        let skip = match self.skip {
            None => 0,
            Some(skip) if skip < 0 => return Err(RequestError::NegativeSkip(skip)),
            Some(skip) => skip as usize,
        };

        let limit = match self.limit {
            None => default_limit,
            Some(limit) if limit <= 0 => return Err(RequestError::NonPositiveLimit(limit)),
            Some(limit) if limit as u64 > max_limit as u64 => {
                return Err(RequestError::LimitTooLarge {
                    requested: limit,
                    max: max_limit,
                })
            }
            Some(limit) => limit as usize,
        };

        let sources = self
            .sources
            .map(|sources| {
                sources
                    .split(',')
                    .map(str::trim)
                    .filter(|id| !id.is_empty())
                    .map(ToOwned::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        Ok(NewsRequest {
            sources,
            skip,
            limit,
        })
    }
}

/// The feed aggregation pipeline: fetch, normalize, sort, paginate, render
#[derive(Clone)]
pub struct NewsService {
    registry: Arc<SourceRegistry>,
    fetcher: Fetcher,
    default_limit: usize,
    max_limit: usize,
    locale: DisplayLocale,
}

impl NewsService {
    pub fn new(registry: SourceRegistry, fetcher: Fetcher) -> Self {
        Self {
            registry: Arc::new(registry),
            fetcher,
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_LIMIT,
            locale: DisplayLocale::default(),
        }
    }

    pub fn with_limits(mut self, default_limit: usize, max_limit: usize) -> Self {
        self.default_limit = default_limit;
        self.max_limit = max_limit;
        self
    }

    pub fn with_locale(mut self, locale: DisplayLocale) -> Self {
        self.locale = locale;
        self
    }

    pub fn sources(&self) -> &[Source] {
        self.registry.list()
    }

    pub fn validate(&self, parameters: NewsParameters) -> Result<NewsRequest, RequestError> {
        parameters.validate(self.default_limit, self.max_limit)
    }

    /// Run the whole pipeline for one request. Never fails: unavailable sources only
    /// make the result smaller.
    #[tracing::instrument(skip(self))]
    pub async fn get_news(&self, request: &NewsRequest) -> NewsPage {
        let sources = self.registry.resolve(&request.sources);
        let fetched = self.fetcher.fetch_all(sources).await;

        let per_source = fetched
            .into_iter()
            .map(|fetched| normalize_all(&fetched.source.id, fetched.entries))
            .collect::<Vec<_>>();
        let page = paginate(aggregate(per_source), request.skip, request.limit);

        // Ages are computed once every feed is there
        let now = Utc::now();
        let articles = page
            .content
            .into_iter()
            .map(|article| render_article(article, now, self.locale))
            .collect();

        NewsPage {
            status: STATUS_OK.to_owned(),
            articles,
            total: page.total,
            skip: page.skip,
            limit: page.limit,
        }
    }
}

fn render_article(article: Article, now: DateTime<Utc>, locale: DisplayLocale) -> RenderedArticle {
    let display_date = article
        .published_at
        .map(|published_at| dates::render(published_at, now, locale))
        .unwrap_or_default();

    RenderedArticle {
        title: article.title,
        link: article.link,
        published: article.published_at,
        display_date,
        summary: article.summary,
        image: article.image,
        source: article.source,
    }
}
