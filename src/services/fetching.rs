use std::time::Duration;

use futures::{stream, StreamExt};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_tracing::TracingMiddleware;
use tokio::time::{timeout_at, Instant};
use tracing::{info, warn};

use crate::model::raw_entry::RawEntry;
use crate::model::Source;

const USER_AGENT: &str = "fluxrss fetcher";
const MAX_DEADLINE: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("Could not fetch the feed: {0}")]
    GetError(#[from] reqwest_middleware::Error),
    #[error("Could not read the feed: {0}")]
    ReadError(#[from] reqwest::Error),
    #[error("HTTP status code error: Upstream feed returned HTTP status code {0}")]
    StatusCodeError(u16),
    #[error("Parsing error: {0}")]
    ParseError(#[from] feed_rs::parser::ParseFeedError),
    #[error("Feed did not answer before the request deadline")]
    DeadlineExceeded,
}

/// Raw entries downloaded from one source
#[derive(Debug)]
pub struct SourceEntries {
    pub source: Source,
    pub entries: Vec<RawEntry>,
}

/// Build the HTTP client used to download the feeds
pub fn build_client(timeout: Duration) -> reqwest::Result<ClientWithMiddleware> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()?;

    Ok(ClientBuilder::new(client)
        .with(TracingMiddleware::default())
        .build())
}

#[derive(Clone)]
pub struct Fetcher {
    client: ClientWithMiddleware,
    concurrency: usize,
    deadline: Duration,
}

impl Fetcher {
    /// `concurrency` bounds the number of simultaneous downloads, `deadline` the duration
    /// of a whole [`Fetcher::fetch_all`] call, capped to one day.
    pub fn new(client: ClientWithMiddleware, concurrency: usize, deadline: Duration) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
            deadline: deadline.min(MAX_DEADLINE),
        }
    }

    /// Download and parse the feed of the given source
    #[tracing::instrument(skip_all, fields(source = %source.id), level = "debug")]
    pub async fn fetch(&self, source: &Source) -> Result<Vec<RawEntry>, FetchError> {
        let response = self.client.get(source.url.as_str()).send().await?;

        if !response.status().is_success() {
            return Err(FetchError::StatusCodeError(response.status().as_u16()));
        }

        let data = response.bytes().await?;
        let feed = feed_rs::parser::parse(&data[..])?;

        Ok(feed.entries.into_iter().map(RawEntry::from).collect())
    }

    /// Download every source concurrently.
    ///
    /// A source failing, or not answering before the deadline, is logged and comes back
    /// without entries. Results are returned in the order of `sources`, whatever order
    /// the downloads complete in.
    #[tracing::instrument(skip_all, fields(sources = sources.len()))]
    pub async fn fetch_all(&self, sources: Vec<Source>) -> Vec<SourceEntries> {
        let deadline = Instant::now() + self.deadline;

        let mut results = stream::iter(sources.into_iter().enumerate())
            .map(|(position, source)| async move {
                let entries = match timeout_at(deadline, self.fetch(&source)).await {
                    Ok(Ok(entries)) => {
                        info!(source = %source.id, entries = entries.len(), "Feed fetched");
                        entries
                    }
                    Ok(Err(error)) => {
                        warn!(source = %source.id, error = %error, "Could not fetch feed, skipping it");
                        vec![]
                    }
                    Err(_) => {
                        warn!(source = %source.id, error = %FetchError::DeadlineExceeded, "Could not fetch feed, skipping it");
                        vec![]
                    }
                };

                (position, SourceEntries { source, entries })
            })
            .buffer_unordered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        results.sort_by_key(|(position, _)| *position);
        results.into_iter().map(|(_, entries)| entries).collect()
    }
}
