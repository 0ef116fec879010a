use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use fluxrss::model::Source;
use fluxrss::services::fetching::{build_client, Fetcher};
use fluxrss::services::sources::SourceRegistry;
use fluxrss::services::NewsService;

pub struct TestItem {
    pub title: String,
    pub published: Option<DateTime<Utc>>,
    pub description: String,
}

pub fn origin() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 10, 21, 6, 0, 0).unwrap()
}

/// `count` items published one minute apart, starting at `start`
pub fn dated_items(prefix: &str, count: i64, start: DateTime<Utc>) -> Vec<TestItem> {
    (0..count)
        .map(|i| TestItem {
            title: format!("{} {}", prefix, i),
            published: Some(start + chrono::Duration::minutes(i)),
            description: format!("Résumé de l&apos;article {}", i),
        })
        .collect()
}

pub fn rss_feed(name: &str, items: &[TestItem]) -> String {
    let items = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let pub_date = item
                .published
                .map(|date| format!("<pubDate>{}</pubDate>", date.to_rfc2822()))
                .unwrap_or_default();
            format!(
                r#"<item>
                  <title>{}</title>
                  <link>https://{}.example.com/articles/{}</link>
                  <guid>https://{}.example.com/articles/{}</guid>
                  <description>{}</description>
                  {}
                </item>"#,
                item.title, name, i, name, i, item.description, pub_date
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>{}</title>
    <link>https://{}.example.com</link>
    <description>Test feed</description>
    {}
  </channel>
</rss>"#,
        name, name, items
    )
}

pub async fn serve_feed(mock: &MockServer, route: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "application/rss+xml"))
        .mount(mock)
        .await;
}

pub fn news_service(sources: Vec<Source>) -> NewsService {
    let registry = SourceRegistry::new(sources).unwrap();
    let client = build_client(Duration::from_secs(5)).unwrap();

    NewsService::new(registry, Fetcher::new(client, 4, Duration::from_secs(5)))
}
