use std::net::TcpListener;

use actix_web::middleware::DefaultHeaders;
use actix_web::web::Data;
use actix_web::{App, HttpServer};

use crate::model::configuration::ApplicationConfiguration;
use crate::routes;
use crate::services::fetching::{build_client, Fetcher};
use crate::services::sources::SourceRegistry;
use crate::services::NewsService;

/// Wire the aggregation pipeline from the configuration
pub fn build_news_service(configuration: &ApplicationConfiguration) -> anyhow::Result<NewsService> {
    let registry = SourceRegistry::new(configuration.sources.clone())?;
    let client = build_client(configuration.fetch_timeout)?;
    let fetcher = Fetcher::new(
        client,
        configuration.fetch_concurrency,
        configuration.request_timeout,
    );

    Ok(NewsService::new(registry, fetcher)
        .with_limits(configuration.default_limit, configuration.max_limit)
        .with_locale(configuration.display_locale))
}

/// Any origin may read the news
pub fn cors_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("Access-Control-Allow-Origin", "*"))
        .add(("Access-Control-Allow-Methods", "GET"))
        .add(("Access-Control-Allow-Headers", "*"))
}

pub async fn startup(news_service: NewsService, listener: TcpListener) -> std::io::Result<()> {
    let news_service = Data::new(news_service);

    HttpServer::new(move || {
        App::new()
            .wrap(cors_headers())
            .wrap(tracing_actix_web::TracingLogger::default())
            .app_data(news_service.clone())
            .configure(routes::configure)
    })
    .listen(listener)?
    .run()
    .await
}
