use std::net::TcpListener;

use anyhow::Context;
use tracing::info;

use fluxrss::model::configuration::ApplicationConfiguration;
use fluxrss::{observability, startup};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Init dotenv
    dotenvy::dotenv().ok();

    let subscriber = observability::get_subscriber("fluxrss", "info");
    observability::init_subscriber(subscriber);

    let configuration =
        ApplicationConfiguration::from_env().context("Could not read the configuration")?;
    let news_service = startup::build_news_service(&configuration)
        .context("Could not build the news service")?;

    let listener = TcpListener::bind(&configuration.listen_on)
        .with_context(|| format!("Could not listen on {}", configuration.listen_on))?;
    info!(
        "Serving {} sources on {}",
        configuration.sources.len(),
        configuration.listen_on
    );

    startup::startup(news_service, listener).await?;

    opentelemetry::global::shutdown_tracer_provider();
    Ok(())
}
