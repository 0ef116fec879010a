use std::env::var;

use opentelemetry_sdk::trace::{self, RandomIdGenerator, Sampler, Tracer};
use tracing::Subscriber;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{layer::SubscriberExt, EnvFilter, Registry};

/// Build the subscriber: `RUST_LOG` (or `env_filter`) filtering, text or JSON
/// (`FLUXRSS_LOG_FORMAT=json`) output, plus an OpenTelemetry layer when an exporter is enabled
pub fn get_subscriber(name: &str, env_filter: &str) -> impl Subscriber + Sync + Send {
    let telemetry = build_datadog(name).or_else(|| build_jaeger(name));

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(env_filter));

    let (json, text) = if json_output(var("FLUXRSS_LOG_FORMAT").ok().as_deref()) {
        (Some(tracing_subscriber::fmt::layer().json()), None)
    } else {
        (None, Some(tracing_subscriber::fmt::layer()))
    };

    Registry::default()
        .with(telemetry)
        .with(env_filter)
        .with(json)
        .with(text)
}

fn json_output(format: Option<&str>) -> bool {
    format.is_some_and(|format| format.trim().eq_ignore_ascii_case("json"))
}

pub fn init_subscriber(subscriber: impl Subscriber + Sync + Send + 'static) {
    subscriber.init();
}

fn build_jaeger<S>(name: &str) -> Option<OpenTelemetryLayer<S, Tracer>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    // Building the jaeger layer, if needed
    if var("JAEGER_ENABLED").is_ok() {
        opentelemetry_jaeger::new_agent_pipeline()
            .with_service_name(name)
            .install_batch(opentelemetry_sdk::runtime::Tokio)
            .map_err(|err| eprintln!("Jaeger error {:?}", err))
            .ok()
            .map(|x| tracing_opentelemetry::layer().with_tracer(x))
    } else {
        None
    }
}

fn build_datadog<S>(name: &str) -> Option<OpenTelemetryLayer<S, Tracer>>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    if var("DD_ENABLED").is_ok() {
        opentelemetry_datadog::new_pipeline()
            .with_service_name(name)
            .with_agent_endpoint(
                var("DD_AGENT").unwrap_or_else(|_| "http://127.0.0.1:8126".to_owned()),
            )
            .with_trace_config(
                trace::config()
                    .with_sampler(Sampler::AlwaysOn)
                    .with_id_generator(RandomIdGenerator::default()),
            )
            .install_batch(opentelemetry_sdk::runtime::Tokio)
            .map_err(|err| eprintln!("Datadog error {:?}", err))
            .ok()
            .map(|x| tracing_opentelemetry::layer().with_tracer(x))
    } else {
        None
    }
}
