use std::env::var;
use std::str::FromStr;
use std::time::Duration;

use crate::model::Source;
use crate::services::dates::DisplayLocale;

const DEFAULT_LISTEN_ON: &str = "0.0.0.0:8000";
const DEFAULT_SOURCES: &str = "lemonde=https://rss.lemonde.fr/c/205/f/3050/index.rss,\
                               france24=https://www.france24.com/fr/rss,\
                               rfi=https://www.rfi.fr/fr/rss";
const DEFAULT_FETCH_TIMEOUT_SECONDS: u64 = 8;
const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 10;
const DEFAULT_FETCH_CONCURRENCY: usize = 8;
const DEFAULT_LIMIT: usize = 200;
const MAX_TIMEOUT_SECONDS: u64 = 3600;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
    #[error("Malformed source {0:?}, expected id=url")]
    MalformedSource(String),
    #[error("Source {0} is declared more than once")]
    DuplicateSource(String),
    #[error("Default limit {default} is above the maximum limit {max}")]
    DefaultLimitAboveMaximum { default: usize, max: usize },
}

/// # Application configuration
#[derive(Debug, Clone)]
pub struct ApplicationConfiguration {
    /// Address the HTTP server binds to
    pub listen_on: String,
    /// Feed sources, in display order
    pub sources: Vec<Source>,
    /// Timeout of a single feed download
    pub fetch_timeout: Duration,
    /// Deadline for fetching all the feeds of a request
    pub request_timeout: Duration,
    /// Maximum number of feeds downloaded at the same time
    pub fetch_concurrency: usize,
    /// Page size used when the client does not give one
    pub default_limit: usize,
    /// Largest page size a client may ask for
    pub max_limit: usize,
    pub display_locale: DisplayLocale,
}

impl Default for ApplicationConfiguration {
    fn default() -> Self {
        Self {
            listen_on: DEFAULT_LISTEN_ON.to_owned(),
            sources: parse_sources(DEFAULT_SOURCES).unwrap_or_default(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECONDS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECONDS),
            fetch_concurrency: DEFAULT_FETCH_CONCURRENCY,
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_LIMIT,
            display_locale: DisplayLocale::default(),
        }
    }
}

impl ApplicationConfiguration {
    /// Read the configuration from the environment variables
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| var(key).ok())
    }

    /// Read the configuration through the given lookup function, missing keys get their default value
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigurationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_on = lookup("FLUXRSS_LISTEN_ON").unwrap_or_else(|| DEFAULT_LISTEN_ON.to_owned());
        let sources = parse_sources(
            &lookup("FLUXRSS_SOURCES").unwrap_or_else(|| DEFAULT_SOURCES.to_owned()),
        )?;

        let fetch_timeout = parse_or(
            &lookup,
            "FLUXRSS_FETCH_TIMEOUT",
            DEFAULT_FETCH_TIMEOUT_SECONDS,
        )?;
        let request_timeout = parse_or(
            &lookup,
            "FLUXRSS_REQUEST_TIMEOUT",
            DEFAULT_REQUEST_TIMEOUT_SECONDS,
        )?;
        let fetch_concurrency =
            parse_or(&lookup, "FLUXRSS_FETCH_CONCURRENCY", DEFAULT_FETCH_CONCURRENCY)?;
        let default_limit = parse_or(&lookup, "FLUXRSS_DEFAULT_LIMIT", DEFAULT_LIMIT)?;
        let max_limit = parse_or(&lookup, "FLUXRSS_MAX_LIMIT", DEFAULT_LIMIT)?;
        let display_locale = parse_or(&lookup, "FLUXRSS_DISPLAY_LOCALE", DisplayLocale::default())?;

        ensure_positive("FLUXRSS_FETCH_TIMEOUT", fetch_timeout as usize)?;
        ensure_positive("FLUXRSS_REQUEST_TIMEOUT", request_timeout as usize)?;
        ensure_timeout_in_range("FLUXRSS_FETCH_TIMEOUT", fetch_timeout)?;
        ensure_timeout_in_range("FLUXRSS_REQUEST_TIMEOUT", request_timeout)?;
        ensure_positive("FLUXRSS_FETCH_CONCURRENCY", fetch_concurrency)?;
        ensure_positive("FLUXRSS_DEFAULT_LIMIT", default_limit)?;
        ensure_positive("FLUXRSS_MAX_LIMIT", max_limit)?;
        if default_limit > max_limit {
            return Err(ConfigurationError::DefaultLimitAboveMaximum {
                default: default_limit,
                max: max_limit,
            });
        }

        Ok(Self {
            listen_on,
            sources,
            fetch_timeout: Duration::from_secs(fetch_timeout),
            request_timeout: Duration::from_secs(request_timeout),
            fetch_concurrency,
            default_limit,
            max_limit,
            display_locale,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigurationError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigurationError::InvalidValue { key, value }),
    }
}

fn ensure_positive(key: &'static str, value: usize) -> Result<(), ConfigurationError> {
    if value == 0 {
        Err(ConfigurationError::Zero(key))
    } else {
        Ok(())
    }
}

fn ensure_timeout_in_range(key: &'static str, seconds: u64) -> Result<(), ConfigurationError> {
    if seconds > MAX_TIMEOUT_SECONDS {
        Err(ConfigurationError::InvalidValue {
            key,
            value: seconds.to_string(),
        })
    } else {
        Ok(())
    }
}

/// Parse a `id=url,id=url` list of sources
pub fn parse_sources(raw: &str) -> Result<Vec<Source>, ConfigurationError> {
    raw.split(',')
        .map(str::trim)
        .filter(|declaration| !declaration.is_empty())
        .map(|declaration| {
            let (id, url) = declaration
                .split_once('=')
                .ok_or_else(|| ConfigurationError::MalformedSource(declaration.to_owned()))?;
            let (id, url) = (id.trim(), url.trim());
            if id.is_empty() || url.is_empty() {
                return Err(ConfigurationError::MalformedSource(declaration.to_owned()));
            }
            Ok(Source::new(id, url))
        })
        .collect()
}
