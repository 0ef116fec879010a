use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};

use crate::model::raw_entry::RawEntry;

/// Language of the human-relative display dates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DisplayLocale {
    #[default]
    En,
    Fr,
}

impl FromStr for DisplayLocale {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "en" => Ok(DisplayLocale::En),
            "fr" => Ok(DisplayLocale::Fr),
            other => Err(format!("Unsupported display locale {}", other)),
        }
    }
}

impl DisplayLocale {
    fn minutes_ago(&self, minutes: i64) -> String {
        match self {
            DisplayLocale::En => format!("{} minute{} ago", minutes, plural(minutes)),
            DisplayLocale::Fr => format!("Il y a {} minute{}", minutes, plural(minutes)),
        }
    }

    fn hours_ago(&self, hours: i64) -> String {
        match self {
            DisplayLocale::En => format!("{} hour{} ago", hours, plural(hours)),
            DisplayLocale::Fr => format!("Il y a {} heure{}", hours, plural(hours)),
        }
    }

    fn yesterday(&self) -> String {
        match self {
            DisplayLocale::En => "Yesterday".to_owned(),
            DisplayLocale::Fr => "Hier".to_owned(),
        }
    }
}

fn plural(count: i64) -> &'static str {
    if count > 1 {
        "s"
    } else {
        ""
    }
}

/// Publication instant of the entry, falling back on its last update
pub fn canonicalize(entry: &RawEntry) -> Option<DateTime<Utc>> {
    entry.published.or(entry.updated)
}

/// Render the age of `instant` relatively to `now`.
///
/// Instants in the future are considered as just published.
pub fn render(instant: DateTime<Utc>, now: DateTime<Utc>, locale: DisplayLocale) -> String {
    let elapsed = (now - instant).max(Duration::zero());

    if elapsed < Duration::hours(1) {
        locale.minutes_ago(elapsed.num_minutes())
    } else if elapsed < Duration::hours(24) {
        locale.hours_ago(elapsed.num_hours())
    } else if elapsed < Duration::hours(48) {
        locale.yesterday()
    } else {
        instant.format("%d/%m/%Y").to_string()
    }
}
