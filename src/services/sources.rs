use std::collections::HashSet;

use crate::model::configuration::ConfigurationError;
use crate::model::Source;

/// Read-only registry of the configured feed sources
#[derive(Debug, Clone)]
pub struct SourceRegistry {
    sources: Vec<Source>,
}

impl SourceRegistry {
    /// Build the registry, refusing identifiers declared twice (case-insensitively)
    pub fn new(sources: Vec<Source>) -> Result<Self, ConfigurationError> {
        let mut identifiers = HashSet::new();
        for source in &sources {
            if !identifiers.insert(normalize_id(&source.id)) {
                return Err(ConfigurationError::DuplicateSource(source.id.clone()));
            }
        }

        Ok(Self { sources })
    }

    pub fn list(&self) -> &[Source] {
        &self.sources
    }

    /// Sources matching the filter, in registry order.
    ///
    /// An empty filter selects every source; unknown identifiers are ignored.
    pub fn resolve(&self, filter: &[String]) -> Vec<Source> {
        let wanted = filter
            .iter()
            .map(|id| normalize_id(id))
            .filter(|id| !id.is_empty())
            .collect::<HashSet<_>>();

        if wanted.is_empty() {
            return self.sources.clone();
        }

        self.sources
            .iter()
            .filter(|source| wanted.contains(&normalize_id(&source.id)))
            .cloned()
            .collect()
    }
}

fn normalize_id(id: &str) -> String {
    id.trim().to_lowercase()
}
