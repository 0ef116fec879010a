use crate::model::raw_entry::RawEntry;
use crate::model::Article;
use crate::services::{dates, images};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum NormalizationError {
    #[error("Entry has no title")]
    MissingTitle,
    #[error("Entry has no link")]
    MissingLink,
}

/// Build the canonical article of an entry of the given source
pub fn normalize(source_id: &str, entry: RawEntry) -> Result<Article, NormalizationError> {
    let title = entry
        .title
        .as_deref()
        .map(clean_text)
        .filter(|title| !title.is_empty())
        .ok_or(NormalizationError::MissingTitle)?;
    let link = entry
        .link
        .as_deref()
        .map(str::trim)
        .filter(|link| !link.is_empty())
        .map(ToOwned::to_owned)
        .ok_or(NormalizationError::MissingLink)?;
    let summary = entry.summary.as_deref().map(clean_text).unwrap_or_default();

    Ok(Article {
        title,
        link,
        published_at: dates::canonicalize(&entry),
        summary,
        image: images::extract(&entry),
        source: source_id.to_owned(),
    })
}

/// Normalize all the entries of a source, skipping the defective ones
pub fn normalize_all(source_id: &str, entries: Vec<RawEntry>) -> Vec<Article> {
    entries
        .into_iter()
        .filter_map(|entry| match normalize(source_id, entry) {
            Ok(article) => Some(article),
            Err(error) => {
                tracing::debug!(source = source_id, "Skipping entry: {}", error);
                None
            }
        })
        .collect()
}

fn clean_text(raw: &str) -> String {
    html_escape::decode_html_entities(raw).trim().to_owned()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use crate::model::raw_entry::MediaRef;

    use super::*;

    fn entry(title: Option<&str>, link: Option<&str>) -> RawEntry {
        RawEntry {
            title: title.map(ToOwned::to_owned),
            link: link.map(ToOwned::to_owned),
            ..Default::default()
        }
    }

    #[test]
    fn test_normalize_full_entry() {
        let published = Utc.with_ymd_and_hms(2024, 10, 21, 7, 28, 0).unwrap();
        let raw = RawEntry {
            title: Some("  L&#39;&eacute;t&eacute; &amp; la mer \n".into()),
            link: Some(" https://www.rfi.fr/fr/article-1 ".into()),
            summary: Some("<p>Caf&eacute; cr&egrave;me</p>  ".into()),
            published: Some(published),
            media_thumbnails: vec![MediaRef {
                url: Some("https://s.rfi.fr/thumb.jpg".into()),
                mime_type: None,
            }],
            ..Default::default()
        };

        let article = normalize("rfi", raw).unwrap();

        assert_eq!(article.title, "L'été & la mer");
        assert_eq!(article.link, "https://www.rfi.fr/fr/article-1");
        assert_eq!(article.summary, "<p>Café crème</p>");
        assert_eq!(article.published_at, Some(published));
        assert_eq!(article.image.as_deref(), Some("https://s.rfi.fr/thumb.jpg"));
        assert_eq!(article.source, "rfi");
    }

    #[test]
    fn test_optional_fields_are_optional() {
        let article = normalize("lemonde", entry(Some("Titre"), Some("https://lemonde.fr/1"))).unwrap();

        assert_eq!(article.summary, "");
        assert_eq!(article.published_at, None);
        assert_eq!(article.image, None);
    }

    #[test]
    fn test_missing_title() {
        assert_eq!(
            normalize("lemonde", entry(None, Some("https://lemonde.fr/1"))),
            Err(NormalizationError::MissingTitle)
        );
        assert_eq!(
            normalize("lemonde", entry(Some("   "), Some("https://lemonde.fr/1"))),
            Err(NormalizationError::MissingTitle)
        );
    }

    #[test]
    fn test_missing_link() {
        assert_eq!(
            normalize("lemonde", entry(Some("Titre"), None)),
            Err(NormalizationError::MissingLink)
        );
        assert_eq!(
            normalize("lemonde", entry(Some("Titre"), Some(""))),
            Err(NormalizationError::MissingLink)
        );
    }

    #[test]
    fn test_normalize_all_skips_defective_entries() {
        let entries = vec![
            entry(Some("Un"), Some("https://lemonde.fr/1")),
            entry(None, Some("https://lemonde.fr/2")),
            entry(Some("Trois"), None),
            entry(Some("Quatre"), Some("https://lemonde.fr/4")),
        ];

        let articles = normalize_all("lemonde", entries);

        assert_eq!(
            articles.iter().map(|a| a.title.as_str()).collect::<Vec<_>>(),
            vec!["Un", "Quatre"]
        );
    }
}
