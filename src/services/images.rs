use once_cell::sync::Lazy;
use regex::Regex;

use crate::model::raw_entry::{LinkRef, MediaRef, RawEntry};

static IMG_TAG_SOURCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"<img\s(?:[^>]*?\s)?src="([^"]+)""#).unwrap());

/// Find a representative image for the entry.
///
/// Structured data is trusted first, scraping the summary HTML is the last resort:
/// 1. media content
/// 2. media thumbnails
/// 3. the dedicated image element
/// 4. the first link declared as an image
/// 5. the first `<img src="...">` of the summary
pub fn extract(entry: &RawEntry) -> Option<String> {
    first_media_url(&entry.media_content)
        .or_else(|| first_media_url(&entry.media_thumbnails))
        .or_else(|| {
            entry
                .image
                .as_ref()
                .and_then(|image| non_blank(image.href.as_deref()))
        })
        .or_else(|| first_image_link(&entry.links))
        .or_else(|| entry.summary.as_deref().and_then(scan_img_tag))
}

fn first_media_url(media: &[MediaRef]) -> Option<String> {
    media
        .iter()
        .find_map(|media| non_blank(media.url.as_deref()))
}

fn first_image_link(links: &[LinkRef]) -> Option<String> {
    links
        .iter()
        .filter(|link| {
            link.mime_type
                .as_deref()
                .is_some_and(|mime| mime.starts_with("image"))
        })
        .find_map(|link| non_blank(Some(&link.href)))
}

fn scan_img_tag(html: &str) -> Option<String> {
    IMG_TAG_SOURCE
        .captures(html)
        .and_then(|captures| captures.get(1))
        .map(|source| source.as_str().to_owned())
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

#[cfg(test)]
mod tests {
    use crate::model::raw_entry::ImageRef;

    use super::*;

    fn media(url: Option<&str>) -> MediaRef {
        MediaRef {
            url: url.map(ToOwned::to_owned),
            mime_type: None,
        }
    }

    fn link(href: &str, mime_type: Option<&str>) -> LinkRef {
        LinkRef {
            href: href.to_owned(),
            rel: None,
            mime_type: mime_type.map(ToOwned::to_owned),
        }
    }

    fn with_summary(summary: &str) -> RawEntry {
        RawEntry {
            summary: Some(summary.to_owned()),
            ..Default::default()
        }
    }

    #[test]
    fn test_media_content_wins_over_summary_image() {
        let entry = RawEntry {
            media_content: vec![media(Some("https://cdn.example.com/content.jpg"))],
            summary: Some(r#"<p><img src="https://cdn.example.com/inline.jpg"></p>"#.into()),
            ..Default::default()
        };

        assert_eq!(
            extract(&entry).as_deref(),
            Some("https://cdn.example.com/content.jpg")
        );
    }

    #[test]
    fn test_priority_order() {
        let mut entry = RawEntry {
            media_content: vec![media(None), media(Some("https://cdn.example.com/content.jpg"))],
            media_thumbnails: vec![media(Some("https://cdn.example.com/thumb.jpg"))],
            image: Some(ImageRef {
                href: Some("https://cdn.example.com/image.jpg".into()),
            }),
            links: vec![
                link("https://example.com/article", Some("text/html")),
                link("https://cdn.example.com/link.png", Some("image/png")),
            ],
            summary: Some(r#"<img src="https://cdn.example.com/inline.jpg">"#.into()),
            ..Default::default()
        };

        assert_eq!(
            extract(&entry).as_deref(),
            Some("https://cdn.example.com/content.jpg")
        );

        entry.media_content.clear();
        assert_eq!(
            extract(&entry).as_deref(),
            Some("https://cdn.example.com/thumb.jpg")
        );

        entry.media_thumbnails.clear();
        assert_eq!(
            extract(&entry).as_deref(),
            Some("https://cdn.example.com/image.jpg")
        );

        entry.image = Some(ImageRef { href: None });
        assert_eq!(
            extract(&entry).as_deref(),
            Some("https://cdn.example.com/link.png")
        );

        entry.links.clear();
        assert_eq!(
            extract(&entry).as_deref(),
            Some("https://cdn.example.com/inline.jpg")
        );

        entry.summary = None;
        assert_eq!(extract(&entry), None);
    }

    #[test]
    fn test_media_without_url_is_skipped() {
        let entry = RawEntry {
            media_content: vec![media(None), media(Some("  "))],
            media_thumbnails: vec![media(Some("https://cdn.example.com/thumb.jpg"))],
            ..Default::default()
        };

        assert_eq!(
            extract(&entry).as_deref(),
            Some("https://cdn.example.com/thumb.jpg")
        );
    }

    #[test]
    fn test_links_without_image_type_are_ignored() {
        let entry = RawEntry {
            links: vec![
                link("https://example.com/article", None),
                link("https://example.com/video.mp4", Some("video/mp4")),
            ],
            ..Default::default()
        };

        assert_eq!(extract(&entry), None);
    }

    #[test]
    fn test_first_img_tag_of_the_summary() {
        let entry = with_summary(
            r#"<p>Intro</p><img class="cover" alt="x" src="https://example.com/a.jpg"><img src="https://example.com/b.jpg">"#,
        );

        assert_eq!(extract(&entry).as_deref(), Some("https://example.com/a.jpg"));
    }

    #[test]
    fn test_data_src_is_not_src() {
        let entry = with_summary(
            r#"<img data-src="https://example.com/lazy.jpg" src="https://example.com/real.jpg">"#,
        );

        assert_eq!(
            extract(&entry).as_deref(),
            Some("https://example.com/real.jpg")
        );
    }

    #[test]
    fn test_only_double_quoted_lowercase_src() {
        assert_eq!(
            extract(&with_summary("<img src='https://example.com/a.jpg'>")),
            None
        );
        assert_eq!(
            extract(&with_summary(r#"<img SRC="https://example.com/a.jpg">"#)),
            None
        );
        assert_eq!(extract(&with_summary("No picture here")), None);
    }
}
