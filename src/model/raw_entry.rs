use chrono::{DateTime, Utc};
use feed_rs::model::{Entry, Link};

/// One parsed feed item, before normalization. Every field is optional since
/// feeds are wildly inconsistent about what they provide.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    pub title: Option<String>,
    pub link: Option<String>,
    /// Raw summary, usually containing HTML
    pub summary: Option<String>,
    pub published: Option<DateTime<Utc>>,
    pub updated: Option<DateTime<Utc>>,
    pub media_content: Vec<MediaRef>,
    pub media_thumbnails: Vec<MediaRef>,
    pub image: Option<ImageRef>,
    pub links: Vec<LinkRef>,
}

/// A media attachment (`media:content`, `media:thumbnail`, enclosures)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaRef {
    pub url: Option<String>,
    pub mime_type: Option<String>,
}

/// A dedicated image element of the entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageRef {
    pub href: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkRef {
    pub href: String,
    pub rel: Option<String>,
    pub mime_type: Option<String>,
}

impl From<&Link> for LinkRef {
    fn from(link: &Link) -> Self {
        LinkRef {
            href: link.href.clone(),
            rel: link.rel.clone(),
            mime_type: link.media_type.clone(),
        }
    }
}

impl From<Entry> for RawEntry {
    fn from(entry: Entry) -> Self {
        let mut links = entry.links.iter().map(LinkRef::from).collect::<Vec<_>>();
        let link = alternate_link(&links);

        // Typed non image attachments (podcasts, videos) only count as links
        let (media_content, attachments): (Vec<_>, Vec<_>) = entry
            .media
            .iter()
            .flat_map(|media| media.content.iter())
            .map(|content| MediaRef {
                url: content.url.as_ref().map(|url| url.to_string()),
                mime_type: content.content_type.as_ref().map(|mime| mime.to_string()),
            })
            .partition(|media| {
                media
                    .mime_type
                    .as_deref()
                    .map_or(true, |mime| mime.starts_with("image/"))
            });
        links.extend(attachments.into_iter().filter_map(|media| {
            media.url.map(|href| LinkRef {
                href,
                rel: Some("enclosure".to_owned()),
                mime_type: media.mime_type,
            })
        }));

        let media_thumbnails = entry
            .media
            .iter()
            .flat_map(|media| media.thumbnails.iter())
            .map(|thumbnail| MediaRef {
                url: Some(thumbnail.image.uri.clone()),
                mime_type: None,
            })
            .collect();

        RawEntry {
            title: entry.title.map(|x| x.content),
            link,
            summary: entry.summary.map(|x| x.content),
            published: entry.published,
            updated: entry.updated,
            media_content,
            media_thumbnails,
            // feed-rs has no entry level image element
            image: None,
            links,
        }
    }
}

/// The link pointing to the article itself: the first `alternate` (or rel-less) one,
/// falling back on the first link of the entry.
fn alternate_link(links: &[LinkRef]) -> Option<String> {
    links
        .iter()
        .find(|link| matches!(link.rel.as_deref(), None | Some("alternate")))
        .or_else(|| links.first())
        .map(|link| link.href.clone())
}
