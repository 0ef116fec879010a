use crate::model::{Article, Page};

/// Merge the articles of every source into one list, most recent first.
///
/// Undated articles are dropped. The sort is stable: articles published at the same
/// instant keep the order of their sources, then the order of their feed.
pub fn aggregate(per_source: Vec<Vec<Article>>) -> Vec<Article> {
    let mut articles = per_source
        .into_iter()
        .flatten()
        .filter(|article| article.published_at.is_some())
        .collect::<Vec<_>>();

    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    articles
}

/// Cut the `[skip, skip + limit)` window out of the sorted articles
pub fn paginate(sorted: Vec<Article>, skip: usize, limit: usize) -> Page<Article> {
    Page::new(sorted, skip, limit)
}
