use crate::news::types::{Article, Page};

pub const PAGE_SIZE: usize = 10;

/// Slices the full collection into the requested page.
///
/// Articles are ordered by ascending number before slicing, so the result does
/// not depend on the order the store hands them over in. A missing index means
/// page 0. Indexes that are negative or point past the end produce an empty
/// page rather than an error.
///
/// `page_count` uses integer division: a trailing partial page is reachable but
/// not counted.
pub fn paginate(mut articles: Vec<Article>, page_index: Option<i64>) -> Page {
    let page_index = page_index.unwrap_or(0);
    let total_item_count = articles.len();

    articles.sort_unstable_by_key(|article| article.number);

    let content: Vec<Article> = match skip_for(page_index) {
        Some(skip) => articles.into_iter().skip(skip).take(PAGE_SIZE).collect(),
        None => Vec::new(),
    };

    Page {
        returned_count: content.len(),
        content,
        page_size: PAGE_SIZE,
        page_index,
        page_count: total_item_count / PAGE_SIZE,
        total_item_count,
    }
}

fn skip_for(page_index: i64) -> Option<usize> {
    usize::try_from(page_index).ok()?.checked_mul(PAGE_SIZE)
}
