/// Search-results page extraction
use super::SearchResultItem;
use crate::document::{select_attr, select_data, select_text, Document};
use crate::error::Result;
use scraper::ElementRef;
use tracing::debug;

/// Container of one search result
pub const ITEM_SELECTOR: &str = ".video-item";

const TITLE_SELECTOR: &str = "p.inf a";
const LINK_SELECTOR: &str = "a.thumb";
const THUMBNAIL_SELECTOR: &str = "img.cover";
/// Lazy-loaded thumbnails keep their real source in `data-original`
const THUMBNAIL_DATA_KEY: &str = "original";
const DURATION_SELECTOR: &str = ".durations";
const VIEWS_SELECTOR: &str = ".viewsthumb";
const RATING_SELECTOR: &str = "ul.list-unstyled li.pull-right";

/// Project every result container into a `SearchResultItem`, in document order.
/// A page without containers yields an empty vector.
pub fn extract_list(document: &Document) -> Result<Vec<SearchResultItem>> {
    let containers = document.select(ITEM_SELECTOR)?;
    debug!("Found {} result containers", containers.len());

    let mut results = Vec::with_capacity(containers.len());
    for container in containers {
        results.push(extract_item(container)?);
    }

    Ok(results)
}

fn extract_item(item: ElementRef<'_>) -> Result<SearchResultItem> {
    let url = select_attr(item, LINK_SELECTOR, "href")?.filter(|href| !href.is_empty());

    Ok(SearchResultItem {
        title: select_text(item, TITLE_SELECTOR)?.unwrap_or_default(),
        url,
        thumbnail: select_data(item, THUMBNAIL_SELECTOR, THUMBNAIL_DATA_KEY)?,
        duration: select_text(item, DURATION_SELECTOR)?,
        views: select_text(item, VIEWS_SELECTOR)?,
        rating: select_text(item, RATING_SELECTOR)?,
    })
}
