/// Video page extraction
use super::sources::extract_sources;
use super::VideoDetail;
use crate::document::{element_text, select_all, Document};
use crate::error::Result;
use scraper::ElementRef;
use std::collections::HashSet;
use tracing::debug;

const TITLE_SELECTOR: &str = "div.headline h1";
const UPLOADER_SELECTOR: &str = ".block-user .username a";
const DESCRIPTION_SELECTOR: &str = ".videodesc em";
const SCREENSHOT_SELECTOR: &str = "#tab_screenshots .block-screenshots a";

/// Flat info rows holding a label and its value side by side
const INFO_ITEM_SELECTOR: &str = ".info .item";
const INFO_LABEL_SELECTOR: &str = ".info .item span";

const VIEWS_LABEL: &str = "Views:";
const SUBMITTED_LABEL: &str = "Submitted:";
const CATEGORIES_LABEL: &str = "Categories:";

/// Build a `VideoDetail` from a parsed page and its raw text.
/// Missing fields become empty strings or empty lists.
pub fn extract_detail(document: &Document, raw_html: &str) -> Result<VideoDetail> {
    let categories = find_labeled(document, INFO_ITEM_SELECTOR, CATEGORIES_LABEL, "a")?
        .into_iter()
        .map(element_text)
        .collect::<Vec<_>>();

    let screenshots = document
        .select(SCREENSHOT_SELECTOR)?
        .into_iter()
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect::<Vec<_>>();

    debug!(
        "Extracted {} categories and {} screenshots",
        categories.len(),
        screenshots.len()
    );

    Ok(VideoDetail {
        title: document.text(TITLE_SELECTOR)?.unwrap_or_default(),
        uploader: document.text(UPLOADER_SELECTOR)?.unwrap_or_default(),
        views: labeled_text(document, VIEWS_LABEL)?,
        submitted: labeled_text(document, SUBMITTED_LABEL)?,
        description: document.text(DESCRIPTION_SELECTOR)?.unwrap_or_default(),
        categories,
        screenshots,
        video_sources: extract_sources(raw_html)?,
    })
}

/// Emphasised value sitting next to a label span, e.g. `<span>Views: <em>10</em></span>`
fn labeled_text(document: &Document, label: &str) -> Result<String> {
    let values = find_labeled(document, INFO_LABEL_SELECTOR, label, "em")?;
    let text: String = values.iter().flat_map(|el| el.text()).collect();
    Ok(text.trim().to_string())
}

/// Find the value elements for label `label`: elements matching `container_css`
/// whose text contains the label verbatim, then `value_css` inside them.
/// Nested matching containers share descendants; each value is returned once.
pub fn find_labeled<'a>(
    document: &'a Document,
    container_css: &str,
    label: &str,
    value_css: &str,
) -> Result<Vec<ElementRef<'a>>> {
    let mut seen = HashSet::new();
    let mut values = Vec::new();
    for container in document.select(container_css)? {
        if contains_label(container, label) {
            for value in select_all(container, value_css)? {
                if seen.insert(value.id()) {
                    values.push(value);
                }
            }
        }
    }
    Ok(values)
}

fn contains_label(element: ElementRef<'_>, label: &str) -> bool {
    element.text().collect::<String>().contains(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::QualityTier;

    const DETAIL_PAGE: &str = r#"
        <html><body>
          <div class="headline"><h1> Sample clip title </h1></div>
          <div class="block-user"><div class="username"><a href="/u/someone">someone</a></div></div>
          <div class="info">
            <div class="item">
              <span>Duration: <em>10:00</em></span>
              <span>Views: <em>1 234</em></span>
              <span>Submitted: <em>2 weeks ago</em></span>
            </div>
            <div class="item">Categories: <a href="/c/a">Alpha</a> <a href="/c/b"> Beta </a> <a href="/c/a">Alpha</a></div>
            <div class="item">Tags: <a href="/t/x">x-tag</a></div>
          </div>
          <div class="videodesc"><em> A short description </em></div>
          <div id="tab_screenshots"><div class="block-screenshots">
            <a href="https://img/1.jpg"><img></a>
            <a><img></a>
            <a href="https://img/2.jpg"><img></a>
          </div></div>
          <script>var flashvars = { video_url: 'http://x/480.mp4', video_alt_url: 'http://x/720.mp4' };</script>
        </body></html>"#;

    #[test]
    fn test_full_detail_page() {
        let document = Document::parse(DETAIL_PAGE);
        let detail = extract_detail(&document, DETAIL_PAGE).unwrap();

        assert_eq!(detail.title, "Sample clip title");
        assert_eq!(detail.uploader, "someone");
        assert_eq!(detail.views, "1 234");
        assert_eq!(detail.submitted, "2 weeks ago");
        assert_eq!(detail.description, "A short description");
        assert_eq!(detail.categories, vec!["Alpha", "Beta", "Alpha"]);
        assert_eq!(detail.screenshots, vec!["https://img/1.jpg", "https://img/2.jpg"]);
        assert_eq!(detail.video_sources.get(QualityTier::P480), Some("http://x/480.mp4"));
        assert_eq!(detail.video_sources.get(QualityTier::P720), Some("http://x/720.mp4"));
        assert_eq!(detail.video_sources.get(QualityTier::P1080), None);
    }

    #[test]
    fn test_labels_do_not_bleed_into_each_other() {
        let document = Document::parse(DETAIL_PAGE);
        let tags = find_labeled(&document, INFO_ITEM_SELECTOR, "Tags:", "a").unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(element_text(tags[0]), "x-tag");
    }

    #[test]
    fn test_empty_page_yields_blank_detail() {
        let document = Document::parse("<html><body></body></html>");
        let detail = extract_detail(&document, "").unwrap();

        assert!(detail.is_blank());
        assert!(detail.categories.is_empty());
        assert!(detail.screenshots.is_empty());
        assert!(detail.video_sources.is_empty());
    }

    #[test]
    fn test_nested_containers_read_each_value_once() {
        let html = r#"<div class="info">
            <div class="item"><div class="item">Categories: <a>A</a></div></div>
            <div class="item"><span class="o"><span class="i">Views: <em>5</em></span></span></div>
        </div>"#;
        let detail = extract_detail(&Document::parse(html), html).unwrap();

        assert_eq!(detail.categories, vec!["A"]);
        assert_eq!(detail.views, "5");
    }

    #[test]
    fn test_missing_label_yields_empty_string() {
        let html = r#"<div class="info"><div class="item"><span>Views: <em>7</em></span></div></div>"#;
        let detail = extract_detail(&Document::parse(html), html).unwrap();
        assert_eq!(detail.views, "7");
        assert_eq!(detail.submitted, "");
    }
}
