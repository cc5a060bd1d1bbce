//! Queryable HTML document built on `scraper`
//!
//! Parsing never fails; a selector that matches nothing yields `None` or an
//! empty vector. Only a malformed CSS selector string is an error.

use scraper::{ElementRef, Html, Selector};

use crate::error::{Result, ScrapeError};

/// Parsed HTML page
pub struct Document {
    html: Html,
}

impl Document {
    /// Parse raw HTML leniently
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    /// All elements matching `css`, in document order
    pub fn select(&self, css: &str) -> Result<Vec<ElementRef<'_>>> {
        select_all(self.root(), css)
    }

    /// Trimmed text of every element matching `css`, concatenated
    pub fn text(&self, css: &str) -> Result<Option<String>> {
        select_text(self.root(), css)
    }
}

/// Compile a CSS selector, mapping syntax errors to a parse failure
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScrapeError::Parse(format!("invalid selector '{}': {:?}", css, e)))
}

/// All descendants of `scope` matching `css`
pub fn select_all<'a>(scope: ElementRef<'a>, css: &str) -> Result<Vec<ElementRef<'a>>> {
    let selector = selector(css)?;
    Ok(scope.select(&selector).collect())
}

/// Trimmed text content of a single element
pub fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Text of all matches under `scope` joined together, `None` if nothing matched
pub fn select_text(scope: ElementRef<'_>, css: &str) -> Result<Option<String>> {
    let matches = select_all(scope, css)?;
    if matches.is_empty() {
        return Ok(None);
    }

    let text: String = matches.iter().flat_map(|el| el.text()).collect();
    Ok(Some(text.trim().to_string()))
}

/// Named attribute of the first match under `scope`
pub fn select_attr(scope: ElementRef<'_>, css: &str, name: &str) -> Result<Option<String>> {
    let selector = selector(css)?;
    Ok(scope
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr(name))
        .map(str::to_string))
}

/// `data-*` attribute of the first match, used for lazy-loaded image sources
pub fn select_data(scope: ElementRef<'_>, css: &str, key: &str) -> Result<Option<String>> {
    select_attr(scope, css, &format!("data-{}", key))
}
