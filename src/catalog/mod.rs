//! Catalog page extraction
//!
//! Search-results pages become a list of `SearchResultItem`, a single video
//! page becomes a `VideoDetail`. Missing markup degrades to absent fields.

pub mod list;
pub mod detail;
pub mod sources;

// Re-export main types
pub use list::extract_list;
pub use detail::extract_detail;
pub use sources::{extract_sources, SOURCE_PATTERNS};

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of a search-results page, in document order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchResultItem {
    /// Always present, empty when the page omits it
    pub title: String,
    /// Detail page URL, the key a caller passes back to `detail`
    pub url: Option<String>,
    pub thumbnail: Option<String>,
    pub duration: Option<String>,
    pub views: Option<String>,
    pub rating: Option<String>,
}

/// Fixed video resolution labels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum QualityTier {
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "1080p")]
    P1080,
}

impl QualityTier {
    /// All tiers, lowest first
    pub const ALL: [QualityTier; 3] = [QualityTier::P480, QualityTier::P720, QualityTier::P1080];

    pub fn label(&self) -> &'static str {
        match self {
            QualityTier::P480 => "480p",
            QualityTier::P720 => "720p",
            QualityTier::P1080 => "1080p",
        }
    }

    /// Human-readable quality name
    pub fn description(&self) -> &'static str {
        match self {
            QualityTier::P480 => "480p (SD)",
            QualityTier::P720 => "720p (HD)",
            QualityTier::P1080 => "1080p (Full HD)",
        }
    }
}

impl std::fmt::Display for QualityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Quality tier to source URL mapping. Every tier is always a key; the value
/// is only present when that tier was found in the page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct VideoSources(BTreeMap<QualityTier, Option<String>>);

impl VideoSources {
    /// Mapping with every tier absent
    pub fn new() -> Self {
        Self(QualityTier::ALL.iter().map(|tier| (*tier, None)).collect())
    }

    /// Record a URL for a tier. Empty URLs are ignored.
    pub fn set(&mut self, tier: QualityTier, url: String) {
        if !url.is_empty() {
            self.0.insert(tier, Some(url));
        }
    }

    pub fn get(&self, tier: QualityTier) -> Option<&str> {
        self.0.get(&tier).and_then(|url| url.as_deref())
    }

    /// Highest quality tier that has a URL
    pub fn best(&self) -> Option<(QualityTier, &str)> {
        QualityTier::ALL
            .iter()
            .rev()
            .find_map(|tier| self.get(*tier).map(|url| (*tier, url)))
    }

    pub fn is_empty(&self) -> bool {
        self.0.values().all(Option::is_none)
    }
}

impl Default for VideoSources {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything extracted from a single video page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    pub title: String,
    pub uploader: String,
    pub views: String,
    pub submitted: String,
    pub description: String,
    /// Document order, duplicates kept
    pub categories: Vec<String>,
    /// Screenshot URLs in document order
    pub screenshots: Vec<String>,
    pub video_sources: VideoSources,
}

impl VideoDetail {
    /// True when no single-value field was found, usually a sign the page
    /// markup has changed
    pub fn is_blank(&self) -> bool {
        self.title.is_empty()
            && self.uploader.is_empty()
            && self.views.is_empty()
            && self.submitted.is_empty()
            && self.description.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_always_have_three_keys() {
        let json = serde_json::to_value(VideoSources::new()).unwrap();
        let map = json.as_object().unwrap();
        assert_eq!(map.len(), 3);
        for key in ["480p", "720p", "1080p"] {
            assert!(map[key].is_null(), "{} should be null", key);
        }
    }

    #[test]
    fn test_best_source_prefers_highest_tier() {
        let mut sources = VideoSources::new();
        assert_eq!(sources.best(), None);

        sources.set(QualityTier::P480, "http://x/480.mp4".to_string());
        assert_eq!(sources.best(), Some((QualityTier::P480, "http://x/480.mp4")));

        sources.set(QualityTier::P1080, "http://x/1080.mp4".to_string());
        sources.set(QualityTier::P720, "http://x/720.mp4".to_string());
        assert_eq!(sources.best(), Some((QualityTier::P1080, "http://x/1080.mp4")));
        assert_eq!(QualityTier::P1080.description(), "1080p (Full HD)");
    }

    #[test]
    fn test_empty_url_is_not_recorded() {
        let mut sources = VideoSources::new();
        sources.set(QualityTier::P720, String::new());
        assert!(sources.is_empty());
        assert_eq!(sources.get(QualityTier::P720), None);
    }

    #[test]
    fn test_detail_serializes_camel_case() {
        let detail = VideoDetail::default();
        let json = serde_json::to_value(&detail).unwrap();
        assert!(json.get("videoSources").is_some());
        assert!(json["categories"].as_array().unwrap().is_empty());
        assert!(detail.is_blank());
    }

    #[test]
    fn test_search_item_absent_fields_serialize_as_null() {
        let item = SearchResultItem {
            title: "t".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["title"], "t");
        assert!(json["url"].is_null());
        assert!(json["rating"].is_null());
    }
}
