/// Video source recovery from inline script text
///
/// The source URLs are assigned inside `<script>` blocks, so they are matched
/// against the raw page text instead of the parsed tree.
use super::{QualityTier, VideoSources};
use crate::error::Result;
use regex::Regex;
use std::sync::OnceLock;
use tracing::debug;

/// One pattern per tier. Capture group 1 is the URL inside a single-quoted literal.
pub const SOURCE_PATTERNS: &[(QualityTier, &str)] = &[
    (QualityTier::P480, r"video_url:\s*'([^']+)'"),
    (QualityTier::P720, r"video_alt_url:\s*'([^']+)'"),
    (QualityTier::P1080, r"video_alt_url2:\s*'([^']+)'"),
];

/// `SOURCE_PATTERNS` compiled on first use and shared afterwards
fn compiled_patterns() -> Result<&'static [(QualityTier, Regex)]> {
    static COMPILED: OnceLock<std::result::Result<Vec<(QualityTier, Regex)>, regex::Error>> = OnceLock::new();

    COMPILED
        .get_or_init(|| {
            SOURCE_PATTERNS
                .iter()
                .map(|(tier, pattern)| Regex::new(pattern).map(|re| (*tier, re)))
                .collect()
        })
        .as_deref()
        .map_err(|e| e.clone().into())
}

/// Apply every pattern independently; the first match of each wins
pub fn extract_sources(raw_html: &str) -> Result<VideoSources> {
    let mut sources = VideoSources::new();

    for (tier, re) in compiled_patterns()? {
        if let Some(url) = re.captures(raw_html).and_then(|c| c.get(1)) {
            debug!("Matched {} source", tier);
            sources.set(*tier, url.as_str().to_string());
        }
    }

    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile_once() {
        let first = compiled_patterns().unwrap();
        let second = compiled_patterns().unwrap();

        assert_eq!(first.len(), SOURCE_PATTERNS.len());
        assert!(std::ptr::eq(first.as_ptr(), second.as_ptr()));
    }

    #[test]
    fn test_single_tier() {
        let html = "<script>var flashvars = { video_url: 'http://x/480.mp4', postfix: '.mp4' };</script>";
        let sources = extract_sources(html).unwrap();

        assert_eq!(sources.get(QualityTier::P480), Some("http://x/480.mp4"));
        assert_eq!(sources.get(QualityTier::P720), None);
        assert_eq!(sources.get(QualityTier::P1080), None);
    }

    #[test]
    fn test_all_tiers_are_independent() {
        let html = r#"<script>
            var flashvars = {
                video_alt_url2: 'http://x/1080.mp4',
                video_url:'http://x/480.mp4',
                video_alt_url:   'http://x/720.mp4',
            };
        </script>"#;
        let sources = extract_sources(html).unwrap();

        assert_eq!(sources.get(QualityTier::P480), Some("http://x/480.mp4"));
        assert_eq!(sources.get(QualityTier::P720), Some("http://x/720.mp4"));
        assert_eq!(sources.get(QualityTier::P1080), Some("http://x/1080.mp4"));
    }

    #[test]
    fn test_first_match_wins() {
        let html = "video_url: 'http://x/a.mp4' video_url: 'http://x/b.mp4'";
        let sources = extract_sources(html).unwrap();
        assert_eq!(sources.get(QualityTier::P480), Some("http://x/a.mp4"));
    }

    #[test]
    fn test_other_quoting_does_not_match() {
        let html = r#"video_url: "http://x/480.mp4", video_alt_url: '', video_alt_url2 = 'http://x/1080.mp4'"#;
        let sources = extract_sources(html).unwrap();
        assert!(sources.is_empty());
    }

    #[test]
    fn test_no_tier_is_upgraded() {
        let html = "video_alt_url: 'http://x/720.mp4'";
        let sources = extract_sources(html).unwrap();
        assert_eq!(sources.get(QualityTier::P480), None);
        assert_eq!(sources.get(QualityTier::P1080), None);
        assert_eq!(sources.best(), Some((QualityTier::P720, "http://x/720.mp4")));
    }
}
