//! The validator/formatter pair the host fenced-code-block mechanism calls.

use crate::render::{self, RenderOptions, View};

/// True iff a fenced block with this info string belongs to us.
///
/// Only the first whitespace-separated token is considered, and it must be
/// exactly `mahjong`.
#[must_use]
pub fn is_mahjong_fence(info: &str) -> bool {
    info.split_whitespace().next() == Some("mahjong")
}

/// Formats the body of a `mahjong` fence into figure markup.
///
/// Invalid input renders as an error notice instead; this never fails and
/// never panics, a broken block must not break the document build.
#[must_use]
pub fn format_fence(source: &str, opts: &RenderOptions) -> String {
    match mpsz::parse_hand_block(source.trim()) {
        Ok(block) => View::new(&block, opts)
            .to_html()
            .unwrap_or_else(|err| render::render_error(&err.to_string())),
        Err(err) => render::render_error(&err.to_string()),
    }
}

/// Formats an inline tile run (the text between the colons of `:123m:`).
///
/// Returns `None` when the run does not parse, in which case the source
/// text is left alone.
#[must_use]
pub fn format_inline(notation: &str, opts: &RenderOptions) -> Option<String> {
    let tiles = mpsz::parse_tiles(notation).ok()?;
    if tiles.is_empty() {
        return None;
    }

    render::render_inline(&tiles, opts).ok()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn validator() {
        assert!(is_mahjong_fence("mahjong"));
        assert!(is_mahjong_fence("mahjong {.someattr}"));

        for info in ["python", "javascript", "", "MAHJONG", "mahjongg"] {
            assert!(!is_mahjong_fence(info), "should reject info: {info:?}");
        }
    }

    #[test]
    fn formatter_renders_hands() {
        let opts = RenderOptions::default();

        let html = format_fence("123m456p789s11222z", &opts);
        assert!(html.contains("class=\"mahjong-hand"));
        assert!(html.contains("data-tile=\"1m\""));

        let html = format_fence("hand: 123m\ntitle: Test Hand", &opts);
        assert!(html.contains("Test Hand"));
        assert!(html.contains("mahjong-caption"));

        let html = format_fence("hand: 123m456p789s11222z\ndora: 5m", &opts);
        assert!(html.contains("mahjong-dora"));
    }

    #[test]
    fn formatter_reports_errors() {
        let opts = RenderOptions::default();

        for source in ["8z9z", "hand: 123m456p789s11222z\ndora: 8z"] {
            let html = format_fence(source, &opts);
            assert!(html.contains("mahjong-error"), "source: {source:?}");
        }

        for source in ["", "title: Only Title"] {
            let html = format_fence(source, &opts);
            assert!(html.contains("mahjong-error"));
            assert!(html.contains("no hand notation"));
        }
    }

    #[test]
    fn inline_formatter() {
        let opts = RenderOptions::default();

        let html = format_inline("123m", &opts).unwrap();
        assert!(html.contains("mahjong-inline"));

        assert_eq!(format_inline("8z", &opts), None);
        assert_eq!(format_inline("", &opts), None);
    }
}
