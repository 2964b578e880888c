use crate::hand::Hand;
use crate::parser::{parse_hand, NotationError, ParseError};

/// Raw option values of a fenced block body, before any notation parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockOptions {
    pub title: Option<String>,
    pub dora: Option<String>,
    pub uradora: Option<String>,
    pub draw: Option<String>,
}

/// A fully parsed fenced block.
#[derive(Debug, Clone)]
pub struct HandBlock {
    pub hand: Hand,
    pub title: Option<String>,
    /// The hand notation as written, for the `data-notation` attribute.
    pub notation: String,
}

/// Splits a block body into the hand notation and its options.
///
/// A body is either a bare notation line or `key: value` lines with the
/// keys `hand`, `title`, `dora`, `uradora` and `draw` (case-insensitive,
/// quotes around values are stripped). A line that fits neither becomes
/// the notation if none has been seen yet.
#[must_use]
pub fn parse_block_content(content: &str) -> (String, BlockOptions) {
    let mut notation = String::new();
    let mut options = BlockOptions::default();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some((key, value)) = line.split_once(':') {
            let key = key.trim().to_ascii_lowercase();
            let value = value
                .trim()
                .trim_matches(|c| c == '"' || c == '\'')
                .to_owned();

            match key.as_str() {
                "hand" => notation = value,
                "title" => options.title = Some(value),
                "dora" => options.dora = Some(value),
                "uradora" => options.uradora = Some(value),
                "draw" => options.draw = Some(value),
                _ if notation.is_empty() => notation = line.to_owned(),
                _ => {}
            }
        } else if notation.is_empty() {
            notation = line.to_owned();
        }
    }

    (notation, options)
}

/// Parses a fenced block body into a [`HandBlock`].
///
/// # Errors
/// Fails when no notation is present, when the notation itself does not
/// parse, or when any option notation is invalid. Option errors accumulate
/// rather than shadowing each other.
pub fn parse_hand_block(content: &str) -> Result<HandBlock, ParseError> {
    let (notation, options) = parse_block_content(content);

    if notation.is_empty() {
        return Err(NotationError::EmptyNotation.into());
    }

    let mut hand = parse_hand(&notation)?;
    let mut errors = vec![];

    if let Some(dora) = &options.dora {
        match parse_hand(dora) {
            Ok(h) => hand.dora_indicators = h.all_tiles().collect(),
            Err(err) => errors.push(bad_option("dora", err)),
        }
    }

    if let Some(uradora) = &options.uradora {
        match parse_hand(uradora) {
            Ok(h) => hand.uradora_indicators = h.all_tiles().collect(),
            Err(err) => errors.push(bad_option("uradora", err)),
        }
    }

    if let Some(draw) = &options.draw {
        match parse_hand(draw) {
            Ok(h) => hand.draw_tile = h.closed_tiles.first().copied(),
            Err(err) => errors.push(bad_option("draw", err)),
        }
    }

    // The draw tile joined the hand after parse_hand checked the limit.
    for (tile, count) in hand.overdrawn_tiles() {
        errors.push(NotationError::TileCount { tile, count });
    }

    if errors.is_empty() {
        Ok(HandBlock {
            hand,
            title: options.title,
            notation,
        })
    } else {
        Err(errors.into())
    }
}

fn bad_option(field: &'static str, source: ParseError) -> NotationError {
    NotationError::BadOption {
        field,
        source: Box::new(source),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::t;

    #[test]
    fn bare_notation() {
        let (notation, options) = parse_block_content("123m456p789s11222z");
        assert_eq!(notation, "123m456p789s11222z");
        assert_eq!(options, BlockOptions::default());
    }

    #[test]
    fn keyed_lines() {
        let content = "hand: 123m\ntitle: Complete Hand\ndora: 5m\nuradora: 3p\ndraw: 1z";
        let (notation, options) = parse_block_content(content);

        assert_eq!(notation, "123m");
        assert_eq!(options.title.as_deref(), Some("Complete Hand"));
        assert_eq!(options.dora.as_deref(), Some("5m"));
        assert_eq!(options.uradora.as_deref(), Some("3p"));
        assert_eq!(options.draw.as_deref(), Some("1z"));
    }

    #[test]
    fn keys_are_case_insensitive_and_quotes_stripped() {
        let (notation, options) = parse_block_content("HAND: 123m\nTITLE: \"Quoted\"");
        assert_eq!(notation, "123m");
        assert_eq!(options.title.as_deref(), Some("Quoted"));

        let (_, options) = parse_block_content("title: 'Single'");
        assert_eq!(options.title.as_deref(), Some("Single"));
    }

    #[test]
    fn notation_line_may_come_first() {
        let (notation, options) = parse_block_content("123m456p\ntitle: Mixed Style");
        assert_eq!(notation, "123m456p");
        assert_eq!(options.title.as_deref(), Some("Mixed Style"));
    }

    #[test]
    fn empty_content() {
        assert_eq!(parse_block_content(""), (String::new(), BlockOptions::default()));
        assert_eq!(
            parse_block_content("   \n  \n  "),
            (String::new(), BlockOptions::default())
        );
    }

    #[test]
    fn block_with_options_applied() {
        let block = parse_hand_block("hand: 123m456p789s1112z\ndora: 5m3p\ndraw: 2z").unwrap();

        assert_eq!(block.hand.dora_indicators, t![5m, 3p]);
        assert_eq!(block.hand.draw_tile, Some(t!(2z)));
        assert_eq!(block.notation, "123m456p789s1112z");
        assert_eq!(block.hand.total_tile_count(), 14);
    }

    #[test]
    fn missing_notation_rejected() {
        for content in ["", "title: Only Title"] {
            let err = parse_hand_block(content).unwrap_err();
            assert!(err.to_string().contains("no hand notation"));
        }
    }

    #[test]
    fn bad_options_accumulate() {
        let err = parse_hand_block("hand: 123m\ndora: 8z\ndraw: 9z").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("invalid dora notation"));
        assert!(msg.contains("invalid draw notation"));
    }

    #[test]
    fn draw_tile_counts_against_limit() {
        let err = parse_hand_block("hand: 1111m\ndraw: 1m").unwrap_err();
        assert!(err.to_string().contains("1m appears 5 times"));
    }
}
