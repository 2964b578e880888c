use std::fmt;
use std::str::CharIndices;

use crate::hand::{CallFrom, Hand, Meld, MeldKind};
use crate::tile::Tile;

use thiserror::Error;

/// A single violation found while parsing a notation string.
#[derive(Debug, Error)]
pub enum NotationError {
    #[error("invalid tile: {0}")]
    InvalidTile(String),

    #[error("invalid tile notation: {0:?}")]
    InvalidNotation(String),

    #[error("mismatched brackets in meld: {0:?}")]
    MismatchedBrackets(String),

    #[error("added kan requires a digit after '+': {0:?}")]
    AddedKanDigit(String),

    #[error("closed kan cannot have a source marker: {0:?}")]
    ClosedKanSource(String),

    #[error("invalid meld size: {0} tiles")]
    MeldSize(usize),

    #[error("invalid tile count: {tile} appears {count} times (max 4)")]
    TileCount { tile: Tile, count: usize },

    #[error("no hand notation provided")]
    EmptyNotation,

    #[error("invalid {field} notation: {source}")]
    BadOption {
        field: &'static str,
        #[source]
        source: Box<ParseError>,
    },
}

/// All violations found in one parsing pass, joined with `"; "` when
/// displayed.
#[derive(Debug)]
pub struct ParseError {
    errors: Vec<NotationError>,
}

impl ParseError {
    #[must_use]
    pub fn errors(&self) -> &[NotationError] {
        &self.errors
    }
}

impl From<NotationError> for ParseError {
    fn from(err: NotationError) -> Self {
        Self { errors: vec![err] }
    }
}

impl From<Vec<NotationError>> for ParseError {
    fn from(errors: Vec<NotationError>) -> Self {
        Self { errors }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            fmt::Display::fmt(err, f)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Parses a full hand notation, melds included, into a [`Hand`].
///
/// ```
/// let hand = mpsz::parse_hand("123m456p11z (789s<) [2222z]").unwrap();
/// assert_eq!(hand.closed_tiles.len(), 8);
/// assert_eq!(hand.melds.len(), 2);
/// ```
///
/// # Errors
/// Returns every violation found, including tiles held more than 4 times.
pub fn parse_hand(notation: &str) -> Result<Hand, ParseError> {
    let mut scanner = Scanner::new(notation.trim());
    let hand = scanner.scan_hand();

    for (tile, count) in hand.overdrawn_tiles() {
        scanner.errors.push(NotationError::TileCount { tile, count });
    }

    if scanner.errors.is_empty() {
        Ok(hand)
    } else {
        Err(scanner.errors.into())
    }
}

/// Parses a plain tile notation, without melds.
///
/// Unlike [`parse_hand`] this does not enforce the 4-copies limit, as the
/// input is a display sequence rather than a hand.
///
/// # Errors
/// Returns every violation found.
pub fn parse_tiles(notation: &str) -> Result<Vec<Tile>, ParseError> {
    let mut scanner = Scanner::new(notation.trim());
    let tiles = scanner.scan_tiles();

    if scanner.errors.is_empty() {
        Ok(tiles)
    } else {
        Err(scanner.errors.into())
    }
}

struct Scanner<'a> {
    src: &'a str,
    chars: CharIndices<'a>,
    errors: Vec<NotationError>,
}

const fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '_' | '|')
}

const fn is_suit(c: char) -> bool {
    matches!(c, 'm' | 'p' | 's' | 'z')
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self {
            src,
            chars: src.char_indices(),
            errors: vec![],
        }
    }

    fn scan_hand(&mut self) -> Hand {
        let mut hand = Hand::default();
        // Digits seen so far that still wait for their suit letter.
        // Separators do not interrupt a run, so "123 m" reads as "123m".
        let mut run = String::new();

        while let Some((i, c)) = self.chars.next() {
            match c {
                _ if is_separator(c) => {}
                '0'..='9' => run.push(c),
                _ if is_suit(c) => {
                    if run.is_empty() {
                        self.invalid_notation_at(i, &mut run);
                        break;
                    }
                    self.push_tiles(&run, c, &mut hand.closed_tiles);
                    run.clear();
                }
                '(' | '[' => {
                    if !run.is_empty() {
                        self.errors
                            .push(NotationError::InvalidNotation(std::mem::take(&mut run)));
                    }
                    if let Some(meld) = self.take_meld(i, c) {
                        hand.melds.push(meld);
                    }
                }
                _ => {
                    self.invalid_notation_at(i, &mut run);
                    break;
                }
            }
        }

        if !run.is_empty() {
            self.errors.push(NotationError::InvalidNotation(run));
        }

        hand
    }

    fn scan_tiles(&mut self) -> Vec<Tile> {
        let mut tiles = vec![];
        let mut run = String::new();

        while let Some((i, c)) = self.chars.next() {
            match c {
                _ if is_separator(c) => {}
                '0'..='9' => run.push(c),
                _ if is_suit(c) => {
                    if run.is_empty() {
                        self.invalid_notation_at(i, &mut run);
                        break;
                    }
                    self.push_tiles(&run, c, &mut tiles);
                    run.clear();
                }
                _ => {
                    self.invalid_notation_at(i, &mut run);
                    break;
                }
            }
        }

        if !run.is_empty() {
            self.errors.push(NotationError::InvalidNotation(run));
        }

        tiles
    }

    /// Converts a digit run plus suit letter into tiles, reporting each
    /// nonexistent tile (`0z`, `8z`, `9z`) individually.
    fn push_tiles(&mut self, run: &str, suit: char, out: &mut Vec<Tile>) {
        for d in run.chars() {
            let num = d as u8 - b'0';
            match Tile::from_parts(num, suit) {
                Some(tile) => out.push(tile),
                None => self
                    .errors
                    .push(NotationError::InvalidTile(format!("{d}{suit}"))),
            }
        }
    }

    /// Consumes a meld group starting at the opening bracket at `start`.
    fn take_meld(&mut self, start: usize, open: char) -> Option<Meld> {
        let mut end = None;
        for (i, c) in self.chars.by_ref() {
            if matches!(c, ')' | ']') {
                end = Some((i, c));
                break;
            }
        }

        let Some((close_idx, close)) = end else {
            let mut run = String::new();
            self.invalid_notation_at(start, &mut run);
            return None;
        };

        let text = &self.src[start..=close_idx];

        if (open == '(') != (close == ')') {
            self.errors
                .push(NotationError::MismatchedBrackets(text.to_owned()));
            return None;
        }

        self.parse_meld_body(text, open == '[')
    }

    /// Parses the body of a bracketed group: digits, an optional `+` with
    /// exactly one more digit (the added-kan tile), the suit letter and an
    /// optional direction glyph.
    fn parse_meld_body(&mut self, text: &str, closed: bool) -> Option<Meld> {
        let inner = &text[1..text.len() - 1];
        let mut chars = inner.chars().peekable();

        let mut run = String::new();
        while let Some(c) = chars.next_if(char::is_ascii_digit) {
            run.push(c);
        }

        let mut added = false;
        if chars.next_if_eq(&'+').is_some() {
            match chars.next_if(char::is_ascii_digit) {
                Some(c) => {
                    run.push(c);
                    added = true;
                }
                None => {
                    self.errors
                        .push(NotationError::AddedKanDigit(text.to_owned()));
                    return None;
                }
            }
        }

        let suit = match chars.next() {
            Some(c) if is_suit(c) => c,
            _ => {
                self.errors
                    .push(NotationError::InvalidNotation(text.to_owned()));
                return None;
            }
        };

        let from = match chars.peek().copied().and_then(CallFrom::from_glyph) {
            Some(from) => {
                chars.next();
                from
            }
            None => CallFrom::SelfDraw,
        };

        if chars.next().is_some() {
            self.errors
                .push(NotationError::InvalidNotation(text.to_owned()));
            return None;
        }

        let mut tiles = vec![];
        self.push_tiles(&run, suit, &mut tiles);
        if tiles.is_empty() {
            return None;
        }

        if closed && from != CallFrom::SelfDraw {
            self.errors
                .push(NotationError::ClosedKanSource(text.to_owned()));
            return None;
        }

        let kind = if added && tiles.len() == 4 {
            MeldKind::KanAdded
        } else if closed && tiles.len() == 4 {
            MeldKind::KanClosed
        } else if tiles.len() == 4 {
            MeldKind::KanOpen
        } else if tiles.len() == 3 {
            if is_sequence(&tiles) {
                MeldKind::Chi
            } else {
                MeldKind::Pon
            }
        } else {
            self.errors.push(NotationError::MeldSize(tiles.len()));
            return None;
        };

        // The sideways tile points at the player the meld was called from:
        // kamicha left end, toimen second, shimocha the far end.
        let rotated = match from {
            CallFrom::SelfDraw => None,
            CallFrom::Left => Some(0),
            CallFrom::Across => Some(1),
            CallFrom::Right if kind == MeldKind::KanOpen => Some(3),
            CallFrom::Right => Some(2),
        };

        Some(Meld {
            tiles,
            kind,
            from,
            rotated,
        })
    }

    /// Reports everything from the pending digit run to the end of input as
    /// one unreadable chunk and drains the scanner.
    fn invalid_notation_at(&mut self, pos: usize, run: &mut String) {
        let mut rest = std::mem::take(run);
        rest.extend(self.src[pos..].chars().filter(|&c| !is_separator(c)));
        self.errors.push(NotationError::InvalidNotation(rest));
        while self.chars.next().is_some() {}
    }
}

/// Three tiles of one suit forming a consecutive run. A red five counts as
/// a five.
fn is_sequence(tiles: &[Tile]) -> bool {
    if tiles.len() != 3 {
        return false;
    }

    if tiles.iter().any(|t| t.is_honor() || t.suit() != tiles[0].suit()) {
        return false;
    }

    let mut nums: Vec<u8> = tiles.iter().map(|t| t.deaka().num()).collect();
    nums.sort_unstable();

    nums[1] == nums[0] + 1 && nums[2] == nums[1] + 1
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::t;

    #[test]
    fn simple_runs() {
        let tiles = parse_tiles("123m456p789s").unwrap();
        assert_eq!(tiles.len(), 9);
        assert_eq!(tiles[0], t!(1m));
        assert_eq!(tiles[3], t!(4p));
        assert_eq!(tiles[6], t!(7s));

        let honors = parse_tiles("1234567z").unwrap();
        assert_eq!(honors.len(), 7);
        assert_eq!(honors[6], t!(7z));
    }

    #[test]
    fn separators_do_not_split_runs() {
        assert_eq!(parse_tiles("123m 456p_789s").unwrap().len(), 9);
        assert_eq!(parse_tiles("12|3m").unwrap().len(), 3);
    }

    #[test]
    fn red_fives() {
        let tiles = parse_tiles("0m0p0s").unwrap();
        assert!(tiles.iter().all(|t| t.is_aka()));
    }

    #[test]
    fn chi_vs_pon() {
        let hand = parse_hand("123m (234p<)").unwrap();
        assert_eq!(hand.melds[0].kind, MeldKind::Chi);

        let hand = parse_hand("123m (222p<)").unwrap();
        assert_eq!(hand.melds[0].kind, MeldKind::Pon);

        // a red five completes a run
        let hand = parse_hand("(460p<)").unwrap();
        assert_eq!(hand.melds[0].kind, MeldKind::Chi);
    }

    #[test]
    fn kans() {
        let hand = parse_hand("123m [1111z]").unwrap();
        assert_eq!(hand.melds[0].kind, MeldKind::KanClosed);
        assert!(!hand.melds[0].is_open());
        assert_eq!(hand.melds[0].rotated, None);

        let hand = parse_hand("123m (1111z>)").unwrap();
        assert_eq!(hand.melds[0].kind, MeldKind::KanOpen);
        assert_eq!(hand.melds[0].rotated, Some(3));
    }

    #[test]
    fn added_kan_rotation() {
        let hand = parse_hand("(111+1z<)").unwrap();
        let meld = &hand.melds[0];
        assert_eq!(meld.kind, MeldKind::KanAdded);
        assert_eq!(meld.from, CallFrom::Left);
        assert_eq!(meld.rotated, Some(0));
        assert_eq!(meld.tiles.len(), 4);

        let hand = parse_hand("(999+9s>)").unwrap();
        assert_eq!(hand.melds[0].rotated, Some(2));
    }

    #[test]
    fn closed_kan_with_source_rejected() {
        assert!(parse_hand("[1111z<]").is_err());
    }

    #[test]
    fn mismatched_brackets_rejected() {
        let err = parse_hand("[1111z)").unwrap_err();
        assert!(err.to_string().contains("mismatched brackets"));
    }

    #[test]
    fn plus_without_digit_rejected() {
        let err = parse_hand("(111+z<)").unwrap_err();
        assert!(err.to_string().contains("digit after '+'"));
    }

    #[test]
    fn invalid_honors_rejected() {
        assert!(parse_hand("8z").is_err());
        assert!(parse_tiles("0z").is_err());
    }

    #[test]
    fn count_limit() {
        let err = parse_hand("11111m").unwrap_err();
        assert!(err.to_string().contains("1m appears 5 times"));

        let err = parse_hand("111m (111m<)").unwrap_err();
        assert!(err.to_string().contains("1m appears 6 times"));

        // a red five does not count against the plain fives
        assert!(parse_hand("55550m").is_ok());
        assert!(parse_hand("00000m").is_err());

        // display sequences are exempt
        assert!(parse_tiles("11111m").is_ok());
    }

    #[test]
    fn all_violations_reported() {
        let err = parse_hand("11111m22222p").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("1m appears 5 times"));
        assert!(msg.contains("2p appears 5 times"));
    }

    #[test]
    fn stray_garbage_rejected() {
        assert!(parse_hand("123x").is_err());
        assert!(parse_hand("m").is_err());
        assert!(parse_hand("(123m").is_err());
        assert!(parse_tiles("(123m<)").is_err());
    }
}
