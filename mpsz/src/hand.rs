use crate::tile::Tile;

use serde::Serialize;

/// Kind of a called tile group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MeldKind {
    Chi,
    Pon,
    KanOpen,
    KanClosed,
    KanAdded,
}

/// Which player a meld was called from.
///
/// The notation glyphs are `<` for kamicha, `^` for toimen and `>` for
/// shimocha; a meld without a glyph is treated as self-drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CallFrom {
    Left,
    Across,
    Right,
    #[default]
    SelfDraw,
}

impl CallFrom {
    #[must_use]
    pub const fn from_glyph(c: char) -> Option<Self> {
        match c {
            '<' => Some(Self::Left),
            '^' => Some(Self::Across),
            '>' => Some(Self::Right),
            _ => None,
        }
    }
}

/// A called tile group.
///
/// `rotated` is the index of the tile laid sideways to point at the player
/// it was called from; it is `None` for self-drawn groups. In an added kan
/// the last tile is the added one, stacked onto the rotated tile.
#[derive(Debug, Clone, Serialize)]
pub struct Meld {
    pub tiles: Vec<Tile>,
    pub kind: MeldKind,
    pub from: CallFrom,
    pub rotated: Option<usize>,
}

impl Meld {
    #[inline]
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.kind != MeldKind::KanClosed
    }
}

/// A complete mahjong hand as written in a notation block.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Hand {
    pub closed_tiles: Vec<Tile>,
    pub melds: Vec<Meld>,
    pub dora_indicators: Vec<Tile>,
    pub uradora_indicators: Vec<Tile>,
    pub draw_tile: Option<Tile>,
}

impl Hand {
    /// All tiles held in the hand: closed tiles, meld tiles and the draw
    /// tile. Dora indicators are not part of the hand.
    pub fn all_tiles(&self) -> impl Iterator<Item = Tile> + '_ {
        self.closed_tiles
            .iter()
            .copied()
            .chain(self.melds.iter().flat_map(|m| m.tiles.iter().copied()))
            .chain(self.draw_tile)
    }

    #[must_use]
    pub fn total_tile_count(&self) -> usize {
        self.closed_tiles.len()
            + self.melds.iter().map(|m| m.tiles.len()).sum::<usize>()
            + usize::from(self.draw_tile.is_some())
    }

    /// Tiles held more than 4 times, with their counts.
    ///
    /// A red five and its plain five count as distinct tiles.
    #[must_use]
    pub fn overdrawn_tiles(&self) -> Vec<(Tile, usize)> {
        let mut counts = [0_usize; 37];
        for tile in self.all_tiles() {
            counts[tile.as_usize()] += 1;
        }

        counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 4)
            .map(|(id, &count)| (Tile::try_from(id).unwrap(), count))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::t;

    #[test]
    fn tile_counting() {
        let hand = Hand {
            closed_tiles: t![1m, 1m, 1m].to_vec(),
            melds: vec![Meld {
                tiles: t![1m, 1m, 1m].to_vec(),
                kind: MeldKind::Pon,
                from: CallFrom::Left,
                rotated: Some(0),
            }],
            draw_tile: Some(t!(1m)),
            ..Default::default()
        };

        assert_eq!(hand.total_tile_count(), 7);
        assert_eq!(hand.overdrawn_tiles(), vec![(t!(1m), 7)]);
    }

    #[test]
    fn aka_counted_separately() {
        let hand = Hand {
            closed_tiles: t![5p, 5p, 5p, 5p, 0p].to_vec(),
            ..Default::default()
        };

        assert!(hand.overdrawn_tiles().is_empty());
    }
}
