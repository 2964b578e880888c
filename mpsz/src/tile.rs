use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::{matches_tu8, t, tu8};

use boomphf::hashmap::BoomHashMap;
use once_cell::sync::Lazy;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

const MPSZ_TILE_STRINGS_LEN: usize = 3 * 9 + 7 + 3;
const MPSZ_TILE_STRINGS: [&str; MPSZ_TILE_STRINGS_LEN] = [
    "1m", "2m", "3m", "4m", "5m", "6m", "7m", "8m", "9m", // m
    "1p", "2p", "3p", "4p", "5p", "6p", "7p", "8p", "9p", // p
    "1s", "2s", "3s", "4s", "5s", "6s", "7s", "8s", "9s", // s
    "1z", "2z", "3z", "4z", "5z", "6z", "7z", // z
    "0m", "0p", "0s", // red fives
];

const DISPLAY_NAMES: [&str; MPSZ_TILE_STRINGS_LEN] = [
    "1 Man", "2 Man", "3 Man", "4 Man", "5 Man", "6 Man", "7 Man", "8 Man", "9 Man", // m
    "1 Pin", "2 Pin", "3 Pin", "4 Pin", "5 Pin", "6 Pin", "7 Pin", "8 Pin", "9 Pin", // p
    "1 Sou", "2 Sou", "3 Sou", "4 Sou", "5 Sou", "6 Sou", "7 Sou", "8 Sou", "9 Sou", // s
    "East", "South", "West", "North", "White Dragon", "Green Dragon", "Red Dragon", // z
    "Red 5 Man", "Red 5 Pin", "Red 5 Sou", // red fives
];

static MPSZ_TILE_STRINGS_MAP: Lazy<BoomHashMap<&'static str, Tile>> = Lazy::new(|| {
    let mut values = vec![];
    for id in 0..MPSZ_TILE_STRINGS_LEN {
        values.push(Tile::try_from(id).unwrap());
    }
    BoomHashMap::new(MPSZ_TILE_STRINGS.to_vec(), values)
});

/// A single mahjong tile, identified by a `u8` ID.
///
/// IDs 0~8 are 1m~9m, 9~17 are 1p~9p, 18~26 are 1s~9s, 27~33 are 1z~7z
/// (East, South, West, North, White, Green, Red), and 34~36 are the red
/// fives, notated `0m`, `0p` and `0s`.
#[derive(Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile(u8);

impl Tile {
    const MAX: usize = MPSZ_TILE_STRINGS_LEN - 1;

    /// # Safety
    /// Calling this method with an out-of-bounds tile ID is undefined behavior.
    #[inline]
    #[must_use]
    pub const unsafe fn new_unchecked(id: u8) -> Self {
        Self(id)
    }

    /// Builds a tile from an MPSZ digit and suit letter.
    ///
    /// Returns `None` for tiles that do not exist, such as `0z` or `8z`.
    #[must_use]
    pub const fn from_parts(num: u8, suit: char) -> Option<Self> {
        let kind = match suit {
            'm' => 0,
            'p' => 1,
            's' => 2,
            'z' => 3,
            _ => return None,
        };

        match (kind, num) {
            (3, 1..=7) => Some(Self(3 * 9 + num - 1)),
            (0..=2, 1..=9) => Some(Self(kind * 9 + num - 1)),
            (0..=2, 0) => Some(Self(3 * 9 + 7 + kind)),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }
    #[inline]
    #[must_use]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// The MPSZ suit letter (`m`, `p`, `s` or `z`).
    #[must_use]
    pub const fn suit(self) -> char {
        match self.0 {
            tu8!(0m) => 'm',
            tu8!(0p) => 'p',
            tu8!(0s) => 's',
            id => match id / 9 {
                0 => 'm',
                1 => 'p',
                2 => 's',
                _ => 'z',
            },
        }
    }

    /// The MPSZ digit, `0` for a red five.
    #[must_use]
    pub const fn num(self) -> u8 {
        match self.0 {
            tu8!(0m) | tu8!(0p) | tu8!(0s) => 0,
            id => id % 9 + 1,
        }
    }

    #[inline]
    #[must_use]
    pub const fn deaka(self) -> Self {
        match self.0 {
            tu8!(0m) => t!(5m),
            tu8!(0p) => t!(5p),
            tu8!(0s) => t!(5s),
            _ => self,
        }
    }

    #[inline]
    #[must_use]
    pub const fn akaize(self) -> Self {
        match self.0 {
            tu8!(5m) => t!(0m),
            tu8!(5p) => t!(0p),
            tu8!(5s) => t!(0s),
            _ => self,
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_aka(self) -> bool {
        matches_tu8!(self.0, 0m | 0p | 0s)
    }

    #[inline]
    #[must_use]
    pub const fn is_honor(self) -> bool {
        matches_tu8!(self.0, 1z | 2z | 3z | 4z | 5z | 6z | 7z)
    }

    /// The tile indicated as dora when `self` is the indicator.
    ///
    /// Wraps 9 to 1 within a suit, North to East, and Red back to White.
    #[inline]
    #[must_use]
    pub const fn next(self) -> Self {
        let tile = self.deaka();
        let kind = tile.0 / 9;
        let num = tile.0 % 9;

        if kind < 3 {
            Self(kind * 9 + (num + 1) % 9)
        } else if num < 4 {
            Self(3 * 9 + (num + 1) % 4)
        } else {
            Self(3 * 9 + 4 + (num - 4 + 1) % 3)
        }
    }

    /// English name of the tile, e.g. `"4 Pin"`, `"Red 5 Sou"`, `"East"`.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        DISPLAY_NAMES[self.0 as usize]
    }

    const fn as_ord(self) -> u8 {
        let id = self.0;
        match id {
            tu8!(0m) => 4,
            tu8!(0p) => 14,
            tu8!(0s) => 24,
            _ => {
                let kind = id / 9;
                let num = id % 9;
                let ord_id = kind * 10 + num;
                match ord_id {
                    4..=8 | 14..=18 | 24..=28 => ord_id + 1,
                    _ => ord_id,
                }
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum InvalidTile {
    #[error("not a valid tile ID: {0}")]
    Number(usize),
    #[error("not a valid tile: {0:?}")]
    String(String),
}

impl TryFrom<u8> for Tile {
    type Error = InvalidTile;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        Self::try_from(v as usize)
    }
}

impl TryFrom<usize> for Tile {
    type Error = InvalidTile;

    fn try_from(v: usize) -> Result<Self, Self::Error> {
        if v > Tile::MAX {
            Err(InvalidTile::Number(v))
        } else {
            // SAFETY: `v` has been proven to be in bound.
            let tile = unsafe { Self::new_unchecked(v as u8) };
            Ok(tile)
        }
    }
}

impl FromStr for Tile {
    type Err = InvalidTile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MPSZ_TILE_STRINGS_MAP
            .get(s)
            .copied()
            .ok_or_else(|| InvalidTile::String(s.to_owned()))
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self, f)
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // SAFETY: `Tile` is in-bound iff it is constructed safely.
        let s = unsafe { MPSZ_TILE_STRINGS.get_unchecked(self.0 as usize) };
        f.write_str(s)
    }
}

impl<'de> Deserialize<'de> for Tile {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let tile = String::deserialize(deserializer)?
            .parse()
            .map_err(serde::de::Error::custom)?;
        Ok(tile)
    }
}

impl Serialize for Tile {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl Ord for Tile {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_ord().cmp(&other.as_ord())
    }
}

impl PartialOrd for Tile {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
