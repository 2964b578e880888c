//! Model and parser for Riichi Mahjong hands written in MPSZ notation.
//!
//! MPSZ notation writes tiles as digit runs followed by a suit letter
//! (`123m456p789s11222z`), red fives as `0m`/`0p`/`0s`, and called melds in
//! brackets with a direction glyph: `(123m<)` for a chi from kamicha,
//! `[1111z]` for a closed kan, `(111+1m^)` for an added kan.

#![deny(
    rust_2018_idioms,
    clippy::uninlined_format_args,
    clippy::unseparated_literal_suffix,
    clippy::must_use_candidate,
    clippy::redundant_else,
    clippy::manual_assert,
    clippy::manual_ok_or,
    clippy::needless_for_each,
    clippy::needless_continue,
    clippy::map_unwrap_or,
    clippy::get_unwrap,
    clippy::cloned_instead_of_copied,
    clippy::equatable_if_let,
    clippy::explicit_into_iter_loop,
    clippy::explicit_iter_loop,
    clippy::filter_map_next,
    clippy::flat_map_option,
    clippy::implicit_clone,
    clippy::rest_pat_in_fully_bound_structs,
    clippy::semicolon_if_nothing_returned,
    clippy::str_to_string,
    clippy::string_to_string,
    clippy::string_lit_as_bytes,
    clippy::trivially_copy_pass_by_ref,
    clippy::unnested_or_patterns,
    clippy::mut_mut
)]

mod block;
mod hand;
mod macros;
mod parser;
mod tile;

pub use block::{parse_block_content, parse_hand_block, BlockOptions, HandBlock};
pub use hand::{CallFrom, Hand, Meld, MeldKind};
pub use parser::{parse_hand, parse_tiles, NotationError, ParseError};
pub use tile::{InvalidTile, Tile};
