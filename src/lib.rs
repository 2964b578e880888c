//! Render Riichi Mahjong hands written in MPSZ notation inside Markdown
//! documents.
//!
//! Fenced code blocks with the `mahjong` info string are parsed with
//! [`mpsz`] and replaced by styled tile markup; inline runs like `:123m:`
//! render as small tiles in running text. The stylesheet the markup depends
//! on is [`render::STYLESHEET`].

pub mod fence;
mod log;
pub mod markdown;
pub mod opts;
pub mod render;
