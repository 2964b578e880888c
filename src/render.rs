use std::io::prelude::*;

use anyhow::Result;
use clap::ValueEnum;
use minify_html::{minify, Cfg};
use mpsz::{Hand, HandBlock, Meld, MeldKind, Tile};
use once_cell::sync::Lazy;
use serde::Serialize;
use serde_with::skip_serializing_none;
use tera::{Context, Tera};

/// The stylesheet the rendered markup is styled by. Ship it once per site.
pub static STYLESHEET: &str = include_str!("../templates/mahjong.css");

static TEMPLATES: Lazy<Tera> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.autoescape_on(vec![".tera", ".html"]);

    tera.add_raw_templates([
        ("macros.tera", include_str!("../templates/macros.tera")),
        ("hand.tera", include_str!("../templates/hand.tera")),
        ("inline.tera", include_str!("../templates/inline.tera")),
        ("error.tera", include_str!("../templates/error.tera")),
        ("page.tera", include_str!("../templates/page.tera")),
    ])
    .expect("failed to parse template");

    tera
});

// Unicode Mahjong Tiles block, indexed by de-aka'd tile ID.
#[rustfmt::skip]
const TILE_GLYPHS: [&str; 34] = [
    "🀇", "🀈", "🀉", "🀊", "🀋", "🀌", "🀍", "🀎", "🀏", // m
    "🀙", "🀚", "🀛", "🀜", "🀝", "🀞", "🀟", "🀠", "🀡", // p
    "🀐", "🀑", "🀒", "🀓", "🀔", "🀕", "🀖", "🀗", "🀘", // s
    "🀀", "🀁", "🀂", "🀃", "🀆", "🀅", "🀄", // z
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    Auto,
}

impl Theme {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Auto => "auto",
        }
    }
}

/// Which pair of tiles of a closed kan is laid face down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ClosedKanStyle {
    /// Face down at both ends, faces up in the middle.
    #[default]
    Outer,
    /// Faces up at both ends, face down in the middle.
    Inner,
}

#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    pub theme: Theme,
    pub closed_kan_style: ClosedKanStyle,
}

#[derive(Serialize)]
struct TileNode {
    notation: String,
    name: &'static str,
    glyph: &'static str,
    aka: bool,
    rotated: bool,
    added: bool,
    dora: bool,
    back: bool,
}

impl TileNode {
    fn new(tile: Tile, dora_bits: u64) -> Self {
        Self {
            notation: tile.to_string(),
            name: tile.display_name(),
            glyph: TILE_GLYPHS[tile.deaka().as_usize()],
            aka: tile.is_aka(),
            rotated: false,
            added: false,
            dora: dora_bits & (1 << tile.deaka().as_u8()) != 0,
            back: false,
        }
    }

    fn back() -> Self {
        Self {
            notation: String::new(),
            name: "",
            glyph: "",
            aka: false,
            rotated: false,
            added: false,
            dora: false,
            back: true,
        }
    }
}

/// One visual slot of a meld: a single tile, or two stacked tiles of an
/// added kan.
#[derive(Serialize)]
struct CellNode {
    stack: bool,
    tiles: Vec<TileNode>,
}

impl CellNode {
    fn single(tile: TileNode) -> Self {
        Self {
            stack: false,
            tiles: vec![tile],
        }
    }
}

#[derive(Serialize)]
struct MeldNode {
    open: bool,
    cells: Vec<CellNode>,
}

/// Everything the hand template needs, precomputed.
#[skip_serializing_none]
#[derive(Serialize)]
pub struct View<'a> {
    theme: &'static str,
    title: Option<&'a str>,
    notation: Option<&'a str>,
    dora: Option<Vec<TileNode>>,
    uradora: Option<Vec<TileNode>>,
    closed: Vec<TileNode>,
    draw: Option<TileNode>,
    melds: Vec<MeldNode>,
}

impl<'a> View<'a> {
    #[must_use]
    pub fn new(block: &'a HandBlock, opts: &RenderOptions) -> Self {
        Self::from_hand(
            &block.hand,
            block.title.as_deref(),
            Some(block.notation.as_str()),
            opts,
        )
    }

    #[must_use]
    pub fn from_hand(
        hand: &Hand,
        title: Option<&'a str>,
        notation: Option<&'a str>,
        opts: &RenderOptions,
    ) -> Self {
        let dora_bits = dora_bits(hand);

        let tile_row = |tiles: &[Tile]| -> Vec<TileNode> {
            tiles.iter().map(|&t| TileNode::new(t, dora_bits)).collect()
        };

        Self {
            theme: opts.theme.as_str(),
            title,
            notation,
            dora: (!hand.dora_indicators.is_empty()).then(|| tile_row(&hand.dora_indicators)),
            uradora: (!hand.uradora_indicators.is_empty())
                .then(|| tile_row(&hand.uradora_indicators)),
            closed: tile_row(&hand.closed_tiles),
            draw: hand.draw_tile.map(|t| TileNode::new(t, dora_bits)),
            melds: hand
                .melds
                .iter()
                .map(|m| meld_node(m, dora_bits, opts.closed_kan_style))
                .collect(),
        }
    }

    /// Renders the hand figure.
    pub fn render<W>(&self, w: &mut W) -> Result<()>
    where
        W: Write,
    {
        let ctx = Context::from_serialize(self)?;
        let out = TEMPLATES.render("hand.tera", &ctx)?;
        w.write_all(out.as_bytes())?;
        Ok(())
    }

    pub fn to_html(&self) -> Result<String> {
        let mut buf = vec![];
        self.render(&mut buf)?;
        Ok(String::from_utf8(buf)?)
    }
}

/// Bit set of tile IDs that are dora, derived from both indicator rows.
fn dora_bits(hand: &Hand) -> u64 {
    hand.dora_indicators
        .iter()
        .chain(&hand.uradora_indicators)
        .fold(0, |bits, ind| bits | 1 << ind.next().as_u8())
}

fn meld_node(meld: &Meld, dora_bits: u64, kan_style: ClosedKanStyle) -> MeldNode {
    let tile = |i: usize| TileNode::new(meld.tiles[i], dora_bits);

    let cells = match meld.kind {
        MeldKind::KanClosed => {
            let backs: [usize; 2] = match kan_style {
                ClosedKanStyle::Outer => [0, 3],
                ClosedKanStyle::Inner => [1, 2],
            };
            (0..4)
                .map(|i| {
                    if backs.contains(&i) {
                        CellNode::single(TileNode::back())
                    } else {
                        CellNode::single(tile(i))
                    }
                })
                .collect()
        }
        MeldKind::KanAdded => {
            // The added tile (always the fourth) stacks onto the called
            // tile; a self-drawn added kan stacks the middle.
            let stack_at = meld.rotated.unwrap_or(1);
            (0..3)
                .map(|i| {
                    if i == stack_at {
                        let mut base = tile(i);
                        let mut added = tile(3);
                        if meld.rotated.is_some() {
                            base.rotated = true;
                            added.rotated = true;
                            added.added = true;
                        }
                        CellNode {
                            stack: true,
                            tiles: vec![base, added],
                        }
                    } else {
                        CellNode::single(tile(i))
                    }
                })
                .collect()
        }
        _ => (0..meld.tiles.len())
            .map(|i| {
                let mut node = tile(i);
                node.rotated = meld.rotated == Some(i);
                CellNode::single(node)
            })
            .collect(),
    };

    MeldNode {
        open: meld.is_open(),
        cells,
    }
}

/// Renders a bare tile sequence, as used for inline notation.
pub fn render_inline(tiles: &[Tile], opts: &RenderOptions) -> Result<String> {
    #[derive(Serialize)]
    struct InlineView {
        theme: &'static str,
        tiles: Vec<TileNode>,
    }

    let view = InlineView {
        theme: opts.theme.as_str(),
        tiles: tiles.iter().map(|&t| TileNode::new(t, 0)).collect(),
    };

    let ctx = Context::from_serialize(&view)?;
    Ok(TEMPLATES.render("inline.tera", &ctx)?)
}

/// Renders an error notice in place of a hand. Never fails.
#[must_use]
pub fn render_error(message: &str) -> String {
    let mut ctx = Context::new();
    ctx.insert("message", message);

    TEMPLATES.render("error.tera", &ctx).unwrap_or_else(|_| {
        format!(
            "<div class=\"mahjong-error\"><strong>Mahjong Error:</strong> {}</div>",
            tera::escape_html(message)
        )
    })
}

/// Wraps rendered body HTML in a standalone page with the stylesheet
/// inlined, minified.
pub fn render_page<W>(w: &mut W, title: &str, body: &str) -> Result<()>
where
    W: Write,
{
    let mut ctx = Context::new();
    ctx.insert("title", title);
    ctx.insert("css", STYLESHEET);
    ctx.insert("body", body);
    let original = TEMPLATES.render("page.tera", &ctx)?;

    let cfg = Cfg {
        keep_comments: true,
        minify_css: true,
        minify_js: true,
        ..Cfg::spec_compliant()
    };
    let out = minify(original.as_bytes(), &cfg);

    w.write_all(&out)?;
    Ok(())
}
