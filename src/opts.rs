use std::path::PathBuf;

use clap::Parser;

use crate::render::{ClosedKanStyle, Theme};

const ABOUT: &str = r#"🀄️ Render Riichi Mahjong hands written in MPSZ notation inside Markdown documents.

Fenced code blocks with the `mahjong` info string and inline runs like :123m:
are replaced with styled tile markup; everything else passes through untouched.

Basic usage:
  $ mdmahjong -i page.md -o page.out.md
  $ mdmahjong --hand "123m456p789s11222z" --page -o hand.html --open
  $ mdmahjong --emit-css -o mahjong.css"#;

#[derive(Debug, Parser)]
#[clap(version, about = ABOUT)]
pub struct Options {
    /// The name of a Markdown file to process. If FILE is "-" or empty, read
    /// from stdin.
    #[clap(short, long, value_name = "FILE", conflicts_with = "hand")]
    pub in_file: Option<PathBuf>,

    /// The output file. If FILE is "-" or empty, write to stdout.
    #[clap(short, long, value_name = "FILE")]
    pub out_file: Option<PathBuf>,

    /// Render a single hand block body given on the command line instead of
    /// processing a document. The body may contain newlines to carry option
    /// lines such as "title:" and "dora:".
    #[clap(long, value_name = "NOTATION")]
    pub hand: Option<String>,

    /// Color theme of the rendered tiles.
    #[clap(short, long, value_enum, default_value_t = Theme::Auto)]
    pub theme: Theme,

    /// Which pair of tiles of a closed kan is laid face down.
    #[clap(long, value_enum, default_value_t = ClosedKanStyle::Outer)]
    pub closed_kan_style: ClosedKanStyle,

    /// Do not process inline tile runs like :123m:.
    #[clap(long)]
    pub no_inline: bool,

    /// Write the stylesheet instead of processing anything.
    #[clap(long, conflicts_with_all = ["hand", "in_file", "page"])]
    pub emit_css: bool,

    /// Wrap the output in a standalone HTML page with the stylesheet
    /// inlined, rendering the Markdown fully.
    #[clap(long)]
    pub page: bool,

    /// Open the output file after finishing.
    #[clap(long, requires = "out_file")]
    pub open: bool,

    /// Print verbose logs.
    #[clap(short, long)]
    pub verbose: bool,
}

impl Options {
    /// The render configuration this invocation asks for.
    #[must_use]
    pub fn render_options(&self) -> crate::render::RenderOptions {
        crate::render::RenderOptions {
            theme: self.theme,
            closed_kan_style: self.closed_kan_style,
        }
    }
}
