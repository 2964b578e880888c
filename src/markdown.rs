//! Locates `mahjong` fences and inline tile runs in a Markdown document and
//! splices rendered markup into the original text.

use std::ops::Range;

use once_cell::sync::Lazy;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use regex::Regex;

use crate::fence::{format_fence, format_inline, is_mahjong_fence};
use crate::render::{self, RenderOptions};

static INLINE_TILES_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r":((?:[0-9]+[mpsz])+):").unwrap());

#[derive(Debug, Clone)]
pub struct DocumentOptions {
    pub render: RenderOptions,
    /// Process inline runs like `:123m:` outside code.
    pub inline_tiles: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            render: RenderOptions::default(),
            inline_tiles: true,
        }
    }
}

/// Replaces every `mahjong` fence and inline tile run in `input`, leaving
/// all other bytes untouched. The result is still Markdown, with raw HTML
/// where the notation used to be.
#[must_use]
pub fn process_document(input: &str, opts: &DocumentOptions) -> String {
    let mut replacements: Vec<(Range<usize>, String)> = vec![];
    // span of the mahjong fence being collected, with its body so far
    let mut fence: Option<(Range<usize>, String)> = None;
    let mut in_code_block = false;

    for (event, range) in Parser::new_ext(input, Options::all()).into_offset_iter() {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                in_code_block = true;
                if let CodeBlockKind::Fenced(info) = &kind {
                    if is_mahjong_fence(info) {
                        fence = Some((range, String::new()));
                    }
                }
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                if let Some((span, body)) = fence.take() {
                    let html = if has_closing_fence(&input[span.clone()]) {
                        format_fence(&body, &opts.render)
                    } else {
                        render::render_error("unclosed mahjong fence")
                    };
                    replacements.push((span, html));
                }
            }
            Event::Text(text) => {
                if let Some((_, body)) = fence.as_mut() {
                    body.push_str(&text);
                } else if !in_code_block && opts.inline_tiles {
                    inline_replacements(input, range, opts, &mut replacements);
                }
            }
            _ => {}
        }
    }

    splice(input, replacements)
}

/// Renders a processed document to HTML, raw fragments passed through.
#[must_use]
pub fn to_html(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, Options::all());
    let mut html = String::with_capacity(markdown.len() * 2);
    pulldown_cmark::html::push_html(&mut html, parser);
    html
}

fn inline_replacements(
    input: &str,
    range: Range<usize>,
    opts: &DocumentOptions,
    replacements: &mut Vec<(Range<usize>, String)>,
) {
    for caps in INLINE_TILES_RE.captures_iter(&input[range.clone()]) {
        let m = caps.get(0).unwrap();
        if let Some(html) = format_inline(&caps[1], &opts.render) {
            let start = range.start + m.start();
            replacements.push((start..range.start + m.end(), html));
        }
    }
}

/// Whether the raw source of a fenced block ends with a closing fence line.
/// pulldown-cmark silently closes a dangling fence at EOF; we report it
/// instead, as a half-written block is always an authoring mistake.
fn has_closing_fence(block: &str) -> bool {
    let block = block.trim_end();
    let mut lines = block.lines();

    let Some(first) = lines.next() else {
        return false;
    };
    let opening = first.trim_start();
    let fence_char = if opening.starts_with('~') { '~' } else { '`' };
    let fence_len = opening.chars().take_while(|&c| c == fence_char).count();

    let Some(last) = lines.last() else {
        return false;
    };
    let last = last.trim();

    !last.is_empty()
        && last.chars().all(|c| c == fence_char)
        && last.chars().count() >= fence_len
}

fn splice(input: &str, mut replacements: Vec<(Range<usize>, String)>) -> String {
    replacements.sort_by_key(|(range, _)| range.start);

    let mut out = String::with_capacity(input.len());
    let mut cursor = 0;

    for (range, html) in replacements {
        if range.start < cursor {
            continue;
        }
        out.push_str(&input[cursor..range.start]);
        out.push_str(&html);
        cursor = range.end;
    }

    out.push_str(&input[cursor..]);
    out
}
