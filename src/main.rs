use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::Path;

use anyhow::{ensure, Context, Result};
use clap::Parser;
use mdmahjong::log;
use mdmahjong::markdown::{self, DocumentOptions};
use mdmahjong::opts::Options;
use mdmahjong::{fence, render};

fn main() -> Result<()> {
    let opts = Options::parse();
    let render_opts = opts.render_options();

    if opts.emit_css {
        let mut w = writer(opts.out_file.as_deref())?;
        w.write_all(render::STYLESHEET.as_bytes())?;
        drop(w);
        return open_if_asked(&opts);
    }

    let (body, title) = if let Some(hand) = &opts.hand {
        (fence::format_fence(hand, &render_opts), "mdmahjong".to_owned())
    } else {
        let input = read_input(opts.in_file.as_deref())?;
        if opts.verbose {
            log!("processing markdown ({} bytes)...", input.len());
        }

        let doc_opts = DocumentOptions {
            render: render_opts,
            inline_tiles: !opts.no_inline,
        };
        let title = opts
            .in_file
            .as_deref()
            .and_then(Path::file_stem)
            .map_or_else(|| "mdmahjong".to_owned(), |s| s.to_string_lossy().into_owned());

        (markdown::process_document(&input, &doc_opts), title)
    };

    let mut w = writer(opts.out_file.as_deref())?;
    if opts.page {
        if opts.verbose {
            log!("rendering page...");
        }
        let html = if opts.hand.is_some() {
            body
        } else {
            markdown::to_html(&body)
        };
        render::render_page(&mut w, &title, &html)?;
    } else {
        w.write_all(body.as_bytes())?;
    }
    drop(w);

    open_if_asked(&opts)?;

    if opts.verbose {
        log!("done");
    }

    Ok(())
}

fn is_stdio_name(path: &Path) -> bool {
    path.as_os_str().is_empty() || path.as_os_str() == "-"
}

fn read_input(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) if !is_stdio_name(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {path:?}")),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn writer(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) if !is_stdio_name(path) => {
            let file =
                File::create(path).with_context(|| format!("failed to create {path:?}"))?;
            Ok(Box::new(io::BufWriter::new(file)))
        }
        _ => Ok(Box::new(io::stdout())),
    }
}

fn open_if_asked(opts: &Options) -> Result<()> {
    if !opts.open {
        return Ok(());
    }

    // clap's `requires` guarantees out_file is present alongside --open
    let Some(out) = opts.out_file.as_deref() else {
        return Ok(());
    };
    ensure!(!is_stdio_name(out), "--open requires a real output file");

    if opts.verbose {
        log!("opening {out:?}...");
    }
    opener::open(out).with_context(|| format!("failed to open {out:?}"))
}
