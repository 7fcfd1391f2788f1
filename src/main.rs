use std::{
    fs,
    io::{self, Read},
    path::Path,
};

use anyhow::Context;
use bibcite::{BibliographySource, Renderer, SmartPunctuation};
use clap::Parser;
use owo_colors::OwoColorize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};

mod cli;

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    init_logging(&args);

    match args.command {
        Command::Render { input, bib, style } => {
            let text = read_input(&input)?;
            let blob = bib.chain().resolve();
            let rendered = Renderer::new()
                .with_bare_style(style.into())
                .render_report(&text, blob);
            print!("{}", rendered.html);

            let unresolved: Vec<&str> = rendered.unresolved().collect();
            for key in &unresolved {
                warn!(key, "unresolved citation");
            }
            print_summary(rendered.citations.len() - unresolved.len(), unresolved.len());
        }
        Command::Bibliography { bib, smart } => {
            let mut renderer = Renderer::new();
            if smart {
                renderer = renderer.with_enhancer(SmartPunctuation);
            }
            println!("{}", renderer.render_bibliography(bib.chain().resolve()));
        }
        Command::Entries { bib } => {
            let entries: Vec<serde_json::Value> = Renderer::new()
                .entries(bib.chain().resolve())
                .values()
                .map(|r| {
                    serde_json::json!({
                        "key": r.key,
                        "type": r.item_type.as_str(),
                        "author": r.display_author,
                        "year": r.display_year,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
    }
    Ok(())
}

fn init_logging(args: &Cli) {
    let level = if args.verbose {
        "debug"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_env("BIBCITE_LOG").unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("failed to read text from stdin")?;
        return Ok(text);
    }
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn print_summary(resolved: usize, unresolved: usize) {
    let ok = format!("✓ {resolved}");
    let bad = format!("✗ {unresolved}");
    if std::env::var_os("NO_COLOR").is_some() {
        eprintln!("{ok} {bad}");
    } else {
        eprintln!("{} {}", ok.green(), bad.red());
    }
}
