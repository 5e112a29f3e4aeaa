//! Run dumper for the richtext engine.
//!
//! Renders a stylesheet + markup pair and prints one line per styled run,
//! which makes stylesheet debugging a matter of reading the output.
//!
//! ## Usage
//!
//! ```bash
//! # Style a document with one or more stylesheet files
//! richtext-dump --styles theme.css --styles overrides.css document.xml
//!
//! # Everything inline
//! richtext-dump --style-text 'em { color: #ff0000; }' --markup-text '<em>hi</em>'
//!
//! # Expose the parsers' traces
//! RUST_LOG=debug richtext-dump --markup-text 'plain text'
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use richtext::{RichText, StyledRun};

#[derive(Parser)]
#[command(name = "richtext-dump")]
#[command(about = "Render markup through a stylesheet and list the styled runs")]
struct Cli {
    /// Markup file to render
    markup: Option<PathBuf>,

    /// Stylesheet file(s), concatenated in order
    #[arg(short, long)]
    styles: Vec<PathBuf>,

    /// Inline stylesheet text, appended after the --styles files
    #[arg(long)]
    style_text: Option<String>,

    /// Inline markup text, instead of a markup file
    #[arg(long)]
    markup_text: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let mut fragments: Vec<String> = Vec::new();
    for path in &cli.styles {
        match read(path) {
            Ok(text) => fragments.push(text),
            Err(code) => return code,
        }
    }
    if let Some(text) = cli.style_text {
        fragments.push(text);
    }

    let markup = match (&cli.markup, cli.markup_text) {
        (_, Some(text)) => text,
        (Some(path), None) => match read(path) {
            Ok(text) => text,
            Err(code) => return code,
        },
        (None, None) => {
            eprintln!("error: provide a markup file or --markup-text");
            return ExitCode::FAILURE;
        }
    };

    let fragment_refs: Vec<&str> = fragments.iter().map(String::as_str).collect();
    let rich = RichText::from_fragments(&fragment_refs);

    match rich.render(&markup) {
        Ok(runs) => {
            for (index, run) in runs.iter().enumerate() {
                println!("{index:>3} {}", describe(run));
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("markup error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn read(path: &Path) -> Result<String, ExitCode> {
    fs::read_to_string(path).map_err(|err| {
        eprintln!("error: cannot read {}: {err}", path.display());
        ExitCode::FAILURE
    })
}

fn describe(run: &StyledRun) -> String {
    let style = &run.style;
    let mut attrs = format!("font={} size={}", style.font.name, style.font.size);
    if let Some(color) = style.color {
        let [r, g, b, a] = color.to_array();
        attrs.push_str(&format!(" color=({r:.3}, {g:.3}, {b:.3}, {a:.3})"));
    }
    if let Some(alignment) = style.alignment {
        attrs.push_str(&format!(" align={alignment:?}"));
    }
    if let Some(line_height) = style.line_height {
        attrs.push_str(&format!(" line-height={line_height}"));
    }
    if let Some(offset) = style.baseline_offset {
        attrs.push_str(&format!(" baseline-offset={offset}"));
    }
    format!("{:?} [{attrs}]", run.text)
}
