//! gapline - inspect a text file through the gap buffer engine
//! Main entry point

use anyhow::{bail, Context};
use gapline::buffer::api::BufferView;
use gapline::buffer::line_ending::LineEnding;
use gapline::settings::{create_buffer_settings_registry, parse_line_ending, BufferOptions};
use gapline::Document;
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: gapline <path> [--normalize <lf|crlf|cr>] [--set <name>=<value>]...";

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(std::env::args().skip(1).collect()) {
        eprintln!("gapline: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Vec<String>) -> anyhow::Result<()> {
    let mut args = args.into_iter();
    let Some(path) = args.next() else {
        bail!(USAGE);
    };

    let registry = create_buffer_settings_registry();
    let mut options = BufferOptions::default();
    let mut normalize: Option<LineEnding> = None;
    while let Some(flag) = args.next() {
        let Some(value) = args.next() else {
            bail!(USAGE);
        };
        match flag.as_str() {
            "--normalize" => {
                normalize = Some(parse_line_ending(&value).context("bad --normalize")?);
            }
            "--set" => registry
                .apply_assignment(&mut options, &value)
                .with_context(|| format!("bad --set {value}"))?,
            _ => bail!(USAGE),
        }
    }

    let mut doc = Document::open_with_options(&path, &options)
        .with_context(|| format!("failed to open {path}"))?;
    print_summary(&doc.buffer, doc.display_name(), &doc.buffer.line_ending().to_string());

    if let Some(line_ending) = normalize {
        doc.buffer.set_line_ending(line_ending);
        doc.save()
            .with_context(|| format!("failed to write {path}"))?;
        println!("rewrote {} with {} line endings", doc.display_name(), line_ending);
    }
    Ok(())
}

fn print_summary(view: &impl BufferView, name: &str, line_ending: &str) {
    let longest = (0..view.line_count())
        .map(|line| view.line_length(line))
        .max()
        .unwrap_or(0);
    println!("{name}");
    println!("  bytes:        {}", view.len());
    println!("  lines:        {}", view.line_count());
    println!("  longest line: {longest}");
    println!("  line ending:  {line_ending}");
}
