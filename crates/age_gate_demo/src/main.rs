//! Mount the age gate into a host page and print the resulting document.

use age_gate::{AgeGate, GateConfig, StyleMap};
use anyhow::{Context as _, Error};
use clap::{Parser, ValueEnum};
use dom::Document;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Output {
    /// Serialized markup of the whole document
    #[default]
    Html,
    /// Deterministic JSON snapshot
    Json,
    /// Indented node tree
    Tree,
}

#[derive(Parser, Debug)]
#[command(name = "age-gate-demo")]
#[command(about = "Mount the age verification overlay into an HTML page")]
struct Args {
    /// Host page to mount into; an empty document when omitted
    #[arg(short, long, value_name = "FILE")]
    page: Option<PathBuf>,

    /// Gate configuration (`content`, `styles`, `showOnLoad`)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Style map exported by a CSS-modules build; replaces `styles` from
    /// the configuration
    #[arg(short, long, value_name = "FILE")]
    styles: Option<PathBuf>,

    /// Leave the overlay hidden regardless of `showOnLoad`
    #[arg(long)]
    hidden: bool,

    #[arg(short, long, value_enum, default_value_t)]
    output: Output,
}

fn read(path: &Path) -> Result<String, Error> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn load_config(args: &Args) -> Result<GateConfig, Error> {
    let mut config = match &args.config {
        Some(path) => GateConfig::from_json_str(&read(path)?)
            .with_context(|| format!("invalid configuration in {}", path.display()))?,
        None => GateConfig::default(),
    };
    if let Some(path) = &args.styles {
        config.styles = StyleMap::from_json_str(&read(path)?)
            .with_context(|| format!("invalid style map in {}", path.display()))?;
    }
    if args.hidden {
        config.show_on_load = false;
    }
    Ok(config)
}

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = Args::parse();

    let mut document = match &args.page {
        Some(path) => Document::parse(&read(path)?)?,
        None => Document::new(),
    };
    let config = load_config(&args)?;
    let gate = AgeGate::mount(&mut document, &config)?;
    info!(
        target: "age_gate_demo",
        "mounted gate at {:?}, {} updates recorded",
        gate.root(),
        document.updates().len()
    );

    match args.output {
        Output::Html => println!("{}", document.outer_html(document.root())?),
        Output::Json => println!("{}", document.to_json_string()),
        Output::Tree => println!("{document:?}"),
    }
    Ok(())
}
