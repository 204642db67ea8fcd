//! Tissue CLI - static site generator for markdown page trees.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod build;

#[derive(Parser)]
#[command(name = "tissue")]
#[command(about = "Build a static site from markdown, templates and static assets")]
#[command(version)]
pub struct Cli {
    /// Site root holding markdown/, templates/ and static/
    #[arg(short, long, default_value = ".")]
    root: PathBuf,

    /// Path to the config file, relative to the site root
    #[arg(short, long, default_value = "tissue.toml")]
    config: PathBuf,

    /// Also log every rendered page, partial and static copy
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stdout)
        .init();

    build::run(&cli.root, &cli.config)
}
