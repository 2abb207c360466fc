// SPDX-License-Identifier: MIT OR Apache-2.0
//! `ScriptScribe` - visual-script asset export tool.
//!
//! # Usage
//!
//! ```bash
//! # Export every script asset under a directory
//! scriptscribe export --assets ./Assets --out ./Docs
//!
//! # Export, then keep re-exporting assets as they change
//! scriptscribe watch --assets ./Assets --out ./Docs
//! ```

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Command line interface
#[derive(Parser)]
#[command(
    name = "scriptscribe",
    version,
    about = "Export visual-script assets to JSON documents"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// Available commands
#[derive(Subcommand)]
enum Command {
    /// Export every script asset under a directory
    Export {
        /// Directory scanned recursively for `.scriptasset` files
        #[arg(long)]
        assets: PathBuf,
        /// Output directory for JSON documents
        #[arg(long)]
        out: PathBuf,
    },
    /// Export, then watch the asset directory and re-export on change
    Watch {
        /// Directory scanned recursively for `.scriptasset` files
        #[arg(long)]
        assets: PathBuf,
        /// Output directory for JSON documents
        #[arg(long)]
        out: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("scriptscribe_cli=debug".parse()?)
        .add_directive("scriptscribe_export=info".parse()?);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Export { assets, out } => commands::run_export(&assets, &out),
        Command::Watch { assets, out } => commands::run_watch(&assets, &out),
    }
}
