// crates/blkcsv-cli/src/main.rs

#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use blkcsv_core::{convert_files, ConvertConfig, ConvertOptions, Error, TrailingToken};
use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(
    name = "blkcsv",
    about = "Convert blkparse output to CSV",
    long_about = "Convert blkparse output to CSV.\n\nEach input line `major,minor cpu seq time pid action rwbs offset + size [proc]` becomes `major,minor,seq,time,pid,rwbs,offset,size`. Fields are picked by position; short lines yield partial rows.",
    version = env!("CARGO_PKG_VERSION")
)]
struct Cli {
    /// Input blkparse file, then output CSV file
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Directory that relative file names are resolved against
    #[arg(long, default_value = ".")]
    base_dir: PathBuf,

    /// Keep a final token that is not followed by a space (historical output drops it)
    #[arg(long, default_value_t = false)]
    flush_trailing: bool,
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("ERROR: {err:#}");
            match err.downcast_ref::<Error>() {
                Some(e) => {
                    if matches!(e, Error::Args(_)) {
                        eprintln!("{}", Cli::command().render_usage());
                    }
                    ExitCode::from(e.exit_code())
                }
                None => ExitCode::FAILURE,
            }
        }
    }
}

/// Initialize tracing with an env-driven filter (default INFO).
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = fmt::layer().with_target(false).with_level(true).compact();

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn run(cli: &Cli) -> Result<()> {
    let trailing = if cli.flush_trailing {
        TrailingToken::Flush
    } else {
        TrailingToken::Drop
    };
    let cfg = ConvertConfig::from_args(
        &cli.base_dir,
        &cli.files,
        ConvertOptions::with_trailing(trailing),
    )
    .map_err(Error::from)?;

    info!(input=%cfg.input.display(), output=%cfg.output.display(), ?trailing, "converting");
    let stats = convert_files(&cfg).map_err(Error::from).with_context(|| {
        format!(
            "converting {} to {}",
            cfg.input.display(),
            cfg.output.display()
        )
    })?;

    println!(
        "Converted {} lines ({} full, {} short) → {}",
        stats.lines,
        stats.full_records,
        stats.short_records,
        cfg.output.display()
    );
    Ok(())
}
