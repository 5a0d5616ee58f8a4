mod assemble;
mod cli;
mod converter;
mod epub_reader;
mod error;
mod extract;
mod reader;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(&cli) {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: &cli::Cli) -> Result<()> {
    let conversion = converter::convert(&cli.input, &cli.output)?;
    println!(
        "Successfully converted '{}' to text format at {}",
        conversion.title,
        conversion.output.display()
    );

    if cli.verbose {
        let size = fs::metadata(&conversion.output)
            .with_context(|| format!("Failed to stat {}", conversion.output.display()))?
            .len();
        println!("\nInput file: {}", cli.input.display());
        println!("Output file: {}", conversion.output.display());
        println!("Sections: {} ({} chapters)", conversion.sections, conversion.chapters);
        println!("File size: {} bytes", size);
    }

    Ok(())
}

/// Logs go to stderr so stdout only carries the conversion report.
/// `RUST_LOG` wins over the verbosity flag.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_filter(env_filter),
        )
        .init();
}
