use clap::Parser;
use std::path::PathBuf;

/// Convert EPUB ebooks to plain text, keeping chapter structure
#[derive(Parser, Debug)]
#[command(name = "epub2txt", version, about)]
pub struct Cli {
    /// Path to the input EPUB file
    pub input: PathBuf,

    /// Path where the output text file will be saved.
    /// Missing parent directories are created.
    pub output: PathBuf,

    /// Print input/output paths and the resulting file size after converting
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}
