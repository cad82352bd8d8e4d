use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "promptdoc",
    version,
    about = "Turn project documents into structured, prompt-ready text",
    after_help = "Supported formats: .pdf, .docx, .txt, .md. Settings are read from \
                  .promptdoc/config.toml in the current directory. Set RUST_LOG or pass \
                  --verbose for diagnostics on stderr."
)]
pub struct Cli {
    /// Log pipeline stages to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Ingest documents and print one JSON result per file.
    ///
    /// Each line is either {"ok": {...}} with the assembled body, metadata
    /// and sections, or {"error": "...", "file": "..."}. Exits with status 1
    /// if any file failed.
    Ingest {
        /// Files to ingest
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Print only the assembled bodies, separated by a blank line
        #[arg(long)]
        body_only: bool,
        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
        /// Override the maximum file size in MiB
        #[arg(long)]
        max_size_mb: Option<u32>,
    },

    /// Print the sections recognized in a document
    Sections {
        /// Document to analyze
        file: PathBuf,
    },

    /// List ALL files under a directory (supported + skipped).
    ///
    /// Shows which files would be rejected by validation and why
    /// (unsupported_extension, empty, too_large).
    Files {
        /// Directory to scan (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
        /// Show only files the pipeline would accept
        #[arg(long, conflicts_with = "skipped_only")]
        supported_only: bool,
        /// Show only skipped files
        #[arg(long)]
        skipped_only: bool,
    },

    /// List all supported file extensions and their extraction backends.
    Supported,

    /// Show failed ingestions recorded in the failure log.
    ///
    /// Logging is enabled with `[failures] enabled = true` in
    /// .promptdoc/config.toml.
    Failures {
        /// Clear the failure log
        #[arg(long)]
        clear: bool,
        /// Show counts by kind and reason
        #[arg(long)]
        summary: bool,
    },
}
