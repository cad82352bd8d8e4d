// Inherit lint configuration from lib.rs for consistency
#![allow(
    clippy::missing_errors_doc,
    clippy::fn_params_excessive_bools,
    clippy::unnecessary_wraps
)]

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use promptdoc::cli::commands::{Cli, Command};
use promptdoc::cli::output;
use promptdoc::config::{Config, PipelineOptions};
use promptdoc::operations;
use promptdoc::pipeline::Pipeline;
use promptdoc::sink::{FailureLog, TracingSink};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}", output::format_error(&e));
            std::process::exit(1);
        }
    }
}

/// Logs go to stderr; stdout carries JSON only.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

/// `Ok(false)` means the command ran but some input failed.
fn run(cli: Cli) -> Result<bool, Box<dyn std::fmt::Display>> {
    match cli.command {
        Command::Ingest {
            files,
            body_only,
            pretty,
            max_size_mb,
        } => cmd_ingest(&files, body_only, pretty, max_size_mb),
        Command::Sections { file } => cmd_sections(&file).map(|()| true),
        Command::Files {
            path,
            supported_only,
            skipped_only,
        } => cmd_files(&path, supported_only, skipped_only).map(|()| true),
        Command::Supported => cmd_supported().map(|()| true),
        Command::Failures { clear, summary } => cmd_failures(clear, summary).map(|()| true),
    }
}

type CmdResult<T = ()> = Result<T, Box<dyn std::fmt::Display>>;

fn map_err(e: impl std::fmt::Display + 'static) -> Box<dyn std::fmt::Display> {
    Box::new(e.to_string())
}

fn get_config() -> CmdResult<Config> {
    Config::from_cwd().map_err(map_err)
}

/// Pipeline wired to the configured limit and failure log.
fn build_pipeline(config: &Config, max_size_mb: Option<u32>) -> Pipeline {
    let options = max_size_mb.map_or_else(
        || config.pipeline_options(),
        PipelineOptions::with_max_file_size_mb,
    );
    let pipeline = Pipeline::new(options);
    if config.settings.failures.enabled {
        pipeline.with_sink((TracingSink, FailureLog::new(config.get_failure_log_path())))
    } else {
        pipeline
    }
}

fn cmd_ingest(
    files: &[PathBuf],
    body_only: bool,
    pretty: bool,
    max_size_mb: Option<u32>,
) -> CmdResult<bool> {
    let config = get_config()?;
    let pipeline = build_pipeline(&config, max_size_mb);
    let pretty = pretty || config.pretty_output();

    let entries = operations::ingest_paths(&pipeline, files);
    let all_ok = entries.iter().all(operations::IngestEntry::is_ok);

    if body_only {
        let bodies: Vec<&str> = entries
            .iter()
            .filter_map(|e| e.document().map(|d| d.body.as_str()))
            .collect();
        if !bodies.is_empty() {
            println!("{}", bodies.join("\n\n"));
        }
        // Failures still surface, on stderr
        for entry in entries.iter().filter(|e| !e.is_ok()) {
            eprintln!("{}", output::format_json(entry));
        }
    } else {
        for entry in &entries {
            println!("{}", output::format(entry, pretty));
        }
    }
    Ok(all_ok)
}

fn cmd_sections(file: &Path) -> CmdResult {
    let config = get_config()?;
    let pipeline = build_pipeline(&config, None);
    let sections = operations::sections_of(&pipeline, file).map_err(map_err)?;
    println!("{}", output::format(&sections, config.pretty_output()));
    Ok(())
}

fn cmd_files(path: &Path, supported_only: bool, skipped_only: bool) -> CmdResult {
    let config = get_config()?;
    let filter = operations::FilesFilter {
        skipped_only,
        supported_only,
    };
    let result =
        operations::list_files(path, config.max_file_size_bytes(), filter).map_err(map_err)?;
    println!("{}", output::format(&result, config.pretty_output()));
    Ok(())
}

fn cmd_supported() -> CmdResult {
    let config = get_config()?;
    let result = operations::list_supported(config.max_file_size_bytes());
    println!("{}", output::format(&result, config.pretty_output()));
    Ok(())
}

fn cmd_failures(clear: bool, summary: bool) -> CmdResult {
    let config = get_config()?;
    let log = FailureLog::new(config.get_failure_log_path());

    if clear {
        operations::clear_failures(&log).map_err(map_err)?;
        println!("{}", output::format_json(&serde_json::json!({ "cleared": true })));
        return Ok(());
    }

    if summary {
        let stats = operations::summarize_failures(&log).map_err(map_err)?;
        println!("{}", output::format_json(&stats));
    } else {
        let result = operations::list_failures(&log).map_err(map_err)?;
        println!("{}", output::format_json(&result));
    }
    Ok(())
}
