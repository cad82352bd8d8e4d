//! Operations behind the CLI commands.
//!
//! Each returns a serializable result so `main.rs` only parses arguments
//! and prints.

pub mod failures;
pub mod files;
pub mod ingest;
pub mod supported;

pub use failures::{clear_failures, list_failures, summarize_failures, FailuresResult};
pub use files::{list_files, FilesFilter, FilesResult, FilesSummary};
pub use ingest::{ingest_paths, sections_of, IngestEntry};
pub use supported::{list_supported, ExtensionInfo, SupportedResult};
