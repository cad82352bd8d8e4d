pub mod document;
pub mod section;
pub mod token_estimate;

pub use document::{AssembledDocument, DocumentMetadata, ParseOutcome};
pub use section::{SectionKey, SectionMap};
