//! Text structuring stages: normalize, find sections, assemble the result.

pub mod assemble;
pub mod normalize;
pub mod sections;

pub use assemble::{assemble, TRAILER};
pub use normalize::normalize;
pub use sections::extract_sections;
