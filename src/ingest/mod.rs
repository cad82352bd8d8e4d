pub mod detector;
pub mod dispatcher;
pub mod scanner;
pub mod source;
pub mod text;
pub mod validate;

pub use detector::{detect, FileFormat};
pub use dispatcher::{Dispatcher, DocumentParser};
pub use scanner::Scanner;
pub use source::{DiskFile, MemoryFile, SourceFile};
pub use validate::validate;
