pub mod loader;
pub mod types;

// Re-export commonly used types
pub use loader::ExportLoader;
pub use types::{BurpExport, BurpItem, RequestBlob, TextField};
