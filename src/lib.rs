pub mod collection;
pub mod config;
pub mod converter;
pub mod error;
pub mod export;
pub mod logger;
pub mod parser;

// Re-export commonly used types
pub use converter::{Conversion, ConversionSummary, ConvertOptions, Converter};
pub use error::{Burp2PostmanError, Result};
