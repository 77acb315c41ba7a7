use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Burp2PostmanError {
    #[error("Input file '{}' not found.", .0.display())]
    InputNotFound(PathBuf),

    #[error("Failed to parse XML file: {0}")]
    Xml(#[from] quick_xml::DeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid config file '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },
}

/// Result type for burp2postman crate
pub type Result<T> = std::result::Result<T, Burp2PostmanError>;
