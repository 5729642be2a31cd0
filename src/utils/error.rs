// src/utils/error.rs
use thiserror::Error;

// Define specific error types for different parts of the application
#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Could not read document: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text from PDF '{0}': {1}")]
    PdfExtraction(String, String),

    #[error("Document is not valid UTF-8 text: {0}")]
    Encoding(String),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("No stored profile with id {0}")]
    NotFound(String),

    #[error("Invalid profile id: {0}")]
    InvalidId(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Automatically convert IO errors

    #[error("Document acquisition failed: {0}")]
    Document(#[from] DocumentError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Data processing failed: {0}")]
    Processing(String),
}
