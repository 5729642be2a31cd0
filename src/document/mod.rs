// src/document/mod.rs
pub mod reader;

#[allow(unused_imports)]
pub use reader::{read_document, DocumentKind};
