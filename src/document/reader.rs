// src/document/reader.rs
use crate::utils::error::DocumentError;
use std::path::Path;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// How the bytes of a document are turned into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl DocumentKind {
    /// PDF when the extension says so or the content starts with the PDF magic bytes.
    pub fn detect(path: &Path, bytes: &[u8]) -> Self {
        let pdf_extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("pdf"))
            .unwrap_or(false);

        if pdf_extension || bytes.starts_with(PDF_MAGIC) {
            DocumentKind::Pdf
        } else {
            DocumentKind::PlainText
        }
    }
}

/// Reads a profile document and returns its text content, all pages in reading order.
pub async fn read_document(path: &Path) -> Result<String, DocumentError> {
    tracing::info!("Reading document: {}", path.display());
    let bytes = tokio::fs::read(path).await?; // Propagates io::Error as DocumentError::Io
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());

    let kind = DocumentKind::detect(path, &bytes);
    let text = match kind {
        // PDF decoding is CPU-bound, keep it off the async worker threads
        DocumentKind::Pdf => {
            let owned_path = path.to_path_buf();
            tokio::task::spawn_blocking(move || decode(&owned_path, &bytes, kind))
                .await
                .map_err(|e| DocumentError::PdfExtraction(path.display().to_string(), format!("extraction task failed: {}", e)))??
        }
        DocumentKind::PlainText => decode(path, &bytes, kind)?,
    };

    if text.trim().is_empty() {
        tracing::warn!("Document {} produced no text", path.display());
    } else {
        tracing::debug!("Extracted {} characters of text ({:?})", text.chars().count(), kind);
    }
    Ok(text)
}

fn decode(path: &Path, bytes: &[u8], kind: DocumentKind) -> Result<String, DocumentError> {
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(bytes).map_err(|e| {
            tracing::error!("PDF extraction failed for {}: {}", path.display(), e);
            DocumentError::PdfExtraction(path.display().to_string(), e.to_string())
        }),
        DocumentKind::PlainText => String::from_utf8(bytes.to_vec())
            .map_err(|e| DocumentError::Encoding(format!("{}: {}", path.display(), e))),
    }
}
