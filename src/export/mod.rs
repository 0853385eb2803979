//! Exporting journal entries for sharing.
//!
//! Entries render to plain text or to a one-page PDF. Rendering never fails;
//! writing a document to disk can, and [`Exporter::share_entry`] falls back
//! to plain text when it does.

pub mod pdf;
pub mod text;

pub use pdf::{to_document, to_document_in};
pub use text::{to_plain_text, to_plain_text_in};

use crate::constants::DOCUMENT_EXTENSION;
use crate::errors::{AppResult, ExportError};
use crate::models::JournalEntry;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const UNTITLED_FILE_STEM: &str = "Untitled";

/// Requested export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Text,
    Document,
}

/// What an export produced for sharing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SharePayload {
    Text(String),
    Document(PathBuf),
}

/// Writes exported documents into one output directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
}

impl Default for Exporter {
    /// Exports into the system temporary directory.
    fn default() -> Self {
        Exporter::new(env::temp_dir())
    }
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Exporter {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the document for `entry` is written to: the title with spaces
    /// (and path separators) replaced by `_`, plus `.pdf`.
    pub fn document_path(&self, entry: &JournalEntry) -> PathBuf {
        let stem: String = entry
            .title
            .chars()
            .map(|ch| match ch {
                ' ' | '/' | '\\' => '_',
                other => other,
            })
            .collect();
        let stem = match stem.as_str() {
            "" | "." | ".." => UNTITLED_FILE_STEM.to_string(),
            _ => stem,
        };

        self.output_dir
            .join(format!("{}.{}", stem, DOCUMENT_EXTENSION))
    }

    /// Renders `entry` as a PDF and writes it to [`Exporter::document_path`],
    /// replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns `ExportError::WriteFailed` if the directory cannot be created
    /// or the file cannot be written.
    pub fn write_document(&self, entry: &JournalEntry) -> AppResult<PathBuf> {
        let path = self.document_path(entry);
        let bytes = to_document(entry);
        debug!("Rendered document ({} bytes)", bytes.len());

        fs::create_dir_all(&self.output_dir)
            .and_then(|_| fs::write(&path, &bytes))
            .map_err(|source| ExportError::WriteFailed {
                path: path.clone(),
                source,
            })?;

        info!("Exported entry {} to document", entry.id());
        Ok(path)
    }

    /// Produces something shareable for `entry`.
    ///
    /// A document that cannot be written degrades to plain text.
    pub fn share_entry(&self, entry: &JournalEntry, format: ExportFormat) -> SharePayload {
        match format {
            ExportFormat::Text => SharePayload::Text(to_plain_text(entry)),
            ExportFormat::Document => match self.write_document(entry) {
                Ok(path) => SharePayload::Document(path),
                Err(e) => {
                    warn!("Document export failed, sharing as text: {}", e);
                    SharePayload::Text(to_plain_text(entry))
                }
            },
        }
    }
}
