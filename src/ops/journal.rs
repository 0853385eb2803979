//! Journal entry workflows.

use crate::db::DataService;
use crate::errors::AppResult;
use crate::export::{ExportFormat, Exporter, SharePayload};
use crate::models::JournalEntry;
use tracing::{debug, info};
use uuid::Uuid;

/// Narrows an entry listing. The default keeps everything.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Keep entries carrying this tag (case-insensitive).
    pub tag: Option<String>,
    /// Keep entries whose title or content contains this text (case-insensitive).
    pub text: Option<String>,
    /// Drop entries marked private.
    pub exclude_private: bool,
}

impl EntryFilter {
    fn matches(&self, entry: &JournalEntry) -> bool {
        if self.exclude_private && entry.is_private {
            return false;
        }

        if let Some(tag) = &self.tag {
            if !entry.tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                return false;
            }
        }

        if let Some(text) = &self.text {
            let needle = text.to_lowercase();
            if !entry.title.to_lowercase().contains(&needle)
                && !entry.content.to_lowercase().contains(&needle)
            {
                return false;
            }
        }

        true
    }
}

/// Entries matching `filter`, newest first.
pub fn list_entries(service: &DataService, filter: &EntryFilter) -> AppResult<Vec<JournalEntry>> {
    let entries: Vec<JournalEntry> = service.fetch_all()?;
    let total = entries.len();

    let matching: Vec<JournalEntry> = entries
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .collect();

    debug!("{} of {} entries match filter", matching.len(), total);
    Ok(matching)
}

/// Exports a stored entry.
///
/// # Errors
///
/// Returns `DatabaseError::NotFound` if no entry has this id. Document
/// write failures do not error; the payload falls back to text.
pub fn export_entry(
    service: &DataService,
    exporter: &Exporter,
    id: Uuid,
    format: ExportFormat,
) -> AppResult<SharePayload> {
    let entry: JournalEntry = service.require(id)?;
    info!("Exporting entry {} as {:?}", id, format);
    Ok(exporter.share_entry(&entry, format))
}
