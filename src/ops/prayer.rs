//! Prayer request workflows.

use crate::db::DataService;
use crate::errors::AppResult;
use crate::models::{PrayerRequest, PrayerStatus};
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

/// Prayer requests, newest first, optionally limited to one status.
pub fn list_prayers(
    service: &DataService,
    status: Option<PrayerStatus>,
) -> AppResult<Vec<PrayerRequest>> {
    let requests: Vec<PrayerRequest> = service.fetch_all()?;
    Ok(match status {
        Some(status) => requests
            .into_iter()
            .filter(|request| request.status() == status)
            .collect(),
        None => requests,
    })
}

/// Changes the status of a stored request.
///
/// Setting `Answered` this way leaves the answer date empty; moving away
/// from `Answered` clears it.
pub fn set_prayer_status(
    service: &DataService,
    id: Uuid,
    status: PrayerStatus,
) -> AppResult<PrayerRequest> {
    let mut request: PrayerRequest = service.require(id)?;
    request.set_status(status);
    service.update(&mut request)?;

    info!("Prayer request {} is now {}", id, status);
    Ok(request)
}

/// Marks a stored request answered at `answered_at`, with optional notes.
pub fn answer_prayer(
    service: &DataService,
    id: Uuid,
    answered_at: DateTime<Utc>,
    notes: Option<String>,
) -> AppResult<PrayerRequest> {
    let mut request: PrayerRequest = service.require(id)?;
    request.answer(answered_at, notes);
    service.update(&mut request)?;

    info!("Prayer request {} answered", id);
    Ok(request)
}
