//! Prayer requests and their lifecycle.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Where a prayer request stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrayerStatus {
    Active,
    Answered,
    Archived,
}

impl PrayerStatus {
    pub const ALL: [PrayerStatus; 3] = [
        PrayerStatus::Active,
        PrayerStatus::Answered,
        PrayerStatus::Archived,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrayerStatus::Active => "Active",
            PrayerStatus::Answered => "Answered",
            PrayerStatus::Archived => "Archived",
        }
    }
}

impl fmt::Display for PrayerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrayerStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrayerStatus::ALL
            .iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown prayer status: '{}'", s)))
    }
}

/// A prayer request.
///
/// The answer date only exists while the request is answered. Changing the
/// status never writes an answer date by itself; use
/// [`PrayerRequest::record_answer_date`] or [`PrayerRequest::answer`] for that.
/// Moving away from `Answered` clears it.
///
/// # Examples
///
/// ```
/// use faith_journal::models::{PrayerRequest, PrayerStatus};
///
/// let mut request = PrayerRequest::new("Family Health", "Strength for mom");
/// request.set_status(PrayerStatus::Answered);
///
/// assert!(request.is_answered());
/// assert!(request.answer_date().is_none());
/// ```
///
/// Requests are only built through [`PrayerRequest::new`] and read back from
/// the store, so an answer date cannot be smuggled in from JSON:
///
/// ```compile_fail
/// use faith_journal::models::PrayerRequest;
///
/// let json = r#"{"status":"Active","answer_date":"2024-01-01T00:00:00Z"}"#;
/// let _request: PrayerRequest = serde_json::from_str(json).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PrayerRequest {
    pub(crate) id: Uuid,
    pub title: String,
    pub details: String,
    pub date: DateTime<Utc>,
    pub(crate) status: PrayerStatus,
    pub(crate) answer_date: Option<DateTime<Utc>>,
    pub answer_notes: Option<String>,
    pub tags: Vec<String>,
    pub is_private: bool,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl PrayerRequest {
    pub fn new(title: impl Into<String>, details: impl Into<String>) -> Self {
        let now = Utc::now();
        PrayerRequest {
            id: Uuid::new_v4(),
            title: title.into(),
            details: details.into(),
            date: now,
            status: PrayerStatus::Active,
            answer_date: None,
            answer_notes: None,
            tags: Vec::new(),
            is_private: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_date(mut self, date: DateTime<Utc>) -> Self {
        self.date = date;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn private(mut self) -> Self {
        self.is_private = true;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn status(&self) -> PrayerStatus {
        self.status
    }

    pub fn is_answered(&self) -> bool {
        self.status == PrayerStatus::Answered
    }

    pub fn answer_date(&self) -> Option<DateTime<Utc>> {
        self.answer_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Changes the status. Leaving `Answered` drops the answer date.
    pub fn set_status(&mut self, status: PrayerStatus) {
        self.status = status;
        if status != PrayerStatus::Answered {
            self.answer_date = None;
        }
    }

    /// Writes the answer date of an answered request.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` if the request is not answered.
    pub fn record_answer_date(&mut self, date: DateTime<Utc>) -> AppResult<()> {
        if !self.is_answered() {
            return Err(AppError::InvalidInput(format!(
                "Cannot record an answer date on a prayer request that is {}",
                self.status
            )));
        }
        self.answer_date = Some(date);
        Ok(())
    }

    /// Marks the request answered at `date`, optionally with notes.
    pub fn answer(&mut self, date: DateTime<Utc>, notes: Option<String>) {
        self.status = PrayerStatus::Answered;
        self.answer_date = Some(date);
        if notes.is_some() {
            self.answer_notes = notes;
        }
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = self.updated_at.max(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_new_request_is_active() {
        let request = PrayerRequest::new("Family Health", "details");
        assert_eq!(request.status(), PrayerStatus::Active);
        assert!(request.answer_date().is_none());
        assert!(request.answer_notes.is_none());
    }

    #[test]
    fn test_status_change_does_not_set_answer_date() {
        let mut request = PrayerRequest::new("Family Health", "details");
        request.set_status(PrayerStatus::Answered);

        assert_eq!(request.status(), PrayerStatus::Answered);
        assert!(request.answer_date().is_none());
    }

    #[test]
    fn test_answer_date_requires_answered_status() {
        let mut request = PrayerRequest::new("Family Health", "details");
        assert!(request.record_answer_date(Utc::now()).is_err());
        assert!(request.answer_date().is_none());

        request.set_status(PrayerStatus::Answered);
        let when = Utc::now();
        request.record_answer_date(when).unwrap();
        assert_eq!(request.answer_date(), Some(when));
    }

    #[test]
    fn test_leaving_answered_clears_answer_date() {
        let mut request = PrayerRequest::new("Job", "details");
        request.answer(Utc::now(), Some("New position".to_string()));
        assert!(request.answer_date().is_some());

        request.set_status(PrayerStatus::Archived);
        assert!(request.answer_date().is_none());
        assert_eq!(request.answer_notes.as_deref(), Some("New position"));
    }

    #[test]
    fn test_touch_is_monotonic() {
        let mut request = PrayerRequest::new("Job", "details");
        let original = request.updated_at();
        request.touch(original - Duration::minutes(5));
        assert_eq!(request.updated_at(), original);
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(
            "answered".parse::<PrayerStatus>().unwrap(),
            PrayerStatus::Answered
        );
        assert!("closed".parse::<PrayerStatus>().is_err());
    }
}
