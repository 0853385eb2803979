//! Devotional workflows.

use crate::db::DataService;
use crate::errors::AppResult;
use crate::models::Devotional;
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

/// Devotionals, newest first. With `pending_only`, completed ones are skipped.
pub fn list_devotionals(service: &DataService, pending_only: bool) -> AppResult<Vec<Devotional>> {
    let devotionals: Vec<Devotional> = service.fetch_all()?;
    Ok(devotionals
        .into_iter()
        .filter(|devotional| !pending_only || !devotional.is_completed())
        .collect())
}

/// Marks a stored devotional completed at `at`, or reopens it when `at` is `None`.
pub fn complete_devotional(
    service: &DataService,
    id: Uuid,
    at: Option<DateTime<Utc>>,
) -> AppResult<Devotional> {
    let mut devotional: Devotional = service.require(id)?;
    match at {
        Some(at) => devotional.mark_completed(at),
        None => devotional.mark_incomplete(),
    }
    service.update(&mut devotional)?;

    info!(
        "Devotional {} marked {}",
        id,
        if devotional.is_completed() { "completed" } else { "incomplete" }
    );
    Ok(devotional)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_support::test_service;

    #[test]
    fn test_complete_and_reopen() {
        let service = test_service();
        let devotional = Devotional::new("Walking in Faith", "Trust", "David Rodriguez", "Faith");
        service.save(&devotional).unwrap();

        let now = Utc::now();
        let completed = complete_devotional(&service, devotional.id(), Some(now)).unwrap();
        assert!(completed.is_completed());
        assert_eq!(completed.completion_date(), Some(now));
        assert!(list_devotionals(&service, true).unwrap().is_empty());

        let reopened = complete_devotional(&service, devotional.id(), None).unwrap();
        assert!(!reopened.is_completed());
        assert!(reopened.completion_date().is_none());

        let stored: Devotional = service.require(devotional.id()).unwrap();
        assert!(!stored.is_completed());
        assert_eq!(list_devotionals(&service, true).unwrap().len(), 1);
    }
}
