//! Subscription state.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Subscription tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SubscriptionKind {
    #[default]
    Free,
    Premium,
    Family,
}

impl SubscriptionKind {
    pub const ALL: [SubscriptionKind; 3] = [
        SubscriptionKind::Free,
        SubscriptionKind::Premium,
        SubscriptionKind::Family,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionKind::Free => "Free",
            SubscriptionKind::Premium => "Premium",
            SubscriptionKind::Family => "Family",
        }
    }
}

impl fmt::Display for SubscriptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SubscriptionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SubscriptionKind::ALL
            .iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown subscription type: '{}'", s)))
    }
}

/// The user's subscription. Free subscriptions never end, so only paid
/// tiers carry an end date.
///
/// ```compile_fail
/// use faith_journal::models::Subscription;
///
/// let json = r#"{"kind":"Free","end_date":"2030-01-01T00:00:00Z"}"#;
/// let _subscription: Subscription = serde_json::from_str(json).unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscription {
    pub(crate) id: Uuid,
    pub(crate) kind: SubscriptionKind,
    pub start_date: DateTime<Utc>,
    pub(crate) end_date: Option<DateTime<Utc>>,
    pub is_active: bool,
    pub auto_renew: bool,
    pub(crate) created_at: DateTime<Utc>,
}

impl Subscription {
    pub fn new(kind: SubscriptionKind) -> Self {
        let now = Utc::now();
        Subscription {
            id: Uuid::new_v4(),
            kind,
            start_date: now,
            end_date: None,
            is_active: true,
            auto_renew: false,
            created_at: now,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn kind(&self) -> SubscriptionKind {
        self.kind
    }

    pub fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Switches tier. Moving to Free drops the end date.
    pub fn set_kind(&mut self, kind: SubscriptionKind) {
        self.kind = kind;
        if kind == SubscriptionKind::Free {
            self.end_date = None;
        }
    }

    /// Sets or clears the end date.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidInput` when setting an end date on a Free subscription.
    pub fn set_end_date(&mut self, end_date: Option<DateTime<Utc>>) -> AppResult<()> {
        if end_date.is_some() && self.kind == SubscriptionKind::Free {
            return Err(AppError::InvalidInput(
                "Free subscriptions do not have an end date".to_string(),
            ));
        }
        self.end_date = end_date;
        Ok(())
    }

    /// True once a paid subscription has passed its end date.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.end_date.map_or(false, |end| end <= now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_defaults() {
        let subscription = Subscription::new(SubscriptionKind::Free);
        assert!(subscription.is_active);
        assert!(!subscription.auto_renew);
        assert!(subscription.end_date().is_none());
    }

    #[test]
    fn test_free_rejects_end_date() {
        let mut subscription = Subscription::new(SubscriptionKind::Free);
        let result = subscription.set_end_date(Some(Utc::now()));
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert!(subscription.set_end_date(None).is_ok());
    }

    #[test]
    fn test_downgrade_clears_end_date() {
        let mut subscription = Subscription::new(SubscriptionKind::Premium);
        subscription
            .set_end_date(Some(Utc::now() + Duration::days(30)))
            .unwrap();
        subscription.set_kind(SubscriptionKind::Free);
        assert!(subscription.end_date().is_none());
    }

    #[test]
    fn test_is_expired() {
        let now = Utc::now();
        let mut subscription = Subscription::new(SubscriptionKind::Family);
        assert!(!subscription.is_expired(now));

        subscription.set_end_date(Some(now - Duration::days(1))).unwrap();
        assert!(subscription.is_expired(now));
    }
}
