//! User profile and subscription workflows.
//!
//! At most one profile and one subscription are expected per store. This is
//! not enforced; the oldest record of each is treated as current.

use crate::db::DataService;
use crate::errors::AppResult;
use crate::models::{PrivacyLevel, Subscription, SubscriptionKind, UserProfile};
use chrono::{DateTime, Utc};
use tracing::info;

/// Changes to apply to the profile. `None` fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub preferred_theme: Option<String>,
    pub notifications_enabled: Option<bool>,
    pub biometric_enabled: Option<bool>,
    pub privacy_level: Option<PrivacyLevel>,
}

impl ProfileUpdate {
    fn apply(self, profile: &mut UserProfile) {
        if let Some(name) = self.name {
            profile.name = name;
        }
        if let Some(email) = self.email {
            profile.email = Some(email);
        }
        if let Some(theme) = self.preferred_theme {
            profile.preferred_theme = theme;
        }
        if let Some(enabled) = self.notifications_enabled {
            profile.notifications_enabled = enabled;
        }
        if let Some(enabled) = self.biometric_enabled {
            profile.biometric_enabled = enabled;
        }
        if let Some(level) = self.privacy_level {
            profile.privacy_level = level;
        }
    }
}

/// The current profile, if one has been created.
pub fn current_profile(service: &DataService) -> AppResult<Option<UserProfile>> {
    service.fetch_first()
}

/// Applies `changes` to the current profile, creating it on first use.
///
/// A new profile without a name in `changes` is named after `default_name`.
pub fn save_profile(
    service: &DataService,
    changes: ProfileUpdate,
    default_name: &str,
) -> AppResult<UserProfile> {
    match current_profile(service)? {
        Some(mut profile) => {
            changes.apply(&mut profile);
            service.update(&mut profile)?;
            info!("Updated profile {}", profile.id());
            Ok(profile)
        }
        None => {
            let mut profile = UserProfile::new(default_name);
            changes.apply(&mut profile);
            service.save(&profile)?;
            info!("Created profile {}", profile.id());
            Ok(profile)
        }
    }
}

/// The current subscription, if one has been recorded.
pub fn current_subscription(service: &DataService) -> AppResult<Option<Subscription>> {
    service.fetch_first()
}

/// Switches the current subscription to `kind`, creating it on first use.
///
/// `None` for `end_date` or `auto_renew` keeps the stored value. Switching to
/// Free always drops the end date.
///
/// # Errors
///
/// Returns `AppError::InvalidInput` when an end date is given for a Free
/// subscription; nothing is written in that case.
pub fn set_subscription(
    service: &DataService,
    kind: SubscriptionKind,
    end_date: Option<DateTime<Utc>>,
    auto_renew: Option<bool>,
) -> AppResult<Subscription> {
    let existing = current_subscription(service)?;
    let is_new = existing.is_none();
    let mut subscription = existing.unwrap_or_else(|| Subscription::new(kind));

    subscription.set_kind(kind);
    if end_date.is_some() {
        subscription.set_end_date(end_date)?;
    }
    if let Some(auto_renew) = auto_renew {
        subscription.auto_renew = auto_renew;
    }

    if is_new {
        service.save(&subscription)?;
    } else {
        service.update(&mut subscription)?;
    }

    info!("Subscription is now {}", subscription.kind());
    Ok(subscription)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::AppError;
    use crate::ops::test_support::test_service;
    use chrono::Duration;

    #[test]
    fn test_profile_created_then_updated() {
        let service = test_service();
        assert!(current_profile(&service).unwrap().is_none());

        let created = save_profile(
            &service,
            ProfileUpdate {
                email: Some("ruth@example.com".to_string()),
                ..Default::default()
            },
            "Friend",
        )
        .unwrap();
        assert_eq!(created.name, "Friend");

        let updated = save_profile(
            &service,
            ProfileUpdate {
                name: Some("Ruth".to_string()),
                privacy_level: Some(PrivacyLevel::Friends),
                ..Default::default()
            },
            "Friend",
        )
        .unwrap();

        assert_eq!(updated.id(), created.id());
        let stored = current_profile(&service).unwrap().unwrap();
        assert_eq!(stored.name, "Ruth");
        assert_eq!(stored.email.as_deref(), Some("ruth@example.com"));
        assert_eq!(stored.privacy_level, PrivacyLevel::Friends);
        assert!(stored.updated_at() >= created.updated_at());
    }

    #[test]
    fn test_subscription_upgrade_and_downgrade() {
        let service = test_service();
        let end = Utc::now() + Duration::days(30);

        let premium =
            set_subscription(&service, SubscriptionKind::Premium, Some(end), Some(true)).unwrap();
        assert_eq!(premium.end_date(), Some(end));

        let free = set_subscription(&service, SubscriptionKind::Free, None, None).unwrap();
        assert_eq!(free.id(), premium.id());
        assert!(free.end_date().is_none());
        assert!(free.auto_renew);

        let stored = current_subscription(&service).unwrap().unwrap();
        assert_eq!(stored.kind(), SubscriptionKind::Free);
        assert!(stored.end_date().is_none());
    }

    #[test]
    fn test_omitted_end_date_is_kept() {
        let service = test_service();
        let end = Utc::now() + Duration::days(30);
        set_subscription(&service, SubscriptionKind::Premium, Some(end), Some(false)).unwrap();

        let renewed =
            set_subscription(&service, SubscriptionKind::Premium, None, Some(true)).unwrap();
        assert_eq!(renewed.end_date(), Some(end));
        assert!(renewed.auto_renew);

        let family = set_subscription(&service, SubscriptionKind::Family, None, None).unwrap();
        assert_eq!(family.end_date(), Some(end));

        let stored = current_subscription(&service).unwrap().unwrap();
        assert_eq!(stored.kind(), SubscriptionKind::Family);
        assert_eq!(stored.end_date(), Some(end));
        assert!(stored.auto_renew);
    }

    #[test]
    fn test_free_subscription_rejects_end_date() {
        let service = test_service();
        let result = set_subscription(
            &service,
            SubscriptionKind::Free,
            Some(Utc::now() + Duration::days(1)),
            None,
        );

        assert!(matches!(result, Err(AppError::InvalidInput(_))));
        assert!(current_subscription(&service).unwrap().is_none());
    }
}
