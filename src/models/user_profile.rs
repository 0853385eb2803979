//! The user's profile and preferences.

use crate::constants::DEFAULT_THEME;
use crate::errors::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Who can see what the user shares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrivacyLevel {
    Public,
    Friends,
    #[default]
    Private,
}

impl PrivacyLevel {
    pub const ALL: [PrivacyLevel; 3] = [
        PrivacyLevel::Public,
        PrivacyLevel::Friends,
        PrivacyLevel::Private,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PrivacyLevel::Public => "Public",
            PrivacyLevel::Friends => "Friends",
            PrivacyLevel::Private => "Private",
        }
    }
}

impl fmt::Display for PrivacyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrivacyLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PrivacyLevel::ALL
            .iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s.trim()))
            .copied()
            .ok_or_else(|| AppError::InvalidInput(format!("Unknown privacy level: '{}'", s)))
    }
}

/// The user's profile. One is expected per store, but that is not enforced;
/// readers take the oldest.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub(crate) id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub preferred_theme: String,
    pub notifications_enabled: bool,
    pub biometric_enabled: bool,
    pub privacy_level: PrivacyLevel,
    pub(crate) created_at: DateTime<Utc>,
    pub(crate) updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        UserProfile {
            id: Uuid::new_v4(),
            name: name.into(),
            email: None,
            preferred_theme: DEFAULT_THEME.to_string(),
            notifications_enabled: true,
            biometric_enabled: false,
            privacy_level: PrivacyLevel::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = self.updated_at.max(now);
    }
}
