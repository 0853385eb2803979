//! User-presentable errors and the normalization that produces them.
//!
//! [`UserError`] is the closed taxonomy shown to users. Every failure is first
//! described as a [`RawFailure`] tagged with its origin, then mapped onto the
//! taxonomy by [`normalize`].

use super::{AppError, DatabaseError};
use crate::constants::{STORAGE_DELETE_CODES, STORAGE_SAVE_CODES};
use std::io;
use thiserror::Error;

const RECOVERY_RETRY_CONNECTION: &str =
    "Please ensure you have a stable internet connection and try again.";
const RECOVERY_NETWORK: &str = "Check your internet connection and try again.";
const RECOVERY_SYNC: &str =
    "Your data is saved locally. It will sync automatically when your connection is restored.";
const RECOVERY_PERMISSION: &str = "Go to Settings > Faith Journal to enable necessary permissions.";
const RECOVERY_CONTACT_SUPPORT: &str = "If the problem persists, please contact support.";

/// An error in the form it is presented to the user.
///
/// None of these are fatal: each describes something the user can retry,
/// fix, or ignore.
///
/// # Examples
///
/// ```
/// use faith_journal::errors::UserError;
///
/// let error = UserError::Sync("sync timeout".to_string());
/// assert!(error.to_string().contains("Sync error: sync timeout"));
/// assert!(error.recovery_suggestion().contains("saved locally"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UserError {
    /// Data could not be written.
    #[error("Unable to save your data. Please check your connection and try again.")]
    SaveFailed,

    /// Data could not be removed.
    #[error("Unable to delete. Please try again.")]
    DeleteFailed,

    /// A network request failed.
    #[error("Network error: {0}. Please check your internet connection.")]
    Network(String),

    /// Remote synchronization failed; the local copy is kept.
    #[error("Sync error: {0}. Your data is saved locally and will sync when possible.")]
    Sync(String),

    /// Input could not be accepted.
    #[error("Invalid data format. Please check your input and try again.")]
    InvalidData,

    /// The platform refused access.
    #[error("Permission denied. Please enable access in Settings.")]
    PermissionDenied,

    /// The requested record does not exist.
    #[error("Item not found. It may have been deleted.")]
    NotFound,

    /// Anything not covered above.
    #[error("An unexpected error occurred: {0}. Please try again.")]
    Unknown(String),
}

impl UserError {
    /// Stable identifier of the error kind, independent of any detail message.
    pub fn id(&self) -> &'static str {
        match self {
            UserError::SaveFailed => "save_failed",
            UserError::DeleteFailed => "delete_failed",
            UserError::Network(_) => "network_error",
            UserError::Sync(_) => "sync_error",
            UserError::InvalidData => "invalid_data",
            UserError::PermissionDenied => "permission_denied",
            UserError::NotFound => "not_found",
            UserError::Unknown(_) => "unknown",
        }
    }

    /// Human-readable description of what went wrong.
    pub fn description(&self) -> String {
        self.to_string()
    }

    /// What the user can do about it. Every kind has one.
    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            UserError::SaveFailed | UserError::DeleteFailed => RECOVERY_RETRY_CONNECTION,
            UserError::Network(_) => RECOVERY_NETWORK,
            UserError::Sync(_) => RECOVERY_SYNC,
            UserError::PermissionDenied => RECOVERY_PERMISSION,
            UserError::InvalidData | UserError::NotFound | UserError::Unknown(_) => {
                RECOVERY_CONTACT_SUPPORT
            }
        }
    }

    /// Sync failures keep the local copy and resolve on their own.
    pub fn is_sync_deferred(&self) -> bool {
        matches!(self, UserError::Sync(_))
    }
}

/// A failure tagged with where it came from, ready for [`normalize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawFailure {
    /// The embedded store, identified by a storage-domain code.
    Storage {
        /// Storage-domain code (see `constants::STORAGE_*`)
        code: i64,
        /// Detail message
        message: String,
    },
    /// A network request.
    Network {
        /// Detail message
        message: String,
    },
    /// Remote synchronization.
    Sync {
        /// Detail message
        message: String,
    },
    /// Any other origin.
    Other {
        /// Detail message
        message: String,
    },
    /// A failure that is already a [`UserError`].
    Known(UserError),
}

impl From<UserError> for RawFailure {
    fn from(error: UserError) -> Self {
        RawFailure::Known(error)
    }
}

impl From<&AppError> for RawFailure {
    fn from(error: &AppError) -> Self {
        match error {
            AppError::Database(DatabaseError::NotFound(_)) => {
                RawFailure::Known(UserError::NotFound)
            }
            AppError::Database(db_error) => RawFailure::Storage {
                code: db_error.storage_code(),
                message: db_error.to_string(),
            },
            AppError::InvalidInput(_) => RawFailure::Known(UserError::InvalidData),
            AppError::Io(io_error) if io_error.kind() == io::ErrorKind::PermissionDenied => {
                RawFailure::Known(UserError::PermissionDenied)
            }
            other => RawFailure::Other {
                message: other.to_string(),
            },
        }
    }
}

impl From<AppError> for RawFailure {
    fn from(error: AppError) -> Self {
        RawFailure::from(&error)
    }
}

/// Maps a failure onto the user-facing taxonomy.
///
/// Normalizing an already-typed failure returns it unchanged, so
/// `normalize(normalize(x).into()) == normalize(x)`.
///
/// # Examples
///
/// ```
/// use faith_journal::errors::{normalize, RawFailure, UserError};
///
/// let saved = normalize(RawFailure::Storage { code: 134030, message: "constraint".into() });
/// assert_eq!(saved, UserError::SaveFailed);
///
/// let deleted = normalize(RawFailure::Storage { code: 4, message: "gone".into() });
/// assert_eq!(deleted, UserError::DeleteFailed);
///
/// assert_eq!(normalize(saved.clone().into()), saved);
/// ```
pub fn normalize(failure: RawFailure) -> UserError {
    match failure {
        RawFailure::Storage { code, .. } if STORAGE_SAVE_CODES.contains(&code) => {
            UserError::SaveFailed
        }
        RawFailure::Storage { code, .. } if STORAGE_DELETE_CODES.contains(&code) => {
            UserError::DeleteFailed
        }
        RawFailure::Storage { message, .. } => UserError::Unknown(message),
        RawFailure::Network { message } => UserError::Network(message),
        RawFailure::Sync { message } => UserError::Sync(message),
        RawFailure::Other { message } => UserError::Unknown(message),
        RawFailure::Known(error) => error,
    }
}
