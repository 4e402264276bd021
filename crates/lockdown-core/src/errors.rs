//! Error taxonomy for the lockdown agent
//!
//! Each collaborator has its own error type so the Controller can apply a
//! different propagation rule per collaborator: persistence errors abort a
//! transition, policy errors degrade it, launch and notification errors are
//! absorbed.

use serde::{Deserialize, Serialize};

/// Persistence collaborator failure. Fatal to the current transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum StoreError {
    /// Backing storage could not be reached or refused the write
    #[error("Storage unavailable: {message}")]
    Unavailable {
        /// Description of the underlying failure
        message: String,
    },

    /// Stored bytes could not be decoded into a record
    #[error("Stored record is corrupt: {message}")]
    Corrupt {
        /// Description of the decoding failure
        message: String,
    },

    /// Key rejected by the backend
    #[error("Invalid storage key: {reason}")]
    InvalidKey {
        /// Why the key was rejected
        reason: String,
    },

    /// Attempt to persist a lifecycle state behind the durable one
    #[error("Lifecycle regression refused: {message}")]
    Regression {
        /// Stored and requested states
        message: String,
    },
}

impl StoreError {
    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Create a corrupt-record error
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt {
            message: message.into(),
        }
    }

    /// Create an invalid key error
    pub fn invalid_key(reason: impl Into<String>) -> Self {
        Self::InvalidKey {
            reason: reason.into(),
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        Self::unavailable(err.to_string())
    }
}

/// Device-policy collaborator failure. Retryable; never touches the record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum PolicyError {
    /// Device-admin capability was revoked
    #[error("Device admin capability missing: {message}")]
    Unauthorized {
        /// Platform-provided detail
        message: String,
    },

    /// Device-policy service could not be reached
    #[error("Device policy service unavailable: {message}")]
    Unavailable {
        /// Platform-provided detail
        message: String,
    },
}

impl PolicyError {
    /// Create an unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}

/// Foreground-launch collaborator failure. Logged only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum LaunchError {
    /// Platform refused to start the lock UI
    #[error("Activity start rejected: {reason}")]
    ActivityStartRejected {
        /// Platform-provided detail
        reason: String,
    },
}

impl LaunchError {
    /// Create a rejected-start error
    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::ActivityStartRejected {
            reason: reason.into(),
        }
    }
}

/// Notification collaborator failure. Always swallowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum NotificationError {
    /// No notification surface available
    #[error("Notification surface unavailable: {message}")]
    Unavailable {
        /// Platform-provided detail
        message: String,
    },
}

/// Agent configuration could not be loaded or is invalid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum ConfigError {
    /// A field failed validation
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Which field and why
        message: String,
    },

    /// Configuration file could not be read
    #[error("Failed to read configuration: {message}")]
    Io {
        /// Underlying I/O failure
        message: String,
    },

    /// Configuration file is not valid TOML for this schema
    #[error("Failed to parse configuration: {message}")]
    Parse {
        /// Parser detail
        message: String,
    },
}

impl ConfigError {
    /// Create a validation error
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Error surfaced to the platform by the enrollment handshake.
///
/// Only failures that the platform should react to (by redelivering the
/// event) appear here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum EnrollmentError {
    /// Durable state could not be read or written
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Agent was wired with an unusable configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
}
