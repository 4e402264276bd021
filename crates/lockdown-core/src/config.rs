//! Agent configuration
//!
//! Loaded from TOML. Only `self_package` is required; everything else has a
//! default derived from it.

use crate::effects::UiTarget;
use crate::errors::ConfigError;
use crate::policy::{AdminComponent, PolicyConfiguration};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Receiver class used when the configuration does not name one
pub const DEFAULT_ADMIN_RECEIVER: &str = ".DeviceAdminReceiver";
/// Lock UI activity used when the configuration does not name one
pub const DEFAULT_LOCK_ACTIVITY: &str = ".LockActivity";
/// Confirmation shown when device-admin is granted
pub const DEFAULT_ACTIVATION_MESSAGE: &str = "Emi.locker Protection Active";
/// Namespace key of the persisted enrollment record
pub const DEFAULT_STORAGE_NAMESPACE: &str = "emilocker.enrollment";

fn default_activation_message() -> String {
    DEFAULT_ACTIVATION_MESSAGE.to_string()
}

fn default_storage_namespace() -> String {
    DEFAULT_STORAGE_NAMESPACE.to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

/// Static wiring of the lockdown agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// The agent's own package identifier
    pub self_package: String,
    /// Admin receiver the policy calls are scoped to
    #[serde(default)]
    pub admin_component: Option<AdminComponent>,
    /// Restricted-mode UI to foreground
    #[serde(default)]
    pub lock_ui_target: Option<UiTarget>,
    /// Text of the activation confirmation
    #[serde(default = "default_activation_message")]
    pub activation_message: String,
    /// Key under which the enrollment record is stored
    #[serde(default = "default_storage_namespace")]
    pub storage_namespace: String,
    /// Default tracing filter when the environment sets none
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl AgentConfig {
    /// Configuration with every optional field defaulted
    pub fn new(self_package: impl Into<String>) -> Self {
        Self {
            self_package: self_package.into(),
            admin_component: None,
            lock_ui_target: None,
            activation_message: default_activation_message(),
            storage_namespace: default_storage_namespace(),
            log_filter: default_log_filter(),
        }
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            message: format!("{}: {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// Reject configurations the agent cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.self_package.trim().is_empty() {
            return Err(ConfigError::invalid("self_package must not be empty"));
        }
        if let Some(component) = &self.admin_component {
            if component.package.trim().is_empty() || component.class.trim().is_empty() {
                return Err(ConfigError::invalid(
                    "admin_component needs both package and class",
                ));
            }
        }
        if let Some(target) = &self.lock_ui_target {
            if target.as_str().trim().is_empty() {
                return Err(ConfigError::invalid("lock_ui_target must not be empty"));
            }
        }
        if self.storage_namespace.trim().is_empty() {
            return Err(ConfigError::invalid("storage_namespace must not be empty"));
        }
        Ok(())
    }

    /// Admin component, defaulting to the agent's own receiver
    pub fn admin_component(&self) -> AdminComponent {
        self.admin_component
            .clone()
            .unwrap_or_else(|| AdminComponent::new(&self.self_package, DEFAULT_ADMIN_RECEIVER))
    }

    /// Lock UI target, defaulting to the agent's own lock activity
    pub fn lock_ui_target(&self) -> UiTarget {
        self.lock_ui_target.clone().unwrap_or_else(|| {
            UiTarget::new(format!("{}/{}", self.self_package, DEFAULT_LOCK_ACTIVITY))
        })
    }

    /// The fixed lockdown policy for this agent
    pub fn policy_configuration(&self) -> PolicyConfiguration {
        PolicyConfiguration::lockdown(&self.self_package)
    }
}
