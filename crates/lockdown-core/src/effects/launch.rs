//! Foreground-launch effect interface

use crate::errors::LaunchError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Identifier of a UI surface the platform can bring to the foreground
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UiTarget(String);

impl UiTarget {
    /// Wrap a platform UI identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UiTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Platform window/task manager.
///
/// Each call is a request; the platform may coalesce duplicates.
#[async_trait]
pub trait LaunchEffects: Send + Sync {
    /// Start `target` as the root of a task, in a fresh task when `new_task`
    async fn start_task_root(&self, target: &UiTarget, new_task: bool) -> Result<(), LaunchError>;
}

#[async_trait]
impl<T: LaunchEffects + ?Sized> LaunchEffects for Arc<T> {
    async fn start_task_root(&self, target: &UiTarget, new_task: bool) -> Result<(), LaunchError> {
        (**self).start_task_root(target, new_task).await
    }
}
