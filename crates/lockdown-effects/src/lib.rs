//! # Lockdown Effects
//!
//! Production handlers for the effect traits in `lockdown-core`. Mock
//! handlers live in `lockdown-testkit`.

#![forbid(unsafe_code)]

pub mod logging;
pub mod notification;
pub mod persistence;

pub use logging::{init_logging, init_logging_from};
pub use notification::TracingNotificationHandler;
pub use persistence::FilesystemPersistenceHandler;
