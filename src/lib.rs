//! sitepush - one-way mirroring of a static site build onto a web host
//!
//! sitepush compares a freshly built site directory against a local record
//! of what was last deployed and sends only the difference to the host, over
//! FTP, SSH or a plain filesystem copy. Text assets can be minified on the way.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

// Re-exports for convenience
pub use config::Config;
pub use domain::entities::{CommandKind, DeployCommand};
pub use domain::services::{deploy_changes, DiffSummary};
pub use domain::value_objects::SyncSettings;
pub use error::{DeployError, DeployResult};
