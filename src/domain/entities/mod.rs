//! Domain Entities

mod command;

pub use command::{CommandKind, DeployCommand};
