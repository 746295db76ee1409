//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain comparison rules (those are in Domain)
//! - Is handed its deployers and transformer by the caller
//!
//! ## Use Cases
//!
//! - `PushUseCase` - Send changes to the transport and mirror them into the record
//! - `PreviewUseCase` - List the changes a push would send
//! - `InitUseCase` - Write a config template or reset the record directory

pub mod counts;
pub mod init;
pub mod preview;
pub mod push;

pub use counts::CommandCounts;
pub use init::{InitOutcome, InitUseCase};
pub use preview::{PlannedChange, PreviewReport, PreviewUseCase};
pub use push::{PushReport, PushUseCase};
