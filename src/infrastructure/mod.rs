//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all network and remote I/O.
//!
//! ## Structure
//!
//! - `deployers/` - Deployer implementations (file, FTP, SSH, in-memory)
//! - `transform/` - ContentTransformer implementations (minifier)

pub mod deployers;
pub mod transform;

// Re-export for convenience
pub use deployers::{
    transport_for, FileDeployer, FtpDeployer, RecordingDeployer, SshDeployer,
};
pub use transform::Minifier;
