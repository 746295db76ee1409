//! Domain Ports
//!
//! Traits implemented by the infrastructure layer.

pub mod deployer;
pub mod transformer;

pub use deployer::{Deployer, DeployerError};
pub use transformer::{ContentTransformer, Identity, TransformError};
