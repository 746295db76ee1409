//! Common test utilities for sitepush CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated project directory with a built site and record dir
//! - Fixtures: Reusable site content and configuration snippets

pub mod env;
pub mod fixtures;

#[allow(unused_imports)]
pub use env::*;
#[allow(unused_imports)]
pub use fixtures::*;
