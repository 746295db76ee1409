//! Domain Layer
//!
//! The comparison engine and the vocabulary it speaks. Nothing in here knows
//! about FTP, SSH, configuration files or the terminal.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
