//! Configuration module for filepick
//!
//! This module handles user preferences for the demo host and the picker
//! layout, including serialization to JSON and persistent storage in
//! platform-specific directories.

mod persistence;
mod settings;

pub use persistence::*;
pub use settings::*;
