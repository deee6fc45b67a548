//! Configuration loader and schema types.
//!
//! This module exposes the settings that drive polling, the player source,
//! the output mode and logging, plus helpers to load them from disk.

mod load;
mod schema;

pub use load::*;
pub use schema::*;
