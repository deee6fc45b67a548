//! Tanda segmentation core.
//!
//! Turns a snapshot of the player's queue into the tanda that is playing now
//! and the one that follows. Nothing in here touches the terminal or the
//! player; the runtime feeds it data and decides what to do with the result.

mod change;
mod error;
mod model;
mod queue;
mod segment;

pub use change::has_changed;
pub use error::{InconsistentFieldCount, UndefinedCurrentTanda};
pub use model::*;
pub use queue::normalize;
pub use segment::segment;
