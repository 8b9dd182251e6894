//! Component definitions for realm storage.
//!
//! Components are pure data structs attached to entities.
//! They have no behavior - that lives in the registry.

mod realm;
mod system;

pub use realm::*;
pub use system::*;
