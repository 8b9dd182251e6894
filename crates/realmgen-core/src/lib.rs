//! Realmgen Core - realm storage
//!
//! Stores generated realms as entities in an ECS world via `hecs`:
//! - **Entities**: one realm record per realm, plus its star systems,
//!   planets, starbases and tunnels
//! - **Components**: pure data tagged with the owning [`RealmMember`](components::RealmMember)
//! - **Registry**: creates, reads back, updates and deletes whole realms
//!
//! Generation itself lives in `realmgen-logic`; this crate only commits its
//! output atomically and snapshots it with bincode.
//!
//! # Example
//!
//! ```rust
//! use realmgen_core::prelude::*;
//! use realmgen_logic::params::RealmParams;
//!
//! let mut registry = RealmRegistry::new();
//! let id = registry
//!     .create_realm(&RealmParams::new("Andromeda", 50).with_seed(9))
//!     .unwrap();
//!
//! let graph = registry.realm_graph(id).unwrap();
//! assert_eq!(graph.node_count(), 50);
//!
//! registry.delete_realm(id).unwrap();
//! assert_eq!(registry.realm_count(), 0);
//! ```

pub mod components;
pub mod error;
pub mod persistence;
pub mod registry;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::error::RegistryError;
    pub use crate::registry::RealmRegistry;
}
