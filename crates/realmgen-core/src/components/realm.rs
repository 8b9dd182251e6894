//! Realm-level components: identity, lifecycle, membership.

use chrono::{DateTime, Utc};
use realmgen_logic::params::RealmParams;
use serde::{Deserialize, Serialize};

/// Storage identifier of a realm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RealmId(pub u64);

impl std::fmt::Display for RealmId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "realm#{}", self.0)
    }
}

/// Realm component - the aggregate root, one per realm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealmRecord {
    pub id: RealmId,
    pub name: String,
    pub node_count: u32,
    pub quantum_station_seed_rate: u8,
    pub no_dead_nodes: bool,
    pub require_connected: bool,
    pub seed: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub active: bool,
}

impl RealmRecord {
    pub fn new(id: RealmId, params: &RealmParams) -> Self {
        Self {
            id,
            name: params.name.clone(),
            node_count: params.node_count,
            quantum_station_seed_rate: params.quantum_station_seed_rate,
            no_dead_nodes: params.no_dead_nodes,
            require_connected: params.require_connected,
            seed: params.seed,
            created_at: Utc::now(),
            active: true,
        }
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// The parameters this realm was generated from.
    pub fn params(&self) -> RealmParams {
        RealmParams {
            name: self.name.clone(),
            node_count: self.node_count,
            quantum_station_seed_rate: self.quantum_station_seed_rate,
            no_dead_nodes: self.no_dead_nodes,
            require_connected: self.require_connected,
            seed: self.seed,
        }
    }
}

/// Tags every entity owned by a realm; deletion cascades through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmMember(pub RealmId);
