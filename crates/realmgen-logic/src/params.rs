//! Realm creation parameters and their validation.
//!
//! The request layer fills in a [`RealmParams`] and hands it to the
//! generator. Validation runs before any generation work so an invalid
//! request never produces partial state.
//!
//! ```
//! use realmgen_logic::params::{validate_params, RealmParams};
//!
//! let mut params = RealmParams::default();
//! params.name = "Andromeda".to_string();
//! params.node_count = 40;
//! assert!(validate_params(&params).is_empty());
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::limits;

/// Caller-supplied realm configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmParams {
    /// Display name, unique across realms.
    pub name: String,
    /// Number of star systems to create (minimum 10).
    pub node_count: u32,
    /// Chance in percent (0–100) that a node gets a quantum station.
    pub quantum_station_seed_rate: u8,
    /// Guarantee every node at least one tunnel.
    pub no_dead_nodes: bool,
    /// Join every component to the hub so the realm is a single component.
    #[serde(default)]
    pub require_connected: bool,
    /// Random seed for generation (None = random).
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RealmParams {
    fn default() -> Self {
        Self {
            name: "New Realm".to_string(),
            node_count: 100,
            quantum_station_seed_rate: 10,
            no_dead_nodes: true,
            require_connected: false,
            seed: None,
        }
    }
}

impl RealmParams {
    pub fn new(name: impl Into<String>, node_count: u32) -> Self {
        Self {
            name: name.into(),
            node_count,
            ..Default::default()
        }
    }

    pub fn with_seed_rate(mut self, rate: u8) -> Self {
        self.quantum_station_seed_rate = rate;
        self
    }

    pub fn with_no_dead_nodes(mut self, no_dead_nodes: bool) -> Self {
        self.no_dead_nodes = no_dead_nodes;
        self
    }

    pub fn with_require_connected(mut self, require_connected: bool) -> Self {
        self.require_connected = require_connected;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Parameter validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamError {
    /// Fewer nodes than the hub wiring needs.
    NodeCountTooSmall(u32),
    /// More nodes than a single generation run is allowed to build.
    NodeCountTooLarge(u32),
    /// Seed rate is a percentage.
    SeedRateOutOfRange(u8),
    /// Realm name empty or whitespace.
    EmptyName,
}

impl std::fmt::Display for ParamError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamError::NodeCountTooSmall(n) => write!(
                f,
                "node count {} is below the minimum of {}",
                n,
                limits::MIN_NODE_COUNT
            ),
            ParamError::NodeCountTooLarge(n) => write!(
                f,
                "node count {} exceeds the maximum of {}",
                n,
                limits::MAX_NODE_COUNT
            ),
            ParamError::SeedRateOutOfRange(r) => {
                write!(f, "quantum station seed rate {}% is outside 0–100", r)
            }
            ParamError::EmptyName => write!(f, "realm name is empty"),
        }
    }
}

/// Validate realm parameters, returning all errors found.
pub fn validate_params(params: &RealmParams) -> Vec<ParamError> {
    let mut errors = Vec::new();

    if params.node_count < limits::MIN_NODE_COUNT {
        errors.push(ParamError::NodeCountTooSmall(params.node_count));
    }
    if params.node_count > limits::MAX_NODE_COUNT {
        errors.push(ParamError::NodeCountTooLarge(params.node_count));
    }
    if params.quantum_station_seed_rate > limits::MAX_SEED_RATE {
        errors.push(ParamError::SeedRateOutOfRange(
            params.quantum_station_seed_rate,
        ));
    }
    if params.name.trim().is_empty() {
        errors.push(ParamError::EmptyName);
    }

    errors
}
