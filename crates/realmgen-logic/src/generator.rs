//! Realm generation pipeline.
//!
//! `RealmGenerator` owns its random source and lookup tables and turns a
//! [`RealmParams`] into a finished [`RealmGraph`]:
//!
//! 1. validate parameters (nothing is built if this fails)
//! 2. place nodes on the jittered grid and name them
//! 3. wire tunnels: hub, local, dead-node repair, optional component links
//! 4. seed quantum stations
//! 5. seed planets and the hub starbase
//!
//! With a seeded source the whole pipeline is a pure function of
//! `(params, seed)`.
//!
//! ```
//! use realmgen_logic::generator::RealmGenerator;
//! use realmgen_logic::params::RealmParams;
//!
//! let params = RealmParams::new("Pegasus", 25).with_seed_rate(20);
//! let realm = RealmGenerator::from_seed(7).generate(&params).unwrap();
//! assert_eq!(realm.node_count(), 25);
//! assert!(realm.hub().is_some_and(|hub| hub.starbase.is_some()));
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::attributes::seed_quantum_stations;
use crate::error::{GenerationError, Result};
use crate::graph::{RealmGraph, StarNode};
use crate::names::generate_star_name;
use crate::params::{validate_params, RealmParams};
use crate::placement::place_nodes;
use crate::spatial::SpatialGrid;
use crate::systems::{seed_systems, SeedReport};
use crate::tables::GenerationTables;
use crate::topology::{link_components, repair_dead_nodes, wire_hub, wire_local, TunnelSet};

/// Per-phase counters from the last generation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    pub hub_links: usize,
    pub local_links: usize,
    pub repaired_nodes: usize,
    pub component_links: usize,
    pub stations_seeded: usize,
    pub systems: SeedReport,
}

/// Realm generator bound to one random source.
pub struct RealmGenerator<R: Rng> {
    rng: R,
    tables: GenerationTables,
    last_stats: GenerationStats,
}

impl RealmGenerator<StdRng> {
    /// Deterministic generator: same seed and params give the same realm.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }

    /// Seeded from `params.seed` when present, otherwise from entropy.
    pub fn for_params(params: &RealmParams) -> Self {
        match params.seed {
            Some(seed) => Self::from_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl<R: Rng> RealmGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self::with_tables(rng, GenerationTables::embedded())
    }

    pub fn with_tables(rng: R, tables: GenerationTables) -> Self {
        Self {
            rng,
            tables,
            last_stats: GenerationStats::default(),
        }
    }

    pub fn tables(&self) -> &GenerationTables {
        &self.tables
    }

    /// Counters from the most recent successful [`generate`](Self::generate).
    pub fn last_stats(&self) -> GenerationStats {
        self.last_stats
    }

    /// Build a complete realm.
    pub fn generate(&mut self, params: &RealmParams) -> Result<RealmGraph> {
        let errors = validate_params(params);
        if !errors.is_empty() {
            return Err(GenerationError::InvalidParams(errors));
        }

        let mut stats = GenerationStats::default();
        let n = params.node_count;

        let coords = place_nodes(n, &mut self.rng);
        let mut nodes: Vec<StarNode> = coords
            .iter()
            .enumerate()
            .map(|(k, &coord)| {
                let mut node = StarNode::new(k as u32 + 1, coord);
                node.star_name = generate_star_name(self.tables.star_names(), &mut self.rng);
                node
            })
            .collect();

        let grid = SpatialGrid::new(&coords);
        let mut set = TunnelSet::new(n);

        wire_hub(&mut set, &mut self.rng)?;
        stats.hub_links = set.connection_count();

        wire_local(&mut set, &grid, &mut self.rng)?;
        stats.local_links = set.connection_count() - stats.hub_links;

        if params.no_dead_nodes {
            stats.repaired_nodes = repair_dead_nodes(&mut set, &grid)?;
        }
        if params.require_connected {
            stats.component_links = link_components(&mut set, &grid)?;
        }

        stats.stations_seeded = seed_quantum_stations(
            &mut nodes,
            params.quantum_station_seed_rate,
            &mut self.rng,
        );
        stats.systems = seed_systems(&mut nodes, self.tables.planets());

        self.last_stats = stats;
        Ok(RealmGraph {
            params: params.clone(),
            nodes,
            tunnels: set.into_tunnels(),
        })
    }
}

/// Generate a realm with a generator chosen by [`RealmGenerator::for_params`].
pub fn generate_realm(params: &RealmParams) -> Result<RealmGraph> {
    RealmGenerator::for_params(params).generate(params)
}
