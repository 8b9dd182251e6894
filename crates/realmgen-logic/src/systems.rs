//! Solar system and starbase seeding.
//!
//! Every node without planets gets the fixed nine-body system from the
//! planet table. The hub additionally gets a starbase, which forces its
//! quantum-station flag on regardless of the station draw. Both steps check
//! what already exists first, so running them twice changes nothing.

use crate::constants::seeding::STARBASE_DEFENSE;
use crate::graph::{Planet, Starbase, StarNode};
use crate::tables::PlanetSpec;

/// What a seeding pass created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub systems_seeded: usize,
    pub planets_created: usize,
    pub starbases_created: usize,
}

/// Build the planet list for one system from the table.
pub fn build_planets(table: &[PlanetSpec]) -> Vec<Planet> {
    table
        .iter()
        .enumerate()
        .map(|(i, spec)| Planet {
            index: i as u8 + 1,
            name: spec.name.clone(),
            size: spec.size,
            owner: None,
        })
        .collect()
}

/// Populate a single node. Returns `(planets_created, starbase_created)`.
pub fn seed_system(node: &mut StarNode, table: &[PlanetSpec]) -> (usize, bool) {
    let mut planets_created = 0;
    if node.planets.is_empty() {
        node.planets = build_planets(table);
        planets_created = node.planets.len();
    }
    node.planet_count = node.planets.len() as u32;

    let mut starbase_created = false;
    if node.is_hub() && node.starbase.is_none() {
        node.starbase = Some(Starbase {
            defense_level: STARBASE_DEFENSE,
        });
        node.quantum_station = true;
        starbase_created = true;
    }
    (planets_created, starbase_created)
}

/// Populate every node in a realm.
pub fn seed_systems(nodes: &mut [StarNode], table: &[PlanetSpec]) -> SeedReport {
    let mut report = SeedReport::default();
    for node in nodes.iter_mut() {
        let (planets, starbase) = seed_system(node, table);
        if planets > 0 {
            report.systems_seeded += 1;
            report.planets_created += planets;
        }
        if starbase {
            report.starbases_created += 1;
        }
    }
    report
}
