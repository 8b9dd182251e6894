//! Star system components: nodes, planets, starbases, tunnels.

use realmgen_logic::graph::{Coord, PlanetSize};
use serde::{Deserialize, Serialize};

/// StarSystem component - one node of a realm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    /// 1-based sequence number within the realm
    pub sequence: u32,
    pub x: i32,
    pub y: i32,
    pub quantum_station: bool,
    pub star_name: String,
    /// Cached count of PlanetRecords owned by this system
    pub planet_count: u32,
}

impl StarSystem {
    pub fn coord(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

/// PlanetRecord component - belongs to exactly one star system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanetRecord {
    pub system_sequence: u32,
    /// 1-based index within the system (1-9)
    pub index: u8,
    pub name: String,
    pub size: PlanetSize,
    pub owner: Option<u64>,
}

/// StarbaseRecord component - at most one per star system
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarbaseRecord {
    pub system_sequence: u32,
    pub defense_level: u8,
}

/// TunnelRecord component - one directed hypertunnel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TunnelRecord {
    pub from: u32,
    pub to: u32,
    pub cost: u32,
}
