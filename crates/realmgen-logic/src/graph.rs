//! The realm graph: the single immutable value the generator emits.
//!
//! Nodes are addressed by their 1-based sequence number. Storage
//! identifiers are assigned later by whoever persists the graph.

use serde::{Deserialize, Serialize};

use crate::constants::HUB_SEQUENCE;
use crate::params::RealmParams;

/// Integer position of a star system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance. Ranking by this is the same as ranking
    /// by true distance and stays exact.
    pub fn distance_squared(&self, other: &Coord) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    pub fn distance(&self, other: &Coord) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

/// Planet size class, fixed per planet index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanetSize {
    Tiny,
    Average,
    Huge,
}

/// One of the nine bodies of a star system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    /// 1-based index within the system (1–9).
    pub index: u8,
    pub name: String,
    pub size: PlanetSize,
    /// Owning player; always unset at generation time.
    pub owner: Option<u64>,
}

/// Trade/defense structure attached to a star system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Starbase {
    pub defense_level: u8,
}

/// One star system is a vertex of the realm graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarNode {
    /// 1-based sequence number, unique within the realm.
    pub sequence: u32,
    pub coord: Coord,
    pub quantum_station: bool,
    pub star_name: String,
    /// Cached planet count; always equals `planets.len()` once seeded.
    pub planet_count: u32,
    pub planets: Vec<Planet>,
    pub starbase: Option<Starbase>,
}

impl StarNode {
    pub fn new(sequence: u32, coord: Coord) -> Self {
        Self {
            sequence,
            coord,
            quantum_station: false,
            star_name: String::new(),
            planet_count: 0,
            planets: Vec::new(),
            starbase: None,
        }
    }

    pub fn is_hub(&self) -> bool {
        self.sequence == HUB_SEQUENCE
    }
}

/// A directed hypertunnel. Always emitted alongside its reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tunnel {
    pub from: u32,
    pub to: u32,
    pub cost: u32,
}

/// Fully generated realm: nodes ordered by sequence plus the tunnel list.
///
/// The realm name lives in `params`; see [`RealmGraph::name`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealmGraph {
    pub params: RealmParams,
    pub nodes: Vec<StarNode>,
    pub tunnels: Vec<Tunnel>,
}

impl RealmGraph {
    pub fn name(&self) -> &str {
        &self.params.name
    }

    /// Look up a node by sequence number.
    pub fn node(&self, sequence: u32) -> Option<&StarNode> {
        // nodes are stored in sequence order, but don't rely on it for callers
        // that built a graph by hand
        match self.nodes.get(sequence.wrapping_sub(1) as usize) {
            Some(n) if n.sequence == sequence => Some(n),
            _ => self.nodes.iter().find(|n| n.sequence == sequence),
        }
    }

    pub fn hub(&self) -> Option<&StarNode> {
        self.node(HUB_SEQUENCE)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of distinct nodes `sequence` is wired to.
    ///
    /// Tunnels come in reciprocal pairs, so this is half of
    /// [`tunnel_incidence`](Self::tunnel_incidence).
    pub fn degree(&self, sequence: u32) -> usize {
        self.tunnels.iter().filter(|t| t.from == sequence).count()
    }

    /// Number of tunnels in which `sequence` is source or destination.
    pub fn tunnel_incidence(&self, sequence: u32) -> usize {
        self.tunnels
            .iter()
            .filter(|t| t.from == sequence || t.to == sequence)
            .count()
    }

    /// Nodes reachable over one tunnel from `sequence`, ascending.
    pub fn neighbors(&self, sequence: u32) -> Vec<u32> {
        let mut out: Vec<u32> = self
            .tunnels
            .iter()
            .filter(|t| t.from == sequence)
            .map(|t| t.to)
            .collect();
        out.sort_unstable();
        out
    }

    /// Undirected connections as `(low, high)` pairs, each listed once.
    pub fn tunnel_pairs(&self) -> Vec<(u32, u32)> {
        let mut pairs: Vec<(u32, u32)> = self
            .tunnels
            .iter()
            .filter(|t| t.from < t.to)
            .map(|t| (t.from, t.to))
            .collect();
        pairs.sort_unstable();
        pairs
    }

    pub fn station_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.quantum_station).count()
    }

    pub fn starbase_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.starbase.is_some()).count()
    }

    pub fn planet_total(&self) -> usize {
        self.nodes.iter().map(|n| n.planets.len()).sum()
    }
}
