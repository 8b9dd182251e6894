//! Hypertunnel wiring.
//!
//! Builds the symmetric tunnel set in up to four ordered phases:
//!
//! 1. [`wire_hub`]: hub to nodes 2..=9, to the last node, and to one
//!    random middle node, so the hub is reachable from early and late
//!    numbered nodes regardless of where it was placed.
//! 2. [`wire_local`]: every non-hub node connects to its nearest
//!    unconnected neighbours until it reaches a random degree in 2..=4.
//! 3. [`repair_dead_nodes`]: isolated nodes attach to the nearest node
//!    that already has a tunnel ("no dead nodes" mode only).
//! 4. [`link_components`]: optional; joins every component to the hub's
//!    component so the realm is one connected graph.
//!
//! Degree here is the number of distinct nodes a node is wired to.

use std::collections::{BTreeMap, HashSet};

use rand::Rng;

use crate::constants::wiring::{
    CANDIDATE_POOL, HUB_DIRECT_SPAN, MAX_LOCAL_DEGREE, MIN_LOCAL_DEGREE, TUNNEL_COST,
};
use crate::constants::HUB_SEQUENCE;
use crate::error::InvariantViolation;
use crate::graph::Tunnel;
use crate::spatial::SpatialGrid;

/// Ordered-pair tunnel set with adjacency, built once per realm.
#[derive(Debug, Clone, Default)]
pub struct TunnelSet {
    node_count: u32,
    pairs: HashSet<(u32, u32)>,
    adjacency: Vec<Vec<u32>>,
    tunnels: Vec<Tunnel>,
}

impl TunnelSet {
    pub fn new(node_count: u32) -> Self {
        Self {
            node_count,
            pairs: HashSet::new(),
            adjacency: vec![Vec::new(); node_count as usize],
            tunnels: Vec::new(),
        }
    }

    pub fn node_count(&self) -> u32 {
        self.node_count
    }

    /// True if the ordered tunnel `from → to` exists.
    pub fn contains(&self, from: u32, to: u32) -> bool {
        self.pairs.contains(&(from, to))
    }

    /// True if a tunnel exists in either direction.
    pub fn is_connected(&self, a: u32, b: u32) -> bool {
        self.contains(a, b) || self.contains(b, a)
    }

    pub fn degree(&self, sequence: u32) -> usize {
        self.neighbors(sequence).len()
    }

    pub fn neighbors(&self, sequence: u32) -> &[u32] {
        sequence
            .checked_sub(1)
            .and_then(|i| self.adjacency.get(i as usize))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Number of undirected connections (half the tunnel count).
    pub fn connection_count(&self) -> usize {
        self.tunnels.len() / 2
    }

    pub fn tunnels(&self) -> &[Tunnel] {
        &self.tunnels
    }

    pub fn into_tunnels(self) -> Vec<Tunnel> {
        self.tunnels
    }

    /// Add the reciprocal pair `a ↔ b`.
    ///
    /// Returns `Ok(false)` without touching the set if either direction
    /// already exists.
    pub fn connect(&mut self, a: u32, b: u32) -> Result<bool, InvariantViolation> {
        self.check_node(a)?;
        self.check_node(b)?;
        if a == b {
            return Err(InvariantViolation::SelfLoop(a));
        }
        if self.is_connected(a, b) {
            return Ok(false);
        }

        for (from, to) in [(a, b), (b, a)] {
            if !self.pairs.insert((from, to)) {
                return Err(InvariantViolation::DuplicateTunnel { from, to });
            }
            self.tunnels.push(Tunnel {
                from,
                to,
                cost: TUNNEL_COST,
            });
        }
        self.adjacency[a as usize - 1].push(b);
        self.adjacency[b as usize - 1].push(a);
        Ok(true)
    }

    fn check_node(&self, sequence: u32) -> Result<(), InvariantViolation> {
        if sequence == 0 || sequence > self.node_count {
            return Err(InvariantViolation::UnknownNode(sequence));
        }
        Ok(())
    }
}

/// Phase A: privileged hub wiring.
pub fn wire_hub(set: &mut TunnelSet, rng: &mut impl Rng) -> Result<(), InvariantViolation> {
    let n = set.node_count();
    if n < HUB_SEQUENCE {
        return Err(InvariantViolation::MissingHub);
    }

    for seq in 2..=n.min(HUB_DIRECT_SPAN) {
        set.connect(HUB_SEQUENCE, seq)?;
    }

    if n > HUB_DIRECT_SPAN {
        set.connect(HUB_SEQUENCE, n)?;

        // middle nodes: above the direct span, below the last node
        let first_middle = HUB_DIRECT_SPAN + 1;
        if first_middle < n {
            let pick = rng.gen_range(first_middle..n);
            set.connect(HUB_SEQUENCE, pick)?;
        }
    }
    Ok(())
}

/// Phase B: nearest-neighbour wiring for every non-hub node.
pub fn wire_local(
    set: &mut TunnelSet,
    grid: &SpatialGrid,
    rng: &mut impl Rng,
) -> Result<(), InvariantViolation> {
    if set.node_count() < HUB_SEQUENCE {
        return Err(InvariantViolation::MissingHub);
    }

    for seq in (HUB_SEQUENCE + 1)..=set.node_count() {
        let target = rng.gen_range(MIN_LOCAL_DEGREE..=MAX_LOCAL_DEGREE);
        while set.degree(seq) < target {
            let candidates = grid.nearest(seq, CANDIDATE_POOL, |other| {
                !set.is_connected(seq, other)
            });
            let Some(&closest) = candidates.first() else {
                break;
            };
            set.connect(seq, closest)?;
        }
    }
    Ok(())
}

/// Phase C: give every isolated node one tunnel to its nearest wired node.
///
/// Returns the number of nodes repaired. Only the no-isolated-node
/// guarantee is made; the result may still have several components.
pub fn repair_dead_nodes(
    set: &mut TunnelSet,
    grid: &SpatialGrid,
) -> Result<usize, InvariantViolation> {
    if set.node_count() < HUB_SEQUENCE {
        return Err(InvariantViolation::MissingHub);
    }

    let mut repaired = 0;
    for seq in 1..=set.node_count() {
        if set.degree(seq) > 0 {
            continue;
        }
        let nearest = grid.nearest(seq, 1, |other| set.degree(other) > 0);
        if let Some(&target) = nearest.first() {
            set.connect(seq, target)?;
            repaired += 1;
        }
    }
    Ok(repaired)
}

/// Phase D: join every component to the hub's component.
///
/// Each outlying component, taken in order of its lowest sequence number,
/// is linked by the closest pair between it and the hub component.
/// Returns the number of links added.
pub fn link_components(
    set: &mut TunnelSet,
    grid: &SpatialGrid,
) -> Result<usize, InvariantViolation> {
    if set.node_count() < HUB_SEQUENCE {
        return Err(InvariantViolation::MissingHub);
    }

    let mut forest = DisjointSet::from_tunnels(set);
    let mut members: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
    for seq in 1..=set.node_count() {
        members.entry(forest.find(seq)).or_default().push(seq);
    }

    let mut outlying: Vec<Vec<u32>> = members
        .into_values()
        .filter(|m| !m.contains(&HUB_SEQUENCE))
        .collect();
    outlying.sort_by_key(|m| m[0]);

    let mut links = 0;
    for component in outlying {
        let hub_root = forest.root(HUB_SEQUENCE);
        let mut best: Option<(i64, u32, u32)> = None;
        for &seq in &component {
            let found = grid.nearest(seq, 1, |other| forest.root(other) == hub_root);
            let (Some(&target), Some(at)) = (found.first(), grid.coord(seq)) else {
                continue;
            };
            let Some(to) = grid.coord(target) else {
                continue;
            };
            let candidate = (at.distance_squared(&to), seq, target);
            if best.map_or(true, |b| candidate < b) {
                best = Some(candidate);
            }
        }
        if let Some((_, a, b)) = best {
            set.connect(a, b)?;
            forest.union(a, b);
            links += 1;
        }
    }
    Ok(links)
}

/// Union-find over sequence numbers.
struct DisjointSet {
    parent: Vec<u32>,
}

impl DisjointSet {
    fn from_tunnels(set: &TunnelSet) -> Self {
        let mut forest = Self {
            parent: (0..=set.node_count()).collect(),
        };
        for t in set.tunnels() {
            forest.union(t.from, t.to);
        }
        forest
    }

    /// Root lookup without path compression, usable through `&self`.
    fn root(&self, mut seq: u32) -> u32 {
        while self.parent[seq as usize] != seq {
            seq = self.parent[seq as usize];
        }
        seq
    }

    fn find(&mut self, seq: u32) -> u32 {
        let root = self.root(seq);
        let mut cur = seq;
        while self.parent[cur as usize] != root {
            let next = self.parent[cur as usize];
            self.parent[cur as usize] = root;
            cur = next;
        }
        root
    }

    fn union(&mut self, a: u32, b: u32) {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra != rb {
            // lower root wins so component ids stay stable
            let (keep, absorb) = if ra < rb { (ra, rb) } else { (rb, ra) };
            self.parent[absorb as usize] = keep;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Coord;
    use crate::placement::place_nodes;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn line(n: u32, spacing: i32) -> Vec<Coord> {
        (0..n as i32).map(|i| Coord::new(i * spacing, 0)).collect()
    }

    #[test]
    fn connect_is_reciprocal_and_deduplicated() {
        let mut set = TunnelSet::new(3);
        assert_eq!(set.connect(1, 2), Ok(true));
        assert_eq!(set.connect(2, 1), Ok(false));
        assert!(set.contains(1, 2) && set.contains(2, 1));
        assert_eq!(set.tunnels().len(), 2);
        assert_eq!(set.degree(1), 1);
        assert_eq!(set.degree(3), 0);
    }

    #[test]
    fn connect_rejects_bad_nodes() {
        let mut set = TunnelSet::new(3);
        assert_eq!(set.connect(2, 2), Err(InvariantViolation::SelfLoop(2)));
        assert_eq!(set.connect(1, 4), Err(InvariantViolation::UnknownNode(4)));
        assert_eq!(set.connect(0, 1), Err(InvariantViolation::UnknownNode(0)));
    }

    #[test]
    fn hub_wiring_with_ten_nodes() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut set = TunnelSet::new(10);
        wire_hub(&mut set, &mut rng).unwrap();
        // 2..=9 plus the last node; no middle range exists
        assert_eq!(set.degree(HUB_SEQUENCE), 9);
        for seq in 2..=10 {
            assert!(set.is_connected(HUB_SEQUENCE, seq));
        }
    }

    #[test]
    fn hub_wiring_picks_one_middle_node() {
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut set = TunnelSet::new(50);
            wire_hub(&mut set, &mut rng).unwrap();
            assert_eq!(set.degree(HUB_SEQUENCE), 10);
            assert!(set.is_connected(HUB_SEQUENCE, 50));
            let middle: Vec<u32> = set
                .neighbors(HUB_SEQUENCE)
                .iter()
                .copied()
                .filter(|s| (10..50).contains(s))
                .collect();
            assert_eq!(middle.len(), 1, "seed {seed}: {middle:?}");
        }
    }

    #[test]
    fn hub_wiring_eleven_nodes_uses_node_ten() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut set = TunnelSet::new(11);
        wire_hub(&mut set, &mut rng).unwrap();
        assert!(set.is_connected(1, 10));
        assert!(set.is_connected(1, 11));
        assert_eq!(set.degree(1), 10);
    }

    #[test]
    fn wire_hub_without_nodes_fails() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut set = TunnelSet::new(0);
        assert_eq!(
            wire_hub(&mut set, &mut rng),
            Err(InvariantViolation::MissingHub)
        );
    }

    #[test]
    fn local_wiring_reaches_minimum_degree() {
        let mut rng = StdRng::seed_from_u64(21);
        let coords = place_nodes(200, &mut rng);
        let grid = SpatialGrid::new(&coords);
        let mut set = TunnelSet::new(200);
        wire_hub(&mut set, &mut rng).unwrap();
        wire_local(&mut set, &grid, &mut rng).unwrap();
        for seq in 2..=200 {
            assert!(set.degree(seq) >= MIN_LOCAL_DEGREE, "node {seq}");
        }
    }

    #[test]
    fn local_wiring_prefers_nearest() {
        // On a line with no hub edges beyond the direct span, node 20's two
        // closest unconnected neighbours are 19 and 18.
        let mut rng = StdRng::seed_from_u64(2);
        let coords = line(20, 100);
        let grid = SpatialGrid::new(&coords);
        let mut set = TunnelSet::new(20);
        wire_local(&mut set, &grid, &mut rng).unwrap();
        assert!(set.is_connected(20, 19));
        assert!(set.is_connected(19, 18) || set.is_connected(20, 18));
    }

    #[test]
    fn repair_connects_isolated_nodes() {
        let coords = vec![
            Coord::new(0, 0),
            Coord::new(100, 0),
            Coord::new(1000, 0),
            Coord::new(5000, 0),
        ];
        let grid = SpatialGrid::new(&coords);
        let mut set = TunnelSet::new(4);
        set.connect(1, 2).unwrap();
        let repaired = repair_dead_nodes(&mut set, &grid).unwrap();
        assert_eq!(repaired, 2);
        assert!(set.is_connected(3, 2));
        // node 4 sees node 3 as wired by the time its turn comes
        assert!(set.is_connected(4, 3));
    }

    #[test]
    fn repair_is_noop_without_dead_nodes() {
        let coords = line(3, 100);
        let grid = SpatialGrid::new(&coords);
        let mut set = TunnelSet::new(3);
        set.connect(1, 2).unwrap();
        set.connect(2, 3).unwrap();
        assert_eq!(repair_dead_nodes(&mut set, &grid).unwrap(), 0);
        assert_eq!(set.connection_count(), 2);
    }

    #[test]
    fn link_components_joins_islands() {
        let coords = vec![
            Coord::new(0, 0),
            Coord::new(100, 0),
            Coord::new(1000, 0),
            Coord::new(1100, 0),
            Coord::new(3000, 0),
        ];
        let grid = SpatialGrid::new(&coords);
        let mut set = TunnelSet::new(5);
        set.connect(1, 2).unwrap();
        set.connect(3, 4).unwrap();
        let links = link_components(&mut set, &grid).unwrap();
        assert_eq!(links, 2);
        assert!(set.is_connected(2, 3));
        // node 5's closest member of the hub component is node 4
        assert!(set.is_connected(5, 4));
    }
}
