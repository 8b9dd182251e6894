//! Connectivity analysis over the tunnel graph.
//!
//! `TunnelGraph` holds an adjacency list built from a realm's tunnels and
//! answers route, hop-distance and component queries with BFS. Routes are
//! cached in a small bounded map since callers tend to ask for the same
//! hub routes repeatedly.

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::graph::{RealmGraph, Tunnel};

/// Adjacency view of a realm's tunnels with a bounded route cache.
pub struct TunnelGraph {
    /// node → outgoing neighbours, ascending
    adj: BTreeMap<u32, Vec<u32>>,
    /// (from, to) → cached route. Simple bounded cache.
    cache: HashMap<(u32, u32), Vec<u32>>,
    cache_capacity: usize,
}

impl TunnelGraph {
    /// Build from a generated realm; isolated nodes are kept as vertices.
    pub fn from_realm(realm: &RealmGraph) -> Self {
        let mut graph = Self::from_tunnels(&realm.tunnels);
        for node in &realm.nodes {
            graph.adj.entry(node.sequence).or_default();
        }
        graph
    }

    pub fn from_tunnels(tunnels: &[Tunnel]) -> Self {
        Self::from_tunnels_with_cache(tunnels, 256)
    }

    pub fn from_tunnels_with_cache(tunnels: &[Tunnel], cache_capacity: usize) -> Self {
        let mut adj: BTreeMap<u32, Vec<u32>> = BTreeMap::new();
        for t in tunnels {
            adj.entry(t.from).or_default().push(t.to);
            adj.entry(t.to).or_default();
        }
        for list in adj.values_mut() {
            list.sort_unstable();
            list.dedup();
        }
        Self {
            adj,
            cache: HashMap::new(),
            cache_capacity,
        }
    }

    /// Shortest route from `from` to `to` by hop count.
    ///
    /// The route lists every node entered after `from`, ending at `to`.
    /// Returns an empty vec if `from == to` and `None` if unreachable.
    pub fn find_route(&mut self, from: u32, to: u32) -> Option<Vec<u32>> {
        if from == to {
            return Some(vec![]);
        }

        let key = (from, to);
        if let Some(cached) = self.cache.get(&key) {
            return Some(cached.clone());
        }

        let result = self.bfs_route(from, to);

        if let Some(ref route) = result {
            if self.cache.len() >= self.cache_capacity {
                // Evict an arbitrary entry
                if let Some(&evict_key) = self.cache.keys().next() {
                    self.cache.remove(&evict_key);
                }
            }
            self.cache.insert(key, route.clone());
        }

        result
    }

    pub fn neighbors(&self, node: u32) -> &[u32] {
        self.adj.get(&node).map(|v| v.as_slice()).unwrap_or(&[])
    }

    pub fn has_node(&self, node: u32) -> bool {
        self.adj.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.adj.len()
    }

    pub fn cache_size(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Hop distance from `origin` to every reachable node (origin = 0).
    pub fn hop_counts(&self, origin: u32) -> BTreeMap<u32, u32> {
        let mut hops = BTreeMap::new();
        if !self.has_node(origin) {
            return hops;
        }
        let mut queue = VecDeque::new();
        hops.insert(origin, 0);
        queue.push_back(origin);
        while let Some(current) = queue.pop_front() {
            let next_hops = hops[&current] + 1;
            for &next in self.neighbors(current) {
                if !hops.contains_key(&next) {
                    hops.insert(next, next_hops);
                    queue.push_back(next);
                }
            }
        }
        hops
    }

    /// Connected components, each sorted, ordered by lowest member.
    pub fn components(&self) -> Vec<Vec<u32>> {
        let mut seen = std::collections::HashSet::new();
        let mut out = Vec::new();
        for &start in self.adj.keys() {
            if seen.contains(&start) {
                continue;
            }
            let mut members: Vec<u32> = self.hop_counts(start).into_keys().collect();
            seen.extend(members.iter().copied());
            members.sort_unstable();
            out.push(members);
        }
        out
    }

    /// True if every vertex is reachable from every other.
    pub fn is_connected(&self) -> bool {
        self.components().len() <= 1
    }

    /// Largest hop count from `origin` to any reachable node.
    pub fn eccentricity(&self, origin: u32) -> Option<u32> {
        self.hop_counts(origin).into_values().max()
    }

    fn bfs_route(&self, from: u32, to: u32) -> Option<Vec<u32>> {
        let mut previous: HashMap<u32, u32> = HashMap::new();
        let mut queue = VecDeque::new();
        previous.insert(from, from);
        queue.push_back(from);

        while let Some(current) = queue.pop_front() {
            for &next in self.neighbors(current) {
                if previous.contains_key(&next) {
                    continue;
                }
                previous.insert(next, current);
                if next == to {
                    let mut route = vec![to];
                    let mut cursor = current;
                    while cursor != from {
                        route.push(cursor);
                        cursor = previous[&cursor];
                    }
                    route.reverse();
                    return Some(route);
                }
                queue.push_back(next);
            }
        }
        None
    }
}
