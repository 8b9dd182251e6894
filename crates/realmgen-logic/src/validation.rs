//! Structural validation for generated realms.
//!
//! Pure functions that take a realm graph and return validation issues.
//! Used by the test suites and the simtest harness; the generator itself
//! never calls these.

use std::collections::{HashMap, HashSet};

use crate::connectivity::TunnelGraph;
use crate::constants::seeding::PLANETS_PER_SYSTEM;
use crate::constants::wiring::HUB_DIRECT_SPAN;
use crate::constants::HUB_SEQUENCE;
use crate::graph::{PlanetSize, RealmGraph};
use crate::tables::PlanetSpec;

/// A realm validation issue.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    pub category: &'static str,
    pub severity: Severity,
    pub message: String,
}

/// Issue severity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Severity {
    Error,
    Warning,
}

fn error(category: &'static str, message: String) -> ValidationIssue {
    ValidationIssue {
        category,
        severity: Severity::Error,
        message,
    }
}

// ── A. Nodes ────────────────────────────────────────────────────────────

/// Check that sequence numbers are exactly 1..=node_count, each once.
pub fn check_sequences(realm: &RealmGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let expected = realm.params.node_count as usize;
    if realm.nodes.len() != expected {
        issues.push(error(
            "sequence",
            format!(
                "Realm has {} nodes, {} requested",
                realm.nodes.len(),
                expected
            ),
        ));
    }

    let mut seen = HashSet::new();
    for n in &realm.nodes {
        if n.sequence == 0 || n.sequence as usize > realm.nodes.len() {
            issues.push(error(
                "sequence",
                format!("Node sequence {} outside 1..={}", n.sequence, realm.nodes.len()),
            ));
        }
        if !seen.insert(n.sequence) {
            issues.push(error(
                "sequence",
                format!("Node sequence {} appears more than once", n.sequence),
            ));
        }
    }
    issues
}

// ── B. Tunnels ──────────────────────────────────────────────────────────

/// Check every tunnel has a reverse twin with the same cost.
pub fn check_tunnel_symmetry(realm: &RealmGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let by_pair: HashMap<(u32, u32), u32> = realm
        .tunnels
        .iter()
        .map(|t| ((t.from, t.to), t.cost))
        .collect();

    for t in &realm.tunnels {
        match by_pair.get(&(t.to, t.from)) {
            None => issues.push(error(
                "tunnel_symmetry",
                format!("Tunnel {} -> {} has no reverse", t.from, t.to),
            )),
            Some(&cost) if cost != t.cost => issues.push(error(
                "tunnel_symmetry",
                format!(
                    "Tunnel {} -> {} costs {} but its reverse costs {}",
                    t.from, t.to, t.cost, cost
                ),
            )),
            _ => {}
        }
        if t.from == t.to {
            issues.push(error(
                "tunnel_symmetry",
                format!("Tunnel loops on node {}", t.from),
            ));
        }
        if realm.node(t.from).is_none() || realm.node(t.to).is_none() {
            issues.push(error(
                "tunnel_symmetry",
                format!("Tunnel {} -> {} references a missing node", t.from, t.to),
            ));
        }
    }
    issues
}

/// Check no ordered pair appears twice.
pub fn check_no_duplicate_tunnels(realm: &RealmGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let mut seen = HashSet::new();
    for t in &realm.tunnels {
        if !seen.insert((t.from, t.to)) {
            issues.push(error(
                "tunnel_duplicate",
                format!("Tunnel {} -> {} created twice", t.from, t.to),
            ));
        }
    }
    issues
}

/// Check the hub reaches 2..=min(9, N), the last node, and one more.
pub fn check_hub_wiring(realm: &RealmGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let n = realm.nodes.len() as u32;
    if realm.hub().is_none() {
        issues.push(error("hub", "Hub node is missing".to_string()));
        return issues;
    }

    let neighbors: HashSet<u32> = realm.neighbors(HUB_SEQUENCE).into_iter().collect();
    for seq in 2..=n.min(HUB_DIRECT_SPAN) {
        if !neighbors.contains(&seq) {
            issues.push(error(
                "hub",
                format!("Hub is not wired to node {}", seq),
            ));
        }
    }

    if n > HUB_DIRECT_SPAN {
        if !neighbors.contains(&n) {
            issues.push(error(
                "hub",
                format!("Hub is not wired to the last node {}", n),
            ));
        }
        let floor = (n.min(HUB_DIRECT_SPAN) - 1) as usize + 1;
        if neighbors.len() < floor {
            issues.push(error(
                "hub",
                format!("Hub degree {} below minimum {}", neighbors.len(), floor),
            ));
        }
    }
    issues
}

/// Check that no node is isolated.
pub fn check_no_dead_nodes(realm: &RealmGraph) -> Vec<ValidationIssue> {
    let wired: HashSet<u32> = realm.tunnels.iter().map(|t| t.from).collect();
    realm
        .nodes
        .iter()
        .filter(|n| !wired.contains(&n.sequence))
        .map(|n| error("dead_node", format!("Node {} has no tunnels", n.sequence)))
        .collect()
}

/// Check that the realm forms one component.
pub fn check_single_component(realm: &RealmGraph) -> Vec<ValidationIssue> {
    let components = TunnelGraph::from_realm(realm).components();
    if components.len() <= 1 {
        return Vec::new();
    }
    vec![error(
        "connectivity",
        format!(
            "Realm splits into {} components (sizes {:?})",
            components.len(),
            components.iter().map(Vec::len).collect::<Vec<_>>()
        ),
    )]
}

// ── C. Seeded attributes ────────────────────────────────────────────────

/// Check nine planets per node matching the table, and the cached count.
pub fn check_planets(realm: &RealmGraph, table: &[PlanetSpec]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for n in &realm.nodes {
        if n.planets.len() != PLANETS_PER_SYSTEM {
            issues.push(error(
                "planets",
                format!("Node {} has {} planets", n.sequence, n.planets.len()),
            ));
        }
        if n.planet_count as usize != n.planets.len() {
            issues.push(error(
                "planets",
                format!(
                    "Node {} caches planet count {} but owns {}",
                    n.sequence,
                    n.planet_count,
                    n.planets.len()
                ),
            ));
        }
        for (i, (planet, spec)) in n.planets.iter().zip(table).enumerate() {
            if planet.index as usize != i + 1
                || planet.size != spec.size
                || planet.name != spec.name
            {
                issues.push(error(
                    "planets",
                    format!(
                        "Node {} planet #{} is {} ({:?}), expected {} ({:?})",
                        n.sequence,
                        i + 1,
                        planet.name,
                        planet.size,
                        spec.name,
                        spec.size
                    ),
                ));
            }
        }
    }
    issues
}

/// Check exactly one starbase, on the hub, with its station flag set.
pub fn check_starbases(realm: &RealmGraph) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    for n in &realm.nodes {
        if n.starbase.is_some() && !n.is_hub() {
            issues.push(error(
                "starbase",
                format!("Non-hub node {} has a starbase", n.sequence),
            ));
        }
    }
    match realm.hub() {
        Some(hub) if hub.starbase.is_none() => {
            issues.push(error("starbase", "Hub has no starbase".to_string()))
        }
        Some(hub) if !hub.quantum_station => issues.push(error(
            "starbase",
            "Hub starbase without quantum station".to_string(),
        )),
        _ => {}
    }
    issues
}

/// Warn when the observed station share is far from the seed rate.
///
/// Allows five standard deviations of the binomial spread (hub excluded,
/// since its station is forced).
pub fn check_station_rate(realm: &RealmGraph) -> Vec<ValidationIssue> {
    let trials = realm.nodes.iter().filter(|n| !n.is_hub()).count() as f64;
    if trials == 0.0 {
        return Vec::new();
    }
    let p = realm.params.quantum_station_seed_rate as f64 / 100.0;
    let observed = realm
        .nodes
        .iter()
        .filter(|n| !n.is_hub() && n.quantum_station)
        .count() as f64;
    let expected = trials * p;
    let tolerance = 5.0 * (trials * p * (1.0 - p)).sqrt();
    if (observed - expected).abs() > tolerance {
        return vec![ValidationIssue {
            category: "station_rate",
            severity: Severity::Warning,
            message: format!(
                "{} stations among {} nodes, expected {:.1} ± {:.1}",
                observed, trials, expected, tolerance
            ),
        }];
    }
    Vec::new()
}

// ── Aggregate ───────────────────────────────────────────────────────────

/// Run every check that applies to the realm's parameters.
pub fn validate_realm(realm: &RealmGraph, table: &[PlanetSpec]) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    issues.extend(check_sequences(realm));
    issues.extend(check_tunnel_symmetry(realm));
    issues.extend(check_no_duplicate_tunnels(realm));
    issues.extend(check_hub_wiring(realm));
    if realm.params.no_dead_nodes {
        issues.extend(check_no_dead_nodes(realm));
    }
    if realm.params.require_connected {
        issues.extend(check_single_component(realm));
    }
    issues.extend(check_planets(realm, table));
    issues.extend(check_starbases(realm));
    issues.extend(check_station_rate(realm));
    issues
}

/// Errors only.
pub fn errors(issues: &[ValidationIssue]) -> Vec<&ValidationIssue> {
    issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .collect()
}

/// Planet sizes by index, for callers that only want the size sequence.
pub fn size_sequence(table: &[PlanetSpec]) -> Vec<PlanetSize> {
    table.iter().map(|p| p.size).collect()
}
