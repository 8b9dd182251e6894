//! Integration tests for the full realm generation pipeline.
//!
//! Exercises: RealmParams → placement → topology → stations → systems
//! → validation and connectivity analysis.
//!
//! All tests are pure logic with seeded random sources.

use std::collections::HashSet;

use realmgen_logic::connectivity::TunnelGraph;
use realmgen_logic::constants::HUB_SEQUENCE;
use realmgen_logic::generator::RealmGenerator;
use realmgen_logic::graph::{PlanetSize, RealmGraph};
use realmgen_logic::params::RealmParams;
use realmgen_logic::tables::GenerationTables;
use realmgen_logic::validation::{errors, size_sequence, validate_realm};

// ── Helpers ────────────────────────────────────────────────────────────

fn generate(params: &RealmParams, seed: u64) -> RealmGraph {
    RealmGenerator::from_seed(seed)
        .generate(params)
        .expect("generation should succeed")
}

fn assert_valid(realm: &RealmGraph) {
    let table = GenerationTables::embedded().planets().to_vec();
    let issues = validate_realm(realm, &table);
    let errs = errors(&issues);
    assert!(errs.is_empty(), "realm '{}' invalid: {errs:?}", realm.name());
}

// ── Structural properties ──────────────────────────────────────────────

#[test]
fn sequences_are_one_to_n() {
    for n in [10, 11, 37, 250] {
        let realm = generate(&RealmParams::new("Seq", n), n as u64);
        let seqs: Vec<u32> = realm.nodes.iter().map(|n| n.sequence).collect();
        assert_eq!(seqs, (1..=n).collect::<Vec<u32>>());
    }
}

#[test]
fn tunnels_symmetric_without_duplicates() {
    for seed in 0..10 {
        let realm = generate(&RealmParams::new("Sym", 120), seed);
        let ordered: HashSet<(u32, u32)> =
            realm.tunnels.iter().map(|t| (t.from, t.to)).collect();
        assert_eq!(ordered.len(), realm.tunnels.len(), "seed {seed}: duplicate pair");
        for t in &realm.tunnels {
            assert!(ordered.contains(&(t.to, t.from)), "seed {seed}: {t:?} unpaired");
        }
    }
}

#[test]
fn hub_degree_floor() {
    for n in [10, 12, 50, 400] {
        let realm = generate(&RealmParams::new("Hub", n), 3);
        let neighbors = realm.neighbors(HUB_SEQUENCE);
        for seq in 2..=n.min(9) {
            assert!(neighbors.contains(&seq), "n={n}: hub missing {seq}");
        }
        assert!(neighbors.contains(&n), "n={n}: hub missing last node");
        assert!(realm.degree(HUB_SEQUENCE) >= n.min(9) as usize, "n={n}");
    }
}

#[test]
fn non_hub_nodes_have_local_links() {
    let realm = generate(&RealmParams::new("Local", 300), 17);
    for node in realm.nodes.iter().filter(|n| !n.is_hub()) {
        assert!(realm.degree(node.sequence) >= 2, "node {}", node.sequence);
    }
}

#[test]
fn no_dead_nodes_when_requested() {
    for seed in 0..20 {
        let params = RealmParams::new("Alive", 80).with_no_dead_nodes(true);
        let realm = generate(&params, seed);
        for node in &realm.nodes {
            assert!(realm.degree(node.sequence) >= 1, "seed {seed} node {}", node.sequence);
        }
    }
}

#[test]
fn require_connected_gives_one_component() {
    for seed in 0..10 {
        let params = RealmParams::new("Joined", 200).with_require_connected(true);
        let realm = generate(&params, seed);
        assert!(TunnelGraph::from_realm(&realm).is_connected(), "seed {seed}");
        assert_valid(&realm);
    }
}

// ── Seeded attributes ──────────────────────────────────────────────────

#[test]
fn nine_planets_with_fixed_sizes() {
    use PlanetSize::*;
    let realm = generate(&RealmParams::new("Planets", 30), 4);
    let table = GenerationTables::embedded().planets().to_vec();
    assert_eq!(
        size_sequence(&table),
        vec![Tiny, Average, Average, Average, Huge, Huge, Huge, Huge, Tiny]
    );
    for node in &realm.nodes {
        assert_eq!(node.planet_count, 9);
        let sizes: Vec<PlanetSize> = node.planets.iter().map(|p| p.size).collect();
        assert_eq!(sizes, size_sequence(&table));
    }
    assert_eq!(realm.planet_total(), 270);
}

#[test]
fn hub_always_has_starbase_and_station() {
    for seed in 0..25 {
        let realm = generate(&RealmParams::new("Base", 40).with_seed_rate(0), seed);
        let hub = realm.hub().expect("hub exists");
        assert!(hub.starbase.is_some());
        assert!(hub.quantum_station);
        assert_eq!(realm.starbase_count(), 1);
    }
}

#[test]
fn station_share_tracks_seed_rate() {
    let realm = generate(&RealmParams::new("Stations", 1000).with_seed_rate(30), 2024);
    let stations = realm
        .nodes
        .iter()
        .filter(|n| !n.is_hub() && n.quantum_station)
        .count();
    // binomial(999, 0.3): mean ≈ 300, sd ≈ 14.5
    assert!((240..=360).contains(&stations), "{stations} stations");
}

// ── Concrete scenarios ─────────────────────────────────────────────────

#[test]
fn scenario_ten_nodes_rate_zero() {
    let params = RealmParams::new("Ten", 10)
        .with_seed_rate(0)
        .with_no_dead_nodes(true);
    for seed in 0..10 {
        let realm = generate(&params, seed);
        assert_eq!(realm.node_count(), 10);
        assert_eq!(realm.degree(HUB_SEQUENCE), 9);
        assert!(realm.nodes.iter().all(|n| realm.degree(n.sequence) >= 1));
        let stations: Vec<u32> = realm
            .nodes
            .iter()
            .filter(|n| n.quantum_station)
            .map(|n| n.sequence)
            .collect();
        assert_eq!(stations, vec![HUB_SEQUENCE]);
        assert_valid(&realm);
    }
}

#[test]
fn scenario_fifteen_nodes_rate_hundred() {
    let realm = generate(&RealmParams::new("Fifteen", 15).with_seed_rate(100), 9);
    assert_eq!(realm.station_count(), 15);
    assert_valid(&realm);
}

// ── Pipeline coherence ─────────────────────────────────────────────────

#[test]
fn deterministic_output() {
    let params = RealmParams::new("Repeat", 150).with_seed_rate(25);
    assert_eq!(generate(&params, 42), generate(&params, 42));
}

#[test]
fn sweep_sizes_and_seeds_validate() {
    for n in [10, 16, 99, 500] {
        for seed in 0..5 {
            let params = RealmParams::new(format!("Sweep {n}"), n).with_seed_rate(15);
            assert_valid(&generate(&params, seed));
        }
    }
}

#[test]
fn hub_reachable_within_few_hops_of_early_nodes() {
    let realm = generate(&RealmParams::new("Hops", 200), 6);
    let hops = TunnelGraph::from_realm(&realm).hop_counts(HUB_SEQUENCE);
    for seq in 2..=9 {
        assert_eq!(hops.get(&seq), Some(&1));
    }
    assert_eq!(hops.get(&200), Some(&1));
}

#[test]
fn graph_serializes_to_json() {
    let realm = generate(&RealmParams::new("Json", 12), 1);
    let json = serde_json::to_string(&realm).expect("serialize");
    let back: RealmGraph = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(realm, back);
    assert!(json.contains("\"average\""));
}
