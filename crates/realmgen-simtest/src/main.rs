//! Realmgen Headless Generation Harness
//!
//! Generates realms across a sweep of sizes and seeds and checks every
//! structural property of the output. Runs entirely in-process: no storage
//! service, no networking, no rendering.
//!
//! Usage:
//!   cargo run -p realmgen-simtest
//!   cargo run -p realmgen-simtest -- --verbose
//!   cargo run -p realmgen-simtest -- --json realm.json

use rand::rngs::StdRng;
use rand::SeedableRng;
use realmgen_core::persistence::load_registry;
use realmgen_core::prelude::*;
use realmgen_logic::attributes::roll_station;
use realmgen_logic::connectivity::TunnelGraph;
use realmgen_logic::constants::HUB_SEQUENCE;
use realmgen_logic::generator::RealmGenerator;
use realmgen_logic::graph::RealmGraph;
use realmgen_logic::params::{validate_params, ParamError, RealmParams};
use realmgen_logic::tables::GenerationTables;
use realmgen_logic::validation::{errors, validate_realm, Severity};

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

const SWEEP_SIZES: [u32; 6] = [10, 11, 25, 100, 1_000, 5_000];
const SWEEP_SEEDS: u64 = 8;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let verbose = args.iter().any(|a| a == "--verbose");
    let json_path = args
        .iter()
        .position(|a| a == "--json")
        .and_then(|i| args.get(i + 1))
        .cloned();
    println!("=== Realmgen Generation Harness ===\n");

    let mut results = Vec::new();

    // 1. Lookup tables
    results.extend(validate_tables(verbose));

    // 2. Parameter validation
    results.extend(validate_parameters(verbose));

    // 3. Size × seed sweep
    results.extend(validate_sweep(verbose));

    // 4. Quantum station rates
    results.extend(validate_station_rates(verbose));

    // 5. Concrete scenarios
    results.extend(validate_scenarios(verbose));

    // 6. Registry lifecycle
    results.extend(validate_registry(verbose));

    if let Some(path) = json_path {
        results.push(dump_json(&path));
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn generate(params: &RealmParams, seed: u64) -> Result<RealmGraph, String> {
    RealmGenerator::from_seed(seed)
        .generate(params)
        .map_err(|e| e.to_string())
}

// ── 1. Tables ───────────────────────────────────────────────────────────

fn validate_tables(verbose: bool) -> Vec<TestResult> {
    println!("--- Lookup Tables ---");
    let mut results = Vec::new();
    let tables = GenerationTables::embedded();

    results.push(TestResult {
        name: "planet_table_nine_rows".into(),
        passed: tables.planets().len() == 9,
        detail: format!("{} planet rows", tables.planets().len()),
    });

    let names: Vec<&str> = tables.planets().iter().map(|p| p.name.as_str()).collect();
    let mut unique = names.clone();
    unique.sort_unstable();
    unique.dedup();
    results.push(TestResult {
        name: "planet_names_unique".into(),
        passed: unique.len() == names.len(),
        detail: names.join(", "),
    });

    let lists = tables.star_names();
    results.push(TestResult {
        name: "star_name_lists_present".into(),
        passed: !lists.designations.is_empty() && !lists.roots.is_empty(),
        detail: format!(
            "{} designations, {} roots",
            lists.designations.len(),
            lists.roots.len()
        ),
    });

    if verbose {
        for p in tables.planets() {
            println!("  {:<8} {:?}", p.name, p.size);
        }
    }

    results
}

// ── 2. Parameters ───────────────────────────────────────────────────────

fn validate_parameters(_verbose: bool) -> Vec<TestResult> {
    println!("--- Parameters ---");
    let mut results = Vec::new();

    let cases: [(&str, RealmParams, Vec<ParamError>); 4] = [
        ("params_default_ok", RealmParams::default(), vec![]),
        (
            "params_nine_nodes_rejected",
            RealmParams::new("Tiny", 9),
            vec![ParamError::NodeCountTooSmall(9)],
        ),
        (
            "params_rate_over_100_rejected",
            RealmParams::new("Rate", 20).with_seed_rate(101),
            vec![ParamError::SeedRateOutOfRange(101)],
        ),
        (
            "params_blank_name_rejected",
            RealmParams::new("   ", 20),
            vec![ParamError::EmptyName],
        ),
    ];

    for (name, params, expected) in cases {
        let found = validate_params(&params);
        results.push(TestResult {
            name: name.into(),
            passed: found == expected,
            detail: format!("{:?}", found),
        });
    }

    let rejected = RealmGenerator::from_seed(0).generate(&RealmParams::new("Small", 3));
    results.push(TestResult {
        name: "generate_rejects_before_work".into(),
        passed: rejected.is_err(),
        detail: match rejected {
            Ok(_) => "generated a realm with 3 nodes".into(),
            Err(e) => e.to_string(),
        },
    });

    results
}

// ── 3. Sweep ────────────────────────────────────────────────────────────

fn validate_sweep(verbose: bool) -> Vec<TestResult> {
    println!("--- Size × Seed Sweep ---");
    let mut results = Vec::new();
    let table = GenerationTables::embedded().planets().to_vec();

    for &n in &SWEEP_SIZES {
        let mut failures = Vec::new();
        let mut warnings = 0;
        let mut max_hops = 0;
        let mut tunnels = 0;

        for seed in 0..SWEEP_SEEDS {
            let params = RealmParams::new(format!("Sweep {n}"), n).with_seed_rate(10);
            let realm = match generate(&params, seed) {
                Ok(r) => r,
                Err(e) => {
                    failures.push(format!("seed {seed}: {e}"));
                    continue;
                }
            };

            let issues = validate_realm(&realm, &table);
            warnings += issues
                .iter()
                .filter(|i| i.severity == Severity::Warning)
                .count();
            for issue in errors(&issues) {
                failures.push(format!("seed {seed}: [{}] {}", issue.category, issue.message));
            }

            tunnels += realm.tunnels.len();
            if let Some(ecc) = TunnelGraph::from_realm(&realm).eccentricity(HUB_SEQUENCE) {
                max_hops = max_hops.max(ecc);
            }
        }

        if verbose {
            println!(
                "  n={:<5} avg tunnels {:>7}  hub eccentricity ≤ {:<3} warnings {}",
                n,
                tunnels / SWEEP_SEEDS as usize,
                max_hops,
                warnings
            );
        }

        results.push(TestResult {
            name: format!("sweep_{}_nodes", n),
            passed: failures.is_empty(),
            detail: if failures.is_empty() {
                format!("{} seeds valid", SWEEP_SEEDS)
            } else {
                failures.join("; ")
            },
        });
    }

    let params = RealmParams::new("Repeat", 300).with_seed_rate(25);
    let same = generate(&params, 99).ok() == generate(&params, 99).ok();
    results.push(TestResult {
        name: "sweep_deterministic".into(),
        passed: same,
        detail: "seed 99 generated twice".into(),
    });

    results
}

// ── 4. Station rates ────────────────────────────────────────────────────

fn validate_station_rates(verbose: bool) -> Vec<TestResult> {
    println!("--- Quantum Station Rates ---");
    let mut results = Vec::new();
    let mut rng = StdRng::seed_from_u64(2024);
    const TRIALS: u32 = 20_000;

    for rate in [0u8, 1, 10, 50, 99, 100] {
        let hits = (0..TRIALS).filter(|_| roll_station(rate, &mut rng)).count();
        let observed = hits as f64 * 100.0 / TRIALS as f64;
        // 20k trials: sd ≤ 0.36 points
        let passed = match rate {
            0 => hits == 0,
            100 => hits == TRIALS as usize,
            r => (observed - r as f64).abs() < 1.5,
        };
        if verbose {
            println!("  rate {:>3}% → observed {:>6.2}%", rate, observed);
        }
        results.push(TestResult {
            name: format!("station_rate_{}", rate),
            passed,
            detail: format!("{:.2}% observed", observed),
        });
    }

    results
}

// ── 5. Scenarios ────────────────────────────────────────────────────────

fn validate_scenarios(_verbose: bool) -> Vec<TestResult> {
    println!("--- Scenarios ---");
    let mut results = Vec::new();

    // Ten nodes: hub touches everyone, only the hub has a station
    let params = RealmParams::new("Ten", 10)
        .with_seed_rate(0)
        .with_no_dead_nodes(true);
    match generate(&params, 1) {
        Ok(realm) => {
            let stations = realm.station_count();
            results.push(TestResult {
                name: "scenario_ten_hub_degree".into(),
                passed: realm.degree(HUB_SEQUENCE) == 9,
                detail: format!("hub degree {}", realm.degree(HUB_SEQUENCE)),
            });
            results.push(TestResult {
                name: "scenario_ten_only_hub_station".into(),
                passed: stations == 1 && realm.hub().is_some_and(|h| h.quantum_station),
                detail: format!("{} stations", stations),
            });
        }
        Err(e) => results.push(TestResult {
            name: "scenario_ten".into(),
            passed: false,
            detail: e,
        }),
    }

    // Fifteen nodes at 100%: every node has a station
    match generate(&RealmParams::new("Fifteen", 15).with_seed_rate(100), 2) {
        Ok(realm) => results.push(TestResult {
            name: "scenario_fifteen_all_stations".into(),
            passed: realm.station_count() == 15,
            detail: format!("{} stations", realm.station_count()),
        }),
        Err(e) => results.push(TestResult {
            name: "scenario_fifteen".into(),
            passed: false,
            detail: e,
        }),
    }

    // Forced connectivity
    let params = RealmParams::new("Joined", 2_000).with_require_connected(true);
    match generate(&params, 3) {
        Ok(realm) => {
            let components = TunnelGraph::from_realm(&realm).components().len();
            results.push(TestResult {
                name: "scenario_require_connected".into(),
                passed: components == 1,
                detail: format!("{} component(s)", components),
            });
        }
        Err(e) => results.push(TestResult {
            name: "scenario_require_connected".into(),
            passed: false,
            detail: e,
        }),
    }

    results
}

// ── 6. Registry ─────────────────────────────────────────────────────────

fn validate_registry(_verbose: bool) -> Vec<TestResult> {
    println!("--- Registry ---");
    let mut results = Vec::new();
    let mut registry = RealmRegistry::new();

    let first = registry.create_realm(&RealmParams::new("Cygnus", 60).with_seed(10));
    let second = registry.create_realm(&RealmParams::new("Aquila", 30).with_seed(11));
    let (first, second) = match (first, second) {
        (Ok(a), Ok(b)) => (a, b),
        (a, b) => {
            results.push(TestResult {
                name: "registry_create".into(),
                passed: false,
                detail: format!("{:?} / {:?}", a.err(), b.err()),
            });
            return results;
        }
    };
    results.push(TestResult {
        name: "registry_create".into(),
        passed: registry.realm_count() == 2,
        detail: format!("{} and {}", first, second),
    });

    let duplicate = registry.create_realm(&RealmParams::new("Cygnus", 10));
    results.push(TestResult {
        name: "registry_duplicate_name".into(),
        passed: matches!(duplicate, Err(RegistryError::DuplicateName(_))),
        detail: format!("{:?}", duplicate.err()),
    });

    let stored_matches = match (
        registry.realm_graph(first),
        generate(&RealmParams::new("Cygnus", 60).with_seed(10), 10),
    ) {
        (Ok(stored), Ok(fresh)) => stored.nodes == fresh.nodes,
        _ => false,
    };
    results.push(TestResult {
        name: "registry_readback".into(),
        passed: stored_matches,
        detail: "stored nodes equal a fresh generation".into(),
    });

    let mut buf = Vec::new();
    let reloaded = registry
        .save(&mut buf)
        .map_err(|e| e.to_string())
        .and_then(|_| load_registry(&buf[..]).map_err(|e| e.to_string()));
    let roundtrip = match &reloaded {
        Ok(loaded) => {
            loaded.realms() == registry.realms()
                && loaded.realm_graph(second).ok() == registry.realm_graph(second).ok()
        }
        Err(_) => false,
    };
    results.push(TestResult {
        name: "registry_save_load".into(),
        passed: roundtrip,
        detail: format!("{} bytes", buf.len()),
    });

    let owned = registry.entity_count(second);
    let removed = registry.delete_realm(second);
    results.push(TestResult {
        name: "registry_delete_cascades".into(),
        passed: removed.as_ref().ok() == Some(&(owned + 1)) && registry.entity_count(second) == 0,
        detail: format!("{:?} entities removed", removed.ok()),
    });

    results
}

// ── JSON dump ───────────────────────────────────────────────────────────

fn dump_json(path: &str) -> TestResult {
    let params = RealmParams::new("Dump", 50).with_seed(1);
    let written = generate(&params, 1).and_then(|realm| {
        let json = serde_json::to_string_pretty(&realm).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    });
    TestResult {
        name: "json_dump".into(),
        passed: written.is_ok(),
        detail: match written {
            Ok(()) => format!("wrote {}", path),
            Err(e) => e,
        },
    }
}
