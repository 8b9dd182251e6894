//! Quantum-station seeding.
//!
//! One independent draw per node, uniform in 1..=100, compared against the
//! seed rate. The resulting share of stations is approximate: expected
//! fraction `rate / 100`, binomially distributed over the node count.

use rand::Rng;

use crate::constants::seeding::STATION_ROLL_SIDES;
use crate::graph::StarNode;

/// Roll a single station draw.
pub fn roll_station(rate: u8, rng: &mut impl Rng) -> bool {
    rng.gen_range(1..=STATION_ROLL_SIDES) <= rate
}

/// Set every node's station flag from a fresh draw. Returns the number of
/// stations placed.
pub fn seed_quantum_stations(nodes: &mut [StarNode], rate: u8, rng: &mut impl Rng) -> usize {
    let mut placed = 0;
    for node in nodes.iter_mut() {
        node.quantum_station = roll_station(rate, rng);
        if node.quantum_station {
            placed += 1;
        }
    }
    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Coord;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn nodes(n: u32) -> Vec<StarNode> {
        (1..=n).map(|s| StarNode::new(s, Coord::default())).collect()
    }

    #[test]
    fn zero_rate_never_fires() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut ns = nodes(500);
        assert_eq!(seed_quantum_stations(&mut ns, 0, &mut rng), 0);
        assert!(ns.iter().all(|n| !n.quantum_station));
    }

    #[test]
    fn full_rate_always_fires() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut ns = nodes(500);
        assert_eq!(seed_quantum_stations(&mut ns, 100, &mut rng), 500);
    }

    #[test]
    fn observed_rate_near_requested() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ns = nodes(1000);
        let placed = seed_quantum_stations(&mut ns, 30, &mut rng);
        // binomial(1000, 0.3): sd ≈ 14.5, allow ~5 sd
        assert!((228..=372).contains(&placed), "placed {placed}");
    }

    #[test]
    fn reseeding_overwrites_flags() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut ns = nodes(50);
        seed_quantum_stations(&mut ns, 100, &mut rng);
        seed_quantum_stations(&mut ns, 0, &mut rng);
        assert_eq!(ns.iter().filter(|n| n.quantum_station).count(), 0);
    }
}
