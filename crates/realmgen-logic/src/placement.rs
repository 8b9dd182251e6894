//! Coordinate placement: grid buckets plus bounded jitter.
//!
//! Node `i` lands near the centre of bucket `(i-1) mod g, (i-1) div g` on a
//! `g × g` grid where `g = ceil(sqrt(n))`, then each axis is jittered
//! independently. The result is loosely grid-aligned but irregular, so
//! nearest-neighbour wiring does not collapse into a lattice. Collisions
//! are allowed.

use rand::Rng;

use crate::constants::placement::{GRID_SPACING, JITTER};
use crate::graph::Coord;

/// Side length of the square placement grid for `node_count` nodes.
pub fn grid_side(node_count: u32) -> u32 {
    if node_count == 0 {
        return 0;
    }
    let mut side = (node_count as f64).sqrt().ceil() as u32;
    // guard against float rounding either way
    while side.saturating_mul(side) < node_count {
        side += 1;
    }
    while side > 1 && (side - 1) * (side - 1) >= node_count {
        side -= 1;
    }
    side
}

/// Un-jittered grid position of the 1-based node `sequence`.
pub fn base_position(sequence: u32, side: u32) -> Coord {
    let i = sequence - 1;
    Coord::new(
        (i % side) as i32 * GRID_SPACING,
        (i / side) as i32 * GRID_SPACING,
    )
}

/// Place `node_count` nodes; element `k` belongs to sequence `k + 1`.
pub fn place_nodes(node_count: u32, rng: &mut impl Rng) -> Vec<Coord> {
    let side = grid_side(node_count);
    (1..=node_count)
        .map(|seq| {
            let base = base_position(seq, side);
            Coord::new(
                base.x + rng.gen_range(-JITTER..=JITTER),
                base.y + rng.gen_range(-JITTER..=JITTER),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn grid_side_is_ceil_sqrt() {
        assert_eq!(grid_side(1), 1);
        assert_eq!(grid_side(9), 3);
        assert_eq!(grid_side(10), 4);
        assert_eq!(grid_side(16), 4);
        assert_eq!(grid_side(17), 5);
        assert_eq!(grid_side(1000), 32);
    }

    #[test]
    fn base_positions_fill_rows() {
        assert_eq!(base_position(1, 4), Coord::new(0, 0));
        assert_eq!(base_position(4, 4), Coord::new(300, 0));
        assert_eq!(base_position(5, 4), Coord::new(0, 100));
        assert_eq!(base_position(10, 4), Coord::new(100, 200));
    }

    #[test]
    fn jitter_stays_in_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 250;
        let side = grid_side(n);
        let coords = place_nodes(n, &mut rng);
        assert_eq!(coords.len(), n as usize);
        for (k, c) in coords.iter().enumerate() {
            let base = base_position(k as u32 + 1, side);
            assert!((c.x - base.x).abs() <= JITTER, "x out of bounds at {k}");
            assert!((c.y - base.y).abs() <= JITTER, "y out of bounds at {k}");
        }
    }

    #[test]
    fn jitter_is_not_constant() {
        let mut rng = StdRng::seed_from_u64(11);
        let coords = place_nodes(100, &mut rng);
        let side = grid_side(100);
        let moved = coords
            .iter()
            .enumerate()
            .filter(|(k, c)| **c != base_position(*k as u32 + 1, side))
            .count();
        assert!(moved > 50, "only {moved} nodes were jittered");
    }
}
