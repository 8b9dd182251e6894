//! Grid-bucket spatial index for nearest-neighbour queries.
//!
//! Buckets use the placement spacing, so each bucket holds roughly one
//! node. A query scans square rings of buckets outward from the origin
//! and stops as soon as no unscanned bucket can beat the current k-th
//! best, making each query sub-linear instead of a full rescan.

use crate::constants::placement::GRID_SPACING;
use crate::graph::Coord;

/// Bucketed node positions, addressed by 1-based sequence number.
pub struct SpatialGrid {
    coords: Vec<Coord>,
    min: Coord,
    cell: i32,
    cols: i64,
    rows: i64,
    buckets: Vec<Vec<u32>>,
}

impl SpatialGrid {
    /// Build an index where `coords[k]` is the position of sequence `k + 1`.
    pub fn new(coords: &[Coord]) -> Self {
        Self::with_cell_size(coords, GRID_SPACING)
    }

    pub fn with_cell_size(coords: &[Coord], cell: i32) -> Self {
        let cell = cell.max(1);
        let min = Coord::new(
            coords.iter().map(|c| c.x).min().unwrap_or(0),
            coords.iter().map(|c| c.y).min().unwrap_or(0),
        );
        let max_x = coords.iter().map(|c| c.x).max().unwrap_or(0);
        let max_y = coords.iter().map(|c| c.y).max().unwrap_or(0);
        let cols = ((max_x - min.x) / cell) as i64 + 1;
        let rows = ((max_y - min.y) / cell) as i64 + 1;

        let mut grid = Self {
            coords: coords.to_vec(),
            min,
            cell,
            cols,
            rows,
            buckets: vec![Vec::new(); (cols * rows) as usize],
        };
        for (k, c) in coords.iter().enumerate() {
            let (col, row) = grid.cell_of(c);
            let idx = grid.bucket_index(col, row);
            grid.buckets[idx].push(k as u32 + 1);
        }
        grid
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Position of `sequence`, if it is indexed.
    pub fn coord(&self, sequence: u32) -> Option<Coord> {
        self.coords.get(sequence.checked_sub(1)? as usize).copied()
    }

    /// Up to `k` nodes nearest to `origin`, closest first.
    ///
    /// `origin` itself is never returned, and only nodes for which
    /// `accept` returns true are considered. Equal distances are ordered
    /// by ascending sequence number.
    pub fn nearest<F>(&self, origin: u32, k: usize, accept: F) -> Vec<u32>
    where
        F: Fn(u32) -> bool,
    {
        let Some(at) = self.coord(origin) else {
            return Vec::new();
        };
        if k == 0 {
            return Vec::new();
        }

        let (ocol, orow) = self.cell_of(&at);
        let max_ring = self.cols.max(self.rows);
        let mut found: Vec<(i64, u32)> = Vec::new();

        for ring in 0..=max_ring {
            self.scan_ring(ocol, orow, ring, |seq| {
                if seq != origin && accept(seq) {
                    if let Some(c) = self.coord(seq) {
                        found.push((at.distance_squared(&c), seq));
                    }
                }
            });

            if found.len() >= k {
                found.sort_unstable();
                // anything outside this ring is at least `ring` whole cells away
                let reach = ring * self.cell as i64;
                if found[k - 1].0 < reach * reach {
                    break;
                }
            }
        }

        found.sort_unstable();
        found.truncate(k);
        found.into_iter().map(|(_, seq)| seq).collect()
    }

    fn cell_of(&self, c: &Coord) -> (i64, i64) {
        let col = ((c.x - self.min.x) / self.cell) as i64;
        let row = ((c.y - self.min.y) / self.cell) as i64;
        (col.clamp(0, self.cols - 1), row.clamp(0, self.rows - 1))
    }

    fn bucket_index(&self, col: i64, row: i64) -> usize {
        (row * self.cols + col) as usize
    }

    fn scan_ring(&self, ocol: i64, orow: i64, ring: i64, mut visit: impl FnMut(u32)) {
        let mut visit_cell = |col: i64, row: i64| {
            if col < 0 || row < 0 || col >= self.cols || row >= self.rows {
                return;
            }
            for &seq in &self.buckets[self.bucket_index(col, row)] {
                visit(seq);
            }
        };

        if ring == 0 {
            visit_cell(ocol, orow);
            return;
        }
        for dc in -ring..=ring {
            visit_cell(ocol + dc, orow - ring);
            visit_cell(ocol + dc, orow + ring);
        }
        for dr in (-ring + 1)..ring {
            visit_cell(ocol - ring, orow + dr);
            visit_cell(ocol + ring, orow + dr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::place_nodes;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Reference answer: full sort of every other node.
    fn brute_force(coords: &[Coord], origin: u32, k: usize, skip: &[u32]) -> Vec<u32> {
        let at = coords[origin as usize - 1];
        let mut all: Vec<(i64, u32)> = coords
            .iter()
            .enumerate()
            .map(|(i, c)| (at.distance_squared(c), i as u32 + 1))
            .filter(|(_, s)| *s != origin && !skip.contains(s))
            .collect();
        all.sort_unstable();
        all.into_iter().take(k).map(|(_, s)| s).collect()
    }

    #[test]
    fn matches_brute_force_on_placed_realm() {
        let mut rng = StdRng::seed_from_u64(3);
        let coords = place_nodes(400, &mut rng);
        let grid = SpatialGrid::new(&coords);
        for origin in [1, 2, 57, 200, 399, 400] {
            assert_eq!(
                grid.nearest(origin, 10, |_| true),
                brute_force(&coords, origin, 10, &[]),
                "origin {origin}"
            );
        }
    }

    #[test]
    fn respects_filter() {
        let mut rng = StdRng::seed_from_u64(5);
        let coords = place_nodes(100, &mut rng);
        let grid = SpatialGrid::new(&coords);
        let skip: Vec<u32> = (2..=30).collect();
        assert_eq!(
            grid.nearest(1, 10, |s| !skip.contains(&s)),
            brute_force(&coords, 1, 10, &skip)
        );
    }

    #[test]
    fn returns_fewer_when_exhausted() {
        let coords = vec![Coord::new(0, 0), Coord::new(10, 0), Coord::new(500, 500)];
        let grid = SpatialGrid::new(&coords);
        assert_eq!(grid.nearest(1, 10, |_| true), vec![2, 3]);
        assert!(grid.nearest(1, 10, |_| false).is_empty());
    }

    #[test]
    fn ties_break_by_sequence() {
        let coords = vec![
            Coord::new(0, 0),
            Coord::new(50, 0),
            Coord::new(-50, 0),
            Coord::new(0, 50),
        ];
        let grid = SpatialGrid::new(&coords);
        assert_eq!(grid.nearest(1, 3, |_| true), vec![2, 3, 4]);
    }

    #[test]
    fn unknown_origin_is_empty() {
        let grid = SpatialGrid::new(&[Coord::new(0, 0)]);
        assert!(grid.nearest(5, 3, |_| true).is_empty());
        assert!(grid.nearest(0, 3, |_| true).is_empty());
    }
}
