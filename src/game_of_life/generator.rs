//! Random initial conditions for both grid representations

use super::cells::{Bounds, CellSets, Coord, NEIGHBOR_OFFSETS};
use super::Grid;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Probability that a dense cell starts alive
pub const DENSE_FILL_PROBABILITY: f64 = 0.5;

/// Limits for random-walk blob seeding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobLimits {
    /// Groups are drawn from `1..=max_groups`
    pub max_groups: usize,
    /// Each group size is drawn from `1..=max_group_size`
    pub max_group_size: usize,
}

impl Default for BlobLimits {
    fn default() -> Self {
        Self {
            max_groups: 20,
            max_group_size: 15,
        }
    }
}

/// Fill a grid with independent coin flips
pub fn random_grid<R: Rng + ?Sized>(width: usize, height: usize, rng: &mut R) -> Grid {
    Grid {
        width,
        height,
        cells: (0..width * height)
            .map(|_| rng.gen_bool(DENSE_FILL_PROBABILITY))
            .collect(),
    }
}

/// A uniformly random grid-aligned coordinate inside `bounds`
pub fn random_anchor<R: Rng + ?Sized>(bounds: &Bounds, rng: &mut R) -> Coord {
    let col = rng.gen_range(0..bounds.columns());
    let row = rng.gen_range(0..bounds.rows());
    bounds.to_coord(col, row)
}

/// Grow a connected group of `size` cells by a random walk from `anchor`.
///
/// Each new cell is a free 8-neighbor of the most recently added cell, picked uniformly among
/// the free ones. When that cell is boxed in, the walk backs up to the cell added before it.
/// The group may leave the visible area; callers drop those cells afterwards.
pub fn build_group<R: Rng + ?Sized>(anchor: Coord, size: usize, cell_size: i32, rng: &mut R) -> Vec<Coord> {
    let mut group = vec![anchor];
    let mut members: HashSet<Coord> = HashSet::from([anchor]);
    let mut trail = vec![anchor];

    while group.len() < size {
        let Some(&(x, y)) = trail.last() else {
            break;
        };

        let free: Vec<Coord> = NEIGHBOR_OFFSETS
            .iter()
            .map(|(dx, dy)| (x + dx * cell_size, y + dy * cell_size))
            .filter(|candidate| !members.contains(candidate))
            .collect();

        match free.choose(rng) {
            Some(&next) => {
                group.push(next);
                members.insert(next);
                trail.push(next);
            }
            None => {
                trail.pop();
            }
        }
    }

    group
}

/// Random cell groups: `1..=max_groups` groups of `1..=max_group_size` cells each
pub fn random_groups<R: Rng + ?Sized>(bounds: &Bounds, limits: BlobLimits, rng: &mut R) -> Vec<Vec<Coord>> {
    let group_count = rng.gen_range(1..=limits.max_groups);

    (0..group_count)
        .map(|_| {
            let size = rng.gen_range(1..=limits.max_group_size);
            let anchor = random_anchor(bounds, rng);
            build_group(anchor, size, bounds.cell_size(), rng)
        })
        .collect()
}

/// Union of the groups as live cells, with every other in-bounds coordinate dead.
/// Cells outside `bounds` are kept in `alive`; the engine trims them.
pub fn seed_cells(groups: &[Vec<Coord>], bounds: &Bounds) -> CellSets {
    let alive: HashSet<Coord> = groups.iter().flatten().copied().collect();
    CellSets::backfilled(alive, bounds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::VecDeque;

    fn reachable_from_anchor(group: &[Coord], cell_size: i32) -> HashSet<Coord> {
        let members: HashSet<Coord> = group.iter().copied().collect();
        let mut seen = HashSet::from([group[0]]);
        let mut queue = VecDeque::from([group[0]]);

        while let Some((x, y)) = queue.pop_front() {
            for (dx, dy) in NEIGHBOR_OFFSETS {
                let next = (x + dx * cell_size, y + dy * cell_size);
                if members.contains(&next) && seen.insert(next) {
                    queue.push_back(next);
                }
            }
        }
        seen
    }

    #[test]
    fn test_random_grid_density() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = random_grid(60, 60, &mut rng);

        assert_eq!(grid.cells.len(), 3600);
        let density = grid.living_count() as f64 / 3600.0;
        assert!((0.4..0.6).contains(&density), "density {}", density);
    }

    #[test]
    fn test_random_grid_is_seeded() {
        let a = random_grid(20, 20, &mut StdRng::seed_from_u64(3));
        let b = random_grid(20, 20, &mut StdRng::seed_from_u64(3));
        assert_eq!(a, b);
    }

    #[test]
    fn test_anchor_is_aligned_and_in_bounds() {
        let bounds = Bounds::new(600, 400, 10).unwrap();
        let mut rng = StdRng::seed_from_u64(11);

        for _ in 0..500 {
            let anchor = random_anchor(&bounds, &mut rng);
            assert!(bounds.contains(anchor));
            assert_eq!(anchor.0 % 10, 0);
            assert_eq!(anchor.1 % 10, 0);
        }
    }

    #[test]
    fn test_group_has_requested_size_without_duplicates() {
        let mut rng = StdRng::seed_from_u64(5);
        for size in 1..=15 {
            let group = build_group((100, 100), size, 10, &mut rng);
            let unique: HashSet<Coord> = group.iter().copied().collect();
            assert_eq!(group.len(), size);
            assert_eq!(unique.len(), size);
            assert_eq!(group[0], (100, 100));
        }
    }

    #[test]
    fn test_large_group_survives_dead_ends() {
        // Long walks regularly box themselves in; backtracking keeps them going
        let mut rng = StdRng::seed_from_u64(99);
        let group = build_group((0, 0), 400, 1, &mut rng);
        assert_eq!(group.len(), 400);
        assert_eq!(reachable_from_anchor(&group, 1).len(), 400);
    }

    #[test]
    fn test_groups_are_connected_for_many_seeds() {
        let bounds = Bounds::new(600, 600, 10).unwrap();

        for seed in 0..200 {
            let mut rng = StdRng::seed_from_u64(seed);
            let groups = random_groups(&bounds, BlobLimits::default(), &mut rng);

            assert!((1..=20).contains(&groups.len()));
            for group in &groups {
                assert!((1..=15).contains(&group.len()));
                assert!(bounds.contains(group[0]));
                assert_eq!(
                    reachable_from_anchor(group, 10).len(),
                    group.len(),
                    "disconnected group for seed {}",
                    seed
                );
            }
        }
    }

    #[test]
    fn test_seed_cells_partition() {
        let bounds = Bounds::new(100, 100, 10).unwrap();
        let groups = vec![vec![(0, 0), (10, 10)], vec![(10, 10), (20, 10)]];
        let sets = seed_cells(&groups, &bounds);

        assert_eq!(sets.alive.len(), 3);
        assert_eq!(sets.dead.len(), 97);
        assert!(sets.overlap().is_empty());
    }
}
