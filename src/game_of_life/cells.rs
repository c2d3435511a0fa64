//! Sparse cell sets addressed by pixel-aligned coordinates

use crate::error::ConfigurationError;
use itertools::iproduct;
use std::collections::HashSet;

/// `(x, y)` in pixel units; in-bounds coordinates are multiples of the cell size
pub type Coord = (i32, i32);

/// Non-zero offsets of the Moore neighborhood, in cell units
pub const NEIGHBOR_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1),
    (-1, 0), (1, 0),
    (-1, 1), (0, 1), (1, 1),
];

/// The visible area of a sparse universe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    screen_width: i32,
    screen_height: i32,
    cell_size: i32,
}

impl Bounds {
    pub fn new(screen_width: i32, screen_height: i32, cell_size: i32) -> Result<Self, ConfigurationError> {
        if screen_width <= 0 || screen_height <= 0 {
            return Err(ConfigurationError::NonPositiveScreen {
                width: screen_width,
                height: screen_height,
            });
        }
        if cell_size <= 0 {
            return Err(ConfigurationError::NonPositiveCellSize(cell_size));
        }
        if screen_width % cell_size != 0 || screen_height % cell_size != 0 {
            return Err(ConfigurationError::UnevenCellSize {
                width: screen_width,
                height: screen_height,
                cell_size,
            });
        }

        Ok(Self {
            screen_width,
            screen_height,
            cell_size,
        })
    }

    pub fn cell_size(&self) -> i32 {
        self.cell_size
    }

    /// Number of cell columns in the visible area
    pub fn columns(&self) -> usize {
        (self.screen_width / self.cell_size) as usize
    }

    /// Number of cell rows in the visible area
    pub fn rows(&self) -> usize {
        (self.screen_height / self.cell_size) as usize
    }

    pub fn contains(&self, (x, y): Coord) -> bool {
        (0..self.screen_width).contains(&x) && (0..self.screen_height).contains(&y)
    }

    /// In bounds and on a cell origin
    pub fn holds(&self, coord: Coord) -> bool {
        self.contains(coord) && coord.0 % self.cell_size == 0 && coord.1 % self.cell_size == 0
    }

    /// Pixel coordinate of the cell at column `col`, row `row`
    pub fn to_coord(&self, col: usize, row: usize) -> Coord {
        (col as i32 * self.cell_size, row as i32 * self.cell_size)
    }

    /// Column and row of an in-bounds coordinate
    pub fn to_cell(&self, (x, y): Coord) -> Option<(usize, usize)> {
        if !self.contains((x, y)) {
            return None;
        }
        Some(((x / self.cell_size) as usize, (y / self.cell_size) as usize))
    }

    /// Every grid-aligned coordinate in the visible area
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        iproduct!(0..self.rows(), 0..self.columns()).map(move |(row, col)| self.to_coord(col, row))
    }
}

/// Count live coordinates among the 8 neighbors of `(x, y)`.
///
/// There is no wraparound: neighbors outside the visible area are never in `alive`
/// once out-of-bounds cells are removed, so they count as dead.
pub fn count_live_neighbors(alive: &HashSet<Coord>, (x, y): Coord, cell_size: i32) -> u8 {
    NEIGHBOR_OFFSETS
        .iter()
        .filter(|(dx, dy)| alive.contains(&(x + dx * cell_size, y + dy * cell_size)))
        .count() as u8
}

/// Disjoint live and dead coordinate sets
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellSets {
    pub alive: HashSet<Coord>,
    pub dead: HashSet<Coord>,
}

impl CellSets {
    /// Every in-bounds coordinate of `bounds` not in `alive` becomes dead
    pub fn backfilled(alive: HashSet<Coord>, bounds: &Bounds) -> Self {
        let dead = bounds.coords().filter(|coord| !alive.contains(coord)).collect();
        Self { alive, dead }
    }

    /// Coordinates present in both sets; empty for a well-formed state
    pub fn overlap(&self) -> Vec<Coord> {
        let mut overlap: Vec<Coord> = self.alive.intersection(&self.dead).copied().collect();
        overlap.sort_unstable();
        overlap
    }

    /// Live plus dead coordinates
    pub fn coordinate_count(&self) -> usize {
        self.alive.len() + self.dead.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_validation() {
        assert!(Bounds::new(600, 600, 10).is_ok());
        assert_eq!(
            Bounds::new(0, 600, 10),
            Err(ConfigurationError::NonPositiveScreen { width: 0, height: 600 })
        );
        assert_eq!(Bounds::new(600, 600, 0), Err(ConfigurationError::NonPositiveCellSize(0)));
        assert_eq!(Bounds::new(600, 600, -5), Err(ConfigurationError::NonPositiveCellSize(-5)));
        assert!(matches!(
            Bounds::new(605, 600, 10),
            Err(ConfigurationError::UnevenCellSize { .. })
        ));
    }

    #[test]
    fn test_bounds_geometry() {
        let bounds = Bounds::new(60, 40, 10).unwrap();
        assert_eq!(bounds.columns(), 6);
        assert_eq!(bounds.rows(), 4);
        assert_eq!(bounds.coords().count(), 24);
        assert!(bounds.contains((50, 30)));
        assert!(!bounds.contains((60, 30)));
        assert!(!bounds.contains((-10, 0)));
        assert_eq!(bounds.to_coord(2, 3), (20, 30));
        assert_eq!(bounds.to_cell((20, 30)), Some((2, 3)));
        assert_eq!(bounds.to_cell((20, 40)), None);
        assert!(bounds.holds((50, 30)));
        assert!(!bounds.holds((15, 30)));
        assert!(!bounds.holds((60, 30)));
    }

    #[test]
    fn test_count_live_neighbors() {
        let alive: HashSet<Coord> = [(0, 0), (10, 0), (20, 0), (10, 20)].into_iter().collect();

        assert_eq!(count_live_neighbors(&alive, (10, 10), 10), 4);
        // The cell itself is never counted
        assert_eq!(count_live_neighbors(&alive, (10, 0), 10), 2);
        // Neighbors must be exactly one cell away
        assert_eq!(count_live_neighbors(&alive, (10, 10), 5), 0);
    }

    #[test]
    fn test_no_wraparound() {
        let bounds = Bounds::new(30, 30, 10).unwrap();
        let alive: HashSet<Coord> = [(0, 0)].into_iter().collect();
        let sets = CellSets::backfilled(alive, &bounds);

        assert_eq!(count_live_neighbors(&sets.alive, (20, 0), 10), 0);
        assert_eq!(count_live_neighbors(&sets.alive, (20, 20), 10), 0);
        assert_eq!(count_live_neighbors(&sets.alive, (10, 10), 10), 1);
    }

    #[test]
    fn test_backfill_covers_bounds() {
        let bounds = Bounds::new(40, 30, 10).unwrap();
        let alive: HashSet<Coord> = [(0, 0), (30, 20)].into_iter().collect();
        let sets = CellSets::backfilled(alive, &bounds);

        assert_eq!(sets.coordinate_count(), 12);
        assert_eq!(sets.dead.len(), 10);
        assert!(sets.overlap().is_empty());
    }
}
