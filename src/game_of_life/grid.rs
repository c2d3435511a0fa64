//! Dense toroidal grid representation for Game of Life

use anyhow::Result;
use std::str::FromStr;

/// A fixed-size grid of cell states whose edges wrap around
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    pub cells: Vec<bool>,
}

impl Grid {
    /// Create a new empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Create a grid from rows of cell states
    fn from_cells(cells: Vec<Vec<bool>>) -> Result<Self> {
        if cells.is_empty() {
            anyhow::bail!("Grid cannot be empty");
        }

        let height = cells.len();
        let width = cells[0].len();

        if width == 0 {
            anyhow::bail!("Grid width cannot be zero");
        }

        for (i, row) in cells.iter().enumerate() {
            if row.len() != width {
                anyhow::bail!("Row {} has length {}, expected {}", i, row.len(), width);
            }
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Create a grid with only the given `(x, y)` cells alive; cells off the grid are skipped
    pub fn with_living(width: usize, height: usize, living: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(width, height);
        for &(x, y) in living.iter().filter(|&&(x, y)| x < width && y < height) {
            let idx = grid.index(x, y);
            grid.cells[idx] = true;
        }
        grid
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Get cell value at column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> bool {
        if x < self.width && y < self.height {
            self.cells[self.index(x, y)]
        } else {
            false
        }
    }

    /// Count living cells in the Moore neighborhood of `(x, y)`.
    ///
    /// Coordinates wrap modulo the grid dimensions, so the right edge touches the left and
    /// the bottom touches the top. On grids narrower than 3 cells an offset can wrap back onto
    /// the cell itself or onto an already counted neighbor; engines reject such sizes.
    pub fn count_neighbors(&self, x: usize, y: usize) -> u8 {
        let mut count = 0;

        for dy in [-1isize, 0, 1] {
            for dx in [-1isize, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }

                let nx = (x as isize + dx).rem_euclid(self.width as isize) as usize;
                let ny = (y as isize + dy).rem_euclid(self.height as isize) as usize;

                if self.cells[self.index(nx, ny)] {
                    count += 1;
                }
            }
        }

        count
    }

    /// Get all living cell coordinates as `(x, y)`, row by row
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        let mut living = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get(x, y) {
                    living.push((x, y));
                }
            }
        }
        living
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }
}

/// Parses rows of `0` (dead) and `1` (alive); blank lines are skipped
impl FromStr for Grid {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> Result<Self> {
        let lines: Vec<&str> = content
            .lines()
            .map(|line| line.trim())
            .filter(|line| !line.is_empty())
            .collect();

        if lines.is_empty() {
            anyhow::bail!("Grid text contains no rows");
        }

        let mut cells = Vec::with_capacity(lines.len());
        for (row_idx, line) in lines.iter().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (col_idx, ch) in line.chars().enumerate() {
                match ch {
                    '0' => row.push(false),
                    '1' => row.push(true),
                    _ => anyhow::bail!(
                        "Invalid character '{}' at position ({}, {}). Only '0' and '1' are allowed",
                        ch, col_idx, row_idx
                    ),
                }
            }
            cells.push(row);
        }

        Self::from_cells(cells)
    }
}
