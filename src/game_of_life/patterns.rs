//! Well-known patterns that can replace random seeding

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    /// 2x2 still life
    Block,
    /// Period 2 oscillator, starts horizontal
    Blinker,
    /// Moves one cell diagonally every 4 generations
    Glider,
    /// Period 2 oscillator made of two blocks
    Beacon,
}

impl Pattern {
    fn rows(self) -> &'static [&'static str] {
        match self {
            Pattern::Block => &["11", "11"],
            Pattern::Blinker => &["111"],
            Pattern::Glider => &["010", "001", "111"],
            Pattern::Beacon => &["1100", "1100", "0011", "0011"],
        }
    }

    /// `(width, height)` of the pattern's bounding box
    pub fn size(self) -> (usize, usize) {
        let rows = self.rows();
        (rows[0].len(), rows.len())
    }

    /// Live cells relative to the top-left corner of the bounding box
    pub fn cells(self) -> Vec<(usize, usize)> {
        self.rows()
            .iter()
            .enumerate()
            .flat_map(|(y, row)| {
                row.chars()
                    .enumerate()
                    .filter(|&(_, ch)| ch == '1')
                    .map(move |(x, _)| (x, y))
            })
            .collect()
    }

    /// Live cells placed so the bounding box sits in the middle of a `width x height` grid.
    /// Returns `None` when the pattern does not fit.
    pub fn centered(self, width: usize, height: usize) -> Option<Vec<(usize, usize)>> {
        let (pw, ph) = self.size();
        if pw > width || ph > height {
            return None;
        }
        let (ox, oy) = ((width - pw) / 2, (height - ph) / 2);
        Some(self.cells().into_iter().map(|(x, y)| (x + ox, y + oy)).collect())
    }
}
