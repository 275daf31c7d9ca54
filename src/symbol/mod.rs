//! Symbol matrix construction
//!
//! The symbol is built as a grid of modules carrying a dark/light value plus
//! a "fixed" flag marking function patterns that masking must not touch.
//! `regular` places the function patterns and the data stream; this module
//! owns the grid itself, masking, the penalty rules and bitmap export.

pub mod regular;

use crate::models::{BitMatrix, MaskPattern};

/// Module grid under construction, quiet zone included.
///
/// Coordinates address the symbol proper; the quiet zone is an all-light
/// border handled by the accessor offset, as wide as requested at build time.
#[derive(Debug, Clone)]
pub struct Symbol {
    size: usize,
    quiet_zone: usize,
    modules: Vec<bool>,
    fixed: Vec<bool>,
    filled: Vec<bool>,
}

impl Symbol {
    /// Create an all-light, all-unfilled symbol
    pub fn new(size: usize, quiet_zone: usize) -> Self {
        let side = size + 2 * quiet_zone;
        Self {
            size,
            quiet_zone,
            modules: vec![false; side * side],
            fixed: vec![false; side * side],
            filled: vec![false; side * side],
        }
    }

    /// Symbol side length in modules, excluding the quiet zone
    pub fn size(&self) -> usize {
        self.size
    }

    /// Quiet zone width in modules
    pub fn quiet_zone(&self) -> usize {
        self.quiet_zone
    }

    fn index(&self, x: usize, y: usize) -> usize {
        let side = self.size + 2 * self.quiet_zone;
        (y + self.quiet_zone) * side + (x + self.quiet_zone)
    }

    /// Module value at symbol coordinates (x, y)
    pub fn get(&self, x: usize, y: usize) -> bool {
        self.modules[self.index(x, y)]
    }

    /// True if the module belongs to a function pattern
    pub fn is_fixed(&self, x: usize, y: usize) -> bool {
        self.fixed[self.index(x, y)]
    }

    /// True if the module has been assigned a value
    pub fn is_filled(&self, x: usize, y: usize) -> bool {
        self.filled[self.index(x, y)]
    }

    /// Set a function module: fixed, exempt from masking.
    ///
    /// Reserved format/version slots are fixed first and overwritten with
    /// their final values per mask candidate, so re-setting is allowed.
    pub fn set_function(&mut self, x: usize, y: usize, dark: bool) {
        let index = self.index(x, y);
        self.modules[index] = dark;
        self.fixed[index] = true;
        self.filled[index] = true;
    }

    /// Set a data module
    pub fn set_data(&mut self, x: usize, y: usize, dark: bool) {
        let index = self.index(x, y);
        self.modules[index] = dark;
        self.filled[index] = true;
    }

    /// Number of modules never assigned a value; zero for a complete symbol
    pub fn empty_count(&self) -> usize {
        let mut count = 0;
        for y in 0..self.size {
            for x in 0..self.size {
                if !self.is_filled(x, y) {
                    count += 1;
                }
            }
        }
        count
    }

    /// XOR every non-fixed module with the mask evaluated at its (row, col)
    pub fn apply_mask(&mut self, mask: MaskPattern) {
        for y in 0..self.size {
            for x in 0..self.size {
                let index = self.index(x, y);
                if !self.fixed[index] && mask.is_masked(y, x) {
                    self.modules[index] = !self.modules[index];
                }
            }
        }
    }

    /// Total penalty score over the four rules; lower is better
    pub fn penalty(&self) -> u32 {
        self.penalty1() + self.penalty2() + self.penalty3() + self.penalty4()
    }

    /// Rule 1: runs of 5 or more same-colored modules in a row or column
    /// score run length minus 2
    pub(crate) fn penalty1(&self) -> u32 {
        let mut penalty = 0;
        for i in 0..self.size {
            penalty += self.run_penalty(|j| self.get(j, i));
            penalty += self.run_penalty(|j| self.get(i, j));
        }
        penalty
    }

    fn run_penalty(&self, value_at: impl Fn(usize) -> bool) -> u32 {
        let mut penalty = 0;
        let mut last = value_at(0);
        let mut run = 1u32;
        for j in 1..self.size {
            let value = value_at(j);
            if value == last {
                run += 1;
                if run == 5 {
                    penalty += 3;
                } else if run > 5 {
                    penalty += 1;
                }
            } else {
                last = value;
                run = 1;
            }
        }
        penalty
    }

    /// Rule 2: every same-colored 2x2 block scores 3, overlaps included
    pub(crate) fn penalty2(&self) -> u32 {
        let mut penalty = 0;
        for y in 0..self.size - 1 {
            for x in 0..self.size - 1 {
                let color = self.get(x, y);
                if color == self.get(x + 1, y)
                    && color == self.get(x, y + 1)
                    && color == self.get(x + 1, y + 1)
                {
                    penalty += 3;
                }
            }
        }
        penalty
    }

    /// Rule 3: each finder-like 1:1:3:1:1 run with a 4-module light flank
    /// in a row or column scores 40
    pub(crate) fn penalty3(&self) -> u32 {
        const PATTERN_A: [bool; 11] = [
            true, false, true, true, true, false, true, false, false, false, false,
        ];
        const PATTERN_B: [bool; 11] = [
            false, false, false, false, true, false, true, true, true, false, true,
        ];

        let mut penalty = 0;
        for i in 0..self.size {
            for start in 0..self.size.saturating_sub(10) {
                let row_matches = |pattern: &[bool; 11]| {
                    (0..11).all(|k| self.get(start + k, i) == pattern[k])
                };
                let col_matches = |pattern: &[bool; 11]| {
                    (0..11).all(|k| self.get(i, start + k) == pattern[k])
                };
                if row_matches(&PATTERN_A) || row_matches(&PATTERN_B) {
                    penalty += 40;
                }
                if col_matches(&PATTERN_A) || col_matches(&PATTERN_B) {
                    penalty += 40;
                }
            }
        }
        penalty
    }

    /// Rule 4: deviation of the dark-module ratio from 50%, in steps of 5%
    pub(crate) fn penalty4(&self) -> u32 {
        let total = (self.size * self.size) as i64;
        let mut dark = 0i64;
        for y in 0..self.size {
            for x in 0..self.size {
                if self.get(x, y) {
                    dark += 1;
                }
            }
        }
        let k = (100 * dark - 50 * total).abs() / (5 * total);
        10 * k as u32
    }

    /// Flatten to the emitted module matrix, quiet zone included
    pub fn to_matrix(&self) -> BitMatrix {
        let side = self.size + 2 * self.quiet_zone;
        let mut matrix = BitMatrix::new(side);
        for y in 0..self.size {
            for x in 0..self.size {
                if self.get(x, y) {
                    matrix.set(x + self.quiet_zone, y + self.quiet_zone, true);
                }
            }
        }
        matrix
    }
}
