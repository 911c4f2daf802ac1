//! Square 2D height channel addressed by `(row, col)`.

use std::ops::{Index, IndexMut};

/// Row-major square grid of heights.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightMap {
    side: usize,
    heights: Vec<f32>,
}

impl HeightMap {
    /// Create a flat (all zero) height map with `side * side` samples.
    pub fn new(side: usize) -> Self {
        Self {
            side,
            heights: vec![0.0; side * side],
        }
    }

    /// Number of samples along one edge.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Height at `(row, col)`, or `None` outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.side && col < self.side {
            Some(self.heights[row * self.side + col])
        } else {
            None
        }
    }

    /// Set the height at `(row, col)`. Out-of-range writes are ignored and return `false`.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, height: f32) -> bool {
        if row < self.side && col < self.side {
            self.heights[row * self.side + col] = height;
            true
        } else {
            false
        }
    }

    /// Heights in row-major order.
    pub fn as_slice(&self) -> &[f32] {
        &self.heights
    }

    /// Apply `f` to every height.
    pub fn map_in_place(&mut self, f: impl Fn(f32) -> f32) {
        for h in &mut self.heights {
            *h = f(*h);
        }
    }

    /// Smallest and largest height. `(0.0, 0.0)` for an empty map.
    pub fn min_max(&self) -> (f32, f32) {
        if self.heights.is_empty() {
            return (0.0, 0.0);
        }
        self.heights
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &h| {
                (lo.min(h), hi.max(h))
            })
    }
}

impl Index<(usize, usize)> for HeightMap {
    type Output = f32;

    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        assert!(
            row < self.side && col < self.side,
            "height index ({}, {}) out of bounds for side {}",
            row,
            col,
            self.side
        );
        &self.heights[row * self.side + col]
    }
}

impl IndexMut<(usize, usize)> for HeightMap {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        assert!(
            row < self.side && col < self.side,
            "height index ({}, {}) out of bounds for side {}",
            row,
            col,
            self.side
        );
        &mut self.heights[row * self.side + col]
    }
}
