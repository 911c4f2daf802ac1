//! Regular vertex lattice and its triangle list.
//!
//! Vertices are laid out row-major: row `i` runs along Y, column `j` along X,
//! and vertex `(i, j)` has linear index `i * (n + 1) + j`.

use glam::Vec3;

use crate::error::{Result, TerrainError};
use crate::heightmap::HeightMap;

/// Rectangular XY extent covered by the grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Domain {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for Domain {
    fn default() -> Self {
        Self::new(-1.0, 1.0, -1.0, 1.0)
    }
}

impl Domain {
    pub fn new(min_x: f32, max_x: f32, min_y: f32, max_y: f32) -> Self {
        Self {
            min_x,
            max_x,
            min_y,
            max_y,
        }
    }

    /// Check bounds are finite and non-empty on both axes.
    pub fn validate(&self) -> Result<()> {
        let finite = [self.min_x, self.max_x, self.min_y, self.max_y]
            .iter()
            .all(|v| v.is_finite());
        if finite && self.min_x < self.max_x && self.min_y < self.max_y {
            Ok(())
        } else {
            Err(TerrainError::InvalidDomain {
                min_x: self.min_x,
                max_x: self.max_x,
                min_y: self.min_y,
                max_y: self.max_y,
            })
        }
    }

    pub fn width(&self) -> f32 {
        self.max_x - self.min_x
    }

    pub fn depth(&self) -> f32 {
        self.max_y - self.min_y
    }

    /// Check if an XY position lies inside the domain (edges included).
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Check that `resolution` is a power of two and at least 2.
pub fn validate_resolution(resolution: u32) -> Result<()> {
    if resolution >= 2 && resolution.is_power_of_two() {
        Ok(())
    } else {
        Err(TerrainError::InvalidResolution(resolution))
    }
}

/// Vertex lattice of `(n + 1)²` points with fixed XY and a mutable height channel.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    resolution: usize,
    domain: Domain,
    /// Height (Z) of every vertex; the only part of a position that changes.
    pub heights: HeightMap,
    faces: Vec<[u32; 3]>,
}

impl Grid {
    /// Build the flat lattice and its triangle list.
    ///
    /// `resolution` should be a power of two for the diamond-square pass to
    /// land exactly on unit squares; [`validate_resolution`] checks that.
    /// This constructor itself accepts any `resolution >= 1`.
    pub fn build(resolution: u32, domain: Domain) -> Self {
        let n = resolution as usize;
        let side = n + 1;

        let mut faces = Vec::with_capacity(2 * n * n);
        for i in 0..n {
            for j in 0..n {
                let bottom_left = (i * side + j) as u32;
                let bottom_right = bottom_left + 1;
                let top_left = bottom_left + side as u32;
                let top_right = top_left + 1;

                // Both triangles share the bottom-right/top-left edge and wind
                // counter-clockwise seen from +Z, so face normals point up.
                faces.push([bottom_left, bottom_right, top_left]);
                faces.push([bottom_right, top_right, top_left]);
            }
        }

        Self {
            resolution: n,
            domain,
            heights: HeightMap::new(side),
            faces,
        }
    }

    /// Cells per edge (`n`).
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Vertices per edge (`n + 1`).
    pub fn side(&self) -> usize {
        self.resolution + 1
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    pub fn vertex_count(&self) -> usize {
        self.side() * self.side()
    }

    pub fn triangle_count(&self) -> usize {
        self.faces.len()
    }

    /// Triangles as vertex-index triples, two per cell in row-major cell order.
    pub fn faces(&self) -> &[[u32; 3]] {
        &self.faces
    }

    /// Triangle indices as a flat array (`3 * triangle_count()` entries).
    pub fn indices(&self) -> &[u32] {
        bytemuck::cast_slice(&self.faces)
    }

    /// Grid spacing along X and Y.
    pub fn step(&self) -> (f32, f32) {
        let n = self.resolution as f32;
        (self.domain.width() / n, self.domain.depth() / n)
    }

    /// Linear vertex index of `(row, col)`.
    #[inline]
    pub fn vertex_index(&self, row: usize, col: usize) -> usize {
        row * self.side() + col
    }

    /// Position of the vertex at `(row, col)`.
    pub fn position(&self, row: usize, col: usize) -> Vec3 {
        let (dx, dy) = self.step();
        Vec3::new(
            self.domain.min_x + dx * col as f32,
            self.domain.min_y + dy * row as f32,
            self.heights[(row, col)],
        )
    }

    /// All vertex positions in row-major order.
    pub fn positions(&self) -> Vec<Vec3> {
        let side = self.side();
        let mut positions = Vec::with_capacity(side * side);
        for row in 0..side {
            for col in 0..side {
                positions.push(self.position(row, col));
            }
        }
        positions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_counts_match_resolution() {
        for n in [2u32, 4, 8, 16, 64] {
            let grid = Grid::build(n, Domain::default());
            let n = n as usize;
            assert_eq!(grid.vertex_count(), (n + 1) * (n + 1));
            assert_eq!(grid.positions().len(), (n + 1) * (n + 1));
            assert_eq!(grid.triangle_count(), 2 * n * n);
            assert_eq!(grid.indices().len(), 6 * n * n);
            let v = grid.vertex_count() as u32;
            assert!(grid.indices().iter().all(|&i| i < v));
        }
    }

    #[test]
    fn grid_positions_interpolate_domain() {
        let grid = Grid::build(4, Domain::new(-2.0, 2.0, 0.0, 8.0));
        let first = grid.position(0, 0);
        assert_eq!(first, Vec3::new(-2.0, 0.0, 0.0));
        let last = grid.position(4, 4);
        assert_eq!(last, Vec3::new(2.0, 8.0, 0.0));
        // Row advances Y, column advances X
        assert_eq!(grid.position(1, 0), Vec3::new(-2.0, 2.0, 0.0));
        assert_eq!(grid.position(0, 1), Vec3::new(-1.0, 0.0, 0.0));
        assert_eq!(grid.positions()[grid.vertex_index(1, 3)], grid.position(1, 3));
    }

    #[test]
    fn grid_first_cell_triangles() {
        let grid = Grid::build(2, Domain::default());
        // Corners of cell (0, 0): bl=0, br=1, tl=3, tr=4
        assert_eq!(grid.faces()[0], [0, 1, 3]);
        assert_eq!(grid.faces()[1], [1, 4, 3]);
        assert_eq!(&grid.indices()[..6], &[0, 1, 3, 1, 4, 3]);
    }

    #[test]
    fn grid_build_is_idempotent() {
        let a = Grid::build(8, Domain::new(-3.0, 5.0, -1.0, 1.0));
        let b = Grid::build(8, Domain::new(-3.0, 5.0, -1.0, 1.0));
        assert_eq!(a, b);
        assert_eq!(a.indices(), b.indices());
    }

    #[test]
    fn resolution_validation() {
        assert!(validate_resolution(2).is_ok());
        assert!(validate_resolution(128).is_ok());
        assert_eq!(validate_resolution(0), Err(TerrainError::InvalidResolution(0)));
        assert_eq!(validate_resolution(1), Err(TerrainError::InvalidResolution(1)));
        assert_eq!(validate_resolution(6), Err(TerrainError::InvalidResolution(6)));
    }

    #[test]
    fn domain_validation() {
        assert!(Domain::default().validate().is_ok());
        assert!(Domain::new(1.0, 1.0, 0.0, 1.0).validate().is_err());
        assert!(Domain::new(0.0, 1.0, 2.0, -2.0).validate().is_err());
        assert!(Domain::new(f32::NAN, 1.0, 0.0, 1.0).validate().is_err());
        assert!(Domain::new(0.0, f32::INFINITY, 0.0, 1.0).validate().is_err());
    }
}
