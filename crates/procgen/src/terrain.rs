//! Terrain generation pipeline and its render-facing output arrays.
//!
//! Build the grid, displace heights with diamond-square, then derive vertex
//! normals and a wireframe edge list. Everything is produced once and kept
//! in a [`Terrain`] value; the rendering side only reads it.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

use crate::diamond_square::{DiamondSquare, Displacement, RngDisplacement, DEFAULT_ROUGHNESS};
use crate::edges::{extract_edges, EdgeMode};
use crate::error::{Result, TerrainError};
use crate::grid::{validate_resolution, Domain, Grid};
use crate::normals::vertex_normals;

/// Interleaved vertex for upload into a single vertex buffer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct TerrainVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Configuration for terrain generation.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainConfig {
    /// Cells per edge; must be a power of two >= 2.
    pub resolution: u32,
    /// XY extent of the mesh.
    pub domain: Domain,
    /// Displacement per unit of sub-square size (lower = smoother).
    pub roughness: f32,
    /// Seed for random generation. None = different terrain every run.
    pub seed: Option<u64>,
    /// Whether the wireframe keeps duplicate shared edges.
    pub edge_mode: EdgeMode,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            resolution: 128,
            domain: Domain::default(),
            roughness: DEFAULT_ROUGHNESS,
            seed: None,
            edge_mode: EdgeMode::All,
        }
    }
}

impl TerrainConfig {
    pub fn validate(&self) -> Result<()> {
        validate_resolution(self.resolution)?;
        self.domain.validate()
    }
}

/// Generated terrain: positions, normals, triangle indices and edges.
#[derive(Debug, Clone)]
pub struct Terrain {
    pub config: TerrainConfig,
    grid: Grid,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    edges: Vec<[u32; 2]>,
}

impl Terrain {
    /// Generate terrain, drawing displacement from `config.seed` (or the OS if unset).
    pub fn generate(config: TerrainConfig) -> Result<Self> {
        match config.seed {
            Some(seed) => Self::generate_with(config, &mut RngDisplacement::seeded(seed)),
            None => Self::generate_with(config, &mut RngDisplacement::from_entropy()),
        }
    }

    /// Generate terrain with an explicit displacement source.
    pub fn generate_with<D: Displacement>(config: TerrainConfig, source: &mut D) -> Result<Self> {
        config.validate()?;

        let mut grid = Grid::build(config.resolution, config.domain);
        DiamondSquare::new(config.roughness).run(&mut grid.heights, source);

        let positions = grid.positions();
        let normals = vertex_normals(&positions, grid.faces());
        let edges = extract_edges(grid.faces(), config.edge_mode);

        log::info!(
            "Generated {} triangles ({} vertices, {} edges) at resolution {}",
            grid.triangle_count(),
            grid.vertex_count(),
            edges.len(),
            config.resolution
        );

        Ok(Self {
            config,
            grid,
            positions,
            normals,
            edges,
        })
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.grid.triangle_count()
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Positions as interleaved `x, y, z` floats in row-major grid order.
    pub fn positions_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.positions)
    }

    /// Normals as interleaved `x, y, z` floats, parallel to [`Self::positions_flat`].
    pub fn normals_flat(&self) -> &[f32] {
        bytemuck::cast_slice(&self.normals)
    }

    /// Triangle indices, three per triangle.
    pub fn indices(&self) -> &[u32] {
        self.grid.indices()
    }

    /// Edge indices, two per edge.
    pub fn edges(&self) -> &[u32] {
        bytemuck::cast_slice(&self.edges)
    }

    pub fn edge_pairs(&self) -> &[[u32; 2]] {
        &self.edges
    }

    /// Interleaved position + normal vertices.
    pub fn vertices(&self) -> Vec<TerrainVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| TerrainVertex {
                position: p.to_array(),
                normal: n.to_array(),
            })
            .collect()
    }

    /// Triangle indices narrowed to 16 bits. Fails above 65536 vertices.
    pub fn indices_u16(&self) -> Result<Vec<u16>> {
        self.narrow(self.indices())
    }

    /// Edge indices narrowed to 16 bits. Fails above 65536 vertices.
    pub fn edges_u16(&self) -> Result<Vec<u16>> {
        self.narrow(self.edges())
    }

    fn narrow(&self, indices: &[u32]) -> Result<Vec<u16>> {
        let vertices = self.vertex_count();
        if vertices > u16::MAX as usize + 1 {
            return Err(TerrainError::IndexOverflow { vertices });
        }
        Ok(indices.iter().map(|&i| i as u16).collect())
    }

    /// Lowest and highest final height.
    pub fn height_range(&self) -> (f32, f32) {
        self.grid.heights.min_max()
    }

    /// Height at a domain position, interpolated on the same triangle split as the mesh.
    /// Positions outside the domain are clamped to its edge.
    pub fn sample_height(&self, x: f32, y: f32) -> f32 {
        let n = self.grid.resolution();
        let domain = self.grid.domain();
        let (dx, dy) = self.grid.step();

        let gx = ((x - domain.min_x) / dx).clamp(0.0, n as f32);
        let gy = ((y - domain.min_y) / dy).clamp(0.0, n as f32);

        let col = (gx.floor() as usize).min(n - 1);
        let row = (gy.floor() as usize).min(n - 1);
        let fx = gx - col as f32;
        let fy = gy - row as f32;

        let h = &self.grid.heights;
        let bottom_left = h[(row, col)];
        let bottom_right = h[(row, col + 1)];
        let top_left = h[(row + 1, col)];
        let top_right = h[(row + 1, col + 1)];

        // Cells split along the bottom-right/top-left edge.
        if fx + fy <= 1.0 {
            bottom_left + fx * (bottom_right - bottom_left) + fy * (top_left - bottom_left)
        } else {
            top_right
                + (1.0 - fx) * (top_left - top_right)
                + (1.0 - fy) * (bottom_right - top_right)
        }
    }
}
