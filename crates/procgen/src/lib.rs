//! Procedural terrain generation: a diamond-square heightmap over a regular
//! grid, with triangle indices, per-vertex normals and a wireframe edge list.

pub mod diamond_square;
pub mod edges;
pub mod error;
pub mod grid;
pub mod heightmap;
pub mod normals;
pub mod terrain;

pub use diamond_square::*;
pub use edges::*;
pub use error::*;
pub use grid::*;
pub use heightmap::*;
pub use normals::*;
pub use terrain::*;
