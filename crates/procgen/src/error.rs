//! Errors raised while validating terrain parameters or packing output buffers.

use thiserror::Error;

/// Failure modes of terrain generation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TerrainError {
    /// Resolution must be a power of two and at least 2 so every level halves exactly.
    #[error("resolution {0} is not a power of two >= 2")]
    InvalidResolution(u32),
    /// Domain bounds must be finite with `min < max` on both axes.
    #[error("invalid domain [{min_x}, {max_x}] x [{min_y}, {max_y}]")]
    InvalidDomain {
        min_x: f32,
        max_x: f32,
        min_y: f32,
        max_y: f32,
    },
    /// 16-bit indices can address at most 65536 vertices.
    #[error("{vertices} vertices cannot be addressed with 16-bit indices")]
    IndexOverflow { vertices: usize },
}

pub type Result<T> = std::result::Result<T, TerrainError>;
