//! Demo settings. Loaded from terrain.ron at startup.

use procgen::{Domain, EdgeMode, TerrainConfig, DEFAULT_ROUGHNESS};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Persistent terrain settings. Loaded from `terrain.ron` in the current directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemoConfig {
    /// Cells per edge (power of two).
    #[serde(default = "default_resolution")]
    pub resolution: u32,
    /// Domain bounds `[min_x, max_x, min_y, max_y]`.
    #[serde(default = "default_domain")]
    pub domain: [f32; 4],
    /// Roughness coefficient (lower = smoother).
    #[serde(default = "default_roughness")]
    pub roughness: f32,
    /// Fixed seed for reproducible terrain. None = new terrain every run.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Drop duplicate shared edges from the wireframe.
    #[serde(default)]
    pub unique_edges: bool,
}

fn default_resolution() -> u32 {
    128
}
fn default_domain() -> [f32; 4] {
    [-1.0, 1.0, -1.0, 1.0]
}
fn default_roughness() -> f32 {
    DEFAULT_ROUGHNESS
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            resolution: default_resolution(),
            domain: default_domain(),
            roughness: default_roughness(),
            seed: None,
            unique_edges: false,
        }
    }
}

impl DemoConfig {
    /// Load config from `terrain.ron`. If the file is missing or invalid, returns default config.
    pub fn load() -> Self {
        Self::load_from(&config_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if let Ok(data) = std::fs::read_to_string(path) {
            match ron::from_str(&data) {
                Ok(c) => return c,
                Err(e) => log::warn!("Invalid config at {:?}: {}, using defaults", path, e),
            }
        }
        Self::default()
    }

    /// Save current config to `terrain.ron`. Logs on error.
    pub fn save(&self) {
        let path = config_path();
        match ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default()) {
            Ok(s) => {
                if let Err(e) = std::fs::write(&path, s) {
                    log::warn!("Could not write config to {:?}: {}", path, e);
                }
            }
            Err(e) => log::warn!("Could not serialize config: {}", e),
        }
    }

    pub fn terrain_config(&self) -> TerrainConfig {
        let [min_x, max_x, min_y, max_y] = self.domain;
        TerrainConfig {
            resolution: self.resolution,
            domain: Domain::new(min_x, max_x, min_y, max_y),
            roughness: self.roughness,
            seed: self.seed,
            edge_mode: if self.unique_edges {
                EdgeMode::Unique
            } else {
                EdgeMode::All
            },
        }
    }
}

pub fn config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("terrain.ron")
}
