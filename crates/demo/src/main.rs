//! Headless terrain demo: generates the terrain once and reports what a
//! renderer would upload.

mod config;

use anyhow::{Context, Result};
use config::DemoConfig;
use procgen::Terrain;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = DemoConfig::load();
    if !config::config_path().exists() {
        settings.save();
    }
    log::info!("Terrain settings: {:?}", settings);

    let terrain = Terrain::generate(settings.terrain_config())
        .context("Failed to generate terrain")?;

    let (lo, hi) = terrain.height_range();
    log::info!(
        "Buffers: {} position floats, {} normal floats, {} triangle indices, {} edge indices",
        terrain.positions_flat().len(),
        terrain.normals_flat().len(),
        terrain.indices().len(),
        terrain.edges().len()
    );
    log::info!("Height range [{:.3}, {:.3}]", lo, hi);

    match (terrain.indices_u16(), terrain.edges_u16()) {
        (Ok(tris), Ok(lines)) => {
            log::info!("16-bit indices: {} triangle, {} edge", tris.len(), lines.len())
        }
        (Err(e), _) | (_, Err(e)) => log::warn!("Falling back to 32-bit indices: {}", e),
    }

    let domain = terrain.grid().domain();
    let cx = (domain.min_x + domain.max_x) * 0.5;
    let cy = (domain.min_y + domain.max_y) * 0.5;
    log::info!("Height at domain center: {:.3}", terrain.sample_height(cx, cy));

    Ok(())
}
