//! Check system capabilities.

use bango_common::config::{config_file_path, AppConfig};
use bango_copywriter::{CropName, KNOWN_REGIONS};
use bango_render_engine::{Rasterizer, SvgCommandRasterizer};

pub fn run(config: &AppConfig) -> anyhow::Result<()> {
    println!("Bango System Check");
    println!("{}", "=".repeat(50));

    let config_path = config_file_path();
    if config_path.exists() {
        println!("[OK] Config: {}", config_path.display());
    } else {
        println!("[INFO] Config: defaults ({} not found)", config_path.display());
    }

    let rasterizer = SvgCommandRasterizer::new(config.export.rasterizer_program.clone());
    let rasterizer_ok = rasterizer.is_available();
    if rasterizer_ok {
        println!("[OK] Rasterizer: {}", rasterizer.name());
    } else {
        println!(
            "[FAIL] Rasterizer: {} not found (install librsvg, e.g. `apt install librsvg2-bin`)",
            rasterizer.name()
        );
    }

    let asset_root = &config.export.asset_root;
    if asset_root.is_dir() {
        println!("[OK] Asset root: {}", asset_root.display());
    } else {
        println!("[WARN] Asset root: {} does not exist", asset_root.display());
    }

    println!(
        "[OK] Vocabulary: {} crops, {} regions",
        CropName::ALL.len(),
        KNOWN_REGIONS.len()
    );

    println!();
    if rasterizer_ok {
        println!("All required capabilities are available. Bango is ready.");
    } else {
        println!("PNG export is unavailable. Previews still work.");
    }

    Ok(())
}
