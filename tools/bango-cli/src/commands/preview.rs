//! Write an SVG preview.

use std::path::PathBuf;

use bango_common::config::AppConfig;
use bango_poster_model::RenderMode;
use bango_render_engine::assets::inline_local_images;
use bango_render_engine::{preview_document, render, SvgOptions};

use super::load_editor;

pub async fn run(
    config: &AppConfig,
    state: Option<PathBuf>,
    output: PathBuf,
    viewport: u32,
    inline: bool,
) -> anyhow::Result<()> {
    let editor = load_editor(state.as_deref())?;

    let svg = if inline {
        let mut tree = render(editor.state(), RenderMode::Preview);
        let inlined = inline_local_images(&mut tree, &config.export.asset_root).await?;
        tracing::debug!(inlined, "Embedded preview images");
        tree.to_svg(&SvgOptions::preview(viewport).pretty())
    } else {
        preview_document(editor.state(), viewport)
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&output, svg)?;
    println!("Preview ({viewport}x{viewport}) written to {}", output.display());
    Ok(())
}
