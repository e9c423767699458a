//! Export the poster to PNG.

use std::io::Write;
use std::path::PathBuf;

use bango_common::config::AppConfig;
use bango_poster_model::UploadSlot;
use bango_render_engine::{
    export_poster, upload_image, ExportJob, ExportProgress, ProgressCallback,
    SvgCommandRasterizer,
};

use super::{load_editor, print_notices};

pub struct ExportArgs {
    pub output_dir: Option<PathBuf>,
    pub scale: Option<f64>,
    pub rasterizer: Option<String>,
    pub asset_root: Option<PathBuf>,
    pub background: Option<PathBuf>,
    pub top_left_logo: Option<PathBuf>,
    pub top_right_logo: Option<PathBuf>,
}

pub async fn run(
    config: &AppConfig,
    state: Option<PathBuf>,
    args: ExportArgs,
) -> anyhow::Result<()> {
    let mut editor = load_editor(state.as_deref())?;

    let uploads = [
        (UploadSlot::Background, args.background),
        (UploadSlot::TopLeftLogo, args.top_left_logo),
        (UploadSlot::TopRightLogo, args.top_right_logo),
    ];
    for (slot, path) in uploads {
        if upload_image(&mut editor, slot, path.as_deref()).await.is_err() {
            print_notices(&mut editor);
            return Err(anyhow::anyhow!("Image upload failed"));
        }
    }

    let mut job = ExportJob::from(&config.export);
    if let Some(dir) = args.output_dir {
        job.output_dir = dir;
    }
    if let Some(scale) = args.scale {
        job.scale_factor = scale;
    }
    if let Some(root) = args.asset_root {
        job.asset_root = root;
    }
    let program = args
        .rasterizer
        .unwrap_or_else(|| config.export.rasterizer_program.clone());
    let mut rasterizer = SvgCommandRasterizer::new(program);

    println!("Exporting poster");
    println!("  Output: {}", job.output_path().display());
    println!("  Scale: {}x", job.scale_factor);

    let progress_cb: ProgressCallback = Box::new(|p: ExportProgress| {
        print!("\r  Progress: {:>3.0}% ({:?})    ", p.progress * 100.0, p.stage);
        let _ = std::io::stdout().flush();
    });

    let result = export_poster(&mut editor, &mut rasterizer, &job, Some(progress_cb)).await;
    println!();
    print_notices(&mut editor);

    match result {
        Ok(path) => {
            println!("Export complete: {}", path.display());
            Ok(())
        }
        Err(e) => Err(anyhow::anyhow!("Export failed: {e}")),
    }
}
