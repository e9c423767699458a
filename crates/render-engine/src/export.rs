//! PNG export and image uploads.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use bango_common::config::ExportDefaults;
use bango_common::error::{BangoError, BangoResult};
use bango_poster_model::{Action, Editor, NoticeLevel, PosterState, RenderMode, UploadSlot};

use crate::assets::{inline_local_images, read_data_url};
use crate::compositor::render;
use crate::raster::{png_dimensions, RasterConfig, RasterDocument, RasterError, Rasterizer};
use crate::scene::CANVAS_SIZE;
use crate::svg::SvgOptions;

/// An export ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportJob {
    pub output_dir: PathBuf,

    /// Defaults to `poster.png`.
    pub file_name: String,

    pub scale_factor: f64,

    /// Directory relative image paths are resolved against.
    pub asset_root: PathBuf,
}

impl ExportJob {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    pub fn raster_config(&self) -> RasterConfig {
        RasterConfig::export(self.scale_factor)
    }
}

impl Default for ExportJob {
    fn default() -> Self {
        Self::from(&ExportDefaults::default())
    }
}

impl From<&ExportDefaults> for ExportJob {
    fn from(defaults: &ExportDefaults) -> Self {
        Self {
            output_dir: defaults.output_dir.clone(),
            file_name: defaults.file_name.clone(),
            scale_factor: defaults.scale_factor,
            asset_root: defaults.asset_root.clone(),
        }
    }
}

/// Progress callback for export.
pub type ProgressCallback = Box<dyn Fn(ExportProgress) + Send + Sync>;

/// Export progress report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportProgress {
    /// Current progress [0.0, 1.0].
    pub progress: f64,

    pub stage: ExportStage,
}

/// Stages of the export process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Preparing,
    Rendering,
    Rasterizing,
    Writing,
    Complete,
    Failed,
}

impl ExportStage {
    fn progress(self) -> f64 {
        match self {
            ExportStage::Preparing => 0.0,
            ExportStage::Rendering => 0.1,
            ExportStage::Rasterizing => 0.3,
            ExportStage::Writing => 0.9,
            ExportStage::Complete | ExportStage::Failed => 1.0,
        }
    }
}

fn report(progress: Option<&ProgressCallback>, stage: ExportStage) {
    if let Some(cb) = progress {
        cb(ExportProgress {
            progress: stage.progress(),
            stage,
        });
    }
}

/// Off-screen working directory, removed when dropped.
struct ScratchSurface {
    path: PathBuf,
}

impl ScratchSurface {
    fn create() -> BangoResult<Self> {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        let path = std::env::temp_dir().join(format!(
            "bango-export-{}-{}",
            std::process::id(),
            NEXT.fetch_add(1, Ordering::Relaxed)
        ));
        if path.exists() {
            std::fs::remove_dir_all(&path)?;
        }
        std::fs::create_dir_all(&path)?;
        Ok(Self { path })
    }
}

impl Drop for ScratchSurface {
    fn drop(&mut self) {
        if let Err(err) = std::fs::remove_dir_all(&self.path) {
            tracing::warn!(error = %err, path = %self.path.display(), "Failed to remove export scratch directory");
        }
    }
}

/// Render `state` into a fixed-size PNG.
///
/// The export tree is built on its own, independent of any preview, so the
/// result is always `1000 * scale` pixels square.
pub async fn export_png(
    state: &PosterState,
    rasterizer: &mut dyn Rasterizer,
    config: &RasterConfig,
    asset_root: &Path,
) -> BangoResult<Vec<u8>> {
    render_png(state, rasterizer, config, asset_root, None).await
}

async fn render_png(
    state: &PosterState,
    rasterizer: &mut dyn Rasterizer,
    config: &RasterConfig,
    asset_root: &Path,
    progress: Option<&ProgressCallback>,
) -> BangoResult<Vec<u8>> {
    if !rasterizer.is_available() {
        return Err(RasterError::Unavailable {
            program: rasterizer.name().to_string(),
        }
        .into());
    }

    report(progress, ExportStage::Rendering);
    let mut tree = render(state, RenderMode::Export);
    if tree.width != CANVAS_SIZE || tree.height != CANVAS_SIZE {
        return Err(BangoError::render(format!(
            "Export canvas is {}x{}, expected {CANVAS_SIZE}x{CANVAS_SIZE}",
            tree.width, tree.height
        )));
    }
    let inlined = inline_local_images(&mut tree, asset_root).await?;
    let expected = config.output_size(tree.width, tree.height)?;

    let scratch = ScratchSurface::create()?;
    let document = RasterDocument {
        svg: tree.to_svg(&SvgOptions::export()),
        tree,
        scratch_dir: scratch.path.clone(),
    };
    tracing::debug!(
        inlined_images = inlined,
        svg_bytes = document.svg.len(),
        scratch = %scratch.path.display(),
        "Export document prepared"
    );

    report(progress, ExportStage::Rasterizing);
    let bytes = rasterizer.rasterize(&document, config)?;
    let actual = png_dimensions(&bytes)?;
    if actual != expected {
        return Err(RasterError::DimensionMismatch { expected, actual }.into());
    }
    Ok(bytes)
}

async fn export_to_file(
    state: &PosterState,
    rasterizer: &mut dyn Rasterizer,
    job: &ExportJob,
    progress: Option<&ProgressCallback>,
) -> BangoResult<PathBuf> {
    report(progress, ExportStage::Preparing);
    let bytes = render_png(
        state,
        rasterizer,
        &job.raster_config(),
        &job.asset_root,
        progress,
    )
    .await?;

    report(progress, ExportStage::Writing);
    let output_path = job.output_path();
    tokio::fs::create_dir_all(&job.output_dir).await?;
    tokio::fs::write(&output_path, &bytes).await?;
    Ok(output_path)
}

/// Export the editor's current poster to `<output_dir>/<file_name>`.
///
/// Failures are recorded as an error notice and returned; the editor state is
/// left untouched and the export flag is cleared either way.
pub async fn export_poster(
    editor: &mut Editor,
    rasterizer: &mut dyn Rasterizer,
    job: &ExportJob,
    progress: Option<ProgressCallback>,
) -> BangoResult<PathBuf> {
    editor
        .begin(Action::Export)
        .map_err(|e| BangoError::model(e.to_string()))?;

    tracing::info!(
        output = %job.output_path().display(),
        scale = job.scale_factor,
        rasterizer = rasterizer.name(),
        "Starting export"
    );
    let started = std::time::Instant::now();
    let snapshot = editor.snapshot();
    let result = export_to_file(&snapshot, rasterizer, job, progress.as_ref()).await;
    editor.finish(Action::Export);

    match result {
        Ok(path) => {
            report(progress.as_ref(), ExportStage::Complete);
            tracing::info!(
                path = %path.display(),
                elapsed_ms = started.elapsed().as_millis(),
                "Export finished"
            );
            editor.notify(
                NoticeLevel::Info,
                format!("Poster saved to {}", path.display()),
            );
            Ok(path)
        }
        Err(err) => {
            report(progress.as_ref(), ExportStage::Failed);
            tracing::error!(error = %err, "Export failed");
            editor.notify(
                NoticeLevel::Error,
                format!("Error generating image. Please try again. ({err})"),
            );
            Err(err)
        }
    }
}

/// SVG preview of the current state at the given viewport size.
pub fn preview_document(state: &PosterState, viewport_px: u32) -> String {
    render(state, RenderMode::Preview).to_svg(&SvgOptions::preview(viewport_px))
}

/// Load a picked image into `slot`.
///
/// `None` means nothing was picked and leaves the editor alone. Returns
/// whether the state changed.
pub async fn upload_image(
    editor: &mut Editor,
    slot: UploadSlot,
    path: Option<&Path>,
) -> BangoResult<bool> {
    let Some(path) = path else {
        return Ok(false);
    };
    let action = Action::Upload(slot);
    editor
        .begin(action)
        .map_err(|e| BangoError::model(e.to_string()))?;
    let result = read_data_url(Some(path)).await;
    editor.finish(action);

    let outcome = match result {
        Ok(Some(url)) => editor
            .dispatch(slot.update(Some(url)))
            .map(|_| true)
            .map_err(|e| BangoError::model(e.to_string())),
        Ok(None) => Ok(false),
        Err(err) => Err(err),
    };
    if let Err(err) = &outcome {
        tracing::warn!(error = %err, slot = %action, "Image upload failed");
        editor.notify(NoticeLevel::Error, format!("Failed to load image: {err}"));
    } else {
        tracing::info!(slot = %action, path = %path.display(), "Image uploaded");
    }
    outcome
}
