//! Rasterizer capability and the `rsvg-convert` backend.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use bango_common::error::BangoError;

use crate::assets::ImageSource;
use crate::scene::{VisualTree, EXPORT_PIXELS};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Rasterization settings.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterConfig {
    /// Width in pixels at scale 1. `None` uses the tree's logical width.
    pub target_width: Option<u32>,
    pub target_height: Option<u32>,
    pub scale_factor: f64,
    pub allow_cross_origin_images: bool,
    pub transparent_background: bool,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            target_width: None,
            target_height: None,
            scale_factor: 1.0,
            allow_cross_origin_images: true,
            transparent_background: true,
        }
    }
}

impl RasterConfig {
    /// Fixed-size export target.
    pub fn export(scale_factor: f64) -> Self {
        Self {
            target_width: Some(EXPORT_PIXELS),
            target_height: Some(EXPORT_PIXELS),
            scale_factor,
            ..Self::default()
        }
    }

    /// Pixel size of the raster for a tree of the given logical size.
    pub fn output_size(
        &self,
        logical_width: f64,
        logical_height: f64,
    ) -> Result<(u32, u32), RasterError> {
        if !self.scale_factor.is_finite() || self.scale_factor <= 0.0 {
            return Err(RasterError::InvalidScale {
                scale: self.scale_factor,
            });
        }
        let base_width = self.target_width.map(f64::from).unwrap_or(logical_width);
        let base_height = self.target_height.map(f64::from).unwrap_or(logical_height);
        let width = (base_width * self.scale_factor).round();
        let height = (base_height * self.scale_factor).round();
        if width < 1.0 || height < 1.0 || width > u32::MAX as f64 || height > u32::MAX as f64 {
            return Err(RasterError::InvalidScale {
                scale: self.scale_factor,
            });
        }
        Ok((width as u32, height as u32))
    }
}

/// A serialized poster ready for rasterization.
#[derive(Debug, Clone)]
pub struct RasterDocument {
    pub svg: String,
    pub tree: VisualTree,
    /// Off-screen working directory owned by the caller.
    pub scratch_dir: PathBuf,
}

impl RasterDocument {
    pub fn source_path(&self) -> PathBuf {
        self.scratch_dir.join("poster.svg")
    }

    pub fn output_path(&self) -> PathBuf {
        self.scratch_dir.join("poster.png")
    }

    /// First image the rasterizer cannot read back, if any.
    pub fn first_remote_image(&self) -> Option<&str> {
        self.tree
            .images()
            .map(|image| image.src.as_str())
            .find(|src| matches!(ImageSource::classify(src), ImageSource::Remote(_)))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("Image {src} is cross-origin and cannot be read back into the export")]
    TaintedImage { src: String },

    #[error("Rasterizer {program} is not available")]
    Unavailable { program: String },

    #[error("Failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} exited with {status}: {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Invalid scale factor {scale}")]
    InvalidScale { scale: f64 },

    #[error("Rasterizer output is not a PNG image")]
    InvalidPng,

    #[error("Rasterized image is {actual:?}, expected {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("Failed to read image {path}: {source}")]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<RasterError> for BangoError {
    fn from(err: RasterError) -> Self {
        match err {
            RasterError::Io(e) => BangoError::Io(e),
            RasterError::Unavailable { program } => BangoError::unsupported(format!(
                "No rasterizer found (expected {program} in PATH)"
            )),
            other => BangoError::export(other.to_string()),
        }
    }
}

/// Trait for rasterizer backends.
pub trait Rasterizer: Send {
    /// Turn the document into PNG bytes.
    fn rasterize(
        &mut self,
        document: &RasterDocument,
        config: &RasterConfig,
    ) -> Result<Vec<u8>, RasterError>;

    /// Check if this backend is available on the system.
    fn is_available(&self) -> bool;

    fn name(&self) -> &str;
}

/// Rasterizer that shells out to `rsvg-convert` (or a compatible program).
#[derive(Debug, Clone)]
pub struct SvgCommandRasterizer {
    program: String,
}

impl SvgCommandRasterizer {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    fn build_args(
        &self,
        document: &RasterDocument,
        config: &RasterConfig,
        size: (u32, u32),
    ) -> Vec<String> {
        let mut args = vec![
            "-w".to_string(),
            size.0.to_string(),
            "-h".to_string(),
            size.1.to_string(),
            "-f".to_string(),
            "png".to_string(),
        ];
        if !config.transparent_background {
            args.push("-b".to_string());
            args.push(document.tree.background_color.clone());
        }
        args.push("-o".to_string());
        args.push(document.output_path().display().to_string());
        args.push(document.source_path().display().to_string());
        args
    }
}

impl Default for SvgCommandRasterizer {
    fn default() -> Self {
        Self::new("rsvg-convert")
    }
}

impl Rasterizer for SvgCommandRasterizer {
    fn rasterize(
        &mut self,
        document: &RasterDocument,
        config: &RasterConfig,
    ) -> Result<Vec<u8>, RasterError> {
        if let Some(src) = document.first_remote_image() {
            return Err(RasterError::TaintedImage {
                src: src.to_string(),
            });
        }

        let size = config.output_size(document.tree.width, document.tree.height)?;
        std::fs::write(document.source_path(), &document.svg)?;

        let args = self.build_args(document, config, size);
        tracing::debug!(program = %self.program, args = ?args, "Running rasterizer");

        let output = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|source| RasterError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(RasterError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let bytes = std::fs::read(document.output_path())?;
        tracing::debug!(bytes = bytes.len(), width = size.0, height = size.1, "Rasterized poster");
        Ok(bytes)
    }

    fn is_available(&self) -> bool {
        command_exists(&self.program)
    }

    fn name(&self) -> &str {
        &self.program
    }
}

pub fn command_exists(binary: &str) -> bool {
    if Path::new(binary).is_absolute() {
        return Path::new(binary).is_file();
    }
    Command::new("sh")
        .arg("-c")
        .arg(format!("command -v {binary} >/dev/null 2>&1"))
        .status()
        .map(|status| status.success())
        .unwrap_or(false)
}

/// Width and height from a PNG's IHDR chunk.
pub fn png_dimensions(bytes: &[u8]) -> Result<(u32, u32), RasterError> {
    if bytes.len() < 24 || bytes[..8] != PNG_SIGNATURE || &bytes[12..16] != b"IHDR" {
        return Err(RasterError::InvalidPng);
    }
    let read_u32 = |range: std::ops::Range<usize>| -> Result<u32, RasterError> {
        bytes[range]
            .try_into()
            .map(u32::from_be_bytes)
            .map_err(|_| RasterError::InvalidPng)
    };
    Ok((read_u32(16..20)?, read_u32(20..24)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::render;
    use crate::svg::SvgOptions;
    use bango_poster_model::{PosterState, RenderMode};

    /// Minimal PNG header with the given IHDR size.
    fn png_header(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = PNG_SIGNATURE.to_vec();
        bytes.extend_from_slice(&13u32.to_be_bytes());
        bytes.extend_from_slice(b"IHDR");
        bytes.extend_from_slice(&width.to_be_bytes());
        bytes.extend_from_slice(&height.to_be_bytes());
        bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
        bytes
    }

    fn document(state: &PosterState) -> RasterDocument {
        let tree = render(state, RenderMode::Export);
        RasterDocument {
            svg: tree.to_svg(&SvgOptions::export()),
            tree,
            scratch_dir: std::env::temp_dir(),
        }
    }

    #[test]
    fn test_png_dimensions() {
        assert_eq!(png_dimensions(&png_header(1000, 1000)).unwrap(), (1000, 1000));
        assert_eq!(png_dimensions(&png_header(2000, 1500)).unwrap(), (2000, 1500));
        assert!(matches!(png_dimensions(b"not a png"), Err(RasterError::InvalidPng)));
        let mut bad = png_header(10, 10);
        bad[12..16].copy_from_slice(b"IDAT");
        assert!(matches!(png_dimensions(&bad), Err(RasterError::InvalidPng)));
    }

    #[test]
    fn test_export_output_size() {
        assert_eq!(RasterConfig::export(1.0).output_size(1000.0, 1000.0).unwrap(), (1000, 1000));
        assert_eq!(RasterConfig::export(2.0).output_size(400.0, 400.0).unwrap(), (2000, 2000));
        assert_eq!(RasterConfig::default().output_size(640.0, 480.0).unwrap(), (640, 480));
        assert!(matches!(
            RasterConfig::export(0.0).output_size(1000.0, 1000.0),
            Err(RasterError::InvalidScale { .. })
        ));
        assert!(RasterConfig::export(f64::NAN).output_size(1000.0, 1000.0).is_err());
    }

    #[test]
    fn test_remote_image_is_tainted() {
        let mut state = PosterState::default();
        state.background_image = Some("https://i.imgur.com/background.jpg".to_string());
        let mut rasterizer = SvgCommandRasterizer::new("definitely-not-installed-rasterizer");
        let err = rasterizer
            .rasterize(&document(&state), &RasterConfig::export(1.0))
            .unwrap_err();
        assert!(matches!(err, RasterError::TaintedImage { ref src } if src.starts_with("https://")));
    }

    #[test]
    fn test_build_args() {
        let rasterizer = SvgCommandRasterizer::default();
        let doc = document(&PosterState::default());
        let args = rasterizer.build_args(&doc, &RasterConfig::export(1.0), (1000, 1000));
        assert_eq!(&args[..6], ["-w", "1000", "-h", "1000", "-f", "png"]);
        assert_eq!(args.last().unwrap(), &doc.source_path().display().to_string());
        assert!(!args.contains(&"-b".to_string()));

        let opaque = RasterConfig {
            transparent_background: false,
            ..RasterConfig::export(1.0)
        };
        let args = rasterizer.build_args(&doc, &opaque, (1000, 1000));
        assert!(args.contains(&"-b".to_string()));
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        assert!(!SvgCommandRasterizer::new("definitely-not-installed-rasterizer").is_available());
        assert!(command_exists("sh"));
    }

    #[test]
    fn test_raster_error_maps_to_bango_error() {
        let err: BangoError = RasterError::Unavailable {
            program: "rsvg-convert".to_string(),
        }
        .into();
        assert!(matches!(err, BangoError::Unsupported { .. }));
        let err: BangoError = RasterError::InvalidPng.into();
        assert!(matches!(err, BangoError::Export { .. }));
    }
}
