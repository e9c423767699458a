//! Image sources and data-URL encoding.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bango_common::error::{BangoError, BangoResult};

use crate::raster::RasterError;
use crate::scene::VisualTree;

const OVERLAY_SVG: &str = include_str!("../assets/overlay.svg");

/// Where an image reference points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageSource<'a> {
    /// Already embedded (`data:` URL).
    DataUrl(&'a str),
    /// `http(s)` URL.
    Remote(&'a str),
    /// File path, relative to the asset root unless absolute.
    Local(&'a Path),
}

impl<'a> ImageSource<'a> {
    pub fn classify(src: &'a str) -> Self {
        let trimmed = src.trim();
        let lower = trimmed.get(..8).unwrap_or(trimmed).to_ascii_lowercase();
        if lower.starts_with("data:") {
            ImageSource::DataUrl(trimmed)
        } else if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Remote(trimmed)
        } else {
            ImageSource::Local(Path::new(trimmed.strip_prefix("file://").unwrap_or(trimmed)))
        }
    }
}

/// MIME type from the file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// The built-in decorative overlay as a data URL.
pub fn overlay_data_url() -> String {
    encode_data_url("image/svg+xml", OVERLAY_SVG.as_bytes())
}

/// Read a picked file into a data URL. `None` (nothing picked) yields `None`.
pub async fn read_data_url(path: Option<&Path>) -> BangoResult<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(BangoError::FileNotFound {
                path: path.to_path_buf(),
            })
        }
        Err(e) => return Err(e.into()),
    };
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Read image");
    Ok(Some(encode_data_url(mime_for_path(path), &bytes)))
}

fn resolve_local(path: &Path, asset_root: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        asset_root.join(path)
    }
}

/// Embed every local image of `tree` as a data URL.
///
/// Remote sources are left alone for the rasterizer to reject. Missing local
/// files are dropped from the tree. Returns the number of images embedded.
pub async fn inline_local_images(
    tree: &mut VisualTree,
    asset_root: &Path,
) -> Result<usize, RasterError> {
    let mut inlined = 0;
    for image in tree.images_mut() {
        let path = match ImageSource::classify(&image.src) {
            ImageSource::Local(path) if !path.as_os_str().is_empty() => {
                resolve_local(path, asset_root)
            }
            _ => continue,
        };
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                image.src = encode_data_url(mime_for_path(&path), &bytes);
                inlined += 1;
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Image not found; leaving it out");
                image.src.clear();
            }
            Err(source) => return Err(RasterError::Asset { path, source }),
        }
    }
    Ok(inlined)
}
