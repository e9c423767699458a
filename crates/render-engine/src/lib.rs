//! Bango Render Engine
//!
//! Lays a poster out on the fixed 1000x1000 canvas and turns it into
//! an SVG preview or an exported PNG.
//!
//! # Pipeline Architecture
//!
//! ```text
//! PosterState ──┐
//!               ├── render(mode) ── VisualTree
//! RenderMode ───┘                       │
//!                  Preview ─────────────┼── to_svg(viewport px) ── preview.svg
//!                                       │
//!                  Export ──────────────┤
//!                                       ├── inline local images
//!                                       ├── to_svg(1000 px)
//!                                       ├── Rasterizer (rsvg-convert)
//!                                       ▼
//!                                  poster.png
//! ```

pub mod assets;
pub mod compositor;
pub mod export;
pub mod raster;
pub mod scene;
pub mod svg;

pub use assets::{read_data_url, ImageSource};
pub use compositor::render;
pub use export::*;
pub use raster::{RasterConfig, RasterDocument, RasterError, Rasterizer, SvgCommandRasterizer};
pub use scene::VisualTree;
pub use svg::SvgOptions;
