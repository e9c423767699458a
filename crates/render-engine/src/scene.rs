//! Visual tree produced by the compositor.
//!
//! All geometry is in logical canvas units: the canvas is always
//! [`CANVAS_SIZE`] x [`CANVAS_SIZE`], whatever size it is later drawn at.

use serde::Serialize;

use bango_poster_model::{ObjectFit, RenderMode};

/// Logical canvas edge length.
pub const CANVAS_SIZE: f64 = 1000.0;

/// Pixel size of the exported PNG at scale factor 1.
pub const EXPORT_PIXELS: u32 = 1000;

pub const CANVAS_BACKGROUND: &str = "#002f2f";
pub const HEADER_HEIGHT: f64 = 120.0;
pub const FOOTER_HEIGHT: f64 = 100.0;
pub const BAND_PADDING_X: f64 = 40.0;
pub const LOGO_MAX_HEIGHT: f64 = 60.0;
pub const FOOTER_LOGO_MAX_WIDTH: f64 = 120.0;
pub const FOOTER_LOGO_GAP: f64 = 32.0;
pub const DATE_CIRCLE_DIAMETER: f64 = 200.0;
pub const DATE_CIRCLE_FILL: &str = "#009a9a";

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageNode {
    pub src: String,
    pub rect: Rect,
    pub fit: ObjectFit,
    /// CSS-style position keywords (`center`, `left top`, ...).
    pub position: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

/// A block of text. `(x, y)` is the top of the block at its anchor edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextNode {
    pub lines: Vec<String>,
    pub x: f64,
    pub y: f64,
    pub font_size: f64,
    pub font_weight: u16,
    /// Multiple of `font_size` between baselines.
    pub line_height: f64,
    pub anchor: TextAnchor,
    pub fill: String,
}

impl TextNode {
    pub fn block_height(&self) -> f64 {
        self.lines.len() as f64 * self.font_size * self.line_height
    }
}

/// Solid band behind the header or footer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BandNode {
    pub rect: Rect,
    /// `#rrggbb`.
    pub fill: String,
    pub opacity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeaderLayer {
    pub band: BandNode,
    pub left_logo: Option<ImageNode>,
    pub title: TextNode,
    pub right_logo: Option<ImageNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FooterLayer {
    pub band: BandNode,
    /// Left to right, in list order.
    pub logos: Vec<ImageNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateCircleNode {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
    pub fill: String,
    /// Top, main, bottom.
    pub labels: Vec<TextNode>,
}

impl DateCircleNode {
    /// Bounding box of the circle; label coordinates are percentages of it.
    pub fn bounds(&self) -> Rect {
        Rect::new(
            self.cx - self.radius,
            self.cy - self.radius,
            self.radius * 2.0,
            self.radius * 2.0,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyLayer {
    pub heading: TextNode,
    pub paragraph: TextNode,
    pub date_circle: DateCircleNode,
}

/// Everything needed to paint one poster, back to front.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisualTree {
    pub mode: RenderMode,
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    pub background: Option<ImageNode>,
    pub overlay: ImageNode,
    pub header: HeaderLayer,
    pub footer: FooterLayer,
    /// Painted last so the date circle sits above the bands.
    pub body: BodyLayer,
}

impl VisualTree {
    /// Every referenced image, in paint order.
    pub fn image_sources(&self) -> Vec<&str> {
        self.images().map(|image| image.src.as_str()).collect()
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageNode> {
        self.background
            .iter()
            .chain(std::iter::once(&self.overlay))
            .chain(self.header.left_logo.iter())
            .chain(self.header.right_logo.iter())
            .chain(self.footer.logos.iter())
    }

    pub fn images_mut(&mut self) -> impl Iterator<Item = &mut ImageNode> {
        self.background
            .iter_mut()
            .chain(std::iter::once(&mut self.overlay))
            .chain(self.header.left_logo.iter_mut())
            .chain(self.header.right_logo.iter_mut())
            .chain(self.footer.logos.iter_mut())
    }
}
