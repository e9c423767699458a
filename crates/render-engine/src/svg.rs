//! SVG serialization of a [`VisualTree`].

use bango_poster_model::{ObjectFit, RenderMode};

use crate::scene::*;

const FONT_FAMILY: &str = "Inter, 'Helvetica Neue', Arial, sans-serif";

/// Output size of the serialized document.
///
/// The viewBox is always the logical canvas; only the outer `width`/`height`
/// change, so a preview scales the same layout to its viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvgOptions {
    pub pixel_width: u32,
    pub pixel_height: u32,
    pub pretty: bool,
}

impl SvgOptions {
    /// Square preview at the viewport's pixel size.
    pub fn preview(viewport_px: u32) -> Self {
        Self {
            pixel_width: viewport_px,
            pixel_height: viewport_px,
            pretty: false,
        }
    }

    pub fn export() -> Self {
        Self {
            pixel_width: EXPORT_PIXELS,
            pixel_height: EXPORT_PIXELS,
            pretty: false,
        }
    }

    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }
}

impl Default for SvgOptions {
    fn default() -> Self {
        Self::export()
    }
}

impl VisualTree {
    /// Serialize the tree. Export trees ignore the requested pixel size and
    /// are always written at the fixed export size.
    pub fn to_svg(&self, options: &SvgOptions) -> String {
        let (pixel_width, pixel_height) = match self.mode {
            RenderMode::Export => (EXPORT_PIXELS, EXPORT_PIXELS),
            RenderMode::Preview => (options.pixel_width, options.pixel_height),
        };

        let mut writer = SvgWriter::new(options.pretty);
        writer.push(format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{pixel_width}" height="{pixel_height}" viewBox="0 0 {} {}" font-family="{}">"#,
            self.width,
            self.height,
            escape_xml(FONT_FAMILY)
        ));
        writer.indent += 1;

        writer.push(format!(
            r#"<rect x="0" y="0" width="{}" height="{}" fill="{}"/>"#,
            self.width,
            self.height,
            escape_xml(&self.background_color)
        ));
        if let Some(background) = &self.background {
            writer.image(background);
        }
        writer.image(&self.overlay);

        writer.open("g", r#"id="header""#);
        writer.band(&self.header.band);
        if let Some(logo) = &self.header.left_logo {
            writer.image(logo);
        }
        writer.text(&self.header.title);
        if let Some(logo) = &self.header.right_logo {
            writer.image(logo);
        }
        writer.close("g");

        writer.open("g", r#"id="footer""#);
        writer.band(&self.footer.band);
        for logo in &self.footer.logos {
            writer.image(logo);
        }
        writer.close("g");

        writer.open("g", r#"id="body""#);
        writer.text(&self.body.heading);
        writer.text(&self.body.paragraph);
        let circle = &self.body.date_circle;
        writer.push(format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}"/>"#,
            circle.cx,
            circle.cy,
            circle.radius,
            escape_xml(&circle.fill)
        ));
        for label in &circle.labels {
            writer.text(label);
        }
        writer.close("g");

        writer.indent -= 1;
        writer.push("</svg>".to_string());
        writer.finish()
    }
}

struct SvgWriter {
    pretty: bool,
    indent: usize,
    lines: Vec<String>,
}

impl SvgWriter {
    fn new(pretty: bool) -> Self {
        Self {
            pretty,
            indent: 0,
            lines: Vec::new(),
        }
    }

    fn push(&mut self, element: String) {
        if self.pretty {
            self.lines.push(format!("{}{element}", "  ".repeat(self.indent)));
        } else {
            self.lines.push(element);
        }
    }

    fn open(&mut self, tag: &str, attrs: &str) {
        self.push(format!("<{tag} {attrs}>"));
        self.indent += 1;
    }

    fn close(&mut self, tag: &str) {
        self.indent = self.indent.saturating_sub(1);
        self.push(format!("</{tag}>"));
    }

    fn band(&mut self, band: &BandNode) {
        self.push(format!(
            r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{}" fill-opacity="{:.3}"/>"#,
            band.rect.x,
            band.rect.y,
            band.rect.width,
            band.rect.height,
            escape_xml(&band.fill),
            band.opacity
        ));
    }

    /// Images with an empty source are skipped.
    fn image(&mut self, image: &ImageNode) {
        if image.src.is_empty() {
            return;
        }
        self.push(format!(
            r#"<image x="{}" y="{}" width="{}" height="{}" preserveAspectRatio="{}" xlink:href="{}"/>"#,
            image.rect.x,
            image.rect.y,
            image.rect.width,
            image.rect.height,
            preserve_aspect_ratio(image.fit, &image.position),
            escape_xml(&image.src)
        ));
    }

    fn text(&mut self, text: &TextNode) {
        let anchor = match text.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        self.open(
            "text",
            &format!(
                r#"font-size="{}" font-weight="{}" fill="{}" text-anchor="{anchor}""#,
                text.font_size,
                text.font_weight,
                escape_xml(&text.fill)
            ),
        );
        let line_box = text.font_size * text.line_height;
        for (i, line) in text.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            // Baseline roughly centred in the line box.
            let baseline = text.y + (i as f64 + 0.5) * line_box + text.font_size * 0.35;
            self.push(format!(
                r#"<tspan x="{}" y="{baseline:.2}">{}</tspan>"#,
                text.x,
                escape_xml(line)
            ));
        }
        self.close("text");
    }

    fn finish(self) -> String {
        let separator = if self.pretty { "\n" } else { "" };
        let mut out = self.lines.join(separator);
        if self.pretty {
            out.push('\n');
        }
        out
    }
}

/// Map an object-fit and CSS position onto `preserveAspectRatio`.
///
/// SVG has no equivalent of `none` or `scale-down`; they render as `slice`
/// and `meet`.
pub fn preserve_aspect_ratio(fit: ObjectFit, position: &str) -> String {
    let mode = match fit {
        ObjectFit::Fill => return "none".to_string(),
        ObjectFit::Cover | ObjectFit::None => "slice",
        ObjectFit::Contain | ObjectFit::ScaleDown => "meet",
    };

    let mut horizontal = "Mid";
    let mut vertical = "Mid";
    for keyword in position.split_whitespace() {
        match keyword.to_ascii_lowercase().as_str() {
            "left" => horizontal = "Min",
            "right" => horizontal = "Max",
            "top" => vertical = "Min",
            "bottom" => vertical = "Max",
            _ => {}
        }
    }
    format!("x{horizontal}Y{vertical} {mode}")
}

pub fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::render;
    use bango_poster_model::PosterState;

    #[test]
    fn test_preview_uses_viewport_size_over_fixed_viewbox() {
        let tree = render(&PosterState::default(), RenderMode::Preview);
        let svg = tree.to_svg(&SvgOptions::preview(480));
        assert!(svg.starts_with("<svg "));
        assert!(svg.contains(r#"width="480" height="480" viewBox="0 0 1000 1000""#));
    }

    #[test]
    fn test_export_is_pinned_to_export_size() {
        let tree = render(&PosterState::default(), RenderMode::Export);
        let svg = tree.to_svg(&SvgOptions::preview(320));
        assert!(svg.contains(r#"width="1000" height="1000" viewBox="0 0 1000 1000""#));
    }

    #[test]
    fn test_text_is_escaped_and_split_into_lines() {
        let mut state = PosterState::default();
        state.top_text = "A & B\n<C>".to_string();
        let svg = render(&state, RenderMode::Preview).to_svg(&SvgOptions::export().pretty());
        assert!(svg.contains(">A &amp; B</tspan>"));
        assert!(svg.contains(">&lt;C&gt;</tspan>"));
        assert!(svg.ends_with("</svg>\n"));
    }

    #[test]
    fn test_body_painted_after_bands() {
        let svg = render(&PosterState::default(), RenderMode::Export).to_svg(&SvgOptions::export());
        let header = svg.find(r#"id="header""#).unwrap();
        let footer = svg.find(r#"id="footer""#).unwrap();
        let body = svg.find(r#"id="body""#).unwrap();
        assert!(header < footer && footer < body);
    }

    #[test]
    fn test_preserve_aspect_ratio_mapping() {
        assert_eq!(preserve_aspect_ratio(ObjectFit::Fill, "center"), "none");
        assert_eq!(
            preserve_aspect_ratio(ObjectFit::Cover, "center center"),
            "xMidYMid slice"
        );
        assert_eq!(
            preserve_aspect_ratio(ObjectFit::Contain, "left top"),
            "xMinYMin meet"
        );
        assert_eq!(
            preserve_aspect_ratio(ObjectFit::ScaleDown, "bottom right"),
            "xMaxYMax meet"
        );
        assert_eq!(preserve_aspect_ratio(ObjectFit::None, "top"), "xMidYMin slice");
    }

    #[test]
    fn test_empty_image_source_is_skipped() {
        let mut tree = render(&PosterState::default(), RenderMode::Preview);
        let before = tree.to_svg(&SvgOptions::export()).matches("<image").count();
        tree.footer.logos[0].src.clear();
        let after = tree.to_svg(&SvgOptions::export()).matches("<image").count();
        assert_eq!(after, before - 1);
    }
}
