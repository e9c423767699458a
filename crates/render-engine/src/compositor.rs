//! Poster compositor: lays every layer of a poster out on the canvas.
//!
//! [`render`] is pure. Header and footer are the same in both modes; only the
//! body layer (heading, paragraph, date circle) reads the mode, through each
//! element's own placement.

use bango_poster_model::{
    resolve, DateCircleState, ObjectFit, PositionableElement, PosterState, RenderMode,
};

use crate::assets::overlay_data_url;
use crate::scene::*;

const TITLE_FONT_SIZE: f64 = 18.0;
const HEADING_FONT_SIZE: f64 = 96.0;
const PARAGRAPH_FONT_SIZE: f64 = 24.0;
const PARAGRAPH_MAX_WIDTH: f64 = 896.0;
/// Average glyph advance as a fraction of the font size, used for wrapping.
const AVERAGE_GLYPH_WIDTH: f64 = 0.5;
const CIRCLE_LABEL_FONT_SIZE: f64 = 18.0;
const CIRCLE_MAIN_FONT_SIZE: f64 = 72.0;
const BODY_TEXT_FILL: &str = "#ffffff";
const TITLE_FILL: &str = "#000000";

/// Lay out `state` for the given mode on the fixed logical canvas.
pub fn render(state: &PosterState, mode: RenderMode) -> VisualTree {
    VisualTree {
        mode,
        width: CANVAS_SIZE,
        height: CANVAS_SIZE,
        background_color: CANVAS_BACKGROUND.to_string(),
        background: background_layer(state),
        overlay: ImageNode {
            src: overlay_data_url(),
            rect: Rect::new(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE),
            fit: ObjectFit::Fill,
            position: "center".to_string(),
        },
        header: header_layer(state),
        footer: footer_layer(state),
        body: body_layer(state, mode),
    }
}

fn non_empty(src: Option<&String>) -> Option<&str> {
    src.map(String::as_str).filter(|s| !s.trim().is_empty())
}

fn background_layer(state: &PosterState) -> Option<ImageNode> {
    non_empty(state.background_image.as_ref()).map(|src| ImageNode {
        src: src.to_string(),
        rect: Rect::new(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE),
        fit: state.background_style.object_fit,
        position: state.background_style.object_position.clone(),
    })
}

/// Split `#rrggbbaa` into `#rrggbb` and an opacity in `[0, 1]`.
///
/// Colors without an alpha pair are fully opaque.
pub fn split_hex_alpha(color: &str) -> (String, f64) {
    let rgb = color.get(..7).unwrap_or(color).to_string();
    let opacity = color
        .get(7..9)
        .and_then(|alpha| u8::from_str_radix(alpha, 16).ok())
        .map(|alpha| alpha as f64 / 255.0)
        .unwrap_or(1.0);
    (rgb, opacity)
}

fn band(state: &PosterState, rect: Rect) -> BandNode {
    let (fill, opacity) = split_hex_alpha(&state.header_footer_background_color);
    BandNode {
        rect,
        fill,
        opacity,
    }
}

fn header_layer(state: &PosterState) -> HeaderLayer {
    let side_width = (CANVAS_SIZE - 2.0 * BAND_PADDING_X) / 4.0;
    let logo_top = (HEADER_HEIGHT - LOGO_MAX_HEIGHT) / 2.0;

    let left_logo = non_empty(state.top_left_logo.as_ref()).map(|src| ImageNode {
        src: src.to_string(),
        rect: Rect::new(BAND_PADDING_X, logo_top, side_width, LOGO_MAX_HEIGHT),
        fit: ObjectFit::Contain,
        position: "left center".to_string(),
    });
    let right_logo = non_empty(state.top_right_logo.as_ref()).map(|src| ImageNode {
        src: src.to_string(),
        rect: Rect::new(
            CANVAS_SIZE - BAND_PADDING_X - side_width,
            logo_top,
            side_width,
            LOGO_MAX_HEIGHT,
        ),
        fit: ObjectFit::Contain,
        position: "right center".to_string(),
    });

    let mut title = TextNode {
        lines: state.top_text.split('\n').map(str::to_string).collect(),
        x: CANVAS_SIZE / 2.0,
        y: 0.0,
        font_size: TITLE_FONT_SIZE,
        font_weight: 700,
        line_height: 1.25,
        anchor: TextAnchor::Middle,
        fill: TITLE_FILL.to_string(),
    };
    title.y = (HEADER_HEIGHT - title.block_height()) / 2.0;

    HeaderLayer {
        band: band(state, Rect::new(0.0, 0.0, CANVAS_SIZE, HEADER_HEIGHT)),
        left_logo,
        title,
        right_logo,
    }
}

fn footer_layer(state: &PosterState) -> FooterLayer {
    let top = CANVAS_SIZE - FOOTER_HEIGHT;
    let sources: Vec<&str> = state
        .footer_logos
        .iter()
        .map(String::as_str)
        .filter(|src| !src.trim().is_empty())
        .collect();

    let count = sources.len() as f64;
    let row_width = if sources.is_empty() {
        0.0
    } else {
        count * FOOTER_LOGO_MAX_WIDTH + (count - 1.0) * FOOTER_LOGO_GAP
    };
    let start_x = (CANVAS_SIZE - row_width) / 2.0;
    let logo_top = top + (FOOTER_HEIGHT - LOGO_MAX_HEIGHT) / 2.0;

    let logos = sources
        .into_iter()
        .enumerate()
        .map(|(i, src)| ImageNode {
            src: src.to_string(),
            rect: Rect::new(
                start_x + i as f64 * (FOOTER_LOGO_MAX_WIDTH + FOOTER_LOGO_GAP),
                logo_top,
                FOOTER_LOGO_MAX_WIDTH,
                LOGO_MAX_HEIGHT,
            ),
            fit: ObjectFit::Contain,
            position: "center".to_string(),
        })
        .collect();

    FooterLayer {
        band: band(state, Rect::new(0.0, top, CANVAS_SIZE, FOOTER_HEIGHT)),
        logos,
    }
}

/// Greedy word wrap that keeps explicit line breaks and blank lines.
pub fn wrap_text(content: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    for paragraph in content.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
        lines.push(current);
    }
    lines
}

fn positioned_text(
    element: &PositionableElement,
    mode: RenderMode,
    lines: Vec<String>,
    font_size: f64,
    font_weight: u16,
    line_height: f64,
) -> TextNode {
    let (x, y) = resolve(element, mode).to_box(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE);
    TextNode {
        lines,
        x,
        y,
        font_size,
        font_weight,
        line_height,
        anchor: TextAnchor::Start,
        fill: BODY_TEXT_FILL.to_string(),
    }
}

fn date_circle_node(circle: &DateCircleState, mode: RenderMode) -> DateCircleNode {
    let (cx, cy) = resolve(circle, mode).to_box(0.0, 0.0, CANVAS_SIZE, CANVAS_SIZE);
    let mut node = DateCircleNode {
        cx,
        cy,
        radius: DATE_CIRCLE_DIAMETER / 2.0,
        fill: DATE_CIRCLE_FILL.to_string(),
        labels: Vec::with_capacity(3),
    };
    let bounds = node.bounds();

    let styles = [
        (&circle.top_text, CIRCLE_LABEL_FONT_SIZE, 500, 1.25),
        (&circle.main_text, CIRCLE_MAIN_FONT_SIZE, 700, 1.0),
        (&circle.bottom_text, CIRCLE_LABEL_FONT_SIZE, 500, 1.25),
    ];
    for (label, font_size, font_weight, line_height) in styles {
        let (x, center_y) =
            resolve(label, mode).to_box(bounds.x, bounds.y, bounds.width, bounds.height);
        let mut text = TextNode {
            lines: label.content.split('\n').map(str::to_string).collect(),
            x,
            y: 0.0,
            font_size,
            font_weight,
            line_height,
            anchor: TextAnchor::Middle,
            fill: BODY_TEXT_FILL.to_string(),
        };
        text.y = center_y - text.block_height() / 2.0;
        node.labels.push(text);
    }
    node
}

fn body_layer(state: &PosterState, mode: RenderMode) -> BodyLayer {
    let paragraph_chars =
        (PARAGRAPH_MAX_WIDTH / (PARAGRAPH_FONT_SIZE * AVERAGE_GLYPH_WIDTH)).floor() as usize;

    BodyLayer {
        heading: positioned_text(
            &state.heading,
            mode,
            state.heading.content.split('\n').map(str::to_string).collect(),
            HEADING_FONT_SIZE,
            800,
            1.0,
        ),
        paragraph: positioned_text(
            &state.paragraph,
            mode,
            wrap_text(&state.paragraph.content, paragraph_chars),
            PARAGRAPH_FONT_SIZE,
            400,
            1.6,
        ),
        date_circle: date_circle_node(&state.date_circle, mode),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bango_poster_model::{
        CircleLabel, DateCircleUpdate, ElementUpdate, OverrideEdit, Position, PositionEdit,
        PosterUpdate,
    };
    use proptest::prelude::*;

    fn with_overrides() -> PosterState {
        PosterState::default()
            .apply(PosterUpdate::Heading(ElementUpdate::DownloadPosition(
                OverrideEdit::Set(Position::new(10.0, 40.0)),
            )))
            .unwrap()
            .apply(PosterUpdate::DateCircle(DateCircleUpdate::Label(
                CircleLabel::Main,
                ElementUpdate::DownloadPosition(OverrideEdit::Set(Position::new(25.0, 50.0))),
            )))
            .unwrap()
    }

    #[test]
    fn test_header_and_footer_ignore_mode() {
        let state = with_overrides();
        let preview = render(&state, RenderMode::Preview);
        let export = render(&state, RenderMode::Export);
        assert_eq!(preview.header, export.header);
        assert_eq!(preview.footer, export.footer);
        assert_ne!(preview.body, export.body);
    }

    #[test]
    fn test_body_uses_override_only_in_export() {
        let state = with_overrides();
        let preview = render(&state, RenderMode::Preview);
        let export = render(&state, RenderMode::Export);

        assert!((preview.body.heading.x - 50.0).abs() < 1e-9);
        assert!((preview.body.heading.y - 520.0).abs() < 1e-9);
        assert!((export.body.heading.x - 100.0).abs() < 1e-9);
        assert!((export.body.heading.y - 400.0).abs() < 1e-9);

        // Paragraph has no override.
        assert_eq!(preview.body.paragraph, export.body.paragraph);
    }

    #[test]
    fn test_circle_labels_resolve_independently() {
        let state = with_overrides();
        let export = render(&state, RenderMode::Export);
        let circle = &export.body.date_circle;

        // Container has no override: center at (15%, 32%).
        assert!((circle.cx - 150.0).abs() < 1e-9);
        assert!((circle.cy - 320.0).abs() < 1e-9);

        let bounds = circle.bounds();
        assert!((circle.labels[1].x - (bounds.x + 0.25 * bounds.width)).abs() < 1e-9);
        assert!((circle.labels[0].x - (bounds.x + 0.5 * bounds.width)).abs() < 1e-9);
    }

    #[test]
    fn test_footer_logos_left_to_right_skipping_empty() {
        let mut state = PosterState::default();
        state.footer_logos = vec![
            "a.png".to_string(),
            String::new(),
            "b.png".to_string(),
            "c.png".to_string(),
        ];
        let tree = render(&state, RenderMode::Preview);
        let srcs: Vec<&str> = tree.footer.logos.iter().map(|l| l.src.as_str()).collect();
        assert_eq!(srcs, vec!["a.png", "b.png", "c.png"]);

        let xs: Vec<f64> = tree.footer.logos.iter().map(|l| l.rect.x).collect();
        assert!(xs.windows(2).all(|w| w[0] < w[1]));
        let first = tree.footer.logos.first().unwrap().rect.x;
        let last = tree.footer.logos.last().unwrap().rect.right();
        assert!((first - (CANVAS_SIZE - last)).abs() < 1e-9);
        assert!(tree.footer.logos[0].rect.bottom() <= CANVAS_SIZE);
    }

    #[test]
    fn test_band_color_and_opacity() {
        let tree = render(&PosterState::default(), RenderMode::Export);
        assert_eq!(tree.header.band.fill, "#fefadf");
        assert!((tree.header.band.opacity - 77.0 / 255.0).abs() < 1e-9);
        assert_eq!(split_hex_alpha("#123456"), ("#123456".to_string(), 1.0));
    }

    #[test]
    fn test_missing_images_are_omitted() {
        let mut state = PosterState::default();
        state.background_image = None;
        state.top_left_logo = Some(String::new());
        state.top_right_logo = None;
        let tree = render(&state, RenderMode::Preview);
        assert!(tree.background.is_none());
        assert!(tree.header.left_logo.is_none());
        assert!(tree.header.right_logo.is_none());
        assert!(tree.image_sources()[0].starts_with("data:image/svg+xml;base64,"));
    }

    #[test]
    fn test_off_canvas_positions_are_kept() {
        let state = PosterState::default()
            .apply(PosterUpdate::Paragraph(ElementUpdate::Position(
                PositionEdit::Set(Position::new(120.0, -10.0)),
            )))
            .unwrap();
        let tree = render(&state, RenderMode::Preview);
        assert!((tree.body.paragraph.x - 1200.0).abs() < 1e-9);
        assert!((tree.body.paragraph.y + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_wrap_text_keeps_breaks() {
        let lines = wrap_text("one two three four\n\nfive", 9);
        assert_eq!(lines, vec!["one two", "three", "four", "", "five"]);
    }

    proptest! {
        #[test]
        fn prop_body_matches_preview_without_overrides(
            x in -50.0f64..150.0,
            y in -50.0f64..150.0,
        ) {
            let state = PosterState::default()
                .apply(PosterUpdate::Heading(ElementUpdate::Position(PositionEdit::Set(
                    Position::new(x, y),
                ))))
                .unwrap();
            let preview = render(&state, RenderMode::Preview);
            let export = render(&state, RenderMode::Export);
            prop_assert_eq!(preview.body, export.body);
            prop_assert_eq!(preview.header, export.header);
        }
    }
}
