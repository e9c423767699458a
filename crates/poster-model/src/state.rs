//! The poster aggregate and its default content.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::element::{DateCircleState, PositionableElement};
use crate::error::ModelError;
use crate::position::{Placement, Position};

/// Alpha suffix stored on the header/footer color (0x4D = 30% opacity).
pub const HEADER_FOOTER_ALPHA_SUFFIX: &str = "4D";

/// Everything visible on the poster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterState {
    /// Header text, always centered in the header band.
    pub top_text: String,

    pub heading: PositionableElement,

    pub paragraph: PositionableElement,

    /// Background image reference (data URL, file path, or URL).
    pub background_image: Option<String>,

    pub background_style: BackgroundStyle,

    /// `#rrggbb` followed by [`HEADER_FOOTER_ALPHA_SUFFIX`].
    pub header_footer_background_color: String,

    pub date_circle: DateCircleState,

    pub top_left_logo: Option<String>,

    pub top_right_logo: Option<String>,

    /// Footer logos in display order. Empty strings are placeholders.
    pub footer_logos: Vec<String>,
}

/// How the background image fills the canvas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundStyle {
    pub object_fit: ObjectFit,

    /// CSS-style position keywords, e.g. `center center` or `top`.
    pub object_position: String,
}

/// Image fitting mode, named after the CSS `object-fit` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObjectFit {
    #[default]
    Cover,
    Contain,
    Fill,
    None,
    ScaleDown,
}

impl ObjectFit {
    pub fn as_str(self) -> &'static str {
        match self {
            ObjectFit::Cover => "cover",
            ObjectFit::Contain => "contain",
            ObjectFit::Fill => "fill",
            ObjectFit::None => "none",
            ObjectFit::ScaleDown => "scale-down",
        }
    }
}

impl FromStr for ObjectFit {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cover" => Ok(ObjectFit::Cover),
            "contain" => Ok(ObjectFit::Contain),
            "fill" => Ok(ObjectFit::Fill),
            "none" => Ok(ObjectFit::None),
            "scale-down" => Ok(ObjectFit::ScaleDown),
            _ => Err(ModelError::InvalidObjectFit {
                value: s.to_string(),
            }),
        }
    }
}

impl Default for BackgroundStyle {
    fn default() -> Self {
        Self {
            object_fit: ObjectFit::Cover,
            object_position: "center center".to_string(),
        }
    }
}

/// Normalize a picked color to the stored `#rrggbb4D` form.
///
/// Accepts `#rrggbb` or a value that already carries an alpha suffix; the
/// suffix is always replaced by the fixed 30% one.
pub fn header_footer_color(value: &str) -> Result<String, ModelError> {
    let invalid = || ModelError::InvalidColor {
        value: value.to_string(),
    };
    let rgb = value.get(..7).ok_or_else(invalid)?;
    let digits = rgb.strip_prefix('#').ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    Ok(format!("{rgb}{HEADER_FOOTER_ALPHA_SUFFIX}"))
}

impl Default for PosterState {
    fn default() -> Self {
        Self {
            top_text: "JAMHURI YA MUUNGANO WA TANZANIA\nWIZARA YA FEDHA\nSOKO LA BIDHAA TANZANIA"
                .to_string(),
            heading: PositionableElement::new("DENGU", Position::new(5.0, 52.0)),
            paragraph: PositionableElement::new(
                "TMX, COPRA, WRRB, TCDC na Serikali ya Mikoa ya Singida na Dodoma Zinawataarifu \
                 Wanunuzi na Wadau wote kushiriki mnada wa zao la DENGU Mikoa ya Singida na \
                 Dodoma.\n\nMnada utafanyika Jumatano, tarehe 09/07/2025 Kuanzia saa Nne na nusu \
                 Asubuhi Kwa njia ya kielektroniki.\n\nKaribuni wote",
                Position::new(5.0, 63.0),
            ),
            background_image: None,
            background_style: BackgroundStyle::default(),
            header_footer_background_color: format!("#fefadf{HEADER_FOOTER_ALPHA_SUFFIX}"),
            date_circle: DateCircleState {
                placement: Placement::Positioned(Position::new(15.0, 32.0)),
                top_text: PositionableElement::new("Tarehe", Position::new(50.0, 24.0)),
                main_text: PositionableElement::new("09", Position::new(50.0, 50.0)),
                bottom_text: PositionableElement::new("Julai\n2025", Position::new(50.0, 77.0)),
            },
            top_left_logo: Some("assets/logos/coat-of-arms.png".to_string()),
            top_right_logo: Some("assets/logos/tmx.png".to_string()),
            footer_logos: vec![
                "assets/logos/tmx.png".to_string(),
                "assets/logos/wrrb.png".to_string(),
                "assets/logos/copra.png".to_string(),
                "assets/logos/tcdc.png".to_string(),
                "assets/logos/cbt.png".to_string(),
                "assets/logos/tcb.png".to_string(),
            ],
        }
    }
}

impl PosterState {
    /// Load a state snapshot from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serialize the snapshot as pretty JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_swahili_auction() {
        let state = PosterState::default();
        assert_eq!(state.heading.content, "DENGU");
        assert_eq!(state.date_circle.top_text.content, "Tarehe");
        assert!(state.header_footer_background_color.ends_with("4D"));
        assert_eq!(state.footer_logos.len(), 6);
    }

    #[test]
    fn test_header_footer_color_normalizes_suffix() {
        assert_eq!(header_footer_color("#112233").unwrap(), "#1122334D");
        assert_eq!(header_footer_color("#112233ff").unwrap(), "#1122334D");
        assert!(matches!(
            header_footer_color("112233"),
            Err(ModelError::InvalidColor { .. })
        ));
        assert!(header_footer_color("#12").is_err());
        assert!(header_footer_color("#12345g").is_err());
    }

    #[test]
    fn test_object_fit_parsing() {
        assert_eq!("scale-down".parse::<ObjectFit>().unwrap(), ObjectFit::ScaleDown);
        assert_eq!("Cover".parse::<ObjectFit>().unwrap(), ObjectFit::Cover);
        assert!("stretch".parse::<ObjectFit>().is_err());
        assert_eq!(
            serde_json::to_value(ObjectFit::ScaleDown).unwrap(),
            serde_json::json!("scale-down")
        );
    }

    #[test]
    fn test_state_json_uses_camel_case() {
        let state = PosterState::default();
        let json = state.to_json().unwrap();
        assert!(json.contains("\"headerFooterBackgroundColor\""));
        assert!(json.contains("\"objectFit\": \"cover\""));
        let parsed = PosterState::from_json(&json).unwrap();
        assert_eq!(parsed, state);
    }
}
