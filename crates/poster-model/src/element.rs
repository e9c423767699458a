//! Positionable text elements and the date-circle composite.

use serde::{Deserialize, Serialize};

use crate::position::{Placement, Position, Positionable};

/// A text item with a placement inside its containing box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionableElement {
    /// Free-form text; may contain line breaks.
    pub content: String,

    #[serde(flatten)]
    pub placement: Placement,
}

impl PositionableElement {
    pub fn new(content: impl Into<String>, position: Position) -> Self {
        Self {
            content: content.into(),
            placement: Placement::Positioned(position),
        }
    }

    pub fn with_download_position(mut self, position: Position) -> Self {
        self.placement = self.placement.with_override(Some(position));
        self
    }
}

impl Positionable for PositionableElement {
    fn placement(&self) -> &Placement {
        &self.placement
    }
}

/// The three labels inside the date circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircleLabel {
    Top,
    Main,
    Bottom,
}

impl CircleLabel {
    pub const ALL: [CircleLabel; 3] = [CircleLabel::Top, CircleLabel::Main, CircleLabel::Bottom];
}

/// Date badge: a circle placed on the canvas by its center, holding three
/// labels placed in percentages of the circle's bounding box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateCircleState {
    #[serde(flatten)]
    pub placement: Placement,
    pub top_text: PositionableElement,
    pub main_text: PositionableElement,
    pub bottom_text: PositionableElement,
}

impl DateCircleState {
    pub fn label(&self, label: CircleLabel) -> &PositionableElement {
        match label {
            CircleLabel::Top => &self.top_text,
            CircleLabel::Main => &self.main_text,
            CircleLabel::Bottom => &self.bottom_text,
        }
    }

    pub fn label_mut(&mut self, label: CircleLabel) -> &mut PositionableElement {
        match label {
            CircleLabel::Top => &mut self.top_text,
            CircleLabel::Main => &mut self.main_text,
            CircleLabel::Bottom => &mut self.bottom_text,
        }
    }
}

impl Positionable for DateCircleState {
    fn placement(&self) -> &Placement {
        &self.placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::position::{resolve, RenderMode};

    fn circle() -> DateCircleState {
        DateCircleState {
            placement: Placement::Positioned(Position::new(15.0, 30.0))
                .with_override(Some(Position::new(18.0, 33.0))),
            top_text: PositionableElement::new("Tarehe", Position::new(50.0, 22.0)),
            main_text: PositionableElement::new("09", Position::new(50.0, 50.0))
                .with_download_position(Position::new(50.0, 48.0)),
            bottom_text: PositionableElement::new("Julai\n2025", Position::new(50.0, 78.0)),
        }
    }

    #[test]
    fn test_children_do_not_inherit_container_override() {
        let circle = circle();
        assert_eq!(resolve(&circle, RenderMode::Export), Position::new(18.0, 33.0));
        assert_eq!(
            resolve(&circle.top_text, RenderMode::Export),
            Position::new(50.0, 22.0)
        );
        assert_eq!(
            resolve(&circle.main_text, RenderMode::Export),
            Position::new(50.0, 48.0)
        );
    }

    #[test]
    fn test_element_wire_shape() {
        let element = PositionableElement::new("DENGU", Position::new(5.0, 52.0));
        let json = serde_json::to_value(&element).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"content": "DENGU", "position": {"x": 5.0, "y": 52.0}})
        );
    }

    #[test]
    fn test_circle_round_trips_through_json() {
        let circle = circle();
        let json = serde_json::to_string(&circle).unwrap();
        assert!(json.contains("\"downloadPosition\""));
        assert!(json.contains("\"mainText\""));
        let parsed: DateCircleState = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, circle);
    }
}
