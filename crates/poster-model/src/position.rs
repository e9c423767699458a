//! Percentage coordinates and the preview/export placement resolver.

use serde::{Deserialize, Serialize};

/// A point expressed as percentages of the containing box.
///
/// `x` is a percentage of the box width, `y` of its height. `(0, 0)` is the
/// top-left corner and `(100, 100)` the bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn with_x(self, x: f64) -> Self {
        Self { x, ..self }
    }

    pub fn with_y(self, y: f64) -> Self {
        Self { y, ..self }
    }

    /// Map this position into a box at `(left, top)` of size `width x height`.
    pub fn to_box(&self, left: f64, top: f64, width: f64, height: f64) -> (f64, f64) {
        (
            left + self.x / 100.0 * width,
            top + self.y / 100.0 * height,
        )
    }
}

/// The two rendering contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Responsive on-screen preview.
    #[default]
    Preview,
    /// Fixed 1000x1000 rasterization target.
    Export,
}

/// Where an element sits, optionally with a separate export coordinate.
///
/// The preview coordinate and the export override are independent: editing
/// one never touches the other.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "PlacementRepr", into = "PlacementRepr")]
pub enum Placement {
    Positioned(Position),
    PositionedWithOverride { preview: Position, export: Position },
}

impl Placement {
    /// Effective coordinate for the given mode.
    pub fn resolve(&self, mode: RenderMode) -> Position {
        match (self, mode) {
            (Placement::Positioned(position), _) => *position,
            (Placement::PositionedWithOverride { preview, .. }, RenderMode::Preview) => *preview,
            (Placement::PositionedWithOverride { export, .. }, RenderMode::Export) => *export,
        }
    }

    /// The coordinate used by the interactive preview.
    pub fn preview(&self) -> Position {
        self.resolve(RenderMode::Preview)
    }

    /// The export override, if one has been set.
    pub fn download_override(&self) -> Option<Position> {
        match self {
            Placement::Positioned(_) => None,
            Placement::PositionedWithOverride { export, .. } => Some(*export),
        }
    }

    /// Replace the preview coordinate, keeping any override.
    pub fn with_preview(self, preview: Position) -> Self {
        match self {
            Placement::Positioned(_) => Placement::Positioned(preview),
            Placement::PositionedWithOverride { export, .. } => {
                Placement::PositionedWithOverride { preview, export }
            }
        }
    }

    /// Set or clear the export override, keeping the preview coordinate.
    pub fn with_override(self, export: Option<Position>) -> Self {
        let preview = self.preview();
        match export {
            Some(export) => Placement::PositionedWithOverride { preview, export },
            None => Placement::Positioned(preview),
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Placement::Positioned(Position::new(0.0, 0.0))
    }
}

/// Wire shape: `{ "position": {..}, "downloadPosition": {..}? }`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlacementRepr {
    position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    download_position: Option<Position>,
}

impl From<PlacementRepr> for Placement {
    fn from(repr: PlacementRepr) -> Self {
        Placement::Positioned(repr.position).with_override(repr.download_position)
    }
}

impl From<Placement> for PlacementRepr {
    fn from(placement: Placement) -> Self {
        Self {
            position: placement.preview(),
            download_position: placement.download_override(),
        }
    }
}

/// Anything that carries a [`Placement`].
pub trait Positionable {
    fn placement(&self) -> &Placement;
}

/// Effective coordinate of `element` for `mode`.
///
/// Each element resolves its own override; a container's override says
/// nothing about its children.
pub fn resolve<P: Positionable + ?Sized>(element: &P, mode: RenderMode) -> Position {
    element.placement().resolve(mode)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_positioned_resolves_same_in_both_modes() {
        let placement = Placement::Positioned(Position::new(12.0, 40.0));
        assert_eq!(placement.resolve(RenderMode::Preview), Position::new(12.0, 40.0));
        assert_eq!(placement.resolve(RenderMode::Export), Position::new(12.0, 40.0));
    }

    #[test]
    fn test_override_only_applies_to_export() {
        let placement = Placement::PositionedWithOverride {
            preview: Position::new(10.0, 10.0),
            export: Position::new(20.0, 30.0),
        };
        assert_eq!(placement.resolve(RenderMode::Preview), Position::new(10.0, 10.0));
        assert_eq!(placement.resolve(RenderMode::Export), Position::new(20.0, 30.0));
    }

    #[test]
    fn test_with_preview_keeps_override() {
        let placement = Placement::Positioned(Position::new(1.0, 1.0))
            .with_override(Some(Position::new(50.0, 50.0)))
            .with_preview(Position::new(5.0, 6.0));
        assert_eq!(placement.preview(), Position::new(5.0, 6.0));
        assert_eq!(placement.download_override(), Some(Position::new(50.0, 50.0)));
    }

    #[test]
    fn test_clearing_override_keeps_preview() {
        let placement = Placement::PositionedWithOverride {
            preview: Position::new(3.0, 4.0),
            export: Position::new(9.0, 9.0),
        }
        .with_override(None);
        assert_eq!(placement, Placement::Positioned(Position::new(3.0, 4.0)));
    }

    #[test]
    fn test_out_of_range_is_not_clamped() {
        let placement = Placement::Positioned(Position::new(-15.0, 130.0));
        assert_eq!(placement.resolve(RenderMode::Export), Position::new(-15.0, 130.0));
        let (x, y) = Position::new(-15.0, 130.0).to_box(0.0, 0.0, 1000.0, 1000.0);
        assert!((x + 150.0).abs() < 1e-9);
        assert!((y - 1300.0).abs() < 1e-9);
    }

    #[test]
    fn test_wire_shape() {
        let plain = Placement::Positioned(Position::new(1.0, 2.0));
        let json = serde_json::to_value(plain).unwrap();
        assert_eq!(json, serde_json::json!({"position": {"x": 1.0, "y": 2.0}}));

        let json = serde_json::json!({
            "position": {"x": 1.0, "y": 2.0},
            "downloadPosition": {"x": 3.0, "y": 4.0}
        });
        let parsed: Placement = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.download_override(), Some(Position::new(3.0, 4.0)));
    }

    fn position() -> impl Strategy<Value = Position> {
        (-50.0f64..150.0, -50.0f64..150.0).prop_map(|(x, y)| Position::new(x, y))
    }

    proptest! {
        #[test]
        fn prop_without_override_export_equals_preview(p in position()) {
            let placement = Placement::Positioned(p);
            prop_assert_eq!(placement.resolve(RenderMode::Export), p);
            prop_assert_eq!(placement.resolve(RenderMode::Preview), p);
        }

        #[test]
        fn prop_override_is_independent_of_preview(a in position(), b in position(), e in position()) {
            let first = Placement::PositionedWithOverride { preview: a, export: e };
            let second = first.with_preview(b);
            prop_assert_eq!(first.resolve(RenderMode::Export), e);
            prop_assert_eq!(second.resolve(RenderMode::Export), e);
        }
    }
}
