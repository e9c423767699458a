//! Typed update paths into [`PosterState`].
//!
//! Every edit names the field it addresses, e.g.
//! `PosterUpdate::DateCircle(DateCircleUpdate::Label(CircleLabel::Top,
//! ElementUpdate::Position(PositionEdit::X(40.0))))` replaces
//! `dateCircle.topText.position.x`. Applying an update returns a new state;
//! every field the path does not address is carried over unchanged.

use crate::element::{CircleLabel, DateCircleState, PositionableElement};
use crate::error::ModelError;
use crate::position::{Placement, Position};
use crate::state::{header_footer_color, BackgroundStyle, ObjectFit, PosterState};

/// Edit of a preview coordinate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionEdit {
    Set(Position),
    X(f64),
    Y(f64),
}

/// Edit of an export override.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverrideEdit {
    Set(Position),
    /// Seeds the override from the preview coordinate when none exists.
    X(f64),
    /// Seeds the override from the preview coordinate when none exists.
    Y(f64),
    Clear,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementUpdate {
    Replace(PositionableElement),
    Content(String),
    Position(PositionEdit),
    DownloadPosition(OverrideEdit),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DateCircleUpdate {
    Replace(DateCircleState),
    Position(PositionEdit),
    DownloadPosition(OverrideEdit),
    Label(CircleLabel, ElementUpdate),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BackgroundStyleUpdate {
    Replace(BackgroundStyle),
    ObjectFit(ObjectFit),
    ObjectPosition(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum FooterLogoEdit {
    Replace(Vec<String>),
    Set { index: usize, logo: String },
    /// Appends an empty placeholder entry.
    Append,
    /// Removes the entry; later entries shift down one index.
    Remove(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PosterUpdate {
    TopText(String),
    Heading(ElementUpdate),
    Paragraph(ElementUpdate),
    DateCircle(DateCircleUpdate),
    BackgroundImage(Option<String>),
    BackgroundStyle(BackgroundStyleUpdate),
    /// `#rrggbb`; stored with the fixed alpha suffix.
    HeaderFooterColor(String),
    TopLeftLogo(Option<String>),
    TopRightLogo(Option<String>),
    FooterLogos(FooterLogoEdit),
}

impl PositionEdit {
    fn apply(self, position: Position) -> Position {
        match self {
            PositionEdit::Set(p) => p,
            PositionEdit::X(x) => position.with_x(x),
            PositionEdit::Y(y) => position.with_y(y),
        }
    }
}

fn edit_placement(placement: Placement, edit: PositionEdit) -> Placement {
    placement.with_preview(edit.apply(placement.preview()))
}

fn edit_override(placement: Placement, edit: OverrideEdit) -> Placement {
    let current = placement
        .download_override()
        .unwrap_or_else(|| placement.preview());
    let next = match edit {
        OverrideEdit::Set(p) => Some(p),
        OverrideEdit::X(x) => Some(current.with_x(x)),
        OverrideEdit::Y(y) => Some(current.with_y(y)),
        OverrideEdit::Clear => None,
    };
    placement.with_override(next)
}

impl ElementUpdate {
    fn apply(self, element: &PositionableElement) -> PositionableElement {
        match self {
            ElementUpdate::Replace(next) => next,
            ElementUpdate::Content(content) => PositionableElement {
                content,
                placement: element.placement,
            },
            ElementUpdate::Position(edit) => PositionableElement {
                content: element.content.clone(),
                placement: edit_placement(element.placement, edit),
            },
            ElementUpdate::DownloadPosition(edit) => PositionableElement {
                content: element.content.clone(),
                placement: edit_override(element.placement, edit),
            },
        }
    }
}

impl DateCircleUpdate {
    fn apply(self, circle: &DateCircleState) -> DateCircleState {
        match self {
            DateCircleUpdate::Replace(next) => next,
            DateCircleUpdate::Position(edit) => DateCircleState {
                placement: edit_placement(circle.placement, edit),
                ..circle.clone()
            },
            DateCircleUpdate::DownloadPosition(edit) => DateCircleState {
                placement: edit_override(circle.placement, edit),
                ..circle.clone()
            },
            DateCircleUpdate::Label(label, update) => {
                let mut next = circle.clone();
                *next.label_mut(label) = update.apply(circle.label(label));
                next
            }
        }
    }
}

impl FooterLogoEdit {
    fn apply(self, logos: &[String]) -> Result<Vec<String>, ModelError> {
        let out_of_range = |index: usize| ModelError::LogoIndexOutOfRange {
            index,
            len: logos.len(),
        };
        match self {
            FooterLogoEdit::Replace(next) => Ok(next),
            FooterLogoEdit::Set { index, logo } => {
                if index >= logos.len() {
                    return Err(out_of_range(index));
                }
                let mut next = logos.to_vec();
                next[index] = logo;
                Ok(next)
            }
            FooterLogoEdit::Append => {
                let mut next = logos.to_vec();
                next.push(String::new());
                Ok(next)
            }
            FooterLogoEdit::Remove(index) => {
                if index >= logos.len() {
                    return Err(out_of_range(index));
                }
                Ok(logos
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != index)
                    .map(|(_, logo)| logo.clone())
                    .collect())
            }
        }
    }
}

impl PosterState {
    /// Apply one update, producing the next snapshot.
    ///
    /// On error the receiver is untouched and no snapshot is produced.
    pub fn apply(&self, update: PosterUpdate) -> Result<PosterState, ModelError> {
        let next = match update {
            PosterUpdate::TopText(top_text) => PosterState {
                top_text,
                ..self.clone()
            },
            PosterUpdate::Heading(update) => PosterState {
                heading: update.apply(&self.heading),
                ..self.clone()
            },
            PosterUpdate::Paragraph(update) => PosterState {
                paragraph: update.apply(&self.paragraph),
                ..self.clone()
            },
            PosterUpdate::DateCircle(update) => PosterState {
                date_circle: update.apply(&self.date_circle),
                ..self.clone()
            },
            PosterUpdate::BackgroundImage(background_image) => PosterState {
                background_image,
                ..self.clone()
            },
            PosterUpdate::BackgroundStyle(update) => {
                let background_style = match update {
                    BackgroundStyleUpdate::Replace(style) => style,
                    BackgroundStyleUpdate::ObjectFit(object_fit) => BackgroundStyle {
                        object_fit,
                        ..self.background_style.clone()
                    },
                    BackgroundStyleUpdate::ObjectPosition(object_position) => BackgroundStyle {
                        object_position,
                        ..self.background_style.clone()
                    },
                };
                PosterState {
                    background_style,
                    ..self.clone()
                }
            }
            PosterUpdate::HeaderFooterColor(color) => PosterState {
                header_footer_background_color: header_footer_color(&color)?,
                ..self.clone()
            },
            PosterUpdate::TopLeftLogo(top_left_logo) => PosterState {
                top_left_logo,
                ..self.clone()
            },
            PosterUpdate::TopRightLogo(top_right_logo) => PosterState {
                top_right_logo,
                ..self.clone()
            },
            PosterUpdate::FooterLogos(edit) => PosterState {
                footer_logos: edit.apply(&self.footer_logos)?,
                ..self.clone()
            },
        };
        Ok(next)
    }
}
