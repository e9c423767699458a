//! Localized content bundles and the position-preserving merge.

use serde::{Deserialize, Serialize};

use crate::element::PositionableElement;
use crate::state::PosterState;

/// Text of the three date-circle labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateCircleContent {
    pub top_text: String,
    pub main_text: String,
    pub bottom_text: String,
}

/// Full set of generated strings for one language.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentBundle {
    pub top_text: String,
    pub heading: String,
    pub paragraph: String,
    pub date_circle: DateCircleContent,
    pub footer_logos: Vec<String>,
}

/// The subset of text fields to merge into a poster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialContent {
    pub top_text: Option<String>,
    pub heading: Option<String>,
    pub paragraph: Option<String>,
    pub date_circle: Option<DateCircleContent>,
    pub footer_logos: Option<Vec<String>>,
}

impl ContentBundle {
    /// Everything except the footer logos.
    pub fn text_only(&self) -> PartialContent {
        PartialContent {
            top_text: Some(self.top_text.clone()),
            heading: Some(self.heading.clone()),
            paragraph: Some(self.paragraph.clone()),
            date_circle: Some(self.date_circle.clone()),
            footer_logos: None,
        }
    }

    /// Text fields plus the footer logo list.
    pub fn with_logos(&self) -> PartialContent {
        PartialContent {
            footer_logos: Some(self.footer_logos.clone()),
            ..self.text_only()
        }
    }
}

fn with_content(element: &PositionableElement, content: Option<&String>) -> PositionableElement {
    PositionableElement {
        content: content.cloned().unwrap_or_else(|| element.content.clone()),
        placement: element.placement,
    }
}

impl PosterState {
    /// Merge generated text into this snapshot.
    ///
    /// Only `content` fields change; every position and export override stays
    /// as it was. Footer logos are replaced only when the partial names them.
    pub fn apply_partial(&self, partial: &PartialContent) -> PosterState {
        let mut date_circle = self.date_circle.clone();
        if let Some(labels) = &partial.date_circle {
            date_circle.top_text = with_content(&date_circle.top_text, Some(&labels.top_text));
            date_circle.main_text = with_content(&date_circle.main_text, Some(&labels.main_text));
            date_circle.bottom_text =
                with_content(&date_circle.bottom_text, Some(&labels.bottom_text));
        }

        PosterState {
            top_text: partial
                .top_text
                .clone()
                .unwrap_or_else(|| self.top_text.clone()),
            heading: with_content(&self.heading, partial.heading.as_ref()),
            paragraph: with_content(&self.paragraph, partial.paragraph.as_ref()),
            date_circle,
            footer_logos: partial
                .footer_logos
                .clone()
                .unwrap_or_else(|| self.footer_logos.clone()),
            ..self.clone()
        }
    }
}
