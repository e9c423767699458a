//! Errors raised while editing poster state.

use crate::editor::Action;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Footer logo index {index} out of range (have {len})")]
    LogoIndexOutOfRange { index: usize, len: usize },

    #[error("Invalid color {value:?}: expected #rrggbb")]
    InvalidColor { value: String },

    #[error("Unknown object-fit value {value:?}")]
    InvalidObjectFit { value: String },

    #[error("{action} is already in progress")]
    Busy { action: Action },
}
