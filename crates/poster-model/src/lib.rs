//! Bango Poster Model
//!
//! Defines the core data contracts for a poster:
//! - **Placement:** percentage coordinates with an optional export override
//! - **State:** the poster aggregate (text, date circle, background, logos)
//! - **Updates:** typed paths into the state, applied as immutable snapshots
//! - **Content:** localized text bundles merged without touching positions
//! - **Editor:** the snapshot holder driven by the editing shell
//!
//! Coordinates are percentages of the containing box (the 1000x1000 canvas,
//! or the date circle's own bounding box for its labels). They are never
//! clamped; values outside `[0, 100]` place an element off the visible area.

pub mod content;
pub mod editor;
pub mod element;
pub mod error;
pub mod position;
pub mod state;
pub mod update;

pub use content::*;
pub use editor::*;
pub use element::*;
pub use error::*;
pub use position::*;
pub use state::*;
pub use update::*;
