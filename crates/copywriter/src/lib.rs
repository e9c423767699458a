//! Bango Copywriter
//!
//! Turns structured auction inputs (regions, crop, date, time) into the
//! localized text bundle a poster displays:
//!
//! ```text
//! regions ──┐
//! crop ─────┼── validate ── format lists/date/time ── compose ── ContentBundle
//! date/time ┘
//! ```
//!
//! Generation is pure: the same request always yields the same bundle. The
//! caller seeds defaults such as today's date.

pub mod format;
pub mod generator;
pub mod vocabulary;

pub use format::*;
pub use generator::*;
pub use vocabulary::*;
