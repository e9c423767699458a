//! Editor session: the current snapshot, its version, and in-progress flags.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use crate::content::PartialContent;
use crate::error::ModelError;
use crate::state::PosterState;
use crate::update::{FooterLogoEdit, PosterUpdate};

/// Slot an uploaded image lands in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadSlot {
    Background,
    TopLeftLogo,
    TopRightLogo,
    FooterLogo(usize),
}

impl UploadSlot {
    /// The update that stores `image` in this slot; `None` removes it.
    ///
    /// Footer entries are not nullable, so removing one leaves an empty
    /// placeholder at the same index.
    pub fn update(self, image: Option<String>) -> PosterUpdate {
        match self {
            UploadSlot::Background => PosterUpdate::BackgroundImage(image),
            UploadSlot::TopLeftLogo => PosterUpdate::TopLeftLogo(image),
            UploadSlot::TopRightLogo => PosterUpdate::TopRightLogo(image),
            UploadSlot::FooterLogo(index) => PosterUpdate::FooterLogos(FooterLogoEdit::Set {
                index,
                logo: image.unwrap_or_default(),
            }),
        }
    }
}

/// Long-running actions guarded by an in-progress flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Export,
    Upload(UploadSlot),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Export => write!(f, "export"),
            Action::Upload(UploadSlot::Background) => write!(f, "background upload"),
            Action::Upload(UploadSlot::TopLeftLogo) => write!(f, "top-left logo upload"),
            Action::Upload(UploadSlot::TopRightLogo) => write!(f, "top-right logo upload"),
            Action::Upload(UploadSlot::FooterLogo(i)) => write!(f, "footer logo {} upload", i + 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Error,
}

/// A message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// Holds the poster snapshot for one editing session.
///
/// Snapshots are never mutated in place: each update builds a new state and
/// swaps it in, so an `Arc` handed out by [`Editor::snapshot`] keeps seeing
/// the state it was taken from.
#[derive(Debug, Default)]
pub struct Editor {
    state: Arc<PosterState>,
    version: u64,
    in_progress: HashSet<Action>,
    notices: Vec<Notice>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: PosterState) -> Self {
        Self {
            state: Arc::new(state),
            ..Self::default()
        }
    }

    pub fn state(&self) -> &PosterState {
        &self.state
    }

    pub fn snapshot(&self) -> Arc<PosterState> {
        Arc::clone(&self.state)
    }

    /// Number of snapshots produced since the session started.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply an update and return the new version.
    pub fn dispatch(&mut self, update: PosterUpdate) -> Result<u64, ModelError> {
        let next = self.state.apply(update)?;
        Ok(self.replace(next))
    }

    /// Merge generated text, keeping every position.
    pub fn apply_content(&mut self, partial: &PartialContent) -> u64 {
        let next = self.state.apply_partial(partial);
        self.replace(next)
    }

    fn replace(&mut self, next: PosterState) -> u64 {
        self.state = Arc::new(next);
        self.version += 1;
        self.version
    }

    /// Mark `action` as running. Fails if it already is.
    pub fn begin(&mut self, action: Action) -> Result<(), ModelError> {
        if !self.in_progress.insert(action) {
            return Err(ModelError::Busy { action });
        }
        Ok(())
    }

    pub fn finish(&mut self, action: Action) {
        self.in_progress.remove(&action);
    }

    pub fn is_in_progress(&self, action: Action) -> bool {
        self.in_progress.contains(&action)
    }

    pub fn notify(&mut self, level: NoticeLevel, message: impl Into<String>) {
        self.notices.push(Notice {
            level,
            message: message.into(),
        });
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}
