pub mod check;
pub mod export;
pub mod generate;
pub mod preview;

use std::path::Path;

use bango_poster_model::{Editor, PosterState};

/// Open an editor on the given state file, or on the built-in poster.
pub fn load_editor(state: Option<&Path>) -> anyhow::Result<Editor> {
    let Some(path) = state else {
        return Ok(Editor::new());
    };
    let json = std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read state {}: {e}", path.display()))?;
    let state = PosterState::from_json(&json)
        .map_err(|e| anyhow::anyhow!("Invalid state {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), "Loaded poster state");
    Ok(Editor::with_state(state))
}

/// Print and drain the editor's notices.
pub fn print_notices(editor: &mut Editor) {
    for notice in editor.take_notices() {
        match notice.level {
            bango_poster_model::NoticeLevel::Info => println!("  {}", notice.message),
            bango_poster_model::NoticeLevel::Error => eprintln!("  [ERROR] {}", notice.message),
        }
    }
}
