pub mod check;
pub mod play;

use std::fs;
use std::path::Path;

use ew_core::GameContent;

/// Load content from a JSON file, or the built-in content when no path is given.
pub fn load_content(path: Option<&Path>) -> Result<GameContent, String> {
    let Some(path) = path else {
        return Ok(GameContent::builtin());
    };
    let source = fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let content = GameContent::from_json(&source)
        .map_err(|e| format!("invalid content in {}: {e}", path.display()))?;
    tracing::debug!(path = %path.display(), "content loaded");
    Ok(content)
}
