use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;
use crate::ui::prompt::ask_confirmation;
use std::path::Path;

/// Checks that `path` may be created or overwritten.
///
/// A missing file, or `force`, passes straight through; an existing file
/// needs an explicit yes.
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    if ask_confirmation(&format!("The file '{}' already exists. Overwrite?", path.display())) {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "Export cancelled: existing file not overwritten".to_string(),
        ))
    }
}
