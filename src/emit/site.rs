//! emit::site
//!
//! Housekeeping for the built version's static files.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::EmitError;
use crate::core::paths::NOJEKYLL;

/// Move a generated `.nojekyll` marker from `target` up to `root`.
///
/// Static hosts only honour the marker at the site root. An existing marker
/// at the root is replaced; when the build produced none, the root is left
/// alone. Returns whether a marker was moved.
pub fn move_nojekyll(target: &Path, root: &Path) -> Result<bool, EmitError> {
    let source = target.join(NOJEKYLL);
    if !source.exists() {
        return Ok(false);
    }

    let dest = root.join(NOJEKYLL);
    let io_err = |source| EmitError::WriteError {
        path: dest.clone(),
        source,
    };

    if dest.exists() {
        fs::remove_file(&dest).map_err(io_err)?;
    }
    fs::rename(&source, &dest).map_err(io_err)?;

    debug!(dest = %dest.display(), "moved .nojekyll to documentation root");
    Ok(true)
}

/// Copy the version-switcher script into the built version.
///
/// # Errors
///
/// Returns `EmitError::MissingAsset` if `source` does not exist.
pub fn install_menu_script(source: &Path, dest: &Path) -> Result<(), EmitError> {
    if !source.is_file() {
        return Err(EmitError::MissingAsset(source.to_path_buf()));
    }

    let io_err = |e| EmitError::WriteError {
        path: dest.to_path_buf(),
        source: e,
    };

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(io_err)?;
    }
    fs::copy(source, dest).map_err(io_err)?;

    debug!(dest = %dest.display(), "installed version switcher script");
    Ok(())
}
