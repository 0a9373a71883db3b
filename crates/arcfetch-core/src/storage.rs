//! Output directory and archive file lifecycle.
//!
//! Archives are written to a `.part` sibling, synced, then renamed over the
//! final name, so a reader never sees a half-written archive.

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Ensure `<base>/<subdir>` exists, creating missing parents. Idempotent.
pub fn prepare_output_dir(base: &Path, subdir: &str) -> Result<PathBuf> {
    let dir = base.join(subdir);
    if dir.is_dir() {
        tracing::info!("Downloads directory already exists in [{}]", base.display());
    } else {
        fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
        tracing::info!("Successfully created downloads directory in [{}]", base.display());
    }
    Ok(dir)
}

/// Path of the temp file used while writing `final_path`.
pub fn temp_path_for(final_path: &Path) -> PathBuf {
    let mut name = final_path.as_os_str().to_owned();
    name.push(TEMP_SUFFIX);
    PathBuf::from(name)
}

/// Write `data` to `final_path`, replacing any existing file.
pub fn write_archive(final_path: &Path, data: &[u8]) -> Result<()> {
    let temp_path = temp_path_for(final_path);

    let written = File::create(&temp_path)
        .and_then(|mut f| {
            f.write_all(data)?;
            f.sync_all()
        })
        .map_err(|e| Error::io(&temp_path, e));
    if let Err(e) = written {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    fs::rename(&temp_path, final_path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        Error::io(final_path, e)
    })
}

/// Delete a file, mapping the failure to a located I/O error.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path).map_err(|e| Error::io(path, e))
}
