//! Zip extraction into the archive's own directory.

use crate::error::{Error, Result};
use crate::storage;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// What an extraction produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractReport {
    /// The archive that was unpacked (now deleted).
    pub archive: PathBuf,
    /// Regular files written, in archive order.
    pub files: Vec<PathBuf>,
}

/// Unpack `archive_path` next to itself, then delete the archive.
///
/// Entry paths are preserved. Entries that would land outside the directory
/// are skipped. A missing file or a non-zip file is an error and the archive
/// is left in place.
pub fn extract_archive(archive_path: &Path) -> Result<ExtractReport> {
    let dest = archive_path.parent().unwrap_or_else(|| Path::new("."));

    let files = unzip_into(archive_path, dest)?;
    tracing::info!("Successfully unzipped [{}]", archive_path.display());

    storage::remove_file(archive_path)?;
    tracing::debug!(
        files = files.len(),
        "removed archive {}",
        archive_path.display()
    );

    Ok(ExtractReport {
        archive: archive_path.to_path_buf(),
        files,
    })
}

fn unzip_into(archive_path: &Path, dest: &Path) -> Result<Vec<PathBuf>> {
    let archive_err = |source| Error::Archive {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(|e| Error::io(archive_path, e))?;
    let mut archive = ZipArchive::new(file).map_err(archive_err)?;
    let mut written = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(archive_err)?;
        let outpath = match entry.enclosed_name() {
            Some(path) => dest.join(path),
            None => {
                tracing::warn!(
                    "Skipping unsafe entry [{}] in [{}]",
                    entry.name(),
                    archive_path.display()
                );
                continue;
            }
        };

        if entry.is_dir() {
            fs::create_dir_all(&outpath).map_err(|e| Error::io(&outpath, e))?;
            continue;
        }

        if let Some(parent) = outpath.parent() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
        let mut outfile = File::create(&outpath).map_err(|e| Error::io(&outpath, e))?;
        io::copy(&mut entry, &mut outfile).map_err(|e| Error::io(&outpath, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = entry.unix_mode() {
                // Never drop our own write bit; reruns overwrite these files.
                let mode = (mode & 0o7777) | 0o200;
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))
                    .map_err(|e| Error::io(&outpath, e))?;
            }
        }

        written.push(outpath);
    }

    Ok(written)
}
