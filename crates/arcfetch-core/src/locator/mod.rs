//! Source locators: parsed, immutable URLs of the archives to fetch.
//!
//! The local archive name is derived from the final URL path segment and is
//! fixed when the locator is built, so transfer and extraction always agree
//! on where the file lives.

mod path;
mod sanitize;

pub use path::last_path_segment;
pub use sanitize::sanitize_file_name;

use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use url::Url;

/// One remote archive to acquire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocator {
    url: Url,
    file_name: String,
}

impl SourceLocator {
    /// Parses an absolute `http`/`https` URL whose path ends in a usable file name.
    pub fn parse(raw: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidLocator {
            url: raw.to_string(),
            reason: reason.to_string(),
        };

        let url = Url::parse(raw.trim()).map_err(|e| invalid(&e.to_string()))?;
        match url.scheme() {
            "http" | "https" => {}
            other => return Err(invalid(&format!("unsupported scheme '{}'", other))),
        }
        let segment = last_path_segment(&url).ok_or_else(|| invalid("URL path has no file name"))?;
        let file_name = sanitize_file_name(segment);
        if file_name.is_empty() {
            return Err(invalid("URL path has no file name"));
        }

        Ok(SourceLocator { url, file_name })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    /// Local file name of the archive (final path segment).
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Where the archive lands inside `dir`.
    pub fn archive_path(&self, dir: &Path) -> PathBuf {
        dir.join(&self.file_name)
    }
}

impl FromStr for SourceLocator {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        SourceLocator::parse(s)
    }
}

impl fmt::Display for SourceLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.url.as_str())
    }
}

impl AsRef<str> for SourceLocator {
    fn as_ref(&self) -> &str {
        self.url.as_str()
    }
}
