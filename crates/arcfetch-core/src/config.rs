use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Archives fetched when no list is configured.
pub const DEFAULT_URLS: &[&str] = &[
    "https://divvy-tripdata.s3.amazonaws.com/Divvy_Trips_2018_Q4.zip",
    "https://divvy-tripdata.s3.amazonaws.com/Divvy_Trips_2019_Q1.zip",
    "https://divvy-tripdata.s3.amazonaws.com/Divvy_Trips_2019_Q2.zip",
    "https://divvy-tripdata.s3.amazonaws.com/Divvy_Trips_2019_Q3.zip",
    "https://divvy-tripdata.s3.amazonaws.com/Divvy_Trips_2019_Q4.zip",
    "https://divvy-tripdata.s3.amazonaws.com/Divvy_Trips_2020_Q1.zip",
    "https://divvy-tripdata.s3.amazonaws.com/Divvy_Trips_2220_Q1.zip",
];

/// Name of the directory created under the base path.
pub const DEFAULT_OUTPUT_SUBDIR: &str = "downloads";

/// Run configuration, optionally loaded from `~/.config/arcfetch/config.toml`.
///
/// Every field may be omitted in the file; missing fields take the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArcfetchConfig {
    /// Ordered list of archive URLs to fetch.
    pub urls: Vec<String>,
    /// Subdirectory of the base path that receives archives and their contents.
    pub output_subdir: String,
    /// Timeout for the HEAD reachability probe, in seconds.
    pub probe_timeout_secs: u64,
    /// Optional timeout for the full GET (None = wait as long as it takes).
    pub transfer_timeout_secs: Option<u64>,
    /// User-Agent header sent with every request.
    pub user_agent: String,
}

impl Default for ArcfetchConfig {
    fn default() -> Self {
        Self {
            urls: DEFAULT_URLS.iter().map(|s| s.to_string()).collect(),
            output_subdir: DEFAULT_OUTPUT_SUBDIR.to_string(),
            probe_timeout_secs: 5,
            transfer_timeout_secs: None,
            user_agent: concat!("arcfetch/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Read and parse a config file.
pub fn load_from(path: &Path) -> Result<ArcfetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let cfg: ArcfetchConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration.
///
/// An explicit path must exist and parse. Without one, the XDG config file is
/// used when present, otherwise the built-in defaults. Nothing is written.
pub fn load(explicit: Option<&Path>) -> Result<ArcfetchConfig> {
    if let Some(path) = explicit {
        return load_from(path);
    }

    let xdg_dirs = xdg::BaseDirectories::with_prefix("arcfetch")?;
    match xdg_dirs.find_config_file("config.toml") {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            load_from(&path)
        }
        None => Ok(ArcfetchConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = ArcfetchConfig::default();
        assert_eq!(cfg.urls.len(), 7);
        assert!(cfg.urls[0].ends_with("Divvy_Trips_2018_Q4.zip"));
        assert!(cfg.urls[6].ends_with("Divvy_Trips_2220_Q1.zip"));
        assert_eq!(cfg.output_subdir, "downloads");
        assert_eq!(cfg.probe_timeout_secs, 5);
        assert_eq!(cfg.transfer_timeout_secs, None);
        assert!(cfg.user_agent.starts_with("arcfetch/"));
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = ArcfetchConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: ArcfetchConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed, cfg);
    }

    #[test]
    fn config_toml_partial_values() {
        let toml = r#"
            urls = ["http://127.0.0.1:8000/A.zip"]
            probe_timeout_secs = 2
        "#;
        let cfg: ArcfetchConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.urls, vec!["http://127.0.0.1:8000/A.zip".to_string()]);
        assert_eq!(cfg.probe_timeout_secs, 2);
        assert_eq!(cfg.output_subdir, "downloads");
    }

    #[test]
    fn load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arcfetch.toml");
        fs::write(&path, "output_subdir = \"data\"\ntransfer_timeout_secs = 600\n").unwrap();

        let cfg = load(Some(&path)).unwrap();
        assert_eq!(cfg.output_subdir, "data");
        assert_eq!(cfg.transfer_timeout_secs, Some(600));
        assert_eq!(cfg.urls.len(), DEFAULT_URLS.len());
    }

    #[test]
    fn load_explicit_path_missing_or_invalid() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(Some(&dir.path().join("nope.toml"))).is_err());

        let bad = dir.path().join("bad.toml");
        fs::write(&bad, "probe_timeout_secs = \"soon\"").unwrap();
        let err = load(Some(&bad)).unwrap_err();
        assert!(format!("{:#}", err).contains("failed to parse config"));
    }
}
