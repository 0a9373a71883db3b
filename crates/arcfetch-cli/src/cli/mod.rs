//! CLI for arcfetch.
//!
//! With no arguments it fetches the configured archives into
//! `./downloads`. Flags only override where things go and what is fetched.

use anyhow::{Context, Result};
use arcfetch_core::config::{self, ArcfetchConfig};
use arcfetch_core::transport::CurlTransport;
use arcfetch_core::Pipeline;
use clap::Parser;
use std::path::{Path, PathBuf};

/// Download zip archives, unpack them, and delete the archives.
#[derive(Debug, Parser)]
#[command(name = "arcfetch", version)]
#[command(about = "Fetch and unpack a list of remote zip archives", long_about = None)]
pub struct Cli {
    /// Directory under which the output directory is created (default: current directory).
    #[arg(long, value_name = "DIR")]
    pub base_dir: Option<PathBuf>,

    /// Config file to use instead of ~/.config/arcfetch/config.toml.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Append log lines to this file instead of stderr.
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Archive URL to fetch; repeat to fetch several. Replaces the configured list.
    #[arg(long = "url", value_name = "URL")]
    pub urls: Vec<String>,
}

impl Cli {
    /// Effective configuration: file (or defaults) with `--url` applied.
    pub fn resolve_config(&self) -> Result<ArcfetchConfig> {
        let mut cfg = config::load(self.config.as_deref())?;
        if !self.urls.is_empty() {
            cfg.urls = self.urls.clone();
        }
        tracing::debug!("loaded config: {:?}", cfg);
        Ok(cfg)
    }

    pub fn base_dir(&self) -> Result<PathBuf> {
        match &self.base_dir {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir().context("cannot determine current directory"),
        }
    }

    pub fn run(&self) -> Result<()> {
        let cfg = self.resolve_config()?;
        let base = self.base_dir()?;
        run_pipeline(&cfg, &base)
    }
}

fn run_pipeline(cfg: &ArcfetchConfig, base: &Path) -> Result<()> {
    let pipeline = Pipeline::new(CurlTransport::from_config(cfg));
    pipeline
        .run(cfg, base)
        .with_context(|| format!("fetching into {}", base.display()))?;
    Ok(())
}
