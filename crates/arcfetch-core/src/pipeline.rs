//! Acquisition pipeline: probe, download, unpack, in list order.
//!
//! Skippable failures (malformed URL, unreachable source, rejected or failed
//! GET) become outcomes and the batch moves on. Local I/O and archive errors propagate
//! and stop the batch.

use crate::config::ArcfetchConfig;
use crate::error::Result;
use crate::extract::{self, ExtractReport};
use crate::locator::SourceLocator;
use crate::storage;
use crate::transport::Transport;
use std::path::{Path, PathBuf};

/// Result of the transfer step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferOutcome {
    /// Body written to this path.
    Saved(PathBuf),
    /// Server answered with anything but 200; nothing written.
    Rejected { status: u32 },
    /// Network-level failure; nothing written.
    Failed { reason: String },
}

/// Why a locator was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The configured string is not a usable http(s) archive URL.
    Invalid { reason: String },
    Unreachable,
    Rejected { status: u32 },
    TransferFailed { reason: String },
}

/// Result of processing one locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocatorOutcome {
    Extracted(ExtractReport),
    Skipped(SkipReason),
}

/// Counts for a batch that ran to completion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub total: usize,
    pub extracted: usize,
    pub invalid: usize,
    pub unreachable: usize,
    pub transfer_failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &LocatorOutcome) {
        match outcome {
            LocatorOutcome::Extracted(_) => self.extracted += 1,
            LocatorOutcome::Skipped(SkipReason::Invalid { .. }) => self.invalid += 1,
            LocatorOutcome::Skipped(SkipReason::Unreachable) => self.unreachable += 1,
            LocatorOutcome::Skipped(_) => self.transfer_failed += 1,
        }
    }
}

/// GET `locator` and save the body as `<dest>/<file name>` on a 200 status.
///
/// Other statuses and network failures are logged and reported, never
/// raised. Only a local write failure is an error.
pub fn transfer<T: Transport + ?Sized>(
    transport: &T,
    locator: &SourceLocator,
    dest: &Path,
) -> Result<TransferOutcome> {
    let response = match transport.get(locator) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!("Failed to download [{}]: {}", locator, e);
            return Ok(TransferOutcome::Failed {
                reason: e.to_string(),
            });
        }
    };

    if !response.is_success() {
        tracing::warn!("Failed to download [{}]: HTTP {}", locator, response.status);
        return Ok(TransferOutcome::Rejected {
            status: response.status,
        });
    }

    let path = locator.archive_path(dest);
    storage::write_archive(&path, &response.body)?;
    tracing::info!(
        bytes = response.body.len(),
        "Successfully downloaded [{}] to [{}]",
        locator,
        path.display()
    );
    Ok(TransferOutcome::Saved(path))
}

/// Drives locators through probe, transfer and extraction.
#[derive(Debug)]
pub struct Pipeline<T> {
    transport: T,
}

impl<T: Transport> Pipeline<T> {
    pub fn new(transport: T) -> Self {
        Pipeline { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Process one locator into `dest`.
    ///
    /// Extraction only runs on a file the transfer step reports as saved; a
    /// failed transfer is skipped exactly like an unreachable source.
    pub fn process_locator(&self, locator: &SourceLocator, dest: &Path) -> Result<LocatorOutcome> {
        if !self.transport.is_reachable(locator) {
            tracing::warn!("URI [{}] is not reachable. Skipping download.", locator);
            return Ok(LocatorOutcome::Skipped(SkipReason::Unreachable));
        }
        tracing::info!("URI [{}] is valid. Proceeding with download.", locator);

        let archive = match transfer(&self.transport, locator, dest)? {
            TransferOutcome::Saved(path) => path,
            TransferOutcome::Rejected { status } => {
                tracing::warn!("Skipping extraction for [{}]", locator);
                return Ok(LocatorOutcome::Skipped(SkipReason::Rejected { status }));
            }
            TransferOutcome::Failed { reason } => {
                tracing::warn!("Skipping extraction for [{}]", locator);
                return Ok(LocatorOutcome::Skipped(SkipReason::TransferFailed { reason }));
            }
        };

        let report = extract::extract_archive(&archive)?;
        Ok(LocatorOutcome::Extracted(report))
    }

    /// Process `urls` in order. The first propagating error stops the batch.
    ///
    /// Each entry is parsed on its turn; one that is not a usable URL is
    /// skipped like an unreachable source.
    pub fn run_batch<S: AsRef<str>>(&self, urls: &[S], dest: &Path) -> Result<BatchSummary> {
        let n = urls.len();
        let mut summary = BatchSummary {
            total: n,
            ..BatchSummary::default()
        };

        for (i, raw) in urls.iter().enumerate() {
            let raw = raw.as_ref();
            tracing::info!("Processing [ {} / {} ] URI [{}]", i + 1, n, raw);
            let outcome = match SourceLocator::parse(raw) {
                Ok(locator) => self.process_locator(&locator, dest)?,
                Err(e) => {
                    tracing::warn!("URI [{}] is not reachable. Skipping download. ({})", raw, e);
                    LocatorOutcome::Skipped(SkipReason::Invalid {
                        reason: e.to_string(),
                    })
                }
            };
            summary.record(&outcome);
        }

        tracing::info!(
            "Finished: {} extracted, {} unreachable, {} invalid, {} failed downloads (of {})",
            summary.extracted,
            summary.unreachable,
            summary.invalid,
            summary.transfer_failed,
            summary.total
        );
        Ok(summary)
    }

    /// Full run: prepare `<base>/<output_subdir>`, then run the batch over `cfg.urls`.
    pub fn run(&self, cfg: &ArcfetchConfig, base: &Path) -> Result<BatchSummary> {
        let dest = storage::prepare_output_dir(base, &cfg.output_subdir)?;
        self.run_batch(cfg.urls.as_slice(), &dest)
    }
}
