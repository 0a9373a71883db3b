//! Fetch a list of remote zip archives into a local directory and unpack them.

pub mod config;
pub mod error;
pub mod extract;
pub mod locator;
pub mod logging;
pub mod pipeline;
pub mod storage;
pub mod transport;

pub use error::{Error, Result};
pub use locator::SourceLocator;
pub use pipeline::{BatchSummary, LocatorOutcome, Pipeline, SkipReason, TransferOutcome};
