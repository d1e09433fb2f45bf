//! Progress reporting for pipeline runs.

use tracing::{info, warn};

use super::{SheetReport, SymbolError};

/// Callbacks for per-symbol progress.
pub trait PipelineProgress: Send + Sync {
    /// Called before a symbol is processed.
    fn on_start(&self, symbol: &str, index: usize, total: usize);

    /// Called when a symbol finishes, successfully or not.
    fn on_complete(
        &self,
        symbol: &str,
        index: usize,
        total: usize,
        result: &Result<SheetReport, SymbolError>,
    );

    /// Called once after the last symbol.
    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize);
}

/// Emits one `tracing` event per step.
pub struct LogProgress;

impl PipelineProgress for LogProgress {
    fn on_start(&self, symbol: &str, index: usize, total: usize) {
        info!("[{}/{}] {symbol}", index + 1, total);
    }

    fn on_complete(
        &self,
        symbol: &str,
        _index: usize,
        _total: usize,
        result: &Result<SheetReport, SymbolError>,
    ) {
        match result {
            Ok(report) => info!(%symbol, rows = report.rows, digest = %report.digest, "sheet written"),
            Err(e) => warn!(%symbol, error = %e, "symbol failed"),
        }
    }

    fn on_batch_complete(&self, succeeded: usize, failed: usize, total: usize) {
        info!(succeeded, failed, total, "run complete");
    }
}

/// Reports nothing.
pub struct SilentProgress;

impl PipelineProgress for SilentProgress {
    fn on_start(&self, _symbol: &str, _index: usize, _total: usize) {}

    fn on_complete(
        &self,
        _symbol: &str,
        _index: usize,
        _total: usize,
        _result: &Result<SheetReport, SymbolError>,
    ) {
    }

    fn on_batch_complete(&self, _succeeded: usize, _failed: usize, _total: usize) {}
}
