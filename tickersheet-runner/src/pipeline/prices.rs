//! Price run: fetch bars, derive indicators, write one sheet per symbol.

use tracing::{debug, info};

use tickersheet_core::data::PriceSource;
use tickersheet_core::indicators::IndicatorSet;

use super::{run_each, PipelineError, PipelineProgress, PriceRun, RunSummary, SheetReport, SymbolError};
use crate::rows::price_table;
use crate::store::{SheetStore, SpreadsheetHandle};

/// Run the price pipeline for every symbol in `run`.
///
/// Fails only when the spreadsheet cannot be opened. Per-symbol failures
/// are logged and counted; the failed symbol's sheet is left untouched.
pub fn run_price_pipeline(
    run: &PriceRun,
    prices: &dyn PriceSource,
    store: &dyn SheetStore,
    progress: &dyn PipelineProgress,
) -> Result<RunSummary, PipelineError> {
    let handle = store.open_spreadsheet(&run.spreadsheet)?;
    info!(
        spreadsheet = %handle.name,
        source = prices.name(),
        store = store.name(),
        symbols = run.symbols.len(),
        start = %run.start,
        end = %run.end,
        "starting price run"
    );

    let indicators = IndicatorSet::standard();
    Ok(run_each(&run.symbols, progress, |symbol| {
        process_symbol(run, symbol, prices, &indicators, store, &handle)
    }))
}

/// fetch → enrich → serialize → write.
fn process_symbol(
    run: &PriceRun,
    symbol: &str,
    prices: &dyn PriceSource,
    indicators: &IndicatorSet,
    store: &dyn SheetStore,
    handle: &SpreadsheetHandle,
) -> Result<SheetReport, SymbolError> {
    let bars = prices.fetch_prices(symbol, run.start, run.end)?;
    if bars.is_empty() {
        return Err(SymbolError::NoData {
            start: run.start,
            end: run.end,
        });
    }
    debug!(%symbol, bars = bars.len(), "fetched bars");

    let enriched = indicators.enrich(&bars);
    let table = price_table(&enriched);
    store.write_table(handle, symbol, &table)?;

    Ok(SheetReport {
        sheet: symbol.to_string(),
        rows: table.len(),
        digest: table.digest(),
    })
}
