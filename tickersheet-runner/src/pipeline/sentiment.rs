//! Sentiment run: score each dated row of a sheet from that day's news.
//!
//! The sheet title doubles as the news query. For every row, articles in
//! `[date, date + 1)` are scored and averaged into the `Sentiment Score`
//! column, which is replaced when it already exists.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use tracing::{debug, info};

use tickersheet_core::data::NewsSource;
use tickersheet_core::sentiment::{score_articles, TextScorer};

use super::{run_each, PipelineError, PipelineProgress, RunSummary, SentimentRun, SheetReport, SymbolError};
use crate::rows::{date_column, format_f64, set_column, SENTIMENT_COLUMN};
use crate::store::{SheetStore, SpreadsheetHandle};

/// Score every selected sheet of `run.spreadsheet`.
///
/// Opening either spreadsheet, or listing sheets when none are named, is
/// fatal. Anything after that fails only the sheet involved, which is then
/// left as it was.
pub fn run_sentiment_pipeline(
    run: &SentimentRun,
    news: &dyn NewsSource,
    scorer: &dyn TextScorer,
    store: &dyn SheetStore,
    progress: &dyn PipelineProgress,
) -> Result<RunSummary, PipelineError> {
    let input = store.open_spreadsheet(&run.spreadsheet)?;
    let output = match &run.output_spreadsheet {
        Some(name) if name != &run.spreadsheet => store.open_spreadsheet(name)?,
        _ => input.clone(),
    };
    let sheets = match &run.sheets {
        Some(sheets) => sheets.clone(),
        None => store.list_sheets(&input)?,
    };
    info!(
        spreadsheet = %input.name,
        output = %output.name,
        source = news.name(),
        sheets = sheets.len(),
        "starting sentiment run"
    );

    Ok(run_each(&sheets, progress, |title| {
        score_sheet(title, news, scorer, store, &input, &output)
    }))
}

fn score_sheet(
    title: &str,
    news: &dyn NewsSource,
    scorer: &dyn TextScorer,
    store: &dyn SheetStore,
    input: &SpreadsheetHandle,
    output: &SpreadsheetHandle,
) -> Result<SheetReport, SymbolError> {
    let mut table = store.read_table(input, title)?;
    let dates = date_column(&table)?;

    // Rows sharing a date share one fetch.
    let mut by_date: HashMap<NaiveDate, String> = HashMap::new();
    let mut cells = Vec::with_capacity(dates.len());
    for date in dates {
        let cell = match by_date.get(&date) {
            Some(cell) => cell.clone(),
            None => {
                let articles = news.fetch_articles(title, date, date + Duration::days(1))?;
                let score = score_articles(scorer, &articles);
                debug!(sheet = %title, %date, articles = articles.len(), score, "scored day");
                let cell = format_f64(score);
                by_date.insert(date, cell.clone());
                cell
            }
        };
        cells.push(cell);
    }

    set_column(&mut table, SENTIMENT_COLUMN, &cells);
    store.write_table(output, title, &table)?;

    Ok(SheetReport {
        sheet: title.to_string(),
        rows: table.len(),
        digest: table.digest(),
    })
}
