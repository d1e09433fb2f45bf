//! tickersheet CLI: one-shot price and sentiment runs.
//!
//! Commands:
//! - `prices`: fetch daily bars, derive indicators, write one sheet per symbol
//! - `sentiment`: score each dated row of the price sheets from that day's news
//!
//! Per-symbol failures are reported but do not change the exit code; only
//! configuration and spreadsheet-level errors do.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use tickersheet_core::data::{
    ArticleSelectors, CsvPriceSource, HtmlNewsSource, PriceSource, YahooPriceSource,
};
use tickersheet_core::sentiment::LexiconScorer;
use tickersheet_runner::config::parse_date;
use tickersheet_runner::{
    build_store, run_price_pipeline, run_sentiment_pipeline, LogProgress, MemoryStore,
    PipelineConfig, PriceSourceKind, RunSummary, SheetStore,
};

#[derive(Parser)]
#[command(
    name = "tickersheet",
    about = "Stock indicators and news sentiment into spreadsheets"
)]
struct Cli {
    /// Log level: trace, debug, info, warn, error.
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch prices, compute indicators, and write one sheet per symbol.
    Prices {
        /// Path to the TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Start date (YYYY-MM-DD). Overrides the config.
        #[arg(long, value_parser = parse_date)]
        start: Option<NaiveDate>,

        /// End date (YYYY-MM-DD). Overrides the config.
        #[arg(long, value_parser = parse_date)]
        end: Option<NaiveDate>,

        /// Symbols to process (repeatable). Replaces the config list.
        #[arg(long = "symbol")]
        symbols: Vec<String>,

        /// Write to an in-memory store instead of the configured one.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Add a daily news sentiment column to existing sheets.
    Sentiment {
        /// Path to the TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Sheets to score (repeatable). Replaces the config list.
        #[arg(long = "symbol")]
        symbols: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.log_level.as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        other => anyhow::bail!("invalid log level: {other}"),
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Prices {
            config,
            start,
            end,
            symbols,
            dry_run,
        } => run_prices_cmd(config, start, end, symbols, dry_run),
        Commands::Sentiment { config, symbols } => run_sentiment_cmd(config, symbols),
    }
}

fn load_config(
    path: &Path,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    symbols: &[String],
) -> Result<PipelineConfig> {
    let mut config = PipelineConfig::from_file(path)
        .with_context(|| format!("loading {}", path.display()))?;
    config.apply_overrides(start, end, symbols)?;
    Ok(config)
}

fn build_price_source(config: &PipelineConfig) -> Result<Box<dyn PriceSource>> {
    let source: Box<dyn PriceSource> = match config.prices.source {
        PriceSourceKind::Yahoo => match &config.prices.yahoo_base_url {
            Some(url) => Box::new(YahooPriceSource::with_base_url(url.as_str())?),
            None => Box::new(YahooPriceSource::new()?),
        },
        PriceSourceKind::Csv => {
            let dir = config
                .prices
                .csv_dir
                .clone()
                .context("prices.csv_dir is required for the csv source")?;
            Box::new(CsvPriceSource::new(dir))
        }
    };
    Ok(source)
}

fn run_prices_cmd(
    config_path: PathBuf,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    symbols: Vec<String>,
    dry_run: bool,
) -> Result<()> {
    let config = load_config(&config_path, start, end, &symbols)?;
    let run = config.price_run()?;
    let prices = build_price_source(&config)?;
    let store: Box<dyn SheetStore> = if dry_run {
        info!("dry run: writing to an in-memory store");
        Box::new(MemoryStore::auto_create())
    } else {
        build_store(&config.store)?
    };

    let summary = run_price_pipeline(&run, prices.as_ref(), store.as_ref(), &LogProgress)?;
    print_summary("prices", &summary);
    Ok(())
}

fn run_sentiment_cmd(config_path: PathBuf, symbols: Vec<String>) -> Result<()> {
    let mut config = load_config(&config_path, None, None, &[])?;
    if !symbols.is_empty() {
        config.sentiment.sheets = Some(symbols);
    }
    let run = config.sentiment_run();

    let selectors: ArticleSelectors = config.sentiment.selectors()?;
    let news = HtmlNewsSource::new(config.sentiment.url_template.as_str(), selectors)?;
    let scorer = LexiconScorer::new();
    let store = build_store(&config.store)?;

    let summary = run_sentiment_pipeline(&run, &news, &scorer, store.as_ref(), &LogProgress)?;
    print_summary("sentiment", &summary);
    Ok(())
}

fn print_summary(label: &str, summary: &RunSummary) {
    println!();
    println!(
        "{label}: {}/{} succeeded, {} failed",
        summary.succeeded, summary.total, summary.failed
    );
    for report in &summary.reports {
        println!("  {:<12} {:>6} rows  {}", report.sheet, report.rows, &report.digest[..12]);
    }
    for (symbol, err) in &summary.errors {
        eprintln!("  FAIL {symbol}: {err}");
    }
}
