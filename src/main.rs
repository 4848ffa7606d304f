//! jobscope - remote job postings to CSV, plus quick statistics
//!
//! Two commands share one CSV file:
//!   collect - fetch postings from the Remotive API and save them
//!   analyze - load the saved table and print summary reports
//!
//! Exit codes:
//!   0 - Success (including runs that found no data)
//!   1 - Runtime error (bad config, unreadable CSV, write failure, etc.)

mod analysis;
mod cli;
mod collector;
mod config;
mod models;
mod report;
mod storage;

use anyhow::{Context, Result};
use cli::{Args, Command, OutputFormat};
use collector::{CollectOptions, Collection};
use config::{Config, DEFAULT_CONFIG_FILE};
use models::AnalysisReport;
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    init_logging(&args);

    info!("jobscope v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);

    if let Err(e) = run(args).await {
        error!("Run failed: {:#}", e);
        eprintln!("\n❌ Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

/// Handle --init-config: generate a default .jobscope.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(DEFAULT_CONFIG_FILE);

    if path.exists() {
        eprintln!("⚠️  {} already exists. Remove it first or edit it manually.", DEFAULT_CONFIG_FILE);
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", DEFAULT_CONFIG_FILE))?;

    println!("✅ Created {} with default settings.", DEFAULT_CONFIG_FILE);
    println!("   Edit it to change the endpoint, limits, file path and stop words.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
fn init_logging(args: &Args) {
    let level = args.log_level();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

async fn run(args: Args) -> Result<()> {
    let mut config = load_config(&args)?;
    config.merge_with_args(&args);
    config.validate()?;

    match &args.command {
        Some(Command::Collect(_)) => run_collect(&config, !args.quiet).await,
        Some(Command::Analyze(analyze)) => run_analyze(&config, analyze.format),
        None => anyhow::bail!("No command given"),
    }
}

/// Fetch, normalize and save postings.
async fn run_collect(config: &Config, show_progress: bool) -> Result<()> {
    println!("{}", report::generate_banner("JOB COLLECTOR STARTING - REMOTIVE API"));

    let options = CollectOptions::from_config(&config.collector, show_progress);
    let collection = collector::fetch_and_normalize(&config.collector, &options).await;

    match &collection {
        Collection::Failed(e) => {
            println!("❌ Could not collect jobs: {}", e);
        }
        Collection::Partial { skipped, .. } => {
            println!(
                "\n⚠️  Collected {} jobs ({} of {} available skipped)",
                collection.records().len(),
                skipped.len(),
                collection.available()
            );
            for skip in skipped {
                println!("   - job {}: {}", skip.index, skip.reason);
            }
        }
        Collection::Complete { .. } => {
            println!(
                "\n✅ Successfully collected {} jobs ({} available)",
                collection.records().len(),
                collection.available()
            );
        }
    }

    let records = collection.into_records();

    let Some(summary) = storage::write_records(&records, &config.storage.path)? else {
        return Ok(());
    };

    print!("{}", report::generate_saved_section(&summary));
    print!("{}", report::generate_preview_section(&records));
    print!(
        "{}",
        report::generate_stats_section(&analysis::collection_stats(&records))
    );
    println!("{}", report::generate_banner("DONE! Now run `jobscope analyze`"));

    Ok(())
}

/// Load the saved table and print the reports.
fn run_analyze(config: &Config, format: OutputFormat) -> Result<()> {
    let text = format == OutputFormat::Text;
    let path = &config.storage.path;

    if text {
        println!("{}", report::generate_banner("DATA ANALYSIS STARTING..."));
    }

    let Some(table) = storage::load_table(path)? else {
        println!("File '{}' not found! Run `jobscope collect` first.", path.display());
        return Ok(());
    };

    if table.is_empty() {
        warn!("{} has a header but no rows", path.display());
    }

    let settings = &config.analysis;
    let summary = AnalysisReport {
        source: path.clone(),
        overview: analysis::overview(&table),
        top_n: settings.top_n,
        top_locations: analysis::top_locations(&table, settings.top_n),
        top_companies: analysis::top_companies(&table, settings.top_n),
        keywords: analysis::keyword_frequency(&table, settings),
    };

    match format {
        OutputFormat::Text => {
            print!("{}", report::generate_text_report(&summary));
            println!("{}", report::generate_banner("Analysis Complete!"));
        }
        OutputFormat::Json => println!("{}", report::generate_json_report(&summary)?),
    }

    Ok(())
}

/// Load configuration from file or use defaults.
fn load_config(args: &Args) -> Result<Config> {
    // Try explicit config path
    if let Some(ref config_path) = args.config {
        info!("Loading config from: {}", config_path.display());
        return Config::load(config_path);
    }

    // Try default location
    match Config::load_default() {
        Ok(Some(config)) => {
            info!("Loaded default config from {}", DEFAULT_CONFIG_FILE);
            Ok(config)
        }
        Ok(None) => {
            debug!("No config file found, using defaults");
            Ok(Config::default())
        }
        Err(e) => {
            warn!("Failed to load config: {}", e);
            Ok(Config::default())
        }
    }
}
