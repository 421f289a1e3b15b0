use clap::{Parser, Subcommand};
use event_mailer::apis::civic_info::CivicInfoClient;
use event_mailer::config::Config;
use event_mailer::logging;
use event_mailer::pipeline::{Pipeline, PipelineResult};
use event_mailer::types::LegislatorFinder;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "event_mailer")]
#[command(about = "Event attendee form letters and registration stats")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML config file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read the attendee CSV, write one letter per attendee, report peaks
    Run {
        /// Attendee CSV path (overrides config)
        #[arg(long)]
        attendees: Option<PathBuf>,
        /// Directory letters are written to (overrides config)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Aggregate registration stats only, without lookups or letters
    Stats {
        /// Attendee CSV path (overrides config)
        #[arg(long)]
        attendees: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logging::init_logging();
    dotenv::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    println!("-------------------------");
    println!("🎟️  Event Mailer initialized");
    println!("-------------------------");

    match cli.command {
        Commands::Run { attendees, output } => {
            let attendees_csv =
                attendees.unwrap_or_else(|| PathBuf::from(&config.input.attendees_csv));
            let letters_dir = output.unwrap_or_else(|| PathBuf::from(&config.output.letters_dir));

            let finder: Arc<dyn LegislatorFinder> = Arc::new(CivicInfoClient::new(&config.civic)?);

            info!("running full pipeline on {}", attendees_csv.display());
            let result = Pipeline::run(&attendees_csv, &letters_dir, finder).await?;

            println!("\n📊 Pipeline results:");
            println!("   Total records: {}", result.total_records);
            println!("   Letters written: {}", result.processed_records);
            println!("   Skipped: {}", result.skipped_records);
            println!("   Output directory: {}", letters_dir.display());
            report_errors(&result);
            print_summary(&result);
        }
        Commands::Stats { attendees } => {
            let attendees_csv =
                attendees.unwrap_or_else(|| PathBuf::from(&config.input.attendees_csv));

            info!("collecting stats from {}", attendees_csv.display());
            let result = Pipeline::collect_stats(&attendees_csv)?;

            println!("\n📊 Registration stats:");
            println!("   Total records: {}", result.total_records);
            println!("   Counted: {}", result.processed_records);
            println!("   Skipped: {}", result.skipped_records);
            report_errors(&result);
            print_summary(&result);
        }
    }

    Ok(())
}

fn report_errors(result: &PipelineResult) {
    if result.errors.is_empty() {
        return;
    }
    warn!("{} errors encountered during run", result.errors.len());
    println!("\n⚠️  Errors encountered:");
    for error in &result.errors {
        println!("   - {error}");
    }
}

/// The two-line activity summary is printed whenever at least one record
/// made it through extraction; with zero records there is no peak to report.
fn print_summary(result: &PipelineResult) {
    if result.processed_records == 0 {
        println!("\n⚠️  No records were processed; nothing to summarize.");
        return;
    }

    match result.summary() {
        Ok(summary) => {
            println!();
            println!(
                "Most active hour is {} with {} occurrence.",
                summary.peak_hour.0, summary.peak_hour.1
            );
            println!(
                "Most active weekday is {} with {} occurrence.",
                summary.peak_weekday.0, summary.peak_weekday.1
            );
            println!("-------------------------");
        }
        Err(e) => error!("failed to compute summary: {}", e),
    }
}
