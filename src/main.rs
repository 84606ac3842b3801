use anyhow::{Context, Result};
use career_recommender::training::{Evaluator, Preprocessor, Trainer};
use career_recommender::{
    recommend, start_web_server, EnvironmentConfig, RecommendOutcome, Recommender,
};
use clap::{Parser, Subcommand};
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "career-recommender")]
#[command(about = "Train and serve the skills-to-job-title recommender")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// YAML file with `local` and `production` sections
    #[arg(long, default_value = "config.yaml")]
    config: PathBuf,

    /// Override the directory holding the model artifacts
    #[arg(long)]
    models_dir: Option<PathBuf>,

    /// Override the market data CSV
    #[arg(long)]
    market_data: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Clean the raw skills dataset into the processed table
    Preprocess {
        #[arg(long)]
        input: Option<PathBuf>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Fit vectorizer, label encoder and forest on the processed table
    Train,
    /// Score the trained model on the holdout split
    Evaluate,
    /// Recommend a job title for a comma-separated skill list
    Recommend {
        skills: String,
        /// Print the raw JSON payload
        #[arg(long)]
        json: bool,
    },
    /// Serve the recommendation API
    Serve {
        #[arg(long)]
        address: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let (mut config, source) = EnvironmentConfig::load(&cli.config)?;
    init_logging(config.log_file.as_deref())?;
    source.log(&EnvironmentConfig::get_environment());

    if let Some(dir) = cli.models_dir {
        config.paths = config.paths.with_models_dir(dir);
    }
    if let Some(path) = cli.market_data {
        config.paths = config.paths.with_market_data(path);
    }

    match cli.command {
        Command::Preprocess { input, output } => {
            let mut paths = config.paths.clone();
            if let Some(input) = input {
                paths = paths.with_raw_data(input);
            }
            if let Some(output) = output {
                paths = paths.with_processed_data(output);
            }

            let report = Preprocessor::new(&paths).run()?;
            println!(
                "✅ Preprocessing complete: {} of {} rows kept \
                 ({} incomplete, {} duplicates, {} dates nulled)",
                report.rows_written,
                report.rows_read,
                report.dropped_missing,
                report.dropped_duplicates,
                report.dates_nulled
            );
            println!("📂 Processed file saved at: {}", paths.processed_data.display());
        }

        Command::Train => {
            let report = Trainer::new(config.paths.clone(), config.training).run()?;
            println!(
                "✅ Model trained on {} rows ({} job titles, {} terms)",
                report.train_rows, report.classes, report.vocabulary
            );
            println!("🎯 Holdout accuracy: {:.4}", report.holdout_accuracy);
            println!("📂 Artifacts saved in: {}", config.paths.models_dir.display());
        }

        Command::Evaluate => {
            let report = Evaluator::new(config.paths.clone(), config.training).run()?;
            println!("\n🎯 Model Accuracy: {:.4}", report.accuracy);
            println!("\n📊 Classification Report:\n{}", report);
        }

        Command::Recommend { skills, json } => {
            let result = recommend(&config.paths, &skills);

            if json {
                let outcome = RecommendOutcome::from(result);
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                let result = result?;
                println!("\n🎯 Career Recommendation");
                println!("{}", "=".repeat(40));
                println!("🏆 Recommended Job Title: {}", result.job_title);
                println!("🔍 Confidence: {:.1}%", result.confidence);
                println!("💰 Salary Range: {}", result.avg_salary);
                println!("📈 Demand Level: {}", result.demand_level);
                println!("\n{}", result.market_insights);
                println!("\n🛠 {}", result.skills_improvement);
                println!("🔄 Alternatives: {}", result.alternative_jobs.join(", "));
            }
        }

        Command::Serve { address, port } => {
            let mut settings = config.server.clone();
            if let Some(address) = address {
                settings.address = address;
            }
            if let Some(port) = port {
                settings.port = port;
            }

            let recommender = Recommender::load(&config.paths)
                .context("Cannot start the API without trained artifacts and market data")?;
            start_web_server(recommender, settings).await?;
        }
    }

    Ok(())
}

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file: {}", path.display()))?;
            Some(
                fmt::layer()
                    .json()
                    .with_writer(file)
                    .with_current_span(false)
                    .with_span_list(false),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("career_recommender=info,rocket=warn")),
        )
        .init();

    Ok(())
}
