use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use salarium_client::areas::resolve_area_id;
use salarium_client::fetcher::HttpPageFetcher;
use salarium_core::runner::{BatchRunner, RunnerConfig};
use salarium_core::source::{SearchQuery, SourceDescriptor, SourceKind};
use salarium_core::vacancy::{HhPage, SjPage};

mod report;

use report::{OutputFormat, Report};

/// Languages surveyed when none are given on the command line.
const DEFAULT_LANGUAGES: [&str; 10] = [
    "JavaScript",
    "Java",
    "Python",
    "PHP",
    "C#",
    "TypeScript",
    "Kotlin",
    "C++",
    "C",
    "Go",
];

/// Search text prefix for HeadHunter queries.
const HH_SEARCH_PREFIX: &str = "Программист";

#[derive(Parser)]
#[command(
    name = "salarium",
    version,
    about = "Salary statistics for programming languages, from HeadHunter and SuperJob"
)]
struct Cli {
    /// Programming language to survey (repeat for several; defaults to a common ten)
    #[arg(long = "language", value_name = "NAME")]
    languages: Vec<String>,

    /// City the survey is scoped to
    #[arg(long, default_value = "Moscow")]
    city: String,

    /// Country the city belongs to
    #[arg(long, default_value = "Russia")]
    country: String,

    /// Listing recency window for HeadHunter, in days
    #[arg(long, default_value_t = 30)]
    period_days: u32,

    /// SuperJob catalogue id the search is restricted to
    #[arg(long, default_value_t = 33)]
    sj_catalogue: u32,

    /// SuperJob application key
    #[arg(long, env = "SUPERJOB_API_KEY", hide_env_values = true)]
    superjob_api_key: String,

    /// In-flight term limit per provider
    #[arg(long, default_value_t = 4)]
    concurrency: usize,

    /// Deadline for one term's full pagination walk, in seconds
    #[arg(long, default_value_t = 90)]
    task_timeout_secs: u64,

    /// Output format
    #[arg(long, value_enum, default_value = "table")]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Setup tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("salarium_core=info".parse()?)
                .add_directive("salarium_client=info".parse()?)
                .add_directive("salarium_cli=info".parse()?),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let languages: Vec<String> = if cli.languages.is_empty() {
        DEFAULT_LANGUAGES.iter().map(|name| name.to_string()).collect()
    } else {
        cli.languages.clone()
    };

    let area_id = resolve_area_id(&cli.country, &cli.city)
        .await
        .map_err(|e| anyhow::anyhow!(e))?
        .with_context(|| format!("No region named '{}' under '{}'", cli.city, cli.country))?;

    tracing::info!(
        city = %cli.city,
        area_id = %area_id,
        languages = languages.len(),
        "Starting survey"
    );

    let config = RunnerConfig::default()
        .with_concurrency(cli.concurrency)
        .with_task_timeout(Duration::from_secs(cli.task_timeout_secs));

    let cancel = CancellationToken::new();
    let signal_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Shutdown signal received, finishing up");
            signal_cancel.cancel();
        }
    });

    let sj_descriptor = SourceDescriptor::for_kind(SourceKind::SuperJob);
    let sj_fetcher = HttpPageFetcher::new(sj_descriptor)
        .map_err(|e| anyhow::anyhow!(e))?
        .with_api_key(cli.superjob_api_key.clone());
    let sj_queries: Vec<SearchQuery> = languages
        .iter()
        .map(|language| {
            SearchQuery::new(language.as_str())
                .with_filter("keyword", language.as_str())
                .with_filter("town", cli.city.as_str())
                .with_filter("catalogues", cli.sj_catalogue.to_string())
        })
        .collect();
    let sj_runner = BatchRunner::new(sj_fetcher, sj_descriptor).with_config(config.clone());

    let hh_descriptor = SourceDescriptor::for_kind(SourceKind::HeadHunter);
    let hh_fetcher = HttpPageFetcher::new(hh_descriptor).map_err(|e| anyhow::anyhow!(e))?;
    let hh_queries: Vec<SearchQuery> = languages
        .iter()
        .map(|language| {
            SearchQuery::new(language.as_str())
                .with_filter("text", format!("{HH_SEARCH_PREFIX} {language}"))
                .with_filter("area", area_id.as_str())
                .with_filter("period", cli.period_days.to_string())
        })
        .collect();
    let hh_runner = BatchRunner::new(hh_fetcher, hh_descriptor).with_config(config);

    let (sj_outcomes, hh_outcomes) = tokio::join!(
        sj_runner.run::<SjPage>(sj_queries, cancel.clone()),
        hh_runner.run::<HhPage>(hh_queries, cancel.clone()),
    );

    let report = Report::new(cli.city.as_str())
        .with_section(SourceKind::SuperJob, &languages, sj_outcomes)
        .with_section(SourceKind::HeadHunter, &languages, hh_outcomes);

    report.render(cli.format, &mut std::io::stdout())?;

    Ok(())
}
