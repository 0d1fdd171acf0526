use anyhow::{Context, Result};
use clap::Parser;
use creator_trends::TrendAnalyzer;
use creator_trends::analysis;
use creator_trends::config::Config;
use creator_trends::llm::{LlmClient, Provider};
use creator_trends::output::report;
use creator_trends::repository::MemoryRepository;
use creator_trends::types::{AccountSnapshot, ContentRecord, Platform, Timeframe};
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "creator-trends",
    about = "Creator content trend detection and insight scoring"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run the heuristic insight engine over a content export
    Insights {
        /// Path to a JSON array of content records
        #[arg(short, long)]
        input: PathBuf,

        /// Path to a JSON array of account snapshots
        #[arg(short, long)]
        accounts: Option<PathBuf>,

        /// Platform the insights are for
        #[arg(short, long, default_value = "instagram")]
        platform: String,

        /// Output path for the HTML report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print insights as JSON instead of rendering a report
        #[arg(long)]
        json: bool,
    },

    /// Run the AI trend analyzer (remote completion with local fallback)
    Analyze {
        /// Path to a JSON array of content records
        #[arg(short, long)]
        input: PathBuf,

        /// Path to a JSON array of account snapshots
        #[arg(short, long)]
        accounts: Option<PathBuf>,

        /// User the predictions belong to
        #[arg(short, long, default_value = "local-user")]
        user: String,

        /// Platform to analyze
        #[arg(short, long, default_value = "instagram")]
        platform: String,

        /// Prediction timeframe: daily, weekly, monthly
        #[arg(short, long, default_value = "weekly")]
        timeframe: String,

        /// Path to config file
        #[arg(short, long, default_value = "config.toml")]
        config: PathBuf,

        /// LLM provider override: anthropic, openai, openrouter
        #[arg(long)]
        provider: Option<String>,

        /// LLM model override
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "creator_trends=info".parse().unwrap()),
        )
        .init();

    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Insights {
            input,
            accounts,
            platform,
            output,
            json,
        } => insights(input, accounts, platform, output, json),
        Command::Analyze {
            input,
            accounts,
            user,
            platform,
            timeframe,
            config,
            provider,
            model,
        } => {
            analyze(
                input, accounts, user, platform, timeframe, config, provider, model,
            )
            .await
        }
    }
}

fn load_content(path: &Path) -> Result<Vec<ContentRecord>> {
    let text = std::fs::read_to_string(path)
        .context(format!("reading content from {}", path.display()))?;
    serde_json::from_str(&text).context("parsing content records")
}

fn load_accounts(path: Option<&PathBuf>) -> Result<Vec<AccountSnapshot>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let text = std::fs::read_to_string(path)
        .context(format!("reading accounts from {}", path.display()))?;
    serde_json::from_str(&text).context("parsing account snapshots")
}

fn parse_timeframe(s: &str) -> Timeframe {
    match s.to_lowercase().as_str() {
        "daily" => Timeframe::Daily,
        "monthly" => Timeframe::Monthly,
        _ => Timeframe::Weekly,
    }
}

fn insights(
    input: PathBuf,
    accounts_path: Option<PathBuf>,
    platform: String,
    output: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let content = load_content(&input)?;
    let accounts = load_accounts(accounts_path.as_ref())?;
    let platform: Platform = platform.parse()?;

    info!(content = content.len(), %platform, "scoring trend insights");

    let insights = analysis::generate_trend_predictions(&content, &accounts, &platform);
    let result = analysis::generate_trend_analysis(&content, &accounts, &platform);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    let output_path = output.unwrap_or_else(|| PathBuf::from("trend-report.html"));
    let html = report::render(&insights, &result, &platform.to_string(), content.len())?;
    report::write_report(&output_path, &html)?;

    info!(path = %output_path.display(), "report written");
    println!("Report generated: {}", output_path.display());
    println!("  {} insights ranked", insights.len());
    println!("  {} hashtags tracked", result.top_hashtags.len());

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn analyze(
    input: PathBuf,
    accounts_path: Option<PathBuf>,
    user: String,
    platform: String,
    timeframe: String,
    config_path: PathBuf,
    provider_override: Option<String>,
    model_override: Option<String>,
) -> Result<()> {
    let mut cfg = Config::load_or_default(&config_path)
        .context(format!("loading config from {}", config_path.display()))?;
    cfg.validate()?;

    // Apply CLI overrides
    if let Some(p) = provider_override {
        cfg.llm.provider = match p.as_str() {
            "anthropic" => Provider::Anthropic,
            "openai" => Provider::OpenAi,
            _ => Provider::OpenRouter,
        };
    }
    if let Some(m) = model_override {
        cfg.llm.model = m;
    }

    let content = load_content(&input)?;
    let accounts = load_accounts(accounts_path.as_ref())?;
    let platform: Platform = platform.parse()?;
    let timeframe = parse_timeframe(&timeframe);

    let repository = MemoryRepository::new();
    repository.seed_content(&user, content);
    repository.seed_accounts(&user, accounts);

    let llm = LlmClient::from_config(&cfg.llm)?;

    let analyzer = TrendAnalyzer::new(llm, repository);
    let predictions = analyzer.analyze_trends(&user, &platform, timeframe).await?;

    info!(count = predictions.len(), "predictions generated");
    println!("{}", serde_json::to_string_pretty(&predictions)?);

    Ok(())
}
