//! guardian-ask - one-shot Health Guardian AI queries from the shell
//!
//! Uses the same configuration and Gemini gateway as the TUI:
//! - Config: $XDG_CONFIG_HOME/health-guardian/config.toml
//! - Logs: $XDG_STATE_HOME/health-guardian/
//!
//! The API key comes from `API_KEY` (or `GEMINI_API_KEY`); without it the
//! command exits before contacting the backend.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use guardian_core::gateway::{ADVICE_ERROR_MESSAGE, MEAL_ERROR_MESSAGE};
use guardian_core::{Config, GeminiGateway, HealthGateway, MealAnalysis};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Parser)]
#[command(name = "guardian-ask")]
#[command(about = "Ask Health Guardian AI about a meal or a health question")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a meal's likely impact on blood sugar
    Meal {
        /// Free-text meal description
        #[arg(required = true)]
        description: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Ask the health assistant a question
    Ask {
        /// Question to ask
        #[arg(required = true)]
        prompt: Vec<String>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let log_guard =
        guardian_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let gateway =
        GeminiGateway::new(&config.gemini).context("failed to initialize the Gemini gateway")?;

    let outcome = match args.command {
        Command::Meal {
            description,
            format,
        } => run_meal(&gateway, &description.join(" "), format),
        Command::Ask { prompt } => run_ask(&gateway, &prompt.join(" ")),
    };

    if outcome.is_err() {
        eprintln!("Details: {}", log_guard.log_dir().display());
    }
    outcome
}

fn spinner(message: &'static str) -> Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .context("invalid progress template")?,
    );
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn run_meal(gateway: &dyn HealthGateway, description: &str, format: OutputFormat) -> Result<()> {
    if description.trim().is_empty() {
        bail!("meal description is empty");
    }

    let pb = spinner("Analyzing...")?;
    let result = gateway.analyze_meal(description);
    pb.finish_and_clear();

    let analysis = match result {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::warn!(error = %e, "Meal analysis failed");
            bail!(MEAL_ERROR_MESSAGE);
        }
    };

    if format == OutputFormat::Json {
        println!(
            "{}",
            serde_json::to_string_pretty(&analysis).context("failed to serialize analysis")?
        );
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

fn print_analysis(analysis: &MealAnalysis) {
    println!("Analysis Results");
    println!("================");
    println!();
    println!("\"{}\"", analysis.summary);

    let sections = [
        ("Good for Sugar", &analysis.good_for_sugar),
        ("Consider Moderation", &analysis.bad_for_sugar),
        ("Healthier Suggestions", &analysis.suggestions),
    ];
    for (title, items) in sections {
        if items.is_empty() {
            continue;
        }
        println!();
        println!("{}:", title);
        for item in items {
            println!("  • {}", item);
        }
    }

    println!();
    println!("Disclaimer: This analysis is AI-generated and for informational purposes only. It is not a substitute for professional medical advice.");
}

fn run_ask(gateway: &dyn HealthGateway, prompt: &str) -> Result<()> {
    if prompt.trim().is_empty() {
        bail!("question is empty");
    }

    let pb = spinner("Thinking...")?;
    let result = gateway.health_advice(prompt);
    pb.finish_and_clear();

    match result {
        Ok(reply) => {
            println!("{}", reply);
            Ok(())
        }
        Err(e) => {
            tracing::warn!(error = %e, "Health advice failed");
            bail!(ADVICE_ERROR_MESSAGE)
        }
    }
}
