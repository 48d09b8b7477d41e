//! Metriq CLI
//!
//! Translates natural-language prompts into metric queries against a
//! time-series backend, grounded in a service ontology.

mod engine;
mod repl;

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::Colorize;
use engine::{Engine, ResolverMode};
use metriq_backend::BackendClient;
use metriq_core::AppConfig;
use metriq_ontology::{Ontology, ProjectedContext};
use metriq_translator::{OpenAiTranslator, Translator};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "metriq",
    version,
    about = "Natural-language metric queries grounded in a service ontology",
    long_about = "Ask questions like \"99th percentile latency for unicorn over the \
                  last 15 minutes\" and get them resolved, validated against the \
                  service ontology, and dispatched to the metrics backend."
)]
struct Cli {
    /// Path to the ontology document
    #[arg(short, long, env = "METRIQ_ONTOLOGY")]
    ontology: Option<String>,

    /// Resolution strategy
    #[arg(short, long, value_enum, default_value = "auto")]
    resolver: ResolverMode,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a single prompt, print the summary, and exit
    Ask {
        /// Natural-language prompt
        prompt: String,
    },

    /// Start the interactive prompt loop
    Repl,

    /// Print the grounding context projected from the ontology
    Context,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}: {e:#}", "Error".red().bold());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::load().context("failed to load configuration")?;
    let ontology_path = cli
        .ontology
        .unwrap_or_else(|| config.ontology.path.clone());

    // Loaded once and shared as an immutable snapshot; there is no write
    // path after this point.
    let ontology = Arc::new(
        Ontology::load(&ontology_path)
            .with_context(|| format!("failed to load ontology from {ontology_path}"))?,
    );

    match cli.command {
        Commands::Context => {
            let projected = ProjectedContext::project(&ontology);
            println!("{}", projected.to_json()?);
            Ok(())
        }
        Commands::Ask { prompt } => {
            let engine = build_engine(&config, ontology, cli.resolver)?;
            let outcome = engine.run_prompt(&prompt).await?;
            println!("{} {}", "Query:".dimmed(), outcome.compiled.query.dimmed());
            println!("{}", outcome.summary);
            Ok(())
        }
        Commands::Repl => {
            let engine = build_engine(&config, ontology, cli.resolver)?;
            repl::run(&engine).await
        }
    }
}

fn build_engine(
    config: &AppConfig,
    ontology: Arc<Ontology>,
    mode: ResolverMode,
) -> anyhow::Result<Engine> {
    let backend =
        BackendClient::from_config(&config.backend).context("backend client setup failed")?;

    let translator: Option<Box<dyn Translator>> = if config.translator.is_configured() {
        let client = OpenAiTranslator::from_config(&config.translator)
            .context("translator client setup failed")?;
        info!(model = %config.translator.model, "translator configured");
        Some(Box::new(client))
    } else {
        if mode == ResolverMode::Llm {
            anyhow::bail!("resolver mode 'llm' requires a translator API key");
        }
        warn!("no translator API key configured, falling back to heuristic resolution");
        None
    };

    Ok(Engine::new(ontology, mode, backend, translator))
}
