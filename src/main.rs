use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use trustgate::config::Config;
use trustgate::moderation::ModerationGateway;
use trustgate::publication::{ActionType, PublicationGate, Submission};

/// Trustgate: moderation gateway for user-submitted posts.
///
/// Scores text with a hosted LLM and falls back to a local keyword
/// heuristic when the model is unavailable.
#[derive(Parser)]
#[command(name = "trustgate", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one or more texts and print their verdicts
    Evaluate {
        /// Texts to evaluate
        #[arg(required = true)]
        texts: Vec<String>,

        /// Number of texts to evaluate in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,
    },

    /// Run the publication gate on a post
    Review {
        /// Post text (may be empty for image-only posts)
        text: String,

        /// Encoded image payload
        #[arg(long, default_value = "")]
        image_url: String,

        /// 0 = create, 1 = edit, 2 = delete
        #[arg(long, default_value = "0")]
        action: u8,

        /// Post tags
        #[arg(long)]
        tag: Vec<String>,
    },

    /// Show moderation configuration
    Status,

    /// Start the HTTP API
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 8000)
        #[arg(long, default_value = "8000")]
        port: u16,

        /// Address to bind (default: 0.0.0.0)
        #[arg(long, default_value = "0.0.0.0")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("trustgate=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate { texts, concurrency } => {
            let config = Config::load()?;
            let gateway = ModerationGateway::from_config(config.moderation())?;

            info!(count = texts.len(), "Evaluating texts");
            let verdicts = gateway.evaluate_batch(&texts, concurrency).await;
            for (text, verdict) in texts.iter().zip(&verdicts) {
                trustgate::output::terminal::display_verdict(text, verdict);
            }
        }

        Commands::Review {
            text,
            image_url,
            action,
            tag,
        } => {
            let config = Config::load()?;
            let gate = PublicationGate::new(ModerationGateway::from_config(config.moderation())?);

            let submission = Submission {
                text,
                image_url,
                action_type: ActionType::try_from(action)?,
                tags: tag,
            };

            let decision = gate.review(&submission).await?;
            trustgate::output::terminal::display_decision(&decision);
        }

        Commands::Status => {
            let config = Config::load()?;
            let moderation = config.moderation();

            println!("Endpoint: {}", moderation.endpoint);
            println!("Model: {}", moderation.model);
            println!("Timeout: {}s", moderation.timeout.as_secs());
            match config.require_credential() {
                Ok(()) => println!("Credential: {}", "configured".green()),
                Err(e) => println!("Credential: {}\n  {e}", "missing".yellow()),
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let config = Config::load()?;
            let gate = PublicationGate::new(ModerationGateway::from_config(config.moderation())?);
            info!(port, bind = %bind, "Starting HTTP API");
            trustgate::web::run_server(gate, port, &bind).await?;
        }
    }

    Ok(())
}
