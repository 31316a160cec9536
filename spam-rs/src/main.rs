//! Command line front end for the SMS spam classifier
//!
//! ```bash
//! # Classify a message
//! spam-rs classify "Congratulations! You've won a guaranteed prize."
//!
//! # Classify one of the built-in examples
//! spam-rs classify --sample 3
//!
//! # Classify messages typed on stdin, one per line
//! spam-rs interactive
//!
//! # Serve the demo page and JSON API
//! spam-rs --config config.toml serve --addr 127.0.0.1:8501
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use spam_rs::api::{ApiServer, ClassifyResponse};
use spam_rs::config::{Config, LoggingConfig};
use spam_rs::render;
use spam_rs::samples::{sample, SAMPLE_MESSAGES};
use spam_rs::spam::SpamDetector;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_CONFIG_FILE: &str = "config.toml";

#[derive(Parser)]
#[command(name = "spam-rs")]
#[command(about = "Classify SMS messages as spam or not spam", long_about = None)]
struct Cli {
    /// Configuration file (defaults to ./config.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a single message
    Classify {
        /// Message text
        text: Option<String>,
        /// Use an example message instead (see `samples`)
        #[arg(short, long, conflicts_with = "text")]
        sample: Option<usize>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the example messages
    Samples,
    /// Read messages from stdin, one per line, until EOF
    Interactive,
    /// Serve the demo page and JSON API
    Serve {
        /// Listen address (overrides the configuration)
        #[arg(long)]
        addr: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref())?;
    init_logging(&config.logging);

    info!("Starting spam-rs v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Samples => {
            for (index, message) in SAMPLE_MESSAGES.iter().enumerate() {
                println!("[{}] {}", index, message);
            }
        }
        Commands::Classify { text, sample: index, json } => {
            let message = match (text, index) {
                (Some(text), _) => text,
                (None, Some(index)) => sample(index)
                    .with_context(|| format!("no example message with index {}", index))?
                    .to_string(),
                (None, None) => anyhow::bail!("provide a message or --sample <INDEX>"),
            };

            let detector = SpamDetector::from_config(&config);
            match detector.check(&message) {
                Ok(verdict) if json => {
                    let response = ClassifyResponse::from(verdict);
                    println!("{}", serde_json::to_string_pretty(&response)?);
                }
                Ok(verdict) => {
                    for line in render::render_verdict(&verdict) {
                        println!("{}", line);
                    }
                }
                Err(e) => {
                    eprintln!("{}", render::render_error(&e));
                    std::process::exit(1);
                }
            }
        }
        Commands::Interactive => {
            let detector = SpamDetector::from_config(&config);
            run_interactive(&detector)?;
        }
        Commands::Serve { addr } => {
            let addr = addr.unwrap_or_else(|| config.server.listen_addr.clone());
            let detector = Arc::new(SpamDetector::from_config(&config));

            ApiServer::new(detector, addr)
                .run()
                .await
                .context("API server failed")?;
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading configuration from {}", path.display())),
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => Config::from_file(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("loading configuration from {}", DEFAULT_CONFIG_FILE)),
        None => Ok(Config::default()),
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));
    let registry = tracing_subscriber::registry().with(filter);

    match config.format.as_str() {
        "json" => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
        "compact" => registry
            .with(fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
        _ => registry
            .with(fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
    }
}

/// Classify stdin lines until EOF; `:N` picks example N
fn run_interactive(detector: &SpamDetector) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();

    println!("Type a message and press Enter (:N uses example N, Ctrl-D quits).");

    loop {
        print!("> ");
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);

        let message = match line.strip_prefix(':').map(|n| n.trim().parse::<usize>()) {
            Some(Ok(index)) => match sample(index) {
                Some(message) => {
                    println!("{}", message);
                    message
                }
                None => {
                    println!("No example message with index {}", index);
                    continue;
                }
            },
            _ => line,
        };

        match detector.check(message) {
            Ok(verdict) => {
                for line in render::render_verdict(&verdict) {
                    println!("{}", line);
                }
            }
            Err(e) => println!("{}", render::render_error(&e)),
        }
        println!();
    }

    Ok(())
}
