//! Compliance Assistant
//!
//! Command-line front end and HTTP daemon for the compliance assistant.

use compliance_assistant::telemetry::init_logging;
use compliance_assistant::{ActionMetadata, ComplianceAssistant, Config, Error, RiskLevel};

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Compliance Assistant
#[derive(Parser, Debug)]
#[command(name = "compliance-assistant")]
#[command(about = "Risk-tier classification for compliance-policy answers")]
#[command(version)]
struct Args {
    /// Configuration file path
    #[arg(short, long, env = "CONFIG_FILE", global = true)]
    config: Option<PathBuf>,

    /// Compliance API base URL
    #[arg(long, env = "COMPLIANCE_API_URL", global = true)]
    api_url: Option<String>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", global = true)]
    log_level: Option<String>,

    /// Enable JSON log format
    #[arg(long, env = "JSON_LOGS", global = true)]
    json_logs: bool,

    /// Disable cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Disable telemetry
    #[arg(long, global = true)]
    no_telemetry: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP service
    Serve {
        /// HTTP server port
        #[arg(long, env = "PORT")]
        port: Option<u16>,

        /// HTTP bind address
        #[arg(long, env = "HOST")]
        host: Option<String>,
    },

    /// Classify a raw compliance API response
    Classify {
        /// JSON file to read, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        file: String,
    },

    /// Ask the compliance API a question
    Ask {
        /// The policy question
        question: String,
    },

    /// Upload PDF policy documents
    Upload {
        /// Files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Delete a policy document
    Delete {
        /// Document name
        name: String,
    },

    /// Record a remediation action
    Action {
        /// Action key, e.g. `escalateVP`
        key: String,

        /// Risk level of the result being acted on
        #[arg(long, default_value = "moderate")]
        risk_level: RiskLevel,

        /// Rule summary of the result being acted on
        #[arg(long)]
        rule: String,

        /// Details of the result being acted on
        #[arg(long, default_value = "")]
        details: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };

    // Apply command line overrides
    if let Some(url) = &args.api_url {
        config.api.base_url = Some(url.clone());
    }
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    if args.json_logs {
        config.logging.json = true;
    }
    if args.no_cache {
        config.cache.enabled = false;
    }
    if args.no_telemetry {
        config.telemetry.enabled = false;
    }
    if let Command::Serve { port, host } = &args.command {
        if let Some(port) = port {
            config.server.port = *port;
        }
        if let Some(host) = host {
            config.server.host = host.clone();
        }
    }

    config.validate()?;
    init_logging(&config.logging)?;

    let assistant = ComplianceAssistant::builder()
        .with_config(config.clone())
        .build()?;

    match args.command {
        Command::Serve { .. } => {
            info!("Starting Compliance Assistant v{}", compliance_assistant::VERSION);
            info!("Compliance API: {}", config.api.base_url.as_deref().unwrap_or("not configured"));
            info!("Cache enabled: {}", config.cache.enabled);
            info!("Telemetry enabled: {}", config.telemetry.enabled);

            compliance_assistant::http::serve(Arc::new(assistant), &config.server.bind_addr())
                .await?;
        }
        Command::Classify { file } => {
            let input = read_input(&file)?;
            let response: serde_json::Value =
                serde_json::from_str(&input).context("input is not valid JSON")?;
            print_json(&assistant.classify(&response))?;
        }
        Command::Ask { question } => {
            print_json(&assistant.ask(&question).await?)?;
        }
        Command::Upload { files } => {
            print_json(&assistant.upload_documents(files.as_slice()).await?)?;
        }
        Command::Delete { name } => {
            print_json(&assistant.delete_document(&name).await?)?;
        }
        Command::Action {
            key,
            risk_level,
            rule,
            details,
        } => {
            let metadata = ActionMetadata {
                risk_level,
                rule_triggered: rule,
                timestamp: chrono::Utc::now(),
                details,
            };
            print_json(&assistant.record_action(&key, &metadata))?;
        }
    }

    Ok(())
}

fn read_input(file: &str) -> Result<String, Error> {
    if file == "-" {
        let mut input = String::new();
        std::io::stdin().read_to_string(&mut input)?;
        Ok(input)
    } else {
        Ok(std::fs::read_to_string(file)?)
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
