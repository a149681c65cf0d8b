mod api;
mod gateway;

use clap::{Parser, Subcommand};
use pulso_core::{
    config::{self, shellexpand, LoggingConfig},
    message::ChatMessage,
    traits::Provider,
};
use pulso_providers::openai::OpenAiProvider;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "pulso",
    version,
    about = "Pulso: fitness-coaching chat service with weekly workout plans"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve,
    /// Show the effective configuration and whether a credential is set.
    Status,
    /// Run one chat turn through the pipeline and print the JSON response.
    Ask {
        /// Profile goal: bajar, masa, mantener or resistencia.
        #[arg(long)]
        goal: Option<String>,
        /// Training days per week (1-7).
        #[arg(long)]
        days: Option<u8>,
        /// The message to send.
        #[arg(trailing_var_arg = true)]
        message: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let cfg = load_config(&cli.config, std::io::stderr)?;
    let _log_guard = init_tracing(&cfg.logging);

    match cli.command {
        Commands::Serve => {
            let gw = Arc::new(build_gateway(&cfg)?);
            match gw.provider_name() {
                Some(name) => {
                    info!("Pulso starting with provider '{name}' ({})", cfg.provider.model)
                }
                None => warn!("No API key configured, every reply will use the offline planner"),
            }
            api::serve(&cfg.server, gw).await?;
        }
        Commands::Status => {
            println!("Pulso: status\n");
            println!("Config: {}", cli.config);
            println!("Listen: {}:{}", cfg.server.host, cfg.server.port);
            println!("Coach:  {}", cfg.coach.name);
            println!();
            println!("  endpoint: {}", cfg.provider.base_url);
            println!("  model:    {}", cfg.provider.model);
            println!(
                "  api key:  {}",
                if cfg.provider.has_credential() {
                    "configured"
                } else {
                    "missing (offline planner only)"
                }
            );
            println!(
                "  defaults: {} training days, {} min sessions",
                cfg.coach.default_training_days, cfg.coach.default_session_minutes
            );
        }
        Commands::Ask {
            goal,
            days,
            message,
        } => {
            if message.is_empty() {
                anyhow::bail!(
                    "no message provided. Usage: pulso ask [--goal G] [--days N] <message>"
                );
            }

            let mut profile = Map::new();
            if let Some(goal) = goal {
                profile.insert("goal".to_string(), Value::from(goal));
            }
            if let Some(days) = days {
                profile.insert("trainingDays".to_string(), Value::from(days));
            }

            let gw = build_gateway(&cfg)?;
            let messages = [ChatMessage::user(message.join(" "))];
            let response = gw.handle_chat(&messages, &Value::Object(profile)).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Build the gateway. Without a credential no client is constructed.
fn build_gateway(cfg: &config::Config) -> anyhow::Result<gateway::Gateway> {
    let provider: Option<Arc<dyn Provider>> = if cfg.provider.has_credential() {
        Some(Arc::new(OpenAiProvider::from_config(&cfg.provider)?))
    } else {
        None
    };
    Ok(gateway::Gateway::new(provider, cfg.coach.clone()))
}

/// Load the config file and apply environment overrides.
///
/// The global subscriber is built from the result, so events emitted while
/// loading go to a temporary subscriber writing to `writer`.
fn load_config<W>(path: &str, writer: W) -> anyhow::Result<config::Config>
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let bootstrap = fmt().with_env_filter(filter).with_writer(writer).finish();

    tracing::subscriber::with_default(bootstrap, || -> anyhow::Result<config::Config> {
        let mut cfg = config::load(path)?;
        cfg.apply_process_env();
        Ok(cfg)
    })
}

/// Install the global subscriber: stderr always, plus a daily-rolling file
/// when `logging.log_dir` is set. The guard must live until exit.
fn init_tracing(cfg: &LoggingConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    let (file_layer, guard) = match cfg.log_dir.as_deref() {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(shellexpand(dir), "pulso.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Write};
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_config_logs_missing_file() {
        let captured = Captured::default();
        let sink = captured.clone();
        let cfg = load_config("/nonexistent/pulso/config.toml", move || sink.clone()).unwrap();
        assert_eq!(cfg.coach.name, "Pulso");

        let output = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Config file not found at /nonexistent/pulso/config.toml"));
    }

    #[test]
    fn test_load_config_reports_parse_errors() {
        let path = std::env::temp_dir().join("pulso-main-bad-config.toml");
        std::fs::write(&path, "[server\nport = ").unwrap();
        let err = load_config(path.to_str().unwrap(), io::sink).unwrap_err();
        assert!(err.to_string().contains("failed to parse config"));
        let _ = std::fs::remove_file(&path);
    }
}
