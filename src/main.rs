// src/main.rs

use std::net::{IpAddr, SocketAddr};

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use economind::config::Config;
use economind::server;

#[derive(Parser)]
#[command(name = "economind")]
#[command(about = "Course catalog and Professor/Coach tutoring API")]
#[command(version)]
struct Args {
    /// Address to bind
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: IpAddr,

    /// HTTP port
    #[arg(long, env = "PORT", default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env from the working directory if present
    let _ = dotenvy::dotenv();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = config.gemini.backend.name(),
        model = %config.gemini.model,
        "Starting EconoMind API"
    );

    let state = server::build_state(&config)?;
    server::run(SocketAddr::new(args.host, args.port), state).await?;

    Ok(())
}
