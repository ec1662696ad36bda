// src/server.rs
// Service wiring and the HTTP server loop

use std::net::SocketAddr;

use tracing::{info, warn};

use crate::api::{create_router, AppState};
use crate::catalog::CourseCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::llm::client_from_config;
use crate::persona::{HistoryPolicy, PersonaRouter};

/// Construct every service named by the configuration
pub fn build_state(config: &Config) -> Result<AppState> {
    let catalog = match &config.courses_path {
        Some(path) => CourseCatalog::from_path(path)?,
        None => CourseCatalog::builtin(),
    };
    info!(courses = catalog.len(), "Course catalog loaded");

    let client = client_from_config(&config.gemini)?;
    let personas = PersonaRouter::new(client).with_history_policy(HistoryPolicy {
        max_entries: config.max_viewed_courses,
        dedupe: true,
    });

    Ok(AppState::new(catalog, personas).with_failure_mode(config.chat_failure_mode))
}

/// Serve until Ctrl+C or SIGTERM
pub async fn run(addr: SocketAddr, state: AppState) -> Result<()> {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!(addr = %listener.local_addr()?, "EconoMind API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

/// Graceful shutdown signal handler for SIGTERM and Ctrl+C
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, draining connections...");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ChatFailureMode;
    use std::io::Write;

    #[test]
    fn test_build_state_defaults() {
        let state = build_state(&Config::default()).unwrap();
        assert_eq!(state.catalog.len(), 2);
        assert_eq!(state.failure_mode, ChatFailureMode::Degrade);
        assert_eq!(state.personas.model(), "gemini-2.0-flash");
    }

    #[test]
    fn test_build_state_with_course_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[[courses]]\nid = \"only\"\ntitle = \"Only\"\ndescription = \"d\"\ncontent = \"c\"\n"
        )
        .unwrap();

        let config = Config {
            courses_path: Some(file.path().to_path_buf()),
            chat_failure_mode: ChatFailureMode::Error,
            ..Config::default()
        };
        let state = build_state(&config).unwrap();
        assert_eq!(state.catalog.len(), 1);
        assert!(state.catalog.get_course("only").is_ok());
        assert_eq!(state.failure_mode, ChatFailureMode::Error);
    }

    #[test]
    fn test_build_state_rejects_bad_course_file() {
        let config = Config {
            courses_path: Some("/definitely/not/here.toml".into()),
            ..Config::default()
        };
        assert!(build_state(&config).is_err());
    }
}
