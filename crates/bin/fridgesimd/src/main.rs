//! # fridgesimd: smart-fridge controller simulator daemon
//!
//! Composition root that wires the built-in script into the WebSocket
//! adapter and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Build the script catalog, applying flow overrides and the stage delay
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (SIGTERM/SIGINT)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer, no domain logic belongs here.

mod config;

use fridgesim_adapter_fixtures::standard_catalog;
use fridgesim_adapter_http_axum::router;
use fridgesim_adapter_http_axum::state::AppState;
use fridgesim_domain::catalog::ScriptCatalog;
use fridgesim_domain::error::CatalogError;
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, ConfigError};

/// Everything that can stop the daemon before or while serving.
#[derive(Debug, thiserror::Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("invalid log filter")]
    LogFilter(#[from] tracing_subscriber::filter::ParseError),
    #[error("invalid script catalog")]
    Catalog(#[from] CatalogError),
    #[error("failed to bind {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error")]
    Serve(#[source] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = Config::load()?;
    init_tracing(&config.logging.filter)?;

    let catalog = build_catalog(&config)?;
    tracing::info!(
        commands = catalog.definitions().count(),
        stage_delay_ms = config.script.stage_delay_ms,
        policy = ?config.script.policy(),
        "script catalog loaded"
    );

    let app = router::build(AppState::new(catalog, config.script.policy()));

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;
    tracing::info!(address = %bind_addr, "fridgesimd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(StartupError::Serve)?;

    tracing::info!("fridgesimd stopped");
    Ok(())
}

fn init_tracing(filter: &str) -> Result<(), StartupError> {
    let filter = EnvFilter::try_new(filter)?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    Ok(())
}

/// Built-in script with the configured stage delay and flow overrides.
fn build_catalog(config: &Config) -> Result<ScriptCatalog, CatalogError> {
    config
        .flow
        .iter()
        .fold(
            standard_catalog().stage_delay_ms(config.script.stage_delay_ms),
            |builder, (command, flow)| builder.flow_override(command.as_str(), *flow),
        )
        .build()
}

async fn shutdown_signal() {
    #[cfg(unix)]
    {
        tokio::select! {
            () = ctrl_c() => {},
            () = terminate() => {},
        }
    }

    #[cfg(not(unix))]
    {
        ctrl_c().await;
    }

    tracing::info!("shutdown requested");
}

async fn ctrl_c() {
    if let Err(err) = signal::ctrl_c().await {
        tracing::warn!(error = %err, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn terminate() {
    use tokio::signal::unix::{SignalKind, signal};

    match signal(SignalKind::terminate()) {
        Ok(mut term) => {
            term.recv().await;
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to install SIGTERM handler");
            std::future::pending::<()>().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fridgesim_domain::command::FlowDirective;
    use std::time::Duration;

    #[test]
    fn should_build_standard_catalog_from_default_config() {
        let catalog = build_catalog(&Config::default()).unwrap();
        assert!(catalog.is_known("check_machine_state"));
        assert!(catalog.is_known("smart_fridge_door_open"));
        assert_eq!(catalog.stage_delay(), Duration::from_secs(5));
    }

    #[test]
    fn should_apply_flow_override_and_stage_delay() {
        let mut config = Config::default();
        config.script.stage_delay_ms = 20;
        config
            .flow
            .insert("check_machine_state".to_string(), FlowDirective::error(2));

        let catalog = build_catalog(&config).unwrap();
        assert_eq!(
            catalog.definition("check_machine_state").unwrap().flow,
            FlowDirective::error(2)
        );
        assert_eq!(catalog.stage_delay(), Duration::from_millis(20));
    }

    #[test]
    fn should_reject_override_of_unknown_command() {
        let mut config = Config::default();
        config
            .flow
            .insert("make_coffee".to_string(), FlowDirective::success());

        assert_eq!(
            build_catalog(&config).unwrap_err(),
            CatalogError::UnknownCommand("make_coffee".to_string())
        );
    }

    #[test]
    fn should_reject_unresolvable_error_index() {
        let mut config = Config::default();
        config
            .flow
            .insert("check_machine_state".to_string(), FlowDirective::error(42));

        assert!(matches!(
            build_catalog(&config),
            Err(CatalogError::ErrorIndexOutOfRange { index: 42, .. })
        ));
    }

    #[test]
    fn should_reject_invalid_log_filter() {
        assert!(matches!(
            init_tracing("fridgesimd=loud"),
            Err(StartupError::LogFilter(_))
        ));
    }
}
