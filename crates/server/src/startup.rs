use std::{env, net::SocketAddr, path::Path};

use axum::ServiceExt;
use axum::extract::Request;
use migration::MigratorTrait;
use models::db::{connect_with_config, DatabaseConfig};
use sea_orm::DatabaseConnection;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

/// Everything `run` needs, resolved from config file or environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub addr: SocketAddr,
    pub database: DatabaseConfig,
    /// `compact` or `json`
    pub log_format: String,
    pub worker_threads: Option<usize>,
}

pub fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load settings from `CONFIG_PATH`, falling back to env vars when no config file
/// exists. A config file that exists but is invalid is an error.
pub fn load_settings() -> Result<Settings, StartupError> {
    load_settings_from(&configs::config_path())
}

pub fn load_settings_from(path: &str) -> Result<Settings, StartupError> {
    if Path::new(path).exists() {
        let cfg = configs::AppConfig::load_and_validate_from(path)
            .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
        return Ok(Settings {
            addr: parse_addr(&cfg.server.host, cfg.server.port)?,
            database: DatabaseConfig::from(&cfg.database),
            log_format: cfg.logging.format,
            worker_threads: cfg.server.worker_threads,
        });
    }

    let host = env::var("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port = env::var("SERVER_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);
    Ok(Settings {
        addr: parse_addr(&host, port)?,
        database: DatabaseConfig::from_env(),
        log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "compact".to_string()),
        worker_threads: env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()),
    })
}

fn parse_addr(host: &str, port: u16) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", host, port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address {host}:{port}: {e}")))
}

/// Connect and bring the schema up to date.
pub async fn prepare_database(cfg: &DatabaseConfig) -> Result<DatabaseConnection, StartupError> {
    let db = connect_with_config(cfg).await.map_err(|e| StartupError::Database(e.to_string()))?;
    migration::Migrator::up(&db, None).await.map_err(|e| StartupError::Database(e.to_string()))?;
    info!(event = "migrated", "database schema up to date");
    Ok(db)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for Ctrl+C; shutdown only by kill");
        std::future::pending::<()>().await;
    }
    info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
}

/// Public entry: build the app and run the HTTP server until Ctrl+C.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let db = prepare_database(&settings.database).await?;

    let app = routes::build_app(ServerState::new(db), build_cors());

    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    info!(addr = %settings.addr, "starting cards api");
    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> String {
        let path = env::temp_dir().join(format!("cards-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, content).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn file_settings_carry_logging_and_threads() {
        let path = write_config(
            r#"
            [server]
            host = "0.0.0.0"
            port = 9090
            worker_threads = 2

            [database]
            url = "sqlite::memory:"

            [logging]
            format = "json"
            "#,
        );
        let settings = load_settings_from(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(settings.addr, "0.0.0.0:9090".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.database.url, "sqlite::memory:");
        assert_eq!(settings.log_format, "json");
        assert_eq!(settings.worker_threads, Some(2));
    }

    #[test]
    fn invalid_file_is_not_replaced_by_env() {
        let path = write_config("[server]\nhost = \"127.0.0.1\"\nport = 0\n");
        let err = load_settings_from(&path).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert!(matches!(err, StartupError::InvalidConfig(_)), "got {err:?}");
    }

    #[test]
    fn missing_file_falls_back_to_env() {
        let path = env::temp_dir().join(format!("absent-{}.toml", uuid::Uuid::new_v4()));
        let settings = load_settings_from(&path.to_string_lossy()).unwrap();
        assert!(!settings.log_format.is_empty());
        assert_eq!(settings.database.url, models::db::DatabaseConfig::from_env().url);
    }
}
