use maintenance_pro::{api, config, state};
use std::net::SocketAddr;
use std::sync::{Arc, RwLock};
use tracing::Level;

fn init_tracing(level: Level) {
    let subscriber = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match config::load_default() {
        Ok(config) => config,
        Err(err) => {
            init_tracing(Level::INFO);
            tracing::error!(
                config_path = config::DEFAULT_CONFIG_PATH,
                error = %err,
                "Failed to load configuration"
            );
            return Err(err.into());
        }
    };
    init_tracing(config.log_level());
    tracing::info!(
        app = %config.app.name,
        config_path = config::DEFAULT_CONFIG_PATH,
        "maintenance-pro starting"
    );

    let settings = config.dashboard_settings();
    tracing::info!(
        max_range_miles = settings.max_range_miles,
        maintenance_tasks = settings.maintenance_tasks.len(),
        "Dashboard settings loaded"
    );
    let state = Arc::new(RwLock::new(state::AppState::with_settings(settings)));

    let app = api::router(state);
    let port = config.server_port();
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::config;

    #[test]
    fn default_config_is_valid_toml() -> Result<(), Box<dyn std::error::Error>> {
        let _config = config::load_default()?;
        Ok(())
    }

    #[test]
    fn missing_config_file_fails_before_startup() {
        let result = config::load_from_path("config/does-not-exist.toml");
        assert!(matches!(result, Err(config::ConfigError::Read(_))));
    }
}
