use std::sync::Arc;

use anyhow::{Context as _, Result};
use campusdesk_api::{BackendClient, BackendConfig};
use campusdesk_app::{runloop, App};
use campusdesk_config::CampusdeskConfig;
use campusdesk_session::FileSessionStore;
use campusdesk_ui::print_notification;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let config = CampusdeskConfig::load()?;
    init_file_logging(&config.log_path)?;

    let backend = BackendConfig::new(config.backend_url.as_str(), config.request_timeout_secs);
    let api = BackendClient::new(&backend)?;
    let store = FileSessionStore::new(config.session_path.as_str());

    let mut app = App::new(Arc::new(api), Arc::new(store));
    let banner = app.startup().await;
    print_notification(&banner);

    runloop::run(&mut app).await
}

/// Logging goes to a file so the interactive screen stays clean.
fn init_file_logging(log_path: &str) -> Result<()> {
    let path = std::path::Path::new(log_path);
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create log directory '{}'", parent.display()))?;
        }
    }

    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file '{}'", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_ansi(false)
        .with_writer(std::sync::Mutex::new(log_file))
        .init();

    Ok(())
}
