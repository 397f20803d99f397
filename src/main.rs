use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use dinopilot::app;
use dinopilot::config::AppConfig;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Failure is reported on the LED and the log, never the exit code.
    match app::run(&AppConfig::default()) {
        Ok(triggered) => info!(triggered, "run finished"),
        Err(err) => error!(%err, "run ended with failure"),
    }
}
