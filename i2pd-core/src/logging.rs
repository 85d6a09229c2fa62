use std::fs::OpenOptions;
use std::sync::Mutex;

use i2pd_config::{LogTarget, RouterOptions};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

/// Install the process-wide log subscriber described by the router options.
///
/// Only the first successful call installs anything; later calls leave the
/// existing subscriber in place.
pub fn init_logging(options: &RouterOptions) {
    let level = match options.loglevel.as_str() {
        "none" => return,
        "critical" => "error",
        other => other,
    };
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let installed = match options.log {
        LogTarget::None => return,
        LogTarget::Stdout => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .try_init()
            .is_ok(),
        LogTarget::File => {
            let path = options.logfile_path();
            let file = match OpenOptions::new().create(true).append(true).open(&path) {
                Ok(file) => file,
                Err(e) => {
                    warn!("can't open log file {}: {}", path.display(), e);
                    return;
                }
            };
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .is_ok()
        }
    };

    if !installed {
        debug!("log subscriber already installed, keeping it");
    }
}
