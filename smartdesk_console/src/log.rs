//! Logging setup for the console.
//!
//! The filter is taken from `SMARTDESK_LOG`, then `RUST_LOG`, and defaults to
//! `warn`. A bare level in `SMARTDESK_LOG` (e.g. `debug`) applies to the
//! smartdesk crates only. Logs go to stderr so that stdout only carries
//! command output.

use std::env;

use tracing_subscriber::EnvFilter;

pub fn init() {
    let directives = filter_directives(|name| env::var(name).ok());
    // a subscriber installed earlier (e.g. by a test harness) wins
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directives))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Picks the filter directives: `SMARTDESK_LOG` > `RUST_LOG` > `warn`.
fn filter_directives(var: impl Fn(&str) -> Option<String>) -> String {
    if let Some(level) = var("SMARTDESK_LOG") {
        return expand_smartdesk_log(&level);
    }

    if let Some(rust_log) = var("RUST_LOG") {
        return rust_log;
    }

    "warn".to_owned()
}

fn expand_smartdesk_log(level: &str) -> String {
    if level.contains('=') || level.contains(',') {
        return level.to_owned();
    }
    format!("warn,smartdesk_core={level},smartdesk_console={level}")
}
