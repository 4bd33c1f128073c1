//! Startup sequence helpers for the `nowplay` binary
//!
//! Tracing comes up first, with a filter from `RUST_LOG` or `--log-level`,
//! so config loading is logged. Once the config file is read its
//! `log_level` is swapped in through a reload handle, unless `RUST_LOG`
//! was set.

use std::path::Path;

use nowplay_common::config::{self, PollerConfig, TomlConfig, DEFAULT_LOG_LEVEL};
use nowplay_common::Result;
use tracing::warn;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Handle for replacing the active filter after config resolution
pub type FilterHandle = reload::Handle<EnvFilter, Registry>;

/// Filter enabling `level` for the poller's own crates
pub fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::new(format!(
        "nowplay={level},nowplay_poller={level},nowplay_common={level}",
        level = level
    ))
}

/// Filter layer used before the config file has been read
///
/// `RUST_LOG` wins; otherwise `--log-level`, otherwise the compiled default.
pub fn reloadable_filter(
    cli_log_level: Option<&str>,
) -> (reload::Layer<EnvFilter, Registry>, FilterHandle) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| env_filter(cli_log_level.unwrap_or(DEFAULT_LOG_LEVEL)));
    reload::Layer::new(filter)
}

/// Read the config file (explicit or default location) and resolve settings
pub fn load_config(
    cli_base_url: Option<&str>,
    cli_log_level: Option<&str>,
    config_path: Option<&Path>,
) -> Result<PollerConfig> {
    let toml_config = TomlConfig::load_or_default(config_path)?;
    config::resolve(cli_base_url, cli_log_level, &toml_config)
}

/// Switch the active filter to the resolved log level
///
/// Returns `false` when `RUST_LOG` is set (it stays in charge) or the
/// reload fails.
pub fn apply_log_level(handle: &FilterHandle, config: &PollerConfig) -> bool {
    if std::env::var_os("RUST_LOG").is_some() {
        return false;
    }

    match handle.reload(env_filter(&config.log_level)) {
        Ok(()) => true,
        Err(e) => {
            warn!("Failed to apply log level {:?}: {}", config.log_level, e);
            false
        }
    }
}

/// One-line build identification, e.g. `v0.1.0 [1a2b3c4d] built 2026-10-19T08:00:00Z (debug)`
pub fn build_id() -> String {
    let profile = if cfg!(debug_assertions) { "debug" } else { "release" };
    format!(
        "v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("NOWPLAY_GIT_HASH"),
        env!("NOWPLAY_BUILD_TIMESTAMP"),
        profile
    )
}
