//! Printer configuration resolution
//!
//! The pipeline receives one immutable [`PrinterConfiguration`], built from
//! environment defaults overlaid with persisted settings.
//!
//! | Variable | Default |
//! |----------|---------|
//! | PRINTER_ENABLED | false |
//! | PRINTER_TRANSPORT | os-spooler |
//! | PRINTER_DEVICE_PATH | - |
//! | PRINTER_NETWORK_HOST | - |
//! | PRINTER_NETWORK_PORT | 9100 |
//! | PRINTER_SPOOLER_TARGET | - |
//! | PRINTER_TIMEOUT_SECONDS | 5 |
//! | PRINTER_PAPER_WIDTH | 32 (1..=256) |
//! | PRINTER_CURRENCY_SYMBOL | $ |

use std::path::{Path, PathBuf};

use shared::models::{MAX_PAPER_WIDTH, PrinterConfiguration, PrinterSettings, TransportType};
use thiserror::Error;
use tracing::{debug, warn};

pub const ENV_ENABLED: &str = "PRINTER_ENABLED";
pub const ENV_TRANSPORT: &str = "PRINTER_TRANSPORT";
pub const ENV_DEVICE_PATH: &str = "PRINTER_DEVICE_PATH";
pub const ENV_NETWORK_HOST: &str = "PRINTER_NETWORK_HOST";
pub const ENV_NETWORK_PORT: &str = "PRINTER_NETWORK_PORT";
pub const ENV_SPOOLER_TARGET: &str = "PRINTER_SPOOLER_TARGET";
pub const ENV_TIMEOUT_SECONDS: &str = "PRINTER_TIMEOUT_SECONDS";
pub const ENV_PAPER_WIDTH: &str = "PRINTER_PAPER_WIDTH";
pub const ENV_CURRENCY_SYMBOL: &str = "PRINTER_CURRENCY_SYMBOL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Fallback configuration from the process environment
pub fn from_env() -> PrinterConfiguration {
    from_vars(|key| std::env::var(key).ok())
}

/// Fallback configuration from an arbitrary variable source
///
/// Missing or unparsable values keep their defaults.
pub fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> PrinterConfiguration {
    let defaults = PrinterConfiguration::default();
    let text = |key: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    PrinterConfiguration {
        enabled: text(ENV_ENABLED)
            .and_then(|v| parse_bool(&v))
            .unwrap_or(defaults.enabled),
        transport: text(ENV_TRANSPORT)
            .map(TransportType::from)
            .unwrap_or(defaults.transport),
        device_path: text(ENV_DEVICE_PATH),
        network_host: text(ENV_NETWORK_HOST),
        network_port: text(ENV_NETWORK_PORT)
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.network_port),
        spooler_target: text(ENV_SPOOLER_TARGET),
        timeout_seconds: text(ENV_TIMEOUT_SECONDS)
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.timeout_seconds),
        paper_width: text(ENV_PAPER_WIDTH)
            .and_then(|v| v.parse().ok())
            .filter(|w| (1..=MAX_PAPER_WIDTH).contains(w))
            .unwrap_or(defaults.paper_width),
        currency_symbol: text(ENV_CURRENCY_SYMBOL).unwrap_or(defaults.currency_symbol),
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Overlay persisted settings on the fallback
///
/// Every field set in `persisted` wins, except a paper width above
/// [`MAX_PAPER_WIDTH`], which is ignored. The result width is clamped to
/// `1..=MAX_PAPER_WIDTH`.
pub fn resolve(
    fallback: &PrinterConfiguration,
    persisted: Option<&PrinterSettings>,
) -> PrinterConfiguration {
    let mut config = fallback.clone();

    if let Some(s) = persisted {
        if let Some(enabled) = s.enabled {
            config.enabled = enabled;
        }
        if let Some(transport) = &s.transport {
            config.transport = transport.clone();
        }
        if let Some(path) = &s.device_path {
            config.device_path = Some(path.clone());
        }
        if let Some(host) = &s.network_host {
            config.network_host = Some(host.clone());
        }
        if let Some(port) = s.network_port {
            config.network_port = port;
        }
        if let Some(target) = &s.spooler_target {
            config.spooler_target = Some(target.clone());
        }
        if let Some(timeout) = s.timeout_seconds {
            config.timeout_seconds = timeout;
        }
        if let Some(width) = s.paper_width {
            if width <= MAX_PAPER_WIDTH {
                config.paper_width = width;
            } else {
                warn!(width, max = MAX_PAPER_WIDTH, "Ignoring persisted paper width");
            }
        }
        if let Some(symbol) = &s.currency_symbol {
            config.currency_symbol = symbol.clone();
        }
    }

    config.paper_width = config.paper_width.clamp(1, MAX_PAPER_WIDTH);
    config
}

/// Load persisted printer settings from a JSON file
pub fn load_settings(path: impl AsRef<Path>) -> Result<PrinterSettings, ConfigError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), "Loaded printer settings");
    Ok(settings)
}
