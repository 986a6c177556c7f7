//! Receipt Printer Configuration Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Physical/OS channel used to reach the printer
///
/// Stored as a free-form string ("serial", "usb", "network", "cups", ...).
/// Names that map to no known transport are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TransportType {
    /// POSIX character device (serial port, USB line printer node)
    CharacterDevice,
    /// Raw TCP printer
    Network,
    /// OS print spooler (CUPS `lp`)
    OsSpooler,
    Other(String),
}

impl TransportType {
    pub fn as_str(&self) -> &str {
        match self {
            Self::CharacterDevice => "character-device",
            Self::Network => "network",
            Self::OsSpooler => "os-spooler",
            Self::Other(name) => name,
        }
    }
}

impl From<&str> for TransportType {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "character-device" | "device" | "serial" | "usb" => Self::CharacterDevice,
            "network" | "tcp" => Self::Network,
            "os-spooler" | "spooler" | "cups" => Self::OsSpooler,
            _ => Self::Other(s.to_string()),
        }
    }
}

impl From<String> for TransportType {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<TransportType> for String {
    fn from(t: TransportType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TransportType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Widest paper supported, in characters (80mm heads print 48 to 64)
pub const MAX_PAPER_WIDTH: usize = 256;

/// Resolved receipt printer configuration
///
/// Immutable for the duration of a print job. Which of `device_path`,
/// `network_host`/`network_port` and `spooler_target` matter depends on
/// `transport`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrinterConfiguration {
    pub enabled: bool,
    pub transport: TransportType,
    pub device_path: Option<String>,
    pub network_host: Option<String>,
    pub network_port: u16,
    /// Spooler queue name; falls back to `device_path` when unset
    pub spooler_target: Option<String>,
    pub timeout_seconds: u64,
    /// Paper width in characters (58mm: 32, 80mm: 48)
    pub paper_width: usize,
    pub currency_symbol: String,
}

impl PrinterConfiguration {
    /// Spooler queue name, falling back to the device path
    pub fn spooler_target_name(&self) -> Option<&str> {
        non_empty(self.spooler_target.as_deref()).or_else(|| non_empty(self.device_path.as_deref()))
    }

    /// Human readable target of the configured transport
    pub fn target(&self) -> Option<String> {
        match self.transport {
            TransportType::CharacterDevice => {
                non_empty(self.device_path.as_deref()).map(str::to_string)
            }
            TransportType::Network => non_empty(self.network_host.as_deref())
                .map(|host| format!("{}:{}", host, self.network_port)),
            TransportType::OsSpooler => self.spooler_target_name().map(str::to_string),
            TransportType::Other(_) => None,
        }
    }
}

impl Default for PrinterConfiguration {
    fn default() -> Self {
        Self {
            enabled: false,
            transport: TransportType::OsSpooler,
            device_path: None,
            network_host: None,
            network_port: 9100,
            spooler_target: None,
            timeout_seconds: 5,
            paper_width: 32,
            currency_symbol: "$".to_string(),
        }
    }
}

/// Persisted printer settings (partial overrides of the static configuration)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrinterSettings {
    pub enabled: Option<bool>,
    pub transport: Option<TransportType>,
    pub device_path: Option<String>,
    pub network_host: Option<String>,
    pub network_port: Option<u16>,
    pub spooler_target: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub paper_width: Option<usize>,
    pub currency_symbol: Option<String>,
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
