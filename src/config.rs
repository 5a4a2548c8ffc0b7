//! # Configuration Management
//!
//! Centralized configuration for the DIS codec.
//!
//! Wire settings (byte order, protocol version, exercise, size ceiling) are
//! fixed per exercise and usually shared by every simulator on the network.
//! Logging settings control the `tracing` subscriber installed by
//! [`crate::utils::logging::init_logging`].
//!
//! ## Configuration Sources
//! - TOML files via `from_file()`
//! - Direct instantiation with defaults
//! - Environment overrides via `from_env()` (`DIS_CODEC_*` variables)

use crate::core::codec::PduCodec;
use crate::core::cursor::ByteOrder;
use crate::core::header::{PduHeader, PduType, DIS_PROTOCOL_VERSION_7, HEADER_LENGTH};
use crate::core::pdu::MAX_PDU_LENGTH;
use crate::error::{DisError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;
use tracing::Level;

/// Default ceiling for a single PDU, sized to fit an Ethernet-jumbo datagram
pub const DEFAULT_MAX_PDU_LENGTH: usize = 8192;

/// Default exercise identifier
pub const DEFAULT_EXERCISE_ID: u8 = 1;

/// Main codec configuration structure that contains all configurable settings
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct CodecConfig {
    /// Wire format configuration
    #[serde(default)]
    pub wire: WireConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CodecConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)
            .map_err(|e| DisError::ConfigError(format!("Failed to open config file: {e}")))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| DisError::ConfigError(format!("Failed to read config file: {e}")))?;

        Self::from_toml(&contents)
    }

    /// Load configuration from TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str::<Self>(content)
            .map_err(|e| DisError::ConfigError(format!("Failed to parse TOML: {e}")))
    }

    /// Load configuration from environment variables
    ///
    /// Unset variables keep their defaults. A variable that is set but cannot
    /// be parsed is an error rather than being silently ignored.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(order) = std::env::var("DIS_CODEC_BYTE_ORDER") {
            config.wire.byte_order = ByteOrder::parse(&order).ok_or_else(|| {
                DisError::ConfigError(format!("Invalid DIS_CODEC_BYTE_ORDER: '{order}'"))
            })?;
        }

        if let Ok(version) = std::env::var("DIS_CODEC_PROTOCOL_VERSION") {
            config.wire.protocol_version = parse_env("DIS_CODEC_PROTOCOL_VERSION", &version)?;
        }

        if let Ok(exercise) = std::env::var("DIS_CODEC_EXERCISE_ID") {
            config.wire.exercise_id = parse_env("DIS_CODEC_EXERCISE_ID", &exercise)?;
        }

        if let Ok(max) = std::env::var("DIS_CODEC_MAX_PDU_LENGTH") {
            config.wire.max_pdu_length = parse_env("DIS_CODEC_MAX_PDU_LENGTH", &max)?;
        }

        if let Ok(level) = std::env::var("DIS_CODEC_LOG_LEVEL") {
            config.logging.log_level = Level::from_str(&level).map_err(|_| {
                DisError::ConfigError(format!("Invalid DIS_CODEC_LOG_LEVEL: '{level}'"))
            })?;
        }

        Ok(config)
    }

    /// Apply overrides to the default configuration
    pub fn default_with_overrides<F>(mutator: F) -> Self
    where
        F: FnOnce(&mut Self),
    {
        let mut config = Self::default();
        mutator(&mut config);
        config
    }

    /// Generate example configuration file content
    pub fn example_config() -> String {
        toml::to_string_pretty(&Self::default())
            .unwrap_or_else(|_| String::from("# Failed to generate example config"))
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DisError::ConfigError(format!("Failed to serialize config: {e}")))?;

        std::fs::write(path, content)
            .map_err(|e| DisError::ConfigError(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Validate the configuration for common issues and misconfigurations
    ///
    /// Returns a list of validation errors. Empty list means configuration is valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        errors.extend(self.wire.validate());
        errors.extend(self.logging.validate());
        errors
    }

    /// Validate and return Result - convenience method
    pub fn validate_strict(&self) -> Result<()> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(DisError::ConfigError(format!(
                "Configuration validation failed:\n  - {}",
                errors.join("\n  - ")
            )))
        }
    }
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse::<T>()
        .map_err(|_| DisError::ConfigError(format!("Invalid {name}: '{value}'")))
}

/// Wire format configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WireConfig {
    /// Byte order of multi-octet fields, negotiated for the exercise
    pub byte_order: ByteOrder,

    /// Protocol version stamped on outbound headers
    pub protocol_version: u8,

    /// Exercise identifier stamped on outbound headers
    pub exercise_id: u8,

    /// Largest PDU accepted or produced, in octets
    pub max_pdu_length: usize,
}

impl Default for WireConfig {
    fn default() -> Self {
        Self {
            byte_order: ByteOrder::BigEndian,
            protocol_version: DIS_PROTOCOL_VERSION_7,
            exercise_id: DEFAULT_EXERCISE_ID,
            max_pdu_length: DEFAULT_MAX_PDU_LENGTH,
        }
    }
}

impl WireConfig {
    /// Header for an outbound PDU of `pdu_type`, stamped with this exercise
    pub fn header_template(&self, pdu_type: PduType) -> PduHeader {
        PduHeader {
            protocol_version: self.protocol_version,
            exercise_id: self.exercise_id,
            ..PduHeader::new(pdu_type)
        }
    }

    /// Stream codec using this byte order and size ceiling
    pub fn codec(&self) -> PduCodec {
        PduCodec::new(self.byte_order, self.max_pdu_length)
    }

    /// Validate wire configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.protocol_version == 0 || self.protocol_version > DIS_PROTOCOL_VERSION_7 {
            errors.push(format!(
                "Unsupported protocol version: {} (valid range: 1-{DIS_PROTOCOL_VERSION_7})",
                self.protocol_version
            ));
        }

        if self.exercise_id == 0 {
            errors.push("Exercise id must be greater than 0".to_string());
        }

        if self.max_pdu_length < HEADER_LENGTH {
            errors.push(format!(
                "Max PDU length too small: {} (minimum: {HEADER_LENGTH})",
                self.max_pdu_length
            ));
        } else if self.max_pdu_length > MAX_PDU_LENGTH {
            errors.push(format!(
                "Max PDU length too large: {} (the length field caps it at {MAX_PDU_LENGTH})",
                self.max_pdu_length
            ));
        }

        errors
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Application name for logs
    pub app_name: String,

    /// Log level
    #[serde(with = "log_level_serde")]
    pub log_level: Level,

    /// Whether to log to console
    pub log_to_console: bool,

    /// Whether to log to file
    pub log_to_file: bool,

    /// Path to log file (if log_to_file is true)
    pub log_file_path: Option<String>,

    /// Whether to use JSON formatting for logs
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            app_name: String::from("dis-codec"),
            log_level: Level::INFO,
            log_to_console: true,
            log_to_file: false,
            log_file_path: None,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// Validate logging configuration
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.app_name.is_empty() {
            errors.push("Application name cannot be empty".to_string());
        } else if self.app_name.len() > 64 {
            errors.push(format!(
                "Application name too long: {} characters (maximum: 64)",
                self.app_name.len()
            ));
        }

        if self.log_to_file {
            if let Some(ref path) = self.log_file_path {
                if let Some(parent) = Path::new(path).parent() {
                    if !parent.as_os_str().is_empty() && !parent.exists() {
                        errors.push(format!(
                            "Log file directory does not exist: {}",
                            parent.display()
                        ));
                    }
                }
            } else {
                errors.push("log_file_path must be specified when log_to_file is true".to_string());
            }
        }

        if !self.log_to_console && !self.log_to_file {
            errors
                .push("At least one logging output (console or file) must be enabled".to_string());
        }

        errors
    }
}

/// Helper module for tracing::Level serialization/deserialization
mod log_level_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;
    use tracing::Level;

    pub fn serialize<S>(level: &Level, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let level_str = match *level {
            Level::TRACE => "trace",
            Level::DEBUG => "debug",
            Level::INFO => "info",
            Level::WARN => "warn",
            Level::ERROR => "error",
        };
        level_str.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Level, D::Error>
    where
        D: Deserializer<'de>,
    {
        let level_str = String::deserialize(deserializer)?;
        Level::from_str(&level_str)
            .map_err(|_| serde::de::Error::custom(format!("Invalid log level: {level_str}")))
    }
}
