//! Configuration structures for the service floor simulator
//!
//! Configuration is merged from three layers: built-in defaults, an optional
//! JSON configuration file, and command line arguments (highest priority).

use super::OutputFormat;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "service-floor-simulator",
    version = "1.0.0",
    about = "Service Floor Simulator - Simulates customer flow through staffed service stations",
    long_about = "Steps a multi-station service floor minute by minute over one or more
simulated days, tracking customer arrivals, queueing, and service
completion, and publishes one report per day plus a final run report.

EXAMPLES:
    # Run a single day with default settings
    service-floor-simulator

    # Three days, five stations, six staff resources
    service-floor-simulator --days 3 --station-count 5 --resource-count 6

    # Append reports to per-run CSV files instead of stdout JSON
    service-floor-simulator --output-format csv --reports-dir reports

    # Use a configuration file
    service-floor-simulator --config config.json

    # Generate a configuration template
    service-floor-simulator --print-config > my-config.json

    # Validate configuration without running
    service-floor-simulator --config my-config.json --dry-run

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Number of days to simulate
    #[arg(
        long,
        help = "Number of days to simulate",
        long_help = "Number of simulated days to run. Must be greater than 0. Default: 1"
    )]
    pub days: Option<u32>,

    /// Number of service stations on the floor
    #[arg(
        long,
        help = "Number of service stations",
        long_help = "Number of service stations on the floor. Must be greater than 0. Default: 5"
    )]
    pub station_count: Option<u32>,

    /// Total staff resources available per day
    #[arg(
        long,
        help = "Total staff resources per day",
        long_help = "Total staff resources split between the morning and afternoon shifts. \
                     May be smaller than the station count, zero, or negative; a shift with \
                     no resources left simply opens no stations. Default: 5"
    )]
    pub resource_count: Option<i64>,

    /// Random seed for the shift allocation draw
    #[arg(long, help = "Random seed for reproducible shift allocation")]
    pub seed: Option<u64>,

    /// Output format for published reports
    #[arg(
        long,
        help = "Output format (json or csv)",
        long_help = "Where reports go. json: one JSON object per line on stdout. \
                     csv: lines appended to <reports-dir>/<ReportId>.csv. Default: json"
    )]
    pub output_format: Option<String>,

    /// Directory for CSV report files
    #[arg(long, help = "Directory for CSV report files (csv output only)")]
    pub reports_dir: Option<String>,

    /// Pause between simulated minutes, in milliseconds
    #[arg(
        long,
        help = "Pause between simulated minutes in milliseconds (0 = none)",
        long_help = "Optional pause after each simulated minute. The original system slept \
                     between steps to spread out its random draws; simulated outcomes do \
                     not depend on it. Default: 0"
    )]
    pub step_pause_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Number of days to simulate
    pub days: Option<u32>,

    /// Number of service stations on the floor
    pub station_count: Option<u32>,

    /// Total staff resources available per day
    pub resource_count: Option<i64>,

    /// Random seed for the shift allocation draw
    pub seed: Option<u64>,

    /// Output format for published reports
    pub output_format: Option<String>,

    /// Directory for CSV report files
    pub reports_dir: Option<String>,

    /// Pause between simulated minutes, in milliseconds
    pub step_pause_ms: Option<u64>,
}

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Number of days to simulate
    pub days: u32,

    /// Number of service stations on the floor
    pub station_count: u32,

    /// Total staff resources split between the two shifts each day.
    /// Deliberately signed and unvalidated: when the morning draw exceeds it,
    /// the afternoon allocation goes negative and opens no stations.
    pub resource_count: i64,

    /// Random seed for the shift allocation draw
    pub seed: Option<u64>,

    /// Output format for published reports
    pub output_format: OutputFormat,

    /// Directory for CSV report files
    pub reports_dir: String,

    /// Pause between simulated minutes, in milliseconds (0 = disabled)
    pub step_pause_ms: u64,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),

    /// Invalid value for an individual setting
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    /// Days count is invalid
    #[error("Days count must be greater than 0, got {0}")]
    InvalidDaysCount(u32),

    /// Station count is invalid
    #[error("Station count must be greater than 0, got {0}")]
    InvalidStationCount(u32),

    /// Reports directory is empty while CSV output is selected
    #[error("Reports directory must not be empty when output format is csv")]
    EmptyReportsDir,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            days: 1,
            station_count: 5,
            resource_count: 5,
            seed: None,
            output_format: OutputFormat::Json,
            reports_dir: "reports".to_string(),
            step_pause_ms: 0,
        }
    }
}

impl SimulationConfig {
    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args)?;

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Self::from_config_file(config_file)
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let output_format = match config_file.output_format {
            Some(raw) => parse_output_format(&raw)?,
            None => defaults.output_format,
        };

        Ok(Self {
            days: config_file.days.unwrap_or(defaults.days),
            station_count: config_file.station_count.unwrap_or(defaults.station_count),
            resource_count: config_file.resource_count.unwrap_or(defaults.resource_count),
            seed: config_file.seed.or(defaults.seed),
            output_format,
            reports_dir: config_file.reports_dir.unwrap_or(defaults.reports_dir),
            step_pause_ms: config_file.step_pause_ms.unwrap_or(defaults.step_pause_ms),
        })
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) -> Result<(), ConfigError> {
        if let Some(value) = args.days {
            config.days = value;
        }
        if let Some(value) = args.station_count {
            config.station_count = value;
        }
        if let Some(value) = args.resource_count {
            config.resource_count = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
        if let Some(value) = args.output_format {
            config.output_format = parse_output_format(&value)?;
        }
        if let Some(value) = args.reports_dir {
            config.reports_dir = value;
        }
        if let Some(value) = args.step_pause_ms {
            config.step_pause_ms = value;
        }
        Ok(())
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters.
    ///
    /// `resource_count` is intentionally not validated here: zero and
    /// negative totals are legal and produce a floor where one or both
    /// shifts open no stations.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.days == 0 {
            return Err(ConfigValidationError::InvalidDaysCount(self.days));
        }

        if self.station_count == 0 {
            return Err(ConfigValidationError::InvalidStationCount(self.station_count));
        }

        if self.output_format == OutputFormat::Csv && self.reports_dir.is_empty() {
            return Err(ConfigValidationError::EmptyReportsDir);
        }

        Ok(())
    }
}

fn parse_output_format(raw: &str) -> Result<OutputFormat, ConfigError> {
    raw.parse::<OutputFormat>().map_err(ConfigError::InvalidValue)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_args() -> CliArgs {
        CliArgs::parse_from(["service-floor-simulator"])
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.days, 1);
        assert_eq!(config.station_count, 5);
        assert_eq!(config.resource_count, 5);
        assert_eq!(config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_validate_rejects_zero_days() {
        let config = SimulationConfig { days: 0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidDaysCount(0))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_stations() {
        let config = SimulationConfig { station_count: 0, ..Default::default() };
        assert!(matches!(
            config.validate(),
            Err(ConfigValidationError::InvalidStationCount(0))
        ));
    }

    #[test]
    fn test_validate_accepts_nonpositive_resources() {
        // A day can legitimately run with no staff at all for one shift.
        let zero = SimulationConfig { resource_count: 0, ..Default::default() };
        let negative = SimulationConfig { resource_count: -3, ..Default::default() };
        assert!(zero.validate().is_ok());
        assert!(negative.validate().is_ok());
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let mut args = bare_args();
        args.days = Some(7);
        args.station_count = Some(3);
        args.resource_count = Some(-1);
        args.output_format = Some("csv".to_string());

        let config = SimulationConfig::from_cli_args(args).unwrap();
        assert_eq!(config.days, 7);
        assert_eq!(config.station_count, 3);
        assert_eq!(config.resource_count, -1);
        assert_eq!(config.output_format, OutputFormat::Csv);
    }

    #[test]
    fn test_invalid_output_format_is_rejected() {
        let mut args = bare_args();
        args.output_format = Some("xml".to_string());
        assert!(matches!(
            SimulationConfig::from_cli_args(args),
            Err(ConfigError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_config_file_merges_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "days": 4, "resource_count": 2 }"#).unwrap();

        let config = SimulationConfig::from_file(&path).unwrap();
        assert_eq!(config.days, 4);
        assert_eq!(config.resource_count, 2);
        // Unspecified fields fall back to defaults.
        assert_eq!(config.station_count, SimulationConfig::default().station_count);
    }

    #[test]
    fn test_missing_config_file() {
        assert!(matches!(
            SimulationConfig::from_file("does-not-exist.json"),
            Err(ConfigError::FileNotFound(_))
        ));
    }

    #[test]
    fn test_config_json_round_trip() {
        let config = SimulationConfig::default();
        let json = config.print_json().unwrap();
        let back: SimulationConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.days, config.days);
        assert_eq!(back.output_format, config.output_format);
    }
}
