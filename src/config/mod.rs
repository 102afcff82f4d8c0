#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::adapters::stations::StationTable;
use crate::adapters::taup_client::{TaupWebClient, DEFAULT_TRAVEL_TIME_ENDPOINT};
use crate::domain::model::{OutputFormat, Station};
use crate::domain::phases::{DEFAULT_MODEL, SUPPORTED_MODELS};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_one_of, validate_positive_number,
    validate_url, Validate,
};
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// 合併後的執行設定：命令列 > TOML > 預設值
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub endpoint: String,
    pub path_endpoint: Option<String>,
    pub model: String,
    pub timeout_seconds: u64,
    pub format: OutputFormat,
    pub ray_paths: bool,
    pub station_file: Option<String>,
    pub stations: Vec<Station>,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_TRAVEL_TIME_ENDPOINT.to_string(),
            path_endpoint: None,
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            format: OutputFormat::Text,
            ray_paths: false,
            station_file: None,
            stations: Vec::new(),
            verbose: false,
            json_logs: false,
        }
    }
}

impl Settings {
    pub fn from_toml(config: TomlConfig) -> Self {
        let defaults = Self::default();
        let verbose = config.verbose();
        let json_logs = config.json_logs();

        Self {
            endpoint: config.engine.endpoint.unwrap_or(defaults.endpoint),
            path_endpoint: config.engine.path_endpoint,
            model: config.engine.model.unwrap_or(defaults.model),
            timeout_seconds: config
                .engine
                .timeout_seconds
                .unwrap_or(defaults.timeout_seconds),
            format: config.output.format.unwrap_or(defaults.format),
            ray_paths: config.output.ray_paths.unwrap_or(defaults.ray_paths),
            station_file: config.output.station_file,
            stations: config.stations,
            verbose,
            json_logs,
        }
    }

    /// Loads the optional config file, then applies command-line overrides.
    ///
    /// Nothing is validated here; call [`Validate::validate`] on the merged result.
    #[cfg(feature = "cli")]
    pub fn from_cli(cli: &cli::CliConfig) -> Result<Self> {
        let mut settings = match &cli.config {
            Some(path) => Self::from_toml(TomlConfig::from_file(path)?),
            None => Self::default(),
        };

        if let Some(model) = &cli.model {
            settings.model = model.clone();
        }
        if let Some(endpoint) = &cli.engine_url {
            settings.endpoint = endpoint.clone();
        }
        if let Some(path_endpoint) = &cli.path_url {
            settings.path_endpoint = Some(path_endpoint.clone());
        }
        if let Some(station_file) = &cli.stations {
            settings.station_file = Some(station_file.clone());
        }
        if let Some(format) = cli.format {
            settings.format = format;
        }
        if let Some(timeout) = cli.timeout {
            settings.timeout_seconds = timeout;
        }
        settings.ray_paths |= cli.ray_paths;
        settings.verbose |= cli.verbose;
        settings.json_logs |= cli.log_json;

        Ok(settings)
    }

    /// Built-in stations, then config `[[stations]]`, then the station file.
    pub fn station_table(&self) -> Result<StationTable> {
        let table = StationTable::builtin().with_stations(self.stations.iter().cloned());
        match &self.station_file {
            Some(path) => table.with_csv_file(path),
            None => Ok(table),
        }
    }

    pub fn travel_time_client(&self) -> Result<TaupWebClient> {
        TaupWebClient::new(
            self.endpoint.clone(),
            self.path_endpoint.clone(),
            Duration::from_secs(self.timeout_seconds),
        )
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("engine.endpoint", &self.endpoint)?;
        if let Some(path_endpoint) = &self.path_endpoint {
            validate_url("engine.path_endpoint", path_endpoint)?;
        }
        validate_one_of("engine.model", &self.model, SUPPORTED_MODELS)?;
        validate_positive_number("engine.timeout_seconds", self.timeout_seconds, 1)?;
        if let Some(station_file) = &self.station_file {
            validate_file_extension("stations", station_file, &["csv"])?;
        }
        for station in &self.stations {
            validate_non_empty_string("stations.name", &station.name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert_eq!(settings.model, "ak135");
        assert_eq!(settings.endpoint, DEFAULT_TRAVEL_TIME_ENDPOINT);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_from_toml_fills_missing_values_with_defaults() {
        let config = TomlConfig::from_toml_str("[engine]\nmodel = \"prem\"\n").unwrap();
        let settings = Settings::from_toml(config);

        assert_eq!(settings.model, "prem");
        assert_eq!(settings.timeout_seconds, DEFAULT_TIMEOUT_SECONDS);
        assert_eq!(settings.format, OutputFormat::Text);
    }

    #[test]
    fn test_station_table_includes_config_stations() {
        let settings = Settings {
            stations: vec![Station::new("ANMO", 34.9459, -106.4572)],
            ..Default::default()
        };
        let table = settings.station_table().unwrap();
        assert_eq!(table.len(), 6);
        assert!(table.lookup("IU.ANMO").is_some());
    }

    #[test]
    fn test_unknown_model_is_rejected() {
        let settings = Settings {
            model: "mars".to_string(),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_overrides_config_file() {
        use clap::Parser;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[engine]\nmodel = \"prem\"\ntimeout_seconds = 5\n[output]\nformat = \"csv\"\n")
            .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = cli::CliConfig::try_parse_from([
            "phaselist",
            "--config",
            path.as_str(),
            "--model",
            "iasp91",
            "--ray-paths",
        ])
        .unwrap();
        let settings = Settings::from_cli(&cli).unwrap();

        assert_eq!(settings.model, "iasp91");
        assert_eq!(settings.timeout_seconds, 5);
        assert_eq!(settings.format, OutputFormat::Csv);
        assert!(settings.ray_paths);
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_cli_endpoint_replaces_unresolved_config_endpoint() {
        use clap::Parser;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[engine]\nendpoint = \"${PHASELIST_NEVER_SET_ENDPOINT}\"\n")
            .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = cli::CliConfig::try_parse_from([
            "phaselist",
            "--config",
            path.as_str(),
            "--engine-url",
            "http://localhost:7049/time",
        ])
        .unwrap();
        let settings = Settings::from_cli(&cli).unwrap();

        assert_eq!(settings.endpoint, "http://localhost:7049/time");
        assert!(settings.validate().is_ok());
    }

    #[cfg(feature = "cli")]
    #[test]
    fn test_unresolved_config_endpoint_fails_after_merge() {
        use clap::Parser;
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[engine]\nendpoint = \"${PHASELIST_NEVER_SET_ENDPOINT}\"\n")
            .unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = cli::CliConfig::try_parse_from(["phaselist", "-c", path.as_str()]).unwrap();
        let settings = Settings::from_cli(&cli).unwrap();

        assert!(settings.validate().is_err());
    }
}
