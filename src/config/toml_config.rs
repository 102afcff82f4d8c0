use crate::domain::model::{OutputFormat, Station};
use crate::domain::phases::SUPPORTED_MODELS;
use crate::utils::error::{PhaseListError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_one_of, validate_path,
    validate_positive_number, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub stations: Vec<Station>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    pub endpoint: Option<String>,
    pub path_endpoint: Option<String>,
    pub model: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: Option<OutputFormat>,
    pub ray_paths: Option<bool>,
    pub station_file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PhaseListError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PhaseListError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TAUP_PATH_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = regex::Regex::new(r"\$\{([^}]+)\}").map_err(|e| PhaseListError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(endpoint) = &self.engine.endpoint {
            validate_url("engine.endpoint", endpoint)?;
        }
        if let Some(path_endpoint) = &self.engine.path_endpoint {
            validate_url("engine.path_endpoint", path_endpoint)?;
        }
        if let Some(model) = &self.engine.model {
            validate_one_of("engine.model", model, SUPPORTED_MODELS)?;
        }
        if let Some(timeout) = self.engine.timeout_seconds {
            validate_positive_number("engine.timeout_seconds", timeout, 1)?;
        }
        if let Some(station_file) = &self.output.station_file {
            validate_path("output.station_file", station_file)?;
            validate_file_extension("output.station_file", station_file, &["csv"])?;
        }
        for station in &self.stations {
            validate_non_empty_string("stations.name", &station.name)?;
        }
        Ok(())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = r#"
[engine]
endpoint = "https://service.iris.edu/irisws/traveltime/1/query"
path_endpoint = "http://localhost:7049/path"
model = "iasp91"
timeout_seconds = 10

[output]
format = "csv"
ray_paths = true
station_file = "stations.csv"

[logging]
verbose = true

[[stations]]
name = "ANMO"
latitude = 34.9459
longitude = -106.4572
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.engine.model.as_deref(), Some("iasp91"));
        assert_eq!(config.engine.timeout_seconds, Some(10));
        assert_eq!(config.output.format, Some(OutputFormat::Csv));
        assert_eq!(config.output.ray_paths, Some(true));
        assert_eq!(config.stations, vec![Station::new("ANMO", 34.9459, -106.4572)]);
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert!(config.engine.endpoint.is_none());
        assert!(config.stations.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PHASELIST_TEST_ENDPOINT", "https://taup.example.org/time");

        let toml_content = r#"
[engine]
endpoint = "${PHASELIST_TEST_ENDPOINT}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.engine.endpoint.as_deref(),
            Some("https://taup.example.org/time")
        );

        std::env::remove_var("PHASELIST_TEST_ENDPOINT");
    }

    #[test]
    fn test_unset_env_var_is_left_in_place() {
        let toml_content = r#"
[engine]
endpoint = "${PHASELIST_SURELY_UNSET_VAR}"
"#;
        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.engine.endpoint.as_deref(),
            Some("${PHASELIST_SURELY_UNSET_VAR}")
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation() {
        let bad_model = TomlConfig::from_toml_str("[engine]\nmodel = \"mars\"\n").unwrap();
        assert!(bad_model.validate().is_err());

        let bad_timeout = TomlConfig::from_toml_str("[engine]\ntimeout_seconds = 0\n").unwrap();
        assert!(bad_timeout.validate().is_err());

        let bad_url = TomlConfig::from_toml_str("[engine]\nendpoint = \"invalid-url\"\n").unwrap();
        assert!(bad_url.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[engine\nmodel = 1").unwrap_err();
        assert!(matches!(err, PhaseListError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[engine]\nmodel = \"prem\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.engine.model.as_deref(), Some("prem"));
    }
}
