//! # Service Configuration
//!
//! Optional TOML file plus environment overrides.
//!
//! ```toml
//! [engine]
//! url = "http://127.0.0.1:8787"
//! timeout_ms = 5000
//!
//! [calculation]
//! seconds_rounding = "carry"      # carry | clamp | legacy
//! angle_source = "prefer_explicit" # prefer_explicit | cusps_only
//! sign_names = "portuguese"       # portuguese | english
//! default_house_system = "P"
//! ```
//!
//! Precedence, lowest first: built-in defaults, the file,
//! `HOUSES_ENGINE_URL`, command-line flags. Without `--config`, the first of
//! [`DEFAULT_CONFIG_PATHS`] that exists is read.

use houses_core::{CalculatorOptions, HousesError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default engine sidecar address.
pub const DEFAULT_ENGINE_URL: &str = "http://127.0.0.1:8787";

/// Default per-request engine timeout.
pub const DEFAULT_ENGINE_TIMEOUT_MS: u64 = 5000;

/// Environment variable overriding `[engine] url`.
pub const ENGINE_URL_ENV: &str = "HOUSES_ENGINE_URL";

/// Searched, in order, when no config file is named.
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["houses.toml", "configs/houses.toml"];

// =============================================================================
// CONFIG TYPES
// =============================================================================

/// How to reach the house engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub url: String,
    pub timeout_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_ENGINE_URL.to_string(),
            timeout_ms: DEFAULT_ENGINE_TIMEOUT_MS,
        }
    }
}

impl EngineConfig {
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Complete service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceConfig {
    pub engine: EngineConfig,
    pub calculation: CalculatorOptions,
}

// =============================================================================
// FILE SHAPE
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct EngineToml {
    #[serde(default = "default_engine_url")]
    url: String,
    #[serde(default = "default_timeout_ms")]
    timeout_ms: u64,
}

fn default_engine_url() -> String {
    DEFAULT_ENGINE_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_ENGINE_TIMEOUT_MS
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct RootConfigToml {
    #[serde(default)]
    engine: Option<EngineToml>,
    #[serde(default)]
    calculation: Option<CalculatorOptions>,
}

// =============================================================================
// LOADING
// =============================================================================

/// First existing file among `candidates`.
#[must_use]
pub fn find_config_file<P: AsRef<Path>>(candidates: &[P]) -> Option<PathBuf> {
    candidates
        .iter()
        .map(AsRef::<Path>::as_ref)
        .find(|p| p.is_file())
        .map(Path::to_path_buf)
}

impl ServiceConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, HousesError> {
        let root: RootConfigToml = toml::from_str(text)
            .map_err(|e| HousesError::Config(format!("Failed to parse config: {}", e)))?;
        let RootConfigToml {
            engine,
            calculation,
        } = root;

        let engine = match engine {
            Some(EngineToml { url, timeout_ms }) => EngineConfig { url, timeout_ms },
            None => EngineConfig::default(),
        };
        let config = Self {
            engine,
            calculation: calculation.unwrap_or_default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, HousesError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            HousesError::Io(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Defaults, then the named or discovered file, then the environment.
    pub fn load(path: Option<&Path>) -> Result<Self, HousesError> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| find_config_file(&DEFAULT_CONFIG_PATHS));
        let config = match path {
            Some(p) => {
                tracing::debug!(path = %p.display(), "loading config file");
                Self::from_file(&p)?
            }
            None => Self::default(),
        };
        Ok(config.with_engine_url(std::env::var(ENGINE_URL_ENV).ok()))
    }

    /// Replace the engine URL when an override is given and non-empty.
    #[must_use]
    pub fn with_engine_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url.filter(|u| !u.trim().is_empty()) {
            self.engine.url = url;
        }
        self
    }

    fn validate(&self) -> Result<(), HousesError> {
        if self.engine.url.trim().is_empty() {
            return Err(HousesError::Config("engine.url must not be empty".to_string()));
        }
        if self.engine.timeout_ms == 0 {
            return Err(HousesError::Config(
                "engine.timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use houses_core::{AngleSource, SecondsRounding, SignNames};
    use std::io::Write;

    #[test]
    fn empty_document_gives_defaults() {
        let config = ServiceConfig::from_toml_str("").expect("parse");
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.engine.url, DEFAULT_ENGINE_URL);
        assert_eq!(config.calculation.default_house_system.as_char(), 'P');
    }

    #[test]
    fn full_document() {
        let config = ServiceConfig::from_toml_str(
            r#"
            [engine]
            url = "http://engine:9000"
            timeout_ms = 250

            [calculation]
            seconds_rounding = "clamp"
            angle_source = "cusps_only"
            sign_names = "english"
            default_house_system = "K"
            "#,
        )
        .expect("parse");

        assert_eq!(config.engine.url, "http://engine:9000");
        assert_eq!(config.engine.timeout(), Duration::from_millis(250));
        assert_eq!(config.calculation.seconds_rounding, SecondsRounding::Clamp);
        assert_eq!(config.calculation.angle_source, AngleSource::CuspsOnly);
        assert_eq!(config.calculation.sign_names, SignNames::English);
        assert_eq!(config.calculation.default_house_system.as_char(), 'K');
    }

    #[test]
    fn partial_engine_section_keeps_defaults() {
        let config = ServiceConfig::from_toml_str("[engine]\ntimeout_ms = 100\n").expect("parse");
        assert_eq!(config.engine.url, DEFAULT_ENGINE_URL);
        assert_eq!(config.engine.timeout_ms, 100);
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = ServiceConfig::from_toml_str("[engine]\nport = 1\n");
        assert!(matches!(result, Err(HousesError::Config(_))));

        let result = ServiceConfig::from_toml_str("[server]\nport = 1\n");
        assert!(matches!(result, Err(HousesError::Config(_))));
    }

    #[test]
    fn unknown_rounding_mode_is_rejected() {
        let result = ServiceConfig::from_toml_str("[calculation]\nseconds_rounding = \"up\"\n");
        assert!(matches!(result, Err(HousesError::Config(_))));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let result = ServiceConfig::from_toml_str("[engine]\ntimeout_ms = 0\n");
        assert!(matches!(result, Err(HousesError::Config(_))));
    }

    #[test]
    fn engine_url_override() {
        let config = ServiceConfig::default().with_engine_url(Some("http://other:1".to_string()));
        assert_eq!(config.engine.url, "http://other:1");

        let config = ServiceConfig::default().with_engine_url(Some("  ".to_string()));
        assert_eq!(config.engine.url, DEFAULT_ENGINE_URL);

        let config = ServiceConfig::default().with_engine_url(None);
        assert_eq!(config.engine.url, DEFAULT_ENGINE_URL);
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "[calculation]\nsign_names = \"english\"").expect("write");

        let config = ServiceConfig::from_file(file.path()).expect("load");
        assert_eq!(config.calculation.sign_names, SignNames::English);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("temp dir");
        let result = ServiceConfig::from_file(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(HousesError::Io(_))));
    }

    #[test]
    fn config_search_takes_first_existing_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let first = dir.path().join("houses.toml");
        let second = dir.path().join("configs").join("houses.toml");
        std::fs::create_dir_all(dir.path().join("configs")).expect("mkdir");
        std::fs::write(&second, "").expect("write");

        let candidates = [first.clone(), second.clone()];
        assert_eq!(find_config_file(&candidates), Some(second));

        std::fs::write(&first, "").expect("write");
        assert_eq!(find_config_file(&candidates), Some(first));

        assert_eq!(find_config_file(&[dir.path().to_path_buf()]), None);
    }
}
