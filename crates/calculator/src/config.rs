//! Calculator configuration
//!
//! Loaded from YAML or JSON (chosen by file extension). Missing fields fall
//! back to their defaults.

use crate::core::format::{validate_separator, DEFAULT_PRECISION, MAX_PRECISION};
use crate::core::{CalcError, CalcResult, CalculatorEngine, DisplayFormat};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Engine arithmetic/display settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Fractional digits kept in results
    pub precision: u32,
    /// Decimal separator typed and displayed by the engine
    pub decimal_separator: char,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            precision: DEFAULT_PRECISION,
            decimal_separator: '.',
        }
    }
}

/// Presentation-only settings for renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Group integer digits in thousands
    pub grouping: bool,
    /// Character placed between digit groups
    pub grouping_separator: char,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            grouping: true,
            grouping_separator: ',',
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalcConfig {
    /// Engine settings
    pub engine: EngineConfig,
    /// Display settings
    pub display: DisplayConfig,
}

impl CalcConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set result precision
    #[must_use]
    pub const fn with_precision(mut self, precision: u32) -> Self {
        self.engine.precision = precision;
        self
    }

    /// Set decimal separator
    #[must_use]
    pub const fn with_decimal_separator(mut self, separator: char) -> Self {
        self.engine.decimal_separator = separator;
        self
    }

    /// Enable or disable digit grouping
    #[must_use]
    pub const fn with_grouping(mut self, grouping: bool) -> Self {
        self.display.grouping = grouping;
        self
    }

    /// Set the digit group separator
    #[must_use]
    pub const fn with_grouping_separator(mut self, separator: char) -> Self {
        self.display.grouping_separator = separator;
        self
    }

    /// Checks the settings for consistency
    pub fn validate(&self) -> CalcResult<()> {
        if self.engine.precision > MAX_PRECISION {
            return Err(CalcError::InvalidPrecision {
                precision: self.engine.precision,
                max: MAX_PRECISION,
            });
        }
        validate_separator(self.engine.decimal_separator)?;
        if self.display.grouping {
            validate_separator(self.display.grouping_separator)?;
            if self.display.grouping_separator == self.engine.decimal_separator {
                return Err(CalcError::config(format!(
                    "grouping separator {:?} equals the decimal separator",
                    self.display.grouping_separator
                )));
            }
        }
        Ok(())
    }

    /// Builds the display format described by the engine settings
    pub fn display_format(&self) -> CalcResult<DisplayFormat> {
        DisplayFormat::new()
            .with_precision(self.engine.precision)?
            .with_separator(self.engine.decimal_separator)
    }

    /// Builds a validated engine
    pub fn build_engine(&self) -> CalcResult<CalculatorEngine> {
        self.validate()?;
        Ok(CalculatorEngine::with_format(self.display_format()?))
    }

    /// Parses YAML configuration
    pub fn from_yaml_str(yaml: &str) -> CalcResult<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parses JSON configuration
    pub fn from_json_str(json: &str) -> CalcResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a `.yaml`, `.yml` or `.json` file
    pub fn load(path: &Path) -> CalcResult<Self> {
        let content = fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("yaml" | "yml") => Self::from_yaml_str(&content),
            _ => Err(CalcError::config(format!(
                "unsupported config format: {}",
                path.display()
            ))),
        }
    }

    /// Renders the configuration as YAML
    pub fn to_yaml(&self) -> CalcResult<String> {
        Ok(serde_yaml_ng::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = CalcConfig::default();
        assert_eq!(config.engine.precision, 7);
        assert_eq!(config.engine.decimal_separator, '.');
        assert!(config.display.grouping);
        assert_eq!(config.display.grouping_separator, ',');
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_setters() {
        let config = CalcConfig::new()
            .with_precision(3)
            .with_decimal_separator(',')
            .with_grouping_separator('.')
            .with_grouping(false);
        assert_eq!(config.engine.precision, 3);
        assert_eq!(config.engine.decimal_separator, ',');
        assert_eq!(config.display.grouping_separator, '.');
        assert!(!config.display.grouping);
    }

    #[test]
    fn test_validate_precision() {
        let config = CalcConfig::new().with_precision(20);
        assert!(matches!(
            config.validate(),
            Err(CalcError::InvalidPrecision { precision: 20, .. })
        ));
    }

    #[test]
    fn test_validate_clashing_separators() {
        let config = CalcConfig::new().with_grouping_separator('.');
        assert!(matches!(config.validate(), Err(CalcError::Config { .. })));
    }

    #[test]
    fn test_validate_clash_ignored_without_grouping() {
        let config = CalcConfig::new()
            .with_grouping_separator('.')
            .with_grouping(false);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial() {
        let config = CalcConfig::from_yaml_str("engine:\n  precision: 3\n").unwrap();
        assert_eq!(config.engine.precision, 3);
        assert_eq!(config.engine.decimal_separator, '.');
        assert!(config.display.grouping);
    }

    #[test]
    fn test_from_yaml_invalid_value() {
        let err = CalcConfig::from_yaml_str("engine:\n  precision: 99\n").unwrap_err();
        assert!(matches!(err, CalcError::InvalidPrecision { .. }));
    }

    #[test]
    fn test_from_yaml_malformed() {
        let err = CalcConfig::from_yaml_str("engine: [").unwrap_err();
        assert!(matches!(err, CalcError::Yaml(_)));
    }

    #[test]
    fn test_from_json() {
        let config =
            CalcConfig::from_json_str(r#"{"display":{"grouping":false}}"#).unwrap();
        assert!(!config.display.grouping);
        assert_eq!(config.engine.precision, 7);
    }

    #[test]
    fn test_yaml_round_trip() {
        let config = CalcConfig::new().with_precision(4);
        let yaml = config.to_yaml().unwrap();
        assert_eq!(CalcConfig::from_yaml_str(&yaml).unwrap(), config);
    }

    #[test]
    fn test_load_yaml_file() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "engine:\n  precision: 2").unwrap();
        let config = CalcConfig::load(file.path()).unwrap();
        assert_eq!(config.engine.precision, 2);
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let err = CalcConfig::load(file.path()).unwrap_err();
        assert!(err.to_string().contains("unsupported config format"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = CalcConfig::load(Path::new("/nonexistent/calc.yaml")).unwrap_err();
        assert!(matches!(err, CalcError::Io(_)));
    }

    #[test]
    fn test_build_engine_uses_settings() {
        let mut engine = CalcConfig::new().with_precision(2).build_engine().unwrap();
        engine.input_digit("1");
        engine.handle_operator("÷");
        engine.input_digit("3");
        engine.calculate();
        assert_eq!(engine.display_value(), "0.33");
    }
}
