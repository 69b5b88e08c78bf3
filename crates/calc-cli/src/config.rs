//! CLI configuration
//!
//! Calculator settings resolve in order: defaults, then the config file,
//! then command-line flags.

use crate::commands::Cli;
use crate::error::CliResult;
use keypad_calc::CalcConfig;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Verbosity {
    /// Quiet - errors only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Maps `-q` and the `-v` count to a level
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Default log filter directive for this level
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "info",
            Self::Debug => "trace",
        }
    }
}

/// Color output choice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorChoice {
    /// Always use colors
    Always,
    /// Use colors when stderr is a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl ColorChoice {
    /// Should use colors based on output detection
    #[must_use]
    pub fn should_color(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        }
    }
}

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogFormat {
    /// Human-readable
    #[default]
    Text,
    /// JSON lines
    Json,
}

/// CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Color output choice
    pub color: ColorChoice,
    /// Log line format
    pub log_format: LogFormat,
    /// Calculator settings
    pub calc: CalcConfig,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set color choice
    #[must_use]
    pub const fn with_color(mut self, color: ColorChoice) -> Self {
        self.color = color;
        self
    }

    /// Set log format
    #[must_use]
    pub const fn with_log_format(mut self, log_format: LogFormat) -> Self {
        self.log_format = log_format;
        self
    }

    /// Set calculator settings
    #[must_use]
    pub fn with_calc(mut self, calc: CalcConfig) -> Self {
        self.calc = calc;
        self
    }

    /// Builds the configuration from parsed arguments
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let mut calc = match &cli.config {
            Some(path) => {
                debug!(path = %path.display(), "loading config file");
                CalcConfig::load(path)?
            }
            None => CalcConfig::new(),
        };

        if let Some(precision) = cli.precision {
            calc = calc.with_precision(precision);
        }
        if let Some(separator) = cli.separator {
            calc = calc.with_decimal_separator(separator);
            if separator == calc.display.grouping_separator {
                calc = calc.with_grouping_separator(if separator == ',' { '.' } else { ',' });
            }
        }
        if cli.no_grouping {
            calc = calc.with_grouping(false);
        }
        calc.validate()?;

        Ok(Self::new()
            .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
            .with_color(cli.color.into())
            .with_log_format(cli.log_format.into())
            .with_calc(calc))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::CliError;
    use clap::Parser;
    use std::io::Write;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from(args)
    }

    mod verbosity_tests {
        use super::*;

        #[test]
        fn test_default_verbosity() {
            assert_eq!(Verbosity::default(), Verbosity::Normal);
        }

        #[test]
        fn test_from_flags() {
            assert_eq!(Verbosity::from_flags(true, 3), Verbosity::Quiet);
            assert_eq!(Verbosity::from_flags(false, 0), Verbosity::Normal);
            assert_eq!(Verbosity::from_flags(false, 1), Verbosity::Verbose);
            assert_eq!(Verbosity::from_flags(false, 5), Verbosity::Debug);
        }

        #[test]
        fn test_filter_directive() {
            assert_eq!(Verbosity::Normal.filter_directive(), "warn");
            assert_eq!(Verbosity::Debug.filter_directive(), "trace");
        }
    }

    mod color_tests {
        use super::*;

        #[test]
        fn test_forced_choices() {
            assert!(ColorChoice::Always.should_color());
            assert!(!ColorChoice::Never.should_color());
        }
    }

    mod resolve_tests {
        use super::*;

        #[test]
        fn test_defaults() {
            let config = CliConfig::from_cli(&parse(&["calc", "config"])).unwrap();
            assert_eq!(config.calc, CalcConfig::new());
            assert_eq!(config.verbosity, Verbosity::Normal);
            assert_eq!(config.log_format, LogFormat::Text);
        }

        #[test]
        fn test_flags_override() {
            let cli = parse(&["calc", "--precision", "2", "--no-grouping", "-q", "config"]);
            let config = CliConfig::from_cli(&cli).unwrap();
            assert_eq!(config.calc.engine.precision, 2);
            assert!(!config.calc.display.grouping);
            assert_eq!(config.verbosity, Verbosity::Quiet);
        }

        #[test]
        fn test_comma_separator_swaps_grouping() {
            let config = CliConfig::from_cli(&parse(&["calc", "--separator", ",", "config"])).unwrap();
            assert_eq!(config.calc.engine.decimal_separator, ',');
            assert_eq!(config.calc.display.grouping_separator, '.');
        }

        #[test]
        fn test_invalid_precision_rejected() {
            let err = CliConfig::from_cli(&parse(&["calc", "--precision", "40", "config"]))
                .unwrap_err();
            assert!(matches!(err, CliError::Calc(_)));
        }

        #[test]
        fn test_config_file_then_flags() {
            let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
            writeln!(file, "engine:\n  precision: 4\ndisplay:\n  grouping: false").unwrap();
            let path = file.path().to_str().unwrap().to_string();

            let config = CliConfig::from_cli(&parse(&["calc", "--config", &path, "config"])).unwrap();
            assert_eq!(config.calc.engine.precision, 4);
            assert!(!config.calc.display.grouping);

            let config = CliConfig::from_cli(&parse(&[
                "calc", "--config", &path, "--precision", "1", "config",
            ]))
            .unwrap();
            assert_eq!(config.calc.engine.precision, 1);
        }
    }
}
