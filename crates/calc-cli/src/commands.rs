//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Keypad calculator: press keys, read the display
#[derive(Parser, Debug)]
#[command(name = "calc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (log errors only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// Log line format on stderr
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormatArg,

    /// Configuration file (YAML or JSON)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Fractional digits kept in results
    #[arg(long, env = "CALC_PRECISION", global = true)]
    pub precision: Option<u32>,

    /// Decimal separator
    #[arg(long, global = true)]
    pub separator: Option<char>,

    /// Do not group digits in thousands
    #[arg(long, global = true)]
    pub no_grouping: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press keys in order and print the display
    Press(PressArgs),

    /// Read key sequences from stdin, one line at a time
    Repl(ReplArgs),

    /// Show the effective configuration
    Config,
}

/// Arguments for the press command
#[derive(Parser, Debug)]
pub struct PressArgs {
    /// Keys to press: 0-9 . + - * / × ÷ = AC
    #[arg(required = true, allow_hyphen_values = true)]
    pub keys: Vec<String>,

    /// Print the engine snapshot as JSON
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the repl command
#[derive(Parser, Debug)]
pub struct ReplArgs {
    /// Print the expression line above each display
    #[arg(long)]
    pub show_expression: bool,
}

/// Color output argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

/// Log format argument
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum LogFormatArg {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

impl From<LogFormatArg> for crate::config::LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => Self::Text,
            LogFormatArg::Json => Self::Json,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_press() {
        let cli = Cli::parse_from(["calc", "press", "2", "+", "3", "="]);
        match cli.command {
            Commands::Press(args) => {
                assert_eq!(args.keys, vec!["2", "+", "3", "="]);
                assert!(!args.json);
            }
            _ => panic!("expected press"),
        }
    }

    #[test]
    fn test_parse_press_minus_key() {
        let cli = Cli::parse_from(["calc", "press", "9", "-", "4", "="]);
        let Commands::Press(args) = cli.command else {
            panic!("expected press");
        };
        assert_eq!(args.keys[1], "-");
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::parse_from([
            "calc",
            "-vv",
            "--precision",
            "3",
            "--separator",
            ",",
            "--no-grouping",
            "config",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.precision, Some(3));
        assert_eq!(cli.separator, Some(','));
        assert!(cli.no_grouping);
        assert!(matches!(cli.command, Commands::Config));
    }

    #[test]
    fn test_press_requires_keys() {
        assert!(Cli::try_parse_from(["calc", "press"]).is_err());
    }

    #[test]
    fn test_color_arg_conversion() {
        use crate::config::ColorChoice;
        assert_eq!(ColorChoice::from(ColorArg::Never), ColorChoice::Never);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
    }
}
