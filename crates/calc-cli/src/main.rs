//! Keypad calculator CLI
//!
//! ## Usage
//!
//! ```bash
//! calc press 1 2 + 3 =         # prints "12 + 3 =" then "15"
//! calc press 7 / 2 --json      # engine snapshot as JSON
//! calc --separator , repl      # one key sequence per line from stdin
//! calc --precision 3 config    # effective configuration as YAML
//! ```

use calc_cli::{logging, runner, Cli, CliConfig, CliResult, Commands};
use clap::Parser;
use std::io;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_cli(&cli)?;
    logging::init(&config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Commands::Press(args) => runner::run_press(&config, args, &mut out),
        Commands::Repl(args) => {
            let stdin = io::stdin();
            let processed =
                runner::run_repl(&config, args, stdin.lock(), &mut out, &mut io::stderr())?;
            tracing::info!(lines = processed, "repl finished");
            Ok(())
        }
        Commands::Config => runner::run_config(&config, &mut out),
    }
}
