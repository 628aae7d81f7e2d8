//! Schemadoc CLI - documentation sites from LinkML schemas
//!
//! Entry point of the `schemadoc` binary: generating documentation,
//! managing configuration files and printing shell completions.
//!
//! Copyright (c) 2025 Schemadoc Team
//! Licensed under the Apache-2.0 license

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::{Error, Result};
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;
use tracing_appender::non_blocking::WorkerGuard;

fn main() {
    let cli = Cli::parse_args();
    control::set_override(cli.use_color());

    // Logging settings live in the config file, so it loads first
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e),
    };

    let _guard = match init_logging(&cli, &config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    if let Err(e) = run(cli, config) {
        exit_with(&e);
    }
}

fn exit_with(error: &Error) -> ! {
    eprintln!(
        "{}",
        error::format_error(error, control::SHOULD_COLORIZE.should_colorize())
    );
    if error.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }
    process::exit(error.exit_code());
}

/// Main application logic
#[instrument(skip_all, fields(command = ?cli.command))]
fn run(cli: Cli, config: Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(
        cli.output,
        cli.use_color() && config.output.color,
        cli.quiet,
        config.output.progress,
    );

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    match cli.command {
        Commands::Generate(args) => handlers::handle_generate(args, &config, &mut output),
        Commands::Config(args) => handlers::handle_config(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Combine verbosity flags, the config file and the environment
fn logging_config(cli: &Cli, config: &Config) -> LoggingConfig {
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    if cli.verbosity_level() == 0 {
        logging_config.merge_with_settings(&config.logging);
    }
    logging_config.merge_with_env();

    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }
    logging_config
}

fn init_logging(cli: &Cli, config: &Config) -> Result<Option<WorkerGuard>> {
    logging::init_logging(logging_config(cli, config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogSettings;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["schemadoc", "-vv", "generate", "schema.yaml"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["schemadoc", "--quiet", "config", "show"]);
        assert_eq!(cli.verbosity_level(), 0);
    }

    #[test]
    fn test_verbose_flags_win_over_config_level() {
        let config = Config {
            logging: LogSettings {
                level: Some("trace".to_string()),
                format: Some("json".to_string()),
                file: None,
            },
            ..Default::default()
        };

        let quiet = Cli::parse_from(["schemadoc", "--quiet", "generate", "schema.yaml"]);
        let built = logging_config(&quiet, &config);
        assert_eq!(built.level, "error");
        assert!(!built.console);

        let verbose = Cli::parse_from(["schemadoc", "-v", "generate", "schema.yaml"]);
        if std::env::var("RUST_LOG").is_err() {
            assert_eq!(logging_config(&verbose, &config).level, "info");
        }
    }
}
