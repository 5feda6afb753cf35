//! `cardgroup` command line.

use std::io::{self, IsTerminal};

use cardgroup_cli::logging::{LogConfig, LogFormat, init_logging};
use cardgroup_cli::summary::{print_board, print_replay_report, print_stats};
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{load_config, run_demo, run_replay, run_stats};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(&cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: &Cli) -> anyhow::Result<i32> {
    match &cli.command {
        Command::Demo => {
            let result = run_demo(load_config(cli.config.as_deref())?)?;
            print_board(&result.board);
            println!("Grouped tasks: {}", result.grouped_tasks.join(", "));
            Ok(0)
        }
        Command::Replay(args) => {
            let result = run_replay(args, load_config(cli.config.as_deref())?)?;
            print_board(&result.board);
            print_replay_report(&result.report);
            Ok(i32::from(result.report.has_failures()))
        }
        Command::Stats(args) => {
            print_stats(&run_stats(args)?);
            Ok(0)
        }
    }
}

/// `--log-level` wins over `-v`/`-q`; `RUST_LOG` only applies when neither is
/// given.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let level_filter = match cli.log_level {
        Some(LogLevelArg::Error) => LevelFilter::ERROR,
        Some(LogLevelArg::Warn) => LevelFilter::WARN,
        Some(LogLevelArg::Info) => LevelFilter::INFO,
        Some(LogLevelArg::Debug) => LevelFilter::DEBUG,
        Some(LogLevelArg::Trace) => LevelFilter::TRACE,
        None => cli.verbosity.tracing_level_filter(),
    };
    let format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    let mut config = LogConfig::default()
        .with_level(level_filter)
        .with_format(format)
        .with_timestamps(cli.log_timestamps)
        .with_target(cli.log_target)
        .with_log_file(cli.log_file.clone());
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
