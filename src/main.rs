use anyhow::Result;
use clap::Parser;
use raidcheck::cli::{CheckArgs, Cli, Command};
use raidcheck::transport::SshShell;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Command::Check(args) => Ok(cmd_check(cli, args)),
        Command::PrintConfig => {
            let config = raidcheck::config::load(cli.config.as_ref());
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(ExitCode::SUCCESS)
        }
        Command::Completions { shell } => {
            raidcheck::cli::print_completions(*shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Run the probe. Exit code and stdout follow the monitoring-plugin
/// convention: one status line, code 0/1/2/3 for OK/WARNING/CRITICAL/UNKNOWN.
fn cmd_check(cli: &Cli, args: &CheckArgs) -> ExitCode {
    let mut config = raidcheck::config::load(cli.config.as_ref());
    config.apply_env();
    config.apply_cli(args);

    let shell = SshShell::new(config.connection.clone());

    match raidcheck::probe::run(&config, &shell) {
        Ok(report) => {
            if cli.json {
                raidcheck::output::print_report_json(&report);
            } else if cli.pretty {
                raidcheck::output::print_detail(&report);
            } else {
                raidcheck::output::print_plugin_line(&report);
            }
            ExitCode::from(report.severity.exit_code())
        }
        Err(e) => {
            log::debug!("probe failed: {:?}", e);
            raidcheck::output::print_error_line(&e);
            ExitCode::from(e.severity().exit_code())
        }
    }
}
