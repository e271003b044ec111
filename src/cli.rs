use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "raidcheck",
    about = "Monitoring plugin that probes MegaRAID controller health over SSH",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output the probe report as JSON instead of the status line
    #[arg(long, global = true)]
    pub json: bool,

    /// Render a boxed per-controller report for interactive use
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Use only this config file instead of the system/user files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Probe one host and report RAID health
    Check(CheckArgs),

    /// Print the effective merged configuration as TOML
    PrintConfig,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for (auto-detected if omitted)
        shell: Option<Shell>,
    },
}

#[derive(Args)]
pub struct CheckArgs {
    /// Remote host to probe
    #[arg(long)]
    pub host: Option<String>,

    /// SSH port
    #[arg(long)]
    pub port: Option<u16>,

    /// SSH username
    #[arg(long)]
    pub user: Option<String>,

    /// SSH password. Prefer the RAIDCHECK_PASSWORD environment variable or
    /// the config file; a password on the command line shows up in `ps`.
    #[arg(long)]
    pub password: Option<String>,

    /// Private key file for public-key authentication
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Path of the storcli binary on the remote host
    #[arg(long)]
    pub storcli: Option<PathBuf>,

    /// Connection timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,
}

/// Print shell completions to stdout.
pub fn print_completions(shell: Option<Shell>) {
    let shell = shell.or_else(Shell::from_env).unwrap_or_else(|| {
        eprintln!(
            "Could not detect shell. Specify one: raidcheck completions bash|zsh|fish|elvish|powershell"
        );
        std::process::exit(1);
    });
    clap_complete::generate(
        shell,
        &mut Cli::command(),
        "raidcheck",
        &mut std::io::stdout(),
    );
}
