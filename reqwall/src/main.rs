use clap::{Args, Parser, Subcommand};
use reqwall_core::cli;
use reqwall_core::conf::{RuntimeConfig, load_config, resolve_config_file};
use reqwall_core::logging::init_logging;
use reqwall_core::server;
use std::path::{Path, PathBuf};


const DEFAULT_CONFIG_DIR: &str = "config";

#[derive(Parser, Debug)]
#[command(
    name = "reqwall",
    version,
    about = "reqwall: NFQUEUE HTTP request filter",
    args_conflicts_with_subcommands = true
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Arguments for the default `run` command
    #[command(flatten)]
    run: RunArgs,
}

#[derive(Args, Debug, Default, PartialEq)]
struct RunArgs {
    /// Path to config directory or file [default: config, built-in defaults if absent]
    #[arg(long)]
    config: Option<PathBuf>,

    /// Rule file, overriding filter.rules_file
    #[arg(long, visible_alias = "file")]
    rules: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::conf::ConfigCmd,
    },

    /// Send SIGHUP to a running filter so it reloads its rules
    Reload {
        #[arg(long, default_value = "/run/reqwall.pid")]
        pid_file: PathBuf,
    },

    /// Evaluate one raw IPv4 packet dump and print the decision
    Eval {
        /// Path to config directory or file
        #[arg(long, default_value = DEFAULT_CONFIG_DIR)]
        config: PathBuf,

        /// File holding the packet bytes, starting at the IP header
        packet: PathBuf,
    },

    /// Run the filter (default)
    Run(RunArgs),
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Config { cmd }) => {
            if let Err(e) = cli::conf::run(cmd) {
                eprintln!("config error: {e:#}");
                std::process::exit(1);
            }
        }

        Some(Command::Reload { pid_file }) => {
            if let Err(e) = cli::reload::run(pid_file) {
                eprintln!("reload error: {e:#}");
                std::process::exit(1);
            }
        }

        Some(Command::Eval { config, packet }) => {
            init_logging();

            if let Err(e) = cli::eval::run(&config, &packet) {
                eprintln!("eval error: {e:#}");
                std::process::exit(1);
            }
        }

        Some(Command::Run(args)) => {
            init_logging();
            run(args);
        }

        None => {
            init_logging();
            run(cli.run);
        }
    }
}

fn run(args: RunArgs) {
    if let Err(e) = try_run(args) {
        tracing::error!(error = %format!("{e:#}"), "reqwall exited with an error");
        std::process::exit(1);
    }
}

fn try_run(args: RunArgs) -> anyhow::Result<()> {
    // Pin the override so reloads keep using it regardless of the config location.
    let rules = args.rules.map(std::path::absolute).transpose()?;

    let config_path = config_file(args.config, Path::new(DEFAULT_CONFIG_DIR));
    let mut cfg = match &config_path {
        Some(path) => load_config(path)?,
        None => {
            tracing::info!(
                dir = DEFAULT_CONFIG_DIR,
                "no configuration file found; using built-in defaults"
            );
            RuntimeConfig::default()
        }
    };
    if let Some(rules) = &rules {
        cfg = cfg.with_rules_file(rules);
    }

    server::run(config_path, rules, cfg)
}

/// Config file to load, or `None` to run on built-in defaults.
///
/// An explicit `--config` is always used, so a wrong path fails loudly. The
/// default location is optional.
fn config_file(explicit: Option<PathBuf>, default_dir: &Path) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(resolve_config_file(&path)),
        None => {
            let path = resolve_config_file(default_dir);
            path.is_file().then_some(path)
        }
    }
}
