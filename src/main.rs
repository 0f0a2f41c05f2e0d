use clap::Parser;
use selector_probe::cli::commands::{cmd_locate, cmd_probe, cmd_watch};
use selector_probe::cli::config::{Cli, Commands, build_probe_config, load_config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // stdout carries report lines, so diagnostics go to stderr
    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Watch {
            url,
            mode,
            prevent_navigation,
            max_polls,
        } => {
            let probe = build_probe_config(&config, mode, prevent_navigation);
            cmd_watch(&config, url.as_deref(), probe, max_polls)?;
        }
        Commands::Probe {
            source,
            target,
            nth,
            mode,
            prevent_navigation,
        } => {
            let probe = build_probe_config(&config, mode, prevent_navigation);
            cmd_probe(&source, &target, nth, probe)?;
        }
        Commands::Locate { source, xpath } => {
            cmd_locate(&source, &xpath)?;
        }
    }

    Ok(())
}
