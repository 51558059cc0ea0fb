//! costexp - Work with AWS Cost Explorer request documents offline

use anyhow::Context;
use clap::Parser;
use costexp::{cli::Cli, commands, output::get_formatter};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn init_logging(cli: &Cli) {
    // --quiet overrides RUST_LOG
    let filter = if cli.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            if cli.verbose {
                EnvFilter::new("costexp=info")
            } else {
                EnvFilter::new("costexp=warn")
            }
        })
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn use_color(cli: &Cli) -> bool {
    !cli.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && is_terminal::is_terminal(std::io::stdout())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli);

    let colored = use_color(&cli);
    if !colored {
        colored::control::set_override(false);
    }
    debug!("Running {:?}", cli.command);

    let formatter = get_formatter(cli.json, colored);
    let output = commands::run(&cli.command, formatter.as_ref())
        .context("costexp command failed")?;

    println!("{}", output.text);

    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
