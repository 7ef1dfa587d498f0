mod checks;
mod cli;
mod config;
mod envfile;
mod http;
mod progress;
mod results;
mod types;

#[cfg(test)]
mod testutil;

use chrono::Utc;
use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match load_target(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(2);
        }
    };

    match cli.command {
        Commands::List => {
            for (i, check) in checks::CHECKS.iter().enumerate() {
                println!("{}. {:<24} {}", i + 1, check.label, check.target(&config));
            }
            std::process::exit(0);
        }
        Commands::Run { json } => {
            let started_at = Utc::now();
            let base_url = config.base_url.clone();
            let validator = match checks::Validator::new(config) {
                Ok(v) => v,
                Err(e) => {
                    eprintln!("Error: {e:#}");
                    std::process::exit(2);
                }
            };

            println!("🔍 Starting Google OAuth Production Configuration Tests");
            println!("Testing against: {base_url}");
            println!("{}", "=".repeat(60));

            let mut log = results::ResultLog::new();
            validator.run_all(&mut log);
            results::print_summary(&log);

            if let Some(path) = json {
                let report = results::RunReport::new(&log, &base_url, started_at);
                if let Err(e) = results::write_report_json(&report, &path) {
                    eprintln!("Error writing JSON: {e:#}");
                    std::process::exit(2);
                }
                println!("Results written to {}", path.display());
            }

            std::process::exit(if log.summary().all_passed() { 0 } else { 1 });
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose { "oauth_preflight=debug,warn" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Defaults, then the optional config file, then command-line overrides.
fn load_target(cli: &Cli) -> anyhow::Result<config::TargetConfig> {
    let mut target = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::TargetConfig::default(),
    };
    target.apply(cli.overrides());
    target.validate()?;
    Ok(target)
}
