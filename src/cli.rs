use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(name = "oauth-preflight", about = "Smoke-test a production NextAuth/Google OAuth deployment")]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(long, global = true)]
    pub verbose: bool,

    /// TOML file describing the target deployment
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Deployment base URL (e.g. https://squad.cronberry.com)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Host that advertised OAuth URLs must contain (default: derived from base URL)
    #[arg(long, global = true)]
    pub expected_host: Option<String>,

    /// Directory the inspected source files and env file are resolved against
    #[arg(long, global = true)]
    pub app_root: Option<PathBuf>,

    /// Env file path, relative to the app root unless absolute
    #[arg(long, global = true)]
    pub env_file: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every check once and print a summary
    Run {
        /// Also write the results as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// List the checks in execution order with what each one inspects
    List,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            base_url: self.base_url.clone(),
            expected_host: self.expected_host.clone(),
            app_root: self.app_root.clone(),
            env_file: self.env_file.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}
