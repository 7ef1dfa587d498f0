//! The fixed preflight suite.
//!
//! Every check records its own results into the shared [`ResultLog`] and
//! returns whether it passed. A check that returns an error is recorded as a
//! single failing `<label> - Exception` result and the suite moves on; no
//! check can stop the ones after it.

mod domain;
mod endpoints;
mod environment;
mod error_handling;
mod integration;
mod production;
mod providers;
mod signin;

use std::path::Path;

use anyhow::{Context, Result};

use crate::config::TargetConfig;
use crate::http::HttpProbe;
use crate::progress::{check_spinner, finish_check};
use crate::results::{ResultLog, print_results};
use crate::types::TestResult;

const LOOPBACK_HOSTS: &[&str] = &["localhost", "127.0.0.1"];

pub(crate) fn contains_loopback(s: &str) -> bool {
    LOOPBACK_HOSTS.iter().any(|h| s.contains(h))
}

type CheckFn = fn(&Validator, &mut ResultLog) -> Result<bool>;

pub struct Check {
    pub label: &'static str,
    run: CheckFn,
    target: fn(&TargetConfig) -> String,
}

pub const CHECKS: &[Check] = &[
    Check { label: "Environment Variables", run: environment::run, target: env_target },
    Check { label: "NextAuth Providers", run: providers::run, target: providers_target },
    Check { label: "OAuth Signin Flow", run: signin::run, target: signin_target },
    Check { label: "Domain Configuration", run: domain::run, target: auth_sources_target },
    Check { label: "Production Settings", run: production::run, target: auth_sources_target },
    Check { label: "API Endpoints", run: endpoints::run, target: endpoints_target },
    Check { label: "GAS Integration", run: integration::run, target: api_route_target },
    Check { label: "Error Handling", run: error_handling::run, target: invalid_endpoint_target },
];

fn env_target(c: &TargetConfig) -> String {
    c.resolve(&c.env_file).display().to_string()
}

fn providers_target(c: &TargetConfig) -> String {
    format!("GET {}/auth/providers", c.api_base())
}

fn signin_target(c: &TargetConfig) -> String {
    format!("GET {}/auth/signin/{}", c.api_base(), c.identity_provider)
}

fn auth_sources_target(c: &TargetConfig) -> String {
    format!(
        "{}, {}",
        c.resolve(&c.auth_route_file).display(),
        c.resolve(&c.middleware_file).display()
    )
}

fn endpoints_target(c: &TargetConfig) -> String {
    c.endpoints
        .iter()
        .map(|e| format!("GET {}{e}", c.api_base()))
        .collect::<Vec<_>>()
        .join(", ")
}

fn api_route_target(c: &TargetConfig) -> String {
    c.resolve(&c.api_route_file).display().to_string()
}

fn invalid_endpoint_target(c: &TargetConfig) -> String {
    format!("GET {}/invalid-endpoint", c.api_base())
}

impl Check {
    pub fn target(&self, config: &TargetConfig) -> String {
        (self.target)(config)
    }
}

pub struct Validator {
    config: TargetConfig,
    probe: HttpProbe,
}

impl Validator {
    pub fn new(config: TargetConfig) -> Result<Self> {
        let probe = HttpProbe::new(config.timeout())?;
        Ok(Validator { config, probe })
    }

    pub fn config(&self) -> &TargetConfig {
        &self.config
    }

    pub(crate) fn probe(&self) -> &HttpProbe {
        &self.probe
    }

    pub(crate) fn api_url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base(), path)
    }

    pub(crate) fn read_source(&self, relative: &Path) -> Result<String> {
        let path = self.config.resolve(relative);
        std::fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))
    }

    /// Run one check behind the failure boundary.
    pub fn run_check(&self, check: &Check, log: &mut ResultLog) -> bool {
        match (check.run)(self, log) {
            Ok(passed) => passed,
            Err(e) => {
                tracing::warn!(check = check.label, error = %format!("{e:#}"), "check aborted");
                log.record(TestResult::fail(
                    format!("{} - Exception", check.label),
                    format!("Error: {e:#}"),
                ));
                false
            }
        }
    }

    /// Run every check in order, printing each check's results as it finishes.
    pub fn run_all(&self, log: &mut ResultLog) {
        for check in CHECKS {
            let start = log.len();
            println!("🔍 Testing {}...", check.label);
            let pb = check_spinner(check.label);
            let passed = self.run_check(check, log);
            let recorded = &log.results()[start..];
            finish_check(
                &pb,
                check.label,
                recorded.iter().filter(|r| r.passed).count(),
                recorded.len(),
            );
            tracing::debug!(check = check.label, passed, "check finished");
            print_results(recorded);
        }
    }
}
