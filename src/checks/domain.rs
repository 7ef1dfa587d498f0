use anyhow::Result;

use super::Validator;
use crate::results::ResultLog;
use crate::types::TestResult;

const WORKSPACE_DOMAINS: &[&str] = &["maaruji.com", "cronberry.com"];
const DOMAIN_ENV_VAR: &str = "ALLOWED_GOOGLE_WORKSPACE_DOMAIN";

/// Workspace-domain restriction must be wired into both the NextAuth route
/// and the middleware. Sources are matched as plain text.
pub fn run(v: &Validator, log: &mut ResultLog) -> Result<bool> {
    let config = v.config();
    let auth = v.read_source(&config.auth_route_file)?;

    if WORKSPACE_DOMAINS.iter().all(|d| auth.contains(d)) {
        log.record(TestResult::pass(
            "Domain Configuration - Multiple Domains",
            "Multiple domains configured in NextAuth",
        ));
    } else {
        log.record(TestResult::fail(
            "Domain Configuration - Multiple Domains",
            "Domain configuration not found in NextAuth",
        ));
        return Ok(false);
    }

    if auth.contains(DOMAIN_ENV_VAR) {
        log.record(TestResult::pass(
            "Domain Configuration - Environment Variables",
            "Environment variable parsing for domains implemented",
        ));
    } else {
        log.record(TestResult::fail(
            "Domain Configuration - Environment Variables",
            "Environment variable parsing not found",
        ));
        return Ok(false);
    }

    let middleware = v.read_source(&config.middleware_file)?;
    if middleware.contains("allowedDomains") && middleware.contains(DOMAIN_ENV_VAR) {
        log.record(TestResult::pass(
            "Domain Configuration - Middleware Validation",
            "Middleware domain validation implemented",
        ));
        Ok(true)
    } else {
        log.record(TestResult::fail(
            "Domain Configuration - Middleware Validation",
            "Middleware domain validation not found",
        ));
        Ok(false)
    }
}
