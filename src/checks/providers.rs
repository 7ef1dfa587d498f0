use anyhow::{Context, Result};
use serde_json::Value;

use super::{Validator, contains_loopback};
use crate::results::ResultLog;
use crate::types::TestResult;

/// `GET /api/auth/providers` must advertise the identity provider with
/// sign-in and callback URLs on the production host.
pub fn run(v: &Validator, log: &mut ResultLog) -> Result<bool> {
    let resp = v.probe().get(&v.api_url("/auth/providers"))?;
    let elapsed = resp.elapsed_secs();

    if resp.status != 200 {
        log.record(
            TestResult::fail("NextAuth Providers - HTTP Status", format!("Status: {}", resp.status))
                .with_response_time(elapsed),
        );
        return Ok(false);
    }

    let providers: Value =
        serde_json::from_str(&resp.body).context("Providers response is not valid JSON")?;
    let provider = v.config().identity_provider.as_str();
    let Some(entry) = providers.get(provider) else {
        log.record(
            TestResult::fail("NextAuth Providers - Google Provider", "Google provider not found in configuration")
                .with_response_time(elapsed),
        );
        return Ok(false);
    };

    let signin_url = entry.get("signinUrl").and_then(Value::as_str).unwrap_or_default();
    let callback_url = entry.get("callbackUrl").and_then(Value::as_str).unwrap_or_default();

    if contains_loopback(signin_url) || contains_loopback(callback_url) {
        log.record(
            TestResult::fail("NextAuth Providers - Localhost Check", "OAuth URLs contain localhost references")
                .with_response_time(elapsed),
        );
        return Ok(false);
    }

    let host = v.config().production_host();
    if signin_url.contains(&host) && callback_url.contains(&host) {
        log.record(
            TestResult::pass("NextAuth Providers - Production URLs", "OAuth URLs use production domain")
                .with_response_time(elapsed),
        );
        Ok(true)
    } else {
        log.record(
            TestResult::fail("NextAuth Providers - Production URLs", "OAuth URLs don't match production domain")
                .with_response_time(elapsed),
        );
        Ok(false)
    }
}
