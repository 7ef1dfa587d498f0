use anyhow::{Context, Result};
use reqwest::Url;

use super::{Validator, contains_loopback};
use crate::results::ResultLog;
use crate::types::TestResult;

const MISSING_CREDENTIALS: &str = "400 Bad Request - OAuth environment variables (GOOGLE_CLIENT_ID, GOOGLE_CLIENT_SECRET, NEXTAUTH_SECRET) not configured";

/// Fetch the sign-in endpoint without following the redirect and inspect
/// where it would send the browser.
pub fn run(v: &Validator, log: &mut ResultLog) -> Result<bool> {
    let config = v.config();
    let url = v.api_url(&format!("/auth/signin/{}", config.identity_provider));
    let resp = v.probe().get(&url)?;
    let elapsed = resp.elapsed_secs();

    if resp.status == 400 {
        log.record(
            TestResult::fail("OAuth Signin Flow - Configuration Error", MISSING_CREDENTIALS)
                .with_response_time(elapsed),
        );
        return Ok(false);
    }
    if !resp.is_redirect() {
        log.record(
            TestResult::fail("OAuth Signin Flow - HTTP Status", format!("Unexpected status: {}", resp.status))
                .with_response_time(elapsed),
        );
        return Ok(false);
    }

    let location = resp.location.unwrap_or_default();

    if location.contains(&config.identity_provider_host) {
        let target = Url::parse(&location)
            .with_context(|| format!("Invalid redirect location: {location}"))?;
        let (client_id, redirect_uri) = oauth_params(&target);

        if client_id.is_empty() {
            log.record(
                TestResult::fail(
                    "OAuth Signin Flow - Client ID",
                    "No client_id in OAuth URL - GOOGLE_CLIENT_ID not configured",
                )
                .with_response_time(elapsed),
            );
            return Ok(false);
        }
        if contains_loopback(&redirect_uri) {
            log.record(
                TestResult::fail("OAuth Signin Flow - Localhost Check", "Callback URL contains localhost")
                    .with_response_time(elapsed),
            );
            return Ok(false);
        }
        if redirect_uri.contains(&config.production_host()) {
            log.record(
                TestResult::pass(
                    "OAuth Signin Flow - Production URLs",
                    "Redirects to Google OAuth with production callback URL",
                )
                .with_response_time(elapsed),
            );
            return Ok(true);
        }
        log.record(
            TestResult::fail("OAuth Signin Flow - Production URLs", "Callback URL doesn't match production domain")
                .with_response_time(elapsed),
        );
        return Ok(false);
    }

    if location.contains("error") {
        log.record(
            TestResult::fail(
                "OAuth Signin Flow - Configuration Error",
                format!("Redirects to error page - OAuth credentials likely not configured: {location}"),
            )
            .with_response_time(elapsed),
        );
    } else {
        log.record(
            TestResult::fail(
                "OAuth Signin Flow - Unexpected Redirect",
                format!("Unexpected redirect destination: {location}"),
            )
            .with_response_time(elapsed),
        );
    }
    Ok(false)
}

/// First `client_id` and `redirect_uri` values, decoded. Absent means empty.
fn oauth_params(url: &Url) -> (String, String) {
    let mut client_id = None;
    let mut redirect_uri = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "client_id" if client_id.is_none() => client_id = Some(value.into_owned()),
            "redirect_uri" if redirect_uri.is_none() => redirect_uri = Some(value.into_owned()),
            _ => {}
        }
    }
    (client_id.unwrap_or_default(), redirect_uri.unwrap_or_default())
}
