use anyhow::Result;

use super::{Validator, contains_loopback};
use crate::envfile::load_env_file;
use crate::results::ResultLog;
use crate::types::TestResult;

pub const BASE_URL_KEY: &str = "NEXT_PUBLIC_BASE_URL";
const REQUIRED_VARS: &[&str] = &[BASE_URL_KEY, "MONGO_URL"];

pub fn run(v: &Validator, log: &mut ResultLog) -> Result<bool> {
    let config = v.config();
    let vars = load_env_file(&config.resolve(&config.env_file))?;

    let missing: Vec<&str> = REQUIRED_VARS
        .iter()
        .copied()
        .filter(|key| !vars.contains_key(*key))
        .collect();
    if !missing.is_empty() {
        log.record(TestResult::fail(
            "Environment Variables - Required",
            format!("Missing variables: [{}]", missing.join(", ")),
        ));
        return Ok(false);
    }

    let base_url = vars.get(BASE_URL_KEY).map(String::as_str).unwrap_or_default();
    if contains_loopback(base_url) {
        log.record(TestResult::fail(
            "Environment Variables - Production URL",
            format!("Production URL contains localhost: {base_url}"),
        ));
        return Ok(false);
    }

    log.record(TestResult::pass(
        "Environment Variables - Production URL",
        format!("Production URL configured correctly: {base_url}"),
    ));
    Ok(true)
}
