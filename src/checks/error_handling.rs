use anyhow::Result;

use super::Validator;
use crate::results::ResultLog;
use crate::types::TestResult;

pub fn run(v: &Validator, log: &mut ResultLog) -> Result<bool> {
    let resp = v.probe().get(&v.api_url("/invalid-endpoint"))?;
    let elapsed = resp.elapsed_secs();

    if resp.status == 404 {
        log.record(
            TestResult::pass("Error Handling - Invalid Endpoint", "Invalid endpoint returns 404")
                .with_response_time(elapsed),
        );
        Ok(true)
    } else {
        log.record(
            TestResult::fail(
                "Error Handling - Invalid Endpoint",
                format!("Invalid endpoint returns {} instead of 404", resp.status),
            )
            .with_response_time(elapsed),
        );
        Ok(false)
    }
}
