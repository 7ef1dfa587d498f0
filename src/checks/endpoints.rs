use anyhow::Result;

use super::Validator;
use crate::results::ResultLog;
use crate::types::TestResult;

/// Every configured endpoint must answer 200. Each endpoint is isolated:
/// a transport error fails that endpoint only.
pub fn run(v: &Validator, log: &mut ResultLog) -> Result<bool> {
    let mut all_working = true;

    for endpoint in &v.config().endpoints {
        let name = format!("API Endpoint {endpoint}");
        match v.probe().get(&v.api_url(endpoint)) {
            Ok(resp) if resp.status == 200 => {
                log.record(TestResult::pass(
                    name,
                    format!("Status 200, Response time: {:.3}s", resp.elapsed_secs()),
                ));
            }
            Ok(resp) => {
                log.record(TestResult::fail(name, format!("Status {}", resp.status)));
                all_working = false;
            }
            Err(e) => {
                tracing::warn!(endpoint = %endpoint, error = %format!("{e:#}"), "endpoint probe failed");
                log.record(TestResult::fail(name, format!("Error: {e:#}")));
                all_working = false;
            }
        }
    }

    Ok(all_working)
}
