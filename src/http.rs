use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::LOCATION;
use reqwest::redirect::Policy;

#[derive(Debug)]
pub struct ProbeResponse {
    pub status: u16,
    pub location: Option<String>,
    pub body: String,
    pub duration: Duration,
}

impl ProbeResponse {
    pub fn elapsed_secs(&self) -> f64 {
        self.duration.as_secs_f64()
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self.status, 302 | 307)
    }
}

/// Blocking GET client. Redirects are never followed so that sign-in
/// responses can be inspected as-is.
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .redirect(Policy::none())
            .build()
            .context("Failed to build HTTP client")?;
        Ok(HttpProbe { client })
    }

    /// Issue a single GET. Any status code is returned as a response; only
    /// transport failures and timeouts are errors.
    pub fn get(&self, url: &str) -> Result<ProbeResponse> {
        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("GET {url} failed"))?;
        let status = response.status().as_u16();
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string());
        let body = response
            .text()
            .with_context(|| format!("Failed to read response body from {url}"))?;
        let duration = start.elapsed();

        tracing::debug!(url, status, elapsed_ms = duration.as_millis() as u64, "probe complete");

        Ok(ProbeResponse {
            status,
            location,
            body,
            duration,
        })
    }
}
