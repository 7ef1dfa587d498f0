use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use console::Style;
use serde::Serialize;

use crate::types::TestResult;

/// Append-only log of every result recorded during one run.
#[derive(Debug, Default)]
pub struct ResultLog {
    results: Vec<TestResult>,
}

/// Derived view over a finished log.
#[derive(Debug, PartialEq)]
pub struct RunSummary<'a> {
    pub total: usize,
    pub passed: usize,
    pub failed: Vec<&'a TestResult>,
}

impl RunSummary<'_> {
    pub fn all_passed(&self) -> bool {
        self.passed == self.total
    }
}

impl ResultLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: TestResult) {
        if !result.passed {
            tracing::debug!(name = %result.name, details = %result.details, "check failed");
        }
        self.results.push(result);
    }

    pub fn results(&self) -> &[TestResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn summary(&self) -> RunSummary<'_> {
        RunSummary {
            total: self.results.len(),
            passed: self.results.iter().filter(|r| r.passed).count(),
            failed: self.results.iter().filter(|r| !r.passed).collect(),
        }
    }
}

/// Render one result the way the console report shows it.
pub fn format_result(result: &TestResult) -> String {
    let green = Style::new().green().bold();
    let red = Style::new().red().bold();

    let mut out = if result.passed {
        format!("{}: {}", green.apply_to("✅ PASS"), result.name)
    } else {
        format!("{}: {}", red.apply_to("❌ FAIL"), result.name)
    };
    if !result.details.is_empty() {
        out.push_str(&format!("\n   Details: {}", result.details));
    }
    if let Some(secs) = result.response_time_secs {
        out.push_str(&format!("\n   Response Time: {secs:.3}s"));
    }
    out
}

pub fn print_results(results: &[TestResult]) {
    for r in results {
        println!("{}\n", format_result(r));
    }
}

pub fn print_summary(log: &ResultLog) {
    let bold = Style::new().bold();
    let summary = log.summary();

    println!("{}", "=".repeat(60));
    println!("{}", bold.apply_to("📊 TEST RESULTS SUMMARY"));
    println!("{}", "=".repeat(60));
    println!("Overall: {}/{} tests passed", summary.passed, summary.total);

    if summary.all_passed() {
        println!("{}", Style::new().green().bold().apply_to("🎉 All OAuth configuration tests passed!"));
    } else {
        println!("{}", Style::new().red().bold().apply_to("⚠️ Some OAuth configuration tests failed!"));
        println!("\nFailed Tests:");
        for r in &summary.failed {
            println!("  - {}: {}", r.name, r.details);
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub started_at: DateTime<Utc>,
    pub base_url: &'a str,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub results: &'a [TestResult],
}

impl<'a> RunReport<'a> {
    pub fn new(log: &'a ResultLog, base_url: &'a str, started_at: DateTime<Utc>) -> Self {
        let summary = log.summary();
        RunReport {
            started_at,
            base_url,
            total: summary.total,
            passed: summary.passed,
            failed: summary.failed.len(),
            results: log.results(),
        }
    }
}

pub fn write_report_json(report: &RunReport<'_>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize run report")?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    fs::write(path, json).with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}
