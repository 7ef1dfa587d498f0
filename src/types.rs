use serde::Serialize;

/// One recorded outcome. Checks may record several of these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestResult {
    pub name: String,
    pub passed: bool,
    pub details: String,
    pub response_time_secs: Option<f64>,
}

impl TestResult {
    pub fn pass(name: impl Into<String>, details: impl Into<String>) -> Self {
        TestResult {
            name: name.into(),
            passed: true,
            details: details.into(),
            response_time_secs: None,
        }
    }

    pub fn fail(name: impl Into<String>, details: impl Into<String>) -> Self {
        TestResult {
            name: name.into(),
            passed: false,
            details: details.into(),
            response_time_secs: None,
        }
    }

    pub fn with_response_time(mut self, secs: f64) -> Self {
        self.response_time_secs = Some(secs);
        self
    }
}
