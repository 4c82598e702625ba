use colored::Colorize;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Outcome of a single check against the live API
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub test_name: String,
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub details: Map<String, Value>,
}

impl TestResult {
    pub fn pass(test_name: &str, message: impl Into<String>) -> Self {
        Self {
            test_name: test_name.to_string(),
            success: true,
            message: message.into(),
            details: Map::new(),
        }
    }

    pub fn fail(test_name: &str, message: impl Into<String>) -> Self {
        Self {
            test_name: test_name.to_string(),
            success: false,
            message: message.into(),
            details: Map::new(),
        }
    }

    /// Attach structured details. Non-object values are stored under "value".
    pub fn with_details(mut self, details: Value) -> Self {
        match details {
            Value::Object(map) => self.details = map,
            other => {
                self.details.insert("value".to_string(), other);
            }
        }
        self
    }
}

/// Cross-check state owned by the runner for one suite execution
#[derive(Debug)]
pub struct RunnerState {
    pub session_id: String,
    pub base_url: String,
    pub api_url: String,
    pub results: Vec<TestResult>,
    /// Set exactly once by the create check, read by update/delete/verify
    pub created_product_id: Option<String>,
}

impl RunnerState {
    pub fn new(base_url: &str) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        let api_url = format!("{}/api", base_url);
        Self {
            session_id: Uuid::new_v4().to_string(),
            base_url,
            api_url,
            results: Vec::new(),
            created_product_id: None,
        }
    }

    /// Append a result and print its console line
    pub fn record(&mut self, result: TestResult) {
        let status = if result.success {
            "✅ PASS".green().bold()
        } else {
            "❌ FAIL".red().bold()
        };
        println!("{}: {} - {}", status, result.test_name.cyan(), result.message);
        if !result.details.is_empty() {
            println!(
                "   Details: {}",
                serde_json::to_string(&result.details).unwrap_or_default()
            );
        }

        self.results.push(result);
    }

    /// Store the id returned by the create check. First write wins.
    pub fn store_created_id(&mut self, id: String) {
        if self.created_product_id.is_some() {
            log::warn!("created product id already set, ignoring {}", id);
            return;
        }
        self.created_product_id = Some(id);
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.success)
    }

    pub fn summary(&self) -> TestSummary {
        let total = self.results.len() as u32;
        let passed = self.results.iter().filter(|r| r.success).count() as u32;
        let failed = total - passed;
        let success_rate = if total == 0 {
            0.0
        } else {
            f64::from(passed) / f64::from(total) * 100.0
        };

        TestSummary {
            total,
            passed,
            failed,
            success_rate,
        }
    }

    pub fn failed_results(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().filter(|r| !r.success)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    pub total: u32,
    pub passed: u32,
    pub failed: u32,
    pub success_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_counts() {
        let mut state = RunnerState::new("http://localhost:3000/");
        assert_eq!(state.api_url, "http://localhost:3000/api");

        state.record(TestResult::pass("A", "ok"));
        state.record(TestResult::fail("B", "broken"));
        state.record(TestResult::pass("C", "ok"));

        let summary = state.summary();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert!(!state.all_passed());
        assert_eq!(state.failed_results().count(), 1);
    }

    #[test]
    fn test_created_id_set_once() {
        let mut state = RunnerState::new("http://localhost:3000");
        state.store_created_id("first".to_string());
        state.store_created_id("second".to_string());
        assert_eq!(state.created_product_id.as_deref(), Some("first"));
    }

    #[test]
    fn test_result_details() {
        let result = TestResult::pass("A", "ok").with_details(json!({"count": 3}));
        assert_eq!(result.details.get("count"), Some(&json!(3)));

        let result = TestResult::fail("B", "bad").with_details(json!("raw body"));
        assert_eq!(result.details.get("value"), Some(&json!("raw body")));
    }
}
