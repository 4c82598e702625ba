use serde::{Deserialize, Serialize};

use crate::runner::state::{RunnerState, TestResult, TestSummary};

/// Full run record for report generation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResults {
    pub session_id: String,
    pub base_url: String,
    pub results: Vec<TestResult>,
    pub summary: TestSummary,
    pub generated_at: String,
}

impl TestResults {
    pub fn from_state(state: &RunnerState) -> Self {
        Self {
            session_id: state.session_id.clone(),
            base_url: state.base_url.clone(),
            results: state.results.clone(),
            summary: state.summary(),
            generated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
