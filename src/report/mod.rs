pub mod types;

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::runner::state::RunnerState;

/// Write the JSON run report under the output directory, named by session id
pub fn generate(state: &RunnerState, output: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output)
        .with_context(|| format!("failed to create output directory {}", output.display()))?;

    let results = types::TestResults::from_state(state);
    let path = output.join(format!("results-{}.json", results.session_id));
    let json = serde_json::to_string_pretty(&results)?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write report {}", path.display()))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runner::state::TestResult;

    #[test]
    fn test_report_round_trips() {
        let mut state = RunnerState::new("http://localhost:3000");
        state.record(TestResult::pass("A", "ok"));
        state.record(TestResult::fail("B", "broken"));

        let dir = std::env::temp_dir().join(format!("merchant-tester-{}", state.session_id));
        let path = generate(&state, &dir).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let parsed: types::TestResults = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.session_id, state.session_id);
        assert_eq!(parsed.results.len(), 2);
        assert_eq!(parsed.summary.failed, 1);

        let _ = std::fs::remove_dir_all(&dir);
    }
}
