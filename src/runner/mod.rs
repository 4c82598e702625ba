pub mod executor;
pub mod http;
pub mod state;

pub use state::{RunnerState, TestResult, TestSummary};

use anyhow::Result;
use colored::Colorize;
use std::path::Path;

/// Run the full verification sequence against a live deployment, print the
/// summary, and optionally write the JSON run report. Returns whether every
/// check passed.
pub async fn run_suite(base_url: &str, report: bool, output: &Path) -> Result<bool> {
    println!("🎵 Starting MusicMerchant API backend checks");
    println!("{}", "=".repeat(50));
    println!();

    let mut executor = executor::SuiteExecutor::new(base_url)?;
    executor.run().await;
    let state = executor.into_state();

    println!();
    println!("{}", "=".repeat(50));
    println!("🎵 TEST SUMMARY");
    println!("{}", "=".repeat(50));

    let summary = state.summary();
    println!("Total Tests: {}", summary.total);
    println!("Passed: {}", summary.passed.to_string().green());
    println!("Failed: {}", summary.failed.to_string().red());
    println!("Success Rate: {:.1}%", summary.success_rate);
    println!();

    if state.all_passed() {
        println!("{}", "✅ ALL TESTS PASSED!".green().bold());
    } else {
        println!("{}", "❌ FAILED TESTS:".red().bold());
        for result in state.failed_results() {
            println!("  - {}: {}", result.test_name, result.message);
        }
    }
    println!();

    if report {
        let path = crate::report::generate(&state, output)?;
        println!("JSON report saved to: {}", path.display());
    }

    Ok(state.all_passed())
}
