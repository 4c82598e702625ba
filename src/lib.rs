pub mod checks;
pub mod report;
pub mod runner;
pub mod utils;

// Re-export common items
pub use runner::run_suite;
pub use runner::state::{RunnerState, TestResult};
