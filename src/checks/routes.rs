//! Negative-path checks: unknown routes, malformed bodies, and writes
//! against ids that do not exist.

use serde_json::json;

use super::Check;
use crate::runner::http::ApiClient;
use crate::runner::state::{RunnerState, TestResult};

/// Paths that must answer 404
pub const INVALID_ROUTES: [&str; 3] = ["/api/invalid", "/api/products/invalid/route", "/api/users"];

/// Statuses accepted for a write against a nonexistent id. The server only
/// has to refuse gracefully; 400, 404 and 500 have all been observed from
/// deployments of this backend and all count as handled.
const NONEXISTENT_UPDATE_STATUSES: [u16; 3] = [400, 404, 500];

/// GET each known-bad path; every one of them is its own result
pub async fn invalid_routes(client: &ApiClient, state: &mut RunnerState) {
    for route in INVALID_ROUTES {
        let name = format!("Invalid Route {}", route);

        match client.get_path(route).await {
            Ok(response) if response.status.as_u16() == 404 => {
                state.record(TestResult::pass(
                    &name,
                    "Correctly returned 404 for invalid route",
                ));
            }
            Ok(response) => {
                state.record(
                    TestResult::fail(
                        &name,
                        format!("Expected 404, got {}", response.status.as_u16()),
                    )
                    .with_details(json!({"response": response.text})),
                );
            }
            Err(e) => {
                state.record(TestResult::fail(&name, format!("Request error: {e:#}")));
            }
        }
    }
}

/// POST a body that is not JSON under a JSON content-type; any 4xx/5xx counts
pub async fn malformed_json(client: &ApiClient, state: &mut RunnerState) {
    let name = Check::MalformedJson.name();

    match client.create_product_raw("invalid json").await {
        Ok(response) if response.status.as_u16() >= 400 => {
            state.record(
                TestResult::pass(name, "Correctly handled malformed JSON request")
                    .with_details(json!({"status_code": response.status.as_u16()})),
            );
        }
        Ok(response) => {
            state.record(
                TestResult::fail(name, "Did not properly reject malformed JSON")
                    .with_details(json!({"status_code": response.status.as_u16()})),
            );
        }
        Err(e) => {
            state.record(TestResult::fail(name, format!("Request error: {e:#}")));
        }
    }
}

/// PUT against an id no record has; expects one of the accepted error statuses
pub async fn update_nonexistent(client: &ApiClient, state: &mut RunnerState) {
    let name = Check::UpdateNonexistent.name();
    let payload = json!({"name": "Test"});

    match client.update_product("nonexistent-id", &payload).await {
        Ok(response) if NONEXISTENT_UPDATE_STATUSES.contains(&response.status.as_u16()) => {
            state.record(
                TestResult::pass(name, "Correctly handled update of nonexistent product")
                    .with_details(json!({"status_code": response.status.as_u16()})),
            );
        }
        Ok(response) => {
            state.record(
                TestResult::fail(name, "Unexpected response for nonexistent product update")
                    .with_details(json!({
                        "status_code": response.status.as_u16(),
                        "response": response.text,
                    })),
            );
        }
        Err(e) => {
            state.record(TestResult::fail(name, format!("Request error: {e:#}")));
        }
    }
}
