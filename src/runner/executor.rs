use anyhow::Result;

use super::http::ApiClient;
use super::state::RunnerState;
use crate::checks::{self, Check};

/// Drives the fixed check sequence against one deployment. Holds the shared
/// HTTP client and the cross-check state the create step feeds into the
/// update/delete steps.
pub struct SuiteExecutor {
    client: ApiClient,
    state: RunnerState,
}

impl SuiteExecutor {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(base_url)?,
            state: RunnerState::new(base_url),
        })
    }

    /// Run every check in `Check::SEQUENCE`, in order. Each check records
    /// its own result; a failing check never stops the ones after it.
    pub async fn run(&mut self) {
        for check in Check::SEQUENCE {
            log::debug!("running check: {}", check.name());
            self.dispatch(check).await;
        }
    }

    async fn dispatch(&mut self, check: Check) {
        let client = &self.client;
        let state = &mut self.state;

        match check {
            Check::ApiRoot => checks::products::api_root(client, state).await,
            Check::ListProducts => checks::products::list_products(client, state).await,
            Check::UuidShape => checks::products::uuid_shape(client, state).await,
            Check::CreateProduct => checks::products::create_product(client, state).await,
            Check::UpdateProduct => checks::products::update_product(client, state).await,
            Check::DeleteProduct => checks::products::delete_product(client, state).await,
            Check::InvalidRoutes => checks::routes::invalid_routes(client, state).await,
            Check::MalformedJson => checks::routes::malformed_json(client, state).await,
            Check::UpdateNonexistent => checks::routes::update_nonexistent(client, state).await,
        }
    }

    pub fn into_state(self) -> RunnerState {
        self.state
    }
}
