use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// OpenAI-backed in production; `DisabledGenerator` when no key is set.
    pub generator: Arc<dyn TextGenerator>,
}

#[cfg(test)]
impl AppState {
    pub fn for_tests(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            config: Config::default(),
            generator,
        }
    }
}
