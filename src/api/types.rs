//! Shared types for the API layer.

use std::sync::Arc;

use crate::core_state::CoreState;

/// Shared context for all routes: the state snapshot built at startup.
#[derive(Clone)]
pub struct ApiContext {
    pub core: Arc<CoreState>,
}

impl ApiContext {
    pub fn new(core: Arc<CoreState>) -> Self {
        Self { core }
    }
}
