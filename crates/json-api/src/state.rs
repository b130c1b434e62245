//! State

use std::sync::Arc;

use deals_app::{context::AppContext, deals::DealsService};

/// Shared handler state, injected once into the depot.
#[derive(Clone)]
pub(crate) struct State {
    pub(crate) deals: Arc<dyn DealsService>,
}

impl State {
    #[must_use]
    pub(crate) fn new(deals: Arc<dyn DealsService>) -> Self {
        Self { deals }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext) -> Arc<Self> {
        Arc::new(Self::new(app.deals))
    }
}
