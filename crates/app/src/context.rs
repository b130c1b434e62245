//! App Context

use std::sync::Arc;

use thiserror::Error;

use crate::{
    database::{self, TableName},
    deals::{DealsController, DealsService, PgDealsStore},
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to connect to database")]
    Database(#[source] sqlx::Error),
}

#[derive(Clone)]
pub struct AppContext {
    pub deals: Arc<dyn DealsService>,
}

impl AppContext {
    #[must_use]
    pub fn new(deals: Arc<dyn DealsService>) -> Self {
        Self { deals }
    }

    /// Build application context from a database URL.
    ///
    /// Without a `table` the context still builds, but every deal operation
    /// fails closed before touching storage.
    ///
    /// # Errors
    ///
    /// Returns an error when establishing a database connection fails.
    pub async fn from_database_url(
        url: &str,
        table: Option<TableName>,
    ) -> Result<Self, AppInitError> {
        let pool = database::connect(url)
            .await
            .map_err(AppInitError::Database)?;

        let store = PgDealsStore::new(pool, table);

        Ok(Self::new(Arc::new(DealsController::new(Arc::new(store)))))
    }
}
