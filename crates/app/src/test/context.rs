//! Test context for service-level integration tests.

use std::sync::Arc;

use crate::{
    database::TableName,
    domain::deals::{DealsController, PgDealsStore},
};

use super::db::TestDb;

/// Table created by the migrations.
const DEALS_TABLE: &str = "deals";

pub(crate) struct TestContext {
    #[expect(dead_code, reason = "keeps the per-test database alive")]
    pub db: TestDb,
    pub store: PgDealsStore,
    pub deals: DealsController,
}

impl TestContext {
    pub async fn new() -> Self {
        let db = TestDb::new().await;

        let table = TableName::parse(DEALS_TABLE).expect("Invalid test table name");
        let store = PgDealsStore::new(db.pool().clone(), Some(table));

        Self {
            deals: DealsController::new(Arc::new(store.clone())),
            store,
            db,
        }
    }
}
