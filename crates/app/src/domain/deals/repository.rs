//! Deals Repository

use async_trait::async_trait;
use jiff::Timestamp;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query_as};

use crate::{
    database::TableName,
    domain::deals::{
        data::DealUpdate,
        records::{DealRecord, DealUuid},
        store::{DealsStore, StoreError},
    },
};

const GET_DEAL_SQL: &str = include_str!("sql/get_deal.sql");
const CREATE_DEAL_SQL: &str = include_str!("sql/create_deal.sql");
const UPDATE_DEAL_SQL: &str = include_str!("sql/update_deal.sql");
const DELETE_DEAL_SQL: &str = include_str!("sql/delete_deal.sql");
const LIST_DEALS_BY_OWNER_SQL: &str = include_str!("sql/list_deals_by_owner.sql");

const TABLE_PLACEHOLDER: &str = "{table}";

/// SQL templates rendered against one table.
#[derive(Debug, Clone)]
struct Statements {
    get: String,
    create: String,
    update: String,
    delete: String,
    list_by_owner: String,
}

impl Statements {
    fn for_table(table: &TableName) -> Self {
        let render = |template: &str| template.replace(TABLE_PLACEHOLDER, table.as_str());

        Self {
            get: render(GET_DEAL_SQL),
            create: render(CREATE_DEAL_SQL),
            update: render(UPDATE_DEAL_SQL),
            delete: render(DELETE_DEAL_SQL),
            list_by_owner: render(LIST_DEALS_BY_OWNER_SQL),
        }
    }
}

/// [`DealsStore`] backed by a `PostgreSQL` table.
///
/// Without a table every operation fails with [`StoreError::MissingTable`]
/// before a connection is acquired.
#[derive(Debug, Clone)]
pub struct PgDealsStore {
    pool: PgPool,
    statements: Option<Statements>,
}

impl PgDealsStore {
    #[must_use]
    pub fn new(pool: PgPool, table: Option<TableName>) -> Self {
        Self {
            pool,
            statements: table.as_ref().map(Statements::for_table),
        }
    }

    fn statements(&self) -> Result<&Statements, StoreError> {
        self.statements.as_ref().ok_or(StoreError::MissingTable)
    }
}

#[async_trait]
impl DealsStore for PgDealsStore {
    #[tracing::instrument(name = "deals.repository.get_by_id", skip(self), err)]
    async fn get_by_id(&self, deal: DealUuid) -> Result<Option<DealRecord>, StoreError> {
        let sql = &self.statements()?.get;

        let record = query_as::<Postgres, DealRecord>(sql)
            .bind(deal.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "deals.repository.put_if_absent",
        skip(self, deal),
        fields(deal_uuid = %deal.uuid),
        err
    )]
    async fn put_if_absent(&self, deal: DealRecord) -> Result<DealRecord, StoreError> {
        let sql = &self.statements()?.create;

        query_as::<Postgres, DealRecord>(sql)
            .bind(deal.uuid.into_uuid())
            .bind(deal.owner_id)
            .bind(deal.name)
            .bind(deal.description)
            .bind(deal.value_in_gwp)
            .bind(SqlxTimestamp::from(deal.created_at))
            .bind(SqlxTimestamp::from(deal.updated_at))
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::ConditionFailed)
    }

    #[tracing::instrument(
        name = "deals.repository.update_if_exists",
        skip(self, update),
        err
    )]
    async fn update_if_exists(
        &self,
        deal: DealUuid,
        update: DealUpdate,
        updated_at: Timestamp,
    ) -> Result<DealRecord, StoreError> {
        let sql = &self.statements()?.update;

        query_as::<Postgres, DealRecord>(sql)
            .bind(deal.into_uuid())
            .bind(update.description)
            .bind(update.value_in_gwp)
            .bind(SqlxTimestamp::from(updated_at))
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::ConditionFailed)
    }

    #[tracing::instrument(name = "deals.repository.delete_by_id", skip(self), err)]
    async fn delete_by_id(&self, deal: DealUuid) -> Result<Option<DealRecord>, StoreError> {
        let sql = &self.statements()?.delete;

        let removed = query_as::<Postgres, DealRecord>(sql)
            .bind(deal.into_uuid())
            .fetch_optional(&self.pool)
            .await?;

        Ok(removed)
    }

    #[tracing::instrument(
        name = "deals.repository.query_by_owner",
        skip(self),
        fields(deal_count = tracing::field::Empty),
        err
    )]
    async fn query_by_owner(&self, owner_id: String) -> Result<Vec<DealRecord>, StoreError> {
        let sql = &self.statements()?.list_by_owner;

        let deals = query_as::<Postgres, DealRecord>(sql)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::Span::current().record("deal_count", deals.len());

        Ok(deals)
    }
}

impl<'r> FromRow<'r, PgRow> for DealRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            uuid: DealUuid::from_uuid(row.try_get("uuid")?),
            owner_id: row.try_get("owner_id")?,
            name: row.try_get("name")?,
            description: row.try_get("description")?,
            value_in_gwp: row.try_get("value_in_gwp")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use sqlx::postgres::PgPoolOptions;
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_deal_record};

    use super::*;

    #[test]
    fn statements_target_the_configured_table() -> TestResult {
        let statements = Statements::for_table(&TableName::parse("sales_deals")?);

        for sql in [
            &statements.get,
            &statements.create,
            &statements.update,
            &statements.delete,
            &statements.list_by_owner,
        ] {
            assert!(sql.contains("sales_deals"), "{sql}");
            assert!(!sql.contains(TABLE_PLACEHOLDER), "{sql}");
        }

        Ok(())
    }

    #[tokio::test]
    async fn missing_table_fails_before_touching_storage() -> TestResult {
        // Nothing listens here; any I/O attempt would surface a connection error.
        let pool = PgPoolOptions::new().connect_lazy("postgresql://nobody@127.0.0.1:1/none")?;
        let store = PgDealsStore::new(pool, None);

        let result = store.get_by_id(DealUuid::new()).await;

        assert!(
            matches!(result, Err(StoreError::MissingTable)),
            "expected MissingTable, got {result:?}"
        );

        let result = store.query_by_owner("u1".to_string()).await;

        assert!(
            matches!(result, Err(StoreError::MissingTable)),
            "expected MissingTable, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn put_if_absent_inserts_once() -> TestResult {
        let ctx = TestContext::new().await;
        let record = new_deal_record("u1", "Acme Renewal");

        let created = ctx.store.put_if_absent(record.clone()).await?;

        assert_eq!(created.uuid, record.uuid);
        assert!(
            (created.value_in_gwp - 5000.0).abs() < f64::EPSILON,
            "value {}",
            created.value_in_gwp
        );

        let result = ctx.store.put_if_absent(record).await;

        assert!(
            matches!(result, Err(StoreError::ConditionFailed)),
            "expected ConditionFailed, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn get_by_id_round_trips_record() -> TestResult {
        let ctx = TestContext::new().await;
        let record = ctx
            .store
            .put_if_absent(new_deal_record("u1", "Acme Renewal"))
            .await?;

        let fetched = ctx.store.get_by_id(record.uuid).await?;

        assert_eq!(fetched, Some(record));
        assert_eq!(ctx.store.get_by_id(DealUuid::new()).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn update_if_exists_never_inserts() -> TestResult {
        let ctx = TestContext::new().await;
        let missing = DealUuid::new();

        let result = ctx
            .store
            .update_if_exists(
                missing,
                DealUpdate {
                    description: "ghost".to_string(),
                    value_in_gwp: Some(10.0),
                },
                Timestamp::now(),
            )
            .await;

        assert!(
            matches!(result, Err(StoreError::ConditionFailed)),
            "expected ConditionFailed, got {result:?}"
        );
        assert_eq!(ctx.store.get_by_id(missing).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn update_without_value_keeps_stored_value() -> TestResult {
        let ctx = TestContext::new().await;
        let record = ctx
            .store
            .put_if_absent(new_deal_record("u1", "Acme Renewal"))
            .await?;

        let updated = ctx
            .store
            .update_if_exists(
                record.uuid,
                DealUpdate {
                    description: "notes".to_string(),
                    value_in_gwp: None,
                },
                Timestamp::now(),
            )
            .await?;

        assert_eq!(updated.description, "notes");
        assert!(
            (updated.value_in_gwp - record.value_in_gwp).abs() < f64::EPSILON,
            "stored value should be kept"
        );
        assert_eq!(updated.owner_id, record.owner_id);
        assert_eq!(updated.name, record.name);
        assert_eq!(updated.created_at, record.created_at);

        Ok(())
    }

    #[tokio::test]
    async fn delete_by_id_returns_prior_state_once() -> TestResult {
        let ctx = TestContext::new().await;
        let record = ctx
            .store
            .put_if_absent(new_deal_record("u1", "Acme Renewal"))
            .await?;

        assert_eq!(ctx.store.delete_by_id(record.uuid).await?, Some(record.clone()));
        assert_eq!(ctx.store.delete_by_id(record.uuid).await?, None);

        Ok(())
    }

    #[tokio::test]
    async fn query_by_owner_filters_on_owner() -> TestResult {
        let ctx = TestContext::new().await;

        let first = ctx.store.put_if_absent(new_deal_record("u1", "One")).await?;
        let second = ctx.store.put_if_absent(new_deal_record("u1", "Two")).await?;
        ctx.store.put_if_absent(new_deal_record("u2", "One")).await?;

        let mut uuids: Vec<DealUuid> = ctx
            .store
            .query_by_owner("u1".to_string())
            .await?
            .into_iter()
            .map(|deal| deal.uuid)
            .collect();
        let mut expected = vec![first.uuid, second.uuid];

        uuids.sort_by_key(|uuid| uuid.into_uuid());
        expected.sort_by_key(|uuid| uuid.into_uuid());

        assert_eq!(uuids, expected);
        assert!(ctx.store.query_by_owner("nobody".to_string()).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn check_violation_is_malformed() -> TestResult {
        let ctx = TestContext::new().await;
        let mut record = new_deal_record("u1", "Zero");
        record.value_in_gwp = 0.0;

        let result = ctx.store.put_if_absent(record).await;

        assert!(
            matches!(result, Err(StoreError::Malformed(_))),
            "expected Malformed, got {result:?}"
        );
        assert!(ctx.store.query_by_owner("u1".to_string()).await?.is_empty());

        Ok(())
    }
}
