use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use business::domain::errors::RepositoryError;
use business::domain::price_record::model::PriceRecord;
use business::domain::price_record::repository::PriceRecordRepository;
use business::domain::shared::value_objects::StoreContextId;

use super::entity::PriceRecordEntity;

/// Price records live in `prodcomcity`, keyed by store context
/// (`comcityId`) and product (`productId`).
pub struct PriceRecordRepositoryPostgres {
    pool: PgPool,
}

impl PriceRecordRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PriceRecordRepository for PriceRecordRepositoryPostgres {
    async fn find_by_store_and_product(
        &self,
        store_context_id: &StoreContextId,
        product_id: Uuid,
    ) -> Result<Option<PriceRecord>, RepositoryError> {
        // Store contexts are uuids; anything else cannot have a record.
        let Ok(comcity_id) = Uuid::parse_str(store_context_id.as_str()) else {
            return Ok(None);
        };

        let entity = sqlx::query_as::<_, PriceRecordEntity>(
            r#"SELECT id, "productId" AS product_id, price, date FROM prodcomcity
            WHERE "comcityId" = $1 AND "productId" = $2
            LIMIT 1"#,
        )
        .bind(comcity_id)
        .bind(product_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|_| RepositoryError::DatabaseError)?;

        Ok(entity.map(|e| e.into_domain(store_context_id.clone())))
    }

    async fn update_price(
        &self,
        id: Uuid,
        price: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE prodcomcity SET price = $2, date = $3 WHERE id = $1")
            .bind(id)
            .bind(price)
            .bind(recorded_at)
            .execute(&self.pool)
            .await
            .map_err(|_| RepositoryError::DatabaseError)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
