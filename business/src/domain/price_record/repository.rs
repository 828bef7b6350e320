use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::errors::RepositoryError;
use crate::domain::shared::value_objects::StoreContextId;

use super::model::PriceRecord;

/// Port over the stored price records. Update-only: scans refresh prices
/// that already exist for a store context and never insert new rows.
#[async_trait]
pub trait PriceRecordRepository: Send + Sync {
    async fn find_by_store_and_product(
        &self,
        store_context_id: &StoreContextId,
        product_id: Uuid,
    ) -> Result<Option<PriceRecord>, RepositoryError>;

    async fn update_price(
        &self,
        id: Uuid,
        price: f64,
        recorded_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError>;
}
