use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use business::domain::price_record::model::PriceRecord;
use business::domain::shared::value_objects::StoreContextId;

#[derive(Debug, FromRow)]
pub struct PriceRecordEntity {
    pub id: Uuid,
    pub product_id: Uuid,
    pub price: f64,
    pub date: DateTime<Utc>,
}

impl PriceRecordEntity {
    pub fn into_domain(self, store_context_id: StoreContextId) -> PriceRecord {
        PriceRecord::from_repository(
            self.id,
            store_context_id,
            self.product_id,
            self.price,
            self.date,
        )
    }
}
