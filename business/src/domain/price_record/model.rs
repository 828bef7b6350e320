use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::shared::value_objects::StoreContextId;

/// Price observed for a product at one store context.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRecord {
    pub id: Uuid,
    pub store_context_id: StoreContextId,
    pub product_id: Uuid,
    pub price: f64,
    pub recorded_at: DateTime<Utc>,
}

impl PriceRecord {
    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(
        id: Uuid,
        store_context_id: StoreContextId,
        product_id: Uuid,
        price: f64,
        recorded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            store_context_id,
            product_id,
            price,
            recorded_at,
        }
    }
}
