use sqlx::FromRow;
use uuid::Uuid;

use business::domain::product::model::Product;

#[derive(Debug, FromRow)]
pub struct ProductEntity {
    pub id: Uuid,
    pub title: String,
    /// Stored as a float column; selected back as text.
    pub code: String,
}

impl ProductEntity {
    pub fn into_domain(self) -> Product {
        Product::from_repository(self.id, self.code, self.title)
    }
}
