use async_trait::async_trait;

use crate::domain::errors::RepositoryError;

use super::model::Product;

#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Returns `RepositoryError::NotFound` when no product carries `code`.
    async fn find_by_code(&self, code: &str) -> Result<Product, RepositoryError>;
}
