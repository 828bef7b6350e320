use uuid::Uuid;

/// Catalog product as seen by the scan pipeline.
///
/// Only the fields needed to match a printed code back to a product are
/// carried here; the product CRUD surface owns the rest.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub code: String,
    pub title: String,
}

impl Product {
    /// Constructor for data already persisted in the repository (no validation).
    pub fn from_repository(id: Uuid, code: String, title: String) -> Self {
        Self { id, code, title }
    }
}
