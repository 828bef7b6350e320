use async_trait::async_trait;

use crate::domain::scan::model::{ReconciliationReport, ValidatedReading};
use crate::domain::shared::value_objects::StoreContextId;

pub struct ReconcileReadingsParams {
    pub store_context_id: StoreContextId,
    pub readings: Vec<ValidatedReading>,
}

/// Applies validated readings to existing price records.
///
/// Never fails as a whole: every reading yields its own report.
#[async_trait]
pub trait ReconcileReadingsUseCase: Send + Sync {
    async fn execute(&self, params: ReconcileReadingsParams) -> Vec<ReconciliationReport>;
}
