use async_trait::async_trait;

use crate::domain::scan::errors::ScanError;
use crate::domain::scan::model::PipelineResult;

pub struct ProcessScanParams {
    pub image: Vec<u8>,
    pub store_context_id: String,
    pub file_name: Option<String>,
}

#[async_trait]
pub trait ProcessScanUseCase: Send + Sync {
    async fn execute(&self, params: ProcessScanParams) -> Result<PipelineResult, ScanError>;
}
