use std::sync::Arc;

use logger::TracingLogger;
use ocr::{ImagePreprocessorRaster, OcrEngineFactoryTesseract};
use persistence::price_record::repository::PriceRecordRepositoryPostgres;
use persistence::product::repository::ProductRepositoryPostgres;
use storage::LocalScanStorage;

use business::application::scan::process_scan::ProcessScanUseCaseImpl;
use business::application::scan::reconcile::ReconcileReadingsUseCaseImpl;
use business::domain::logger::Logger;
use business::domain::scan::recognizer::TextRecognizer;

use crate::config::app_config::AppConfig;

pub struct DependencyContainer {
    pub health_api: crate::api::health::routes::Api,
    pub scan_api: crate::api::scan::routes::ScanApi,
}

impl DependencyContainer {
    pub fn new(pool: sqlx::PgPool, config: &AppConfig) -> anyhow::Result<Self> {
        let logger: Arc<dyn Logger> = Arc::new(TracingLogger);
        let health_api = crate::api::health::routes::Api::new();

        // Infrastructure adapters
        let product_repository = Arc::new(ProductRepositoryPostgres::new(pool.clone()));
        let price_record_repository = Arc::new(PriceRecordRepositoryPostgres::new(pool));
        let storage = Arc::new(LocalScanStorage::new(config.ocr.upload_dir.clone()));
        let preprocessor = Arc::new(ImagePreprocessorRaster::new(logger.clone()));
        let engine_factory = Arc::new(OcrEngineFactoryTesseract::new(
            config.ocr.tessdata_path.clone(),
        ));

        logger.info(&format!(
            "Retailer catalog loaded: {} retailers, {} codes",
            config.catalog.len(),
            config.catalog.code_count()
        ));

        // Scan use cases
        let reconcile_use_case = Arc::new(ReconcileReadingsUseCaseImpl {
            product_repository,
            price_record_repository,
            logger: logger.clone(),
            max_concurrency: config.ocr.max_concurrency,
        });
        let process_scan_use_case = Arc::new(ProcessScanUseCaseImpl {
            storage,
            preprocessor,
            recognizer: Arc::new(TextRecognizer::new(
                engine_factory,
                config.ocr.language.clone(),
                logger.clone(),
            )),
            catalog: Arc::new(config.catalog.clone()),
            reconciler: reconcile_use_case,
            logger: logger.clone(),
        });

        let scan_api = crate::api::scan::routes::ScanApi::new(process_scan_use_case, logger);

        Ok(Self {
            health_api,
            scan_api,
        })
    }
}
