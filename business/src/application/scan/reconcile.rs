use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;

use crate::domain::errors::RepositoryError;
use crate::domain::logger::Logger;
use crate::domain::price_record::repository::PriceRecordRepository;
use crate::domain::product::repository::ProductRepository;
use crate::domain::scan::model::{ReconciliationOutcome, ReconciliationReport, ValidatedReading};
use crate::domain::scan::use_cases::reconcile::{
    ReconcileReadingsParams, ReconcileReadingsUseCase,
};
use crate::domain::shared::value_objects::StoreContextId;

pub const DEFAULT_MAX_CONCURRENCY: usize = 4;

pub struct ReconcileReadingsUseCaseImpl {
    pub product_repository: Arc<dyn ProductRepository>,
    pub price_record_repository: Arc<dyn PriceRecordRepository>,
    pub logger: Arc<dyn Logger>,
    pub max_concurrency: usize,
}

#[async_trait]
impl ReconcileReadingsUseCase for ReconcileReadingsUseCaseImpl {
    async fn execute(&self, params: ReconcileReadingsParams) -> Vec<ReconciliationReport> {
        let total = params.readings.len();
        let codes: Vec<String> = params.readings.iter().map(|r| r.code.clone()).collect();
        self.logger.info(&format!(
            "Reconciling {} readings for store context {}",
            total, params.store_context_id
        ));

        let permits = Arc::new(Semaphore::new(self.max_concurrency.max(1)));
        let mut tasks = JoinSet::new();

        for reading in params.readings {
            let permits = permits.clone();
            let worker = ReadingWorker {
                product_repository: self.product_repository.clone(),
                price_record_repository: self.price_record_repository.clone(),
                logger: self.logger.clone(),
                store_context_id: params.store_context_id.clone(),
            };

            tasks.spawn(async move {
                let Ok(_permit) = permits.acquire_owned().await else {
                    return ReconciliationReport {
                        code: reading.code,
                        outcome: ReconciliationOutcome::Failed(
                            "reconciliation.cancelled".to_string(),
                        ),
                    };
                };
                worker.reconcile(reading).await
            });
        }

        let mut reports = Vec::with_capacity(total);
        let mut aborted = false;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(report) => reports.push(report),
                Err(e) => {
                    aborted = true;
                    self.logger
                        .error(&format!("Reconciliation task aborted: {}", e));
                }
            }
        }
        if aborted {
            let missing = aborted_reports(&codes, &reports);
            reports.extend(missing);
        }

        let updated = reports
            .iter()
            .filter(|r| r.outcome == ReconciliationOutcome::Updated)
            .count();
        self.logger.info(&format!(
            "Reconciliation finished: {} of {} readings updated",
            updated, total
        ));

        reports
    }
}

/// One `Failed` report for every input code that came back without a report.
fn aborted_reports(codes: &[String], reports: &[ReconciliationReport]) -> Vec<ReconciliationReport> {
    let mut pending: HashMap<&str, usize> = HashMap::new();
    for code in codes {
        *pending.entry(code.as_str()).or_default() += 1;
    }
    for report in reports {
        if let Some(count) = pending.get_mut(report.code.as_str()) {
            *count = count.saturating_sub(1);
        }
    }

    codes
        .iter()
        .filter(|code| {
            pending.get_mut(code.as_str()).is_some_and(|count| {
                let missing = *count > 0;
                *count = count.saturating_sub(1);
                missing
            })
        })
        .map(|code| ReconciliationReport {
            code: code.clone(),
            outcome: ReconciliationOutcome::Failed("reconciliation.aborted".to_string()),
        })
        .collect()
}

/// Everything one reading needs, owned so it can run on its own task.
struct ReadingWorker {
    product_repository: Arc<dyn ProductRepository>,
    price_record_repository: Arc<dyn PriceRecordRepository>,
    logger: Arc<dyn Logger>,
    store_context_id: StoreContextId,
}

impl ReadingWorker {
    async fn reconcile(&self, reading: ValidatedReading) -> ReconciliationReport {
        let outcome = self.apply(&reading).await;

        match &outcome {
            ReconciliationOutcome::Updated => self.logger.info(&format!(
                "Updated price for product code {} to {}",
                reading.code, reading.normalized_price
            )),
            ReconciliationOutcome::SkippedNoExistingRecord => self.logger.info(&format!(
                "No price record for product code {} in store context {}, skipped",
                reading.code, self.store_context_id
            )),
            ReconciliationOutcome::Failed(reason) => self.logger.warn(&format!(
                "Error updating price for product code {}: {}",
                reading.code, reason
            )),
        }

        ReconciliationReport {
            code: reading.code,
            outcome,
        }
    }

    async fn apply(&self, reading: &ValidatedReading) -> ReconciliationOutcome {
        let product = match self.product_repository.find_by_code(&reading.code).await {
            Ok(product) => product,
            Err(RepositoryError::NotFound) => {
                return ReconciliationOutcome::Failed("product.not_found".to_string());
            }
            Err(e) => return ReconciliationOutcome::Failed(e.to_string()),
        };

        let record = match self
            .price_record_repository
            .find_by_store_and_product(&self.store_context_id, product.id)
            .await
        {
            Ok(Some(record)) => record,
            Ok(None) | Err(RepositoryError::NotFound) => {
                return ReconciliationOutcome::SkippedNoExistingRecord;
            }
            Err(e) => return ReconciliationOutcome::Failed(e.to_string()),
        };

        match self
            .price_record_repository
            .update_price(record.id, f64::from(reading.normalized_price), Utc::now())
            .await
        {
            Ok(()) => ReconciliationOutcome::Updated,
            Err(e) => ReconciliationOutcome::Failed(e.to_string()),
        }
    }
}
