//! Runtime initialization and the job entry point

use crate::app::{config::AppConfig, logging::init_logging};
use crate::config::{ConfigLoader, JobConfig};
use crate::job::{RecurringOrderJob, RunReport};
use crate::storage::StorageFactory;
use anyhow::Result;
use tracing::{debug, info};

/// Load job configuration, then initialize logging with it
pub async fn initialize_app(config: AppConfig) -> Result<(AppConfig, JobConfig)> {
    let job_config = ConfigLoader::new(&config.working_dir)
        .load(config.config_path.as_deref())
        .await?;

    let config = config.with_log_filter(job_config.log_level.clone());
    init_logging(&config);

    job_config.validate()?;
    Ok((config, job_config))
}

/// Build the configured table store and run the expansion once
pub async fn run_job(job_config: &JobConfig) -> Result<RunReport> {
    let store = StorageFactory::from_config(&job_config.backend, &job_config.tables)
        .await
        .map_err(crate::error::JobError::from)?;
    debug!("Using {} table store", store.backend_name());

    let report = RecurringOrderJob::from_store(store.as_ref())
        .with_batch_size(job_config.batch_size)
        .run()
        .await?;

    info!(
        "{} orders: {} expanded, {} already expanded, {} skipped, {} deliveries created",
        report.orders_seen(),
        report.expanded(),
        report.already_expanded(),
        report.skipped(),
        report.deliveries_created()
    );
    Ok(report)
}
