//! Scheduler for the periodic cache warm-up sweep.
//!
//! A cron-driven job recomputes the standard dashboard periods for every
//! tenant so the first viewer after a quiet stretch gets cached numbers
//! instead of paying for the aggregation queries.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::error::Error;
use crate::service::{cache::store::CacheStore, dashboard::DashboardService};

pub mod config;

pub struct Scheduler<S: CacheStore + 'static> {
    dashboard: Arc<DashboardService<S>>,
    warmup_cron: String,
    sched: JobScheduler,
}

impl<S: CacheStore + 'static> Scheduler<S> {
    /// Creates a new instance of [`Scheduler`].
    ///
    /// # Arguments
    /// - `dashboard` - Dashboard service owning the cache to keep warm
    /// - `warmup_cron` - Cron expression for the warm-up sweep
    ///
    /// # Returns
    /// - `Ok(Scheduler)` - Successfully created scheduler instance
    /// - `Err(Error)` - Failed to initialize the underlying job scheduler
    pub async fn new(
        dashboard: Arc<DashboardService<S>>,
        warmup_cron: String,
    ) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self {
            dashboard,
            warmup_cron,
            sched,
        })
    }

    /// Registers the warm-up job and starts the scheduler.
    ///
    /// Once started the sweep runs on its cron schedule until the process
    /// exits. Sweep outcomes are logged, never propagated, so a failed
    /// warm-up leaves the cache cold rather than taking the service down.
    ///
    /// # Returns
    /// - `Ok(())` - Job registered and scheduler started
    /// - `Err(Error)` - Invalid cron expression or scheduler error
    pub async fn start(self) -> Result<(), Error> {
        let dashboard = Arc::clone(&self.dashboard);

        self.sched
            .add(Job::new_async(self.warmup_cron.as_str(), move |_, _| {
                let dashboard = Arc::clone(&dashboard);

                Box::pin(async move {
                    match dashboard.warm_up().await {
                        Ok(count) => {
                            tracing::info!("Warmed {} dashboard cache entries", count)
                        }
                        Err(e) => {
                            tracing::error!("Error during dashboard cache warm-up: {:?}", e)
                        }
                    }
                })
            })?)
            .await?;

        self.sched.start().await?;

        Ok(())
    }
}
