pub mod cache;
pub mod config;
pub mod period;

use thiserror::Error;

use crate::error::{cache::CacheError, config::ConfigError, period::PeriodError};

/// Top level error for the statistics engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    PeriodError(#[from] PeriodError),
    #[error(transparent)]
    CacheError(#[from] CacheError),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    RedisError(#[from] fred::error::Error),
    #[error(transparent)]
    SerializationError(#[from] serde_json::Error),
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error("Internal error indicating a bug in cadastre, please report it: {0}")]
    InternalError(String),
}
