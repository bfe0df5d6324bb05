//! Statistics and reporting engine for multi-district land registry case
//! management.

pub mod config;
pub mod data;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod startup;
