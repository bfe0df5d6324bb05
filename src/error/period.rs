use chrono::NaiveDateTime;
use thiserror::Error;

/// The only period failure surfaced to callers. Every other irregular
/// input degrades to a documented fallback window.
#[derive(Error, Debug)]
pub enum PeriodError {
    #[error("Custom period is inverted: from {from} is after {to}")]
    InvertedRange {
        from: NaiveDateTime,
        to: NaiveDateTime,
    },
}
