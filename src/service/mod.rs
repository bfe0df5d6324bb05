pub mod cache;
pub mod charts;
pub mod classifier;
pub mod dashboard;
pub mod growth;
pub mod period;
pub mod statistics;


/// Rounds to one decimal, ties away from zero.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
