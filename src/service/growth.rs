//! Period-over-period growth.

use chrono::Duration;

use crate::model::period::Window;
use crate::service::round1;

/// Window of the same length that ends one second before `window` starts.
pub fn preceding_window(window: &Window) -> Window {
    let to = window.from - Duration::seconds(1);
    Window {
        from: to - window.length(),
        to,
    }
}

/// Percent change between two counts, rounded to one decimal.
///
/// An empty previous period reads as full growth when anything happened
/// and no growth when nothing did, so a first month never divides by zero.
pub fn growth_rate(current: i64, previous: i64) -> f64 {
    if previous == 0 {
        if current > 0 {
            return 100.0;
        }
        return 0.0;
    }

    round1((current as f64 - previous as f64) / previous as f64 * 100.0)
}
