pub mod period;
pub mod scope;
pub mod stats;
