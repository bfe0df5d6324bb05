pub mod warmup {
    /// Cron expression for the dashboard cache warm-up sweep
    /// Runs every 10 minutes at second 30, offset from minute-aligned
    /// jobs so sweeps never pile onto the same tick
    pub const CRON_EXPRESSION: &str = "30 */10 * * * *";
}
