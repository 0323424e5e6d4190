//! Wall clock port definition.

/// Source of the current time in epoch milliseconds.
pub trait ClockPort: Send + Sync {
    /// Milliseconds since the Unix epoch.
    fn now_millis(&self) -> i64;
}
