//! Telemetry seam.
//!
//! Fire-and-forget: implementations must never panic, never block the
//! caller, and never influence control flow. A budget miss is a signal for
//! operators, not an error.

use std::collections::HashMap;

/// Budgeted metrics sink. Safe to call from any code path, including
/// failure handlers.
pub trait TelemetrySink: Send + Sync {
    /// Record an operation duration. If the metric has a budget and the
    /// duration exceeds it, a budget-exceeded warning is emitted instead of
    /// a normal timing record.
    fn track_timing(&self, name: &str, duration_ms: u64, meta: &[(&str, &str)]);

    /// Bump a counter.
    fn increment(&self, name: &str, value: u64, meta: &[(&str, &str)]);
}

/// Default budgets, milliseconds. Overridable via [`crate::TelemetryConfig`].
pub fn default_budgets() -> HashMap<String, u64> {
    let mut budgets = HashMap::new();
    budgets.insert("memory_fetch_time".to_string(), 400);
    budgets.insert("trust_update_time".to_string(), 250);
    budgets
}

/// Tracing-backed sink with a per-metric budget table.
pub struct LogTelemetry {
    budgets_ms: HashMap<String, u64>,
}

impl LogTelemetry {
    pub fn new() -> Self {
        Self {
            budgets_ms: default_budgets(),
        }
    }

    pub fn with_budgets(budgets_ms: HashMap<String, u64>) -> Self {
        Self { budgets_ms }
    }
}

impl Default for LogTelemetry {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetrySink for LogTelemetry {
    fn track_timing(&self, name: &str, duration_ms: u64, meta: &[(&str, &str)]) {
        match self.budgets_ms.get(name) {
            Some(&budget) if duration_ms > budget => {
                tracing::warn!(
                    metric = name,
                    duration_ms,
                    budget_ms = budget,
                    ?meta,
                    "metric budget exceeded"
                );
            }
            _ => {
                tracing::debug!(metric = name, duration_ms, ?meta, "timing");
            }
        }
    }

    fn increment(&self, name: &str, value: u64, meta: &[(&str, &str)]) {
        tracing::debug!(metric = name, value, ?meta, "count");
    }
}

/// No-op sink for tests.
pub struct NullTelemetry;

impl TelemetrySink for NullTelemetry {
    fn track_timing(&self, _name: &str, _duration_ms: u64, _meta: &[(&str, &str)]) {}
    fn increment(&self, _name: &str, _value: u64, _meta: &[(&str, &str)]) {}
}
