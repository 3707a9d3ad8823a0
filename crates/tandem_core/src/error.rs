//! Memory-path errors.
//!
//! The only error deliberately surfaced to callers is
//! [`MemoryError::CircuitOpen`]: the durable store is unhealthy and the
//! request was refused without waiting. Callers are expected to catch and
//! ignore or log it; coaching is an enhancement layer, not a blocking
//! dependency.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MemoryError {
    /// The circuit breaker is refusing durable-store requests.
    #[error("memory_circuit_open")]
    CircuitOpen,

    /// An individual persistence call failed. Retried only via the
    /// breaker's half-open probe on a later call, never synchronously.
    #[error("memory persistence failed: {0}")]
    Persistence(#[from] anyhow::Error),
}

impl MemoryError {
    pub fn is_circuit_open(&self) -> bool {
        matches!(self, MemoryError::CircuitOpen)
    }
}
