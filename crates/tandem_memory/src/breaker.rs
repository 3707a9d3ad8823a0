//! Circuit breaker guarding calls to the durable memory store.
//!
//! One instance per logical dependency. Counts consecutive failures; after
//! `failure_threshold` of them the circuit opens and all requests are
//! refused until `reset_timeout` elapses, at which point a single half-open
//! probe is allowed through. A probe failure re-opens the circuit and
//! restarts the timer; a probe success closes it and zeroes the counter.

use std::sync::{Arc, Mutex};
use std::time::Instant;
use tandem_core::BreakerConfig;
use tracing::{info, warn};

/// Circuit state.
#[derive(Debug, Clone)]
enum State {
    /// Normal operation, counting consecutive failures.
    Closed { failures: u32 },
    /// Tripped: all requests are refused until the reset window elapses.
    Open { tripped_at: Instant },
    /// Reset window elapsed: exactly one probe request is in flight.
    HalfOpen,
}

impl Default for State {
    fn default() -> Self {
        Self::Closed { failures: 0 }
    }
}

/// Thread-safe failure-isolation primitive.
#[derive(Debug, Clone)]
pub struct CircuitBreaker {
    config: BreakerConfig,
    state: Arc<Mutex<State>>,
}

impl CircuitBreaker {
    pub fn new(config: BreakerConfig) -> Self {
        Self {
            config,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    /// Check whether a request may proceed.
    ///
    /// Returns `true` while Closed, and once per reset window while Open
    /// (transitioning to HalfOpen for a single probe). While a probe is in
    /// flight, additional callers are refused until it resolves.
    pub fn can_request(&self) -> bool {
        let Ok(mut guard) = self.state.lock() else {
            return true; // If mutex is poisoned, allow the request
        };
        let state = &mut *guard;

        match state {
            State::Closed { .. } => true,
            State::Open { tripped_at } => {
                if tripped_at.elapsed() >= self.config.reset_timeout() {
                    info!("memory circuit half-open, allowing probe request");
                    *state = State::HalfOpen;
                    true
                } else {
                    false
                }
            }
            State::HalfOpen => false,
        }
    }

    /// Record a successful request. Closes the circuit and zeroes the
    /// consecutive-failure counter.
    pub fn record_success(&self) {
        let Ok(mut state) = self.state.lock() else {
            return;
        };
        let was_half_open = matches!(&*state, State::HalfOpen);
        *state = State::Closed { failures: 0 };
        if was_half_open {
            info!("memory circuit recovered (half-open probe succeeded)");
        }
    }

    /// Record a failed request. May trip the circuit.
    pub fn record_failure(&self) {
        let Ok(mut guard) = self.state.lock() else {
            return;
        };
        let state = &mut *guard;

        match state {
            State::Closed { failures } => {
                *failures += 1;
                if *failures >= self.config.failure_threshold {
                    warn!(
                        failures = *failures,
                        reset_ms = self.config.reset_timeout_ms,
                        "memory circuit tripped; durable store calls paused"
                    );
                    *state = State::Open {
                        tripped_at: Instant::now(),
                    };
                }
            }
            State::HalfOpen => {
                warn!(
                    reset_ms = self.config.reset_timeout_ms,
                    "memory circuit half-open probe failed; re-tripped"
                );
                *state = State::Open {
                    tripped_at: Instant::now(),
                };
            }
            State::Open { .. } => {
                // Already open; nothing to do.
            }
        }
    }
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(BreakerConfig::default())
    }
}
