//! # Tandem Memory
//!
//! The resilience and coordination layer between the coach runtime and the
//! durable profile store:
//!
//! - [`CircuitBreaker`]: failure isolation for the persistence port
//! - [`MemoryService`]: fast, volatile relationship state
//! - [`CoachMemory`]: the facade that coordinates both halves, minimizes
//!   payloads, and synthesizes explainability traces
//!
//! Screens never talk to this crate directly; the coach runtime is the only
//! consumer.

pub mod breaker;
pub mod facade;
pub mod service;
pub mod trace;

pub use breaker::CircuitBreaker;
pub use facade::{best_effort, CoachMemory, TrustSignal};
pub use service::{MemoryService, TRUST_RESET_REASON};
pub use trace::DecisionCategory;
