//! # Tandem Core
//!
//! Shared data model and trait seams for the coach decision & memory runtime:
//!
//! - Behavioral events ([`CoachMemoryEvent`]) and the relationship state they
//!   feed ([`RelationshipProfile`])
//! - The request/response contract between screens and the coach
//!   ([`CoachScreenContext`], [`CoachResponse`], [`ExplainabilityBinding`])
//! - The [`MemoryStore`] port to the durable profile store (implementation
//!   lives outside this workspace)
//! - The [`TelemetrySink`] seam for budgeted timing metrics
//! - The pure trust & safety classifier ([`classify::classify`])
//!
//! Everything here is deterministic and I/O free; the resilience and
//! coordination logic lives in `tandem_memory` and `tandem_coach`.

pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod profile;
pub mod response;
pub mod telemetry;

pub use classify::{classify, Classification, IssueCategory, RemediationAction};
pub use config::{BreakerConfig, TandemConfig, TelemetryConfig};
pub use context::{CoachScreenContext, SubscriptionTier, UserMode};
pub use error::MemoryError;
pub use event::{CoachMemoryEvent, EventPayload, EventRecord, SafetyClass};
pub use profile::{CoachLongTermContext, EmotionalState, RelationshipProfile, RelationshipStage};
pub use response::{
    CoachResponse, ExplainabilityBinding, MemoryLayer, MemoryRef, TrustHistoryPoint, TrustState,
    UiMode, UiSurface,
};
pub use telemetry::{LogTelemetry, NullTelemetry, TelemetrySink};

use async_trait::async_trait;

/// Port to the durable profile/event store.
///
/// Implementations live outside this workspace and are assumed to have
/// network-call semantics: they may fail, they may be slow, and they provide
/// their own consistency guarantees. Every call that crosses this boundary
/// must go through the memory facade's circuit breaker.
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// Persist one minimized behavioral event.
    async fn persist_event_memory(&self, record: &EventRecord) -> anyhow::Result<()>;

    /// Load the long-term relationship profile.
    async fn load_long_term_profile(&self) -> anyhow::Result<RelationshipProfile>;

    /// Apply a delta to the durable trust curve.
    async fn update_trust_curve(&self, delta: i32, reason: Option<&str>) -> anyhow::Result<()>;

    /// Update the durable emotional baseline.
    async fn update_emotional_baseline(&self, state: EmotionalState) -> anyhow::Result<()>;

    /// Natural-language summary of the user's journey so far.
    async fn summarize_user_journey(&self) -> anyhow::Result<String>;

    /// Assembled long-term context for response generation.
    async fn coach_context_for_response(&self) -> anyhow::Result<CoachLongTermContext>;

    /// Wipe all coach memory. Optional; defaults to a no-op for stores that
    /// do not support administrative resets.
    async fn clear_coach_memory(&self) -> anyhow::Result<()> {
        Ok(())
    }
}
