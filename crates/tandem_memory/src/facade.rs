//! Memory facade: the single front door to coach memory.
//!
//! Hides the split between the volatile in-process service and the durable
//! persistence port, and enforces the resilience and privacy rules: every
//! port call goes through the circuit breaker, payloads are minimized before
//! they leave the process, and read paths with safe defaults never propagate
//! failures to callers.

use crate::breaker::CircuitBreaker;
use crate::service::{MemoryService, TRUST_RESET_REASON};
use crate::trace;
use std::future::Future;
use std::sync::Arc;
use std::time::Instant;
use tandem_core::{
    CoachLongTermContext, CoachMemoryEvent, CoachScreenContext, EmotionalState, EventRecord,
    ExplainabilityBinding, MemoryError, MemoryStore, RelationshipProfile, TandemConfig,
    TelemetrySink,
};

/// Fixed fallback when the journey summary is unavailable. Narrative text is
/// cosmetic, never load-bearing.
const GENERIC_NARRATIVE: &str = "Your journey so far shows steady effort and real progress.";

/// Execute a fallible async operation, log and count the failure, and return
/// the supplied default. The one swallow-and-log wrapper used for narrative,
/// explainability, and other non-load-bearing paths.
pub async fn best_effort<T, F>(telemetry: &dyn TelemetrySink, op: &'static str, default: T, fut: F) -> T
where
    F: Future<Output = Result<T, MemoryError>>,
{
    match fut.await {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!(op, error = %e, "best-effort operation failed, using default");
            telemetry.increment("best_effort_failure", 1, &[("op", op)]);
            default
        }
    }
}

/// Trust adjustment signal from the runtime.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TrustSignal {
    pub delta: i32,
    pub reason: Option<String>,
}

impl TrustSignal {
    pub fn new(delta: i32, reason: impl Into<String>) -> Self {
        Self {
            delta,
            reason: Some(reason.into()),
        }
    }
}

pub struct CoachMemory {
    store: Arc<dyn MemoryStore>,
    service: MemoryService,
    breaker: CircuitBreaker,
    telemetry: Arc<dyn TelemetrySink>,
}

impl CoachMemory {
    pub fn new(
        store: Arc<dyn MemoryStore>,
        telemetry: Arc<dyn TelemetrySink>,
        config: &TandemConfig,
    ) -> Self {
        Self {
            store,
            service: MemoryService::new(),
            breaker: CircuitBreaker::new(config.breaker.clone()),
            telemetry,
        }
    }

    /// The volatile half, exposed for context assembly and tests.
    pub fn volatile(&self) -> &MemoryService {
        &self.service
    }

    /// Gate one port call behind the breaker and record the outcome.
    async fn guarded<T, F>(&self, call: F) -> Result<T, MemoryError>
    where
        F: Future<Output = anyhow::Result<T>>,
    {
        if !self.breaker.can_request() {
            return Err(MemoryError::CircuitOpen);
        }
        match call.await {
            Ok(v) => {
                self.breaker.record_success();
                Ok(v)
            }
            Err(e) => {
                self.breaker.record_failure();
                Err(MemoryError::Persistence(e))
            }
        }
    }

    /// Record a behavioral experience.
    ///
    /// The volatile copy is written unconditionally, even while the circuit
    /// is open, so the live session stays responsive during an outage. The
    /// durable write fails fast with [`MemoryError::CircuitOpen`] when the
    /// breaker refuses, and otherwise forwards a minimized envelope.
    pub async fn record_experience(
        &self,
        event: &CoachMemoryEvent,
        ctx: &CoachScreenContext,
    ) -> Result<(), MemoryError> {
        self.service.record_event(event).await;

        let explainability_ref = format!("{}:{}", event.kind(), event.occurred_at.timestamp());
        let record = EventRecord::minimized(event, &ctx.screen, Some(explainability_ref));
        self.guarded(self.store.persist_event_memory(&record)).await
    }

    /// Breaker-gated read of the durable long-term profile, timed against
    /// the `memory_fetch_time` budget.
    pub async fn load_coach_context(&self) -> Result<RelationshipProfile, MemoryError> {
        let started = Instant::now();
        let result = self.guarded(self.store.load_long_term_profile()).await;
        self.telemetry.track_timing(
            "memory_fetch_time",
            started.elapsed().as_millis() as u64,
            &[],
        );
        result.map(|mut profile| {
            profile.normalize();
            profile
        })
    }

    /// Update both trust models, timed against the `trust_update_time`
    /// budget. The volatile half is updated even when the durable call is
    /// refused or fails.
    pub async fn update_trust_model(&self, signal: TrustSignal) -> Result<(), MemoryError> {
        let started = Instant::now();
        self.service
            .update_trust(signal.delta, signal.reason.as_deref())
            .await;
        let result = self
            .guarded(
                self.store
                    .update_trust_curve(signal.delta, signal.reason.as_deref()),
            )
            .await;
        self.telemetry.track_timing(
            "trust_update_time",
            started.elapsed().as_millis() as u64,
            &[],
        );
        result
    }

    /// Update the emotional model on both halves: the volatile state first,
    /// then the breaker-gated durable baseline.
    pub async fn update_emotional_model(&self, state: EmotionalState) -> Result<(), MemoryError> {
        self.service.update_emotional_state(state).await;
        self.guarded(self.store.update_emotional_baseline(state)).await
    }

    /// Best-effort journey narrative; a fixed generic sentence on any
    /// failure.
    pub async fn long_term_narrative(&self) -> String {
        best_effort(
            self.telemetry.as_ref(),
            "journey_narrative",
            GENERIC_NARRATIVE.to_string(),
            self.guarded(self.store.summarize_user_journey()),
        )
        .await
    }

    /// Synthesize the explainability trace for a decision.
    ///
    /// The profile load is breaker-gated but non-fatal: on any failure the
    /// trace is built against neutral defaults, so this never throws from
    /// the runtime's perspective.
    pub async fn explainable_reasoning_trace(&self, decision_id: &str) -> ExplainabilityBinding {
        let profile = best_effort(
            self.telemetry.as_ref(),
            "trace_profile_load",
            RelationshipProfile::default(),
            self.guarded(self.store.load_long_term_profile()),
        )
        .await;
        trace::synthesize(decision_id, &profile)
    }

    /// Pass-through to the persistence port's assembled context.
    pub async fn coach_context_for_response(&self) -> Result<CoachLongTermContext, MemoryError> {
        self.guarded(self.store.coach_context_for_response()).await
    }

    /// Administrative reset of all coach memory, both halves.
    pub async fn clear_coach_history(&self) -> Result<(), MemoryError> {
        let result = self.guarded(self.store.clear_coach_memory()).await;
        self.service.reset().await;
        result
    }

    /// Administrative trust reset: delta 0 with the fixed `trust_reset`
    /// reason on both trust models. Clears safety mode.
    pub async fn clear_trust_model(&self) -> Result<(), MemoryError> {
        self.service.update_trust(0, Some(TRUST_RESET_REASON)).await;
        self.guarded(
            self.store
                .update_trust_curve(0, Some(TRUST_RESET_REASON)),
        )
        .await
    }
}
