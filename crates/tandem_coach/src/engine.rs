//! The coach runtime.
//!
//! One deterministic evaluation pass per call; no persisted state machine.
//! These four entry points are the only surface screens may use; nothing
//! outside this crate reaches into the memory facade or breaker directly.

use crate::gate::apply_entitlement_gate;
use crate::modulation::{apply_trust_modulation, evaluate_emotional_state};
use crate::templates::{
    nudge_message, overlay_message, template_for_kind, ui_mode_for, NudgeKind,
};
use std::sync::Arc;
use std::time::Instant;
use tandem_core::{
    classify, CoachMemoryEvent, CoachResponse, CoachScreenContext, EmotionalState,
    ExplainabilityBinding, IssueCategory, SafetyClass, TelemetrySink, TrustState, UiMode,
    UiSurface,
};
use tandem_memory::{best_effort, CoachMemory, TrustSignal};

pub struct CoachRuntime {
    memory: Arc<CoachMemory>,
    telemetry: Arc<dyn TelemetrySink>,
}

impl CoachRuntime {
    /// Construct one runtime per process (or per test), with its
    /// collaborators injected.
    pub fn new(memory: Arc<CoachMemory>, telemetry: Arc<dyn TelemetrySink>) -> Self {
        Self { memory, telemetry }
    }

    /// React to a behavioral event from a screen.
    ///
    /// Never fails: a memory outage degrades personalization, not
    /// availability. The durable write is best-effort and any error
    /// (including `memory_circuit_open`) is logged and swallowed.
    pub async fn handle_user_event(
        &self,
        event: CoachMemoryEvent,
        ctx: &CoachScreenContext,
    ) -> CoachResponse {
        let started = Instant::now();

        best_effort(
            self.telemetry.as_ref(),
            "record_experience",
            (),
            self.memory.record_experience(&event, ctx),
        )
        .await;
        if event.trust_impact != 0 {
            best_effort(
                self.telemetry.as_ref(),
                "trust_update",
                (),
                self.memory
                    .update_trust_model(TrustSignal::new(event.trust_impact as i32, event.kind())),
            )
            .await;
        }

        let safety_mode = self.memory.volatile().relationship_profile().await.safety_mode;
        let emotional = evaluate_emotional_state(ctx, Some(&event), safety_mode);
        best_effort(
            self.telemetry.as_ref(),
            "emotional_baseline",
            (),
            self.memory.update_emotional_model(emotional),
        )
        .await;
        tracing::debug!(
            kind = event.kind(),
            state = emotional.as_str(),
            screen = %ctx.screen,
            "coach evaluation"
        );

        let decision_id = format!("{}:{}", event.kind(), event.occurred_at.timestamp());
        let mut response = self.generate_response(&event, emotional, ctx);
        response.decision_id = Some(decision_id.clone());

        apply_trust_modulation(&mut response, ctx.effective_trust());

        // Non-premium callers get a depth-free binding without a durable
        // round trip; the gate below is still the enforcement point.
        let binding = if ctx.subscription.has_premium_access() {
            self.memory.explainable_reasoning_trace(&decision_id).await
        } else {
            ExplainabilityBinding::minimal(&decision_id)
        };
        response.explainability = Some(binding);

        apply_entitlement_gate(&mut response, ctx.subscription);

        self.telemetry.track_timing(
            "coach_response_time",
            started.elapsed().as_millis() as u64,
            &[("screen", ctx.screen.as_str())],
        );
        self.telemetry
            .increment("coach_response", 1, &[("kind", event.kind())]);

        response
    }

    /// Ambient, lower-key message for a screen visit with no triggering
    /// event. Same evaluation, modulation, and gating pipeline.
    pub async fn coach_overlay(&self, ctx: &CoachScreenContext) -> CoachResponse {
        let safety_mode = self.memory.volatile().relationship_profile().await.safety_mode;
        let emotional = evaluate_emotional_state(ctx, None, safety_mode);

        let mut response = CoachResponse::new(
            overlay_message(emotional),
            emotional,
            UiSurface::Banner,
            ui_mode_for(emotional),
        );
        response.trust_state = Some(trust_descriptor(ctx.effective_trust()));
        response.safety_flags = ctx.safety_flags.clone();
        response.personalization_basis = vec!["screen_context".to_string()];
        response.data_sources = vec!["session_signals".to_string()];

        apply_trust_modulation(&mut response, ctx.effective_trust());
        apply_entitlement_gate(&mut response, ctx.subscription);
        response
    }

    /// Fixed nudge lookup. No state evaluation, no entitlement depth to
    /// gate.
    pub fn coach_nudge(&self, kind: NudgeKind) -> CoachResponse {
        CoachResponse::new(
            nudge_message(kind),
            EmotionalState::Neutral,
            UiSurface::Nudge,
            UiMode::Motivate,
        )
    }

    /// The "why" trace for a previous decision. Always renders: non-premium
    /// callers receive the trace with its depth arrays cleared rather than
    /// nothing.
    pub async fn explainability(
        &self,
        decision_id: &str,
        ctx: &CoachScreenContext,
    ) -> ExplainabilityBinding {
        let mut binding = self.memory.explainable_reasoning_trace(decision_id).await;
        if !ctx.subscription.has_premium_access() {
            binding.clear_depth();
        }
        binding
    }

    /// Template lookup plus descriptor attachment. Gating happens at the
    /// end of the calling pipeline, not here.
    fn generate_response(
        &self,
        event: &CoachMemoryEvent,
        emotional: EmotionalState,
        ctx: &CoachScreenContext,
    ) -> CoachResponse {
        let template = template_for_kind(event.kind());
        let mut response = CoachResponse::new(
            template.message,
            emotional,
            template.surface,
            ui_mode_for(emotional),
        );

        response.confidence = event.confidence;
        response.safety_flags = ctx.safety_flags.clone();
        if event.safety_class.is_protective() {
            response.safety_reason = Some(match event.safety_class {
                SafetyClass::MedicalRisk => {
                    "a medical-risk signal was reported with this event".to_string()
                }
                _ => "this event carried a caution signal".to_string(),
            });
        } else if !ctx.safety_flags.is_empty() {
            let classification = classify(None, None, &ctx.safety_flags);
            if matches!(
                classification.category,
                IssueCategory::Medical | IssueCategory::Overtraining
            ) {
                response.safety_reason = Some(classification.message.to_string());
            }
        }

        let trust = ctx.effective_trust();
        response.trust_state = Some(trust_descriptor(trust));
        response.trust_reason =
            Some("derived from recent logging consistency and check-in history".to_string());
        response.personalization_basis = vec![
            "relationship_profile".to_string(),
            "recent_events".to_string(),
        ];
        response.data_sources = vec!["behavior_log".to_string(), "trust_model".to_string()];

        response
    }
}

/// Coarse trust descriptor attached at generation time. The modulation
/// pass overrides it for the outer bands.
fn trust_descriptor(trust: u8) -> TrustState {
    match trust {
        0..=39 => TrustState::TrustRepair,
        40..=69 => TrustState::Building,
        _ => TrustState::Stable,
    }
}
