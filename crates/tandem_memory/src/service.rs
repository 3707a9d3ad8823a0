//! In-process memory service: the fast, volatile half of memory.
//!
//! Session-scoped relationship state behind an async RwLock. Returns a
//! well-formed default profile even if never written to, so first-time users
//! never see undefined behavior. Not required to be transactionally
//! consistent with the persistence port; eventual alignment is acceptable.

use tandem_core::{
    CoachLongTermContext, CoachMemoryEvent, EmotionalState, EventPayload, RelationshipProfile,
    RelationshipStage, SafetyClass,
};
use tokio::sync::RwLock;

/// How many recent event kinds the volatile context keeps.
const RECENT_EVENT_WINDOW: usize = 20;

/// Reason string that clears safety mode on a trust update.
pub const TRUST_RESET_REASON: &str = "trust_reset";

pub struct MemoryService {
    profile: RwLock<RelationshipProfile>,
    recent_kinds: RwLock<Vec<String>>,
}

impl MemoryService {
    pub fn new() -> Self {
        Self {
            profile: RwLock::new(RelationshipProfile::default()),
            recent_kinds: RwLock::new(Vec::new()),
        }
    }

    /// Fold one behavioral event into the volatile profile: safety latch,
    /// stage movement, and the recent-event ring. Trust deltas flow through
    /// [`Self::update_trust`] only, so they are never double-counted.
    pub async fn record_event(&self, event: &CoachMemoryEvent) {
        let mut profile = self.profile.write().await;

        if event.safety_class == SafetyClass::MedicalRisk {
            profile.safety_mode = true;
        }

        advance_stage_for_event(&mut profile, event);
        profile.normalize();
        profile.touch();
        drop(profile);

        let mut recent = self.recent_kinds.write().await;
        recent.push(event.kind().to_string());
        if recent.len() > RECENT_EVENT_WINDOW {
            let overflow = recent.len() - RECENT_EVENT_WINDOW;
            recent.drain(..overflow);
        }
    }

    pub async fn update_emotional_state(&self, state: EmotionalState) {
        let mut profile = self.profile.write().await;
        profile.emotional_state = state;
        profile.touch();
    }

    /// Apply a trust delta. A `trust_reset` reason clears safety mode;
    /// this is the only way out of it.
    pub async fn update_trust(&self, delta: i32, reason: Option<&str>) {
        let mut profile = self.profile.write().await;
        profile.apply_trust_delta(delta);
        if reason == Some(TRUST_RESET_REASON) {
            profile.safety_mode = false;
        }
        advance_stage_for_trust(&mut profile);
        if let Some(reason) = reason {
            tracing::debug!(delta, reason, trust = profile.trust_level, "volatile trust updated");
        }
    }

    pub async fn relationship_profile(&self) -> RelationshipProfile {
        self.profile.read().await.clone()
    }

    /// Volatile long-term context: the profile plus the recent-event window.
    pub async fn long_term_context(&self) -> CoachLongTermContext {
        let profile = self.profile.read().await;
        let recent = self.recent_kinds.read().await;
        CoachLongTermContext {
            stage: profile.stage,
            trust_level: profile.trust_level,
            emotional_baseline: profile.emotional_state,
            recent_event_kinds: recent.clone(),
            journey_summary: None,
        }
    }

    /// Administrative reset back to neutral defaults.
    pub async fn reset(&self) {
        *self.profile.write().await = RelationshipProfile::default();
        self.recent_kinds.write().await.clear();
    }
}

impl Default for MemoryService {
    fn default() -> Self {
        Self::new()
    }
}

/// Event-driven stage movement: a broken habit moves any stage into relapse
/// recovery, and a streak event at very high trust graduates a stable
/// partnership into a long-term companion.
fn advance_stage_for_event(profile: &mut RelationshipProfile, event: &CoachMemoryEvent) {
    use RelationshipStage::*;

    if matches!(event.payload, EventPayload::HabitBroken { .. }) {
        profile.stage = RelapseRecovery;
        return;
    }

    if matches!(event.payload, EventPayload::StreakExtended { .. })
        && profile.stage == StablePartnership
        && profile.trust_level >= 85
    {
        profile.stage = LongTermCompanion;
    }
}

/// Trust-driven stage movement. Never regresses; only events regress a
/// stage (into relapse recovery).
fn advance_stage_for_trust(profile: &mut RelationshipProfile) {
    use RelationshipStage::*;

    profile.stage = match (profile.stage, profile.trust_level) {
        (Onboarding, t) if t >= 55 => TrustBuilding,
        (TrustBuilding, t) | (RelapseRecovery, t) if t >= 70 => StablePartnership,
        (stage, _) => stage,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use tandem_core::EventPayload;

    fn event(payload: EventPayload) -> CoachMemoryEvent {
        CoachMemoryEvent::new(payload)
    }

    #[tokio::test]
    async fn test_unwritten_service_returns_defaults() {
        let svc = MemoryService::new();
        let profile = svc.relationship_profile().await;
        assert_eq!(profile.trust_level, 50);
        assert_eq!(profile.emotional_state, EmotionalState::Calm);
        assert_eq!(profile.stage, RelationshipStage::Onboarding);

        let ctx = svc.long_term_context().await;
        assert_eq!(ctx.trust_level, 50);
        assert!(ctx.recent_event_kinds.is_empty());
    }

    #[tokio::test]
    async fn test_medical_risk_latches_safety_mode() {
        let svc = MemoryService::new();
        let e = event(EventPayload::PainReported {
            location: "shoulder".into(),
            intensity: 0.8,
        })
        .with_safety_class(SafetyClass::MedicalRisk);
        svc.record_event(&e).await;
        assert!(svc.relationship_profile().await.safety_mode);

        // Ordinary events and trust updates do not clear it
        svc.record_event(&event(EventPayload::StreakExtended { length: 2 }))
            .await;
        svc.update_trust(5, Some("day_completed")).await;
        assert!(svc.relationship_profile().await.safety_mode);

        // Only the trust reset does
        svc.update_trust(0, Some(TRUST_RESET_REASON)).await;
        assert!(!svc.relationship_profile().await.safety_mode);
    }

    #[tokio::test]
    async fn test_trust_clamped() {
        let svc = MemoryService::new();
        for _ in 0..30 {
            svc.update_trust(2, Some("streak_extended")).await;
        }
        assert_eq!(svc.relationship_profile().await.trust_level, 100);

        svc.update_trust(-500, None).await;
        assert_eq!(svc.relationship_profile().await.trust_level, 0);
    }

    #[tokio::test]
    async fn test_record_event_does_not_move_trust() {
        let svc = MemoryService::new();
        svc.record_event(
            &event(EventPayload::StreakExtended { length: 1 }).with_trust_impact(2),
        )
        .await;
        // Trust flows only through update_trust; the event fold leaves it alone
        assert_eq!(svc.relationship_profile().await.trust_level, 50);
    }

    #[tokio::test]
    async fn test_habit_broken_moves_to_relapse_recovery() {
        let svc = MemoryService::new();
        svc.record_event(&event(EventPayload::HabitBroken {
            habit: "evening walk".into(),
            days_kept: 9,
        }))
        .await;
        assert_eq!(
            svc.relationship_profile().await.stage,
            RelationshipStage::RelapseRecovery
        );
    }

    #[tokio::test]
    async fn test_stage_progression_with_growing_trust() {
        let svc = MemoryService::new();

        // Past 55: onboarding to trust_building
        svc.update_trust(8, Some("day_completed")).await;
        assert_eq!(
            svc.relationship_profile().await.stage,
            RelationshipStage::TrustBuilding
        );

        // Past 70: stable partnership
        svc.update_trust(14, Some("day_completed")).await;
        assert_eq!(
            svc.relationship_profile().await.stage,
            RelationshipStage::StablePartnership
        );

        // Very high trust plus a streak event: long-term companion
        svc.update_trust(15, Some("streak_extended")).await;
        svc.record_event(&event(EventPayload::StreakExtended { length: 30 }))
            .await;
        assert_eq!(
            svc.relationship_profile().await.stage,
            RelationshipStage::LongTermCompanion
        );
    }

    #[tokio::test]
    async fn test_relapse_recovery_climbs_back_with_trust() {
        let svc = MemoryService::new();
        svc.update_trust(25, None).await; // 75, trust_building
        svc.record_event(&event(EventPayload::HabitBroken {
            habit: "morning run".into(),
            days_kept: 4,
        }))
        .await;
        assert_eq!(
            svc.relationship_profile().await.stage,
            RelationshipStage::RelapseRecovery
        );

        // Recovery at sustained high trust returns to stable partnership
        svc.update_trust(1, None).await;
        assert_eq!(
            svc.relationship_profile().await.stage,
            RelationshipStage::StablePartnership
        );
    }

    #[tokio::test]
    async fn test_recent_events_bounded() {
        let svc = MemoryService::new();
        for i in 0..30 {
            svc.record_event(&event(EventPayload::StreakExtended { length: i }))
                .await;
        }
        let ctx = svc.long_term_context().await;
        assert_eq!(ctx.recent_event_kinds.len(), RECENT_EVENT_WINDOW);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let svc = MemoryService::new();
        svc.update_trust(30, None).await;
        svc.update_emotional_state(EmotionalState::Confident).await;
        svc.reset().await;
        let profile = svc.relationship_profile().await;
        assert_eq!(profile.trust_level, 50);
        assert_eq!(profile.emotional_state, EmotionalState::Calm);
    }
}
