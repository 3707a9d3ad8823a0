//! Entitlement gate.
//!
//! The single enforcement point for premium-gated personalization. Applied
//! exactly once, as the final step of each runtime entry point; no other
//! module strips or withholds these fields.

use tandem_core::{CoachResponse, EmotionalState, SubscriptionTier, UiMode};

/// Neutralize a response for tiers without premium access.
///
/// The message, emotional state, and surface always remain present; only
/// personalization depth is removed. Idempotent and total over all tiers.
pub fn apply_entitlement_gate(response: &mut CoachResponse, tier: SubscriptionTier) {
    if tier.has_premium_access() {
        return;
    }

    response.emotional_state = EmotionalState::Neutral;
    response.ui_mode = UiMode::Support;
    response.personalization_basis.clear();
    response.data_sources.clear();
    response.trust_reason = None;
    if let Some(binding) = response.explainability.as_mut() {
        binding.clear_depth();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tandem_core::{ExplainabilityBinding, MemoryLayer, MemoryRef, UiSurface};

    fn personalized_response() -> CoachResponse {
        let mut r = CoachResponse::new(
            "Strong week.",
            EmotionalState::Confident,
            UiSurface::Card,
            UiMode::Celebrate,
        );
        r.personalization_basis = vec!["relationship_profile".into()];
        r.data_sources = vec!["behavior_log".into()];
        r.trust_reason = Some("consistent logging".into());
        let mut binding = ExplainabilityBinding::minimal("workout_completed:1");
        binding.memory_refs.push(MemoryRef {
            ref_id: "mem_1".into(),
            summary: "prior PR".into(),
            occurred_at: Utc::now(),
            layer: MemoryLayer::Episodic,
            tags: vec!["workout".into()],
        });
        r.explainability = Some(binding);
        r
    }

    #[test]
    fn test_free_tier_is_neutralized() {
        let mut r = personalized_response();
        apply_entitlement_gate(&mut r, SubscriptionTier::Free);
        assert_eq!(r.emotional_state, EmotionalState::Neutral);
        assert_eq!(r.ui_mode, UiMode::Support);
        assert!(r.personalization_basis.is_empty());
        assert!(r.data_sources.is_empty());
        assert!(r.trust_reason.is_none());
        // Binding stays present but depth-stripped
        let binding = r.explainability.as_ref().unwrap();
        assert!(binding.memory_refs.is_empty());
        // Message and surface survive
        assert!(!r.message.is_empty());
    }

    #[test]
    fn test_premium_tiers_pass_through() {
        for tier in [
            SubscriptionTier::Premium,
            SubscriptionTier::Trial,
            SubscriptionTier::Grace,
        ] {
            let mut r = personalized_response();
            apply_entitlement_gate(&mut r, tier);
            assert_eq!(r.emotional_state, EmotionalState::Confident);
            assert!(!r.personalization_basis.is_empty());
            assert!(r.trust_reason.is_some());
        }
    }

    #[test]
    fn test_gate_is_idempotent() {
        let mut once = personalized_response();
        apply_entitlement_gate(&mut once, SubscriptionTier::Expired);
        let mut twice = once.clone();
        apply_entitlement_gate(&mut twice, SubscriptionTier::Expired);
        assert_eq!(once, twice);
    }
}
