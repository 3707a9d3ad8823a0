//! Property-based tests for trust modulation and the entitlement gate.
//!
//! Verifies that the modulation bands are exhaustive and non-overlapping
//! over every integer trust level, and that the gate is total and idempotent
//! for arbitrary responses and tiers.

use proptest::prelude::*;
use tandem_coach::modulation::{
    apply_trust_modulation, evaluate_emotional_state, BUILDING_TRUST_SUFFIX, HIGH_TRUST_SUFFIX,
    LOW_TRUST_SUFFIX, RITUAL_TRUST_SUFFIX,
};
use tandem_coach::{apply_entitlement_gate, ui_mode_for};
use tandem_core::{
    CoachResponse, CoachScreenContext, EmotionalState, ExplainabilityBinding, SubscriptionTier,
    UiMode, UiSurface,
};

const SUFFIXES: [&str; 4] = [
    LOW_TRUST_SUFFIX,
    BUILDING_TRUST_SUFFIX,
    RITUAL_TRUST_SUFFIX,
    HIGH_TRUST_SUFFIX,
];

// ============================================================================
// Strategies
// ============================================================================

fn arb_emotional_state() -> impl Strategy<Value = EmotionalState> {
    prop_oneof![
        Just(EmotionalState::Calm),
        Just(EmotionalState::Neutral),
        Just(EmotionalState::Cautious),
        Just(EmotionalState::Fatigued),
        Just(EmotionalState::Recovering),
        Just(EmotionalState::TrustRepair),
        Just(EmotionalState::Confident),
        Just(EmotionalState::Motivated),
    ]
}

fn arb_tier() -> impl Strategy<Value = SubscriptionTier> {
    prop_oneof![
        Just(SubscriptionTier::Free),
        Just(SubscriptionTier::Premium),
        Just(SubscriptionTier::Trial),
        Just(SubscriptionTier::Grace),
        Just(SubscriptionTier::Expired),
    ]
}

fn arb_response() -> impl Strategy<Value = CoachResponse> {
    (
        "[a-zA-Z .]{1,60}",
        arb_emotional_state(),
        proptest::collection::vec("[a-z_]{1,12}", 0..3),
        proptest::option::of("[a-z ]{1,30}"),
        any::<bool>(),
    )
        .prop_map(|(message, state, basis, trust_reason, with_binding)| {
            let mut r = CoachResponse::new(message, state, UiSurface::Card, ui_mode_for(state));
            r.personalization_basis = basis.clone();
            r.data_sources = basis;
            r.trust_reason = trust_reason;
            if with_binding {
                r.explainability = Some(ExplainabilityBinding::minimal("x:1"));
            }
            r
        })
}

// ============================================================================
// Trust modulation coverage
// ============================================================================

/// Every integer trust level in [0, 100] lands in exactly one band.
#[test]
fn modulation_bands_are_exhaustive_and_disjoint() {
    for trust in 0u8..=100 {
        let mut r = CoachResponse::new(
            "Base.",
            EmotionalState::Neutral,
            UiSurface::Card,
            UiMode::Support,
        );
        apply_trust_modulation(&mut r, trust);
        let matches = SUFFIXES
            .iter()
            .filter(|suffix| r.message.ends_with(*suffix))
            .count();
        assert_eq!(matches, 1, "trust {} matched {} bands", trust, matches);
    }
}

proptest! {
    /// Modulation always appends exactly one suffix, for any u8 input.
    #[test]
    fn modulation_is_total_over_u8(trust in any::<u8>()) {
        let mut r = CoachResponse::new(
            "Base.",
            EmotionalState::Neutral,
            UiSurface::Card,
            UiMode::Support,
        );
        let before = r.message.len();
        apply_trust_modulation(&mut r, trust);
        prop_assert!(r.message.len() > before);
    }

    // ========================================================================
    // Entitlement gate
    // ========================================================================

    /// After gating, non-premium responses never carry personalization
    /// depth, while message/state/surface remain present.
    #[test]
    fn gate_is_total(mut response in arb_response(), tier in arb_tier()) {
        apply_entitlement_gate(&mut response, tier);
        if !tier.has_premium_access() {
            prop_assert!(response.personalization_basis.is_empty());
            prop_assert!(response.data_sources.is_empty());
            prop_assert!(response.trust_reason.is_none());
            prop_assert_eq!(response.emotional_state, EmotionalState::Neutral);
            prop_assert_eq!(response.ui_mode, UiMode::Support);
            if let Some(binding) = &response.explainability {
                prop_assert!(binding.memory_refs.is_empty());
                prop_assert!(binding.trust_history.is_empty());
                prop_assert!(binding.pattern_matches.is_empty());
            }
        }
        prop_assert!(!response.message.is_empty());
    }

    /// Gating twice is the same as gating once.
    #[test]
    fn gate_is_idempotent(response in arb_response(), tier in arb_tier()) {
        let mut once = response.clone();
        apply_entitlement_gate(&mut once, tier);
        let mut twice = once.clone();
        apply_entitlement_gate(&mut twice, tier);
        prop_assert_eq!(once, twice);
    }

    // ========================================================================
    // Emotional evaluation dominance
    // ========================================================================

    /// A medical safety flag forces cautious regardless of every other
    /// signal in the context.
    #[test]
    fn safety_flag_dominates_all_signals(
        trust in any::<u8>(),
        fatigue in 0.0f32..1.0,
        relapse in 0.0f32..1.0,
        streak in any::<u32>(),
    ) {
        let mut ctx = CoachScreenContext::for_screen("home");
        ctx.trust_level = Some(trust.min(100));
        ctx.fatigue_level = Some(fatigue);
        ctx.relapse_risk = Some(relapse);
        ctx.streak = Some(streak);
        ctx.safety_flags = vec!["pain".to_string()];
        prop_assert_eq!(
            evaluate_emotional_state(&ctx, None, false),
            EmotionalState::Cautious
        );
    }
}
