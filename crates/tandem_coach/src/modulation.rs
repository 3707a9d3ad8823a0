//! Emotional-state evaluation and trust modulation.
//!
//! Both are deterministic ladders. The emotional ladder's order is
//! significant: safety pre-empts everything else, then fatigue, then relapse
//! risk, then trust, then streak. The trust bands are contiguous and
//! non-overlapping over [0, 100]; every integer trust level hits exactly one
//! band.

use tandem_core::{
    classify, CoachMemoryEvent, CoachResponse, CoachScreenContext, EmotionalState, IssueCategory,
    TrustState,
};

/// Fatigue above this reads as a fatigued state.
const FATIGUE_THRESHOLD: f32 = 0.7;

/// Relapse risk above this reads as a recovering state.
const RELAPSE_THRESHOLD: f32 = 0.6;

pub const LOW_TRUST_SUFFIX: &str =
    "We'll take it one small step at a time. Nothing here resets your progress.";
pub const BUILDING_TRUST_SUFFIX: &str = "You're building something steady here.";
pub const RITUAL_TRUST_SUFFIX: &str = "Your routine is working. Let's keep its shape.";
pub const HIGH_TRUST_SUFFIX: &str =
    "You know your body best. I'm here for the fine-tuning.";

/// Priority-ordered emotional read of the current request.
///
/// `safety_mode` is the latched protective bit from the relationship
/// profile; it joins the event and context safety signals in the first rung.
pub fn evaluate_emotional_state(
    ctx: &CoachScreenContext,
    event: Option<&CoachMemoryEvent>,
    safety_mode: bool,
) -> EmotionalState {
    let event_safety = event.map_or(false, |e| e.safety_class.is_protective());
    let flag_safety = !ctx.safety_flags.is_empty()
        && matches!(
            classify(None, None, &ctx.safety_flags).category,
            IssueCategory::Medical | IssueCategory::Overtraining
        );
    if safety_mode || event_safety || flag_safety {
        return EmotionalState::Cautious;
    }

    if ctx.fatigue_level.unwrap_or(0.0) > FATIGUE_THRESHOLD {
        return EmotionalState::Fatigued;
    }
    if ctx.relapse_risk.unwrap_or(0.0) > RELAPSE_THRESHOLD {
        return EmotionalState::Recovering;
    }

    let trust = ctx.effective_trust();
    if trust < 40 {
        return EmotionalState::TrustRepair;
    }
    if trust >= 70 {
        return EmotionalState::Confident;
    }
    if ctx.streak.unwrap_or(0) >= 5 {
        return EmotionalState::Motivated;
    }

    EmotionalState::Neutral
}

/// Append the trust-appropriate sentence and override the trust descriptor
/// for the outer bands. Bands: [0,34], [35,59], [60,75], [76,100].
pub fn apply_trust_modulation(response: &mut CoachResponse, trust_level: u8) {
    match trust_level {
        0..=34 => {
            response.append_sentence(LOW_TRUST_SUFFIX);
            response.trust_state = Some(TrustState::TrustRepair);
        }
        35..=59 => {
            response.append_sentence(BUILDING_TRUST_SUFFIX);
        }
        60..=75 => {
            response.append_sentence(RITUAL_TRUST_SUFFIX);
        }
        _ => {
            response.append_sentence(HIGH_TRUST_SUFFIX);
            response.trust_state = Some(TrustState::Stable);
        }
    }
}
