//! Relationship state between the user and the coach.
//!
//! The [`RelationshipProfile`] is the mutable, single-owner-at-a-time state
//! the coach adapts around: a 0-100 trust scalar, an emotional baseline, and
//! a coarse relationship stage. It is created with neutral defaults on first
//! access, updated additively per event, and never deleted, only reset.

use serde::{Deserialize, Serialize};

/// Guard against NaN and Infinity in profile scalars.
/// If the value is NaN or Inf, replace with the provided fallback.
#[inline]
fn sanitize_f32(v: f32, fallback: f32) -> f32 {
    if v.is_finite() {
        v
    } else {
        tracing::warn!("NaN/Inf detected in profile, resetting to fallback {}", fallback);
        fallback
    }
}

/// Coarse stage of the coaching relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipStage {
    Onboarding,
    TrustBuilding,
    StablePartnership,
    RelapseRecovery,
    LongTermCompanion,
}

/// Emotional tone the coach reads from (and writes to) the relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmotionalState {
    #[default]
    Calm,
    Neutral,
    Cautious,
    Fatigued,
    Recovering,
    TrustRepair,
    Confident,
    Motivated,
}

impl EmotionalState {
    /// Stable snake_case label, matching the serde wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            EmotionalState::Calm => "calm",
            EmotionalState::Neutral => "neutral",
            EmotionalState::Cautious => "cautious",
            EmotionalState::Fatigued => "fatigued",
            EmotionalState::Recovering => "recovering",
            EmotionalState::TrustRepair => "trust_repair",
            EmotionalState::Confident => "confident",
            EmotionalState::Motivated => "motivated",
        }
    }
}

/// Mutable relationship state. Trust is always clamped to [0, 100];
/// `safety_mode` latches on medical-risk events and only a trust reset
/// clears it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelationshipProfile {
    pub stage: RelationshipStage,
    pub trust_level: u8,
    pub emotional_state: EmotionalState,
    /// Ability to absorb setbacks without disengaging, 0.0 - 1.0.
    pub resilience: f32,
    /// Preference for self-directed decisions over guided ones, 0.0 - 1.0.
    pub autonomy: f32,
    pub safety_mode: bool,
    pub confidence_growth_rate: f32,
    pub confidence_decay_rate: f32,
    /// Unix timestamp of last update.
    pub last_updated: i64,
}

impl Default for RelationshipProfile {
    fn default() -> Self {
        Self {
            stage: RelationshipStage::Onboarding,
            trust_level: 50,
            emotional_state: EmotionalState::Calm,
            resilience: 0.5,
            autonomy: 0.5,
            safety_mode: false,
            confidence_growth_rate: 0.05,
            confidence_decay_rate: 0.02,
            last_updated: chrono::Utc::now().timestamp(),
        }
    }
}

impl RelationshipProfile {
    /// Apply a trust delta, clamping the result to [0, 100].
    pub fn apply_trust_delta(&mut self, delta: i32) {
        self.trust_level = (self.trust_level as i32 + delta).clamp(0, 100) as u8;
        self.touch();
    }

    /// Sanitize and clamp all scalar fields to valid ranges.
    pub fn normalize(&mut self) {
        self.resilience = sanitize_f32(self.resilience, 0.5).clamp(0.0, 1.0);
        self.autonomy = sanitize_f32(self.autonomy, 0.5).clamp(0.0, 1.0);
        self.confidence_growth_rate = sanitize_f32(self.confidence_growth_rate, 0.05).clamp(0.0, 1.0);
        self.confidence_decay_rate = sanitize_f32(self.confidence_decay_rate, 0.02).clamp(0.0, 1.0);
        self.trust_level = self.trust_level.min(100);
    }

    pub fn touch(&mut self) {
        self.last_updated = chrono::Utc::now().timestamp();
    }
}

/// Assembled long-term context handed to response generation.
///
/// Derivable from either half of memory: the durable store assembles it from
/// the authoritative profile, the in-process service from its volatile copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachLongTermContext {
    pub stage: RelationshipStage,
    pub trust_level: u8,
    pub emotional_baseline: EmotionalState,
    /// Most recent event kinds, oldest first.
    pub recent_event_kinds: Vec<String>,
    pub journey_summary: Option<String>,
}

impl Default for CoachLongTermContext {
    fn default() -> Self {
        Self {
            stage: RelationshipStage::Onboarding,
            trust_level: 50,
            emotional_baseline: EmotionalState::Calm,
            recent_event_kinds: Vec::new(),
            journey_summary: None,
        }
    }
}
