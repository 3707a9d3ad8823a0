//! Coach response contract and the explainability binding.
//!
//! A [`CoachResponse`] is what screens render; the optional
//! [`ExplainabilityBinding`] is the structured "why" trace behind it. For
//! non-premium tiers the binding is present but depth-stripped, so callers can
//! render an explainability drawer unconditionally.

use crate::profile::EmotionalState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where the response is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiSurface {
    Card,
    Nudge,
    Dialog,
    Banner,
    TimelineComment,
}

/// Coaching register the UI should adopt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UiMode {
    Support,
    Motivate,
    Stabilize,
    Protect,
    Celebrate,
    Guide,
    Reframe,
}

/// Coarse trust descriptor attached to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustState {
    TrustRepair,
    Building,
    Stable,
}

/// Layer of memory a reference was drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryLayer {
    Episodic,
    Semantic,
    Pattern,
}

/// One prior episode cited by a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemoryRef {
    pub ref_id: String,
    pub summary: String,
    pub occurred_at: DateTime<Utc>,
    pub layer: MemoryLayer,
    pub tags: Vec<String>,
}

/// One point on the trust curve cited by a decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrustHistoryPoint {
    pub timestamp: DateTime<Utc>,
    pub delta: i32,
    pub trust_level: u8,
    pub reason: String,
}

/// Structured "why" trace for a coaching decision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplainabilityBinding {
    pub decision_id: String,
    pub memory_refs: Vec<MemoryRef>,
    pub trust_history: Vec<TrustHistoryPoint>,
    pub emotional_state: EmotionalState,
    pub safety_flags: Vec<String>,
    pub pattern_matches: Vec<String>,
}

impl ExplainabilityBinding {
    /// Structurally valid binding with empty arrays, substituted when the
    /// backing trace is unavailable or the caller lacks premium access.
    pub fn minimal(decision_id: &str) -> Self {
        Self {
            decision_id: decision_id.to_string(),
            memory_refs: Vec::new(),
            trust_history: Vec::new(),
            emotional_state: EmotionalState::Neutral,
            safety_flags: Vec::new(),
            pattern_matches: Vec::new(),
        }
    }

    /// Strip personalization depth, keeping the binding renderable.
    pub fn clear_depth(&mut self) {
        self.memory_refs.clear();
        self.trust_history.clear();
        self.pattern_matches.clear();
    }
}

/// The output contract toward the UI layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoachResponse {
    pub message: String,
    pub emotional_state: EmotionalState,
    pub ui_surface: UiSurface,
    pub ui_mode: UiMode,
    pub decision_id: Option<String>,
    pub trust_state: Option<TrustState>,
    pub trust_reason: Option<String>,
    #[serde(default)]
    pub safety_flags: Vec<String>,
    pub safety_reason: Option<String>,
    pub confidence: f32,
    #[serde(default)]
    pub personalization_basis: Vec<String>,
    #[serde(default)]
    pub data_sources: Vec<String>,
    pub explainability: Option<ExplainabilityBinding>,
}

impl CoachResponse {
    pub fn new(
        message: impl Into<String>,
        emotional_state: EmotionalState,
        ui_surface: UiSurface,
        ui_mode: UiMode,
    ) -> Self {
        Self {
            message: message.into(),
            emotional_state,
            ui_surface,
            ui_mode,
            decision_id: None,
            trust_state: None,
            trust_reason: None,
            safety_flags: Vec::new(),
            safety_reason: None,
            confidence: 1.0,
            personalization_basis: Vec::new(),
            data_sources: Vec::new(),
            explainability: None,
        }
    }

    /// Append a sentence to the message, separated by a space.
    pub fn append_sentence(&mut self, sentence: &str) {
        if !self.message.is_empty() {
            self.message.push(' ');
        }
        self.message.push_str(sentence);
    }
}
