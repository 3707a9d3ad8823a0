//! Behavioral event model.
//!
//! A [`CoachMemoryEvent`] is an immutable fact about user behavior, created
//! at the screen layer, consumed exactly once by the memory facade, then
//! forwarded to both the persistence port and the in-process memory service.
//! The payload is a tagged union per event kind; [`EventPayload::Other`] is
//! the escape hatch for genuinely open-ended metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Safety classification attached by the screen layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyClass {
    Normal,
    Caution,
    MedicalRisk,
}

impl SafetyClass {
    /// Any class that should force protective coaching behavior.
    pub fn is_protective(&self) -> bool {
        matches!(self, SafetyClass::Caution | SafetyClass::MedicalRisk)
    }
}

/// Per-kind event payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventPayload {
    DayCompleted {
        calories_consumed: Option<u32>,
        calorie_target: Option<u32>,
    },
    HabitBroken {
        habit: String,
        days_kept: u32,
    },
    PainReported {
        location: String,
        /// Self-reported intensity, 0.0 - 1.0.
        intensity: f32,
    },
    WorkoutCompleted {
        workout: String,
        duration_min: u32,
        personal_record: bool,
    },
    MealLogged {
        meal: String,
        calories: u32,
    },
    StreakExtended {
        length: u32,
    },
    ReturnedAfterPause {
        days_away: u32,
    },
    /// Fallback for event kinds this core has no dedicated shape for.
    Other {
        kind: String,
        #[serde(default)]
        data: HashMap<String, serde_json::Value>,
    },
}

impl EventPayload {
    /// Stable snake_case tag used for template lookup and decision ids.
    pub fn kind(&self) -> &str {
        match self {
            EventPayload::DayCompleted { .. } => "day_completed",
            EventPayload::HabitBroken { .. } => "habit_broken",
            EventPayload::PainReported { .. } => "pain_reported",
            EventPayload::WorkoutCompleted { .. } => "workout_completed",
            EventPayload::MealLogged { .. } => "meal_logged",
            EventPayload::StreakExtended { .. } => "streak_extended",
            EventPayload::ReturnedAfterPause { .. } => "returned_after_pause",
            EventPayload::Other { kind, .. } => kind.as_str(),
        }
    }

    /// Copy of the payload with every string field truncated to the
    /// persistence limit. Numeric fields pass through untouched.
    pub fn minimized(&self) -> EventPayload {
        match self {
            EventPayload::HabitBroken { habit, days_kept } => EventPayload::HabitBroken {
                habit: truncate_field(habit),
                days_kept: *days_kept,
            },
            EventPayload::PainReported {
                location,
                intensity,
            } => EventPayload::PainReported {
                location: truncate_field(location),
                intensity: *intensity,
            },
            EventPayload::WorkoutCompleted {
                workout,
                duration_min,
                personal_record,
            } => EventPayload::WorkoutCompleted {
                workout: truncate_field(workout),
                duration_min: *duration_min,
                personal_record: *personal_record,
            },
            EventPayload::MealLogged { meal, calories } => EventPayload::MealLogged {
                meal: truncate_field(meal),
                calories: *calories,
            },
            EventPayload::Other { kind, data } => EventPayload::Other {
                kind: truncate_field(kind),
                data: data
                    .iter()
                    .map(|(k, v)| (k.clone(), truncate_value(v)))
                    .collect(),
            },
            other => other.clone(),
        }
    }
}

/// Immutable behavioral fact. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachMemoryEvent {
    pub id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub payload: EventPayload,
    /// Caller confidence in the observation, 0.0 - 1.0.
    pub confidence: f32,
    pub safety_class: SafetyClass,
    /// Trust delta this event carries, clamped to [-2, 2].
    pub trust_impact: i8,
}

impl CoachMemoryEvent {
    pub fn new(payload: EventPayload) -> Self {
        Self {
            id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            payload,
            confidence: 1.0,
            safety_class: SafetyClass::Normal,
            trust_impact: 0,
        }
    }

    pub fn with_confidence(mut self, confidence: f32) -> Self {
        self.confidence = if confidence.is_finite() {
            confidence.clamp(0.0, 1.0)
        } else {
            1.0
        };
        self
    }

    pub fn with_safety_class(mut self, safety_class: SafetyClass) -> Self {
        self.safety_class = safety_class;
        self
    }

    pub fn with_trust_impact(mut self, trust_impact: i8) -> Self {
        self.trust_impact = trust_impact.clamp(-2, 2);
        self
    }

    pub fn kind(&self) -> &str {
        self.payload.kind()
    }
}

// ============================================================================
// Persistence envelope
// ============================================================================

/// Maximum length of any string field forwarded to the persistence port.
pub const MAX_PERSISTED_FIELD_LEN: usize = 500;

/// Marker appended to truncated fields.
pub const TRUNCATION_MARKER: &str = "…[truncated]";

/// Truncate a string field to the persistence limit, appending the marker.
pub fn truncate_field(s: &str) -> String {
    if s.chars().count() <= MAX_PERSISTED_FIELD_LEN {
        return s.to_string();
    }
    let mut out: String = s.chars().take(MAX_PERSISTED_FIELD_LEN).collect();
    out.push_str(TRUNCATION_MARKER);
    out
}

/// Truncate string values inside free-form metadata; everything else passes
/// through untouched.
fn truncate_value(v: &serde_json::Value) -> serde_json::Value {
    match v {
        serde_json::Value::String(s) => serde_json::Value::String(truncate_field(s)),
        other => other.clone(),
    }
}

/// Minimized event envelope forwarded to the persistence port.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub event: CoachMemoryEvent,
    pub source_screen: String,
    pub explainability_ref: Option<String>,
}

impl EventRecord {
    /// Build the envelope, minimizing the payload before it leaves the
    /// process boundary.
    pub fn minimized(
        event: &CoachMemoryEvent,
        source_screen: &str,
        explainability_ref: Option<String>,
    ) -> Self {
        let mut minimized = event.clone();
        minimized.payload = event.payload.minimized();
        Self {
            event: minimized,
            source_screen: truncate_field(source_screen),
            explainability_ref,
        }
    }
}
