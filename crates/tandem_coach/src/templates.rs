//! Fixed response templates.
//!
//! Message selection is deterministic rule lookup, not generation: a
//! template registry keyed by event kind with a fallback row, a fixed
//! emotional-state to UI-mode table, and the ambient overlay and nudge
//! message sets.

use serde::{Deserialize, Serialize};
use tandem_core::{EmotionalState, UiMode, UiSurface};

#[derive(Debug, Clone, Copy)]
pub struct ResponseTemplate {
    pub message: &'static str,
    pub surface: UiSurface,
}

/// Template used when no registered row matches the event kind.
pub const FALLBACK_TEMPLATE: ResponseTemplate = ResponseTemplate {
    message: "Noted. I'm keeping track of how this fits your bigger picture.",
    surface: UiSurface::Card,
};

/// Registry of message/surface templates keyed by event kind.
pub fn template_for_kind(kind: &str) -> ResponseTemplate {
    match kind {
        "day_completed" => ResponseTemplate {
            message: "Day logged and closed out. Consistency like this is what moves the needle.",
            surface: UiSurface::Card,
        },
        "habit_broken" => ResponseTemplate {
            message: "One missed day is a data point, not a verdict.",
            surface: UiSurface::Dialog,
        },
        "pain_reported" => ResponseTemplate {
            message: "Thanks for telling me. Let's protect that and adjust today's plan.",
            surface: UiSurface::Dialog,
        },
        "workout_completed" => ResponseTemplate {
            message: "Workout done. Strong session.",
            surface: UiSurface::Card,
        },
        "meal_logged" => ResponseTemplate {
            message: "Meal logged. Every entry sharpens the picture.",
            surface: UiSurface::TimelineComment,
        },
        "streak_extended" => ResponseTemplate {
            message: "That streak keeps growing. It's becoming who you are.",
            surface: UiSurface::Card,
        },
        "returned_after_pause" => ResponseTemplate {
            message: "Good to see you back. We pick up right where it makes sense.",
            surface: UiSurface::Banner,
        },
        _ => FALLBACK_TEMPLATE,
    }
}

/// Fixed emotional-state to UI-mode table.
pub fn ui_mode_for(state: EmotionalState) -> UiMode {
    match state {
        EmotionalState::Calm | EmotionalState::Neutral => UiMode::Support,
        EmotionalState::Cautious => UiMode::Protect,
        EmotionalState::Fatigued => UiMode::Stabilize,
        EmotionalState::Recovering => UiMode::Reframe,
        EmotionalState::TrustRepair => UiMode::Support,
        EmotionalState::Confident => UiMode::Celebrate,
        EmotionalState::Motivated => UiMode::Motivate,
    }
}

/// Ambient overlay message for a screen visit with no triggering event.
pub fn overlay_message(state: EmotionalState) -> &'static str {
    match state {
        EmotionalState::Cautious => {
            "Take today gently. Nothing on the plan is worth pushing through pain."
        }
        EmotionalState::Fatigued => "Recovery is part of the program. A lighter day still counts.",
        EmotionalState::Recovering => "Small steps rebuild momentum faster than big promises.",
        EmotionalState::TrustRepair => {
            "No pressure today. Log what feels right and we'll go from there."
        }
        EmotionalState::Confident => "You've built real momentum. Keep doing what works.",
        EmotionalState::Motivated => "Nice rhythm lately. Want to stretch a goal a little?",
        EmotionalState::Calm | EmotionalState::Neutral => {
            "Here when you need me. Today is yours to shape."
        }
    }
}

/// The four fixed nudges. No state evaluation behind these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NudgeKind {
    Morning,
    Evening,
    Recovery,
    Motivation,
}

pub fn nudge_message(kind: NudgeKind) -> &'static str {
    match kind {
        NudgeKind::Morning => "Morning. One clear intention for today beats three vague ones.",
        NudgeKind::Evening => "Before the day closes: a quick log keeps tomorrow honest.",
        NudgeKind::Recovery => "Rest is training too. Let today be easy on purpose.",
        NudgeKind::Motivation => "You don't need a perfect week, just the next good decision.",
    }
}
