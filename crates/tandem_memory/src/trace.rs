//! Explainability trace synthesis.
//!
//! Decision ids are routed to a closed set of decision categories through a
//! registered keyword table, and each category carries its own memory-ref
//! and pattern templates. Trust history is synthesized from the current
//! trust level as two deterministic points (~14 and ~3 days ago); there is
//! no durable trust-history log in this core, so the synthetic curve stands
//! in until one exists. The call sites are isolated so an append-only log
//! can replace them wholesale.

use chrono::{Duration, Utc};
use tandem_core::{
    EmotionalState, ExplainabilityBinding, MemoryLayer, MemoryRef, RelationshipProfile,
    TrustHistoryPoint,
};

/// Closed set of decision categories the coach can explain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionCategory {
    Plateau,
    HabitBreak,
    ReturnAfterPause,
    CalorieOverTarget,
    WorkoutMilestone,
    General,
}

/// Keyword routing table: first row whose keyword appears in the decision id
/// wins. Registered here rather than scattered as ad hoc substring checks.
const CATEGORY_ROUTES: &[(&[&str], DecisionCategory)] = &[
    (&["plateau", "stall"], DecisionCategory::Plateau),
    (&["habit_broken", "habit", "relapse"], DecisionCategory::HabitBreak),
    (
        &["returned_after_pause", "return", "pause", "comeback"],
        DecisionCategory::ReturnAfterPause,
    ),
    (
        &["calorie_over", "over_target", "day_completed"],
        DecisionCategory::CalorieOverTarget,
    ),
    (
        &["workout_completed", "workout", "strength", "streak"],
        DecisionCategory::WorkoutMilestone,
    ),
];

const PAIN_VOCAB: &[&str] = &["pain", "injury", "hurt"];
const FATIGUE_VOCAB: &[&str] = &["fatigue", "overload", "exhaust"];

impl DecisionCategory {
    pub fn from_decision_id(decision_id: &str) -> Self {
        let id = decision_id.to_lowercase();
        for (keywords, category) in CATEGORY_ROUTES {
            if keywords.iter().any(|k| id.contains(k)) {
                return *category;
            }
        }
        DecisionCategory::General
    }
}

/// One registered memory-reference template.
struct RefTemplate {
    summary: &'static str,
    days_ago: i64,
    layer: MemoryLayer,
    tags: &'static [&'static str],
}

fn ref_templates(category: DecisionCategory) -> &'static [RefTemplate] {
    match category {
        DecisionCategory::Plateau => &[
            RefTemplate {
                summary: "Weight held steady for 12 days while logging stayed consistent",
                days_ago: 12,
                layer: MemoryLayer::Pattern,
                tags: &["plateau", "weight"],
            },
            RefTemplate {
                summary: "Previous plateau resolved after a small calorie adjustment",
                days_ago: 47,
                layer: MemoryLayer::Episodic,
                tags: &["plateau", "adjustment"],
            },
        ],
        DecisionCategory::HabitBreak => &[
            RefTemplate {
                summary: "A kept habit streak of 9 days before the break",
                days_ago: 2,
                layer: MemoryLayer::Episodic,
                tags: &["habit", "streak"],
            },
            RefTemplate {
                summary: "Past habit breaks were followed by a return within 3 days",
                days_ago: 30,
                layer: MemoryLayer::Pattern,
                tags: &["habit", "recovery"],
            },
        ],
        DecisionCategory::ReturnAfterPause => &[
            RefTemplate {
                summary: "Last session before the pause ended on a completed plan day",
                days_ago: 9,
                layer: MemoryLayer::Episodic,
                tags: &["pause", "return"],
            },
            RefTemplate {
                summary: "Earlier comebacks started strongest with light sessions",
                days_ago: 60,
                layer: MemoryLayer::Pattern,
                tags: &["comeback", "pacing"],
            },
        ],
        DecisionCategory::CalorieOverTarget => &[
            RefTemplate {
                summary: "Calorie target exceeded on 2 of the last 7 days",
                days_ago: 1,
                layer: MemoryLayer::Pattern,
                tags: &["calories", "target"],
            },
            RefTemplate {
                summary: "Weekly average stayed within the adjusted range",
                days_ago: 7,
                layer: MemoryLayer::Semantic,
                tags: &["calories", "weekly"],
            },
        ],
        DecisionCategory::WorkoutMilestone => &[
            RefTemplate {
                summary: "Strength numbers improved across the last three sessions",
                days_ago: 4,
                layer: MemoryLayer::Pattern,
                tags: &["workout", "strength"],
            },
            RefTemplate {
                summary: "A personal record on the same lift six weeks ago",
                days_ago: 42,
                layer: MemoryLayer::Episodic,
                tags: &["workout", "pr"],
            },
        ],
        DecisionCategory::General => &[RefTemplate {
            summary: "Recent activity shows steady engagement",
            days_ago: 3,
            layer: MemoryLayer::Semantic,
            tags: &["general"],
        }],
    }
}

fn pattern_matches(category: DecisionCategory) -> Vec<String> {
    let patterns: &[&str] = match category {
        DecisionCategory::Plateau => &["progress_plateau", "consistent_logging"],
        DecisionCategory::HabitBreak => &["habit_interruption", "quick_rebound_history"],
        DecisionCategory::ReturnAfterPause => &["engagement_gap", "successful_comeback"],
        DecisionCategory::CalorieOverTarget => &["intake_variance", "weekly_balance"],
        DecisionCategory::WorkoutMilestone => &["strength_trend", "session_completion"],
        DecisionCategory::General => &["steady_engagement"],
    };
    patterns.iter().map(|p| p.to_string()).collect()
}

/// Two deterministic trust-curve points derived from the current level.
/// Known simplification: no durable trust-history log exists in this core.
fn synthetic_trust_history(trust_level: u8) -> Vec<TrustHistoryPoint> {
    let now = Utc::now();
    vec![
        TrustHistoryPoint {
            timestamp: now - Duration::days(14),
            delta: 3,
            trust_level: trust_level.saturating_sub(5),
            reason: "consistent_logging".to_string(),
        },
        TrustHistoryPoint {
            timestamp: now - Duration::days(3),
            delta: 2,
            trust_level,
            reason: "completed_planned_workout".to_string(),
        },
    ]
}

/// Safety flags derived from the decision id's own vocabulary.
fn safety_flags_for(decision_id: &str) -> Vec<String> {
    let id = decision_id.to_lowercase();
    let mut flags = Vec::new();
    if PAIN_VOCAB.iter().any(|w| id.contains(w)) {
        flags.push("pain".to_string());
    }
    if FATIGUE_VOCAB.iter().any(|w| id.contains(w)) {
        flags.push("fatigue".to_string());
    }
    flags
}

/// Synthesize the full binding for a decision against the given profile.
pub fn synthesize(decision_id: &str, profile: &RelationshipProfile) -> ExplainabilityBinding {
    let category = DecisionCategory::from_decision_id(decision_id);
    let now = Utc::now();

    let memory_refs = ref_templates(category)
        .iter()
        .enumerate()
        .map(|(i, t)| MemoryRef {
            ref_id: format!("mem_{}_{}", decision_id, i),
            summary: t.summary.to_string(),
            occurred_at: now - Duration::days(t.days_ago),
            layer: t.layer,
            tags: t.tags.iter().map(|s| s.to_string()).collect(),
        })
        .collect();

    ExplainabilityBinding {
        decision_id: decision_id.to_string(),
        memory_refs,
        trust_history: synthetic_trust_history(profile.trust_level),
        emotional_state: emotional_state_for(profile),
        safety_flags: safety_flags_for(decision_id),
        pattern_matches: pattern_matches(category),
    }
}

fn emotional_state_for(profile: &RelationshipProfile) -> EmotionalState {
    if profile.safety_mode {
        EmotionalState::Cautious
    } else {
        profile.emotional_state
    }
}
