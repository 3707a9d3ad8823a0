//! # Tandem Coach
//!
//! The decision engine: converts a behavioral event and screen context into
//! an adaptive, trust-calibrated coaching response with an auditable "why"
//! trace. Message selection is deterministic and rule-based; there is no
//! text generation here.
//!
//! Screens consume exactly four entry points on [`CoachRuntime`]:
//! `handle_user_event`, `coach_overlay`, `coach_nudge`, and
//! `explainability`.

pub mod engine;
pub mod gate;
pub mod modulation;
pub mod templates;

pub use engine::CoachRuntime;
pub use gate::apply_entitlement_gate;
pub use modulation::{apply_trust_modulation, evaluate_emotional_state};
pub use templates::{nudge_message, overlay_message, template_for_kind, ui_mode_for, NudgeKind};
