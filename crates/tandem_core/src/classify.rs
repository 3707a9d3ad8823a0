//! Trust & safety classifier.
//!
//! Pure keyword-based mapping from an error and/or a set of safety flags to
//! a remediation category and a fixed user-safe message. First match wins;
//! the order is load-bearing because safety must dominate confidence-based
//! classification and the messages are mutually exclusive.

use serde::{Deserialize, Serialize};

const NETWORK_VOCAB: &[&str] = &["network", "fetch", "timeout", "connection", "offline", "dns"];

const MEDICAL_VOCAB: &[&str] = &["medical", "pain", "injury", "injured", "hurt", "doctor"];

const OVERTRAINING_VOCAB: &[&str] = &["fatigue", "overload", "overtraining", "overtrained", "exhausted", "burnout"];

const DATA_VOCAB: &[&str] = &["data", "schema", "permission", "parse", "decode", "missing field"];

/// Confidence below this threshold downgrades the response to a warning.
const LOW_CONFIDENCE_THRESHOLD: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    Timeout,
    Network,
    Medical,
    Overtraining,
    LowConfidence,
    Data,
    Unknown,
}

/// What the calling feature should do about the classified issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemediationAction {
    /// Retry the load from the top.
    Recover,
    /// Fall back to cached/offline data.
    Fallback,
    /// The calling feature must not proceed.
    Block,
    /// Reduce intensity and adapt the plan.
    Adapt,
    /// Proceed, but surface a caveat.
    Warn,
    /// Proceed and explain what happened.
    Explain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: IssueCategory,
    pub action: RemediationAction,
    pub message: &'static str,
}

fn contains_any(haystack: &str, vocab: &[&str]) -> bool {
    vocab.iter().any(|w| haystack.contains(w))
}

/// Classify an error and/or safety context into a remediation.
///
/// Pure: same inputs always produce the same output; no I/O; never panics.
pub fn classify(
    error: Option<&str>,
    confidence: Option<f32>,
    safety_flags: &[String],
) -> Classification {
    let error_lower = error.map(|e| e.to_lowercase()).unwrap_or_default();
    let flags_lower: Vec<String> = safety_flags.iter().map(|f| f.to_lowercase()).collect();

    // 1. Loading timeout: the screen's own loading timer fired.
    if error_lower.contains("loading")
        && (error_lower.contains("timeout") || error_lower.contains("timed out"))
    {
        return Classification {
            category: IssueCategory::Timeout,
            action: RemediationAction::Recover,
            message: "That took longer than expected. Let's try again.",
        };
    }

    // 2. Network vocabulary: fall back to cached data.
    if !error_lower.is_empty() && contains_any(&error_lower, NETWORK_VOCAB) {
        return Classification {
            category: IssueCategory::Network,
            action: RemediationAction::Fallback,
            message: "You're offline right now. Showing your saved data.",
        };
    }

    // 3. Medical safety flag: the feature must not proceed.
    if flags_lower.iter().any(|f| contains_any(f, MEDICAL_VOCAB)) {
        return Classification {
            category: IssueCategory::Medical,
            action: RemediationAction::Block,
            message: "Let's pause here. Please check in with a medical professional before continuing.",
        };
    }

    // 4. Fatigue/overload flag: adapt the plan downward.
    if flags_lower.iter().any(|f| contains_any(f, OVERTRAINING_VOCAB)) {
        return Classification {
            category: IssueCategory::Overtraining,
            action: RemediationAction::Adapt,
            message: "Your body is asking for recovery. Today's plan has been eased off.",
        };
    }

    // 5. Low confidence: proceed with a caveat.
    if let Some(c) = confidence {
        if c < LOW_CONFIDENCE_THRESHOLD {
            return Classification {
                category: IssueCategory::LowConfidence,
                action: RemediationAction::Warn,
                message: "This estimate is rough. Treat it as a starting point.",
            };
        }
    }

    // 6. Data/schema/permission vocabulary.
    if !error_lower.is_empty() && contains_any(&error_lower, DATA_VOCAB) {
        return Classification {
            category: IssueCategory::Data,
            action: RemediationAction::Explain,
            message: "Some of your data couldn't be read. Nothing was lost.",
        };
    }

    // 7. Everything else.
    Classification {
        category: IssueCategory::Unknown,
        action: RemediationAction::Explain,
        message: "Something unexpected happened. Your progress is safe.",
    }
}
