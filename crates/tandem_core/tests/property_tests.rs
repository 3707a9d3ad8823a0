//! Property-based tests for the trust & safety classifier.
//!
//! Verifies that classification is total and deterministic over arbitrary
//! inputs, and that safety-flag matches always outrank confidence-based
//! classification when both conditions hold.

use proptest::prelude::*;
use tandem_core::{classify, IssueCategory, RemediationAction};

fn arb_error() -> impl Strategy<Value = Option<String>> {
    proptest::option::of("[a-z ]{0,40}")
}

fn arb_flags() -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec("[a-z ]{0,20}", 0..4)
}

proptest! {
    /// classify() never panics and always yields a coherent pair.
    #[test]
    fn classification_is_total(
        error in arb_error(),
        confidence in proptest::option::of(-1.0f32..2.0),
        flags in arb_flags(),
    ) {
        let c = classify(error.as_deref(), confidence, &flags);
        prop_assert!(!c.message.is_empty());
        // Block is reserved for medical classifications.
        if c.action == RemediationAction::Block {
            prop_assert_eq!(c.category, IssueCategory::Medical);
        }
    }

    /// Determinism: same inputs, same output.
    #[test]
    fn classification_is_pure(
        error in arb_error(),
        confidence in proptest::option::of(0.0f32..1.0),
        flags in arb_flags(),
    ) {
        let a = classify(error.as_deref(), confidence, &flags);
        let b = classify(error.as_deref(), confidence, &flags);
        prop_assert_eq!(a, b);
    }

    /// Safety dominance: with a medical flag present and no error text,
    /// low confidence never steals the classification.
    #[test]
    fn medical_flag_outranks_confidence(confidence in 0.0f32..0.5) {
        let flags = vec!["pain".to_string()];
        let c = classify(None, Some(confidence), &flags);
        prop_assert_eq!(c.category, IssueCategory::Medical);
        prop_assert_eq!(c.action, RemediationAction::Block);
    }

    /// Overtraining dominance over confidence, same shape as medical.
    #[test]
    fn overtraining_flag_outranks_confidence(confidence in 0.0f32..0.5) {
        let flags = vec!["overload".to_string()];
        let c = classify(None, Some(confidence), &flags);
        prop_assert_eq!(c.category, IssueCategory::Overtraining);
        prop_assert_eq!(c.action, RemediationAction::Adapt);
    }
}
