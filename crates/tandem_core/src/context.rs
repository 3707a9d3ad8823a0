//! Per-request screen context.
//!
//! A [`CoachScreenContext`] is a read-only snapshot supplied fresh on every
//! call into the runtime. It is never persisted as-is; only the event stream
//! reaches the durable store.

use serde::{Deserialize, Serialize};

/// Subscription tier from the entitlement source of truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    Free,
    Premium,
    Trial,
    Grace,
    Expired,
}

impl SubscriptionTier {
    /// Premium, Trial, and Grace are equivalent "unlocked" tiers.
    pub fn has_premium_access(&self) -> bool {
        matches!(
            self,
            SubscriptionTier::Premium | SubscriptionTier::Trial | SubscriptionTier::Grace
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserMode {
    Manual,
    PlanFollowing,
}

/// Read-only request snapshot from the screen layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoachScreenContext {
    pub screen: String,
    pub mode: UserMode,
    pub subscription: SubscriptionTier,
    pub trust_level: Option<u8>,
    pub fatigue_level: Option<f32>,
    pub relapse_risk: Option<f32>,
    pub motivation_level: Option<f32>,
    #[serde(default)]
    pub safety_flags: Vec<String>,
    pub adherence: Option<f32>,
    pub streak: Option<u32>,
    pub time_gap_days: Option<u32>,
}

impl CoachScreenContext {
    pub fn for_screen(screen: &str) -> Self {
        Self {
            screen: screen.to_string(),
            mode: UserMode::Manual,
            subscription: SubscriptionTier::Free,
            trust_level: None,
            fatigue_level: None,
            relapse_risk: None,
            motivation_level: None,
            safety_flags: Vec::new(),
            adherence: None,
            streak: None,
            time_gap_days: None,
        }
    }

    /// Trust signal for this request, defaulting to the neutral midpoint
    /// when the screen supplied none.
    pub fn effective_trust(&self) -> u8 {
        self.trust_level.unwrap_or(50).min(100)
    }
}

impl Default for CoachScreenContext {
    fn default() -> Self {
        Self::for_screen("unknown")
    }
}
