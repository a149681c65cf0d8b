//! Session-length resolution.

use pulso_core::plan::PlanMetadata;
use pulso_core::profile::UserProfile;

use crate::templates::goal_minutes;

/// Ceiling applied to the recommendation when the user is stressed or short on sleep.
pub const RECOVERY_CAP_MINUTES: u32 = 30;
/// Below this many hours of sleep the recommendation is capped.
const SHORT_SLEEP_HOURS: f32 = 6.0;

/// The duration fallback chain for one request: requested → recommended → fixed default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationPlan {
    /// Asked for in the conversation ("1 hora").
    pub requested: Option<u32>,
    /// Derived from the profile.
    pub recommended: Option<u32>,
    /// Last resort from configuration.
    pub fallback: u32,
}

impl DurationPlan {
    /// Resolve the plan for a profile.
    pub fn for_profile(profile: &UserProfile, requested: Option<u32>, fallback: u32) -> Self {
        Self {
            requested,
            recommended: Some(recommended_minutes(profile)),
            fallback,
        }
    }

    /// Session length for a day that did not state its own.
    pub fn session_minutes(&self) -> u32 {
        self.requested.or(self.recommended).unwrap_or(self.fallback)
    }

    pub fn metadata(&self) -> PlanMetadata {
        PlanMetadata {
            requested_duration_minutes: self.requested,
            recommended_duration_minutes: self.recommended.unwrap_or(self.fallback),
        }
    }
}

/// Goal baseline, capped when the profile reports high stress or under 6 h of sleep.
pub fn recommended_minutes(profile: &UserProfile) -> u32 {
    let base = goal_minutes(profile.goal);
    let short_sleep = profile
        .sleep_hours()
        .is_some_and(|hours| hours < SHORT_SLEEP_HOURS);

    if profile.high_stress() || short_sleep {
        base.min(RECOVERY_CAP_MINUTES)
    } else {
        base
    }
}
