//! Gateway: turns one chat request into one weekly-plan response.
//!
//! Holds the completion provider (absent when no credential is configured)
//! and the coach settings. Immutable once built; shared behind an `Arc`.

mod pipeline;

use pulso_core::{config::CoachConfig, traits::Provider};
use std::sync::Arc;

/// The request pipeline shared by every HTTP handler and the `ask` command.
pub struct Gateway {
    pub(super) provider: Option<Arc<dyn Provider>>,
    pub(super) coach: CoachConfig,
}

impl Gateway {
    /// Create a gateway. `provider: None` puts every request on the offline path.
    pub fn new(provider: Option<Arc<dyn Provider>>, coach: CoachConfig) -> Self {
        Self { provider, coach }
    }

    /// Name of the configured provider, if any.
    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.name())
    }

    pub fn coach_name(&self) -> &str {
        &self.coach.name
    }
}
