//! # pulso-planner
//!
//! The pure half of the coach: lexical intent detection, system-prompt
//! rendering, deterministic fallback plans, and normalization of model replies
//! into the weekly-plan contract. Nothing here touches the network.

pub mod duration;
pub mod intent;
pub mod normalize;
pub mod prompt;
pub mod synth;
mod templates;
mod vocabulary;

pub use duration::DurationPlan;
pub use intent::{FocusArea, Intent};
pub use normalize::{normalize_reply, parse_reply, NormalizedReply, ParsedReply};
pub use prompt::build_system_prompt;
pub use synth::{fallback_reply, synthesize_habits, synthesize_routine};
