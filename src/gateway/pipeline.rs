//! Chat pipeline: profile → intent → prompt → completion → normalized plan.

use super::Gateway;
use pulso_core::{
    context::Context,
    error::PulsoError,
    message::ChatMessage,
    plan::ChatResponsePayload,
    profile::UserProfile,
};
use pulso_planner::{
    build_system_prompt, fallback_reply, normalize_reply, synthesize_habits, synthesize_routine,
    DurationPlan, Intent,
};
use serde_json::Value;
use tracing::{debug, info};

impl Gateway {
    /// Handle one chat request.
    ///
    /// `messages` is the client conversation, oldest first; the last user turn
    /// is the request. `profile` is the untyped profile object.
    pub async fn handle_chat(
        &self,
        messages: &[ChatMessage],
        profile: &Value,
    ) -> Result<ChatResponsePayload, PulsoError> {
        let mut profile = UserProfile::from_value(profile, self.coach.default_training_days);

        let mut context = Context::from_messages(String::new(), messages).ok_or_else(|| {
            PulsoError::InvalidRequest("messages must contain a user message".to_string())
        })?;
        if context.current_message.trim().is_empty() {
            return Err(PulsoError::InvalidRequest(
                "message must not be empty".to_string(),
            ));
        }

        let intent = Intent::detect_in_conversation(context.user_turns_newest_first());
        if let Some(days) = intent.requested_training_days {
            debug!("pipeline: message asks for {days} training days");
            profile.training_days = days;
        }
        let durations = DurationPlan::for_profile(
            &profile,
            intent.requested_duration_minutes,
            self.coach.default_session_minutes,
        );

        let Some(provider) = &self.provider else {
            info!(
                "pipeline: no provider configured, offline reply (routine={}, habits={})",
                intent.wants_routine, intent.wants_habits
            );
            return Ok(offline_reply(&profile, &intent, &durations));
        };

        context.system_prompt = build_system_prompt(&self.coach.name, &profile, &durations);
        let completion = provider.complete(&context).await?;
        let normalized = normalize_reply(&completion.text, &intent, &durations);

        let mut routine = normalized.routine;
        if intent.wants_routine && routine.is_empty() {
            info!("pipeline: model returned no routine, synthesizing one");
            routine = synthesize_routine(&profile, intent.focus, &durations);
        }
        let mut habits = normalized.habits;
        if intent.wants_habits && habits.is_empty() {
            info!("pipeline: model returned no habits, synthesizing them");
            habits = synthesize_habits(&profile);
        }

        let reply = if normalized.assistant_message.trim().is_empty() {
            fallback_reply(&profile, !routine.is_empty(), !habits.is_empty())
        } else {
            normalized.assistant_message
        };

        info!(
            "pipeline: {} replied in {}ms (goal={}, routine_days={}, habits={})",
            completion.metadata.provider_used,
            completion.metadata.processing_time_ms,
            profile.goal.as_str(),
            routine.len(),
            habits.len()
        );

        Ok(ChatResponsePayload {
            reply,
            routine,
            habits,
            metadata: Some(durations.metadata()),
        })
    }
}

/// Deterministic answer used when no completion provider is configured.
fn offline_reply(
    profile: &UserProfile,
    intent: &Intent,
    durations: &DurationPlan,
) -> ChatResponsePayload {
    let routine = if intent.wants_routine {
        synthesize_routine(profile, intent.focus, durations)
    } else {
        Vec::new()
    };
    let habits = if intent.wants_habits {
        synthesize_habits(profile)
    } else {
        Vec::new()
    };

    ChatResponsePayload {
        reply: fallback_reply(profile, !routine.is_empty(), !habits.is_empty()),
        routine,
        habits,
        metadata: Some(durations.metadata()),
    }
}
