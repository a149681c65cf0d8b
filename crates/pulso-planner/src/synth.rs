//! Deterministic fallback synthesis of weekly routines and habit lists.
//!
//! Used whenever the completion API is unavailable, or when it failed to
//! produce content the user explicitly asked for.

use pulso_core::plan::{Habit, RoutineDay, SessionDuration, Weekday};
use pulso_core::profile::UserProfile;

use crate::duration::DurationPlan;
use crate::intent::FocusArea;
use crate::templates::{focus_blocks, goal_blocks, goal_habits, RECOVERY_HABIT};

/// Below this many hours of sleep the recovery habit is added.
const RESTFUL_SLEEP_HOURS: f32 = 7.0;

/// Build a full 7-day routine from the profile.
///
/// The first `training_days` weekdays cycle through the goal's blocks (or the
/// focus area's, when one is given); the rest are active rest.
pub fn synthesize_routine(
    profile: &UserProfile,
    focus: Option<FocusArea>,
    durations: &DurationPlan,
) -> Vec<RoutineDay> {
    let blocks = match focus {
        Some(area) => focus_blocks(area),
        None => goal_blocks(profile.goal),
    };
    let minutes = durations.session_minutes();
    let training_days = usize::from(profile.training_days);

    Weekday::ALL
        .iter()
        .enumerate()
        .map(|(i, day)| {
            if i >= training_days {
                return RoutineDay::active_rest(*day);
            }
            let block = &blocks[i % blocks.len()];
            RoutineDay {
                day: *day,
                kind: block.label.to_string(),
                duration: SessionDuration::Minutes(minutes),
                exercises: block.exercises.iter().map(|t| t.to_exercise()).collect(),
            }
        })
        .collect()
}

/// Build the habit list for the profile's goal, plus a recovery habit when needed.
pub fn synthesize_habits(profile: &UserProfile) -> Vec<Habit> {
    let mut habits = goal_habits(profile.goal);
    let short_sleep = profile
        .sleep_hours()
        .is_some_and(|hours| hours < RESTFUL_SLEEP_HOURS);
    if profile.high_stress() || short_sleep {
        habits.push(Habit::new(RECOVERY_HABIT.0, RECOVERY_HABIT.1));
    }
    habits
}

/// Reply text for offline answers.
pub fn fallback_reply(profile: &UserProfile, with_routine: bool, with_habits: bool) -> String {
    let name = profile.display_name();
    match (with_routine, with_habits) {
        (true, _) => format!(
            "Listo {name}, te armé una rutina de {} días usando tu objetivo ({}). \
             Si quieres cambiar días u objetivo, dímelo.",
            profile.training_days,
            profile.goal.as_str()
        ),
        (false, true) => format!(
            "Listo {name}, aquí tienes algunos hábitos para tu objetivo ({}).",
            profile.goal.as_str()
        ),
        (false, false) => "Dime tu objetivo (bajar, masa, mantener, resistencia) y cuántos \
                           días vas a entrenar, y te la armo."
            .to_string(),
    }
}
