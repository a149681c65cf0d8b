//! Normalization of model replies into the weekly-plan contract.
//!
//! Model output is untrusted: it may be prose, broken JSON, or JSON with
//! missing, misnamed or wrongly-typed fields. Everything is validated field by
//! field and the result always satisfies the contract: `routine` holds 0 or 7
//! days in weekday order, `habits` is a list, exercises have integer reps
//! where a range was given.

use pulso_core::plan::{Exercise, Habit, Reps, RoutineDay, SessionDuration, Weekday};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::debug;

use crate::duration::DurationPlan;
use crate::intent::Intent;

/// Label for model days that did not say what kind of session they are.
pub const DEFAULT_DAY_TYPE: &str = "Entrenamiento";

const MESSAGE_KEYS: &[&str] = &["assistant_message", "reply", "message"];
const EXERCISE_NAME_KEYS: &[&str] = &["name", "exercise", "nombre"];
const HABIT_TITLE_KEYS: &[&str] = &["title", "name", "titulo"];
const HABIT_DESC_KEYS: &[&str] = &["desc", "description", "descripcion"];

/// What a raw reply turned out to be.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedReply {
    /// A JSON object, to be validated field by field.
    Structured(Map<String, Value>),
    /// Plain prose, or JSON that is not an object.
    Opaque(String),
    /// Looked like JSON but failed to parse.
    Malformed { raw: String, error: String },
}

/// A reply after validation, gating, and completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedReply {
    pub assistant_message: String,
    pub routine: Vec<RoutineDay>,
    pub habits: Vec<Habit>,
}

impl NormalizedReply {
    fn text_only(raw: &str) -> Self {
        Self {
            assistant_message: raw.to_string(),
            routine: Vec::new(),
            habits: Vec::new(),
        }
    }
}

/// Classify raw reply text. A surrounding Markdown code fence is ignored, and
/// a JSON object embedded in prose is picked out when it parses on its own.
pub fn parse_reply(raw: &str) -> ParsedReply {
    let body = strip_code_fence(raw.trim());

    if body.starts_with('{') {
        return match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(obj)) => ParsedReply::Structured(obj),
            Ok(_) => ParsedReply::Opaque(raw.to_string()),
            Err(e) => match embedded_object(body) {
                Some(obj) => ParsedReply::Structured(obj),
                None => ParsedReply::Malformed {
                    raw: raw.to_string(),
                    error: e.to_string(),
                },
            },
        };
    }

    match embedded_object(body) {
        Some(obj) => ParsedReply::Structured(obj),
        None => ParsedReply::Opaque(raw.to_string()),
    }
}

/// The outermost `{...}` span of `text`, when it parses as an object on its own.
fn embedded_object(text: &str) -> Option<Map<String, Value>> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start >= end {
        return None;
    }
    match serde_json::from_str::<Value>(&text[start..=end]) {
        Ok(Value::Object(obj)) => Some(obj),
        _ => None,
    }
}

/// Normalize a raw model reply. Total: never fails, whatever the input.
pub fn normalize_reply(raw: &str, intent: &Intent, durations: &DurationPlan) -> NormalizedReply {
    let obj = match parse_reply(raw) {
        ParsedReply::Structured(obj) => obj,
        ParsedReply::Opaque(text) => return NormalizedReply::text_only(&text),
        ParsedReply::Malformed { raw, error } => {
            debug!("normalize: reply is not valid JSON ({error}), using it as text");
            return NormalizedReply::text_only(&raw);
        }
    };

    let assistant_message = first_string(&obj, MESSAGE_KEYS).unwrap_or_default();

    let routine_items = list_field(&obj, "routine");
    let habit_items = list_field(&obj, "habits");

    let routine = if intent.wants_routine && !routine_items.is_empty() {
        complete_week(routine_items, durations)
    } else {
        Vec::new()
    };

    let habits = if intent.wants_habits {
        habit_items.iter().filter_map(normalize_habit).collect()
    } else {
        Vec::new()
    };

    NormalizedReply {
        assistant_message,
        routine,
        habits,
    }
}

/// Map each weekday to the first entry the model gave for it, then emit all
/// seven days Monday→Sunday with active rest in the gaps.
///
/// Returns an empty routine when no entry survives as a training day, so the
/// caller can substitute a synthesized one.
fn complete_week(items: &[Value], durations: &DurationPlan) -> Vec<RoutineDay> {
    let mut by_day: BTreeMap<Weekday, RoutineDay> = BTreeMap::new();
    for item in items {
        match normalize_day(item, durations) {
            Some(day) => {
                by_day.entry(day.day).or_insert(day);
            }
            None => debug!("normalize: dropping routine entry without a valid day: {item}"),
        }
    }

    if by_day.values().all(RoutineDay::is_active_rest) {
        debug!("normalize: routine has no usable training day, discarding it");
        return Vec::new();
    }

    Weekday::ALL
        .iter()
        .map(|day| {
            by_day
                .remove(day)
                .unwrap_or_else(|| RoutineDay::active_rest(*day))
        })
        .collect()
}

fn normalize_day(item: &Value, durations: &DurationPlan) -> Option<RoutineDay> {
    let obj = item.as_object()?;
    let day = obj.get("day").and_then(Value::as_str).and_then(Weekday::parse)?;

    let kind = first_string(obj, &["type", "label"])
        .unwrap_or_else(|| DEFAULT_DAY_TYPE.to_string());

    let duration = obj
        .get("duration")
        .and_then(duration_value)
        .unwrap_or_else(|| SessionDuration::Minutes(durations.session_minutes()));

    let exercises = obj
        .get("exercises")
        .and_then(Value::as_array)
        .map(|list| list.iter().filter_map(normalize_exercise).collect())
        .unwrap_or_default();

    Some(RoutineDay {
        day,
        kind,
        duration,
        exercises,
    })
}

fn duration_value(value: &Value) -> Option<SessionDuration> {
    match value {
        Value::Number(n) => whole_number(n).map(SessionDuration::Minutes),
        Value::String(s) if !s.trim().is_empty() => {
            Some(SessionDuration::Text(s.trim().to_string()))
        }
        _ => None,
    }
}

fn normalize_exercise(value: &Value) -> Option<Exercise> {
    let obj = match value {
        Value::String(s) => {
            let name = strip_ordinal(s);
            return (!name.is_empty()).then(|| Exercise {
                name,
                sets: None,
                reps: None,
                time: None,
            });
        }
        Value::Object(obj) => obj,
        _ => return None,
    };

    let name = EXERCISE_NAME_KEYS
        .iter()
        .find_map(|key| obj.get(*key).and_then(Value::as_str))
        .map(strip_ordinal)
        .filter(|n| !n.is_empty())?;

    let sets = obj.get("sets").and_then(|v| match v {
        Value::Number(n) => whole_number(n),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    });

    let reps = obj.get("reps").and_then(|v| match v {
        Value::Number(n) => whole_number(n).map(Reps::Count),
        Value::String(s) if !s.trim().is_empty() => Some(canonical_reps(s)),
        _ => None,
    });

    let time = obj.get("time").and_then(|v| match v {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    });

    Some(Exercise {
        name,
        sets,
        reps,
        time,
    })
}

fn normalize_habit(value: &Value) -> Option<Habit> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(Habit {
            title: s.trim().to_string(),
            desc: String::new(),
        }),
        Value::Object(obj) => {
            let title = first_string(obj, HABIT_TITLE_KEYS)?;
            let desc = first_string(obj, HABIT_DESC_KEYS).unwrap_or_default();
            Some(Habit { title, desc })
        }
        _ => None,
    }
}

/// "10-12" → 10. Anything that is not exactly two integers around a dash,
/// including a lone "8", is kept as text.
pub fn canonical_reps(raw: &str) -> Reps {
    let trimmed = raw.trim();
    let numeric = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    let range = trimmed
        .split_once(|c: char| c == '-' || c == '–')
        .map(|(low, high)| (low.trim(), high.trim()))
        .filter(|(low, high)| numeric(low) && numeric(high))
        .and_then(|(low, _)| low.parse::<u32>().ok());

    match range {
        Some(low) => Reps::Count(low),
        None => Reps::Text(trimmed.to_string()),
    }
}

/// Drop a leading list ordinal such as "1. " or "2) " from an exercise name.
pub fn strip_ordinal(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return trimmed.to_string();
    }
    let rest = &trimmed[digits..];
    match rest.strip_prefix('.').or_else(|| rest.strip_prefix(')')) {
        Some(name) if name.starts_with(char::is_whitespace) => name.trim_start().to_string(),
        _ => trimmed.to_string(),
    }
}

fn strip_code_fence(text: &str) -> &str {
    let Some(inner) = text.strip_prefix("```") else {
        return text;
    };
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    // Skip an info string such as "json" on the opening fence line.
    match inner.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with('{') => body.trim(),
        _ => inner.trim(),
    }
}

fn first_string(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        _ => None,
    })
}

fn list_field<'a>(obj: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    obj.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

fn whole_number(n: &serde_json::Number) -> Option<u32> {
    n.as_u64()
        .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.round() as u64))
        .and_then(|v| u32::try_from(v).ok())
}
