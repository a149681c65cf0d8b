//! User profile: the caller-supplied fitness and mood attributes.
//!
//! Profiles arrive as untyped JSON and are read field by field; every missing
//! or unusable field falls back to a default so templates never see nulls.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::text::{fold, leading_number};

/// Fewest and most training days a weekly plan can hold.
pub const MIN_TRAINING_DAYS: u8 = 1;
pub const MAX_TRAINING_DAYS: u8 = 7;

/// Training goal. Anything unrecognized reads as `Mantener`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Lose weight.
    Bajar,
    /// Build muscle mass.
    Masa,
    /// Maintain current shape.
    #[default]
    Mantener,
    /// Endurance.
    Resistencia,
}

impl Goal {
    /// Parse a free-text goal; case and accents are ignored.
    pub fn parse(raw: &str) -> Self {
        match fold(raw.trim()).as_str() {
            "bajar" => Self::Bajar,
            "masa" => Self::Masa,
            "resistencia" => Self::Resistencia,
            _ => Self::Mantener,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bajar => "bajar",
            Self::Masa => "masa",
            Self::Mantener => "mantener",
            Self::Resistencia => "resistencia",
        }
    }
}

/// A normalized user profile.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub goal: Goal,
    pub training_days: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stress: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep: Option<String>,
}

impl UserProfile {
    /// A profile with every field at its default.
    pub fn with_defaults(default_training_days: u8) -> Self {
        Self {
            name: None,
            goal: Goal::default(),
            training_days: clamp_days(i64::from(default_training_days)),
            height: None,
            weight: None,
            mood: None,
            stress: None,
            sleep: None,
        }
    }

    /// Read a profile from an untyped JSON value. Non-objects yield the defaults.
    pub fn from_value(value: &Value, default_training_days: u8) -> Self {
        let mut profile = Self::with_defaults(default_training_days);
        let Some(obj) = value.as_object() else {
            return profile;
        };

        profile.name = text_field(obj, &["name", "nombre"]);
        if let Some(goal) = text_field(obj, &["goal", "objetivo"]) {
            profile.goal = Goal::parse(&goal);
        }
        if let Some(days) = days_field(obj, &["trainingDays", "training_days"]) {
            profile.training_days = clamp_days(days);
        }
        profile.height = text_field(obj, &["height", "altura"]);
        profile.weight = text_field(obj, &["weight", "peso"]);
        profile.mood = text_field(obj, &["mood", "animo"]);
        profile.stress = text_field(obj, &["stress", "estres"]);
        profile.sleep = text_field(obj, &["sleep", "sueno"]);
        profile
    }

    /// Display name, empty when unknown.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Whether the reported stress is high: 7+ on a 1–10 scale, or a word like "alto".
    pub fn high_stress(&self) -> bool {
        let Some(stress) = self.stress.as_deref() else {
            return false;
        };
        if let Some(level) = leading_number(stress) {
            return level >= 7.0;
        }
        let folded = fold(stress);
        ["alto", "alta", "mucho", "high", "elevado"]
            .iter()
            .any(|kw| folded.contains(kw))
    }

    /// Reported sleep in hours, when it can be read as a number.
    pub fn sleep_hours(&self) -> Option<f32> {
        self.sleep.as_deref().and_then(leading_number)
    }
}

fn clamp_days(days: i64) -> u8 {
    days.clamp(i64::from(MIN_TRAINING_DAYS), i64::from(MAX_TRAINING_DAYS)) as u8
}

/// First present key as trimmed, non-empty text. Numbers are rendered as text.
fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First present key as an integer day count (JSON number or numeric string).
fn days_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<i64> {
    keys.iter().find_map(|key| match obj.get(*key)? {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_goal_parse_recognized_and_fallback() {
        assert_eq!(Goal::parse("masa"), Goal::Masa);
        assert_eq!(Goal::parse(" BAJAR "), Goal::Bajar);
        assert_eq!(Goal::parse("Resistencia"), Goal::Resistencia);
        assert_eq!(Goal::parse("mantener"), Goal::Mantener);
        assert_eq!(Goal::parse("volar"), Goal::Mantener);
        assert_eq!(Goal::parse(""), Goal::Mantener);
    }

    #[test]
    fn test_from_value_reads_all_fields() {
        let p = UserProfile::from_value(
            &json!({
                "name": "Ana",
                "goal": "masa",
                "trainingDays": 4,
                "height": 170,
                "weight": "62 kg",
                "mood": "bien",
                "stress": 3,
                "sleep": "7.5"
            }),
            3,
        );
        assert_eq!(p.name.as_deref(), Some("Ana"));
        assert_eq!(p.goal, Goal::Masa);
        assert_eq!(p.training_days, 4);
        assert_eq!(p.height.as_deref(), Some("170"));
        assert_eq!(p.weight.as_deref(), Some("62 kg"));
        assert_eq!(p.sleep_hours(), Some(7.5));
        assert!(!p.high_stress());
    }

    #[test]
    fn test_from_value_defaults_for_missing_and_bad_fields() {
        let p = UserProfile::from_value(&json!({"name": "  ", "trainingDays": "muchos"}), 3);
        assert!(p.name.is_none());
        assert_eq!(p.goal, Goal::Mantener);
        assert_eq!(p.training_days, 3);
        assert_eq!(p.display_name(), "");

        let p = UserProfile::from_value(&Value::Null, 5);
        assert_eq!(p.training_days, 5);
    }

    #[test]
    fn test_training_days_clamped_and_aliased() {
        let p = UserProfile::from_value(&json!({"trainingDays": 12}), 3);
        assert_eq!(p.training_days, 7);
        let p = UserProfile::from_value(&json!({"trainingDays": 0}), 3);
        assert_eq!(p.training_days, 1);
        let p = UserProfile::from_value(&json!({"training_days": "2"}), 3);
        assert_eq!(p.training_days, 2);
    }

    #[test]
    fn test_high_stress_numeric_and_words() {
        let p = UserProfile::from_value(&json!({"stress": 8}), 3);
        assert!(p.high_stress());
        let p = UserProfile::from_value(&json!({"stress": "Estrés alto"}), 3);
        assert!(p.high_stress());
        let p = UserProfile::from_value(&json!({"stress": "tranquilo"}), 3);
        assert!(!p.high_stress());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let p = UserProfile::with_defaults(3);
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json, json!({"goal": "mantener", "trainingDays": 3}));
    }
}
