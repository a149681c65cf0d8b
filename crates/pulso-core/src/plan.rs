//! Weekly plan data model: the stable contract every chat response satisfies.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::text::fold;

/// Label of the canonical filler entry for non-training days.
pub const ACTIVE_REST_TYPE: &str = "Descanso activo";
/// Length of the canonical active-rest entry, in minutes.
pub const ACTIVE_REST_MINUTES: u32 = 15;

/// Day of the week, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Weekday {
    Lunes,
    Martes,
    Miercoles,
    Jueves,
    Viernes,
    Sabado,
    Domingo,
}

impl Weekday {
    /// The fixed output order of every routine.
    pub const ALL: [Weekday; 7] = [
        Self::Lunes,
        Self::Martes,
        Self::Miercoles,
        Self::Jueves,
        Self::Viernes,
        Self::Sabado,
        Self::Domingo,
    ];

    /// Canonical display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lunes => "Lunes",
            Self::Martes => "Martes",
            Self::Miercoles => "Miércoles",
            Self::Jueves => "Jueves",
            Self::Viernes => "Viernes",
            Self::Sabado => "Sábado",
            Self::Domingo => "Domingo",
        }
    }

    /// Parse a weekday name, ignoring case and accents. English names are accepted too.
    pub fn parse(raw: &str) -> Option<Self> {
        let day = match fold(raw.trim()).as_str() {
            "lunes" | "monday" => Self::Lunes,
            "martes" | "tuesday" => Self::Martes,
            "miercoles" | "wednesday" => Self::Miercoles,
            "jueves" | "thursday" => Self::Jueves,
            "viernes" | "friday" => Self::Viernes,
            "sabado" | "saturday" => Self::Sabado,
            "domingo" | "sunday" => Self::Domingo,
            _ => return None,
        };
        Some(day)
    }
}

impl Serialize for Weekday {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Weekday {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown weekday: {raw}")))
    }
}

/// Repetitions: a plain count, or free text such as "12 c/lado" or "al fallo".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reps {
    Count(u32),
    Text(String),
}

/// Session length: whole minutes, or free text such as "45-60 min".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SessionDuration {
    Minutes(u32),
    Text(String),
}

/// One exercise inside a day: either sets + reps, or a timed effort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<Reps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
}

impl Exercise {
    pub fn strength(name: &str, sets: u32, reps: u32) -> Self {
        Self {
            name: name.to_string(),
            sets: Some(sets),
            reps: Some(Reps::Count(reps)),
            time: None,
        }
    }

    pub fn timed(name: &str, time: &str) -> Self {
        Self {
            name: name.to_string(),
            sets: None,
            reps: None,
            time: Some(time.to_string()),
        }
    }
}

/// One entry of the weekly routine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutineDay {
    pub day: Weekday,
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: SessionDuration,
    pub exercises: Vec<Exercise>,
}

impl RoutineDay {
    /// The canonical low-intensity filler: easy walk plus light stretching.
    pub fn active_rest(day: Weekday) -> Self {
        Self {
            day,
            kind: ACTIVE_REST_TYPE.to_string(),
            duration: SessionDuration::Minutes(ACTIVE_REST_MINUTES),
            exercises: vec![
                Exercise::timed("Caminata suave", "10 min"),
                Exercise::timed("Estiramiento ligero", "5 min"),
            ],
        }
    }

    pub fn is_active_rest(&self) -> bool {
        *self == Self::active_rest(self.day)
    }
}

/// A short recommended daily behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub title: String,
    pub desc: String,
}

impl Habit {
    pub fn new(title: &str, desc: &str) -> Self {
        Self {
            title: title.to_string(),
            desc: desc.to_string(),
        }
    }
}

/// Session-length signals attached to a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanMetadata {
    pub requested_duration_minutes: Option<u32>,
    pub recommended_duration_minutes: u32,
}

/// The JSON body returned by the chat endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponsePayload {
    pub reply: String,
    pub routine: Vec<RoutineDay>,
    pub habits: Vec<Habit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<PlanMetadata>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_weekday_parse_ignores_case_and_accents() {
        assert_eq!(Weekday::parse("Miércoles"), Some(Weekday::Miercoles));
        assert_eq!(Weekday::parse("miercoles"), Some(Weekday::Miercoles));
        assert_eq!(Weekday::parse("SÁBADO"), Some(Weekday::Sabado));
        assert_eq!(Weekday::parse("Sunday"), Some(Weekday::Domingo));
        assert_eq!(Weekday::parse("Día 1"), None);
    }

    #[test]
    fn test_weekday_all_is_monday_first() {
        let names: Vec<&str> = Weekday::ALL.iter().map(Weekday::name).collect();
        assert_eq!(
            names,
            vec!["Lunes", "Martes", "Miércoles", "Jueves", "Viernes", "Sábado", "Domingo"]
        );
    }

    #[test]
    fn test_active_rest_shape() {
        let rest = RoutineDay::active_rest(Weekday::Domingo);
        let json = serde_json::to_value(&rest).unwrap();
        assert_eq!(
            json,
            json!({
                "day": "Domingo",
                "type": "Descanso activo",
                "duration": 15,
                "exercises": [
                    {"name": "Caminata suave", "time": "10 min"},
                    {"name": "Estiramiento ligero", "time": "5 min"}
                ]
            })
        );
        assert!(rest.is_active_rest());
    }

    #[test]
    fn test_reps_and_duration_untagged() {
        let ex: Exercise =
            serde_json::from_value(json!({"name": "Sentadillas", "sets": 4, "reps": 10})).unwrap();
        assert_eq!(ex.reps, Some(Reps::Count(10)));
        let ex: Exercise =
            serde_json::from_value(json!({"name": "Zancadas", "sets": 3, "reps": "12 c/p"}))
                .unwrap();
        assert_eq!(ex.reps, Some(Reps::Text("12 c/p".into())));

        let d: SessionDuration = serde_json::from_value(json!("45 min")).unwrap();
        assert_eq!(d, SessionDuration::Text("45 min".into()));
    }

    #[test]
    fn test_payload_omits_missing_metadata() {
        let payload = ChatResponsePayload {
            reply: "hola".into(),
            routine: Vec::new(),
            habits: Vec::new(),
            metadata: None,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, json!({"reply": "hola", "routine": [], "habits": []}));
    }

    #[test]
    fn test_metadata_camel_case() {
        let meta = PlanMetadata {
            requested_duration_minutes: Some(60),
            recommended_duration_minutes: 45,
        };
        let json = serde_json::to_value(meta).unwrap();
        assert_eq!(
            json,
            json!({"requestedDurationMinutes": 60, "recommendedDurationMinutes": 45})
        );
    }
}
