//! System prompt rendering.
//!
//! The output is an opaque instruction blob for the model. It embeds the
//! profile as JSON and an example of the exact reply shape the normalizer
//! expects back.

use pulso_core::profile::UserProfile;

use crate::duration::DurationPlan;

/// Reply shape the model is asked to imitate.
const REPLY_SCHEMA: &str = r#"{
  "assistant_message": "Texto breve y cercano para el usuario.",
  "routine": [
    {
      "day": "Lunes",
      "type": "Piernas",
      "duration": 45,
      "exercises": [
        { "name": "Sentadillas", "sets": 4, "reps": 10 },
        { "name": "Plancha", "sets": 3, "time": "30 s" }
      ]
    }
  ],
  "habits": [
    { "title": "Hidratación", "desc": "Bebe un vaso de agua al despertar." }
  ]
}"#;

/// Render the system prompt for one request.
pub fn build_system_prompt(
    coach_name: &str,
    profile: &UserProfile,
    durations: &DurationPlan,
) -> String {
    let profile_json =
        serde_json::to_string_pretty(profile).unwrap_or_else(|_| "{}".to_string());

    let duration_rule = match durations.requested {
        Some(minutes) => format!(
            "El usuario pidió sesiones de {minutes} minutos: \
             respeta esa duración en cada día de entrenamiento."
        ),
        None => format!(
            "Duración recomendada por sesión: {} minutos.",
            durations.session_minutes()
        ),
    };

    format!(
        "Eres {coach_name}, un coach de bienestar y entrenamiento que habla en español, \
         con un tono cálido, motivador y breve.\n\
         \n\
         ## Temas permitidos\n\
         Solo hablas de ejercicio, rutinas de entrenamiento, hábitos saludables y apoyo \
         emocional ligero. Si te preguntan por otra cosa, \
         redirige la conversación con amabilidad.\n\
         \n\
         ## Seguridad\n\
         Si el usuario menciona autolesiones, suicidio, abuso o trastornos de la conducta \
         alimentaria, no des pautas clínicas ni de dieta: responde con empatía y anímale a \
         hablar cuanto antes con un adulto de confianza o un profesional de la salud. \
         En ese caso devuelve \"routine\" y \"habits\" vacíos.\n\
         \n\
         ## Perfil del usuario\n\
         {profile_json}\n\
         \n\
         ## Reglas de la rutina\n\
         - Entrena exactamente {days} días por semana; el resto de días son descanso activo.\n\
         - Usa los días de la semana en español, de Lunes a Domingo.\n\
         - {duration_rule}\n\
         - \"reps\" siempre es un número entero, nunca un rango.\n\
         - Incluye rutina solo si el usuario la pide, y hábitos solo si los pide.\n\
         \n\
         ## Formato de respuesta\n\
         Responde ÚNICAMENTE con un objeto JSON válido, \
         sin texto adicional ni bloques de código, con esta forma exacta:\n\
         {REPLY_SCHEMA}",
        days = profile.training_days,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn profile() -> UserProfile {
        UserProfile::from_value(
            &json!({"name": "Ana", "goal": "masa", "trainingDays": 4, "stress": 3}),
            3,
        )
    }

    #[test]
    fn test_prompt_embeds_profile_and_schema() {
        let p = profile();
        let prompt = build_system_prompt("Pulso", &p, &DurationPlan::for_profile(&p, None, 45));
        assert!(prompt.starts_with("Eres Pulso"));
        assert!(prompt.contains("\"name\": \"Ana\""));
        assert!(prompt.contains("\"goal\": \"masa\""));
        assert!(prompt.contains("\"assistant_message\""));
        assert!(prompt.contains("exactamente 4 días"));
        assert!(prompt.contains("Duración recomendada por sesión: 60 minutos."));
    }

    #[test]
    fn test_prompt_contains_escalation_rule() {
        let p = profile();
        let prompt = build_system_prompt("Pulso", &p, &DurationPlan::for_profile(&p, None, 45));
        assert!(prompt.contains("suicidio"));
        assert!(prompt.contains("adulto de confianza"));
    }

    #[test]
    fn test_prompt_uses_requested_duration() {
        let p = profile();
        let prompt =
            build_system_prompt("Pulso", &p, &DurationPlan::for_profile(&p, Some(30), 45));
        assert!(prompt.contains("sesiones de 30 minutos"));
    }

    #[test]
    fn test_prompt_is_pure() {
        let p = profile();
        let plan = DurationPlan::for_profile(&p, None, 45);
        assert_eq!(
            build_system_prompt("Pulso", &p, &plan),
            build_system_prompt("Pulso", &p, &plan)
        );
    }
}
