//! Static workout and habit templates for offline plan synthesis.
//!
//! Drawn from four exercise banks: upper-body strength, lower-body strength,
//! core/mobility, and fat-loss cardio.

use pulso_core::plan::{Exercise, Habit, Reps};
use pulso_core::profile::Goal;

use crate::intent::FocusArea;

/// How an exercise is dosed.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Dose {
    /// Sets × integer reps.
    Reps(u32, u32),
    /// Sets × textual reps ("12 c/p").
    RepsText(u32, &'static str),
    /// Sets × hold time ("30 s").
    Hold(u32, &'static str),
    /// One continuous effort ("25 min").
    Time(&'static str),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct ExerciseTemplate {
    pub name: &'static str,
    pub dose: Dose,
}

impl ExerciseTemplate {
    pub fn to_exercise(self) -> Exercise {
        match self.dose {
            Dose::Reps(sets, reps) => Exercise::strength(self.name, sets, reps),
            Dose::RepsText(sets, reps) => Exercise {
                name: self.name.to_string(),
                sets: Some(sets),
                reps: Some(Reps::Text(reps.to_string())),
                time: None,
            },
            Dose::Hold(sets, time) => Exercise {
                name: self.name.to_string(),
                sets: Some(sets),
                reps: None,
                time: Some(time.to_string()),
            },
            Dose::Time(time) => Exercise::timed(self.name, time),
        }
    }
}

/// One day's workout.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Block {
    pub label: &'static str,
    pub exercises: &'static [ExerciseTemplate],
}

const fn ex(name: &'static str, dose: Dose) -> ExerciseTemplate {
    ExerciseTemplate { name, dose }
}

// --- Exercise banks ---

const PRESS_BANCA: ExerciseTemplate = ex("Press banca", Dose::Reps(4, 8));
const REMO_MANCUERNAS: ExerciseTemplate = ex("Remo con mancuernas", Dose::Reps(4, 10));
const PRESS_MILITAR: ExerciseTemplate = ex("Press militar", Dose::Reps(3, 10));
const CURL_BICEPS: ExerciseTemplate = ex("Curl bíceps", Dose::Reps(3, 12));
const FONDOS_BANCA: ExerciseTemplate = ex("Fondos en banca", Dose::Reps(3, 12));
const APERTURAS: ExerciseTemplate = ex("Aperturas con mancuernas", Dose::Reps(3, 12));
const ELEVACIONES_LATERALES: ExerciseTemplate = ex("Elevaciones laterales", Dose::Reps(3, 15));
const JALON_PECHO: ExerciseTemplate = ex("Jalón al pecho", Dose::Reps(4, 10));

const SENTADILLAS: ExerciseTemplate = ex("Sentadillas", Dose::Reps(4, 10));
const PESO_MUERTO_RUMANO: ExerciseTemplate = ex("Peso muerto rumano", Dose::Reps(4, 10));
const ZANCADAS: ExerciseTemplate = ex("Zancadas caminando", Dose::RepsText(3, "12 c/p"));
const PUENTE_GLUTEO: ExerciseTemplate = ex("Puente de glúteo", Dose::Reps(3, 15));
const GEMELOS: ExerciseTemplate = ex("Elevación de gemelos", Dose::Reps(3, 15));
const SENTADILLA_BULGARA: ExerciseTemplate =
    ex("Sentadilla búlgara", Dose::RepsText(3, "10 c/p"));

const PLANCHA: ExerciseTemplate = ex("Plancha", Dose::Hold(3, "30 s"));
const PLANCHA_LATERAL: ExerciseTemplate = ex("Plancha lateral", Dose::Hold(3, "20 s c/lado"));
const BIRD_DOG: ExerciseTemplate = ex("Bird-dog", Dose::Reps(3, 12));
const DEAD_BUG: ExerciseTemplate = ex("Dead bug", Dose::Reps(3, 12));
const CORE_LIGERO: ExerciseTemplate = ex("Core ligero", Dose::Time("5 min"));
const ESTIRAMIENTOS: ExerciseTemplate = ex("Estiramientos", Dose::Time("10 min"));

const CARDIO_MODERADO: ExerciseTemplate = ex("Cardio moderado", Dose::Time("25 min"));
const HIIT: ExerciseTemplate = ex("HIIT (30 s ON / 30 s OFF)", Dose::Time("15 min"));
const CAMINATA_RAPIDA: ExerciseTemplate = ex("Caminata rápida", Dose::Time("35 min"));
const ELIPTICA: ExerciseTemplate = ex("Elíptica", Dose::Time("25 min"));

// --- Goal blocks ---

const MASA_BLOCKS: &[Block] = &[
    Block {
        label: "Pecho y hombro",
        exercises: &[PRESS_BANCA, PRESS_MILITAR, APERTURAS, CORE_LIGERO],
    },
    Block {
        label: "Espalda y brazos",
        exercises: &[REMO_MANCUERNAS, CURL_BICEPS, FONDOS_BANCA, CORE_LIGERO],
    },
    Block {
        label: "Piernas",
        exercises: &[SENTADILLAS, PESO_MUERTO_RUMANO, ZANCADAS, GEMELOS],
    },
    Block {
        label: "Full body",
        exercises: &[PRESS_BANCA, REMO_MANCUERNAS, SENTADILLAS, PUENTE_GLUTEO],
    },
];

const BAJAR_BLOCKS: &[Block] = &[
    Block {
        label: "Cardio + core",
        exercises: &[CARDIO_MODERADO, PLANCHA, DEAD_BUG],
    },
    Block {
        label: "Fuerza total cuerpo",
        exercises: &[PRESS_BANCA, REMO_MANCUERNAS, SENTADILLAS, PLANCHA],
    },
];

const RESISTENCIA_BLOCKS: &[Block] = &[
    Block {
        label: "Cardio continuo + core",
        exercises: &[CAMINATA_RAPIDA, PLANCHA, BIRD_DOG],
    },
    Block {
        label: "HIIT + movilidad",
        exercises: &[HIIT, PLANCHA_LATERAL, ESTIRAMIENTOS],
    },
    Block {
        label: "Cardio largo",
        exercises: &[ELIPTICA, CARDIO_MODERADO, DEAD_BUG],
    },
];

const MANTENER_BLOCKS: &[Block] = &[
    Block {
        label: "Fuerza + core (tren superior)",
        exercises: &[PRESS_MILITAR, REMO_MANCUERNAS, PLANCHA],
    },
    Block {
        label: "Fuerza + core (tren inferior)",
        exercises: &[SENTADILLAS, PUENTE_GLUTEO, BIRD_DOG],
    },
];

// --- Focus blocks ---

const LEGS_BLOCKS: &[Block] = &[
    Block {
        label: "Pierna y glúteo: fuerza",
        exercises: &[SENTADILLAS, PESO_MUERTO_RUMANO, PUENTE_GLUTEO, GEMELOS],
    },
    Block {
        label: "Pierna y glúteo: unilateral",
        exercises: &[SENTADILLA_BULGARA, ZANCADAS, PUENTE_GLUTEO, PLANCHA],
    },
];

const CHEST_BLOCKS: &[Block] = &[
    Block {
        label: "Pecho y tríceps",
        exercises: &[PRESS_BANCA, APERTURAS, FONDOS_BANCA, CORE_LIGERO],
    },
    Block {
        label: "Pecho y tríceps: volumen",
        exercises: &[APERTURAS, PRESS_BANCA, FONDOS_BANCA, PLANCHA],
    },
];

const BACK_BLOCKS: &[Block] = &[
    Block {
        label: "Espalda y bíceps",
        exercises: &[JALON_PECHO, REMO_MANCUERNAS, CURL_BICEPS, BIRD_DOG],
    },
    Block {
        label: "Espalda y bíceps: volumen",
        exercises: &[REMO_MANCUERNAS, JALON_PECHO, CURL_BICEPS, PLANCHA],
    },
];

const SHOULDER_BLOCKS: &[Block] = &[Block {
    label: "Hombro",
    exercises: &[PRESS_MILITAR, ELEVACIONES_LATERALES, REMO_MANCUERNAS, CORE_LIGERO],
}];

const CORE_BLOCKS: &[Block] = &[
    Block {
        label: "Core y estabilidad",
        exercises: &[PLANCHA, PLANCHA_LATERAL, DEAD_BUG, BIRD_DOG],
    },
    Block {
        label: "Core + cardio",
        exercises: &[CARDIO_MODERADO, PLANCHA, DEAD_BUG],
    },
];

pub(crate) fn goal_blocks(goal: Goal) -> &'static [Block] {
    match goal {
        Goal::Masa => MASA_BLOCKS,
        Goal::Bajar => BAJAR_BLOCKS,
        Goal::Resistencia => RESISTENCIA_BLOCKS,
        Goal::Mantener => MANTENER_BLOCKS,
    }
}

pub(crate) fn focus_blocks(focus: FocusArea) -> &'static [Block] {
    match focus {
        FocusArea::LegsGlutes => LEGS_BLOCKS,
        FocusArea::ChestTriceps => CHEST_BLOCKS,
        FocusArea::BackBiceps => BACK_BLOCKS,
        FocusArea::Shoulders => SHOULDER_BLOCKS,
        FocusArea::Core => CORE_BLOCKS,
    }
}

/// Baseline session length per goal, in minutes.
pub(crate) fn goal_minutes(goal: Goal) -> u32 {
    match goal {
        Goal::Masa => 60,
        Goal::Bajar => 40,
        Goal::Mantener => 45,
        Goal::Resistencia => 50,
    }
}

// --- Habits ---

const BAJAR_HABITS: &[(&str, &str)] = &[
    (
        "Camina 8.000 pasos",
        "Suma pasos durante el día: escaleras, recados a pie o una vuelta tras comer.",
    ),
    (
        "Verduras en cada comida",
        "Llena la mitad del plato con verduras antes de servir lo demás.",
    ),
    (
        "Agua antes de comer",
        "Un vaso de agua antes de cada comida ayuda a regular el apetito.",
    ),
];

const MASA_HABITS: &[(&str, &str)] = &[
    (
        "Proteína en cada comida",
        "Incluye huevo, legumbres, lácteos, carne o pescado en tus comidas principales.",
    ),
    (
        "Duerme 8 horas",
        "El músculo se construye descansando: mantén horarios de sueño regulares.",
    ),
    (
        "Registra tus cargas",
        "Anota pesos y repeticiones para subir poco a poco cada semana.",
    ),
];

const MANTENER_HABITS: &[(&str, &str)] = &[
    (
        "Muévete cada hora",
        "Levántate y camina un par de minutos por cada hora sentado.",
    ),
    (
        "Hidratación constante",
        "Ten una botella de agua a mano y rellénala dos o tres veces al día.",
    ),
    (
        "Estira 5 minutos",
        "Un estiramiento suave al despertar o antes de dormir.",
    ),
];

const RESISTENCIA_HABITS: &[(&str, &str)] = &[
    (
        "Calienta siempre",
        "Dedica 5-10 minutos a movilidad y ritmo suave antes de cada sesión.",
    ),
    (
        "Hidrátate en sesiones largas",
        "Bebe pequeños sorbos cada 15-20 minutos cuando entrenes más de una hora.",
    ),
    (
        "Un día suave por semana",
        "Alterna días intensos con uno de recuperación activa.",
    ),
];

/// Added when the profile reports high stress or short sleep.
pub(crate) const RECOVERY_HABIT: (&str, &str) = (
    "Respira y desconecta",
    "Cinco minutos de respiración lenta y sin pantallas antes de dormir.",
);

pub(crate) fn goal_habits(goal: Goal) -> Vec<Habit> {
    let table = match goal {
        Goal::Bajar => BAJAR_HABITS,
        Goal::Masa => MASA_HABITS,
        Goal::Mantener => MANTENER_HABITS,
        Goal::Resistencia => RESISTENCIA_HABITS,
    };
    table
        .iter()
        .map(|(title, desc)| Habit::new(title, desc))
        .collect()
}
