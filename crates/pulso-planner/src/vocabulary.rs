//! Static vocabulary tables for intent detection.
//!
//! Every entry is matched against accent-folded, lowercased text, so entries
//! must be written without diacritics.

use crate::intent::FocusArea;

/// Stems that mean the user wants a workout routine, matched anywhere.
pub(crate) const ROUTINE_KW: &[&str] = &[
    "rutina",
    "entrenar",
    "entrenamiento",
    "generar",
    "routine",
    "workout",
];

/// Routine words too short to match inside others ("plancha").
pub(crate) const ROUTINE_WORDS: &[&str] = &["plan", "planes"];

/// Stems that mean the user wants a habit list, matched anywhere.
pub(crate) const HABITS_KW: &[&str] = &["habito"];

/// Habit words that only count as whole words ("habitacion").
pub(crate) const HABITS_WORDS: &[&str] = &["habit", "habits"];

/// Literal session-length phrases. First match in table order wins.
/// Numeric phrasings outside this list ("20 minutos") are deliberately not parsed.
pub(crate) const DURATION_PHRASES: &[(&str, u32)] = &[
    ("1 hora", 60),
    ("una hora", 60),
    ("60 min", 60),
    ("45 min", 45),
    ("30 min", 30),
    ("media hora", 30),
];

/// Spelled-out day counts accepted before "dia"/"dias".
pub(crate) const DAY_COUNT_WORDS: &[(&str, u8)] = &[
    ("un", 1),
    ("uno", 1),
    ("dos", 2),
    ("tres", 3),
    ("cuatro", 4),
    ("cinco", 5),
    ("seis", 6),
    ("siete", 7),
];

/// Muscle-focus keywords. First area with a hit wins.
pub(crate) const FOCUS_KW: &[(FocusArea, &[&str])] = &[
    (
        FocusArea::LegsGlutes,
        &["pierna", "gluteo", "cuadricep", "femoral"],
    ),
    (FocusArea::ChestTriceps, &["pecho", "tricep", "pectoral"]),
    (FocusArea::BackBiceps, &["espalda", "bicep", "dorsal"]),
    (FocusArea::Shoulders, &["hombro", "deltoide"]),
    (FocusArea::Core, &["abdomen", "abdominal", "core"]),
];
