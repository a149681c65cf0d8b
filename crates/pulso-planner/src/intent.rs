//! Lexical intent detection.
//!
//! A pure classifier from message text to a handful of signals. Matching is
//! exact substring or whole-word lookup against the tables in `vocabulary.rs`,
//! run on accent-folded text. No stemming.

use pulso_core::text::fold;

use crate::vocabulary::{
    DAY_COUNT_WORDS, DURATION_PHRASES, FOCUS_KW, HABITS_KW, HABITS_WORDS, ROUTINE_KW,
    ROUTINE_WORDS,
};

/// Muscle group a user asked to emphasise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusArea {
    LegsGlutes,
    ChestTriceps,
    BackBiceps,
    Shoulders,
    Core,
}

/// What the latest user turn asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Intent {
    pub wants_routine: bool,
    pub wants_habits: bool,
    pub requested_duration_minutes: Option<u32>,
    /// Training days per week asked for in text ("4 días"), overriding the profile.
    pub requested_training_days: Option<u8>,
    pub focus: Option<FocusArea>,
}

impl Intent {
    /// Classify a single message.
    pub fn detect(message: &str) -> Self {
        let folded = fold(message);
        Self {
            wants_routine: kw_match(&folded, ROUTINE_KW) || word_match(&folded, ROUTINE_WORDS),
            wants_habits: kw_match(&folded, HABITS_KW) || word_match(&folded, HABITS_WORDS),
            requested_duration_minutes: duration_in(&folded),
            requested_training_days: day_count_in(&folded),
            focus: focus_in(&folded),
        }
    }

    /// Classify a conversation given its user turns, newest first.
    ///
    /// The wants-flags and focus come from the newest turn only. Duration and
    /// day count fall back to earlier turns when the newest one is silent.
    pub fn detect_in_conversation<'a, I>(user_turns_newest_first: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut turns = user_turns_newest_first.into_iter();
        let Some(latest) = turns.next() else {
            return Self::default();
        };
        let mut intent = Self::detect(latest);

        for turn in turns {
            if intent.requested_duration_minutes.is_some()
                && intent.requested_training_days.is_some()
            {
                break;
            }
            let folded = fold(turn);
            if intent.requested_duration_minutes.is_none() {
                intent.requested_duration_minutes = duration_in(&folded);
            }
            if intent.requested_training_days.is_none() {
                intent.requested_training_days = day_count_in(&folded);
            }
        }
        intent
    }
}

/// Infer a focus area from free text.
pub fn infer_focus(text: &str) -> Option<FocusArea> {
    focus_in(&fold(text))
}

fn kw_match(folded: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| folded.contains(kw))
}

fn word_match(folded: &str, words: &[&str]) -> bool {
    tokens(folded).any(|t| words.contains(&t))
}

fn tokens(folded: &str) -> impl Iterator<Item = &str> {
    folded
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
}

fn duration_in(folded: &str) -> Option<u32> {
    DURATION_PHRASES
        .iter()
        .find(|(phrase, _)| folded.contains(phrase))
        .map(|(_, minutes)| *minutes)
}

fn focus_in(folded: &str) -> Option<FocusArea> {
    FOCUS_KW
        .iter()
        .find(|(_, kws)| kw_match(folded, kws))
        .map(|(area, _)| *area)
}

/// Find "<n> dia(s)" with n in 1..=7, as a digit or a spelled-out number.
fn day_count_in(folded: &str) -> Option<u8> {
    let tokens: Vec<&str> = tokens(folded).collect();

    tokens.windows(2).find_map(|pair| {
        if pair[1] != "dia" && pair[1] != "dias" {
            return None;
        }
        let count = pair[0].parse::<u8>().ok().or_else(|| {
            DAY_COUNT_WORDS
                .iter()
                .find(|(word, _)| *word == pair[0])
                .map(|(_, n)| *n)
        })?;
        (1..=7).contains(&count).then_some(count)
    })
}
