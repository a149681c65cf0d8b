//! Accent-insensitive text helpers shared by the profile reader and the planner.

/// Lowercase and strip Spanish/Portuguese diacritics so lexical matching
/// treats "Hábito", "HABITO" and "habito" the same.
pub fn fold(input: &str) -> String {
    input
        .chars()
        .flat_map(char::to_lowercase)
        .map(|c| match c {
            'á' | 'à' | 'ä' | 'â' | 'ã' => 'a',
            'é' | 'è' | 'ë' | 'ê' => 'e',
            'í' | 'ì' | 'ï' | 'î' => 'i',
            'ó' | 'ò' | 'ö' | 'ô' | 'õ' => 'o',
            'ú' | 'ù' | 'ü' | 'û' => 'u',
            'ñ' => 'n',
            'ç' => 'c',
            other => other,
        })
        .collect()
}

/// Parse the leading number of a free-text value ("7.5 horas" → 7.5, "8" → 8.0).
pub fn leading_number(input: &str) -> Option<f32> {
    let trimmed = input.trim_start();
    let end = trimmed
        .char_indices()
        .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == ','))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].replace(',', ".").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_strips_accents_and_case() {
        assert_eq!(fold("Hábito"), "habito");
        assert_eq!(fold("MIÉRCOLES"), "miercoles");
        assert_eq!(fold("Sábado"), "sabado");
        assert_eq!(fold("glúteo"), "gluteo");
        assert_eq!(fold("plain"), "plain");
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("7.5 horas"), Some(7.5));
        assert_eq!(leading_number(" 6,5h"), Some(6.5));
        assert_eq!(leading_number("8"), Some(8.0));
        assert_eq!(leading_number("poco"), None);
        assert_eq!(leading_number(""), None);
    }
}
