//! Display helpers for names shown in tables, slot lists and exports.

/// Longest name shown before it gets cut.
pub const SHORT_NAME_LENGTH: usize = 20;

const ELLIPSIS: &str = "...";

/// Cut `text` to at most `max` characters, marking the cut with `...`.
pub fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(ELLIPSIS.len());
    let mut short: String = text.chars().take(keep).collect();
    short.push_str(ELLIPSIS);
    short
}

/// One-based slot number as shown to users.
pub fn slot_number(index: usize) -> String {
    (index + 1).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_untouched() {
        assert_eq!(shorten("Math", 20), "Math");
        assert_eq!(shorten("", 5), "");
    }

    #[test]
    fn long_names_are_cut_with_ellipsis() {
        assert_eq!(shorten("Mathematics and Physics", 10), "Mathema...");
        assert_eq!(shorten("Математика", 6), "Мат...");
        assert_eq!(shorten("abcdef", 2), "...");
    }
}
