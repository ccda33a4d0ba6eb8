//! Primitive cell parsers. None of these fail: malformed input comes back as
//! `None` or an empty string.

/// Delimiters for multi-value cells pasted as lines.
pub const LINE_DELIMITERS: &[char] = &['\n', ';', '|'];
/// Delimiters for short code lists such as nationalities.
pub const LIST_DELIMITERS: &[char] = &[',', ';', '|'];
/// Separators between dates in a multi-date cell.
pub const DATE_LIST_DELIMITERS: &[char] = &[';', '|'];
/// Separators between day, month and year inside one date.
pub const DATE_PART_DELIMITERS: &[char] = &['-', '/', ','];

/// Parse an integer cell. Surrounding whitespace is ignored; anything else
/// that is not a plain integer yields `None`.
pub fn safe_int(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}

/// Remove every period and trim.
pub fn clean_string(value: &str) -> String {
    value.replace('.', "").trim().to_string()
}

/// Lower-case, then upper-case the first letter of each whitespace-delimited
/// word. Words are rejoined with single spaces.
pub fn title_case(value: &str) -> String {
    value
        .to_lowercase()
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split on any of `delimiters`, trim each piece and drop empty pieces.
pub fn split_delimited(value: &str, delimiters: &[char]) -> Vec<String> {
    value
        .split(|c: char| delimiters.contains(&c))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

/// A value made only of underscores, left behind by bulk-import templates.
pub fn is_placeholder(value: &str) -> bool {
    let trimmed = value.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c == '_')
}

/// Trimmed value, or `None` when blank or a placeholder.
pub fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() || is_placeholder(trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// `true`, `1`, `yes` and `y` in any case.
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes" | "y"
    )
}

/// Any character outside printable ASCII. Used as a stand-in for "this name is
/// written in a non-Latin script"; it is not a script classifier.
pub fn has_non_ascii(value: &str) -> bool {
    value.chars().any(|c| !(' '..='~').contains(&c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_int() {
        assert_eq!(safe_int("42"), Some(42));
        assert_eq!(safe_int(" 7 "), Some(7));
        assert_eq!(safe_int("-3"), Some(-3));
        assert_eq!(safe_int(""), None);
        assert_eq!(safe_int("abc"), None);
        assert_eq!(safe_int("12abc"), None);
        assert_eq!(safe_int("1.5"), None);
    }

    #[test]
    fn test_clean_string_strips_periods() {
        assert_eq!(clean_string("  Jane A. Smith  "), "Jane A Smith");
        assert_eq!(clean_string("..."), "");
        assert_eq!(clean_string(""), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("jOHN   mICHAEL doe"), "John Michael Doe");
        assert_eq!(title_case("52 main st"), "52 Main St");
        assert_eq!(title_case(""), "");
        assert_eq!(title_case("élodie"), "Élodie");
    }

    #[test]
    fn test_split_delimited() {
        assert_eq!(
            split_delimited(" US, GB ;;| FR ", LIST_DELIMITERS),
            vec!["US", "GB", "FR"]
        );
        assert_eq!(split_delimited("a\nb|c", LINE_DELIMITERS), vec!["a", "b", "c"]);
        assert!(split_delimited(" , ; ", LIST_DELIMITERS).is_empty());
    }

    #[test]
    fn test_placeholder_detection() {
        assert!(is_placeholder("___"));
        assert!(is_placeholder(" _ "));
        assert!(!is_placeholder(""));
        assert!(!is_placeholder("a_b"));
        assert_eq!(non_empty("____"), None);
        assert_eq!(non_empty("  x "), Some("x".to_string()));
    }

    #[test]
    fn test_non_ascii_heuristic() {
        assert!(!has_non_ascii("John Doe"));
        assert!(has_non_ascii("Иван Петров"));
        assert!(has_non_ascii("José"));
        assert!(has_non_ascii("tab\there"));
    }
}
