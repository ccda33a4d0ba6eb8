use crate::core::parsers::{clean_string, has_non_ascii, is_placeholder, non_empty, title_case};
use crate::domain::document::NameParts;

/// Split a full name into first/middle/last by whitespace tokens.
///
/// One token is a last name, two are first + last, and three or more put the
/// interior tokens into the middle name. Unless `preserve_original` is set, or
/// the name contains non-ASCII characters, periods are stripped and the name is
/// title-cased first. Underscore-only placeholder tokens never become a part.
pub fn split_name(full_name: &str, preserve_original: bool) -> NameParts {
    let trimmed = full_name.trim();
    if trimmed.is_empty() {
        return NameParts::default();
    }

    let normalized = if preserve_original || has_non_ascii(trimmed) {
        trimmed.to_string()
    } else {
        title_case(&clean_string(trimmed))
    };

    let tokens: Vec<&str> = normalized.split_whitespace().collect();
    match tokens.as_slice() {
        [] => NameParts::default(),
        [last] => NameParts {
            last_name: non_empty(last),
            ..Default::default()
        },
        [first, last] => NameParts {
            first_name: non_empty(first),
            middle_name: None,
            last_name: non_empty(last),
        },
        [first, interior @ .., last] => {
            let middle = interior
                .iter()
                .copied()
                .filter(|t| !is_placeholder(t))
                .collect::<Vec<_>>()
                .join(" ");
            NameParts {
                first_name: non_empty(first),
                middle_name: non_empty(&middle),
                last_name: non_empty(last),
            }
        }
    }
}

/// First and last swapped, middle kept. Only defined when both ends exist.
pub fn spelling_variation(parts: &NameParts) -> Option<NameParts> {
    match (&parts.first_name, &parts.last_name) {
        (Some(first), Some(last)) => Some(NameParts {
            first_name: Some(last.clone()),
            middle_name: parts.middle_name.clone(),
            last_name: Some(first.clone()),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(first: Option<&str>, middle: Option<&str>, last: Option<&str>) -> NameParts {
        NameParts {
            first_name: first.map(str::to_string),
            middle_name: middle.map(str::to_string),
            last_name: last.map(str::to_string),
        }
    }

    #[test]
    fn test_token_count_rules() {
        assert_eq!(split_name("Doe", false), parts(None, None, Some("Doe")));
        assert_eq!(
            split_name("John Doe", false),
            parts(Some("John"), None, Some("Doe"))
        );
        assert_eq!(
            split_name("John Michael Van Doe", false),
            parts(Some("John"), Some("Michael Van"), Some("Doe"))
        );
    }

    #[test]
    fn test_blank_name_is_empty() {
        assert!(split_name("", false).is_empty());
        assert!(split_name("   \t ", false).is_empty());
    }

    #[test]
    fn test_latin_names_are_cleaned_and_title_cased() {
        assert_eq!(
            split_name("  jane a. SMITH ", false),
            parts(Some("Jane"), Some("A"), Some("Smith"))
        );
    }

    #[test]
    fn test_preserve_original_skips_normalization() {
        assert_eq!(
            split_name("jane a. SMITH", true),
            parts(Some("jane"), Some("a."), Some("SMITH"))
        );
    }

    #[test]
    fn test_non_ascii_names_keep_their_script() {
        assert_eq!(
            split_name("Иван Петрович Сидоров", false),
            parts(Some("Иван"), Some("Петрович"), Some("Сидоров"))
        );
        assert_eq!(split_name("毛泽东", false), parts(None, None, Some("毛泽东")));
    }

    #[test]
    fn test_placeholder_tokens_are_dropped() {
        assert!(split_name("___", false).is_empty());
        assert_eq!(
            split_name("___ Doe", false),
            parts(None, None, Some("Doe"))
        );
        assert_eq!(
            split_name("John ___ Doe", false),
            parts(Some("John"), None, Some("Doe"))
        );
    }

    #[test]
    fn test_spelling_variation_swaps_ends() {
        let original = parts(Some("John"), Some("Paul"), Some("Doe"));
        assert_eq!(
            spelling_variation(&original),
            Some(parts(Some("Doe"), Some("Paul"), Some("John")))
        );
        assert_eq!(spelling_variation(&parts(None, None, Some("Doe"))), None);
    }
}
