use crate::core::parsers::{safe_int, DATE_LIST_DELIMITERS, DATE_PART_DELIMITERS};
use crate::domain::document::PartialDate;

/// Earliest year accepted from a free-text date list.
pub const MIN_PASTED_YEAR: i64 = 1900;

/// Build a partial date from separate cells. Each component is kept only if it
/// parses; `None` when none of them do. No range checks happen here.
pub fn parse_date(day: &str, month: &str, year: &str) -> Option<PartialDate> {
    let date = PartialDate {
        day: safe_int(day),
        month: safe_int(month),
        year: safe_int(year),
    };
    (!date.is_empty()).then_some(date)
}

/// Parse a pasted multi-date cell such as `1/2/1970; 3-4-1980`.
///
/// Dates are separated by `;` or `|`, components by `-`, `/` or `,` in
/// day-month-year order. A date is dropped unless it has exactly three
/// components and a year of at least 1900; its siblings are kept. An
/// unparseable day or month is left out of that date only.
pub fn parse_date_list(value: &str) -> Vec<PartialDate> {
    value
        .split(|c: char| DATE_LIST_DELIMITERS.contains(&c))
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .filter_map(parse_delimited_date)
        .collect()
}

fn parse_delimited_date(piece: &str) -> Option<PartialDate> {
    let parts: Vec<&str> = piece
        .split(|c: char| DATE_PART_DELIMITERS.contains(&c))
        .collect();
    let [day, month, year] = parts.as_slice() else {
        return None;
    };

    let year = safe_int(year).filter(|y| *y >= MIN_PASTED_YEAR)?;
    Some(PartialDate {
        day: safe_int(day),
        month: safe_int(month),
        year: Some(year),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: Option<i64>, month: Option<i64>, year: Option<i64>) -> PartialDate {
        PartialDate { day, month, year }
    }

    #[test]
    fn test_parse_date_keeps_each_parsed_component() {
        assert_eq!(
            parse_date("5", "13", "2020"),
            Some(date(Some(5), Some(13), Some(2020)))
        );
        assert_eq!(parse_date("", "", "2020"), Some(date(None, None, Some(2020))));
        assert_eq!(parse_date("x", "3", ""), Some(date(None, Some(3), None)));
        assert_eq!(parse_date("", "", ""), None);
        assert_eq!(parse_date("a", "b", "c"), None);
    }

    #[test]
    fn test_parse_date_list_drops_bad_entries_only() {
        let dates = parse_date_list("1/2/1970; 3-4-1850 | 5,6,1990 ; 7/8 ; 1/2/x");
        assert_eq!(
            dates,
            vec![
                date(Some(1), Some(2), Some(1970)),
                date(Some(5), Some(6), Some(1990)),
            ]
        );
    }

    #[test]
    fn test_parse_date_list_keeps_date_when_day_or_month_is_bad() {
        assert_eq!(
            parse_date_list("x/1/2000"),
            vec![date(None, Some(1), Some(2000))]
        );
        assert_eq!(
            parse_date_list("/3/1990 ; 4/?/1991"),
            vec![
                date(None, Some(3), Some(1990)),
                date(Some(4), None, Some(1991)),
            ]
        );
    }

    #[test]
    fn test_parse_date_list_tolerates_spaces() {
        assert_eq!(
            parse_date_list(" 01 / 02 / 1999 "),
            vec![date(Some(1), Some(2), Some(1999))]
        );
        assert!(parse_date_list("").is_empty());
    }
}
