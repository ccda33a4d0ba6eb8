use crate::core::classifier::classify;
use crate::core::dates::{parse_date_list, MIN_PASTED_YEAR};
use crate::core::parsers::{
    is_placeholder, safe_int, split_delimited, DATE_LIST_DELIMITERS, LIST_DELIMITERS,
};
use crate::domain::model::{Column, EntityMode, ProfileType, Row};
use crate::utils::error::{BulkError, Result};
use std::collections::{BTreeMap, HashSet};
use std::fmt;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(BulkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(BulkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extensions(
    field_name: &str,
    files: &[String],
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<String> = allowed_extensions
        .iter()
        .map(|ext| ext.to_ascii_lowercase())
        .collect();

    for file in files {
        match std::path::Path::new(file)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(extension) if allowed_set.contains(&extension.to_ascii_lowercase()) => {}
            Some(extension) => {
                return Err(BulkError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: format!(
                        "Unsupported file extension: {}. Allowed extensions: {}",
                        extension,
                        allowed_extensions.join(", ")
                    ),
                });
            }
            None => {
                return Err(BulkError::InvalidConfigValueError {
                    field: field_name.to_string(),
                    value: file.clone(),
                    reason: "File has no extension or invalid filename".to_string(),
                });
            }
        }
    }

    Ok(())
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| BulkError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_range<T: PartialOrd + fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(BulkError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Row quality report. Advisory only: generation never waits on it.
// ---------------------------------------------------------------------------

pub const GENDER_OPTIONS: &[&str] = &["Male", "Female"];
pub const PEP_TIER_OPTIONS: &[&str] = &["PEP Tier 1", "PEP Tier 2", "PEP Tier 3"];

/// ISO 3166-1 alpha-2 codes accepted by the receiving system.
pub const COUNTRY_CODES: &[&str] = &[
    "AF", "AL", "DZ", "AS", "AD", "AO", "AI", "AG", "AR", "AM", "AW", "AU", "AT", "AZ", "BS", "BH",
    "BD", "BB", "BY", "BE", "BZ", "BJ", "BM", "BT", "BO", "BA", "BW", "BR", "VG", "BN", "BG", "BF",
    "MM", "BI", "KH", "CM", "CA", "CV", "KY", "CF", "TD", "CL", "CN", "CO", "KM", "CD", "CG", "CK",
    "CR", "HR", "CU", "CY", "CW", "CZ", "CI", "DK", "DJ", "DM", "DO", "TL", "EC", "EG", "SV", "GQ",
    "ER", "EE", "ET", "FO", "FJ", "FI", "FR", "GF", "PF", "GA", "GM", "GE", "DE", "GH", "GI", "GR",
    "GL", "GD", "GP", "GU", "GT", "GG", "GN", "GW", "GY", "HT", "VA", "HN", "HK", "HU", "IS", "IN",
    "ID", "IR", "IQ", "IE", "IM", "IL", "IT", "JM", "JP", "JE", "JO", "KZ", "KE", "KI", "KP", "KR",
    "XK", "KW", "KG", "LA", "LV", "LB", "LS", "LR", "LY", "LI", "LT", "LU", "MO", "MK", "MG", "MW",
    "MY", "MV", "ML", "MT", "MH", "MQ", "MR", "MU", "YT", "MX", "FM", "MD", "MC", "MN", "ME", "MS",
    "MA", "MZ", "NA", "NR", "NP", "NL", "NC", "NZ", "NI", "NE", "NG", "NU", "NF", "MP", "NO", "OM",
    "PK", "PW", "PS", "PA", "PG", "PY", "PE", "PH", "PL", "PT", "PR", "QA", "RE", "RO", "RU", "RW",
    "KN", "LC", "PM", "VC", "WS", "SM", "ST", "SX", "SA", "SN", "RS", "SC", "SL", "SG", "SK", "SI",
    "SB", "SO", "ZA", "SS", "ES", "LK", "SD", "SR", "SZ", "SE", "CH", "SY", "TW", "TJ", "TZ", "TH",
    "TG", "TO", "TT", "TN", "TR", "TM", "TC", "TV", "UG", "UA", "AE", "GB", "VI", "US", "UY", "UZ",
    "VU", "VE", "VN", "WF", "EH", "YE", "ZM", "ZW",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IssueKind {
    Placeholder,
    NotANumber,
    OutOfRange,
    MalformedDate,
    InvalidUrl,
    UnknownGender,
    UnknownPepTier,
    UnknownCountryCode,
}

impl fmt::Display for IssueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IssueKind::Placeholder => "placeholder value",
            IssueKind::NotANumber => "not a number",
            IssueKind::OutOfRange => "out of range",
            IssueKind::MalformedDate => "malformed date",
            IssueKind::InvalidUrl => "invalid URL",
            IssueKind::UnknownGender => "unknown gender",
            IssueKind::UnknownPepTier => "unknown PEP tier",
            IssueKind::UnknownCountryCode => "unknown country code",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Zero-based position in the submitted rows.
    pub row: usize,
    pub column: Column,
    pub kind: IssueKind,
    pub value: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "row {}, {}: {} ('{}')",
            self.row + 1,
            self.column,
            self.kind,
            self.value
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    /// Non-blank rows left out because they lack an identity for the mode.
    pub excluded_rows: Vec<usize>,
    /// Rows dropped as later duplicates.
    pub duplicate_rows: Vec<usize>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty() && self.excluded_rows.is_empty() && self.duplicate_rows.is_empty()
    }

    pub fn counts(&self) -> BTreeMap<IssueKind, usize> {
        let mut counts = BTreeMap::new();
        for issue in &self.issues {
            *counts.entry(issue.kind).or_insert(0) += 1;
        }
        counts
    }

    pub fn summary(&self) -> String {
        if self.is_clean() {
            return "No issues found".to_string();
        }
        let mut parts: Vec<String> = self
            .counts()
            .into_iter()
            .map(|(kind, count)| format!("{} x {}", count, kind))
            .collect();
        if !self.excluded_rows.is_empty() {
            parts.push(format!("{} rows excluded", self.excluded_rows.len()));
        }
        if !self.duplicate_rows.is_empty() {
            parts.push(format!("{} duplicate rows dropped", self.duplicate_rows.len()));
        }
        parts.join(", ")
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.summary())?;
        for issue in &self.issues {
            writeln!(f, "  - {}", issue)?;
        }
        for row in &self.excluded_rows {
            writeln!(f, "  - row {}: no usable identity, excluded", row + 1)?;
        }
        for row in &self.duplicate_rows {
            writeln!(f, "  - row {}: duplicate, dropped", row + 1)?;
        }
        Ok(())
    }
}

#[derive(Clone, Copy)]
enum NumberRule {
    Day,
    Month,
    Year,
    Positive,
}

fn number_rule(column: Column) -> Option<NumberRule> {
    match column {
        Column::DobDay | Column::DodDay | Column::Day | Column::FromDay | Column::ToDay => {
            Some(NumberRule::Day)
        }
        Column::DobMonth
        | Column::DodMonth
        | Column::Month
        | Column::FromMonth
        | Column::ToMonth => Some(NumberRule::Month),
        Column::DobYear | Column::DodYear | Column::Year | Column::FromYear | Column::ToYear => {
            Some(NumberRule::Year)
        }
        Column::CountryId => Some(NumberRule::Positive),
        _ => None,
    }
}

fn in_range(rule: NumberRule, value: i64) -> bool {
    match rule {
        NumberRule::Day => (1..=31).contains(&value),
        NumberRule::Month => (1..=12).contains(&value),
        NumberRule::Year => (MIN_PASTED_YEAR..=9999).contains(&value),
        NumberRule::Positive => value > 0,
    }
}

fn is_country_code(code: &str) -> bool {
    COUNTRY_CODES.contains(&code.trim().to_uppercase().as_str())
}

fn check_cell(row: usize, column: Column, value: &str, issues: &mut Vec<ValidationIssue>) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return;
    }
    let mut report = |kind: IssueKind, value: &str| {
        issues.push(ValidationIssue {
            row,
            column,
            kind,
            value: value.to_string(),
        })
    };

    if is_placeholder(trimmed) {
        report(IssueKind::Placeholder, trimmed);
        return;
    }

    if let Some(rule) = number_rule(column) {
        match safe_int(trimmed) {
            None => report(IssueKind::NotANumber, trimmed),
            Some(n) if !in_range(rule, n) => report(IssueKind::OutOfRange, trimmed),
            Some(_) => {}
        }
        return;
    }

    match column {
        Column::Url => {
            let valid = Url::parse(trimmed)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                report(IssueKind::InvalidUrl, trimmed);
            }
        }
        Column::Gender if !GENDER_OPTIONS.contains(&trimmed) => {
            report(IssueKind::UnknownGender, trimmed)
        }
        Column::PepTier if !PEP_TIER_OPTIONS.contains(&trimmed) => {
            report(IssueKind::UnknownPepTier, trimmed)
        }
        Column::PepCountryIso if !is_country_code(trimmed) => {
            report(IssueKind::UnknownCountryCode, trimmed)
        }
        Column::Nationalities => {
            for code in split_delimited(trimmed, LIST_DELIMITERS) {
                if !is_placeholder(&code) && !is_country_code(&code) {
                    report(IssueKind::UnknownCountryCode, &code);
                }
            }
        }
        Column::DatesOfBirth | Column::DatesOfDeath => {
            let pieces = split_delimited(trimmed, DATE_LIST_DELIMITERS);
            for piece in pieces {
                if parse_date_list(&piece).is_empty() {
                    report(IssueKind::MalformedDate, &piece);
                }
            }
        }
        _ => {}
    }
}

/// Check every non-blank row for values the generator will silently drop or
/// the receiving system will reject, and list rows the mode leaves out.
pub fn validate_rows(rows: &[Row], mode: EntityMode, profile: ProfileType) -> ValidationReport {
    let relevant = Column::for_profile(profile);
    let mut report = ValidationReport::default();

    for (index, row) in rows.iter().enumerate() {
        for (column, value) in row.cells() {
            if relevant.contains(&column) {
                check_cell(index, column, value, &mut report.issues);
            }
        }
    }

    let classification = classify(rows, mode);
    report.excluded_rows = classification
        .excluded
        .into_iter()
        .filter(|&i| !rows[i].is_blank())
        .collect();
    report.duplicate_rows = classification.duplicates;

    if !report.is_clean() {
        tracing::warn!("⚠️ Validation: {}", report.summary());
    }

    report
}
