use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::document::OutputDocument;
use crate::utils::validation::ValidationReport;

/// Which workflow the grid rows feed: brand-new profiles or partial updates
/// keyed by an existing reference number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum EntityMode {
    #[default]
    Create,
    Update,
}

impl EntityMode {
    pub fn tag(self) -> &'static str {
        match self {
            EntityMode::Create => "CREATE",
            EntityMode::Update => "UPDATE",
        }
    }
}

impl fmt::Display for EntityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ProfileType {
    #[default]
    Rel,
    Pep,
}

impl ProfileType {
    pub fn tag(self) -> &'static str {
        match self {
            ProfileType::Rel => "REL",
            ProfileType::Pep => "PEP",
        }
    }
}

impl fmt::Display for ProfileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Columns that only make sense for one profile type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnGroup {
    Common,
    Rel,
    Pep,
}

/// The fixed set of grid columns. Keys are the snake_case names used in CSV
/// headers; labels are what the grid shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Column {
    ReferenceId,
    FullName,
    OriginalScriptName,
    Gender,
    IsDead,
    Nationalities,
    DobDay,
    DobMonth,
    DobYear,
    DatesOfBirth,
    DodDay,
    DodMonth,
    DodYear,
    DatesOfDeath,
    ProfileImages,
    #[serde(rename = "alias_1")]
    Alias1,
    #[serde(rename = "alias_2")]
    Alias2,
    AddressLine1,
    AddressLine2,
    City,
    State,
    County,
    CountryId,
    ArticleId,
    Url,
    PdfFilename,
    Summary,
    Snippet,
    Day,
    Month,
    Year,
    RelCategory,
    RelSubcategory,
    ListName,
    EventType,
    RelId,
    PepTier,
    PepSegment,
    PepPosition,
    PepCategory,
    PepCountryIso,
    FromDay,
    FromMonth,
    FromYear,
    ToDay,
    ToMonth,
    ToYear,
}

impl Column {
    pub const ALL: [Column; 47] = [
        Column::ReferenceId,
        Column::FullName,
        Column::OriginalScriptName,
        Column::Gender,
        Column::IsDead,
        Column::Nationalities,
        Column::DobDay,
        Column::DobMonth,
        Column::DobYear,
        Column::DatesOfBirth,
        Column::DodDay,
        Column::DodMonth,
        Column::DodYear,
        Column::DatesOfDeath,
        Column::ProfileImages,
        Column::Alias1,
        Column::Alias2,
        Column::AddressLine1,
        Column::AddressLine2,
        Column::City,
        Column::State,
        Column::County,
        Column::CountryId,
        Column::ArticleId,
        Column::Url,
        Column::PdfFilename,
        Column::Summary,
        Column::Snippet,
        Column::Day,
        Column::Month,
        Column::Year,
        Column::RelCategory,
        Column::RelSubcategory,
        Column::ListName,
        Column::EventType,
        Column::RelId,
        Column::PepTier,
        Column::PepSegment,
        Column::PepPosition,
        Column::PepCategory,
        Column::PepCountryIso,
        Column::FromDay,
        Column::FromMonth,
        Column::FromYear,
        Column::ToDay,
        Column::ToMonth,
        Column::ToYear,
    ];

    pub fn key(self) -> &'static str {
        self.names().0
    }

    pub fn label(self) -> &'static str {
        self.names().1
    }

    fn names(self) -> (&'static str, &'static str) {
        match self {
            Column::ReferenceId => ("reference_id", "Reference ID"),
            Column::FullName => ("full_name", "Full Name"),
            Column::OriginalScriptName => ("original_script_name", "Original Script Name"),
            Column::Gender => ("gender", "Gender"),
            Column::IsDead => ("is_dead", "Is Dead"),
            Column::Nationalities => ("nationalities", "Nationalities"),
            Column::DobDay => ("dob_day", "DOB Day"),
            Column::DobMonth => ("dob_month", "DOB Month"),
            Column::DobYear => ("dob_year", "DOB Year"),
            Column::DatesOfBirth => ("dates_of_birth", "Dates of Birth"),
            Column::DodDay => ("dod_day", "DOD Day"),
            Column::DodMonth => ("dod_month", "DOD Month"),
            Column::DodYear => ("dod_year", "DOD Year"),
            Column::DatesOfDeath => ("dates_of_death", "Dates of Death"),
            Column::ProfileImages => ("profile_images", "Profile Images"),
            Column::Alias1 => ("alias_1", "Alias 1"),
            Column::Alias2 => ("alias_2", "Alias 2"),
            Column::AddressLine1 => ("address_line1", "Address Line 1"),
            Column::AddressLine2 => ("address_line2", "Address Line 2"),
            Column::City => ("city", "City"),
            Column::State => ("state", "State"),
            Column::County => ("county", "County"),
            Column::CountryId => ("country_id", "Country ID"),
            Column::ArticleId => ("article_id", "Article ID"),
            Column::Url => ("url", "URL"),
            Column::PdfFilename => ("pdf_filename", "PDF Filename"),
            Column::Summary => ("summary", "Summary"),
            Column::Snippet => ("snippet", "Snippet"),
            Column::Day => ("day", "Day"),
            Column::Month => ("month", "Month"),
            Column::Year => ("year", "Year"),
            Column::RelCategory => ("rel_category", "REL Category"),
            Column::RelSubcategory => ("rel_subcategory", "REL Subcategory"),
            Column::ListName => ("list_name", "List Name"),
            Column::EventType => ("event_type", "Event Type"),
            Column::RelId => ("rel_id", "REL ID"),
            Column::PepTier => ("pep_tier", "PEP Tier"),
            Column::PepSegment => ("pep_segment", "PEP Segment"),
            Column::PepPosition => ("pep_position", "PEP Position"),
            Column::PepCategory => ("pep_category", "PEP Category"),
            Column::PepCountryIso => ("pep_country_iso", "PEP Country ISO"),
            Column::FromDay => ("from_day", "From Day"),
            Column::FromMonth => ("from_month", "From Month"),
            Column::FromYear => ("from_year", "From Year"),
            Column::ToDay => ("to_day", "To Day"),
            Column::ToMonth => ("to_month", "To Month"),
            Column::ToYear => ("to_year", "To Year"),
        }
    }

    pub fn group(self) -> ColumnGroup {
        match self {
            Column::RelCategory
            | Column::RelSubcategory
            | Column::ListName
            | Column::EventType
            | Column::RelId => ColumnGroup::Rel,
            Column::PepTier
            | Column::PepSegment
            | Column::PepPosition
            | Column::PepCategory
            | Column::PepCountryIso
            | Column::FromDay
            | Column::FromMonth
            | Column::FromYear
            | Column::ToDay
            | Column::ToMonth
            | Column::ToYear => ColumnGroup::Pep,
            _ => ColumnGroup::Common,
        }
    }

    /// Columns shown in the grid (and written to templates) for a profile type,
    /// in display order.
    pub fn for_profile(profile: ProfileType) -> Vec<Column> {
        Column::ALL
            .iter()
            .copied()
            .filter(|c| match c.group() {
                ColumnGroup::Common => true,
                ColumnGroup::Rel => profile == ProfileType::Rel,
                ColumnGroup::Pep => profile == ProfileType::Pep,
            })
            .collect()
    }

    /// Resolve a CSV header by key or display label, ignoring case and
    /// surrounding whitespace.
    pub fn from_header(header: &str) -> Option<Column> {
        let wanted = header.trim();
        Column::ALL.iter().copied().find(|c| {
            c.key().eq_ignore_ascii_case(wanted) || c.label().eq_ignore_ascii_case(wanted)
        })
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// One grid row. Cells that were never written read back as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: u64,
    #[serde(default)]
    cells: BTreeMap<Column, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(id: u64) -> Self {
        Self {
            id,
            cells: BTreeMap::new(),
        }
    }

    /// Builder-style setter, handy when assembling rows in code.
    pub fn with(mut self, column: Column, value: impl Into<String>) -> Self {
        self.set(column, value);
        self
    }

    pub fn get(&self, column: Column) -> &str {
        self.cells.get(&column).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, column: Column, value: impl Into<String>) {
        let value = value.into();
        if value.is_empty() {
            self.cells.remove(&column);
        } else {
            self.cells.insert(column, value);
        }
    }

    pub fn is_blank(&self) -> bool {
        self.cells.values().all(|v| v.trim().is_empty())
    }

    pub fn cells(&self) -> impl Iterator<Item = (Column, &str)> {
        self.cells.iter().map(|(c, v)| (*c, v.as_str()))
    }
}

/// Everything one "Generate" action produces.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub document: OutputDocument,
    pub json: String,
    pub report: ValidationReport,
    pub entity_mode: EntityMode,
    pub profile_type: ProfileType,
}
