//! Output shapes of the bulk JSON document.
//!
//! Every optional key is skipped when absent and every list is skipped when
//! empty, so a serialized record never carries `""`, `[]` or `{}`.

use serde::{Deserialize, Serialize};

use crate::domain::model::{EntityMode, ProfileType};
use crate::utils::error::{BulkError, Result};

pub const ALIAS_ORIGINAL_SCRIPT: &str = "Original Script Name";
pub const ALIAS_NICKNAME: &str = "Nickname";
pub const ALIAS_SPELLING_VARIATION: &str = "Name Spelling Variation";

pub const ADDRESS_TYPE_BUSINESS: &str = "Business";
pub const CREDIBILITY_HIGH: &str = "High";
pub const LANGUAGE_ENGLISH: &str = "eng";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PartialDate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub month: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<i64>,
}

impl PartialDate {
    pub fn is_empty(&self) -> bool {
        self.day.is_none() && self.month.is_none() && self.year.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NameParts {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub middle_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl NameParts {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none() && self.middle_name.is_none() && self.last_name.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alias {
    #[serde(flatten)]
    pub name: NameParts,
    #[serde(rename = "type")]
    pub alias_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
}

/// A person-level evidence citation: either an existing article or a bulk
/// asset (PDF upload and/or URL).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Evidence {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_asset_filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bulk_asset_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyrighted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_of_wealth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credibility: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evidence_date: Option<PartialDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publication_date: Option<PartialDate>,
}

/// Reference from an entry or event to a single piece of evidence.
/// Serializes as a one-key object, e.g. `{"articleId": "123"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EvidenceRef {
    #[serde(rename = "articleId")]
    ArticleId(String),
    #[serde(rename = "evidenceId")]
    EvidenceId(String),
    #[serde(rename = "bulkAssetFilename")]
    BulkAssetFilename(String),
    #[serde(rename = "bulkAssetUrl")]
    BulkAssetUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelEvent {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<PartialDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidences: Vec<EvidenceRef>,
}

impl RelEvent {
    pub fn is_empty(&self) -> bool {
        self.event_type.is_none() && self.date.is_none() && self.evidences.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RelEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<RelEvent>,
}

impl RelEntry {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.category.is_none()
            && self.subcategory.is_none()
            && self.events.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PepEntry {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country_iso_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<PartialDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<PartialDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidences: Vec<EvidenceRef>,
}

/// One output record per surviving row.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_number: Option<String>,
    #[serde(flatten)]
    pub name: NameParts,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dead: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nationalities: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dates_of_birth: Vec<PartialDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dates_of_death: Vec<PartialDate>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub profile_images: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<Alias>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub evidences: Vec<Evidence>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pep_tier: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub current_pep_entries: Vec<PepEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rel_entries: Vec<RelEntry>,
}

impl PersonRecord {
    /// True when the record carries something besides its reference number.
    pub fn has_content(&self) -> bool {
        !self.name.is_empty()
            || self.gender.is_some()
            || self.is_dead.is_some()
            || !self.nationalities.is_empty()
            || !self.dates_of_birth.is_empty()
            || !self.dates_of_death.is_empty()
            || !self.profile_images.is_empty()
            || !self.aliases.is_empty()
            || !self.evidences.is_empty()
            || !self.addresses.is_empty()
            || self.pep_tier.is_some()
            || !self.current_pep_entries.is_empty()
            || !self.rel_entries.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OutputDocument {
    pub individuals: Vec<PersonRecord>,
}

impl OutputDocument {
    /// Pretty JSON with 4-space indentation, as shown in the output panel and
    /// written to export files.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        String::from_utf8(buf).map_err(|e| BulkError::ProcessingError {
            message: format!("Rendered JSON is not valid UTF-8: {}", e),
        })
    }
}

/// `{PEP|REL}_{CREATE|UPDATE}_{YYYY-MM-DD}.json`
pub fn export_filename(profile: ProfileType, mode: EntityMode, date: chrono::NaiveDate) -> String {
    format!("{}_{}_{}.json", profile.tag(), mode.tag(), date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_document_serializes_with_four_space_indent() {
        let doc = OutputDocument::default();
        assert_eq!(doc.to_pretty_json().unwrap(), "{\n    \"individuals\": []\n}");
    }

    #[test]
    fn test_pretty_json_keeps_non_ascii_text() {
        let doc = OutputDocument {
            individuals: vec![PersonRecord {
                name: NameParts {
                    last_name: Some("Смит".to_string()),
                    ..Default::default()
                },
                profile_images: vec!["фото.jpg".to_string()],
                ..Default::default()
            }],
        };
        let json = doc.to_pretty_json().unwrap();
        assert!(json.contains("\"lastName\": \"Смит\""));
        assert!(json.contains("\"profileImages\": [\n                \"фото.jpg\""));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let record = PersonRecord {
            name: NameParts {
                last_name: Some("Doe".to_string()),
                ..Default::default()
            },
            dates_of_birth: vec![PartialDate {
                year: Some(1970),
                ..Default::default()
            }],
            ..Default::default()
        };

        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"lastName": "Doe", "datesOfBirth": [{"year": 1970}]})
        );
    }

    #[test]
    fn test_evidence_ref_is_single_key_object() {
        let refs = vec![
            EvidenceRef::ArticleId("12".to_string()),
            EvidenceRef::BulkAssetFilename("a.pdf".to_string()),
        ];
        assert_eq!(
            serde_json::to_value(&refs).unwrap(),
            json!([{"articleId": "12"}, {"bulkAssetFilename": "a.pdf"}])
        );
    }

    #[test]
    fn test_alias_flattens_name_parts() {
        let alias = Alias {
            name: NameParts {
                first_name: Some("Johnny".to_string()),
                ..Default::default()
            },
            alias_type: ALIAS_NICKNAME.to_string(),
        };
        assert_eq!(
            serde_json::to_value(&alias).unwrap(),
            json!({"firstName": "Johnny", "type": "Nickname"})
        );
    }

    #[test]
    fn test_export_filename() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            export_filename(ProfileType::Pep, EntityMode::Update, date),
            "PEP_UPDATE_2024-03-09.json"
        );
        assert_eq!(
            export_filename(ProfileType::Rel, EntityMode::Create, date),
            "REL_CREATE_2024-03-09.json"
        );
    }

    #[test]
    fn test_reference_only_record_has_no_content() {
        let record = PersonRecord {
            reference_number: Some("R-1".to_string()),
            ..Default::default()
        };
        assert!(!record.has_content());
    }
}
