//! Builders for the nested parts of a person record. Each takes a row and
//! returns a list (or option) that is empty when the row has nothing to say.

use crate::core::dates::parse_date;
use crate::core::names::{spelling_variation, split_name};
use crate::core::parsers::{non_empty, safe_int, title_case};
use crate::core::policy::{RelEvidenceKey, TransformPolicy};
use crate::domain::document::{
    Address, Alias, Evidence, EvidenceRef, NameParts, PartialDate, PepEntry, RelEntry, RelEvent,
    ADDRESS_TYPE_BUSINESS, ALIAS_NICKNAME, ALIAS_ORIGINAL_SCRIPT, ALIAS_SPELLING_VARIATION,
    CREDIBILITY_HIGH, LANGUAGE_ENGLISH,
};
use crate::domain::model::{Column, Row};

fn titled(value: &str) -> Option<String> {
    non_empty(value).map(|v| title_case(&v))
}

/// Aliases in output order: original script name, nickname 1, nickname 2,
/// then the spelling variation of `main_name` when the policy asks for it.
pub fn build_aliases(
    row: &Row,
    main_name: Option<&NameParts>,
    policy: &TransformPolicy,
) -> Vec<Alias> {
    let mut aliases = Vec::new();

    let original_script = split_name(row.get(Column::OriginalScriptName), true);
    if !original_script.is_empty() {
        aliases.push(Alias {
            name: original_script,
            alias_type: ALIAS_ORIGINAL_SCRIPT.to_string(),
        });
    }

    for column in [Column::Alias1, Column::Alias2] {
        if let Some(nickname) = titled(row.get(column)) {
            aliases.push(Alias {
                name: NameParts {
                    first_name: Some(nickname),
                    ..Default::default()
                },
                alias_type: ALIAS_NICKNAME.to_string(),
            });
        }
    }

    if policy.name_spelling_variation {
        if let Some(variation) = main_name.and_then(spelling_variation) {
            aliases.push(Alias {
                name: variation,
                alias_type: ALIAS_SPELLING_VARIATION.to_string(),
            });
        }
    }

    aliases
}

/// At most one business address. `state` stands in for a blank `city`.
pub fn build_addresses(row: &Row, policy: &TransformPolicy) -> Vec<Address> {
    let country_id = safe_int(row.get(Column::CountryId));
    if country_id.is_none() && policy.address_requires_country {
        return Vec::new();
    }

    let line1 = titled(row.get(Column::AddressLine1));
    let line2 = titled(row.get(Column::AddressLine2));
    let city = titled(row.get(Column::City)).or_else(|| titled(row.get(Column::State)));
    let county = titled(row.get(Column::County));

    if country_id.is_none()
        && line1.is_none()
        && line2.is_none()
        && city.is_none()
        && county.is_none()
    {
        return Vec::new();
    }

    vec![Address {
        address_type: ADDRESS_TYPE_BUSINESS.to_string(),
        country_id,
        line1,
        line2,
        city,
        county,
    }]
}

/// Append `.pdf` unless the name already ends with it (any case).
pub fn normalize_pdf_filename(filename: &str) -> String {
    let trimmed = filename.trim();
    if trimmed.is_empty() || trimmed.to_lowercase().ends_with(".pdf") {
        trimmed.to_string()
    } else {
        format!("{}.pdf", trimmed)
    }
}

/// Date from the generic day/month/year cells, shared by evidences and events.
pub fn evidence_date(row: &Row) -> Option<PartialDate> {
    parse_date(row.get(Column::Day), row.get(Column::Month), row.get(Column::Year))
}

pub fn has_evidence_fields(row: &Row) -> bool {
    [Column::ArticleId, Column::Url, Column::PdfFilename]
        .into_iter()
        .any(|c| non_empty(row.get(c)).is_some())
}

fn summary(row: &Row) -> Option<String> {
    non_empty(row.get(Column::Summary)).or_else(|| non_empty(row.get(Column::Snippet)))
}

/// Person-level evidence: an article reference when an article id is given,
/// otherwise a bulk asset built from the PDF filename and/or URL.
pub fn build_evidences(row: &Row) -> Vec<Evidence> {
    if !has_evidence_fields(row) {
        return Vec::new();
    }

    let date = evidence_date(row);

    if let Some(article_id) = non_empty(row.get(Column::ArticleId)) {
        return vec![Evidence {
            article_id: Some(article_id),
            summary: summary(row),
            evidence_date: date,
            ..Default::default()
        }];
    }

    let pdf = non_empty(row.get(Column::PdfFilename)).map(|f| normalize_pdf_filename(&f));
    let url = non_empty(row.get(Column::Url));
    let (bulk_asset_filename, original_url, bulk_asset_url) = match (pdf, url) {
        (Some(pdf), url) => (Some(pdf), url, None),
        (None, url) => (None, None, url),
    };

    vec![Evidence {
        article_id: None,
        bulk_asset_filename,
        original_url,
        bulk_asset_url,
        copyrighted: Some(true),
        source_of_wealth: Some(false),
        credibility: Some(CREDIBILITY_HIGH.to_string()),
        language: Some(LANGUAGE_ENGLISH.to_string()),
        summary: summary(row),
        evidence_date: date,
        publication_date: date,
    }]
}

/// First available of article id, PDF filename, URL.
pub fn rel_evidence_ref(row: &Row, policy: &TransformPolicy) -> Option<EvidenceRef> {
    if let Some(article_id) = non_empty(row.get(Column::ArticleId)) {
        return Some(match policy.rel_evidence_key {
            RelEvidenceKey::ArticleId => EvidenceRef::ArticleId(article_id),
            RelEvidenceKey::EvidenceId => EvidenceRef::EvidenceId(article_id),
        });
    }
    if let Some(pdf) = non_empty(row.get(Column::PdfFilename)) {
        return Some(EvidenceRef::BulkAssetFilename(normalize_pdf_filename(&pdf)));
    }
    non_empty(row.get(Column::Url)).map(EvidenceRef::BulkAssetUrl)
}

/// A single REL entry with one event. `with_id` carries the existing REL id
/// through for update rows.
pub fn build_rel_entry(row: &Row, policy: &TransformPolicy, with_id: bool) -> Option<RelEntry> {
    let event = RelEvent {
        event_type: non_empty(row.get(Column::EventType)),
        date: evidence_date(row),
        evidences: rel_evidence_ref(row, policy).into_iter().collect(),
    };

    let entry = RelEntry {
        id: if with_id {
            non_empty(row.get(Column::RelId))
        } else {
            None
        },
        category: non_empty(row.get(Column::RelCategory)),
        subcategory: non_empty(row.get(Column::RelSubcategory))
            .or_else(|| non_empty(row.get(Column::ListName))),
        events: if event.is_empty() { Vec::new() } else { vec![event] },
    };

    (!entry.is_empty()).then_some(entry)
}

pub fn pep_tier(row: &Row) -> Option<String> {
    non_empty(row.get(Column::PepTier))
}

/// Current PEP tenure, built only when segment, position or category is set.
pub fn build_pep_entries(row: &Row) -> Vec<PepEntry> {
    let segment = non_empty(row.get(Column::PepSegment));
    let position = non_empty(row.get(Column::PepPosition));
    let category = non_empty(row.get(Column::PepCategory));
    if segment.is_none() && position.is_none() && category.is_none() {
        return Vec::new();
    }

    vec![PepEntry {
        segment,
        position,
        category,
        country_iso_code: non_empty(row.get(Column::PepCountryIso)).map(|c| c.to_uppercase()),
        date_from: parse_date(
            row.get(Column::FromDay),
            row.get(Column::FromMonth),
            row.get(Column::FromYear),
        ),
        date_to: parse_date(
            row.get(Column::ToDay),
            row.get(Column::ToMonth),
            row.get(Column::ToYear),
        ),
        evidences: non_empty(row.get(Column::ArticleId))
            .map(EvidenceRef::ArticleId)
            .into_iter()
            .collect(),
    }]
}
