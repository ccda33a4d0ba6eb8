use crate::core::builders::{
    build_addresses, build_aliases, build_evidences, build_pep_entries, build_rel_entry,
    has_evidence_fields, pep_tier,
};
use crate::core::classifier::classify;
use crate::core::dates::{parse_date, parse_date_list};
use crate::core::names::split_name;
use crate::core::parsers::{
    is_placeholder, is_truthy, non_empty, split_delimited, LINE_DELIMITERS, LIST_DELIMITERS,
};
use crate::core::policy::TransformPolicy;
use crate::domain::document::{OutputDocument, PartialDate, PersonRecord};
use crate::domain::model::{Column, EntityMode, GenerationResult, ProfileType, Row};
use crate::utils::error::Result;
use crate::utils::validation::validate_rows;

/// Turn a snapshot of grid rows into the output document.
///
/// Rows are filtered and de-duplicated for `mode`, then each survivor becomes
/// one record. Records with nothing to say are dropped, so the worst case is an
/// empty `individuals` list.
pub fn generate(
    rows: &[Row],
    mode: EntityMode,
    profile: ProfileType,
    policy: &TransformPolicy,
) -> OutputDocument {
    let classification = classify(rows, mode);
    tracing::debug!(
        "{} of {} rows qualify for {} mode ({} duplicates dropped)",
        classification.selected.len(),
        rows.len(),
        mode,
        classification.duplicates.len()
    );

    let individuals = classification
        .selected
        .into_iter()
        .filter_map(|row| build_record(row, mode, profile, policy))
        .collect();

    OutputDocument { individuals }
}

/// `generate` plus the rendered JSON and the advisory validation report.
pub fn generate_result(
    rows: &[Row],
    mode: EntityMode,
    profile: ProfileType,
    policy: &TransformPolicy,
) -> Result<GenerationResult> {
    let document = generate(rows, mode, profile, policy);
    let json = document.to_pretty_json()?;
    let report = validate_rows(rows, mode, profile);

    Ok(GenerationResult {
        document,
        json,
        report,
        entity_mode: mode,
        profile_type: profile,
    })
}

pub fn build_record(
    row: &Row,
    mode: EntityMode,
    profile: ProfileType,
    policy: &TransformPolicy,
) -> Option<PersonRecord> {
    let record = match mode {
        EntityMode::Create => build_create_record(row, profile, policy),
        EntityMode::Update => build_update_record(row, profile, policy),
    };
    record.has_content().then_some(record)
}

fn build_create_record(row: &Row, profile: ProfileType, policy: &TransformPolicy) -> PersonRecord {
    let name = split_name(row.get(Column::FullName), false);
    let aliases = build_aliases(row, Some(&name), policy);

    let mut record = PersonRecord {
        name,
        aliases,
        evidences: build_evidences(row),
        addresses: build_addresses(row, policy),
        ..person_fields(row)
    };

    match profile {
        ProfileType::Rel => {
            record.rel_entries = build_rel_entry(row, policy, false).into_iter().collect();
        }
        ProfileType::Pep => {
            record.pep_tier = pep_tier(row);
            record.current_pep_entries = build_pep_entries(row);
        }
    }

    record
}

fn build_update_record(row: &Row, profile: ProfileType, policy: &TransformPolicy) -> PersonRecord {
    let mut record = PersonRecord {
        reference_number: non_empty(row.get(Column::ReferenceId)),
        aliases: build_aliases(row, None, policy),
        addresses: build_addresses(row, policy),
        ..person_fields(row)
    };

    let categorized = profile == ProfileType::Rel
        && non_empty(row.get(Column::RelCategory)).is_some()
        && non_empty(row.get(Column::EventType)).is_some();

    if categorized {
        record.rel_entries = build_rel_entry(row, policy, true).into_iter().collect();
    } else if has_evidence_fields(row) {
        // 同一筆更新不可同時帶出生日期與孤立證據
        if record.dates_of_birth.is_empty() {
            record.evidences = build_evidences(row);
        } else {
            tracing::debug!(
                "Reference {}: evidence dropped because the row also updates date of birth",
                row.get(Column::ReferenceId).trim()
            );
        }
    }

    record
}

/// Fields shared by create and update records.
fn person_fields(row: &Row) -> PersonRecord {
    PersonRecord {
        gender: non_empty(row.get(Column::Gender)),
        is_dead: is_truthy(row.get(Column::IsDead)).then_some(true),
        nationalities: split_delimited(row.get(Column::Nationalities), LIST_DELIMITERS)
            .into_iter()
            .filter(|n| !is_placeholder(n))
            .collect(),
        dates_of_birth: collect_dates(
            parse_date(
                row.get(Column::DobDay),
                row.get(Column::DobMonth),
                row.get(Column::DobYear),
            ),
            row.get(Column::DatesOfBirth),
        ),
        dates_of_death: collect_dates(
            parse_date(
                row.get(Column::DodDay),
                row.get(Column::DodMonth),
                row.get(Column::DodYear),
            ),
            row.get(Column::DatesOfDeath),
        ),
        profile_images: split_delimited(row.get(Column::ProfileImages), LINE_DELIMITERS)
            .into_iter()
            .filter(|image| !is_placeholder(image))
            .collect(),
        ..Default::default()
    }
}

/// The split-cell date first, then any pasted dates not already present.
fn collect_dates(primary: Option<PartialDate>, pasted: &str) -> Vec<PartialDate> {
    let mut dates: Vec<PartialDate> = primary.into_iter().collect();
    for date in parse_date_list(pasted) {
        if !dates.contains(&date) {
            dates.push(date);
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(rows: &[Row], mode: EntityMode, profile: ProfileType) -> serde_json::Value {
        serde_json::to_value(generate(rows, mode, profile, &TransformPolicy::default())).unwrap()
    }

    #[test]
    fn test_create_rel_end_to_end() {
        let rows = vec![Row::new()
            .with(Column::FullName, "Jane A. Smith")
            .with(Column::Gender, "Female")
            .with(Column::ArticleId, "12345")
            .with(Column::Day, "1")
            .with(Column::Month, "2")
            .with(Column::Year, "2020")];

        let value = render(&rows, EntityMode::Create, ProfileType::Rel);
        let record = &value["individuals"][0];
        assert_eq!(record["firstName"], "Jane");
        assert_eq!(record["middleName"], "A");
        assert_eq!(record["lastName"], "Smith");
        assert_eq!(record["gender"], "Female");
        assert_eq!(
            record["evidences"],
            json!([{"articleId": "12345", "evidenceDate": {"day": 1, "month": 2, "year": 2020}}])
        );
    }

    #[test]
    fn test_pep_profile_emits_tier_and_entries_not_rel() {
        let rows = vec![Row::new()
            .with(Column::FullName, "Ada Lovelace")
            .with(Column::PepTier, "PEP Tier 2")
            .with(Column::PepSegment, "Legislative")
            .with(Column::RelCategory, "ignored")];

        let value = render(&rows, EntityMode::Create, ProfileType::Pep);
        let record = &value["individuals"][0];
        assert_eq!(record["pepTier"], "PEP Tier 2");
        assert_eq!(record["currentPepEntries"], json!([{"segment": "Legislative"}]));
        assert!(record.get("relEntries").is_none());
    }

    #[test]
    fn test_rel_profile_ignores_pep_columns() {
        let rows = vec![Row::new()
            .with(Column::FullName, "Ada Lovelace")
            .with(Column::PepTier, "PEP Tier 2")
            .with(Column::RelCategory, "Sanctions")];

        let value = render(&rows, EntityMode::Create, ProfileType::Rel);
        let record = &value["individuals"][0];
        assert!(record.get("pepTier").is_none());
        assert_eq!(record["relEntries"], json!([{"category": "Sanctions"}]));
    }

    #[test]
    fn test_duplicate_keeps_first_row_data() {
        let rows = vec![
            Row::new().with(Column::FullName, "John Doe").with(Column::ArticleId, "1"),
            Row::new().with(Column::FullName, "John Doe").with(Column::ArticleId, "2"),
        ];
        let value = render(&rows, EntityMode::Create, ProfileType::Rel);
        assert_eq!(value["individuals"].as_array().unwrap().len(), 1);
        assert_eq!(value["individuals"][0]["evidences"][0]["articleId"], "1");
    }

    #[test]
    fn test_update_dob_excludes_bare_evidence() {
        let rows = vec![Row::new()
            .with(Column::ReferenceId, "R-100")
            .with(Column::DobYear, "1970")
            .with(Column::ArticleId, "555")];

        let value = render(&rows, EntityMode::Update, ProfileType::Rel);
        assert_eq!(
            value,
            json!({"individuals": [{"referenceNumber": "R-100", "datesOfBirth": [{"year": 1970}]}]})
        );
    }

    #[test]
    fn test_update_bare_evidence_without_dob() {
        let rows = vec![Row::new()
            .with(Column::ReferenceId, "R-101")
            .with(Column::PdfFilename, "memo")];

        let value = render(&rows, EntityMode::Update, ProfileType::Rel);
        let record = &value["individuals"][0];
        assert_eq!(record["referenceNumber"], "R-101");
        assert_eq!(record["evidences"][0]["bulkAssetFilename"], "memo.pdf");
    }

    #[test]
    fn test_update_categorized_rel_entry_takes_precedence() {
        let rows = vec![Row::new()
            .with(Column::ReferenceId, "R-102")
            .with(Column::RelCategory, "Organised Crime")
            .with(Column::EventType, "Arrest")
            .with(Column::RelId, "77")
            .with(Column::ArticleId, "888")];

        let value = render(&rows, EntityMode::Update, ProfileType::Rel);
        let record = &value["individuals"][0];
        assert!(record.get("evidences").is_none());
        assert_eq!(
            record["relEntries"],
            json!([{
                "id": "77",
                "category": "Organised Crime",
                "events": [{"type": "Arrest", "evidences": [{"articleId": "888"}]}]
            }])
        );
    }

    #[test]
    fn test_update_category_without_event_type_falls_back_to_evidence() {
        let rows = vec![Row::new()
            .with(Column::ReferenceId, "R-103")
            .with(Column::RelCategory, "Organised Crime")
            .with(Column::ArticleId, "888")];

        let value = render(&rows, EntityMode::Update, ProfileType::Rel);
        let record = &value["individuals"][0];
        assert!(record.get("relEntries").is_none());
        assert_eq!(record["evidences"][0]["articleId"], "888");
    }

    #[test]
    fn test_update_reference_only_record_is_dropped() {
        let rows = vec![
            Row::new().with(Column::ReferenceId, "R-104"),
            Row::new()
                .with(Column::ReferenceId, "R-105")
                .with(Column::FullName, "Names Are Ignored"),
        ];
        let value = render(&rows, EntityMode::Update, ProfileType::Pep);
        assert_eq!(value, json!({"individuals": []}));
    }

    #[test]
    fn test_update_pep_never_emits_pep_entries() {
        let rows = vec![Row::new()
            .with(Column::ReferenceId, "R-106")
            .with(Column::PepTier, "PEP Tier 1")
            .with(Column::PepPosition, "Mayor")
            .with(Column::Url, "https://example.com/x")];

        let value = render(&rows, EntityMode::Update, ProfileType::Pep);
        let record = &value["individuals"][0];
        assert!(record.get("pepTier").is_none());
        assert!(record.get("currentPepEntries").is_none());
        assert_eq!(record["evidences"][0]["bulkAssetUrl"], "https://example.com/x");
    }

    #[test]
    fn test_supplementary_person_fields() {
        let rows = vec![Row::new()
            .with(Column::FullName, "Old Timer")
            .with(Column::IsDead, "TRUE")
            .with(Column::Nationalities, "US, GB | ___")
            .with(Column::DobYear, "1901")
            .with(Column::DatesOfBirth, "1/1/1901; 2/2/1902")
            .with(Column::DodYear, "1990")];

        let value = render(&rows, EntityMode::Create, ProfileType::Rel);
        let record = &value["individuals"][0];
        assert_eq!(record["isDead"], true);
        assert_eq!(record["nationalities"], json!(["US", "GB"]));
        assert_eq!(
            record["datesOfBirth"],
            json!([
                {"year": 1901},
                {"day": 1, "month": 1, "year": 1901},
                {"day": 2, "month": 2, "year": 1902}
            ])
        );
        assert_eq!(record["datesOfDeath"], json!([{"year": 1990}]));
    }

    #[test]
    fn test_pasted_dates_of_death_follow_split_cells() {
        let rows = vec![Row::new()
            .with(Column::ReferenceId, "R-7")
            .with(Column::DodDay, "4")
            .with(Column::DodMonth, "5")
            .with(Column::DodYear, "1999")
            .with(Column::DatesOfDeath, "4/5/1999 | x/6/2001 ; 1/1/1850")];

        let value = render(&rows, EntityMode::Update, ProfileType::Rel);
        assert_eq!(
            value["individuals"][0]["datesOfDeath"],
            json!([
                {"day": 4, "month": 5, "year": 1999},
                {"month": 6, "year": 2001}
            ])
        );
    }

    #[test]
    fn test_profile_images_split_per_line() {
        let rows = vec![Row::new()
            .with(Column::FullName, "Jane Roe")
            .with(Column::ProfileImages, "front.jpg\nside.jpg ; ___ | https://img.example/3.png")];

        let value = render(&rows, EntityMode::Create, ProfileType::Pep);
        assert_eq!(
            value["individuals"][0]["profileImages"],
            json!(["front.jpg", "side.jpg", "https://img.example/3.png"])
        );

        let blank = vec![Row::new()
            .with(Column::FullName, "Jane Roe")
            .with(Column::ProfileImages, " ; | ")];
        let value = render(&blank, EntityMode::Create, ProfileType::Pep);
        assert!(value["individuals"][0].get("profileImages").is_none());
    }

    #[test]
    fn test_placeholder_only_name_produces_no_record() {
        let rows = vec![Row::new().with(Column::FullName, "____")];
        let value = render(&rows, EntityMode::Create, ProfileType::Rel);
        assert_eq!(value, json!({"individuals": []}));
    }

    #[test]
    fn test_generate_result_renders_json_and_report() {
        let rows = vec![
            Row::new().with(Column::FullName, "John Doe"),
            Row::new().with(Column::Gender, "Male"),
        ];
        let result = generate_result(
            &rows,
            EntityMode::Create,
            ProfileType::Rel,
            &TransformPolicy::default(),
        )
        .unwrap();
        assert_eq!(result.document.individuals.len(), 1);
        assert!(result.json.starts_with("{\n    \"individuals\": ["));
        assert_eq!(result.report.excluded_rows, vec![1]);
    }
}
