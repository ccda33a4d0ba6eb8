use serde::{Deserialize, Serialize};

/// Key used for an article reference inside REL events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RelEvidenceKey {
    #[default]
    #[serde(rename = "articleId")]
    ArticleId,
    #[serde(rename = "evidenceId")]
    EvidenceId,
}

/// Switches for the rules that differ between revisions of the bulk format.
/// Defaults follow the current receiving schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformPolicy {
    /// Add a first/last swapped "Name Spelling Variation" alias.
    pub name_spelling_variation: bool,
    pub rel_evidence_key: RelEvidenceKey,
    /// Emit an address only when the row has a parseable country id.
    pub address_requires_country: bool,
}

impl Default for TransformPolicy {
    fn default() -> Self {
        Self {
            name_spelling_variation: false,
            rel_evidence_key: RelEvidenceKey::ArticleId,
            address_requires_country: true,
        }
    }
}
