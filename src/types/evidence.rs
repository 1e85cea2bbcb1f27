//! Evidence records, search packs, claims and verification results
//!
//! Wire casing is camelCase: packs round-trip with the external evidence
//! store and the CLI's `--pack` loader.

use serde::{Deserialize, Serialize};

use crate::types::error::{CoreError, CoreResult};

/// One quoted passage resolved from the document corpus
///
/// Owned by the external evidence store; read-only inside the core.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceRecord {
    /// Stable record id, cited by claims
    pub id: String,
    /// Short record title for listings
    #[serde(default)]
    pub title: String,
    /// The quoted passage itself
    pub quote: String,
    /// Document key the quote came from
    pub source_doc: String,
    /// Page number inside the document
    pub source_page: u32,
}

/// One ranked search hit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidenceHit {
    /// Document key
    pub doc_id: String,
    /// Page number
    pub page_id: u32,
    /// Opaque relevance score, used only for thresholding
    pub score: f64,
    /// Display snippet (clipped when enumerated)
    pub snippet: String,
    /// All snippets the search extracted for this hit
    #[serde(default)]
    pub snippets: Vec<String>,
}

/// Result of one evidence search, hits ranked best-first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvidencePack {
    /// Ranked hits, best first
    pub hits: Vec<EvidenceHit>,
    /// Overall search confidence, 0.0 to 1.0
    pub confidence: f64,
    /// Resolved records the hits quote from
    #[serde(default)]
    pub records: Vec<EvidenceRecord>,
    /// Pack was built from an estimated locator, not an explicit one
    #[serde(default)]
    pub is_estimated: bool,
}

impl EvidencePack {
    /// An empty pack: zero hits, zero confidence
    pub fn empty() -> Self {
        Self {
            hits: Vec::new(),
            confidence: 0.0,
            records: Vec::new(),
            is_estimated: false,
        }
    }

    /// Best-ranked hit, if any
    pub fn best(&self) -> Option<&EvidenceHit> {
        self.hits.first()
    }

    /// Look up a record by id
    pub fn find(&self, id: &str) -> Option<&EvidenceRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// Look up a record by id, erroring when absent
    pub fn require(&self, id: &str) -> CoreResult<&EvidenceRecord> {
        self.find(id)
            .ok_or_else(|| CoreError::EvidenceNotFound(id.to_string()))
    }
}

/// A claim the generator wants to make, with its citations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    /// The claim text
    pub text: String,
    /// Record ids backing the claim; must be non-empty to verify
    pub evidence_ids: Vec<String>,
}

impl Claim {
    /// Create a claim citing the given record ids
    pub fn new(text: impl Into<String>, evidence_ids: Vec<String>) -> Self {
        Self {
            text: text.into(),
            evidence_ids,
        }
    }
}

/// Reason codes for claim verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum VerifyReason {
    // Failure codes
    /// Claim cited no evidence at all
    R050_EMPTY_EVIDENCE_IDS,
    /// A cited record id is absent from the pack
    R051_RECORD_NOT_IN_PACK,

    // Pass codes
    /// Short quote found verbatim in the source
    R052_EXACT_SUBSTRING,
    /// Long quote, 2 of 3 anchors found in the source
    R053_ANCHORS_MATCHED,

    // Failure codes
    /// Long quote, fewer than 2 anchors found
    R054_ANCHORS_MISSED,
    /// Short quote not found in the source
    R055_QUOTE_NOT_FOUND,
}

impl VerifyReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R050_EMPTY_EVIDENCE_IDS => "R050_EMPTY_EVIDENCE_IDS",
            Self::R051_RECORD_NOT_IN_PACK => "R051_RECORD_NOT_IN_PACK",
            Self::R052_EXACT_SUBSTRING => "R052_EXACT_SUBSTRING",
            Self::R053_ANCHORS_MATCHED => "R053_ANCHORS_MATCHED",
            Self::R054_ANCHORS_MISSED => "R054_ANCHORS_MISSED",
            Self::R055_QUOTE_NOT_FOUND => "R055_QUOTE_NOT_FOUND",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R050_EMPTY_EVIDENCE_IDS => "No evidence cited",
            Self::R051_RECORD_NOT_IN_PACK => "Cited record missing from pack",
            Self::R052_EXACT_SUBSTRING => "Quote found verbatim",
            Self::R053_ANCHORS_MATCHED => "Anchors matched",
            Self::R054_ANCHORS_MISSED => "Anchors missed",
            Self::R055_QUOTE_NOT_FOUND => "Quote not found in source",
        }
    }

    /// Is this a passing reason?
    pub fn is_pass(&self) -> bool {
        matches!(self, Self::R052_EXACT_SUBSTRING | Self::R053_ANCHORS_MATCHED)
    }
}

impl std::fmt::Display for VerifyReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Outcome of verifying one claim against a pack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyResult {
    /// Whether the claim's citations held up
    pub valid: bool,
    /// Which check decided it
    pub reason: VerifyReason,
    /// The record id that failed resolution, when that is the cause
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_id: Option<String>,
}

impl VerifyResult {
    /// Create a passing result
    pub fn pass(reason: VerifyReason) -> Self {
        Self {
            valid: true,
            reason,
            failed_id: None,
        }
    }

    /// Create a failing result
    pub fn fail(reason: VerifyReason) -> Self {
        Self {
            valid: false,
            reason,
            failed_id: None,
        }
    }

    /// Create a failing result naming the unresolved record id
    pub fn fail_id(reason: VerifyReason, id: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason,
            failed_id: Some(id.into()),
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_pack() -> EvidencePack {
        EvidencePack {
            hits: vec![EvidenceHit {
                doc_id: "KJK".to_string(),
                page_id: 12,
                score: 0.88,
                snippet: "first passage".to_string(),
                snippets: vec!["first passage".to_string()],
            }],
            confidence: 0.88,
            records: vec![EvidenceRecord {
                id: "KJK-12-1".to_string(),
                title: "Opening passage".to_string(),
                quote: "first passage of the opening chapter".to_string(),
                source_doc: "KJK".to_string(),
                source_page: 12,
            }],
            is_estimated: false,
        }
    }

    #[test]
    fn test_require_resolves_known_id() {
        let pack = sample_pack();
        let record = pack.require("KJK-12-1").unwrap();
        assert_eq!(record.source_page, 12);
    }

    #[test]
    fn test_require_fails_unknown_id() {
        let pack = sample_pack();
        let err = pack.require("KJK-99-9").unwrap_err();
        assert!(matches!(err, CoreError::EvidenceNotFound(id) if id == "KJK-99-9"));
    }

    #[test]
    fn test_pack_serializes_camel_case() {
        let pack = sample_pack();
        let json = serde_json::to_string(&pack).unwrap();
        assert!(json.contains("\"isEstimated\""));
        assert!(json.contains("\"docId\""));
        assert!(json.contains("\"pageId\""));
        assert!(json.contains("\"sourceDoc\""));
    }

    #[test]
    fn test_empty_pack() {
        let pack = EvidencePack::empty();
        assert!(pack.hits.is_empty());
        assert_eq!(pack.confidence, 0.0);
        assert!(pack.best().is_none());
    }

    #[test]
    fn test_verify_reason_pass_split() {
        assert!(VerifyReason::R052_EXACT_SUBSTRING.is_pass());
        assert!(VerifyReason::R053_ANCHORS_MATCHED.is_pass());
        assert!(!VerifyReason::R050_EMPTY_EVIDENCE_IDS.is_pass());
        assert!(!VerifyReason::R054_ANCHORS_MISSED.is_pass());
    }
}
