//! Evidence verifier: citations must actually appear in source text
//!
//! Short quotes must be found verbatim (after normalization). Long quotes
//! are checked through three anchors (head, centered middle, tail); two of
//! the three must land. That tolerates noisy OCR in the middle of a long
//! passage while still rejecting fabricated citations.
//!
//! All lengths and offsets are measured in characters, not bytes; quotes
//! are routinely Japanese.

use tracing::warn;

use crate::types::{Claim, EvidencePack, EvidenceRecord, VerifyReason, VerifyResult};
use crate::{ANCHOR_LEN, ANCHOR_MIN_HITS};

/// Verifies claims against the evidence pack that backs them
#[derive(Debug, Default)]
pub struct EvidenceVerifier;

impl EvidenceVerifier {
    /// Create new verifier
    pub fn new() -> Self {
        Self
    }

    /// Verify one claim's citations against the pack
    pub fn verify(&self, claim: &Claim, pack: &EvidencePack) -> VerifyResult {
        if claim.evidence_ids.is_empty() {
            return VerifyResult::fail(VerifyReason::R050_EMPTY_EVIDENCE_IDS);
        }

        let mut needed_anchors = false;

        for id in &claim.evidence_ids {
            let record = match pack.find(id) {
                Some(record) => record,
                None => {
                    return VerifyResult::fail_id(VerifyReason::R051_RECORD_NOT_IN_PACK, id.clone())
                }
            };

            match check_quote(record, pack) {
                QuoteCheck::Exact => {}
                QuoteCheck::Anchored => needed_anchors = true,
                QuoteCheck::ExactMiss => {
                    return VerifyResult::fail(VerifyReason::R055_QUOTE_NOT_FOUND)
                }
                QuoteCheck::AnchorMiss => {
                    return VerifyResult::fail(VerifyReason::R054_ANCHORS_MISSED)
                }
            }
        }

        if needed_anchors {
            VerifyResult::pass(VerifyReason::R053_ANCHORS_MATCHED)
        } else {
            VerifyResult::pass(VerifyReason::R052_EXACT_SUBSTRING)
        }
    }

    /// Keep only the claims whose citations hold up; drops are logged,
    /// never surfaced
    pub fn filter_valid(&self, claims: Vec<Claim>, pack: &EvidencePack) -> Vec<Claim> {
        claims
            .into_iter()
            .filter(|claim| {
                let result = self.verify(claim, pack);
                if !result.valid {
                    warn!(
                        claim = clip(&claim.text, 60).as_str(),
                        reason = result.reason.code(),
                        "dropping unverifiable claim"
                    );
                }
                result.valid
            })
            .collect()
    }
}

/// How one record's quote fared against its source text
enum QuoteCheck {
    Exact,
    Anchored,
    ExactMiss,
    AnchorMiss,
}

/// Check a record's quote against the source snippets behind it
fn check_quote(record: &EvidenceRecord, pack: &EvidencePack) -> QuoteCheck {
    let quote = normalize(&record.quote);
    let source = normalize(&source_text_for(record, pack));

    let quote_chars: Vec<char> = quote.chars().collect();

    if quote_chars.len() <= ANCHOR_LEN {
        if source.contains(&quote) {
            return QuoteCheck::Exact;
        }
        return QuoteCheck::ExactMiss;
    }

    let hits = anchors(&quote_chars)
        .iter()
        .filter(|anchor| source.contains(anchor.as_str()))
        .count();

    if hits >= ANCHOR_MIN_HITS {
        QuoteCheck::Anchored
    } else {
        QuoteCheck::AnchorMiss
    }
}

/// Head, centered middle and tail excerpts of a long quote
fn anchors(chars: &[char]) -> [String; 3] {
    let n = chars.len();
    let mid_start = (n - ANCHOR_LEN) / 2;
    [
        chars[..ANCHOR_LEN].iter().collect(),
        chars[mid_start..mid_start + ANCHOR_LEN].iter().collect(),
        chars[n - ANCHOR_LEN..].iter().collect(),
    ]
}

/// Gather the source text that should contain a record's quote.
///
/// Prefers snippets from hits on the record's own page; falls back to
/// every snippet in the pack when the page has no hit.
fn source_text_for(record: &EvidenceRecord, pack: &EvidencePack) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for hit in &pack.hits {
        if hit.doc_id == record.source_doc && hit.page_id == record.source_page {
            parts.push(hit.snippet.as_str());
            parts.extend(hit.snippets.iter().map(|s| s.as_str()));
        }
    }

    if parts.is_empty() {
        for hit in &pack.hits {
            parts.push(hit.snippet.as_str());
            parts.extend(hit.snippets.iter().map(|s| s.as_str()));
        }
    }

    parts.join(" ")
}

/// Lowercase, collapse whitespace runs, strip bracket/quote punctuation
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for ch in text.to_lowercase().chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if is_stripped_punct(ch) {
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
    }

    out
}

/// Bracket and quote characters removed by normalization
fn is_stripped_punct(ch: char) -> bool {
    matches!(
        ch,
        '(' | ')'
            | '['
            | ']'
            | '{'
            | '}'
            | '"'
            | '\''
            | '「'
            | '」'
            | '『'
            | '』'
            | '【'
            | '】'
            | '（'
            | '）'
            | '〈'
            | '〉'
            | '《'
            | '》'
            | '“'
            | '”'
            | '’'
    )
}

/// Clip a string to at most `max` characters for log lines
fn clip(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EvidenceHit;

    /// Pack with one record whose quote is `quote` and one hit whose
    /// snippet is `source`
    fn pack_with(quote: &str, source: &str) -> EvidencePack {
        EvidencePack {
            hits: vec![EvidenceHit {
                doc_id: "KJK".to_string(),
                page_id: 3,
                score: 0.9,
                snippet: source.to_string(),
                snippets: vec![],
            }],
            confidence: 0.9,
            records: vec![EvidenceRecord {
                id: "KJK-3-1".to_string(),
                title: "passage".to_string(),
                quote: quote.to_string(),
                source_doc: "KJK".to_string(),
                source_page: 3,
            }],
            is_estimated: false,
        }
    }

    fn claim_for(id: &str) -> Claim {
        Claim::new("paraphrase of the passage", vec![id.to_string()])
    }

    /// 400 ASCII chars with no repeating 80-char runs
    fn long_quote() -> String {
        (0..100).map(|i| format!("x{:03}", i)).collect()
    }

    #[test]
    fn test_empty_ids_never_verify() {
        let verifier = EvidenceVerifier::new();
        let pack = pack_with("a", "a");
        let claim = Claim::new("anything", vec![]);
        let result = verifier.verify(&claim, &pack);
        assert!(!result.valid);
        assert_eq!(result.reason, VerifyReason::R050_EMPTY_EVIDENCE_IDS);
    }

    #[test]
    fn test_missing_record_fails_with_id() {
        let verifier = EvidenceVerifier::new();
        let pack = pack_with("a", "a");
        let result = verifier.verify(&claim_for("NOPE-1"), &pack);
        assert!(!result.valid);
        assert_eq!(result.reason, VerifyReason::R051_RECORD_NOT_IN_PACK);
        assert_eq!(result.failed_id.as_deref(), Some("NOPE-1"));
    }

    #[test]
    fn test_short_quote_exact_substring() {
        let verifier = EvidenceVerifier::new();
        let pack = pack_with("the gate opens east", "at dawn the gate opens east, slowly");
        let result = verifier.verify(&claim_for("KJK-3-1"), &pack);
        assert!(result.valid);
        assert_eq!(result.reason, VerifyReason::R052_EXACT_SUBSTRING);
    }

    #[test]
    fn test_short_quote_missing_fails() {
        let verifier = EvidenceVerifier::new();
        let pack = pack_with("the gate opens west", "at dawn the gate opens east, slowly");
        let result = verifier.verify(&claim_for("KJK-3-1"), &pack);
        assert!(!result.valid);
        assert_eq!(result.reason, VerifyReason::R055_QUOTE_NOT_FOUND);
    }

    #[test]
    fn test_normalization_strips_brackets_and_case() {
        let verifier = EvidenceVerifier::new();
        let pack = pack_with("『天の原』", "昔見た天の原ふりさけみれば");
        assert!(verifier.verify(&claim_for("KJK-3-1"), &pack).valid);

        let pack = pack_with("「The GATE」", "at dawn the gate opens east");
        assert!(verifier.verify(&claim_for("KJK-3-1"), &pack).valid);
    }

    #[test]
    fn test_normalization_collapses_but_keeps_spaces() {
        let verifier = EvidenceVerifier::new();
        // Runs of whitespace become one space on both sides
        let pack = pack_with("the  gate\n  opens", "slowly, the gate opens east");
        assert!(verifier.verify(&claim_for("KJK-3-1"), &pack).valid);

        // A spaced quote does not match a space-free source: whitespace
        // is collapsed, never removed
        let pack = pack_with("天の 原", "昔見た天の原ふりさけみれば");
        let result = verifier.verify(&claim_for("KJK-3-1"), &pack);
        assert!(!result.valid);
        assert_eq!(result.reason, VerifyReason::R055_QUOTE_NOT_FOUND);
    }

    #[test]
    fn test_long_quote_full_source_passes_anchors() {
        let verifier = EvidenceVerifier::new();
        let quote = long_quote();
        let pack = pack_with(&quote, &quote);
        let result = verifier.verify(&claim_for("KJK-3-1"), &pack);
        assert!(result.valid);
        assert_eq!(result.reason, VerifyReason::R053_ANCHORS_MATCHED);
    }

    #[test]
    fn test_long_quote_noise_outside_anchors_passes() {
        let verifier = EvidenceVerifier::new();
        let quote = long_quote(); // 400 chars: anchors at 0..80, 160..240, 320..400
        let mut source = quote.clone();
        // Corrupt the gaps between anchors (all ASCII here)
        source.replace_range(100..110, "qqqqqqqqqq");
        source.replace_range(260..270, "qqqqqqqqqq");
        let pack = pack_with(&quote, &source);
        let result = verifier.verify(&claim_for("KJK-3-1"), &pack);
        assert!(result.valid);
        assert_eq!(result.reason, VerifyReason::R053_ANCHORS_MATCHED);
    }

    #[test]
    fn test_long_quote_one_dead_anchor_still_passes() {
        let verifier = EvidenceVerifier::new();
        let quote = long_quote();
        let mut source = quote.clone();
        // Break only the tail anchor
        source.replace_range(350..355, "zzzzz");
        let pack = pack_with(&quote, &source);
        let result = verifier.verify(&claim_for("KJK-3-1"), &pack);
        assert!(result.valid, "2 of 3 anchors must be enough");
    }

    #[test]
    fn test_long_quote_all_anchors_dead_fails() {
        let verifier = EvidenceVerifier::new();
        let quote = long_quote();
        let mut source = quote.clone();
        // One corrupted char inside each anchor region
        source.replace_range(10..11, "#");
        source.replace_range(200..201, "#");
        source.replace_range(350..351, "#");
        let pack = pack_with(&quote, &source);
        let result = verifier.verify(&claim_for("KJK-3-1"), &pack);
        assert!(!result.valid);
        assert_eq!(result.reason, VerifyReason::R054_ANCHORS_MISSED);
    }

    #[test]
    fn test_japanese_long_quote_counts_characters() {
        let verifier = EvidenceVerifier::new();
        // 90 Japanese chars: 3 bytes each, so byte math would misfire
        let quote: String = "あいうえおかきくけこ".chars().cycle().take(90).collect();
        let pack = pack_with(&quote, &quote);
        let result = verifier.verify(&claim_for("KJK-3-1"), &pack);
        assert!(result.valid);
        assert_eq!(result.reason, VerifyReason::R053_ANCHORS_MATCHED);
    }

    #[test]
    fn test_filter_valid_drops_silently() {
        let verifier = EvidenceVerifier::new();
        let pack = pack_with("the gate opens east", "at dawn the gate opens east");
        let claims = vec![
            claim_for("KJK-3-1"),
            Claim::new("uncited claim", vec![]),
            claim_for("GHOST-9"),
        ];
        let kept = verifier.filter_valid(claims, &pack);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].evidence_ids, vec!["KJK-3-1".to_string()]);
    }
}
