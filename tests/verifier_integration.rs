//! Integration tests for citation verification against realistic packs
//!
//! Builds multi-hit evidence packs and checks how source text is gathered
//! across hits, pages and snippet lists before the quote check runs.

use pretty_assertions::assert_eq;

use gyre0::core::EvidenceVerifier;
use gyre0::types::{Claim, EvidenceHit, EvidencePack, EvidenceRecord, VerifyReason};

/// 30 numbered lines, 41 chars each; spaces stay single so raw and
/// normalized character positions line up
fn long_passage() -> String {
    (0..30)
        .map(|i| format!("passage line {:02} continues without pause. ", i))
        .collect()
}

fn hit(doc: &str, page: u32, snippet: &str) -> EvidenceHit {
    EvidenceHit {
        doc_id: doc.to_string(),
        page_id: page,
        score: 0.8,
        snippet: snippet.to_string(),
        snippets: vec![],
    }
}

fn record(id: &str, quote: &str, doc: &str, page: u32) -> EvidenceRecord {
    EvidenceRecord {
        id: id.to_string(),
        title: "passage".to_string(),
        quote: quote.to_string(),
        source_doc: doc.to_string(),
        source_page: page,
    }
}

fn pack(hits: Vec<EvidenceHit>, records: Vec<EvidenceRecord>) -> EvidencePack {
    EvidencePack {
        hits,
        confidence: 0.85,
        records,
        is_estimated: false,
    }
}

/// Test source text is scoped to hits on the record's own page
#[test]
fn test_source_scoped_to_record_page() {
    let verifier = EvidenceVerifier::new();
    let p = pack(
        vec![
            hit("KJK", 3, "天の原ふりさけみれば春日なる三笠の山に出でし月かも"),
            hit("KJK", 12, "わたの原八十島かけて漕ぎ出でぬと"),
        ],
        vec![
            record("KJK-3-1", "天の原ふりさけみれば", "KJK", 3),
            record("KJK-12-1", "天の原ふりさけみれば", "KJK", 12),
        ],
    );

    // Page 3 carries the quote
    let ok = verifier.verify(&Claim::new("the moon over Kasuga", vec!["KJK-3-1".into()]), &p);
    assert!(ok.valid);
    assert_eq!(ok.reason, VerifyReason::R052_EXACT_SUBSTRING);

    // Page 12 has its own hit, so no fallback, and the quote is not there
    let miss = verifier.verify(&Claim::new("misplaced citation", vec!["KJK-12-1".into()]), &p);
    assert!(!miss.valid);
    assert_eq!(miss.reason, VerifyReason::R055_QUOTE_NOT_FOUND);
}

/// Test a record whose page has no hit falls back to the whole pack
#[test]
fn test_fallback_to_all_hits() {
    let verifier = EvidenceVerifier::new();
    let p = pack(
        vec![
            hit("KJK", 3, "天の原ふりさけみれば春日なる三笠の山に出でし月かも"),
            hit("MYS", 7, "田子の浦ゆうち出でて見れば真白にぞ"),
        ],
        vec![record("KJK-99-1", "真白にぞ", "KJK", 99)],
    );

    let result = verifier.verify(&Claim::new("white beyond the shore", vec!["KJK-99-1".into()]), &p);
    assert!(result.valid, "no hit on page 99, every snippet is searched");
    assert_eq!(result.reason, VerifyReason::R052_EXACT_SUBSTRING);
}

/// Test a long quote anchored across snippet and snippets of one page
#[test]
fn test_long_quote_across_split_snippets() {
    let verifier = EvidenceVerifier::new();
    let passage = long_passage();

    // Split at line boundaries: join(" ") plus whitespace collapse
    // reassembles the normalized passage exactly
    let lines: Vec<&str> = passage.split_inclusive(". ").collect();
    let first: String = lines[..10].concat();
    let second: String = lines[10..20].concat();
    let third: String = lines[20..].concat();

    let mut split_hit = hit("KJK", 3, &first);
    split_hit.snippets = vec![second, third];

    let p = pack(
        vec![split_hit],
        vec![record("KJK-3-1", &passage, "KJK", 3)],
    );

    let result = verifier.verify(&Claim::new("the whole passage", vec!["KJK-3-1".into()]), &p);
    assert!(result.valid);
    assert_eq!(result.reason, VerifyReason::R053_ANCHORS_MATCHED);
}

/// Test OCR noise between anchors is tolerated, noise on two anchors is not
#[test]
fn test_ocr_noise_tolerance() {
    let verifier = EvidenceVerifier::new();
    let passage = long_passage();
    // 1229 normalized chars: anchors sit at 0..80, 574..654, 1149..1229

    // Noise in the gaps only
    let mut gappy = passage.clone();
    gappy.replace_range(300..320, "####################");
    gappy.replace_range(900..920, "####################");
    let p = pack(vec![hit("KJK", 3, &gappy)], vec![record("KJK-3-1", &passage, "KJK", 3)]);
    let result = verifier.verify(&Claim::new("noisy middle", vec!["KJK-3-1".into()]), &p);
    assert!(result.valid);
    assert_eq!(result.reason, VerifyReason::R053_ANCHORS_MATCHED);

    // Noise inside the middle anchor: two of three still land
    let mut one_dead = passage.clone();
    one_dead.replace_range(600..610, "##########");
    let p = pack(vec![hit("KJK", 3, &one_dead)], vec![record("KJK-3-1", &passage, "KJK", 3)]);
    assert!(verifier.verify(&Claim::new("one dead anchor", vec!["KJK-3-1".into()]), &p).valid);

    // Noise inside head and middle anchors: only the tail lands
    let mut two_dead = passage.clone();
    two_dead.replace_range(20..30, "##########");
    two_dead.replace_range(600..610, "##########");
    let p = pack(vec![hit("KJK", 3, &two_dead)], vec![record("KJK-3-1", &passage, "KJK", 3)]);
    let result = verifier.verify(&Claim::new("two dead anchors", vec!["KJK-3-1".into()]), &p);
    assert!(!result.valid);
    assert_eq!(result.reason, VerifyReason::R054_ANCHORS_MISSED);
}

/// Test a claim citing several records holds only if every citation does
#[test]
fn test_multi_citation_claim() {
    let verifier = EvidenceVerifier::new();
    let passage = long_passage();
    let mut page3 = hit("KJK", 3, "天の原ふりさけみれば春日なる三笠の山に出でし月かも");
    page3.snippets = vec![passage.clone()];

    let p = pack(
        vec![page3],
        vec![
            record("KJK-3-1", "天の原ふりさけみれば", "KJK", 3),
            record("KJK-3-2", &passage, "KJK", 3),
        ],
    );

    // Exact short quote plus anchored long quote: the anchored path names
    // the reason
    let both = Claim::new("short and long", vec!["KJK-3-1".into(), "KJK-3-2".into()]);
    let result = verifier.verify(&both, &p);
    assert!(result.valid);
    assert_eq!(result.reason, VerifyReason::R053_ANCHORS_MATCHED);

    // One unknown id poisons the whole claim and is named in the result
    let poisoned = Claim::new("one bad citation", vec!["KJK-3-1".into(), "GHOST-7".into()]);
    let result = verifier.verify(&poisoned, &p);
    assert!(!result.valid);
    assert_eq!(result.reason, VerifyReason::R051_RECORD_NOT_IN_PACK);
    assert_eq!(result.failed_id.as_deref(), Some("GHOST-7"));
}

/// Test filtering keeps surviving claims in their original order
#[test]
fn test_filter_preserves_order() {
    let verifier = EvidenceVerifier::new();
    let p = pack(
        vec![hit("KJK", 3, "天の原ふりさけみれば春日なる三笠の山に出でし月かも")],
        vec![
            record("KJK-3-1", "天の原", "KJK", 3),
            record("KJK-3-2", "三笠の山", "KJK", 3),
        ],
    );

    let claims = vec![
        Claim::new("first", vec!["KJK-3-1".into()]),
        Claim::new("fabricated", vec!["GHOST-1".into()]),
        Claim::new("second", vec!["KJK-3-2".into()]),
        Claim::new("uncited", vec![]),
        Claim::new("third", vec!["KJK-3-1".into(), "KJK-3-2".into()]),
    ];

    let kept = verifier.filter_valid(claims, &p);
    let texts: Vec<&str> = kept.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["first", "second", "third"]);
}
