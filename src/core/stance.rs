//! Stance governor: commit to an answer now, or ask first
//!
//! Branches are evaluated in order, first match wins:
//! 1. manual selection  => ANSWER with that candidate
//! 2. no pack / no hits => ASK for a source hint or sharper keywords
//! 3. low confidence    => ASK with a numbered candidate listing
//! 4. otherwise         => ANSWER with the top candidate
//!
//! A bare 1-2 digit reply to a candidate listing re-enters the next turn
//! as a manual selection.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::types::{EvidenceHit, EvidencePack, GovernorDecision, GovernorReason, ResponseMode};
use crate::{CONFIDENCE_FLOOR, MAX_CARRIED_CANDIDATES, MAX_LISTED_CANDIDATES};

/// Characters of the message echoed back in ASK prompts
const PROMPT_ECHO_CHARS: usize = 40;

/// Characters of snippet shown per listed candidate
const SNIPPET_CLIP_CHARS: usize = 100;

lazy_static! {
    /// A reply that selects a listed candidate: bare 1-2 digit number
    static ref RE_BARE_INDEX: Regex = Regex::new(r"^\d{1,2}$").unwrap();
}

/// Decides ANSWER vs ASK from the evidence search outcome
#[derive(Debug, Default)]
pub struct StanceGovernor;

impl StanceGovernor {
    /// Create new governor
    pub fn new() -> Self {
        Self
    }

    /// Decide the stance for one turn
    pub fn decide(
        &self,
        message: &str,
        mode: ResponseMode,
        pack: Option<&EvidencePack>,
        manual_selection: Option<&EvidenceHit>,
    ) -> GovernorDecision {
        if let Some(hit) = manual_selection {
            debug!(
                doc = hit.doc_id.as_str(),
                page = hit.page_id,
                "stance: manual selection"
            );
            return GovernorDecision::answer(
                GovernorReason::R040_MANUAL_SELECTION,
                vec![hit.clone()],
            );
        }

        let pack = match pack {
            Some(pack) if !pack.hits.is_empty() => pack,
            _ => {
                debug!("stance: no evidence, asking for refinement");
                return GovernorDecision::ask(
                    GovernorReason::R041_NO_EVIDENCE_FOUND,
                    Vec::new(),
                    zero_hit_prompt(message, mode),
                    vec!["source hint".to_string(), "keyword refinement".to_string()],
                );
            }
        };

        if pack.confidence < CONFIDENCE_FLOOR {
            debug!(
                confidence = pack.confidence,
                hits = pack.hits.len(),
                "stance: low confidence, listing candidates"
            );
            let carried: Vec<EvidenceHit> = pack
                .hits
                .iter()
                .take(MAX_CARRIED_CANDIDATES)
                .cloned()
                .collect();
            return GovernorDecision::ask(
                GovernorReason::R042_LOW_CONFIDENCE,
                carried,
                low_confidence_prompt(message, pack),
                vec!["candidate selection".to_string()],
            );
        }

        debug!(
            confidence = pack.confidence,
            hits = pack.hits.len(),
            "stance: confident evidence, answering"
        );
        let carried: Vec<EvidenceHit> = pack
            .hits
            .iter()
            .take(MAX_CARRIED_CANDIDATES)
            .cloned()
            .collect();
        GovernorDecision::answer(GovernorReason::R043_CONFIDENT_EVIDENCE, carried)
    }

    /// ANSWER decision for turns that need no evidence at all; the
    /// pipeline calls this instead of `decide`
    pub fn direct_answer(&self) -> GovernorDecision {
        GovernorDecision::answer(GovernorReason::R044_NO_EVIDENCE_NEEDED, Vec::new())
    }

    /// Resolve a reply to the previous ASK's candidate listing.
    ///
    /// Only a bare 1-2 digit number selects; the index is 1-based.
    /// Anything else (words, out-of-range numbers, "2)" and friends)
    /// selects nothing and the reply flows on as an ordinary message.
    pub fn parse_selection<'a>(
        &self,
        reply: &str,
        candidates: &'a [EvidenceHit],
    ) -> Option<&'a EvidenceHit> {
        let trimmed = reply.trim();
        if !RE_BARE_INDEX.is_match(trimmed) {
            return None;
        }
        let index: usize = trimmed.parse().ok()?;
        if index == 0 || index > candidates.len() {
            return None;
        }
        Some(&candidates[index - 1])
    }
}

/// ASK prompt when search came back empty
fn zero_hit_prompt(message: &str, mode: ResponseMode) -> String {
    let echo = clip_chars(message, PROMPT_ECHO_CHARS);
    match mode {
        ResponseMode::Live => format!(
            "No live source confirms 「{}」 yet. Name an outlet or sharpen the keywords.",
            echo
        ),
        _ => format!(
            "No usable evidence for 「{}」. Name a source document (doc=...) or sharpen the keywords.",
            echo
        ),
    }
}

/// ASK prompt listing the closest candidates for selection by number
fn low_confidence_prompt(message: &str, pack: &EvidencePack) -> String {
    let echo = clip_chars(message, PROMPT_ECHO_CHARS);
    let listing: Vec<String> = pack
        .hits
        .iter()
        .take(MAX_LISTED_CANDIDATES)
        .enumerate()
        .map(|(i, hit)| {
            format!(
                "{}. {} P{} ({:.2}): {}…",
                i + 1,
                hit.doc_id,
                hit.page_id,
                hit.score,
                clip_chars(&hit.snippet, SNIPPET_CLIP_CHARS)
            )
        })
        .collect();
    format!(
        "Evidence for 「{}」 is inconclusive (confidence {:.2}). Closest passages:\n\n{}\n\nReply with a number to choose one.",
        echo,
        pack.confidence,
        listing.join("\n")
    )
}

/// Clip a string to at most `max` characters
fn clip_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

// =============================================================================
// TESTS
// =============================================================================
