//! Stance decisions: commit to an answer now, or ask first
//!
//! The governor's output is a GovernorDecision; the optional DetailBlock is
//! the diagnostic channel payload, rendered only when detail was requested.

use serde::{Deserialize, Serialize};

use crate::types::evidence::EvidenceHit;

/// The two stances a turn can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stance {
    /// Enough verified ground to commit now
    Answer,
    /// Ask a clarifying question before committing
    Ask,
}

impl Stance {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            Stance::Answer => "\x1b[32m", // Green
            Stance::Ask => "\x1b[33m",    // Yellow
        }
    }

    /// Get emoji for stance
    pub fn emoji(&self) -> &'static str {
        match self {
            Stance::Answer => "✅",
            Stance::Ask => "❓",
        }
    }
}

impl std::fmt::Display for Stance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stance::Answer => "ANSWER",
            Stance::Ask => "ASK",
        };
        write!(f, "{}", name)
    }
}

/// Reason codes for stance decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum GovernorReason {
    /// Caller picked a candidate by index, answer with it
    R040_MANUAL_SELECTION,
    /// Search returned nothing usable, ask for refinement
    R041_NO_EVIDENCE_FOUND,
    /// Search confidence below threshold, ask for a selection
    R042_LOW_CONFIDENCE,
    /// Confident evidence in hand, answer with the top candidate
    R043_CONFIDENT_EVIDENCE,
    /// Turn needs no evidence, answer directly
    R044_NO_EVIDENCE_NEEDED,
}

impl GovernorReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R040_MANUAL_SELECTION => "R040_MANUAL_SELECTION",
            Self::R041_NO_EVIDENCE_FOUND => "R041_NO_EVIDENCE_FOUND",
            Self::R042_LOW_CONFIDENCE => "R042_LOW_CONFIDENCE",
            Self::R043_CONFIDENT_EVIDENCE => "R043_CONFIDENT_EVIDENCE",
            Self::R044_NO_EVIDENCE_NEEDED => "R044_NO_EVIDENCE_NEEDED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R040_MANUAL_SELECTION => "Manual selection provided",
            Self::R041_NO_EVIDENCE_FOUND => "No evidence found",
            Self::R042_LOW_CONFIDENCE => "Evidence confidence too low",
            Self::R043_CONFIDENT_EVIDENCE => "Confident evidence available",
            Self::R044_NO_EVIDENCE_NEEDED => "No evidence needed",
        }
    }
}

impl std::fmt::Display for GovernorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// The stance governor's full output for one turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernorDecision {
    /// ANSWER or ASK
    pub stance: Stance,
    /// Which branch decided it
    pub reason: GovernorReason,
    /// Candidates carried downstream (citation or selection)
    pub candidates: Vec<EvidenceHit>,
    /// What the turn still needs before it can commit
    pub next_need: Vec<String>,
    /// Deterministic ASK fragment (refinement prompt or candidate listing)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl GovernorDecision {
    /// Create an ANSWER decision
    pub fn answer(reason: GovernorReason, candidates: Vec<EvidenceHit>) -> Self {
        Self {
            stance: Stance::Answer,
            reason,
            candidates,
            next_need: Vec::new(),
            prompt: None,
        }
    }

    /// Create an ASK decision with its prompt fragment
    pub fn ask(
        reason: GovernorReason,
        candidates: Vec<EvidenceHit>,
        prompt: impl Into<String>,
        next_need: Vec<String>,
    ) -> Self {
        Self {
            stance: Stance::Ask,
            reason,
            candidates,
            next_need,
            prompt: Some(prompt.into()),
        }
    }

    /// True when the turn commits to answering now
    pub fn is_answer(&self) -> bool {
        self.stance == Stance::Answer
    }
}

/// One cited record reference inside a detail block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitedRecord {
    /// Record id
    pub id: String,
    /// Record title
    pub title: String,
}

/// Diagnostic channel payload, emitted only when detail was requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailBlock {
    /// Document key of the grounding evidence
    pub doc: String,
    /// Page number of the grounding evidence
    pub page: u32,
    /// Shared id prefix of the cited records
    pub id_prefix: String,
    /// Pack was built from an estimated locator
    pub is_estimated: bool,
    /// Search confidence behind the decision
    pub confidence: f64,
    /// Records actually cited this turn
    pub cited: Vec<CitedRecord>,
}

impl DetailBlock {
    /// Render the #detail fragment for the diagnostic channel
    pub fn render(&self) -> String {
        let mut out = String::from("#detail\n");
        out.push_str(&format!("doc: {}\n", self.doc));
        out.push_str(&format!("page: {}\n", self.page));
        out.push_str(&format!("idPrefix: {}\n", self.id_prefix));
        out.push_str(&format!("estimated: {}\n", self.is_estimated));
        out.push_str(&format!("confidence: {:.2}\n", self.confidence));
        for record in &self.cited {
            out.push_str(&format!("- {}: {}\n", record.id, record.title));
        }
        out
    }
}

// =============================================================================
// TESTS
// =============================================================================
