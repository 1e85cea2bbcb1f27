//! Truth skeleton: per-turn response mode, risk and constraint classification
//!
//! The skeleton is derived purely from message text plus two caller flags.
//! It never changes after construction; downstream stages only read it.

use serde::{Deserialize, Serialize};

/// The four response modes a turn can resolve to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseMode {
    /// Free conversation, no evidence channel
    Natural,
    /// Corpus-domain topic, evidence optional
    Hybrid,
    /// Explicit document grounding requested
    Grounded,
    /// Real-time topic, fresh primary sources required
    Live,
}

impl ResponseMode {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            ResponseMode::Natural => "\x1b[32m",  // Green
            ResponseMode::Hybrid => "\x1b[36m",   // Cyan
            ResponseMode::Grounded => "\x1b[34m", // Blue
            ResponseMode::Live => "\x1b[33m",     // Yellow
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }

    /// Get emoji for mode
    pub fn emoji(&self) -> &'static str {
        match self {
            ResponseMode::Natural => "🍃",
            ResponseMode::Hybrid => "🔀",
            ResponseMode::Grounded => "📚",
            ResponseMode::Live => "📡",
        }
    }
}

impl std::fmt::Display for ResponseMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ResponseMode::Natural => "NATURAL",
            ResponseMode::Hybrid => "HYBRID",
            ResponseMode::Grounded => "GROUNDED",
            ResponseMode::Live => "LIVE",
        };
        write!(f, "{}", name)
    }
}

/// Risk tier of the message, ordered from harmless to hard-refuse
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// No risk vocabulary matched
    None,
    /// Rumor / unverified-claim vocabulary
    Low,
    /// Generic danger or violation vocabulary
    Medium,
    /// Self-harm, violence, crime, hate, weapons or drugs vocabulary
    High,
}

impl RiskLevel {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            RiskLevel::None => "\x1b[90m",   // Gray
            RiskLevel::Low => "\x1b[36m",    // Cyan
            RiskLevel::Medium => "\x1b[33m", // Yellow
            RiskLevel::High => "\x1b[31m",   // Red
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RiskLevel::None => "none",
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        };
        write!(f, "{}", name)
    }
}

/// Topical truth axes; independent groups, all matches collected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruthAxis {
    /// Dates, counts, names, events
    Factual,
    /// What a source document says
    Textual,
    /// Why, mechanism, reasoning
    Causal,
    /// How to, steps, methods
    Procedural,
    /// Should / ought judgments
    Normative,
    /// Feelings, impressions, preference
    Subjective,
}

impl std::fmt::Display for TruthAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TruthAxis::Factual => "factual",
            TruthAxis::Textual => "textual",
            TruthAxis::Causal => "causal",
            TruthAxis::Procedural => "procedural",
            TruthAxis::Normative => "normative",
            TruthAxis::Subjective => "subjective",
        };
        write!(f, "{}", name)
    }
}

/// Behavioral constraints the skeleton attaches to the turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Constraint {
    /// High risk: never provide operational harm detail
    NoHarmDetail,
    /// High risk: never invoke external tools for the request
    NoToolInvocation,
    /// Medium risk: keep framing cautious
    CautiousFraming,
    /// Low risk: label unverified claims as such
    MarkUnverified,
    /// Message uses speculative language, hedge accordingly
    HedgeSpeculation,
    /// Message uses absolute language, avoid mirroring it
    AvoidAbsolutes,
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Constraint::NoHarmDetail => "NO_HARM_DETAIL",
            Constraint::NoToolInvocation => "NO_TOOL_INVOCATION",
            Constraint::CautiousFraming => "CAUTIOUS_FRAMING",
            Constraint::MarkUnverified => "MARK_UNVERIFIED",
            Constraint::HedgeSpeculation => "HEDGE_SPECULATION",
            Constraint::AvoidAbsolutes => "AVOID_ABSOLUTES",
        };
        write!(f, "{}", name)
    }
}

/// Reason codes for mode resolution (first rule that fired)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum RouteReason {
    /// Detail flag set, evidence channel must open
    R010_DETAIL_REQUESTED,
    /// Caller supplied a manually selected evidence record
    R011_SELECTED_EVIDENCE,
    /// Message carries explicit doc/page locator syntax
    R012_LOCATOR_IN_TEXT,
    /// Real-time topic vocabulary matched
    R013_LIVE_TOPIC,
    /// Corpus-domain vocabulary matched
    R014_DOMAIN_TOPIC,
    /// Nothing matched, free conversation
    R015_DEFAULT_NATURAL,
}

impl RouteReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R010_DETAIL_REQUESTED => "R010_DETAIL_REQUESTED",
            Self::R011_SELECTED_EVIDENCE => "R011_SELECTED_EVIDENCE",
            Self::R012_LOCATOR_IN_TEXT => "R012_LOCATOR_IN_TEXT",
            Self::R013_LIVE_TOPIC => "R013_LIVE_TOPIC",
            Self::R014_DOMAIN_TOPIC => "R014_DOMAIN_TOPIC",
            Self::R015_DEFAULT_NATURAL => "R015_DEFAULT_NATURAL",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R010_DETAIL_REQUESTED => "Detail requested, grounding",
            Self::R011_SELECTED_EVIDENCE => "Manual selection, grounding",
            Self::R012_LOCATOR_IN_TEXT => "Locator syntax, grounding",
            Self::R013_LIVE_TOPIC => "Live topic detected",
            Self::R014_DOMAIN_TOPIC => "Corpus domain topic",
            Self::R015_DEFAULT_NATURAL => "Default natural conversation",
        }
    }
}

impl std::fmt::Display for RouteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Shape requirements the downstream generator must honor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerShape {
    /// Elements the answer must contain (timestamps, citations, ...)
    pub must_include: Vec<String>,
    /// Elements the answer must not contain
    pub must_avoid: Vec<String>,
}

/// Caller-supplied flags feeding mode resolution
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SkeletonFlags {
    /// A previously listed candidate was picked by index
    pub has_selected_evidence: bool,
    /// The message asked for the diagnostic detail block
    pub detail_requested: bool,
}

/// Per-turn classification of how the turn must be answered
///
/// Built once per turn from (message, flags); immutable afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TruthSkeleton {
    /// Resolved response mode
    pub mode: ResponseMode,
    /// Resolved risk tier
    pub risk: RiskLevel,
    /// All topical axes that matched (non-exclusive)
    pub truth_axes: Vec<TruthAxis>,
    /// Behavioral constraints for the turn
    pub constraints: Vec<Constraint>,
    /// Whether the turn may not be answered without verified evidence
    pub needs_evidence: bool,
    /// Source classes (LIVE) or corpus doc keys (GROUNDED) to consult
    pub required_sources: Vec<String>,
    /// Shape requirements for the generator
    pub answer_shape: AnswerShape,
    /// Which mode-resolution rule fired
    pub route: RouteReason,
}

// =============================================================================
// TESTS
// =============================================================================
