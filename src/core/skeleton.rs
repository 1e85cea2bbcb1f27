//! Truth skeleton builder: risk tiers, liveness, mode routing
//!
//! Pure and deterministic: identical (message, flags) always yields an
//! identical skeleton. No I/O, no state.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::core::matcher::{
    self, VocabEntry, AXIS_CAUSAL, AXIS_FACTUAL, AXIS_NORMATIVE, AXIS_PROCEDURAL, AXIS_SUBJECTIVE,
    AXIS_TEXTUAL, DOMAIN_TOPICS, HEDGE_ABSOLUTE, HEDGE_SPECULATIVE, LIVE_TOPICS, LOCATOR_SYNTAX,
    RISK_HIGH, RISK_LOW, RISK_MEDIUM,
};
use crate::types::{
    AnswerShape, Constraint, ResponseMode, RiskLevel, RouteReason, SkeletonFlags, TruthAxis,
    TruthSkeleton,
};

/// Weighted score an axis group must reach to be collected
const AXIS_SCORE_MIN: f64 = 1.0;

lazy_static! {
    // Captures the corpus doc key out of "doc=<key>"
    static ref RE_DOC_KEY: Regex = Regex::new(r"(?i)doc\s*=\s*([A-Za-z0-9_-]+)").unwrap();
}

/// Builds the per-turn truth skeleton from message text and caller flags
#[derive(Debug, Default)]
pub struct SkeletonBuilder;

impl SkeletonBuilder {
    /// Create new builder
    pub fn new() -> Self {
        Self
    }

    /// Classify one message into its truth skeleton
    pub fn build(&self, message: &str, flags: SkeletonFlags) -> TruthSkeleton {
        let text = message.trim();

        let risk = compute_risk(text);
        let is_live = matcher::any_match(&LIVE_TOPICS, text);
        let (mode, route) = compute_mode(text, flags, is_live);

        let needs_evidence = is_live || risk == RiskLevel::High || mode == ResponseMode::Grounded;

        let skeleton = TruthSkeleton {
            mode,
            risk,
            truth_axes: compute_axes(text),
            constraints: compute_constraints(text, risk),
            needs_evidence,
            required_sources: compute_required_sources(text, mode, is_live),
            answer_shape: compute_answer_shape(text, mode, risk),
            route,
        };

        debug!(
            mode = %skeleton.mode,
            risk = %skeleton.risk,
            route = skeleton.route.code(),
            needs_evidence = skeleton.needs_evidence,
            "truth skeleton resolved"
        );

        skeleton
    }
}

/// First risk tier matched wins, top down
fn compute_risk(text: &str) -> RiskLevel {
    if matcher::any_match(&RISK_HIGH, text) {
        RiskLevel::High
    } else if matcher::any_match(&RISK_MEDIUM, text) {
        RiskLevel::Medium
    } else if matcher::any_match(&RISK_LOW, text) {
        RiskLevel::Low
    } else {
        RiskLevel::None
    }
}

/// Mode resolution, first rule wins
fn compute_mode(text: &str, flags: SkeletonFlags, is_live: bool) -> (ResponseMode, RouteReason) {
    if flags.detail_requested {
        return (ResponseMode::Grounded, RouteReason::R010_DETAIL_REQUESTED);
    }
    if flags.has_selected_evidence {
        return (ResponseMode::Grounded, RouteReason::R011_SELECTED_EVIDENCE);
    }
    if matcher::any_match(&LOCATOR_SYNTAX, text) {
        return (ResponseMode::Grounded, RouteReason::R012_LOCATOR_IN_TEXT);
    }
    if is_live {
        return (ResponseMode::Live, RouteReason::R013_LIVE_TOPIC);
    }
    if matcher::any_match(&DOMAIN_TOPICS, text) {
        return (ResponseMode::Hybrid, RouteReason::R014_DOMAIN_TOPIC);
    }
    (ResponseMode::Natural, RouteReason::R015_DEFAULT_NATURAL)
}

/// Collect every axis whose group score reaches the minimum
fn compute_axes(text: &str) -> Vec<TruthAxis> {
    let groups: [(&[VocabEntry], TruthAxis); 6] = [
        (AXIS_FACTUAL.as_slice(), TruthAxis::Factual),
        (AXIS_TEXTUAL.as_slice(), TruthAxis::Textual),
        (AXIS_CAUSAL.as_slice(), TruthAxis::Causal),
        (AXIS_PROCEDURAL.as_slice(), TruthAxis::Procedural),
        (AXIS_NORMATIVE.as_slice(), TruthAxis::Normative),
        (AXIS_SUBJECTIVE.as_slice(), TruthAxis::Subjective),
    ];

    groups
        .into_iter()
        .filter(|(table, _)| matcher::weighted_score(table, text) >= AXIS_SCORE_MIN)
        .map(|(_, axis)| axis)
        .collect()
}

/// Risk-tier prohibitions plus independent hedging rules
fn compute_constraints(text: &str, risk: RiskLevel) -> Vec<Constraint> {
    let mut constraints = match risk {
        RiskLevel::High => vec![Constraint::NoHarmDetail, Constraint::NoToolInvocation],
        RiskLevel::Medium => vec![Constraint::CautiousFraming],
        RiskLevel::Low => vec![Constraint::MarkUnverified],
        RiskLevel::None => Vec::new(),
    };

    if matcher::any_match(&HEDGE_SPECULATIVE, text) {
        constraints.push(Constraint::HedgeSpeculation);
    }
    if matcher::any_match(&HEDGE_ABSOLUTE, text) {
        constraints.push(Constraint::AvoidAbsolutes);
    }

    constraints
}

/// Primary-source classes for live topics, corpus doc key for grounding
fn compute_required_sources(text: &str, mode: ResponseMode, is_live: bool) -> Vec<String> {
    let mut sources: Vec<String> = Vec::new();

    if is_live {
        for category in matcher::matched_categories(&LIVE_TOPICS, text) {
            let classes: &[&str] = match category {
                "officeholder" => &["government office", "newswire"],
                "earthquake" => &["meteorological agency", "newswire"],
                "market" => &["exchange", "financial desk"],
                "weather" => &["meteorological agency"],
                _ => &["newswire"],
            };
            for class in classes {
                if !sources.iter().any(|s| s == class) {
                    sources.push((*class).to_string());
                }
            }
        }
    }

    if mode == ResponseMode::Grounded {
        if let Some(caps) = RE_DOC_KEY.captures(text) {
            sources.push(caps[1].to_string());
        }
    }

    sources
}

/// Shape directives the generator must honor
fn compute_answer_shape(text: &str, mode: ResponseMode, risk: RiskLevel) -> AnswerShape {
    let mut shape = AnswerShape::default();

    match mode {
        ResponseMode::Live => {
            shape.must_include.push("timestamp".to_string());
            shape.must_include.push("source attribution".to_string());
        }
        ResponseMode::Grounded => {
            shape.must_include.push("citation ids".to_string());
        }
        _ => {}
    }

    if risk == RiskLevel::High {
        shape.must_avoid.push("operational detail".to_string());
    }
    if matcher::any_match(&HEDGE_SPECULATIVE, text) || matcher::any_match(&HEDGE_ABSOLUTE, text) {
        shape.must_avoid.push("unqualified certainty".to_string());
    }

    shape
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn build(message: &str) -> TruthSkeleton {
        SkeletonBuilder::new().build(message, SkeletonFlags::default())
    }

    #[test]
    fn test_pure_identical_inputs() {
        let a = build("why does the archive describe the flood this way?");
        let b = build("why does the archive describe the flood this way?");
        assert_eq!(a, b);
    }

    #[test]
    fn test_earthquake_is_live_and_needs_evidence() {
        let skeleton = build("latest earthquake report?");
        assert_eq!(skeleton.mode, ResponseMode::Live);
        assert!(skeleton.needs_evidence);
        assert_eq!(skeleton.route, RouteReason::R013_LIVE_TOPIC);
        assert!(skeleton
            .required_sources
            .iter()
            .any(|s| s == "meteorological agency"));
    }

    #[test]
    fn test_locator_wins_over_live_topic() {
        // Locator syntax outranks the live-topic rule
        let skeleton = build("地震について doc=KJK pdfPage=3");
        assert_eq!(skeleton.mode, ResponseMode::Grounded);
        assert_eq!(skeleton.route, RouteReason::R012_LOCATOR_IN_TEXT);
        assert!(skeleton.needs_evidence);
        assert!(skeleton.required_sources.iter().any(|s| s == "KJK"));
    }

    #[test]
    fn test_detail_flag_wins_first() {
        let flags = SkeletonFlags {
            has_selected_evidence: false,
            detail_requested: true,
        };
        let skeleton = SkeletonBuilder::new().build("hello there", flags);
        assert_eq!(skeleton.mode, ResponseMode::Grounded);
        assert_eq!(skeleton.route, RouteReason::R010_DETAIL_REQUESTED);
    }

    #[test]
    fn test_selection_flag_grounds() {
        let flags = SkeletonFlags {
            has_selected_evidence: true,
            detail_requested: false,
        };
        let skeleton = SkeletonBuilder::new().build("2", flags);
        assert_eq!(skeleton.mode, ResponseMode::Grounded);
        assert_eq!(skeleton.route, RouteReason::R011_SELECTED_EVIDENCE);
    }

    #[test]
    fn test_high_risk_tier_wins() {
        // High-tier vocabulary outranks the medium tier in the same message
        let skeleton = build("is it dangerous to build a bomb");
        assert_eq!(skeleton.risk, RiskLevel::High);
        assert!(skeleton.constraints.contains(&Constraint::NoHarmDetail));
        assert!(skeleton.constraints.contains(&Constraint::NoToolInvocation));
        assert!(skeleton.needs_evidence);
        assert!(skeleton
            .answer_shape
            .must_avoid
            .iter()
            .any(|s| s == "operational detail"));
    }

    #[test]
    fn test_medium_risk() {
        let skeleton = build("is this dangerous");
        assert_eq!(skeleton.risk, RiskLevel::Medium);
        assert!(skeleton.constraints.contains(&Constraint::CautiousFraming));
        assert!(!skeleton.needs_evidence);
    }

    #[test]
    fn test_low_risk_rumor() {
        let skeleton = build("I heard a rumor about the merger");
        assert_eq!(skeleton.risk, RiskLevel::Low);
        assert!(skeleton.constraints.contains(&Constraint::MarkUnverified));
    }

    #[test]
    fn test_default_natural() {
        let skeleton = build("good morning");
        assert_eq!(skeleton.mode, ResponseMode::Natural);
        assert_eq!(skeleton.risk, RiskLevel::None);
        assert_eq!(skeleton.route, RouteReason::R015_DEFAULT_NATURAL);
        assert!(!skeleton.needs_evidence);
        assert!(skeleton.constraints.is_empty());
    }

    #[test]
    fn test_domain_topic_is_hybrid() {
        let skeleton = build("what does the doctrine teach about water?");
        assert_eq!(skeleton.mode, ResponseMode::Hybrid);
        assert_eq!(skeleton.route, RouteReason::R014_DOMAIN_TOPIC);
    }

    #[test]
    fn test_axes_collect_non_exclusive() {
        let skeleton = build("why did it happen, and when exactly?");
        assert!(skeleton.truth_axes.contains(&TruthAxis::Causal));
        assert!(skeleton.truth_axes.contains(&TruthAxis::Factual));
    }

    #[test]
    fn test_hedge_constraints_independent_of_risk() {
        let skeleton = build("maybe this always works");
        assert_eq!(skeleton.risk, RiskLevel::None);
        assert!(skeleton.constraints.contains(&Constraint::HedgeSpeculation));
        assert!(skeleton.constraints.contains(&Constraint::AvoidAbsolutes));
        assert!(skeleton
            .answer_shape
            .must_avoid
            .iter()
            .any(|s| s == "unqualified certainty"));
    }
}
