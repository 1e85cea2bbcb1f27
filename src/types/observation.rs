//! Observation trace and circle: the composer's input and output
//!
//! The circle is the structured record handed to the external generator.
//! Its unresolved list is a dedicated non-empty type: the dialectic never
//! closes completely, and the type makes a fully-resolved circle
//! unrepresentable rather than merely discouraged.

use serde::{Deserialize, Serialize};

use crate::types::context::{CognitiveAxis, Phase};

/// The four canonical observation forms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TraceForm {
    /// Steady return, holding the subject in view
    Circle,
    /// Structure accumulating turn over turn
    Spiral,
    /// Receiving, letting the subject arrive
    Wave,
    /// Damped stillness, nothing forced
    Well,
}

impl TraceForm {
    /// Get emoji for form
    pub fn emoji(&self) -> &'static str {
        match self {
            TraceForm::Circle => "⭕",
            TraceForm::Spiral => "🌀",
            TraceForm::Wave => "🌊",
            TraceForm::Well => "⚫",
        }
    }
}

impl std::fmt::Display for TraceForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TraceForm::Circle => "CIRCLE",
            TraceForm::Spiral => "SPIRAL",
            TraceForm::Wave => "WAVE",
            TraceForm::Well => "WELL",
        };
        write!(f, "{}", name)
    }
}

/// Five booleans derived totally from (phase, in_center)
///
/// Outward phases rise, inward phases fall; left phases close, right
/// phases open. Each set flag yields one composer qualifier clause.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseFlags {
    pub rise: bool,
    pub fall: bool,
    pub open: bool,
    pub close: bool,
    pub center: bool,
}

impl PhaseFlags {
    /// Derive flags from the turn's phase and CENTER state
    pub fn from_phase(phase: Phase, in_center: bool) -> Self {
        let (rise, fall, open, close) = match phase {
            Phase::LIn => (false, true, false, true),
            Phase::LOut => (true, false, false, true),
            Phase::RIn => (false, true, true, false),
            Phase::ROut => (true, false, true, false),
        };
        Self {
            rise,
            fall,
            open,
            close,
            center: in_center,
        }
    }

    /// Number of set flags (0 to 5)
    pub fn active_count(&self) -> usize {
        [self.rise, self.fall, self.open, self.close, self.center]
            .iter()
            .filter(|&&flag| flag)
            .count()
    }
}

/// Opposing energy counts from the outward/inward vocabulary groups
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnergyBalance {
    /// Outward (fire) signal count
    pub fire: usize,
    /// Inward (water) signal count
    pub water: usize,
}

impl EnergyBalance {
    /// Create from raw counts
    pub fn new(fire: usize, water: usize) -> Self {
        Self { fire, water }
    }

    /// Signed balance: -1.0 (water dominant) to +1.0 (fire dominant),
    /// 0.0 when both counts are zero
    pub fn balance(&self) -> f64 {
        let total = self.fire + self.water;
        if total == 0 {
            return 0.0;
        }
        (self.fire as f64 - self.water as f64) / total as f64
    }

    /// True when |balance| reaches the given skew threshold
    pub fn is_skewed(&self, threshold: f64) -> bool {
        self.balance().abs() >= threshold
    }
}

/// One held opposition between two readings of the subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contradiction {
    /// The affirmative reading
    pub thesis: String,
    /// The opposing reading
    pub antithesis: String,
}

impl Contradiction {
    /// Create a contradiction pair
    pub fn new(thesis: impl Into<String>, antithesis: impl Into<String>) -> Self {
        Self {
            thesis: thesis.into(),
            antithesis: antithesis.into(),
        }
    }

    /// Render the pair as one held-open tension line
    pub fn render(&self) -> String {
        format!("{} vs {} unresolved", self.thesis, self.antithesis)
    }
}

/// Placeholder inserted when nothing else is left open
pub const UNRESOLVED_PLACEHOLDER: &str = "an unnamed tension remains in view";

/// Non-empty list of open tensions
///
/// The only constructor normalizes an empty input to the generic
/// placeholder, so a zero-length list cannot exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct Unresolved(Vec<String>);

impl Unresolved {
    /// Build the list, inserting the placeholder when items is empty
    pub fn new(items: Vec<String>) -> Self {
        let filtered: Vec<String> = items
            .into_iter()
            .filter(|item| !item.trim().is_empty())
            .collect();
        if filtered.is_empty() {
            Self(vec![UNRESOLVED_PLACEHOLDER.to_string()])
        } else {
            Self(filtered)
        }
    }

    /// The open tensions, oldest first
    pub fn items(&self) -> &[String] {
        &self.0
    }

    /// Number of open tensions, always >= 1
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; emptiness is unrepresentable
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Iterate the open tensions
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for Unresolved {
    fn from(items: Vec<String>) -> Self {
        Self::new(items)
    }
}

impl From<Unresolved> for Vec<String> {
    fn from(unresolved: Unresolved) -> Self {
        unresolved.0
    }
}

/// Everything the composer needs to shape one turn's observation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationTrace {
    /// Cognitive axis of the turn
    pub axis: CognitiveAxis,
    /// Phase of the turn
    pub phase: Phase,
    /// Canonical form derived from phase and energy
    pub form: TraceForm,
    /// Qualifier flags derived from phase and CENTER
    pub phase_flags: PhaseFlags,
    /// Opposing energy counts from the message
    pub energy: EnergyBalance,
    /// Oppositions held open this turn
    pub contradictions: Vec<Contradiction>,
    /// Tensions carried over from earlier turns
    pub carried_unresolved: Vec<String>,
    /// Record ids cited by the turn's verified claims
    pub evidence_ids: Vec<String>,
}

/// The structured observation handed to the external generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservationCircle {
    /// Base description plus qualifier and energy clauses
    pub description: String,
    /// Open tensions, never empty
    pub unresolved: Unresolved,
    /// Per-form suggestion for what to examine next
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus_hint: Option<String>,
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_flags_total_mapping() {
        let l_in = PhaseFlags::from_phase(Phase::LIn, false);
        assert!(l_in.fall && l_in.close && !l_in.rise && !l_in.open);

        let l_out = PhaseFlags::from_phase(Phase::LOut, false);
        assert!(l_out.rise && l_out.close && !l_out.fall && !l_out.open);

        let r_in = PhaseFlags::from_phase(Phase::RIn, false);
        assert!(r_in.fall && r_in.open && !r_in.rise && !r_in.close);

        let r_out = PhaseFlags::from_phase(Phase::ROut, false);
        assert!(r_out.rise && r_out.open && !r_out.fall && !r_out.close);
    }

    #[test]
    fn test_phase_flags_center_passthrough() {
        let flags = PhaseFlags::from_phase(Phase::LIn, true);
        assert!(flags.center);
        assert_eq!(flags.active_count(), 3);
    }

    #[test]
    fn test_energy_balance_zero_when_empty() {
        assert_eq!(EnergyBalance::new(0, 0).balance(), 0.0);
    }

    #[test]
    fn test_energy_balance_sign() {
        assert!(EnergyBalance::new(3, 1).balance() > 0.0);
        assert!(EnergyBalance::new(1, 3).balance() < 0.0);
        assert_eq!(EnergyBalance::new(2, 2).balance(), 0.0);
    }

    #[test]
    fn test_energy_skew_threshold() {
        // (4-1)/5 = 0.6
        assert!(EnergyBalance::new(4, 1).is_skewed(0.6));
        // (3-2)/5 = 0.2
        assert!(!EnergyBalance::new(3, 2).is_skewed(0.6));
    }

    #[test]
    fn test_unresolved_never_empty() {
        let unresolved = Unresolved::new(vec![]);
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved.items()[0], UNRESOLVED_PLACEHOLDER);
        assert!(!unresolved.is_empty());
    }

    #[test]
    fn test_unresolved_filters_blank_items() {
        let unresolved = Unresolved::new(vec!["  ".to_string(), "".to_string()]);
        assert_eq!(unresolved.items(), &[UNRESOLVED_PLACEHOLDER.to_string()]);
    }

    #[test]
    fn test_unresolved_keeps_real_items() {
        let unresolved = Unresolved::new(vec!["a vs b unresolved".to_string()]);
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved.items()[0], "a vs b unresolved");
    }

    #[test]
    fn test_unresolved_deserialize_restores_invariant() {
        // An empty array on the wire must still come back non-empty
        let unresolved: Unresolved = serde_json::from_str("[]").unwrap();
        assert_eq!(unresolved.len(), 1);
    }

    #[test]
    fn test_contradiction_render() {
        let c = Contradiction::new("the step is ready", "the ground is unverified");
        assert_eq!(
            c.render(),
            "the step is ready vs the ground is unverified unresolved"
        );
    }
}
