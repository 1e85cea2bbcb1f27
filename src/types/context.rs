//! Conversation state: persona, inertia, cognitive axis/phase, loop tracking
//!
//! One ConversationContext exists per session, exclusively owned by it,
//! mutated exactly once per turn. Persistence belongs to the external store;
//! this module only defines the in-memory shape.

use serde::{Deserialize, Serialize};

/// Inertia level recorded when a persona mode is departed
pub const INERTIA_ON_TRANSITION: f64 = 0.8;

/// Inertia decay per turn
pub const INERTIA_DECAY_STEP: f64 = 0.1;

/// Persona mode reported by the outer presence layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaMode {
    /// No strong presence signal
    Neutral,
    /// Withdrawn, minimal output expected
    Silent,
    /// Deliberating, slow careful output expected
    Thinking,
    /// Actively driving the exchange
    Engaged,
}

impl Default for PersonaMode {
    fn default() -> Self {
        PersonaMode::Neutral
    }
}

impl std::fmt::Display for PersonaMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PersonaMode::Neutral => "neutral",
            PersonaMode::Silent => "silent",
            PersonaMode::Thinking => "thinking",
            PersonaMode::Engaged => "engaged",
        };
        write!(f, "{}", name)
    }
}

impl std::str::FromStr for PersonaMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "neutral" => Ok(PersonaMode::Neutral),
            "silent" => Ok(PersonaMode::Silent),
            "thinking" => Ok(PersonaMode::Thinking),
            "engaged" => Ok(PersonaMode::Engaged),
            other => Err(format!("unknown persona mode: {}", other)),
        }
    }
}

/// Carry-over weight of a recently departed persona mode
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Inertia {
    /// The mode that was departed, if any
    pub last_mode: Option<PersonaMode>,
    /// Carry strength, 0.0 (gone) to 1.0
    pub level: f64,
}

impl Inertia {
    /// Record a departed mode at the standard carry strength
    pub fn record_transition(&mut self, departed: PersonaMode) {
        self.last_mode = Some(departed);
        self.level = INERTIA_ON_TRANSITION;
    }

    /// Lower carry strength by one turn's decay, floored at zero
    pub fn decay(&mut self) {
        self.level = (self.level - INERTIA_DECAY_STEP).max(0.0);
    }

    /// True when a given mode still carries at or above a threshold
    pub fn carries(&self, mode: PersonaMode, min_level: f64) -> bool {
        self.last_mode == Some(mode) && self.level >= min_level
    }
}

/// The four cognitive axes the session can move between
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CognitiveAxis {
    /// Turned inward, examining
    Introspective,
    /// Turned outward, watching
    Observational,
    /// Assembling structure
    Constructive,
    /// Committing to action
    Executive,
}

impl CognitiveAxis {
    /// Short alias used in logs and the CLI
    pub fn alias(&self) -> &'static str {
        match self {
            CognitiveAxis::Introspective => "reflect",
            CognitiveAxis::Observational => "observe",
            CognitiveAxis::Constructive => "build",
            CognitiveAxis::Executive => "act",
        }
    }

    /// Resolve an alias back to its axis
    pub fn from_alias(alias: &str) -> Option<Self> {
        match alias {
            "reflect" => Some(CognitiveAxis::Introspective),
            "observe" => Some(CognitiveAxis::Observational),
            "build" => Some(CognitiveAxis::Constructive),
            "act" => Some(CognitiveAxis::Executive),
            _ => None,
        }
    }
}

impl std::fmt::Display for CognitiveAxis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CognitiveAxis::Introspective => "introspective",
            CognitiveAxis::Observational => "observational",
            CognitiveAxis::Constructive => "constructive",
            CognitiveAxis::Executive => "executive",
        };
        write!(f, "{}", name)
    }
}

/// The four phases, left/right crossed with inward/outward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Left-inward: examining, closing
    #[serde(rename = "L-IN")]
    LIn,
    /// Right-inward: receiving, open
    #[serde(rename = "R-IN")]
    RIn,
    /// Left-outward: structuring, closing
    #[serde(rename = "L-OUT")]
    LOut,
    /// Right-outward: expressing, open
    #[serde(rename = "R-OUT")]
    ROut,
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Phase::LIn => "L-IN",
            Phase::RIn => "R-IN",
            Phase::LOut => "L-OUT",
            Phase::ROut => "R-OUT",
        };
        write!(f, "{}", name)
    }
}

/// A loop signature: the (axis, phase) pair a turn landed on
pub type Signature = (CognitiveAxis, Phase);

/// Tracks signature repetition and the CENTER damping state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoopState {
    /// Last observed signature, None before the first turn
    pub signature: Option<Signature>,
    /// Consecutive turns the signature has held
    pub consecutive_count: u32,
    /// CENTER damping active; exits only via explicit external reset
    pub in_center: bool,
}

/// Per-session conversation state, mutated once per turn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationContext {
    /// Persona mode reported for the current turn
    pub persona_mode: PersonaMode,
    /// Carry-over from recently departed persona modes
    pub inertia: Inertia,
    /// Turns elapsed in this session
    pub conversation_count: u32,
    /// Cognitive axis resolved for the latest turn
    pub cognitive_axis: CognitiveAxis,
    /// Phase resolved for the latest turn
    pub phase: Phase,
    /// Repetition tracking and CENTER damping
    pub loop_state: LoopState,
}

impl ConversationContext {
    /// Fresh session state: neutral persona, observational warmup
    pub fn new() -> Self {
        Self {
            persona_mode: PersonaMode::Neutral,
            inertia: Inertia::default(),
            conversation_count: 0,
            cognitive_axis: CognitiveAxis::Observational,
            phase: Phase::RIn,
            loop_state: LoopState::default(),
        }
    }

    /// Change persona mode, recording inertia for the departed mode.
    ///
    /// A no-op when the mode is unchanged, so callers can set it every
    /// turn without spurious inertia.
    pub fn switch_persona(&mut self, mode: PersonaMode) {
        if mode != self.persona_mode {
            self.inertia.record_transition(self.persona_mode);
            self.persona_mode = mode;
        }
    }

    /// Explicit external reset out of CENTER damping
    pub fn reset_center(&mut self) {
        self.loop_state = LoopState::default();
    }
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_serializes_with_hyphen() {
        assert_eq!(serde_json::to_string(&Phase::LIn).unwrap(), "\"L-IN\"");
        assert_eq!(serde_json::to_string(&Phase::ROut).unwrap(), "\"R-OUT\"");
    }

    #[test]
    fn test_phase_round_trip() {
        for phase in [Phase::LIn, Phase::RIn, Phase::LOut, Phase::ROut] {
            let json = serde_json::to_string(&phase).unwrap();
            let back: Phase = serde_json::from_str(&json).unwrap();
            assert_eq!(phase, back);
        }
    }

    #[test]
    fn test_axis_alias_round_trip() {
        for axis in [
            CognitiveAxis::Introspective,
            CognitiveAxis::Observational,
            CognitiveAxis::Constructive,
            CognitiveAxis::Executive,
        ] {
            assert_eq!(CognitiveAxis::from_alias(axis.alias()), Some(axis));
        }
        assert_eq!(CognitiveAxis::from_alias("nonsense"), None);
    }

    #[test]
    fn test_inertia_record_and_decay() {
        let mut inertia = Inertia::default();
        inertia.record_transition(PersonaMode::Thinking);
        assert_eq!(inertia.last_mode, Some(PersonaMode::Thinking));
        assert!((inertia.level - 0.8).abs() < 1e-9);

        inertia.decay();
        assert!((inertia.level - 0.7).abs() < 1e-9);

        // Floor at zero
        for _ in 0..20 {
            inertia.decay();
        }
        assert_eq!(inertia.level, 0.0);
    }

    #[test]
    fn test_inertia_carries() {
        let mut inertia = Inertia::default();
        inertia.record_transition(PersonaMode::Silent);
        assert!(inertia.carries(PersonaMode::Silent, 0.5));
        assert!(!inertia.carries(PersonaMode::Engaged, 0.5));

        inertia.decay();
        inertia.decay();
        inertia.decay();
        inertia.decay();
        // 0.8 - 0.4 = 0.4, below the silent threshold
        assert!(!inertia.carries(PersonaMode::Silent, 0.5));
        assert!(inertia.carries(PersonaMode::Silent, 0.4));
    }

    #[test]
    fn test_switch_persona_records_departed_mode() {
        let mut ctx = ConversationContext::new();
        ctx.switch_persona(PersonaMode::Engaged);
        assert_eq!(ctx.persona_mode, PersonaMode::Engaged);
        assert_eq!(ctx.inertia.last_mode, Some(PersonaMode::Neutral));
        assert!((ctx.inertia.level - 0.8).abs() < 1e-9);

        // Setting the same mode again leaves inertia untouched
        ctx.inertia.decay();
        ctx.switch_persona(PersonaMode::Engaged);
        assert!((ctx.inertia.level - 0.7).abs() < 1e-9);
        assert_eq!(ctx.inertia.last_mode, Some(PersonaMode::Neutral));
    }

    #[test]
    fn test_new_context_defaults() {
        let ctx = ConversationContext::new();
        assert_eq!(ctx.persona_mode, PersonaMode::Neutral);
        assert_eq!(ctx.conversation_count, 0);
        assert_eq!(ctx.cognitive_axis, CognitiveAxis::Observational);
        assert_eq!(ctx.phase, Phase::RIn);
        assert!(!ctx.loop_state.in_center);
        assert_eq!(ctx.loop_state.consecutive_count, 0);
    }

    #[test]
    fn test_reset_center_clears_damping() {
        let mut ctx = ConversationContext::new();
        ctx.loop_state.in_center = true;
        ctx.loop_state.consecutive_count = 0;
        ctx.loop_state.signature = Some((CognitiveAxis::Introspective, Phase::LIn));

        ctx.reset_center();
        assert!(!ctx.loop_state.in_center);
        assert_eq!(ctx.loop_state.signature, None);
    }
}
