//! Loop governor: watches the (axis, phase) signature for degeneration
//!
//! Repetition is corrected in two stages. Two identical signatures force a
//! jump to executive/R-OUT; three turns of introspective/L-IN convergence
//! enter the CENTER damping state, which holds until an explicit external
//! reset. The thresholds are frozen constants, not tunables.

use tracing::debug;

use crate::types::{CognitiveAxis, LoopReason, LoopState, Phase};
use crate::{CENTER_ENTRY_COUNT, LOOP_FORCE_COUNT};

/// What the governor wants done about the current signature run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopSignal {
    /// Nothing to correct
    None,
    /// Jump the session to the given axis/phase pair
    ForceTransition(CognitiveAxis, Phase),
    /// Enter the CENTER damping state
    EnterCenter,
}

/// Governor over signature repetition and CENTER damping
#[derive(Debug, Default)]
pub struct LoopGovernor;

impl LoopGovernor {
    /// Create new governor
    pub fn new() -> Self {
        Self
    }

    /// Record this turn's signature.
    ///
    /// Inside CENTER the count pins to 0 and the signature is recorded
    /// without leaving the damped state.
    pub fn observe(&self, state: &mut LoopState, axis: CognitiveAxis, phase: Phase) {
        let signature = (axis, phase);

        if state.in_center {
            state.consecutive_count = 0;
            state.signature = Some(signature);
            return;
        }

        if state.signature == Some(signature) {
            state.consecutive_count += 1;
        } else {
            state.signature = Some(signature);
            state.consecutive_count = 1;
        }
    }

    /// Decide whether the current run needs correction
    pub fn resolve(&self, state: &LoopState) -> (LoopSignal, LoopReason) {
        if state.in_center {
            return (LoopSignal::None, LoopReason::R031_CENTER_HOLDING);
        }

        let converging =
            state.signature == Some((CognitiveAxis::Introspective, Phase::LIn));

        if converging && state.consecutive_count >= CENTER_ENTRY_COUNT {
            debug!(
                count = state.consecutive_count,
                "introspective convergence, entering CENTER"
            );
            return (LoopSignal::EnterCenter, LoopReason::R033_CONVERGENCE_CENTER);
        }

        if state.consecutive_count >= LOOP_FORCE_COUNT {
            debug!(
                count = state.consecutive_count,
                "signature repeating, forcing executive/R-OUT"
            );
            return (
                LoopSignal::ForceTransition(CognitiveAxis::Executive, Phase::ROut),
                LoopReason::R032_FORCE_EXECUTIVE,
            );
        }

        (LoopSignal::None, LoopReason::R030_SIGNATURE_FLOWING)
    }

    /// Apply a CENTER entry, or perform the explicit external exit.
    ///
    /// `should_enter=false` on a damped state is the external reset; on an
    /// undamped state it is a no-op.
    pub fn update_center(&self, state: &mut LoopState, should_enter: bool) {
        if should_enter {
            state.in_center = true;
            state.consecutive_count = 0;
        } else if state.in_center {
            *state = LoopState::default();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
