//! Cognitive axis selection and the axis/phase lookup
//!
//! `next` runs a strict priority ladder over (persona, inertia, turn count);
//! `refine` applies keyword-driven adjustment afterwards. The axis/phase
//! mapping is total and bijective in both directions.

use tracing::debug;

use crate::core::matcher::{
    self, REFINE_CONFIRM, REFINE_EXECUTE, REFINE_OBSERVE, REFINE_REASONING, REFINE_RECONSIDER,
    REFINE_REVIEW, REFINE_STRUCTURE,
};
use crate::types::{AxisReason, CognitiveAxis, Inertia, PersonaMode, Phase};
use crate::{AXIS_BUILD_TURNS, AXIS_WARMUP_TURNS, INERTIA_CARRY_MIN, INERTIA_SILENT_MIN};

/// Total axis-to-phase lookup
pub fn axis_to_phase(axis: CognitiveAxis) -> Phase {
    match axis {
        CognitiveAxis::Introspective => Phase::LIn,
        CognitiveAxis::Observational => Phase::RIn,
        CognitiveAxis::Constructive => Phase::LOut,
        CognitiveAxis::Executive => Phase::ROut,
    }
}

/// Inverse of the axis-to-phase lookup
pub fn phase_to_axis(phase: Phase) -> CognitiveAxis {
    match phase {
        Phase::LIn => CognitiveAxis::Introspective,
        Phase::RIn => CognitiveAxis::Observational,
        Phase::LOut => CognitiveAxis::Constructive,
        Phase::ROut => CognitiveAxis::Executive,
    }
}

/// Selects the cognitive axis for each turn
#[derive(Debug, Default)]
pub struct AxisEngine;

impl AxisEngine {
    /// Create new engine
    pub fn new() -> Self {
        Self
    }

    /// Evaluate the priority ladder; the first rule that fires wins
    pub fn next(
        &self,
        persona_mode: PersonaMode,
        inertia: &Inertia,
        conversation_count: u32,
    ) -> (CognitiveAxis, AxisReason) {
        let (axis, reason) = if conversation_count < AXIS_WARMUP_TURNS {
            (
                CognitiveAxis::Observational,
                AxisReason::R020_WARMUP_OBSERVATIONAL,
            )
        } else if persona_mode == PersonaMode::Silent {
            (
                CognitiveAxis::Introspective,
                AxisReason::R021_SILENT_INTROSPECTIVE,
            )
        } else if inertia.carries(PersonaMode::Silent, INERTIA_SILENT_MIN) {
            (
                CognitiveAxis::Introspective,
                AxisReason::R022_SILENT_INERTIA_CARRY,
            )
        } else if persona_mode == PersonaMode::Thinking {
            (
                CognitiveAxis::Introspective,
                AxisReason::R023_THINKING_INTROSPECTIVE,
            )
        } else if inertia.carries(PersonaMode::Thinking, INERTIA_CARRY_MIN) {
            (
                CognitiveAxis::Introspective,
                AxisReason::R024_THINKING_INERTIA_CARRY,
            )
        } else if persona_mode == PersonaMode::Engaged {
            (CognitiveAxis::Executive, AxisReason::R025_ENGAGED_EXECUTIVE)
        } else if inertia.carries(PersonaMode::Engaged, INERTIA_CARRY_MIN) {
            (
                CognitiveAxis::Executive,
                AxisReason::R026_ENGAGED_INERTIA_CARRY,
            )
        } else if conversation_count >= AXIS_BUILD_TURNS {
            (
                CognitiveAxis::Constructive,
                AxisReason::R027_LONG_RUN_CONSTRUCTIVE,
            )
        } else {
            (
                CognitiveAxis::Observational,
                AxisReason::R028_DEFAULT_OBSERVATIONAL,
            )
        };

        debug!(axis = axis.alias(), reason = reason.code(), "axis selected");
        (axis, reason)
    }

    /// Keyword-driven adjustment after `next`; default is to stay put.
    ///
    /// Observational can only deepen into introspective here, never jump
    /// straight to executive.
    pub fn refine(&self, axis: CognitiveAxis, message: &str) -> CognitiveAxis {
        let refined = match axis {
            CognitiveAxis::Observational => {
                if matcher::any_match(&REFINE_REASONING, message) {
                    CognitiveAxis::Introspective
                } else {
                    axis
                }
            }
            CognitiveAxis::Introspective => {
                if matcher::any_match(&REFINE_STRUCTURE, message) {
                    CognitiveAxis::Constructive
                } else if matcher::any_match(&REFINE_OBSERVE, message) {
                    CognitiveAxis::Observational
                } else {
                    axis
                }
            }
            CognitiveAxis::Constructive => {
                if matcher::any_match(&REFINE_EXECUTE, message) {
                    CognitiveAxis::Executive
                } else if matcher::any_match(&REFINE_RECONSIDER, message) {
                    CognitiveAxis::Introspective
                } else {
                    axis
                }
            }
            CognitiveAxis::Executive => {
                if matcher::any_match(&REFINE_CONFIRM, message) {
                    CognitiveAxis::Observational
                } else if matcher::any_match(&REFINE_REVIEW, message) {
                    CognitiveAxis::Introspective
                } else {
                    axis
                }
            }
        };

        if refined != axis {
            debug!(
                from = axis.alias(),
                to = refined.alias(),
                "axis refined by message keywords"
            );
        }
        refined
    }
}

// =============================================================================
// TESTS
// =============================================================================
