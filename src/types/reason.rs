//! Reason codes for axis selection and loop governance
//!
//! Every state decision carries the R-code of the rule that fired, so a
//! session trace can be replayed and audited without re-running the engines.

use serde::{Deserialize, Serialize};

/// Reason codes for cognitive axis selection
///
/// One code per priority rule in the axis transition function; the code
/// names exactly which rule won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum AxisReason {
    // =========================================================================
    // R020: Warmup
    // =========================================================================
    /// Fewer than 5 turns, session still warming up
    R020_WARMUP_OBSERVATIONAL,

    // =========================================================================
    // R021-R022: Silent persona
    // =========================================================================
    /// Persona is silent right now
    R021_SILENT_INTROSPECTIVE,
    /// Silent persona recently departed, inertia >= 0.5 still carries it
    R022_SILENT_INERTIA_CARRY,

    // =========================================================================
    // R023-R024: Thinking persona
    // =========================================================================
    /// Persona is thinking right now
    R023_THINKING_INTROSPECTIVE,
    /// Thinking persona recently departed, inertia >= 0.4 still carries it
    R024_THINKING_INERTIA_CARRY,

    // =========================================================================
    // R025-R026: Engaged persona
    // =========================================================================
    /// Persona is engaged right now
    R025_ENGAGED_EXECUTIVE,
    /// Engaged persona recently departed, inertia >= 0.4 still carries it
    R026_ENGAGED_INERTIA_CARRY,

    // =========================================================================
    // R027-R028: Long-run and default
    // =========================================================================
    /// 20+ turns accumulated, shift to building
    R027_LONG_RUN_CONSTRUCTIVE,
    /// No rule fired, observational fallback
    R028_DEFAULT_OBSERVATIONAL,
}

impl AxisReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R020_WARMUP_OBSERVATIONAL => "R020_WARMUP_OBSERVATIONAL",
            Self::R021_SILENT_INTROSPECTIVE => "R021_SILENT_INTROSPECTIVE",
            Self::R022_SILENT_INERTIA_CARRY => "R022_SILENT_INERTIA_CARRY",
            Self::R023_THINKING_INTROSPECTIVE => "R023_THINKING_INTROSPECTIVE",
            Self::R024_THINKING_INERTIA_CARRY => "R024_THINKING_INERTIA_CARRY",
            Self::R025_ENGAGED_EXECUTIVE => "R025_ENGAGED_EXECUTIVE",
            Self::R026_ENGAGED_INERTIA_CARRY => "R026_ENGAGED_INERTIA_CARRY",
            Self::R027_LONG_RUN_CONSTRUCTIVE => "R027_LONG_RUN_CONSTRUCTIVE",
            Self::R028_DEFAULT_OBSERVATIONAL => "R028_DEFAULT_OBSERVATIONAL",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R020_WARMUP_OBSERVATIONAL => "Warmup, observing first",
            Self::R021_SILENT_INTROSPECTIVE => "Silent persona, turning inward",
            Self::R022_SILENT_INERTIA_CARRY => "Silent inertia still active",
            Self::R023_THINKING_INTROSPECTIVE => "Thinking persona, turning inward",
            Self::R024_THINKING_INERTIA_CARRY => "Thinking inertia still active",
            Self::R025_ENGAGED_EXECUTIVE => "Engaged persona, acting",
            Self::R026_ENGAGED_INERTIA_CARRY => "Engaged inertia still active",
            Self::R027_LONG_RUN_CONSTRUCTIVE => "Long run, shifting to building",
            Self::R028_DEFAULT_OBSERVATIONAL => "Default observational stance",
        }
    }
}

impl std::fmt::Display for AxisReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// Reason codes for loop governance decisions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum LoopReason {
    // =========================================================================
    // R030-R031: No forcing
    // =========================================================================
    /// Signature still varying, nothing to correct
    R030_SIGNATURE_FLOWING,
    /// CENTER active, all forcing suppressed until external reset
    R031_CENTER_HOLDING,

    // =========================================================================
    // R032-R033: Anti-degeneracy corrections
    // =========================================================================
    /// Same signature twice, forcing a jump to executive/R-OUT
    R032_FORCE_EXECUTIVE,
    /// Introspective/L-IN convergence held 3 turns, entering CENTER
    R033_CONVERGENCE_CENTER,

    // =========================================================================
    // R034: Integrity damping
    // =========================================================================
    /// CENTER forced by a frozen-config integrity violation, not repetition
    R034_INTEGRITY_CENTER,
}

impl LoopReason {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R030_SIGNATURE_FLOWING => "R030_SIGNATURE_FLOWING",
            Self::R031_CENTER_HOLDING => "R031_CENTER_HOLDING",
            Self::R032_FORCE_EXECUTIVE => "R032_FORCE_EXECUTIVE",
            Self::R033_CONVERGENCE_CENTER => "R033_CONVERGENCE_CENTER",
            Self::R034_INTEGRITY_CENTER => "R034_INTEGRITY_CENTER",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R030_SIGNATURE_FLOWING => "Signature varying normally",
            Self::R031_CENTER_HOLDING => "CENTER damping active",
            Self::R032_FORCE_EXECUTIVE => "Repetition, forcing executive",
            Self::R033_CONVERGENCE_CENTER => "Convergence, entering CENTER",
            Self::R034_INTEGRITY_CENTER => "Integrity violation, entering CENTER",
        }
    }
}

impl std::fmt::Display for LoopReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
