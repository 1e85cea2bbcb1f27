//! Gyre-0: per-turn decision core for conversational systems
//!
//! message → truth skeleton → axis/phase update → loop governor →
//! stance governor → evidence verifier → observation circle

pub mod core;
pub mod types;

// =============================================================================
// AXIS / PHASE THRESHOLDS [FROZEN]
// =============================================================================

/// Turns below this stay observational (warmup)
pub const AXIS_WARMUP_TURNS: u32 = 5;

/// Turns at or above this default to constructive (long session)
pub const AXIS_BUILD_TURNS: u32 = 20;

/// Inertia level at which a departed silent mode still pulls introspective
pub const INERTIA_SILENT_MIN: f64 = 0.5;

/// Inertia level at which departed thinking/engaged modes still carry
pub const INERTIA_CARRY_MIN: f64 = 0.4;

// =============================================================================
// LOOP GOVERNOR THRESHOLDS [FROZEN]
// =============================================================================

/// Consecutive identical signatures before a forced transition
pub const LOOP_FORCE_COUNT: u32 = 2;

/// Consecutive introspective/L-IN signatures before entering CENTER
pub const CENTER_ENTRY_COUNT: u32 = 3;

// =============================================================================
// VERIFIER PARAMETERS [FROZEN]
// =============================================================================

/// Anchor excerpt length in characters (head / middle / tail)
pub const ANCHOR_LEN: usize = 80;

/// Anchors that must match for a long quote to verify (out of 3)
pub const ANCHOR_MIN_HITS: usize = 2;

// =============================================================================
// STANCE GOVERNOR PARAMETERS [FROZEN]
// =============================================================================

/// Pack confidence strictly below this asks instead of answering
pub const CONFIDENCE_FLOOR: f64 = 0.45;

/// Candidates enumerated in an ASK prompt
pub const MAX_LISTED_CANDIDATES: usize = 5;

/// Candidates carried on a decision for later selection
pub const MAX_CARRIED_CANDIDATES: usize = 10;

// =============================================================================
// COMPOSER PARAMETERS [FROZEN]
// =============================================================================

/// |fire-water balance| at or above this collapses the form to WELL
pub const ENERGY_SKEW_WELL: f64 = 0.6;

/// |fire-water balance| above this names a dominant side in the energy clause
pub const ENERGY_SKEW_CLAUSE: f64 = 0.3;

/// Characters of a reading kept when seeding a contradiction
pub const READING_CLIP_CHARS: usize = 30;

// =============================================================================
// VERSION
// =============================================================================

/// Version of the frozen threshold set above
pub const FROZEN_VERSION: &str = "1.0.0";

pub const VERSION: &str = "1.0.0";
