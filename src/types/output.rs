//! Per-turn outcome handed downstream and rendered by the CLI

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::decision::{DetailBlock, GovernorDecision};
use crate::types::evidence::Claim;
use crate::types::observation::ObservationCircle;
use crate::types::skeleton::TruthSkeleton;

/// CRITICAL diagnostic raised by a frozen-config checksum mismatch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityAlert {
    /// Checksum recorded at seal time (hex)
    pub expected: String,
    /// Checksum recomputed this turn (hex)
    pub computed: String,
}

impl IntegrityAlert {
    /// One-line CRITICAL rendering for the diagnostic channel
    pub fn render(&self) -> String {
        format!(
            "CRITICAL: frozen config drift (expected {}, computed {})",
            self.expected, self.computed
        )
    }
}

/// Everything one turn produced, in decision order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnOutcome {
    /// When the turn completed
    pub timestamp: DateTime<Utc>,
    /// Risk/mode classification of the message
    pub skeleton: TruthSkeleton,
    /// ANSWER or ASK, with candidates and needs
    pub decision: GovernorDecision,
    /// The structured observation for the generator
    pub circle: ObservationCircle,
    /// Claims that survived verification
    pub valid_claims: Vec<Claim>,
    /// Diagnostic block, present only when detail was requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<DetailBlock>,
    /// Present only when the frozen config failed its checksum
    #[serde(skip_serializing_if = "Option::is_none")]
    pub integrity_alert: Option<IntegrityAlert>,
}

impl TurnOutcome {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let mode_color = self.skeleton.mode.color_code();
        let stance_color = self.decision.stance.color_code();
        let reset = "\x1b[0m";

        format!(
            "{}{} {}{} | risk={} | {}{} {}{} | {}",
            mode_color,
            self.skeleton.mode.emoji(),
            self.skeleton.mode,
            reset,
            self.skeleton.risk,
            stance_color,
            self.decision.stance.emoji(),
            self.decision.stance,
            reset,
            self.decision.reason.code(),
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "mode={} | risk={} | stance={} | reason={} | claims={}",
            self.skeleton.mode,
            self.skeleton.risk,
            self.decision.stance,
            self.decision.reason.code(),
            self.valid_claims.len(),
        )
    }
}

// =============================================================================
// TESTS
// =============================================================================
