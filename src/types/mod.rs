//! Core types for Gyre-0

mod context;
mod decision;
mod error;
mod evidence;
mod observation;
mod output;
mod reason;
mod skeleton;

pub use context::{
    CognitiveAxis, ConversationContext, Inertia, LoopState, PersonaMode, Phase, Signature,
    INERTIA_DECAY_STEP, INERTIA_ON_TRANSITION,
};
pub use decision::{CitedRecord, DetailBlock, GovernorDecision, GovernorReason, Stance};
pub use error::{CoreError, CoreResult};
pub use evidence::{Claim, EvidenceHit, EvidencePack, EvidenceRecord, VerifyReason, VerifyResult};
pub use observation::{
    Contradiction, EnergyBalance, ObservationCircle, ObservationTrace, PhaseFlags, TraceForm,
    Unresolved, UNRESOLVED_PLACEHOLDER,
};
pub use output::{IntegrityAlert, TurnOutcome};
pub use reason::{AxisReason, LoopReason};
pub use skeleton::{
    AnswerShape, Constraint, ResponseMode, RiskLevel, RouteReason, SkeletonFlags, TruthAxis,
    TruthSkeleton,
};
