//! Core engines for Gyre-0

pub mod axis;
pub mod composer;
pub mod frozen;
pub mod governor;
pub mod matcher;
pub mod pipeline;
pub mod skeleton;
pub mod stance;
pub mod verifier;

pub use axis::{axis_to_phase, phase_to_axis, AxisEngine};
pub use composer::{derive_form, ObservationComposer};
pub use frozen::{FrozenConfig, SealedConfig};
pub use governor::{LoopGovernor, LoopSignal};
pub use pipeline::TurnEngine;
pub use skeleton::SkeletonBuilder;
pub use stance::StanceGovernor;
pub use verifier::EvidenceVerifier;
