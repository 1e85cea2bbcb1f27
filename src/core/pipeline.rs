//! Turn pipeline: one message in, one outcome out
//!
//! Per-turn order: classify the message, resolve axis and phase, let the
//! loop governor correct degeneration, decide the stance, verify seeded
//! claims, compose the observation circle. The frozen config seal is
//! re-checked on every turn; drift damps the turn into CENTER with a
//! CRITICAL alert instead of crashing. An empty message aborts before any
//! session state is touched.

use chrono::Utc;
use tracing::debug;

use crate::core::axis::{axis_to_phase, AxisEngine};
use crate::core::composer::{derive_form, ObservationComposer};
use crate::core::frozen::SealedConfig;
use crate::core::governor::{LoopGovernor, LoopSignal};
use crate::core::matcher::{self, ENERGY_FIRE, ENERGY_WATER};
use crate::core::skeleton::SkeletonBuilder;
use crate::core::stance::StanceGovernor;
use crate::core::verifier::EvidenceVerifier;
use crate::types::{
    CitedRecord, Claim, ConversationContext, Contradiction, CoreError, CoreResult, DetailBlock,
    EnergyBalance, EvidenceHit, EvidencePack, GovernorDecision, IntegrityAlert, LoopReason,
    ObservationTrace, PhaseFlags, SkeletonFlags, TurnOutcome,
};
use crate::READING_CLIP_CHARS;

/// Claims seeded from pack records for an answering turn
const CLAIM_SEED_MAX: usize = 2;

/// Characters of record quote carried into a seeded claim
const CLAIM_TEXT_CHARS: usize = 100;

/// The full decision core wired together
pub struct TurnEngine {
    sealed: SealedConfig,
    skeleton: SkeletonBuilder,
    axis: AxisEngine,
    loops: LoopGovernor,
    stance: StanceGovernor,
    verifier: EvidenceVerifier,
    composer: ObservationComposer,
}

impl TurnEngine {
    /// Engine sealed against the compiled-in frozen config
    pub fn new() -> Self {
        Self::with_sealed(SealedConfig::seal())
    }

    /// Engine with a caller-provided seal (persisted deployments)
    pub fn with_sealed(sealed: SealedConfig) -> Self {
        Self {
            sealed,
            skeleton: SkeletonBuilder::new(),
            axis: AxisEngine::new(),
            loops: LoopGovernor::new(),
            stance: StanceGovernor::new(),
            verifier: EvidenceVerifier::new(),
            composer: ObservationComposer::new(),
        }
    }

    /// The seal this engine re-checks every turn
    pub fn sealed(&self) -> &SealedConfig {
        &self.sealed
    }

    /// Resolve a reply to the previous turn's candidate listing
    pub fn parse_selection<'a>(
        &self,
        reply: &str,
        candidates: &'a [EvidenceHit],
    ) -> Option<&'a EvidenceHit> {
        self.stance.parse_selection(reply, candidates)
    }

    /// Run one full turn against the session context.
    ///
    /// `contradictions` and `carried_unresolved` are the dialectic carry
    /// from earlier turns; when no contradiction is supplied the pipeline
    /// seeds one opposed reading pair of the message so the dialectic is
    /// never empty-handed.
    pub fn run_turn(
        &self,
        ctx: &mut ConversationContext,
        message: &str,
        flags: SkeletonFlags,
        pack: Option<&EvidencePack>,
        manual_selection: Option<&EvidenceHit>,
        contradictions: Vec<Contradiction>,
        carried_unresolved: &[String],
    ) -> CoreResult<TurnOutcome> {
        let text = message.trim();
        if text.is_empty() {
            return Err(CoreError::EmptyMessage);
        }

        // Seal check first; drift damps the turn instead of aborting it
        let integrity_alert = match self.sealed.verify() {
            Ok(()) => None,
            Err(CoreError::IntegrityViolation { expected, computed }) => {
                Some(IntegrityAlert { expected, computed })
            }
            Err(other) => return Err(other),
        };

        let skeleton = self.skeleton.build(text, flags);

        let (axis, axis_reason) =
            self.axis
                .next(ctx.persona_mode, &ctx.inertia, ctx.conversation_count);
        let axis = self.axis.refine(axis, text);
        let phase = axis_to_phase(axis);

        self.loops.observe(&mut ctx.loop_state, axis, phase);
        let (signal, loop_reason) = self.loops.resolve(&ctx.loop_state);

        let (axis, phase) = match signal {
            LoopSignal::ForceTransition(to_axis, to_phase) => {
                debug!(
                    from = axis.alias(),
                    to = to_axis.alias(),
                    "loop governor forcing transition"
                );
                (to_axis, to_phase)
            }
            LoopSignal::EnterCenter => {
                self.loops.update_center(&mut ctx.loop_state, true);
                (axis, phase)
            }
            LoopSignal::None => (axis, phase),
        };

        let loop_reason = if integrity_alert.is_some() {
            self.loops.update_center(&mut ctx.loop_state, true);
            LoopReason::R034_INTEGRITY_CENTER
        } else {
            loop_reason
        };

        ctx.cognitive_axis = axis;
        ctx.phase = phase;

        debug!(
            axis = axis.alias(),
            phase = %phase,
            axis_reason = axis_reason.code(),
            loop_reason = loop_reason.code(),
            in_center = ctx.loop_state.in_center,
            "turn state resolved"
        );

        let decision = if skeleton.needs_evidence {
            self.stance.decide(text, skeleton.mode, pack, manual_selection)
        } else {
            self.stance.direct_answer()
        };

        let valid_claims = match pack {
            Some(pack) if skeleton.needs_evidence && decision.is_answer() => {
                self.verifier.filter_valid(seed_claims(pack), pack)
            }
            _ => Vec::new(),
        };

        let energy = EnergyBalance::new(
            matcher::match_count(&ENERGY_FIRE, text),
            matcher::match_count(&ENERGY_WATER, text),
        );
        let contradictions = if contradictions.is_empty() {
            vec![seed_contradiction(text)]
        } else {
            contradictions
        };

        let form = derive_form(phase, ctx.loop_state.in_center, energy);
        let trace = ObservationTrace {
            axis,
            phase,
            form,
            phase_flags: PhaseFlags::from_phase(phase, ctx.loop_state.in_center),
            energy,
            contradictions,
            carried_unresolved: carried_unresolved.to_vec(),
            evidence_ids: claim_ids(&valid_claims),
        };
        let circle = self.composer.compose(&trace);

        let detail = if flags.detail_requested {
            build_detail(&decision, pack, &valid_claims)
        } else {
            None
        };

        ctx.conversation_count += 1;
        ctx.inertia.decay();

        debug!(
            mode = %skeleton.mode,
            stance = %decision.stance,
            form = %trace.form,
            claims = valid_claims.len(),
            "turn complete"
        );

        Ok(TurnOutcome {
            timestamp: Utc::now(),
            skeleton,
            decision,
            circle,
            valid_claims,
            detail,
            integrity_alert,
        })
    }
}

impl Default for TurnEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Seed claims from the pack's resolved records, one claim per record
fn seed_claims(pack: &EvidencePack) -> Vec<Claim> {
    pack.records
        .iter()
        .take(CLAIM_SEED_MAX)
        .map(|record| {
            Claim::new(
                clip_chars(&record.quote, CLAIM_TEXT_CHARS),
                vec![record.id.clone()],
            )
        })
        .collect()
}

/// One opposed reading pair of the message, both readings clipped
fn seed_contradiction(text: &str) -> Contradiction {
    let reading = clip_chars(text, READING_CLIP_CHARS);
    Contradiction::new(
        format!("「{}」 taken at its word", reading),
        format!("「{}」 held for caution", reading),
    )
}

/// Unique evidence ids cited by the surviving claims, in claim order
fn claim_ids(claims: &[Claim]) -> Vec<String> {
    let mut ids: Vec<String> = Vec::new();
    for claim in claims {
        for id in &claim.evidence_ids {
            if !ids.contains(id) {
                ids.push(id.clone());
            }
        }
    }
    ids
}

/// Diagnostic block for an answering turn with a top candidate
fn build_detail(
    decision: &GovernorDecision,
    pack: Option<&EvidencePack>,
    valid_claims: &[Claim],
) -> Option<DetailBlock> {
    let pack = pack?;
    if !decision.is_answer() {
        return None;
    }
    let top = decision.candidates.first()?;

    let mut cited: Vec<CitedRecord> = Vec::new();
    for id in claim_ids(valid_claims) {
        if let Some(record) = pack.find(&id) {
            cited.push(CitedRecord {
                id: record.id.clone(),
                title: record.title.clone(),
            });
        }
    }

    Some(DetailBlock {
        doc: top.doc_id.clone(),
        page: top.page_id,
        id_prefix: format!("{}-P{:04}", top.doc_id, top.page_id),
        is_estimated: pack.is_estimated,
        confidence: pack.confidence,
        cited,
    })
}

/// Clip a string to at most `max` characters
fn clip_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

// =============================================================================
// TESTS
// =============================================================================
