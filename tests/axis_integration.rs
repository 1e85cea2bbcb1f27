//! Integration tests for axis selection over a running session
//!
//! Walks ConversationContext through persona switches and turn-by-turn
//! inertia decay, the same sequence the turn pipeline performs.

use gyre0::core::{axis_to_phase, AxisEngine};
use gyre0::types::{AxisReason, CognitiveAxis, ConversationContext, PersonaMode, Phase};

/// One turn's worth of axis work: select, then age the context
fn turn(engine: &AxisEngine, ctx: &mut ConversationContext) -> (CognitiveAxis, AxisReason) {
    let picked = engine.next(ctx.persona_mode, &ctx.inertia, ctx.conversation_count);
    ctx.conversation_count += 1;
    ctx.inertia.decay();
    picked
}

/// Test the warmup window holds observational even for an engaged persona
#[test]
fn test_warmup_window_resists_persona() {
    let engine = AxisEngine::new();
    let mut ctx = ConversationContext::new();
    ctx.switch_persona(PersonaMode::Engaged);

    for _ in 0..5 {
        let (axis, reason) = turn(&engine, &mut ctx);
        assert_eq!(axis, CognitiveAxis::Observational);
        assert_eq!(reason, AxisReason::R020_WARMUP_OBSERVATIONAL);
    }

    // First turn past warmup the persona takes over
    let (axis, reason) = turn(&engine, &mut ctx);
    assert_eq!(axis, CognitiveAxis::Executive);
    assert_eq!(reason, AxisReason::R025_ENGAGED_EXECUTIVE);
}

/// Test a silent spell keeps pulling inward for four turns after it ends
#[test]
fn test_silent_inertia_lasts_four_turns() {
    let engine = AxisEngine::new();
    let mut ctx = ConversationContext::new();
    ctx.conversation_count = 8;

    ctx.switch_persona(PersonaMode::Silent);
    let (axis, reason) = turn(&engine, &mut ctx);
    assert_eq!(axis, CognitiveAxis::Introspective);
    assert_eq!(reason, AxisReason::R021_SILENT_INTROSPECTIVE);

    // Departing silent records inertia at 0.8; it decays 0.1 per turn
    ctx.switch_persona(PersonaMode::Neutral);

    let mut carried = 0;
    loop {
        let (_, reason) = turn(&engine, &mut ctx);
        if reason == AxisReason::R022_SILENT_INERTIA_CARRY {
            carried += 1;
        } else {
            assert_eq!(reason, AxisReason::R028_DEFAULT_OBSERVATIONAL);
            break;
        }
    }
    // Levels 0.8, 0.7, 0.6 and the float just above 0.5 all carry
    assert_eq!(carried, 4);
}

/// Test thinking inertia outlasts silent inertia by exactly one turn
#[test]
fn test_thinking_inertia_lasts_five_turns() {
    let engine = AxisEngine::new();
    let mut ctx = ConversationContext::new();
    ctx.conversation_count = 8;
    ctx.switch_persona(PersonaMode::Thinking);
    ctx.switch_persona(PersonaMode::Neutral);

    let mut carried = 0;
    loop {
        let (axis, reason) = turn(&engine, &mut ctx);
        if reason == AxisReason::R024_THINKING_INERTIA_CARRY {
            assert_eq!(axis, CognitiveAxis::Introspective);
            carried += 1;
        } else {
            break;
        }
    }
    // The 0.4 threshold admits one more decayed level than silent's 0.5
    assert_eq!(carried, 5);
}

/// Test silent inertia outranks the long-run constructive rule
#[test]
fn test_inertia_outranks_long_run() {
    let engine = AxisEngine::new();
    let mut ctx = ConversationContext::new();
    ctx.conversation_count = 22;
    ctx.switch_persona(PersonaMode::Silent);
    ctx.switch_persona(PersonaMode::Neutral);

    let (axis, reason) = turn(&engine, &mut ctx);
    assert_eq!(axis, CognitiveAxis::Introspective);
    assert_eq!(reason, AxisReason::R022_SILENT_INERTIA_CARRY);

    // Once the carry fades, the long run shows through
    ctx.inertia.level = 0.0;
    let (axis, reason) = turn(&engine, &mut ctx);
    assert_eq!(axis, CognitiveAxis::Constructive);
    assert_eq!(reason, AxisReason::R027_LONG_RUN_CONSTRUCTIVE);
}

/// Test the message ladder walks one step at a time, both directions
#[test]
fn test_refine_ladder_walk() {
    let engine = AxisEngine::new();

    let step1 = engine.refine(CognitiveAxis::Observational, "なぜそう見えるのか");
    assert_eq!(step1, CognitiveAxis::Introspective);

    let step2 = engine.refine(step1, "組み立てを考えたい");
    assert_eq!(step2, CognitiveAxis::Constructive);

    let step3 = engine.refine(step2, "では実行しよう");
    assert_eq!(step3, CognitiveAxis::Executive);

    let step4 = engine.refine(step3, "完了したか教えて");
    assert_eq!(step4, CognitiveAxis::Observational);

    // Execution words on an observational turn do not jump the ladder
    let held = engine.refine(CognitiveAxis::Observational, "では実行しよう");
    assert_eq!(held, CognitiveAxis::Observational);
}

/// Test next + refine + phase composed the way the pipeline composes them
#[test]
fn test_selection_composes_with_phase() {
    let engine = AxisEngine::new();
    let ctx = {
        let mut ctx = ConversationContext::new();
        ctx.conversation_count = 10;
        ctx.switch_persona(PersonaMode::Engaged);
        ctx
    };

    let (axis, _) = engine.next(ctx.persona_mode, &ctx.inertia, ctx.conversation_count);
    assert_eq!(axis, CognitiveAxis::Executive);

    // A review message turns the executive axis inward, and the phase follows
    let refined = engine.refine(axis, "振り返ると何が足りなかった？");
    assert_eq!(refined, CognitiveAxis::Introspective);
    assert_eq!(axis_to_phase(refined), Phase::LIn);

    // Without review words the phase stays right-outward
    let held = engine.refine(axis, "次に進もう");
    assert_eq!(axis_to_phase(held), Phase::ROut);
}
