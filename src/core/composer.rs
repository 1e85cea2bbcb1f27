//! Observation composer: renders the trace into an observation circle
//!
//! The circle describes the current observation position without
//! concluding. Oppositions are woven and kept turning, never merged; the
//! unresolved list is never empty. The external generator receives the
//! circle and writes prose around it.

use crate::types::{
    Contradiction, EnergyBalance, ObservationCircle, ObservationTrace, Phase, TraceForm,
    Unresolved,
};
use crate::{ENERGY_SKEW_CLAUSE, ENERGY_SKEW_WELL};

/// Derive the canonical form for a turn, first match wins:
/// CENTER or a hard energy skew damps to WELL, the outward-build phase
/// climbs as SPIRAL, the inward-receive phase arrives as WAVE, and
/// everything else turns in place as CIRCLE.
pub fn derive_form(phase: Phase, in_center: bool, energy: EnergyBalance) -> TraceForm {
    if in_center || energy.is_skewed(ENERGY_SKEW_WELL) {
        return TraceForm::Well;
    }
    match phase {
        Phase::LOut => TraceForm::Spiral,
        Phase::RIn => TraceForm::Wave,
        _ => TraceForm::Circle,
    }
}

/// Composes the observation circle from a finished trace
#[derive(Debug, Default)]
pub struct ObservationComposer;

impl ObservationComposer {
    /// Create new composer
    pub fn new() -> Self {
        Self
    }

    /// Render the trace into an observation circle
    pub fn compose(&self, trace: &ObservationTrace) -> ObservationCircle {
        let mut description = base_description(trace.form).to_string();

        let clauses = qualifier_clauses(trace);
        if !clauses.is_empty() {
            description.push_str(" Within it, ");
            description.push_str(&clauses.join("; "));
            description.push('.');
        }

        description.push(' ');
        description.push_str(energy_clause(trace.energy.balance()));

        let mut items: Vec<String> = trace
            .contradictions
            .iter()
            .map(Contradiction::render)
            .collect();
        items.extend(trace.carried_unresolved.iter().cloned());
        items.push(form_tension(trace.form).to_string());

        ObservationCircle {
            description,
            unresolved: Unresolved::new(items),
            focus_hint: focus_hint(trace.form).map(String::from),
        }
    }
}

/// Fixed base template per form
fn base_description(form: TraceForm) -> &'static str {
    match form {
        TraceForm::Circle => {
            "The observation turns in place: both readings stay in view, woven without merging."
        }
        TraceForm::Spiral => {
            "The observation climbs as it turns: each pass returns above the last, carrying what it lifted."
        }
        TraceForm::Wave => {
            "The observation arrives in swells: what comes is received first and weighed after."
        }
        TraceForm::Well => {
            "The observation has settled to stillness: the turning holds at one deep point, nothing forced."
        }
    }
}

/// Zero to five qualifier clauses, one per active phase flag
fn qualifier_clauses(trace: &ObservationTrace) -> Vec<&'static str> {
    let flags = &trace.phase_flags;
    let mut clauses = Vec::new();
    if flags.rise {
        clauses.push("the motion is rising");
    }
    if flags.fall {
        clauses.push("the motion is settling");
    }
    if flags.open {
        clauses.push("the field stays open to what arrives");
    }
    if flags.close {
        clauses.push("the field closes around what it holds");
    }
    if flags.center {
        clauses.push("the center holds it without advancing");
    }
    clauses
}

/// One clause comparing the two opposing energy signals
fn energy_clause(balance: f64) -> &'static str {
    if balance > ENERGY_SKEW_CLAUSE {
        "Outward fire dominates the exchange."
    } else if balance < -ENERGY_SKEW_CLAUSE {
        "Inward water dominates the exchange."
    } else {
        "Fire and water hold each other in balance."
    }
}

/// Form-specific default tension, always appended to the unresolved list
fn form_tension(form: TraceForm) -> &'static str {
    match form {
        TraceForm::Circle => "what returns is not yet what was sought",
        TraceForm::Spiral => "each gain leaves a question beneath it",
        TraceForm::Wave => "the swells have not chosen a shore",
        TraceForm::Well => "the stillness has not said what it holds",
    }
}

/// Fixed per-form suggestion for what to examine next.
///
/// WELL carries none: the damped state holds, it does not probe.
fn focus_hint(form: TraceForm) -> Option<&'static str> {
    match form {
        TraceForm::Circle => Some("watch where the turning repeats itself; the next pass begins there"),
        TraceForm::Spiral => Some("name the layer this pass added before climbing further"),
        TraceForm::Wave => Some("meet the swell that returns strongest"),
        TraceForm::Well => None,
    }
}

// =============================================================================
// TESTS
// =============================================================================
