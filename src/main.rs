//! Gyre-0 CLI
//!
//! Usage:
//!   gyre0 --text "your message here"             # Single turn
//!   gyre0 --interactive                          # Interactive session
//!   gyre0 --text "天の原 doc=KJK pdfPage=3" --pack pack.json --detail
//!   gyre0 --text "message" --json                # JSON output

use clap::Parser;
use colored::Colorize;
use std::fs;
use std::io::{self, BufRead, Write};

use gyre0::core::TurnEngine;
use gyre0::types::{
    ConversationContext, EvidenceHit, EvidencePack, PersonaMode, SkeletonFlags, TurnOutcome,
};
use gyre0::VERSION;

#[derive(Parser, Debug)]
#[command(
    name = "gyre0",
    version = VERSION,
    about = "Gyre-0 - Per-turn decision core for grounded conversation",
    long_about = "Gyre-0 runs the per-turn decision core: it classifies a message\n\
                  into a truth skeleton, updates the cognitive axis and phase,\n\
                  corrects degenerate loops, decides ANSWER vs ASK against an\n\
                  evidence pack, verifies quoted claims, and composes the\n\
                  observation circle handed to the generator.\n\n\
                  Modes:\n  \
                  --text         Run a single turn and print the outcome\n  \
                  --interactive  Keep one session open and run a turn per line\n\n\
                  Evidence:\n  \
                  --pack points at an EvidencePack JSON file; without it every\n  \
                  grounded turn becomes an ASK for a source hint."
)]
struct Args {
    /// Message to run as a single turn
    #[arg(short, long)]
    text: Option<String>,

    /// Interactive mode - read messages from stdin, one turn per line
    #[arg(short, long)]
    interactive: bool,

    /// EvidencePack JSON file backing grounded turns
    #[arg(long)]
    pack: Option<String>,

    /// Pick candidate N (1-based) from the pack instead of deciding (single turn)
    #[arg(long)]
    select: Option<usize>,

    /// Include the #detail diagnostic block in the outcome
    #[arg(long)]
    detail: bool,

    /// Persona mode: neutral, silent, thinking, engaged
    #[arg(long, default_value = "neutral")]
    mode: PersonaMode,

    /// Preset conversation count (warmup ends at 5, building starts at 20)
    #[arg(long, default_value_t = 0)]
    count: u32,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show the skeleton and observation circle in full
    #[arg(long)]
    verbose: bool,
}

fn main() {
    init_tracing();

    let args = Args::parse();
    if args.no_color {
        colored::control::set_override(false);
    }

    let pack = args.pack.as_deref().map(|path| match load_pack(path) {
        Ok(pack) => pack,
        Err(message) => {
            eprintln!("{}", message.red());
            std::process::exit(2);
        }
    });

    if args.interactive {
        run_interactive(&args, pack.as_ref());
    } else if let Some(ref text) = args.text {
        run_single(text, &args, pack.as_ref());
    } else {
        // Default to interactive if no mode specified
        run_interactive(&args, pack.as_ref());
    }
}

/// Logs go to stderr so stdout stays parseable; RUST_LOG overrides the level
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Load and parse an EvidencePack JSON file
fn load_pack(path: &str) -> Result<EvidencePack, String> {
    let raw = fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
    serde_json::from_str(&raw).map_err(|e| format!("malformed pack {}: {}", path, e))
}

/// Run single turn evaluation
fn run_single(text: &str, args: &Args, pack: Option<&EvidencePack>) {
    let engine = TurnEngine::new();
    let mut ctx = ConversationContext::new();
    ctx.persona_mode = args.mode;
    ctx.conversation_count = args.count;

    let manual = resolve_selection(args.select, pack);
    let flags = SkeletonFlags {
        has_selected_evidence: manual.is_some(),
        detail_requested: args.detail,
    };

    match engine.run_turn(&mut ctx, text, flags, pack, manual, vec![], &[]) {
        Ok(outcome) => print_outcome(&outcome, args, true),
        Err(e) => {
            eprintln!("{}", format!("turn failed: {}", e).red());
            std::process::exit(1);
        }
    }
}

/// Resolve --select against the pack's candidate list, exiting on a bad index
fn resolve_selection<'a>(
    select: Option<usize>,
    pack: Option<&'a EvidencePack>,
) -> Option<&'a EvidenceHit> {
    let n = select?;
    let hit = pack.and_then(|p| n.checked_sub(1).and_then(|i| p.hits.get(i)));
    if hit.is_none() {
        let available = pack.map(|p| p.hits.len()).unwrap_or(0);
        eprintln!(
            "{}",
            format!("--select {} out of range ({} candidates)", n, available).red()
        );
        std::process::exit(2);
    }
    hit
}

/// Run interactive mode - one session, one turn per line
fn run_interactive(args: &Args, pack: Option<&EvidencePack>) {
    let engine = TurnEngine::new();
    let mut ctx = ConversationContext::new();
    ctx.persona_mode = args.mode;
    ctx.conversation_count = args.count;

    // Dialectic carry between turns
    let mut carried: Vec<String> = Vec::new();
    // Candidates listed by the previous ASK, selectable by bare number
    let mut last_candidates: Vec<EvidenceHit> = Vec::new();

    print_header();
    println!("Type a message and press Enter to run one turn. Type 'quit' to exit.");
    println!("Commands: 'mode <neutral|silent|thinking|engaged>' switches persona,");
    println!("          'reset' releases CENTER damping.");
    println!("A bare number picks from the last candidate listing.");
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        let prompt = format_prompt(&ctx);
        print!("{}", prompt);
        stdout.flush().unwrap();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(_) => break,
        }

        let line = line.trim();
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            println!("\nSession ended. Turns: {}", ctx.conversation_count);
            break;
        }
        if line.is_empty() {
            continue;
        }

        if line.eq_ignore_ascii_case("reset") {
            ctx.reset_center();
            println!("CENTER released.");
            continue;
        }
        if let Some(rest) = line.strip_prefix("mode ") {
            match rest.trim().parse::<PersonaMode>() {
                Ok(mode) => {
                    ctx.switch_persona(mode);
                    println!("persona now {}", mode);
                }
                Err(message) => println!("{}", message.yellow()),
            }
            continue;
        }

        let manual = engine.parse_selection(line, &last_candidates);
        let flags = SkeletonFlags {
            has_selected_evidence: manual.is_some(),
            detail_requested: args.detail,
        };

        match engine.run_turn(&mut ctx, line, flags, pack, manual, vec![], &carried) {
            Ok(outcome) => {
                print_outcome(&outcome, args, false);

                // Carry each open tension once
                for item in outcome.circle.unresolved.iter() {
                    if !carried.contains(item) {
                        carried.push(item.clone());
                    }
                }
                last_candidates = if outcome.decision.is_answer() {
                    Vec::new()
                } else {
                    outcome.decision.candidates.clone()
                };
            }
            Err(e) => println!("{}", format!("turn failed: {}", e).red()),
        }
    }
}

/// Print header
fn print_header() {
    println!("{}", "========================================".bold());
    println!("{}", format!("  Gyre-0 v{} - Interactive", VERSION).bold());
    println!("{}", "========================================".bold());
    println!();
}

/// Format the session prompt: axis alias, phase, CENTER marker
fn format_prompt(ctx: &ConversationContext) -> String {
    let center = if ctx.loop_state.in_center {
        " CENTER"
    } else {
        ""
    };
    format!(
        "[{} {}{}] > ",
        ctx.cognitive_axis.alias().cyan(),
        ctx.phase,
        center.yellow()
    )
}

/// Print one turn's outcome per the output flags
fn print_outcome(outcome: &TurnOutcome, args: &Args, pretty: bool) {
    if args.json {
        let json = if pretty {
            serde_json::to_string_pretty(outcome)
        } else {
            serde_json::to_string(outcome)
        };
        println!("{}", json.unwrap());
        return;
    }

    if let Some(alert) = &outcome.integrity_alert {
        eprintln!("{}", alert.render().red().bold());
    }

    if args.no_color {
        println!("{}", outcome.to_parseable_string());
    } else {
        println!("{}", outcome.to_terminal_string());
    }

    if args.verbose {
        print_verbose(outcome);
    }

    if let Some(prompt) = &outcome.decision.prompt {
        println!();
        println!("{}", prompt);
    }

    if let Some(detail) = &outcome.detail {
        println!();
        println!("{}", detail.render().dimmed());
    }
}

/// Print the full skeleton and observation circle
fn print_verbose(outcome: &TurnOutcome) {
    let skeleton = &outcome.skeleton;
    let axes: Vec<String> = skeleton.truth_axes.iter().map(|a| a.to_string()).collect();
    let constraints: Vec<String> = skeleton.constraints.iter().map(|c| c.to_string()).collect();

    println!("{}", "-- skeleton ----------------------------".dimmed());
    println!("  route:       {}", skeleton.route.code());
    println!("  axes:        {}", axes.join(", "));
    println!("  constraints: {}", constraints.join(", "));
    println!("  evidence:    {}", skeleton.needs_evidence);
    if !skeleton.required_sources.is_empty() {
        println!("  sources:     {}", skeleton.required_sources.join(", "));
    }

    println!("{}", "-- circle ------------------------------".dimmed());
    println!("  {}", outcome.circle.description);
    for item in outcome.circle.unresolved.iter() {
        println!("  - {}", item.as_str().dimmed());
    }
    if let Some(hint) = &outcome.circle.focus_hint {
        println!("  focus: {}", hint);
    }
    for claim in &outcome.valid_claims {
        println!("  [claim] {} ({})", claim.text, claim.evidence_ids.join(", "));
    }
}
