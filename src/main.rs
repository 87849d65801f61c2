//! Orb Cascade runner (default binary).
//!
//! Builds a board, repeatedly plays the first swap that creates a match and
//! prints every cascade. With `--json` each cascade is printed as one JSON
//! line for an external replayer instead.

use std::io::{self, Write};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::style::{style, Color, Stylize};

use orb_cascade::core::{detect_matches, matching_swaps, Grid};
use orb_cascade::engine::{BoardConfig, BoardSession, CascadeOutcome, EngineConfig, FillPolicy};
use orb_cascade::types::{Cell, OrbType};

/// Deterministic match-three board simulation.
///
/// Board settings default to the ORB_CASCADE_* environment variables;
/// flags override them.
#[derive(Debug, Parser)]
#[command(name = "orb-cascade", version, about)]
struct Args {
    /// Board rows (at least 3)
    #[arg(long, value_name = "N")]
    rows: Option<usize>,

    /// Board columns (at least 3)
    #[arg(long, value_name = "N")]
    cols: Option<usize>,

    /// Seed of the uniform orb generator
    #[arg(long, value_name = "SEED")]
    seed: Option<u32>,

    /// Number of swaps to play
    #[arg(long, default_value = "5", value_name = "K")]
    swaps: u32,

    /// Start from a board with no pre-existing runs
    #[arg(long)]
    no_initial_matches: bool,

    /// Stop a cascade after this many combos
    #[arg(long, value_name = "N")]
    max_combos: Option<u32>,

    /// Print each cascade as a JSON line
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let (board, engine) = build_config(&args)?;
    log::debug!("board {board:?}, engine {engine:?}");
    let mut session = BoardSession::new(board, engine);
    let mut out = io::stdout().lock();

    if !args.json {
        writeln!(out, "initial board (seed {}):", board.seed)?;
        print_grid(&mut out, session.grid())?;
    }

    // A random fill can start with runs; clear them before the first swap
    if !detect_matches(session.grid()).is_empty() {
        let outcome = session
            .resolve()
            .ok_or_else(|| anyhow!("session busy before the first swap"))?;
        report(&mut out, &args, None, &outcome, session.grid())?;
        session.finish_replay();
    }

    for turn in 1..=args.swaps {
        let Some(&(a, b)) = matching_swaps(session.grid()).first() else {
            if !args.json {
                writeln!(out, "no matching swap left after {} turns", turn - 1)?;
            }
            break;
        };
        if !session.try_swap(a, b) {
            return Err(anyhow!("hinted swap {a} <-> {b} was rejected"));
        }
        let outcome = session
            .resolve()
            .ok_or_else(|| anyhow!("session busy on turn {turn}"))?;
        report(&mut out, &args, Some((turn, a, b)), &outcome, session.grid())?;
        session.finish_replay();
    }

    if !args.json {
        let stats = session.stats();
        writeln!(
            out,
            "resolved {} cascades, best combo {}, {} orbs cleared",
            stats.resolved, stats.best_combo, stats.cleared
        )?;
    }
    Ok(())
}

fn build_config(args: &Args) -> Result<(BoardConfig, EngineConfig)> {
    let mut board = BoardConfig::try_from_env().context("reading board configuration")?;
    let mut engine = EngineConfig::try_from_env().context("reading engine configuration")?;

    if let Some(rows) = args.rows {
        board.rows = rows;
    }
    if let Some(cols) = args.cols {
        board.cols = cols;
    }
    if let Some(seed) = args.seed {
        board.seed = seed;
    }
    if args.no_initial_matches {
        board.fill_policy = FillPolicy::NoInitialMatches;
    }
    if let Some(max) = args.max_combos {
        if max == 0 {
            return Err(anyhow!("--max-combos must be at least 1"));
        }
        engine.max_combos = max;
    }
    board.validate().context("invalid board size")?;
    Ok((board, engine))
}

fn report(
    out: &mut impl Write,
    args: &Args,
    swap: Option<(u32, Cell, Cell)>,
    outcome: &CascadeOutcome,
    grid: &Grid,
) -> Result<()> {
    if args.json {
        serde_json::to_writer(&mut *out, outcome)?;
        writeln!(out)?;
        return Ok(());
    }

    match swap {
        Some((turn, a, b)) => writeln!(out, "\nturn {turn}: swap {a} <-> {b}")?,
        None => writeln!(out, "\nsettling initial board")?,
    }
    for t in &outcome.transitions {
        writeln!(
            out,
            "  combo {}: cleared {}, {} fell, {} spawned",
            t.combo,
            t.removed.len(),
            t.moves.len(),
            t.spawned.len()
        )?;
    }
    if outcome.truncated {
        writeln!(out, "  stopped at the combo limit")?;
    }
    writeln!(out, "  {} COMBO", outcome.combo_count)?;
    print_grid(out, grid)
}

fn orb_color(kind: OrbType) -> Color {
    match kind {
        OrbType::Fire => Color::Red,
        OrbType::Water => Color::Blue,
        OrbType::Wood => Color::Green,
        OrbType::Light => Color::Yellow,
        OrbType::Dark => Color::Magenta,
        OrbType::Heal => Color::Rgb {
            r: 255,
            g: 128,
            b: 178,
        },
    }
}

fn print_grid(out: &mut impl Write, grid: &Grid) -> Result<()> {
    for row in 0..grid.rows() {
        write!(out, "  ")?;
        for col in 0..grid.cols() {
            match grid.kind_at(Cell::new(row, col)) {
                Some(kind) => write!(out, "{} ", style(kind.symbol()).with(orb_color(kind)).bold())?,
                None => write!(out, ". ")?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}
