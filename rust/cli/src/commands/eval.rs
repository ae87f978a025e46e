//! `eval`: play two adversary tiers against each other and compare them.
//!
//! Sides alternate who drops first, so an even number of games gives each
//! side the opening move equally often.

use crate::error::CliError;
use crate::ui;
use fourline_ai::{create_adversary, Adversary, Tier};
use fourline_arena::config;
use fourline_engine::game::{Game, GameStatus};
use fourline_engine::seat::Seat;
use std::io::Write;

/// Mixes side B's seed away from side A's so two equal tiers do not mirror
/// each other.
const SIDE_B_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct EvalStats {
    games_played: u32,
    wins: u32,
    losses: u32,
    draws: u32,
    wins_moving_first: u32,
    moves: u64,
}

impl EvalStats {
    fn record(&mut self, result: SideResult, moved_first: bool, moves: u32) {
        self.games_played += 1;
        self.moves += u64::from(moves);
        match result {
            SideResult::Won => {
                self.wins += 1;
                if moved_first {
                    self.wins_moving_first += 1;
                }
            }
            SideResult::Lost => self.losses += 1,
            SideResult::Drew => self.draws += 1,
        }
    }

    fn avg_moves(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            self.moves as f64 / self.games_played as f64
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SideResult {
    Won,
    Lost,
    Drew,
}

/// One finished game, from side A's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct GameRecord {
    a_result: SideResult,
    a_moved_first: bool,
    moves: u32,
}

/// Plays `games` games between `tier_a` and `tier_b`.
///
/// Board size falls back to the configured arena defaults when `rows` or
/// `cols` is omitted. Game `n` is seeded with `seed + n`, so a fixed seed
/// reproduces the whole run.
#[allow(clippy::too_many_arguments)]
pub fn handle_eval_command(
    tier_a: Tier,
    tier_b: Tier,
    games: u32,
    seed: Option<u64>,
    rows: Option<usize>,
    cols: Option<usize>,
    out: &mut dyn Write,
    err: &mut dyn Write,
) -> Result<(), CliError> {
    if games == 0 {
        return Err(CliError::InvalidInput(
            "--games must be at least 1".to_string(),
        ));
    }
    let (rows, cols) = board_size(rows, cols)?;
    // Surface bad dimensions before any game starts.
    Game::new(rows, cols).map_err(|e| CliError::InvalidInput(e.to_string()))?;

    if tier_a == tier_b && games % 2 == 1 {
        ui::display_warning(
            err,
            "odd game count gives side A one extra opening move",
        )?;
    }

    let base_seed = seed.unwrap_or_else(rand::random);
    let mut stats_a = EvalStats::default();
    let mut stats_b = EvalStats::default();

    for game_num in 0..games {
        let game_seed = base_seed.wrapping_add(u64::from(game_num));
        let side_a = create_adversary(tier_a, Some(game_seed));
        let side_b = create_adversary(tier_b, Some(game_seed ^ SIDE_B_SEED_MIX));

        let a_moved_first = game_num % 2 == 0;
        let record = play_game(rows, cols, side_a.as_ref(), side_b.as_ref(), a_moved_first)?;

        let b_result = match record.a_result {
            SideResult::Won => SideResult::Lost,
            SideResult::Lost => SideResult::Won,
            SideResult::Drew => SideResult::Drew,
        };
        stats_a.record(record.a_result, record.a_moved_first, record.moves);
        stats_b.record(b_result, !record.a_moved_first, record.moves);
    }

    print_eval_results(
        out,
        (tier_a, &stats_a),
        (tier_b, &stats_b),
        games,
        (rows, cols),
        base_seed,
    )?;
    Ok(())
}

fn board_size(rows: Option<usize>, cols: Option<usize>) -> Result<(usize, usize), CliError> {
    match (rows, cols) {
        (Some(rows), Some(cols)) => Ok((rows, cols)),
        _ => {
            let settings = config::load()?;
            Ok((
                rows.unwrap_or(settings.default_rows),
                cols.unwrap_or(settings.default_cols),
            ))
        }
    }
}

/// Seat one always drops first; side A takes it when `a_moved_first`.
fn play_game(
    rows: usize,
    cols: usize,
    side_a: &dyn Adversary,
    side_b: &dyn Adversary,
    a_moved_first: bool,
) -> Result<GameRecord, CliError> {
    let mut game = Game::new(rows, cols)?;
    let a_seat = if a_moved_first { Seat::One } else { Seat::Two };
    let mut moves = 0u32;

    while !game.is_over() {
        let seat = game.turn();
        let side = if seat == a_seat { side_a } else { side_b };
        let column = side.choose_column(game.board(), seat).ok_or_else(|| {
            CliError::Engine(format!("{} had no legal column", side.name()))
        })?;
        game.apply_move(column)?;
        moves += 1;
    }

    let a_result = match game.status() {
        GameStatus::Won { seat, .. } if *seat == a_seat => SideResult::Won,
        GameStatus::Draw => SideResult::Drew,
        _ => SideResult::Lost,
    };
    Ok(GameRecord {
        a_result,
        a_moved_first,
        moves,
    })
}

fn print_eval_results(
    out: &mut dyn Write,
    (tier_a, stats_a): (Tier, &EvalStats),
    (tier_b, stats_b): (Tier, &EvalStats),
    games: u32,
    (rows, cols): (usize, usize),
    seed: u64,
) -> std::io::Result<()> {
    writeln!(out, "\nAdversary Comparison Results")?;
    writeln!(out, "═══════════════════════════════════════")?;
    writeln!(out, "Games played: {}", games)?;
    writeln!(out, "Board: {}x{}", rows, cols)?;
    writeln!(out, "Seed: {}", seed)?;

    for (label, tier, stats) in [("A", tier_a, stats_a), ("B", tier_b, stats_b)] {
        writeln!(out)?;
        writeln!(out, "Tier-{} ({}):", label, tier)?;
        writeln!(
            out,
            "  Wins:   {} ({:.1}%)",
            stats.wins,
            ui::percent(stats.wins, stats.games_played)
        )?;
        writeln!(
            out,
            "  Losses: {} ({:.1}%)",
            stats.losses,
            ui::percent(stats.losses, stats.games_played)
        )?;
        writeln!(
            out,
            "  Draws:  {} ({:.1}%)",
            stats.draws,
            ui::percent(stats.draws, stats.games_played)
        )?;
        writeln!(out, "  Wins moving first: {}", stats.wins_moving_first)?;
    }

    writeln!(out)?;
    writeln!(out, "Avg moves per game: {:.1}", stats_a.avg_moves())?;
    Ok(())
}
