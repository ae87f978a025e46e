//! One-ply building blocks shared by the stronger tiers.
//!
//! Every probe runs against a private copy of the board, so callers can pass
//! a board they only hold a shared reference to.

use fourline_engine::board::Board;
use fourline_engine::seat::Seat;
use rand::Rng;
use rand::seq::IndexedRandom;

/// Leftmost column where `seat` wins immediately.
pub fn winning_column(board: &Board, seat: Seat) -> Option<usize> {
    let mut scratch = board.clone();
    (0..board.cols()).find(|&col| scratch.would_win(col, seat))
}

/// Leftmost column the opponent of `seat` would win in next, i.e. the one to
/// block.
pub fn blocking_column(board: &Board, seat: Seat) -> Option<usize> {
    winning_column(board, seat.opponent())
}

/// Open columns after which the opponent has no immediate win, left to right.
pub fn safe_columns(board: &Board, seat: Seat) -> Vec<usize> {
    board
        .legal_columns()
        .into_iter()
        .filter(|&col| {
            let mut after = board.clone();
            after.drop_piece(col, seat).is_ok() && winning_column(&after, seat.opponent()).is_none()
        })
        .collect()
}

/// Center column first, then alternating left and right moving outward.
pub fn center_out_order(cols: usize) -> Vec<usize> {
    if cols == 0 {
        return Vec::new();
    }
    let center = cols / 2;
    let mut order = Vec::with_capacity(cols);
    order.push(center);
    for offset in 1..cols {
        if let Some(left) = center.checked_sub(offset) {
            order.push(left);
        }
        if center + offset < cols {
            order.push(center + offset);
        }
    }
    order
}

/// Uniform choice among open columns.
pub fn random_column<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<usize> {
    board.legal_columns().choose(rng).copied()
}

/// Win, else block, else the first safe column scanning center-out.
pub fn tactical_column(board: &Board, seat: Seat) -> Option<usize> {
    if let Some(col) = winning_column(board, seat) {
        return Some(col);
    }
    if let Some(col) = blocking_column(board, seat) {
        return Some(col);
    }
    let safe = safe_columns(board, seat);
    center_out_order(board.cols())
        .into_iter()
        .find(|col| safe.contains(col))
}
