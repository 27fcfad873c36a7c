// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//! Board evaluation. Evaluators see positions only through `Analysis` and
//! report scores from white's point of view.
use crate::analysis::Analysis;
use crate::position::Position;
use crate::types::{Color, PieceKind, PIECE_KINDS};

mod evaluators;
mod heuristics;
mod score;
pub mod tables;

pub use evaluators::{MaterialEvaluator, PositionalEvaluator, RandomEvaluator};
pub use heuristics::{
    ActiveKnights, BishopPressure, ConnectedRooks, EarlyGameKing, Heuristic, Material, MopUp,
    PawnRelations, PushedPawns, QueenPressure, RookPressure,
};
pub use score::{adjust_for_depth, Evaluation};

pub const KING_VALUE: i32 = 1_000_000;
pub const QUEEN_VALUE: i32 = 900;
pub const ROOK_VALUE: i32 = 500;
pub const BISHOP_VALUE: i32 = 300;
pub const KNIGHT_VALUE: i32 = 300;
pub const PAWN_VALUE: i32 = 100;

/// Score for a position reached by a win, before depth adjustment.
pub const WIN_SCORE: i32 = 10_000_000;

pub trait Evaluator {
    /// Evaluates `pos` on behalf of `perspective`, the player whose choice
    /// the search is weighing. The returned score is still white-positive.
    fn evaluate(&self, pos: &Position, perspective: Color) -> Evaluation;
}

pub fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::King => KING_VALUE,
        PieceKind::Queen => QUEEN_VALUE,
        PieceKind::Rook => ROOK_VALUE,
        PieceKind::Bishop => BISHOP_VALUE,
        PieceKind::Knight => KNIGHT_VALUE,
        PieceKind::Pawn => PAWN_VALUE,
    }
}

/// Summed piece values of one side, king included.
pub fn material(analysis: &Analysis, color: Color) -> i32 {
    PIECE_KINDS
        .iter()
        .map(|&kind| analysis.pieces_of_kind(color, kind).count() as i32 * piece_value(kind))
        .sum()
}
