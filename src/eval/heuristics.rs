// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//! Independent scoring components folded together by `PositionalEvaluator`.
//! Each reports a bonus for one color; the evaluator adds white's and
//! subtracts black's.
use rand::Rng;

use crate::analysis::Analysis;
use crate::bitboard::Bitboard;
use crate::eval::tables;
use crate::eval::{material, KING_VALUE};
use crate::types::{Color, Direction, PieceKind, TableIndex, RANKS};
use crate::types::{DIAGONAL_DIRECTIONS, DIRECTIONS, ORTHOGONAL_DIRECTIONS};

pub trait Heuristic: Send + Sync {
    fn name(&self) -> &'static str;

    /// The bonus earned by `color` in the analyzed position.
    fn bonus(&self, analysis: &Analysis, color: Color) -> i32;

    /// Contribution to the white-positive score.
    fn score(&self, analysis: &Analysis) -> i32 {
        self.bonus(analysis, Color::White) - self.bonus(analysis, Color::Black)
    }
}

/// Piece values, plus a little noise so repeated games differ.
pub struct Material {
    jitter: bool,
}

impl Material {
    pub fn new(jitter: bool) -> Material {
        Material { jitter }
    }
}

impl Heuristic for Material {
    fn name(&self) -> &'static str {
        "material"
    }

    fn bonus(&self, analysis: &Analysis, color: Color) -> i32 {
        material(analysis, color)
    }

    fn score(&self, analysis: &Analysis) -> i32 {
        let base = material(analysis, Color::White) - material(analysis, Color::Black);
        if self.jitter {
            base + rand::thread_rng().gen_range(0, 6)
        } else {
            base
        }
    }
}

/// Shared scoring for sliding pieces: one point per open square along each
/// ray, the placement table, and a weight per ray end landing next to the
/// enemy king that grows as pieces come off the board.
fn slider_pressure(
    analysis: &Analysis,
    color: Color,
    kind: PieceKind,
    dirs: &[Direction],
    placement: &[[i32; 64]; 2],
    weight_base: i32,
) -> i32 {
    let king_zone = analysis
        .king_square(color.toggle())
        .map(|sq| analysis.neighborhood(sq))
        .unwrap_or_else(Bitboard::none);
    let weight = weight_base - analysis.piece_count() as i32;

    let mut bonus = 0;
    for sq in analysis.pieces_of_kind(color, kind) {
        let (open, collisions) = analysis.pressure(sq, dirs, 1);
        bonus += open;
        bonus += placement[color.as_index()][sq.as_index()];
        bonus += weight * (collisions & king_zone).count() as i32;
    }

    bonus
}

pub struct RookPressure;

impl Heuristic for RookPressure {
    fn name(&self) -> &'static str {
        "rook pressure"
    }

    fn bonus(&self, analysis: &Analysis, color: Color) -> i32 {
        slider_pressure(
            analysis,
            color,
            PieceKind::Rook,
            &ORTHOGONAL_DIRECTIONS,
            &tables::ROOK_BONUS,
            40,
        )
    }
}

pub struct QueenPressure;

impl Heuristic for QueenPressure {
    fn name(&self) -> &'static str {
        "queen pressure"
    }

    fn bonus(&self, analysis: &Analysis, color: Color) -> i32 {
        slider_pressure(
            analysis,
            color,
            PieceKind::Queen,
            &DIRECTIONS,
            &tables::QUEEN_BONUS,
            50,
        )
    }
}

pub struct BishopPressure;

impl Heuristic for BishopPressure {
    fn name(&self) -> &'static str {
        "bishop pressure"
    }

    fn bonus(&self, analysis: &Analysis, color: Color) -> i32 {
        slider_pressure(
            analysis,
            color,
            PieceKind::Bishop,
            &DIAGONAL_DIRECTIONS,
            &tables::BISHOP_BONUS,
            40,
        )
    }
}

/// 15 points each time a rook's ray first meets a friendly rook.
pub struct ConnectedRooks;

impl Heuristic for ConnectedRooks {
    fn name(&self) -> &'static str {
        "connected rooks"
    }

    fn bonus(&self, analysis: &Analysis, color: Color) -> i32 {
        let rooks = analysis.pieces_of_kind(color, PieceKind::Rook);
        rooks
            .into_iter()
            .map(|sq| {
                let (_, collisions) = analysis.pressure(sq, &ORTHOGONAL_DIRECTIONS, 0);
                15 * (collisions & rooks).count() as i32
            })
            .sum()
    }
}

/// Rewards side-by-side pawns outside the opening and penalizes stacked
/// pawns more heavily as the board empties.
pub struct PawnRelations;

impl Heuristic for PawnRelations {
    fn name(&self) -> &'static str {
        "pawn relations"
    }

    fn bonus(&self, analysis: &Analysis, color: Color) -> i32 {
        let total = analysis.piece_count() as i32;
        let mut bonus = 0;
        if total > 30 {
            bonus += 5 * analysis.connected_pawn_links(color) as i32;
        }

        bonus - (32 - total) * analysis.stacked_pawn_links(color) as i32
    }
}

/// Once 16 or fewer pieces remain, advanced pawns earn a per-rank bonus.
pub struct PushedPawns;

impl Heuristic for PushedPawns {
    fn name(&self) -> &'static str {
        "pushed pawns"
    }

    fn bonus(&self, analysis: &Analysis, color: Color) -> i32 {
        if analysis.piece_count() > 16 {
            return 0;
        }

        let values = match color {
            Color::White => &tables::WHITE_PUSHED_PAWN,
            Color::Black => &tables::BLACK_PUSHED_PAWN,
        };
        let pawns = analysis.pieces_of_kind(color, PieceKind::Pawn);
        RANKS[1..7]
            .iter()
            .map(|&rank| {
                let on_rank = pawns.rank(rank).count() as i32;
                on_rank * values[rank.as_index()]
            })
            .sum()
    }
}

/// Drives a nearly bare enemy king toward the edge and our king toward it,
/// once we hold a clear material lead.
pub struct MopUp;

impl Heuristic for MopUp {
    fn name(&self) -> &'static str {
        "mop-up"
    }

    fn bonus(&self, analysis: &Analysis, color: Color) -> i32 {
        let enemy = color.toggle();
        if analysis.pieces(enemy).count() > 3 {
            return 0;
        }

        let ours = material(analysis, color) - KING_VALUE;
        let theirs = material(analysis, enemy) - KING_VALUE;
        // more than one and a half times the enemy's material
        if 2 * ours <= 3 * theirs {
            return 0;
        }

        let (our_king, their_king) = match (analysis.king_square(color), analysis.king_square(enemy)) {
            (Some(ours), Some(theirs)) => (ours, theirs),
            _ => return 0,
        };

        let distance = our_king.manhattan_distance(their_king) as i32;
        let mut bonus = 500 * tables::CENTRE_MANHATTAN_DISTANCE[their_king.as_index()];
        bonus += 100 * (14 - distance);
        if distance <= 4 && analysis.is_in_check(enemy) {
            bonus += 1500;
        }

        bonus
    }
}

pub struct ActiveKnights;

impl Heuristic for ActiveKnights {
    fn name(&self) -> &'static str {
        "active knights"
    }

    fn bonus(&self, analysis: &Analysis, color: Color) -> i32 {
        analysis
            .pieces_of_kind(color, PieceKind::Knight)
            .into_iter()
            .map(|sq| tables::KNIGHT_BONUS[color.as_index()][sq.as_index()])
            .sum()
    }
}

/// Keeps the king sheltered while the enemy still has attackers.
pub struct EarlyGameKing;

impl Heuristic for EarlyGameKing {
    fn name(&self) -> &'static str {
        "early-game king"
    }

    fn bonus(&self, analysis: &Analysis, color: Color) -> i32 {
        if analysis.pieces(color.toggle()).count() < 9 {
            return 0;
        }

        let table = match color {
            Color::White => &tables::WHITE_KING_EARLY_GAME,
            Color::Black => &tables::BLACK_KING_EARLY_GAME,
        };
        analysis
            .king_square(color)
            .map(|sq| table[sq.as_index()])
            .unwrap_or(0)
    }
}
