// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use rayon::prelude::*;

use crate::attacks::AttackTables;
use crate::move_generator::MoveGenerator;
use crate::moves::Move;
use crate::position::Position;
use crate::types::PieceKind;

/// Counts the leaf positions of the legal move tree below `pos`. Root
/// subtrees are counted in parallel.
pub fn perft(tables: &AttackTables, pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let successors = MoveGenerator::new(tables).legal_successors(pos);
    if depth == 1 {
        return successors.len() as u64;
    }

    successors
        .par_iter()
        .map(|next| perft(tables, next, depth - 1))
        .sum()
}

/// Per-move breakdown of `perft`, in move-generation order.
pub fn perft_divide(
    tables: &AttackTables,
    pos: &Position,
    depth: u32,
) -> Vec<(Move, Option<PieceKind>, u64)> {
    let gen = MoveGenerator::new(tables);
    let moves = gen.legal_moves(pos);
    let successors = gen.legal_successors(pos);
    let counts: Vec<u64> = successors
        .par_iter()
        .map(|next| perft(tables, next, depth.saturating_sub(1)))
        .collect();

    moves
        .into_iter()
        .zip(counts)
        .map(|((mov, promotion), count)| (mov, promotion, count))
        .collect()
}
