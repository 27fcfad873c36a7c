// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//! Legal move generation. Candidates are produced per piece, filtered for
//! king safety by re-running check detection against simulated occupancy,
//! and emitted in the engine's move-ordering priority.
use crate::attacks::AttackTables;
use crate::bitboard::Bitboard;
use crate::flags::{self, CastleSide, CASTLE_SIDES};
use crate::moves::Move;
use crate::position::Position;
use crate::types::{Color, Direction, Piece, PieceKind, Rank, Square};
use crate::types::{DIAGONAL_DIRECTIONS, DIRECTIONS, ORTHOGONAL_DIRECTIONS, PROMOTION_KINDS};

/// A legal move together with the promotion it requires, if any.
pub type MoveVec = Vec<(Move, Option<PieceKind>)>;

const KING_QUIET_SLOT: u8 = 0;
const CASTLE_SLOT: u8 = 1;
const CAPTURE_SLOT: u8 = 2;
const QUIET_SLOT: u8 = 8;

/// Pieces in the order their moves are emitted within the capture and
/// non-capture groups.
const GENERATION_ORDER: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
    PieceKind::Queen,
    PieceKind::King,
];

#[derive(Copy, Clone, Debug)]
enum Candidate {
    Castle(CastleSide),
    Step(Piece, Move, Option<PieceKind>),
}

type CandidateVec = Vec<(u8, Candidate)>;

pub struct MoveGenerator<'a> {
    tables: &'a AttackTables,
}

impl<'a> MoveGenerator<'a> {
    pub fn new(tables: &'a AttackTables) -> MoveGenerator<'a> {
        MoveGenerator { tables }
    }

    pub fn tables(&self) -> &'a AttackTables {
        self.tables
    }

    //
    // Check detection
    //

    /// Returns the squares of every enemy piece attacking `square`, which is
    /// defended by `us`. Only pieces inside `enemy` count as hostile and only
    /// `friend | enemy` blocks rays, so callers can ask about hypothetical
    /// occupancy without building a new position.
    pub fn attackers(
        &self,
        pos: &Position,
        square: Square,
        us: Color,
        friend: Bitboard,
        enemy: Bitboard,
    ) -> Bitboard {
        let them = us.toggle();
        let occupancy = friend | enemy;
        let mut found = Bitboard::none();

        let straight = (pos.rooks(them) | pos.queens(them)) & enemy;
        for &dir in ORTHOGONAL_DIRECTIONS.iter() {
            if let Some(blocker) = self.tables.first_blocker(square, dir, occupancy) {
                if straight.test(blocker) {
                    found.set(blocker);
                }
            }
        }

        // Pawns are found by the same diagonal scan: a pawn is hostile when it
        // is the first blocker and sits on a square it captures from.
        let diagonal = (pos.bishops(them) | pos.queens(them)) & enemy;
        let pawns = pos.pawns(them) & enemy & self.tables.pawn_captures(square, us);
        for &dir in DIAGONAL_DIRECTIONS.iter() {
            if let Some(blocker) = self.tables.first_blocker(square, dir, occupancy) {
                if diagonal.test(blocker) || pawns.test(blocker) {
                    found.set(blocker);
                }
            }
        }

        found |= self.tables.knight(square) & pos.knights(them) & enemy;
        found |= self.tables.king(square) & pos.kings(them) & enemy;
        found
    }

    pub fn is_attacked(
        &self,
        pos: &Position,
        square: Square,
        us: Color,
        friend: Bitboard,
        enemy: Bitboard,
    ) -> bool {
        !self.attackers(pos, square, us, friend, enemy).empty()
    }

    /// The enemy pieces currently giving check to `color`'s king.
    pub fn checkers(&self, pos: &Position, color: Color) -> Bitboard {
        match pos.king_square(color) {
            Some(king) => self.attackers(pos, king, color, pos.pieces(color), pos.pieces(color.toggle())),
            None => {
                debug_assert!(false, "{} has no king", color);
                Bitboard::none()
            }
        }
    }

    pub fn is_in_check(&self, pos: &Position, color: Color) -> bool {
        !self.checkers(pos, color).empty()
    }

    //
    // Move generation
    //

    /// Every position reachable by one legal move of the side to move, in
    /// move-ordering priority.
    pub fn legal_successors(&self, pos: &Position) -> Vec<Position> {
        let candidates = self.candidates(pos);
        let mut successors = Vec::with_capacity(candidates.len());
        for &(_, candidate) in candidates.iter() {
            let next = match candidate {
                Candidate::Castle(side) => pos.castle(pos.side_to_move(), side),
                Candidate::Step(piece, mov, None) => pos.apply_piece_move(piece, mov),
                Candidate::Step(piece, mov, Some(kind)) => pos
                    .apply_piece_move(piece, mov)
                    .apply_promotion(mov.destination, kind),
            };
            successors.push(next);
        }

        successors
    }

    /// The same moves as `legal_successors`, in the same order, as moves
    /// rather than positions.
    pub fn legal_moves(&self, pos: &Position) -> MoveVec {
        let color = pos.side_to_move();
        self.candidates(pos)
            .iter()
            .map(|&(_, candidate)| match candidate {
                Candidate::Castle(side) => {
                    let (king_to, _) = flags::castle_destinations(color, side);
                    (Move::new(flags::king_home(color), king_to), None)
                }
                Candidate::Step(_, mov, promotion) => (mov, promotion),
            })
            .collect()
    }

    /// Whether `mov` is legal from `pos`. A pawn move onto the last rank is
    /// never legal on its own; use `is_legal_promotion`.
    pub fn is_legal_move(&self, pos: &Position, mov: Move) -> bool {
        let piece = match pos.piece_at(mov.origin) {
            Some(piece) if piece.color == pos.side_to_move() => piece,
            _ => return false,
        };

        if piece.kind == PieceKind::Pawn && is_back_rank(mov.destination.rank()) {
            return false;
        }

        let target = pos.apply_move(mov);
        self.legal_successors(pos).contains(&target)
    }

    pub fn is_legal_promotion(&self, pos: &Position, mov: Move, kind: PieceKind) -> bool {
        match pos.piece_at(mov.origin) {
            Some(piece) if piece.color == pos.side_to_move() && piece.kind == PieceKind::Pawn => {}
            _ => return false,
        }

        if !is_back_rank(mov.destination.rank()) || !PROMOTION_KINDS.contains(&kind) {
            return false;
        }

        let target = pos.apply_move(mov).apply_promotion(mov.destination, kind);
        self.legal_successors(pos).contains(&target)
    }

    fn candidates(&self, pos: &Position) -> CandidateVec {
        let mut out = CandidateVec::with_capacity(48);
        let us = pos.side_to_move();
        let friend = pos.pieces(us);
        let enemy = pos.pieces(us.toggle());
        let king = match pos.king_square(us) {
            Some(king) => king,
            None => {
                debug_assert!(false, "{} has no king", us);
                return out;
            }
        };

        let checkers = self.attackers(pos, king, us, friend, enemy);
        self.add_king_moves(pos, king, friend, enemy, &mut out);
        if checkers.count() >= 2 {
            // Only the king may answer a double check.
            out.sort_by_key(|&(slot, _)| slot);
            return out;
        }

        if checkers.empty() {
            self.add_castles(pos, friend, enemy, &mut out);
        }

        let occupancy = friend | enemy;
        let ep_targets = pos.en_passant_targets();
        for &kind in GENERATION_ORDER[..5].iter() {
            let piece = Piece::new(kind, us);
            for origin in pos.pieces_of_kind(us, kind) {
                let destinations = match kind {
                    PieceKind::Pawn => self.pawn_destinations(origin, us, occupancy, enemy | ep_targets),
                    PieceKind::Knight => self.tables.knight(origin) & !friend,
                    PieceKind::Bishop => self.slides(origin, &DIAGONAL_DIRECTIONS, occupancy) & !friend,
                    PieceKind::Rook => self.slides(origin, &ORTHOGONAL_DIRECTIONS, occupancy) & !friend,
                    PieceKind::Queen => self.slides(origin, &DIRECTIONS, occupancy) & !friend,
                    PieceKind::King => unreachable!(),
                };

                for dest in destinations {
                    self.add_step(pos, piece, Move::new(origin, dest), king, friend, enemy, &mut out);
                }
            }
        }

        out.sort_by_key(|&(slot, _)| slot);
        out
    }

    fn add_king_moves(
        &self,
        pos: &Position,
        king: Square,
        friend: Bitboard,
        enemy: Bitboard,
        out: &mut CandidateVec,
    ) {
        let us = pos.side_to_move();
        let piece = Piece::new(PieceKind::King, us);
        // The king leaves the friend mask so it cannot shield its own
        // destination from a slider behind it.
        let friend_without_king = friend.without(Bitboard::of(king));
        for dest in self.tables.king(king) & !friend {
            let captures = enemy.test(dest);
            let enemy_after = enemy.without(Bitboard::of(dest));
            if self.is_attacked(pos, dest, us, friend_without_king, enemy_after) {
                continue;
            }

            let slot = if captures {
                CAPTURE_SLOT + generation_slot(PieceKind::King)
            } else {
                KING_QUIET_SLOT
            };
            out.push((slot, Candidate::Step(piece, Move::new(king, dest), None)));
        }
    }

    fn add_castles(&self, pos: &Position, friend: Bitboard, enemy: Bitboard, out: &mut CandidateVec) {
        let us = pos.side_to_move();
        let home = flags::king_home(us);
        if pos.king_square(us) != Some(home) {
            return;
        }

        let occupancy = friend | enemy;
        for &side in CASTLE_SIDES.iter() {
            let rook_home = flags::rook_home(us, side);
            if !pos.has_castle_rights(us, side) || !pos.rooks(us).test(rook_home) {
                continue;
            }

            let dir = match side {
                CastleSide::A => Direction::West,
                CastleSide::H => Direction::East,
            };
            let between = self.tables.ray(home, dir).without(Bitboard::of(rook_home));
            if between.intersects(occupancy) {
                continue;
            }

            let (king_to, _) = flags::castle_destinations(us, side);
            let transit = match home.towards(dir) {
                Some(square) => square,
                None => continue,
            };
            let safe = [home, transit, king_to]
                .iter()
                .all(|&sq| !self.is_attacked(pos, sq, us, friend, enemy));
            if safe {
                out.push((CASTLE_SLOT, Candidate::Castle(side)));
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn add_step(
        &self,
        pos: &Position,
        piece: Piece,
        mov: Move,
        king: Square,
        friend: Bitboard,
        enemy: Bitboard,
        out: &mut CandidateVec,
    ) {
        let us = piece.color;
        let mut enemy_after = enemy.without(Bitboard::of(mov.destination));
        let mut captures = enemy.test(mov.destination);
        if piece.kind == PieceKind::Pawn && !captures && mov.origin.file() != mov.destination.file() {
            let victim = Square::of(mov.origin.rank(), mov.destination.file());
            if !pos.pawns(us.toggle()).test(victim) {
                return;
            }

            enemy_after.unset(victim);
            captures = true;
        }

        let mut friend_after = friend.without(Bitboard::of(mov.origin));
        friend_after.set(mov.destination);
        if self.is_attacked(pos, king, us, friend_after, enemy_after) {
            return;
        }

        let slot = generation_slot(piece.kind) + if captures { CAPTURE_SLOT } else { QUIET_SLOT };
        if piece.kind == PieceKind::Pawn && is_back_rank(mov.destination.rank()) {
            for &kind in PROMOTION_KINDS.iter() {
                out.push((slot, Candidate::Step(piece, mov, Some(kind))));
            }
        } else {
            out.push((slot, Candidate::Step(piece, mov, None)));
        }
    }

    fn pawn_destinations(&self, origin: Square, us: Color, occupancy: Bitboard, targets: Bitboard) -> Bitboard {
        let forward = match us {
            Color::White => Direction::North,
            Color::Black => Direction::South,
        };

        let mut destinations = self.tables.pawn_captures(origin, us) & targets;
        match origin.towards(forward) {
            // A blocked single step also rules out the double step.
            Some(single) if !occupancy.test(single) => {
                destinations |= self.tables.pawn_pushes(origin, us) & !occupancy;
            }
            _ => {}
        }

        destinations
    }

    fn slides(&self, origin: Square, dirs: &[Direction], occupancy: Bitboard) -> Bitboard {
        dirs.iter().fold(Bitboard::none(), |acc, &dir| {
            acc | self.tables.slide(origin, dir, occupancy)
        })
    }
}

fn generation_slot(kind: PieceKind) -> u8 {
    GENERATION_ORDER
        .iter()
        .position(|&k| k == kind)
        .unwrap_or(0) as u8
}

fn is_back_rank(rank: Rank) -> bool {
    rank == Rank::One || rank == Rank::Eight
}
