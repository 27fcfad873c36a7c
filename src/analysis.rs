// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::attacks::AttackTables;
use crate::bitboard::Bitboard;
use crate::move_generator::MoveGenerator;
use crate::position::Position;
use crate::types::{Color, Direction, PieceKind, Square};

/// How a finished game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    WhiteWins,
    BlackWins,
    Draw,
}

/// Snapshot of a position's game state, suitable for rendering.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct GameStatus {
    pub side_to_move: Color,
    pub white_in_check: bool,
    pub black_in_check: bool,
    pub outcome: Option<Outcome>,
}

impl GameStatus {
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn in_check(&self, color: Color) -> bool {
        match color {
            Color::White => self.white_in_check,
            Color::Black => self.black_in_check,
        }
    }
}

/// Provider of common board analyses upon a static position. Evaluators read
/// positions exclusively through this surface.
pub struct Analysis<'a> {
    pos: &'a Position,
    tables: &'a AttackTables,
}

impl<'a> Analysis<'a> {
    pub fn new(pos: &'a Position, tables: &'a AttackTables) -> Analysis<'a> {
        Analysis { pos, tables }
    }

    pub fn side_to_move(&self) -> Color {
        self.pos.side_to_move()
    }

    pub fn pieces(&self, color: Color) -> Bitboard {
        self.pos.pieces(color)
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pos.pieces_of_kind(color, kind)
    }

    pub fn occupancy(&self) -> Bitboard {
        self.pos.occupancy()
    }

    /// Number of pieces of both colors, kings included.
    pub fn piece_count(&self) -> u32 {
        self.pos.piece_count()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pos.king_square(color)
    }

    pub fn neighborhood(&self, square: Square) -> Bitboard {
        self.tables.neighborhood(square)
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        MoveGenerator::new(self.tables).is_in_check(self.pos, color)
    }

    /// Casts rays from `origin` in each of `dirs`, adding `increment` for
    /// every empty square crossed. Returns the accumulated bonus and the set
    /// of first occupied squares each ray ran into, of either color.
    pub fn pressure(&self, origin: Square, dirs: &[Direction], increment: i32) -> (i32, Bitboard) {
        let occupancy = self.pos.occupancy();
        let mut bonus = 0;
        let mut collisions = Bitboard::none();
        for &dir in dirs {
            for square in self.tables.ray_squares(origin, dir) {
                if occupancy.test(square) {
                    collisions.set(square);
                    break;
                }

                bonus += increment;
            }
        }

        (bonus, collisions)
    }

    /// Pawns of `color` with a friendly pawn diagonally or orthogonally
    /// beside them on an adjacent file, counted once per neighbour.
    pub fn connected_pawn_links(&self, color: Color) -> u32 {
        let pawns = self.pos.pawns(color);
        pawns
            .into_iter()
            .map(|sq| (self.tables.neighborhood(sq) & self.tables.not_file_mask(sq) & pawns).count())
            .sum()
    }

    /// For each pawn of `color`, the number of other friendly pawns sharing
    /// its file. A doubled pair therefore counts twice.
    pub fn stacked_pawn_links(&self, color: Color) -> u32 {
        let pawns = self.pos.pawns(color);
        pawns
            .into_iter()
            .map(|sq| (self.tables.file_mask(sq).without(Bitboard::of(sq)) & pawns).count())
            .sum()
    }

    /// True when neither side can possibly deliver mate: no pawns, rooks or
    /// queens remain, and each side has at most one minor piece.
    pub fn is_insufficient_material(&self) -> bool {
        use crate::types::COLORS;

        for &color in COLORS.iter() {
            let heavy = self.pos.pawns(color) | self.pos.rooks(color) | self.pos.queens(color);
            if !heavy.empty() {
                return false;
            }

            let minors = self.pos.bishops(color) | self.pos.knights(color);
            if minors.count() > 1 {
                return false;
            }
        }

        true
    }

    /// Side to move, check flags for both colors, and the outcome if the game
    /// has ended.
    pub fn status(&self) -> GameStatus {
        let gen = MoveGenerator::new(self.tables);
        let side_to_move = self.pos.side_to_move();
        let white_in_check = gen.is_in_check(self.pos, Color::White);
        let black_in_check = gen.is_in_check(self.pos, Color::Black);
        let mover_in_check = match side_to_move {
            Color::White => white_in_check,
            Color::Black => black_in_check,
        };

        let outcome = if gen.legal_successors(self.pos).is_empty() {
            if !mover_in_check {
                Some(Outcome::Draw)
            } else if side_to_move == Color::White {
                Some(Outcome::BlackWins)
            } else {
                Some(Outcome::WhiteWins)
            }
        } else if self.is_insufficient_material() {
            Some(Outcome::Draw)
        } else {
            None
        };

        GameStatus {
            side_to_move,
            white_in_check,
            black_in_check,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Analysis, Outcome};

    use crate::attacks::AttackTables;
    use crate::position::Position;
    use crate::types::{Color, Square, DIRECTIONS, ORTHOGONAL_DIRECTIONS};

    #[test]
    fn start_position_status() {
        let tables = AttackTables::new();
        let pos = Position::from_start_position();
        let status = Analysis::new(&pos, &tables).status();
        assert_eq!(Color::White, status.side_to_move);
        assert!(!status.white_in_check);
        assert!(!status.black_in_check);
        assert_eq!(None, status.outcome);
    }

    #[test]
    fn checkmate_status() {
        let tables = AttackTables::new();
        // fool's mate
        let pos =
            Position::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3")
                .unwrap();
        let status = Analysis::new(&pos, &tables).status();
        assert!(status.white_in_check);
        assert_eq!(Some(Outcome::BlackWins), status.outcome);
    }

    #[test]
    fn stalemate_status() {
        let tables = AttackTables::new();
        let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        let status = Analysis::new(&pos, &tables).status();
        assert!(!status.black_in_check);
        assert_eq!(Some(Outcome::Draw), status.outcome);
    }

    #[test]
    fn insufficient_material() {
        let tables = AttackTables::new();
        for fen in &[
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/2B1K3 w - - 0 1",
            "4kn2/8/8/8/8/8/8/2B1K3 w - - 0 1",
        ] {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(Some(Outcome::Draw), Analysis::new(&pos, &tables).status().outcome);
        }

        for fen in &[
            "4k3/8/8/8/8/8/8/1NB1K3 w - - 0 1",
            "4k3/8/8/8/8/8/4P3/4K3 w - - 0 1",
            "4k3/8/8/8/8/8/8/R3K3 w - - 0 1",
        ] {
            let pos = Position::from_fen(fen).unwrap();
            assert_eq!(None, Analysis::new(&pos, &tables).status().outcome);
        }
    }

    #[test]
    fn pressure_counts_empty_squares() {
        let tables = AttackTables::new();
        let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let analysis = Analysis::new(&pos, &tables);
        let (bonus, collisions) = analysis.pressure(Square::A1, &ORTHOGONAL_DIRECTIONS, 1);

        // seven squares up the file, three along the rank before the king
        assert_eq!(10, bonus);
        assert_eq!(1, collisions.count());
        assert!(collisions.test(Square::E1));
    }

    #[test]
    fn pressure_with_zero_increment_only_collects() {
        let tables = AttackTables::new();
        let pos = Position::from_fen("4k3/8/8/3q4/8/8/8/R2QK3 w - - 0 1").unwrap();
        let analysis = Analysis::new(&pos, &tables);
        let (bonus, collisions) = analysis.pressure(Square::D1, &DIRECTIONS, 0);
        assert_eq!(0, bonus);
        assert!(collisions.test(Square::D5));
        assert!(collisions.test(Square::A1));
        assert!(collisions.test(Square::E1));
    }

    #[test]
    fn pawn_links() {
        let tables = AttackTables::new();
        let pos = Position::from_fen("4k3/8/8/8/8/2PP4/2P5/4K3 w - - 0 1").unwrap();
        let analysis = Analysis::new(&pos, &tables);

        // c3-d3 and c2-d3 are neighbours, each counted from both ends
        assert_eq!(4, analysis.connected_pawn_links(Color::White));
        // c2 and c3 share a file, counted from both ends
        assert_eq!(2, analysis.stacked_pawn_links(Color::White));
        assert_eq!(0, analysis.stacked_pawn_links(Color::Black));
    }
}
