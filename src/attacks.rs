// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Static board geometry. Every mask here depends only on the square it is
//! computed for, so the tables are built once by `AttackTables::new` and then
//! shared by reference (or behind an `Arc`) between move generators,
//! evaluators and searches.
use crate::bitboard::Bitboard;
use crate::bitboard::{BB_FILES, BB_RANKS};
use crate::types::{Color, Direction, Square, TableIndex, COLORS, DIRECTIONS, SQUARES};

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

/// Precomputed jump, ray, pawn and region masks for all 64 squares.
pub struct AttackTables {
    king: [Bitboard; 64],
    knight: [Bitboard; 64],
    rays: [[Bitboard; 8]; 64],
    pawn_pushes: [[Bitboard; 64]; 2],
    pawn_captures: [[Bitboard; 64]; 2],
    neighborhoods: [Bitboard; 64],
}

impl AttackTables {
    pub fn new() -> AttackTables {
        let mut tables = AttackTables {
            king: [Bitboard::none(); 64],
            knight: [Bitboard::none(); 64],
            rays: [[Bitboard::none(); 8]; 64],
            pawn_pushes: [[Bitboard::none(); 64]; 2],
            pawn_captures: [[Bitboard::none(); 64]; 2],
            neighborhoods: [Bitboard::none(); 64],
        };

        for &sq in SQUARES.iter() {
            let idx = sq.as_index();
            for &dir in DIRECTIONS.iter() {
                if let Some(adjacent) = sq.towards(dir) {
                    tables.king[idx].set(adjacent);
                }

                // Cast the ray until it falls off the board.
                let mut ray = Bitboard::none();
                let mut cursor = sq;
                while let Some(next) = cursor.towards(dir) {
                    ray.set(next);
                    cursor = next;
                }
                tables.rays[idx][dir.as_index()] = ray;
            }

            for &(file_delta, rank_delta) in KNIGHT_JUMPS.iter() {
                if let Some(target) = sq.offset(file_delta, rank_delta) {
                    tables.knight[idx].set(target);
                }
            }

            tables.neighborhoods[idx] = tables.king[idx] | Bitboard::of(sq);
            for &color in COLORS.iter() {
                tables.pawn_pushes[color.as_index()][idx] = pawn_pushes_from(sq, color);
                tables.pawn_captures[color.as_index()][idx] = pawn_captures_from(sq, color);
            }
        }

        tables
    }

    pub fn king(&self, sq: Square) -> Bitboard {
        self.king[sq.as_index()]
    }

    pub fn knight(&self, sq: Square) -> Bitboard {
        self.knight[sq.as_index()]
    }

    /// Squares a pawn of the given color may advance to from `sq` on an
    /// empty board, including the two-square advance from its home rank.
    pub fn pawn_pushes(&self, sq: Square, color: Color) -> Bitboard {
        self.pawn_pushes[color.as_index()][sq.as_index()]
    }

    /// Squares a pawn of the given color standing on `sq` attacks. Read in
    /// reverse, these are also the squares from which an enemy pawn attacks
    /// a piece of this color standing on `sq`.
    pub fn pawn_captures(&self, sq: Square, color: Color) -> Bitboard {
        self.pawn_captures[color.as_index()][sq.as_index()]
    }

    /// Every square from `sq` to the edge of the board in `dir`, not
    /// including `sq` itself.
    pub fn ray(&self, sq: Square, dir: Direction) -> Bitboard {
        self.rays[sq.as_index()][dir.as_index()]
    }

    /// The squares of a ray, nearest to `sq` first.
    pub fn ray_squares(&self, sq: Square, dir: Direction) -> RaySquares {
        RaySquares {
            bits: self.ray(sq, dir).bits(),
            positive: dir.is_positive(),
        }
    }

    /// The first occupied square along a ray, if any.
    pub fn first_blocker(&self, sq: Square, dir: Direction, occupancy: Bitboard) -> Option<Square> {
        let blockers = self.ray(sq, dir) & occupancy;
        if dir.is_positive() {
            blockers.first()
        } else {
            blockers.last()
        }
    }

    /// The squares a slider on `sq` reaches in `dir`: every empty square up
    /// to and including the first occupied one.
    pub fn slide(&self, sq: Square, dir: Direction, occupancy: Bitboard) -> Bitboard {
        let ray = self.ray(sq, dir);
        match self.first_blocker(sq, dir, occupancy) {
            Some(blocker) => ray ^ self.ray(blocker, dir),
            None => ray,
        }
    }

    pub fn file_mask(&self, sq: Square) -> Bitboard {
        BB_FILES[sq.file().as_index()]
    }

    pub fn not_file_mask(&self, sq: Square) -> Bitboard {
        !self.file_mask(sq)
    }

    pub fn rank_mask(&self, sq: Square) -> Bitboard {
        BB_RANKS[sq.rank().as_index()]
    }

    pub fn not_rank_mask(&self, sq: Square) -> Bitboard {
        !self.rank_mask(sq)
    }

    /// The 3x3 block of squares centered on `sq`, clipped at the edges.
    pub fn neighborhood(&self, sq: Square) -> Bitboard {
        self.neighborhoods[sq.as_index()]
    }
}

impl Default for AttackTables {
    fn default() -> AttackTables {
        AttackTables::new()
    }
}

fn pawn_pushes_from(sq: Square, color: Color) -> Bitboard {
    let (forward, home_rank) = match color {
        Color::White => (1, 1),
        Color::Black => (-1, 6),
    };

    let mut board = Bitboard::none();
    let rank = sq.rank().as_index();
    if rank == 0 || rank == 7 {
        // Pawns never stand on either back rank.
        return board;
    }

    if let Some(single) = sq.offset(0, forward) {
        board.set(single);
        if rank == home_rank {
            if let Some(double) = single.offset(0, forward) {
                board.set(double);
            }
        }
    }

    board
}

fn pawn_captures_from(sq: Square, color: Color) -> Bitboard {
    let forward = match color {
        Color::White => 1,
        Color::Black => -1,
    };

    let mut board = Bitboard::none();
    for &file_delta in &[-1, 1] {
        if let Some(target) = sq.offset(file_delta, forward) {
            board.set(target);
        }
    }

    board
}

/// Iterator over the squares of one ray, ordered nearest to farthest.
pub struct RaySquares {
    bits: u64,
    positive: bool,
}

impl Iterator for RaySquares {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        if self.bits == 0 {
            return None;
        }

        let idx = if self.positive {
            self.bits.trailing_zeros()
        } else {
            63 - self.bits.leading_zeros()
        };
        self.bits &= !(1u64 << idx);
        Some(Square::from_index(idx as usize))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.bits.count_ones() as usize;
        (len, Some(len))
    }
}

#[cfg(test)]
mod tests {
    use super::AttackTables;
    use crate::bitboard::Bitboard;
    use crate::types::{Color, Direction, Square};

    fn squares(board: Bitboard) -> Vec<Square> {
        board.iter().collect()
    }

    #[test]
    fn knight_corner() {
        let tables = AttackTables::new();
        assert_eq!(vec![Square::C2, Square::B3], squares(tables.knight(Square::A1)));
        assert_eq!(8, tables.knight(Square::E4).count());
        assert_eq!(4, tables.knight(Square::B7).count());
    }

    #[test]
    fn king_edges() {
        let tables = AttackTables::new();
        assert_eq!(3, tables.king(Square::H8).count());
        assert_eq!(5, tables.king(Square::E1).count());
        assert_eq!(8, tables.king(Square::D5).count());
        assert!(!tables.king(Square::A4).test(Square::H3));
    }

    #[test]
    fn rays_are_ordered_nearest_first() {
        let tables = AttackTables::new();
        let north: Vec<_> = tables.ray_squares(Square::D4, Direction::North).collect();
        assert_eq!(vec![Square::D5, Square::D6, Square::D7, Square::D8], north);

        let south_west: Vec<_> = tables.ray_squares(Square::D4, Direction::SouthWest).collect();
        assert_eq!(vec![Square::C3, Square::B2, Square::A1], south_west);

        let west: Vec<_> = tables.ray_squares(Square::C6, Direction::West).collect();
        assert_eq!(vec![Square::B6, Square::A6], west);
    }

    #[test]
    fn rays_do_not_wrap() {
        let tables = AttackTables::new();
        assert!(tables.ray(Square::H3, Direction::East).empty());
        assert!(tables.ray(Square::A5, Direction::NorthWest).empty());
        assert_eq!(7, tables.ray(Square::A1, Direction::NorthEast).count());
        assert!(!tables.ray(Square::H2, Direction::NorthEast).test(Square::A4));
    }

    #[test]
    fn first_blocker_in_both_senses() {
        let tables = AttackTables::new();
        let occupancy = Bitboard::of(Square::D2) | Bitboard::of(Square::D7) | Bitboard::of(Square::D6);
        assert_eq!(
            Some(Square::D6),
            tables.first_blocker(Square::D4, Direction::North, occupancy)
        );
        assert_eq!(
            Some(Square::D2),
            tables.first_blocker(Square::D4, Direction::South, occupancy)
        );
        assert_eq!(None, tables.first_blocker(Square::D4, Direction::East, occupancy));
    }

    #[test]
    fn slide_includes_blocker() {
        let tables = AttackTables::new();
        let occupancy = Bitboard::of(Square::F4);
        let slide = tables.slide(Square::C4, Direction::East, occupancy);
        assert_eq!(vec![Square::D4, Square::E4, Square::F4], squares(slide));
    }

    #[test]
    fn pawn_pushes() {
        let tables = AttackTables::new();
        assert_eq!(
            vec![Square::E3, Square::E4],
            squares(tables.pawn_pushes(Square::E2, Color::White))
        );
        assert_eq!(vec![Square::E4], squares(tables.pawn_pushes(Square::E3, Color::White)));
        assert_eq!(
            vec![Square::C5, Square::C6],
            squares(tables.pawn_pushes(Square::C7, Color::Black))
        );
        assert!(tables.pawn_pushes(Square::C8, Color::White).empty());
        assert!(tables.pawn_pushes(Square::C1, Color::Black).empty());
    }

    #[test]
    fn pawn_captures_are_diagonal() {
        let tables = AttackTables::new();
        assert_eq!(
            vec![Square::D3, Square::F3],
            squares(tables.pawn_captures(Square::E2, Color::White))
        );
        assert_eq!(vec![Square::B6], squares(tables.pawn_captures(Square::A7, Color::Black)));

        // a king on e1 must see black pawns on d2 and f2
        assert_eq!(
            vec![Square::D2, Square::F2],
            squares(tables.pawn_captures(Square::E1, Color::White))
        );
    }

    #[test]
    fn regions() {
        let tables = AttackTables::new();
        assert_eq!(9, tables.neighborhood(Square::E4).count());
        assert_eq!(4, tables.neighborhood(Square::A1).count());
        assert!(tables.neighborhood(Square::A1).test(Square::A1));
        assert_eq!(8, tables.file_mask(Square::C5).count());
        assert!(tables.file_mask(Square::C5).test(Square::C1));
        assert!(!tables.not_file_mask(Square::C5).test(Square::C8));
        assert!(tables.rank_mask(Square::C5).test(Square::H5));
        assert_eq!(56, tables.not_rank_mask(Square::C5).count());
    }
}
