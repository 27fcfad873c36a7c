// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The flag register carried by every `Position`: whose turn it is, which
//! castling pieces have never moved, and which pawns may be captured en
//! passant on this ply.
use crate::types::{Color, File, Square, TableIndex};

bitflags! {
    /// Bit layout of the flag register. The low sixteen bits hold one
    /// en-passant eligibility bit per file for each color; a set bit means a
    /// pawn of that color advanced two squares on that file on the previous
    /// ply. The castling bits are set while the piece has never moved and are
    /// never set again once cleared.
    pub struct StateFlags: u32 {
        const WHITE_EN_PASSANT = 0x0000_00FF;
        const BLACK_EN_PASSANT = 0x0000_FF00;
        const EN_PASSANT = Self::WHITE_EN_PASSANT.bits | Self::BLACK_EN_PASSANT.bits;

        const WHITE_A_ROOK = 1 << 16;
        const WHITE_H_ROOK = 1 << 17;
        const BLACK_H_ROOK = 1 << 18;
        const BLACK_A_ROOK = 1 << 19;
        const WHITE_KING = 1 << 20;
        const BLACK_KING = 1 << 21;
        const CASTLING = Self::WHITE_A_ROOK.bits
            | Self::WHITE_H_ROOK.bits
            | Self::BLACK_H_ROOK.bits
            | Self::BLACK_A_ROOK.bits
            | Self::WHITE_KING.bits
            | Self::BLACK_KING.bits;

        const BLACK_TO_MOVE = 1 << 22;

        /// The register of the standard starting position.
        const START = Self::CASTLING.bits;
    }
}

/// One of the four castling moves, named by the rook the king castles with.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CastleSide {
    /// Toward the rook on the a-file.
    A,
    /// Toward the rook on the h-file.
    H,
}

pub static CASTLE_SIDES: [CastleSide; 2] = [CastleSide::A, CastleSide::H];

impl StateFlags {
    pub fn side_to_move(self) -> Color {
        if self.contains(StateFlags::BLACK_TO_MOVE) {
            Color::Black
        } else {
            Color::White
        }
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.set(StateFlags::BLACK_TO_MOVE, color == Color::Black);
    }

    /// Whether a pawn of `color` just advanced two squares on `file`.
    pub fn en_passant(self, color: Color, file: File) -> bool {
        self.contains(en_passant_bit(color, file))
    }

    pub fn set_en_passant(&mut self, color: Color, file: File) {
        self.insert(en_passant_bit(color, file));
    }

    pub fn clear_en_passant(&mut self) {
        self.remove(StateFlags::EN_PASSANT);
    }

    /// The en-passant eligibility bits of one color, as a bitmask over files.
    pub fn en_passant_files(self, color: Color) -> u8 {
        let shift = color.as_index() * 8;
        ((self.bits() >> shift) & 0xFF) as u8
    }

    pub fn king_unmoved(self, color: Color) -> bool {
        self.contains(king_flag(color))
    }

    pub fn rook_unmoved(self, color: Color, side: CastleSide) -> bool {
        self.contains(rook_flag(color, side))
    }

    /// Whether the king and the rook on `side` both still have their
    /// never-moved bits. This is necessary but not sufficient for castling.
    pub fn castle_rights(self, color: Color, side: CastleSide) -> bool {
        self.contains(king_flag(color) | rook_flag(color, side))
    }

    /// Sets both never-moved bits that castling toward `side` needs.
    pub fn grant_castle(&mut self, color: Color, side: CastleSide) {
        self.insert(king_flag(color) | rook_flag(color, side));
    }

    pub fn revoke_king(&mut self, color: Color) {
        self.remove(king_flag(color));
    }

    pub fn revoke_rook(&mut self, color: Color, side: CastleSide) {
        self.remove(rook_flag(color, side));
    }

    /// Revokes the rook bit belonging to `square`, if `square` is the home
    /// square of a castling rook.
    pub fn revoke_rook_on(&mut self, square: Square) {
        if let Some((color, side)) = rook_home_owner(square) {
            self.revoke_rook(color, side);
        }
    }
}

fn en_passant_bit(color: Color, file: File) -> StateFlags {
    StateFlags::from_bits_truncate(1 << (color.as_index() * 8 + file.as_index()))
}

fn king_flag(color: Color) -> StateFlags {
    match color {
        Color::White => StateFlags::WHITE_KING,
        Color::Black => StateFlags::BLACK_KING,
    }
}

fn rook_flag(color: Color, side: CastleSide) -> StateFlags {
    match (color, side) {
        (Color::White, CastleSide::A) => StateFlags::WHITE_A_ROOK,
        (Color::White, CastleSide::H) => StateFlags::WHITE_H_ROOK,
        (Color::Black, CastleSide::A) => StateFlags::BLACK_A_ROOK,
        (Color::Black, CastleSide::H) => StateFlags::BLACK_H_ROOK,
    }
}

fn rook_home_owner(square: Square) -> Option<(Color, CastleSide)> {
    match square {
        Square::A1 => Some((Color::White, CastleSide::A)),
        Square::H1 => Some((Color::White, CastleSide::H)),
        Square::A8 => Some((Color::Black, CastleSide::A)),
        Square::H8 => Some((Color::Black, CastleSide::H)),
        _ => None,
    }
}

pub fn king_home(color: Color) -> Square {
    match color {
        Color::White => Square::E1,
        Color::Black => Square::E8,
    }
}

pub fn rook_home(color: Color, side: CastleSide) -> Square {
    match (color, side) {
        (Color::White, CastleSide::A) => Square::A1,
        (Color::White, CastleSide::H) => Square::H1,
        (Color::Black, CastleSide::A) => Square::A8,
        (Color::Black, CastleSide::H) => Square::H8,
    }
}

/// Where the king and rook land after castling: `(king, rook)`.
pub fn castle_destinations(color: Color, side: CastleSide) -> (Square, Square) {
    match (color, side) {
        (Color::White, CastleSide::A) => (Square::C1, Square::D1),
        (Color::White, CastleSide::H) => (Square::G1, Square::F1),
        (Color::Black, CastleSide::A) => (Square::C8, Square::D8),
        (Color::Black, CastleSide::H) => (Square::G8, Square::F8),
    }
}
