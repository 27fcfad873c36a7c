// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::error::Error;
use std::fmt;

use crate::attacks::AttackTables;
use crate::bitboard::{Bitboard, BB_BACK_RANKS};
use crate::flags::{self, CastleSide, StateFlags};
use crate::move_generator::MoveGenerator;
use crate::moves::Move;
use crate::types::TableIndex;
use crate::types::{Color, File, Piece, PieceKind, Rank, Square};
use crate::types::{COLORS, FILES, RANKS};

/// Possible errors that can arise when parsing a FEN string into a `Position`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FenParseError {
    UnexpectedChar(char),
    UnexpectedEnd,
    InvalidDigit,
    FileDoesNotSumToEight,
    UnknownPiece,
    InvalidSideToMove,
    InvalidCastle,
    InvalidEnPassant,
    EmptyHalfmove,
    InvalidHalfmove,
    EmptyFullmove,
    InvalidFullmove,
}

impl fmt::Display for FenParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FenParseError::UnexpectedChar(c) => write!(f, "unexpected character '{}'", c),
            FenParseError::UnexpectedEnd => write!(f, "unexpected end of input"),
            FenParseError::InvalidDigit => write!(f, "empty-square count must be 1 through 8"),
            FenParseError::FileDoesNotSumToEight => write!(f, "rank does not span eight files"),
            FenParseError::UnknownPiece => write!(f, "unknown piece letter"),
            FenParseError::InvalidSideToMove => write!(f, "side to move must be 'w' or 'b'"),
            FenParseError::InvalidCastle => write!(f, "invalid castling field"),
            FenParseError::InvalidEnPassant => write!(f, "invalid en passant field"),
            FenParseError::EmptyHalfmove => write!(f, "missing halfmove clock"),
            FenParseError::InvalidHalfmove => write!(f, "invalid halfmove clock"),
            FenParseError::EmptyFullmove => write!(f, "missing fullmove number"),
            FenParseError::InvalidFullmove => write!(f, "invalid fullmove number"),
        }
    }
}

impl Error for FenParseError {}

/// Reasons a position built in setup mode cannot be played from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SetupError {
    MissingKing(Color),
    ExtraKing(Color),
    KingInCheck(Color),
    PawnOnBackRank(Square),
}

impl fmt::Display for SetupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn name(color: &Color) -> &'static str {
            match color {
                Color::White => "white",
                Color::Black => "black",
            }
        }

        match self {
            SetupError::MissingKing(color) => write!(f, "{} has no king", name(color)),
            SetupError::ExtraKing(color) => write!(f, "{} has more than one king", name(color)),
            SetupError::KingInCheck(color) => write!(f, "{} king is in check", name(color)),
            SetupError::PawnOnBackRank(sq) => write!(f, "pawn on back rank square {}", sq),
        }
    }
}

impl Error for SetupError {}

/// A chess position: twelve pairwise-disjoint occupancy sets, one per piece
/// kind and color, plus the flag register. Positions are small plain values;
/// applying a move produces a new position and leaves the old one untouched.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    boards: [Bitboard; 12],
    flags: StateFlags,
}

//
// Board state getters
//

impl Position {
    /// An empty board with white to move and no castling rights.
    pub const fn empty() -> Position {
        Position {
            boards: [Bitboard::none(); 12],
            flags: StateFlags::empty(),
        }
    }

    pub fn flags(&self) -> StateFlags {
        self.flags
    }

    pub fn side_to_move(&self) -> Color {
        self.flags.side_to_move()
    }

    /// The twelve occupancy sets: white king, queen, bishop, knight, rook and
    /// pawn, then the same for black.
    pub fn boards(&self) -> &[Bitboard; 12] {
        &self.boards
    }

    pub fn pieces_of_kind(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.boards[Piece::new(kind, color).board_index()]
    }

    /// Combined occupancy of every piece of one color.
    pub fn pieces(&self, color: Color) -> Bitboard {
        let offset = color.as_index() * 6;
        self.boards[offset..offset + 6]
            .iter()
            .fold(Bitboard::none(), |acc, &board| acc | board)
    }

    pub fn occupancy(&self) -> Bitboard {
        self.pieces(Color::White) | self.pieces(Color::Black)
    }

    pub fn pawns(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Pawn)
    }

    pub fn bishops(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Bishop)
    }

    pub fn knights(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Knight)
    }

    pub fn rooks(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Rook)
    }

    pub fn queens(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::Queen)
    }

    pub fn kings(&self, color: Color) -> Bitboard {
        self.pieces_of_kind(color, PieceKind::King)
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings(color).first()
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.boards
            .iter()
            .position(|board| board.test(square))
            .map(Piece::from_board_index)
    }

    /// The number of pieces of both colors on the board.
    pub fn piece_count(&self) -> u32 {
        self.occupancy().count()
    }

    /// Whether both never-moved bits needed to castle toward `side` are set.
    /// Says nothing about attacked or occupied squares.
    pub fn has_castle_rights(&self, color: Color, side: CastleSide) -> bool {
        self.flags.castle_rights(color, side)
    }

    /// The squares the side to move may capture onto en passant: for each
    /// enemy pawn that advanced two squares on the last ply, the square it
    /// passed over.
    pub fn en_passant_targets(&self) -> Bitboard {
        let mover = self.side_to_move();
        let files = u64::from(self.flags.en_passant_files(mover.toggle()));
        match mover {
            Color::White => Bitboard::from_bits(files << 40),
            Color::Black => Bitboard::from_bits(files << 16),
        }
    }

    /// A pawn standing on the first or last rank, which must be promoted
    /// before play continues.
    pub fn pending_promotion(&self) -> Option<Square> {
        let pawns = self.pawns(Color::White) | self.pawns(Color::Black);
        (pawns & BB_BACK_RANKS).first()
    }
}

//
// Move application and board manipulation
//

impl Position {
    /// Puts `piece` on `square`, replacing anything already there.
    pub fn place_piece(&mut self, square: Square, piece: Piece) {
        self.clear_square(square);
        self.boards[piece.board_index()].set(square);
    }

    pub fn clear_square(&mut self, square: Square) {
        for board in self.boards.iter_mut() {
            board.unset(square);
        }
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.flags.set_side_to_move(color);
    }

    /// Grants or withdraws the right to castle toward `side`. Granting sets
    /// both the king's and the rook's never-moved bits.
    pub fn set_castling_rights(&mut self, color: Color, side: CastleSide, allowed: bool) {
        if allowed {
            self.flags.grant_castle(color, side);
        } else {
            self.flags.revoke_rook(color, side);
        }
    }

    /// Applies a move without checking that it is legal. Captures, en
    /// passant and castling are inferred from the pieces on the board; a
    /// king stepping two files from its home square castles.
    pub fn apply_move(&self, mov: Move) -> Position {
        let piece = match self.piece_at(mov.origin) {
            Some(piece) => piece,
            None => {
                debug_assert!(false, "no piece on {} for move {}", mov.origin, mov);
                return *self;
            }
        };

        if piece.kind == PieceKind::King && mov.origin == flags::king_home(piece.color) {
            match mov.destination.file() {
                File::C => return self.castle(piece.color, CastleSide::A),
                File::G => return self.castle(piece.color, CastleSide::H),
                _ => {}
            }
        }

        self.apply_piece_move(piece, mov)
    }

    /// Replaces the pawn on `square` with a piece of the same color.
    pub fn apply_promotion(&self, square: Square, kind: PieceKind) -> Position {
        let mut next = *self;
        let color = if self.pawns(Color::White).test(square) {
            Color::White
        } else {
            debug_assert!(self.pawns(Color::Black).test(square), "no pawn on {}", square);
            Color::Black
        };

        next.boards[Piece::new(PieceKind::Pawn, color).board_index()].unset(square);
        next.boards[Piece::new(kind, color).board_index()].set(square);
        next
    }

    /// Moves a known piece, handling captures and the flag register but not
    /// castling.
    pub(crate) fn apply_piece_move(&self, piece: Piece, mov: Move) -> Position {
        let mut next = *self;
        let enemy = piece.color.toggle();
        next.flags.clear_en_passant();

        let enemy_offset = enemy.as_index() * 6;
        let captured = self.boards[enemy_offset..enemy_offset + 6]
            .iter()
            .position(|board| board.test(mov.destination));
        if let Some(kind_idx) = captured {
            next.boards[enemy_offset + kind_idx].unset(mov.destination);
            next.flags.revoke_rook_on(mov.destination);
        } else if piece.kind == PieceKind::Pawn && mov.origin.file() != mov.destination.file() {
            // A diagonal pawn move onto an empty square takes en passant. The
            // captured pawn sits beside the origin, on the destination file.
            let victim = Square::of(mov.origin.rank(), mov.destination.file());
            next.boards[Piece::new(PieceKind::Pawn, enemy).board_index()].unset(victim);
        }

        let board = &mut next.boards[piece.board_index()];
        board.unset(mov.origin);
        board.set(mov.destination);

        match piece.kind {
            PieceKind::King => next.flags.revoke_king(piece.color),
            PieceKind::Rook => next.flags.revoke_rook_on(mov.origin),
            PieceKind::Pawn => {
                let distance = (mov.origin.as_index() as i32 - mov.destination.as_index() as i32).abs();
                if distance == 16 {
                    next.flags.set_en_passant(piece.color, mov.origin.file());
                }
            }
            _ => {}
        }

        next.flags.set_side_to_move(self.side_to_move().toggle());
        next
    }

    /// Castles as a single compound move: the king and the rook relocate
    /// together and both lose their never-moved bits.
    pub(crate) fn castle(&self, color: Color, side: CastleSide) -> Position {
        let mut next = *self;
        let (king_to, rook_to) = flags::castle_destinations(color, side);
        let king = &mut next.boards[Piece::new(PieceKind::King, color).board_index()];
        king.unset(flags::king_home(color));
        king.set(king_to);

        let rook = &mut next.boards[Piece::new(PieceKind::Rook, color).board_index()];
        rook.unset(flags::rook_home(color, side));
        rook.set(rook_to);

        next.flags.clear_en_passant();
        next.flags.revoke_king(color);
        next.flags.revoke_rook(color, side);
        next.flags.set_side_to_move(self.side_to_move().toggle());
        next
    }

    /// Checks that a position built in setup mode can be played from: one
    /// king per color, neither king attacked, and no pawn on a back rank.
    pub fn validate_setup(&self, tables: &AttackTables) -> Result<(), SetupError> {
        for &color in COLORS.iter() {
            match self.kings(color).count() {
                0 => return Err(SetupError::MissingKing(color)),
                1 => {}
                _ => return Err(SetupError::ExtraKing(color)),
            }
        }

        if let Some(square) = self.pending_promotion() {
            return Err(SetupError::PawnOnBackRank(square));
        }

        let gen = MoveGenerator::new(tables);
        for &color in COLORS.iter() {
            if gen.is_in_check(self, color) {
                return Err(SetupError::KingInCheck(color));
            }
        }

        Ok(())
    }
}

//
// FEN parsing and generation.
//
// The position model keeps no move clocks, so the halfmove and fullmove
// fields are validated on the way in and written as "0 1" on the way out.
//

impl Position {
    pub fn from_start_position() -> Position {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut pos = Position::empty();
        for (&file, &kind) in FILES.iter().zip(BACK_RANK.iter()) {
            pos.place_piece(Square::of(Rank::One, file), Piece::new(kind, Color::White));
            pos.place_piece(Square::of(Rank::Two, file), Piece::new(PieceKind::Pawn, Color::White));
            pos.place_piece(Square::of(Rank::Seven, file), Piece::new(PieceKind::Pawn, Color::Black));
            pos.place_piece(Square::of(Rank::Eight, file), Piece::new(kind, Color::Black));
        }

        pos.flags = StateFlags::START;
        pos
    }

    pub fn from_fen<S: AsRef<str>>(fen: S) -> Result<Position, FenParseError> {
        use std::iter::Peekable;
        use std::str::Chars;

        type Stream<'a> = Peekable<Chars<'a>>;

        fn eat<'a>(iter: &mut Stream<'a>, expected: char) -> Result<(), FenParseError> {
            match iter.next() {
                Some(c) if c == expected => Ok(()),
                Some(c) => Err(FenParseError::UnexpectedChar(c)),
                None => Err(FenParseError::UnexpectedEnd),
            }
        }

        fn advance<'a>(iter: &mut Stream<'a>) -> Result<(), FenParseError> {
            let _ = iter.next();
            Ok(())
        }

        fn peek<'a>(iter: &mut Stream<'a>) -> Result<char, FenParseError> {
            if let Some(c) = iter.peek() {
                Ok(*c)
            } else {
                Err(FenParseError::UnexpectedEnd)
            }
        }

        fn eat_side_to_move<'a>(iter: &mut Stream<'a>) -> Result<Color, FenParseError> {
            let side = match peek(iter)? {
                'w' => Color::White,
                'b' => Color::Black,
                _ => return Err(FenParseError::InvalidSideToMove),
            };

            advance(iter)?;
            Ok(side)
        }

        fn eat_castle_status<'a>(iter: &mut Stream<'a>) -> Result<StateFlags, FenParseError> {
            if peek(iter)? == '-' {
                advance(iter)?;
                return Ok(StateFlags::empty());
            }

            let mut status = StateFlags::empty();
            for _ in 0..4 {
                let rights = match iter.peek() {
                    Some('K') => StateFlags::WHITE_KING | StateFlags::WHITE_H_ROOK,
                    Some('Q') => StateFlags::WHITE_KING | StateFlags::WHITE_A_ROOK,
                    Some('k') => StateFlags::BLACK_KING | StateFlags::BLACK_H_ROOK,
                    Some('q') => StateFlags::BLACK_KING | StateFlags::BLACK_A_ROOK,
                    Some(' ') | None => break,
                    Some(_) => return Err(FenParseError::InvalidCastle),
                };

                status |= rights;
                advance(iter)?;
            }

            if status.is_empty() {
                return Err(FenParseError::InvalidCastle);
            }

            Ok(status)
        }

        fn eat_en_passant<'a>(iter: &mut Stream<'a>) -> Result<StateFlags, FenParseError> {
            let c = peek(iter)?;
            if c == '-' {
                advance(iter)?;
                return Ok(StateFlags::empty());
            }

            let file = File::try_from(c).map_err(|_| FenParseError::InvalidEnPassant)?;
            advance(iter)?;
            let rank = Rank::try_from(peek(iter)?).map_err(|_| FenParseError::InvalidEnPassant)?;
            advance(iter)?;

            // The square named is the one the pawn skipped over, which tells
            // us which color made the double push.
            let mut flags = StateFlags::empty();
            match rank {
                Rank::Three => flags.set_en_passant(Color::White, file),
                Rank::Six => flags.set_en_passant(Color::Black, file),
                _ => return Err(FenParseError::InvalidEnPassant),
            }

            Ok(flags)
        }

        fn eat_number<'a>(
            iter: &mut Stream<'a>,
            empty: FenParseError,
            invalid: FenParseError,
        ) -> Result<u32, FenParseError> {
            let mut buf = String::new();
            while let Some(&c) = iter.peek() {
                if !c.is_digit(10) {
                    break;
                }

                buf.push(c);
                advance(iter)?;
            }

            if buf.is_empty() {
                return Err(empty);
            }

            buf.parse::<u32>().map_err(|_| invalid)
        }

        let mut pos = Position::empty();
        let str_ref = fen.as_ref();
        let iter = &mut str_ref.chars().peekable();
        for &rank in RANKS.iter().rev() {
            let mut file = File::A as usize;
            while file <= File::H as usize {
                let c = peek(iter)?;
                // digits 1 through 8 indicate empty squares.
                if c.is_digit(10) {
                    if c < '1' || c > '8' {
                        return Err(FenParseError::InvalidDigit);
                    }

                    let value = c as usize - '0' as usize;
                    file += value;
                    if file > 8 {
                        return Err(FenParseError::FileDoesNotSumToEight);
                    }

                    advance(iter)?;
                    continue;
                }

                // if it's not a digit, it represents a piece.
                let piece = Piece::try_from(c).map_err(|_| FenParseError::UnknownPiece)?;
                let square = Square::of(rank, File::from_index(file));
                pos.place_piece(square, piece);
                advance(iter)?;
                file += 1;
            }

            if rank != Rank::One {
                eat(iter, '/')?;
            }
        }

        eat(iter, ' ')?;
        let side = eat_side_to_move(iter)?;
        eat(iter, ' ')?;
        pos.flags = eat_castle_status(iter)?;
        eat(iter, ' ')?;
        pos.flags |= eat_en_passant(iter)?;
        pos.flags.set_side_to_move(side);

        // Move clocks are optional.
        if iter.peek().is_none() {
            return Ok(pos);
        }

        eat(iter, ' ')?;
        eat_number(iter, FenParseError::EmptyHalfmove, FenParseError::InvalidHalfmove)?;
        eat(iter, ' ')?;
        eat_number(iter, FenParseError::EmptyFullmove, FenParseError::InvalidFullmove)?;
        Ok(pos)
    }

    pub fn as_fen(&self) -> String {
        let mut buf = String::new();
        for &rank in RANKS.iter().rev() {
            let mut empty_squares = 0;
            for &file in &FILES {
                let square = Square::of(rank, file);
                if let Some(piece) = self.piece_at(square) {
                    if empty_squares != 0 {
                        buf.push_str(&empty_squares.to_string());
                    }
                    buf.push_str(&piece.to_string());
                    empty_squares = 0;
                } else {
                    empty_squares += 1;
                }
            }

            if empty_squares != 0 {
                buf.push_str(&empty_squares.to_string());
            }

            if rank != Rank::One {
                buf.push('/');
            }
        }

        buf.push(' ');
        buf.push_str(&self.side_to_move().to_string());
        buf.push(' ');
        let rights = [
            (Color::White, CastleSide::H, 'K'),
            (Color::White, CastleSide::A, 'Q'),
            (Color::Black, CastleSide::H, 'k'),
            (Color::Black, CastleSide::A, 'q'),
        ];
        let before = buf.len();
        for &(color, side, c) in rights.iter() {
            if self.has_castle_rights(color, side) {
                buf.push(c);
            }
        }
        if buf.len() == before {
            buf.push('-');
        }

        buf.push(' ');
        match self.en_passant_targets().first() {
            Some(square) => buf.push_str(&square.to_string()),
            None => buf.push('-'),
        }
        buf.push_str(" 0 1");
        buf
    }
}

//
// Trait implementations
//

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for &rank in RANKS.iter().rev() {
            for &file in &FILES {
                let sq = Square::of(rank, file);
                if let Some(piece) = self.piece_at(sq) {
                    write!(f, " {} ", piece)?;
                } else {
                    write!(f, " . ")?;
                }
            }

            writeln!(f, "| {}", rank)?;
        }

        for _ in &FILES {
            write!(f, "---")?;
        }

        writeln!(f)?;
        for &file in &FILES {
            write!(f, " {} ", file)?;
        }

        writeln!(f)?;
        f.write_str(if self.side_to_move() == Color::White {
            "white to move\n"
        } else {
            "black to move\n"
        })
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::from_start_position()
    }
}

#[cfg(test)]
mod tests {
    use std::mem;

    use crate::flags::{CastleSide, StateFlags};
    use crate::moves::Move;
    use crate::position::Position;
    use crate::types::{Color, Piece, PieceKind, Square};

    #[test]
    fn size_is_104() {
        assert_eq!(104, mem::size_of::<Position>());
    }

    #[test]
    fn start_position_matches_fen() {
        let pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
            .unwrap();
        assert_eq!(Position::from_start_position(), pos);
        assert_eq!(StateFlags::START, pos.flags());
        assert_eq!(32, pos.piece_count());
    }

    #[test]
    fn place_piece_keeps_sets_disjoint() {
        let mut pos = Position::from_start_position();
        pos.place_piece(Square::E2, Piece::new(PieceKind::Queen, Color::Black));
        assert_eq!(
            Some(Piece::new(PieceKind::Queen, Color::Black)),
            pos.piece_at(Square::E2)
        );
        assert!(!pos.pawns(Color::White).test(Square::E2));

        let mut seen = 0u64;
        for board in pos.boards().iter() {
            assert_eq!(0, seen & board.bits());
            seen |= board.bits();
        }
    }

    mod fen {
        use crate::position::{FenParseError, Position};
        use crate::types::{Color, Piece, PieceKind, Square};

        #[test]
        fn fen_smoke() {
            let pos = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 0").unwrap();
            assert_eq!(Color::White, pos.side_to_move());
            assert!(pos.flags().is_empty());
            assert!(pos.en_passant_targets().empty());
        }

        #[test]
        fn clocks_are_optional() {
            let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
            assert_eq!(Color::Black, pos.side_to_move());
        }

        #[test]
        fn pieces_land_on_squares() {
            let pos = Position::from_fen("4k3/8/8/3q4/8/8/8/R3K3 w Q - 0 1").unwrap();
            assert_eq!(
                Some(Piece::new(PieceKind::Queen, Color::Black)),
                pos.piece_at(Square::D5)
            );
            assert_eq!(
                Some(Piece::new(PieceKind::Rook, Color::White)),
                pos.piece_at(Square::A1)
            );
            assert_eq!(None, pos.piece_at(Square::H1));
        }

        #[test]
        fn en_passant_field() {
            let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
            assert!(pos.en_passant_targets().test(Square::D6));
            assert_eq!(1, pos.en_passant_targets().count());

            let pos = Position::from_fen("4k3/8/8/8/3Pp3/8/8/4K3 b - d3 0 1").unwrap();
            assert!(pos.en_passant_targets().test(Square::D3));
        }

        #[test]
        fn round_trip() {
            for fen in &[
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
                "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
                "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1",
                "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
                "r3k3/8/8/8/8/8/8/4K2R b Kq - 0 1",
            ] {
                let pos = Position::from_fen(fen).unwrap();
                assert_eq!(*fen, pos.as_fen());
            }
        }

        #[test]
        fn empty() {
            let err = Position::from_fen("").unwrap_err();
            assert_eq!(FenParseError::UnexpectedEnd, err);
        }

        #[test]
        fn unknown_piece() {
            let err = Position::from_fen("z7/8/8/8/8/8/8/8 w - - 0 0").unwrap_err();
            assert_eq!(FenParseError::UnknownPiece, err);
        }

        #[test]
        fn invalid_digit() {
            let err = Position::from_fen("9/8/8/8/8/8/8/8 w - - 0 0").unwrap_err();
            assert_eq!(FenParseError::InvalidDigit, err);
        }

        #[test]
        fn not_sum_to_8() {
            let err = Position::from_fen("pppp5/8/8/8/8/8/8/8 w - - 0 0").unwrap_err();
            assert_eq!(FenParseError::FileDoesNotSumToEight, err);
        }

        #[test]
        fn bad_side_to_move() {
            let err = Position::from_fen("8/8/8/8/8/8/8/8 c - - 0 0").unwrap_err();
            assert_eq!(FenParseError::InvalidSideToMove, err);
        }

        #[test]
        fn bad_castle_status() {
            let err = Position::from_fen("8/8/8/8/8/8/8/8 w a - 0 0").unwrap_err();
            assert_eq!(FenParseError::InvalidCastle, err);
        }

        #[test]
        fn bad_en_passant() {
            let err = Position::from_fen("8/8/8/8/8/8/8/8 w - 88 0 0").unwrap_err();
            assert_eq!(FenParseError::InvalidEnPassant, err);

            let err = Position::from_fen("8/8/8/8/8/8/8/8 w - e4 0 0").unwrap_err();
            assert_eq!(FenParseError::InvalidEnPassant, err);
        }

        #[test]
        fn empty_halfmove() {
            let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - q 0").unwrap_err();
            assert_eq!(FenParseError::EmptyHalfmove, err);
        }

        #[test]
        fn empty_fullmove() {
            let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0 q").unwrap_err();
            assert_eq!(FenParseError::EmptyFullmove, err);
        }

        #[test]
        fn fullmove_early_end() {
            let err = Position::from_fen("8/8/8/8/8/8/8/8 w - - 0").unwrap_err();
            assert_eq!(FenParseError::UnexpectedEnd, err);
        }
    }

    mod apply {
        use super::*;

        #[test]
        fn smoke_test_opening_pawn() {
            let start = Position::from_start_position();
            let pos = start.apply_move(Move::new(Square::E2, Square::E3));

            assert_eq!(Color::Black, pos.side_to_move());
            assert_eq!(
                Some(Piece::new(PieceKind::Pawn, Color::White)),
                pos.piece_at(Square::E3)
            );
            assert!(pos.piece_at(Square::E2).is_none());

            // the source position is untouched.
            assert_eq!(Position::from_start_position(), start);
        }

        #[test]
        fn double_pawn_push_sets_ep() {
            let pos = Position::from_fen("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
            let pos = pos.apply_move(Move::new(Square::E2, Square::E4));
            assert!(pos.flags().en_passant(Color::White, crate::types::File::E));
            assert!(pos.en_passant_targets().test(Square::E3));
        }

        #[test]
        fn en_passant_reset() {
            let pos = Position::from_fen("4k3/8/8/8/4Pp2/8/8/4K3 b - e3 0 1").unwrap();

            // black not taking the EP opportunity
            let pos = pos.apply_move(Move::new(Square::F4, Square::F3));
            assert_eq!(Color::White, pos.side_to_move());
            assert_eq!(0, pos.flags().bits() & 0xFFFF);
        }

        #[test]
        fn basic_capture() {
            let pos = Position::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").unwrap();
            let pos = pos.apply_move(Move::new(Square::E4, Square::D5));
            assert_eq!(
                Some(Piece::new(PieceKind::Pawn, Color::White)),
                pos.piece_at(Square::D5)
            );
            assert!(pos.pawns(Color::Black).empty());
        }

        #[test]
        fn en_passant_capture() {
            // the captured pawn is removed from beside the mover, not from
            // the destination square.
            let pos = Position::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
            let pos = pos.apply_move(Move::new(Square::E5, Square::D6));
            assert!(pos.piece_at(Square::D5).is_none());
            assert_eq!(
                Some(Piece::new(PieceKind::Pawn, Color::White)),
                pos.piece_at(Square::D6)
            );
        }

        #[test]
        fn moving_king_castle_status() {
            let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
            let pos = pos.apply_move(Move::new(Square::E1, Square::E2));
            assert!(!pos.has_castle_rights(Color::White, CastleSide::A));
            assert!(!pos.has_castle_rights(Color::White, CastleSide::H));
            assert!(pos.has_castle_rights(Color::Black, CastleSide::A));

            // moving back does not restore anything
            let pos = pos.apply_move(Move::new(Square::E8, Square::D8));
            let pos = pos.apply_move(Move::new(Square::E2, Square::E1));
            assert!(!pos.has_castle_rights(Color::White, CastleSide::H));
        }

        #[test]
        fn moving_rook_castle_status() {
            let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
            let pos = pos.apply_move(Move::new(Square::A1, Square::B1));
            assert!(!pos.has_castle_rights(Color::White, CastleSide::A));
            assert!(pos.has_castle_rights(Color::White, CastleSide::H));
        }

        #[test]
        fn rook_capture_castle_status() {
            // capturing a rook on its home square revokes its castle, so a
            // different rook arriving there later cannot castle.
            let pos = Position::from_fen("4k3/8/8/8/8/7r/4P3/R3K2R b KQ - 0 1").unwrap();
            let pos = pos.apply_move(Move::new(Square::H3, Square::H1));
            assert!(!pos.has_castle_rights(Color::White, CastleSide::H));
            assert!(pos.has_castle_rights(Color::White, CastleSide::A));
        }

        #[test]
        fn queenside_castle() {
            let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
            let pos = pos.apply_move(Move::new(Square::E1, Square::C1));
            assert_eq!(
                Some(Piece::new(PieceKind::Rook, Color::White)),
                pos.piece_at(Square::D1)
            );
            assert_eq!(
                Some(Piece::new(PieceKind::King, Color::White)),
                pos.piece_at(Square::C1)
            );
            assert!(pos.piece_at(Square::A1).is_none());
            assert!(!pos.flags().king_unmoved(Color::White));
        }

        #[test]
        fn kingside_castle() {
            let pos = Position::from_fen("4k2r/8/8/8/8/8/8/4K3 b k - 0 1").unwrap();
            let pos = pos.apply_move(Move::new(Square::E8, Square::G8));
            assert_eq!(
                Some(Piece::new(PieceKind::Rook, Color::Black)),
                pos.piece_at(Square::F8)
            );
            assert_eq!(
                Some(Piece::new(PieceKind::King, Color::Black)),
                pos.piece_at(Square::G8)
            );
            assert_eq!(Color::White, pos.side_to_move());
        }

        #[test]
        fn promotion_is_a_separate_step() {
            let pos = Position::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
            let moved = pos.apply_move(Move::new(Square::B7, Square::B8));
            assert_eq!(Some(Square::B8), moved.pending_promotion());

            let promoted = moved.apply_promotion(Square::B8, PieceKind::Knight);
            assert_eq!(None, promoted.pending_promotion());
            assert_eq!(
                Some(Piece::new(PieceKind::Knight, Color::White)),
                promoted.piece_at(Square::B8)
            );
            assert_eq!(Color::Black, promoted.side_to_move());
        }
    }

    mod setup {
        use crate::attacks::AttackTables;
        use crate::position::{Position, SetupError};
        use crate::types::{Color, Piece, PieceKind, Square};

        #[test]
        fn start_position_is_valid() {
            let tables = AttackTables::new();
            assert_eq!(Ok(()), Position::from_start_position().validate_setup(&tables));
        }

        #[test]
        fn missing_and_extra_kings() {
            let tables = AttackTables::new();
            let mut pos = Position::empty();
            pos.place_piece(Square::E1, Piece::new(PieceKind::King, Color::White));
            assert_eq!(
                Err(SetupError::MissingKing(Color::Black)),
                pos.validate_setup(&tables)
            );

            pos.place_piece(Square::E8, Piece::new(PieceKind::King, Color::Black));
            pos.place_piece(Square::A8, Piece::new(PieceKind::King, Color::Black));
            assert_eq!(
                Err(SetupError::ExtraKing(Color::Black)),
                pos.validate_setup(&tables)
            );
        }

        #[test]
        fn king_in_check() {
            let tables = AttackTables::new();
            let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2r w - - 0 1").unwrap();
            assert_eq!(
                Err(SetupError::KingInCheck(Color::White)),
                pos.validate_setup(&tables)
            );

            // the side not to move is tested as well
            let pos = Position::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
            assert_eq!(Ok(()), pos.validate_setup(&tables));
            let pos = Position::from_fen("R3k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
            assert_eq!(
                Err(SetupError::KingInCheck(Color::Black)),
                pos.validate_setup(&tables)
            );
        }

        #[test]
        fn pawn_on_back_rank() {
            let tables = AttackTables::new();
            let pos = Position::from_fen("4k2P/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
            assert_eq!(
                Err(SetupError::PawnOnBackRank(Square::H8)),
                pos.validate_setup(&tables)
            );
        }
    }
}
