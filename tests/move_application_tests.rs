// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
extern crate kingside;
use kingside::{
    AttackTables, Bitboard, CastleSide, Color, Move, Piece, PieceKind, Position, SetupError, Square,
};

const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

fn apply(fen: &'static str, origin: Square, destination: Square) -> Position {
    Position::from_fen(fen)
        .unwrap()
        .apply_move(Move::new(origin, destination))
}

mod pawns {
    use super::*;

    #[test]
    fn double_push_opens_en_passant_window() {
        let pos = Position::from_start_position().apply_move(Move::new(Square::E2, Square::E4));
        assert_eq!(Bitboard::of(Square::E3), pos.en_passant_targets());
        assert_eq!(
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1",
            pos.as_fen()
        );

        let reply = pos.apply_move(Move::new(Square::G8, Square::F6));
        assert!(reply.en_passant_targets().empty());
    }

    #[test]
    fn en_passant_removes_passed_pawn() {
        let pos = apply("4k3/8/8/3Pp3/8/8/8/4K3 w - e6 0 1", Square::D5, Square::E6);
        assert_eq!(
            Some(Piece::new(PieceKind::Pawn, Color::White)),
            pos.piece_at(Square::E6)
        );
        assert_eq!(None, pos.piece_at(Square::E5));
        assert_eq!(None, pos.piece_at(Square::D5));
        assert!(pos.pawns(Color::Black).empty());
    }

    #[test]
    fn promotion_is_a_second_step() {
        let pushed = apply("4k3/P7/8/8/8/8/8/4K3 w - - 0 1", Square::A7, Square::A8);
        assert_eq!(Some(Square::A8), pushed.pending_promotion());

        let promoted = pushed.apply_promotion(Square::A8, PieceKind::Knight);
        assert_eq!(None, promoted.pending_promotion());
        assert_eq!(
            Some(Piece::new(PieceKind::Knight, Color::White)),
            promoted.piece_at(Square::A8)
        );
        assert_eq!(Color::Black, promoted.side_to_move());
    }

    #[test]
    fn capture_promotion() {
        let pos = apply("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1", Square::A7, Square::B8)
            .apply_promotion(Square::B8, PieceKind::Queen);
        assert!(pos.rooks(Color::Black).empty());
        assert_eq!(
            Some(Piece::new(PieceKind::Queen, Color::White)),
            pos.piece_at(Square::B8)
        );
    }
}

mod castling {
    use super::*;

    #[test]
    fn white_h_side() {
        let pos = apply(KIWIPETE, Square::E1, Square::G1);
        assert_eq!(
            Some(Piece::new(PieceKind::King, Color::White)),
            pos.piece_at(Square::G1)
        );
        assert_eq!(
            Some(Piece::new(PieceKind::Rook, Color::White)),
            pos.piece_at(Square::F1)
        );
        assert_eq!(None, pos.piece_at(Square::H1));
        assert_eq!(None, pos.piece_at(Square::E1));
        assert!(!pos.has_castle_rights(Color::White, CastleSide::A));
        assert!(!pos.has_castle_rights(Color::White, CastleSide::H));
        assert!(pos.has_castle_rights(Color::Black, CastleSide::A));
        assert!(pos.has_castle_rights(Color::Black, CastleSide::H));
    }

    #[test]
    fn black_a_side() {
        let pos = apply("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", Square::E8, Square::C8);
        assert_eq!(
            Some(Piece::new(PieceKind::King, Color::Black)),
            pos.piece_at(Square::C8)
        );
        assert_eq!(
            Some(Piece::new(PieceKind::Rook, Color::Black)),
            pos.piece_at(Square::D8)
        );
        assert_eq!(None, pos.piece_at(Square::A8));
        assert_eq!("2kr3r/8/8/8/8/8/8/R3K2R w KQ - 0 1", pos.as_fen());
    }

    #[test]
    fn rook_move_revokes_one_side() {
        let pos = apply("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Square::H1, Square::H2);
        assert!(pos.has_castle_rights(Color::White, CastleSide::A));
        assert!(!pos.has_castle_rights(Color::White, CastleSide::H));

        // moving the rook back does not restore the right
        let back = pos
            .apply_move(Move::new(Square::A8, Square::A7))
            .apply_move(Move::new(Square::H2, Square::H1));
        assert!(!back.has_castle_rights(Color::White, CastleSide::H));
        assert!(!back.has_castle_rights(Color::Black, CastleSide::A));
    }

    #[test]
    fn king_move_revokes_both_sides() {
        let pos = apply("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Square::E1, Square::E2);
        assert!(!pos.has_castle_rights(Color::White, CastleSide::A));
        assert!(!pos.has_castle_rights(Color::White, CastleSide::H));
        assert!(pos.has_castle_rights(Color::Black, CastleSide::A));
    }

    #[test]
    fn capturing_home_rook_revokes_its_right() {
        let pos = apply("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Square::A1, Square::A8);
        assert!(!pos.has_castle_rights(Color::Black, CastleSide::A));
        assert!(pos.has_castle_rights(Color::Black, CastleSide::H));
        assert!(!pos.has_castle_rights(Color::White, CastleSide::A));
        assert!(pos.has_castle_rights(Color::White, CastleSide::H));
    }
}

mod fen {
    use super::*;

    #[test]
    fn round_trips() {
        for fen in &[
            KIWIPETE,
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1",
        ] {
            assert_eq!(*fen, Position::from_fen(fen).unwrap().as_fen());
        }
    }

    #[test]
    fn clocks_are_not_kept() {
        let pos = Position::from_fen("rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8")
            .unwrap();
        assert_eq!(
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 0 1",
            pos.as_fen()
        );
    }

    #[test]
    fn rejects_garbage() {
        assert!(Position::from_fen("").is_err());
        assert!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1").is_err());
        assert!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNX w KQkq - 0 1").is_err());
        assert!(Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1").is_err());
    }
}

mod setup {
    use super::*;

    fn kings() -> Position {
        let mut pos = Position::empty();
        pos.place_piece(Square::E1, Piece::new(PieceKind::King, Color::White));
        pos.place_piece(Square::E8, Piece::new(PieceKind::King, Color::Black));
        pos
    }

    #[test]
    fn bare_kings_are_valid() {
        let tables = AttackTables::new();
        assert_eq!(Ok(()), kings().validate_setup(&tables));
    }

    #[test]
    fn reports_problems() {
        let tables = AttackTables::new();

        let mut pos = kings();
        pos.clear_square(Square::E8);
        assert_eq!(Err(SetupError::MissingKing(Color::Black)), pos.validate_setup(&tables));

        let mut pos = kings();
        pos.place_piece(Square::A1, Piece::new(PieceKind::King, Color::White));
        assert_eq!(Err(SetupError::ExtraKing(Color::White)), pos.validate_setup(&tables));

        let mut pos = kings();
        pos.place_piece(Square::C8, Piece::new(PieceKind::Pawn, Color::White));
        assert_eq!(Err(SetupError::PawnOnBackRank(Square::C8)), pos.validate_setup(&tables));

        let mut pos = kings();
        pos.place_piece(Square::E4, Piece::new(PieceKind::Rook, Color::Black));
        assert_eq!(Err(SetupError::KingInCheck(Color::White)), pos.validate_setup(&tables));
    }

    #[test]
    fn castling_rights_edit() {
        let mut pos = kings();
        pos.place_piece(Square::H1, Piece::new(PieceKind::Rook, Color::White));
        pos.set_castling_rights(Color::White, CastleSide::H, true);
        assert!(pos.has_castle_rights(Color::White, CastleSide::H));
        assert!(pos.as_fen().contains(" w K "));

        pos.set_castling_rights(Color::White, CastleSide::H, false);
        assert!(!pos.has_castle_rights(Color::White, CastleSide::H));
    }

    #[test]
    fn side_to_move_edit() {
        let mut pos = kings();
        pos.set_side_to_move(Color::Black);
        assert_eq!(Color::Black, pos.side_to_move());
        assert!(pos.as_fen().contains(" b "));
    }
}
