// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::convert::TryFrom;
use std::fmt;

use crate::types::{PieceKind, Square};

/// A move is just an origin and a destination. Whether it captures, takes en
/// passant or castles is decided by the position it is applied to, and
/// promotion is a separate step (see `Position::apply_promotion`).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub origin: Square,
    pub destination: Square,
}

impl Move {
    pub fn new(origin: Square, destination: Square) -> Move {
        Move {
            origin,
            destination,
        }
    }

    /// Parses a move in coordinate notation (`e2e4`, `e7e8q`), returning the
    /// move and the promotion piece if one was named.
    pub fn from_uci(text: &str) -> Option<(Move, Option<PieceKind>)> {
        if !text.is_ascii() || (text.len() != 4 && text.len() != 5) {
            return None;
        }

        let origin = Square::try_from(&text[0..2]).ok()?;
        let destination = Square::try_from(&text[2..4]).ok()?;
        let promotion = match text[4..].chars().next() {
            Some(c) => match PieceKind::try_from(c) {
                Ok(PieceKind::King) | Ok(PieceKind::Pawn) | Err(_) => return None,
                Ok(kind) => Some(kind),
            },
            None => None,
        };

        Some((Move::new(origin, destination), promotion))
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.origin, self.destination)
    }
}
