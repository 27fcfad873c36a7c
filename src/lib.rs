// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! A bitboard chess decision engine: legal successor generation over a
//! compact position value, and a memoized minimax search driven by a
//! pluggable evaluator.

#[macro_use]
extern crate num_derive;
#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

mod analysis;
pub mod attacks;
mod bitboard;
pub mod eval;
mod flags;
mod move_generator;
mod moves;
mod perft;
mod position;
pub mod search;
mod types;

pub use analysis::{Analysis, GameStatus, Outcome};
pub use attacks::AttackTables;
pub use bitboard::{Bitboard, BitboardIterator};
pub use flags::{CastleSide, StateFlags};
pub use move_generator::{MoveGenerator, MoveVec};
pub use moves::Move;
pub use perft::{perft, perft_divide};
pub use position::{FenParseError, Position, SetupError};
pub use types::{Color, Direction, File, Piece, PieceKind, Rank, Square, TableIndex};
