// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::Ordering;
use std::fmt;

use crate::types::Color;

/// The output of a board evaluation. Scores are absolute: positive favors
/// white no matter whose point of view the evaluator was asked about.
/// `terminal` is set only when the game is over in this position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub score: i32,
    pub terminal: bool,
}

impl Evaluation {
    pub fn new(score: i32) -> Evaluation {
        Evaluation {
            score,
            terminal: false,
        }
    }

    pub fn terminal(score: i32) -> Evaluation {
        Evaluation {
            score,
            terminal: true,
        }
    }

    /// The score as seen by `player`: unchanged for white, negated for black.
    pub fn for_player(self, player: Color) -> i32 {
        match player {
            Color::White => self.score,
            Color::Black => self.score.saturating_neg(),
        }
    }
}

/// Pushes a non-zero terminal score further from zero by the number of plies
/// still left to search, so a mate found closer to the root outranks a
/// slower one. Draws stay at zero.
pub fn adjust_for_depth(score: i32, depth_remaining: u32) -> i32 {
    let bump = depth_remaining as i32;
    match score.cmp(&0) {
        Ordering::Equal => 0,
        Ordering::Greater => score.saturating_add(bump),
        Ordering::Less => score.saturating_sub(bump),
    }
}

impl fmt::Display for Evaluation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.terminal {
            write!(f, "{} (game over)", self.score)
        } else {
            write!(f, "{}", self.score)
        }
    }
}
