// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
//! Tuning tables for the positional evaluator. Every table is indexed by
//! square, a1 first and h8 last, one rank per row. The two-row tables are
//! indexed by color first.

#[rustfmt::skip]
pub const KNIGHT_BONUS: [[i32; 64]; 2] = [[
    -50, -25,   0, -30, -30,   0, -25, -50,
    -20,   0,   0,   0,  25,   0,   0, -20,
    -15,   0,  50,  15,  15,  50,   0, -15,
      0,   0,  15,  20,  20,  15,   0,   0,
      0,   0,  15,   0,   0,  15,   0,   0,
    -10,   0,   0,  15,  15,   0,   0, -10,
    -20,   0,  20,   0,  25,  20,   0, -20,
    -50, -25,   0, -30, -30,   0, -25, -50,
], [
    -50, -25,   0, -30, -30,   0, -25, -50,
    -20,   0,  20,   0,  25,  20,   0, -20,
    -15,   0,   0,  15,  15,   0,   0, -15,
      0,   0,  15,   0,   0,  15,   0,   0,
      0,   0,  15,  20,  20,  15,   0,   0,
    -10,   0,  50,  15,  15,  50,   0, -10,
    -20,   0,   0,   0,  25,   0,   0, -20,
    -50, -25,   0, -30, -30,   0, -25, -50,
]];

// The white and black rows are not mirror images of each other on ranks
// 4 and 5.
#[rustfmt::skip]
pub const BISHOP_BONUS: [[i32; 64]; 2] = [[
      0, -70, -50, -30, -30, -50, -70,   0,
    -20,  25,   0,  10,  10,   0,  25, -20,
      0,   0,  10,  25,  25,  10,   0,   0,
      0,   0,  30,  15,  15,  20,   0,   0,
      0,  20,  30,  15,  15,  20,   0,   0,
      0,   0,  10,  25,  25,  10,   0,   0,
    -20,  15,   0,  10,  10,   0,  15, -20,
    -30, -70, -50, -30, -30, -50, -70, -30,
], [
    -30, -70, -50, -30, -30, -50, -70, -30,
    -20,  15,   0,  10,  10,   0,  15, -20,
      0,   0,  10,  25,  25,  10,   0,   0,
      0,  20,  30,  15,  15,  20,   0,   0,
      0,   0,  30,  15,  15,  20,   0,   0,
      0,   0,  10,  25,  25,  10,   0,   0,
    -20,  25,   0,  10,  10,   0,  25, -20,
      0, -70, -50, -30, -30, -50, -70,   0,
]];

#[rustfmt::skip]
pub const ROOK_BONUS: [[i32; 64]; 2] = [[
      0, -20,   0,  20,  10,  20, -20,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0, -10, -10,   0,   0,   0,
      0,   0,   0, -10, -10,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
     20,  20,  20,  20,  20,  20,  20,  20,
      0,   0,   0,   0,   0,   0,   0,   0,
], [
      0,   0,   0,   0,   0,   0,   0,   0,
     20,  20,  20,  20,  20,  20,  20,  20,
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0, -10, -10,   0,   0,   0,
      0,   0,   0, -10, -10,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
      0, -20,   0,  20,  10,  20, -20,   0,
]];

#[rustfmt::skip]
pub const QUEEN_BONUS: [[i32; 64]; 2] = [[
    -20,   0,   0,   0,   0,   0,   0, -20,
    -40,   0,   0,   0,   0,   0,   0, -40,
    -40,   0,   0,   0,   0,   0,   0, -40,
      0,   0,   0, -35, -35,   0,   0,   0,
      0,   0,   0, -35, -35,   0,   0,   0,
      0,   0,   0,   0, -10,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
], [
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0,   0,   0,   0,   0,
      0,   0,   0,   0, -10,   0,   0,   0,
      0,   0,   0, -35, -35,   0,   0,   0,
      0,   0,   0, -35, -35,   0,   0,   0,
    -40,   0,   0,   0,   0,   0,   0, -40,
    -40,   0,   0,   0,   0,   0,   0, -40,
    -20,   0,   0,   0,   0,   0,   0, -20,
]];

// Not a mirror of the black table: from h1 onward every entry sits one
// square earlier, so h1 holds -10 and h8 holds 0.
#[rustfmt::skip]
pub const WHITE_KING_EARLY_GAME: [i32; 64] = [
       0,    0,   30,  -10,    0,  -10,   30,  -10,
     -30,  -30,  -30,  -30,  -30,  -30,  -30, -300,
    -300, -300, -300, -300, -300, -300, -300, -400,
    -400, -400, -400, -400, -400, -400, -400, -400,
    -400, -400, -400, -400, -400, -400, -400, -400,
    -400, -400, -400, -400, -400, -400, -400, -400,
    -400, -400, -400, -400, -400, -400, -400, -400,
    -400, -400, -400, -400, -400, -400, -400,    0,
];

#[rustfmt::skip]
pub const BLACK_KING_EARLY_GAME: [i32; 64] = [
    -400, -400, -400, -400, -400, -400, -400, -400,
    -400, -400, -400, -400, -400, -400, -400, -400,
    -400, -400, -400, -400, -400, -400, -400, -400,
    -400, -400, -400, -400, -400, -400, -400, -400,
    -400, -400, -400, -400, -400, -400, -400, -400,
    -300, -300, -300, -300, -300, -300, -300, -300,
     -30,  -30,  -30,  -30,  -30,  -30,  -30,  -30,
       0,    0,   30,  -10,    0,  -10,   30,   20,
];

/// Manhattan distance from each square to the nearest of the four centre
/// squares.
#[rustfmt::skip]
pub const CENTRE_MANHATTAN_DISTANCE: [i32; 64] = [
    6, 5, 4, 3, 3, 4, 5, 6,
    5, 4, 3, 2, 2, 3, 4, 5,
    4, 3, 2, 1, 1, 2, 3, 4,
    3, 2, 1, 0, 0, 1, 2, 3,
    3, 2, 1, 0, 0, 1, 2, 3,
    4, 3, 2, 1, 1, 2, 3, 4,
    5, 4, 3, 2, 2, 3, 4, 5,
    6, 5, 4, 3, 3, 4, 5, 6,
];

/// Late-game bonus per pawn on each rank, rank 1 first.
pub const WHITE_PUSHED_PAWN: [i32; 8] = [0, 0, 50, 75, 100, 150, 250, 0];
pub const BLACK_PUSHED_PAWN: [i32; 8] = [0, 250, 150, 100, 75, 50, 0, 0];
