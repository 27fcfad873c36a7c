// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::sync::Arc;

use rand::Rng;

use crate::analysis::{Analysis, Outcome};
use crate::attacks::AttackTables;
use crate::eval::heuristics::*;
use crate::eval::{material, Evaluation, Evaluator, WIN_SCORE};
use crate::position::Position;
use crate::types::Color;

/// Scores every position with uniform noise in `0..100`.
pub struct RandomEvaluator {
    tables: Arc<AttackTables>,
}

impl RandomEvaluator {
    pub fn new(tables: Arc<AttackTables>) -> RandomEvaluator {
        RandomEvaluator { tables }
    }
}

impl Evaluator for RandomEvaluator {
    fn evaluate(&self, pos: &Position, _perspective: Color) -> Evaluation {
        let status = Analysis::new(pos, &self.tables).status();
        Evaluation {
            score: rand::thread_rng().gen_range(0, 100),
            terminal: status.is_over(),
        }
    }
}

/// Counts the opponent's material and whether the opponent is in check,
/// optionally adding the perspective player's own material.
pub struct MaterialEvaluator {
    tables: Arc<AttackTables>,
    own_material: bool,
}

impl MaterialEvaluator {
    pub fn new(tables: Arc<AttackTables>) -> MaterialEvaluator {
        MaterialEvaluator {
            tables,
            own_material: false,
        }
    }

    pub fn with_own_material(tables: Arc<AttackTables>) -> MaterialEvaluator {
        MaterialEvaluator {
            tables,
            own_material: true,
        }
    }
}

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, pos: &Position, perspective: Color) -> Evaluation {
        let analysis = Analysis::new(pos, &self.tables);
        let status = analysis.status();
        let mut score = match perspective {
            Color::White => {
                let check_bonus = if status.black_in_check { 300 } else { 0 };
                check_bonus - material(&analysis, Color::Black)
            }
            Color::Black => {
                let check_bonus = if status.white_in_check { 300 } else { 0 };
                material(&analysis, Color::White) - check_bonus
            }
        };

        if self.own_material {
            match perspective {
                Color::White => score += material(&analysis, Color::White),
                Color::Black => score -= material(&analysis, Color::Black),
            }
        }

        Evaluation {
            score,
            terminal: status.is_over(),
        }
    }
}

/// The full evaluator: a finished game short-circuits to a fixed score,
/// otherwise the heuristic components are folded in order.
pub struct PositionalEvaluator {
    tables: Arc<AttackTables>,
    components: Vec<Box<dyn Heuristic>>,
}

impl PositionalEvaluator {
    pub fn new(tables: Arc<AttackTables>, jitter: bool) -> PositionalEvaluator {
        let components: Vec<Box<dyn Heuristic>> = vec![
            Box::new(Material::new(jitter)),
            Box::new(RookPressure),
            Box::new(QueenPressure),
            Box::new(PushedPawns),
            Box::new(PawnRelations),
            Box::new(MopUp),
            Box::new(ConnectedRooks),
            Box::new(BishopPressure),
            Box::new(ActiveKnights),
            Box::new(EarlyGameKing),
        ];
        PositionalEvaluator::with_components(tables, components)
    }

    pub fn with_components(
        tables: Arc<AttackTables>,
        components: Vec<Box<dyn Heuristic>>,
    ) -> PositionalEvaluator {
        PositionalEvaluator { tables, components }
    }

    pub fn components(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.components.iter().map(|c| c.name())
    }
}

impl Evaluator for PositionalEvaluator {
    fn evaluate(&self, pos: &Position, _perspective: Color) -> Evaluation {
        let analysis = Analysis::new(pos, &self.tables);
        match analysis.status().outcome {
            Some(Outcome::WhiteWins) => return Evaluation::terminal(WIN_SCORE),
            Some(Outcome::BlackWins) => return Evaluation::terminal(-WIN_SCORE),
            Some(Outcome::Draw) => return Evaluation::terminal(0),
            None => {}
        }

        let score = self
            .components
            .iter()
            .fold(0, |acc, component| acc + component.score(&analysis));
        Evaluation::new(score)
    }
}
