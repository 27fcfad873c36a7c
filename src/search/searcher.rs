// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::attacks::AttackTables;
use crate::eval::{adjust_for_depth, Evaluation, Evaluator};
use crate::move_generator::MoveGenerator;
use crate::position::Position;
use crate::search::config::EngineConfig;
use crate::search::data::{DataRecorder, NullDataRecorder, Record};
use crate::search::transposition_table::{NodeKind, TranspositionTable};
use crate::types::Color;

/// Counters gathered during one decision.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    pub evaluations: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub prunes: u64,
}

pub struct SearchResult {
    /// The successor chosen, or `None` when the side to move has no legal
    /// move.
    pub chosen: Option<Position>,
    /// The chosen successor's value from the mover's point of view.
    pub score: i32,
    /// Search depth after the root extensions.
    pub depth: u32,
    pub stats: SearchStats,
}

/// Minimax search with alpha-beta pruning and a per-decision transposition
/// table. One `Searcher` plays for whichever side is to move in the position
/// it is handed.
pub struct Searcher {
    config: EngineConfig,
    tables: Arc<AttackTables>,
    evaluator: Box<dyn Evaluator>,
    table: TranspositionTable,
    recorder: Box<dyn DataRecorder>,
    /// Running maxima of the enclosing maximizing nodes, innermost last.
    bounds: Vec<i32>,
    player: Color,
    stats: SearchStats,
}

impl Searcher {
    pub fn new(config: EngineConfig, tables: Arc<AttackTables>) -> Searcher {
        let evaluator = config.evaluator(tables.clone());
        Searcher::with_evaluator(config, tables, evaluator)
    }

    /// A searcher that plays with a caller-supplied evaluator, regardless of
    /// the configured skill level's evaluator.
    pub fn with_evaluator(
        config: EngineConfig,
        tables: Arc<AttackTables>,
        evaluator: Box<dyn Evaluator>,
    ) -> Searcher {
        Searcher {
            config,
            tables,
            evaluator,
            table: TranspositionTable::new(),
            recorder: Box::new(NullDataRecorder),
            bounds: Vec::new(),
            player: Color::White,
            stats: SearchStats::default(),
        }
    }

    pub fn set_recorder(&mut self, recorder: Box<dyn DataRecorder>) {
        self.recorder = recorder;
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Chooses a successor of `pos` for the side to move.
    pub fn choose(&mut self, pos: &Position) -> Option<Position> {
        self.search(pos).chosen
    }

    pub fn search(&mut self, pos: &Position) -> SearchResult {
        self.player = pos.side_to_move();
        self.table.clear();
        self.bounds.clear();
        self.stats = SearchStats::default();

        let gen = MoveGenerator::new(&self.tables);
        let mut successors = gen.legal_successors(pos);
        let mut depth = self.config.depth;
        if successors.len() < 8 {
            depth += 1;
        }
        if successors.len() < 3 {
            depth += 1;
        }

        if successors.is_empty() {
            info!("no legal moves for {} in {}", self.player, pos.as_fen());
            return SearchResult {
                chosen: None,
                score: 0,
                depth,
                stats: self.stats,
            };
        }

        let skill = self.config.skill;
        if skill.shuffles() {
            successors.shuffle(&mut rand::thread_rng());
        }

        debug!(
            "searching {} successors at level {}, depth {}",
            successors.len(),
            skill,
            depth
        );

        let mut chosen = None;
        let mut best = i32::MIN;
        if self.config.pruning {
            self.bounds.push(i32::MIN);
        }

        for next in successors.iter() {
            let value = if skill.searches() {
                self.minimize(next, depth.saturating_sub(1))
            } else {
                self.evaluate(next, self.player).for_player(self.player)
            };

            debug!("  {} => {}", next.as_fen(), value);
            if chosen.is_none() || value > best {
                best = value;
                chosen = Some(*next);
                self.publish_bound(best);
            }
        }

        if self.config.pruning {
            self.bounds.pop();
        }

        let table_stats = self.table.stats();
        self.stats.cache_hits = table_stats.hits;
        self.stats.cache_misses = table_stats.misses;

        info!(
            "level {} chose a move scoring {} after {} nodes ({} cache hits, {} prunes)",
            skill, best, self.stats.nodes, self.stats.cache_hits, self.stats.prunes
        );

        let record = Record {
            fen: String::new(),
            skill: skill.level(),
            depth,
            nodes: self.stats.nodes,
            evaluations: self.stats.evaluations,
            cache_hits: self.stats.cache_hits,
            cache_misses: self.stats.cache_misses,
            prunes: self.stats.prunes,
            chosen: chosen.map(|p| p.as_fen()).unwrap_or_default(),
            score: best,
        };
        self.recorder.record(pos, &record);

        SearchResult {
            chosen,
            score: best,
            depth,
            stats: self.stats,
        }
    }

    /// Deepest remaining depth a cached entry can have been stored under.
    fn max_cached_depth(&self) -> u32 {
        self.config.depth + 2
    }

    fn publish_bound(&mut self, value: i32) {
        if self.config.pruning {
            if let Some(top) = self.bounds.last_mut() {
                *top = value;
            }
        }
    }

    fn probe(&mut self, pos: &Position, kind: NodeKind, depth: u32) -> Option<i32> {
        if !self.config.memoize {
            return None;
        }

        let max_depth = self.max_cached_depth();
        let hit = self.table.probe(pos, kind, depth, max_depth);
        if let Some(value) = hit {
            trace!("cache hit ({:?}, depth {}): {}", kind, depth, value);
        }

        hit
    }

    fn store(&mut self, pos: &Position, kind: NodeKind, depth: u32, value: i32) {
        if self.config.memoize {
            trace!("cache store ({:?}, depth {}): {}", kind, depth, value);
            self.table.store(pos, kind, depth, value);
        }
    }

    fn evaluate(&mut self, pos: &Position, perspective: Color) -> Evaluation {
        self.stats.evaluations += 1;
        self.evaluator.evaluate(pos, perspective)
    }

    fn maximize(&mut self, pos: &Position, depth: u32) -> i32 {
        self.stats.nodes += 1;
        if let Some(value) = self.probe(pos, NodeKind::Max, depth) {
            return value;
        }

        let eval = self.evaluate(pos, self.player);
        let static_value = eval.for_player(self.player);
        if eval.terminal {
            return adjust_for_depth(static_value, depth);
        }

        if depth == 0 {
            return static_value;
        }

        let children = MoveGenerator::new(&self.tables).legal_successors(pos);
        if children.is_empty() {
            return static_value;
        }

        let mut best = i32::MIN;
        if self.config.pruning {
            self.bounds.push(i32::MIN);
        }

        for child in children.iter() {
            let value = self.minimize(child, depth - 1);
            if value > best {
                best = value;
                self.publish_bound(best);
            }
        }

        if self.config.pruning {
            self.bounds.pop();
        }

        self.store(pos, NodeKind::Max, depth, best);
        best
    }

    fn minimize(&mut self, pos: &Position, depth: u32) -> i32 {
        self.stats.nodes += 1;
        if let Some(value) = self.probe(pos, NodeKind::Min, depth) {
            return value;
        }

        // The evaluator is asked about the opponent here, but the value is
        // still taken from the searching player's side.
        let eval = self.evaluate(pos, self.player.toggle());
        let static_value = eval.for_player(self.player);
        if eval.terminal {
            return adjust_for_depth(static_value, depth);
        }

        if depth == 0 {
            return static_value;
        }

        let children = MoveGenerator::new(&self.tables).legal_successors(pos);
        if children.is_empty() {
            return static_value;
        }

        let mut worst = i32::MAX;
        let mut cut = false;
        for child in children.iter() {
            let value = self.maximize(child, depth - 1);
            if value < worst {
                worst = value;
            }

            // The enclosing maximizer already has something better than
            // anything this node can still return.
            let bound = if self.config.pruning {
                self.bounds.last().cloned()
            } else {
                None
            };
            if let Some(bound) = bound {
                if value < bound {
                    self.stats.prunes += 1;
                    cut = true;
                    break;
                }
            }
        }

        // After a cut `worst` is only an upper bound, so it is not cached.
        if !cut {
            self.store(pos, NodeKind::Min, depth, worst);
        }

        worst
    }
}
