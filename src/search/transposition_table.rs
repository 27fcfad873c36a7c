// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use hashbrown::HashMap;

use crate::position::Position;

/// Prime modulus of the position hash.
pub const HASH_MODULUS: u64 = 1_000_000_007;

/// Polynomial hash of a position at a given remaining depth. Occupancy set
/// `i` is raised to the power `13 - i`, the flag register to the power 1,
/// and the depth is added last, all modulo `HASH_MODULUS`. Distinct
/// positions may collide; the search accepts that.
pub fn position_hash(pos: &Position, depth: u32) -> u64 {
    let mut hash = 0;
    for (i, board) in pos.boards().iter().enumerate() {
        hash = (hash + pow_mod(board.bits(), 13 - i as u64)) % HASH_MODULUS;
    }

    hash = (hash + pow_mod(u64::from(pos.flags().bits()), 1)) % HASH_MODULUS;
    (hash + u64::from(depth)) % HASH_MODULUS
}

fn pow_mod(base: u64, exponent: u64) -> u64 {
    let base = base % HASH_MODULUS;
    let mut result = 1;
    for _ in 0..exponent {
        result = result * base % HASH_MODULUS;
    }

    result
}

/// Which side of the minimax recursion a cached value belongs to. The two
/// sides never share entries.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Max,
    Min,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TableStats {
    pub hits: u64,
    pub misses: u64,
    pub stores: u64,
}

/// Memoized minimax values for one top-level decision.
pub struct TranspositionTable {
    max_nodes: HashMap<u64, i32>,
    min_nodes: HashMap<u64, i32>,
    stats: TableStats,
}

impl TranspositionTable {
    pub fn new() -> TranspositionTable {
        TranspositionTable {
            max_nodes: HashMap::new(),
            min_nodes: HashMap::new(),
            stats: TableStats::default(),
        }
    }

    pub fn stats(&self) -> TableStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.max_nodes.len() + self.min_nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.max_nodes.clear();
        self.min_nodes.clear();
        self.stats = TableStats::default();
    }

    /// Looks `pos` up at every depth from `max_depth` down to `depth`,
    /// returning the value stored at the deepest one present. A value
    /// computed with more depth remaining is at least as good as the one
    /// being asked for.
    pub fn probe(&mut self, pos: &Position, kind: NodeKind, depth: u32, max_depth: u32) -> Option<i32> {
        let table = match kind {
            NodeKind::Max => &self.max_nodes,
            NodeKind::Min => &self.min_nodes,
        };

        let found = (depth..=max_depth.max(depth))
            .rev()
            .find_map(|d| table.get(&position_hash(pos, d)).cloned());
        if found.is_some() {
            self.stats.hits += 1;
        } else {
            self.stats.misses += 1;
        }

        found
    }

    pub fn store(&mut self, pos: &Position, kind: NodeKind, depth: u32, value: i32) {
        let key = position_hash(pos, depth);
        let table = match kind {
            NodeKind::Max => &mut self.max_nodes,
            NodeKind::Min => &mut self.min_nodes,
        };

        table.insert(key, value);
        self.stats.stores += 1;
    }
}

impl Default for TranspositionTable {
    fn default() -> TranspositionTable {
        TranspositionTable::new()
    }
}
