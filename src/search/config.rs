// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::attacks::AttackTables;
use crate::eval::{Evaluator, MaterialEvaluator, PositionalEvaluator, RandomEvaluator};

/// How strongly the engine plays. Each level picks an evaluator and decides
/// whether the root moves are searched recursively or scored statically.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SkillLevel {
    /// Level 1: random scores.
    Random,
    /// Level 2: opponent material and checks.
    Material,
    /// Level 3: level 2 plus the engine's own material.
    MaterialPlus,
    /// Level 4: positional evaluation with full look-ahead.
    Full,
}

impl SkillLevel {
    pub fn from_level(level: u32) -> Option<SkillLevel> {
        match level {
            1 => Some(SkillLevel::Random),
            2 => Some(SkillLevel::Material),
            3 => Some(SkillLevel::MaterialPlus),
            4 => Some(SkillLevel::Full),
            _ => None,
        }
    }

    pub fn level(self) -> u32 {
        match self {
            SkillLevel::Random => 1,
            SkillLevel::Material => 2,
            SkillLevel::MaterialPlus => 3,
            SkillLevel::Full => 4,
        }
    }

    /// Whether root moves are scored by recursive search rather than by the
    /// static evaluator alone.
    pub fn searches(self) -> bool {
        self == SkillLevel::Full
    }

    /// Whether root moves are shuffled before scoring.
    pub fn shuffles(self) -> bool {
        self == SkillLevel::Material || self == SkillLevel::MaterialPlus
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseSkillError(String);

impl fmt::Display for ParseSkillError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid skill level '{}': expected 1, 2, 3 or 4", self.0)
    }
}

impl Error for ParseSkillError {}

impl FromStr for SkillLevel {
    type Err = ParseSkillError;

    fn from_str(s: &str) -> Result<SkillLevel, ParseSkillError> {
        s.trim()
            .parse::<u32>()
            .ok()
            .and_then(SkillLevel::from_level)
            .ok_or_else(|| ParseSkillError(s.to_owned()))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    pub skill: SkillLevel,
    /// Nominal search depth in plies, before the root extensions.
    pub depth: u32,
    pub pruning: bool,
    pub memoize: bool,
    /// Adds a few points of noise to material scores at level 4.
    pub jitter: bool,
}

impl Default for EngineConfig {
    fn default() -> EngineConfig {
        EngineConfig {
            skill: SkillLevel::Full,
            depth: 4,
            pruning: true,
            memoize: true,
            jitter: true,
        }
    }
}

impl EngineConfig {
    pub fn with_skill(skill: SkillLevel) -> EngineConfig {
        EngineConfig {
            skill,
            ..EngineConfig::default()
        }
    }

    /// Builds the evaluator this configuration plays with.
    pub fn evaluator(&self, tables: Arc<AttackTables>) -> Box<dyn Evaluator> {
        match self.skill {
            SkillLevel::Random => Box::new(RandomEvaluator::new(tables)),
            SkillLevel::Material => Box::new(MaterialEvaluator::new(tables)),
            SkillLevel::MaterialPlus => Box::new(MaterialEvaluator::with_own_material(tables)),
            SkillLevel::Full => Box::new(PositionalEvaluator::new(tables, self.jitter)),
        }
    }
}
