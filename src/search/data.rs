// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::io::Write;
use std::sync::Mutex;

use csv::Writer;

use crate::position::Position;

/// Statistics for one top-level decision.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub fen: String,
    pub skill: u32,
    pub depth: u32,
    pub nodes: u64,
    pub evaluations: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub prunes: u64,
    pub chosen: String,
    pub score: i32,
}

pub trait DataRecorder {
    fn record(&self, pos: &Position, rec: &Record);
}

pub struct NullDataRecorder;

impl DataRecorder for NullDataRecorder {
    fn record(&self, _pos: &Position, _rec: &Record) {}
}

/// Appends one CSV row per decision. Write failures are logged and the
/// search carries on.
pub struct CsvDataRecorder<W: Write> {
    writer: Mutex<Writer<W>>,
}

impl<W: Write> CsvDataRecorder<W> {
    pub fn new(writer: W) -> CsvDataRecorder<W> {
        CsvDataRecorder {
            writer: Mutex::new(Writer::from_writer(writer)),
        }
    }
}

impl<W: Write> DataRecorder for CsvDataRecorder<W> {
    fn record(&self, pos: &Position, rec: &Record) {
        let mut copy = rec.clone();
        copy.fen = pos.as_fen();
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(_) => {
                warn!("search statistics writer was poisoned; dropping record");
                return;
            }
        };

        if let Err(e) = writer.serialize(&copy) {
            warn!("failed to write search statistics: {}", e);
            return;
        }

        if let Err(e) = writer.flush() {
            warn!("failed to flush search statistics: {}", e);
        }
    }
}
