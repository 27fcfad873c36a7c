// Copyright 2017-2019 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

#[macro_use]
extern crate clap;

use std::fs::File;
use std::process;
use std::sync::Arc;
use std::time::Instant;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use kingside::search::{CsvDataRecorder, EngineConfig, SkillLevel, Searcher};
use kingside::{
    perft, perft_divide, Analysis, AttackTables, MoveGenerator, Outcome, Position, SetupError,
};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn fen_arg() -> Arg<'static, 'static> {
    Arg::with_name("FEN")
        .help("FEN string for a board position")
        .default_value(START_FEN)
        .index(1)
}

fn depth_arg(default: &'static str) -> Arg<'static, 'static> {
    Arg::with_name("depth")
        .help("Depth of move tree to search")
        .value_name("DEPTH")
        .short("d")
        .long("depth")
        .default_value(default)
        .takes_value(true)
}

fn main() {
    env_logger::init();
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about(crate_description!())
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(
            SubCommand::with_name("perft")
                .about("PERFT analysis of board positions")
                .arg(fen_arg())
                .arg(depth_arg("4"))
                .arg(
                    Arg::with_name("divide")
                        .help("Print the node count below each root move")
                        .long("divide"),
                ),
        )
        .subcommand(
            SubCommand::with_name("search")
                .about("Choose a move for the side to move")
                .arg(fen_arg())
                .arg(depth_arg("4"))
                .arg(
                    Arg::with_name("level")
                        .help("Skill level, 1 (random) through 4 (full)")
                        .value_name("LEVEL")
                        .short("l")
                        .long("level")
                        .default_value("4")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("no-prune")
                        .help("Disable alpha-beta pruning")
                        .long("no-prune"),
                )
                .arg(
                    Arg::with_name("no-cache")
                        .help("Disable the transposition table")
                        .long("no-cache"),
                )
                .arg(
                    Arg::with_name("no-jitter")
                        .help("Disable random noise in the full evaluator")
                        .long("no-jitter"),
                )
                .arg(
                    Arg::with_name("stats")
                        .help("Append search statistics to a CSV file")
                        .value_name("FILE")
                        .long("stats")
                        .takes_value(true),
                ),
        )
        .subcommand(
            SubCommand::with_name("status")
                .about("Report check and game-over state of a position")
                .arg(fen_arg()),
        )
        .subcommand(
            SubCommand::with_name("moves")
                .about("List the legal moves and successor positions")
                .arg(fen_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        ("perft", Some(matches)) => run_perft(matches),
        ("search", Some(matches)) => run_search(matches),
        ("status", Some(matches)) => run_status(matches),
        ("moves", Some(matches)) => run_moves(matches),
        _ => process::exit(1),
    }
}

fn parse_position(matches: &ArgMatches) -> Position {
    let fen = matches.value_of("FEN").unwrap_or(START_FEN);
    match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("invalid fen: {}", e);
            process::exit(1);
        }
    }
}

fn run_perft(matches: &ArgMatches) -> ! {
    let pos = parse_position(matches);
    let depth = value_t_or_exit!(matches, "depth", u32);
    let tables = AttackTables::new();

    println!("fen:   {}", pos.as_fen());
    println!("depth: {}", depth);
    println!();
    println!("{}", pos);
    println!();
    if matches.is_present("divide") {
        let mut total = 0;
        for (mov, promotion, count) in perft_divide(&tables, &pos, depth) {
            match promotion {
                Some(kind) => println!("{}{}: {}", mov, kind, count),
                None => println!("{}: {}", mov, count),
            }
            total += count;
        }
        println!();
        println!("total: {}", total);
        process::exit(0);
    }

    for i in 1..depth + 1 {
        let start = Instant::now();
        let results = perft(&tables, &pos, i);
        let duration = start.elapsed();
        println!("perft({}) = {} ({} ms)", i, results, duration.as_millis());
    }

    process::exit(0);
}

fn run_search(matches: &ArgMatches) -> ! {
    let pos = parse_position(matches);
    let tables = Arc::new(AttackTables::new());
    match pos.validate_setup(&tables) {
        Ok(()) | Err(SetupError::KingInCheck(_)) => {}
        Err(e) => {
            eprintln!("invalid position: {}", e);
            process::exit(1);
        }
    }

    let skill = value_t_or_exit!(matches, "level", SkillLevel);
    let config = EngineConfig {
        skill,
        depth: value_t_or_exit!(matches, "depth", u32),
        pruning: !matches.is_present("no-prune"),
        memoize: !matches.is_present("no-cache"),
        jitter: !matches.is_present("no-jitter"),
    };

    let mut searcher = Searcher::new(config, tables.clone());
    if let Some(path) = matches.value_of("stats") {
        let file = match File::create(path) {
            Ok(file) => file,
            Err(e) => {
                eprintln!("failed to open {}: {}", path, e);
                process::exit(1);
            }
        };
        searcher.set_recorder(Box::new(CsvDataRecorder::new(file)));
    }

    println!("{}", pos);
    println!();
    let start = Instant::now();
    let result = searcher.search(&pos);
    let duration = start.elapsed();
    let chosen = match result.chosen {
        Some(chosen) => chosen,
        None => {
            println!("no legal moves");
            process::exit(0);
        }
    };

    let gen = MoveGenerator::new(&tables);
    let played = gen
        .legal_moves(&pos)
        .into_iter()
        .zip(gen.legal_successors(&pos))
        .find(|&(_, next)| next == chosen)
        .map(|((mov, promotion), _)| match promotion {
            Some(kind) => format!("{}{}", mov, kind),
            None => mov.to_string(),
        });

    println!("   move: {}", played.unwrap_or_else(|| "?".to_owned()));
    println!("    fen: {}", chosen.as_fen());
    println!("  score: {}", result.score);
    println!("  depth: {}", result.depth);
    println!("  nodes: {}", result.stats.nodes);
    println!("  evals: {}", result.stats.evaluations);
    println!("   hits: {}", result.stats.cache_hits);
    println!(" prunes: {}", result.stats.prunes);
    println!("   time: {} ms", duration.as_millis());
    process::exit(0);
}

fn run_status(matches: &ArgMatches) -> ! {
    let pos = parse_position(matches);
    let tables = AttackTables::new();
    let status = Analysis::new(&pos, &tables).status();

    println!("{}", pos);
    println!();
    println!("to move: {}", status.side_to_move);
    println!("  white: {}", if status.white_in_check { "in check" } else { "-" });
    println!("  black: {}", if status.black_in_check { "in check" } else { "-" });
    let outcome = match status.outcome {
        Some(Outcome::WhiteWins) => "white wins",
        Some(Outcome::BlackWins) => "black wins",
        Some(Outcome::Draw) => "draw",
        None => "in progress",
    };
    println!("outcome: {}", outcome);
    process::exit(0);
}

fn run_moves(matches: &ArgMatches) -> ! {
    let pos = parse_position(matches);
    let tables = AttackTables::new();
    let gen = MoveGenerator::new(&tables);
    let moves = gen.legal_moves(&pos);
    let successors = gen.legal_successors(&pos);
    for ((mov, promotion), next) in moves.iter().zip(successors.iter()) {
        let text = match promotion {
            Some(kind) => format!("{}{}", mov, kind),
            None => mov.to_string(),
        };
        println!("{:6} {}", text, next.as_fen());
    }
    println!();
    println!("{} legal moves", moves.len());
    process::exit(0);
}
