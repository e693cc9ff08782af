// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Railbird Poker advisor command line.
//!
//! Loads the trained model artifact and prints the advisory or the
//! automated action for a decision point as JSON:
//!
//! ```text
//! railbird-cli suggest --hero Ah Kh --board Ac Kd 2s --pot 100 --street flop
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use log::error;
use std::path::PathBuf;

use railbird_engine::{AdvisoryEngine, Street, SuggestRequest};

#[derive(Debug, Parser)]
struct Cli {
    /// The trained model artifact.
    #[clap(long, short, default_value = "railbird_model.json")]
    model: PathBuf,
    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Prints the advisory response for a decision point.
    Suggest(SpotArgs),
    /// Prints the automated action for a decision point.
    Action(SpotArgs),
}

#[derive(Debug, Args)]
struct SpotArgs {
    /// The two hole cards, rank then suit, e.g. --hero Ah Kh.
    #[clap(long, required = true, num_args = 2)]
    hero: Vec<String>,
    /// The board cards, 0, 3, 4 or 5 of them.
    #[clap(long, num_args = 0..=5)]
    board: Vec<String>,
    /// The pot size.
    #[clap(long, default_value_t = 0.0)]
    pot: f64,
    /// The amount owed to call.
    #[clap(long, default_value_t = 0.0)]
    to_call: f64,
    /// The street: preflop, flop, turn or river.
    #[clap(long, default_value = "preflop")]
    street: String,
    /// Optional seat position, advisory only.
    #[clap(long)]
    position: Option<String>,
}

impl SpotArgs {
    fn request(self) -> Result<SuggestRequest> {
        let street = self.street.parse::<Street>()?;
        Ok(SuggestRequest {
            hero: self.hero,
            board: self.board,
            pot: self.pot,
            to_call: self.to_call,
            street,
            position: self.position,
        })
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        error!("{e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let engine = AdvisoryEngine::load(&cli.model)?;

    let json = match cli.command {
        Command::Suggest(args) => serde_json::to_string_pretty(&engine.suggest(&args.request()?))?,
        Command::Action(args) => serde_json::to_string_pretty(&engine.action(&args.request()?))?,
    };

    println!("{json}");
    Ok(())
}
