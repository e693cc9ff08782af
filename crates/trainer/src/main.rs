// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Railbird offline training pipeline.
//!
//! Extracts historical hand rows from a CSV dataset, transforms them into
//! a feature matrix and label vector, trains the outcome predictor and
//! persists it with its encoding tables as a single artifact.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::{Result, ensure};
use clap::Parser;
use log::{error, info};
use rand::prelude::*;
use std::path::PathBuf;

use railbird_engine::{
    TrainedArtifact,
    category::StrengthCategory,
    forest::{FitParams, Forest},
};

mod dataset;

#[derive(Debug, Parser)]
struct Cli {
    /// The historical hands dataset.
    #[clap(long, default_value = "poker_dataset.csv")]
    dataset: PathBuf,
    /// The output model artifact.
    #[clap(long, default_value = "railbird_model.json")]
    out: PathBuf,
    /// Maximum number of dataset rows to load.
    #[clap(long, default_value_t = 50_000)]
    rows: usize,
    /// Number of trees in the ensemble.
    #[clap(long, default_value_t = 100)]
    trees: usize,
    /// Seed for the train/test split and bootstrap sampling.
    #[clap(long, default_value_t = 42)]
    seed: u64,
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
    let rows = dataset::load(&cli.dataset, cli.rows)?;
    info!("Loaded {} rows from {}", rows.len(), cli.dataset.display());

    let (x, y) = dataset::examples(&rows);
    ensure!(!x.is_empty(), "dataset produced no training examples");
    info!("Built {} examples across the flop and turn streets", x.len());

    // 80/20 train/test split with a fixed seed for reproducibility.
    let mut indices = (0..x.len()).collect::<Vec<_>>();
    indices.shuffle(&mut StdRng::seed_from_u64(cli.seed));
    let (test_idx, train_idx) = indices.split_at(x.len() / 5);

    let train_x = train_idx.iter().map(|&i| x[i]).collect::<Vec<_>>();
    let train_y = train_idx.iter().map(|&i| y[i]).collect::<Vec<_>>();

    info!("Training {} trees on {} examples", cli.trees, train_x.len());
    let params = FitParams {
        trees: cli.trees,
        seed: cli.seed,
        ..FitParams::default()
    };
    let (forest, oob) = Forest::fit(&train_x, &train_y, StrengthCategory::ALL.len(), &params);
    info!("Out-of-bag accuracy: {oob:.3}");

    // A held-out score materially below the out-of-bag score flags
    // overfitting and should block deployment.
    let correct = test_idx
        .iter()
        .filter(|&&i| forest.predict(&x[i]).ok() == Some(y[i]))
        .count();
    let held_out = correct as f64 / test_idx.len().max(1) as f64;
    info!("Held-out test accuracy: {held_out:.3}");

    let artifact = TrainedArtifact::new(forest);
    artifact.save(&cli.out)?;
    info!("Saved model artifact to {}", cli.out.display());

    Ok(())
}
