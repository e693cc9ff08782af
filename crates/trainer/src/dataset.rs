// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Historical hands dataset loading and example building.
use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use railbird_engine::{
    category::StrengthCategory,
    features::{HandFeatures, RankTable},
    forest::INPUTS,
};

/// One parsed dataset row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Row {
    /// The starting hand features.
    pub features: HandFeatures,
    /// Strength code recorded on the flop.
    pub flop: u8,
    /// Strength code recorded on the turn.
    pub turn: u8,
    /// Strength code recorded at showdown.
    pub showdown: u8,
}

/// Loads up to `limit` rows from a CSV dataset.
///
/// The `hand`, `result1`, `result2` and `result3` columns are located by
/// header name; unparseable cells degrade to sentinel features and the
/// NOTHING code instead of failing the pipeline.
///
/// Rows are split on plain commas with no quoting support, the format the
/// historical exports produce. A quoted cell containing a comma shifts the
/// columns after it and the sheared cells degrade like any other
/// unparseable cell.
pub fn load(path: &Path, limit: usize) -> Result<Vec<Row>> {
    let file =
        File::open(path).with_context(|| format!("opening dataset {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let header = lines.next().transpose()?.context("dataset is empty")?;
    let columns = Columns::parse(&header)?;

    let ranks = RankTable::default();
    let mut rows = Vec::new();
    for line in lines {
        if rows.len() >= limit {
            break;
        }

        let line = line?;
        if !line.trim().is_empty() {
            rows.push(columns.row(&line, &ranks));
        }
    }

    Ok(rows)
}

/// Builds the training examples, pairing an intermediate street's strength
/// code with the static hand features, labeled by the showdown code.
///
/// Both the flop and the turn contribute an aligned example set, doubling
/// the effective sample count and teaching the model to generalize across
/// streets with one feature schema.
pub fn examples(rows: &[Row]) -> (Vec<[f32; INPUTS]>, Vec<u8>) {
    let mut x = Vec::with_capacity(rows.len() * 2);
    let mut y = Vec::with_capacity(rows.len() * 2);

    for current in [|r: &Row| r.flop, |r: &Row| r.turn] {
        for row in rows {
            let mut inputs = [0.0f32; INPUTS];
            inputs[0] = f32::from(current(row));
            inputs[1..].copy_from_slice(&row.features.to_inputs());

            x.push(inputs);
            y.push(row.showdown);
        }
    }

    (x, y)
}

/// Dataset column indices located from the header.
struct Columns {
    hand: usize,
    result1: usize,
    result2: usize,
    result3: usize,
}

impl Columns {
    fn parse(header: &str) -> Result<Self> {
        let names = header.split(',').map(str::trim).collect::<Vec<_>>();
        let find = |name: &str| {
            names
                .iter()
                .position(|n| *n == name)
                .with_context(|| format!("dataset is missing the {name:?} column"))
        };

        Ok(Self {
            hand: find("hand")?,
            result1: find("result1")?,
            result2: find("result2")?,
            result3: find("result3")?,
        })
    }

    fn row(&self, line: &str, ranks: &RankTable) -> Row {
        let cells = line.split(',').collect::<Vec<_>>();
        let cell = |i: usize| cells.get(i).copied().unwrap_or("");

        // Hand cells look like "Ah Kd | ...", the hole cards come before
        // the bar.
        let hand = cell(self.hand).split('|').next().unwrap_or("");
        let tokens = hand.split_whitespace().collect::<Vec<_>>();

        Row {
            features: HandFeatures::extract(&tokens, ranks),
            flop: StrengthCategory::from_result_text(cell(self.result1)).code(),
            turn: StrengthCategory::from_result_text(cell(self.result2)).code(),
            showdown: StrengthCategory::from_result_text(cell(self.result3)).code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_dataset(name: &str, content: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("railbird_{name}_{}.csv", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn load_locates_columns_by_header() {
        let path = write_dataset(
            "columns",
            "game,hand,result1,result2,result3\n\
             1,Ah Kh | win,PAIR,TWO PAIR,FULL HOUSE\n\
             2,2c 7d,NOTHING,NOTHING,NOTHING\n",
        );

        let rows = load(&path, 100).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].features.is_suited, 1);
        assert_eq!(rows[0].features.high_card_rank, 14);
        assert_eq!(rows[0].flop, 1);
        // "TWO PAIR" decodes as PAIR, first containment match wins.
        assert_eq!(rows[0].turn, 1);
        assert_eq!(rows[0].showdown, 6);

        assert_eq!(rows[1].features.high_card_rank, 7);
        assert_eq!(rows[1].showdown, 0);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_respects_row_limit() {
        let path = write_dataset(
            "limit",
            "hand,result1,result2,result3\n\
             Ah Kh,PAIR,PAIR,PAIR\n\
             2c 7d,NOTHING,NOTHING,NOTHING\n\
             3c 8d,NOTHING,NOTHING,NOTHING\n",
        );

        let rows = load(&path, 2).unwrap();
        assert_eq!(rows.len(), 2);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_rejects_missing_columns() {
        let path = write_dataset("missing", "hand,result1,result3\nAh Kh,PAIR,PAIR\n");
        assert!(load(&path, 10).is_err());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn malformed_cells_degrade() {
        let path = write_dataset(
            "malformed",
            "hand,result1,result2,result3\n\
             garbage,what,ever,unknown\n",
        );

        let rows = load(&path, 10).unwrap();
        assert_eq!(rows[0].features, HandFeatures::MISSING);
        assert_eq!(rows[0].flop, 0);
        assert_eq!(rows[0].showdown, 0);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn quoted_commas_shift_columns() {
        let path = write_dataset(
            "quoted",
            "hand,result1,result2,result3\n\
             \"Ah Kh, offsuit\",PAIR,TWO PAIR,FULL HOUSE\n",
        );

        // The comma inside the quoted cell shifts every later column by
        // one, the sheared cells decode conservatively.
        let rows = load(&path, 10).unwrap();
        assert_eq!(rows[0].flop, 0);
        assert_eq!(rows[0].turn, 1);
        assert_eq!(rows[0].showdown, 1);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn examples_cover_flop_and_turn() {
        let rows = vec![Row {
            features: HandFeatures {
                is_pair: 0,
                is_suited: 1,
                high_card_rank: 14,
                connector_gap: 0,
            },
            flop: 1,
            turn: 2,
            showdown: 5,
        }];

        let (x, y) = examples(&rows);
        assert_eq!(x.len(), 2);
        assert_eq!(x[0], [1.0, 0.0, 1.0, 14.0, 0.0]);
        assert_eq!(x[1], [2.0, 0.0, 1.0, 14.0, 0.0]);
        assert_eq!(y, vec![5, 5]);
    }
}
