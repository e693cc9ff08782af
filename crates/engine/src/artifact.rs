// Copyright (C) 2025 Railbird Contributors
// SPDX-License-Identifier: Apache-2.0

//! Persisted model artifact.
use anyhow::{Context, Result, ensure};
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

use railbird_cards::Rank;

use crate::{category::StrengthCategory, features::RankTable, forest::Forest};

/// The trained ensemble with its encoding tables, persisted as one file.
///
/// The artifact is built once by the training pipeline, loaded once at
/// process start, and treated as immutable for the life of the serving
/// process. Loading fails fast when any table is missing or the category
/// table is not the exact inverse of the canonical encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainedArtifact {
    /// The trained ensemble.
    pub forest: Forest,
    /// Category label for each code, the decode table; the encode table is
    /// its inverse.
    pub categories: Vec<String>,
    /// Rank token to numeric value table.
    pub ranks: RankTable,
}

impl TrainedArtifact {
    /// Wraps a fitted forest with the canonical encoding tables.
    pub fn new(forest: Forest) -> Self {
        Self {
            forest,
            categories: StrengthCategory::ALL
                .iter()
                .map(|c| c.label().to_string())
                .collect(),
            ranks: RankTable::default(),
        }
    }

    /// Saves the artifact to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json).with_context(|| format!("writing model artifact {}", path.display()))
    }

    /// Loads and validates an artifact from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading model artifact {}", path.display()))?;
        let artifact: Self = serde_json::from_str(&json)
            .with_context(|| format!("decoding model artifact {}", path.display()))?;
        artifact.validate()?;
        Ok(artifact)
    }

    /// Checks the encoding tables against the canonical encoding.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.categories.len() == StrengthCategory::ALL.len(),
            "category table has {} entries, expected {}",
            self.categories.len(),
            StrengthCategory::ALL.len()
        );

        for (code, label) in self.categories.iter().enumerate() {
            let canonical = StrengthCategory::ALL[code].label();
            ensure!(
                label == canonical,
                "category table decodes code {code} as {label:?}, expected {canonical:?}"
            );
        }

        ensure!(
            self.forest.classes() == self.categories.len(),
            "forest predicts {} classes, category table has {}",
            self.forest.classes(),
            self.categories.len()
        );

        for rank in Rank::ranks() {
            let token = rank.to_string();
            ensure!(
                self.ranks.value(&token) == rank.value(),
                "rank table is missing or miscodes rank {token}"
            );
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forest::{FitParams, INPUTS};

    fn artifact() -> TrainedArtifact {
        let x = vec![[0.0; INPUTS], [1.0, 0.0, 1.0, 14.0, 0.0]];
        let y = vec![0u8, 1];
        let params = FitParams {
            trees: 5,
            ..FitParams::default()
        };
        let (forest, _) = Forest::fit(&x, &y, StrengthCategory::ALL.len(), &params);
        TrainedArtifact::new(forest)
    }

    #[test]
    fn save_load_roundtrip() {
        let artifact = artifact();
        let path = std::env::temp_dir().join(format!("railbird_artifact_{}.json", std::process::id()));

        artifact.save(&path).unwrap();
        let loaded = TrainedArtifact::load(&path).unwrap();
        assert_eq!(artifact, loaded);

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn load_missing_artifact_fails() {
        let path = std::env::temp_dir().join("railbird_artifact_missing.json");
        assert!(TrainedArtifact::load(&path).is_err());
    }

    #[test]
    fn validate_rejects_bad_tables() {
        let mut bad = artifact();
        bad.categories.pop();
        assert!(bad.validate().is_err());

        let mut bad = artifact();
        bad.categories.swap(0, 1);
        assert!(bad.validate().is_err());

        let mut bad = artifact();
        bad.ranks = serde_json::from_str("{}").unwrap();
        assert!(bad.validate().is_err());
    }
}
