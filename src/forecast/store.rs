//! Model artifact store.
//!
//! One JSON artifact per trained model under a models directory:
//! `{code}_nurse_demand.json` per ward and `total_nurse_demand.json`
//! for the overall-demand model. Retraining overwrites an artifact
//! wholesale; there is no incremental update. A missing or malformed
//! artifact is a fatal configuration error, never silently defaulted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::models::Ward;

use super::forest::RandomForest;

/// Directory-backed store of regression artifacts.
#[derive(Debug, Clone)]
pub struct ModelStore {
    dir: PathBuf,
}

impl ModelStore {
    /// Creates a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Artifact path for a ward model.
    pub fn ward_path(&self, ward: Ward) -> PathBuf {
        self.dir.join(format!("{}_nurse_demand.json", ward.code()))
    }

    /// Artifact path for the overall-demand model.
    pub fn total_path(&self) -> PathBuf {
        self.dir.join("total_nurse_demand.json")
    }

    /// Loads a ward model. Absence is fatal.
    pub fn load_ward(&self, ward: Ward) -> Result<RandomForest> {
        load(self.ward_path(ward), ward.code())
    }

    /// Loads the overall-demand model. Absence is fatal.
    pub fn load_total(&self) -> Result<RandomForest> {
        load(self.total_path(), "total")
    }

    /// Saves a ward model, replacing any prior artifact.
    pub fn save_ward(&self, ward: Ward, forest: &RandomForest) -> Result<()> {
        self.save(self.ward_path(ward), forest)
    }

    /// Saves the overall-demand model, replacing any prior artifact.
    pub fn save_total(&self, forest: &RandomForest) -> Result<()> {
        self.save(self.total_path(), forest)
    }

    fn save(&self, path: PathBuf, forest: &RandomForest) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| Error::ArtifactIo {
            path: self.dir.clone(),
            source,
        })?;
        let json = serde_json::to_string(forest).map_err(|source| Error::ArtifactFormat {
            path: path.clone(),
            source,
        })?;
        fs::write(&path, json).map_err(|source| Error::ArtifactIo { path, source })
    }
}

fn load(path: PathBuf, model: &str) -> Result<RandomForest> {
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(source) if source.kind() == io::ErrorKind::NotFound => {
            return Err(Error::MissingModel {
                model: model.to_string(),
                path,
            });
        }
        Err(source) => return Err(Error::ArtifactIo { path, source }),
    };
    serde_json::from_str(&contents).map_err(|source| Error::ArtifactFormat { path, source })
}
