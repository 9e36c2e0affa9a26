//! Crate error type.
//!
//! Fatal conditions only: configuration problems (missing or malformed
//! model artifacts), broken preconditions (empty history), cursor I/O,
//! and solver backend failures. An infeasible assignment model is NOT
//! an error — it is reported as a [`SolveOutcome::Infeasible`] value so
//! callers can surface "no roster generated" without unwinding.
//!
//! [`SolveOutcome::Infeasible`]: crate::assign::SolveOutcome::Infeasible

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the rostering pipeline.
#[derive(Debug, Error)]
pub enum Error {
    /// A regression model artifact is absent. Training must run first;
    /// the pipeline never substitutes a default model.
    #[error("model artifact not found for {model}: {}", path.display())]
    MissingModel {
        /// Model name (ward code or "total").
        model: String,
        /// Expected artifact location.
        path: PathBuf,
    },

    /// A model artifact exists but could not be read.
    #[error("failed to read model artifact {}", path.display())]
    ArtifactIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A model artifact exists but does not decode.
    #[error("malformed model artifact {}", path.display())]
    ArtifactFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The historical dataset has no rows; there is nothing to derive
    /// a feature vector (or training targets) from.
    #[error("historical dataset is empty")]
    EmptyHistory,

    /// The week cursor file could not be read or written.
    #[error("week cursor file {} is unusable", path.display())]
    CursorIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The week cursor file holds something other than a `YYYY-MM-DD` date.
    #[error("week cursor file {} holds an invalid date", path.display())]
    CursorFormat {
        path: PathBuf,
        #[source]
        source: chrono::format::ParseError,
    },

    /// The MILP backend failed for a reason other than infeasibility.
    #[error("solver backend failure: {0}")]
    Backend(String),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
