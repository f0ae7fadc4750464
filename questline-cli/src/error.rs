//! Error types emitted by the questline CLI.

use camino::Utf8PathBuf;
use thiserror::Error;

use questline_core::SolveError;

use crate::parse::ParseError;

/// Errors emitted by the questline CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Reading the problem file failed.
    #[error("failed to read problem file {path:?}: {source}")]
    ReadProblem {
        /// The file that could not be read.
        path: Utf8PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
    /// The problem file did not follow the sectioned format.
    #[error("failed to parse problem file {path:?}: {source}")]
    ParseProblem {
        /// The file that could not be parsed.
        path: Utf8PathBuf,
        /// The parse failure.
        #[source]
        source: ParseError,
    },
    /// The solver rejected the request.
    #[error("solver rejected the request: {0}")]
    Solve(#[from] SolveError),
    /// Serializing the solve response failed.
    #[error("failed to serialize solve response: {0}")]
    SerializeResponse(#[source] serde_json::Error),
}
