//! Error type for a failed collection cycle.

use std::io;
use std::path::PathBuf;
use std::process::ExitStatus;

/// Fatal conditions that abort a collection cycle.
///
/// Vanished processes, unknown state codes and unparsable thread counts are
/// not errors; they are skipped or logged by the collectors.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// The listing tool could not be started.
    #[error("failed to run {program}: {source}")]
    ListingSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The listing tool ran but exited unsuccessfully.
    #[error("{program} exited with {status}: {stderr}")]
    ListingFailed {
        program: String,
        status: ExitStatus,
        stderr: String,
    },

    /// The process-information root could not be enumerated.
    #[error("failed to read directory {}: {source}", path.display())]
    ProcRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stat file existed but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A stat file had fewer fields than the state column requires.
    #[error("malformed stat file {}: expected at least 3 fields, found {fields}", path.display())]
    MalformedStat { path: PathBuf, fields: usize },
}
