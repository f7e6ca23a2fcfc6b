//! Canned `ps` output for testing the listing collector.

use std::io;

use crate::collector::error::CollectError;
use crate::collector::traits::ProcessLister;

/// `ProcessLister` that replays fixed output or fails to spawn.
#[derive(Debug, Clone, Default)]
pub struct MockLister {
    output: Option<Vec<u8>>,
}

impl MockLister {
    /// Lister that returns `output` on every call.
    pub fn with_output(output: impl Into<Vec<u8>>) -> Self {
        Self {
            output: Some(output.into()),
        }
    }

    /// Lister that behaves like a missing `ps` binary.
    pub fn missing() -> Self {
        Self { output: None }
    }
}

impl ProcessLister for MockLister {
    fn list_states(&self) -> Result<Vec<u8>, CollectError> {
        self.output
            .clone()
            .ok_or_else(|| CollectError::ListingSpawn {
                program: "ps".to_string(),
                source: io::Error::new(io::ErrorKind::NotFound, "ps not found in mock"),
            })
    }
}
