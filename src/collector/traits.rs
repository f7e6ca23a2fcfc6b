//! Abstractions over the probe's data sources to enable testing and mocking.
//!
//! The `FileSystem` trait lets the stat-file collector read either the real
//! `/proc` on Linux or an in-memory tree, and `ProcessLister` does the same
//! for the external `ps` invocation.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use crate::collector::error::CollectError;

/// Abstraction for filesystem operations.
///
/// This trait allows collectors to read from the real filesystem or from
/// a mock implementation for testing purposes.
pub trait FileSystem {
    /// Reads the entire contents of a file.
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    /// Returns `true` if `path` is a directory. Symlinks are not followed.
    fn is_dir(&self, path: &Path) -> bool;

    /// Lists entries in a directory.
    ///
    /// # Returns
    /// A vector of paths to entries in the directory, or an I/O error.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;

    /// Reads a per-process stat file.
    ///
    /// A missing file means the process exited after its directory was
    /// listed; that yields `Ok(None)` rather than an error.
    fn read_stat(&self, path: &Path) -> io::Result<Option<Vec<u8>>> {
        match self.read(path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Real filesystem implementation that delegates to `std::fs`.
///
/// Use this in production to read from the actual `/proc` filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok_and(|m| m.is_dir())
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let entries = std::fs::read_dir(path)?;
        let mut paths = Vec::new();
        for entry in entries {
            paths.push(entry?.path());
        }
        Ok(paths)
    }
}

/// Source of per-process state codes in `ps` output format.
pub trait ProcessLister {
    /// Returns the raw output of the listing tool: whitespace-separated
    /// state codes, optionally preceded by a `STAT` header.
    fn list_states(&self) -> Result<Vec<u8>, CollectError>;
}

/// Runs `ps axo state` on the host.
#[derive(Debug, Clone)]
pub struct PsLister {
    program: String,
}

impl PsLister {
    pub const DEFAULT_PROGRAM: &'static str = "ps";
    const ARGS: [&'static str; 2] = ["axo", "state"];

    pub fn new() -> Self {
        Self::with_program(Self::DEFAULT_PROGRAM)
    }

    /// Uses `program` instead of `ps` from `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for PsLister {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLister for PsLister {
    fn list_states(&self) -> Result<Vec<u8>, CollectError> {
        debug!("running {} {}", self.program, Self::ARGS.join(" "));
        let output = Command::new(&self.program)
            .args(Self::ARGS)
            .output()
            .map_err(|source| CollectError::ListingSpawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(CollectError::ListingFailed {
                program: self.program.clone(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_real_fs_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stat");
        fs::write(&path, "1 (init) S 0").unwrap();

        let fs = RealFs::new();
        assert_eq!(fs.read(&path).unwrap(), b"1 (init) S 0");
    }

    #[test]
    fn test_real_fs_read_stat_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let fs = RealFs::new();
        let result = fs.read_stat(&dir.path().join("gone/stat")).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_real_fs_read_stat_on_directory_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let fs = RealFs::new();
        assert!(fs.read_stat(dir.path()).is_err());
    }

    #[test]
    fn test_real_fs_read_dir_and_is_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("1")).unwrap();
        fs::write(dir.path().join("uptime"), "1.0 2.0").unwrap();

        let fs = RealFs::new();
        let entries = fs.read_dir(dir.path()).unwrap();
        assert_eq!(entries.len(), 2);
        assert!(fs.is_dir(&dir.path().join("1")));
        assert!(!fs.is_dir(&dir.path().join("uptime")));
        assert!(!fs.is_dir(&dir.path().join("missing")));
    }

    #[cfg(unix)]
    #[test]
    fn test_real_fs_is_dir_does_not_follow_symlinks() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("42")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("42"), dir.path().join("self")).unwrap();

        let fs = RealFs::new();
        assert!(!fs.is_dir(&dir.path().join("self")));
    }

    #[test]
    fn test_ps_lister_missing_program() {
        let lister = PsLister::with_program("/nonexistent/bin/ps-12345");
        let err = lister.list_states().unwrap_err();
        assert!(matches!(err, CollectError::ListingSpawn { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_ps_lister_nonzero_exit() {
        let lister = PsLister::with_program("false");
        let err = lister.list_states().unwrap_err();
        assert!(matches!(err, CollectError::ListingFailed { .. }));
    }
}
