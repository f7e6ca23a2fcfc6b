//! Choice between `ps` output and `/proc/[pid]/stat` files.

use std::fmt;

use crate::collector::counters::OsFamily;

/// Where process states are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Output of the external `ps` tool.
    Listing,
    /// Per-process `stat` files under the proc root.
    StatFiles,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Listing => f.write_str("ps"),
            Source::StatFiles => f.write_str("procfs"),
        }
    }
}

/// Picks the source for one cycle.
///
/// Linux reads procfs, everything else runs `ps`. `force_ps` wins over
/// `force_proc` when both are set.
pub fn select_source(os: &OsFamily, force_ps: bool, force_proc: bool) -> Source {
    if force_ps {
        Source::Listing
    } else if force_proc {
        Source::StatFiles
    } else if *os == OsFamily::Linux {
        Source::StatFiles
    } else {
        Source::Listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_defaults() {
        assert_eq!(select_source(&OsFamily::Linux, false, false), Source::StatFiles);
        assert_eq!(select_source(&OsFamily::Darwin, false, false), Source::Listing);
        assert_eq!(select_source(&OsFamily::FreeBsd, false, false), Source::Listing);
        assert_eq!(
            select_source(&OsFamily::Other("illumos".into()), false, false),
            Source::Listing
        );
    }

    #[test]
    fn test_force_ps_overrides_linux() {
        assert_eq!(select_source(&OsFamily::Linux, true, false), Source::Listing);
    }

    #[test]
    fn test_force_proc_overrides_darwin() {
        assert_eq!(select_source(&OsFamily::Darwin, false, true), Source::StatFiles);
    }

    #[test]
    fn test_force_ps_wins_over_force_proc() {
        assert_eq!(select_source(&OsFamily::Linux, true, true), Source::Listing);
        assert_eq!(select_source(&OsFamily::Darwin, true, true), Source::Listing);
    }
}
