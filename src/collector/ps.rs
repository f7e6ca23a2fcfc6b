//! Process state counting from `ps axo state` output.
//!
//! The output is one state column per process, e.g.:
//!
//! ```text
//! STAT
//! Ss
//! R+
//! Z
//! ```
//!
//! Only the first character of each token is the state; the rest are
//! modifiers (`s` session leader, `+` foreground, `<` high priority, ...).

use tracing::{debug, warn};

use crate::collector::counters::{CounterSet, StateKey};
use crate::collector::error::CollectError;
use crate::collector::traits::ProcessLister;

const HEADER: &[u8] = b"STAT";

/// Maps a `ps` state character to its counter.
///
/// Returns `None` for codes without a counter.
pub fn classify_ps_state(code: u8) -> Option<StateKey> {
    match code {
        b'W' => Some(StateKey::Wait),
        // Uninterruptible wait, disk sleep, or waiting to acquire a lock.
        b'U' | b'D' | b'L' => Some(StateKey::Blocked),
        b'Z' => Some(StateKey::Zombies),
        b'T' => Some(StateKey::Stopped),
        b'R' => Some(StateKey::Running),
        b'S' => Some(StateKey::Sleeping),
        b'I' => Some(StateKey::Idle),
        _ => None,
    }
}

/// Counts process states from the lister's output into `counters`.
///
/// A leading `STAT` header is skipped. Every other token counts toward
/// `total`, whether or not its state is recognized.
pub fn gather_from_ps<L: ProcessLister + ?Sized>(
    lister: &L,
    counters: &mut CounterSet,
) -> Result<(), CollectError> {
    let output = lister.list_states()?;

    let tokens = output
        .split(|b| b.is_ascii_whitespace())
        .filter(|token| !token.is_empty());

    let mut counted = 0usize;
    for (i, token) in tokens.enumerate() {
        if i == 0 && token == HEADER {
            continue;
        }

        let code = token[0];
        match classify_ps_state(code) {
            Some(key) => {
                if !counters.increment(key) {
                    warn!(
                        "processes: state [ {} ] from ps maps to '{}', which is not reported on this OS",
                        code.escape_ascii(),
                        key
                    );
                }
            }
            None => warn!("processes: Unknown state [ {} ] from ps", code.escape_ascii()),
        }
        counters.increment(StateKey::Total);
        counted += 1;
    }

    debug!("ps: counted {} processes", counted);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::counters::OsFamily;
    use crate::collector::mock::MockLister;

    fn gather(os: OsFamily, output: &str) -> CounterSet {
        let mut counters = CounterSet::seeded(&os);
        gather_from_ps(&MockLister::with_output(output), &mut counters).unwrap();
        counters
    }

    #[test]
    fn test_header_and_basic_states() {
        let counters = gather(OsFamily::Darwin, "STAT\nR\nS\nS\nZ\nU\n");

        assert_eq!(counters.get(StateKey::Running), Some(1));
        assert_eq!(counters.get(StateKey::Sleeping), Some(2));
        assert_eq!(counters.get(StateKey::Zombies), Some(1));
        assert_eq!(counters.get(StateKey::Blocked), Some(1));
        assert_eq!(counters.get(StateKey::Stopped), Some(0));
        assert_eq!(counters.get(StateKey::Idle), Some(0));
        assert_eq!(counters.get(StateKey::Total), Some(5));
    }

    #[test]
    fn test_without_header() {
        let counters = gather(OsFamily::Darwin, "R\nS\n");
        assert_eq!(counters.get(StateKey::Total), Some(2));
    }

    #[test]
    fn test_stat_only_skipped_in_first_position() {
        // A later "STAT" token is a real process in state 'S'.
        let counters = gather(OsFamily::Darwin, "R STAT");
        assert_eq!(counters.get(StateKey::Running), Some(1));
        assert_eq!(counters.get(StateKey::Sleeping), Some(1));
        assert_eq!(counters.get(StateKey::Total), Some(2));
    }

    #[test]
    fn test_modifiers_ignored() {
        let counters = gather(OsFamily::Darwin, "STAT\nSs\nR+\nS<l\nIs\nT+\nDL\nLs\n");
        assert_eq!(counters.get(StateKey::Sleeping), Some(2));
        assert_eq!(counters.get(StateKey::Running), Some(1));
        assert_eq!(counters.get(StateKey::Idle), Some(1));
        assert_eq!(counters.get(StateKey::Stopped), Some(1));
        assert_eq!(counters.get(StateKey::Blocked), Some(2));
        assert_eq!(counters.get(StateKey::Total), Some(7));
    }

    #[test]
    fn test_freebsd_wait_and_idle() {
        let counters = gather(OsFamily::FreeBsd, "STAT\nW\nWL\nI\nS\n");
        assert_eq!(counters.get(StateKey::Wait), Some(2));
        assert_eq!(counters.get(StateKey::Idle), Some(1));
        assert_eq!(counters.get(StateKey::Total), Some(4));
    }

    #[test]
    fn test_unknown_state_counts_toward_total_only() {
        let counters = gather(OsFamily::Darwin, "STAT\nR\nX\n?\n");
        assert_eq!(counters.get(StateKey::Running), Some(1));
        assert_eq!(counters.get(StateKey::Total), Some(3));

        let named: u64 = counters
            .iter()
            .filter(|(k, _)| *k != StateKey::Total)
            .map(|(_, v)| v)
            .sum();
        assert_eq!(named, 1);
    }

    #[test]
    fn test_unseeded_key_counts_toward_total() {
        // Darwin has no "wait" counter.
        let counters = gather(OsFamily::Darwin, "W\nS\n");
        assert_eq!(counters.get(StateKey::Wait), None);
        assert_eq!(counters.get(StateKey::Sleeping), Some(1));
        assert_eq!(counters.get(StateKey::Total), Some(2));
    }

    #[test]
    fn test_empty_output() {
        let counters = gather(OsFamily::Darwin, "");
        assert_eq!(counters.get(StateKey::Total), Some(0));

        let counters = gather(OsFamily::Darwin, "STAT\n");
        assert_eq!(counters.get(StateKey::Total), Some(0));
    }

    #[test]
    fn test_listing_failure_propagates() {
        let mut counters = CounterSet::seeded(&OsFamily::Darwin);
        let err = gather_from_ps(&MockLister::missing(), &mut counters).unwrap_err();
        assert!(matches!(err, CollectError::ListingSpawn { .. }));
        assert_eq!(counters.get(StateKey::Total), Some(0));
    }

    #[test]
    fn test_classify_table() {
        assert_eq!(classify_ps_state(b'L'), Some(StateKey::Blocked));
        assert_eq!(classify_ps_state(b'U'), Some(StateKey::Blocked));
        assert_eq!(classify_ps_state(b't'), None);
        assert_eq!(classify_ps_state(b'X'), None);
    }
}
