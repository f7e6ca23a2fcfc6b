//! Per-cycle process state counters.
//!
//! The set of counters reported depends on the host OS: every OS gets the
//! base states, and some add their own (Linux reports paging and thread
//! totals, the BSDs and macOS report idle processes). A [`CounterSet`] is
//! seeded with exactly the keys for one OS, all at zero, and is only ever
//! incremented afterwards.

use std::collections::BTreeMap;
use std::fmt;

/// Name of a single counter in the `processes` sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StateKey {
    Blocked,
    Zombies,
    Stopped,
    Running,
    Sleeping,
    Total,
    Paging,
    TotalThreads,
    Idle,
    Wait,
}

impl StateKey {
    /// Number of distinct keys.
    pub const COUNT: usize = 10;

    /// All keys, base states first.
    pub const ALL: [StateKey; Self::COUNT] = [
        StateKey::Blocked,
        StateKey::Zombies,
        StateKey::Stopped,
        StateKey::Running,
        StateKey::Sleeping,
        StateKey::Total,
        StateKey::Paging,
        StateKey::TotalThreads,
        StateKey::Idle,
        StateKey::Wait,
    ];

    /// Field name as emitted in the sample.
    pub fn as_str(self) -> &'static str {
        match self {
            StateKey::Blocked => "blocked",
            StateKey::Zombies => "zombies",
            StateKey::Stopped => "stopped",
            StateKey::Running => "running",
            StateKey::Sleeping => "sleeping",
            StateKey::Total => "total",
            StateKey::Paging => "paging",
            StateKey::TotalThreads => "total_threads",
            StateKey::Idle => "idle",
            StateKey::Wait => "wait",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for StateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys reported on every OS.
const BASE_KEYS: [StateKey; 6] = [
    StateKey::Blocked,
    StateKey::Zombies,
    StateKey::Stopped,
    StateKey::Running,
    StateKey::Sleeping,
    StateKey::Total,
];

/// Host operating system family, as far as counter seeding cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Linux,
    FreeBsd,
    Darwin,
    OpenBsd,
    Other(String),
}

impl OsFamily {
    /// The OS this binary was built for.
    pub fn current() -> Self {
        Self::from_name(std::env::consts::OS)
    }

    /// Maps an OS identity string to a family.
    ///
    /// Accepts both `darwin` and Rust's own `macos` spelling.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "linux" => OsFamily::Linux,
            "freebsd" => OsFamily::FreeBsd,
            "darwin" | "macos" => OsFamily::Darwin,
            "openbsd" => OsFamily::OpenBsd,
            other => OsFamily::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            OsFamily::Linux => "linux",
            OsFamily::FreeBsd => "freebsd",
            OsFamily::Darwin => "darwin",
            OsFamily::OpenBsd => "openbsd",
            OsFamily::Other(name) => name,
        }
    }

    /// Keys this OS reports in addition to the base states.
    pub fn extra_keys(&self) -> &'static [StateKey] {
        match self {
            OsFamily::Linux => &[StateKey::Paging, StateKey::TotalThreads],
            OsFamily::FreeBsd => &[StateKey::Idle, StateKey::Wait],
            OsFamily::Darwin | OsFamily::OpenBsd => &[StateKey::Idle],
            OsFamily::Other(_) => &[],
        }
    }

    /// Every key seeded for this OS, base states first.
    pub fn counter_keys(&self) -> Vec<StateKey> {
        BASE_KEYS
            .iter()
            .chain(self.extra_keys())
            .copied()
            .collect()
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Counter values for one collection cycle.
///
/// Keys that were not seeded stay absent: they are neither reported nor
/// incremented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterSet {
    values: [Option<u64>; StateKey::COUNT],
}

impl CounterSet {
    /// Zero-valued counters for the given OS.
    pub fn seeded(os: &OsFamily) -> Self {
        Self::with_keys(&os.counter_keys())
    }

    /// Zero-valued counters for an explicit key list.
    pub fn with_keys(keys: &[StateKey]) -> Self {
        let mut values = [None; StateKey::COUNT];
        for key in keys {
            values[key.index()] = Some(0);
        }
        Self { values }
    }

    /// Adds one to `key`. Returns `false` if the key was not seeded.
    pub fn increment(&mut self, key: StateKey) -> bool {
        self.add(key, 1)
    }

    /// Adds `n` to `key`. Returns `false` if the key was not seeded.
    pub fn add(&mut self, key: StateKey, n: u64) -> bool {
        match &mut self.values[key.index()] {
            Some(value) => {
                *value = value.saturating_add(n);
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: StateKey) -> Option<u64> {
        self.values[key.index()]
    }

    pub fn contains(&self, key: StateKey) -> bool {
        self.values[key.index()].is_some()
    }

    /// Seeded keys and their values, base states first.
    pub fn iter(&self) -> impl Iterator<Item = (StateKey, u64)> + '_ {
        StateKey::ALL
            .iter()
            .filter_map(|&key| self.get(key).map(|value| (key, value)))
    }

    /// Number of seeded keys.
    pub fn len(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Field map keyed by counter name.
    pub fn to_fields(&self) -> BTreeMap<String, u64> {
        self.iter()
            .map(|(key, value)| (key.as_str().to_string(), value))
            .collect()
    }
}
