//! Collection cycle driver.
//!
//! `ProcessesCollector` seeds the counters for its OS, picks a source, runs
//! the matching collector and hands the result to an accumulator as a
//! single `processes` sample.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::debug;

use crate::collector::counters::{CounterSet, OsFamily};
use crate::collector::error::CollectError;
use crate::collector::procfs::gather_from_proc;
use crate::collector::ps::gather_from_ps;
use crate::collector::source::{Source, select_source};
use crate::collector::traits::{FileSystem, ProcessLister, PsLister, RealFs};
use crate::config::ProcessesConfig;
use crate::output::{Accumulator, Tags};

/// Measurement name of the emitted sample.
pub const MEASUREMENT: &str = "processes";

/// Counts processes by state, once per call.
pub struct ProcessesCollector<F: FileSystem, L: ProcessLister> {
    fs: F,
    lister: L,
    os: OsFamily,
    proc_path: PathBuf,
    force_ps: bool,
    force_proc: bool,
}

impl ProcessesCollector<RealFs, PsLister> {
    /// Collector reading the host's `/proc` and running the host's `ps`.
    pub fn system(config: &ProcessesConfig) -> Self {
        Self::from_config(
            RealFs::new(),
            PsLister::with_program(&config.ps_program),
            config,
        )
    }
}

impl<F: FileSystem, L: ProcessLister> ProcessesCollector<F, L> {
    /// Creates a collector for the current OS reading `/proc`.
    ///
    /// # Arguments
    /// * `fs` - Filesystem implementation (real or mock)
    /// * `lister` - `ps` implementation (real or mock)
    pub fn new(fs: F, lister: L) -> Self {
        Self {
            fs,
            lister,
            os: OsFamily::current(),
            proc_path: PathBuf::from(ProcessesConfig::DEFAULT_PROC_PATH),
            force_ps: false,
            force_proc: false,
        }
    }

    /// Creates a collector with path and overrides taken from `config`.
    ///
    /// `config.ps_program` is not used here; the caller supplies the lister.
    pub fn from_config(fs: F, lister: L, config: &ProcessesConfig) -> Self {
        Self::new(fs, lister)
            .with_proc_path(&config.proc_path)
            .force_ps(config.force_ps)
            .force_proc(config.force_proc)
    }

    /// Overrides the detected OS.
    pub fn with_os(mut self, os: OsFamily) -> Self {
        self.os = os;
        self
    }

    pub fn with_proc_path(mut self, proc_path: impl Into<PathBuf>) -> Self {
        self.proc_path = proc_path.into();
        self
    }

    /// Always use `ps`. Takes priority over `force_proc`.
    pub fn force_ps(mut self, force: bool) -> Self {
        self.force_ps = force;
        self
    }

    /// Always read stat files.
    pub fn force_proc(mut self, force: bool) -> Self {
        self.force_proc = force;
        self
    }

    pub fn os(&self) -> &OsFamily {
        &self.os
    }

    pub fn proc_path(&self) -> &Path {
        &self.proc_path
    }

    /// Source the next cycle will read from.
    pub fn source(&self) -> Source {
        select_source(&self.os, self.force_ps, self.force_proc)
    }

    /// Runs one cycle and returns the counters.
    pub fn collect(&self) -> Result<CounterSet, CollectError> {
        let start = Instant::now();
        let source = self.source();
        let mut counters = CounterSet::seeded(&self.os);

        match source {
            Source::Listing => gather_from_ps(&self.lister, &mut counters)?,
            Source::StatFiles => gather_from_proc(&self.fs, &self.proc_path, &mut counters)?,
        }

        debug!(
            "processes: collected from {} on {} in {:?}",
            source,
            self.os,
            start.elapsed()
        );
        Ok(counters)
    }

    /// Runs one cycle and emits the counters to `acc`.
    ///
    /// On error nothing is emitted.
    pub fn gather<A: Accumulator + ?Sized>(&self, acc: &mut A) -> Result<(), CollectError> {
        let counters = self.collect()?;
        acc.add_fields(MEASUREMENT, counters, Tags::new());
        Ok(())
    }
}
