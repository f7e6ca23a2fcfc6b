//! Process state collector.
//!
//! Counts processes by run state from one of two sources: per-process stat
//! files under `/proc` (the Linux default) or the output of `ps axo state`
//! (everywhere else). Both sources are traits so tests can replay canned data.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    ProcessesCollector                       │
//! │                 select_source(os, overrides)                │
//! │  ┌─────────────────────┐   ┌─────────────────────────────┐  │
//! │  │   gather_from_proc  │   │       gather_from_ps        │  │
//! │  │  - /proc/[pid]/stat │   │  - ps axo state             │  │
//! │  └──────────┬──────────┘   └──────────────┬──────────────┘  │
//! │             │                             │                 │
//! │      ┌──────▼──────┐               ┌──────▼──────┐          │
//! │      │  FileSystem │ (trait)       │ProcessLister│ (trait)  │
//! │      └──────┬──────┘               └──────┬──────┘          │
//! └─────────────┼─────────────────────────────┼─────────────────┘
//!        ┌──────┴──────┐              ┌───────┴──────┐
//!     RealFs        MockFs         PsLister      MockLister
//! ```
//!
//! # Usage
//!
//! ## Production
//!
//! ```ignore
//! use rprocs::collector::ProcessesCollector;
//! use rprocs::config::ProcessesConfig;
//! use rprocs::output::MemoryAccumulator;
//!
//! let collector = ProcessesCollector::system(&ProcessesConfig::default());
//! let mut acc = MemoryAccumulator::new();
//! collector.gather(&mut acc).unwrap();
//! ```
//!
//! ## Testing (with MockFs)
//!
//! ```
//! use rprocs::collector::{MockFs, MockLister, OsFamily, ProcessesCollector, StateKey};
//!
//! let collector = ProcessesCollector::new(MockFs::typical_system(), MockLister::missing())
//!     .with_os(OsFamily::Linux);
//! let counters = collector.collect().unwrap();
//! assert_eq!(counters.get(StateKey::Total), Some(7));
//! ```

#[allow(clippy::module_inception)]
mod collector;
pub mod counters;
mod error;
pub mod mock;
pub mod procfs;
pub mod ps;
pub mod source;
pub mod traits;

pub use collector::{MEASUREMENT, ProcessesCollector};
pub use counters::{CounterSet, OsFamily, StateKey};
pub use error::CollectError;
pub use mock::{MockFs, MockLister};
pub use source::{Source, select_source};
pub use traits::{FileSystem, ProcessLister, PsLister, RealFs};
