//! Collector for the Linux `/proc` filesystem.
//!
//! Reads `/proc/[pid]/stat` for every process and counts states and threads.

pub mod parser;
pub mod process;

pub use process::gather_from_proc;
