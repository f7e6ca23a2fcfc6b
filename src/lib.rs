//! rprocs - process state counter probe.
//!
//! This library provides:
//! - `collector` — counts processes by run state from procfs or `ps`
//! - `output` — sample type and accumulators (memory, JSON lines, line protocol)
//! - `config` — probe settings for embedding agents
//!
//! The `rprocsd` binary runs the probe on an interval and prints each sample.

pub mod collector;
pub mod config;
pub mod output;
