//! Mock data sources for testing.
//!
//! This module provides `MockFs`, `MockLister` and pre-built scenarios for
//! testing collectors without a real `/proc` or `ps`.

mod filesystem;
mod lister;
mod scenarios;

pub use filesystem::MockFs;
pub use lister::MockLister;
pub use scenarios::stat_line;
