//! Delivery of finished counters.
//!
//! A collection cycle hands its counters to an [`Accumulator`] exactly once.
//! The accumulators here keep samples in memory or write them out as JSON
//! lines or line protocol.

mod json;
mod line;

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::collector::CounterSet;

pub use json::JsonAccumulator;
pub use line::LineProtocolAccumulator;

/// Sample tags. The processes probe emits none.
pub type Tags = BTreeMap<String, String>;

/// Receiver of finished samples.
pub trait Accumulator {
    fn add_fields(&mut self, measurement: &str, fields: CounterSet, tags: Tags);
}

/// One metrics sample.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    pub name: String,
    pub timestamp: DateTime<Utc>,
    pub tags: Tags,
    pub fields: BTreeMap<String, u64>,
}

impl Sample {
    /// Builds a sample stamped with the current time.
    pub fn new(name: impl Into<String>, fields: &CounterSet, tags: Tags) -> Self {
        Self::with_timestamp(name, fields, tags, Utc::now())
    }

    pub fn with_timestamp(
        name: impl Into<String>,
        fields: &CounterSet,
        tags: Tags,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            timestamp,
            tags,
            fields: fields.to_fields(),
        }
    }
}

/// Keeps every sample in memory.
#[derive(Debug, Default)]
pub struct MemoryAccumulator {
    samples: Vec<Sample>,
}

impl MemoryAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.last()
    }

    pub fn into_samples(self) -> Vec<Sample> {
        self.samples
    }
}

impl Accumulator for MemoryAccumulator {
    fn add_fields(&mut self, measurement: &str, fields: CounterSet, tags: Tags) {
        self.samples.push(Sample::new(measurement, &fields, tags));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::{OsFamily, StateKey};

    #[test]
    fn test_memory_accumulator() {
        let mut counters = CounterSet::seeded(&OsFamily::Darwin);
        counters.increment(StateKey::Running);
        counters.increment(StateKey::Total);

        let mut acc = MemoryAccumulator::new();
        acc.add_fields("processes", counters, Tags::new());

        let sample = acc.last().unwrap();
        assert_eq!(sample.name, "processes");
        assert!(sample.tags.is_empty());
        assert_eq!(sample.fields.get("running"), Some(&1));
        assert_eq!(sample.fields.get("idle"), Some(&0));
        assert_eq!(sample.fields.len(), 7);
    }
}
