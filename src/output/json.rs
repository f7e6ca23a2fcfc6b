//! JSON lines output: one serialized [`Sample`] per line.

use std::io::Write;

use tracing::error;

use super::{Accumulator, Sample, Tags};
use crate::collector::CounterSet;

pub struct JsonAccumulator<W: Write> {
    writer: W,
}

impl<W: Write> JsonAccumulator<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_sample(&mut self, sample: &Sample) -> std::io::Result<()> {
        serde_json::to_writer(&mut self.writer, sample)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

impl<W: Write> Accumulator for JsonAccumulator<W> {
    fn add_fields(&mut self, measurement: &str, fields: CounterSet, tags: Tags) {
        let sample = Sample::new(measurement, &fields, tags);
        if let Err(e) = self.write_sample(&sample) {
            error!("Failed to write sample '{}': {}", measurement, e);
        }
    }
}
