//! Line protocol output:
//! `processes blocked=0i,running=1i,... 1700000000000000000`.

use std::io::Write;

use tracing::error;

use super::{Accumulator, Sample, Tags};
use crate::collector::CounterSet;

pub struct LineProtocolAccumulator<W: Write> {
    writer: W,
}

impl<W: Write> LineProtocolAccumulator<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escapes measurement names: commas and spaces.
fn escape_measurement(s: &str) -> String {
    s.replace(',', "\\,").replace(' ', "\\ ")
}

/// Escapes tag keys, tag values and field keys: commas, equals signs and spaces.
fn escape_key(s: &str) -> String {
    s.replace(',', "\\,")
        .replace('=', "\\=")
        .replace(' ', "\\ ")
}

/// Formats a sample as one line of line protocol, without the newline.
pub fn format_line(sample: &Sample) -> String {
    let mut line = escape_measurement(&sample.name);
    for (key, value) in &sample.tags {
        line.push(',');
        line.push_str(&escape_key(key));
        line.push('=');
        line.push_str(&escape_key(value));
    }

    let fields: Vec<String> = sample
        .fields
        .iter()
        .map(|(key, value)| format!("{}={}i", escape_key(key), value))
        .collect();
    line.push(' ');
    line.push_str(&fields.join(","));

    if let Some(nanos) = sample.timestamp.timestamp_nanos_opt() {
        line.push(' ');
        line.push_str(&nanos.to_string());
    }
    line
}

impl<W: Write> Accumulator for LineProtocolAccumulator<W> {
    fn add_fields(&mut self, measurement: &str, fields: CounterSet, tags: Tags) {
        let sample = Sample::new(measurement, &fields, tags);
        let result = writeln!(self.writer, "{}", format_line(&sample))
            .and_then(|()| self.writer.flush());
        if let Err(e) = result {
            error!("Failed to write sample '{}': {}", measurement, e);
        }
    }
}
