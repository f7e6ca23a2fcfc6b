//! Parsers for `/proc/[pid]/stat` content.
//!
//! These are pure functions over the raw file bytes, designed to be easily
//! testable with string inputs.

use crate::collector::counters::StateKey;

/// 1-based position of the state field.
pub const STATE_FIELD: usize = 3;
/// 1-based position of the `num_threads` field.
pub const THREADS_FIELD: usize = 20;

/// Error type for parsing failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("parse error: {message}")]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
        }
    }
}

/// Splits stat content into whitespace-delimited fields.
///
/// Fields are taken as-is: a command name containing spaces spans several
/// fields and shifts the ones after it.
pub fn split_fields(content: &[u8]) -> Vec<&[u8]> {
    content
        .split(|b| b.is_ascii_whitespace())
        .filter(|field| !field.is_empty())
        .collect()
}

/// Maps a kernel task state character to its counter.
///
/// `t` is "tracing stop" on newer kernels; `W` is paging on pre-2.6 kernels
/// and waking on some later ones.
pub fn classify_proc_state(code: u8) -> Option<StateKey> {
    match code {
        b'R' => Some(StateKey::Running),
        b'S' => Some(StateKey::Sleeping),
        b'D' => Some(StateKey::Blocked),
        b'Z' => Some(StateKey::Zombies),
        b'T' | b't' => Some(StateKey::Stopped),
        b'W' => Some(StateKey::Paging),
        _ => None,
    }
}

/// Parses the thread count from split stat fields.
pub fn parse_thread_count(fields: &[&[u8]]) -> Result<u64, ParseError> {
    let raw = fields.get(THREADS_FIELD - 1).ok_or_else(|| {
        ParseError::new(format!(
            "thread count field {} missing, only {} fields",
            THREADS_FIELD,
            fields.len()
        ))
    })?;

    let text = std::str::from_utf8(raw)
        .map_err(|_| ParseError::new("thread count is not valid UTF-8"))?;
    // Unsigned: a negative count is reported as unparsable.
    text.parse::<u64>()
        .map_err(|e| ParseError::new(format!("invalid thread count '{}': {}", text, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collector::mock::stat_line;

    #[test]
    fn test_split_fields() {
        let fields = split_fields(b"  1 (init)\tS\n 0 ");
        assert_eq!(fields, vec![&b"1"[..], b"(init)", b"S", b"0"]);
    }

    #[test]
    fn test_state_and_threads_positions() {
        let line = stat_line(1234, "bash", 'R', 7);
        let fields = split_fields(line.as_bytes());
        assert_eq!(fields[STATE_FIELD - 1], b"R");
        assert_eq!(parse_thread_count(&fields), Ok(7));
    }

    #[test]
    fn test_real_kernel_line() {
        let content = "1234 (bash) S 1233 1234 1234 34816 1235 4194304 5000 50000 10 20 100 50 200 100 20 0 1 0 100000 25000000 2000 18446744073709551615 0 0 0 0 0 0 65536 3670020 1266777851 0 0 0 17 2 0 0 5 0 0 0 0 0 0 0 0 0 0";
        let fields = split_fields(content.as_bytes());
        assert_eq!(classify_proc_state(fields[2][0]), Some(StateKey::Sleeping));
        assert_eq!(parse_thread_count(&fields), Ok(1));
    }

    #[test]
    fn test_parse_thread_count_errors() {
        let fields = split_fields(b"1 (a) S 0");
        assert!(parse_thread_count(&fields).unwrap_err().message.contains("missing"));

        let line = "1 (a) S 1 1 1 0 -1 0 0 0 0 0 0 0 0 0 20 0 -3";
        let fields = split_fields(line.as_bytes());
        assert!(parse_thread_count(&fields).is_err());
    }

    #[test]
    fn test_classify_proc_state() {
        assert_eq!(classify_proc_state(b't'), Some(StateKey::Stopped));
        assert_eq!(classify_proc_state(b'W'), Some(StateKey::Paging));
        assert_eq!(classify_proc_state(b'I'), None);
        assert_eq!(classify_proc_state(b'U'), None);
    }
}
