//! Probe configuration.
//!
//! Embedding agents deserialize this from their own config files; every
//! field has a default, so an empty table is a valid configuration.

use serde::{Deserialize, Serialize};

/// Settings for the processes probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessesConfig {
    /// Root of the process-information filesystem.
    pub proc_path: String,
    /// Always use `ps`, even on Linux.
    pub force_ps: bool,
    /// Always read stat files, even off Linux. Ignored when `force_ps` is set.
    pub force_proc: bool,
    /// Program run for the listing strategy.
    pub ps_program: String,
}

impl ProcessesConfig {
    pub const DEFAULT_PROC_PATH: &'static str = "/proc";
}

impl Default for ProcessesConfig {
    fn default() -> Self {
        Self {
            proc_path: Self::DEFAULT_PROC_PATH.to_string(),
            force_ps: false,
            force_proc: false,
            ps_program: crate::collector::PsLister::DEFAULT_PROGRAM.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: ProcessesConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProcessesConfig::default());
        assert_eq!(config.proc_path, "/proc");
        assert_eq!(config.ps_program, "ps");
    }

    #[test]
    fn test_partial_config() {
        let config: ProcessesConfig =
            serde_json::from_str(r#"{"force_ps": true, "proc_path": "/host/proc"}"#).unwrap();
        assert!(config.force_ps);
        assert!(!config.force_proc);
        assert_eq!(config.proc_path, "/host/proc");
    }
}
