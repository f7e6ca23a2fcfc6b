//! Process state counting from `/proc/[pid]/stat` files.

use std::path::Path;

use tracing::{debug, warn};

use crate::collector::counters::{CounterSet, StateKey};
use crate::collector::error::CollectError;
use crate::collector::procfs::parser::{
    STATE_FIELD, classify_proc_state, parse_thread_count, split_fields,
};
use crate::collector::traits::FileSystem;

/// Counts process states and threads under `proc_path` into `counters`.
///
/// Every directory under `proc_path` is read. Directories without a stat
/// file, including processes that disappear between listing and reading,
/// are skipped.
/// A stat file too short to carry a state field aborts the whole cycle.
pub fn gather_from_proc<F: FileSystem + ?Sized>(
    fs: &F,
    proc_path: &Path,
    counters: &mut CounterSet,
) -> Result<(), CollectError> {
    let entries = fs
        .read_dir(proc_path)
        .map_err(|source| CollectError::ProcRoot {
            path: proc_path.to_path_buf(),
            source,
        })?;

    let mut counted = 0usize;
    let mut skipped = 0usize;

    for entry in entries {
        if !fs.is_dir(&entry) {
            continue;
        }

        let stat_path = entry.join("stat");
        let data = match fs.read_stat(&stat_path) {
            Ok(Some(data)) => data,
            Ok(None) => {
                skipped += 1;
                continue;
            }
            Err(source) => {
                return Err(CollectError::Read {
                    path: stat_path,
                    source,
                });
            }
        };

        let fields = split_fields(&data);
        if fields.len() < STATE_FIELD {
            return Err(CollectError::MalformedStat {
                path: stat_path,
                fields: fields.len(),
            });
        }

        let code = fields[STATE_FIELD - 1][0];
        match classify_proc_state(code) {
            Some(key) => {
                if !counters.increment(key) {
                    warn!(
                        "processes: state [ {} ] in file {} maps to '{}', which is not reported on this OS",
                        code.escape_ascii(),
                        stat_path.display(),
                        key
                    );
                }
            }
            None => warn!(
                "processes: Unknown state [ {} ] in file {}",
                code.escape_ascii(),
                stat_path.display()
            ),
        }
        counters.increment(StateKey::Total);
        counted += 1;

        match parse_thread_count(&fields) {
            Ok(threads) => {
                counters.add(StateKey::TotalThreads, threads);
            }
            Err(e) => warn!(
                "processes: Error parsing thread count in {}: {}",
                stat_path.display(),
                e
            ),
        }
    }

    debug!(
        "procfs: counted {} processes, skipped {} directories without stat",
        counted, skipped
    );
    Ok(())
}
