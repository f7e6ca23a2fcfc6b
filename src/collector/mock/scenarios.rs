//! Pre-built mock filesystem scenarios for testing.
//!
//! These scenarios provide realistic `/proc` states for exercising the
//! stat-file collector, including the races and malformed data it has to
//! tolerate (or refuse).

use super::filesystem::MockFs;

/// Builds a `/proc/[pid]/stat` line with the given state and thread count.
pub fn stat_line(pid: u32, comm: &str, state: char, threads: u32) -> String {
    format!(
        "{pid} ({comm}) {state} 1 {pid} {pid} 0 -1 4194304 100 0 0 0 10 5 0 0 20 0 {threads} 0 12345 12345678 100 18446744073709551615 0 0 0 0 0 0 0 0 0 0 0 0 17 0 0 0 0 0 0 0 0 0 0 0 0 0 0\n"
    )
}

impl MockFs {
    /// Creates a typical Linux system.
    ///
    /// | pid  | comm        | state | threads |
    /// |------|-------------|-------|---------|
    /// | 1    | systemd     | S     | 1       |
    /// | 2    | kthreadd    | S     | 1       |
    /// | 57   | kworker/0:1 | I     | 1       |
    /// | 812  | sshd        | S     | 1       |
    /// | 1000 | postgres    | R     | 6       |
    /// | 1001 | rsync       | D     | 1       |
    /// | 1002 | defunct     | Z     | 1       |
    ///
    /// Plus non-process entries (`/proc/uptime`, `/proc/sys`).
    pub fn typical_system() -> Self {
        let mut fs = Self::new();

        fs.add_file("/proc/uptime", "12345.67 98765.43\n");
        fs.add_file("/proc/loadavg", "0.15 0.10 0.05 1/150 1234\n");
        fs.add_dir("/proc/sys/kernel");

        fs.add_process(1, &stat_line(1, "systemd", 'S', 1));
        fs.add_process(2, &stat_line(2, "kthreadd", 'S', 1));
        fs.add_process(57, &stat_line(57, "kworker/0:1", 'I', 1));
        fs.add_process(812, &stat_line(812, "sshd", 'S', 1));
        fs.add_process(1000, &stat_line(1000, "postgres", 'R', 6));
        fs.add_process(1001, &stat_line(1001, "rsync", 'D', 1));
        fs.add_process(1002, &stat_line(1002, "defunct", 'Z', 1));

        fs
    }

    /// Typical system plus a process whose directory was listed but whose
    /// stat file is already gone.
    pub fn with_vanished_process() -> Self {
        let mut fs = Self::typical_system();
        fs.add_dir("/proc/4242");
        fs
    }

    /// Typical system plus one stat file truncated to two fields.
    pub fn with_malformed_stat() -> Self {
        let mut fs = Self::typical_system();
        fs.add_process(3000, "3000 (broken)");
        fs
    }

    /// Stopped and traced processes, one of each spelling.
    pub fn with_stopped_processes() -> Self {
        let mut fs = Self::new();
        fs.add_process(10, &stat_line(10, "vim", 'T', 1));
        fs.add_process(11, &stat_line(11, "gdb-target", 't', 2));
        fs.add_process(12, &stat_line(12, "swapped", 'W', 1));
        fs
    }

    /// Processes whose thread count field is missing or not a number.
    pub fn with_bad_thread_counts() -> Self {
        let mut fs = Self::new();
        fs.add_process(20, &stat_line(20, "good", 'S', 3));
        fs.add_process(
            21,
            "21 (garbled) R 1 21 21 0 -1 4194304 100 0 0 0 10 5 0 0 20 0 many 0 12345",
        );
        fs.add_process(22, "22 (short) S 1 22 22 0");
        fs
    }
}
