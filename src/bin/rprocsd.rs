//! rprocsd - process state counter daemon.
//!
//! Counts processes by state on an interval and writes each `processes`
//! sample to stdout as JSON lines or line protocol.

use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use tracing::{Level, debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use rprocs::collector::{CounterSet, MEASUREMENT, ProcessesCollector, StateKey};
use rprocs::config::ProcessesConfig;
use rprocs::output::{Accumulator, JsonAccumulator, LineProtocolAccumulator, Tags};

/// Output encoding for samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// One JSON object per line.
    Json,
    /// Line protocol.
    Line,
}

/// Process state counter daemon.
#[derive(Parser)]
#[command(name = "rprocsd", about = "Process state counter daemon", version)]
struct Args {
    /// Collection interval in seconds. 0 collects once and exits.
    #[arg(short, long, default_value = "10")]
    interval: u64,

    /// Path to /proc filesystem (for testing/mocking).
    #[arg(long, default_value = ProcessesConfig::DEFAULT_PROC_PATH)]
    proc_path: String,

    /// Always count with `ps`, even on Linux.
    #[arg(long)]
    force_ps: bool,

    /// Always read /proc/[pid]/stat, even off Linux. Ignored with --force-ps.
    #[arg(long)]
    force_proc: bool,

    /// Program to run for the `ps` source.
    #[arg(long, default_value = "ps")]
    ps_program: String,

    /// Sample output format.
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode - only show errors.
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn probe_config(&self) -> ProcessesConfig {
        ProcessesConfig {
            proc_path: self.proc_path.clone(),
            force_ps: self.force_ps,
            force_proc: self.force_proc,
            ps_program: self.ps_program.clone(),
        }
    }
}

/// Initializes the tracing subscriber with the appropriate log level.
/// Default level is INFO. Use -q for quiet mode (errors only).
/// Logs go to stderr so stdout carries only samples.
fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else {
        match verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["rprocsd", "rprocs"] {
        match format!("{}={}", target, level).parse() {
            Ok(directive) => filter = filter.add_directive(directive),
            Err(e) => eprintln!("invalid log directive for {}: {}", target, e),
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// Describes counters for logging, e.g. `total=7 running=1 sleeping=3`.
fn describe_counters(counters: &CounterSet) -> String {
    let mut parts = Vec::new();
    if let Some(total) = counters.get(StateKey::Total) {
        parts.push(format!("total={}", total));
    }
    for (key, value) in counters.iter() {
        if key != StateKey::Total && value > 0 {
            parts.push(format!("{}={}", key, value));
        }
    }
    parts.join(" ")
}

fn make_accumulator(format: Format) -> Box<dyn Accumulator> {
    match format {
        Format::Json => Box::new(JsonAccumulator::new(io::stdout())),
        Format::Line => Box::new(LineProtocolAccumulator::new(io::stdout())),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    let config = args.probe_config();
    let collector = ProcessesCollector::system(&config);

    info!("rprocsd {} starting", env!("CARGO_PKG_VERSION"));
    info!(
        "Config: interval={}s, proc={}, os={}, source={}",
        args.interval,
        config.proc_path,
        collector.os(),
        collector.source()
    );
    if config.force_ps && config.force_proc {
        warn!("Both --force-ps and --force-proc given; using ps");
    }

    let mut output = make_accumulator(args.format);

    if args.interval == 0 {
        return match collector.gather(output.as_mut()) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("Failed to collect processes: {}", e);
                ExitCode::FAILURE
            }
        };
    }

    let interval = Duration::from_secs(args.interval);

    // Setup graceful shutdown
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    if let Err(e) = ctrlc::set_handler(move || {
        info!("Received shutdown signal");
        r.store(false, Ordering::SeqCst);
    }) {
        warn!("Failed to set Ctrl-C handler: {}", e);
    }

    info!("Starting collection loop");

    let mut sample_count: u64 = 0;
    while running.load(Ordering::SeqCst) {
        match collector.collect() {
            Ok(counters) => {
                sample_count += 1;
                debug!("Sample #{}: {}", sample_count, describe_counters(&counters));
                output.add_fields(MEASUREMENT, counters, Tags::new());
            }
            Err(e) => {
                error!("Failed to collect processes: {}", e);
            }
        }

        // Sleep with periodic checks for shutdown signal
        let sleep_interval = Duration::from_millis(100);
        let mut remaining = interval;
        while remaining > Duration::ZERO && running.load(Ordering::SeqCst) {
            let sleep_time = remaining.min(sleep_interval);
            std::thread::sleep(sleep_time);
            remaining = remaining.saturating_sub(sleep_time);
        }
    }

    info!("Shutdown complete after {} samples", sample_count);
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;
    use rprocs::collector::OsFamily;

    #[test]
    fn describe_counters_skips_zero_states() {
        let mut counters = CounterSet::seeded(&OsFamily::Linux);
        counters.add(StateKey::Total, 3);
        counters.add(StateKey::Sleeping, 2);
        counters.add(StateKey::Running, 1);
        counters.add(StateKey::TotalThreads, 9);

        assert_eq!(
            describe_counters(&counters),
            "total=3 running=1 sleeping=2 total_threads=9"
        );
    }

    #[test]
    fn args_parse_overrides() {
        let args = Args::parse_from(["rprocsd", "--force-ps", "-i", "0", "--format", "line"]);
        assert_eq!(args.interval, 0);
        assert_eq!(args.format, Format::Line);

        let config = args.probe_config();
        assert!(config.force_ps);
        assert!(!config.force_proc);
        assert_eq!(config.proc_path, "/proc");
    }
}
