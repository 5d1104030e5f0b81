//! Watch command: live monitoring loop.
//!
//! Drains the event feed into the statistics table, runs both detectors
//! at the detect interval, and logs the rendered table at the print
//! interval, until the duration expires or shutdown is requested.

use rplguard_stats::{RecordOutcome, RplHooks, RplStats};

use crate::cli::WatchArgs;
use crate::clock::Clock;
use crate::logger::Logger;
use crate::signal::ShutdownCheck;
use crate::sleeper::Sleeper;
use crate::source::{MessageSource, SourceError};

use super::CommandResult;

/// Result of watch command execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WatchResult {
    /// Loop cycles completed.
    pub cycles: u64,
    /// Events counted into the table.
    pub events_ingested: u64,
    /// Events discarded (unparsable lines or table-full drops).
    pub events_dropped: u64,
    /// Detection passes run (each pass is both detectors).
    pub detect_passes: u64,
}

/// Execute the watch command.
///
/// The caller owns the `stats` handle; the same handle can be registered
/// with other consumers while the loop runs.
pub fn execute_watch<S, C, Sl, H, L>(
    args: &WatchArgs,
    stats: &RplStats,
    source: &mut S,
    clock: &C,
    sleeper: &Sl,
    shutdown: &H,
    logger: &L,
) -> CommandResult<WatchResult>
where
    S: MessageSource,
    C: Clock,
    Sl: Sleeper,
    H: ShutdownCheck,
    L: Logger,
{
    args.validate()?;

    let started = clock.now_unix_sec();
    let mut last_detect = started;
    let mut last_print = started;

    let mut result = WatchResult {
        cycles: 0,
        events_ingested: 0,
        events_dropped: 0,
        detect_passes: 0,
    };

    logger.verbose(&format!(
        "watching: capacity={}, detect every {}s, print every {}s",
        args.capacity, args.detect_interval_sec, args.print_interval_sec
    ));

    loop {
        if shutdown.should_stop() {
            logger.verbose("shutdown requested, stopping watch loop");
            break;
        }

        let now = clock.now_unix_sec();
        if let Some(duration) = args.duration_sec {
            if now.saturating_sub(started) >= duration {
                break;
            }
        }

        drain_source(source, stats, logger, &mut result)?;

        if now.saturating_sub(last_detect) >= args.detect_interval_sec {
            stats.check_dio_attackers();
            stats.check_dis_attackers();
            result.detect_passes += 1;
            last_detect = now;
        }

        if now.saturating_sub(last_print) >= args.print_interval_sec {
            logger.info(&stats.render());
            last_print = now;
        }

        result.cycles += 1;
        sleeper.sleep_sec(1);
    }

    Ok(result)
}

/// Pull every pending event into the table. Bad lines and table-full
/// drops are counted and logged, never fatal; transport errors are.
fn drain_source<S, L>(
    source: &mut S,
    stats: &RplStats,
    logger: &L,
    result: &mut WatchResult,
) -> CommandResult<()>
where
    S: MessageSource,
    L: Logger,
{
    loop {
        match source.poll_event() {
            Ok(Some(event)) => match stats.on_control_message(&event) {
                RecordOutcome::TableFull => {
                    result.events_dropped += 1;
                    logger.verbose(&format!(
                        "table full, dropping {} from untracked neighbor {}",
                        event.kind, event.from
                    ));
                }
                RecordOutcome::Counted | RecordOutcome::Added => {
                    result.events_ingested += 1;
                    logger.debug(&format!("received {} from {}", event.kind, event.from));
                }
            },
            Ok(None) => return Ok(()),
            Err(SourceError::BadEvent { line, source }) => {
                result.events_dropped += 1;
                logger.verbose(&format!("discarding event line {:?}: {}", line, source));
            }
            Err(fatal) => return Err(fatal.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{DEFAULT_LISTEN, DEFAULT_PRINT_INTERVAL_SEC};
    use crate::clock::SteppingClock;
    use crate::logger::BufferLogger;
    use crate::signal::{NeverShutdown, StopAfter};
    use crate::sleeper::NoopSleeper;
    use crate::source::ScriptedSource;
    use rplguard_schema::MessageKind;

    fn args(duration_sec: Option<u64>) -> WatchArgs {
        WatchArgs {
            listen: DEFAULT_LISTEN.to_string(),
            capacity: 8,
            print_interval_sec: DEFAULT_PRINT_INTERVAL_SEC,
            detect_interval_sec: 2,
            duration_sec,
        }
    }

    // ===========================================
    // Test Category A — Loop control
    // ===========================================

    #[test]
    fn test_watch_stops_at_duration() {
        let stats = RplStats::new(8);
        let mut source = ScriptedSource::default();
        let clock = SteppingClock::new(1000, 1);
        let logger = BufferLogger::new();

        let result = execute_watch(
            &args(Some(5)),
            &stats,
            &mut source,
            &clock,
            &NoopSleeper,
            &NeverShutdown,
            &logger,
        )
        .expect("execute");

        // started=1000; iterations at 1001..1004 run, 1005 hits the bound.
        assert_eq!(result.cycles, 4);
        assert_eq!(result.detect_passes, 2);
        assert_eq!(result.events_ingested, 0);
    }

    #[test]
    fn test_watch_stops_on_shutdown() {
        let stats = RplStats::new(8);
        let mut source = ScriptedSource::default();
        let clock = SteppingClock::new(1000, 1);
        let logger = BufferLogger::new();

        let result = execute_watch(
            &args(None),
            &stats,
            &mut source,
            &clock,
            &NoopSleeper,
            &StopAfter::new(3),
            &logger,
        )
        .expect("execute");

        assert_eq!(result.cycles, 3);
        assert!(logger.contains("shutdown requested"));
    }

    #[test]
    fn test_watch_rejects_invalid_args() {
        let stats = RplStats::new(8);
        let mut source = ScriptedSource::default();
        let mut bad = args(Some(5));
        bad.capacity = 0;

        let err = execute_watch(
            &bad,
            &stats,
            &mut source,
            &SteppingClock::new(0, 1),
            &NoopSleeper,
            &NeverShutdown,
            &BufferLogger::new(),
        )
        .expect_err("must reject");
        assert!(matches!(err, super::super::CommandError::InvalidArgument(_)));
    }

    // ===========================================
    // Test Category B — Ingestion
    // ===========================================

    #[test]
    fn test_watch_ingests_and_drops() {
        let stats = RplStats::new(1);
        let mut source = ScriptedSource::from_lines([
            "DIO fe80::1",
            "DIS fe80::1",
            "nonsense line",
            // Second distinct neighbor: table (capacity 1) is full.
            "DIO fe80::2",
        ]);
        let clock = SteppingClock::new(1000, 1);
        let logger = BufferLogger::new();
        let mut watch_args = args(Some(3));
        watch_args.capacity = 1;

        let result = execute_watch(
            &watch_args,
            &stats,
            &mut source,
            &clock,
            &NoopSleeper,
            &NeverShutdown,
            &logger,
        )
        .expect("execute");

        assert_eq!(result.events_ingested, 2);
        assert_eq!(result.events_dropped, 2);
        assert_eq!(stats.neighbor_count(), 1);
        assert_eq!(
            stats.count_by_addr("fe80::1".parse().unwrap(), MessageKind::Dis),
            Some(1)
        );
        assert!(logger.contains("table full"));
        assert!(logger.contains("discarding event line"));
    }

    #[test]
    fn test_watch_runs_detectors_on_interval() {
        let stats = RplStats::new(8);
        // Four DIS messages from one neighbor: above the threshold.
        let mut source = ScriptedSource::from_lines([
            "DIS fe80::bad",
            "DIS fe80::bad",
            "DIS fe80::bad",
            "DIS fe80::bad",
        ]);
        let clock = SteppingClock::new(1000, 1);
        let logger = BufferLogger::new();

        let result = execute_watch(
            &args(Some(4)),
            &stats,
            &mut source,
            &clock,
            &NoopSleeper,
            &NeverShutdown,
            &logger,
        )
        .expect("execute");

        assert!(result.detect_passes >= 1);
        assert!(stats.entry(0).expect("tracked").dis_attacker);
    }
}
