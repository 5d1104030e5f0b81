//! Replay command: run a recorded event file through the table.
//!
//! Reads `<KIND> <addr>` lines, feeds them into a fresh table, runs both
//! detectors once, prints the rendered table, and optionally writes the
//! final snapshot as JSON.

use std::fs;
use std::path::PathBuf;

use rplguard_schema::ControlEvent;
use rplguard_stats::{RecordOutcome, RplHooks, RplStats};

use crate::cli::ReplayArgs;
use crate::clock::Clock;
use crate::logger::Logger;

use super::CommandResult;

/// Result of replay command execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayResult {
    /// Events counted into the table.
    pub events_ingested: u64,
    /// Events discarded (unparsable lines or table-full drops).
    pub events_dropped: u64,
    /// Neighbors tracked at the end of the replay.
    pub neighbors: usize,
    /// Neighbors flagged as DIO flooders.
    pub dio_attackers: usize,
    /// Neighbors flagged as DIS flooders.
    pub dis_attackers: usize,
    /// Where the JSON snapshot was written, if requested.
    pub snapshot_path: Option<PathBuf>,
}

/// Execute the replay command.
pub fn execute_replay<C, L>(args: &ReplayArgs, clock: &C, logger: &L) -> CommandResult<ReplayResult>
where
    C: Clock,
    L: Logger,
{
    args.validate()?;

    let text = fs::read_to_string(&args.events)?;
    let stats = RplStats::new(args.capacity);

    let mut ingested = 0u64;
    let mut dropped = 0u64;
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match ControlEvent::parse_line(line) {
            Ok(event) => match stats.on_control_message(&event) {
                RecordOutcome::TableFull => dropped += 1,
                RecordOutcome::Counted | RecordOutcome::Added => ingested += 1,
            },
            Err(e) => {
                dropped += 1;
                logger.verbose(&format!("discarding event line {:?}: {}", line, e));
            }
        }
    }

    stats.check_dio_attackers();
    stats.check_dis_attackers();
    logger.info(&stats.render());

    let snapshot = stats.snapshot(clock.now_unix_sec());
    let dio_attackers = snapshot.neighbors.iter().filter(|n| n.dio_attacker).count();
    let dis_attackers = snapshot.neighbors.iter().filter(|n| n.dis_attacker).count();

    let snapshot_path = match &args.out {
        Some(path) => {
            fs::write(path, snapshot.to_json())?;
            logger.verbose(&format!("wrote snapshot to {}", path.display()));
            Some(path.clone())
        }
        None => None,
    };

    Ok(ReplayResult {
        events_ingested: ingested,
        events_dropped: dropped,
        neighbors: snapshot.neighbors.len(),
        dio_attackers,
        dis_attackers,
        snapshot_path,
    })
}
