//! rplguard CLI binary.

use std::process::ExitCode;

use clap::Parser;
use rplguard_monitor::clock::SystemClock;
use rplguard_monitor::exit::{codes, exit_code};
use rplguard_monitor::logger::{StderrLogger, Verbosity};
use rplguard_monitor::signal::ShutdownFlag;
use rplguard_monitor::sleeper::RealSleeper;
use rplguard_monitor::source::UdpSource;
use rplguard_monitor::{
    execute_replay, execute_watch, Cli, Command, CommandError, ReplayArgs, WatchArgs,
};
use rplguard_stats::RplStats;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let logger = StderrLogger::new(Verbosity::from_count(cli.verbose));

    // Registered up front so Ctrl+C lands cleanly during either command.
    let shutdown = ShutdownFlag::new();

    let result = match cli.command {
        Command::Watch(args) => run_watch(args, &shutdown, &logger),
        Command::Replay(args) => run_replay(args, &logger),
    };

    match result {
        Ok(()) => ExitCode::from(codes::SUCCESS as u8),
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(exit_code(&e) as u8)
        }
    }
}

/// Run the watch command against the real clock, sleeper, and UDP feed.
fn run_watch(
    args: WatchArgs,
    shutdown: &ShutdownFlag,
    logger: &StderrLogger,
) -> Result<(), CommandError> {
    let mut source = UdpSource::bind(&args.listen)?;
    let stats = RplStats::new(args.capacity);

    let result = execute_watch(
        &args,
        &stats,
        &mut source,
        &SystemClock,
        &RealSleeper,
        shutdown,
        logger,
    )?;

    println!(
        "Ingested {} events ({} dropped) over {} cycles, {} detection passes",
        result.events_ingested, result.events_dropped, result.cycles, result.detect_passes
    );
    Ok(())
}

/// Run the replay command.
fn run_replay(args: ReplayArgs, logger: &StderrLogger) -> Result<(), CommandError> {
    let result = execute_replay(&args, &SystemClock, logger)?;

    println!(
        "Replayed {} events ({} dropped): {} neighbors, {} DIO attackers, {} DIS attackers",
        result.events_ingested,
        result.events_dropped,
        result.neighbors,
        result.dio_attackers,
        result.dis_attackers
    );
    if let Some(path) = result.snapshot_path {
        println!("Snapshot written to {}", path.display());
    }
    Ok(())
}
