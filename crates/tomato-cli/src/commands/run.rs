//! Live session loop.
//!
//! The session lives on a single-threaded tokio runtime. Timer tasks only
//! send fired handles over a channel; every mutation of the session happens
//! in the `select!` loop below.

use std::io::IsTerminal;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tomato_core::{
    Config, CoreError, IntervalDurations, Presenter, SessionController, TickOutcome,
    TokioScheduler,
};

use crate::presenter::{JsonPresenter, OutputSink, TextPresenter};

#[derive(Args)]
pub struct RunArgs {
    /// Run the clock this many times faster than real time
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    speed: u32,
    /// Exit after this many intervals have finished
    #[arg(long)]
    max_intervals: Option<u32>,
    /// Print JSON events instead of a clock
    #[arg(long)]
    json: bool,
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let durations = config.interval_durations()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let stdout = std::io::stdout();
    let result = if args.json {
        runtime.block_on(drive(&args, durations, JsonPresenter::new(stdout)))
    } else {
        let live = stdout.is_terminal();
        let presenter = TextPresenter::new(
            stdout,
            config.display.mark.clone(),
            config.display.show_marks,
            live,
        );
        runtime.block_on(drive(&args, durations, presenter))
    };
    // A pending stdin read would otherwise hold the runtime open until the
    // next line arrives.
    runtime.shutdown_background();
    result
}

async fn drive<P: Presenter + OutputSink>(
    args: &RunArgs,
    durations: IntervalDurations,
    presenter: P,
) -> Result<(), Box<dyn std::error::Error>> {
    let (scheduler, mut fired) = TokioScheduler::with_speed(args.speed);
    let mut session = SessionController::with_durations(durations, scheduler, presenter);

    let mut commands = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut finished = 0u32;

    if args.max_intervals == Some(0) {
        return Ok(());
    }
    session.advance()?;

    while output_open(session.presenter_mut())? {
        tokio::select! {
            Some(handle) = fired.recv() => {
                if session.on_timer_fired(handle) == TickOutcome::Completed {
                    finished += 1;
                    if args.max_intervals.is_some_and(|max| finished >= max) {
                        break;
                    }
                }
            }
            line = commands.next_line(), if stdin_open => {
                match line? {
                    None => stdin_open = false,
                    Some(line) => match line.trim() {
                        "s" | "start" => match session.advance() {
                            Ok(_) => {}
                            Err(CoreError::AlreadyRunning { .. }) => {
                                eprintln!("already running; enter 'r' to reset first");
                            }
                            Err(e) => return Err(e.into()),
                        },
                        "r" | "reset" => session.reset(),
                        "q" | "quit" => break,
                        "" => {}
                        other => eprintln!("unknown command '{other}' (s = start, r = reset, q = quit)"),
                    },
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    tracing::debug!(
        repetitions = session.repetition_count(),
        completed = session.completed_count(),
        "session ended"
    );
    session.cancel();
    Ok(())
}

/// `Ok(false)` once the reader has gone away; any other write error is fatal.
fn output_open<P: OutputSink>(presenter: &mut P) -> std::io::Result<bool> {
    match presenter.take_error() {
        None => Ok(true),
        Some(err) if err.kind() == std::io::ErrorKind::BrokenPipe => {
            tracing::debug!("stdout closed, ending session");
            Ok(false)
        }
        Some(err) => Err(err),
    }
}
