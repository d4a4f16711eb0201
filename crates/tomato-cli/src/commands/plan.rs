use clap::Args;
use serde::Serialize;
use tomato_core::{format_remaining, Config, IntervalKind};

#[derive(Args)]
pub struct PlanArgs {
    /// Number of repetitions to list
    #[arg(long, short, default_value_t = 8)]
    count: u32,
    /// Print as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct PlannedInterval {
    repetition: u32,
    kind: IntervalKind,
    duration_secs: u64,
    /// Marks shown once this interval has started.
    completed_marks: u32,
}

pub fn run(args: PlanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let durations = Config::load()?.interval_durations()?;

    let plan: Vec<PlannedInterval> = (1..=args.count)
        .map(|repetition| {
            let kind = IntervalKind::for_repetition(repetition);
            PlannedInterval {
                repetition,
                kind,
                duration_secs: durations.secs(kind),
                completed_marks: repetition / 2,
            }
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let mut total_secs = 0u64;
    for item in &plan {
        total_secs = total_secs.saturating_add(item.duration_secs);
        println!(
            "{:>4}  {:<11} {:>6}",
            item.repetition,
            item.kind.label(),
            format_remaining(item.duration_secs)
        );
    }
    println!("total {}", format_remaining(total_secs));
    Ok(())
}
