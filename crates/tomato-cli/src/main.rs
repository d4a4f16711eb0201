use clap::{CommandFactory, Parser, Subcommand};

mod commands;
mod logging;
mod presenter;

#[derive(Parser)]
#[command(name = "tomato", version, about = "Tomato Pomodoro timer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a live session in the terminal
    Run(commands::run::RunArgs),
    /// Print the interval cadence
    Plan(commands::plan::PlanArgs),
    /// Render a number of seconds as m:ss
    Format {
        /// Remaining seconds
        seconds: u64,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn main() {
    logging::init();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Format { seconds } => {
            println!("{}", tomato_core::format_remaining(seconds));
            Ok(())
        }
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
