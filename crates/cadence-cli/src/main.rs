use clap::{CommandFactory, Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cadence-cli", version, about = "Cadence CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management and streaks
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Planned transactions
    Ledger {
        #[command(subcommand)]
        action: commands::ledger::LedgerAction,
    },
    /// Period resolution and the calendar day window
    Period {
        #[command(subcommand)]
        action: commands::period::PeriodAction,
    },
    /// Guest access window control
    Access {
        #[command(subcommand)]
        action: commands::access::AccessAction,
    },
    /// Resolved entitlement tier and limits
    Entitlement {
        #[command(subcommand)]
        action: commands::entitlement::EntitlementAction,
    },
    /// Daily overdue review
    Review {
        #[command(subcommand)]
        action: commands::review::ReviewAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Ledger { action } => commands::ledger::run(action),
        Commands::Period { action } => commands::period::run(action),
        Commands::Access { action } => commands::access::run(action),
        Commands::Entitlement { action } => commands::entitlement::run(action),
        Commands::Review { action } => commands::review::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "cadence-cli", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
