use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "tranquil", version, about = "Tranquil CLI")]
struct Cli {
    /// Log core state transitions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Guided 4-7-8 breathing
    Breathe {
        #[command(subcommand)]
        action: commands::breathe::BreatheAction,
    },
    /// Custom countdown timer
    Countdown {
        #[command(subcommand)]
        action: commands::countdown::CountdownAction,
    },
    /// Task management and reminders
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Step-by-step pictogram guides
    Guide {
        #[command(subcommand)]
        action: commands::guide::GuideAction,
    },
    /// Communication cards
    Card {
        #[command(subcommand)]
        action: commands::card::CardAction,
    },
    /// Emotion check-ins
    Emotion {
        #[command(subcommand)]
        action: commands::emotion::EmotionAction,
    },
    /// User profile
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        "debug".to_string()
    } else {
        tranquil_core::Config::load()
            .map(|c| c.logging.level)
            .unwrap_or_else(|_| "info".into())
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tranquil_core={level},tranquil_cli={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Breathe { action } => commands::breathe::run(action),
        Commands::Countdown { action } => commands::countdown::run(action),
        Commands::Task { action } => commands::task::run(action),
        Commands::Guide { action } => commands::guide::run(action),
        Commands::Card { action } => commands::card::run(action),
        Commands::Emotion { action } => commands::emotion::run(action),
        Commands::Profile { action } => commands::profile::run(action),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tranquil", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
