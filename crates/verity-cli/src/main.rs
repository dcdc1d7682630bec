use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "verity-cli", version, about = "Verity statement rating study CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full study session
    Run(commands::run::RunArgs),
    /// Export a scripted session to CSV without prompts
    Export(commands::export::ExportArgs),
    /// Inspect the item list
    Items {
        #[command(subcommand)]
        action: commands::items::ItemsAction,
    },
    /// Print one completion code
    Code,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Export(args) => commands::export::run(args),
        Commands::Items { action } => commands::items::run(action),
        Commands::Code => commands::code::run(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
