use std::path::PathBuf;

use clap::Subcommand;
use verity_core::{assigned_list, load_items, partition, ListAssignment};

#[derive(Subcommand)]
pub enum ItemsAction {
    /// Print the full item list as JSON
    List {
        /// Item file (JSON array of statements)
        #[arg(long)]
        items: PathBuf,
    },
    /// Show the odd/even split and a participant's assigned list
    Partition {
        /// Item file (JSON array of statements)
        #[arg(long)]
        items: PathBuf,
        /// Participant number deciding the assignment
        #[arg(long)]
        participant: u32,
    },
}

pub fn run(action: ItemsAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ItemsAction::List { items } => {
            let statements = load_items(&items)?;
            println!("{}", serde_json::to_string_pretty(&statements)?);
        }
        ItemsAction::Partition { items, participant } => {
            let statements = load_items(&items)?;
            let (odd, even) = partition(&statements);
            let assigned = assigned_list(&statements, participant);
            let summary = serde_json::json!({
                "odd_count": odd.len(),
                "even_count": even.len(),
                "list_assignment": ListAssignment::for_participant(participant),
                "assigned": assigned,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }
    Ok(())
}
