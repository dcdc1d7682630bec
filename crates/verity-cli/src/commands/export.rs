use std::path::PathBuf;

use clap::Args;
use verity_core::{
    assigned_list, extract, load_items, shuffle, to_csv, ExperimentEngine, ParticipantSession,
    Response, Step,
};

#[derive(Args)]
pub struct ExportArgs {
    /// Item file (JSON array of statements)
    #[arg(long)]
    pub items: PathBuf,
    /// Worker id used for the session fields and the filename
    #[arg(long)]
    pub worker_id: String,
    /// Participant number (1-999); decides the list assignment
    #[arg(long)]
    pub participant: u32,
    /// Scripted ratings, comma-separated, one per assigned statement
    #[arg(long)]
    pub ratings: String,
    /// Shuffle seed (defaults to 0 for a stable order)
    #[arg(long, default_value = "0")]
    pub seed: u64,
    /// Output file; stdout when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,
}

pub fn run(args: ExportArgs) -> Result<(), Box<dyn std::error::Error>> {
    let items = load_items(&args.items)?;
    let session = ParticipantSession::with_number(Some(args.worker_id), args.participant)?;

    let mut list = assigned_list(&items, args.participant);
    shuffle(&mut list, Some(args.seed));

    let ratings = args
        .ratings
        .split(',')
        .filter(|s| !s.trim().is_empty())
        .map(|s| s.trim().parse::<u8>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid --ratings value: {e}"))?;
    if ratings.len() != list.len() {
        return Err(format!(
            "expected {} ratings for the assigned list, got {}",
            list.len(),
            ratings.len()
        )
        .into());
    }

    let mut engine = ExperimentEngine::new(session, list);
    engine.respond(Response::Consent { agree: true })?;
    engine.respond(Response::Continue)?;
    let mut next = ratings.into_iter();
    while let Some(step) = engine.current_step().copied() {
        match step {
            Step::Rating { .. } => {
                let value = next.next().ok_or("ran out of ratings")?;
                engine.respond(Response::Rating { value })?;
            }
            Step::Break { .. } | Step::Save | Step::ThankYou => {
                engine.respond(Response::Continue)?;
            }
            _ => return Err("unexpected step during export".into()),
        }
    }

    let csv = to_csv(&extract(engine.session(), engine.records()));
    match args.out {
        Some(path) => std::fs::write(&path, csv)?,
        None => println!("{csv}"),
    }
    Ok(())
}
