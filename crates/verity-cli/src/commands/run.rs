use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use verity_core::{
    assigned_list, content, extract, load_items, shuffle, to_csv, Config, DataPipeClient,
    ExperimentEngine, ParticipantSession, Response, Step,
};

#[derive(Args)]
pub struct RunArgs {
    /// Item file (JSON array of statements)
    #[arg(long)]
    pub items: PathBuf,
    /// External worker id; a `participant{n}` fallback is generated without one
    #[arg(long)]
    pub worker_id: Option<String>,
    /// Explicit participant number (1-999); random otherwise
    #[arg(long)]
    pub participant: Option<u32>,
    /// Shuffle seed for a reproducible presentation order
    #[arg(long)]
    pub seed: Option<u64>,
    /// Scripted ratings, comma-separated (e.g. "3,5,0"); implies --yes-to-all
    #[arg(long)]
    pub ratings: Option<String>,
    /// Auto-answer consent and continue prompts
    #[arg(long)]
    pub yes_to_all: bool,
    /// Skip the upload call
    #[arg(long)]
    pub no_upload: bool,
}

/// Scripted or interactive source of participant responses.
struct ResponseSource {
    scripted_ratings: Option<std::vec::IntoIter<u8>>,
    auto_continue: bool,
}

impl ResponseSource {
    fn new(args: &RunArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let scripted_ratings = match &args.ratings {
            Some(spec) => {
                let ratings = spec
                    .split(',')
                    .map(|s| s.trim().parse::<u8>())
                    .collect::<Result<Vec<_>, _>>()
                    .map_err(|e| format!("invalid --ratings value: {e}"))?;
                Some(ratings.into_iter())
            }
            None => None,
        };
        Ok(Self {
            auto_continue: args.yes_to_all || scripted_ratings.is_some(),
            scripted_ratings,
        })
    }

    fn consent(&mut self) -> Result<bool, Box<dyn std::error::Error>> {
        if self.auto_continue {
            return Ok(true);
        }
        let answer = prompt("Do you consent to participate? [y/n] ")?;
        Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
    }

    fn acknowledge(&mut self, message: &str) -> Result<(), Box<dyn std::error::Error>> {
        if self.auto_continue {
            return Ok(());
        }
        prompt(&format!("{message} "))?;
        Ok(())
    }

    fn rating(&mut self) -> Result<u8, Box<dyn std::error::Error>> {
        if let Some(scripted) = &mut self.scripted_ratings {
            return scripted
                .next()
                .ok_or_else(|| "ran out of scripted ratings".into());
        }
        loop {
            let answer = prompt("Your rating [0-5]: ")?;
            match answer.trim().parse::<u8>() {
                Ok(value) if value <= 5 => return Ok(value),
                _ => eprintln!("please enter a number from 0 to 5"),
            }
        }
    }
}

fn prompt(text: &str) -> Result<String, Box<dyn std::error::Error>> {
    print!("{text}");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(line)
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let items = load_items(&args.items)?;

    let session = match args.participant {
        Some(n) => ParticipantSession::with_number(args.worker_id.clone(), n)?,
        None => ParticipantSession::new(args.worker_id.clone()),
    };

    let mut list = assigned_list(&items, session.participant_number);
    shuffle(&mut list, args.seed.or(config.study.shuffle_seed));

    let mut source = ResponseSource::new(&args)?;
    let mut engine =
        ExperimentEngine::with_break_interval(session, list, config.study.break_interval);

    while let Some(step) = engine.current_step().copied() {
        match step {
            Step::Consent => {
                println!("{}", content::CONSENT_TEXT);
                let agree = source.consent()?;
                engine.respond(Response::Consent { agree })?;
                if !agree {
                    println!("{}", content::CONSENT_DECLINED_TEXT);
                    return Ok(());
                }
            }
            Step::Instructions => {
                for page in content::INSTRUCTION_PAGES {
                    println!("{page}");
                }
                source.acknowledge("Press Enter to begin.")?;
                engine.respond(Response::Continue)?;
            }
            Step::Rating { index } => {
                let (current, total) = engine.progress(index);
                let statement = &engine.statements()[index];
                println!("Statement {current} of {total}");
                println!("{}", statement.text);
                println!("{}", content::RATING_PROMPT);
                let value = source.rating()?;
                engine.respond(Response::Rating { value })?;
            }
            Step::Break { completed } => {
                println!("{}", content::break_text(completed, engine.total_trials()));
                source.acknowledge("")?;
                engine.respond(Response::Continue)?;
            }
            Step::Save => {
                let rows = extract(engine.session(), engine.records());
                let csv = to_csv(&rows);
                let filename = engine.session().filename();
                if args.no_upload {
                    eprintln!("upload skipped ({filename})");
                } else {
                    save_remote(&config, &filename, &csv);
                }
                engine.respond(Response::Continue)?;
            }
            Step::ThankYou => {
                println!(
                    "{}",
                    content::thank_you_text(&engine.session().completion_code)
                );
                engine.respond(Response::Continue)?;
            }
        }
    }
    Ok(())
}

/// Upload the CSV. Fire-and-forget: the outcome is logged to stderr and
/// never changes the participant-visible flow.
fn save_remote(config: &Config, filename: &str, csv: &str) {
    let result = DataPipeClient::new(&config.upload.endpoint, &config.upload.experiment_id)
        .map_err(Box::<dyn std::error::Error>::from)
        .and_then(|client| {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            runtime
                .block_on(client.save(filename, csv))
                .map_err(Into::into)
        });

    match result {
        Ok(outcome) if outcome.success => eprintln!("data saved ({filename})"),
        Ok(outcome) => eprintln!(
            "save failed: {}",
            outcome.message.unwrap_or_else(|| "no message".into())
        ),
        Err(e) => eprintln!("save failed: {e}"),
    }
}
