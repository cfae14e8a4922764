use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process,
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use database::{
    consts::consts::{PersonId, DEFAULT_STORAGE_KEY, EXPORT_FILE_NAME},
    database::{
        options::StoreOptions,
        store::{ImportOutcome, PeopleStore},
        table::table::{Confirmation, UpsertOutcome},
    },
    model::draft::PersonDraft,
};

use crate::args::PersonArgs;

mod args;
mod prompt;
mod render;

/// 📇 peopledb, a searchable contact directory saved to a local JSON slot
#[derive(Parser, Debug)]
struct Cli {
    /// Directory the people are saved in. Note: Does not support shell paths, e.g. ~
    #[clap(short, long, default_value = "data")]
    data: PathBuf,

    /// Name of the slot inside the data directory
    #[clap(short, long, default_value = DEFAULT_STORAGE_KEY)]
    key: String,

    /// Answer yes to every overwrite / replace question
    #[clap(short, long)]
    yes: bool,

    /// Start from an empty list instead of the sample people when nothing is saved
    #[clap(long)]
    no_seed: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show everyone
    List,
    /// Case-insensitive search across every field
    Search { query: String },
    /// Add a person, generating an id when none is given
    Add(PersonArgs),
    /// Edit the person currently saved under ORIGINAL_ID
    Edit {
        original_id: String,

        #[clap(flatten)]
        fields: PersonArgs,
    },
    Delete { id: String },
    /// Print the people as pretty JSON, or write them to a file
    Export {
        /// Defaults to people-backup.json when given without a value
        #[clap(short, long, num_args = 0..=1, default_missing_value = EXPORT_FILE_NAME)]
        output: Option<PathBuf>,
    },
    /// Replace everyone with the people in a JSON file (`-` reads stdin)
    Import { input: PathBuf },
    /// Go back to the sample people
    Reset,
}

fn main() {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let args = Cli::parse();

    if let Err(err) = run(args) {
        log::error!("{:#}", err);
        process::exit(1);
    }
}

fn run(args: Cli) -> anyhow::Result<()> {
    let options = StoreOptions::default()
        .set_data_directory(args.data)
        .set_storage_key(args.key)
        .set_seed_defaults(!args.no_seed);

    let mut store = PeopleStore::open(options);

    let approve_all = args.yes;

    match args.command {
        Command::List => println!("{}", render::list(store.people())),
        Command::Search { query } => println!("{}", render::list(&store.search(&query))),
        Command::Add(fields) => {
            let draft = fields.apply(PersonDraft::default());
            save_person(&mut store, draft, None, approve_all, prompt::confirm)?;
        }
        Command::Edit {
            original_id,
            fields,
        } => {
            let original_id = PersonId::from(original_id);

            let person = store
                .get(&original_id)
                .with_context(|| format!("No person with id [{}]", original_id))?;

            let draft = fields.apply(PersonDraft::from_person(person));
            save_person(&mut store, draft, Some(original_id), approve_all, prompt::confirm)?;
        }
        Command::Delete { id } => {
            let id = PersonId::from(id);

            if store.get(&id).is_none() {
                println!("No person with id [{}]", id);
            } else if approve_all || prompt::confirm("Delete this person?")? {
                store.delete(&id);
                warn_if_unsaved(&store);
            }
        }
        Command::Export { output } => {
            let exported = store.export().context("Export failed")?;

            match output {
                Some(path) => {
                    fs::write(&path, exported)
                        .with_context(|| format!("Export failed, cannot write {}", path.display()))?;
                    log::info!("Exported to {}", path.display());
                }
                None => println!("{}", exported),
            }
        }
        Command::Import { input } => {
            let raw = read_input(&input)?;
            import_people(&mut store, &raw, approve_all, prompt::confirm)?;
        }
        Command::Reset => {
            if approve_all || prompt::confirm("Replace the current people with the sample people?")? {
                store.reset();
                warn_if_unsaved(&store);
            }
        }
    }

    Ok(())
}

// Runs the upsert, asking `ask` and retrying once when the id is already taken
fn save_person(
    store: &mut PeopleStore,
    draft: PersonDraft,
    original_id: Option<PersonId>,
    approve_all: bool,
    mut ask: impl FnMut(&str) -> io::Result<bool>,
) -> anyhow::Result<()> {
    let mut confirmation = if approve_all {
        Confirmation::Approved
    } else {
        Confirmation::Pending
    };

    loop {
        match store.upsert(&draft, original_id.as_ref(), confirmation) {
            UpsertOutcome::Applied { person, .. } => {
                println!("{}", render::card(&person));
                warn_if_unsaved(store);
                return Ok(());
            }
            UpsertOutcome::NeedsConfirmation { .. } => {
                confirmation =
                    if ask("The ID you entered already exists. Overwrite that record?")? {
                        Confirmation::Approved
                    } else {
                        Confirmation::Declined
                    };
            }
            UpsertOutcome::Declined => {
                println!("Nothing changed");
                return Ok(());
            }
        }
    }
}

fn import_people(
    store: &mut PeopleStore,
    raw: &str,
    approve_all: bool,
    mut ask: impl FnMut(&str) -> io::Result<bool>,
) -> anyhow::Result<()> {
    let mut confirmation = if approve_all {
        Confirmation::Approved
    } else {
        Confirmation::Pending
    };

    loop {
        let outcome = store
            .import_replace(raw, confirmation)
            .context("Import failed")?;

        match outcome {
            ImportOutcome::NeedsConfirmation { count } => {
                let question = format!(
                    "Importing {} people will replace the current people list. Proceed?",
                    count
                );

                confirmation = if ask(&question)? {
                    Confirmation::Approved
                } else {
                    Confirmation::Declined
                };
            }
            ImportOutcome::Declined => {
                println!("Nothing changed");
                return Ok(());
            }
            ImportOutcome::Replaced { count } => {
                println!("Imported {} people", count);
                warn_if_unsaved(store);
                return Ok(());
            }
        }
    }
}

fn read_input(input: &PathBuf) -> anyhow::Result<String> {
    if input.as_os_str() == "-" {
        let mut raw = String::new();
        io::stdin()
            .read_to_string(&mut raw)
            .context("Cannot read import from stdin")?;
        return Ok(raw);
    }

    fs::read_to_string(input).with_context(|| format!("Cannot read {}", input.display()))
}

fn warn_if_unsaved(store: &PeopleStore) {
    if !store.is_persisted() {
        eprintln!("Warning: the change could not be saved to storage");
    }
}
