//! Command-line front end for editing quest sessions and exporting `QuestInfo` XML.
//!
//! A session is a TOML file holding one quest record. Edits are applied to the
//! session in place; `export` encodes it and `import` replaces it from a document.

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use quest_data::{Condition, Goal, QuestRecord, Reward, validate_record};
use quest_xml::files::{read_quest_xml, read_session, write_quest_xml, write_session};

#[derive(Parser)]
#[command(author, version, about = "Edit quest records and export them as QuestInfo XML.")]
struct Cli {
    /// Session file holding the quest being edited.
    #[arg(long, global = true, env = "QUEST_XML_SESSION", default_value = "quest.toml")]
    session: PathBuf,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a new session from the default quest.
    New {
        /// Include the sample conditions, goals and rewards.
        #[arg(long)]
        sample: bool,
    },
    /// Set the raw text of a scalar field (e.g. `set Level 30`).
    Set { field: String, text: String },
    /// Append a condition (3 values), goal (7 values) or reward (5 values).
    Append {
        #[arg(value_enum)]
        kind: EntryKind,
        #[arg(allow_negative_numbers = true, required = true)]
        values: Vec<i64>,
    },
    /// Replace the entry at `index`, keeping its position.
    Replace {
        #[arg(value_enum)]
        kind: EntryKind,
        index: usize,
        #[arg(allow_negative_numbers = true, required = true)]
        values: Vec<i64>,
    },
    /// Remove the entry at `index`.
    Remove {
        #[arg(value_enum)]
        kind: EntryKind,
        index: usize,
    },
    /// Restore default fields and clear all entries.
    Reset,
    /// Replace all entries with the sample conditions, goals and rewards.
    LoadSample,
    /// Print entry counts and the XML preview.
    Show,
    /// Report every basic field that is not an integer.
    Check,
    /// Encode the session and save it as XML.
    Export(ExportArgs),
    /// Replace the session with a decoded XML document.
    Import { file: PathBuf },
}

#[derive(Args)]
struct ExportArgs {
    /// Output file; defaults to `Quest_{UniqID}_{TitleTab}.xml` in the output directory.
    #[arg(long)]
    out: Option<PathBuf>,
    /// Directory for the default output file name.
    #[arg(long, env = "QUEST_XML_OUT_DIR", default_value = ".")]
    out_dir: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum EntryKind {
    Condition,
    Goal,
    Reward,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let session = cli.session.as_path();

    match cli.command {
        Commands::New { sample } => {
            let record = if sample { QuestRecord::sample() } else { QuestRecord::default() };
            write_session(session, &record)?;
            println!("new session written to '{}'", session.display());
        },
        Commands::Set { field, text } => edit(session, |record| {
            record.set_field(&field, text)?;
            Ok(())
        })?,
        Commands::Append { kind, values } => edit(session, |record| {
            let index = match kind {
                EntryKind::Condition => record.append_condition(condition_from(&values)?),
                EntryKind::Goal => record.append_goal(goal_from(&values)?),
                EntryKind::Reward => record.append_reward(reward_from(&values)?),
            };
            println!("appended at index {index}");
            Ok(())
        })?,
        Commands::Replace { kind, index, values } => edit(session, |record| {
            match kind {
                EntryKind::Condition => record.replace_condition(index, condition_from(&values)?)?,
                EntryKind::Goal => record.replace_goal(index, goal_from(&values)?)?,
                EntryKind::Reward => record.replace_reward(index, reward_from(&values)?)?,
            }
            Ok(())
        })?,
        Commands::Remove { kind, index } => edit(session, |record| {
            match kind {
                EntryKind::Condition => {
                    record.remove_condition(index)?;
                },
                EntryKind::Goal => {
                    record.remove_goal(index)?;
                },
                EntryKind::Reward => {
                    record.remove_reward(index)?;
                },
            }
            Ok(())
        })?,
        Commands::Reset => edit(session, |record| {
            record.reset();
            Ok(())
        })?,
        Commands::LoadSample => edit(session, |record| {
            record.load_sample();
            Ok(())
        })?,
        Commands::Show => show(&read_session(session)?)?,
        Commands::Check => {
            let record = read_session(session)?;
            let errors = validate_record(&record);
            if errors.is_empty() {
                eprintln!("check: OK");
            } else {
                for err in &errors {
                    eprintln!("{}: {err}", session.display());
                }
                process::exit(1);
            }
        },
        Commands::Export(args) => {
            let record = read_session(session)?;
            let out = args
                .out
                .unwrap_or_else(|| args.out_dir.join(record.suggested_file_name()));
            write_quest_xml(&out, &record).with_context(|| format!("while exporting '{}'", out.display()))?;
            println!("exported '{}'", out.display());
        },
        Commands::Import { file } => {
            let record = read_quest_xml(&file).with_context(|| format!("while importing '{}'", file.display()))?;
            write_session(session, &record)?;
            let (conditions, goals, rewards) = record.counts();
            println!("imported {conditions} conditions, {goals} goals, {rewards} rewards");
        },
    }
    Ok(())
}

/// Load the session, apply `change`, save it and show the updated preview.
fn edit(session: &Path, change: impl FnOnce(&mut QuestRecord) -> Result<()>) -> Result<()> {
    let mut record = read_session(session).context("while loading session")?;
    change(&mut record)?;
    write_session(session, &record)?;
    info!("session '{}' updated", session.display());
    show(&record)
}

fn show(record: &QuestRecord) -> Result<()> {
    let (conditions, goals, rewards) = record.counts();
    println!("conditions: {conditions}  goals: {goals}  rewards: {rewards}");
    match quest_xml::preview(record) {
        Ok(xml) => println!("{xml}"),
        // raw edits are saved even when a basic field does not encode yet
        Err(err) => eprintln!("preview unavailable: {err}"),
    }
    Ok(())
}

fn expect_arity(kind: &str, values: &[i64], arity: usize) -> Result<()> {
    if values.len() != arity {
        bail!("a {kind} takes {arity} values, got {}", values.len());
    }
    Ok(())
}

fn condition_from(values: &[i64]) -> Result<Condition> {
    expect_arity("condition", values, 3)?;
    Ok(Condition::new(values[0], values[1], values[2]))
}

fn goal_from(values: &[i64]) -> Result<Goal> {
    expect_arity("goal", values, 7)?;
    Ok(Goal {
        goal_type: values[0],
        goal_id: values[1],
        goal_count: values[2],
        goal_amount: values[3],
        cur_type_count: values[4],
        sub_value: values[5],
        sub_value1: values[6],
    })
}

fn reward_from(values: &[i64]) -> Result<Reward> {
    expect_arity("reward", values, 5)?;
    Ok(Reward {
        reward: values[0],
        reward_type: values[1],
        reward_money: values[2],
        reward_item: values[3],
        reward_amount: values[4],
    })
}
