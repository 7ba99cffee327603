//! Seed fixtures loaded at startup

use serde::Deserialize;
use tb_core::error::TbError;
use tb_core::result::TbResult;
use tb_core::traits::Entity;
use tb_models::{Project, Task, TaskLink, Team, User};

use crate::sequence::{IdSequence, Sequences};
use crate::store::Collections;
use crate::table::Table;

const SEED: &str = include_str!("../fixtures/seed.json");

#[derive(Debug, Deserialize)]
struct SeedFile {
    teams: Vec<Team>,
    users: Vec<User>,
    projects: Vec<Project>,
    tasks: Vec<Task>,
    task_links: Vec<TaskLink>,
    sequences: SeedSequences,
}

#[derive(Debug, Deserialize)]
struct SeedSequences {
    users: i64,
    projects: i64,
    tasks: i64,
    task_links: i64,
}

/// Build the seeded collections
pub fn load() -> TbResult<Collections> {
    let seed: SeedFile = serde_json::from_str(SEED)
        .map_err(|e| TbError::Internal(format!("invalid seed fixtures: {}", e)))?;

    let collections = Collections {
        teams: Table::from_rows(seed.teams),
        users: Table::from_rows(seed.users),
        projects: Table::from_rows(seed.projects),
        tasks: Table::from_rows(seed.tasks),
        task_links: Table::from_rows(seed.task_links),
        sequences: Sequences {
            users: IdSequence::starting_at(seed.sequences.users),
            projects: IdSequence::starting_at(seed.sequences.projects),
            tasks: IdSequence::starting_at(seed.sequences.tasks),
            task_links: IdSequence::starting_at(seed.sequences.task_links),
        },
    };

    check_sequences(&collections)?;
    Ok(collections)
}

/// Every sequence must start above the largest seeded id
fn check_sequences(collections: &Collections) -> TbResult<()> {
    let sequences = &collections.sequences;
    check_sequence(&collections.users, &sequences.users)?;
    check_sequence(&collections.projects, &sequences.projects)?;
    check_sequence(&collections.tasks, &sequences.tasks)?;
    check_sequence(&collections.task_links, &sequences.task_links)
}

fn check_sequence<T: Entity>(table: &Table<T>, sequence: &IdSequence) -> TbResult<()> {
    match table.max_id() {
        Some(max_id) if sequence.peek() <= max_id => Err(TbError::Internal(format!(
            "seed sequence for {} starts at {} but id {} is taken",
            T::COLLECTION,
            sequence.peek(),
            max_id
        ))),
        _ => Ok(()),
    }
}
