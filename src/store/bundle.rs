//! The persisted subset of the task store.
//!
//! Stored under [`STORAGE_KEY`] as
//! `{"state":{"tasks":[..],"filter":"all","currentView":"overview"},"version":0}`.
//! Only `tasks`, `filter` and `currentView` survive a reload; everything else
//! in the store is session state.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::models::{Task, TaskFilter, ViewType};

pub const STORAGE_KEY: &str = "digital8-tasks-storage";
pub const BUNDLE_VERSION: u32 = 0;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub filter: TaskFilter,
    #[serde(default)]
    pub current_view: ViewType,
}

#[derive(Deserialize)]
struct Envelope {
    state: PersistedState,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StateRef<'a> {
    tasks: &'a [Task],
    filter: TaskFilter,
    current_view: ViewType,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    state: StateRef<'a>,
    version: u32,
}

pub fn encode(tasks: &[Task], filter: TaskFilter, current_view: ViewType) -> Result<String> {
    let envelope = EnvelopeRef {
        state: StateRef {
            tasks,
            filter,
            current_view,
        },
        version: BUNDLE_VERSION,
    };
    serde_json::to_string(&envelope).context("failed to serialize task bundle")
}

/// Parse a stored bundle. Any structural problem (bad JSON, `tasks` not an
/// array, a task missing a field, an unknown enum value) is an error; the
/// caller treats that the same as a missing bundle.
pub fn decode(raw: &str) -> Result<PersistedState> {
    let envelope: Envelope = serde_json::from_str(raw).context("malformed task bundle")?;
    Ok(envelope.state)
}
