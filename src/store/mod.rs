mod actions;
pub mod bundle;
pub mod catalog;
mod ephemeral;
mod models;

pub use catalog::{PROJECTS, Project, ProjectStatus, boot_log, find_project};
pub use ephemeral::{Ephemeral, Ticket};
pub use models::*;

use crate::ids::IdGenerator;
use crate::projector;
use crate::storage::Storage;

/// The single source of truth for tasks and UI session state.
///
/// Only `tasks`, `filter` and `current_view` are written to [`Storage`]; the
/// rest (search query, overlays, toast, flourish, selected project) starts
/// from defaults on every load.
pub struct TaskStore {
    storage: Storage,
    ids: Box<dyn IdGenerator>,

    // Persisted
    tasks: Vec<Task>,
    filter: TaskFilter,
    current_view: ViewType,

    // Session-only
    search_query: String,
    selected_project_id: Option<String>,
    command_palette_open: bool,
    quick_create_open: bool,
    toast: Ephemeral<String>,
    flourish: Ephemeral<()>,

    /// Bumped on every change to `tasks`.
    revision: u64,
}

/// The example tasks a fresh board starts with, most-recent-first.
const SEED_TASKS: [(&str, TaskStatus, TaskPriority); 3] = [
    ("Finish landing page", TaskStatus::InProgress, TaskPriority::Urgent),
    ("Fix CSS bugs", TaskStatus::Todo, TaskPriority::High),
    ("Review pull requests", TaskStatus::Todo, TaskPriority::Medium),
];

impl TaskStore {
    /// Restore from storage, seeding the example tasks if nothing valid is stored.
    pub fn load(storage: Storage, ids: Box<dyn IdGenerator>) -> Self {
        Self::load_with(storage, ids, true)
    }

    /// Like [`TaskStore::load`], with control over seeding an absent bundle.
    ///
    /// An absent or malformed bundle is replaced immediately by the fallback
    /// state, so seeded ids stay stable across runs.
    pub fn load_with(storage: Storage, ids: Box<dyn IdGenerator>, seed_on_empty: bool) -> Self {
        let restored = match storage.get_item(bundle::STORAGE_KEY) {
            Ok(Some(raw)) => match bundle::decode(&raw) {
                Ok(state) => Some(state),
                Err(e) => {
                    tracing::warn!("discarding stored task bundle: {e:#}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("failed to read task bundle: {e:#}");
                None
            }
        };

        let mut store = TaskStore {
            storage,
            ids,
            tasks: Vec::new(),
            filter: TaskFilter::default(),
            current_view: ViewType::default(),
            search_query: String::new(),
            selected_project_id: None,
            command_palette_open: false,
            quick_create_open: false,
            toast: Ephemeral::default(),
            flourish: Ephemeral::default(),
            revision: 0,
        };

        if let Some(state) = restored {
            tracing::info!("restored {} tasks", state.tasks.len());
            store.tasks = state.tasks;
            store.filter = state.filter;
            store.current_view = state.current_view;
        } else {
            if seed_on_empty {
                store.tasks = store.seed_tasks();
            }
            tracing::info!("starting from {} seed tasks", store.tasks.len());
            store.persist();
        }
        store
    }

    fn seed_tasks(&mut self) -> Vec<Task> {
        SEED_TASKS
            .iter()
            .map(|&(title, status, priority)| Task {
                id: self.ids.generate_id(),
                title: title.to_string(),
                status,
                priority,
            })
            .collect()
    }

    /// Throw away every persisted field and start over from the seed set.
    pub fn reset(&mut self) {
        self.tasks = self.seed_tasks();
        self.filter = TaskFilter::default();
        self.current_view = ViewType::default();
        self.search_query.clear();
        self.selected_project_id = None;
        self.revision += 1;
        tracing::info!("task board reset to seed data");
        self.persist();
    }

    /// Best-effort write of the persisted subset. Failures are logged, never raised.
    fn persist(&self) {
        let result = bundle::encode(&self.tasks, self.filter, self.current_view)
            .and_then(|raw| self.storage.set_item(bundle::STORAGE_KEY, &raw));
        if let Err(e) = result {
            tracing::warn!("failed to persist task bundle: {e:#}");
        }
    }

    // ── Reads ──

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn filter(&self) -> TaskFilter {
        self.filter
    }

    pub fn current_view(&self) -> ViewType {
        self.current_view
    }

    pub fn search_query(&self) -> &str {
        &self.search_query
    }

    pub fn selected_project_id(&self) -> Option<&str> {
        self.selected_project_id.as_deref()
    }

    pub fn selected_project(&self) -> Option<&'static Project> {
        self.selected_project_id.as_deref().and_then(find_project)
    }

    pub fn is_command_palette_open(&self) -> bool {
        self.command_palette_open
    }

    pub fn is_quick_create_open(&self) -> bool {
        self.quick_create_open
    }

    pub fn toast_message(&self) -> Option<&str> {
        self.toast.get().map(String::as_str)
    }

    pub fn is_flourish_active(&self) -> bool {
        self.flourish.is_active()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// The task list as the playground shows it right now.
    pub fn filtered_tasks(&self) -> Vec<Task> {
        projector::project(&self.tasks, self.filter, &self.search_query)
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    #[cfg(test)]
    pub fn into_storage(self) -> Storage {
        self.storage
    }
}
