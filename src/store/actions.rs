use super::{Task, TaskFilter, TaskPriority, TaskStatus, TaskStore, Ticket, ViewType};

impl TaskStore {
    // ── Tasks ──

    /// Prepend a new `todo` task. Whitespace-only titles are ignored.
    pub fn create_task(&mut self, title: &str) -> Option<&Task> {
        let title = title.trim();
        if title.is_empty() {
            return None;
        }
        let task = Task {
            id: self.ids.generate_id(),
            title: title.to_string(),
            status: TaskStatus::Todo,
            priority: TaskPriority::None,
        };
        tracing::debug!(id = %task.id, "task created");
        self.tasks.insert(0, task);
        self.revision += 1;
        self.persist();
        self.tasks.first()
    }

    /// Returns whether a task with `id` exists. Unknown ids are a no-op.
    pub fn update_task_status(&mut self, id: &str, status: TaskStatus) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if task.status != status {
            task.status = status;
            tracing::debug!(id, status = status.as_str(), "task status updated");
            self.revision += 1;
            self.persist();
        }
        true
    }

    /// Same contract as [`TaskStore::update_task_status`], for priority.
    pub fn set_task_priority(&mut self, id: &str, priority: TaskPriority) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            return false;
        };
        if task.priority != priority {
            task.priority = priority;
            tracing::debug!(id, priority = priority.as_str(), "task priority updated");
            self.revision += 1;
            self.persist();
        }
        true
    }

    /// Flip between done and todo. Returns the new status, or `None` for an unknown id.
    pub fn toggle_task_done(&mut self, id: &str) -> Option<TaskStatus> {
        let next = self.task(id)?.status.toggled();
        self.update_task_status(id, next);
        Some(next)
    }

    /// Hard delete. Returns whether anything was removed.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return false;
        }
        tracing::debug!(id, "task deleted");
        self.revision += 1;
        self.persist();
        true
    }

    // ── Routing and filters ──

    pub fn set_filter(&mut self, filter: TaskFilter) {
        if self.filter != filter {
            self.filter = filter;
            self.persist();
        }
    }

    pub fn set_current_view(&mut self, view: ViewType) {
        if self.current_view != view {
            self.current_view = view;
            self.persist();
        }
    }

    pub fn set_search_query(&mut self, query: &str) {
        query.clone_into(&mut self.search_query);
    }

    pub fn set_selected_project(&mut self, project_id: Option<&str>) {
        self.selected_project_id = project_id.map(str::to_string);
    }

    // ── Transient UI state ──

    /// Replace the active toast. The ticket lets a deferred dismissal clear
    /// this toast without touching one shown later.
    pub fn show_toast(&mut self, message: &str) -> Ticket {
        self.toast.show(message.to_string())
    }

    pub fn hide_toast(&mut self) {
        self.toast.hide();
    }

    pub fn dismiss_toast(&mut self, ticket: Ticket) -> bool {
        self.toast.dismiss(ticket)
    }

    pub fn toggle_command_palette(&mut self) {
        self.command_palette_open = !self.command_palette_open;
    }

    pub fn set_command_palette(&mut self, open: bool) {
        self.command_palette_open = open;
    }

    pub fn set_quick_create(&mut self, open: bool) {
        self.quick_create_open = open;
    }

    /// Light the dark-mode ring. Pair with [`TaskStore::end_flourish`].
    pub fn start_flourish(&mut self) -> Ticket {
        self.flourish.show(())
    }

    pub fn end_flourish(&mut self, ticket: Ticket) -> bool {
        self.flourish.dismiss(ticket)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::ids::{SequentialIds, UuidIds};
    use crate::storage::Storage;
    use crate::store::bundle;

    fn fresh_store() -> TaskStore {
        TaskStore::load(
            Storage::open_in_memory().unwrap(),
            Box::new(SequentialIds::default()),
        )
    }

    fn empty_store() -> TaskStore {
        TaskStore::load_with(
            Storage::open_in_memory().unwrap(),
            Box::new(SequentialIds::default()),
            false,
        )
    }

    fn titles(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|t| t.title.as_str()).collect()
    }

    #[test]
    fn test_fresh_store_seeds_example_tasks() {
        let store = fresh_store();
        assert_eq!(
            titles(&store),
            ["Finish landing page", "Fix CSS bugs", "Review pull requests"]
        );
        assert_eq!(store.tasks()[0].status, TaskStatus::InProgress);
        assert_eq!(store.tasks()[0].priority, TaskPriority::Urgent);
        assert_eq!(store.filter(), TaskFilter::All);
        assert_eq!(store.current_view(), ViewType::Overview);
        assert!(store.storage().get_item(bundle::STORAGE_KEY).unwrap().is_some());
    }

    #[test]
    fn test_create_task_defaults() {
        let mut store = empty_store();
        let task = store.create_task("  Write tests  ").unwrap().clone();
        assert_eq!(task.title, "Write tests");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, TaskPriority::None);
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn test_create_task_prepends() {
        let mut store = empty_store();
        store.create_task("t1");
        store.create_task("t2");
        assert_eq!(titles(&store), ["t2", "t1"]);
    }

    #[test]
    fn test_create_task_ids_are_unique() {
        let mut store = TaskStore::load(Storage::open_in_memory().unwrap(), Box::new(UuidIds));
        for i in 0..50 {
            store.create_task(&format!("task {i}"));
        }
        let ids: HashSet<&str> = store.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids.len(), store.tasks().len());
    }

    #[test]
    fn test_ids_not_reused_after_delete() {
        let mut store = empty_store();
        let first = store.create_task("a").unwrap().id.clone();
        assert!(store.delete_task(&first));
        let second = store.create_task("b").unwrap().id.clone();
        assert_ne!(first, second);
    }

    #[test]
    fn test_blank_title_is_ignored() {
        let mut store = fresh_store();
        let revision = store.revision();
        assert!(store.create_task("   ").is_none());
        assert!(store.create_task("").is_none());
        assert!(store.create_task("\t\n").is_none());
        assert_eq!(store.tasks().len(), 3);
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_update_status_in_place() {
        let mut store = fresh_store();
        let before = store.tasks().to_vec();
        let id = before[1].id.clone();

        assert!(store.update_task_status(&id, TaskStatus::Done));

        let after = store.tasks();
        assert_eq!(after.len(), before.len());
        assert_eq!(after[1].id, id);
        assert_eq!(after[1].status, TaskStatus::Done);
        assert_eq!(after[1].title, before[1].title);
        assert_eq!(after[1].priority, before[1].priority);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut store = fresh_store();
        let before = store.tasks().to_vec();
        let revision = store.revision();
        assert!(!store.update_task_status("nonexistent", TaskStatus::Done));
        assert!(!store.set_task_priority("nonexistent", TaskPriority::Urgent));
        assert!(store.toggle_task_done("nonexistent").is_none());
        assert_eq!(store.tasks(), before.as_slice());
        assert_eq!(store.revision(), revision);
    }

    #[test]
    fn test_set_priority_in_place() {
        let mut store = fresh_store();
        let id = store.tasks()[2].id.clone();
        assert!(store.set_task_priority(&id, TaskPriority::Urgent));
        assert_eq!(store.tasks()[2].priority, TaskPriority::Urgent);
        assert_eq!(store.tasks()[2].status, TaskStatus::Todo);
    }

    #[test]
    fn test_toggle_cycles_todo_and_done() {
        let mut store = fresh_store();
        let id = store.tasks()[0].id.clone();
        assert_eq!(store.toggle_task_done(&id), Some(TaskStatus::Done));
        assert_eq!(store.toggle_task_done(&id), Some(TaskStatus::Todo));
        assert_eq!(store.task(&id).unwrap().status, TaskStatus::Todo);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let mut store = fresh_store();
        let id = store.tasks()[1].id.clone();
        assert!(store.delete_task(&id));
        let after_once = store.tasks().to_vec();
        assert!(!store.delete_task(&id));
        assert_eq!(store.tasks(), after_once.as_slice());
        assert_eq!(titles(&store), ["Finish landing page", "Review pull requests"]);
    }

    #[test]
    fn test_revision_tracks_task_changes_only() {
        let mut store = fresh_store();
        let start = store.revision();
        store.set_filter(TaskFilter::Done);
        store.set_search_query("x");
        assert_eq!(store.revision(), start);
        store.create_task("new");
        assert_eq!(store.revision(), start + 1);
    }

    #[test]
    fn test_filtered_tasks_uses_filter_and_query() {
        let mut store = fresh_store();
        store.set_filter(TaskFilter::Todo);
        assert_eq!(store.filtered_tasks().len(), 2);
        store.set_search_query("fix");
        let rows = store.filtered_tasks();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Fix CSS bugs");
        // Display-only: the collection is untouched.
        assert_eq!(store.tasks().len(), 3);
    }

    #[test]
    fn test_round_trip_persists_only_the_durable_subset() {
        let mut store = fresh_store();
        store.create_task("Ship release");
        let id = store.tasks()[1].id.clone();
        store.update_task_status(&id, TaskStatus::Done);
        store.set_filter(TaskFilter::Urgent);
        store.set_current_view(ViewType::Playground);
        store.set_search_query("ship");
        store.set_selected_project(Some("2"));
        store.set_command_palette(true);
        store.set_quick_create(true);
        store.show_toast("hello");
        store.start_flourish();

        let tasks = store.tasks().to_vec();
        let storage = store.into_storage();
        let reloaded = TaskStore::load(storage, Box::new(SequentialIds::new("other")));

        assert_eq!(reloaded.tasks(), tasks.as_slice());
        assert_eq!(reloaded.filter(), TaskFilter::Urgent);
        assert_eq!(reloaded.current_view(), ViewType::Playground);
        assert_eq!(reloaded.search_query(), "");
        assert_eq!(reloaded.selected_project_id(), None);
        assert!(!reloaded.is_command_palette_open());
        assert!(!reloaded.is_quick_create_open());
        assert_eq!(reloaded.toast_message(), None);
        assert!(!reloaded.is_flourish_active());
    }

    #[test]
    fn test_malformed_bundle_falls_back_to_seed() {
        let storage = Storage::open_in_memory().unwrap();
        storage
            .set_item(bundle::STORAGE_KEY, r#"{"state":{"tasks":"oops","filter":"done"}}"#)
            .unwrap();
        let store = TaskStore::load(storage, Box::new(SequentialIds::default()));
        assert_eq!(store.tasks().len(), 3);
        assert_eq!(store.filter(), TaskFilter::All);
        assert_eq!(store.current_view(), ViewType::Overview);

        // The fallback replaces the malformed bundle.
        let raw = store.storage().get_item(bundle::STORAGE_KEY).unwrap().unwrap();
        assert!(bundle::decode(&raw).is_ok());
    }

    #[test]
    fn test_empty_persisted_list_is_not_reseeded() {
        let mut store = fresh_store();
        let ids: Vec<String> = store.tasks().iter().map(|t| t.id.clone()).collect();
        for id in &ids {
            store.delete_task(id);
        }
        let reloaded = TaskStore::load(store.into_storage(), Box::new(SequentialIds::default()));
        assert!(reloaded.tasks().is_empty());
    }

    #[test]
    fn test_reset_restores_seed_and_defaults() {
        let mut store = fresh_store();
        store.create_task("extra");
        store.set_filter(TaskFilter::Done);
        store.set_current_view(ViewType::Projects);
        store.set_search_query("x");
        store.reset();
        assert_eq!(store.tasks().len(), 3);
        assert_eq!(store.filter(), TaskFilter::All);
        assert_eq!(store.current_view(), ViewType::Overview);
        assert_eq!(store.search_query(), "");
    }

    #[test]
    fn test_toast_overwrite_and_stale_dismissal() {
        let mut store = fresh_store();
        let first = store.show_toast("Filtered by: All");
        let second = store.show_toast("Filtered by: Done");
        assert_eq!(store.toast_message(), Some("Filtered by: Done"));

        assert!(!store.dismiss_toast(first));
        assert_eq!(store.toast_message(), Some("Filtered by: Done"));

        assert!(store.dismiss_toast(second));
        assert_eq!(store.toast_message(), None);

        store.show_toast("again");
        store.hide_toast();
        assert_eq!(store.toast_message(), None);
    }

    #[test]
    fn test_overlay_flags_are_independent() {
        let mut store = fresh_store();
        store.toggle_command_palette();
        store.set_quick_create(true);
        assert!(store.is_command_palette_open());
        assert!(store.is_quick_create_open());
        store.toggle_command_palette();
        assert!(!store.is_command_palette_open());
        assert!(store.is_quick_create_open());
    }

    #[test]
    fn test_selected_project_resolves_from_catalog() {
        let mut store = fresh_store();
        store.set_selected_project(Some("1"));
        assert_eq!(store.selected_project().map(|p| p.name), Some("Digital8 OS"));
        store.set_selected_project(Some("missing"));
        assert!(store.selected_project().is_none());
        store.set_selected_project(None);
        assert_eq!(store.selected_project_id(), None);
    }

    #[test]
    fn test_flourish_ticket() {
        let mut store = fresh_store();
        let first = store.start_flourish();
        let second = store.start_flourish();
        assert!(!store.end_flourish(first));
        assert!(store.is_flourish_active());
        assert!(store.end_flourish(second));
        assert!(!store.is_flourish_active());
    }
}
