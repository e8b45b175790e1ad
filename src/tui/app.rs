use std::collections::HashMap;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::DefaultTerminal;

use crate::config::{Config, TimerConfig};
use crate::projector::FilteredView;
use crate::store::{Ephemeral, PROJECTS, Task, TaskStatus, TaskStore, Ticket, ViewType};

use super::event::{self, AppEvent};
use super::form::TextInput;
use super::keymap::{Action, KeyMap};
use super::theme::Theme;
use super::timers::TimerQueue;
use super::ui;

/// Upper bound on how long the loop blocks waiting for input.
const MAX_TICK: Duration = Duration::from_millis(250);

pub const DARK_MODE_TOAST: &str = "Dark Mode is already optimized for Digital8";

/// Follow-ups scheduled on the timer queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    DismissToast(Ticket),
    EndFlourish(Ticket),
    /// Flip a pulsing row to done, if that pulse is still the current one.
    FinishCompletion(String, u64),
    CloseQuickCreate(Ticket),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteMode {
    Commands,
    CreateTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteAction {
    CreateTask,
    SearchTasks,
    ToggleDarkMode,
    GoTo(ViewType),
    OpenProject(&'static str),
}

#[derive(Debug, Clone)]
pub struct PaletteItem {
    pub label: &'static str,
    /// Dim text on the right (a project's domain).
    pub hint: Option<&'static str>,
    pub keywords: Vec<&'static str>,
    pub action: PaletteAction,
}

impl PaletteItem {
    fn matches(&self, query: &str) -> bool {
        self.label.to_lowercase().contains(query)
            || self.keywords.iter().any(|k| k.to_lowercase().contains(query))
    }
}

fn palette_items() -> Vec<PaletteItem> {
    let mut items = vec![
        PaletteItem {
            label: "Create New Task",
            hint: None,
            keywords: vec!["create", "new", "task", "add"],
            action: PaletteAction::CreateTask,
        },
        PaletteItem {
            label: "Search Tasks",
            hint: None,
            keywords: vec!["search", "find", "filter"],
            action: PaletteAction::SearchTasks,
        },
        PaletteItem {
            label: "Toggle Dark Mode",
            hint: None,
            keywords: vec!["dark", "theme", "mode"],
            action: PaletteAction::ToggleDarkMode,
        },
        PaletteItem {
            label: "Go to Projects",
            hint: None,
            keywords: vec!["projects", "portfolio", "navigate"],
            action: PaletteAction::GoTo(ViewType::Projects),
        },
        PaletteItem {
            label: "Go to Playground",
            hint: None,
            keywords: vec!["playground", "tasks", "board", "navigate"],
            action: PaletteAction::GoTo(ViewType::Playground),
        },
        PaletteItem {
            label: "Go to Overview",
            hint: None,
            keywords: vec!["overview", "home", "welcome", "navigate"],
            action: PaletteAction::GoTo(ViewType::Overview),
        },
    ];
    items.extend(PROJECTS.iter().map(|p| PaletteItem {
        label: p.name,
        hint: p.domain,
        keywords: p.domain.into_iter().collect(),
        action: PaletteAction::OpenProject(p.id),
    }));
    items
}

/// Command palette state. Open/closed lives in the store; this holds the
/// text and list selection while it is open.
#[derive(Debug)]
pub struct Palette {
    pub mode: PaletteMode,
    pub input: TextInput,
    /// Title buffer for create-task mode.
    pub title: TextInput,
    pub items: Vec<PaletteItem>,
    pub filtered: Vec<usize>,
    pub index: usize,
}

impl Default for Palette {
    fn default() -> Self {
        let items = palette_items();
        let filtered = (0..items.len()).collect();
        Self {
            mode: PaletteMode::Commands,
            input: TextInput::default(),
            title: TextInput::default(),
            items,
            filtered,
            index: 0,
        }
    }
}

impl Palette {
    fn reset(&mut self, prefill: &str) {
        self.mode = PaletteMode::Commands;
        self.input.set(prefill);
        self.title.clear();
        self.refilter();
    }

    fn refilter(&mut self) {
        let query = self.input.value().trim().to_lowercase();
        self.filtered = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| query.is_empty() || item.matches(&query))
            .map(|(i, _)| i)
            .collect();
        self.index = 0;
    }

    pub fn visible(&self) -> impl Iterator<Item = &PaletteItem> {
        self.filtered.iter().map(|&i| &self.items[i])
    }

    fn selected_action(&self) -> Option<PaletteAction> {
        self.filtered
            .get(self.index)
            .map(|&i| self.items[i].action)
    }
}

pub struct App {
    pub store: TaskStore,
    pub theme: Theme,
    pub keymap: KeyMap,
    timing: TimerConfig,
    timers: TimerQueue<Deferred>,

    pub should_quit: bool,
    pub show_help: bool,

    // Selection indices
    pub task_index: usize,
    pub project_index: usize,

    view: FilteredView,

    pub palette: Palette,
    pub quick_create: TextInput,
    /// Showing between a successful quick-create submit and the deferred close.
    pub quick_create_success: Ephemeral<()>,

    /// Rows pulsing before they flip to done, keyed to their pulse number.
    pub completing: HashMap<String, u64>,
    pulses: u64,
}

impl App {
    pub fn new(store: TaskStore, config: &Config) -> Self {
        let mut app = Self {
            store,
            theme: config.theme.build(),
            keymap: KeyMap::default(),
            timing: config.timers.clone(),
            timers: TimerQueue::default(),
            should_quit: false,
            show_help: false,
            task_index: 0,
            project_index: 0,
            view: FilteredView::default(),
            palette: Palette::default(),
            quick_create: TextInput::default(),
            quick_create_success: Ephemeral::default(),
            completing: HashMap::new(),
            pulses: 0,
        };
        app.sync_view();
        app
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            self.fire_due(Instant::now());
            terminal.draw(|frame| ui::draw(frame, self))?;

            let timeout = self.timers.poll_timeout(Instant::now(), MAX_TICK);
            match event::poll(timeout)? {
                AppEvent::Key(key) => self.handle_key(key.code, key.modifiers, Instant::now()),
                AppEvent::Tick => {}
            }

            if self.should_quit {
                tracing::info!("dashboard closed");
                return Ok(());
            }
        }
    }

    // ── Derived state ──

    /// Recompute the cached playground rows if the store moved on, and keep
    /// the selection inside them.
    pub fn sync_view(&mut self) {
        let len = self
            .view
            .get(
                self.store.tasks(),
                self.store.revision(),
                self.store.filter(),
                self.store.search_query(),
            )
            .len();
        self.task_index = self.task_index.min(len.saturating_sub(1));
    }

    /// Playground rows as of the last [`App::sync_view`].
    pub fn visible_tasks(&self) -> &[Task] {
        self.view.rows()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.visible_tasks().get(self.task_index)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    // ── Timers ──

    /// Apply every follow-up due at `now`.
    pub fn fire_due(&mut self, now: Instant) {
        for deferred in self.timers.drain_due(now) {
            match deferred {
                Deferred::DismissToast(ticket) => {
                    self.store.dismiss_toast(ticket);
                }
                Deferred::EndFlourish(ticket) => {
                    self.store.end_flourish(ticket);
                }
                Deferred::FinishCompletion(id, pulse) => {
                    // Cancelled by an explicit edit, a delete, or a newer pulse.
                    if self.completing.get(&id) == Some(&pulse) {
                        self.completing.remove(&id);
                        self.store.update_task_status(&id, TaskStatus::Done);
                    }
                }
                Deferred::CloseQuickCreate(ticket) => {
                    if self.quick_create_success.dismiss(ticket) {
                        self.close_quick_create();
                    }
                }
            }
        }
        self.sync_view();
    }

    fn toast(&mut self, message: &str, now: Instant) {
        let ticket = self.store.show_toast(message);
        self.timers
            .schedule_in(now, self.timing.toast(), Deferred::DismissToast(ticket));
    }

    // ── Key routing ──

    /// Route a key press to the topmost surface that wants it.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            self.show_help = false;
        } else if self.store.is_quick_create_open() {
            self.handle_quick_create_key(code, modifiers, now);
        } else if self.store.is_command_palette_open() {
            self.handle_palette_key(code, modifiers, now);
        } else if let Some(action) = self.keymap.lookup(code, modifiers) {
            self.execute(action, now);
        }
        self.sync_view();
    }

    fn execute(&mut self, action: Action, now: Instant) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ShowHelp => self.show_help = true,
            Action::Back => {
                self.store.hide_toast();
                if self.store.current_view() == ViewType::Projects {
                    self.store.set_selected_project(None);
                }
            }
            Action::SwitchView(view) => self.store.set_current_view(view),
            Action::MoveDown => self.move_down(),
            Action::MoveUp => self.move_up(),
            Action::Select => {
                if self.store.current_view() == ViewType::Projects
                    && let Some(project) = PROJECTS.get(self.project_index)
                {
                    self.store.set_selected_project(Some(project.id));
                }
            }
            Action::SetFilter(filter) => {
                self.store.set_filter(filter);
                self.task_index = 0;
                self.toast(&format!("Filtered by: {}", filter.label()), now);
            }
            Action::Search => {
                let query = self.store.search_query().to_string();
                self.open_palette(&query);
            }
            Action::QuickCreate => self.open_quick_create(),
            Action::ToggleCommandPalette => self.open_palette(""),
            Action::ToggleDone => self.toggle_selected(now),
            Action::CycleStatus => {
                if let Some((id, status)) = self.playground_task().map(|t| (t.id.clone(), t.status))
                {
                    self.completing.remove(&id);
                    self.store.update_task_status(&id, status.cycle());
                }
            }
            Action::CyclePriority => {
                if let Some((id, priority)) =
                    self.playground_task().map(|t| (t.id.clone(), t.priority))
                {
                    self.store.set_task_priority(&id, priority.cycle());
                }
            }
            Action::DeleteTask => {
                if let Some(id) = self.playground_task().map(|t| t.id.clone()) {
                    self.completing.remove(&id);
                    self.store.delete_task(&id);
                }
            }
        }
    }

    /// The selected row, but only while the playground is on screen.
    fn playground_task(&self) -> Option<&Task> {
        (self.store.current_view() == ViewType::Playground)
            .then(|| self.selected_task())
            .flatten()
    }

    fn move_down(&mut self) {
        match self.store.current_view() {
            ViewType::Playground => {
                let len = self.visible_tasks().len();
                if len > 0 {
                    self.task_index = (self.task_index + 1).min(len - 1);
                }
            }
            ViewType::Projects if self.store.selected_project_id().is_none() => {
                self.project_index = (self.project_index + 1).min(PROJECTS.len() - 1);
            }
            _ => {}
        }
    }

    fn move_up(&mut self) {
        match self.store.current_view() {
            ViewType::Playground => self.task_index = self.task_index.saturating_sub(1),
            ViewType::Projects if self.store.selected_project_id().is_none() => {
                self.project_index = self.project_index.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Done rows revert at once; anything else pulses, then flips to done.
    fn toggle_selected(&mut self, now: Instant) {
        let Some((id, status)) = self.playground_task().map(|t| (t.id.clone(), t.status)) else {
            return;
        };
        if status == TaskStatus::Done {
            self.store.toggle_task_done(&id);
        } else if !self.completing.contains_key(&id) {
            self.pulses += 1;
            self.completing.insert(id.clone(), self.pulses);
            self.timers.schedule_in(
                now,
                self.timing.completion(),
                Deferred::FinishCompletion(id, self.pulses),
            );
        }
    }

    // ── Quick create ──

    fn open_quick_create(&mut self) {
        self.quick_create.clear();
        self.quick_create_success.hide();
        self.store.set_quick_create(true);
    }

    fn close_quick_create(&mut self) {
        self.quick_create.clear();
        self.quick_create_success.hide();
        self.store.set_quick_create(false);
    }

    fn handle_quick_create_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) {
        match code {
            KeyCode::Esc => self.close_quick_create(),
            _ if self.quick_create_success.is_active() => {}
            KeyCode::Enter => {
                let title = self.quick_create.take();
                if self.store.create_task(&title).is_some() {
                    let ticket = self.quick_create_success.show(());
                    self.task_index = 0;
                    self.timers.schedule_in(
                        now,
                        self.timing.quick_create_close(),
                        Deferred::CloseQuickCreate(ticket),
                    );
                }
            }
            _ => {
                self.quick_create.handle_key(code, modifiers);
            }
        }
    }

    // ── Command palette ──

    fn open_palette(&mut self, prefill: &str) {
        self.palette.reset(prefill);
        self.store.set_command_palette(true);
    }

    /// Close the palette. A committed search keeps its query; every other
    /// exit clears it.
    fn close_palette(&mut self, keep_search: bool) {
        self.store.set_command_palette(false);
        self.palette.reset("");
        if !keep_search {
            self.store.set_search_query("");
        }
    }

    fn handle_palette_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) {
        match self.palette.mode {
            PaletteMode::Commands => self.handle_palette_command_key(code, modifiers, now),
            PaletteMode::CreateTask => self.handle_palette_title_key(code, modifiers),
        }
    }

    fn handle_palette_command_key(&mut self, code: KeyCode, modifiers: KeyModifiers, now: Instant) {
        match code {
            KeyCode::Esc => self.close_palette(false),
            KeyCode::Char('k') if modifiers.contains(KeyModifiers::CONTROL) => {
                self.close_palette(false);
            }
            KeyCode::Enter => match self.palette.selected_action() {
                Some(action) => self.execute_palette_action(action, now),
                None => self.close_palette(true),
            },
            KeyCode::Up => self.palette.index = self.palette.index.saturating_sub(1),
            KeyCode::Down | KeyCode::Tab => {
                if !self.palette.filtered.is_empty() {
                    self.palette.index =
                        (self.palette.index + 1).min(self.palette.filtered.len() - 1);
                }
            }
            _ => {
                if self.palette.input.handle_key(code, modifiers) {
                    self.palette.refilter();
                    self.task_index = 0;
                    let typed = self.palette.input.value();
                    let query = if typed.trim().is_empty() { "" } else { typed };
                    self.store.set_search_query(query);
                }
            }
        }
    }

    fn handle_palette_title_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        match code {
            KeyCode::Esc => {
                self.palette.mode = PaletteMode::Commands;
                self.palette.title.clear();
            }
            KeyCode::Enter => {
                let title = self.palette.title.value().to_string();
                if self.store.create_task(&title).is_some() {
                    self.task_index = 0;
                    self.close_palette(false);
                }
            }
            _ => {
                self.palette.title.handle_key(code, modifiers);
            }
        }
    }

    fn execute_palette_action(&mut self, action: PaletteAction, now: Instant) {
        tracing::debug!(?action, "palette action");
        match action {
            PaletteAction::CreateTask => {
                let typed = self.palette.input.value().trim().to_string();
                self.palette.mode = PaletteMode::CreateTask;
                self.palette.title.set(&typed);
                self.palette.input.clear();
                self.palette.refilter();
            }
            PaletteAction::SearchTasks => self.close_palette(true),
            PaletteAction::ToggleDarkMode => {
                let ticket = self.store.start_flourish();
                self.timers
                    .schedule_in(now, self.timing.flourish(), Deferred::EndFlourish(ticket));
                self.toast(DARK_MODE_TOAST, now);
                self.close_palette(false);
            }
            PaletteAction::GoTo(view) => {
                self.store.set_current_view(view);
                self.close_palette(false);
            }
            PaletteAction::OpenProject(id) => {
                self.store.set_current_view(ViewType::Projects);
                self.store.set_selected_project(Some(id));
                if let Some(pos) = PROJECTS.iter().position(|p| p.id == id) {
                    self.project_index = pos;
                }
                self.close_palette(false);
            }
        }
    }
}
