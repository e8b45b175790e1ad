use crossterm::event::{KeyCode, KeyModifiers};

use crate::store::{TaskFilter, ViewType};

// ── Actions ──────────────────────────────────────────────────────────

/// Every discrete action the dashboard can perform in response to a key press.
///
/// Actions are context-free identifiers; `App` decides what actually happens
/// based on the current view and overlays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Global
    Quit,
    ShowHelp,
    Back,

    // Navigation
    SwitchView(ViewType),
    MoveUp,
    MoveDown,
    Select,

    // Filters
    SetFilter(TaskFilter),
    Search,

    // Tasks
    QuickCreate,
    ToggleDone,
    CycleStatus,
    CyclePriority,
    DeleteTask,

    // Overlays
    ToggleCommandPalette,
}

// ── Help categories ──────────────────────────────────────────────────

/// Logical groupings shown in the help overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelpCategory {
    Navigation,
    Filters,
    Tasks,
    Overlays,
}

impl HelpCategory {
    fn label(self) -> &'static str {
        match self {
            Self::Navigation => "Navigation",
            Self::Filters => "Filters",
            Self::Tasks => "Tasks (Playground)",
            Self::Overlays => "Overlays",
        }
    }

    /// Fixed display order for the help overlay.
    const ORDERED: &[Self] = &[
        Self::Navigation,
        Self::Filters,
        Self::Tasks,
        Self::Overlays,
    ];
}

// ── Keybinding ───────────────────────────────────────────────────────

/// A single key → action mapping with metadata for the help overlay.
#[derive(Debug, Clone)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
    pub action: Action,
    /// Human-readable key label shown in help (e.g. `"Ctrl+K"`).
    /// Empty for aliases that share a row with another binding.
    pub label: &'static str,
    pub description: &'static str,
    pub category: HelpCategory,
}

/// A single row in the help overlay.
#[derive(Debug, Clone)]
pub struct HelpEntry {
    pub label: &'static str,
    pub description: &'static str,
}

// ── KeyMap ────────────────────────────────────────────────────────────

/// Declarative registry of the dashboard's key bindings.
///
/// Only consulted when no text-entry overlay is open; the palette and
/// quick-create dialogs handle their own keys.
pub struct KeyMap {
    pub bindings: Vec<KeyBinding>,
}

impl Default for KeyMap {
    fn default() -> Self {
        Self {
            bindings: default_bindings(),
        }
    }
}

impl KeyMap {
    pub fn lookup(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        // Terminals report `?` and capitals with SHIFT set; ignore it for chars.
        // Letters match case-insensitively so caps lock still works.
        let (code, modifiers) = match code {
            KeyCode::Char(c) => (
                KeyCode::Char(c.to_ascii_lowercase()),
                modifiers - KeyModifiers::SHIFT,
            ),
            _ => (code, modifiers),
        };
        self.bindings
            .iter()
            .find(|kb| kb.code == code && kb.modifiers == modifiers)
            .map(|kb| kb.action)
    }

    /// Grouped help entries in display order.
    pub fn help_entries(&self) -> Vec<(&'static str, Vec<HelpEntry>)> {
        HelpCategory::ORDERED
            .iter()
            .filter_map(|&cat| {
                let mut entries: Vec<HelpEntry> = Vec::new();
                for kb in &self.bindings {
                    if kb.category == cat
                        && !kb.label.is_empty()
                        && !entries.iter().any(|e| e.label == kb.label)
                    {
                        entries.push(HelpEntry {
                            label: kb.label,
                            description: kb.description,
                        });
                    }
                }
                (!entries.is_empty()).then(|| (cat.label(), entries))
            })
            .collect()
    }
}

// ── Default bindings ─────────────────────────────────────────────────

fn bind(
    code: KeyCode,
    modifiers: KeyModifiers,
    action: Action,
    label: &'static str,
    description: &'static str,
    category: HelpCategory,
) -> KeyBinding {
    KeyBinding {
        code,
        modifiers,
        action,
        label,
        description,
        category,
    }
}

/// An alias: same action, no help row of its own.
fn alias(code: KeyCode, modifiers: KeyModifiers, action: Action, category: HelpCategory) -> KeyBinding {
    bind(code, modifiers, action, "", "", category)
}

#[allow(clippy::enum_glob_use)]
fn default_bindings() -> Vec<KeyBinding> {
    use Action::*;
    use HelpCategory::*;

    let none = KeyModifiers::NONE;
    let ctrl = KeyModifiers::CONTROL;

    vec![
        // ── Navigation ───────────────────────────────────────────
        bind(KeyCode::Char('1'), none, SwitchView(ViewType::Overview), "  1/2/3", "Overview / Playground / Projects", Navigation),
        alias(KeyCode::Char('2'), none, SwitchView(ViewType::Playground), Navigation),
        alias(KeyCode::Char('3'), none, SwitchView(ViewType::Projects), Navigation),
        bind(KeyCode::Char('j'), none, MoveDown, "  j/k", "Move down / up", Navigation),
        alias(KeyCode::Char('k'), none, MoveUp, Navigation),
        alias(KeyCode::Down, none, MoveDown, Navigation),
        alias(KeyCode::Up, none, MoveUp, Navigation),
        bind(KeyCode::Enter, none, Select, "  Enter", "Open project", Navigation),
        bind(KeyCode::Esc, none, Back, "  Esc", "Close overlay / clear selection", Navigation),
        bind(KeyCode::Char('?'), none, ShowHelp, "  ?", "This help screen", Navigation),
        bind(KeyCode::Char('q'), none, Quit, "  q", "Quit", Navigation),
        alias(KeyCode::Char('c'), ctrl, Quit, Navigation),
        // ── Filters ──────────────────────────────────────────────
        bind(KeyCode::Char('a'), none, SetFilter(TaskFilter::All), "  a", "All tasks", Filters),
        bind(KeyCode::Char('u'), none, SetFilter(TaskFilter::Urgent), "  u", "Urgent only", Filters),
        bind(KeyCode::Char('t'), none, SetFilter(TaskFilter::Todo), "  t", "To do only", Filters),
        bind(KeyCode::Char('d'), none, SetFilter(TaskFilter::Done), "  d", "Done only", Filters),
        bind(KeyCode::Char('/'), none, Search, "  /", "Search tasks", Filters),
        // ── Tasks ────────────────────────────────────────────────
        bind(KeyCode::Char('c'), none, QuickCreate, "  c", "Quick create", Tasks),
        bind(KeyCode::Char(' '), none, ToggleDone, "  Space/x", "Toggle done", Tasks),
        alias(KeyCode::Char('x'), none, ToggleDone, Tasks),
        bind(KeyCode::Char('s'), none, CycleStatus, "  s", "Cycle status", Tasks),
        bind(KeyCode::Char('p'), none, CyclePriority, "  p", "Cycle priority", Tasks),
        bind(KeyCode::Backspace, none, DeleteTask, "  Backspace", "Delete task", Tasks),
        alias(KeyCode::Delete, none, DeleteTask, Tasks),
        // ── Overlays ─────────────────────────────────────────────
        bind(KeyCode::Char('k'), ctrl, ToggleCommandPalette, "  Ctrl+K", "Command palette", Overlays),
    ]
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_quit() {
        let km = KeyMap::default();
        assert_eq!(
            km.lookup(KeyCode::Char('q'), KeyModifiers::NONE),
            Some(Action::Quit)
        );
        assert_eq!(
            km.lookup(KeyCode::Char('c'), KeyModifiers::CONTROL),
            Some(Action::Quit)
        );
    }

    #[test]
    fn ctrl_k_and_k_are_distinct() {
        let km = KeyMap::default();
        assert_eq!(
            km.lookup(KeyCode::Char('k'), KeyModifiers::CONTROL),
            Some(Action::ToggleCommandPalette)
        );
        assert_eq!(
            km.lookup(KeyCode::Char('k'), KeyModifiers::NONE),
            Some(Action::MoveUp)
        );
    }

    #[test]
    fn c_is_quick_create_but_ctrl_c_quits() {
        let km = KeyMap::default();
        assert_eq!(
            km.lookup(KeyCode::Char('c'), KeyModifiers::NONE),
            Some(Action::QuickCreate)
        );
    }

    #[test]
    fn filter_keys() {
        let km = KeyMap::default();
        let cases = [
            ('a', TaskFilter::All),
            ('u', TaskFilter::Urgent),
            ('t', TaskFilter::Todo),
            ('d', TaskFilter::Done),
        ];
        for (key, filter) in cases {
            assert_eq!(
                km.lookup(KeyCode::Char(key), KeyModifiers::NONE),
                Some(Action::SetFilter(filter))
            );
        }
    }

    #[test]
    fn view_keys() {
        let km = KeyMap::default();
        assert_eq!(
            km.lookup(KeyCode::Char('3'), KeyModifiers::NONE),
            Some(Action::SwitchView(ViewType::Projects))
        );
    }

    #[test]
    fn shifted_question_mark_opens_help() {
        let km = KeyMap::default();
        assert_eq!(
            km.lookup(KeyCode::Char('?'), KeyModifiers::SHIFT),
            Some(Action::ShowHelp)
        );
    }

    #[test]
    fn uppercase_letters_match_lowercase_bindings() {
        let km = KeyMap::default();
        assert_eq!(
            km.lookup(KeyCode::Char('A'), KeyModifiers::SHIFT),
            Some(Action::SetFilter(TaskFilter::All))
        );
        // Caps lock: no SHIFT reported.
        assert_eq!(
            km.lookup(KeyCode::Char('U'), KeyModifiers::NONE),
            Some(Action::SetFilter(TaskFilter::Urgent))
        );
        assert_eq!(
            km.lookup(KeyCode::Char('D'), KeyModifiers::SHIFT),
            Some(Action::SetFilter(TaskFilter::Done))
        );
        assert_eq!(
            km.lookup(KeyCode::Char('C'), KeyModifiers::SHIFT),
            Some(Action::QuickCreate)
        );
        assert_eq!(
            km.lookup(KeyCode::Char('K'), KeyModifiers::CONTROL | KeyModifiers::SHIFT),
            Some(Action::ToggleCommandPalette)
        );
    }

    #[test]
    fn unknown_key() {
        let km = KeyMap::default();
        assert_eq!(km.lookup(KeyCode::Char('z'), KeyModifiers::NONE), None);
        assert_eq!(km.lookup(KeyCode::Char('a'), KeyModifiers::CONTROL), None);
    }

    #[test]
    fn help_entries_cover_all_categories() {
        let km = KeyMap::default();
        let labels: Vec<&str> = km.help_entries().iter().map(|(l, _)| *l).collect();
        assert_eq!(
            labels,
            ["Navigation", "Filters", "Tasks (Playground)", "Overlays"]
        );
    }

    #[test]
    fn help_entries_no_duplicates_or_blank_rows() {
        let km = KeyMap::default();
        for (_, entries) in km.help_entries() {
            let mut seen = std::collections::HashSet::new();
            for e in &entries {
                assert!(!e.label.is_empty());
                assert!(seen.insert(e.label), "duplicate help label: {:?}", e.label);
            }
        }
    }

    #[test]
    fn no_key_is_bound_twice() {
        let km = KeyMap::default();
        let mut seen = std::collections::HashSet::new();
        for kb in &km.bindings {
            assert!(
                seen.insert((kb.code, kb.modifiers)),
                "{:?}+{:?} bound twice",
                kb.modifiers,
                kb.code
            );
        }
    }
}
