use ratatui::style::{Color, Modifier, Style};
use serde::Deserialize;

use crate::store::{ProjectStatus, TaskPriority, TaskStatus};

/// Digital8's signature neon yellow.
pub const NEON: Color = Color::Rgb(226, 255, 59);

/// Semantic colour theme for the entire TUI.
///
/// Every colour used by the renderer is stored here so the user can
/// override any of them via `[theme]` in `config.toml`.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Borders ───────────────────────────────────────────────
    pub border_focused: Color,
    pub border_unfocused: Color,

    // ── Text ──────────────────────────────────────────────────
    pub text_primary: Color,
    pub text_secondary: Color,
    pub accent: Color,

    // ── Task status ───────────────────────────────────────────
    pub status_backlog: Color,
    pub status_todo: Color,
    pub status_in_progress: Color,
    pub status_done: Color,

    // ── Priority ──────────────────────────────────────────────
    pub priority_urgent: Color,
    pub priority_high: Color,
    pub priority_medium: Color,
    pub priority_low: Color,

    // ── Overlays ──────────────────────────────────────────────
    pub palette_border: Color,
    pub quick_create_border: Color,
    pub toast: Color,
    pub flourish: Color,

    // ── Misc ──────────────────────────────────────────────────
    pub selection_indicator: Color,
    pub badge: Color,
    pub project_operational: Color,
    pub project_development: Color,
    pub project_maintenance: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border_focused: NEON,
            border_unfocused: Color::DarkGray,

            text_primary: Color::White,
            text_secondary: Color::DarkGray,
            accent: NEON,

            status_backlog: Color::DarkGray,
            status_todo: Color::Gray,
            status_in_progress: NEON,
            status_done: Color::Green,

            priority_urgent: NEON,
            priority_high: Color::White,
            priority_medium: Color::Gray,
            priority_low: Color::DarkGray,

            palette_border: NEON,
            quick_create_border: NEON,
            toast: Color::Gray,
            flourish: NEON,

            selection_indicator: NEON,
            badge: Color::DarkGray,
            project_operational: Color::Green,
            project_development: Color::Yellow,
            project_maintenance: Color::Magenta,
        }
    }
}

impl Theme {
    /// Style for a focused panel border.
    pub fn focused_border(&self) -> Style {
        Style::default().fg(self.border_focused)
    }

    /// Style for an unfocused panel border.
    pub fn unfocused_border(&self) -> Style {
        Style::default().fg(self.border_unfocused)
    }

    pub fn secondary(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn accent_bold(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD)
    }

    pub fn task_status_style(&self, status: TaskStatus) -> Style {
        let color = match status {
            TaskStatus::Backlog => self.status_backlog,
            TaskStatus::Todo => self.status_todo,
            TaskStatus::InProgress => self.status_in_progress,
            TaskStatus::Done => self.status_done,
        };
        Style::default().fg(color)
    }

    pub fn priority_style(&self, priority: TaskPriority) -> Style {
        match priority {
            TaskPriority::Urgent => Style::default()
                .fg(self.priority_urgent)
                .add_modifier(Modifier::BOLD),
            TaskPriority::High => Style::default().fg(self.priority_high),
            TaskPriority::Medium => Style::default().fg(self.priority_medium),
            TaskPriority::Low | TaskPriority::None => Style::default().fg(self.priority_low),
        }
    }

    /// Title style for a task row; done tasks are struck through.
    pub fn task_title_style(&self, status: TaskStatus) -> Style {
        if status == TaskStatus::Done {
            Style::default()
                .fg(self.text_secondary)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(self.text_primary)
        }
    }

    /// Pulse shown on a row while its completion is pending.
    pub fn completing_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD | Modifier::SLOW_BLINK)
    }

    pub fn project_status_style(&self, status: ProjectStatus) -> Style {
        let color = match status {
            ProjectStatus::Operational => self.project_operational,
            ProjectStatus::Development => self.project_development,
            ProjectStatus::Maintenance => self.project_maintenance,
        };
        Style::default().fg(color)
    }

    /// Style for the active sidebar entry / filter chip.
    pub fn active_item_style(&self) -> Style {
        Style::default()
            .fg(self.accent)
            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
    }

    pub fn inactive_item_style(&self) -> Style {
        Style::default().fg(self.text_secondary)
    }

    pub fn toast_style(&self) -> Style {
        Style::default().fg(self.toast)
    }

    pub fn flourish_border(&self) -> Style {
        Style::default()
            .fg(self.flourish)
            .add_modifier(Modifier::BOLD)
    }
}

// ── Config deserialization ────────────────────────────────────────────

/// All-optional mirror of [`Theme`] for the `[theme]` section of `config.toml`.
///
/// Only `Some` fields override the default; everything else keeps its default.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct ThemeConfig {
    pub border_focused: Option<String>,
    pub border_unfocused: Option<String>,

    pub text_primary: Option<String>,
    pub text_secondary: Option<String>,
    pub accent: Option<String>,

    pub status_backlog: Option<String>,
    pub status_todo: Option<String>,
    pub status_in_progress: Option<String>,
    pub status_done: Option<String>,

    pub priority_urgent: Option<String>,
    pub priority_high: Option<String>,
    pub priority_medium: Option<String>,
    pub priority_low: Option<String>,

    pub palette_border: Option<String>,
    pub quick_create_border: Option<String>,
    pub toast: Option<String>,
    pub flourish: Option<String>,

    pub selection_indicator: Option<String>,
    pub badge: Option<String>,
    pub project_operational: Option<String>,
    pub project_development: Option<String>,
    pub project_maintenance: Option<String>,
}

/// Parse a colour string into a ratatui `Color`.
///
/// Supports named colours (`"cyan"`, `"dark_gray"`, ...), `"#RRGGBB"` and
/// `"rgb(R,G,B)"`.
fn parse_color(s: &str) -> Option<Color> {
    let s = s.trim();
    if let Some(hex) = s.strip_prefix('#') {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        return Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?));
    }

    if let Some(inner) = s.strip_prefix("rgb(").and_then(|r| r.strip_suffix(')')) {
        let channels: Vec<u8> = inner
            .split(',')
            .map(|part| part.trim().parse::<u8>().ok())
            .collect::<Option<_>>()?;
        return match channels[..] {
            [r, g, b] => Some(Color::Rgb(r, g, b)),
            _ => None,
        };
    }

    match s.to_lowercase().replace(['-', '_'], "").as_str() {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "gray" | "grey" => Some(Color::Gray),
        "darkgray" | "darkgrey" => Some(Color::DarkGray),
        "lightred" => Some(Color::LightRed),
        "lightgreen" => Some(Color::LightGreen),
        "lightyellow" => Some(Color::LightYellow),
        "lightblue" => Some(Color::LightBlue),
        "lightmagenta" => Some(Color::LightMagenta),
        "lightcyan" => Some(Color::LightCyan),
        "white" => Some(Color::White),
        "neon" => Some(NEON),
        _ => None,
    }
}

/// Overwrite `target` when `source` names a valid colour.
fn apply(target: &mut Color, source: Option<&String>) {
    if let Some(s) = source {
        match parse_color(s) {
            Some(color) => *target = color,
            None => tracing::warn!("ignoring unknown theme colour '{s}'"),
        }
    }
}

impl ThemeConfig {
    /// Build a `Theme` starting from defaults, overriding any fields that were
    /// set in the config file.
    pub fn build(&self) -> Theme {
        let mut t = Theme::default();

        apply(&mut t.border_focused, self.border_focused.as_ref());
        apply(&mut t.border_unfocused, self.border_unfocused.as_ref());
        apply(&mut t.text_primary, self.text_primary.as_ref());
        apply(&mut t.text_secondary, self.text_secondary.as_ref());
        apply(&mut t.accent, self.accent.as_ref());
        apply(&mut t.status_backlog, self.status_backlog.as_ref());
        apply(&mut t.status_todo, self.status_todo.as_ref());
        apply(&mut t.status_in_progress, self.status_in_progress.as_ref());
        apply(&mut t.status_done, self.status_done.as_ref());
        apply(&mut t.priority_urgent, self.priority_urgent.as_ref());
        apply(&mut t.priority_high, self.priority_high.as_ref());
        apply(&mut t.priority_medium, self.priority_medium.as_ref());
        apply(&mut t.priority_low, self.priority_low.as_ref());
        apply(&mut t.palette_border, self.palette_border.as_ref());
        apply(
            &mut t.quick_create_border,
            self.quick_create_border.as_ref(),
        );
        apply(&mut t.toast, self.toast.as_ref());
        apply(&mut t.flourish, self.flourish.as_ref());
        apply(
            &mut t.selection_indicator,
            self.selection_indicator.as_ref(),
        );
        apply(&mut t.badge, self.badge.as_ref());
        apply(
            &mut t.project_operational,
            self.project_operational.as_ref(),
        );
        apply(
            &mut t.project_development,
            self.project_development.as_ref(),
        );
        apply(
            &mut t.project_maintenance,
            self.project_maintenance.as_ref(),
        );

        t
    }
}
