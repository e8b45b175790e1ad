use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Backlog,
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Backlog,
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "backlog",
            TaskStatus::Todo => "todo",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "Backlog",
            TaskStatus::Todo => "Todo",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            TaskStatus::Backlog => "◌",
            TaskStatus::Todo => "○",
            TaskStatus::InProgress => "◐",
            TaskStatus::Done => "✓",
        }
    }

    /// Next status in board order, wrapping from done back to backlog.
    pub fn cycle(&self) -> Self {
        match self {
            TaskStatus::Backlog => TaskStatus::Todo,
            TaskStatus::Todo => TaskStatus::InProgress,
            TaskStatus::InProgress => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Backlog,
        }
    }

    /// Status after clicking the row's checkbox: done goes back to todo,
    /// everything else completes.
    pub fn toggled(&self) -> Self {
        match self {
            TaskStatus::Done => TaskStatus::Todo,
            _ => TaskStatus::Done,
        }
    }
}

impl FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "backlog" => Ok(TaskStatus::Backlog),
            "todo" => Ok(TaskStatus::Todo),
            "in_progress" => Ok(TaskStatus::InProgress),
            "done" => Ok(TaskStatus::Done),
            other => Err(format!(
                "unknown status '{other}' (expected backlog, todo, in_progress or done)"
            )),
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    None,
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    pub const ALL: [TaskPriority; 5] = [
        TaskPriority::None,
        TaskPriority::Low,
        TaskPriority::Medium,
        TaskPriority::High,
        TaskPriority::Urgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::None => "none",
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskPriority::None => "No priority",
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
            TaskPriority::Urgent => "Urgent",
        }
    }

    /// Signal-bar glyph; `None` renders as blank space to keep columns aligned.
    pub fn symbol(&self) -> &'static str {
        match self {
            TaskPriority::None => " ",
            TaskPriority::Low => "▂",
            TaskPriority::Medium => "▄",
            TaskPriority::High => "▆",
            TaskPriority::Urgent => "!",
        }
    }

    pub fn cycle(&self) -> Self {
        match self {
            TaskPriority::None => TaskPriority::Low,
            TaskPriority::Low => TaskPriority::Medium,
            TaskPriority::Medium => TaskPriority::High,
            TaskPriority::High => TaskPriority::Urgent,
            TaskPriority::Urgent => TaskPriority::None,
        }
    }
}

impl FromStr for TaskPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" | "no-priority" | "no_priority" => Ok(TaskPriority::None),
            "low" => Ok(TaskPriority::Low),
            "medium" => Ok(TaskPriority::Medium),
            "high" => Ok(TaskPriority::High),
            "urgent" => Ok(TaskPriority::Urgent),
            other => Err(format!(
                "unknown priority '{other}' (expected none, low, medium, high or urgent)"
            )),
        }
    }
}

impl fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
}

/// Display predicate for the task list. Never changes the collection itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskFilter {
    #[default]
    All,
    Urgent,
    Todo,
    Done,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 4] = [
        TaskFilter::All,
        TaskFilter::Urgent,
        TaskFilter::Todo,
        TaskFilter::Done,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskFilter::All => "all",
            TaskFilter::Urgent => "urgent",
            TaskFilter::Todo => "todo",
            TaskFilter::Done => "done",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TaskFilter::All => "All",
            TaskFilter::Urgent => "Urgent",
            TaskFilter::Todo => "Todo",
            TaskFilter::Done => "Done",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            TaskFilter::All => true,
            TaskFilter::Urgent => task.priority == TaskPriority::Urgent,
            TaskFilter::Todo => task.status == TaskStatus::Todo,
            TaskFilter::Done => task.status == TaskStatus::Done,
        }
    }
}

impl FromStr for TaskFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(TaskFilter::All),
            "urgent" => Ok(TaskFilter::Urgent),
            "todo" => Ok(TaskFilter::Todo),
            "done" => Ok(TaskFilter::Done),
            other => Err(format!(
                "unknown filter '{other}' (expected all, urgent, todo or done)"
            )),
        }
    }
}

/// Top-level screen selected in the sidebar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewType {
    #[default]
    Overview,
    Playground,
    Projects,
}

impl ViewType {
    pub const ALL: [ViewType; 3] = [ViewType::Overview, ViewType::Playground, ViewType::Projects];

    pub fn as_str(&self) -> &'static str {
        match self {
            ViewType::Overview => "overview",
            ViewType::Playground => "playground",
            ViewType::Projects => "projects",
        }
    }

    /// Sidebar label.
    pub fn label(&self) -> &'static str {
        match self {
            ViewType::Overview => "Overview",
            ViewType::Playground => "Playground",
            ViewType::Projects => "Projects",
        }
    }

    /// Heading shown above the view body.
    pub fn title(&self) -> &'static str {
        match self {
            ViewType::Overview => "Welcome",
            ViewType::Playground => "Playground",
            ViewType::Projects => "Engineering Portfolio",
        }
    }
}
