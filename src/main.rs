use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use digital8::config::{self, Config};
use digital8::ids::UuidIds;
use digital8::logging;
use digital8::projector::{project, summarize};
use digital8::storage::Storage;
use digital8::store::{Task, TaskFilter, TaskPriority, TaskStatus, TaskStore, bundle};
use digital8::tui;

#[derive(Parser)]
#[command(
    name = "digital8",
    version = env!("DIGITAL8_VERSION"),
    about = "Digital8 OS task board for the terminal"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the TUI dashboard (default)
    Dashboard,
    /// Create ~/.digital8 and seed the board
    Init,
    /// Add a task to the top of the board
    Add {
        /// Task title
        title: String,
    },
    /// List tasks
    List {
        /// all, urgent, todo or done
        #[arg(short, long, default_value = "all")]
        filter: TaskFilter,
        /// Case-insensitive title search
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Set a task's status
    Status {
        /// Task id or unique prefix
        id: String,
        /// backlog, todo, in_progress or done
        status: TaskStatus,
    },
    /// Set a task's priority
    Priority {
        /// Task id or unique prefix
        id: String,
        /// none, low, medium, high or urgent
        priority: TaskPriority,
    },
    /// Toggle a task between done and todo
    Toggle {
        /// Task id or unique prefix
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task id or unique prefix
        id: String,
    },
    /// Replace the board with the seed tasks and default filter/view
    Reset,
    /// Export the persisted board as JSON
    Export {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    config::ensure_dirs()?;
    logging::init(&config::log_path()?)?;
    let cfg = config::load()?;

    match cli.command.unwrap_or(Commands::Dashboard) {
        Commands::Dashboard => {
            let store = open_store(&cfg)?;
            tui::run(store, &cfg)
        }
        Commands::Init => {
            let store = open_store(&cfg)?;
            println!(
                "digital8 initialized at {} ({} tasks)",
                config::base_dir()?.display(),
                store.tasks().len()
            );
            Ok(())
        }
        Commands::Add { title } => {
            let mut store = open_store(&cfg)?;
            let Some(task) = store.create_task(&title) else {
                bail!("task title cannot be empty");
            };
            println!("Created task '{}' ({})", task.title, short_id(&task.id));
            Ok(())
        }
        Commands::List { filter, search } => {
            let store = open_store(&cfg)?;
            let tasks = project(store.tasks(), filter, &search);
            if tasks.is_empty() {
                println!("No tasks match.");
            } else {
                for t in &tasks {
                    println!(
                        "  {} {}  {} [{}] ({})",
                        t.status.symbol(),
                        short_id(&t.id),
                        t.title,
                        t.status.as_str(),
                        t.priority.as_str(),
                    );
                }
            }
            let counts = summarize(store.tasks());
            println!(
                "\n  {} shown, {} total: {} open, {} done, {} urgent ({}% complete)",
                tasks.len(),
                counts.total,
                counts.open(),
                counts.done,
                counts.urgent,
                counts.completion_pct(),
            );
            if let Some(saved) = store.storage().updated_at(bundle::STORAGE_KEY)? {
                println!("  last saved {saved}");
            }
            Ok(())
        }
        Commands::Status { id, status } => {
            let mut store = open_store(&cfg)?;
            let task = find_task_by_prefix(&store, &id)?.clone();
            store.update_task_status(&task.id, status);
            println!("'{}' is now {}", task.title, status.label());
            Ok(())
        }
        Commands::Priority { id, priority } => {
            let mut store = open_store(&cfg)?;
            let task = find_task_by_prefix(&store, &id)?.clone();
            store.set_task_priority(&task.id, priority);
            println!("'{}' priority set to {}", task.title, priority.label());
            Ok(())
        }
        Commands::Toggle { id } => {
            let mut store = open_store(&cfg)?;
            let task = find_task_by_prefix(&store, &id)?.clone();
            if let Some(status) = store.toggle_task_done(&task.id) {
                println!("'{}' is now {}", task.title, status.label());
            }
            Ok(())
        }
        Commands::Delete { id } => {
            let mut store = open_store(&cfg)?;
            let task = find_task_by_prefix(&store, &id)?.clone();
            store.delete_task(&task.id);
            println!("Deleted '{}'", task.title);
            Ok(())
        }
        Commands::Reset => {
            let mut store = open_store(&cfg)?;
            store.reset();
            println!("Board reset to {} seed tasks", store.tasks().len());
            Ok(())
        }
        Commands::Export { output } => {
            let store = open_store(&cfg)?;
            let raw = bundle::encode(store.tasks(), store.filter(), store.current_view())?;
            let mut export: serde_json::Value =
                serde_json::from_str(&raw).context("failed to re-read encoded bundle")?;
            export["exported_at"] = serde_json::json!(chrono::Utc::now().to_rfc3339());
            let json = serde_json::to_string_pretty(&export)?;

            match output {
                Some(path) => {
                    fs::write(&path, &json)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    println!(
                        "Exported {} tasks to {}",
                        store.tasks().len(),
                        path.display()
                    );
                }
                None => println!("{json}"),
            }
            Ok(())
        }
    }
}

fn open_store(cfg: &Config) -> Result<TaskStore> {
    let storage = Storage::open()?;
    Ok(TaskStore::load_with(
        storage,
        Box::new(UuidIds),
        cfg.seed_on_empty,
    ))
}

/// First eight characters, enough to address a task from the command line.
fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

/// Resolve a full id or a unique id prefix.
fn find_task_by_prefix<'a>(store: &'a TaskStore, prefix: &str) -> Result<&'a Task> {
    if let Some(task) = store.task(prefix) {
        return Ok(task);
    }
    let mut matches = store.tasks().iter().filter(|t| t.id.starts_with(prefix));
    match (matches.next(), matches.next()) {
        (Some(task), None) if !prefix.is_empty() => Ok(task),
        (None, _) => bail!("no task with id '{prefix}'"),
        _ => bail!("task id '{prefix}' is ambiguous; use more characters"),
    }
}
