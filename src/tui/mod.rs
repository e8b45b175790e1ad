mod app;
mod event;
mod form;
mod keymap;
pub mod theme;
mod timers;
mod ui;

use anyhow::Result;

use crate::config::Config;
use crate::store::TaskStore;

/// Run the dashboard until the user quits. The terminal is restored even
/// when the loop fails.
pub fn run(store: TaskStore, config: &Config) -> Result<()> {
    let mut terminal = ratatui::init();
    let mut app = app::App::new(store, config);
    tracing::info!("dashboard started");
    let result = app.run(&mut terminal);
    ratatui::restore();
    result
}
