use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::projector::summarize;
use crate::store::{PROJECTS, Project, TaskFilter, ViewType, boot_log};

use super::app::{App, PaletteMode};
use super::form::{render_hints, render_modal};

const SIDEBAR_WIDTH: u16 = 24;

/// Draw one frame. Overlays stack palette, then quick-create, then toast,
/// then help on top.
pub fn draw(frame: &mut Frame, app: &App) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    draw_title_bar(frame, app, outer[0]);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(outer[1]);

    draw_sidebar(frame, app, main[0]);
    draw_content(frame, app, main[1]);
    draw_status_bar(frame, app, outer[2]);

    if app.store.is_command_palette_open() {
        draw_command_palette(frame, app);
    }
    if app.store.is_quick_create_open() {
        draw_quick_create(frame, app);
    }
    if let Some(message) = app.store.toast_message() {
        draw_toast(frame, app, message);
    }
    if app.show_help {
        draw_help(frame, app);
    }
}

fn draw_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(" digital8 ", app.theme.accent_bold()),
        Span::styled(
            concat!("v", env!("DIGITAL8_VERSION")),
            app.theme.secondary(),
        ),
        Span::raw("   "),
        Span::styled(
            "c:create  Ctrl+K:palette  ?:help  q:quit",
            app.theme.secondary(),
        ),
    ]);
    frame.render_widget(Paragraph::new(title), area);
}

fn draw_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.store.current_view();
    let items: Vec<ListItem> = ViewType::ALL
        .iter()
        .enumerate()
        .map(|(i, &view)| {
            let style = if view == current {
                app.theme.active_item_style()
            } else {
                app.theme.inactive_item_style()
            };
            let mut spans = vec![Span::styled(format!(" {} {} ", i + 1, view.label()), style)];
            if view == ViewType::Playground {
                spans.push(Span::styled(
                    format!(" {}", app.visible_tasks().len()),
                    Style::default().fg(app.theme.badge),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let block = Block::default()
        .title(Span::styled(" Digital8 ", app.theme.accent_bold()))
        .borders(Borders::ALL)
        .border_style(app.theme.unfocused_border());
    frame.render_widget(List::new(items).block(block), area);
}

fn draw_content(frame: &mut Frame, app: &App, area: Rect) {
    let view = app.store.current_view();
    // The dark-mode flourish lights up the main frame.
    let border_style = if app.store.is_flourish_active() {
        app.theme.flourish_border()
    } else {
        app.theme.focused_border()
    };
    let block = Block::default()
        .title(format!(" {} ", view.title()))
        .borders(Borders::ALL)
        .border_style(border_style);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    match view {
        ViewType::Overview => draw_overview(frame, app, inner),
        ViewType::Playground => draw_playground(frame, app, inner),
        ViewType::Projects => match app.store.selected_project() {
            Some(project) => draw_project_detail(frame, app, project, inner),
            None => draw_project_list(frame, app, inner),
        },
    }
}

// ── Overview ──────────────────────────────────────────────────────────

fn draw_overview(frame: &mut Frame, app: &App, area: Rect) {
    let counts = summarize(app.store.tasks());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(7),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            " Quick Overview",
            app.theme.accent_bold(),
        ))),
        chunks[0],
    );

    let stat = |label: &'static str, value: usize, style: Style| {
        Line::from(vec![
            Span::styled(format!("  {label:<14}"), app.theme.secondary()),
            Span::styled(value.to_string(), style),
        ])
    };
    let lines = vec![
        stat("Total", counts.total, Style::default().fg(app.theme.text_primary)),
        stat("Open", counts.open(), Style::default().fg(app.theme.text_primary)),
        stat("In progress", counts.in_progress, Style::default().fg(app.theme.status_in_progress)),
        stat("Todo", counts.todo, Style::default().fg(app.theme.status_todo)),
        stat("Backlog", counts.backlog, Style::default().fg(app.theme.status_backlog)),
        stat("Done", counts.done, Style::default().fg(app.theme.status_done)),
        stat("Urgent", counts.urgent, Style::default().fg(app.theme.priority_urgent)),
    ];
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    let gauge_area = Rect {
        x: chunks[3].x + 2,
        width: chunks[3].width.saturating_sub(4),
        ..chunks[3]
    };
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(app.theme.accent))
        .percent(counts.completion_pct())
        .label(format!("{}% complete", counts.completion_pct()));
    frame.render_widget(gauge, gauge_area);

    let hint = Paragraph::new(vec![
        Line::raw(""),
        Line::from(Span::styled(
            "  Press 2 for the playground, 3 for projects, Ctrl+K for commands.",
            app.theme.secondary(),
        )),
    ])
    .wrap(Wrap { trim: false });
    frame.render_widget(hint, chunks[4]);
}

// ── Playground ────────────────────────────────────────────────────────

fn draw_playground(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0)])
        .split(area);

    draw_filter_bar(frame, app, chunks[0]);

    let tasks = app.visible_tasks();
    if tasks.is_empty() {
        let message = if app.store.tasks().is_empty() {
            "No tasks yet. Press c or Ctrl+K to create one."
        } else {
            "No tasks match the current filter."
        };
        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {message}"), app.theme.secondary())),
            chunks[1],
        );
        return;
    }

    let items: Vec<ListItem> = tasks
        .iter()
        .enumerate()
        .map(|(i, task)| {
            let selected = i == app.task_index;
            let indicator = if selected { "▸ " } else { "  " };
            let (symbol, symbol_style) = if app.completing.contains_key(&task.id) {
                ("◉", app.theme.completing_style())
            } else {
                (task.status.symbol(), app.theme.task_status_style(task.status))
            };
            let mut title_style = app.theme.task_title_style(task.status);
            if selected {
                title_style = title_style.add_modifier(Modifier::BOLD);
            }
            ListItem::new(Line::from(vec![
                Span::styled(indicator, Style::default().fg(app.theme.selection_indicator)),
                Span::styled(format!("{symbol} "), symbol_style),
                Span::styled(task.title.as_str(), title_style),
                Span::raw("  "),
                Span::styled(
                    format!("{} {}", task.priority.symbol(), task.priority.label()),
                    app.theme.priority_style(task.priority),
                ),
            ]))
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(app.task_index));
    frame.render_stateful_widget(List::new(items), chunks[1], &mut state);
}

fn draw_filter_bar(frame: &mut Frame, app: &App, area: Rect) {
    let current = app.store.filter();
    let mut spans = vec![Span::raw(" ")];
    for filter in TaskFilter::ALL {
        let style = if filter == current {
            app.theme.active_item_style()
        } else {
            app.theme.inactive_item_style()
        };
        spans.push(Span::styled(format!(" {} ", filter.label()), style));
        spans.push(Span::raw(" "));
    }

    let query = app.store.search_query().trim();
    if !query.is_empty() {
        spans.push(Span::styled("  search: ", app.theme.secondary()));
        spans.push(Span::styled(query, app.theme.accent_bold()));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

// ── Projects ──────────────────────────────────────────────────────────

fn draw_project_list(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = PROJECTS
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let selected = i == app.project_index;
            let indicator = if selected { "▸ " } else { "  " };
            let name_style = if selected {
                app.theme.accent_bold()
            } else {
                Style::default().fg(app.theme.text_primary)
            };
            let mut spans = vec![
                Span::styled(indicator, Style::default().fg(app.theme.selection_indicator)),
                Span::styled(project.name, name_style),
            ];
            if let Some(domain) = project.domain {
                spans.push(Span::styled(format!("  {domain}"), app.theme.secondary()));
            }
            ListItem::new(vec![
                Line::from(spans),
                Line::from(Span::styled(
                    format!("    {}", project.description),
                    app.theme.secondary(),
                )),
            ])
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(app.project_index));
    frame.render_stateful_widget(List::new(items), area, &mut state);
}

fn draw_project_detail(frame: &mut Frame, app: &App, project: &Project, area: Rect) {
    let mut lines = vec![
        Line::from(Span::styled(format!(" {}", project.name), app.theme.accent_bold())),
    ];
    if let Some(domain) = project.domain {
        lines.push(Line::from(Span::styled(format!(" {domain}"), app.theme.secondary())));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(format!(" {}", project.description)));
    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::styled(" Status: ", app.theme.secondary()),
        Span::styled(
            project.status.as_str(),
            app.theme.project_status_style(project.status),
        ),
    ]));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(" Tech Stack", app.theme.secondary())));
    lines.push(Line::from(
        project
            .tech_stack
            .iter()
            .flat_map(|tech| {
                [
                    Span::raw(" "),
                    Span::styled(format!("[{tech}]"), Style::default().fg(app.theme.accent)),
                ]
            })
            .collect::<Vec<_>>(),
    ));
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(" Esc: back to projects", app.theme.secondary())));

    let log = boot_log(project.domain);
    let log_height = u16::try_from(log.len()).unwrap_or(u16::MAX).saturating_add(2);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(log_height)])
        .split(area);

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);

    let log_lines: Vec<Line> = log
        .into_iter()
        .map(|line| Line::from(Span::styled(format!(" {line}"), app.theme.secondary())))
        .collect();
    let terminal = Block::default()
        .title(Span::styled(" System Terminal ", app.theme.accent_bold()))
        .borders(Borders::ALL)
        .border_style(app.theme.unfocused_border());
    frame.render_widget(Paragraph::new(log_lines).block(terminal), chunks[1]);
}

// ── Status bar ────────────────────────────────────────────────────────

fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let hints: &[(&str, &str)] = match app.store.current_view() {
        ViewType::Playground => &[
            (" j/k", ":move  "),
            ("Space", ":done  "),
            ("s", ":status  "),
            ("p", ":priority  "),
            ("Bksp", ":delete  "),
            ("a/u/t/d", ":filter  "),
            ("/", ":search"),
        ],
        ViewType::Projects if app.store.selected_project().is_some() => &[(" Esc", ":back")],
        ViewType::Projects => &[(" j/k", ":move  "), ("Enter", ":open")],
        ViewType::Overview => &[(" 1/2/3", ":views  "), ("c", ":create")],
    };
    render_hints(
        frame,
        area,
        hints,
        Style::default().fg(app.theme.accent),
        app.theme.secondary(),
    );
}

// ── Overlays ──────────────────────────────────────────────────────────

fn draw_command_palette(frame: &mut Frame, app: &App) {
    let palette = &app.palette;
    let rows = match palette.mode {
        PaletteMode::Commands => palette.filtered.len().max(1),
        PaletteMode::CreateTask => 1,
    };
    let height = u16::try_from(rows).unwrap_or(u16::MAX).saturating_add(4);
    let top = frame.area().height / 5;
    let inner = render_modal(
        frame,
        " Command Palette ",
        Style::default().fg(app.theme.palette_border),
        60,
        height,
        Some(top),
    );
    if inner.height < 2 {
        return;
    }

    let input_area = Rect::new(inner.x, inner.y, inner.width, 1);
    let input_line = match palette.mode {
        PaletteMode::Commands => Line::from(vec![
            Span::styled("> ", app.theme.accent_bold()),
            Span::raw(palette.input.display()),
        ]),
        PaletteMode::CreateTask => Line::from(vec![
            Span::styled("+ ", app.theme.accent_bold()),
            Span::raw(palette.title.display()),
        ]),
    };
    frame.render_widget(Paragraph::new(input_line), input_area);

    let body = Rect::new(
        inner.x,
        inner.y + 2,
        inner.width,
        inner.height.saturating_sub(2),
    );

    if palette.mode == PaletteMode::CreateTask {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "Enter to create · Esc to go back",
                app.theme.secondary(),
            )),
            body,
        );
        return;
    }

    if palette.filtered.is_empty() {
        frame.render_widget(
            Paragraph::new(Span::styled(
                "No matching commands. Enter searches tasks.",
                app.theme.secondary(),
            )),
            body,
        );
        return;
    }

    let items: Vec<ListItem> = palette
        .visible()
        .enumerate()
        .map(|(i, item)| {
            let style = if i == palette.index {
                app.theme.accent_bold()
            } else {
                Style::default().fg(app.theme.text_primary)
            };
            let prefix = if i == palette.index { "▸ " } else { "  " };
            let mut spans = vec![Span::styled(prefix, style), Span::styled(item.label, style)];
            if let Some(hint) = item.hint {
                spans.push(Span::styled(format!("  {hint}"), app.theme.secondary()));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(palette.index));
    frame.render_stateful_widget(List::new(items), body, &mut state);
}

fn draw_quick_create(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let height = 5;
    let top = area.height.saturating_sub(height + 1);
    let mut border = Style::default().fg(app.theme.quick_create_border);
    if app.quick_create_success.is_active() {
        border = border.add_modifier(Modifier::BOLD);
    }
    let inner = render_modal(frame, " Quick Create ", border, 70, height, Some(top));
    if inner.height < 2 {
        return;
    }

    let input = if app.quick_create_success.is_active() {
        Line::from(Span::styled("✓ Task created", app.theme.accent_bold()))
    } else if app.quick_create.is_empty() {
        Line::from(vec![
            Span::raw(app.quick_create.display()),
            Span::styled(" What needs to be done?", app.theme.secondary()),
        ])
    } else {
        Line::from(Span::raw(app.quick_create.display()))
    };
    frame.render_widget(
        Paragraph::new(input),
        Rect::new(inner.x, inner.y, inner.width, 1),
    );

    render_hints(
        frame,
        Rect::new(inner.x, inner.y + 2, inner.width, 1),
        &[("Enter", " to create · "), ("Esc", " to cancel")],
        Style::default().fg(app.theme.accent),
        app.theme.secondary(),
    );
}

fn draw_toast(frame: &mut Frame, app: &App, message: &str) {
    let area = frame.area();
    let width = u16::try_from(message.chars().count())
        .unwrap_or(u16::MAX)
        .saturating_add(4)
        .min(area.width);
    let toast_area = Rect::new(
        area.width.saturating_sub(width + 1),
        area.height.saturating_sub(4),
        width,
        3.min(area.height),
    );
    frame.render_widget(Clear, toast_area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.theme.unfocused_border());
    frame.render_widget(
        Paragraph::new(Span::styled(message, app.theme.toast_style())).block(block),
        toast_area,
    );
}

fn draw_help(frame: &mut Frame, app: &App) {
    let sections = app.keymap.help_entries();
    let mut lines: Vec<Line> = Vec::new();
    for (category, entries) in &sections {
        if !lines.is_empty() {
            lines.push(Line::raw(""));
        }
        lines.push(Line::from(Span::styled(*category, app.theme.accent_bold())));
        for entry in entries {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<14}", entry.label),
                    Style::default().fg(app.theme.text_primary),
                ),
                Span::styled(entry.description, app.theme.secondary()),
            ]));
        }
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        app.theme.secondary(),
    )));

    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let inner = render_modal(
        frame,
        " Keyboard Shortcuts ",
        app.theme.focused_border(),
        56,
        height,
        None,
    );
    frame.render_widget(Paragraph::new(lines), inner);
}
