//! UI rendering for the TUI

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{BarChart, Block, Borders, Cell, Clear, Paragraph, Row, Table, Wrap},
    Frame,
};

use super::app::App;
use super::components::{button_label, centered_rect, status_badge, truncate, MetricCard, Palette};
use super::pages::{ActionCard, ProfileRow, ReportFormField, SettingsRow, BILLING_CARDS, TEAM_CARDS};
use crate::actions::ActionKind;
use crate::export::ExportTarget;
use crate::notify::Level;
use crate::roster::{FormField, SortDirection, SortField};
use crate::settings::NotificationKey;
use crate::shell::Route;

/// Draw the entire UI
pub fn draw(frame: &mut Frame, app: &App) {
    let palette = Palette::for_theme(app.shell.theme);
    frame.render_widget(
        Block::default().style(Style::default().bg(palette.surface).fg(palette.text)),
        frame.size(),
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(10),   // Sidebar + page
            Constraint::Length(1), // Status bar
        ])
        .split(frame.size());

    draw_header(frame, app, &palette, chunks[0]);

    let body = if app.shell.sidebar_open {
        let split = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(22), Constraint::Min(40)])
            .split(chunks[1]);
        draw_sidebar(frame, app, &palette, split[0]);
        split[1]
    } else {
        chunks[1]
    };

    draw_page(frame, app, &palette, body);
    draw_status_bar(frame, app, &palette, chunks[2]);

    if app.shell.mobile_menu_open {
        draw_account_menu(frame, app, &palette);
    }
    if app.client_form.is_open() {
        draw_client_form(frame, app, &palette);
    }
    if app.report_form.is_some() {
        draw_report_form(frame, app, &palette);
    }
    if app.prompt.is_some() {
        draw_prompt(frame, app, &palette);
    }
    if app.show_help {
        draw_help_overlay(frame, &palette);
    }
}

fn draw_header(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Min(20),
            Constraint::Length(32),
        ])
        .split(area);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(palette.muted));

    let logo = Paragraph::new("◆ AdminHub")
        .style(Style::default().fg(palette.primary).bold())
        .block(block.clone());
    frame.render_widget(logo, chunks[0]);

    let title = Paragraph::new(app.shell.route().title())
        .style(Style::default().fg(palette.text).bold())
        .block(block.clone());
    frame.render_widget(title, chunks[1]);

    let theme = if app.shell.theme.is_dark() { "☾ dark" } else { "☀ light" };
    let account = Line::from(vec![
        Span::styled(theme, Style::default().fg(palette.muted)),
        Span::raw("  "),
        Span::styled("JD John Doe ▾", Style::default().fg(palette.accent)),
    ]);
    let account = Paragraph::new(account)
        .alignment(Alignment::Right)
        .block(block);
    frame.render_widget(account, chunks[2]);
}

fn draw_sidebar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let current = app.shell.route();
    let mut lines = vec![Line::from("")];

    for route in Route::SIDEBAR {
        let key = Route::ALL.iter().position(|r| *r == route).map_or(0, |i| i + 1);
        let style = if route == current {
            Style::default().fg(palette.primary).add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default().fg(palette.text)
        };
        lines.push(Line::from(Span::styled(format!(" {key}  {:<14}", route.title()), style)));
    }

    let sidebar = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::RIGHT)
            .border_style(Style::default().fg(palette.muted)),
    );
    frame.render_widget(sidebar, area);
}

fn draw_page(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    match app.shell.route() {
        Route::Dashboard => draw_dashboard(frame, app, palette, area),
        Route::Clients => draw_clients(frame, app, palette, area),
        Route::Reports => draw_reports(frame, app, palette, area),
        Route::Settings => draw_settings(frame, app, palette, area),
        Route::Profile => draw_profile(frame, app, palette, area),
        Route::Billing => {
            draw_cards(frame, app, palette, area, &BILLING_CARDS, app.billing_selected);
        }
        Route::Team => draw_cards(frame, app, palette, area, &TEAM_CARDS, app.team_selected),
        Route::NotFound => draw_not_found(frame, palette, area),
    }
}

fn draw_dashboard(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(4), Constraint::Min(8)])
        .split(area);

    let metrics = &app.dashboard.metrics;
    let card_areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, metrics.len().max(1) as u32); metrics.len()])
        .split(chunks[0]);
    for (metric, card_area) in metrics.iter().zip(card_areas.iter()) {
        MetricCard::new(metric, *palette).render(frame, *card_area);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let growth: Vec<(&str, u64)> = app
        .dashboard
        .growth
        .iter()
        .map(|point| (point.month.as_str(), point.clients))
        .collect();
    let chart = BarChart::default()
        .block(palette.block("Client Growth"))
        .data(growth.as_slice())
        .bar_width(5)
        .bar_gap(2)
        .bar_style(Style::default().fg(palette.primary))
        .value_style(Style::default().fg(palette.text).add_modifier(Modifier::BOLD));
    frame.render_widget(chart, bottom[0]);

    let activity: Vec<Line> = app
        .dashboard
        .activity
        .iter()
        .flat_map(|entry| {
            [
                Line::from(vec![
                    Span::styled(
                        format!("({}) ", entry.initials()),
                        Style::default().fg(palette.accent).bold(),
                    ),
                    Span::styled(entry.user.as_str(), Style::default().fg(palette.text).bold()),
                    Span::raw(format!(" {} ", entry.action)),
                    Span::styled(entry.target.as_str(), Style::default().fg(palette.primary)),
                ]),
                Line::from(Span::styled(
                    format!("     {}", entry.time),
                    Style::default().fg(palette.muted),
                )),
            ]
        })
        .collect();
    let activity = Paragraph::new(activity)
        .block(palette.block("Recent Activity"))
        .wrap(Wrap { trim: false });
    frame.render_widget(activity, bottom[1]);
}

fn draw_clients(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search + filter
            Constraint::Min(6),    // Table
            Constraint::Length(1), // Actions
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(30), Constraint::Length(24)])
        .split(chunks[0]);

    let cursor = if app.search_focused { "▌" } else { "" };
    let search = Paragraph::new(format!("{}{}", app.query.search, cursor)).block(
        Block::default()
            .title(if app.search_focused { "Search (Enter/Esc to leave)" } else { "Search (/)" })
            .borders(Borders::ALL)
            .border_style(palette.focus(app.search_focused)),
    );
    frame.render_widget(search, top[0]);

    let filter = Paragraph::new(app.query.status_filter.to_string())
        .style(Style::default().fg(palette.text))
        .block(palette.block("Status (f)"));
    frame.render_widget(filter, top[1]);

    let clients = app.visible_clients();
    let title = format!("Clients ({})", clients.len());

    if clients.is_empty() {
        let empty = Paragraph::new("No clients found")
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center)
            .block(palette.block(title));
        frame.render_widget(empty, chunks[1]);
    } else {
        let header_cell = |field: SortField, key: char| {
            let indicator = if app.query.sort_field == field {
                match app.query.sort_direction {
                    SortDirection::Asc => " ▲",
                    SortDirection::Desc => " ▼",
                }
            } else {
                ""
            };
            Cell::from(format!("{} ({key}){indicator}", field.label()))
        };

        let header = Row::new(
            SortField::ALL
                .into_iter()
                .zip(['N', 'E', 'S', 'J'])
                .map(|(field, key)| header_cell(field, key)),
        )
        .style(Style::default().fg(palette.primary).bold())
        .bottom_margin(1);

        let rows: Vec<Row> = clients
            .iter()
            .map(|client| {
                Row::new(vec![
                    Cell::from(truncate(&client.name, 28)),
                    Cell::from(truncate(&client.email, 32)),
                    Cell::from(status_badge(client.status)),
                    Cell::from(client.join_date.format("%Y-%m-%d").to_string()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(15),
            Constraint::Percentage(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(palette.block(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(table, chunks[1], &mut app.clients_state.clone());
    }

    let exporting = app.is_loading(ActionKind::Export(ExportTarget::Clients));
    let actions = Line::from(vec![
        Span::styled("a Add Client  x Delete  ", Style::default().fg(palette.muted)),
        Span::styled(button_label("o Export CSV", exporting), Style::default().fg(palette.primary)),
        Span::raw(" "),
        Span::styled(button_label("p Export PDF", exporting), Style::default().fg(palette.primary)),
    ]);
    frame.render_widget(Paragraph::new(actions), chunks[2]);
}

fn draw_reports(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Summary + range
            Constraint::Min(6),    // Report list
            Constraint::Length(1), // Actions
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(chunks[0]);

    let reports = app.reports.filtered();
    let summary = Paragraph::new(vec![
        Line::from(Span::styled(
            reports.len().to_string(),
            Style::default().fg(palette.text).bold(),
        )),
        Line::from(Span::styled(app.reports.period_caption(), Style::default().fg(palette.muted))),
    ])
    .alignment(Alignment::Center)
    .block(palette.block("Total Reports"));
    frame.render_widget(summary, top[0]);

    let range = match app.reports.range() {
        Some(range) => format!("{} .. {}", range.from, range.to),
        None => "All dates".to_string(),
    };
    let range = Paragraph::new(vec![
        Line::from(Span::styled(range, Style::default().fg(palette.text))),
        Line::from(Span::styled("r Set range  c Clear", Style::default().fg(palette.muted))),
    ])
    .block(palette.block("Date Range"));
    frame.render_widget(range, top[1]);

    if reports.is_empty() {
        let empty = Paragraph::new("No reports in this period")
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center)
            .block(palette.block("Reports"));
        frame.render_widget(empty, chunks[1]);
    } else {
        let header = Row::new(vec!["Title", "Type", "Date", "Summary"])
            .style(Style::default().fg(palette.primary).bold())
            .bottom_margin(1);

        let rows: Vec<Row> = reports
            .iter()
            .map(|report| {
                Row::new(vec![
                    Cell::from(report.title.clone()),
                    Cell::from(report.kind.to_string()),
                    Cell::from(report.date.format("%b %-d, %Y").to_string()),
                    Cell::from(report.summary.clone()),
                ])
            })
            .collect();

        let widths = [
            Constraint::Percentage(25),
            Constraint::Percentage(12),
            Constraint::Percentage(15),
            Constraint::Percentage(48),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(palette.block("Reports"));
        frame.render_widget(table, chunks[1]);
    }

    let actions = Line::from(vec![
        Span::styled(
            button_label("g Generate Report", app.is_loading(ActionKind::GenerateReport)),
            Style::default().fg(palette.primary),
        ),
        Span::raw(" "),
        Span::styled(
            button_label(
                "o Export CSV / p PDF",
                app.is_loading(ActionKind::Export(ExportTarget::Reports)),
            ),
            Style::default().fg(palette.primary),
        ),
    ]);
    frame.render_widget(Paragraph::new(actions), chunks[2]);
}

fn heading(title: &'static str, palette: &Palette) -> Line<'static> {
    Line::from(Span::styled(title, Style::default().fg(palette.accent).bold()))
}

fn field_line<'a>(
    label: &'a str,
    value: String,
    selected: bool,
    editing: bool,
    palette: &Palette,
) -> Line<'a> {
    let marker = if selected { "▶ " } else { "  " };
    let cursor = if selected && editing { "▌" } else { "" };
    let value_style = if selected && editing {
        Style::default().fg(palette.primary)
    } else {
        Style::default().fg(palette.text)
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(palette.primary)),
        Span::styled(format!("{label:<24}"), Style::default().fg(palette.muted)),
        Span::styled(format!("{value}{cursor}"), value_style),
    ])
}

fn button_line(label: String, selected: bool, palette: &Palette) -> Line<'static> {
    let style = if selected {
        Style::default().fg(palette.primary).add_modifier(Modifier::REVERSED)
    } else {
        Style::default().fg(palette.primary)
    };
    Line::from(vec![Span::raw(if selected { "▶ " } else { "  " }), Span::styled(label, style)])
}

fn toggle_line<'a>(
    label: &'a str,
    description: &'a str,
    on: bool,
    selected: bool,
    palette: &Palette,
) -> Line<'a> {
    let marker = if selected { "▶ " } else { "  " };
    let switch = if on {
        Span::styled("[x] ", Style::default().fg(palette.success))
    } else {
        Span::styled("[ ] ", Style::default().fg(palette.muted))
    };

    Line::from(vec![
        Span::styled(marker, Style::default().fg(palette.primary)),
        switch,
        Span::styled(format!("{label:<22}"), Style::default().fg(palette.text)),
        Span::styled(description, Style::default().fg(palette.muted)),
    ])
}

fn draw_settings(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let page = &app.settings;
    let current = page.row();
    let mut lines = Vec::new();

    for row in SettingsRow::ALL {
        let selected = row == current;
        match row {
            SettingsRow::Name => lines.push(heading("Profile", palette)),
            SettingsRow::CurrentPassword => {
                lines.push(Line::from(""));
                lines.push(heading("Password", palette));
            }
            SettingsRow::Notification(key) if key == NotificationKey::ALL[0] => {
                lines.push(Line::from(""));
                lines.push(heading("Notifications", palette));
            }
            SettingsRow::DarkMode => {
                lines.push(Line::from(""));
                lines.push(heading("Appearance", palette));
            }
            _ => {}
        }

        let line = match row {
            SettingsRow::SaveProfile => button_line(
                button_label("Save Changes", app.is_loading(ActionKind::SaveProfile)),
                selected,
                palette,
            ),
            SettingsRow::UpdatePassword => {
                button_line(button_label("Update Password", false), selected, palette)
            }
            SettingsRow::Notification(key) => {
                toggle_line(key.title(), key.description(), page.prefs.get(key), selected, palette)
            }
            SettingsRow::DarkMode => toggle_line(
                row.label(),
                "Use the dark color scheme",
                app.shell.theme.is_dark(),
                selected,
                palette,
            ),
            text_row => {
                let raw = page.field(text_row).unwrap_or_default();
                let value = if text_row.is_secret() {
                    "•".repeat(raw.chars().count())
                } else {
                    raw.to_string()
                };
                field_line(text_row.label(), value, selected, app.editing, palette)
            }
        };
        lines.push(line);
    }

    let settings =
        Paragraph::new(lines).block(palette.block("Settings (Enter edits or activates)"));
    frame.render_widget(settings, area);
}

fn draw_profile(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let page = &app.profile;
    let current = page.row();

    let mut lines = vec![
        heading("Profile Settings", palette),
        Line::from(Span::styled(
            "Manage your public profile information",
            Style::default().fg(palette.muted),
        )),
        Line::from(""),
    ];

    for row in ProfileRow::ALL {
        let selected = row == current;
        let line = match page.field(row) {
            Some(value) => {
                field_line(row.label(), value.to_string(), selected, app.editing, palette)
            }
            None => button_line(
                button_label("Save Changes", app.is_loading(ActionKind::SaveProfile)),
                selected,
                palette,
            ),
        };
        lines.push(line);
    }

    let profile = Paragraph::new(lines).block(palette.block("Profile"));
    frame.render_widget(profile, area);
}

fn draw_cards(
    frame: &mut Frame,
    app: &App,
    palette: &Palette,
    area: Rect,
    cards: &[ActionCard],
    selected: usize,
) {
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, cards.len().max(1) as u32); cards.len()])
        .split(area);

    for (i, (card, card_area)) in cards.iter().zip(areas.iter()).enumerate() {
        let is_selected = i == selected;
        let content = vec![
            Line::from(Span::styled(card.description, Style::default().fg(palette.text))),
            Line::from(""),
            button_line(button_label(card.button, app.is_loading(card.kind)), is_selected, palette),
        ];

        let widget = Paragraph::new(content)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(card.title)
                    .borders(Borders::ALL)
                    .border_style(palette.focus(is_selected)),
            );
        frame.render_widget(widget, *card_area);
    }
}

fn draw_not_found(frame: &mut Frame, palette: &Palette, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("404", Style::default().fg(palette.primary).bold())),
        Line::from(Span::styled("Page not found", Style::default().fg(palette.text))),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to return to the dashboard",
            Style::default().fg(palette.muted),
        )),
    ];
    let widget = Paragraph::new(text)
        .alignment(Alignment::Center)
        .block(palette.block("Not Found"));
    frame.render_widget(widget, area);
}

fn draw_status_bar(frame: &mut Frame, app: &App, palette: &Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(area);

    let left = match app.toasts.current() {
        Some(toast) => {
            let (symbol, color) = match toast.level {
                Level::Success => ("✓", palette.success),
                Level::Info => ("ℹ", palette.primary),
                Level::Error => ("✗", palette.error),
            };
            Paragraph::new(format!("{symbol} {}", toast.message))
                .style(Style::default().fg(color).bold())
        }
        None => Paragraph::new("? Help | Tab Switch | : Go to | m Account | q Quit")
            .style(Style::default().fg(palette.muted)),
    };
    frame.render_widget(left, chunks[0]);

    let right = Paragraph::new(app.shell.route().path())
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Right);
    frame.render_widget(right, chunks[1]);
}

fn draw_account_menu(frame: &mut Frame, app: &App, palette: &Palette) {
    let size = frame.size();
    let width = 24.min(size.width);
    let height = (Route::ACCOUNT_MENU.len() as u16 + 2).min(size.height);
    let area = Rect::new(size.width.saturating_sub(width), 3.min(size.height), width, height);

    frame.render_widget(Clear, area);

    let lines: Vec<Line> = Route::ACCOUNT_MENU
        .iter()
        .enumerate()
        .map(|(i, route)| {
            let style = if i == app.menu_selected {
                Style::default().fg(palette.primary).add_modifier(Modifier::REVERSED)
            } else {
                Style::default().fg(palette.text)
            };
            Line::from(Span::styled(format!(" {:<20}", route.title()), style))
        })
        .collect();

    let menu = Paragraph::new(lines).block(
        Block::default()
            .title("My Account")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.primary)),
    );
    frame.render_widget(menu, area);
}

fn draw_client_form(frame: &mut Frame, app: &App, palette: &Palette) {
    let area = centered_rect(50, 40, frame.size());
    frame.render_widget(Clear, area);

    let form = &app.client_form;
    let field = |label: &'static str, value: String, which: FormField| {
        let focused = form.focus == which;
        let cursor = if focused && which != FormField::Status { "▌" } else { "" };
        Line::from(vec![
            Span::styled(if focused { "▶ " } else { "  " }, Style::default().fg(palette.primary)),
            Span::styled(format!("{label:<8}"), Style::default().fg(palette.muted)),
            Span::styled(
                format!("{value}{cursor}"),
                palette.focus(focused).add_modifier(Modifier::BOLD),
            ),
        ])
    };

    let lines = vec![
        Line::from(""),
        field("Name", form.draft.name.clone(), FormField::Name),
        field("Email", form.draft.email.clone(), FormField::Email),
        field("Status", format!("< {} >", form.draft.status), FormField::Status),
        Line::from(""),
        Line::from(Span::styled(
            "Tab next field · ←/→ status · Enter save · Esc cancel",
            Style::default().fg(palette.muted).italic(),
        )),
    ];

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Add New Client")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.primary)),
    );
    frame.render_widget(widget, area);
}

fn draw_report_form(frame: &mut Frame, app: &App, palette: &Palette) {
    let Some(form) = app.report_form.as_ref() else {
        return;
    };
    let area = centered_rect(50, 35, frame.size());
    frame.render_widget(Clear, area);

    let choice = |label: &'static str, value: &'static str, which: ReportFormField| {
        let focused = form.focus == which;
        Line::from(vec![
            Span::styled(if focused { "▶ " } else { "  " }, Style::default().fg(palette.primary)),
            Span::styled(format!("{label:<12}"), Style::default().fg(palette.muted)),
            Span::styled(
                format!("< {value} >"),
                palette.focus(focused).add_modifier(Modifier::BOLD),
            ),
        ])
    };

    let lines = vec![
        Line::from(""),
        choice("Report Type", form.request.report_type.label(), ReportFormField::Type),
        choice("Date Range", form.request.period.label(), ReportFormField::Period),
        Line::from(""),
        Line::from(Span::styled(
            "↑/↓ field · ←/→ change · Enter generate · Esc cancel",
            Style::default().fg(palette.muted).italic(),
        )),
    ];

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .title("Generate Report")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.primary)),
    );
    frame.render_widget(widget, area);
}

fn draw_prompt(frame: &mut Frame, app: &App, palette: &Palette) {
    let Some(prompt) = app.prompt.as_ref() else {
        return;
    };
    let size = frame.size();
    let popup = centered_rect(60, 20, size);
    let area = Rect::new(popup.x, popup.y, popup.width, 3.min(size.height));
    frame.render_widget(Clear, area);

    let widget = Paragraph::new(format!("{}▌", prompt.input)).block(
        Block::default()
            .title(prompt.kind.title())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.primary)),
    );
    frame.render_widget(widget, area);
}

fn draw_help_overlay(frame: &mut Frame, palette: &Palette) {
    let area = centered_rect(60, 80, frame.size());

    // Clear the background
    frame.render_widget(Clear, area);

    let heading = |text: &'static str| Line::from(text).style(Style::default().fg(palette.accent));
    let help_text = vec![
        Line::from("Keyboard Shortcuts").style(Style::default().fg(palette.primary).bold()),
        Line::from(""),
        heading("Navigation:"),
        Line::from("  1-7 / Tab / Shift+Tab   Switch pages"),
        Line::from("  :                       Go to a path"),
        Line::from("  Backspace               Previous page"),
        Line::from("  b / m / t               Sidebar, account menu, theme"),
        Line::from(""),
        heading("Clients:"),
        Line::from("  /  f                    Search, status filter"),
        Line::from("  N E S J                 Sort by name, email, status, date"),
        Line::from("  a  x                    Add, delete selected"),
        Line::from("  o  p                    Export CSV, PDF"),
        Line::from(""),
        heading("Reports:"),
        Line::from("  r  c                    Set, clear date range"),
        Line::from("  g  o  p                 Generate, export CSV, PDF"),
        Line::from(""),
        heading("Forms:"),
        Line::from("  j/k or ↑/↓              Select row"),
        Line::from("  Enter                   Edit text or press button"),
        Line::from("  Esc                     Stop editing, close dialog"),
        Line::from(""),
        heading("General:"),
        Line::from("  ?                       Toggle this help"),
        Line::from("  q / Ctrl+C              Quit"),
        Line::from(""),
        Line::from("Press any key to close").style(Style::default().fg(palette.muted).italic()),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(palette.primary)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_every_route_renders() {
        let mut app = App::new();
        for route in Route::ALL {
            app.shell.navigate(route);
            let screen = render(&app);
            assert!(screen.contains(route.title()), "{route:?} missing its title");
        }
    }

    #[test]
    fn test_clients_page_shows_rows_and_sort_indicator() {
        let mut app = App::new();
        app.shell.navigate(Route::Clients);
        let screen = render(&app);
        assert!(screen.contains("Acme Corporation"));
        assert!(screen.contains("Name (N) ▲"));
        assert!(screen.contains("Clients (4)"));
    }

    #[test]
    fn test_overlays_render() {
        let mut app = App::new();
        app.shell.navigate(Route::Clients);
        app.handle_key(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(render(&app).contains("Add New Client"));

        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        app.handle_key(KeyCode::Char('?'), KeyModifiers::NONE);
        assert!(render(&app).contains("Keyboard Shortcuts"));
    }

    #[test]
    fn test_not_found_page() {
        let mut app = App::new();
        app.shell.navigate_path("/missing");
        assert!(render(&app).contains("Page not found"));
    }
}
