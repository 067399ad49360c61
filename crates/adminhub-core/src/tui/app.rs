//! Main TUI application state and logic

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::widgets::TableState;
use tokio::sync::mpsc;
use tracing::info;

use super::event::{Event, EventHandler};
use super::pages::{
    ProfilePage, ProfileRow, ReportForm, SettingsPage, SettingsRow, BILLING_CARDS, TEAM_CARDS,
};
use crate::actions::{Action, ActionKind, ActionRunner, Backend, Completion};
use crate::error::{Error, Result};
use crate::export::{ExportFormat, ExportOutcome, ExportTarget};
use crate::models::{ClientRecord, DashboardData};
use crate::notify::Toasts;
use crate::reports::{parse_range, ReportsView};
use crate::roster::{ClientForm, FormField, Roster, RosterQuery, SortField};
use crate::shell::{Route, Shell};

/// What a single-line prompt is asking for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// A path to navigate to
    GoTo,
    /// A report date range, `YYYY-MM-DD..YYYY-MM-DD`
    Range,
}

impl PromptKind {
    pub fn title(self) -> &'static str {
        match self {
            Self::GoTo => "Go to path",
            Self::Range => "Date range (YYYY-MM-DD..YYYY-MM-DD, empty clears)",
        }
    }
}

/// Open single-line prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub input: String,
}

/// Main TUI application state
pub struct App {
    /// Whether the app should quit
    pub should_quit: bool,
    /// Route, sidebar, account menu and theme
    pub shell: Shell,
    /// Dashboard page data
    pub dashboard: DashboardData,
    /// Client records
    pub roster: Roster,
    /// Search, filter and sort applied to the client table
    pub query: RosterQuery,
    /// Add-client dialog
    pub client_form: ClientForm,
    /// Client table state
    pub clients_state: TableState,
    /// Is the client search box focused
    pub search_focused: bool,
    /// Reports page
    pub reports: ReportsView,
    /// Generate-report dialog, when open
    pub report_form: Option<ReportForm>,
    /// Path or date range prompt, when open
    pub prompt: Option<Prompt>,
    /// Settings page
    pub settings: SettingsPage,
    /// Profile page
    pub profile: ProfilePage,
    /// Selected card on the billing page
    pub billing_selected: usize,
    /// Selected card on the team page
    pub team_selected: usize,
    /// Selected entry of the account menu
    pub menu_selected: usize,
    /// Whether typed characters go into the selected text row
    pub editing: bool,
    /// Toast notifications
    pub toasts: Toasts,
    /// Show help overlay
    pub show_help: bool,
    /// Refresh rate
    pub refresh_rate: Duration,
    runner: Option<ActionRunner<Event>>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Create a new TUI app over the seeded data
    pub fn new() -> Self {
        let mut clients_state = TableState::default();
        clients_state.select(Some(0));

        Self {
            should_quit: false,
            shell: Shell::default(),
            dashboard: DashboardData::default(),
            roster: Roster::seeded(),
            query: RosterQuery::new(),
            client_form: ClientForm::default(),
            clients_state,
            search_focused: false,
            reports: ReportsView::default(),
            report_form: None,
            prompt: None,
            settings: SettingsPage::default(),
            profile: ProfilePage::default(),
            billing_selected: 0,
            team_selected: 0,
            menu_selected: 0,
            editing: false,
            toasts: Toasts::default(),
            show_help: false,
            refresh_rate: Duration::from_millis(250),
            runner: None,
        }
    }

    /// Set refresh rate
    pub fn with_refresh_rate(mut self, rate: Duration) -> Self {
        self.refresh_rate = rate;
        self
    }

    /// Set how long toasts stay visible
    pub fn with_toast_ttl(mut self, ttl: Duration) -> Self {
        self.toasts = Toasts::new(ttl);
        self
    }

    /// Route actions to `backend`, with completions sent to `tx`
    pub fn attach(&mut self, backend: Arc<dyn Backend>, tx: mpsc::UnboundedSender<Event>) {
        self.runner = Some(ActionRunner::new(backend, tx));
    }

    /// Whether an action of `kind` is still running
    pub fn is_loading(&self, kind: ActionKind) -> bool {
        self.runner.as_ref().is_some_and(|runner| runner.is_pending(kind))
    }

    /// Client table rows after search, filter and sort
    pub fn visible_clients(&self) -> Vec<ClientRecord> {
        self.roster.project(&self.query)
    }

    pub fn selected_client(&self) -> Option<ClientRecord> {
        let idx = self.clients_state.selected()?;
        self.visible_clients().into_iter().nth(idx)
    }

    /// Process one event from the event loop
    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key.code, key.modifiers),
            Event::Tick => self.toasts.prune(),
            Event::Resize(_, _) => {}
            Event::ActionCompleted(completion) => self.on_completion(completion),
        }
    }

    /// Handle key events
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        // Overlays take every key while open
        if self.show_help {
            self.show_help = false;
            return;
        }
        if self.prompt.is_some() {
            self.handle_prompt_key(code);
            return;
        }
        if self.client_form.is_open() {
            self.handle_client_form_key(code);
            return;
        }
        if self.report_form.is_some() {
            self.handle_report_form_key(code);
            return;
        }
        if self.search_focused {
            self.handle_search_key(code);
            return;
        }
        if self.shell.mobile_menu_open {
            self.handle_menu_key(code);
            return;
        }
        if self.editing {
            self.handle_editing_key(code);
            return;
        }

        // Global shortcuts
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab => self.cycle_route(true),
            KeyCode::BackTab => self.cycle_route(false),
            KeyCode::Char(c @ '1'..='7') => {
                let idx = c as usize - '1' as usize;
                self.navigate(Route::ALL[idx]);
            }
            KeyCode::Char('b') => self.shell.toggle_sidebar(),
            KeyCode::Char('m') => {
                self.menu_selected = 0;
                self.shell.toggle_mobile_menu();
            }
            KeyCode::Char('t') => self.shell.toggle_theme(),
            KeyCode::Char(':') => {
                self.prompt = Some(Prompt {
                    kind: PromptKind::GoTo,
                    input: String::new(),
                });
            }
            KeyCode::Backspace => {
                self.shell.back();
            }
            _ => self.handle_page_key(code),
        }
    }

    fn handle_page_key(&mut self, code: KeyCode) {
        match self.shell.route() {
            Route::Dashboard => {}
            Route::Clients => self.handle_clients_key(code),
            Route::Reports => self.handle_reports_key(code),
            Route::Settings => self.handle_settings_key(code),
            Route::Profile => self.handle_profile_key(code),
            Route::Billing => self.handle_cards_key(code, Route::Billing),
            Route::Team => self.handle_cards_key(code, Route::Team),
            Route::NotFound => {
                if matches!(code, KeyCode::Enter | KeyCode::Char('h')) {
                    self.navigate(Route::Dashboard);
                }
            }
        }
    }

    fn navigate(&mut self, route: Route) {
        self.leave_page();
        self.shell.navigate(route);
    }

    fn leave_page(&mut self) {
        self.editing = false;
        self.search_focused = false;
    }

    fn cycle_route(&mut self, forward: bool) {
        let len = Route::ALL.len();
        let current = Route::ALL
            .iter()
            .position(|r| *r == self.shell.route())
            .unwrap_or(0);
        let next = if forward { (current + 1) % len } else { (current + len - 1) % len };
        self.navigate(Route::ALL[next]);
    }

    fn handle_clients_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('/') => self.search_focused = true,
            KeyCode::Char('f') => {
                self.query.status_filter = self.query.status_filter.next();
                self.reset_client_selection();
            }
            KeyCode::Char('N') => self.query.toggle_sort(SortField::Name),
            KeyCode::Char('E') => self.query.toggle_sort(SortField::Email),
            KeyCode::Char('S') => self.query.toggle_sort(SortField::Status),
            KeyCode::Char('J') => self.query.toggle_sort(SortField::JoinDate),
            KeyCode::Char('a') => self.client_form.open(),
            KeyCode::Char('x') | KeyCode::Delete => self.delete_selected_client(),
            KeyCode::Char('o') => self.export_clients(ExportFormat::Csv),
            KeyCode::Char('p') => self.export_clients(ExportFormat::Pdf),
            KeyCode::Up | KeyCode::Char('k') => {
                let i = self.clients_state.selected().unwrap_or(0);
                self.clients_state.select(Some(i.saturating_sub(1)));
            }
            KeyCode::Down | KeyCode::Char('j') => {
                let len = self.visible_clients().len();
                if len > 0 {
                    let i = self.clients_state.selected().unwrap_or(0);
                    self.clients_state.select(Some((i + 1).min(len - 1)));
                }
            }
            KeyCode::Home | KeyCode::Char('g') => self.reset_client_selection(),
            KeyCode::End | KeyCode::Char('G') => {
                let len = self.visible_clients().len();
                self.clients_state.select(len.checked_sub(1));
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Enter => self.search_focused = false,
            KeyCode::Backspace => {
                self.query.search.pop();
                self.reset_client_selection();
            }
            KeyCode::Char(c) => {
                self.query.search.push(c);
                self.reset_client_selection();
            }
            _ => {}
        }
    }

    fn reset_client_selection(&mut self) {
        let selection = if self.visible_clients().is_empty() { None } else { Some(0) };
        self.clients_state.select(selection);
    }

    fn delete_selected_client(&mut self) {
        let Some(client) = self.selected_client() else {
            return;
        };
        if self.roster.remove(client.id).is_some() {
            self.toasts.info(format!("Removed {}", client.name));
        }

        let len = self.visible_clients().len();
        let selected = self.clients_state.selected().unwrap_or(0);
        self.clients_state
            .select(len.checked_sub(1).map(|last| selected.min(last)));
    }

    fn handle_client_form_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.client_form.cancel(),
            KeyCode::Tab | KeyCode::Down => self.client_form.focus = self.client_form.focus.next(),
            KeyCode::BackTab | KeyCode::Up => {
                self.client_form.focus = self.client_form.focus.prev();
            }
            KeyCode::Enter => self.submit_client_form(today()),
            KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')
                if self.client_form.focus == FormField::Status =>
            {
                self.client_form.cycle_status();
            }
            KeyCode::Backspace => self.client_form.backspace(),
            KeyCode::Char(c) => self.client_form.input(c),
            _ => {}
        }
    }

    fn submit_client_form(&mut self, today: NaiveDate) {
        match self.client_form.submit(&mut self.roster, today) {
            Ok(record) => {
                self.toasts.success(format!("Added {}", record.name));
                self.reset_client_selection();
            }
            Err(e) => self.toasts.error(e.user_message()),
        }
    }

    fn export_clients(&mut self, format: ExportFormat) {
        let rows = self.visible_clients();
        self.dispatch_result(Action::export(&rows, ExportTarget::Clients, format));
    }

    fn handle_reports_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('r') => {
                let input = self
                    .reports
                    .range()
                    .map(|range| format!("{}..{}", range.from, range.to))
                    .unwrap_or_default();
                self.prompt = Some(Prompt {
                    kind: PromptKind::Range,
                    input,
                });
            }
            KeyCode::Char('c') => self.reports.set_range(None),
            KeyCode::Char('g') => self.report_form = Some(ReportForm::default()),
            KeyCode::Char('o') => self.export_reports(ExportFormat::Csv),
            KeyCode::Char('p') => self.export_reports(ExportFormat::Pdf),
            _ => {}
        }
    }

    fn export_reports(&mut self, format: ExportFormat) {
        let rows = self.reports.filtered();
        self.dispatch_result(Action::export(&rows, ExportTarget::Reports, format));
    }

    fn handle_report_form_key(&mut self, code: KeyCode) {
        let Some(form) = self.report_form.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => self.report_form = None,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => form.toggle_focus(),
            KeyCode::Right | KeyCode::Char(' ') => form.cycle(true),
            KeyCode::Left => form.cycle(false),
            KeyCode::Enter => {
                let request = form.request;
                self.report_form = None;
                self.dispatch(Action::GenerateReport(request));
            }
            _ => {}
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc => self.prompt = None,
            KeyCode::Backspace => {
                prompt.input.pop();
            }
            KeyCode::Char(c) => prompt.input.push(c),
            KeyCode::Enter => {
                if let Some(prompt) = self.prompt.take() {
                    self.submit_prompt(prompt);
                }
            }
            _ => {}
        }
    }

    fn submit_prompt(&mut self, prompt: Prompt) {
        let input = prompt.input.trim();
        match prompt.kind {
            PromptKind::GoTo => {
                self.leave_page();
                self.shell.navigate_path(input);
            }
            PromptKind::Range if input.is_empty() => self.reports.set_range(None),
            PromptKind::Range => match parse_range(input) {
                Ok(range) => self.reports.set_range(Some(range)),
                Err(e) => self.toasts.error(e.user_message()),
            },
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) {
        let len = Route::ACCOUNT_MENU.len();
        match code {
            KeyCode::Esc | KeyCode::Char('m') => self.shell.mobile_menu_open = false,
            KeyCode::Up | KeyCode::Char('k') => {
                self.menu_selected = self.menu_selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.menu_selected = (self.menu_selected + 1).min(len - 1);
            }
            KeyCode::Enter => {
                let route = Route::ACCOUNT_MENU[self.menu_selected.min(len - 1)];
                self.navigate(route);
            }
            _ => {}
        }
    }

    /// Text row currently being typed into, if any
    fn editing_field(&mut self) -> Option<&mut String> {
        match self.shell.route() {
            Route::Settings => {
                let row = self.settings.row();
                self.settings.field_mut(row)
            }
            Route::Profile => {
                let row = self.profile.row();
                self.profile.field_mut(row)
            }
            _ => None,
        }
    }

    fn handle_editing_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => self.editing = false,
            KeyCode::Backspace => {
                if let Some(field) = self.editing_field() {
                    field.pop();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.editing_field() {
                    field.push(c);
                }
            }
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, code: KeyCode) {
        let len = SettingsRow::ALL.len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.settings.selected = self.settings.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.settings.selected = (self.settings.selected + 1).min(len - 1);
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.activate_settings_row(self.settings.row()),
            _ => {}
        }
    }

    fn activate_settings_row(&mut self, row: SettingsRow) {
        match row {
            row if row.is_text() => self.editing = true,
            SettingsRow::SaveProfile => {
                self.dispatch(Action::SaveProfile(self.settings.profile.clone()));
            }
            SettingsRow::UpdatePassword => match self.settings.password.submit() {
                Ok(()) => self.toasts.success("Password updated successfully!"),
                Err(e) => self.toasts.error(e.user_message()),
            },
            SettingsRow::Notification(key) => {
                self.settings.prefs.toggle(key);
                self.toasts.success("Notification preferences saved!");
            }
            SettingsRow::DarkMode => self.shell.toggle_theme(),
            _ => {}
        }
    }

    fn handle_profile_key(&mut self, code: KeyCode) {
        let len = ProfileRow::ALL.len();
        match code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.profile.selected = self.profile.selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.profile.selected = (self.profile.selected + 1).min(len - 1);
            }
            KeyCode::Enter => match self.profile.row() {
                ProfileRow::Save => {
                    self.dispatch(Action::SaveProfile(self.profile.profile.clone()));
                }
                _ => self.editing = true,
            },
            _ => {}
        }
    }

    fn handle_cards_key(&mut self, code: KeyCode, route: Route) {
        let (cards, selected) = match route {
            Route::Billing => (&BILLING_CARDS, &mut self.billing_selected),
            _ => (&TEAM_CARDS, &mut self.team_selected),
        };
        match code {
            KeyCode::Up | KeyCode::Left | KeyCode::Char('k') => {
                *selected = selected.saturating_sub(1);
            }
            KeyCode::Down | KeyCode::Right | KeyCode::Char('j') => {
                *selected = (*selected + 1).min(cards.len() - 1);
            }
            KeyCode::Enter => {
                if let Some(action) = cards[*selected].action() {
                    self.dispatch(action);
                }
            }
            _ => {}
        }
    }

    fn dispatch_result(&mut self, action: Result<Action>) {
        match action {
            Ok(action) => self.dispatch(action),
            Err(e) => self.toasts.error(e.user_message()),
        }
    }

    /// Start `action` on the attached backend
    fn dispatch(&mut self, action: Action) {
        match self.runner.as_mut() {
            Some(runner) => {
                if !runner.dispatch(action) {
                    self.toasts.info("Already in progress, please wait");
                }
            }
            None => self.toasts.error(Error::internal("no backend attached").user_message()),
        }
    }

    /// Apply a finished action: clear its loading state and raise a toast
    pub fn on_completion(&mut self, completion: Completion) {
        if let Some(runner) = self.runner.as_mut() {
            runner.finish(&completion);
        }

        match completion.result {
            Ok(outcome) => match outcome.export {
                Some(ExportOutcome::Written { path, rows }) => {
                    info!(path = %path.display(), rows, "Export finished");
                    self.toasts.success(outcome.message);
                }
                Some(ExportOutcome::ComingSoon(_)) | None => self.toasts.success(outcome.message),
            },
            Err(e) => self.toasts.error(e.user_message()),
        }
    }

    /// Run the TUI application until the user quits
    pub async fn run(&mut self, backend: Arc<dyn Backend>) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{
                disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
            },
        };
        use ratatui::{backend::CrosstermBackend, Terminal};
        use std::io;

        // Setup terminal
        enable_raw_mode().map_err(|e| Error::Tui(e.to_string()))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|e| Error::Tui(e.to_string()))?;
        let mut terminal =
            Terminal::new(CrosstermBackend::new(stdout)).map_err(|e| Error::Tui(e.to_string()))?;

        let mut events = EventHandler::new(self.refresh_rate);
        self.attach(backend, events.sender());
        events.start();
        info!("Dashboard started");

        let result = self.event_loop(&mut terminal, &mut events).await;

        // Restore terminal even when the loop failed
        disable_raw_mode().map_err(|e| Error::Tui(e.to_string()))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(|e| Error::Tui(e.to_string()))?;
        terminal.show_cursor().map_err(|e| Error::Tui(e.to_string()))?;
        info!("Dashboard stopped");

        result
    }

    async fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut ratatui::Terminal<B>,
        events: &mut EventHandler,
    ) -> Result<()> {
        while !self.should_quit {
            terminal
                .draw(|frame| super::ui::draw(frame, self))
                .map_err(|e| Error::Tui(e.to_string()))?;

            match events.next().await {
                Some(event) => self.handle_event(event),
                None => break,
            }
        }
        Ok(())
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
