//! Top-level application state and the main event loop.
//!
//! [`App::run`] sets up the terminal, drives the crossterm event loop, and
//! tears everything down cleanly on exit or panic. Each catalog tab owns a
//! [`SearchSession`]; sessions are opened the first time their tab is shown
//! and pumped once per frame so provider results land without blocking
//! input.

use crate::{
    commands::{execute_command, Command},
    event::{self, AppEvent, Direction, Keymap},
    theme::Theme,
    widgets::{
        command_bar::{CommandBar, CommandBarState},
        detail_pane::{DetailPane, DetailPaneState},
        help::HelpPopup,
        plant_list::{ListContent, PlantList, PlantListState},
        query_bar::{QueryBar, QueryBarState},
        status_bar::StatusBar,
        tab_bar::TabBar,
    },
};
use crossterm::{
    event::{self as ct_event, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use daisy_core::{
    config::Config,
    controller::{SearchEvent, SearchOptions},
    session::SearchSession,
    store::LocalRecordStore,
    Catalog, PlantDataProvider,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDir, Layout, Rect},
    Frame, Terminal,
};
use std::{io, path::PathBuf, sync::Arc, time::Duration};

// ---------------------------------------------------------------------------
// Focus + tab types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    QueryBar,
    List,
    Detail,
    /// Vim-style `:` command line is active.
    Command,
}

/// Opens a [`SearchSession`] for a catalog with the shared provider and the
/// catalog's own cache file.
pub struct SessionFactory {
    provider: Arc<dyn PlantDataProvider>,
    data_dir: PathBuf,
    options: SearchOptions,
}

impl SessionFactory {
    pub fn new(provider: Arc<dyn PlantDataProvider>, data_dir: PathBuf, options: SearchOptions) -> Self {
        Self { provider, data_dir, options }
    }

    fn open(&self, catalog: Catalog) -> SearchSession {
        let store = Arc::new(LocalRecordStore::for_catalog(&self.data_dir, catalog));
        tracing::debug!(%catalog, path = %store.path().display(), "opening search session");
        let mut session =
            SearchSession::new(catalog, self.options, Arc::clone(&self.provider), store);
        session.start();
        session
    }
}

pub struct TabState {
    pub catalog: Catalog,
    pub session: Option<SearchSession>,
    pub query: QueryBarState,
    pub list: PlantListState,
    pub detail: DetailPaneState,
    /// The user moved into the suggestion list from the query bar, so
    /// Enter picks the highlighted suggestion instead of submitting.
    pub picking_suggestion: bool,
}

impl TabState {
    fn new(catalog: Catalog) -> Self {
        Self {
            catalog,
            session: None,
            query: QueryBarState::default(),
            list: PlantListState::default(),
            detail: DetailPaneState::default(),
            picking_suggestion: false,
        }
    }

    /// Number of rows the list pane is currently showing.
    fn visible_len(&self) -> usize {
        match self.session.as_ref().map(|s| s.state()) {
            Some(state) if state.keyboard_active => state.suggestions.len(),
            Some(state) => state.results.len(),
            None => 0,
        }
    }
}

// ---------------------------------------------------------------------------
// AppState
// ---------------------------------------------------------------------------

pub struct AppState {
    pub tabs: Vec<TabState>,
    pub active_tab: usize,
    pub focus: Focus,
    /// Focus before entering command mode, restored on exit.
    pub prev_focus: Focus,
    pub theme: Theme,
    pub config: Config,
    pub keymap: Keymap,
    pub show_help: bool,
    pub command_bar: CommandBarState,
    pub quit: bool,
    /// Frame counter driving the spinner.
    pub tick: u64,
    sessions: SessionFactory,
}

impl AppState {
    pub fn active_tab_mut(&mut self) -> &mut TabState {
        &mut self.tabs[self.active_tab]
    }

    /// Make tab `index` current, opening its session on first visit.
    pub fn switch_tab(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        tracing::debug!(from = self.active_tab, to = index, "switching tab");
        self.active_tab = index;
        self.ensure_session(index);
        if self.focus == Focus::QueryBar {
            self.focus = Focus::List;
            self.dispatch(SearchEvent::KeyboardClosed);
        }
    }

    /// Send an event to the active tab's session.
    pub fn dispatch(&mut self, event: SearchEvent) {
        let index = self.active_tab;
        self.ensure_session(index);
        let tab = &mut self.tabs[index];
        if let Some(session) = tab.session.as_mut() {
            session.dispatch(event);
            sync_tab(tab);
        }
    }

    fn ensure_session(&mut self, index: usize) {
        if self.tabs[index].session.is_none() {
            let session = self.sessions.open(self.tabs[index].catalog);
            self.tabs[index].session = Some(session);
        }
    }

    /// Fold in every finished fetch and settled query across all tabs.
    fn pump_all(&mut self) {
        for tab in &mut self.tabs {
            let changed = tab.session.as_mut().is_some_and(|s| s.pump());
            if changed {
                sync_tab(tab);
            }
        }
    }

    fn shutdown(&mut self) {
        for session in self.tabs.iter_mut().filter_map(|t| t.session.as_mut()) {
            session.shutdown();
        }
    }
}

/// Pull reducer-driven changes (picked suggestion text, shorter lists) back
/// into the tab's widget state.
fn sync_tab(tab: &mut TabState) {
    let len = tab.visible_len();
    if let Some(state) = tab.session.as_ref().map(|s| s.state()) {
        if state.query != tab.query.query {
            tab.query.set(&state.query);
        }
    }
    tab.list.clamp(len);
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

pub struct App {
    state: AppState,
}

impl App {
    /// Build the app with one tab per catalog, `initial` selected. Must be
    /// called from within a tokio runtime.
    pub fn new(initial: Catalog, sessions: SessionFactory, config: Config, theme: Theme) -> Self {
        let tabs: Vec<TabState> = Catalog::ALL.iter().copied().map(TabState::new).collect();
        let active_tab = Catalog::ALL.iter().position(|c| *c == initial).unwrap_or(0);

        let keymap = Keymap::from_config(&config.keybindings);
        let mut state = AppState {
            tabs,
            active_tab,
            focus: Focus::List,
            prev_focus: Focus::List,
            theme,
            config,
            keymap,
            show_help: false,
            command_bar: CommandBarState::default(),
            quit: false,
            tick: 0,
            sessions,
        };
        state.ensure_session(active_tab);

        App { state }
    }

    /// Set up the terminal, run the event loop, and restore the terminal on exit.
    pub fn run(mut self) -> anyhow::Result<()> {
        install_panic_hook();

        enable_raw_mode()?;
        execute!(io::stdout(), EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal);

        self.state.shutdown();

        // Always restore terminal, even if the loop returned an error
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        loop {
            self.state.pump_all();
            self.state.tick = self.state.tick.wrapping_add(1);

            {
                let s = &self.state;
                terminal.draw(|frame| draw(frame, s))?;
            }

            if self.state.quit {
                break;
            }

            if ct_event::poll(Duration::from_millis(16))? {
                match ct_event::read()? {
                    Event::Key(key) if key.kind == crossterm::event::KeyEventKind::Press => {
                        let raw = Event::Key(key);
                        let app_event = if is_insert_mode(self.state.focus) {
                            event::to_app_event_insert(raw)
                        } else {
                            event::to_app_event(raw, &self.state.keymap)
                        };
                        if let Some(ev) = app_event {
                            tracing::debug!(focus = ?self.state.focus, event = ?ev, "key event");
                            self.handle(ev);
                        }
                    }
                    other => {
                        if let Some(ev) = event::to_app_event(other, &self.state.keymap) {
                            self.handle(ev);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn handle(&mut self, event: AppEvent) {
        let s = &mut self.state;

        // Help popup intercepts all events; only close keys pass through.
        if s.show_help {
            if matches!(event, AppEvent::Char('?') | AppEvent::Escape | AppEvent::Quit) {
                tracing::debug!("help popup closed");
                s.show_help = false;
            }
            return;
        }

        // Command mode intercepts all events.
        if s.focus == Focus::Command {
            match event {
                AppEvent::Escape => {
                    tracing::debug!("command bar cancelled");
                    s.command_bar.clear();
                    s.focus = s.prev_focus;
                }
                AppEvent::Enter => match Command::parse(&s.command_bar.input) {
                    Ok(cmd) => {
                        tracing::debug!(command = ?cmd, "executing command");
                        s.command_bar.clear();
                        s.focus = s.prev_focus;
                        execute_command(s, cmd);
                    }
                    Err(msg) if msg.is_empty() => {
                        s.command_bar.clear();
                        s.focus = s.prev_focus;
                    }
                    Err(msg) => s.command_bar.error = Some(msg),
                },
                AppEvent::Quit => s.quit = true,
                other => s.command_bar.handle(&other),
            }
            return;
        }

        match event {
            AppEvent::Char('?') if s.focus != Focus::QueryBar => {
                tracing::debug!("help popup opened");
                s.show_help = true;
            }

            AppEvent::Char(':') if s.focus != Focus::QueryBar => {
                tracing::debug!(prev_focus = ?s.focus, "entering command mode");
                s.prev_focus = s.focus;
                s.command_bar.clear();
                s.focus = Focus::Command;
            }

            AppEvent::Quit => {
                tracing::debug!("quit");
                s.quit = true;
            }

            AppEvent::Escape => {
                if s.focus == Focus::QueryBar {
                    s.focus = Focus::List;
                    s.dispatch(SearchEvent::KeyboardClosed);
                }
            }

            // Tab-cycle focus: QueryBar → List → Detail → QueryBar
            AppEvent::FocusNext => {
                let next = match s.focus {
                    Focus::QueryBar => Focus::List,
                    Focus::List => Focus::Detail,
                    Focus::Detail | Focus::Command => Focus::QueryBar,
                };
                tracing::debug!(from = ?s.focus, to = ?next, "focus cycle");
                focus_query_bar(s, next == Focus::QueryBar);
                s.focus = next;
            }

            AppEvent::QueryFocus => {
                focus_query_bar(s, true);
                s.focus = Focus::QueryBar;
            }

            AppEvent::NextTab => s.switch_tab((s.active_tab + 1) % s.tabs.len()),
            AppEvent::PrevTab => {
                let n = s.tabs.len();
                s.switch_tab((s.active_tab + n - 1) % n);
            }

            AppEvent::Refresh => s.dispatch(SearchEvent::Refresh),
            AppEvent::DismissError => s.dispatch(SearchEvent::DismissError),

            // Terminal resize is handled automatically by ratatui
            AppEvent::Resize(_, _) => {}

            other => dispatch_to_focused(s, other),
        }
    }
}

/// Open or close the on-screen keyboard to match query bar focus.
fn focus_query_bar(s: &mut AppState, focused: bool) {
    let tab = s.active_tab_mut();
    tab.picking_suggestion = false;
    if focused {
        tab.list.cursor = 0;
        s.dispatch(SearchEvent::KeyboardOpened);
    } else if s.focus == Focus::QueryBar {
        s.dispatch(SearchEvent::KeyboardClosed);
    }
}

/// Returns true when the current focus is on a text-input widget.
fn is_insert_mode(focus: Focus) -> bool {
    matches!(focus, Focus::QueryBar | Focus::Command)
}

/// Route an event to the widget that owns the current focus.
fn dispatch_to_focused(s: &mut AppState, event: AppEvent) {
    match s.focus {
        Focus::QueryBar => handle_query_bar(s, event),
        Focus::List => handle_list(s, event),
        Focus::Detail => s.active_tab_mut().detail.handle(&event),
        Focus::Command => {}
    }
}

fn handle_query_bar(s: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Nav(Direction::Up | Direction::Down) => {
            let tab = s.active_tab_mut();
            let len = tab.visible_len();
            tab.list.handle(&event, len);
            tab.picking_suggestion = len > 0;
        }
        AppEvent::Enter => {
            let tab = s.active_tab_mut();
            let pick = tab.picking_suggestion.then_some(tab.list.cursor);
            tab.picking_suggestion = false;
            match pick {
                Some(i) => s.dispatch(SearchEvent::SelectSuggestion(i)),
                None => s.dispatch(SearchEvent::Submit),
            }
            let submitted = s.tabs[s.active_tab]
                .session
                .as_ref()
                .is_some_and(|sess| !sess.state().keyboard_active);
            if submitted {
                let tab = s.active_tab_mut();
                tab.list.cursor = 0;
                tab.detail.reset();
                s.focus = Focus::List;
            }
        }
        other => {
            let tab = s.active_tab_mut();
            if tab.query.handle(&other) {
                tab.list.cursor = 0;
                tab.picking_suggestion = false;
                let text = tab.query.query.clone();
                s.dispatch(SearchEvent::QueryChanged(text));
            }
        }
    }
}

fn handle_list(s: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Enter => {
            let cursor = s.tabs[s.active_tab].list.cursor;
            s.dispatch(SearchEvent::SelectResult(cursor));
            let tab = s.active_tab_mut();
            tab.list.cursor = 0;
            tab.detail.reset();
        }
        other => {
            let tab = s.active_tab_mut();
            let len = tab.visible_len();
            let before = tab.list.cursor;
            tab.list.handle(&other, len);
            if tab.list.cursor != before {
                tab.detail.reset();
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn draw(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    // Vertical: tab bar | query bar | body | status line
    let vert = Layout::default()
        .direction(LayoutDir::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .split(area);

    let pct = state.config.ui.detail_pane_width_pct.min(90);
    let horiz = Layout::default()
        .direction(LayoutDir::Horizontal)
        .constraints([Constraint::Fill(1), Constraint::Percentage(pct)])
        .split(vert[2]);

    let tab = &state.tabs[state.active_tab];
    frame.render_widget(TabBar::new(&state.tabs, state.active_tab, &state.theme), vert[0]);

    let Some(session) = tab.session.as_ref() else {
        return;
    };
    let search = session.state();

    let busy = if search.is_searching {
        Some("typing")
    } else if search.loading {
        Some("loading")
    } else {
        None
    };
    let query_bar = QueryBar::new(
        &tab.query,
        tab.catalog.placeholder(),
        state.focus == Focus::QueryBar,
        &state.theme,
    )
    .busy(busy, state.tick / 4);
    frame.render_widget(query_bar, vert[1]);

    let (content, title) = if search.keyboard_active {
        (ListContent::Suggestions(&search.suggestions), tab.catalog.title().to_string())
    } else if search.query.trim().is_empty() {
        (ListContent::Results(&search.results), "Most common plants".to_string())
    } else {
        (ListContent::Results(&search.results), format!("Results: {}", search.query.trim()))
    };
    frame.render_widget(
        PlantList::new(&tab.list, content, &title, state.focus == Focus::List, &state.theme),
        horiz[0],
    );

    let record = if search.keyboard_active {
        None
    } else {
        search.results.get(tab.list.cursor)
    };
    frame.render_widget(
        DetailPane::new(&tab.detail, record, tab.catalog, state.focus == Focus::Detail, &state.theme),
        horiz[1],
    );

    frame.render_widget(StatusBar::new(search, &state.theme), vert[3]);

    if state.show_help {
        frame.render_widget(HelpPopup::new(&state.theme), area);
    }

    // Command bar overlays the bottom row of the screen
    if state.focus == Focus::Command {
        let cmd_area = Rect { y: area.bottom() - 1, height: 1, ..area };
        frame.render_widget(CommandBar::new(&state.command_bar, &state.theme), cmd_area);
        let col = state.command_bar.cursor_col(cmd_area);
        frame.set_cursor_position((col, cmd_area.y));
        return;
    }

    if state.focus == Focus::QueryBar {
        let qb = QueryBar::new(&tab.query, "", true, &state.theme);
        let (cx, cy) = qb.cursor_position(vert[1]);
        frame.set_cursor_position((cx, cy));
    }
}

// ---------------------------------------------------------------------------
// Terminal helpers
// ---------------------------------------------------------------------------

fn install_panic_hook() {
    let original = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original(info);
    }));
}
