//! Main application state and TUI event loop for Travelog.
//!
//! [`App`] owns the theme, view mode, and the [`PanelState`] built from the
//! last received snapshot.  It drives both the live dashboard and the
//! static table view event loops.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    text::{Line, Span},
    widgets::Paragraph,
    Frame, Terminal,
};
use tokio::sync::mpsc;

use travelog_core::presenter::Presenter;
use travelog_runtime::orchestrator::TravelData;

use crate::components::header::Header;
use crate::panel::PanelState;
use crate::themes::Theme;
use crate::trip_view;

// ── ViewMode ──────────────────────────────────────────────────────────────────

/// Which view the TUI is currently rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewMode {
    /// Live dashboard showing trips and stays side by side.
    Dashboard,
    /// Transport-segment table only.
    Trips,
    /// Stay-interval table only.
    Stays,
}

impl ViewMode {
    /// Parse a view name from configuration; unknown names fall back to
    /// the dashboard.
    pub fn from_name(name: &str) -> Self {
        match name {
            "trips" => ViewMode::Trips,
            "stays" => ViewMode::Stays,
            _ => ViewMode::Dashboard,
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the Travelog TUI.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Current view mode.
    pub view_mode: ViewMode,
    /// Feed source label shown in the header (e.g. `"cities.json"`).
    pub source: String,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    /// Presentation state built from the last snapshot.
    pub panel: PanelState,
    /// Zone names from the last snapshot's overlay.
    pub zone_names: Vec<String>,
    /// Formatted time of the last refresh, empty until data arrives.
    pub updated: String,
}

impl App {
    /// Construct a new application with the given configuration.
    pub fn new(theme_name: &str, view_mode: ViewMode, source: String) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            view_mode,
            source,
            should_quit: false,
            panel: PanelState::new(),
            zone_names: Vec::new(),
            updated: String::new(),
        }
    }

    // ── Public event loops ────────────────────────────────────────────────────

    /// Run the live dashboard TUI, receiving refreshed data from `rx`.
    ///
    /// Uses `crossterm::event::poll` (synchronous, with a 250 ms timeout) so
    /// that the terminal event loop stays on the current thread while data
    /// updates arrive on the async channel via `try_recv`.
    ///
    /// Keys: `q`/`Q`/`Ctrl+C` quit, `t`/`s`/`d` switch views, arrow keys
    /// move the trip selection.
    pub async fn run_dashboard(mut self, mut rx: mpsc::Receiver<TravelData>) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard events with a short timeout so we don't block.
            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break Ok(());
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break Ok(()),
                        KeyCode::Char('t') => self.view_mode = ViewMode::Trips,
                        KeyCode::Char('s') => self.view_mode = ViewMode::Stays,
                        KeyCode::Char('d') => self.view_mode = ViewMode::Dashboard,
                        KeyCode::Down => self.panel.select_next(),
                        KeyCode::Up => self.panel.select_previous(),
                        _ => {}
                    }
                }
            }

            // Drain any pending data updates (non-blocking).
            loop {
                match rx.try_recv() {
                    Ok(data) => self.update_from_refresh(data),
                    Err(mpsc::error::TryRecvError::Empty) => break,
                    Err(mpsc::error::TryRecvError::Disconnected) => {
                        self.should_quit = true;
                        break;
                    }
                }
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    /// Run a static table view (trips or stays), then wait for `q` / `Ctrl+C`.
    ///
    /// The panel must already be populated; no channel is involved.
    pub async fn run_table(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        loop {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            break;
                        }
                        KeyCode::Char('q') | KeyCode::Char('Q') => break,
                        KeyCode::Down => self.panel.select_next(),
                        KeyCode::Up => self.panel.select_previous(),
                        _ => {}
                    }
                }
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        Ok(())
    }

    // ── Data plumbing ─────────────────────────────────────────────────────────

    /// Fold an incoming [`TravelData`] refresh into the panel.
    ///
    /// Clears the panel first, then presents the snapshot through it; the
    /// panel reconciles the row selection against the new trip count.
    pub fn update_from_refresh(&mut self, data: TravelData) {
        self.panel.clear_all();
        data.snapshot.present(&mut self.panel);
        self.zone_names = data.zones.into_iter().map(|z| z.name).collect();
        self.updated = data.generated_at.format("%H:%M:%S").to_string();
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        if self.panel.is_empty() && self.updated.is_empty() {
            trip_view::render_no_data(frame, area, &self.theme);
            return;
        }

        match self.view_mode {
            ViewMode::Dashboard => {
                let [header_area, trips_area, stays_area, footer_area] = Layout::vertical([
                    Constraint::Length(4),
                    Constraint::Min(5),
                    Constraint::Min(5),
                    Constraint::Length(1),
                ])
                .areas(area);

                let header = Header::new(&self.source, &self.updated, &self.theme);
                frame.render_widget(Paragraph::new(header.to_lines()), header_area);

                trip_view::render_trip_table(
                    frame,
                    trips_area,
                    &self.panel.trips,
                    self.panel.total_km,
                    self.panel.selected,
                    &self.theme,
                );
                trip_view::render_stay_table(
                    frame,
                    stays_area,
                    &self.panel.stays,
                    self.panel.total_nights,
                    &self.theme,
                );
                frame.render_widget(Paragraph::new(self.footer_line()), footer_area);
            }
            ViewMode::Trips => {
                trip_view::render_trip_table(
                    frame,
                    area,
                    &self.panel.trips,
                    self.panel.total_km,
                    self.panel.selected,
                    &self.theme,
                );
            }
            ViewMode::Stays => {
                trip_view::render_stay_table(
                    frame,
                    area,
                    &self.panel.stays,
                    self.panel.total_nights,
                    &self.theme,
                );
            }
        }
    }

    /// One-line footer: key hints plus the zones overlay, when present.
    fn footer_line(&self) -> Line<'_> {
        let mut spans = vec![Span::styled(
            " t trips | s stays | d dashboard | q quit ",
            self.theme.dim,
        )];
        if !self.zone_names.is_empty() {
            spans.push(Span::styled(
                format!(" zones: {} ", self.zone_names.join(", ")),
                self.theme.info,
            ));
        }
        Line::from(spans)
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
