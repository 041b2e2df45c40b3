//! Terminal user interface for the outfit wizard.
//!
//! This module contains the main TUI loop, `TuiApp`, key handling and the
//! render pass. The session engine drives a [`TerminalSink`]; the render
//! pass draws whatever the sink currently holds.

// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]

pub mod status_bar;
pub mod theme;
pub mod view;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

use crate::render::GalleryContent;
use crate::services::CatalogFeed;
use crate::session::{OutfitSession, UiEvent};

pub use status_bar::StatusBar;
pub use theme::Theme;
pub use view::{AvatarLayer, ControlView, TerminalSink};

/// Interactive state: the session plus cursor and status line.
pub struct TuiApp {
    /// Session rendering into the terminal view model
    pub session: OutfitSession<TerminalSink>,
    /// Gallery cursor within the active step
    pub cursor: usize,
    /// Colors in use
    pub theme: Theme,
    /// Last action, shown in the status bar
    pub status_message: String,
    /// Set when the user asks to leave
    pub should_quit: bool,
    /// Catalogs still loading in the background
    pub feed: Option<CatalogFeed>,
    /// Pick a random outfit once the feed finishes
    pub randomize_on_load: bool,
}

impl TuiApp {
    /// Wraps a started session.
    pub fn new(session: OutfitSession<TerminalSink>, theme: Theme) -> Self {
        let mut app = Self {
            session,
            cursor: 0,
            theme,
            status_message: String::new(),
            should_quit: false,
            feed: None,
            randomize_on_load: false,
        };
        app.sync_cursor();
        app
    }

    /// Attaches a background catalog load to drain on every tick.
    #[must_use]
    pub fn with_feed(mut self, feed: CatalogFeed, randomize_on_load: bool) -> Self {
        self.feed = Some(feed);
        self.randomize_on_load = randomize_on_load;
        self.status_message = "Loading colors...".to_string();
        self
    }

    /// Applies catalogs that arrived since the last tick.
    ///
    /// Returns `true` when anything changed and the frame needs a redraw.
    pub fn poll_catalogs(&mut self) -> bool {
        let Some(feed) = self.feed.as_mut() else {
            return false;
        };
        let applied = self.session.apply_arrivals(feed);
        let finished = feed.is_finished();

        if finished {
            self.feed = None;
            if self.randomize_on_load {
                self.session.randomize();
            }
            self.status_message = "Colors loaded".to_string();
        }
        if applied > 0 || finished {
            self.sync_cursor();
            return true;
        }
        false
    }

    /// Number of items in the visible gallery.
    pub fn gallery_len(&self) -> usize {
        self.session
            .sink()
            .gallery
            .as_ref()
            .map_or(0, |gallery| gallery.items().len())
    }

    /// Puts the cursor on the selected item, or the first one.
    pub fn sync_cursor(&mut self) {
        let view = self.session.sink();
        self.cursor = view
            .gallery
            .as_ref()
            .and_then(|gallery| gallery.items().iter().position(|item| item.selected))
            .unwrap_or(0);
    }

    fn pick_under_cursor(&mut self) {
        let Some(gallery) = self.session.sink().gallery.as_ref() else {
            return;
        };
        let Some(item) = gallery.items().get(self.cursor) else {
            return;
        };
        let event = UiEvent::GalleryClicked {
            layer: gallery.layer.clone(),
            color: item.color_id.clone(),
        };
        self.status_message = format!("{}: {}", gallery.title, item.label);
        self.session.dispatch(event);
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui(app: &mut TuiApp, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    loop {
        app.poll_catalogs();
        terminal.draw(|f| render(f, app))?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if handle_key_event(app, key)? {
                    break;
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Applies one key press. Returns `true` when the user quits.
pub fn handle_key_event(app: &mut TuiApp, key: KeyEvent) -> Result<bool> {
    if key.kind != KeyEventKind::Press {
        return Ok(false);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => {
            app.should_quit = true;
            return Ok(true);
        }
        KeyCode::Left => {
            app.session.dispatch(UiEvent::Back);
            app.sync_cursor();
        }
        KeyCode::Right => {
            app.session.dispatch(UiEvent::Next);
            app.sync_cursor();
        }
        KeyCode::Up => {
            app.cursor = app.cursor.saturating_sub(1);
        }
        KeyCode::Down => {
            if app.cursor + 1 < app.gallery_len() {
                app.cursor += 1;
            }
        }
        KeyCode::Enter | KeyCode::Char(' ') => app.pick_under_cursor(),
        KeyCode::Char('r') => {
            app.session.dispatch(UiEvent::Randomize);
            app.sync_cursor();
            app.status_message = "Random outfit".to_string();
        }
        KeyCode::Char('x') => {
            app.session.dispatch(UiEvent::Reset);
            app.sync_cursor();
            app.status_message = "Outfit reset".to_string();
        }
        KeyCode::Char('c') => {
            let active = app
                .session
                .state()
                .active_layer()
                .map(|layer| (layer.id.clone(), layer.display_label.clone()));
            if let Some((id, label)) = active {
                app.session.dispatch(UiEvent::ClearLayer(id));
                app.status_message = format!("{label} cleared");
            }
        }
        _ => {}
    }

    Ok(false)
}

/// Render the UI from current state
fn render(f: &mut Frame, app: &TuiApp) {
    let theme = &app.theme;
    let full_bg = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(full_bg, f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Step indicator
            Constraint::Min(8),    // Gallery + avatar
            Constraint::Length(3), // Navigation buttons
            Constraint::Length(4), // Status bar
        ])
        .split(f.area());

    render_step_indicator(f, chunks[0], app);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);
    render_gallery(f, main[0], app);
    render_avatar(f, main[1], app);

    render_navigation(f, chunks[2], app);
    StatusBar::render(f, chunks[3], app, theme);
}

fn render_step_indicator(f: &mut Frame, area: Rect, app: &TuiApp) {
    let view = app.session.sink();
    let title = Paragraph::new(view.step_indicator.as_str())
        .style(
            Style::default()
                .fg(app.theme.primary)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_gallery(f: &mut Frame, area: Rect, app: &TuiApp) {
    let theme = &app.theme;
    let Some(gallery) = app.session.sink().gallery.as_ref() else {
        f.render_widget(Block::default().borders(Borders::ALL), area);
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", gallery.title));

    match &gallery.content {
        GalleryContent::Placeholder(text) => {
            let paragraph = Paragraph::new(text.as_str())
                .style(Style::default().fg(theme.warning))
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(paragraph, area);
        }
        GalleryContent::Items(items) => {
            let rows: Vec<ListItem> = items
                .iter()
                .map(|item| {
                    let marker = if item.selected { "● " } else { "  " };
                    let style = if item.selected {
                        Style::default().fg(theme.success)
                    } else {
                        Style::default().fg(theme.text)
                    };
                    ListItem::new(Line::from(vec![
                        Span::styled(marker, style),
                        Span::styled(item.label.as_str(), style),
                        Span::styled(
                            format!("  {}", item.image),
                            Style::default().fg(theme.text_muted),
                        ),
                    ]))
                })
                .collect();

            let list = List::new(rows).block(block).highlight_style(
                Style::default()
                    .bg(theme.highlight_bg)
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            );
            let mut list_state = ListState::default().with_selected(Some(app.cursor));
            f.render_stateful_widget(list, area, &mut list_state);
        }
    }
}

fn render_avatar(f: &mut Frame, area: Rect, app: &TuiApp) {
    let theme = &app.theme;
    let view = app.session.sink();

    let mut lines = Vec::with_capacity(view.surfaces.len() + view.controls.len() + 1);
    for layer in &view.surfaces {
        let (text, style) = match (&layer.image, layer.visible) {
            (Some(image), true) => (image.as_str(), Style::default().fg(theme.text)),
            _ => ("(hidden)", Style::default().fg(theme.text_muted)),
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<18}", layer.surface),
                Style::default().fg(theme.primary),
            ),
            Span::styled(text, style),
        ]));
    }
    lines.push(Line::from(""));
    for control in &view.controls {
        let style = if control.enabled {
            Style::default().fg(theme.text)
        } else {
            Style::default().fg(theme.text_muted)
        };
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<18}", control.control),
                Style::default().fg(theme.primary),
            ),
            Span::styled(format!("[{}]", control.display()), style),
        ]));
    }

    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Avatar "));
    f.render_widget(paragraph, area);
}

fn render_navigation(f: &mut Frame, area: Rect, app: &TuiApp) {
    let theme = &app.theme;
    let view = app.session.sink();
    let back_style = if view.back_enabled {
        Style::default().fg(theme.accent)
    } else {
        Style::default().fg(theme.text_muted)
    };

    let line = Line::from(vec![
        Span::styled("← Back", back_style),
        Span::raw("    "),
        Span::styled(
            format!("{} →", view.next_label),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
    ]);
    let paragraph = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
