//! Status bar widget for the last action and key help

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{Theme, TuiApp};

/// Key bindings shown in the help line.
const KEY_HELP: &[(&str, &str)] = &[
    ("←/→", "Step"),
    ("↑/↓", "Move"),
    ("Enter", "Pick"),
    ("r", "Random"),
    ("c", "Clear"),
    ("x", "Reset"),
    ("q", "Quit"),
];

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with the last status message and key help
    pub fn render(f: &mut Frame, area: Rect, app: &TuiApp, theme: &Theme) {
        let status_line = if app.status_message.is_empty() {
            Line::from(Span::styled(
                "Pick a color for each layer",
                Style::default().fg(theme.text_muted),
            ))
        } else {
            Line::from(Span::styled(
                app.status_message.as_str(),
                Style::default().fg(theme.text),
            ))
        };

        let paragraph = Paragraph::new(vec![status_line, Self::help_line(theme)])
            .block(Block::default().borders(Borders::ALL).title(" Status "))
            .style(Style::default().bg(theme.background));
        f.render_widget(paragraph, area);
    }

    fn help_line(theme: &Theme) -> Line<'static> {
        let mut spans = Vec::with_capacity(KEY_HELP.len() * 2);
        for (key, action) in KEY_HELP {
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::styled(
                format!(" {action}  "),
                Style::default().fg(theme.text_muted),
            ));
        }
        Line::from(spans)
    }
}
