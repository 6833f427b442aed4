// Status Bar rendering module
//
// Renders the bottom status line: loop status text followed by frame tallies.

use crate::app::{AppState, LoopState};
use crate::theme::{ACCENT, DONE, LABEL, WARNING};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let status_color = match app.state {
        LoopState::Reading => LABEL,
        LoopState::Drained | LoopState::Terminated => DONE,
    };

    let mut spans = vec![Span::styled(
        app.status_text(),
        Style::default()
            .fg(status_color)
            .add_modifier(Modifier::BOLD),
    )];
    spans.extend(build_tallies(app));

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title(Span::styled(" q: quit  ↑↓/PgUp/PgDn: scroll ", Style::default().fg(ACCENT)))
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .border_style(Style::default().fg(ACCENT)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

/// Flow and frame-outcome counts shown after the status text
pub fn build_tallies(app: &AppState) -> Vec<Span<'static>> {
    let separator = || Span::styled(" | ", Style::default().fg(ACCENT));
    let mut spans = vec![
        separator(),
        Span::styled(
            format!("{} flows", app.flows.len()),
            Style::default().fg(LABEL),
        ),
    ];

    if app.stats.malformed > 0 {
        spans.push(separator());
        spans.push(Span::styled(
            format!("{} malformed", app.stats.malformed),
            Style::default().fg(WARNING),
        ));
    }
    if app.stats.unsupported > 0 {
        spans.push(separator());
        spans.push(Span::styled(
            format!("{} skipped", app.stats.unsupported),
            Style::default().fg(LABEL),
        ));
    }

    spans
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::app_with;

    fn text(spans: &[Span]) -> String {
        spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_tallies_hide_zero_counts() {
        let app = app_with(Vec::new());
        assert_eq!(text(&build_tallies(&app)), " | 0 flows");
    }

    #[test]
    fn test_tallies_show_drops() {
        let mut app = app_with(Vec::new());
        app.stats.malformed = 2;
        app.stats.unsupported = 5;
        assert_eq!(
            text(&build_tallies(&app)),
            " | 0 flows | 2 malformed | 5 skipped"
        );
    }
}
