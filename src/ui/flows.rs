// Flow list rendering module
//
// Renders the ranked page of flows. The page itself is computed by
// AppState on every tick; this module only paints it.

use crate::app::AppState;
use crate::theme::{ACCENT, ROW_TEXT, TOP_TALKER};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem},
    Frame,
};

pub fn render_flows(f: &mut Frame, area: Rect, app: &AppState) {
    let items: Vec<ListItem> = app
        .rows
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            // Highlight the overall busiest flow only when it is on screen
            let style = if idx == 0 && app.scroll == 0 {
                Style::default().fg(TOP_TALKER).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(ROW_TEXT)
            };
            ListItem::new(Line::from(Span::styled(row.format_row(), style)))
        })
        .collect();

    let title = if app.scroll > 0 {
        format!(" flows ({}) +{} ", app.flows.len(), app.scroll)
    } else {
        format!(" flows ({}) ", app.flows.len())
    };

    let list = List::new(items).block(
        Block::default()
            .title(Span::styled(title, Style::default().fg(ACCENT)))
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(ACCENT)),
    );

    f.render_widget(list, area);
}
