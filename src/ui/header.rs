// Header pane rendering module
//
// Renders the column labels above the flow list.

use crate::flow::header_row;
use crate::theme::{ACCENT, LABEL};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

pub fn render_header(f: &mut Frame, area: Rect) {
    let labels = Line::from(vec![Span::styled(
        header_row(),
        Style::default().fg(LABEL).add_modifier(Modifier::BOLD),
    )]);

    let header = Paragraph::new(labels)
        .block(
            Block::default()
                .title(Span::styled(
                    " pcaptop ",
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                ))
                .borders(Borders::ALL)
                .border_type(BorderType::Plain)
                .border_style(Style::default().fg(ACCENT)),
        )
        .alignment(Alignment::Left);

    f.render_widget(header, area);
}
