// UI rendering module
//
// This module contains all UI rendering components for pcaptop.
// The main draw() function stacks the header, flow list and status panes.

mod flows;
mod header;
mod status_bar;

use crate::app::config::{HEADER_HEIGHT, STATUS_HEIGHT};
use crate::app::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};
use thiserror::Error;

use flows::render_flows;
use header::render_header;
use status_bar::render_status_bar;

/// Display surface failures; always fatal
#[derive(Debug, Error)]
pub enum DisplayError {
    #[error("terminal is {width}x{height}, need at least {min_width}x{min_height}")]
    TooSmall {
        width: u16,
        height: u16,
        min_width: u16,
        min_height: u16,
    },
}

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &AppState) {
    let size = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT), // Column labels
            Constraint::Min(0),                // Ranked flows
            Constraint::Length(STATUS_HEIGHT), // Status line
        ])
        .split(size);

    render_header(f, chunks[0]);
    render_flows(f, chunks[1], app);
    render_status_bar(f, chunks[2], app);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::{app_with, three_frame_capture};
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn line(buffer: &Buffer, y: u16) -> String {
        (0..buffer.area.width)
            .map(|x| buffer[(x, y)].symbol())
            .collect()
    }

    fn render(app: &AppState, width: u16, height: u16) -> Buffer {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal.backend().buffer().clone()
    }

    #[test]
    fn test_draw_three_panes() {
        let mut app = app_with(three_frame_capture());
        for _ in 0..3 {
            app.on_tick();
        }
        let buffer = render(&app, 80, 12);

        let header = line(&buffer, 1);
        assert!(header.contains("src             sport  -> dst             dport  packets    bytes"));

        // Content pane starts at row 3; first row inside its border is row 4
        let first = line(&buffer, 4);
        assert!(first.contains("192.168.0.3     5000   -> 192.168.0.4     53     1          500"));
        let second = line(&buffer, 5);
        assert!(second.contains("10.0.0.1        40000  -> 10.0.0.2        443    2          150"));

        let status = line(&buffer, 10);
        assert!(status.contains("Read 3 packets"));
    }

    #[test]
    fn test_draw_drained_status() {
        let mut app = app_with(Vec::new());
        app.on_tick();
        let buffer = render(&app, 80, 10);

        assert!(line(&buffer, 8).contains("No more packets."));
    }

    #[test]
    fn test_too_small_message() {
        let err = DisplayError::TooSmall {
            width: 40,
            height: 5,
            min_width: 72,
            min_height: 8,
        };
        assert_eq!(err.to_string(), "terminal is 40x5, need at least 72x8");
    }
}
