// Theme module - Color constants
//
// The palette shared by every pane.

use ratatui::style::Color;

/// Borders and pane titles
/// RGB: (122, 162, 247)
pub const ACCENT: Color = Color::Rgb(122, 162, 247);

/// Column labels and neutral status text
/// RGB: (169, 177, 214)
pub const LABEL: Color = Color::Rgb(169, 177, 214);

/// Ordinary flow rows
pub const ROW_TEXT: Color = Color::Gray;

/// The busiest flow
/// RGB: (255, 158, 100)
pub const TOP_TALKER: Color = Color::Rgb(255, 158, 100);

/// Status once the capture is exhausted
/// RGB: (158, 206, 106)
pub const DONE: Color = Color::Rgb(158, 206, 106);

/// Malformed frame count
/// RGB: (247, 118, 142)
pub const WARNING: Color = Color::Rgb(247, 118, 142);
