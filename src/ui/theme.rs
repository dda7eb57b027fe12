use crate::grid::Color as CellColor;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub unlit: Color,
    pub wall: Color,
    pub turtle: Color,
    pub visited_bg: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    unlit: Color::Rgb(69, 71, 90),
    wall: Color::Rgb(186, 194, 222),
    turtle: Color::Rgb(249, 226, 175),
    visited_bg: Color::Rgb(40, 52, 60),
};

/// Terminal color of a lit cell.
pub fn cell_color(color: CellColor) -> Color {
    match color {
        CellColor::Red => Color::Rgb(243, 80, 80),
        CellColor::Green => Color::Rgb(110, 210, 110),
        CellColor::Blue => Color::Rgb(90, 130, 250),
        CellColor::White => Color::Rgb(240, 240, 240),
        CellColor::Yellow => Color::Rgb(245, 220, 90),
        CellColor::Cyan => Color::Rgb(100, 220, 225),
        CellColor::Magenta => Color::Rgb(220, 100, 220),
    }
}
