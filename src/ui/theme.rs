use crate::trace::LineCategory;
use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub keyword: Color,
    pub string: Color,
    pub number: Color,
    pub border_focused: Color,
    pub border_normal: Color,
    pub current_line_bg: Color,
    pub highlight_bg: Color, // Row of the variable the step touched
    pub function: Color,
    pub type_name: Color, // Cyan for type names
    pub uninit: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    keyword: Color::Rgb(137, 180, 250),        // Blue for keywords
    string: Color::Rgb(250, 179, 135),         // Orange for strings
    number: Color::Rgb(250, 179, 135),         // Orange for numbers
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    current_line_bg: Color::Rgb(50, 50, 70),   // Slightly lighter BG for current line
    highlight_bg: Color::Rgb(40, 60, 90),
    function: Color::Rgb(249, 226, 175), // Yellow for functions
    type_name: Color::Rgb(148, 226, 213), // Cyan/teal for type names
    uninit: Color::Rgb(243, 139, 168),
};

impl Theme {
    /// Gutter marker color for a line category
    pub fn category(&self, category: Option<LineCategory>) -> Color {
        match category {
            Some(LineCategory::Declaration) => self.primary,
            Some(LineCategory::Input) => self.success,
            Some(LineCategory::Output) => Color::Rgb(203, 166, 247), // Purple
            Some(LineCategory::Calculation) => self.secondary,
            Some(LineCategory::Condition) => self.function,
            Some(LineCategory::Loop) => Color::Rgb(245, 194, 231), // Pink
            None => self.comment,
        }
    }
}
