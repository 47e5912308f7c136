//! Colors of the graph.

use ratatui::style::{Color, Modifier, Style};

/// Ten color cycle used for metrics. Mirrors the usual categorical plotting palette.
pub const SERIES_COLORS: [Color; 10] = [
    Color::Rgb(31, 119, 180),
    Color::Rgb(255, 127, 14),
    Color::Rgb(44, 160, 44),
    Color::Rgb(214, 39, 40),
    Color::Rgb(148, 103, 189),
    Color::Rgb(140, 86, 75),
    Color::Rgb(227, 119, 194),
    Color::Rgb(127, 127, 127),
    Color::Rgb(188, 189, 34),
    Color::Rgb(23, 190, 207),
];

pub fn series_color(index: usize) -> Color {
    SERIES_COLORS[index % SERIES_COLORS.len()]
}

pub struct Styles;

impl Styles {
    pub fn title() -> Style {
        Style::default().add_modifier(Modifier::BOLD)
    }

    pub fn axis() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn status() -> Style {
        Style::default().fg(Color::White).bg(Color::Blue)
    }

    pub fn placeholder() -> Style {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC)
    }
}
