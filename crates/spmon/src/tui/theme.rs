//! Theme and styling for the TUI.

use ratatui::style::{Color, Modifier, Style};
use spmon_timeline::Category;

/// Theme colors and styles for the TUI.
#[derive(Debug, Clone)]
pub struct Theme {
    /// thin-edge.io telemetry (teal)
    pub telemetry: Color,
    /// Sparkplug B (orange)
    pub sparkplug: Color,
    /// Everything else (lavender)
    pub other: Color,
    /// Error color (red)
    pub error: Color,
    /// Muted/secondary text
    pub muted: Color,
    /// Labels and titles
    pub header: Color,
    /// Pane borders
    pub border: Color,
    /// Selected row background
    pub selection_bg: Color,
    /// Selected row foreground
    pub selection_fg: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            telemetry: Color::Rgb(0x00, 0xd7, 0xaf),
            sparkplug: Color::Rgb(0xff, 0x87, 0x00),
            other: Color::Rgb(0x87, 0x87, 0xd7),
            error: Color::Rgb(0xff, 0x5f, 0x5f),
            muted: Color::Rgb(0x66, 0x66, 0x66),
            header: Color::Rgb(0xaa, 0xaa, 0xaa),
            border: Color::Rgb(0x44, 0x44, 0x44),
            selection_bg: Color::Rgb(0x00, 0x5f, 0x87),
            selection_fg: Color::White,
        }
    }
}

impl Theme {
    /// Style for a topic family.
    pub fn category_style(&self, category: Category) -> Style {
        let color = match category {
            Category::PrimaryTelemetry => self.telemetry,
            Category::BinaryProtocol => self.sparkplug,
            Category::Other => self.other,
        };
        Style::default().fg(color)
    }

    /// Style for positive state (connected, `true`, status text).
    pub fn success_style(&self) -> Style {
        Style::default().fg(self.telemetry)
    }

    /// Style for error messages.
    pub fn error_style(&self) -> Style {
        Style::default().fg(self.error)
    }

    /// Style for muted/secondary text.
    pub fn muted_style(&self) -> Style {
        Style::default().fg(self.muted)
    }

    /// Style for labels, titles and JSON keys.
    pub fn header_style(&self) -> Style {
        Style::default().fg(self.header).add_modifier(Modifier::BOLD)
    }

    /// Style for pane borders.
    pub fn border_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for the selected list row.
    pub fn selected_style(&self) -> Style {
        Style::default()
            .fg(self.selection_fg)
            .bg(self.selection_bg)
            .add_modifier(Modifier::BOLD)
    }
}

/// List icon for a topic family
pub fn category_icon(category: Category) -> &'static str {
    match category {
        Category::PrimaryTelemetry => "●",
        Category::BinaryProtocol => "◆",
        Category::Other => "◉",
    }
}
