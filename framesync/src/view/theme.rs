//! Theme-aware colors for the chart and the thumbnail strip.

use iced::{Color, Theme};

/// Line colors assigned to series in order, wrapping around.
const SERIES_PALETTE: [Color; 6] = [
    Color::from_rgb(0.33, 0.44, 0.78),
    Color::from_rgb(0.57, 0.80, 0.46),
    Color::from_rgb(0.98, 0.78, 0.35),
    Color::from_rgb(0.93, 0.40, 0.40),
    Color::from_rgb(0.45, 0.75, 0.87),
    Color::from_rgb(0.23, 0.64, 0.45),
];

/// Theme-aware color palette.
pub struct ThemeColors<'a> {
    theme: &'a Theme,
}

impl<'a> ThemeColors<'a> {
    /// Create a new color palette from the given theme.
    pub fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn palette(&self) -> &iced::theme::palette::Extended {
        self.theme.extended_palette()
    }

    // ========================================================================
    // Text Colors
    // ========================================================================

    /// Secondary text color (less prominent).
    pub fn text_muted(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.6, 0.6, 0.6)
        } else {
            Color::from_rgb(0.4, 0.4, 0.4)
        }
    }

    /// Text color for failures.
    pub fn text_error(&self) -> Color {
        Color::from_rgb(0.9, 0.35, 0.35)
    }

    // ========================================================================
    // Chart Colors
    // ========================================================================

    /// Chart background color.
    pub fn chart_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.08, 0.08, 0.1)
        } else {
            Color::from_rgb(0.98, 0.98, 0.99)
        }
    }

    /// Chart outer background.
    pub fn chart_outer_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.1, 0.1, 0.12)
        } else {
            Color::from_rgb(0.95, 0.95, 0.96)
        }
    }

    /// Chart grid lines.
    pub fn chart_grid(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.2, 0.2, 0.25)
        } else {
            Color::from_rgb(0.85, 0.85, 0.88)
        }
    }

    /// Chart axis labels.
    pub fn chart_label(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.5, 0.5, 0.5)
        } else {
            Color::from_rgb(0.4, 0.4, 0.4)
        }
    }

    /// Chart tooltip background.
    pub fn chart_tooltip_background(&self) -> Color {
        if self.is_dark() {
            Color::from_rgba(0.0, 0.0, 0.0, 0.85)
        } else {
            Color::from_rgba(1.0, 1.0, 1.0, 0.95)
        }
    }

    /// Chart tooltip text.
    pub fn chart_tooltip_text(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.9, 0.9, 0.9)
        } else {
            Color::from_rgb(0.1, 0.1, 0.1)
        }
    }

    /// Chart highlight color (crosshair).
    pub fn chart_highlight(&self) -> Color {
        if self.is_dark() {
            Color::from_rgb(0.3, 0.8, 1.0)
        } else {
            Color::from_rgb(0.1, 0.5, 0.8)
        }
    }

    /// Line color of the series at `index`.
    pub fn series(&self, index: usize) -> Color {
        SERIES_PALETTE[index % SERIES_PALETTE.len()]
    }

    // ========================================================================
    // Strip Colors
    // ========================================================================

    /// Background of the thumbnail strip.
    pub fn strip_background(&self) -> Color {
        self.palette().background.weak.color
    }

    /// Border drawn around the target thumbnail.
    pub fn target_border(&self) -> Color {
        self.chart_highlight()
    }

    // ========================================================================
    // Utility
    // ========================================================================

    /// Check if the current theme is dark.
    pub fn is_dark(&self) -> bool {
        self.palette().is_dark
    }
}

/// Convenience function to create ThemeColors.
pub fn colors(theme: &Theme) -> ThemeColors<'_> {
    ThemeColors::new(theme)
}
