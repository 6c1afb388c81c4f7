//! Settings summary panel shown above every screen.

use crate::config::QuerySettings;
use crate::model::flare_class::comparator_display;
use crate::model::wavelength::wave_display;
use crate::view::constants::SUMMARY_TITLE;
use crate::view::ScreenStyles;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

const UNSET: &str = "<unset>";

// ===== SummaryPanel Widget =====

/// Summary of the saved query settings.
///
/// Displays:
/// - Wavelengths, with catalogue runs collapsed
/// - Start and end dates
/// - Class threshold and comparator
pub struct SummaryPanel<'a> {
    settings: &'a QuerySettings,
    styles: &'a ScreenStyles,
}

impl<'a> SummaryPanel<'a> {
    /// Create a new SummaryPanel widget.
    pub fn new(settings: &'a QuerySettings, styles: &'a ScreenStyles) -> Self {
        Self { settings, styles }
    }

    fn row(&self, label: &'static str, value: String) -> Line<'static> {
        let value_style = if value == UNSET {
            self.styles.muted
        } else {
            self.styles.value
        };
        Line::from(vec![
            Span::styled(format!("{label:<12}"), self.styles.label),
            Span::styled(value, value_style),
        ])
    }

    /// Content lines, one per setting.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let s = self.settings;
        vec![
            self.row("Wavelength", wave_display(&s.wave)),
            self.row("Start", or_unset(&s.start)),
            self.row("End", or_unset(&s.end)),
            self.row("Class", or_unset(&s.flare_class)),
            self.row("Comparator", comparator_display(&s.comparator).to_string()),
        ]
    }
}

fn or_unset(value: &str) -> String {
    match value.trim() {
        "" => UNSET.to_string(),
        trimmed => trimmed.to_string(),
    }
}

impl Widget for SummaryPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(SUMMARY_TITLE)
            .borders(Borders::ALL)
            .border_style(self.styles.border);
        Paragraph::new(self.lines()).block(block).render(area, buf);
    }
}
