//! Whole-screen rendering.
//!
//! Title bar on top, settings summary below it, the mode's content block
//! centred underneath, and the notice and key hints on the last two rows.

use crate::state::AppState;
use crate::view::constants::{APP_SUBTITLE, APP_TITLE};
use crate::view::help::help_text;
use crate::view::screens::render_mode;
use crate::view::summary::SummaryPanel;
use crate::view::ScreenStyles;
use crate::view_state::layout::{FOOTER_HEIGHT, SUMMARY_HEIGHT, TITLE_BAR_HEIGHT};
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render one frame of the application.
pub fn render_layout(frame: &mut Frame, state: &AppState, styles: &ScreenStyles) {
    let area = frame.area();

    render_title_bar(frame, Rect::new(area.x, area.y, area.width, TITLE_BAR_HEIGHT), styles);

    let summary_area =
        Rect::new(area.x, area.y + TITLE_BAR_HEIGHT, area.width, SUMMARY_HEIGHT).intersection(area);
    if !summary_area.is_empty() {
        frame.render_widget(SummaryPanel::new(state.settings(), styles), summary_area);
    }

    render_mode(frame, state, &state.layout(), styles);

    // Footer last so it wins over a block taller than the terminal.
    if area.height >= FOOTER_HEIGHT {
        let notice_row = Rect::new(area.x, area.bottom() - 2, area.width, 1);
        let help_row = Rect::new(area.x, area.bottom() - 1, area.width, 1);
        let notice = state.notice().unwrap_or_default();
        frame.render_widget(Paragraph::new(notice).style(styles.notice), notice_row);
        frame.render_widget(
            Paragraph::new(help_text(&state.mode)).style(styles.help),
            help_row,
        );
    }
}

fn render_title_bar(frame: &mut Frame, area: Rect, styles: &ScreenStyles) {
    let area = area.intersection(frame.area());
    if area.is_empty() {
        return;
    }
    let line = Line::from(vec![
        Span::raw(" "),
        Span::raw(APP_TITLE),
        Span::raw(" · "),
        Span::raw(APP_SUBTITLE),
    ]);
    frame.render_widget(Paragraph::new(line).style(styles.title), area);
}
