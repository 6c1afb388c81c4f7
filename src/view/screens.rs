//! Content block of each mode.
//!
//! Every row is placed from the same [`BlockLayout`] the hit tester reads,
//! so what is drawn at a position is what a click there resolves to.

use crate::model::wavelength::WAVE_OPTIONS;
use crate::model::DisplayedIndex;
use crate::state::mode::{
    CacheDeleteState, CacheViewerState, DateEditorState, FilterColumn, FilterEditorState,
    MainMenuState, Mode, SelectorState, SelectorTable, WavelengthEditorState, CACHE_MENU_ITEMS,
    MENU_ITEMS,
};
use crate::state::AppState;
use crate::view::constants::{spinner_frame, FOCUS_MARKER};
use crate::view::ScreenStyles;
use crate::view_state::layout::{
    cache_cells, cache_columns, delete_title, filter_option_labels, pick_marker, search_line,
    selector_cells, selector_columns, selector_title, viewer_title, wave_row_text, BlockLayout,
    ColumnBand, RegionLayout, TableColumns, CACHE_MENU_TITLE, DATE_LABELS, FILTER_COLUMN_TITLES,
    FILTER_TITLE, LOADING_TITLE, MENU_TITLE, TABLE_COLUMN_SPACING, WAVE_TITLE,
};
use ratatui::{
    layout::{Alignment, Rect},
    style::Style,
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthChar;

/// Draw the content block of the active mode.
pub fn render_mode(frame: &mut Frame, state: &AppState, layout: &BlockLayout, styles: &ScreenStyles) {
    match &state.mode {
        Mode::MainMenu(menu) => render_menu(frame, layout, menu, styles),
        Mode::WavelengthEditor(editor) => render_wavelengths(frame, layout, editor, styles),
        Mode::DateRangeEditor(editor) => render_dates(frame, layout, editor, state, styles),
        Mode::FlareFilterEditor(editor) => render_filter(frame, layout, editor, styles),
        Mode::FlareSelector(SelectorState::Loading { spinner, .. }) => {
            let text = format!("{} {LOADING_TITLE}", spinner_frame(*spinner));
            put(frame, layout.line(0, 0, layout.area.width), Line::styled(text, styles.heading));
        }
        Mode::FlareSelector(SelectorState::Ready(table)) => {
            render_selector(frame, layout, table, styles)
        }
        Mode::CacheViewer(viewer) => render_viewer(frame, layout, viewer, styles),
        Mode::CacheDeleteEditor(delete) => render_delete(frame, layout, delete, styles),
    }
}

// ===== Helpers =====

/// Draw `line` into `rect`, clipped to the frame.
fn put(frame: &mut Frame, rect: Rect, line: Line<'_>) {
    let rect = rect.intersection(frame.area());
    if !rect.is_empty() {
        frame.render_widget(Paragraph::new(line), rect);
    }
}

/// Truncate or pad `text` to exactly `width` columns.
pub fn fit(text: &str, width: u16) -> String {
    let width = usize::from(width);
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        out.push(c);
        used += w;
    }
    out.extend(std::iter::repeat(' ').take(width - used));
    out
}

fn inset(band: ColumnBand, by: u16) -> ColumnBand {
    ColumnBand {
        start: band.start + by,
        width: band.width.saturating_sub(2 * by),
    }
}

fn marker(focused: bool) -> &'static str {
    if focused {
        FOCUS_MARKER
    } else {
        "  "
    }
}

// ===== Menus =====

fn render_menu(frame: &mut Frame, layout: &BlockLayout, menu: &MainMenuState, styles: &ScreenStyles) {
    let labels: Vec<&str> = MENU_ITEMS.iter().map(|item| item.label()).collect();
    if let Some(main) = layout.regions.first() {
        let active = menu.cache_menu.is_none();
        render_menu_column(frame, layout, main, MENU_TITLE, &labels, menu.selected, active, styles);
    }
    if let (Some(sub), Some(region)) = (menu.cache_menu, layout.regions.get(1)) {
        let labels: Vec<&str> = CACHE_MENU_ITEMS.iter().map(|item| item.label()).collect();
        render_menu_column(frame, layout, region, CACHE_MENU_TITLE, &labels, sub.selected, true, styles);
    }
}

#[allow(clippy::too_many_arguments)]
fn render_menu_column(
    frame: &mut Frame,
    layout: &BlockLayout,
    region: &RegionLayout,
    title: &str,
    labels: &[&str],
    selected: usize,
    active: bool,
    styles: &ScreenStyles,
) {
    let heading = layout.band_rect(region.band, region.header_rows.start, 1);
    put(frame, heading, Line::styled(title.to_string(), styles.heading));
    for (option, rel_y) in region.rows() {
        let Some(label) = labels.get(option) else {
            continue;
        };
        let is_selected = option == selected;
        let style = match (is_selected, active) {
            (true, true) => styles.focus,
            (true, false) => styles.picked,
            _ => styles.value,
        };
        let text = fit(&format!("{}{label}", marker(is_selected)), region.band.width);
        put(frame, layout.band_rect(region.band, rel_y, 1), Line::styled(text, style));
    }
}

// ===== Editors =====

fn render_wavelengths(
    frame: &mut Frame,
    layout: &BlockLayout,
    editor: &WavelengthEditorState,
    styles: &ScreenStyles,
) {
    put(frame, layout.line(0, 0, layout.area.width), Line::styled(WAVE_TITLE, styles.heading));
    let Some(region) = layout.regions.first() else {
        return;
    };
    for (option, rel_y) in region.rows() {
        let Some(wave) = WAVE_OPTIONS.get(option) else {
            continue;
        };
        let checked = editor.selected.contains(&option);
        let style = if option == editor.focus {
            styles.focus
        } else if checked {
            styles.picked
        } else {
            styles.value
        };
        let text = fit(&wave_row_text(wave, checked), region.band.width);
        put(frame, layout.band_rect(region.band, rel_y, 1), Line::styled(text, style));
    }
}

fn render_dates(
    frame: &mut Frame,
    layout: &BlockLayout,
    editor: &DateEditorState,
    state: &AppState,
    styles: &ScreenStyles,
) {
    let Some(region) = layout.regions.first() else {
        return;
    };
    let saved = [state.settings().start.trim(), state.settings().end.trim()];
    let typed = [editor.start.as_str(), editor.end.as_str()];
    for (option, rel_y) in region.rows() {
        let focused = option == editor.focus.index();
        let label = DATE_LABELS.get(option).copied().unwrap_or_default();
        put(
            frame,
            layout.band_rect(region.band, rel_y.saturating_sub(1), 1),
            Line::styled(label, styles.label),
        );

        let value = typed.get(option).copied().unwrap_or_default();
        let (text, style) = if value.is_empty() {
            let placeholder = saved.get(option).copied().unwrap_or_default();
            (placeholder.to_string(), styles.muted)
        } else if focused {
            (format!("{value}_"), styles.value)
        } else {
            (value.to_string(), styles.value)
        };
        let field_style = if focused { styles.focus } else { style };
        let field = format!("[{}]", fit(&text, 10));
        put(frame, layout.band_rect(region.band, rel_y, 1), Line::styled(field, field_style));
    }
}

fn render_filter(
    frame: &mut Frame,
    layout: &BlockLayout,
    editor: &FilterEditorState,
    styles: &ScreenStyles,
) {
    put(frame, layout.line(0, 0, layout.area.width), Line::styled(FILTER_TITLE, styles.heading));
    for (column, region) in FilterColumn::ALL.iter().zip(&layout.regions) {
        let focused = editor.focus == *column;
        let top = region.header_rows.start;
        let height = (region.first_row - top) + region.window.size as u16 + 1;
        let border = if focused { styles.heading } else { styles.border };
        let frame_rect = layout.band_rect(region.band, top, height).intersection(frame.area());
        if !frame_rect.is_empty() {
            frame.render_widget(
                Block::default().borders(Borders::ALL).border_style(border),
                frame_rect,
            );
        }

        let inner = inset(region.band, 1);
        let title = FILTER_COLUMN_TITLES[column.index()];
        let title_rect = layout.band_rect(inner, top + 1, 1).intersection(frame.area());
        if !title_rect.is_empty() {
            frame.render_widget(
                Paragraph::new(Line::styled(title, styles.label)).alignment(Alignment::Center),
                title_rect,
            );
        }
        put(
            frame,
            layout.band_rect(inner, top + 2, 1),
            Line::styled("─".repeat(usize::from(inner.width)), border),
        );

        let labels = filter_option_labels(*column);
        let padded = inset(region.band, 2);
        for (option, rel_y) in region.rows() {
            let Some(label) = labels.get(option) else {
                continue;
            };
            let is_selected = editor.selected_in(*column) == option;
            let style = match (is_selected, focused) {
                (true, true) => styles.focus,
                (true, false) => styles.picked,
                _ => styles.value,
            };
            let text = fit(&format!("{}{label}", marker(is_selected)), padded.width);
            put(frame, layout.band_rect(padded, rel_y, 1), Line::styled(text, style));
        }
    }
}

// ===== Tables =====

/// One table row: cells and whether it is picked.
struct TableRow {
    cells: Vec<String>,
    picked: bool,
}

fn table_line<S: AsRef<str>>(cells: &[S], widths: &[u16]) -> String {
    let gap = " ".repeat(usize::from(TABLE_COLUMN_SPACING));
    cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| fit(cell.as_ref(), width))
        .collect::<Vec<_>>()
        .join(&gap)
}

/// Draw title lines and a bordered table whose visible rows come from the
/// block's single region.
fn render_table(
    frame: &mut Frame,
    layout: &BlockLayout,
    titles: Vec<Line<'static>>,
    columns: &TableColumns,
    row_at: impl Fn(usize) -> Option<TableRow>,
    cursor: usize,
    styles: &ScreenStyles,
) {
    for (rel_y, title) in titles.into_iter().enumerate() {
        put(frame, layout.line(0, rel_y as u16, layout.area.width), title);
    }
    let Some(region) = layout.regions.first() else {
        return;
    };

    let top = region.header_rows.start;
    let height = (region.first_row - top) + region.window.size as u16 + 1;
    let table_rect = layout.band_rect(region.band, top, height).intersection(frame.area());
    if !table_rect.is_empty() {
        frame.render_widget(
            Block::default().borders(Borders::ALL).border_style(styles.border),
            table_rect,
        );
    }

    let inner = inset(region.band, 1);
    put(
        frame,
        layout.band_rect(inner, top + 1, 1),
        Line::styled(table_line(&columns.titles, &columns.widths), styles.label),
    );

    for (option, rel_y) in region.rows() {
        let Some(row) = row_at(option) else {
            continue;
        };
        let style: Style = if option == cursor {
            styles.focus
        } else if row.picked {
            styles.picked
        } else {
            styles.value
        };
        let text = fit(&table_line(&row.cells, &columns.widths), inner.width);
        put(frame, layout.band_rect(inner, rel_y, 1), Line::styled(text, style));
    }
}

fn render_selector(
    frame: &mut Frame,
    layout: &BlockLayout,
    table: &SelectorTable,
    styles: &ScreenStyles,
) {
    let titles = vec![Line::styled(selector_title(table), styles.heading)];
    let columns = selector_columns(&table.records);
    let row_at = |i: usize| {
        let record = table.records.get(i)?;
        let picked = table.picked.contains(DisplayedIndex::new(i));
        let mut cells = vec![pick_marker(picked).to_string()];
        cells.extend(selector_cells(record).map(str::to_string));
        Some(TableRow { cells, picked })
    };
    render_table(frame, layout, titles, &columns, row_at, table.window.cursor(), styles);
}

fn render_viewer(
    frame: &mut Frame,
    layout: &BlockLayout,
    viewer: &CacheViewerState,
    styles: &ScreenStyles,
) {
    let titles = vec![Line::styled(viewer_title(viewer), styles.heading)];
    let columns = cache_columns(&viewer.records, false);
    let row_at = |i: usize| {
        let record = viewer.records.get(i)?;
        Some(TableRow {
            cells: cache_cells(record).map(str::to_string).to_vec(),
            picked: false,
        })
    };
    render_table(frame, layout, titles, &columns, row_at, viewer.window.cursor(), styles);
}

fn render_delete(
    frame: &mut Frame,
    layout: &BlockLayout,
    delete: &CacheDeleteState,
    styles: &ScreenStyles,
) {
    let titles = vec![
        Line::styled(delete_title(delete), styles.heading),
        Line::styled(search_line(delete), styles.label),
    ];
    let columns = cache_columns(&delete.records, true);
    let visible = delete.filter.visible(&delete.records);
    let source_len = delete.records.len();
    let row_at = |i: usize| {
        let record = visible.get(i)?;
        let picked = delete
            .filter
            .original_index(DisplayedIndex::new(i), source_len)
            .is_some_and(|original| delete.picks.contains(original));
        let mut cells = vec![pick_marker(picked).to_string()];
        cells.extend(cache_cells(record).map(str::to_string));
        Some(TableRow { cells, picked })
    };
    render_table(frame, layout, titles, &columns, row_at, delete.window.cursor(), styles);
}

#[cfg(test)]
#[path = "screens_tests.rs"]
mod tests;
