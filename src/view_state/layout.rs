//! Screen geometry of the content block for each mode.
//!
//! The renderer draws from a [`BlockLayout`] and the hit tester resolves
//! pointer positions against the very same value, so there is exactly one
//! place where rows, columns, and centering are decided.

use super::hit_test::HeaderHit;
use super::window::{visible_window, WindowPolicy};
use crate::model::flare_class::{magnitude_label, CLASS_LETTERS, COMPARATORS, MAGNITUDE_COUNT};
use crate::model::wavelength::{WaveOption, WAVE_OPTIONS};
use crate::model::FlareRecord;
use crate::state::mode::{
    CacheDeleteState, CacheViewerState, FilterColumn, FilterEditorState, MainMenuState, Mode,
    SearchInput, SelectorState, SelectorTable, WavelengthEditorState, CACHE_MENU_ITEMS,
    MENU_ITEMS,
};
use ratatui::layout::Rect;
use std::ops::Range;
use unicode_width::UnicodeWidthStr;

/// Rows taken by the title bar.
pub const TITLE_BAR_HEIGHT: u16 = 1;

/// Rows taken by the bordered settings summary.
pub const SUMMARY_HEIGHT: u16 = 7;

/// First screen row of the content block.
pub const CONTENT_TOP: u16 = TITLE_BAR_HEIGHT + SUMMARY_HEIGHT + 1;

/// Rows reserved at the bottom for the notice and key hints.
pub const FOOTER_HEIGHT: u16 = 2;

/// Blank columns between the main menu and the cache submenu.
pub const MENU_COLUMN_GAP: u16 = 4;

/// Blank columns between filter editor columns.
pub const FILTER_COLUMN_GAP: u16 = 2;

/// Magnitude options visible at once.
pub const MAGNITUDE_WINDOW: usize = 9;

/// Blank columns between table columns.
pub const TABLE_COLUMN_SPACING: u16 = 1;

/// Width of a menu cursor marker such as `"> "`.
pub const MARKER_WIDTH: u16 = 2;

/// Main menu heading.
pub const MENU_TITLE: &str = "Main Menu";
/// Cache submenu heading.
pub const CACHE_MENU_TITLE: &str = "Cache Options";
/// Wavelength editor heading.
pub const WAVE_TITLE: &str = "Select AIA Wavelength Channels";
/// Date editor labels, start then end.
pub const DATE_LABELS: [&str; 2] = ["Start date (YYYY-MM-DD)", "End date (YYYY-MM-DD)"];
/// Filter editor heading.
pub const FILTER_TITLE: &str = "Set Flare Class Filter";
/// Filter editor column headings.
pub const FILTER_COLUMN_TITLES: [&str; 3] = ["Comparator", "Class", "Magnitude"];

/// Shift applied to the centering offset when the side gap is wide enough.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Nudge {
    /// Gap that must be exceeded before the nudge applies.
    pub threshold: u16,
    /// Columns to move left.
    pub amount: u16,
}

impl Nudge {
    /// No adjustment.
    pub const NONE: Nudge = Nudge {
        threshold: 0,
        amount: 0,
    };
}

/// Nudge of the flare filter editor, which carries extra right padding.
pub const FILTER_NUDGE: Nudge = Nudge {
    threshold: 2,
    amount: 2,
};

/// Left edge of a block `block_width` wide centred in `terminal_width`.
pub fn centered_x(terminal_width: u16, block_width: u16, nudge: Nudge) -> u16 {
    let gap = terminal_width.saturating_sub(block_width) / 2;
    if nudge.amount > 0 && gap > nudge.threshold {
        gap.saturating_sub(nudge.amount)
    } else {
        gap
    }
}

/// Half-open horizontal span `[start, start + width)` inside a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnBand {
    /// First column, relative to the block.
    pub start: u16,
    /// Columns covered.
    pub width: u16,
}

impl ColumnBand {
    /// One past the last column.
    pub fn end(&self) -> u16 {
        self.start + self.width
    }

    /// Whether relative column `x` falls inside.
    pub fn contains(&self, x: u16) -> bool {
        x >= self.start && x < self.end()
    }
}

/// Lay `widths` out left to right with `padding` blank columns between them.
pub fn column_bands(widths: &[u16], padding: u16) -> Vec<ColumnBand> {
    let mut start = 0;
    widths
        .iter()
        .map(|&width| {
            let band = ColumnBand { start, width };
            start += width + padding;
            band
        })
        .collect()
}

/// Which options of a list a region is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionWindow {
    /// How the first visible option is picked.
    pub policy: WindowPolicy,
    /// Options in the list.
    pub total: usize,
    /// Rows available.
    pub size: usize,
    /// Scroll offset for `Clamped`, selected option for `Centered`.
    pub anchor: usize,
}

impl OptionWindow {
    /// Window showing every one of `total` options.
    pub fn all(total: usize) -> Self {
        Self {
            policy: WindowPolicy::Clamped,
            total,
            size: total,
            anchor: 0,
        }
    }

    /// Visible option positions.
    pub fn visible(&self) -> Range<usize> {
        visible_window(self.policy, self.total, self.size, self.anchor)
    }
}

/// One column of rows inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionLayout {
    /// Horizontal extent.
    pub band: ColumnBand,
    /// Relative rows of the region's heading.
    pub header_rows: Range<u16>,
    /// Outcome of a pointer on the heading.
    pub header_hit: HeaderHit,
    /// Relative row of the first visible option.
    pub first_row: u16,
    /// Rows from one option to the next; anything in between is padding.
    pub row_stride: u16,
    /// Options shown.
    pub window: OptionWindow,
}

impl RegionLayout {
    /// `(option, relative row)` for every visible option, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = (usize, u16)> + '_ {
        self.window
            .visible()
            .enumerate()
            .map(|(k, option)| (option, self.first_row + k as u16 * self.row_stride))
    }
}

/// Where the content block sits and what it contains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    /// Absolute screen rectangle.
    pub area: Rect,
    /// Row regions, left to right.
    pub regions: Vec<RegionLayout>,
}

impl BlockLayout {
    /// Centre a `width` x `height` block below the summary panel.
    pub fn place(
        terminal_width: u16,
        width: u16,
        height: u16,
        nudge: Nudge,
        regions: Vec<RegionLayout>,
    ) -> Self {
        let x = centered_x(terminal_width, width, nudge);
        Self {
            area: Rect::new(x, CONTENT_TOP, width, height),
            regions,
        }
    }

    /// Cut the block off where the footer starts on a `terminal_height`
    /// screen, so rows hidden under the footer cannot be hit.
    pub fn clip_to_screen(mut self, terminal_height: u16) -> Self {
        let bottom = content_bottom(terminal_height);
        self.area.height = self.area.height.min(bottom.saturating_sub(self.area.y));
        self
    }

    /// Absolute rectangle of one row of the block.
    pub fn line(&self, rel_x: u16, rel_y: u16, width: u16) -> Rect {
        Rect::new(self.area.x + rel_x, self.area.y + rel_y, width, 1)
    }

    /// Absolute rectangle of a region's band from `rel_y` for `height` rows.
    pub fn band_rect(&self, band: ColumnBand, rel_y: u16, height: u16) -> Rect {
        Rect::new(self.area.x + band.start, self.area.y + rel_y, band.width, height)
    }
}

/// First screen row taken by the footer.
pub fn content_bottom(terminal_height: u16) -> u16 {
    terminal_height.saturating_sub(FOOTER_HEIGHT)
}

/// Data rows that fit in a table with `title_rows` of heading on a
/// `terminal_height` screen. The table border and column headings take
/// three more rows.
pub fn table_row_limit(terminal_height: u16, title_rows: u16) -> usize {
    usize::from(
        content_bottom(terminal_height).saturating_sub(CONTENT_TOP + title_rows + 3),
    )
}

fn text_width(text: &str) -> u16 {
    u16::try_from(text.width()).unwrap_or(u16::MAX)
}

/// Layout of whatever `mode` shows on a `terminal_width` x
/// `terminal_height` screen.
pub fn mode_layout(mode: &Mode, terminal_width: u16, terminal_height: u16) -> BlockLayout {
    let layout = match mode {
        Mode::MainMenu(menu) => menu_layout(menu, terminal_width),
        Mode::WavelengthEditor(editor) => wavelength_layout(editor, terminal_width),
        Mode::DateRangeEditor(_) => date_layout(terminal_width),
        Mode::FlareFilterEditor(editor) => filter_layout(editor, terminal_width),
        Mode::FlareSelector(SelectorState::Loading { .. }) => loading_layout(terminal_width),
        Mode::FlareSelector(SelectorState::Ready(table)) => selector_layout(table, terminal_width),
        Mode::CacheViewer(viewer) => viewer_layout(viewer, terminal_width),
        Mode::CacheDeleteEditor(delete) => delete_layout(delete, terminal_width),
    };
    layout.clip_to_screen(terminal_height)
}

// ===== Menus =====

fn menu_column_width<'a>(title: &str, labels: impl Iterator<Item = &'a str>) -> u16 {
    let widest = labels.map(text_width).max().unwrap_or(0);
    text_width(title).max(MARKER_WIDTH + widest)
}

fn menu_region(band: ColumnBand, total: usize) -> RegionLayout {
    RegionLayout {
        band,
        header_rows: 0..1,
        header_hit: HeaderHit::Miss,
        first_row: 1,
        row_stride: 1,
        window: OptionWindow::all(total),
    }
}

/// Main menu, plus the cache submenu to its right when open.
///
/// Region 0 is the main menu, region 1 the submenu.
pub fn menu_layout(menu: &MainMenuState, terminal_width: u16) -> BlockLayout {
    let main_width = menu_column_width(MENU_TITLE, MENU_ITEMS.iter().map(|item| item.label()));
    let mut widths = vec![main_width];
    let mut rows = MENU_ITEMS.len();
    if menu.cache_menu.is_some() {
        widths.push(menu_column_width(
            CACHE_MENU_TITLE,
            CACHE_MENU_ITEMS.iter().map(|item| item.label()),
        ));
        rows = rows.max(CACHE_MENU_ITEMS.len());
    }

    let bands = column_bands(&widths, MENU_COLUMN_GAP);
    let width = bands.last().map_or(0, ColumnBand::end);
    let totals = [MENU_ITEMS.len(), CACHE_MENU_ITEMS.len()];
    let regions = bands
        .into_iter()
        .zip(totals)
        .map(|(band, total)| menu_region(band, total))
        .collect();

    BlockLayout::place(terminal_width, width, 1 + rows as u16, Nudge::NONE, regions)
}

// ===== Wavelength editor =====

/// Text of one wavelength row.
pub fn wave_row_text(option: &WaveOption, checked: bool) -> String {
    let mark = if checked { "[x]" } else { "[ ]" };
    format!("{mark} {:>4}Å │ {}", option.code, option.description)
}

/// Rows above the first wavelength option: heading and a blank line.
pub const WAVE_HEADER_ROWS: u16 = 2;

/// Wavelength checklist, a single region.
pub fn wavelength_layout(_editor: &WavelengthEditorState, terminal_width: u16) -> BlockLayout {
    let row_width = WAVE_OPTIONS
        .iter()
        .map(|opt| text_width(&wave_row_text(opt, false)))
        .max()
        .unwrap_or(0);
    let width = row_width.max(text_width(WAVE_TITLE));
    let region = RegionLayout {
        band: ColumnBand {
            start: 0,
            width: row_width,
        },
        header_rows: 0..WAVE_HEADER_ROWS,
        header_hit: HeaderHit::Miss,
        first_row: WAVE_HEADER_ROWS,
        row_stride: 1,
        window: OptionWindow::all(WAVE_OPTIONS.len()),
    };
    let height = WAVE_HEADER_ROWS + WAVE_OPTIONS.len() as u16;
    BlockLayout::place(terminal_width, width, height, Nudge::NONE, vec![region])
}

// ===== Date editor =====

/// Width of a date input box, brackets included.
pub const DATE_FIELD_WIDTH: u16 = 12;

/// Rows from one date field to the next: field, blank, label.
pub const DATE_FIELD_STRIDE: u16 = 3;

/// Date range editor: label above each field, fields are region rows.
pub fn date_layout(terminal_width: u16) -> BlockLayout {
    let width = DATE_LABELS
        .iter()
        .map(|label| text_width(label))
        .max()
        .unwrap_or(0)
        .max(DATE_FIELD_WIDTH);
    let region = RegionLayout {
        band: ColumnBand { start: 0, width },
        header_rows: 0..1,
        header_hit: HeaderHit::Miss,
        first_row: 1,
        row_stride: DATE_FIELD_STRIDE,
        window: OptionWindow::all(DATE_LABELS.len()),
    };
    let height = 1 + DATE_FIELD_STRIDE + 1;
    BlockLayout::place(terminal_width, width, height, Nudge::NONE, vec![region])
}

// ===== Flare filter editor =====

/// Rows above the column boxes: heading and a blank line.
pub const FILTER_TITLE_ROWS: u16 = 2;

/// Rows of a column box above its first option: border, heading, rule.
pub const FILTER_COLUMN_HEADER_ROWS: u16 = 3;

/// Option labels of one filter column.
pub fn filter_option_labels(column: FilterColumn) -> Vec<String> {
    match column {
        FilterColumn::Comparator => COMPARATORS.iter().map(|c| c.symbol().to_string()).collect(),
        FilterColumn::Letter => CLASS_LETTERS.iter().map(char::to_string).collect(),
        FilterColumn::Magnitude => (0..MAGNITUDE_COUNT).map(magnitude_label).collect(),
    }
}

/// Rows a filter column shows at once.
pub fn filter_window_size(column: FilterColumn) -> usize {
    match column {
        FilterColumn::Magnitude => MAGNITUDE_WINDOW.min(MAGNITUDE_COUNT),
        other => other.option_count(),
    }
}

fn filter_column_width(column: FilterColumn) -> u16 {
    let widest = filter_option_labels(column)
        .iter()
        .map(|label| text_width(label))
        .max()
        .unwrap_or(0);
    let content = text_width(FILTER_COLUMN_TITLES[column.index()]).max(MARKER_WIDTH + widest);
    // border and one space of padding on each side
    content + 4
}

/// Flare filter editor: three bordered columns, one region each.
pub fn filter_layout(editor: &FilterEditorState, terminal_width: u16) -> BlockLayout {
    let widths: Vec<u16> = FilterColumn::ALL
        .iter()
        .map(|&column| filter_column_width(column))
        .collect();
    let bands = column_bands(&widths, FILTER_COLUMN_GAP);
    let first_row = FILTER_TITLE_ROWS + FILTER_COLUMN_HEADER_ROWS;

    let regions: Vec<RegionLayout> = FilterColumn::ALL
        .iter()
        .zip(bands)
        .map(|(&column, band)| RegionLayout {
            band,
            header_rows: FILTER_TITLE_ROWS..first_row,
            header_hit: HeaderHit::RowZero,
            first_row,
            row_stride: 1,
            window: OptionWindow {
                policy: WindowPolicy::Centered,
                total: column.option_count(),
                size: filter_window_size(column),
                anchor: editor.selected_in(column),
            },
        })
        .collect();

    let columns_width = regions.last().map_or(0, |r| r.band.end());
    let width = columns_width.max(text_width(FILTER_TITLE));
    let tallest = FilterColumn::ALL
        .iter()
        .map(|&column| filter_window_size(column))
        .max()
        .unwrap_or(0) as u16;
    let height = first_row + tallest + 1;
    BlockLayout::place(terminal_width, width, height, FILTER_NUDGE, regions)
}

// ===== Tables =====

/// Column headings and widths of a record table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumns {
    /// Heading of each column.
    pub titles: Vec<&'static str>,
    /// Width of each column.
    pub widths: Vec<u16>,
}

impl TableColumns {
    fn fit<'a>(
        titles: &[&'static str],
        caps: &[u16],
        rows: impl Iterator<Item = Vec<&'a str>>,
    ) -> Self {
        let mut widths: Vec<u16> = titles.iter().map(|t| text_width(t)).collect();
        for row in rows {
            for (width, cell) in widths.iter_mut().zip(row) {
                *width = (*width).max(text_width(cell));
            }
        }
        for (width, &cap) in widths.iter_mut().zip(caps) {
            *width = (*width).min(cap);
        }
        Self {
            titles: titles.to_vec(),
            widths,
        }
    }

    /// Width of the bordered table.
    pub fn total_width(&self) -> u16 {
        let gaps = self.widths.len().saturating_sub(1) as u16 * TABLE_COLUMN_SPACING;
        self.widths.iter().sum::<u16>() + gaps + 2
    }
}

/// Pick marker of a table row.
pub fn pick_marker(picked: bool) -> &'static str {
    if picked {
        "[x]"
    } else {
        "[ ]"
    }
}

/// Cells of a flare selector row after the pick marker.
pub fn selector_cells(record: &FlareRecord) -> [&str; 4] {
    [record.class(), record.start(), record.end(), record.coordinates()]
}

/// Cells of a cache row after the optional pick marker.
pub fn cache_cells(record: &FlareRecord) -> [&str; 6] {
    [
        record.class(),
        record.start(),
        record.end(),
        record.coordinates(),
        record.wavelength(),
        record.description(),
    ]
}

/// Columns of the flare selector table.
pub fn selector_columns(records: &[FlareRecord]) -> TableColumns {
    TableColumns::fit(
        &["SEL", "CLASS", "START", "END", "COORDINATES"],
        &[3, 6, 19, 19, 24],
        records.iter().map(|r| {
            let mut row = vec![pick_marker(false)];
            row.extend(selector_cells(r));
            row
        }),
    )
}

/// Columns of a cache table, with a pick column when `with_picks`.
pub fn cache_columns(records: &[FlareRecord], with_picks: bool) -> TableColumns {
    const TITLES: [&str; 6] = ["CLASS", "START", "END", "COORDINATES", "WAVELENGTH", "DESCRIPTION"];
    const CAPS: [u16; 6] = [6, 19, 19, 24, 16, 32];
    if with_picks {
        let mut titles = vec!["SEL"];
        titles.extend(TITLES);
        let mut caps = vec![3];
        caps.extend(CAPS);
        TableColumns::fit(
            &titles,
            &caps,
            records.iter().map(|r| {
                let mut row = vec![pick_marker(false)];
                row.extend(cache_cells(r));
                row
            }),
        )
    } else {
        TableColumns::fit(&TITLES, &CAPS, records.iter().map(|r| cache_cells(r).to_vec()))
    }
}

/// Table block: `title_rows` of text, then a bordered table whose data rows
/// form the single region.
pub fn table_layout(
    title_rows: u16,
    title_width: u16,
    columns: &TableColumns,
    window: OptionWindow,
    terminal_width: u16,
) -> BlockLayout {
    let table_width = columns.total_width();
    let width = table_width.max(title_width);
    let region = RegionLayout {
        band: ColumnBand {
            start: 0,
            width: table_width,
        },
        header_rows: title_rows..title_rows + 2,
        header_hit: HeaderHit::Miss,
        first_row: title_rows + 2,
        row_stride: 1,
        window,
    };
    let height = title_rows + 2 + window.size as u16 + 1;
    BlockLayout::place(terminal_width, width, height, Nudge::NONE, vec![region])
}

/// Text rows above every table: heading and a blank line.
pub const TABLE_TITLE_ROWS: u16 = 2;

/// Heading while the flare query runs.
pub const LOADING_TITLE: &str = "Loading flares…";

/// Loading indicator: one line, no regions.
pub fn loading_layout(terminal_width: u16) -> BlockLayout {
    let width = text_width(LOADING_TITLE) + 2;
    BlockLayout::place(terminal_width, width, 1, Nudge::NONE, Vec::new())
}

/// Heading of the flare selector.
pub fn selector_title(table: &SelectorTable) -> String {
    format!(
        "Select Flares: {} found, {} picked",
        table.records.len(),
        table.picked.len()
    )
}

/// Flare selector table.
pub fn selector_layout(table: &SelectorTable, terminal_width: u16) -> BlockLayout {
    let window = OptionWindow {
        policy: WindowPolicy::Clamped,
        total: table.records.len(),
        size: table.height(),
        anchor: table.window.offset(),
    };
    table_layout(
        TABLE_TITLE_ROWS,
        text_width(&selector_title(table)),
        &selector_columns(&table.records),
        window,
        terminal_width,
    )
}

/// Heading of the cache viewer.
pub fn viewer_title(viewer: &CacheViewerState) -> String {
    format!("Flare Cache: {} rows", viewer.records.len())
}

/// Read-only cache table.
pub fn viewer_layout(viewer: &CacheViewerState, terminal_width: u16) -> BlockLayout {
    let window = OptionWindow {
        policy: WindowPolicy::Clamped,
        total: viewer.records.len(),
        size: viewer.height(),
        anchor: viewer.window.offset(),
    };
    table_layout(
        TABLE_TITLE_ROWS,
        text_width(&viewer_title(viewer)),
        &cache_columns(&viewer.records, false),
        window,
        terminal_width,
    )
}

/// Heading of the cache delete editor.
pub fn delete_title(delete: &CacheDeleteState) -> String {
    format!(
        "Delete Cache Rows: {} of {} shown, {} marked",
        delete.visible_len(),
        delete.records.len(),
        delete.picks.len()
    )
}

/// Search line of the cache delete editor.
pub fn search_line(delete: &CacheDeleteState) -> String {
    match &delete.search {
        SearchInput::Searching { input } => format!("Search: {input}_"),
        SearchInput::Idle if delete.filter.query().is_empty() => "Press / to search".to_string(),
        SearchInput::Idle => format!("Filter: {}", delete.filter.query()),
    }
}

/// Rows above the delete table: heading, search line, blank line.
pub const DELETE_TITLE_ROWS: u16 = 3;

/// Cache delete table.
///
/// Columns are sized over the whole cache so they stay put while searching.
pub fn delete_layout(delete: &CacheDeleteState, terminal_width: u16) -> BlockLayout {
    let window = OptionWindow {
        policy: WindowPolicy::Clamped,
        total: delete.visible_len(),
        size: delete.height(),
        anchor: delete.window.offset(),
    };
    let title_width = text_width(&delete_title(delete)).max(text_width(&search_line(delete)));
    table_layout(
        DELETE_TITLE_ROWS,
        title_width,
        &cache_columns(&delete.records, true),
        window,
        terminal_width,
    )
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
