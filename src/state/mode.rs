//! The active screen and the state each screen owns.
//!
//! Exactly one [`Mode`] is live. Each variant carries only what its screen
//! needs and is built fresh on entry, so nothing leaks from a previous visit.

use crate::config::QuerySettings;
use crate::model::flare_class::{CLASS_LETTERS, COMPARATORS, MAGNITUDE_COUNT};
use crate::model::wavelength::{parse_waves, WAVE_OPTIONS};
use crate::model::{ClassSelection, DisplayedSelection, FlareRecord, OriginalSelection};
use crate::state::filter::RecordFilter;
use crate::view_state::window::{compute_height, WindowState, CACHE_HEIGHT, SELECTOR_HEIGHT};
use std::collections::BTreeSet;

/// The active screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Top-level menu, optionally with the cache submenu open.
    MainMenu(MainMenuState),
    /// Channel checklist.
    WavelengthEditor(WavelengthEditorState),
    /// Start and end date fields.
    DateRangeEditor(DateEditorState),
    /// Comparator, letter, and magnitude columns.
    FlareFilterEditor(FilterEditorState),
    /// Query results to pick from.
    FlareSelector(SelectorState),
    /// Read-only cache table.
    CacheViewer(CacheViewerState),
    /// Cache table with search and delete picks.
    CacheDeleteEditor(CacheDeleteState),
}

impl Mode {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::MainMenu(menu) if menu.cache_menu.is_some() => "cache-menu",
            Self::MainMenu(_) => "main-menu",
            Self::WavelengthEditor(_) => "wavelength",
            Self::DateRangeEditor(_) => "dates",
            Self::FlareFilterEditor(_) => "flare-filter",
            Self::FlareSelector(SelectorState::Loading { .. }) => "selector-loading",
            Self::FlareSelector(SelectorState::Ready(_)) => "selector",
            Self::CacheViewer(_) => "cache-view",
            Self::CacheDeleteEditor(_) => "cache-delete",
        }
    }
}

/// Entries of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// Open the wavelength editor.
    EditWavelength,
    /// Open the date range editor.
    EditDateRange,
    /// Open the flare class filter editor.
    EditFlareFilter,
    /// Run the query and pick flares.
    SelectFlares,
    /// Open the cache submenu.
    CacheOptions,
    /// Exit.
    Quit,
}

/// Main menu in display order.
pub const MENU_ITEMS: [MenuItem; 6] = [
    MenuItem::EditWavelength,
    MenuItem::EditDateRange,
    MenuItem::EditFlareFilter,
    MenuItem::SelectFlares,
    MenuItem::CacheOptions,
    MenuItem::Quit,
];

impl MenuItem {
    /// Menu text.
    pub fn label(self) -> &'static str {
        match self {
            Self::EditWavelength => "Edit Wavelength",
            Self::EditDateRange => "Edit Date Range",
            Self::EditFlareFilter => "Edit Flare Class Filter",
            Self::SelectFlares => "Select Flares",
            Self::CacheOptions => "Cache Options",
            Self::Quit => "Quit",
        }
    }
}

/// Entries of the cache submenu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheMenuItem {
    /// Open the read-only table.
    ViewCache,
    /// Open the delete editor.
    DeleteRows,
    /// Truncate the cache to its header.
    ClearCache,
    /// Close the submenu.
    Back,
}

/// Cache submenu in display order.
pub const CACHE_MENU_ITEMS: [CacheMenuItem; 4] = [
    CacheMenuItem::ViewCache,
    CacheMenuItem::DeleteRows,
    CacheMenuItem::ClearCache,
    CacheMenuItem::Back,
];

impl CacheMenuItem {
    /// Menu text.
    pub fn label(self) -> &'static str {
        match self {
            Self::ViewCache => "View Cache",
            Self::DeleteRows => "Delete Rows",
            Self::ClearCache => "Clear Cache",
            Self::Back => "Back",
        }
    }
}

/// Main menu cursor and the optional cache submenu overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MainMenuState {
    /// Highlighted entry of [`MENU_ITEMS`].
    pub selected: usize,
    /// Open cache submenu.
    pub cache_menu: Option<CacheMenuState>,
}

impl MainMenuState {
    /// Menu with `selected` highlighted and the submenu closed.
    pub fn at(selected: usize) -> Self {
        Self {
            selected: selected.min(MENU_ITEMS.len() - 1),
            cache_menu: None,
        }
    }
}

/// Cache submenu cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheMenuState {
    /// Highlighted entry of [`CACHE_MENU_ITEMS`].
    pub selected: usize,
}

/// Wavelength checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WavelengthEditorState {
    /// Focused row of [`WAVE_OPTIONS`].
    pub focus: usize,
    /// Checked catalogue positions.
    pub selected: BTreeSet<usize>,
}

impl WavelengthEditorState {
    /// Checklist seeded from the saved `WAVE` value.
    pub fn from_settings(settings: &QuerySettings) -> Self {
        Self {
            focus: 0,
            selected: parse_waves(&settings.wave),
        }
    }

    /// Flip the option at `row`.
    pub fn toggle(&mut self, row: usize) {
        if row >= WAVE_OPTIONS.len() {
            return;
        }
        if !self.selected.remove(&row) {
            self.selected.insert(row);
        }
    }

    /// Check everything, or uncheck everything if all were checked.
    pub fn toggle_all(&mut self) {
        if self.selected.len() == WAVE_OPTIONS.len() {
            self.selected.clear();
        } else {
            self.selected = (0..WAVE_OPTIONS.len()).collect();
        }
    }
}

/// Which date field has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateField {
    /// Range start.
    #[default]
    Start,
    /// Range end.
    End,
}

impl DateField {
    /// Row of the field in the editor.
    pub fn index(self) -> usize {
        match self {
            Self::Start => 0,
            Self::End => 1,
        }
    }

    /// Field at editor row `index`.
    pub fn from_index(index: usize) -> Self {
        if index == 0 {
            Self::Start
        } else {
            Self::End
        }
    }

    /// The other field.
    pub fn other(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// Date range text fields. Both start blank; a blank field keeps the saved
/// value on confirm.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DateEditorState {
    /// Typed start date.
    pub start: String,
    /// Typed end date.
    pub end: String,
    /// Field receiving input.
    pub focus: DateField,
}

impl DateEditorState {
    /// Text of the focused field.
    pub fn focused_mut(&mut self) -> &mut String {
        match self.focus {
            DateField::Start => &mut self.start,
            DateField::End => &mut self.end,
        }
    }
}

/// Columns of the flare filter editor, left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterColumn {
    /// Comparator column.
    #[default]
    Comparator,
    /// Class letter column.
    Letter,
    /// Magnitude column.
    Magnitude,
}

impl FilterColumn {
    /// All columns in display order.
    pub const ALL: [FilterColumn; 3] = [Self::Comparator, Self::Letter, Self::Magnitude];

    /// Position in display order.
    pub fn index(self) -> usize {
        match self {
            Self::Comparator => 0,
            Self::Letter => 1,
            Self::Magnitude => 2,
        }
    }

    /// Column at display position `index`, if any.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Number of options in this column.
    pub fn option_count(self) -> usize {
        match self {
            Self::Comparator => COMPARATORS.len(),
            Self::Letter => CLASS_LETTERS.len(),
            Self::Magnitude => MAGNITUDE_COUNT,
        }
    }

    /// Column to the right, wrapping.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// Column to the left, wrapping.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Flare filter editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FilterEditorState {
    /// Focused column.
    pub focus: FilterColumn,
    /// Chosen option in every column.
    pub selection: ClassSelection,
}

impl FilterEditorState {
    /// Editor seeded from saved comparator and class.
    pub fn from_settings(settings: &QuerySettings) -> Self {
        Self {
            focus: FilterColumn::Comparator,
            selection: ClassSelection::parse(&settings.comparator, &settings.flare_class),
        }
    }

    /// Chosen option in `column`.
    pub fn selected_in(&self, column: FilterColumn) -> usize {
        match column {
            FilterColumn::Comparator => self.selection.comparator,
            FilterColumn::Letter => self.selection.letter,
            FilterColumn::Magnitude => self.selection.magnitude,
        }
    }

    /// Choose option `index` in `column`, clamped to the column.
    pub fn select(&mut self, column: FilterColumn, index: usize) {
        let index = index.min(column.option_count() - 1);
        match column {
            FilterColumn::Comparator => self.selection.comparator = index,
            FilterColumn::Letter => self.selection.letter = index,
            FilterColumn::Magnitude => self.selection.magnitude = index,
        }
    }

    /// Move the focused column's choice up one option.
    pub fn select_prev(&mut self) {
        let current = self.selected_in(self.focus);
        self.select(self.focus, current.saturating_sub(1));
    }

    /// Move the focused column's choice down one option.
    pub fn select_next(&mut self) {
        let current = self.selected_in(self.focus);
        self.select(self.focus, current + 1);
    }
}

/// Flare selector: waiting on the query, or showing its rows.
#[derive(Debug, Clone, PartialEq)]
pub enum SelectorState {
    /// Query in flight.
    Loading {
        /// Id of the outstanding request; completions with any other id are stale.
        request_id: u64,
        /// Spinner frame.
        spinner: usize,
    },
    /// Query finished with at least one row.
    Ready(SelectorTable),
}

/// Query rows and the picks made among them.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorTable {
    /// Header line of the query output, used if the cache has none.
    pub header: String,
    /// Rows in query order.
    pub records: Vec<FlareRecord>,
    /// Cursor and scroll.
    pub window: WindowState,
    /// Picks over `records` positions.
    pub picked: DisplayedSelection,
    /// Most rows the terminal has room for.
    pub row_limit: usize,
}

impl SelectorTable {
    /// Fresh table with nothing picked.
    pub fn new(header: String, records: Vec<FlareRecord>) -> Self {
        Self {
            header,
            records,
            window: WindowState::new(),
            picked: DisplayedSelection::new(),
            row_limit: usize::MAX,
        }
    }

    /// Rows on screen.
    pub fn height(&self) -> usize {
        compute_height(self.records.len(), SELECTOR_HEIGHT).min(self.row_limit)
    }
}

/// Read-only cache table.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheViewerState {
    /// Records in cache order.
    pub records: Vec<FlareRecord>,
    /// Cursor and scroll.
    pub window: WindowState,
    /// Most rows the terminal has room for.
    pub row_limit: usize,
}

impl CacheViewerState {
    /// Viewer over `records` with the cursor on the first row.
    pub fn new(records: Vec<FlareRecord>) -> Self {
        Self {
            records,
            window: WindowState::new(),
            row_limit: usize::MAX,
        }
    }

    /// Rows on screen.
    pub fn height(&self) -> usize {
        compute_height(self.records.len(), CACHE_HEIGHT).min(self.row_limit)
    }
}

/// Whether keystrokes are going into the search query.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchInput {
    /// Keys are commands.
    #[default]
    Idle,
    /// Keys are appended to `input`, which is re-applied on every change.
    Searching {
        /// Query typed so far.
        input: String,
    },
}

/// Cache table with search and original-indexed delete picks.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheDeleteState {
    /// Header to write back.
    pub header: String,
    /// Full cache in file order.
    pub records: Vec<FlareRecord>,
    /// Current search over `records`.
    pub filter: RecordFilter,
    /// Cursor and scroll over the filtered rows.
    pub window: WindowState,
    /// Rows to delete, keyed by cache position so re-filtering keeps them.
    pub picks: OriginalSelection,
    /// Search input state.
    pub search: SearchInput,
    /// Most rows the terminal has room for.
    pub row_limit: usize,
}

impl CacheDeleteState {
    /// Editor over `records`, already in search mode with an empty query.
    pub fn new(header: String, records: Vec<FlareRecord>) -> Self {
        Self {
            header,
            records,
            filter: RecordFilter::new(),
            window: WindowState::new(),
            picks: OriginalSelection::new(),
            search: SearchInput::Searching {
                input: String::new(),
            },
            row_limit: usize::MAX,
        }
    }

    /// Rows matching the current query.
    pub fn visible_len(&self) -> usize {
        self.filter.len(&self.records)
    }

    /// Rows on screen.
    pub fn height(&self) -> usize {
        compute_height(self.visible_len(), CACHE_HEIGHT).min(self.row_limit)
    }

    /// Re-run the filter for `query` and keep the cursor on screen.
    pub fn apply_query(&mut self, query: &str) {
        self.filter.apply_query(&self.records, query);
        let (len, height) = (self.visible_len(), self.height());
        self.window.ensure_visible(len, height);
    }
}
