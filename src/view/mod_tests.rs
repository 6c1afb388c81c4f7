//! Tests for the TUI shell: event routing, query effects, and rendering.
//!
//! Rendering tests check that text lands at the positions the hit tester
//! resolves, using a TestBackend.

use super::*;
use crate::model::FlareRecord;
use crate::state::mode::{FilterEditorState, MainMenuState, Mode, SelectorState, SelectorTable};
use crate::test_harness::{cache_line, StateHarness, HEADER, VALID_SETTINGS};
use crate::view_state::layout::{FOOTER_HEIGHT, MARKER_WIDTH};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;

// ===== Test Helpers =====

struct TestApp {
    _dir: tempfile::TempDir,
    app: TuiApp<TestBackend>,
}

fn create_test_app(harness: StateHarness, runner: QueryRunner) -> TestApp {
    create_sized_app(harness, runner, 100, 40)
}

fn create_sized_app(harness: StateHarness, runner: QueryRunner, width: u16, height: u16) -> TestApp {
    let (dir, state) = harness.into_parts();
    let terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    TestApp {
        _dir: dir,
        app: TuiApp::new_for_test(terminal, state, runner),
    }
}

fn default_app() -> TestApp {
    create_test_app(
        StateHarness::with_files(None, Some(VALID_SETTINGS)),
        QueryRunner::new("/nonexistent/flarecat-query", None, None),
    )
}

fn key(code: KeyCode) -> Event {
    Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
}

fn rendered(app: &mut TuiApp<TestBackend>) -> Buffer {
    app.render_test().expect("render");
    app.terminal().backend().buffer().clone()
}

fn text_at(buffer: &Buffer, x: u16, y: u16, len: usize) -> String {
    (x..x + len as u16)
        .map(|col| buffer[(col, y)].symbol().to_string())
        .collect()
}

fn point_of(state: &AppState, region: usize, option: usize) -> (u16, u16) {
    let layout = state.layout();
    let target = &layout.regions[region];
    let (_, rel_y) = target
        .rows()
        .find(|&(opt, _)| opt == option)
        .expect("option visible");
    (layout.area.x + target.band.start, layout.area.y + rel_y)
}

#[test]
fn tui_error_from_io_error() {
    let io_err = io::Error::other("test error");
    let tui_err: TuiError = io_err.into();
    assert!(matches!(tui_err, TuiError::Io(_)));
}

// ===== Event Routing =====

mod events {
    use super::*;

    #[test]
    fn ctrl_c_quits() {
        let mut t = default_app();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(t.app.handle_event(event));
    }

    #[test]
    fn navigation_keys_do_not_quit() {
        let mut t = default_app();
        assert!(!t.app.handle_event(key(KeyCode::Down)));
        assert_eq!(t.app.app_state().mode, Mode::MainMenu(MainMenuState::at(1)));
    }

    #[test]
    fn resize_event_updates_state() {
        let mut t = default_app();
        assert!(!t.app.handle_event(Event::Resize(64, 30)));
        assert_eq!(t.app.app_state().terminal_size(), (64, 30));
    }

    #[test]
    fn initial_size_comes_from_terminal() {
        let t = default_app();
        assert_eq!(t.app.app_state().terminal_size(), (100, 40));
    }
}

// ===== Query Effects =====

mod queries {
    use super::*;

    fn start_query(t: &mut TestApp) {
        t.app.app_state.mode = Mode::MainMenu(MainMenuState::at(3));
        assert!(!t.app.handle_event(key(KeyCode::Enter)));
        assert!(matches!(
            t.app.app_state().mode,
            Mode::FlareSelector(SelectorState::Loading { .. })
        ));
    }

    #[test]
    fn missing_program_surfaces_failure_notice() {
        let mut t = default_app();
        start_query(&mut t);

        assert!(t.app.await_completion(Duration::from_secs(10)));

        assert!(matches!(t.app.app_state().mode, Mode::MainMenu(_)));
        let notice = t.app.app_state().notice().expect("notice");
        assert!(notice.starts_with("Query failed: could not start"), "{notice}");
    }

    #[test]
    fn completion_after_cancel_is_dropped() {
        let mut t = default_app();
        start_query(&mut t);
        t.app.handle_event(key(KeyCode::Esc));

        assert!(t.app.await_completion(Duration::from_secs(10)));

        assert_eq!(t.app.app_state().mode, Mode::MainMenu(MainMenuState::at(3)));
        assert_eq!(t.app.app_state().notice(), None);
    }

    #[cfg(unix)]
    #[test]
    fn successful_query_opens_selector() {
        let harness = StateHarness::with_files(None, Some(VALID_SETTINGS));
        let script = harness.settings_path().with_file_name("query.sh");
        std::fs::write(
            &script,
            "printf 'h1\\th2\\th3\\th4\\th5\\th6\\nflare\\tM2.0\\t%s\\t%s\\tN1E1\\t%s\\n' \"$1\" \"$2\" \"$5\" > \"$6\"\n",
        )
        .expect("write script");
        let mut t = create_test_app(harness, QueryRunner::new("sh", Some(script), None));
        start_query(&mut t);

        assert!(t.app.await_completion(Duration::from_secs(10)));

        let Mode::FlareSelector(SelectorState::Ready(table)) = &t.app.app_state().mode else {
            panic!("expected selector, got {}", t.app.app_state().mode.name());
        };
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].class(), "M2.0");
        assert_eq!(table.records[0].wavelength(), "171,304");
    }
}

// ===== Rendering =====

mod rendering {
    use super::*;

    #[test]
    fn frame_has_title_summary_menu_and_hints() {
        let mut t = default_app();
        let text = crate::test_harness::buffer_to_string(&rendered(&mut t.app));

        assert!(text.contains("flarecat"));
        assert!(text.contains("Query Settings"));
        assert!(text.contains("171,304"));
        assert!(text.contains("Main Menu"));
        assert!(text.contains(help_text(&t.app.app_state().mode)));
    }

    #[test]
    fn menu_labels_sit_where_clicks_land() {
        let mut t = default_app();
        let buffer = rendered(&mut t.app);
        for (option, label) in [(0, "Edit Wavelength"), (3, "Select Flares"), (5, "Quit")] {
            let (x, y) = point_of(t.app.app_state(), 0, option);
            assert_eq!(text_at(&buffer, x + MARKER_WIDTH, y, label.len()), label);
        }
    }

    #[test]
    fn selected_menu_row_carries_focus_marker() {
        let mut t = default_app();
        let buffer = rendered(&mut t.app);
        let (x, y) = point_of(t.app.app_state(), 0, 0);
        assert_eq!(text_at(&buffer, x, y, 1), "›");
    }

    #[test]
    fn filter_options_sit_where_clicks_land() {
        let mut t = default_app();
        t.app.app_state.mode = Mode::FlareFilterEditor(FilterEditorState::default());
        let buffer = rendered(&mut t.app);

        // border and padding come before the marker
        let (x, y) = point_of(t.app.app_state(), 1, 4);
        assert_eq!(text_at(&buffer, x + 2 + MARKER_WIDTH, y, 1), "X");

        let (x, y) = point_of(t.app.app_state(), 2, 0);
        assert_eq!(text_at(&buffer, x + 2 + MARKER_WIDTH, y, 3), "0.0");
    }

    #[test]
    fn selector_rows_sit_where_clicks_land() {
        let mut t = default_app();
        let records: Vec<FlareRecord> = ["M1.3", "X2.0"]
            .iter()
            .enumerate()
            .map(|(n, class)| FlareRecord::parse_line(&cache_line(n, class)))
            .collect();
        let mut table = SelectorTable::new(HEADER.to_string(), records);
        table.picked.toggle(crate::model::DisplayedIndex::new(1));
        t.app.app_state.mode = Mode::FlareSelector(SelectorState::Ready(table));
        let buffer = rendered(&mut t.app);

        let (x, y) = point_of(t.app.app_state(), 0, 1);
        // left border, then the pick column and one space
        assert_eq!(text_at(&buffer, x + 1, y, 3), "[x]");
        assert_eq!(text_at(&buffer, x + 5, y, 4), "X2.0");
    }

    #[test]
    fn notice_renders_above_hints() {
        let mut t = default_app();
        t.app.app_state.set_notice("Saved 3 flares");
        let buffer = rendered(&mut t.app);
        assert_eq!(text_at(&buffer, 0, 38, 14), "Saved 3 flares");
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let (dir, state) = StateHarness::with_files(None, Some(VALID_SETTINGS)).into_parts();
        let terminal = Terminal::new(TestBackend::new(12, 4)).expect("test terminal");
        let mut app = TuiApp::new_for_test(
            terminal,
            state,
            QueryRunner::new("/nonexistent/flarecat-query", None, None),
        );
        app.render_test().expect("render");
        drop(dir);
    }

    #[test]
    fn short_terminal_keeps_cursor_above_footer() {
        let mut t = create_sized_app(
            StateHarness::with_cache_rows(&["M1.0"; 30], Some(VALID_SETTINGS)),
            QueryRunner::new("/nonexistent/flarecat-query", None, None),
            100,
            24,
        );
        t.app.app_state.mode = Mode::MainMenu(MainMenuState::at(4));
        t.app.handle_event(key(KeyCode::Enter));
        t.app.handle_event(key(KeyCode::Down));
        t.app.handle_event(key(KeyCode::Enter));
        for _ in 0..15 {
            t.app.handle_event(key(KeyCode::Down));
        }
        let buffer = rendered(&mut t.app);

        let (x, y) = point_of(t.app.app_state(), 0, 15);
        assert!(y < 24 - FOOTER_HEIGHT, "cursor row {y} under the footer");
        let row = text_at(&buffer, x, y, usize::from(100 - x));
        assert!(row.contains("flare 15"), "{row}");
        let help = help_text(&t.app.app_state().mode);
        assert_eq!(text_at(&buffer, 0, 23, help.chars().count()), help);
    }
}
