//! TUI rendering and event loop (impure shell)

pub mod constants;
mod help;
mod layout;
mod screens;
mod styles;
mod summary;

pub use help::help_text;
pub use layout::render_layout;
pub use styles::{ColorConfig, ScreenStyles};
pub use summary::SummaryPanel;

use crate::config::{KeyBindings, ResolvedConfig, SettingsStore};
use crate::model::QueryError;
use crate::source::{QueryCompletion, QueryRunner};
use crate::state::controller::{self, Effect};
use crate::state::AppState;
use crate::store::RecordStore;
use crossterm::{
    event::{self, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that end the TUI.
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    app_state: AppState,
    key_bindings: KeyBindings,
    runner: QueryRunner,
    completions_tx: Sender<QueryCompletion>,
    completions_rx: Receiver<QueryCompletion>,
    styles: ScreenStyles,
    tick_interval: Duration,
    last_tick: Instant,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture.
    pub fn new(config: &ResolvedConfig, colors: ColorConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let app_state = AppState::new(
            SettingsStore::new(config.settings_path.clone()),
            RecordStore::new(config.cache_path.clone()),
            config.notice_ticks,
        );

        Ok(Self::with_parts(
            terminal,
            app_state,
            QueryRunner::from_config(config),
            ScreenStyles::with_color_config(colors),
            config.tick_interval(),
        ))
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits. Input is polled for at most the time
    /// left until the next animation tick; finished queries are picked up
    /// after every wake-up.
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            let timeout = self.tick_interval.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? && self.handle_event(event::read()?) {
                return Ok(());
            }

            if self.last_tick.elapsed() >= self.tick_interval {
                controller::handle_tick(&mut self.app_state);
                self.last_tick = Instant::now();
            }
            self.drain_completions();
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn with_parts(
        terminal: Terminal<B>,
        mut app_state: AppState,
        runner: QueryRunner,
        styles: ScreenStyles,
        tick_interval: Duration,
    ) -> Self {
        let (width, height) = match terminal.size() {
            Ok(size) if size.width > 0 => (size.width, size.height),
            _ => (80, 24),
        };
        app_state.resize(width, height);
        let (completions_tx, completions_rx) = mpsc::channel();

        Self {
            terminal,
            app_state,
            key_bindings: KeyBindings::default(),
            runner,
            completions_tx,
            completions_rx,
            styles,
            tick_interval,
            last_tick: Instant::now(),
        }
    }

    /// Route one terminal event to the controller.
    ///
    /// Returns true if app should quit
    fn handle_event(&mut self, event: Event) -> bool {
        let effect = match event {
            Event::Key(key) => controller::handle_key(&mut self.app_state, key, &self.key_bindings),
            Event::Mouse(mouse) => controller::handle_mouse(&mut self.app_state, mouse),
            Event::Resize(width, height) => {
                debug!(width, height, "Terminal resized");
                controller::handle_resize(&mut self.app_state, width, height);
                Effect::None
            }
            _ => Effect::None,
        };
        self.apply(effect)
    }

    /// Carry out an effect. Returns true if app should quit
    fn apply(&mut self, effect: Effect) -> bool {
        match effect {
            Effect::None => false,
            Effect::Quit => true,
            Effect::RunQuery(request) => {
                let id = request.id;
                match self.runner.spawn(request, self.completions_tx.clone()) {
                    Ok(_) => info!(id, "Flare query started"),
                    Err(source) => self.app_state.fail(
                        "Query failed",
                        QueryError::Spawn {
                            program: "flare-query thread".to_string(),
                            source,
                        },
                    ),
                }
                false
            }
        }
    }

    /// Apply every query completion that has arrived.
    fn drain_completions(&mut self) {
        while let Ok(completion) = self.completions_rx.try_recv() {
            controller::handle_query_completion(&mut self.app_state, completion);
        }
    }

    /// Render the current frame
    fn draw(&mut self) -> Result<(), TuiError> {
        let state = &self.app_state;
        let styles = &self.styles;
        self.terminal.draw(|frame| {
            layout::render_layout(frame, state, styles);
        })?;
        Ok(())
    }
}

// ===== Test Helpers =====

#[cfg(test)]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(terminal: Terminal<B>, app_state: AppState, runner: QueryRunner) -> Self {
        Self::with_parts(
            terminal,
            app_state,
            runner,
            ScreenStyles::with_color_config(ColorConfig::from_env_and_args(true)),
            Duration::from_millis(80),
        )
    }

    /// Get reference to app state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.app_state
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Get reference to terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Block until one query completion arrives, then apply it.
    pub(crate) fn await_completion(&mut self, timeout: Duration) -> bool {
        match self.completions_rx.recv_timeout(timeout) {
            Ok(completion) => {
                controller::handle_query_completion(&mut self.app_state, completion);
                true
            }
            Err(_) => false,
        }
    }
}

/// Initialize and run the TUI application
///
/// Handles terminal setup, runs the event loop, and restores the terminal
/// even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(config: &ResolvedConfig, colors: ColorConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(config, colors)?;

    let result = app.run();

    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
