//! Application state and event loop

use super::input::TextInput;
use super::ui;
use crate::catalog::RecordStore;
use crate::clipboard::{ClipboardWriter, Notifier};
use crate::error::Result;
use crate::state::{Presentation, PresentationOptions, StateChange};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::debug;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};

/// Blocking alert: while a message is set every key except the dismiss keys
/// is swallowed.
#[derive(Default, Debug)]
pub struct AlertDialog {
    pub message: Option<String>,
}

impl AlertDialog {
    pub fn is_open(&self) -> bool {
        self.message.is_some()
    }

    pub fn dismiss(&mut self) {
        self.message = None;
    }
}

impl Notifier for AlertDialog {
    fn alert(&mut self, message: &str) {
        self.message = Some(message.to_string());
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Samples,
}

pub struct App<'a, C: ClipboardWriter> {
    pub presentation: Presentation<'a>,
    pub input: TextInput,
    pub focus: Focus,
    pub selected_sample: usize,
    pub alert: AlertDialog,
    pub should_quit: bool,
    clipboard: C,
}

impl<'a, C: ClipboardWriter> App<'a, C> {
    pub fn new(store: &'a RecordStore, options: PresentationOptions, clipboard: C) -> Self {
        Self {
            presentation: Presentation::new(store, options),
            input: TextInput::new(),
            focus: Focus::Search,
            selected_sample: 0,
            alert: AlertDialog::default(),
            should_quit: false,
            clipboard,
        }
    }

    fn copy_selected(&mut self, now: Instant) -> StateChange {
        let Some(record) = self.presentation.store().records().get(self.selected_sample) else {
            return StateChange::Unchanged;
        };
        self.presentation.copy(
            &record.identifier,
            &mut self.clipboard,
            &mut self.alert,
            now,
        )
    }

    fn select_next(&mut self) {
        let last = self.presentation.store().len().saturating_sub(1);
        if self.selected_sample < last {
            self.selected_sample += 1;
        }
    }

    fn select_prev(&mut self) {
        self.selected_sample = self.selected_sample.saturating_sub(1);
    }

    pub fn tick(&mut self, now: Instant) -> StateChange {
        self.presentation.tick(now)
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> StateChange {
        if key.kind != KeyEventKind::Press {
            return StateChange::Unchanged;
        }

        if self.alert.is_open() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alert.dismiss();
            }
            return StateChange::Unchanged;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
                self.should_quit = true;
                return StateChange::Unchanged;
            }
            (KeyCode::Char('t'), KeyModifiers::CONTROL) => return self.presentation.toggle_theme(),
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => {
                self.focus = match self.focus {
                    Focus::Search => Focus::Samples,
                    Focus::Samples => Focus::Search,
                };
                return StateChange::Unchanged;
            }
            _ => {}
        }

        match self.focus {
            Focus::Search => match key.code {
                KeyCode::Enter => self.presentation.submit(),
                KeyCode::Esc => {
                    self.should_quit = true;
                    StateChange::Unchanged
                }
                _ => {
                    if self.input.handle_key(key.code, key.modifiers) {
                        self.presentation.set_input(self.input.text.clone())
                    } else {
                        StateChange::Unchanged
                    }
                }
            },
            Focus::Samples => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    self.select_prev();
                    StateChange::Unchanged
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.select_next();
                    StateChange::Unchanged
                }
                KeyCode::Enter | KeyCode::Char('c') => self.copy_selected(now),
                KeyCode::Esc => {
                    self.focus = Focus::Search;
                    StateChange::Unchanged
                }
                _ => StateChange::Unchanged,
            },
        }
    }
}

/// Runs `restore` when dropped, so the terminal is put back on every exit
/// path including `?` returns and panics that unwind through `run`.
struct TerminalGuard<F: FnMut()> {
    restore: Option<F>,
}

impl<F: FnMut()> TerminalGuard<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }
}

impl<F: FnMut()> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        if let Some(mut restore) = self.restore.take() {
            restore();
        }
    }
}

fn restore_terminal() {
    // errors are ignored: this also runs while unwinding
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show);
}

/// Run the interactive UI until the user quits.
pub fn run<C: ClipboardWriter>(
    store: &RecordStore,
    options: PresentationOptions,
    clipboard: C,
) -> Result<()> {
    enable_raw_mode()?;
    let _guard = TerminalGuard::new(restore_terminal);

    execute!(io::stdout(), EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, options, clipboard);
    run_loop(&mut terminal, &mut app)
}

fn run_loop<C: ClipboardWriter>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<'_, C>,
) -> Result<()> {
    const POLL_TIMEOUT: Duration = Duration::from_millis(50);

    loop {
        terminal.draw(|f| ui::render(f, app))?;

        if event::poll(POLL_TIMEOUT)? {
            if let Event::Key(key) = event::read()? {
                let change = app.handle_key(key, Instant::now());
                if change != StateChange::Unchanged {
                    debug!("{change:?}");
                }
            }
        }

        if app.tick(Instant::now()) == StateChange::CopyCleared {
            debug!("Copy marker cleared");
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MockClipboardWriter;
    use crate::error::ClipboardError;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_str<C: ClipboardWriter>(app: &mut App<'_, C>, s: &str, now: Instant) {
        for c in s.chars() {
            app.handle_key(key(KeyCode::Char(c)), now);
        }
    }

    fn accepting_clipboard() -> MockClipboardWriter {
        let mut clipboard = MockClipboardWriter::new();
        clipboard.expect_write_text().returning(|_| Ok(()));
        clipboard
    }

    #[test]
    fn test_type_and_submit() {
        let store = RecordStore::seeded();
        let mut app = App::new(&store, PresentationOptions::default(), accepting_clipboard());
        let now = Instant::now();

        type_str(&mut app, "wba5a7c53fg123456", now);
        assert_eq!(app.presentation.state().input(), "wba5a7c53fg123456");

        let change = app.handle_key(key(KeyCode::Enter), now);
        assert_eq!(change, StateChange::Found("WBA5A7C53FG123456".to_string()));
        assert_eq!(app.presentation.state().matched().unwrap().model, "BMW 3er");
    }

    #[test]
    fn test_ctrl_t_toggles_theme_without_editing_input() {
        let store = RecordStore::seeded();
        let mut app = App::new(&store, PresentationOptions::default(), accepting_clipboard());
        let now = Instant::now();

        type_str(&mut app, "abc", now);
        app.handle_key(ctrl('t'), now);
        assert!(app.presentation.state().dark_mode());
        assert_eq!(app.presentation.state().input(), "abc");
    }

    #[test]
    fn test_copy_selected_sample() {
        let store = RecordStore::seeded();
        let mut clipboard = MockClipboardWriter::new();
        clipboard
            .expect_write_text()
            .with(mockall::predicate::eq("WAUZZZ8K4BA123789"))
            .times(1)
            .returning(|_| Ok(()));
        let mut app = App::new(&store, PresentationOptions::default(), clipboard);
        let now = Instant::now();

        app.handle_key(key(KeyCode::Tab), now);
        assert_eq!(app.focus, Focus::Samples);
        app.handle_key(key(KeyCode::Down), now);
        app.handle_key(key(KeyCode::Down), now);
        app.handle_key(key(KeyCode::Down), now);
        assert_eq!(app.selected_sample, 2);

        app.handle_key(key(KeyCode::Enter), now);
        assert!(app.presentation.state().is_copied("WAUZZZ8K4BA123789"));

        app.tick(now + Duration::from_secs(2));
        assert!(app.presentation.state().copied_identifier().is_none());
    }

    #[test]
    fn test_copy_failure_opens_blocking_alert() {
        let store = RecordStore::seeded();
        let mut clipboard = MockClipboardWriter::new();
        clipboard
            .expect_write_text()
            .times(1)
            .returning(|_| Err(ClipboardError::Unavailable("no display".to_string())));
        let mut app = App::new(&store, PresentationOptions::default(), clipboard);
        let now = Instant::now();

        app.handle_key(key(KeyCode::Tab), now);
        assert_eq!(app.handle_key(key(KeyCode::Char('c')), now), StateChange::CopyFailed);
        assert_eq!(
            app.alert.message.as_deref(),
            Some("Kopieren nicht möglich. Bitte manuell kopieren.")
        );

        // swallowed while the alert is open; a retry would hit the mock twice
        app.handle_key(key(KeyCode::Char('c')), now);
        app.handle_key(ctrl('t'), now);
        assert!(!app.presentation.state().dark_mode());
        assert!(app.alert.is_open());

        app.handle_key(key(KeyCode::Esc), now);
        assert!(!app.alert.is_open());
        assert!(!app.should_quit);
    }

    #[test]
    fn test_escape_quits_from_search() {
        let store = RecordStore::seeded();
        let mut app = App::new(&store, PresentationOptions::default(), accepting_clipboard());
        let now = Instant::now();

        app.handle_key(key(KeyCode::Tab), now);
        app.handle_key(key(KeyCode::Esc), now);
        assert_eq!(app.focus, Focus::Search);
        assert!(!app.should_quit);

        app.handle_key(key(KeyCode::Esc), now);
        assert!(app.should_quit);
    }

    #[test]
    fn test_terminal_guard_restores_on_drop() {
        let restored = std::cell::Cell::new(0);
        {
            let _guard = TerminalGuard::new(|| restored.set(restored.get() + 1));
            assert_eq!(restored.get(), 0);
        }
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_terminal_guard_restores_on_panic() {
        let restored = std::cell::Cell::new(false);
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = TerminalGuard::new(|| restored.set(true));
            panic!("draw failed");
        }));
        assert!(result.is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_release_events_are_ignored() {
        let store = RecordStore::seeded();
        let mut app = App::new(&store, PresentationOptions::default(), accepting_clipboard());
        let mut release = key(KeyCode::Char('x'));
        release.kind = KeyEventKind::Release;

        assert_eq!(app.handle_key(release, Instant::now()), StateChange::Unchanged);
        assert!(app.presentation.state().input().is_empty());
    }
}
