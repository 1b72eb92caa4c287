use std::io;
use std::time::{Duration, Instant};

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::app_state::{App, Focus};
use super::mouse;

/// Timeout for event polling - keeps debounce/dismiss deadlines and worker
/// responses flowing even when the keyboard is idle
const EVENT_POLL_TIMEOUT: Duration = Duration::from_millis(100);

impl App {
    /// Handle events and update application state
    pub fn handle_events(&mut self) -> io::Result<()> {
        self.tick(Instant::now());

        if event::poll(EVENT_POLL_TIMEOUT)? {
            match event::read()? {
                // Check that it's a key press event to avoid duplicates
                Event::Key(key_event) if key_event.kind == KeyEventKind::Press => {
                    self.handle_key_event(key_event);
                }
                Event::Mouse(mouse_event) => {
                    mouse::handle_mouse_event(self, mouse_event);
                }
                // Handle paste events (bracketed paste mode)
                Event::Paste(text) => {
                    self.handle_paste_event(text);
                }
                Event::Resize(_, _) => {
                    self.mark_dirty();
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Handle key press events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        if key.code == KeyCode::Tab {
            match self.focus {
                Focus::InputField => self.focus_results_pane(Instant::now()),
                Focus::ResultsPane => self.focus_input_field(),
            }
            return;
        }

        match self.focus {
            Focus::InputField => self.handle_input_field_key(key),
            Focus::ResultsPane => {}
        }
    }

    /// Handle keys when the input field is focused.
    ///
    /// Down/Up are consumed whether or not the popup is open; Enter commits
    /// the active row when the popup is open, or runs the lookup directly
    /// when it is closed; Escape dismisses unconditionally. Everything else
    /// flows through to the text field.
    fn handle_input_field_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.suggest.dismiss();
            }
            KeyCode::Down => {
                if self.suggest.is_visible() {
                    self.suggest.select_next();
                }
            }
            KeyCode::Up => {
                if self.suggest.is_visible() {
                    self.suggest.select_previous();
                }
            }
            KeyCode::Enter => {
                if self.suggest.is_visible() {
                    if let Some(index) = self.suggest.active() {
                        self.commit_suggestion(index);
                    }
                } else {
                    self.run_quote_lookup();
                }
            }
            _ => {
                if self.input.textarea.input(key) {
                    self.on_input_changed(Instant::now());
                }
            }
        }
        self.mark_dirty();
    }

    /// Handle paste events from bracketed paste mode.
    /// Pasted text joins the input as one edit and debounces like typing.
    fn handle_paste_event(&mut self, text: String) {
        let text = text.replace(['\n', '\r'], " ");
        self.input.textarea.insert_str(&text);
        self.on_input_changed(Instant::now());
        self.mark_dirty();
    }
}
