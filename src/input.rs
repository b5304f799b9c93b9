use crate::session::SessionEvent;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press means to the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Char(char),
    Space,
    Backspace,
    Pause,
    Restart,
    /// Restart with freshly sampled words
    Resample,
    Quit,
    ToggleWord,
    ToggleFps,
    Ignored,
}

impl Input {
    /// The session command for this input, if it is one.
    pub fn session_event(self) -> Option<SessionEvent> {
        match self {
            Input::Char(c) => Some(SessionEvent::Type(c)),
            Input::Space => Some(SessionEvent::Boundary),
            Input::Backspace => Some(SessionEvent::Erase),
            Input::Pause => Some(SessionEvent::Pause),
            Input::Restart => Some(SessionEvent::Restart),
            Input::Quit => Some(SessionEvent::Quit),
            Input::Resample | Input::ToggleWord | Input::ToggleFps | Input::Ignored => None,
        }
    }
}

impl From<KeyEvent> for Input {
    fn from(key: KeyEvent) -> Self {
        if key.kind == KeyEventKind::Release {
            return Input::Ignored;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') | KeyCode::Char('q') => Input::Quit,
                KeyCode::Char('r') => Input::Restart,
                KeyCode::Char('n') => Input::Resample,
                KeyCode::Char('t') => Input::ToggleWord,
                KeyCode::Char('f') => Input::ToggleFps,
                // some terminals send ^H for backspace
                KeyCode::Char('h') => Input::Backspace,
                _ => Input::Ignored,
            };
        }

        if key.modifiers.contains(KeyModifiers::ALT) {
            return Input::Ignored;
        }

        match key.code {
            KeyCode::Char(' ') => Input::Space,
            KeyCode::Char(c) if !c.is_control() => Input::Char(c),
            KeyCode::Backspace => Input::Backspace,
            KeyCode::Esc => Input::Pause,
            _ => Input::Ignored,
        }
    }
}
