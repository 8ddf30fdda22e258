//! Semantic application events — crossterm key events mapped to a
//! widget-agnostic vocabulary so widgets never touch crossterm directly.
//!
//! # Keybindings
//!
//! | Key(s)                  | Event                      |
//! |-------------------------|----------------------------|
//! | `q`, `Ctrl+c`           | `Quit`                     |
//! | `Tab`                   | `FocusNext`                |
//! | `/`                     | `QueryFocus`               |
//! | `]`                     | `NextTab`                  |
//! | `[`                     | `PrevTab`                  |
//! | `r`                     | `Refresh`                  |
//! | `x`                     | `DismissError`             |
//! | `PageUp`, `Ctrl+u`      | `ScrollUp`                 |
//! | `PageDown`, `Ctrl+d`    | `ScrollDown`               |
//! | `↑` / `k`               | `Nav(Up)`                  |
//! | `↓` / `j`               | `Nav(Down)`                |
//! | `←` / `h`               | `Nav(Left)`                |
//! | `→` / `l`               | `Nav(Right)`               |
//! | printable char          | `Char(c)`                  |
//! | `Backspace`             | `Backspace`                |
//! | `Enter`                 | `Enter`                    |
//! | terminal resize         | `Resize(w, h)`             |
//!
//! The single-character bindings (`/`, `]`, `[`, `r`, `x`) can be remapped
//! in the `[keybindings]` section of `config.toml`; see [`Keymap`].
//!
//! ## Insert mode
//!
//! When a text-input widget (query bar, command bar) is focused, the event
//! loop calls [`to_app_event_insert`] instead. Every printable character is
//! forwarded as `Char`; only `Ctrl+c`, `Escape`, `Enter`, `Tab`, `Backspace`
//! and the arrow keys keep their bindings.

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use daisy_core::config::KeybindingsConfig;

/// Cardinal direction for list navigation and text-cursor movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// A semantic application event derived from a raw crossterm [`Event`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Exit the application.
    Quit,
    /// Move keyboard focus to the next pane (Tab-cycle).
    FocusNext,
    /// Transfer focus to the query bar and open the keyboard.
    QueryFocus,
    /// Switch to the next catalog tab.
    NextTab,
    /// Switch to the previous catalog tab.
    PrevTab,
    /// Re-fetch the common plants list.
    Refresh,
    /// Hide the current error message.
    DismissError,
    /// Scroll the detail pane up one page.
    ScrollUp,
    /// Scroll the detail pane down one page.
    ScrollDown,
    /// Move the list cursor or the text cursor.
    Nav(Direction),
    /// A printable character forwarded to the active text input.
    Char(char),
    /// Delete the character before the cursor in the active text input.
    Backspace,
    /// Submit the query or pick the highlighted entry.
    Enter,
    /// The terminal was resized to the given (width, height).
    Resize(u16, u16),
    /// Close the keyboard, help popup, or command bar.
    Escape,
}

/// Remappable single-character bindings for navigation mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    pub query_focus: char,
    pub next_tab: char,
    pub prev_tab: char,
    pub refresh: char,
    pub dismiss_error: char,
}

impl Default for Keymap {
    fn default() -> Self {
        Self { query_focus: '/', next_tab: ']', prev_tab: '[', refresh: 'r', dismiss_error: 'x' }
    }
}

impl Keymap {
    /// Build from `[keybindings]`. Entries that are not exactly one
    /// character keep their default.
    pub fn from_config(cfg: &KeybindingsConfig) -> Self {
        let d = Self::default();
        Self {
            query_focus: single_char("query_focus", &cfg.query_focus, d.query_focus),
            next_tab: single_char("next_tab", &cfg.next_tab, d.next_tab),
            prev_tab: single_char("prev_tab", &cfg.prev_tab, d.prev_tab),
            refresh: single_char("refresh", &cfg.refresh, d.refresh),
            dismiss_error: single_char("dismiss_error", &cfg.dismiss_error, d.dismiss_error),
        }
    }

    fn lookup(&self, c: char) -> Option<AppEvent> {
        match c {
            c if c == self.query_focus => Some(AppEvent::QueryFocus),
            c if c == self.next_tab => Some(AppEvent::NextTab),
            c if c == self.prev_tab => Some(AppEvent::PrevTab),
            c if c == self.refresh => Some(AppEvent::Refresh),
            c if c == self.dismiss_error => Some(AppEvent::DismissError),
            _ => None,
        }
    }
}

fn single_char(name: &str, value: &str, default: char) -> char {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            tracing::warn!(binding = name, %value, "keybinding must be a single character, using default");
            default
        }
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] (normal / navigation mode).
///
/// Returns `None` for events that carry no meaning for the application
/// (mouse events, unbound keys).
pub fn to_app_event(event: Event, keymap: &Keymap) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key(key, keymap),
        _ => None,
    }
}

/// Map a raw crossterm [`Event`] to an [`AppEvent`] for text-input mode.
pub fn to_app_event_insert(event: Event) -> Option<AppEvent> {
    match event {
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        Event::Key(key) => map_key_insert(key),
        _ => None,
    }
}

fn map_key(key: KeyEvent, keymap: &Keymap) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    if let Char(c) = key.code {
        if key.modifiers == Mod::NONE {
            if let Some(ev) = keymap.lookup(c) {
                return Some(ev);
            }
        }
    }

    match key.code {
        Char('q') if key.modifiers == Mod::NONE => Some(AppEvent::Quit),
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        PageUp => Some(AppEvent::ScrollUp),
        PageDown => Some(AppEvent::ScrollDown),
        Char('u') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollUp),
        Char('d') if key.modifiers == Mod::CONTROL => Some(AppEvent::ScrollDown),

        Up | Char('k') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Up)),
        Down | Char('j') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Down)),
        Left | Char('h') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Left)),
        Right | Char('l') if key.modifiers == Mod::NONE => Some(AppEvent::Nav(Direction::Right)),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

fn map_key_insert(key: KeyEvent) -> Option<AppEvent> {
    use KeyCode::*;
    use KeyModifiers as Mod;

    match key.code {
        Char('c') if key.modifiers == Mod::CONTROL => Some(AppEvent::Quit),

        Up => Some(AppEvent::Nav(Direction::Up)),
        Down => Some(AppEvent::Nav(Direction::Down)),
        Left => Some(AppEvent::Nav(Direction::Left)),
        Right => Some(AppEvent::Nav(Direction::Right)),

        Tab if key.modifiers == Mod::NONE => Some(AppEvent::FocusNext),

        Char(c) if key.modifiers == Mod::NONE || key.modifiers == Mod::SHIFT => {
            Some(AppEvent::Char(c))
        }

        Backspace if key.modifiers == Mod::NONE => Some(AppEvent::Backspace),
        Enter if key.modifiers == Mod::NONE => Some(AppEvent::Enter),
        Esc => Some(AppEvent::Escape),

        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn press(code: KeyCode) -> Event {
        key(code, KeyModifiers::NONE)
    }

    fn ctrl(code: KeyCode) -> Event {
        key(code, KeyModifiers::CONTROL)
    }

    fn normal(event: Event) -> Option<AppEvent> {
        to_app_event(event, &Keymap::default())
    }

    #[test]
    fn quit_keys() {
        assert_eq!(normal(press(KeyCode::Char('q'))), Some(AppEvent::Quit));
        assert_eq!(normal(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }

    #[test]
    fn tab_switching() {
        assert_eq!(normal(press(KeyCode::Char(']'))), Some(AppEvent::NextTab));
        assert_eq!(normal(press(KeyCode::Char('['))), Some(AppEvent::PrevTab));
    }

    #[test]
    fn refresh_and_dismiss() {
        assert_eq!(normal(press(KeyCode::Char('r'))), Some(AppEvent::Refresh));
        assert_eq!(normal(press(KeyCode::Char('x'))), Some(AppEvent::DismissError));
    }

    #[test]
    fn list_nav_hjkl_and_arrows() {
        assert_eq!(normal(press(KeyCode::Char('k'))), Some(AppEvent::Nav(Direction::Up)));
        assert_eq!(normal(press(KeyCode::Down)), Some(AppEvent::Nav(Direction::Down)));
    }

    #[test]
    fn scroll_keys() {
        assert_eq!(normal(press(KeyCode::PageUp)), Some(AppEvent::ScrollUp));
        assert_eq!(normal(ctrl(KeyCode::Char('d'))), Some(AppEvent::ScrollDown));
    }

    #[test]
    fn resize_event() {
        assert_eq!(normal(Event::Resize(120, 40)), Some(AppEvent::Resize(120, 40)));
    }

    #[test]
    fn unbound_key_returns_none() {
        assert_eq!(normal(press(KeyCode::F(5))), None);
    }

    #[test]
    fn insert_mode_shortcut_letters_are_chars() {
        for ch in ['h', 'j', 'k', 'l', 'q', 'r', 'x', '[', ']', '/'] {
            assert_eq!(
                to_app_event_insert(press(KeyCode::Char(ch))),
                Some(AppEvent::Char(ch)),
                "insert mode: '{ch}' should produce Char"
            );
        }
    }

    #[test]
    fn remapped_bindings_replace_defaults() {
        let cfg = KeybindingsConfig { refresh: "R".into(), next_tab: "ab".into(), ..Default::default() };
        let keymap = Keymap::from_config(&cfg);
        assert_eq!(keymap.next_tab, ']');
        assert_eq!(to_app_event(press(KeyCode::Char('R')), &keymap), Some(AppEvent::Refresh));
        assert_eq!(to_app_event(press(KeyCode::Char('r')), &keymap), Some(AppEvent::Char('r')));
    }

    #[test]
    fn insert_mode_ctrl_c_still_quits() {
        assert_eq!(to_app_event_insert(ctrl(KeyCode::Char('c'))), Some(AppEvent::Quit));
    }
}
