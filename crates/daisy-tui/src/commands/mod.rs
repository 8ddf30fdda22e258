//! `:` commands — parsing and execution against the application state.
//!
//! | Command | Action |
//! |---------|--------|
//! | `q`, `quit`, `q!` | Quit |
//! | `help` | Toggle the help popup |
//! | `theme <name>` | Switch theme (`default`, `gruvbox`) |
//! | `catalog <name>` | Jump to the `remedies` or `care` tab |
//! | `refresh` | Reload the common plants list |
//! | `search <term>` | Submit a search without typing in the query bar |

use daisy_core::{controller::SearchEvent, Catalog};

use crate::{app::AppState, theme::Theme};

/// A parsed, validated command ready to be executed by the app shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Help,
    Theme(String),
    Catalog(Catalog),
    Refresh,
    Search(String),
}

impl Command {
    /// Parse a raw command string (the text after the `:` prefix).
    ///
    /// An empty string returns `Err("")` as a sentinel meaning "close
    /// without acting".
    pub fn parse(input: &str) -> Result<Command, String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(String::new());
        }

        let (word, rest) = input
            .split_once(char::is_whitespace)
            .map(|(w, r)| (w, r.trim()))
            .unwrap_or((input, ""));

        match word {
            "q" | "quit" | "q!" | "quit!" => Ok(Command::Quit),
            "help" => Ok(Command::Help),
            "refresh" => Ok(Command::Refresh),
            "theme" if rest.is_empty() => Err("usage: theme <default|gruvbox>".to_string()),
            "theme" => Ok(Command::Theme(rest.to_string())),
            "catalog" => rest.parse::<Catalog>().map(Command::Catalog),
            "search" if rest.is_empty() => Err("usage: search <term>".to_string()),
            "search" => Ok(Command::Search(rest.to_string())),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

/// Execute a parsed [`Command`] against the application state.
pub fn execute_command(s: &mut AppState, cmd: Command) {
    match cmd {
        Command::Quit => s.quit = true,
        Command::Help => s.show_help = !s.show_help,
        Command::Theme(name) => s.theme = Theme::by_name(&name),
        Command::Catalog(catalog) => {
            if let Some(i) = s.tabs.iter().position(|t| t.catalog == catalog) {
                s.switch_tab(i);
            }
        }
        Command::Refresh => s.dispatch(SearchEvent::Refresh),
        Command::Search(term) => {
            s.active_tab_mut().query.set(&term);
            s.dispatch(SearchEvent::QueryChanged(term));
            s.dispatch(SearchEvent::Submit);
        }
    }
}
