use blockfall_engine::Command;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the play screen to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    /// Forward to the game session.
    Game(Command),
    /// End the current game.
    Quit,
    /// Start a new game.
    Play,
    /// Toggle pause.
    Pause,
    /// Leave the program.
    Exit,
}

impl InputCommand {
    /// Decodes a terminal event. Key releases and unbound keys yield `None`.
    pub fn from_event(event: &Event) -> Option<Self> {
        let key = event.as_key_event()?;
        if key.kind == KeyEventKind::Release {
            return None;
        }
        Self::from_key(key)
    }

    pub fn from_key(key: KeyEvent) -> Option<Self> {
        let command = match key.code {
            KeyCode::Left => Self::Game(Command::Left),
            KeyCode::Right => Self::Game(Command::Right),
            KeyCode::Down => Self::Game(Command::SoftDrop),
            KeyCode::Up => Self::Game(Command::Rotate),
            KeyCode::Char(' ') => Self::Game(Command::HardDrop),
            KeyCode::Esc => Self::Quit,
            KeyCode::Enter => Self::Play,
            KeyCode::Char('p' | 'P') => Self::Pause,
            KeyCode::Char('q' | 'Q') => Self::Exit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Self::Exit,
            _ => return None,
        };
        Some(command)
    }
}
