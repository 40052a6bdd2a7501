use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Flip,
    Faster,
    Slower,
    Help,
    Continue,
    Restart,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::F(1)) => {
                Some(Command::Quit)
            }
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Quit),
            (_, KeyCode::Up) => Some(Command::Up),
            (_, KeyCode::Down) => Some(Command::Down),
            (_, KeyCode::Left) => Some(Command::Left),
            (_, KeyCode::Right) => Some(Command::Right),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Command::Flip),
            (KeyModifiers::NONE, KeyCode::Char('f')) => Some(Command::Faster),
            (KeyModifiers::NONE, KeyCode::Char('s')) => Some(Command::Slower),
            (KeyModifiers::NONE, KeyCode::Char('h')) | (_, KeyCode::Esc) => Some(Command::Help),
            (KeyModifiers::NONE, KeyCode::Char('c')) => Some(Command::Continue),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::Restart),
            _ => None,
        }
    }
}
