//! Key mapping from terminal events to game keys and controls.

use crate::classifier::{Control, Key};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a terminal key press means to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputCommand {
    Key(Key),
    Control(Control),
}

/// Map keyboard input to a game key or control.
pub fn key_from_event(key: KeyEvent) -> Option<InputCommand> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(InputCommand::Key(Key::Left))
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(InputCommand::Key(Key::Right))
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(InputCommand::Key(Key::Down))
        }

        // Rotation
        KeyCode::Up
        | KeyCode::Char('k')
        | KeyCode::Char('K')
        | KeyCode::Char('w')
        | KeyCode::Char('W') => Some(InputCommand::Key(Key::Rotate)),

        // Actions
        KeyCode::Char(' ') => Some(InputCommand::Key(Key::HardDrop)),
        KeyCode::Char('c') | KeyCode::Char('C') if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(InputCommand::Key(Key::Hold))
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Some(InputCommand::Control(Control::Pause)),

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => Some(InputCommand::Control(Control::Restart)),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(
            key_from_event(KeyEvent::from(KeyCode::Left)),
            Some(InputCommand::Key(Key::Left))
        );
        assert_eq!(
            key_from_event(KeyEvent::from(KeyCode::Right)),
            Some(InputCommand::Key(Key::Right))
        );
        assert_eq!(
            key_from_event(KeyEvent::from(KeyCode::Down)),
            Some(InputCommand::Key(Key::Down))
        );
        assert_eq!(
            key_from_event(KeyEvent::from(KeyCode::Char('H'))),
            Some(InputCommand::Key(Key::Left))
        );
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(
            key_from_event(KeyEvent::from(KeyCode::Up)),
            Some(InputCommand::Key(Key::Rotate))
        );
        assert_eq!(
            key_from_event(KeyEvent::from(KeyCode::Char('W'))),
            Some(InputCommand::Key(Key::Rotate))
        );
    }

    #[test]
    fn test_action_keys() {
        assert_eq!(
            key_from_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(InputCommand::Key(Key::HardDrop))
        );
        assert_eq!(
            key_from_event(KeyEvent::from(KeyCode::Char('c'))),
            Some(InputCommand::Key(Key::Hold))
        );
        assert_eq!(
            key_from_event(KeyEvent::from(KeyCode::Char('p'))),
            Some(InputCommand::Control(Control::Pause))
        );
        assert_eq!(
            key_from_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(InputCommand::Control(Control::Restart))
        );
        assert_eq!(
            key_from_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            None
        );
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('x'))));
    }
}
