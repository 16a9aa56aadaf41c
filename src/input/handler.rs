use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::{Difficulty, Direction};

/// Player intent, independent of which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Move(Direction),
    TogglePause,
    ToggleTheme,
    NextSkin,
    SelectDifficulty(Difficulty),
    /// Enter: start, restart or resume depending on the screen
    Confirm,
    Restart,
    ToMenu,
    ShowScores,
    ShowInfo,
    Quit,
    None,
}

pub struct InputHandler;

impl InputHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Up => KeyAction::Move(Direction::Up),
            KeyCode::Down => KeyAction::Move(Direction::Down),
            KeyCode::Left => KeyAction::Move(Direction::Left),
            KeyCode::Right => KeyAction::Move(Direction::Right),

            KeyCode::Char(' ') | KeyCode::Esc => KeyAction::TogglePause,
            KeyCode::Enter => KeyAction::Confirm,

            KeyCode::Char(c) => match c.to_ascii_lowercase() {
                'w' => KeyAction::Move(Direction::Up),
                's' => KeyAction::Move(Direction::Down),
                'a' => KeyAction::Move(Direction::Left),
                'd' => KeyAction::Move(Direction::Right),

                '1' => KeyAction::SelectDifficulty(Difficulty::Easy),
                '2' => KeyAction::SelectDifficulty(Difficulty::Medium),
                '3' => KeyAction::SelectDifficulty(Difficulty::Hard),

                't' => KeyAction::ToggleTheme,
                'k' => KeyAction::NextSkin,
                'r' => KeyAction::Restart,
                'm' => KeyAction::ToMenu,
                'h' => KeyAction::ShowScores,
                'i' => KeyAction::ShowInfo,
                'q' => KeyAction::Quit,
                _ => KeyAction::None,
            },

            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyAction {
        InputHandler::new().handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_arrow_keys() {
        assert_eq!(press(KeyCode::Up), KeyAction::Move(Direction::Up));
        assert_eq!(press(KeyCode::Down), KeyAction::Move(Direction::Down));
        assert_eq!(press(KeyCode::Left), KeyAction::Move(Direction::Left));
        assert_eq!(press(KeyCode::Right), KeyAction::Move(Direction::Right));
    }

    #[test]
    fn test_wasd_keys_any_case() {
        assert_eq!(press(KeyCode::Char('w')), KeyAction::Move(Direction::Up));
        assert_eq!(press(KeyCode::Char('A')), KeyAction::Move(Direction::Left));
        assert_eq!(press(KeyCode::Char('s')), KeyAction::Move(Direction::Down));
        assert_eq!(press(KeyCode::Char('D')), KeyAction::Move(Direction::Right));
    }

    #[test]
    fn test_pause_keys() {
        assert_eq!(press(KeyCode::Char(' ')), KeyAction::TogglePause);
        assert_eq!(press(KeyCode::Esc), KeyAction::TogglePause);
    }

    #[test]
    fn test_difficulty_keys() {
        assert_eq!(press(KeyCode::Char('1')), KeyAction::SelectDifficulty(Difficulty::Easy));
        assert_eq!(press(KeyCode::Char('2')), KeyAction::SelectDifficulty(Difficulty::Medium));
        assert_eq!(press(KeyCode::Char('3')), KeyAction::SelectDifficulty(Difficulty::Hard));
    }

    #[test]
    fn test_screen_keys() {
        assert_eq!(press(KeyCode::Enter), KeyAction::Confirm);
        assert_eq!(press(KeyCode::Char('r')), KeyAction::Restart);
        assert_eq!(press(KeyCode::Char('m')), KeyAction::ToMenu);
        assert_eq!(press(KeyCode::Char('h')), KeyAction::ShowScores);
        assert_eq!(press(KeyCode::Char('i')), KeyAction::ShowInfo);
        assert_eq!(press(KeyCode::Char('t')), KeyAction::ToggleTheme);
        assert_eq!(press(KeyCode::Char('k')), KeyAction::NextSkin);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(press(KeyCode::Char('q')), KeyAction::Quit);
        assert_eq!(press(KeyCode::Char('Q')), KeyAction::Quit);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(InputHandler::new().handle_key_event(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn test_unknown_key() {
        assert_eq!(press(KeyCode::Char('x')), KeyAction::None);
        assert_eq!(press(KeyCode::Tab), KeyAction::None);
    }
}
