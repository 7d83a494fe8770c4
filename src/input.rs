//! Maps terminal events to game and application actions.

use crate::game::GameInput;
use crate::ui;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppInput {
    Game(GameInput),
    ToggleMute,
    Quit,
}

pub fn map_event(event: &Event) -> Option<AppInput> {
    match event {
        Event::Key(key) => map_key(key),
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            ..
        }) => Some(AppInput::Game(GameInput::Flap)),
        Event::Resize(cols, rows) => {
            let scene = ui::scene_area(Rect::new(0, 0, *cols, *rows));
            Some(AppInput::Game(GameInput::Resize {
                cols: scene.width,
                rows: scene.height,
            }))
        }
        _ => None,
    }
}

fn map_key(key: &KeyEvent) -> Option<AppInput> {
    // Terminals that report releases would otherwise flap twice per press
    if key.kind == KeyEventKind::Release {
        return None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(AppInput::Quit),
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => Some(AppInput::Game(GameInput::Flap)),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(AppInput::Game(GameInput::TogglePause)),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(AppInput::ToggleMute),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(AppInput::Quit),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 10,
            row: 5,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_space_and_click_flap() {
        assert_eq!(
            map_event(&press(KeyCode::Char(' '))),
            Some(AppInput::Game(GameInput::Flap))
        );
        assert_eq!(
            map_event(&mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(AppInput::Game(GameInput::Flap))
        );
    }

    #[test]
    fn test_other_mouse_events_ignored() {
        assert_eq!(map_event(&mouse(MouseEventKind::Down(MouseButton::Right))), None);
        assert_eq!(map_event(&mouse(MouseEventKind::Up(MouseButton::Left))), None);
        assert_eq!(map_event(&mouse(MouseEventKind::Moved)), None);
    }

    #[test]
    fn test_key_release_ignored() {
        let release = Event::Key(KeyEvent {
            code: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert_eq!(map_event(&release), None);
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_event(&press(KeyCode::Char('q'))), Some(AppInput::Quit));
        assert_eq!(map_event(&press(KeyCode::Esc)), Some(AppInput::Quit));
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(&ctrl_c), Some(AppInput::Quit));
        assert_eq!(map_event(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_pause_and_mute() {
        assert_eq!(
            map_event(&press(KeyCode::Char('p'))),
            Some(AppInput::Game(GameInput::TogglePause))
        );
        assert_eq!(map_event(&press(KeyCode::Char('m'))), Some(AppInput::ToggleMute));
    }

    #[test]
    fn test_resize_maps_to_scene_area() {
        assert_eq!(
            map_event(&Event::Resize(100, 30)),
            Some(AppInput::Game(GameInput::Resize { cols: 100, rows: 29 }))
        );
    }

    #[test]
    fn test_focus_events_ignored() {
        assert_eq!(map_event(&Event::FocusGained), None);
    }
}
