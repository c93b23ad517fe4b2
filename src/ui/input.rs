/// Keyboard source.
///
/// Each frame drains every pending terminal event without blocking. Only the
/// first key press that maps to an action is used; anything else typed
/// between two frames is dropped, so input never queues up behind the game.
///
/// Release events are ignored: some terminals report them, most don't.

use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::entity::{Action, MoveDir};

pub struct InputState {
    /// Raw key presses collected during the last drain.
    pub raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { raw_events: Vec::with_capacity(8) }
    }

    /// Drain all pending terminal events. Call once per frame.
    pub fn drain_events(&mut self) {
        self.raw_events.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            if let Ok(Event::Key(key)) = event::read() {
                if key.kind != KeyEventKind::Release {
                    self.raw_events.push(key);
                }
            }
        }
    }

    /// First mapped action this frame, if any.
    pub fn action(&self) -> Option<Action> {
        self.raw_events.iter().find_map(action_for)
    }

    /// Any key at all (briefing and debrief screens).
    pub fn any_key(&self) -> bool {
        self.raw_events.iter().any(|k| !is_ctrl_c(k))
    }

    pub fn ctrl_c_pressed(&self) -> bool {
        self.raw_events.iter().any(is_ctrl_c)
    }
}

fn is_ctrl_c(k: &KeyEvent) -> bool {
    k.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(k.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Key → action. Letters are case-insensitive.
pub fn action_for(key: &KeyEvent) -> Option<Action> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    let action = match key.code {
        KeyCode::Left => Action::Move(MoveDir::Left),
        KeyCode::Right => Action::Move(MoveDir::Right),
        KeyCode::Up => Action::Move(MoveDir::Up),
        KeyCode::Down => Action::Move(MoveDir::Down),
        KeyCode::Esc => Action::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'a' => Action::Move(MoveDir::Left),
            'd' => Action::Move(MoveDir::Right),
            'w' => Action::Move(MoveDir::Up),
            's' => Action::Move(MoveDir::Down),
            '+' | '=' => Action::SpeedUp,
            '-' | '_' => Action::SpeedDown,
            'i' => Action::ToggleAi,
            'g' => Action::ToggleMap,
            'l' => Action::ShowLog,
            'p' => Action::Pickup,
            'x' | ' ' => Action::Scan,
            'z' => Action::Warp,
            'q' => Action::Quit,
            _ => return None,
        },
        _ => return None,
    };
    Some(action)
}
