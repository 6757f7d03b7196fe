//! Keyboard state and command queue

use winit::keyboard::KeyCode;

use crate::game::FrameInput;

/// What a key does in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    MoveLeft,
    MoveRight,
    Pause,
    Restart,
    ToggleMute,
    Quit,
}

pub fn map_key(code: KeyCode) -> Option<KeyAction> {
    match code {
        KeyCode::ArrowLeft => Some(KeyAction::MoveLeft),
        KeyCode::ArrowRight => Some(KeyAction::MoveRight),
        KeyCode::KeyP => Some(KeyAction::Pause),
        KeyCode::Space => Some(KeyAction::Restart),
        KeyCode::KeyM => Some(KeyAction::ToggleMute),
        KeyCode::Escape => Some(KeyAction::Quit),
        _ => None,
    }
}

/// Held movement keys plus the key-down commands queued since the last frame
#[derive(Debug, Default)]
pub struct InputState {
    left_held: bool,
    right_held: bool,
    /// Pause presses since the last frame; pairs cancel out
    pause_presses: u32,
    restart: bool,
    quit: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a key press; auto-repeat only refreshes held state.
    ///
    /// Returns the mapped action so the caller can handle the ones that
    /// live outside the game (muting).
    pub fn process_key_down(&mut self, code: KeyCode, repeat: bool) -> Option<KeyAction> {
        let action = map_key(code)?;
        match action {
            KeyAction::MoveLeft => self.left_held = true,
            KeyAction::MoveRight => self.right_held = true,
            _ if repeat => return None,
            KeyAction::Pause => self.pause_presses += 1,
            KeyAction::Restart => self.restart = true,
            KeyAction::Quit => self.quit = true,
            KeyAction::ToggleMute => {}
        }
        Some(action)
    }

    pub fn process_key_up(&mut self, code: KeyCode) {
        match map_key(code) {
            Some(KeyAction::MoveLeft) => self.left_held = false,
            Some(KeyAction::MoveRight) => self.right_held = false,
            _ => {}
        }
    }

    /// Window close or similar
    pub fn request_quit(&mut self) {
        self.quit = true;
    }

    /// Drop held keys, e.g. when the window loses focus
    pub fn release_all(&mut self) {
        self.left_held = false;
        self.right_held = false;
    }

    /// Build this frame's input and clear the queued commands
    pub fn take_frame_input(&mut self, now_ms: u64) -> FrameInput {
        let input = FrameInput {
            quit: self.quit,
            pause: self.pause_presses % 2 == 1,
            restart: self.restart,
            left: self.left_held,
            right: self.right_held,
            now_ms,
        };
        self.pause_presses = 0;
        self.restart = false;
        input
    }
}
