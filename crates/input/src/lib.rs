//! Input handling for keyboard and mouse.

use glam::Vec2;
use std::collections::HashSet;

/// Manages input state for the current frame.
#[derive(Debug, Default)]
pub struct InputState {
    /// Keys currently held down.
    keys_held: HashSet<KeyCode>,
    /// Keys pressed this frame.
    keys_pressed: HashSet<KeyCode>,
    /// Keys released this frame.
    keys_released: HashSet<KeyCode>,

    /// Mouse buttons currently held.
    mouse_held: HashSet<MouseButton>,
    /// Mouse buttons pressed this frame.
    mouse_pressed: HashSet<MouseButton>,
    /// Mouse buttons released this frame.
    mouse_released: HashSet<MouseButton>,

    /// Mouse position in window coordinates.
    mouse_position: Vec2,
    /// Mouse movement delta this frame.
    mouse_delta: Vec2,
    /// Accumulated mouse delta between frames.
    accumulated_delta: Vec2,

    /// Accumulated scroll wheel delta this frame. Positive is away from the user.
    scroll_delta: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear per-frame state. Call at the start of each frame.
    pub fn begin_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
        self.mouse_delta = self.accumulated_delta;
        self.accumulated_delta = Vec2::ZERO;
        self.scroll_delta = 0.0;
    }

    /// Process a keyboard event.
    pub fn process_keyboard(&mut self, key: KeyCode, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.keys_held.contains(&key) {
                    self.keys_pressed.insert(key);
                }
                self.keys_held.insert(key);
            }
            ElementState::Released => {
                self.keys_held.remove(&key);
                self.keys_released.insert(key);
            }
        }
    }

    /// Process a mouse button event.
    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        match state {
            ElementState::Pressed => {
                if !self.mouse_held.contains(&button) {
                    self.mouse_pressed.insert(button);
                }
                self.mouse_held.insert(button);
            }
            ElementState::Released => {
                self.mouse_held.remove(&button);
                self.mouse_released.insert(button);
            }
        }
    }

    /// Process mouse movement.
    pub fn process_mouse_motion(&mut self, delta: (f64, f64)) {
        self.accumulated_delta.x += delta.0 as f32;
        self.accumulated_delta.y += delta.1 as f32;
    }

    /// Process cursor position update.
    pub fn process_cursor_position(&mut self, position: (f64, f64)) {
        self.mouse_position = Vec2::new(position.0 as f32, position.1 as f32);
    }

    /// Process a scroll wheel step.
    pub fn process_scroll(&mut self, amount: f32) {
        self.scroll_delta += amount;
    }

    // Query methods

    /// Check if a key is currently held.
    pub fn is_key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was pressed this frame.
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key was released this frame.
    pub fn is_key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Check if a mouse button is held.
    pub fn is_mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Check if a mouse button was pressed this frame.
    pub fn is_mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if a mouse button was released this frame.
    pub fn is_mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// Get the mouse position in window coordinates.
    pub fn mouse_position(&self) -> Vec2 {
        self.mouse_position
    }

    /// Get the mouse movement delta for this frame.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// Get the scroll delta accumulated this frame.
    pub fn scroll_delta(&self) -> f32 {
        self.scroll_delta
    }

    /// Check if the orbit drag button is held (Left mouse button).
    pub fn is_orbit_held(&self) -> bool {
        self.is_mouse_held(MouseButton::Left)
    }

    /// Check if the pick button was pressed this frame (Left mouse button).
    pub fn is_pick_pressed(&self) -> bool {
        self.is_mouse_pressed(MouseButton::Left)
    }

    /// Check if deselect was pressed (Escape).
    pub fn is_deselect_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Escape)
    }

    /// Check if the view toggle was pressed (V).
    pub fn is_view_toggle_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyV)
    }

    /// Check if the music panel toggle was pressed (M).
    pub fn is_music_panel_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::KeyM)
    }

    /// Check if music play/pause was pressed (Space).
    pub fn is_play_pause_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::Space)
    }

    /// Check if the debug overlay toggle was pressed (F3).
    pub fn is_debug_toggle_pressed(&self) -> bool {
        self.is_key_pressed(KeyCode::F3)
    }
}

// Re-export for convenience
pub use winit::event::{ElementState, MouseButton};
pub use winit::keyboard::KeyCode;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressed_is_edge_triggered() {
        let mut input = InputState::new();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(input.is_key_pressed(KeyCode::Space));
        assert!(input.is_key_held(KeyCode::Space));

        // Key repeat while held must not re-trigger the edge.
        input.begin_frame();
        input.process_keyboard(KeyCode::Space, ElementState::Pressed);
        assert!(!input.is_key_pressed(KeyCode::Space));
        assert!(input.is_key_held(KeyCode::Space));

        input.process_keyboard(KeyCode::Space, ElementState::Released);
        assert!(input.is_key_released(KeyCode::Space));
        assert!(!input.is_key_held(KeyCode::Space));
    }

    #[test]
    fn mouse_delta_swaps_on_begin_frame() {
        let mut input = InputState::new();
        input.process_mouse_motion((3.0, -2.0));
        input.process_mouse_motion((1.0, 1.0));
        assert_eq!(input.mouse_delta(), Vec2::ZERO);

        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::new(4.0, -1.0));

        input.begin_frame();
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
    }

    #[test]
    fn scroll_accumulates_within_a_frame() {
        let mut input = InputState::new();
        input.process_scroll(1.0);
        input.process_scroll(-0.25);
        assert_eq!(input.scroll_delta(), 0.75);

        input.begin_frame();
        assert_eq!(input.scroll_delta(), 0.0);
    }
}
