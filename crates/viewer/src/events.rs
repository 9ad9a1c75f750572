//! Window and device event handling for ViewerState.
//! Extracted from main.rs to keep the event loop and input handling in one place.

use winit::event::{DeviceEvent, MouseScrollDelta, WindowEvent};

impl crate::ViewerState {
    /// Handle a window event. Returns true if the app should exit.
    pub(crate) fn handle_window_event(&mut self, event: WindowEvent) -> bool {
        match event {
            WindowEvent::CloseRequested => {
                // Carry the live mixer levels into the config before writing
                // it out, so the next launch starts where this one ended.
                self.config.music_volume = self.music.music_volume();
                self.config.sfx_volume = self.music.sfx_volume();
                self.config.save();
                true
            }
            WindowEvent::Resized(size) => {
                self.renderer.resize(size);
                self.camera.set_aspect(size.width, size.height);
                false
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if let winit::keyboard::PhysicalKey::Code(key) = event.physical_key {
                    self.input.process_keyboard(key, event.state);
                }
                false
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.input.process_mouse_button(button, state);
                false
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.input.process_cursor_position((position.x, position.y));
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                match delta {
                    MouseScrollDelta::LineDelta(_, y) => self.input.process_scroll(y),
                    // Trackpads report pixels; one wheel notch is roughly 40px.
                    MouseScrollDelta::PixelDelta(pos) => {
                        self.input.process_scroll(pos.y as f32 / 40.0)
                    }
                }
                false
            }
            WindowEvent::RedrawRequested => {
                self.update();
                if let Err(e) = self.render() {
                    log::error!("Render error: {}", e);
                }
                self.renderer.window.request_redraw();
                false
            }
            _ => false,
        }
    }

    /// Handle device events (raw mouse motion feeds the orbit drag).
    pub(crate) fn handle_device_event(&mut self, event: DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.input.process_mouse_motion(delta);
        }
    }
}
