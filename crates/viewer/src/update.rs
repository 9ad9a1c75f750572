//! Per-frame viewer logic: scene motion, pointer dispatch, and the camera.
//!
//! Extracted from main.rs to keep the frame loop modular.

use engine_core::Vec3;
use input::MouseButton;
use renderer::OrbitCamera;

use crate::catalog::PLANET_CONFIGS;
use crate::scene::{
    BeltRock, Comet, Halo, Orbit, PickTarget, Planet, Spin, COMET_RESET_RADIUS, HALO_SPIN_SPEED,
};
use crate::state::{CameraAnimation, Selection, SliderKind, ViewMode};
use crate::ui::{self, UiAction, UiLayout};
use crate::ViewerState;

/// Frame rate the catalog's per-frame angular speeds are expressed in.
const REFERENCE_FPS: f32 = 60.0;
/// Scale applied to the selected planet and its pick proxy.
pub(crate) const SELECTION_SCALE: f32 = 1.35;
/// Fly-to progress per reference frame when focusing a planet.
const FOCUS_RATE: f32 = 0.03;
/// Fly-to progress per reference frame for the view toggle.
const VIEW_TOGGLE_RATE: f32 = 0.02;
/// Radians per dragged pixel before the sensitivity multiplier.
const ORBIT_FACTOR: f32 = 0.005;
/// Pulled-back vantage framing the whole system.
const OVERVIEW_EYE: Vec3 = Vec3::new(60.0, 60.0, 80.0);
/// Pick rays reach past the far side of Neptune's orbit from any vantage.
const PICK_RANGE: f32 = 200.0;

/// Run one frame of viewer update. Called from `ViewerState::update()`.
pub fn frame(state: &mut ViewerState, dt: f32) {
    // The catalog expresses motion per frame at 60 fps; rescale by the real
    // frame time so speed doesn't depend on the refresh rate.
    let frames = dt * REFERENCE_FPS;

    state.status.update(dt);
    state.music.update();

    advance_world(state, frames);
    sync_pick_proxies(state);

    handle_keys(state);
    handle_pointer(state);
    drive_camera(state, frames);
    refresh_debug(state, dt);
}

// ── Scene motion ────────────────────────────────────────────────────────────

fn advance_world(state: &mut ViewerState, frames: f32) {
    // Orbits all run clockwise; spin direction varies per planet.
    for (_, orbit) in state.world.query_mut::<&mut Orbit>() {
        orbit.angle -= orbit.speed * frames;
    }
    for (_, spin) in state.world.query_mut::<&mut Spin>() {
        spin.angle += spin.direction.sign() * spin.speed * frames;
    }
    for (_, halo) in state.world.query_mut::<&mut Halo>() {
        halo.angle += HALO_SPIN_SPEED * frames;
    }
    for (_, rock) in state.world.query_mut::<&mut BeltRock>() {
        rock.angle += rock.speed * frames;
    }

    let mut rng = rand::thread_rng();
    for (_, comet) in state.world.query_mut::<&mut Comet>() {
        comet.t += comet.speed * 0.01 * frames;
        if comet.position().length() > COMET_RESET_RADIUS {
            *comet = Comet::random(&mut rng);
        }
    }
}

/// Keep the pick proxies riding their planets, enlarged like the drawn mesh
/// while selected.
fn sync_pick_proxies(state: &mut ViewerState) {
    let selected = state.selection.as_ref().map(|s| s.planet);
    for (_, (planet, orbit, target)) in
        state.world.query::<(&Planet, &Orbit, &PickTarget)>().iter()
    {
        let scale = if selected == Some(planet.index) {
            SELECTION_SCALE
        } else {
            1.0
        };
        let radius = PLANET_CONFIGS[planet.index].size * scale;
        state.pick_scene.sync(target.collider, orbit.position(), radius);
    }
    state.pick_scene.refresh();
}

// ── Input ───────────────────────────────────────────────────────────────────

fn handle_keys(state: &mut ViewerState) {
    if state.input.is_deselect_pressed() {
        // Escape peels the UI back to front before it drops the selection.
        if state.ui.compare_popup.is_some() {
            state.ui.compare_popup = None;
        } else if state.ui.music_panel_open {
            state.ui.music_panel_open = false;
        } else {
            state.ui.info_panel = None;
            state.selection = None;
        }
    }
    if state.input.is_view_toggle_pressed() {
        start_view_toggle(state);
    }
    if state.input.is_music_panel_pressed() {
        state.ui.music_panel_open = !state.ui.music_panel_open;
    }
    if state.input.is_play_pause_pressed() {
        state.music.toggle_playback();
    }
    if state.input.is_debug_toggle_pressed() {
        state.debug.visible = !state.debug.visible;
    }
}

fn handle_pointer(state: &mut ViewerState) {
    let (sw, sh) = state.renderer.dimensions();
    let (sw, sh) = (sw as f32, sh as f32);
    let layout = UiLayout::compute(sw, sh, &state.ui);
    let pointer = state.input.mouse_position();

    if state.input.is_pick_pressed() {
        // A press anywhere outside the music panel or its toolbar button
        // closes the panel; the press still lands where it was aimed.
        if state.ui.music_panel_open && !layout.inside_music_ui(pointer.x, pointer.y) {
            state.ui.music_panel_open = false;
        }

        if let Some(action) = layout.hit_test(pointer.x, pointer.y) {
            state.ui.pointer_captured = true;
            apply_action(state, action);
        } else if layout.over_ui(pointer.x, pointer.y) {
            // Panel body: swallow the press so the drag below doesn't orbit.
            state.ui.pointer_captured = true;
        } else {
            pick_planet(state, pointer.x, pointer.y, sw, sh);
        }
    }

    // A grabbed slider tracks the pointer for as long as the button is down,
    // even once the pointer leaves the track.
    if let (Some(kind), Some(music)) = (state.ui.active_slider, &layout.music_panel) {
        if state.input.is_orbit_held() {
            match kind {
                SliderKind::MusicVolume => {
                    let value = ui::slider_value(&music.music_slider, pointer.x);
                    state.music.set_music_volume(value);
                }
                SliderKind::SfxVolume => {
                    let value = ui::slider_value(&music.sfx_slider, pointer.x);
                    state.music.set_sfx_volume(value);
                }
            }
        }
    }

    if state.input.is_mouse_released(MouseButton::Left) {
        state.ui.active_slider = None;
        state.ui.pointer_captured = false;
    }

    // Hover highlight, suppressed while the pointer is on UI or mid-drag.
    if layout.over_ui(pointer.x, pointer.y) || state.ui.pointer_captured {
        state.hovered = None;
    } else {
        let (origin, direction) = state.camera.screen_ray(pointer.x, pointer.y, sw, sh);
        state.hovered = state
            .pick_scene
            .pick(origin, direction, PICK_RANGE)
            .and_then(|hit| planet_for_collider(state, hit.body));
    }
}

fn apply_action(state: &mut ViewerState, action: UiAction) {
    match action {
        UiAction::ToggleView => start_view_toggle(state),
        UiAction::ToggleMusicPanel => state.ui.music_panel_open = !state.ui.music_panel_open,
        // Closing the sheet keeps the selection; only Escape clears both.
        UiAction::CloseInfo => state.ui.info_panel = None,
        UiAction::Compare(planet) => {
            if state.compare.push(planet) {
                state.ui.compare_popup = state.compare.pair();
            } else {
                state.status.show("Select one more planet to compare");
            }
        }
        UiAction::Focus(planet) => start_focus(state, planet),
        UiAction::CloseCompare => state.ui.compare_popup = None,
        UiAction::PlayPause => state.music.toggle_playback(),
        UiAction::PrevTrack => state.music.prev_track(),
        UiAction::NextTrack => state.music.next_track(),
        UiAction::SelectTrack(index) => state.music.select_track(index),
        UiAction::DragSlider(kind) => state.ui.active_slider = Some(kind),
    }
}

/// Cast the press into the scene. A hit selects the planet and opens its info
/// sheet; empty sky clears the selection but leaves the sheet alone.
fn pick_planet(state: &mut ViewerState, x: f32, y: f32, sw: f32, sh: f32) {
    state.selection = None;

    let (origin, direction) = state.camera.screen_ray(x, y, sw, sh);
    let Some(hit) = state.pick_scene.pick(origin, direction, PICK_RANGE) else {
        return;
    };
    let Some(planet) = planet_for_collider(state, hit.body) else {
        log::warn!("pick hit unknown collider {}", hit.body);
        return;
    };

    state.music.play_click();
    state.selection = Some(Selection::new(planet));
    state.ui.info_panel = Some(planet);
}

fn planet_for_collider(state: &ViewerState, collider: u32) -> Option<usize> {
    state.entities.colliders.iter().position(|&c| c == collider)
}

// ── Camera ──────────────────────────────────────────────────────────────────

fn drive_camera(state: &mut ViewerState, frames: f32) {
    let dragging = state.input.is_orbit_held()
        && !state.ui.pointer_captured
        && state.ui.active_slider.is_none();
    if dragging {
        let delta = state.input.mouse_delta();
        if delta.length_squared() > 0.0 {
            // Manual input wins over any fly-to still in flight.
            state.camera_animation = None;
            state
                .camera
                .orbit(delta.x, delta.y, ORBIT_FACTOR * state.config.sensitivity);
        }
    }

    let scroll = state.input.scroll_delta();
    if scroll != 0.0 {
        state.camera_animation = None;
        state.camera.zoom(scroll);
    }

    if let Some(animation) = &mut state.camera_animation {
        let (eye, target, done) = animation.step(frames);
        state.camera.eye = eye;
        state.camera.target = target;
        if done {
            // The view label flips only once the move lands.
            if let Some(mode) = animation.on_complete {
                state.view_mode = mode;
            }
            state.camera_animation = None;
        }
    }
}

fn start_view_toggle(state: &mut ViewerState) {
    let (end_eye, next_mode) = match state.view_mode {
        ViewMode::Orbit => (OVERVIEW_EYE, ViewMode::Overview),
        ViewMode::Overview => (OrbitCamera::home_eye(), ViewMode::Orbit),
    };
    state.camera_animation = Some(CameraAnimation::new(
        state.camera.eye,
        end_eye,
        state.camera.target,
        Vec3::ZERO,
        VIEW_TOGGLE_RATE,
        Some(next_mode),
    ));
}

/// Dive the camera down to just above the planet's surface, endpoints frozen
/// at launch. Subsequent orbiting revolves around the planet's position.
fn start_focus(state: &mut ViewerState, planet: usize) {
    let Some(position) = planet_position(state, planet) else {
        return;
    };
    let scale = if state.selection.as_ref().map(|s| s.planet) == Some(planet) {
        SELECTION_SCALE
    } else {
        1.0
    };
    let distance = PLANET_CONFIGS[planet].size * scale * 0.05;
    let direction = Vec3::new(-0.5, -1.0, -0.5).normalize();

    state.camera_animation = Some(CameraAnimation::new(
        state.camera.eye,
        position + direction * distance,
        state.camera.target,
        position,
        FOCUS_RATE,
        None,
    ));
    // Close the sheet so the dive is unobstructed.
    state.ui.info_panel = None;
}

fn planet_position(state: &ViewerState, planet: usize) -> Option<Vec3> {
    let entity = *state.entities.planets.get(planet)?;
    let orbit = state.world.get::<&Orbit>(entity).ok()?;
    Some(orbit.position())
}

// ── Diagnostics ─────────────────────────────────────────────────────────────

fn refresh_debug(state: &mut ViewerState, dt: f32) {
    if state.debug.tick(dt) {
        state.debug.fps = state.time.fps();
        state.debug.shadow_map_size = state.renderer.shadow_map_size();
        state.debug.shadows_enabled = state.config.shadows;
        state.debug.casting_count = state.shadow_casting_count;
        state.debug.camera_distance = state.camera.eye.length();
    }
}
