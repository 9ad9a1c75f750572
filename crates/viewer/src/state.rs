//! Viewer state types: camera modes and animation, selection, comparison,
//! panel visibility, and the transient status line.
//!
//! Extracted from main.rs for clearer separation of state types from
//! application logic.

use glam::Vec3;
use rand::Rng;

// ── Camera ──────────────────────────────────────────────────────────────────

/// Whether the camera orbits freely near the planets or sits pulled back at
/// the framed overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Orbit,
    Overview,
}

/// An in-flight camera move with endpoints frozen at the moment it started.
/// Progress advances a fixed fraction per reference frame; any orbit or zoom
/// input cancels the move.
pub(crate) struct CameraAnimation {
    pub start_eye: Vec3,
    pub end_eye: Vec3,
    pub start_target: Vec3,
    pub end_target: Vec3,
    /// Progress 0..1.
    pub t: f32,
    /// Progress gained per reference frame.
    pub rate: f32,
    /// View mode adopted when the move completes.
    pub on_complete: Option<ViewMode>,
}

impl CameraAnimation {
    pub fn new(
        start_eye: Vec3,
        end_eye: Vec3,
        start_target: Vec3,
        end_target: Vec3,
        rate: f32,
        on_complete: Option<ViewMode>,
    ) -> Self {
        Self {
            start_eye,
            end_eye,
            start_target,
            end_target,
            t: 0.0,
            rate,
            on_complete,
        }
    }

    /// Advance by `frames` reference frames. Returns the interpolated eye and
    /// target plus whether the move has reached its end.
    pub fn step(&mut self, frames: f32) -> (Vec3, Vec3, bool) {
        self.t = (self.t + self.rate * frames).min(1.0);
        let eye = self.start_eye.lerp(self.end_eye, self.t);
        let target = self.start_target.lerp(self.end_target, self.t);
        (eye, target, self.t >= 1.0)
    }
}

// ── Selection ───────────────────────────────────────────────────────────────

pub(crate) const SELECTION_RING_COUNT: usize = 5;
pub(crate) const SELECTION_RING_SEGMENTS: usize = 100;

/// Shape of one swirl ring drawn around the selected planet. Randomized once
/// per selection so the rings hold their shape from frame to frame while
/// they follow the planet.
pub(crate) struct SelectionRing {
    pub radius: f32,
    /// Minor-axis ratio, slightly under circular.
    pub squash: f32,
    pub alpha: f32,
    /// Per-segment height jitter.
    pub jitter: Vec<f32>,
}

/// The selected planet and its swirl rings.
pub(crate) struct Selection {
    pub planet: usize,
    pub rings: Vec<SelectionRing>,
}

impl Selection {
    pub fn new(planet: usize) -> Self {
        let mut rng = rand::thread_rng();
        let rings = (0..SELECTION_RING_COUNT)
            .map(|i| SelectionRing {
                radius: 1.5 + i as f32 * 0.18,
                squash: 0.95 + rng.gen::<f32>() * 0.1,
                alpha: 0.5 + rng.gen::<f32>() * 0.3,
                jitter: (0..SELECTION_RING_SEGMENTS)
                    .map(|_| (rng.gen::<f32>() - 0.5) * 0.2)
                    .collect(),
            })
            .collect();
        Self { planet, rings }
    }
}

// ── Comparison ──────────────────────────────────────────────────────────────

/// Two-slot comparison queue. Adding a third planet drops the oldest.
pub(crate) struct CompareQueue {
    slots: Vec<usize>,
}

impl CompareQueue {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Queue a planet. Returns true when a pair is ready to show.
    pub fn push(&mut self, planet: usize) -> bool {
        if !self.slots.contains(&planet) {
            self.slots.push(planet);
        }
        if self.slots.len() > 2 {
            self.slots.remove(0);
        }
        self.slots.len() == 2
    }

    pub fn pair(&self) -> Option<(usize, usize)> {
        match self.slots.as_slice() {
            [a, b] => Some((*a, *b)),
            _ => None,
        }
    }
}

// ── Panels & messages ───────────────────────────────────────────────────────

/// Which volume slider the pointer grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SliderKind {
    MusicVolume,
    SfxVolume,
}

/// Open/closed state of the overlay panels plus pointer capture.
pub(crate) struct UiState {
    /// Planet shown in the info panel, if open. Closing the panel keeps the
    /// selection; only Escape drops both.
    pub info_panel: Option<usize>,
    pub compare_popup: Option<(usize, usize)>,
    pub music_panel_open: bool,
    /// Slider currently being dragged.
    pub active_slider: Option<SliderKind>,
    /// The press landed on a panel or button, so the drag must not orbit the
    /// camera underneath.
    pub pointer_captured: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            info_panel: None,
            compare_popup: None,
            music_panel_open: false,
            active_slider: None,
            pointer_captured: false,
        }
    }
}

/// One-line transient status message shown near the bottom of the screen.
pub(crate) struct StatusLine {
    text: String,
    time_remaining: f32,
}

impl StatusLine {
    pub fn new() -> Self {
        Self {
            text: String::new(),
            time_remaining: 0.0,
        }
    }

    pub fn show(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.time_remaining = 3.0;
    }

    pub fn update(&mut self, dt: f32) {
        if self.time_remaining > 0.0 {
            self.time_remaining -= dt;
        }
    }

    pub fn visible(&self) -> Option<&str> {
        (self.time_remaining > 0.0).then_some(self.text.as_str())
    }
}

// ── Diagnostics ─────────────────────────────────────────────────────────────

/// Diagnostics panel (F3). Numbers are resampled once per second so they are
/// readable instead of flickering.
pub(crate) struct DebugPanel {
    pub visible: bool,
    refresh_timer: f32,
    pub fps: f32,
    pub shadow_map_size: u32,
    pub shadows_enabled: bool,
    pub casting_count: usize,
    pub camera_distance: f32,
}

impl DebugPanel {
    pub fn new() -> Self {
        Self {
            visible: false,
            refresh_timer: 0.0,
            fps: 0.0,
            shadow_map_size: 0,
            shadows_enabled: false,
            casting_count: 0,
            camera_distance: 0.0,
        }
    }

    /// Returns true when the cached numbers are due for a refresh.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.refresh_timer -= dt;
        if self.refresh_timer <= 0.0 {
            self.refresh_timer = 1.0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_queue_pairs_and_rotates() {
        let mut queue = CompareQueue::new();
        assert!(!queue.push(0));
        assert_eq!(queue.pair(), None);
        assert!(queue.push(3));
        assert_eq!(queue.pair(), Some((0, 3)));

        // A third planet evicts the oldest.
        assert!(queue.push(5));
        assert_eq!(queue.pair(), Some((3, 5)));

        // Re-queuing an already queued planet keeps the pair intact.
        assert!(queue.push(5));
        assert_eq!(queue.pair(), Some((3, 5)));
    }

    #[test]
    fn camera_animation_reaches_its_end() {
        let mut anim = CameraAnimation::new(
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 4.0),
            0.03,
            Some(ViewMode::Overview),
        );

        let (eye, _, done) = anim.step(1.0);
        assert!(!done);
        assert!((eye.x - 0.3).abs() < 1e-5);

        let mut finished = false;
        for _ in 0..100 {
            let (_, _, done) = anim.step(1.0);
            if done {
                finished = true;
                break;
            }
        }
        assert!(finished);
        let (eye, target, _) = anim.step(1.0);
        assert!((eye - Vec3::new(10.0, 0.0, 0.0)).length() < 1e-5);
        assert!((target - Vec3::new(0.0, 0.0, 4.0)).length() < 1e-5);
    }

    #[test]
    fn replacing_an_animation_forgets_the_first_destination() {
        let first_end = Vec3::new(10.0, 0.0, 0.0);
        let second_end = Vec3::new(0.0, 20.0, 0.0);
        let mut slot = Some(CameraAnimation::new(
            Vec3::ZERO,
            first_end,
            Vec3::ZERO,
            Vec3::ZERO,
            0.03,
            None,
        ));
        slot.as_mut().unwrap().step(1.0);

        // Starting another fly-to mid-flight replaces the slot outright.
        slot = Some(CameraAnimation::new(
            Vec3::ZERO,
            second_end,
            Vec3::ZERO,
            Vec3::ZERO,
            0.02,
            None,
        ));

        let anim = slot.as_mut().unwrap();
        let mut eye = Vec3::ZERO;
        for _ in 0..200 {
            let (e, _, done) = anim.step(1.0);
            eye = e;
            if done {
                break;
            }
        }
        assert!((eye - second_end).length() < 1e-5);
        assert!((eye - first_end).length() > 1.0);
    }

    #[test]
    fn selection_rings_stay_in_bounds() {
        let selection = Selection::new(2);
        assert_eq!(selection.rings.len(), SELECTION_RING_COUNT);
        for (i, ring) in selection.rings.iter().enumerate() {
            assert!((ring.radius - (1.5 + i as f32 * 0.18)).abs() < 1e-6);
            assert!(ring.squash >= 0.95 && ring.squash <= 1.05);
            assert!(ring.alpha >= 0.5 && ring.alpha <= 0.8);
            assert_eq!(ring.jitter.len(), SELECTION_RING_SEGMENTS);
            for j in &ring.jitter {
                assert!(j.abs() <= 0.1 + 1e-6);
            }
        }
    }

    #[test]
    fn status_line_expires() {
        let mut status = StatusLine::new();
        assert_eq!(status.visible(), None);
        status.show("Select one more planet to compare");
        assert!(status.visible().is_some());
        status.update(2.0);
        assert!(status.visible().is_some());
        status.update(1.5);
        assert_eq!(status.visible(), None);
    }

    #[test]
    fn debug_panel_refreshes_once_per_second() {
        let mut panel = DebugPanel::new();
        assert!(panel.tick(0.016));
        assert!(!panel.tick(0.5));
        assert!(!panel.tick(0.4));
        assert!(panel.tick(0.2));
    }
}
