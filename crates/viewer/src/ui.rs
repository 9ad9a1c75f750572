//! Screen-space layout shared by overlay drawing and pointer hit testing.
//!
//! Every clickable element gets its rectangle from [`UiLayout::compute`], so
//! the pixels the overlay draws and the pixels the hit test accepts are the
//! same by construction.

use crate::music::TRACKS;
use crate::state::{SliderKind, UiState};

#[derive(Debug, Clone, Copy)]
pub(crate) struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.w && py >= self.y && py < self.y + self.h
    }
}

/// What a pointer press on the UI asks the viewer to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UiAction {
    ToggleView,
    ToggleMusicPanel,
    CloseInfo,
    Compare(usize),
    Focus(usize),
    CloseCompare,
    PlayPause,
    PrevTrack,
    NextTrack,
    SelectTrack(usize),
    DragSlider(SliderKind),
}

pub(crate) struct InfoPanelLayout {
    pub panel: Rect,
    pub close_button: Rect,
    pub compare_button: Rect,
    pub focus_button: Rect,
    pub planet: usize,
}

pub(crate) struct ComparePopupLayout {
    pub panel: Rect,
    pub close_button: Rect,
    pub pair: (usize, usize),
}

pub(crate) struct MusicPanelLayout {
    pub panel: Rect,
    pub prev_button: Rect,
    pub play_button: Rect,
    pub next_button: Rect,
    pub music_slider: Rect,
    pub sfx_slider: Rect,
    pub playlist_rows: Vec<Rect>,
}

/// Rectangles for everything currently on screen.
pub(crate) struct UiLayout {
    pub view_button: Rect,
    pub music_button: Rect,
    pub info_panel: Option<InfoPanelLayout>,
    pub compare_popup: Option<ComparePopupLayout>,
    pub music_panel: Option<MusicPanelLayout>,
}

impl UiLayout {
    pub fn compute(sw: f32, sh: f32, ui: &UiState) -> Self {
        let view_button = Rect::new(sw - 260.0, 10.0, 120.0, 28.0);
        let music_button = Rect::new(sw - 130.0, 10.0, 120.0, 28.0);

        let info_panel = ui.info_panel.map(|planet| {
            let panel = Rect::new(20.0, 80.0, 340.0, 340.0);
            let button_y = panel.y + panel.h - 34.0;
            InfoPanelLayout {
                panel,
                close_button: Rect::new(panel.x + 10.0, button_y, 96.0, 24.0),
                compare_button: Rect::new(panel.x + 112.0, button_y, 96.0, 24.0),
                focus_button: Rect::new(panel.x + 214.0, button_y, 96.0, 24.0),
                planet,
            }
        });

        let compare_popup = ui.compare_popup.map(|pair| {
            let panel = Rect::new((sw - 440.0) * 0.5, (sh - 280.0) * 0.5, 440.0, 280.0);
            ComparePopupLayout {
                panel,
                close_button: Rect::new(
                    panel.x + (panel.w - 100.0) * 0.5,
                    panel.y + panel.h - 34.0,
                    100.0,
                    24.0,
                ),
                pair,
            }
        });

        let music_panel = ui.music_panel_open.then(|| {
            let panel = Rect::new(sw - 310.0, 48.0, 300.0, 244.0);
            let playlist_rows = (0..TRACKS.len())
                .map(|i| Rect::new(panel.x + 10.0, panel.y + 166.0 + i as f32 * 18.0, 280.0, 18.0))
                .collect();
            MusicPanelLayout {
                panel,
                prev_button: Rect::new(panel.x + 10.0, panel.y + 54.0, 50.0, 24.0),
                play_button: Rect::new(panel.x + 70.0, panel.y + 54.0, 80.0, 24.0),
                next_button: Rect::new(panel.x + 160.0, panel.y + 54.0, 50.0, 24.0),
                music_slider: Rect::new(panel.x + 10.0, panel.y + 104.0, 180.0, 14.0),
                sfx_slider: Rect::new(panel.x + 10.0, panel.y + 142.0, 180.0, 14.0),
                playlist_rows,
            }
        });

        Self {
            view_button,
            music_button,
            info_panel,
            compare_popup,
            music_panel,
        }
    }

    /// Topmost action under the pointer. Panels are tested front to back;
    /// a press on a panel body returns None but still counts as [`over_ui`].
    ///
    /// [`over_ui`]: UiLayout::over_ui
    pub fn hit_test(&self, x: f32, y: f32) -> Option<UiAction> {
        if let Some(popup) = &self.compare_popup {
            if popup.close_button.contains(x, y) {
                return Some(UiAction::CloseCompare);
            }
            if popup.panel.contains(x, y) {
                return None;
            }
        }

        if let Some(music) = &self.music_panel {
            if music.prev_button.contains(x, y) {
                return Some(UiAction::PrevTrack);
            }
            if music.play_button.contains(x, y) {
                return Some(UiAction::PlayPause);
            }
            if music.next_button.contains(x, y) {
                return Some(UiAction::NextTrack);
            }
            if music.music_slider.contains(x, y) {
                return Some(UiAction::DragSlider(SliderKind::MusicVolume));
            }
            if music.sfx_slider.contains(x, y) {
                return Some(UiAction::DragSlider(SliderKind::SfxVolume));
            }
            for (i, row) in music.playlist_rows.iter().enumerate() {
                if row.contains(x, y) {
                    return Some(UiAction::SelectTrack(i));
                }
            }
            if music.panel.contains(x, y) {
                return None;
            }
        }

        if let Some(info) = &self.info_panel {
            if info.close_button.contains(x, y) {
                return Some(UiAction::CloseInfo);
            }
            if info.compare_button.contains(x, y) {
                return Some(UiAction::Compare(info.planet));
            }
            if info.focus_button.contains(x, y) {
                return Some(UiAction::Focus(info.planet));
            }
            if info.panel.contains(x, y) {
                return None;
            }
        }

        if self.view_button.contains(x, y) {
            return Some(UiAction::ToggleView);
        }
        if self.music_button.contains(x, y) {
            return Some(UiAction::ToggleMusicPanel);
        }
        None
    }

    /// Whether the pointer rests on any UI surface. Used to keep presses on
    /// panels from orbiting the camera and to suppress planet hover.
    pub fn over_ui(&self, x: f32, y: f32) -> bool {
        if self.view_button.contains(x, y) || self.music_button.contains(x, y) {
            return true;
        }
        if let Some(info) = &self.info_panel {
            if info.panel.contains(x, y) {
                return true;
            }
        }
        if let Some(popup) = &self.compare_popup {
            if popup.panel.contains(x, y) {
                return true;
            }
        }
        if let Some(music) = &self.music_panel {
            if music.panel.contains(x, y) {
                return true;
            }
        }
        false
    }

    /// Whether the pointer rests on the music panel or the button that
    /// toggles it. A press anywhere else closes the panel.
    pub fn inside_music_ui(&self, x: f32, y: f32) -> bool {
        if self.music_button.contains(x, y) {
            return true;
        }
        match &self.music_panel {
            Some(music) => music.panel.contains(x, y),
            None => false,
        }
    }
}

/// Map a pointer x on a slider track to a 0..1 value.
pub(crate) fn slider_value(track: &Rect, x: f32) -> f32 {
    ((x - track.x) / track.w).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn everything_open() -> UiState {
        let mut ui = UiState::new();
        ui.info_panel = Some(2);
        ui.compare_popup = Some((1, 4));
        ui.music_panel_open = true;
        ui
    }

    fn center(rect: &Rect) -> (f32, f32) {
        (rect.x + rect.w * 0.5, rect.y + rect.h * 0.5)
    }

    #[test]
    fn buttons_resolve_to_their_actions() {
        let layout = UiLayout::compute(1280.0, 720.0, &everything_open());

        let (x, y) = center(&layout.view_button);
        assert_eq!(layout.hit_test(x, y), Some(UiAction::ToggleView));

        let info = layout.info_panel.as_ref().unwrap();
        let (x, y) = center(&info.compare_button);
        assert_eq!(layout.hit_test(x, y), Some(UiAction::Compare(2)));
        let (x, y) = center(&info.focus_button);
        assert_eq!(layout.hit_test(x, y), Some(UiAction::Focus(2)));

        let music = layout.music_panel.as_ref().unwrap();
        let (x, y) = center(&music.playlist_rows[3]);
        assert_eq!(layout.hit_test(x, y), Some(UiAction::SelectTrack(3)));
        let (x, y) = center(&music.music_slider);
        assert_eq!(
            layout.hit_test(x, y),
            Some(UiAction::DragSlider(SliderKind::MusicVolume))
        );
    }

    #[test]
    fn panel_bodies_capture_without_action() {
        let layout = UiLayout::compute(1280.0, 720.0, &everything_open());
        let info = layout.info_panel.as_ref().unwrap();
        // A point inside the panel but above the button row.
        let x = info.panel.x + 5.0;
        let y = info.panel.y + 5.0;
        assert_eq!(layout.hit_test(x, y), None);
        assert!(layout.over_ui(x, y));
    }

    #[test]
    fn empty_space_is_not_ui() {
        let layout = UiLayout::compute(1280.0, 720.0, &everything_open());
        assert_eq!(layout.hit_test(640.0, 700.0), None);
        assert!(!layout.over_ui(640.0, 700.0));
    }

    #[test]
    fn closed_panels_have_no_rects() {
        let layout = UiLayout::compute(1280.0, 720.0, &UiState::new());
        assert!(layout.info_panel.is_none());
        assert!(layout.compare_popup.is_none());
        assert!(layout.music_panel.is_none());
        assert!(!layout.inside_music_ui(1280.0 - 160.0, 150.0));
    }

    #[test]
    fn music_rows_stack_without_overlap() {
        let layout = UiLayout::compute(1280.0, 720.0, &everything_open());
        let music = layout.music_panel.unwrap();
        for pair in music.playlist_rows.windows(2) {
            assert!(pair[0].y + pair[0].h <= pair[1].y + 1e-6);
        }
        let last = music.playlist_rows.last().unwrap();
        assert!(last.y + last.h <= music.panel.y + music.panel.h);
    }

    #[test]
    fn slider_maps_and_clamps() {
        let track = Rect::new(100.0, 50.0, 180.0, 14.0);
        assert!((slider_value(&track, 100.0) - 0.0).abs() < 1e-6);
        assert!((slider_value(&track, 190.0) - 0.5).abs() < 1e-6);
        assert!((slider_value(&track, 280.0) - 1.0).abs() < 1e-6);
        assert!((slider_value(&track, 0.0) - 0.0).abs() < 1e-6);
        assert!((slider_value(&track, 500.0) - 1.0).abs() < 1e-6);
    }
}
