//! Overlay drawing: toolbar, info panel, compare popup, music player, diagnostics.
//!
//! Every clickable rectangle comes from [`UiLayout::compute`], the same call
//! the pointer hit test uses, so what is drawn is what is clickable.

use renderer::{OverlayTextBuilder, GLYPH_PX_H, GLYPH_PX_W};

use crate::catalog::{PlanetFacts, PLANETS, PLANET_CONFIGS};
use crate::music::TRACKS;
use crate::state::ViewMode;
use crate::ui::{Rect, UiLayout};
use crate::ViewerState;

const PANEL_BG: [f32; 4] = [0.03, 0.05, 0.1, 0.88];
const PANEL_BORDER: [f32; 4] = [0.0, 0.75, 1.0, 0.9];
const BUTTON_BG: [f32; 4] = [0.1, 0.16, 0.3, 0.95];
const ROW_CURRENT_BG: [f32; 4] = [0.0, 0.35, 0.5, 0.8];
const SLIDER_TRACK: [f32; 4] = [0.16, 0.2, 0.28, 1.0];
const ACCENT: [f32; 4] = [0.0, 0.75, 1.0, 1.0];
const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const GRAY: [f32; 4] = [0.65, 0.68, 0.75, 1.0];
const DIM_BG: [f32; 4] = [0.0, 0.0, 0.0, 0.55];
const DEBUG_GREEN: [f32; 4] = [0.3, 1.0, 0.4, 1.0];

/// Build the screen-space overlay for the current frame.
pub fn build(state: &ViewerState, sw: f32, sh: f32) -> OverlayTextBuilder {
    let mut tb = OverlayTextBuilder::new(sw, sh);
    let layout = UiLayout::compute(sw, sh, &state.ui);
    let line_h = GLYPH_PX_H + 10.0;

    // ---- Toolbar ----
    let view_label = match state.view_mode {
        ViewMode::Orbit => "Overview",
        ViewMode::Overview => "Reset view",
    };
    button(&mut tb, &layout.view_button, view_label);
    button(&mut tb, &layout.music_button, "Music");

    // ---- Info panel (left side) ----
    if let Some(info) = &layout.info_panel {
        let facts = &PLANETS[info.planet];
        let rim = PLANET_CONFIGS[info.planet].rim_color;
        let panel = &info.panel;
        tb.add_rect(panel.x, panel.y, panel.w, panel.h, PANEL_BG);
        tb.add_rect_outline(panel.x, panel.y, panel.w, panel.h, PANEL_BORDER);

        let mut y = panel.y + 14.0;
        tb.add_rect(panel.x + 14.0, y, 12.0, 12.0, [rim[0], rim[1], rim[2], 1.0]);
        tb.add_text(panel.x + 32.0, y, facts.name, 1.6, WHITE);
        y += GLYPH_PX_H * 1.6 + 14.0;

        let max_chars = ((panel.w - 28.0) / GLYPH_PX_W) as usize;
        for line in wrap(facts.description, max_chars) {
            tb.add_text(panel.x + 14.0, y, &line, 1.0, GRAY);
            y += GLYPH_PX_H + 4.0;
        }
        y += 12.0;

        for (label, value) in fact_rows(facts) {
            tb.add_text(panel.x + 14.0, y, label, 1.0, GRAY);
            tb.add_text(panel.x + 150.0, y, value, 1.0, WHITE);
            y += line_h;
        }

        button(&mut tb, &info.close_button, "Close");
        button(&mut tb, &info.compare_button, "Compare");
        button(&mut tb, &info.focus_button, "Focus");
    }

    // ---- Music player (under the toolbar) ----
    if let Some(music) = &layout.music_panel {
        let panel = &music.panel;
        tb.add_rect(panel.x, panel.y, panel.w, panel.h, PANEL_BG);
        tb.add_rect_outline(panel.x, panel.y, panel.w, panel.h, PANEL_BORDER);

        let track = state.music.current_track();
        tb.add_text(panel.x + 10.0, panel.y + 10.0, track.title, 1.2, WHITE);
        tb.add_text(panel.x + 10.0, panel.y + 28.0, track.artist, 1.0, GRAY);

        let play_label = if state.music.is_playing() { "Pause" } else { "Play" };
        button(&mut tb, &music.prev_button, "<<");
        button(&mut tb, &music.play_button, play_label);
        button(&mut tb, &music.next_button, ">>");

        tb.add_text(panel.x + 10.0, music.music_slider.y - 12.0, "Music", 1.0, GRAY);
        slider(&mut tb, &music.music_slider, state.music.music_volume());
        tb.add_text(panel.x + 10.0, music.sfx_slider.y - 12.0, "Sound effects", 1.0, GRAY);
        slider(&mut tb, &music.sfx_slider, state.music.sfx_volume());

        let current = state.music.current_index();
        for (i, row) in music.playlist_rows.iter().enumerate() {
            if i == current {
                tb.add_rect(row.x, row.y, row.w, row.h, ROW_CURRENT_BG);
            }
            let color = if i == current { WHITE } else { GRAY };
            let label = format!("{}. {}", i + 1, TRACKS[i].title);
            tb.add_text(row.x + 6.0, row.y + 5.0, &label, 1.0, color);
        }
    }

    // ---- Compare popup (centered, above the other panels) ----
    if let Some(popup) = &layout.compare_popup {
        let panel = &popup.panel;
        tb.add_rect(panel.x, panel.y, panel.w, panel.h, PANEL_BG);
        tb.add_rect_outline(panel.x, panel.y, panel.w, panel.h, PANEL_BORDER);

        let title = "Planet Comparison";
        let title_w = title.len() as f32 * GLYPH_PX_W * 1.4;
        tb.add_text(
            panel.x + (panel.w - title_w) * 0.5,
            panel.y + 14.0,
            title,
            1.4,
            WHITE,
        );

        let (left, right) = popup.pair;
        for (column, planet) in [left, right].into_iter().enumerate() {
            let x = panel.x + 20.0 + column as f32 * 200.0;
            let facts = &PLANETS[planet];
            let mut y = panel.y + 52.0;
            tb.add_text(x, y, facts.name, 1.2, ACCENT);
            y += line_h + 4.0;
            for (label, value) in fact_rows(facts) {
                tb.add_text(x, y, label, 1.0, GRAY);
                tb.add_text(x + 84.0, y, value, 1.0, WHITE);
                y += line_h;
            }
        }

        button(&mut tb, &popup.close_button, "Close");
    }

    // ---- Status line (bottom center) ----
    if let Some(text) = state.status.visible() {
        let text_w = text.len() as f32 * GLYPH_PX_W;
        tb.add_text_with_bg((sw - text_w) * 0.5, sh - 40.0, text, 1.0, WHITE, DIM_BG);
    }

    // ---- Diagnostics (F3, top right below the toolbar) ----
    if state.debug.visible {
        let scale = 1.5;
        let d = &state.debug;
        let lines = [
            format!("FPS: {:.0}", d.fps),
            format!("Shadow Map Size: {0}x{0}", d.shadow_map_size),
            format!("Shadows Enabled: {}", d.shadows_enabled),
            format!("Objects Casting Shadows: {}", d.casting_count),
            format!("Camera Distance: {:.1}", d.camera_distance),
        ];
        let mut y = 48.0;
        for line in &lines {
            let bg_w = line.len() as f32 * GLYPH_PX_W * scale + 4.0 * scale;
            let h = tb.add_text_with_bg(sw - 10.0 - bg_w, y, line, scale, DEBUG_GREEN, DIM_BG);
            y += h + 2.0;
        }
    }

    tb
}

/// Button: filled rect, outline, centered label at text scale 1.
fn button(tb: &mut OverlayTextBuilder, rect: &Rect, label: &str) {
    tb.add_rect(rect.x, rect.y, rect.w, rect.h, BUTTON_BG);
    tb.add_rect_outline(rect.x, rect.y, rect.w, rect.h, PANEL_BORDER);
    let text_w = label.len() as f32 * GLYPH_PX_W;
    tb.add_text(
        rect.x + (rect.w - text_w) * 0.5,
        rect.y + (rect.h - GLYPH_PX_H) * 0.5,
        label,
        1.0,
        WHITE,
    );
}

/// Horizontal slider with the filled portion showing the value in 0..=1.
fn slider(tb: &mut OverlayTextBuilder, rect: &Rect, value: f32) {
    let value = value.clamp(0.0, 1.0);
    tb.add_rect(rect.x, rect.y, rect.w, rect.h, SLIDER_TRACK);
    tb.add_rect(rect.x, rect.y, rect.w * value, rect.h, ACCENT);
    tb.add_rect_outline(rect.x, rect.y, rect.w, rect.h, PANEL_BORDER);
    let readout = format!("{:.0}%", value * 100.0);
    tb.add_text(rect.x + rect.w + 8.0, rect.y + 3.0, &readout, 1.0, GRAY);
}

fn fact_rows(facts: &PlanetFacts) -> [(&'static str, &'static str); 5] {
    [
        ("Diameter", facts.diameter),
        ("Moons", facts.moons),
        ("Distance", facts.sun_distance),
        ("Orbit period", facts.orbital_period),
        ("Mass", facts.mass.unwrap_or("N/A")),
    ]
}

/// Greedy word wrap by character count. The font is monospaced so character
/// count maps directly to pixels.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if !line.is_empty() && line.len() + 1 + word.len() > max_chars {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_width() {
        let lines = wrap("the quick brown fox jumps over the lazy dog", 12);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(line.len() <= 12, "line too long: {line:?}");
        }
    }

    #[test]
    fn wrap_keeps_oversized_word_whole() {
        let lines = wrap("tiny extraordinarily tiny", 8);
        assert!(lines.contains(&"extraordinarily".to_string()));
    }

    #[test]
    fn fact_rows_substitute_missing_mass() {
        let facts = &PLANETS[0];
        let rows = fact_rows(facts);
        assert_eq!(rows[4].0, "Mass");
        assert_eq!(rows[4].1, "N/A");
    }
}
