//! Background music playlist and UI sound effects.
//!
//! Playback starts paused; the user opts in from the music panel. A missing
//! audio device or missing track files degrade to a silent viewer instead of
//! an error.

use audio::AudioSystem;
use std::path::{Path, PathBuf};

/// One playlist entry. `file` is the filename under `assets/music/`.
pub struct Track {
    pub title: &'static str,
    pub artist: &'static str,
    pub file: &'static str,
}

pub static TRACKS: [Track; 4] = [
    Track {
        title: "Painting The Solar System",
        artist: "Travis Fitzsimmons",
        file: "painting-the-solar-system.ogg",
    },
    Track {
        title: "Discovery Of Planet X",
        artist: "Imphezia Soundtrack",
        file: "discovery-of-planet-x.ogg",
    },
    Track {
        title: "Aura Of The Alien Piano",
        artist: "Imphezia Soundtrack",
        file: "aura-of-the-alien-piano.ogg",
    },
    Track {
        title: "Aura Of The Alien",
        artist: "Imphezia Soundtrack",
        file: "aura-of-the-alien.ogg",
    },
];

fn track_path(index: usize) -> PathBuf {
    Path::new("assets/music").join(TRACKS[index].file)
}

/// Playlist state plus the audio backend. `audio` is `None` when no output
/// device could be opened.
pub struct MusicPlayer {
    audio: Option<AudioSystem>,
    current: usize,
    playing: bool,
    music_volume: f32,
    sfx_volume: f32,
}

impl MusicPlayer {
    pub fn new(music_volume: f32, sfx_volume: f32) -> Self {
        let audio = match AudioSystem::new() {
            Ok(mut audio) => {
                let click = Path::new("assets/sounds/click.ogg");
                if let Err(e) = audio.load_sound("click", click) {
                    log::warn!("Could not load {:?}: {}", click, e);
                }
                Some(audio)
            }
            Err(e) => {
                log::warn!("Audio unavailable ({}), running silent", e);
                None
            }
        };

        Self {
            audio,
            current: 0,
            playing: false,
            music_volume: music_volume.clamp(0.0, 1.0),
            sfx_volume: sfx_volume.clamp(0.0, 1.0),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_track(&self) -> &'static Track {
        &TRACKS[self.current]
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn music_volume(&self) -> f32 {
        self.music_volume
    }

    pub fn sfx_volume(&self) -> f32 {
        self.sfx_volume
    }

    /// Play/pause button. Resumes the paused track if there is one, otherwise
    /// starts the current playlist entry from the top.
    pub fn toggle_playback(&mut self) {
        if self.playing {
            if let Some(audio) = &mut self.audio {
                audio.pause_music();
            }
            self.playing = false;
        } else {
            self.playing = self.start_or_resume();
        }
    }

    /// Jump to a playlist row and start playing it.
    pub fn select_track(&mut self, index: usize) {
        if index >= TRACKS.len() {
            return;
        }
        self.current = index;
        self.playing = self.start_track();
    }

    pub fn next_track(&mut self) {
        self.change_track(1);
    }

    pub fn prev_track(&mut self) {
        self.change_track(-1);
    }

    /// Step through the playlist with wraparound, keeping the playing/paused
    /// state. While paused only the displayed track changes.
    fn change_track(&mut self, step: isize) {
        let len = TRACKS.len() as isize;
        self.current = (self.current as isize + step).rem_euclid(len) as usize;
        if self.playing {
            self.playing = self.start_track();
        } else if let Some(audio) = &mut self.audio {
            // Drop the old track so a later resume starts the new one.
            audio.stop_music();
        }
    }

    pub fn set_music_volume(&mut self, volume: f32) {
        self.music_volume = volume.clamp(0.0, 1.0);
        if let Some(audio) = &mut self.audio {
            audio.set_music_volume(self.music_volume as f64);
        }
    }

    pub fn set_sfx_volume(&mut self, volume: f32) {
        self.sfx_volume = volume.clamp(0.0, 1.0);
    }

    /// One-shot click sound, played when a planet is selected.
    pub fn play_click(&mut self) {
        if let Some(audio) = &mut self.audio {
            if let Err(e) = audio.play_with_volume("click", self.sfx_volume as f64) {
                log::warn!("Click sound failed: {}", e);
            }
        }
    }

    /// Per-frame housekeeping for finished one-shot sounds.
    pub fn update(&mut self) {
        if let Some(audio) = &mut self.audio {
            audio.cleanup();
        }
    }

    fn start_or_resume(&mut self) -> bool {
        match &mut self.audio {
            Some(audio) if audio.has_music() => {
                audio.resume_music();
                true
            }
            Some(_) => self.start_track(),
            None => false,
        }
    }

    fn start_track(&mut self) -> bool {
        let Some(audio) = &mut self.audio else {
            return false;
        };
        let path = track_path(self.current);
        match audio.play_music(&path, self.music_volume as f64) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Could not play {:?}: {}", path, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn silent_player() -> MusicPlayer {
        MusicPlayer {
            audio: None,
            current: 0,
            playing: false,
            music_volume: 0.5,
            sfx_volume: 1.0,
        }
    }

    #[test]
    fn next_and_prev_wrap_around() {
        let mut player = silent_player();
        player.prev_track();
        assert_eq!(player.current_index(), TRACKS.len() - 1);
        player.next_track();
        assert_eq!(player.current_index(), 0);
        for _ in 0..TRACKS.len() {
            player.next_track();
        }
        assert_eq!(player.current_index(), 0);
    }

    #[test]
    fn skipping_while_paused_stays_paused() {
        let mut player = silent_player();
        assert!(!player.is_playing());
        player.next_track();
        assert!(!player.is_playing());
        assert_eq!(player.current_index(), 1);
    }

    #[test]
    fn volumes_are_clamped() {
        let mut player = silent_player();
        player.set_music_volume(1.7);
        assert!((player.music_volume() - 1.0).abs() < 1e-6);
        player.set_sfx_volume(-0.3);
        assert!(player.sfx_volume().abs() < 1e-6);
    }

    #[test]
    fn playlist_rows_are_displayable() {
        for track in &TRACKS {
            assert!(!track.title.is_empty());
            assert!(!track.artist.is_empty());
            assert!(track.file.ends_with(".ogg"));
        }
    }
}
