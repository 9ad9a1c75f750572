//! Audio system using Kira: one-shot UI sounds plus a looping music channel.

use anyhow::Result;
use kira::{
    manager::{backend::DefaultBackend, AudioManager, AudioManagerSettings},
    sound::static_sound::{StaticSoundData, StaticSoundHandle, StaticSoundSettings},
    tween::Tween,
};
use std::collections::HashMap;
use std::path::Path;

/// Main audio system managing one-shot sounds and background music.
pub struct AudioSystem {
    manager: AudioManager,
    sounds: HashMap<String, StaticSoundData>,
    active_sounds: Vec<StaticSoundHandle>,
    music: Option<StaticSoundHandle>,
}

impl AudioSystem {
    /// Create a new audio system.
    pub fn new() -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())?;

        Ok(Self {
            manager,
            sounds: HashMap::new(),
            active_sounds: Vec::new(),
            music: None,
        })
    }

    /// Load a sound from a file.
    pub fn load_sound(&mut self, name: &str, path: &Path) -> Result<()> {
        let sound_data = StaticSoundData::from_file(path)?;
        self.sounds.insert(name.to_string(), sound_data);
        Ok(())
    }

    /// Whether a sound was loaded under this name.
    pub fn has_sound(&self, name: &str) -> bool {
        self.sounds.contains_key(name)
    }

    /// Play a loaded one-shot sound.
    pub fn play(&mut self, name: &str) -> Result<()> {
        if let Some(sound_data) = self.sounds.get(name) {
            let handle = self.manager.play(sound_data.clone())?;
            self.active_sounds.push(handle);
        }
        Ok(())
    }

    /// Play a loaded one-shot sound with volume control.
    pub fn play_with_volume(&mut self, name: &str, volume: f64) -> Result<()> {
        if let Some(sound_data) = self.sounds.get(name) {
            let settings = StaticSoundSettings::new().volume(volume);
            let modified = sound_data.clone().with_settings(settings);
            let handle = self.manager.play(modified)?;
            self.active_sounds.push(handle);
        }
        Ok(())
    }

    /// Start a music track from a file, looping, replacing any current track.
    pub fn play_music(&mut self, path: &Path, volume: f64) -> Result<()> {
        self.stop_music();
        let settings = StaticSoundSettings::new().loop_region(0.0..).volume(volume);
        let sound_data = StaticSoundData::from_file(path)?.with_settings(settings);
        let handle = self.manager.play(sound_data)?;
        self.music = Some(handle);
        Ok(())
    }

    /// Pause the music track, keeping its position.
    pub fn pause_music(&mut self) {
        if let Some(handle) = &mut self.music {
            let _ = handle.pause(Tween::default());
        }
    }

    /// Resume a paused music track.
    pub fn resume_music(&mut self) {
        if let Some(handle) = &mut self.music {
            let _ = handle.resume(Tween::default());
        }
    }

    /// Stop and drop the music track.
    pub fn stop_music(&mut self) {
        if let Some(handle) = &mut self.music {
            let _ = handle.stop(Tween::default());
        }
        self.music = None;
    }

    /// Whether a music track is loaded (paused or playing).
    pub fn has_music(&self) -> bool {
        self.music.is_some()
    }

    /// Set the music channel volume (0.0 to 1.0).
    pub fn set_music_volume(&mut self, volume: f64) {
        if let Some(handle) = &mut self.music {
            let _ = handle.set_volume(volume, Tween::default());
        }
    }

    /// Clean up finished sounds.
    pub fn cleanup(&mut self) {
        self.active_sounds
            .retain(|handle| handle.state() != kira::sound::PlaybackState::Stopped);
    }

    /// Stop all one-shot sounds.
    pub fn stop_all(&mut self) {
        for handle in &mut self.active_sounds {
            let _ = handle.stop(Tween::default());
        }
        self.active_sounds.clear();
    }
}

// Re-export for convenience
pub use kira;
