//! Audio collaborator contract
//!
//! Gameplay only fires sounds and switches music; mixing and device handling
//! live behind [`AudioSink`].

/// Audio errors
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    /// Backend failure
    #[error("Audio backend error: {0}")]
    Backend(String),
}

/// Fire-and-forget audio surface
pub trait AudioSink {
    /// Whether a device is present; callers skip sound setup otherwise
    fn is_available(&self) -> bool;

    /// Play a one-shot sound
    fn play_sound(&mut self, name: &str) -> Result<(), AudioError>;

    /// Start a music track, replacing the current one
    fn play_music(&mut self, name: &str, looping: bool) -> Result<(), AudioError>;

    /// Stop the current music track
    fn stop_music(&mut self) -> Result<(), AudioError>;

    /// Release the device
    fn shutdown(&mut self) {}
}

/// Sink without a device
///
/// Reports itself unavailable and logs every call at debug level.
#[derive(Debug, Default)]
pub struct SilentAudio {
    music: Option<String>,
}

impl SilentAudio {
    /// Create a silent sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Track that would be playing
    pub fn current_music(&self) -> Option<&str> {
        self.music.as_deref()
    }
}

impl AudioSink for SilentAudio {
    fn is_available(&self) -> bool {
        false
    }

    fn play_sound(&mut self, name: &str) -> Result<(), AudioError> {
        log::debug!("(silent) sound {name}");
        Ok(())
    }

    fn play_music(&mut self, name: &str, looping: bool) -> Result<(), AudioError> {
        log::debug!("(silent) music {name} looping={looping}");
        self.music = Some(name.to_string());
        Ok(())
    }

    fn stop_music(&mut self) -> Result<(), AudioError> {
        if let Some(name) = self.music.take() {
            log::debug!("(silent) stop music {name}");
        }
        Ok(())
    }

    fn shutdown(&mut self) {
        self.music = None;
        log::info!("Audio shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_audio_tracks_music() {
        let mut audio = SilentAudio::new();
        assert!(!audio.is_available());
        audio.play_music("Menu", true).unwrap();
        assert_eq!(audio.current_music(), Some("Menu"));
        audio.stop_music().unwrap();
        assert_eq!(audio.current_music(), None);
    }
}
