use crate::domain::ports::AudioBackend;
use crate::utils::error::{CountdownError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use std::sync::Mutex;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioTrackState {
    pub url: Option<String>,
    pub looping: bool,
    pub volume: f32,
    pub playing: bool,
}

/// Stand-in backend that only records and logs what a real player would do.
#[derive(Debug, Default)]
pub struct LoggingAudioBackend {
    state: Mutex<AudioTrackState>,
}

impl LoggingAudioBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> AudioTrackState {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AudioTrackState> {
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn require_loaded(state: &AudioTrackState) -> Result<()> {
        if state.url.is_none() {
            return Err(CountdownError::AudioError {
                message: "no track loaded".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl AudioBackend for LoggingAudioBackend {
    async fn load(&self, url: &str, looping: bool, volume: f32) -> Result<()> {
        validate_url("music.url", url).map_err(|e| CountdownError::AudioError {
            message: e.to_string(),
        })?;

        let mut state = self.lock();
        *state = AudioTrackState {
            url: Some(url.to_string()),
            looping,
            volume,
            playing: false,
        };
        tracing::debug!("🎵 Loaded track {} (loop: {}, volume: {:.2})", url, looping, volume);
        Ok(())
    }

    async fn play(&self) -> Result<()> {
        let mut state = self.lock();
        Self::require_loaded(&state)?;
        state.playing = true;
        tracing::info!("▶️ Music playing");
        Ok(())
    }

    async fn pause(&self) -> Result<()> {
        let mut state = self.lock();
        Self::require_loaded(&state)?;
        state.playing = false;
        tracing::info!("⏸️ Music paused");
        Ok(())
    }

    async fn set_volume(&self, volume: f32) -> Result<()> {
        let mut state = self.lock();
        Self::require_loaded(&state)?;
        state.volume = volume;
        tracing::debug!("🔊 Volume set to {:.2}", volume);
        Ok(())
    }

    async fn unload(&self) -> Result<()> {
        *self.lock() = AudioTrackState::default();
        tracing::debug!("⏏️ Track unloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_non_http_url() {
        let backend = LoggingAudioBackend::new();
        let result = backend.load("file:///tmp/jingle.mp3", true, 0.5).await;
        assert!(matches!(result, Err(CountdownError::AudioError { .. })));
        assert_eq!(backend.state(), AudioTrackState::default());
    }

    #[tokio::test]
    async fn test_play_requires_loaded_track() {
        let backend = LoggingAudioBackend::new();
        assert!(backend.play().await.is_err());

        backend
            .load("https://example.com/jingle.mp3", true, 0.5)
            .await
            .unwrap();
        backend.play().await.unwrap();
        assert!(backend.state().playing);
    }
}
