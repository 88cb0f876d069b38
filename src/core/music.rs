use crate::domain::ports::AudioBackend;

pub const DEFAULT_MUSIC_URL: &str =
    "https://audio.jukehost.co.uk/WQF2nafozymUdCIyomH2I1R1v41NO4hk";

/// Background music state machine.
///
/// The player owns its playback flag, volume cache and current source, so
/// callers pass the player around instead of relying on global state. Every
/// backend failure is logged and swallowed: music never blocks the countdown.
pub struct MusicPlayer<A: AudioBackend> {
    backend: A,
    default_url: String,
    source: Option<String>,
    is_playing: bool,
    volume: f32,
}

impl<A: AudioBackend> MusicPlayer<A> {
    pub fn new(backend: A) -> Self {
        Self::with_default_url(backend, DEFAULT_MUSIC_URL)
    }

    pub fn with_default_url(backend: A, default_url: impl Into<String>) -> Self {
        Self {
            backend,
            default_url: default_url.into(),
            source: None,
            is_playing: false,
            volume: 0.5,
        }
    }

    pub fn backend(&self) -> &A {
        &self.backend
    }

    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    pub fn is_loaded(&self) -> bool {
        self.source.is_some()
    }

    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// 快取的音量，範圍 0.0 到 1.0
    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// 載入新曲目；`None` 或空字串使用預設音樂
    pub async fn initialize(&mut self, url: Option<&str>) {
        if self.source.is_some() {
            self.cleanup().await;
        }

        let music_url = url
            .filter(|u| !u.is_empty())
            .unwrap_or(self.default_url.as_str())
            .to_string();

        match self.backend.load(&music_url, true, self.volume).await {
            Ok(()) => {
                tracing::debug!("🎶 Music initialized from {}", music_url);
                self.source = Some(music_url);
            }
            Err(e) => tracing::error!("❌ Error initializing music: {}", e),
        }
    }

    pub async fn play(&mut self) {
        if self.source.is_none() || self.is_playing {
            return;
        }
        match self.backend.play().await {
            Ok(()) => self.is_playing = true,
            Err(e) => tracing::error!("❌ Error playing music: {}", e),
        }
    }

    pub async fn pause(&mut self) {
        if self.source.is_none() || !self.is_playing {
            return;
        }
        match self.backend.pause().await {
            Ok(()) => self.is_playing = false,
            Err(e) => tracing::error!("❌ Error pausing music: {}", e),
        }
    }

    pub async fn toggle(&mut self) {
        if self.is_playing {
            self.pause().await;
        } else {
            self.play().await;
        }
    }

    /// `volume` is a 0–100 percentage.
    pub async fn set_volume(&mut self, volume: u8) {
        self.volume = f32::from(volume.min(100)) / 100.0;
        if self.source.is_some() {
            if let Err(e) = self.backend.set_volume(self.volume).await {
                tracing::error!("❌ Error setting music volume: {}", e);
            }
        }
    }

    pub async fn mute(&mut self) {
        if self.source.is_some() {
            if let Err(e) = self.backend.set_volume(0.0).await {
                tracing::error!("❌ Error muting music: {}", e);
            }
        }
    }

    pub async fn unmute(&mut self) {
        if self.source.is_some() {
            if let Err(e) = self.backend.set_volume(self.volume).await {
                tracing::error!("❌ Error unmuting music: {}", e);
            }
        }
    }

    pub async fn cleanup(&mut self) {
        if self.source.is_none() {
            return;
        }
        match self.backend.unload().await {
            Ok(()) => {
                self.source = None;
                self.is_playing = false;
            }
            Err(e) => tracing::error!("❌ Error cleaning up music: {}", e),
        }
    }
}
