pub mod backend;
pub mod channel;
pub mod clip;
pub mod config;
pub mod crossfade;
pub mod director;
pub mod error;
pub mod instance;
pub mod library;
pub mod mixer;
pub mod settings;
/// Game-audio convenience layer
///
/// Routes music, sound effects and UI sounds through a small fixed set of
/// output channels, crossfades between music tracks, and exposes logarithmic
/// volume control per mixer group with optional persistence.
///
/// ## Architecture
///
/// ```text
/// AudioDirector
///   ├── ChannelSet            (Music A / Music B / SFX / UI shadow state)
///   ├── SoundLibrary          (name -> Clip, built once at startup)
///   ├── CrossfadeRamp         (at most one, advanced by update(dt))
///   └── Box<dyn AudioBackend> (rodio by default, Null for headless)
/// ```
///
/// ## Usage
///
/// ```rust,ignore
/// use std::time::Duration;
/// use audio_director::{
///     AudioDirector, MusicParams, MixerGroup, RodioBackend, SoundBankConfig,
/// };
///
/// let bank = SoundBankConfig::load("sounds.json")?;
/// let director = AudioDirector::new(
///     Box::new(RodioBackend::new()?),
///     bank.build_library(),
/// )
/// .with_settings_path("volume.json".into());
///
/// director.play_music_named(
///     "overworld",
///     MusicParams::default().with_crossfade(Duration::from_secs(2)),
/// );
/// director.play_sfx_named("jump");
/// director.set_volume(MixerGroup::Music, 0.5);
///
/// // each frame
/// director.update(frame_dt);
/// ```

// Re-export commonly used types
pub use backend::{AudioBackend, NullBackend, RodioBackend};
pub use channel::{ChannelId, Playback};
pub use clip::Clip;
pub use config::{SoundBankConfig, SoundEntry};
pub use director::{AudioDirector, MusicParams};
pub use error::{AppResult, AudioError, ConfigError};
pub use library::SoundLibrary;
pub use mixer::{linear_to_db, MixerGroup, DB_FLOOR};
pub use settings::VolumeSettings;
