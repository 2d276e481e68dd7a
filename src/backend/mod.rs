/// Audio backend seam
///
/// Everything that actually makes noise lives behind [`AudioBackend`]: the
/// director only orchestrates. The default implementation drives rodio; the
/// [`NullBackend`] runs headless (CI, dedicated servers); tests use a
/// recording backend to assert on the exact calls dispatched.
pub mod null;
pub mod rodio;

pub use self::null::NullBackend;
pub use self::rodio::RodioBackend;

use crate::channel::ChannelId;
use crate::clip::Clip;
use crate::error::AudioError;
use crate::mixer::MixerGroup;

/// Host audio engine interface.
///
/// Per-channel operations address the four fixed output slots; one-shots are
/// fire-and-forget and overlap freely on the same channel, each carrying its
/// own volume and pitch. Mixer groups expose a dB-typed gain.
pub trait AudioBackend: Send {
    /// Assign a clip to a channel and start it, replacing whatever the
    /// channel was playing
    fn start(
        &mut self,
        channel: ChannelId,
        clip: &Clip,
        volume: f32,
        pitch: f32,
        looped: bool,
    ) -> Result<(), AudioError>;

    /// Stop a channel, including any one-shots still sounding on it
    fn stop(&mut self, channel: ChannelId);

    /// Pause a channel if it is playing
    fn pause(&mut self, channel: ChannelId);

    /// Resume a paused channel
    fn resume(&mut self, channel: ChannelId);

    fn set_volume(&mut self, channel: ChannelId, volume: f32);

    fn set_pitch(&mut self, channel: ChannelId, pitch: f32);

    fn is_playing(&self, channel: ChannelId) -> bool;

    /// Fire-and-forget playback that overlaps anything already sounding on
    /// the channel. Pitch is per shot: later shots never retune earlier ones.
    fn play_one_shot(
        &mut self,
        channel: ChannelId,
        clip: &Clip,
        volume: f32,
        pitch: f32,
    ) -> Result<(), AudioError>;

    /// Set a mixer group's gain in decibels
    fn set_group_db(&mut self, group: MixerGroup, decibels: f32);
}
