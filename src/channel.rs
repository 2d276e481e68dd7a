/// Output channels
///
/// The layer owns a small fixed set of output channels: two alternating music
/// channels (so tracks can crossfade into each other), one SFX channel and one
/// UI channel. Each channel maps to a mixer group.
use std::fmt;

use crate::clip::Clip;
use crate::mixer::MixerGroup;

/// Fixed output channel slots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelId {
    /// First of the two alternating music channels
    MusicPrimary,

    /// Second of the two alternating music channels
    MusicSecondary,

    /// Sound effects (overlapping one-shots)
    Sfx,

    /// UI sounds (overlapping one-shots)
    Ui,
}

impl ChannelId {
    pub const ALL: [ChannelId; 4] = [
        ChannelId::MusicPrimary,
        ChannelId::MusicSecondary,
        ChannelId::Sfx,
        ChannelId::Ui,
    ];

    /// Mixer group this channel's output routes through
    pub fn group(&self) -> MixerGroup {
        match self {
            ChannelId::MusicPrimary | ChannelId::MusicSecondary => MixerGroup::Music,
            ChannelId::Sfx => MixerGroup::Sfx,
            ChannelId::Ui => MixerGroup::Ui,
        }
    }

    fn index(self) -> usize {
        match self {
            ChannelId::MusicPrimary => 0,
            ChannelId::MusicSecondary => 1,
            ChannelId::Sfx => 2,
            ChannelId::Ui => 3,
        }
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelId::MusicPrimary => write!(f, "Music A"),
            ChannelId::MusicSecondary => write!(f, "Music B"),
            ChannelId::Sfx => write!(f, "SFX"),
            ChannelId::Ui => write!(f, "UI"),
        }
    }
}

/// Playback state of a channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Playback {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// Registry-owned shadow of one output channel.
///
/// The backend owns the actual audio output; this is the state the director
/// tracks so it can answer queries and drive the crossfade ramp without
/// round-tripping through the backend. Mutated only by dispatch and the ramp.
#[derive(Debug, Clone, Default)]
pub struct ChannelState {
    pub clip: Option<Clip>,
    pub volume: f32,
    pub pitch: f32,
    pub looped: bool,
    pub playback: Playback,
}

impl ChannelState {
    pub fn is_playing(&self) -> bool {
        self.playback == Playback::Playing
    }

    /// Reset to the stopped state, dropping the clip reference
    pub fn clear(&mut self) {
        *self = ChannelState::default();
    }
}

/// All four channel states, indexed by [`ChannelId`]
#[derive(Debug, Clone, Default)]
pub struct ChannelSet {
    states: [ChannelState; 4],
}

impl ChannelSet {
    pub fn get(&self, id: ChannelId) -> &ChannelState {
        &self.states[id.index()]
    }

    pub fn get_mut(&mut self, id: ChannelId) -> &mut ChannelState {
        &mut self.states[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_groups() {
        assert_eq!(ChannelId::MusicPrimary.group(), MixerGroup::Music);
        assert_eq!(ChannelId::MusicSecondary.group(), MixerGroup::Music);
        assert_eq!(ChannelId::Sfx.group(), MixerGroup::Sfx);
        assert_eq!(ChannelId::Ui.group(), MixerGroup::Ui);
    }

    #[test]
    fn test_channel_display() {
        assert_eq!(ChannelId::MusicPrimary.to_string(), "Music A");
        assert_eq!(ChannelId::Ui.to_string(), "UI");
    }

    #[test]
    fn test_default_state_is_stopped() {
        let set = ChannelSet::default();
        for id in ChannelId::ALL {
            assert_eq!(set.get(id).playback, Playback::Stopped);
            assert!(set.get(id).clip.is_none());
        }
    }

    #[test]
    fn test_state_clear() {
        let mut set = ChannelSet::default();
        let state = set.get_mut(ChannelId::Sfx);
        state.clip = Some(Clip::from_bytes("x", vec![0]));
        state.volume = 0.7;
        state.playback = Playback::Playing;

        state.clear();
        assert!(set.get(ChannelId::Sfx).clip.is_none());
        assert_eq!(set.get(ChannelId::Sfx).playback, Playback::Stopped);
    }
}
