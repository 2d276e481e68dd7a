/// Headless backend
///
/// Makes no sound but keeps honest bookkeeping, so the layer behaves
/// identically on machines without audio hardware (CI, dedicated servers) and
/// in integration tests.
use std::collections::HashMap;

use crate::channel::ChannelId;
use crate::clip::Clip;
use crate::error::AudioError;
use crate::mixer::MixerGroup;

use super::AudioBackend;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SlotState {
    Stopped,
    Playing,
    Paused,
}

/// No-op backend that still answers `is_playing`
#[derive(Debug, Default)]
pub struct NullBackend {
    slots: HashMap<ChannelId, SlotState>,
    group_db: HashMap<MixerGroup, f32>,
    one_shots: u64,
}

impl NullBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Last gain set for a group, if any
    pub fn group_db(&self, group: MixerGroup) -> Option<f32> {
        self.group_db.get(&group).copied()
    }

    /// Total one-shots fired since creation
    pub fn one_shot_count(&self) -> u64 {
        self.one_shots
    }
}

impl AudioBackend for NullBackend {
    fn start(
        &mut self,
        channel: ChannelId,
        _clip: &Clip,
        _volume: f32,
        _pitch: f32,
        _looped: bool,
    ) -> Result<(), AudioError> {
        self.slots.insert(channel, SlotState::Playing);
        Ok(())
    }

    fn stop(&mut self, channel: ChannelId) {
        self.slots.insert(channel, SlotState::Stopped);
    }

    fn pause(&mut self, channel: ChannelId) {
        if self.slots.get(&channel) == Some(&SlotState::Playing) {
            self.slots.insert(channel, SlotState::Paused);
        }
    }

    fn resume(&mut self, channel: ChannelId) {
        if self.slots.get(&channel) == Some(&SlotState::Paused) {
            self.slots.insert(channel, SlotState::Playing);
        }
    }

    fn set_volume(&mut self, _channel: ChannelId, _volume: f32) {}

    fn set_pitch(&mut self, _channel: ChannelId, _pitch: f32) {}

    fn is_playing(&self, channel: ChannelId) -> bool {
        self.slots.get(&channel) == Some(&SlotState::Playing)
    }

    fn play_one_shot(
        &mut self,
        _channel: ChannelId,
        _clip: &Clip,
        _volume: f32,
        _pitch: f32,
    ) -> Result<(), AudioError> {
        self.one_shots += 1;
        Ok(())
    }

    fn set_group_db(&mut self, group: MixerGroup, decibels: f32) {
        self.group_db.insert(group, decibels);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lifecycle_bookkeeping() {
        let mut backend = NullBackend::new();
        let clip = Clip::from_bytes("theme", vec![0]);

        assert!(!backend.is_playing(ChannelId::MusicPrimary));

        backend
            .start(ChannelId::MusicPrimary, &clip, 1.0, 1.0, true)
            .unwrap();
        assert!(backend.is_playing(ChannelId::MusicPrimary));

        backend.pause(ChannelId::MusicPrimary);
        assert!(!backend.is_playing(ChannelId::MusicPrimary));

        backend.resume(ChannelId::MusicPrimary);
        assert!(backend.is_playing(ChannelId::MusicPrimary));

        backend.stop(ChannelId::MusicPrimary);
        assert!(!backend.is_playing(ChannelId::MusicPrimary));
    }

    #[test]
    fn test_resume_does_not_start_stopped_channel() {
        let mut backend = NullBackend::new();
        backend.resume(ChannelId::Sfx);
        assert!(!backend.is_playing(ChannelId::Sfx));
    }

    #[test]
    fn test_group_db_and_one_shots_recorded() {
        let mut backend = NullBackend::new();
        let clip = Clip::from_bytes("click", vec![0]);

        backend.set_group_db(MixerGroup::Music, -6.0);
        assert_eq!(backend.group_db(MixerGroup::Music), Some(-6.0));
        assert_eq!(backend.group_db(MixerGroup::Sfx), None);

        backend.play_one_shot(ChannelId::Ui, &clip, 1.0, 1.0).unwrap();
        backend.play_one_shot(ChannelId::Ui, &clip, 1.0, 1.2).unwrap();
        assert_eq!(backend.one_shot_count(), 2);
    }
}
