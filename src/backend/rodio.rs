/// rodio-backed audio output
///
/// One persistent sink per channel plus short-lived sinks for one-shots.
/// rodio has no mixer-group concept, so group gains are emulated here: the
/// dB value from the mixer surface is converted back to linear and folded
/// into every sink volume as `master x group x channel`.
use std::collections::HashMap;
use std::io::Cursor;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};

use crate::channel::ChannelId;
use crate::clip::Clip;
use crate::error::AudioError;
use crate::mixer::{db_to_linear, MixerGroup};

use super::AudioBackend;

struct ChannelSlot {
    sink: Sink,
    volume: f32,
}

struct ShotSlot {
    sink: Sink,
    volume: f32,
}

/// Default backend, playing through the system's output device
pub struct RodioBackend {
    handle: OutputStreamHandle,
    channels: HashMap<ChannelId, ChannelSlot>,
    one_shots: HashMap<ChannelId, Vec<ShotSlot>>,
    group_gain: HashMap<MixerGroup, f32>,
}

fn effective_gain(master: f32, group: f32, channel_volume: f32) -> f32 {
    master * group * channel_volume
}

impl RodioBackend {
    /// Open the default output device and prepare one sink per channel
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::StreamInitFailed(Box::new(e)))?;

        // The stream must outlive every sink for the whole process; the layer
        // is constructed once per process, so leak it instead of carrying a
        // !Send handle around.
        std::mem::forget(stream);

        let mut channels = HashMap::new();
        for id in ChannelId::ALL {
            let sink =
                Sink::try_new(&handle).map_err(|e| AudioError::StreamInitFailed(Box::new(e)))?;
            channels.insert(id, ChannelSlot { sink, volume: 1.0 });
        }

        tracing::info!("Audio output stream ready ({} channels)", ChannelId::ALL.len());

        Ok(Self {
            handle,
            channels,
            one_shots: HashMap::new(),
            group_gain: HashMap::new(),
        })
    }

    fn gain(&self, group: MixerGroup) -> f32 {
        self.group_gain.get(&group).copied().unwrap_or(1.0)
    }

    fn sink_volume(&self, channel: ChannelId, channel_volume: f32) -> f32 {
        effective_gain(
            self.gain(MixerGroup::Master),
            self.gain(channel.group()),
            channel_volume,
        )
    }

    fn decoder(clip: &Clip) -> Result<Decoder<Cursor<Vec<u8>>>, AudioError> {
        // rodio's Decoder requires owned data with 'static lifetime
        let cursor = Cursor::new((*clip.data()).clone());
        Decoder::new(cursor).map_err(|e| AudioError::DecodeFailed(Box::new(e)))
    }

    fn refresh_volumes(&mut self) {
        let updates: Vec<(ChannelId, f32)> = self
            .channels
            .iter()
            .map(|(id, slot)| (*id, self.sink_volume(*id, slot.volume)))
            .collect();
        for (id, volume) in updates {
            if let Some(slot) = self.channels.get(&id) {
                slot.sink.set_volume(volume);
            }
        }

        let shot_updates: Vec<(ChannelId, Vec<f32>)> = self
            .one_shots
            .iter()
            .map(|(id, shots)| {
                (
                    *id,
                    shots.iter().map(|s| self.sink_volume(*id, s.volume)).collect(),
                )
            })
            .collect();
        for (id, volumes) in shot_updates {
            if let Some(shots) = self.one_shots.get(&id) {
                for (shot, volume) in shots.iter().zip(volumes) {
                    shot.sink.set_volume(volume);
                }
            }
        }
    }

    fn prune_finished_shots(&mut self, channel: ChannelId) {
        if let Some(shots) = self.one_shots.get_mut(&channel) {
            shots.retain(|shot| !shot.sink.empty());
        }
    }
}

impl AudioBackend for RodioBackend {
    fn start(
        &mut self,
        channel: ChannelId,
        clip: &Clip,
        volume: f32,
        pitch: f32,
        looped: bool,
    ) -> Result<(), AudioError> {
        let decoder = Self::decoder(clip)?;
        let effective = self.sink_volume(channel, volume);

        // A stopped sink cannot be restarted, so replace it
        let sink =
            Sink::try_new(&self.handle).map_err(|e| AudioError::PlaybackFailed(Box::new(e)))?;
        sink.set_speed(pitch);
        sink.set_volume(effective);

        if looped {
            sink.append(decoder.repeat_infinite());
        } else {
            sink.append(decoder);
        }

        if let Some(old) = self.channels.insert(channel, ChannelSlot { sink, volume }) {
            old.sink.stop();
        }

        tracing::debug!("Started '{}' on channel {}", clip.name(), channel);
        Ok(())
    }

    fn stop(&mut self, channel: ChannelId) {
        if let Some(slot) = self.channels.get(&channel) {
            slot.sink.stop();
        }
        if let Some(shots) = self.one_shots.get_mut(&channel) {
            for shot in shots.drain(..) {
                shot.sink.stop();
            }
        }
    }

    fn pause(&mut self, channel: ChannelId) {
        if let Some(slot) = self.channels.get(&channel) {
            slot.sink.pause();
        }
        if let Some(shots) = self.one_shots.get(&channel) {
            for shot in shots {
                shot.sink.pause();
            }
        }
    }

    fn resume(&mut self, channel: ChannelId) {
        if let Some(slot) = self.channels.get(&channel) {
            slot.sink.play();
        }
        if let Some(shots) = self.one_shots.get(&channel) {
            for shot in shots {
                shot.sink.play();
            }
        }
    }

    fn set_volume(&mut self, channel: ChannelId, volume: f32) {
        let effective = self.sink_volume(channel, volume);
        if let Some(slot) = self.channels.get_mut(&channel) {
            slot.volume = volume;
            slot.sink.set_volume(effective);
        }
    }

    fn set_pitch(&mut self, channel: ChannelId, pitch: f32) {
        if let Some(slot) = self.channels.get(&channel) {
            slot.sink.set_speed(pitch);
        }
    }

    fn is_playing(&self, channel: ChannelId) -> bool {
        let slot_playing = self
            .channels
            .get(&channel)
            .map(|slot| !slot.sink.empty() && !slot.sink.is_paused())
            .unwrap_or(false);

        let shots_playing = self
            .one_shots
            .get(&channel)
            .map(|shots| {
                shots
                    .iter()
                    .any(|shot| !shot.sink.empty() && !shot.sink.is_paused())
            })
            .unwrap_or(false);

        slot_playing || shots_playing
    }

    fn play_one_shot(
        &mut self,
        channel: ChannelId,
        clip: &Clip,
        volume: f32,
        pitch: f32,
    ) -> Result<(), AudioError> {
        self.prune_finished_shots(channel);

        let decoder = Self::decoder(clip)?;
        let effective = self.sink_volume(channel, volume);

        let sink =
            Sink::try_new(&self.handle).map_err(|e| AudioError::PlaybackFailed(Box::new(e)))?;
        sink.set_speed(pitch);
        sink.set_volume(effective);
        sink.append(decoder);

        self.one_shots
            .entry(channel)
            .or_default()
            .push(ShotSlot { sink, volume });

        tracing::debug!("One-shot '{}' on channel {}", clip.name(), channel);
        Ok(())
    }

    fn set_group_db(&mut self, group: MixerGroup, decibels: f32) {
        self.group_gain.insert(group, db_to_linear(decibels));
        self.refresh_volumes();
        tracing::debug!("Mixer group {} set to {:.2} dB", group, decibels);
    }
}
