/// Audio director
///
/// The context object the whole layer hangs off: routes play requests to the
/// fixed channels, drives the crossfade ramp from the host's per-frame tick,
/// and fronts the mixer's dB volume control with linear levels.
///
/// Every dispatch operation is non-fatal. Missing names, decoder failures and
/// backend errors log a diagnostic and degrade to a no-op; audio must never
/// take gameplay down with it.
use std::path::PathBuf;
use std::time::Duration;

use parking_lot::Mutex;

use crate::backend::AudioBackend;
use crate::channel::{ChannelId, ChannelSet, Playback};
use crate::clip::Clip;
use crate::crossfade::CrossfadeRamp;
use crate::library::SoundLibrary;
use crate::mixer::{linear_to_db, MixerGroup};
use crate::settings::VolumeSettings;

/// Parameters for a music play request
#[derive(Debug, Clone, Copy)]
pub struct MusicParams {
    /// Target volume, 0-1 linear
    pub volume: f32,

    /// Pitch multiplier
    pub pitch: f32,

    /// Loop the track
    pub looped: bool,

    /// Crossfade duration; zero switches tracks with a hard cut
    pub crossfade: Duration,
}

impl Default for MusicParams {
    fn default() -> Self {
        Self {
            volume: 1.0,
            pitch: 1.0,
            looped: true,
            crossfade: Duration::ZERO,
        }
    }
}

impl MusicParams {
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    pub fn with_pitch(mut self, pitch: f32) -> Self {
        self.pitch = pitch;
        self
    }

    pub fn with_loop(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    pub fn with_crossfade(mut self, duration: Duration) -> Self {
        self.crossfade = duration;
        self
    }
}

struct Inner {
    backend: Box<dyn AudioBackend>,
    library: SoundLibrary,
    channels: ChannelSet,
    /// Which of the two music channels is the active output; toggles on every
    /// crossfaded transition
    primary_active: bool,
    ramp: Option<CrossfadeRamp>,
    /// Cached linear levels per mixer group, also the volume getter's source
    levels: [f32; 4],
    settings_path: Option<PathBuf>,
}

impl Inner {
    fn active_music(&self) -> ChannelId {
        if self.primary_active {
            ChannelId::MusicPrimary
        } else {
            ChannelId::MusicSecondary
        }
    }

    fn inactive_music(&self) -> ChannelId {
        if self.primary_active {
            ChannelId::MusicSecondary
        } else {
            ChannelId::MusicPrimary
        }
    }

    fn level_index(group: MixerGroup) -> usize {
        match group {
            MixerGroup::Master => 0,
            MixerGroup::Music => 1,
            MixerGroup::Sfx => 2,
            MixerGroup::Ui => 3,
        }
    }

    fn start_channel(
        &mut self,
        channel: ChannelId,
        clip: &Clip,
        volume: f32,
        pitch: f32,
        looped: bool,
    ) {
        match self.backend.start(channel, clip, volume, pitch, looped) {
            Ok(()) => {
                let state = self.channels.get_mut(channel);
                state.clip = Some(clip.clone());
                state.volume = volume;
                state.pitch = pitch;
                state.looped = looped;
                state.playback = Playback::Playing;
            }
            Err(e) => {
                tracing::error!("Failed to start '{}' on {}: {}", clip.name(), channel, e);
                self.channels.get_mut(channel).clear();
            }
        }
    }

    fn stop_channel(&mut self, channel: ChannelId) {
        self.backend.stop(channel);
        self.channels.get_mut(channel).clear();
    }

    fn pause_channel(&mut self, channel: ChannelId) {
        let state = self.channels.get_mut(channel);
        if state.playback == Playback::Playing {
            state.playback = Playback::Paused;
            self.backend.pause(channel);
        }
    }

    fn resume_channel(&mut self, channel: ChannelId) {
        let state = self.channels.get_mut(channel);
        if state.playback == Playback::Paused {
            state.playback = Playback::Playing;
            self.backend.resume(channel);
        }
    }

    fn one_shot(&mut self, channel: ChannelId, clip: &Clip, volume: f32, pitch: f32) {
        if let Err(e) = self.backend.play_one_shot(channel, clip, volume, pitch) {
            tracing::warn!("One-shot '{}' on {} failed: {}", clip.name(), channel, e);
        }
    }

    fn play_music(&mut self, clip: &Clip, params: MusicParams) {
        if params.crossfade.is_zero() {
            // Hard cut: silence the other channel, restart the active one
            let inactive = self.inactive_music();
            self.stop_channel(inactive);
            self.ramp = None;

            let active = self.active_music();
            self.start_channel(active, clip, params.volume, params.pitch, params.looped);
            return;
        }

        let from = self.active_music();
        let to = self.inactive_music();

        // Incoming track starts silent; the ramp raises it each tick
        self.start_channel(to, clip, 0.0, params.pitch, params.looped);
        if self.channels.get(to).playback != Playback::Playing {
            // Backend refused the new track; keep the current one untouched
            return;
        }

        if self.ramp.is_some() {
            tracing::debug!("Superseding in-flight crossfade");
        }

        let from_volume = self.channels.get(from).volume;
        self.ramp = Some(CrossfadeRamp::new(
            from,
            to,
            from_volume,
            0.0,
            params.volume,
            params.crossfade,
        ));

        // The toggle flips now, not when the ramp completes: a second
        // crossfade issued mid-ramp targets the new pair
        self.primary_active = !self.primary_active;
    }

    fn apply_ramp(&mut self, dt: Duration) {
        let Some(ramp) = self.ramp.as_mut() else {
            return;
        };

        let step = ramp.advance(dt);
        let from = ramp.from_channel();
        let to = ramp.to_channel();

        self.backend.set_volume(from, step.from_volume);
        self.channels.get_mut(from).volume = step.from_volume;
        self.backend.set_volume(to, step.to_volume);
        self.channels.get_mut(to).volume = step.to_volume;

        if step.finished {
            self.backend.stop(from);
            self.channels.get_mut(from).clear();
            self.ramp = None;
            tracing::debug!("Crossfade complete, {} now carries the music", to);
        }
    }

    fn set_volume(&mut self, group: MixerGroup, level: f32) {
        let decibels = linear_to_db(level);
        self.backend.set_group_db(group, decibels);
        self.levels[Self::level_index(group)] = level.clamp(0.0, 1.0);
        tracing::debug!("{} volume set to {:.3} ({:.2} dB)", group, level, decibels);

        if let Some(path) = &self.settings_path {
            let mut settings = VolumeSettings::default();
            for g in MixerGroup::ALL {
                settings.set_level(g, self.levels[Self::level_index(g)]);
            }
            if let Err(e) = settings.save(path) {
                tracing::warn!("Failed to persist volume settings: {}", e);
            }
        }
    }
}

/// Game-audio convenience layer over a host [`AudioBackend`]
pub struct AudioDirector {
    inner: Mutex<Inner>,
}

impl AudioDirector {
    /// Create a director over a backend and a preloaded sound library
    pub fn new(backend: Box<dyn AudioBackend>, library: SoundLibrary) -> Self {
        Self {
            inner: Mutex::new(Inner {
                backend,
                library,
                channels: ChannelSet::default(),
                primary_active: true,
                ramp: None,
                levels: [1.0; 4],
                settings_path: None,
            }),
        }
    }

    /// Apply saved volume levels and persist future changes to `path`
    pub fn with_settings_path(self, path: PathBuf) -> Self {
        let settings = VolumeSettings::load_or_default(&path);
        {
            let mut inner = self.inner.lock();
            inner.settings_path = Some(path);
            for group in MixerGroup::ALL {
                inner.set_volume(group, settings.level(group));
            }
        }
        self
    }

    /// Apply volume levels without wiring up persistence
    pub fn with_settings(self, settings: VolumeSettings) -> Self {
        {
            let mut inner = self.inner.lock();
            for group in MixerGroup::ALL {
                inner.set_volume(group, settings.level(group));
            }
        }
        self
    }

    // =========================== MUSIC ===========================

    /// Play a music track on the active music channel.
    ///
    /// With a zero crossfade the track starts with a hard cut and always
    /// restarts, even if the same clip is already playing. With a positive
    /// crossfade the inactive channel starts silent and ramps up while the
    /// outgoing channel ramps down over the given duration.
    pub fn play_music(&self, clip: &Clip, params: MusicParams) {
        self.inner.lock().play_music(clip, params);
    }

    /// Play a registered music track by name.
    ///
    /// Unknown names warn and no-op. Re-triggering the track that is already
    /// playing on the active channel is a no-op, so scene reloads and repeated
    /// UI events do not restart the music.
    pub fn play_music_named(&self, name: &str, params: MusicParams) {
        let mut inner = self.inner.lock();

        let Some(clip) = inner.library.get(name).cloned() else {
            tracing::warn!("No sound registered under name: {}", name);
            return;
        };

        let active = inner.active_music();
        let state = inner.channels.get(active);
        if state.is_playing() && state.clip.as_ref().is_some_and(|c| c.same_clip(&clip)) {
            tracing::debug!("'{}' already playing, ignoring re-trigger", name);
            return;
        }

        inner.play_music(&clip, params);
    }

    pub fn stop_music(&self) {
        let mut inner = self.inner.lock();
        inner.ramp = None;
        inner.stop_channel(ChannelId::MusicPrimary);
        inner.stop_channel(ChannelId::MusicSecondary);
    }

    pub fn pause_music(&self) {
        let mut inner = self.inner.lock();
        inner.pause_channel(ChannelId::MusicPrimary);
        inner.pause_channel(ChannelId::MusicSecondary);
    }

    pub fn resume_music(&self) {
        let mut inner = self.inner.lock();
        inner.resume_channel(ChannelId::MusicPrimary);
        inner.resume_channel(ChannelId::MusicSecondary);
    }

    // =========================== SFX / UI ===========================

    /// Fire a sound effect; overlaps freely with in-flight effects
    pub fn play_sfx(&self, clip: &Clip, volume: f32, pitch: f32) {
        self.inner.lock().one_shot(ChannelId::Sfx, clip, volume, pitch);
    }

    /// Fire a registered sound effect by name
    pub fn play_sfx_named(&self, name: &str) {
        self.play_named_one_shot(ChannelId::Sfx, name);
    }

    /// Fire a UI sound; overlaps freely with in-flight UI sounds
    pub fn play_ui(&self, clip: &Clip, volume: f32, pitch: f32) {
        self.inner.lock().one_shot(ChannelId::Ui, clip, volume, pitch);
    }

    /// Fire a registered UI sound by name
    pub fn play_ui_named(&self, name: &str) {
        self.play_named_one_shot(ChannelId::Ui, name);
    }

    fn play_named_one_shot(&self, channel: ChannelId, name: &str) {
        let mut inner = self.inner.lock();
        let Some(clip) = inner.library.get(name).cloned() else {
            tracing::warn!("No sound registered under name: {}", name);
            return;
        };
        inner.one_shot(channel, &clip, 1.0, 1.0);
    }

    pub fn stop_sfx(&self) {
        self.inner.lock().stop_channel(ChannelId::Sfx);
    }

    pub fn stop_ui(&self) {
        self.inner.lock().stop_channel(ChannelId::Ui);
    }

    pub fn stop_all(&self) {
        self.stop_music();
        self.stop_sfx();
        self.stop_ui();
        tracing::debug!("Stopped all audio channels");
    }

    pub fn pause_sfx(&self) {
        self.inner.lock().pause_channel(ChannelId::Sfx);
    }

    pub fn pause_ui(&self) {
        self.inner.lock().pause_channel(ChannelId::Ui);
    }

    pub fn pause_all(&self) {
        self.pause_music();
        self.pause_sfx();
        self.pause_ui();
    }

    pub fn resume_sfx(&self) {
        self.inner.lock().resume_channel(ChannelId::Sfx);
    }

    pub fn resume_ui(&self) {
        self.inner.lock().resume_channel(ChannelId::Ui);
    }

    pub fn resume_all(&self) {
        self.resume_music();
        self.resume_sfx();
        self.resume_ui();
    }

    // =========================== VOLUME ===========================

    /// Set a mixer group's volume from a linear 0-1 level.
    ///
    /// The backend receives the dB conversion (floor-clamped, never -inf);
    /// the raw linear level is cached for [`volume`](Self::volume) and, when a
    /// settings path is configured, persisted to disk.
    pub fn set_volume(&self, group: MixerGroup, level: f32) {
        self.inner.lock().set_volume(group, level);
    }

    /// Last linear level set for a group (1.0 until first set)
    pub fn volume(&self, group: MixerGroup) -> f32 {
        let inner = self.inner.lock();
        inner.levels[Inner::level_index(group)]
    }

    // =========================== TICK ===========================

    /// Advance the layer by one host frame.
    ///
    /// Drives the crossfade ramp; everything else in the layer is
    /// event-driven and needs no ticking.
    pub fn update(&self, dt: Duration) {
        self.inner.lock().apply_ramp(dt);
    }

    // =========================== INTROSPECTION ===========================

    /// Whichever music channel is currently designated as output
    pub fn active_music_channel(&self) -> ChannelId {
        self.inner.lock().active_music()
    }

    pub fn is_music_playing(&self) -> bool {
        let inner = self.inner.lock();
        inner.channels.get(ChannelId::MusicPrimary).is_playing()
            || inner.channels.get(ChannelId::MusicSecondary).is_playing()
    }

    /// Shadow volume the registry tracks for a channel
    pub fn channel_volume(&self, channel: ChannelId) -> f32 {
        self.inner.lock().channels.get(channel).volume
    }

    /// Shadow playback state the registry tracks for a channel
    pub fn channel_playback(&self, channel: ChannelId) -> Playback {
        self.inner.lock().channels.get(channel).playback
    }

    pub fn crossfade_active(&self) -> bool {
        self.inner.lock().ramp.is_some()
    }
}
