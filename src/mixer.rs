/// Mixer groups and volume conversion
///
/// Each output channel routes to one of four named mixer groups whose gain is
/// set in decibels. Callers work in linear 0-1 levels; the conversion here
/// clamps the level to a floor *before* the logarithm (the pre-log variant),
/// so the quietest representable gain is exactly [`DB_FLOOR`] rather than
/// negative infinity.
use std::fmt;

/// Linear level floor applied before the logarithm
pub const MIN_LEVEL: f32 = 1e-4;

/// Decibel value a zero (or floor-clamped) level maps to: 20 * log10(1e-4)
pub const DB_FLOOR: f32 = -80.0;

/// Named mixer buses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MixerGroup {
    Master,
    Music,
    Sfx,
    Ui,
}

impl MixerGroup {
    /// All groups, in settings-store order
    pub const ALL: [MixerGroup; 4] = [
        MixerGroup::Master,
        MixerGroup::Music,
        MixerGroup::Sfx,
        MixerGroup::Ui,
    ];

    /// Fixed key this group's linear level is persisted under
    pub fn settings_key(&self) -> &'static str {
        match self {
            MixerGroup::Master => "MasterVolume",
            MixerGroup::Music => "MusicVolume",
            MixerGroup::Sfx => "SFXVolume",
            MixerGroup::Ui => "UIVolume",
        }
    }
}

impl fmt::Display for MixerGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MixerGroup::Master => write!(f, "Master"),
            MixerGroup::Music => write!(f, "Music"),
            MixerGroup::Sfx => write!(f, "SFX"),
            MixerGroup::Ui => write!(f, "UI"),
        }
    }
}

/// Convert a linear 0-1 level to decibels.
///
/// The level is clamped to `MIN_LEVEL..=1.0` first, so 0 maps to the finite
/// [`DB_FLOOR`] and never to `-inf` or NaN.
pub fn linear_to_db(level: f32) -> f32 {
    let clamped = level.clamp(MIN_LEVEL, 1.0);
    20.0 * clamped.log10()
}

/// Inverse conversion, used by backends that mix in linear gain
pub fn db_to_linear(db: f32) -> f32 {
    10.0_f32.powf(db / 20.0)
}
