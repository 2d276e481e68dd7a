/// Persisted volume settings
///
/// Raw linear levels for the four mixer groups, stored as JSON under fixed
/// keys so they survive process restarts. The raw value is what gets written:
/// a level of 0.0 is persisted as 0.0 even though the mixer floor-clamps it
/// before the logarithm.
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::mixer::MixerGroup;

/// Linear volume levels keyed by mixer group
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct VolumeSettings {
    #[serde(rename = "MasterVolume")]
    pub master: f32,

    #[serde(rename = "MusicVolume")]
    pub music: f32,

    #[serde(rename = "SFXVolume")]
    pub sfx: f32,

    #[serde(rename = "UIVolume")]
    pub ui: f32,
}

impl Default for VolumeSettings {
    fn default() -> Self {
        Self {
            master: 1.0,
            music: 1.0,
            sfx: 1.0,
            ui: 1.0,
        }
    }
}

impl VolumeSettings {
    /// Default location in the platform-specific config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("audio-director").join("volume.json"))
    }

    pub fn level(&self, group: MixerGroup) -> f32 {
        match group {
            MixerGroup::Master => self.master,
            MixerGroup::Music => self.music,
            MixerGroup::Sfx => self.sfx,
            MixerGroup::Ui => self.ui,
        }
    }

    pub fn set_level(&mut self, group: MixerGroup, level: f32) {
        let slot = match group {
            MixerGroup::Master => &mut self.master,
            MixerGroup::Music => &mut self.music,
            MixerGroup::Sfx => &mut self.sfx,
            MixerGroup::Ui => &mut self.ui,
        };
        *slot = level;
    }

    /// Load settings from disk.
    ///
    /// Out-of-range levels are clamped to 0-1 rather than rejected.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        let content = fs::read_to_string(path).map_err(|e| ConfigError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        let mut settings: VolumeSettings =
            serde_json::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                path: path.display().to_string(),
                source: Box::new(e),
            })?;

        for group in MixerGroup::ALL {
            let level = settings.level(group);
            if !(0.0..=1.0).contains(&level) {
                tracing::warn!(
                    "Persisted {} level {} out of range, clamping",
                    group,
                    level
                );
                settings.set_level(group, level.clamp(0.0, 1.0));
            }
        }

        tracing::debug!("Loaded volume settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults when the file does not exist
    /// or cannot be parsed
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("Falling back to default volume settings: {}", e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::DirectoryCreationFailed {
                path: parent.display().to_string(),
                source: e,
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        fs::write(path, json).map_err(|e| ConfigError::SaveFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_full_volume() {
        let settings = VolumeSettings::default();
        for group in MixerGroup::ALL {
            assert_eq!(settings.level(group), 1.0);
        }
    }

    #[test]
    fn test_fixed_json_keys() {
        let settings = VolumeSettings {
            master: 1.0,
            music: 0.5,
            sfx: 0.25,
            ui: 0.0,
        };

        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"MasterVolume\""));
        assert!(json.contains("\"MusicVolume\""));
        assert!(json.contains("\"SFXVolume\""));
        assert!(json.contains("\"UIVolume\""));
    }

    #[test]
    fn test_set_and_get_by_group() {
        let mut settings = VolumeSettings::default();
        settings.set_level(MixerGroup::Sfx, 0.3);
        assert_eq!(settings.level(MixerGroup::Sfx), 0.3);
        assert_eq!(settings.level(MixerGroup::Master), 1.0);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let settings = VolumeSettings::load_or_default("no/such/volume.json");
        assert_eq!(settings, VolumeSettings::default());
    }

    #[test]
    fn test_out_of_range_levels_clamp_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("volume.json");
        fs::write(
            &path,
            r#"{"MasterVolume": 2.5, "MusicVolume": -1.0, "SFXVolume": 0.5, "UIVolume": 1.0}"#,
        )
        .unwrap();

        let settings = VolumeSettings::load(&path).unwrap();
        assert_eq!(settings.master, 1.0);
        assert_eq!(settings.music, 0.0);
        assert_eq!(settings.sfx, 0.5);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("volume.json");

        let mut settings = VolumeSettings::default();
        settings.set_level(MixerGroup::Music, 0.5);
        settings.set_level(MixerGroup::Ui, 0.0);
        settings.save(&path).unwrap();

        let loaded = VolumeSettings::load(&path).unwrap();
        assert_eq!(loaded, settings);
    }
}
