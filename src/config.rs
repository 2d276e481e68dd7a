use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::clip::Clip;
use crate::error::AppResult;
use crate::library::SoundLibrary;

/// One named sound in the bank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundEntry {
    pub name: String,
    pub path: String,
}

/// Startup configuration: the ordered list of named sounds to preload.
///
/// Order matters only for duplicate names, where the last entry wins
/// (the library warns on each overwrite).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SoundBankConfig {
    #[serde(default)]
    pub sounds: Vec<SoundEntry>,
}

impl SoundBankConfig {
    /// Load the sound bank from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read sound bank from {}", path.display()))?;
        let config: SoundBankConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse sound bank at {}", path.display()))?;

        tracing::info!(
            "Loaded sound bank from {} ({} entries)",
            path.display(),
            config.sounds.len()
        );
        Ok(config)
    }

    /// Save the sound bank as pretty JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> AppResult<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write sound bank to {}", path.display()))?;
        Ok(())
    }

    /// Default location in the platform-specific config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("audio-director").join("sounds.json"))
    }

    /// Preload every entry and build the lookup table.
    ///
    /// An unreadable entry is skipped with a warning; missing audio must never
    /// take gameplay down with it.
    pub fn build_library(&self) -> SoundLibrary {
        let entries = self.sounds.iter().filter_map(|entry| {
            match Clip::from_file(&entry.path) {
                Ok(clip) => Some((entry.name.clone(), clip)),
                Err(e) => {
                    tracing::warn!("Skipping sound '{}': {}", entry.name, e);
                    None
                }
            }
        });

        SoundLibrary::from_entries(entries.collect::<Vec<_>>())
    }
}
