/// Sound library
///
/// Immutable name-to-clip mapping built once during initialization from an
/// ordered entry list. Duplicate names are last-write-wins; each overwrite is
/// surfaced as a warning so bad configuration is visible instead of silent.
use std::collections::HashMap;

use crate::clip::Clip;

/// Immutable name -> clip lookup table
#[derive(Debug, Clone, Default)]
pub struct SoundLibrary {
    clips: HashMap<String, Clip>,
}

impl SoundLibrary {
    /// Empty library; every named lookup will warn and no-op
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build the library from an ordered (name, clip) list.
    ///
    /// Later entries overwrite earlier ones under the same name.
    pub fn from_entries(entries: impl IntoIterator<Item = (String, Clip)>) -> Self {
        let mut clips: HashMap<String, Clip> = HashMap::new();

        for (name, clip) in entries {
            if let Some(previous) = clips.insert(name.clone(), clip) {
                tracing::warn!(
                    "Duplicate sound name '{}': entry '{}' shadowed by a later one",
                    name,
                    previous.name()
                );
            }
        }

        tracing::debug!("Sound library ready with {} entries", clips.len());
        Self { clips }
    }

    pub fn get(&self, name: &str) -> Option<&Clip> {
        self.clips.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.clips.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    /// Registered names, in no particular order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.clips.keys().map(String::as_str)
    }
}
