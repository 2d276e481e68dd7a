/// Audio clip handles
///
/// A `Clip` is an opaque, cheaply clonable reference to preloaded audio data.
/// Decoding happens at playback time inside the backend; the clip itself is
/// just the raw file bytes behind an `Arc`, so handing clips around never
/// copies audio.
use std::path::Path;
use std::sync::Arc;

use crate::error::AudioError;

/// Preloaded audio clip
#[derive(Debug, Clone)]
pub struct Clip {
    name: String,
    data: Arc<Vec<u8>>,
}

impl Clip {
    /// Create a clip from raw encoded audio bytes (MP3/WAV/OGG...)
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data: Arc::new(data),
        }
    }

    /// Preload a clip from a file into memory
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AudioError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(AudioError::LoadFailed {
                path: path.display().to_string(),
                source: format!("Audio file not found: {}", path.display()).into(),
            });
        }

        let data = std::fs::read(path).map_err(|e| AudioError::LoadFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::info!(
            "Preloaded audio clip '{}': {} ({} bytes)",
            name,
            path.display(),
            data.len()
        );

        Ok(Self {
            name,
            data: Arc::new(data),
        })
    }

    /// Clip name, used for logging and diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw encoded bytes, shared with every clone of this clip
    pub fn data(&self) -> Arc<Vec<u8>> {
        Arc::clone(&self.data)
    }

    /// Whether two handles reference the same underlying audio data.
    ///
    /// Identity, not content: two separately loaded copies of the same file
    /// are different clips. The music re-trigger guard relies on this.
    pub fn same_clip(&self, other: &Clip) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_from_bytes() {
        let clip = Clip::from_bytes("jump", vec![1, 2, 3]);
        assert_eq!(clip.name(), "jump");
        assert_eq!(clip.data().len(), 3);
    }

    #[test]
    fn test_clip_identity() {
        let a = Clip::from_bytes("a", vec![1, 2, 3]);
        let b = a.clone();
        let c = Clip::from_bytes("a", vec![1, 2, 3]);

        assert!(a.same_clip(&b));
        assert!(!a.same_clip(&c)); // same content, different load
    }

    #[test]
    fn test_clip_from_missing_file() {
        let result = Clip::from_file("nonexistent.mp3");
        assert!(result.is_err());
    }
}
