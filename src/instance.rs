/// Process-wide access point
///
/// Call sites that cannot thread an `&AudioDirector` through (input handlers,
/// scripting callbacks) can reach the layer through a one-time installed
/// global. The first install wins for the process lifetime; later installs
/// are rejected and handed back to the caller.
use std::sync::OnceLock;

use crate::director::AudioDirector;

static INSTANCE: OnceLock<AudioDirector> = OnceLock::new();

/// Install the process-wide director.
///
/// Returns the director back as an `Err` when one is already installed.
pub fn install(director: AudioDirector) -> Result<(), AudioDirector> {
    match INSTANCE.set(director) {
        Ok(()) => {
            tracing::info!("Audio director installed as process-wide instance");
            Ok(())
        }
        Err(rejected) => {
            tracing::warn!("Audio director already installed, discarding later instance");
            Err(rejected)
        }
    }
}

/// The installed director, if any
pub fn global() -> Option<&'static AudioDirector> {
    INSTANCE.get()
}
