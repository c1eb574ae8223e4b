//! Offline cache registration
//!
//! Best effort: a failure is logged and playback carries on without it.

use crate::config::OfflineCacheSettings;
use std::path::PathBuf;

/// Prepare the offline cache directory
///
/// Only the registration step exists: tracks live in the playlist store and
/// nothing is written here yet. Returns the directory when it is ready,
/// `None` when the cache is disabled or could not be created.
pub async fn register_offline_cache(settings: &OfflineCacheSettings) -> Option<PathBuf> {
    if !settings.enabled {
        tracing::debug!("Offline cache disabled");
        return None;
    }

    match tokio::fs::create_dir_all(&settings.dir).await {
        Ok(()) => {
            tracing::info!(dir = %settings.dir.display(), "Offline cache registered");
            Some(settings.dir.clone())
        }
        Err(e) => {
            tracing::warn!(
                dir = %settings.dir.display(),
                error = %e,
                "Offline cache registration failed"
            );
            None
        }
    }
}
