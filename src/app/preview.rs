use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::debug;

use crate::domain::AudioFile;

type LiveSet = Arc<Mutex<HashMap<u64, String>>>;

/// Hands out preview resources for selected files and tracks which are
/// still alive.
#[derive(Clone, Default)]
pub struct PreviewRegistry {
    next_id: Arc<AtomicU64>,
    live: LiveSet,
}

impl PreviewRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a preview for `file`. The resource lives as long as the handle.
    pub fn acquire(&self, file: &AudioFile) -> PreviewHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.live.lock().insert(id, file.name().to_string());
        debug!(preview_id = id, file = file.name(), "Preview created");

        PreviewHandle {
            id,
            file_name: file.name().to_string(),
            live: Arc::clone(&self.live),
        }
    }

    /// Number of previews not yet released.
    pub fn live_count(&self) -> usize {
        self.live.lock().len()
    }
}

/// A live preview resource. Dropping it releases the resource.
pub struct PreviewHandle {
    id: u64,
    file_name: String,
    live: LiveSet,
}

impl PreviewHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

impl std::fmt::Debug for PreviewHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreviewHandle")
            .field("id", &self.id)
            .field("file_name", &self.file_name)
            .finish()
    }
}

impl Drop for PreviewHandle {
    fn drop(&mut self) {
        if self.live.lock().remove(&self.id).is_some() {
            debug!(preview_id = self.id, "Preview released");
        }
    }
}
