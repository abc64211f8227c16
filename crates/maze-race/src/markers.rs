//! Engine state as seen through the files it leaves in the work directory.

use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

pub const MAZE_MARKER: &str = "maze_temp.txt";
pub const RACE_ACTIVE_MARKER: &str = "race_active.tmp";
pub const RACE_STATE_MARKER: &str = "race_state.tmp";
pub const RESULTS_LOG: &str = "race_results.txt";

/// Everything the controller knows about engine-side state between
/// invocations. Swapping the file protocol for a structured reply only
/// needs a new implementation of this trait.
pub trait EngineState {
    fn race_active(&self) -> bool;
    fn maze_loaded(&self) -> bool;
    fn read_results_log(&self) -> Option<String>;
}

#[derive(Debug, Clone)]
pub struct MarkerFiles {
    root: PathBuf,
}

impl MarkerFiles {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Best-effort removal of the markers the engine leaves behind.
    /// Missing files and permission errors are ignored.
    pub fn cleanup(&self) {
        for name in [MAZE_MARKER, RACE_ACTIVE_MARKER, RACE_STATE_MARKER] {
            match fs::remove_file(self.path(name)) {
                Ok(()) => debug!(event = "marker_removed", marker = name),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => debug!(event = "marker_remove_failed", marker = name, error = %err),
            }
        }
    }
}

impl EngineState for MarkerFiles {
    fn race_active(&self) -> bool {
        self.path(RACE_ACTIVE_MARKER).exists()
    }

    fn maze_loaded(&self) -> bool {
        fs::metadata(self.path(MAZE_MARKER))
            .map(|meta| meta.is_file() && meta.len() > 0)
            .unwrap_or(false)
    }

    fn read_results_log(&self) -> Option<String> {
        fs::read_to_string(self.path(RESULTS_LOG)).ok()
    }
}
