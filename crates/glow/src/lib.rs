use std::path::{Path, PathBuf};

/// Path of the image saved for a given frame.
pub fn save_path(dir: &Path, prefix: &str, frame: u64) -> PathBuf {
    dir.join(format!("{prefix}_{frame:05}.png"))
}

/// Whether the frame with the given 1-based index should be written to disk.
///
/// With an interval of zero only the last frame is saved.
pub fn should_save(frame: u64, total: u64, every: u64) -> bool {
    frame == total || (every != 0 && frame % every == 0)
}
