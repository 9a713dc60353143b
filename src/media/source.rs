use std::io;
use std::path::{Path, PathBuf};

use crate::foundation::error::{FcpxError, FcpxResult};
use crate::resources::model::MediaKind;

/// Absolute, symlink-free path of an existing regular file.
pub fn resolve_source(path: impl AsRef<Path>) -> FcpxResult<PathBuf> {
    let path = path.as_ref();
    let resolved = std::fs::canonicalize(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => FcpxError::SourceNotFound(path.display().to_string()),
        _ => FcpxError::Io(e),
    })?;
    if !resolved.is_file() {
        return Err(FcpxError::SourceNotFound(resolved.display().to_string()));
    }
    Ok(resolved)
}

const IMAGE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "tif", "tiff", "heic", "bmp", "gif", "psd",
];
const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "aac", "m4a", "aif", "aiff", "flac", "caf"];

/// Media kind guessed from the file extension; unknown extensions are treated as video.
pub fn media_kind_for(path: &Path) -> MediaKind {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if IMAGE_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Image
    } else if AUDIO_EXTENSIONS.contains(&ext.as_str()) {
        MediaKind::Audio
    } else {
        MediaKind::Video
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/source.rs"]
mod tests;
