use std::path::{Path, PathBuf};
use std::process::Command;

/// Produces security-scoped bookmark tokens for asset paths.
///
/// A failed lookup yields an empty token; it never fails asset creation.
pub trait BookmarkGenerator {
    /// Token for `path`, or an empty string.
    fn bookmark(&self, path: &Path) -> String;
}

/// Writes no bookmarks.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoBookmarks;

impl BookmarkGenerator for NoBookmarks {
    fn bookmark(&self, _path: &Path) -> String {
        String::new()
    }
}

/// Runs an external helper as `<program> <args..> <path>` and takes its trimmed stdout.
#[derive(Clone, Debug)]
pub struct CommandBookmarks {
    program: PathBuf,
    args: Vec<String>,
}

impl CommandBookmarks {
    /// Helper at `program` with no extra arguments.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a fixed argument placed before the path.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }
}

impl BookmarkGenerator for CommandBookmarks {
    fn bookmark(&self, path: &Path) -> String {
        let out = match Command::new(&self.program)
            .args(&self.args)
            .arg(path)
            .output()
        {
            Ok(out) => out,
            Err(e) => {
                tracing::warn!(
                    program = %self.program.display(),
                    error = %e,
                    "bookmark helper did not run"
                );
                return String::new();
            }
        };
        if !out.status.success() {
            tracing::warn!(
                path = %path.display(),
                status = %out.status,
                "bookmark helper failed"
            );
            return String::new();
        }
        String::from_utf8_lossy(&out.stdout).trim().to_owned()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/media/bookmark.rs"]
mod tests;
