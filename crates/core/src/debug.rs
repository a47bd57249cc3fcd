//! Best-effort dump of the cleaned document for inspection.

use std::path::{Path, PathBuf};

use crate::Result;

/// Default location of the debug artifact, relative to the working directory.
pub const DEFAULT_DEBUG_HTML_PATH: &str = "tmp/article.html";

/// Writes `html` to `path`, creating the parent directory when missing.
///
/// Concurrent writers to the same path race; the last one wins.
pub async fn write_debug_html(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, html).await?;
    Ok(())
}

/// Writes the artifact on a detached task.
///
/// Failures are logged and go nowhere else. Outside a Tokio runtime the
/// write is skipped.
pub fn spawn_debug_write(path: PathBuf, html: String) {
    let Ok(handle) = tokio::runtime::Handle::try_current() else {
        tracing::debug!(file = %path.display(), "No runtime available, skipping debug HTML write");
        return;
    };

    handle.spawn(async move {
        match write_debug_html(&path, &html).await {
            Ok(()) => tracing::debug!(file = %path.display(), "Saved cleaned HTML to file"),
            Err(e) => tracing::error!(file = %path.display(), error = %e, "Failed to save debug HTML"),
        }
    });
}
