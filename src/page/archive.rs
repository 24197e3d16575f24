// src/page/archive.rs
// =============================================================================
// Writes a downloaded page to disk.
//
// Layout:
//   <dest_root>/<host>/<filename>
//
// where filename is "index.html" for directory-style URLs ("/", "/docs/")
// and the last path segment otherwise. Two URLs on the same host that end
// in the same segment ("/a/page.html" and "/b/page.html") share one file;
// whichever is written last wins.
//
// The filename is the segment exactly as it appears in the URL, still
// percent-encoded: "/my%20page.html" is saved as "my%20page.html". A decoded
// segment could contain '/' (from "%2F") and escape the host directory.
// =============================================================================

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::debug;
use url::Url;

use crate::error::CrawlError;

const INDEX_FILE: &str = "index.html";

#[derive(Debug, Clone)]
pub struct Archiver {
    dest_root: PathBuf,
}

impl Archiver {
    pub fn new(dest_root: impl Into<PathBuf>) -> Self {
        Archiver {
            dest_root: dest_root.into(),
        }
    }

    // Saves `body` as the archived copy of `url`, returning the file path
    //
    // Missing directories are created; an existing file is truncated.
    pub async fn store(&self, url: &Url, body: &[u8]) -> Result<PathBuf, CrawlError> {
        let dir = host_dir(&self.dest_root, url)?;
        create_dir_all(&dir).await?;

        let path = dir.join(file_name(url));
        fs::write(&path, body)
            .await
            .map_err(|e| CrawlError::filesystem(&path, e))?;

        debug!(%url, path = %path.display(), "archived page");
        Ok(path)
    }
}

// <dest_root>/<host>
pub fn host_dir(dest_root: &Path, url: &Url) -> Result<PathBuf, CrawlError> {
    let host = url.host_str().ok_or_else(|| CrawlError::MissingHost {
        url: url.to_string(),
    })?;
    Ok(dest_root.join(host))
}

// Last path segment, or index.html when the path is empty or ends in '/'
//
// The segment stays percent-encoded, so it can never contain a separator.
pub fn file_name(url: &Url) -> &str {
    let path = url.path();
    if path.is_empty() || path.ends_with('/') {
        return INDEX_FILE;
    }
    match path.rsplit('/').next() {
        Some(segment) if !segment.is_empty() => segment,
        _ => INDEX_FILE,
    }
}

async fn create_dir_all(dir: &Path) -> Result<(), CrawlError> {
    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    builder.mode(0o755);

    builder
        .create(dir)
        .await
        .map_err(|e| CrawlError::filesystem(dir, e))
}
