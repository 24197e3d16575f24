// src/error.rs
// =============================================================================
// The error type shared by every stage of the crawl.
//
// Each variant names the stage that failed:
// - Client: the HTTP client could not be built at startup
// - Transport: the request never produced a usable response (DNS, TLS,
//   connection reset, body read failure)
// - HttpStatus: the server answered with something other than 200 OK
// - Filesystem: creating the host directory or writing the file failed
// - Parse / MissingHost: the URL itself is unusable
// - Task: a spawned child crawl panicked
//
// Link extraction never produces one of these; a bad href is just skipped.
// =============================================================================

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("failed to reach {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP status: {status} ({url})")]
    HttpStatus { url: String, status: StatusCode },

    #[error("failed to write {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid URL '{url}': {source}")]
    Parse {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("URL has no host: {url}")]
    MissingHost { url: String },

    #[error("crawl task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl CrawlError {
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CrawlError::Filesystem {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_mentions_code() {
        let err = CrawlError::HttpStatus {
            url: "http://example.com/missing".to_string(),
            status: StatusCode::NOT_FOUND,
        };
        let message = err.to_string();
        assert!(message.contains("404 Not Found"));
        assert!(message.contains("http://example.com/missing"));
    }

    #[test]
    fn test_client_error_does_not_name_a_url() {
        // A relative URL is a reliable way to get a builder-side reqwest::Error
        let source = reqwest::Client::new().get("not-absolute").build().unwrap_err();
        let message = CrawlError::Client(source).to_string();
        assert!(message.starts_with("failed to build HTTP client: "));
        assert!(!message.contains("failed to reach"));
    }

    #[test]
    fn test_filesystem_error_mentions_path() {
        let err = CrawlError::filesystem(
            "out/example.com",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("out/example.com"));
    }
}
