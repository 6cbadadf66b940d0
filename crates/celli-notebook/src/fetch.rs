//! Content loading for code directives that reference a `uri`.

use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};
use ureq::Agent;

/// URI prefix selecting the local file system.
pub const FILE_SCHEME: &str = "file://";

/// Type alias for the file reading callback function.
pub type ReadFileFn = dyn Fn(&Path) -> io::Result<String> + Send + Sync;

/// Error while loading content from a URI.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Local file could not be read.
    #[error("could not read file {}", .path.display())]
    File {
        /// Path taken from the `file://` URI.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// HTTP request failed (network error, error status, unreadable body).
    #[error("could not fetch {uri}")]
    Http {
        /// Requested URI.
        uri: String,
        /// Underlying transport error.
        #[source]
        source: ureq::Error,
    },
}

/// Loads content for `file://` and HTTP(S) URIs.
///
/// HTTP requests are plain unauthenticated GETs issued through the wrapped
/// [`Agent`]; timeouts and other transport settings are the agent's.
pub struct ContentFetcher {
    agent: Agent,
    read_file: Box<ReadFileFn>,
}

impl Default for ContentFetcher {
    fn default() -> Self {
        Self::new(Agent::new_with_defaults())
    }
}

impl ContentFetcher {
    /// Create a fetcher using `agent` for HTTP requests.
    #[must_use]
    pub fn new(agent: Agent) -> Self {
        Self {
            agent,
            read_file: Box::new(default_read_file),
        }
    }

    /// Create a fetcher whose HTTP requests time out after `timeout`.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            .build()
            .into();
        Self::new(agent)
    }

    /// Set the file reading callback.
    ///
    /// Default: `std::fs::read_to_string`
    #[must_use]
    pub fn with_read_file<F>(mut self, read_file: F) -> Self
    where
        F: Fn(&Path) -> io::Result<String> + Send + Sync + 'static,
    {
        self.read_file = Box::new(read_file);
        self
    }

    /// Load the content behind `uri`.
    ///
    /// `file://<path>` reads `<path>` locally; any other URI is fetched over
    /// HTTP and the response body returned.
    pub fn fetch(&self, uri: &str) -> Result<String, FetchError> {
        match uri.strip_prefix(FILE_SCHEME) {
            Some(path) => self.read_local(Path::new(path)),
            None => self.get(uri),
        }
    }

    fn read_local(&self, path: &Path) -> Result<String, FetchError> {
        debug!(path = %path.display(), "Reading code content");
        (self.read_file)(path).map_err(|source| FetchError::File {
            path: path.to_path_buf(),
            source,
        })
    }

    fn get(&self, uri: &str) -> Result<String, FetchError> {
        info!(uri, "Fetching code content");
        let http_error = |source: ureq::Error| FetchError::Http {
            uri: uri.to_owned(),
            source,
        };

        let response = self.agent.get(uri).call().map_err(http_error)?;
        let mut body = response.into_body();
        body.read_to_string().map_err(http_error)
    }
}

/// Default file reading function.
fn default_read_file(path: &Path) -> io::Result<String> {
    std::fs::read_to_string(path)
}
