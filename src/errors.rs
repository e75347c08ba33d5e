use std::fmt;
use std::path::PathBuf;

/// Failure to obtain one page. Always local to a single URL.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The URL could not be parsed
    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
    /// Network-level failure (DNS, connect, TLS, timeout)
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status
    #[error("server responded with status {status}")]
    Status { status: u16 },
    /// A WebDriver command failed
    #[error("browser error: {0}")]
    Browser(String),
}

impl From<fantoccini::error::CmdError> for FetchError {
    fn from(err: fantoccini::error::CmdError) -> Self {
        FetchError::Browser(err.to_string())
    }
}

/// Top-level error type that carries a process exit code
#[derive(Debug)]
pub enum ScrapeError {
    /// URL list could not be read (exit code 2)
    InputFile {
        path: PathBuf,
        source: std::io::Error,
    },
    /// Output sink could not be written (exit code 3)
    Output(String),
    /// WebDriver connection failed (exit code 4)
    WebDriverFailed(String),
    /// Generic error (exit code 1)
    Other(anyhow::Error),
}

impl ScrapeError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            ScrapeError::InputFile { .. } => 2,
            ScrapeError::Output(_) => 3,
            ScrapeError::WebDriverFailed(_) => 4,
            ScrapeError::Other(_) => 1,
        }
    }
}

impl fmt::Display for ScrapeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScrapeError::InputFile { path, source } => {
                write!(f, "File '{}' could not be read: {}", path.display(), source)
            }
            ScrapeError::Output(msg) => write!(f, "Failed to write output: {}", msg),
            ScrapeError::WebDriverFailed(msg) => {
                write!(f, "WebDriver connection failed: {}", msg)
            }
            ScrapeError::Other(err) => write!(f, "{:#}", err),
        }
    }
}

impl std::error::Error for ScrapeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ScrapeError::InputFile { source, .. } => Some(source),
            ScrapeError::Other(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for ScrapeError {
    fn from(err: anyhow::Error) -> Self {
        let err = match err.downcast::<ScrapeError>() {
            Ok(scrape_err) => return scrape_err,
            Err(err) => err,
        };

        // Browser setup errors arrive as plain anyhow chains
        let msg = format!("{:#}", err);
        if msg.contains("Failed to connect to WebDriver")
            || msg.contains("chromedriver")
            || msg.contains("geckodriver")
        {
            ScrapeError::WebDriverFailed(msg)
        } else {
            ScrapeError::Other(err)
        }
    }
}
