use thiserror::Error;

/// Process-level failure carrying the exit code `brief` terminates with.
///
/// Exit codes:
/// - `2`: configuration missing or invalid (fatal before any fetch)
/// - `4`: local I/O setup failure (HTTP client construction)
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// A required environment value is absent.
    pub fn config_missing(var: &str) -> Self {
        Self::new(2, format!("Missing {var} in environment (.env)."))
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

/// Why a single fetch produced nothing usable.
///
/// Both variants are recovered locally: the resolver moves to the next
/// provider, the assembler renders a no-data line.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// The upstream answered but the payload had nothing usable in it.
    #[error("data unavailable from {source_name}: {reason}")]
    DataUnavailable { source_name: String, reason: String },

    /// Network error, timeout or non-success status.
    #[error("upstream unreachable ({url}): {reason}")]
    UpstreamUnreachable { url: String, reason: String },
}

impl FetchError {
    pub fn unavailable(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }

    pub fn unreachable(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::UpstreamUnreachable {
            url: url.into(),
            reason: reason.into(),
        }
    }
}

/// The insight generator failed; the caller substitutes a fixed sentence.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InsightError {
    #[error("insight generation failed: {0}")]
    GenerationFailed(String),
}
