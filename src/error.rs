use std::fmt;

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Extraction errors (empty or unusable submissions)
    Extract(ExtractError),
    /// Rendering errors (PDF backend)
    Render(RenderError),
    /// Transport errors (Telegram Bot API)
    Transport(TransportError),
    /// File operation errors
    File(FileError),
    /// Configuration errors
    Config(ConfigError),
    /// Other errors (wrapping third-party failures)
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Extract(e) => write!(f, "extraction error: {}", e),
            AppError::Render(e) => write!(f, "render error: {}", e),
            AppError::Transport(e) => write!(f, "transport error: {}", e),
            AppError::File(e) => write!(f, "file error: {}", e),
            AppError::Config(e) => write!(f, "config error: {}", e),
            AppError::Other(msg) => write!(f, "error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Extract(e) => Some(e),
            AppError::Render(e) => Some(e),
            AppError::Transport(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// Extraction errors
///
/// The extractor itself never fails; these are decided by the workflow when
/// a submission yields nothing usable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// No body lines remain after the directive lines are removed
    EmptyInput,
    /// Segmentation produced zero usable fragments
    NoQuestionsFound,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::EmptyInput => write!(f, "submission contains no question text"),
            ExtractError::NoQuestionsFound => {
                write!(f, "no usable questions found in submission")
            }
        }
    }
}

impl std::error::Error for ExtractError {}

/// Rendering errors
#[derive(Debug)]
pub enum RenderError {
    /// Configured font could not be loaded
    FontUnavailable {
        path: String,
    },
    /// The PDF backend failed (font embedding, buffer, malformed content)
    Backend {
        message: String,
    },
    /// Writing the artifact failed
    Io {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::FontUnavailable { path } => {
                write!(f, "font unavailable: {}", path)
            }
            RenderError::Backend { message } => write!(f, "PDF backend failed: {}", message),
            RenderError::Io { path, source } => {
                write!(f, "failed to write artifact ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for RenderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RenderError::Io { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// Transport errors (Telegram Bot API)
#[derive(Debug)]
pub enum TransportError {
    /// The HTTP request itself failed
    RequestFailed {
        endpoint: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// The API answered with ok=false
    BadResponse {
        endpoint: String,
        description: Option<String>,
    },
    /// The API answered ok=true but carried no result
    EmptyResponse {
        endpoint: String,
    },
    /// Response body could not be decoded
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportError::RequestFailed { endpoint, source } => {
                write!(f, "request failed ({}): {}", endpoint, source)
            }
            TransportError::BadResponse {
                endpoint,
                description,
            } => {
                write!(f, "API rejected request ({}): {:?}", endpoint, description)
            }
            TransportError::EmptyResponse { endpoint } => {
                write!(f, "API returned empty result: {}", endpoint)
            }
            TransportError::JsonParseFailed { source } => {
                write!(f, "JSON decode failed: {}", source)
            }
        }
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TransportError::RequestFailed { source, .. }
            | TransportError::JsonParseFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// File operation errors
#[derive(Debug)]
pub enum FileError {
    /// Reading a file failed
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Writing a file failed
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// Deleting a file failed
    DeleteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::ReadFailed { path, source } => {
                write!(f, "failed to read file ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "failed to write file ({}): {}", path, source)
            }
            FileError::DeleteFailed { path, source } => {
                write!(f, "failed to delete file ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. }
            | FileError::WriteFailed { source, .. }
            | FileError::DeleteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// Configuration errors
#[derive(Debug)]
pub enum ConfigError {
    /// Config file could not be parsed
    ParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// A required value is missing
    MissingValue {
        key: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseFailed { path, source } => {
                write!(f, "failed to parse config ({}): {}", path, source)
            }
            ConfigError::MissingValue { key } => write!(f, "missing config value: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::ParseFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

// ========== Conversions from common error types ==========
// No manual From<AppError> for anyhow::Error is needed; anyhow already
// covers every type implementing std::error::Error.

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Transport(TransportError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

impl From<ExtractError> for AppError {
    fn from(err: ExtractError) -> Self {
        AppError::Extract(err)
    }
}

impl From<RenderError> for AppError {
    fn from(err: RenderError) -> Self {
        AppError::Render(err)
    }
}

impl From<TransportError> for AppError {
    fn from(err: TransportError) -> Self {
        AppError::Transport(err)
    }
}

// ========== Convenience constructors ==========

impl AppError {
    /// Transport request failure
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Transport(TransportError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }

    /// File write failure
    pub fn file_write_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }
}

impl RenderError {
    /// Backend failure carrying a human-readable message
    pub fn backend(message: impl Into<String>) -> Self {
        RenderError::Backend {
            message: message.into(),
        }
    }
}

// ========== Result type alias ==========

/// Application result type
pub type AppResult<T> = Result<T, AppError>;
