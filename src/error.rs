/// Crate-level error types for lolspan.
use std::path::PathBuf;

/// Classification itself never fails on malformed input; every variant here
/// comes from the host side (files, config, output) or from a cancelled request.
#[allow(clippy::error_impl_error, reason = "crate-level error type shared by lib and binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller's cancellation token fired between line scans.
    #[error("classification cancelled")]
    Cancelled,

    /// A config file named on the command line does not exist on disk.
    #[error("config not found: {}", path.display())]
    ConfigNotFound {
        /// Path to the missing config file.
        path: PathBuf,
    },

    /// A source file or directory named on the command line does not exist.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path to the missing file.
        path: PathBuf,
    },

    /// Underlying I/O error from the filesystem.
    #[error("io: {0}")]
    Io(
        /// The wrapped I/O error.
        #[from]
        std::io::Error,
    ),

    /// JSON serialization of spans or the legend failed.
    #[error("json: {0}")]
    Json(
        /// The wrapped JSON error.
        #[from]
        serde_json::Error,
    ),

    /// TOML deserialization failed.
    #[error("toml deserialize: {0}")]
    TomlDe(
        /// The wrapped TOML deserialization error.
        #[from]
        toml::de::Error,
    ),

    /// A file was named explicitly but its extension is not a configured source extension.
    #[error("not a LOLCODE source file (.{ext}): {}", path.display())]
    UnsupportedFile {
        /// File extension without the leading dot, empty when there is none.
        ext: String,
        /// The offending file.
        path: PathBuf,
    },

    /// The filesystem watcher could not be created.
    #[error("watcher setup failed: {reason}")]
    WatchFailed {
        /// Description of the watcher failure.
        reason: String,
    },
}
