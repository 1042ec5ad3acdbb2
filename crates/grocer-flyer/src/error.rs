use thiserror::Error;

/// Errors returned by the flyer search client and response archive.
#[derive(Debug, Error)]
pub enum FlyerError {
    /// Network failure, TLS failure or non-2xx status from the backend.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured backend URL does not parse.
    #[error("invalid backend URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The response body is not the expected JSON shape.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// An archived response could not be read or written.
    #[error("archive I/O error at {path}: {source}")]
    ArchiveIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
