use thiserror::Error;

/// Errors returned by the grocery list parser.
#[derive(Debug, Error)]
pub enum ParserError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("OpenAI API error {status}: {body}")]
    Api { status: u16, body: String },

    /// The reply did not carry the expected function call.
    #[error("unexpected response from OpenAI: {0}")]
    UnexpectedResponse(String),

    /// The reply or the function arguments are not the expected JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// No API key is configured.
    #[error("OPENAI_API_KEY is not set")]
    MissingApiKey,

    /// The configured base URL does not parse.
    #[error("invalid OpenAI base URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}
