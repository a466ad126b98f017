use crate::envelope::SubError;

/// Errors produced by the dispatch layer.
///
/// The variants keep transport failures, protocol violations and
/// application-level API errors distinct; callers that only care about
/// "did it work" can match broadly, callers that map API codes to
/// messages (a presentation concern) match on [`Error::Api`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    /// The server answered with a non-2xx status before any envelope
    /// could be read.
    #[error("API returned status code {status}")]
    Status { status: u16 },

    /// The response body was not a well-formed envelope, or the envelope
    /// violated the success/error/data contract.
    #[error("malformed API response: {message}")]
    Protocol { message: String },

    /// A well-formed envelope reported `success: false`. The code is
    /// surfaced verbatim; interpreting it is left to the caller.
    #[error("API error code {code}")]
    Api { code: i32, errors: Vec<SubError> },

    /// API discovery succeeded but had no entry for the requested name.
    #[error("unknown API: {name}")]
    UnknownApi { name: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn protocol(message: impl Into<String>) -> Self {
        Error::Protocol {
            message: message.into(),
        }
    }

    /// The application-level error code, when this is an [`Error::Api`].
    pub fn api_code(&self) -> Option<i32> {
        match self {
            Error::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
