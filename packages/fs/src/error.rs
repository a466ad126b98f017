use std::io;

/// Errors from the filesystem view.
///
/// Remote API failure codes and absent/unaugmented records both collapse
/// into [`Error::NotFound`], so generic filesystem consumers can handle
/// missing entries without knowing about DSM error codes. Transport and
/// protocol failures pass through as [`Error::Client`].
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("file does not exist: {path}")]
    NotFound { path: String },

    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    #[error("invalid mount root: {message}")]
    InvalidRoot { message: String },

    #[error(transparent)]
    Client(#[from] syno_api::Error),
}

impl Error {
    /// Collapse a remote API failure into the not-found signal for
    /// `path`; other errors pass through untouched.
    pub(crate) fn not_found_on_api_code(err: syno_api::Error, path: &str) -> Self {
        match err {
            syno_api::Error::Api { .. } => Error::NotFound {
                path: path.to_string(),
            },
            other => Error::Client(other),
        }
    }
}

impl From<Error> for io::Error {
    fn from(error: Error) -> Self {
        let kind = match &error {
            Error::NotFound { .. } => io::ErrorKind::NotFound,
            Error::NotADirectory { .. } => io::ErrorKind::NotADirectory,
            _ => io::ErrorKind::Other,
        };
        io::Error::new(kind, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_code_collapses_to_not_found() {
        let api_err = syno_api::Error::Api {
            code: 408,
            errors: Vec::new(),
        };
        let err = Error::not_found_on_api_code(api_err, "/home/gone");
        assert!(matches!(err, Error::NotFound { path } if path == "/home/gone"));
    }

    #[test]
    fn transport_errors_pass_through() {
        let api_err = syno_api::Error::Status { status: 502 };
        let err = Error::not_found_on_api_code(api_err, "/home");
        assert!(matches!(
            err,
            Error::Client(syno_api::Error::Status { status: 502 })
        ));
    }

    #[test]
    fn io_conversion_keeps_not_found_kind() {
        let err = Error::NotFound {
            path: "/x".to_string(),
        };
        let io_err: io::Error = err.into();
        assert_eq!(io_err.kind(), io::ErrorKind::NotFound);
    }
}
