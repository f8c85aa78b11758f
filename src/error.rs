/// Main error type for the library.
#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    /// Malformed pose log, calibration or name list. Carries the location when known.
    Parser(String),
    /// A dataset structure check failed.
    Assertion(String),
    /// Used when the user pass a logical invalid parameter to a function.
    InvalidParameter(String),
    /// A required file was not found by a search.
    NotFound(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::Io(err) => write!(f, "IO error: {err}"),
            Error::Parser(err) => write!(f, "Parser error: {err}"),
            Error::Assertion(err) => write!(f, "Assertion error: {err}"),
            Error::InvalidParameter(err) => write!(f, "Parameter error: {err}"),
            Error::NotFound(err) => write!(f, "Not found: {err}"),
        }
    }
}

impl Error {
    /// Create a error with the kind `InvalidParameter`.
    /// # Arguments
    /// * `msg` - The error message.
    pub fn invalid_parameter<T: ToString>(msg: T) -> Self {
        Error::InvalidParameter(msg.to_string())
    }

    pub fn parser<T: ToString>(msg: T) -> Self {
        Error::Parser(msg.to_string())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            Error::Parser(_) => None,
            Error::Assertion(_) => None,
            Error::InvalidParameter(_) => None,
            Error::NotFound(_) => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parser(err.to_string())
    }
}

impl From<glob::PatternError> for Error {
    fn from(err: glob::PatternError) -> Self {
        Error::Parser(err.to_string())
    }
}

impl From<glob::GlobError> for Error {
    fn from(err: glob::GlobError) -> Self {
        Error::Io(err.into_error())
    }
}
