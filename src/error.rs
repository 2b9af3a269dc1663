use thiserror::Error;

/// Crate-wide result type alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the boundaries of the coalescence pipeline.
///
/// The numeric core (probability, candidate generation, selection, kinematics)
/// never fails; these variants cover configuration, event input, and output files.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid user or API parameter.
    #[error("invalid parameter: {0}")]
    InvalidParam(String),

    /// Malformed line in an event listing or an output file.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Configuration text that does not deserialize.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// Propagated I/O errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Error::Parse {
            line,
            message: message.into(),
        }
    }

    /// Attach a line number to a parse error; other variants pass through.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Error::Parse { message, .. } => Error::Parse { line, message },
            other => other,
        }
    }
}
