use thiserror::Error;

/// Stands in for a known option that failed to scan, like getopt's `'?'`.
pub const ERROR_MARKER: &str = "-?";

/// Errors produced while parsing option specs or scanning argv.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A long option spec entry is not `NAME`, `NAME:` or `NAME::`.
    #[error("invalid long option entry '{entry}' at index [{position}]: '{spec}'")]
    InvalidSpec {
        entry: String,
        position: usize,
        spec: String,
    },

    #[error("unrecognized option '{0}'")]
    UnrecognizedOption(String),

    #[error("option '{option}' is ambiguous; possibilities: {}", .candidates.join(" "))]
    AmbiguousOption {
        option: String,
        candidates: Vec<String>,
    },

    #[error("option '{0}' requires an argument")]
    MissingArgument(String),

    #[error("option '{0}' doesn't allow an argument")]
    UnexpectedArgument(String),
}

impl Error {
    /// The token written into a pass-through stream for this error.
    ///
    /// An unknown flag is kept as typed. Errors on a known option become
    /// [`ERROR_MARKER`], since the option itself would read as a valid flag
    /// whose argument is missing or was dropped. `None` for spec errors,
    /// which never reach the scanner.
    pub fn pass_through(&self) -> Option<&str> {
        match self {
            Self::InvalidSpec { .. } => None,
            Self::UnrecognizedOption(flag) => Some(flag),
            Self::AmbiguousOption { .. }
            | Self::MissingArgument(_)
            | Self::UnexpectedArgument(_) => Some(ERROR_MARKER),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
