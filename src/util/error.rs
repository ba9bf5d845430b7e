// blazestd - util/error.rs
//
// Typed error hierarchy with context-preserving error chains.
// Every fallible runtime helper returns one of the subsystem errors below;
// `BlazeError` is the top-level type used by the launcher.

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Top-level error type for all blazestd operations.
#[derive(Debug)]
pub enum BlazeError {
    /// File helper failed.
    Fs(FsError),

    /// Format string could not be rendered.
    Format(FormatError),

    /// Console read or write failed.
    Console(ConsoleError),

    /// VM launcher could not build its banner.
    Vm(VmError),
}

impl fmt::Display for BlazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fs(e) => write!(f, "File error: {e}"),
            Self::Format(e) => write!(f, "Format error: {e}"),
            Self::Console(e) => write!(f, "Console error: {e}"),
            Self::Vm(e) => write!(f, "VM error: {e}"),
        }
    }
}

impl std::error::Error for BlazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Fs(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::Console(e) => Some(e),
            Self::Vm(e) => Some(e),
        }
    }
}

// ---------------------------------------------------------------------------
// File errors
// ---------------------------------------------------------------------------

/// Errors from the file helpers.
#[derive(Debug)]
pub enum FsError {
    /// The file could not be opened or read.
    Open { path: PathBuf, source: io::Error },

    /// The file could not be created, truncated, or written.
    Write { path: PathBuf, source: io::Error },

    /// The file could not be removed.
    Delete { path: PathBuf, source: io::Error },
}

impl FsError {
    /// Path the failing operation was applied to.
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Write { path, .. } | Self::Delete { path, .. } => path,
        }
    }

    /// Kind of the underlying OS error.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            Self::Open { source, .. }
            | Self::Write { source, .. }
            | Self::Delete { source, .. } => source.kind(),
        }
    }
}

impl fmt::Display for FsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Open { path, source } => {
                write!(f, "Cannot open '{}' for reading: {source}", path.display())
            }
            Self::Write { path, source } => {
                write!(f, "Cannot write '{}': {source}", path.display())
            }
            Self::Delete { path, source } => {
                write!(f, "Cannot delete '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Open { source, .. }
            | Self::Write { source, .. }
            | Self::Delete { source, .. } => Some(source),
        }
    }
}

impl From<FsError> for BlazeError {
    fn from(e: FsError) -> Self {
        Self::Fs(e)
    }
}

// ---------------------------------------------------------------------------
// Format errors
// ---------------------------------------------------------------------------

/// Errors raised while rendering a format string.
#[derive(Debug, Clone, PartialEq)]
pub enum FormatError {
    /// A directive needed an argument but the list was exhausted.
    MissingArgument { index: usize },

    /// The argument at `index` cannot be rendered by `conversion`.
    TypeMismatch {
        index: usize,
        conversion: char,
        found: &'static str,
    },
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument { index } => {
                write!(f, "missing argument #{index} for format directive")
            }
            Self::TypeMismatch {
                index,
                conversion,
                found,
            } => write!(
                f,
                "argument #{index} is {found}, which '%{conversion}' cannot format"
            ),
        }
    }
}

impl std::error::Error for FormatError {}

impl From<FormatError> for BlazeError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

// ---------------------------------------------------------------------------
// Console errors
// ---------------------------------------------------------------------------

/// Errors from console output and scanf-style input.
#[derive(Debug)]
pub enum ConsoleError {
    /// Input ended before a value could be read.
    Eof { expected: &'static str },

    /// The next input token is not a valid value of the expected kind.
    Parse {
        expected: &'static str,
        found: String,
    },

    /// Formatting the output failed.
    Format(FormatError),

    /// The value given to `exit` is not an `int` in status range.
    ExitCode { found: String },

    /// Reading or writing the stream failed.
    Io { operation: &'static str, source: io::Error },
}

impl fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eof { expected } => write!(f, "end of input while reading {expected}"),
            Self::Parse { expected, found } => {
                write!(f, "expected {expected}, found '{found}'")
            }
            Self::Format(e) => write!(f, "{e}"),
            Self::ExitCode { found } => write!(f, "invalid exit code '{found}'"),
            Self::Io { operation, source } => write!(f, "I/O error during {operation}: {source}"),
        }
    }
}

impl std::error::Error for ConsoleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Format(e) => Some(e),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<FormatError> for ConsoleError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<ConsoleError> for BlazeError {
    fn from(e: ConsoleError) -> Self {
        Self::Console(e)
    }
}

// ---------------------------------------------------------------------------
// VM errors
// ---------------------------------------------------------------------------

/// Errors from the VM launcher.
#[derive(Debug)]
pub enum VmError {
    /// A required environment variable is not set.
    MissingEnv { var: &'static str },

    /// An environment variable is set but is not valid Unicode.
    InvalidEnv { var: &'static str },

    /// The compiled file named on the command line could not be read.
    Source(FsError),

    /// Writing the banner failed.
    Io { source: io::Error },
}

impl fmt::Display for VmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingEnv { var } => {
                write!(f, "environment variable '{var}' is not set")
            }
            Self::InvalidEnv { var } => {
                write!(f, "environment variable '{var}' is not valid Unicode")
            }
            Self::Source(e) => write!(f, "{e}"),
            Self::Io { source } => write!(f, "failed to write banner: {source}"),
        }
    }
}

impl std::error::Error for VmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Source(e) => Some(e),
            Self::Io { source } => Some(source),
            _ => None,
        }
    }
}

impl From<VmError> for BlazeError {
    fn from(e: VmError) -> Self {
        Self::Vm(e)
    }
}

// ---------------------------------------------------------------------------
// Config errors
// ---------------------------------------------------------------------------

/// Errors related to configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    /// TOML parsing failed.
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// A config value is out of the allowed range.
    ValueOutOfRange {
        field: String,
        value: String,
        expected: String,
    },

    /// I/O error reading config file.
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TomlParse { path, source } => {
                write!(f, "Config parse error '{}': {source}", path.display())
            }
            Self::ValueOutOfRange {
                field,
                value,
                expected,
            } => write!(
                f,
                "Config '{field}' = '{value}' is out of range. Expected: {expected}"
            ),
            Self::Io { path, source } => {
                write!(f, "Config I/O error '{}': {source}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TomlParse { source, .. } => Some(source),
            Self::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for blazestd results.
pub type Result<T> = std::result::Result<T, BlazeError>;
