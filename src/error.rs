//! Error types for row parsing and record assembly.
//!
//! Errors come in two layers:
//!
//! - [`FormatError`]: a problem with a single row, without position. Raised by
//!   [`Row::parse`](crate::Row::parse) and by the [`Assembler`](crate::Assembler).
//! - [`Error`]: the crate-level error. Format errors are wrapped together with
//!   the 1-based number of the line being processed when they occurred.
//!
//! ## Error Categories
//!
//! - **Structural**: malformed row (too short, missing separator, unknown
//!   type code) or a row appearing before any Person row
//! - **Duplicate**: a second Address or Phone for the same individual
//! - **I/O**: failures of the underlying reader or writer, passed through untouched
//! - **Configuration**: unknown charset or an invalid options document
//!
//! ## Examples
//!
//! ```rust
//! use pipe2xml::{convert_str, ConvertOptions};
//!
//! let err = convert_str("P|Elof|Sundin\nX|what", &ConvertOptions::default()).unwrap_err();
//! assert_eq!(err.line(), Some(2));
//! assert_eq!(err.to_string(), "Bad format on line 2: Unknown row type: X");
//! ```

use crate::row::RowKind;
use std::io;
use thiserror::Error;

/// A problem with a single input row.
///
/// Carries no position; the conversion driver attaches the line number when
/// it turns this into an [`Error::Format`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// Line shorter than the minimal `X|Y` row
    #[error("Line must have a minimum length of 3")]
    LineTooShort,

    /// Second character is not the field separator
    #[error("The second character must be '|', found '{found}'")]
    MissingSeparator { found: char },

    /// Type code outside P/T/A/F
    #[error("Unknown row type: {0}")]
    UnknownRowType(char),

    /// A T, A or F row with no Person open
    #[error("{0} row appeared before Person row")]
    RowBeforePerson(RowKind),

    /// A second Address or Phone for the same individual
    #[error("Duplicate error: {0} row cannot appear multiple times for the same person")]
    Duplicate(RowKind),
}

impl FormatError {
    /// Returns true for duplicate-association errors.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, FormatError::Duplicate(_))
    }

    /// Attaches the 1-based line number of the offending row.
    #[must_use]
    pub fn at_line(self, line: usize) -> Error {
        Error::Format { line, source: self }
    }
}

/// Represents all errors a conversion can fail with.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or misplaced row, with the line it was found on
    #[error("Bad format on line {line}: {source}")]
    Format {
        line: usize,
        #[source]
        source: FormatError,
    },

    /// IO error from the input reader or output writer
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Charset label that is unknown or cannot be used line by line
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    /// Invalid options document
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl Error {
    /// Creates a configuration error with a display message.
    pub fn config<T: std::fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Line number of a format error, `None` for every other kind.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pipe2xml::{FormatError, RowKind};
    ///
    /// let err = FormatError::Duplicate(RowKind::Phone).at_line(7);
    /// assert_eq!(err.line(), Some(7));
    /// ```
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Format { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Returns true if a second Address or Phone was rejected.
    #[must_use]
    pub fn is_duplicate(&self) -> bool {
        matches!(self, Error::Format { source, .. } if source.is_duplicate())
    }

    /// Returns true for malformed rows and out-of-order rows.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(self, Error::Format { source, .. } if !source.is_duplicate())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
