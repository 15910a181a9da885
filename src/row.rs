//! Row lexing.
//!
//! A row is one line of input: a single type character, the `|` separator,
//! and any number of further `|`-separated fields.
//!
//! ```rust
//! use pipe2xml::Row;
//!
//! let row = Row::parse("A| Frodegatan 13B |Uppsala|75325").unwrap();
//! assert_eq!(row.tag(), 'A');
//! assert_eq!(row.field(0), Some("Frodegatan 13B"));
//! assert_eq!(row.field(2), Some("75325"));
//! assert_eq!(row.field(3), None);
//! ```

use crate::error::FormatError;
use std::fmt;

/// Field separator inside a row.
pub const SEPARATOR: char = '|';

/// The four row types the assembler understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RowKind {
    Person,
    FamilyMember,
    Phone,
    Address,
}

impl RowKind {
    /// Maps a type character to a row kind.
    #[must_use]
    pub const fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'P' => Some(RowKind::Person),
            'F' => Some(RowKind::FamilyMember),
            'T' => Some(RowKind::Phone),
            'A' => Some(RowKind::Address),
            _ => None,
        }
    }

    #[must_use]
    pub const fn tag(self) -> char {
        match self {
            RowKind::Person => 'P',
            RowKind::FamilyMember => 'F',
            RowKind::Phone => 'T',
            RowKind::Address => 'A',
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RowKind::Person => "Person",
            RowKind::FamilyMember => "FamilyMember",
            RowKind::Phone => "Phone",
            RowKind::Address => "Address",
        }
    }
}

impl fmt::Display for RowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One lexed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    tag: char,
    fields: Vec<String>,
}

impl Row {
    /// Lexes a line (without its terminator) into a row.
    ///
    /// The type character is taken as-is; deciding whether it is a known
    /// record type is left to the assembler. Fields are trimmed. Empty
    /// fields at the end of the line are dropped, so `P|Elof|` has a single
    /// field while `P||Sundin` has an empty first name.
    ///
    /// # Errors
    ///
    /// [`FormatError::LineTooShort`] for lines of two characters or fewer,
    /// [`FormatError::MissingSeparator`] when the second character is not `|`.
    pub fn parse(line: &str) -> Result<Self, FormatError> {
        let mut chars = line.chars();
        let (tag, separator) = match (chars.next(), chars.next(), chars.next()) {
            (Some(tag), Some(separator), Some(_)) => (tag, separator),
            _ => return Err(FormatError::LineTooShort),
        };
        if separator != SEPARATOR {
            return Err(FormatError::MissingSeparator { found: separator });
        }

        let rest = &line[tag.len_utf8() + SEPARATOR.len_utf8()..];
        let mut pieces: Vec<&str> = rest.split(SEPARATOR).collect();
        while pieces.last().is_some_and(|piece| piece.is_empty()) {
            pieces.pop();
        }

        Ok(Row {
            tag,
            fields: pieces.into_iter().map(|p| p.trim().to_string()).collect(),
        })
    }

    /// The raw type character.
    #[must_use]
    pub fn tag(&self) -> char {
        self.tag
    }

    /// The row kind, if the type character is one of P/F/T/A.
    #[must_use]
    pub fn kind(&self) -> Option<RowKind> {
        RowKind::from_tag(self.tag)
    }

    /// Field at `index`, or `None` when the row is shorter.
    #[must_use]
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Owned copy of the field at `index`.
    #[must_use]
    pub fn field_owned(&self, index: usize) -> Option<String> {
        self.field(index).map(str::to_string)
    }

    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}
