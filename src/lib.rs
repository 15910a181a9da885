//! # pipe2xml
//!
//! A streaming converter from pipe-delimited person records to nested XML.
//!
//! ## What does it convert?
//!
//! Input is a flat list of lines, one record per line: persons (`P`), their
//! phones (`T`), addresses (`A`) and family members (`F`). The order of the
//! lines decides what belongs to whom. Output is an XML document with one
//! `<person>` element per `P` line. See [`format`] for the details.
//!
//! ## Key Features
//!
//! - **Streaming**: each person is written as soon as it is complete; memory
//!   holds one person at a time
//! - **Precise errors**: every format error names the line it was found on
//! - **Duplicate policy**: reject or overwrite a second address/phone
//! - **Charsets**: any ASCII-compatible encoding, for input and output alike
//!
//! ## Quick Start
//!
//! ```rust
//! use pipe2xml::{convert_str, ConvertOptions};
//!
//! let input = "P|Elof|Sundin\nT|073-101801|018-101801";
//! let xml = convert_str(input, &ConvertOptions::default()).unwrap();
//! assert_eq!(
//!     xml,
//!     "<people>\n  <person>\n    <firstname>Elof</firstname>\n    <lastname>Sundin</lastname>\n    <phone>\n      <mobile>073-101801</mobile>\n      <landline>018-101801</landline>\n    </phone>\n  </person>\n</people>\n"
//! );
//! ```
//!
//! ### Readers and writers
//!
//! ```rust
//! use pipe2xml::{convert, ConvertOptions};
//! use std::io::Cursor;
//!
//! let input = Cursor::new("P|Boris|Johnson\nA|10 Downing Street|London\n");
//! let mut output = Vec::new();
//! let summary = convert(input, &mut output, &ConvertOptions::default()).unwrap();
//! assert_eq!(summary.persons, 1);
//! assert_eq!(summary.lines, 2);
//! ```
//!
//! ### Errors
//!
//! ```rust
//! use pipe2xml::{convert_str, ConvertOptions};
//!
//! let err = convert_str("T|073-101801", &ConvertOptions::default()).unwrap_err();
//! assert_eq!(err.to_string(), "Bad format on line 1: Phone row appeared before Person row");
//! ```

pub mod assembler;
pub mod error;
pub mod format;
pub mod model;
pub mod options;
pub mod row;
pub mod source;
pub mod xml;

pub use assembler::{Assembler, Summary};
pub use error::{Error, FormatError, Result};
pub use model::{Address, Contact, FamilyMember, Person, Phone};
pub use options::ConvertOptions;
pub use row::{Row, RowKind};
pub use source::Lines;
pub use xml::XmlElement;

use std::io;

/// Sample input used by the command line tool when no input file is given.
pub const SAMPLE_INPUT: &str = "P|Elof|Sundin\r\n\
T|073-101801|018-101801\r\n\
A|S:t Johannesgatan 16|Uppsala|75330\r\n\
F|Hans|1967\r\n\
A|Frodegatan 13B|Uppsala|75325\r\n\
F|Anna|1969\r\n\
T|073-101802|08-101802\r\n\
P|Boris|Johnson\r\n\
A|10 Downing Street|London";

/// Convert line records read from `reader` into XML written to `writer`.
///
/// The reader is consumed line by line and each person is written as soon
/// as it is complete. Neither side is closed; the writer is flushed at the
/// end.
///
/// # Errors
///
/// Stops at the first problem. Format errors carry the line number; I/O
/// errors from either side are returned unchanged. Whatever was written
/// before the error stays in the writer, without the closing root tag.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn convert<R, W>(reader: R, writer: W, options: &ConvertOptions) -> Result<Summary>
where
    R: io::Read,
    W: io::Write,
{
    run(Lines::new(io::BufReader::new(reader), options.charset()), writer, options)
}

/// Convert line records held in a string, returning the XML document.
///
/// The input is read as it is; the charset only applies to the output,
/// which is written in it and decoded back. Characters the charset cannot
/// represent come back as numeric character references.
///
/// # Examples
///
/// ```rust
/// use pipe2xml::{convert_str, ConvertOptions};
///
/// let options = ConvertOptions::new().with_allow_duplicate_info(true);
/// let xml = convert_str("P|Elof\nT|1\nT|2", &options).unwrap();
/// assert!(xml.contains("<mobile>2</mobile>"));
/// assert!(!xml.contains("<mobile>1</mobile>"));
/// ```
///
/// # Errors
///
/// Same as [`convert`], minus I/O errors.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn convert_str(input: &str, options: &ConvertOptions) -> Result<String> {
    let mut output = Vec::with_capacity(input.len() * 2);
    run(Lines::new(input.as_bytes(), encoding_rs::UTF_8), &mut output, options)?;

    let (text, _) = options.charset().decode_without_bom_handling(&output);
    Ok(text.into_owned())
}

fn run<R, W>(lines: Lines<R>, writer: W, options: &ConvertOptions) -> Result<Summary>
where
    R: io::BufRead,
    W: io::Write,
{
    let mut assembler = Assembler::new(writer, options);
    assembler.start()?;

    for line in lines {
        assembler.push_line(&line?)?;
    }

    assembler.finish()
}
