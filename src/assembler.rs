//! Record assembly.
//!
//! The [`Assembler`] consumes rows one at a time, builds the current
//! [`Person`] with its family, addresses and phones, and writes each person
//! to the sink as soon as the next `P` row (or the end of input) shows that
//! nothing more can be attached to it.
//!
//! ## Usage
//!
//! Most users should call [`convert`](crate::convert) or
//! [`convert_str`](crate::convert_str). Driving the assembler directly:
//!
//! ```rust
//! use pipe2xml::{Assembler, ConvertOptions};
//!
//! let mut out = Vec::new();
//! let mut assembler = Assembler::new(&mut out, &ConvertOptions::default());
//! assembler.push_line("P|Boris|Johnson").unwrap();
//! assembler.push_line("A|10 Downing Street|London").unwrap();
//! let summary = assembler.finish().unwrap();
//!
//! assert_eq!(summary.persons, 1);
//! assert!(String::from_utf8(out).unwrap().ends_with("  </person>\n</people>\n"));
//! ```
//!
//! ## Attachment rules
//!
//! - `F` rows attach to the open person and become the target of following
//!   `T`/`A` rows.
//! - `T`/`A` rows attach to the most recent family member since the last `P`
//!   row, or to the person if there is none.
//! - Each individual gets at most one phone and one address. A second one is
//!   a [`FormatError::Duplicate`] unless
//!   [`allow_duplicate_info`](ConvertOptions::allow_duplicate_info) is set, in
//!   which case it replaces the first.

use crate::error::{FormatError, Result};
use crate::model::{Address, Contact, FamilyMember, Person, Phone};
use crate::options::ConvertOptions;
use crate::row::{Row, RowKind};
use crate::xml::write_encoded;
use std::io::Write;
use std::mem;

/// Indentation level persons are written at, inside the root element.
const PERSON_LEVEL: usize = 1;

/// Counts reported once a conversion has finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Lines processed, including blank or rejected ones.
    pub lines: usize,
    /// `<person>` elements written.
    pub persons: usize,
}

/// Which individual `T` and `A` rows currently attach to.
///
/// `Family` always holds a person with at least one family member; the
/// target is the last one.
#[derive(Debug, Default)]
enum Cursor {
    #[default]
    Idle,
    Person(Person),
    Family(Person),
}

impl Cursor {
    fn into_person(self) -> Option<Person> {
        match self {
            Cursor::Idle => None,
            Cursor::Person(person) | Cursor::Family(person) => Some(person),
        }
    }

    fn target(&mut self) -> Option<&mut Contact> {
        match self {
            Cursor::Idle => None,
            Cursor::Person(person) => Some(&mut person.contact),
            Cursor::Family(person) => person.family.last_mut().map(|member| &mut member.contact),
        }
    }
}

/// Streaming state machine turning rows into `<person>` elements.
///
/// One assembler serves one conversion. The root open tag is written before
/// the first row is handled, the root close tag by [`Assembler::finish`]. On
/// error the sink keeps whatever was already written and never gets the
/// closing tag.
pub struct Assembler<W: Write> {
    sink: W,
    options: ConvertOptions,
    cursor: Cursor,
    started: bool,
    summary: Summary,
}

impl<W: Write> Assembler<W> {
    pub fn new(sink: W, options: &ConvertOptions) -> Self {
        Assembler {
            sink,
            options: options.clone(),
            cursor: Cursor::Idle,
            started: false,
            summary: Summary::default(),
        }
    }

    /// Writes the optional XML declaration and the root open tag.
    ///
    /// Called implicitly by the first row or by [`Assembler::finish`];
    /// calling it again does nothing.
    ///
    /// # Errors
    ///
    /// [`Error::Config`](crate::Error::Config) for an invalid root name, or any
    /// sink error.
    pub fn start(&mut self) -> Result<()> {
        if self.started {
            return Ok(());
        }
        self.options.validate()?;

        let charset = self.options.charset();
        let mut header = String::new();
        if self.options.declaration {
            header.push_str(&format!(
                "<?xml version=\"1.0\" encoding=\"{}\"?>\n",
                charset.name()
            ));
        }
        header.push_str(&format!("<{}>\n", self.options.root));
        write_encoded(&mut self.sink, charset, &header)?;

        self.started = true;
        Ok(())
    }

    /// Lexes and applies one input line.
    ///
    /// # Errors
    ///
    /// Format errors carry the 1-based number of this line. Sink errors are
    /// passed through.
    pub fn push_line(&mut self, line: &str) -> Result<()> {
        self.start()?;
        self.summary.lines += 1;
        let row = Row::parse(line).map_err(|e| e.at_line(self.summary.lines))?;
        self.apply(&row)
    }

    /// Applies an already lexed row; it still counts as one line.
    ///
    /// # Errors
    ///
    /// Same as [`Assembler::push_line`].
    pub fn push_row(&mut self, row: &Row) -> Result<()> {
        self.start()?;
        self.summary.lines += 1;
        self.apply(row)
    }

    /// Flushes the open person, closes the root element and flushes the sink.
    ///
    /// # Errors
    ///
    /// Any sink error.
    pub fn finish(mut self) -> Result<Summary> {
        self.start()?;
        if let Some(person) = mem::take(&mut self.cursor).into_person() {
            self.emit(&person)?;
        }

        let footer = format!("</{}>\n", self.options.root);
        write_encoded(&mut self.sink, self.options.charset(), &footer)?;
        self.sink.flush()?;

        log::debug!(
            "Finished after {} lines, {} persons written",
            self.summary.lines,
            self.summary.persons
        );
        Ok(self.summary)
    }

    /// Progress so far.
    #[must_use]
    pub fn summary(&self) -> Summary {
        self.summary
    }

    fn apply(&mut self, row: &Row) -> Result<()> {
        let line = self.summary.lines;
        let kind = row
            .kind()
            .ok_or_else(|| FormatError::UnknownRowType(row.tag()).at_line(line))?;

        match kind {
            RowKind::Person => {
                if let Some(done) = mem::take(&mut self.cursor).into_person() {
                    self.emit(&done)?;
                }
                self.cursor = Cursor::Person(Person::from_row(row));
            }
            RowKind::FamilyMember => match mem::take(&mut self.cursor) {
                Cursor::Idle => return Err(FormatError::RowBeforePerson(kind).at_line(line)),
                Cursor::Person(mut person) | Cursor::Family(mut person) => {
                    person.family.push(FamilyMember::from_row(row));
                    self.cursor = Cursor::Family(person);
                }
            },
            RowKind::Phone => {
                let phone = Phone::from_row(row);
                let allow = self.options.allow_duplicate_info;
                let slot = &mut self.contact(kind, line)?.phone;
                Self::attach(slot, phone, kind, line, allow)?;
            }
            RowKind::Address => {
                let address = Address::from_row(row);
                let allow = self.options.allow_duplicate_info;
                let slot = &mut self.contact(kind, line)?.address;
                Self::attach(slot, address, kind, line, allow)?;
            }
        }
        Ok(())
    }

    fn contact(&mut self, kind: RowKind, line: usize) -> Result<&mut Contact> {
        self.cursor
            .target()
            .ok_or_else(|| FormatError::RowBeforePerson(kind).at_line(line))
    }

    fn attach<T>(
        slot: &mut Option<T>,
        value: T,
        kind: RowKind,
        line: usize,
        allow: bool,
    ) -> Result<()> {
        if slot.is_some() {
            if !allow {
                return Err(FormatError::Duplicate(kind).at_line(line));
            }
            log::debug!("Line {}: replacing earlier {} row", line, kind);
        }
        *slot = Some(value);
        Ok(())
    }

    fn emit(&mut self, person: &Person) -> Result<()> {
        person.to_xml().write(
            &mut self.sink,
            self.options.charset(),
            PERSON_LEVEL,
            self.options.indent,
        )?;
        self.summary.persons += 1;
        log::trace!("Wrote person #{}", self.summary.persons);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn run(lines: &[&str], options: &ConvertOptions) -> (Result<Summary>, String) {
        let mut out = Vec::new();
        let result = (|| {
            let mut assembler = Assembler::new(&mut out, options);
            for line in lines {
                assembler.push_line(line)?;
            }
            assembler.finish()
        })();
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_empty_input_writes_root_only() {
        let (result, out) = run(&[], &ConvertOptions::default());
        assert_eq!(result.unwrap(), Summary { lines: 0, persons: 0 });
        assert_eq!(out, "<people>\n</people>\n");
    }

    #[test]
    fn test_single_person_flushed_at_end() {
        let (result, out) = run(&["P|Elof|Sundin"], &ConvertOptions::default());
        assert_eq!(result.unwrap().persons, 1);
        assert_eq!(
            out,
            "<people>\n  <person>\n    <firstname>Elof</firstname>\n    <lastname>Sundin</lastname>\n  </person>\n</people>\n"
        );
    }

    #[test]
    fn test_person_written_when_next_person_starts() {
        let mut out = Vec::new();
        let mut assembler = Assembler::new(&mut out, &ConvertOptions::default());
        assembler.push_line("P|Elof|Sundin").unwrap();
        assert_eq!(assembler.summary().persons, 0);
        assembler.push_line("P|Boris|Johnson").unwrap();
        assert_eq!(assembler.summary().persons, 1);
        assembler.finish().unwrap();
    }

    #[test]
    fn test_family_member_becomes_target() {
        let mut assembler = Assembler::new(Vec::new(), &ConvertOptions::default());
        for line in [
            "P|Elof|Sundin",
            "A|S:t Johannesgatan 16|Uppsala|75330",
            "F|Hans|1967",
            "A|Frodegatan 13B|Uppsala|75325",
            "F|Anna|1969",
        ] {
            assembler.push_line(line).unwrap();
        }

        let person = match &assembler.cursor {
            Cursor::Family(person) => person,
            other => panic!("expected family cursor, got {:?}", other),
        };
        assert_eq!(
            person.contact.address.as_ref().and_then(|a| a.street.as_deref()),
            Some("S:t Johannesgatan 16")
        );
        assert_eq!(
            person.family[0].contact.address.as_ref().and_then(|a| a.street.as_deref()),
            Some("Frodegatan 13B")
        );
        assert!(person.family[1].contact.address.is_none());
    }

    #[test]
    fn test_duplicate_phone_rejected() {
        let (result, out) = run(
            &["P|Elof|Sundin", "T|1|2", "T|3|4"],
            &ConvertOptions::default(),
        );
        let err = result.unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(err.line(), Some(3));
        assert_eq!(out, "<people>\n");
    }

    #[test]
    fn test_duplicate_phone_replaced_when_allowed() {
        let options = ConvertOptions::new().with_allow_duplicate_info(true);
        let (result, out) = run(&["P|Elof|Sundin", "T|1|2", "T|3"], &options);
        result.unwrap();
        assert!(out.contains("<mobile>3</mobile>"));
        assert!(!out.contains("<mobile>1</mobile>"));
        assert!(!out.contains("<landline>"));
    }

    #[test]
    fn test_same_kind_on_different_individuals_is_fine() {
        let (result, _) = run(
            &["P|Elof|Sundin", "T|1|2", "F|Hans|1967", "T|3|4", "F|Anna", "T|5|6"],
            &ConvertOptions::default(),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_duplicate_address_on_family_member() {
        let (result, _) = run(
            &["P|Elof|Sundin", "F|Hans", "A|x", "A|y"],
            &ConvertOptions::default(),
        );
        let err = result.unwrap_err();
        assert!(matches!(
            err,
            Error::Format { line: 4, source: FormatError::Duplicate(RowKind::Address) }
        ));
    }

    #[test]
    fn test_rows_before_person() {
        for (line, kind) in [
            ("T|073-101801", RowKind::Phone),
            ("A|Street", RowKind::Address),
            ("F|Hans", RowKind::FamilyMember),
        ] {
            let (result, out) = run(&[line], &ConvertOptions::default());
            match result.unwrap_err() {
                Error::Format { line: 1, source } => {
                    assert_eq!(source, FormatError::RowBeforePerson(kind))
                }
                other => panic!("unexpected error: {}", other),
            }
            assert_eq!(out, "<people>\n");
        }
    }

    #[test]
    fn test_unknown_row_type() {
        let (result, _) = run(&["P|Elof", "Q|x"], &ConvertOptions::default());
        assert_eq!(
            result.unwrap_err().to_string(),
            "Bad format on line 2: Unknown row type: Q"
        );
    }

    #[test]
    fn test_error_keeps_flushed_prefix() {
        let (result, out) = run(
            &["P|Elof|Sundin", "P|Boris|Johnson", "broken"],
            &ConvertOptions::default(),
        );
        assert_eq!(result.unwrap_err().line(), Some(3));
        assert!(out.contains("<firstname>Elof</firstname>"));
        assert!(!out.contains("Boris"));
        assert!(!out.contains("</people>"));
    }

    #[test]
    fn test_declaration_and_root() {
        let options = ConvertOptions::new()
            .with_declaration(true)
            .with_root("folk")
            .with_indent(0);
        let (result, out) = run(&["P|Elof"], &options);
        result.unwrap();
        assert_eq!(
            out,
            "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<folk>\n<person>\n<firstname>Elof</firstname>\n</person>\n</folk>\n"
        );
    }

    #[test]
    fn test_invalid_root_fails_before_writing() {
        let options = ConvertOptions::new().with_root("no good");
        let (result, out) = run(&["P|Elof"], &options);
        assert!(matches!(result, Err(Error::Config(_))));
        assert!(out.is_empty());
    }

    #[test]
    fn test_push_row_counts_lines() {
        let mut assembler = Assembler::new(Vec::new(), &ConvertOptions::default());
        assembler.push_row(&Row::parse("P|Elof").unwrap()).unwrap();
        let err = assembler
            .push_row(&Row::parse("Z|Elof").unwrap())
            .unwrap_err();
        assert_eq!(err.line(), Some(2));
    }
}
