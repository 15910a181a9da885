//! Property-based tests for the lexer and the assembler
//!
//! Inputs are generated from the four row types with field text that never
//! contains the separator or a line break.

use pipe2xml::{convert_str, ConvertOptions, Row};
use proptest::prelude::*;

fn field() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 .:&<>-]{0,12}"
}

fn padded_field() -> impl Strategy<Value = (String, String, String)> {
    (" {0,3}", "[A-Za-z0-9][A-Za-z0-9 ]{0,8}[A-Za-z0-9]", "[ \t]{0,3}")
}

/// One non-person row.
fn detail_row() -> impl Strategy<Value = String> {
    (prop_oneof![Just('T'), Just('A'), Just('F')], prop::collection::vec(field(), 1..4))
        .prop_map(|(tag, fields)| format!("{}| {}", tag, fields.join("|")))
}

/// A person row followed by details, with at most one T and one A per individual.
fn person_block() -> impl Strategy<Value = Vec<String>> {
    (field(), prop::collection::vec(detail_row(), 0..8)).prop_map(|(name, details)| {
        let mut lines = vec![format!("P|x{}", name)];
        let (mut phone, mut address) = (false, false);
        for row in details {
            match row.as_bytes()[0] {
                b'F' => {
                    phone = false;
                    address = false;
                }
                b'T' if phone => continue,
                b'T' => phone = true,
                b'A' if address => continue,
                b'A' => address = true,
                _ => {}
            }
            lines.push(row);
        }
        lines
    })
}

/// Whether every open tag in `xml` is closed in order. Text is escaped, so
/// each raw `<` starts a tag.
fn tags_balanced(xml: &str) -> bool {
    let mut open: Vec<&str> = Vec::new();
    let mut rest = xml;
    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            return false;
        };
        let tag = &rest[start + 1..start + len];
        rest = &rest[start + len + 1..];

        if tag.starts_with('?') || tag.ends_with('/') {
            continue;
        }
        if let Some(name) = tag.strip_prefix('/') {
            if open.pop() != Some(name) {
                return false;
            }
        } else {
            open.push(tag);
        }
    }
    open.is_empty()
}

proptest! {
    #[test]
    fn prop_fields_are_trimmed((lead, value, tail) in padded_field()) {
        let row = Row::parse(&format!("P|{}{}{}|x", lead, value, tail)).unwrap();
        prop_assert_eq!(row.field(0), Some(value.as_str()));
    }

    #[test]
    fn prop_field_count_never_exceeds_pieces(fields in prop::collection::vec(field(), 1..6)) {
        let line = format!("A| {}", fields.join("|"));
        let row = Row::parse(&line).unwrap();
        prop_assert!(row.fields().len() <= fields.len());
        for (i, expected) in fields.iter().enumerate().take(row.fields().len()) {
            prop_assert_eq!(row.field(i), Some(expected.trim()));
        }
    }

    #[test]
    fn prop_one_person_element_per_p_row(blocks in prop::collection::vec(person_block(), 0..6)) {
        let input = blocks.concat().join("\n");
        let xml = convert_str(&input, &ConvertOptions::default()).unwrap();

        prop_assert!(xml.starts_with("<people>\n"));
        prop_assert!(xml.ends_with("</people>\n"));
        prop_assert_eq!(xml.matches("<person>").count(), blocks.len());
        prop_assert_eq!(xml.matches("</person>").count(), blocks.len());
        prop_assert!(tags_balanced(&xml), "unbalanced tags in:\n{}", xml);
    }

    #[test]
    fn prop_output_is_deterministic(block in person_block()) {
        let input = block.join("\n");
        let first = convert_str(&input, &ConvertOptions::default()).unwrap();
        let second = convert_str(&input, &ConvertOptions::default()).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_duplicates_tolerated_when_allowed(rows in prop::collection::vec(detail_row(), 0..12)) {
        let input = std::iter::once("P|Someone".to_string())
            .chain(rows)
            .collect::<Vec<_>>()
            .join("\n");
        let options = ConvertOptions::new().with_allow_duplicate_info(true);
        prop_assert!(convert_str(&input, &options).is_ok());
    }
}
