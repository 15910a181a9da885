//! Customizing the conversion with ConvertOptions.
//!
//! Run with: cargo run --example custom_options

use pipe2xml::{convert, convert_str, ConvertOptions};
use std::error::Error;
use std::io;

fn main() -> Result<(), Box<dyn Error>> {
    let input = "P|Elof|Sundin\nT|073-101801|018-101801\nT|070-555555|018-555555";

    // Default: a second phone for the same person is an error
    println!("Default:");
    match convert_str(input, &ConvertOptions::default()) {
        Ok(xml) => println!("{}", xml),
        Err(e) => println!("{}\n", e),
    }

    // Later rows replace earlier ones
    println!("Allowing duplicates:");
    let options = ConvertOptions::new().with_allow_duplicate_info(true);
    println!("{}", convert_str(input, &options)?);

    // Different layout: declaration, 4-space indent, own root name
    println!("Custom layout:");
    let options = ConvertOptions::new()
        .with_allow_duplicate_info(true)
        .with_declaration(true)
        .with_indent(4)
        .with_root("folk");
    println!("{}", convert_str(input, &options)?);

    // Latin-1 output straight to stdout
    println!("ISO-8859-1 to stdout:");
    let options = ConvertOptions::new().with_charset("iso-8859-1")?;
    let latin1: &[u8] = b"P|J\xF6rgen|\xC5berg\nA|G\xE4rdet|Ume\xE5";
    let summary = convert(latin1, io::stdout().lock(), &options)?;
    println!("({} persons from {} lines)", summary.persons, summary.lines);

    Ok(())
}
