//! Convert a handful of records and print the XML.
//!
//! Run with: cargo run --example simple

use pipe2xml::{convert_str, ConvertOptions};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    let input = "\
P|Elof|Sundin
T|073-101801|018-101801
A|S:t Johannesgatan 16|Uppsala|75330
F|Hans|1967
A|Frodegatan 13B|Uppsala|75325
F|Anna|1969
T|073-101802|08-101802
P|Boris|Johnson
A|10 Downing Street|London";

    let xml = convert_str(input, &ConvertOptions::default())?;
    println!("{}", xml);

    // A phone row before any person is rejected with its line number
    match convert_str("T|073-101801|018-101801", &ConvertOptions::default()) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("{}", e),
    }

    Ok(())
}
