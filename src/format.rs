//! Input and Output Formats
//!
//! This module documents the line-record input and the XML output produced
//! by this library.
//!
//! # Input
//!
//! One record per line. The first character is the record type, the second
//! is always `|`, and the rest is a `|`-separated list of fields:
//!
//! | Type | Record | Fields |
//! |------|--------|--------|
//! | `P` | Person | `firstname`, `lastname` |
//! | `T` | Phone | `mobile`, `landline` |
//! | `A` | Address | `street`, `city`, `zip` |
//! | `F` | Family member | `firstname`, `born` |
//!
//! **Rules**:
//! - Lines of two characters or fewer are rejected
//! - Fields are trimmed; missing fields are simply absent, extra fields are ignored
//! - Empty fields at the end of a line count as missing
//! - Lines end in `\n`, `\r\n` or a lone `\r`
//!
//! ## Nesting
//!
//! Rows are not nested syntactically; structure comes from order:
//!
//! ```text
//! P|Elof|Sundin
//! T|073-101801|018-101801
//! A|S:t Johannesgatan 16|Uppsala|75330
//! F|Hans|1967
//! A|Frodegatan 13B|Uppsala|75325
//! F|Anna|1969
//! T|073-101802|08-101802
//! P|Boris|Johnson
//! A|10 Downing Street|London
//! ```
//!
//! - `T` and `A` belong to the latest `F` row after the latest `P` row, or to
//!   the `P` row itself when there is no such `F` row
//! - Every `P` and `F` row starts with no address and no phone; nothing is
//!   inherited from a previous family member
//! - A second `T` or `A` for the same individual is an error unless duplicates
//!   are allowed, in which case the later row wins
//! - `T`, `A` and `F` rows before the first `P` row are errors
//!
//! # Output
//!
//! The example above becomes:
//!
//! ```text
//! <people>
//!   <person>
//!     <firstname>Elof</firstname>
//!     <lastname>Sundin</lastname>
//!     <address>
//!       <street>S:t Johannesgatan 16</street>
//!       <city>Uppsala</city>
//!       <zip>75330</zip>
//!     </address>
//!     <phone>
//!       <mobile>073-101801</mobile>
//!       <landline>018-101801</landline>
//!     </phone>
//!     <family>
//!       <firstname>Hans</firstname>
//!       <born>1967</born>
//!       <address>
//!         <street>Frodegatan 13B</street>
//!         <city>Uppsala</city>
//!         <zip>75325</zip>
//!       </address>
//!     </family>
//!     <family>
//!       <firstname>Anna</firstname>
//!       <born>1969</born>
//!       <phone>
//!         <mobile>073-101802</mobile>
//!         <landline>08-101802</landline>
//!       </phone>
//!     </family>
//!   </person>
//!   <person>
//!     <firstname>Boris</firstname>
//!     <lastname>Johnson</lastname>
//!     <address>
//!       <street>10 Downing Street</street>
//!       <city>London</city>
//!     </address>
//!   </person>
//! </people>
//! ```
//!
//! Child order inside `<person>` is fixed: names, `<address>`, `<phone>`,
//! then the `<family>` elements in input order. Inside `<family>`: `firstname`,
//! `born`, `<address>`, `<phone>`.
//!
//! # Charsets
//!
//! Input is decoded and output encoded in one configurable charset (UTF-8 by
//! default). Any ASCII-compatible encoding known to `encoding_rs` works.
//! Characters the output charset cannot represent become numeric character
//! references such as `&#26481;`.
//!
//! # Limitations
//!
//! - **No escaping in input**: a `|` can never appear inside a field
//! - **No schema validation** of the output
//! - **Memory**: one person with all its family members is held at a time

// This module contains only documentation; no implementation code
