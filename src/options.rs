//! Configuration options for a conversion.
//!
//! - [`ConvertOptions`]: duplicate policy, charset and output layout
//!
//! ## Examples
//!
//! ```rust
//! use pipe2xml::ConvertOptions;
//!
//! let options = ConvertOptions::new()
//!     .with_allow_duplicate_info(true)
//!     .with_indent(4)
//!     .with_charset("iso-8859-1")
//!     .unwrap();
//! assert_eq!(options.charset().name(), "windows-1252");
//! ```
//!
//! Options can also be read from a JSON document, every key optional:
//!
//! ```rust
//! use pipe2xml::ConvertOptions;
//!
//! let json = r#"{"allow_duplicate_info": true, "root": "folk"}"#;
//! let options = ConvertOptions::from_json(json).unwrap();
//! assert!(options.allow_duplicate_info);
//! assert_eq!(options.root, "folk");
//! assert_eq!(options.indent, 2);
//! ```

use crate::error::{Error, Result};
use encoding_rs::{Encoding, UTF_8};
use serde::Deserialize;

/// Root element name used unless configured otherwise.
pub const DEFAULT_ROOT: &str = "people";

/// Configuration for a conversion.
///
/// The charset is validated when set, so it has a setter and getter instead
/// of a public field.
#[derive(Clone, Debug)]
pub struct ConvertOptions {
    /// When true, a second Address or Phone row replaces the first instead of failing.
    pub allow_duplicate_info: bool,
    /// Spaces per indentation level.
    pub indent: usize,
    /// Name of the document's root element.
    pub root: String,
    /// Write an `<?xml ...?>` declaration before the root element.
    pub declaration: bool,
    charset: &'static Encoding,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        ConvertOptions {
            allow_duplicate_info: false,
            indent: 2,
            root: DEFAULT_ROOT.to_string(),
            declaration: false,
            charset: UTF_8,
        }
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OptionsFile {
    allow_duplicate_info: Option<bool>,
    charset: Option<String>,
    indent: Option<usize>,
    root: Option<String>,
    declaration: Option<bool>,
}

impl ConvertOptions {
    /// Creates default options (duplicates rejected, UTF-8, 2-space indent, `<people>` root).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads options from a JSON object. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] for malformed JSON or unknown keys,
    /// [`Error::UnsupportedCharset`] for an unusable charset label.
    pub fn from_json(json: &str) -> Result<Self> {
        let file: OptionsFile = serde_json::from_str(json).map_err(Error::config)?;
        let mut options = ConvertOptions::default();

        if let Some(allow) = file.allow_duplicate_info {
            options.allow_duplicate_info = allow;
        }
        if let Some(indent) = file.indent {
            options.indent = indent;
        }
        if let Some(root) = file.root {
            options.root = root;
        }
        if let Some(declaration) = file.declaration {
            options.declaration = declaration;
        }
        if let Some(label) = file.charset {
            options = options.with_charset(&label)?;
        }
        options.validate()?;
        Ok(options)
    }

    #[must_use]
    pub fn with_allow_duplicate_info(mut self, allow: bool) -> Self {
        self.allow_duplicate_info = allow;
        self
    }

    /// Sets the number of spaces per indentation level.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    #[must_use]
    pub fn with_root(mut self, root: impl Into<String>) -> Self {
        self.root = root.into();
        self
    }

    #[must_use]
    pub fn with_declaration(mut self, declaration: bool) -> Self {
        self.declaration = declaration;
        self
    }

    /// Sets the charset by WHATWG label (`utf-8`, `latin1`, `windows-1252`, ...).
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedCharset`] if the label is unknown or names an
    /// encoding that is not ASCII-compatible (UTF-16, ISO-2022-JP); those
    /// cannot be split into lines on `\n` bytes.
    pub fn with_charset(self, label: &str) -> Result<Self> {
        let encoding = Encoding::for_label(label.trim().as_bytes())
            .ok_or_else(|| Error::UnsupportedCharset(label.to_string()))?;
        self.with_encoding(encoding)
    }

    /// Sets the charset directly.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedCharset`] for encodings that are not ASCII-compatible.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Result<Self> {
        if !encoding.is_ascii_compatible() {
            return Err(Error::UnsupportedCharset(encoding.name().to_string()));
        }
        self.charset = encoding;
        Ok(self)
    }

    /// The charset used to decode input and encode output.
    #[must_use]
    pub fn charset(&self) -> &'static Encoding {
        self.charset
    }

    /// Checks the fields that can be set directly.
    ///
    /// # Errors
    ///
    /// [`Error::Config`] if the root element name is not a usable XML name.
    pub fn validate(&self) -> Result<()> {
        if !crate::xml::is_valid_name(&self.root) {
            return Err(Error::config(format!(
                "'{}' is not a valid root element name",
                self.root
            )));
        }
        Ok(())
    }
}
