//! implementations of source code formatters for rendered output
//!

use crate::error::{Error, Result};

/// Pretty-prints a rendered source buffer before it reaches the sink.
///
/// The driver keeps the raw bytes when `format` fails so the malformed
/// output stays inspectable.
pub trait SourceFormatter {
    fn format(&self, source: &str) -> Result<String>;
}

/// A formatter that does not format any code
#[derive(Default)]
pub struct NullFormatter {}

impl SourceFormatter for NullFormatter {
    fn format(&self, source: &str) -> Result<String> {
        Ok(source.to_string())
    }
}

/// Format rendered Rust source in-process: parse with syn, print with
/// prettyplease. Parsing doubles as validation: text that is not a valid
/// Rust source file is a format error.
#[derive(Default)]
pub struct RustSourceFormatter {}

impl SourceFormatter for RustSourceFormatter {
    fn format(&self, source: &str) -> Result<String> {
        let file = syn::parse_file(source).map_err(|e| Error::Format(e.to_string()))?;
        Ok(prettyplease::unparse(&file))
    }
}
