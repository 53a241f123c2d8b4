// SPDX-License-Identifier: (MIT OR Apache-2.0)
//! Type text entry point.
//!
//! Placeholder types are printed for humans but never read back: the only
//! producers are this crate's builders and the inference pass. Every parse
//! fails with `UnsupportedSyntax` at the fragment's location.

use crate::{ParseError, ParseErrorKind, Span, Type};

/// `offset` is the byte position of `text` in the enclosing source.
pub fn parse_type(text: &str, offset: usize) -> Result<Type, ParseError> {
    let fragment = text.trim();
    let hint = if fragment.starts_with("PyType") {
        Some("placeholder types are produced by the front end, not read from text".to_string())
    } else {
        None
    };
    Err(ParseError {
        kind: ParseErrorKind::UnsupportedSyntax {
            text: fragment.to_string(),
        },
        span: Span::new(offset, offset + text.len()),
        hint,
    })
}
