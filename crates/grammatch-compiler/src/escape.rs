//! Decoding of terminal spellings: string escapes, `#x` character codes and
//! character class bodies.
//!
//! Errors carry a byte range relative to the decoded text; callers shift it
//! onto the token's position in the grammar source.

use std::ops::Range;

use grammatch_core::{CharClass, ClassItem};

use crate::diagnostics::DiagnosticKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DecodeError {
    pub kind: DiagnosticKind,
    pub range: Range<usize>,
    pub detail: String,
}

impl DecodeError {
    fn new(kind: DiagnosticKind, range: Range<usize>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            detail: detail.into(),
        }
    }
}

/// Decodes a string body with `\n \t \r \\ \" \' \u{HEX}` escapes.
pub(crate) fn unescape(body: &str) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(body.len());
    let mut pos = 0;

    while let Some(c) = body[pos..].chars().next() {
        if c != '\\' {
            out.push(c);
            pos += c.len_utf8();
            continue;
        }

        let Some(escaped) = body[pos + 1..].chars().next() else {
            return Err(DecodeError::new(
                DiagnosticKind::InvalidEscape,
                pos..pos + 1,
                "`\\` at end of string",
            ));
        };

        let (decoded, len) = match escaped {
            'n' => ('\n', 2),
            't' => ('\t', 2),
            'r' => ('\r', 2),
            '\\' => ('\\', 2),
            '"' => ('"', 2),
            '\'' => ('\'', 2),
            'u' => unicode_escape(body, pos)?,
            other => {
                let end = pos + 1 + other.len_utf8();
                return Err(DecodeError::new(
                    DiagnosticKind::InvalidEscape,
                    pos..end,
                    format!("`{}`", &body[pos..end]),
                ));
            }
        };

        out.push(decoded);
        pos += len;
    }

    Ok(out)
}

/// `\u{HEX}` starting at `pos`. Returns the character and the escape's length.
fn unicode_escape(body: &str, pos: usize) -> Result<(char, usize), DecodeError> {
    let after_u = &body[pos + 2..];
    let malformed = |len: usize| {
        DecodeError::new(
            DiagnosticKind::InvalidEscape,
            pos..pos + len,
            "expected `\\u{HEX}`",
        )
    };

    let Some(braced) = after_u.strip_prefix('{') else {
        return Err(malformed(2));
    };
    let Some(close) = braced.find('}') else {
        return Err(malformed(2 + after_u.len()));
    };

    let hex = &braced[..close];
    let len = 2 + 1 + close + 1;
    if hex.is_empty() || hex.len() > 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(malformed(len));
    }

    let code = u32::from_str_radix(hex, 16).map_err(|_| malformed(len))?;
    let c = char::from_u32(code).ok_or_else(|| {
        DecodeError::new(
            DiagnosticKind::InvalidEscape,
            pos..pos + len,
            format!("`{}` is not a Unicode scalar value", &body[pos..pos + len]),
        )
    })?;

    Ok((c, len))
}

/// Decodes `#xHH`. The caller guarantees the `#x` prefix and at least one hex digit.
pub(crate) fn char_code(text: &str) -> Result<char, DecodeError> {
    let invalid = || {
        DecodeError::new(
            DiagnosticKind::InvalidCharCode,
            0..text.len(),
            format!("`{text}` is not a Unicode scalar value"),
        )
    };

    let hex = text.strip_prefix("#x").ok_or_else(invalid)?;
    let code = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
    char::from_u32(code).ok_or_else(invalid)
}

/// Decodes the inside of `[...]`: an optional `^`, then characters, `#x`
/// codes and `a-z` ranges. A `-` that can't be a range is literal.
pub(crate) fn char_class(body: &str) -> Result<CharClass, DecodeError> {
    let (negated, offset) = match body.strip_prefix('^') {
        Some(_) => (true, 1),
        None => (false, 0),
    };

    let mut items = Vec::new();
    let mut pos = offset;

    while pos < body.len() {
        let (lo, lo_len) = class_atom(body, pos)?;
        let dash = pos + lo_len;
        let is_range = body[dash..].starts_with('-') && dash + 1 < body.len();

        if !is_range {
            items.push(ClassItem::Char(lo));
            pos = dash;
            continue;
        }

        let (hi, hi_len) = class_atom(body, dash + 1)?;
        let end = dash + 1 + hi_len;
        if lo > hi {
            return Err(DecodeError::new(
                DiagnosticKind::InvalidCharClass,
                pos..end,
                format!("range `{}` is reversed", &body[pos..end]),
            ));
        }
        items.push(ClassItem::Range(lo, hi));
        pos = end;
    }

    if items.is_empty() {
        return Err(DecodeError::new(
            DiagnosticKind::InvalidCharClass,
            0..body.len(),
            "empty character class",
        ));
    }

    Ok(CharClass { negated, items })
}

/// One character of a class body at `pos`, with its length in bytes.
fn class_atom(body: &str, pos: usize) -> Result<(char, usize), DecodeError> {
    let rest = &body[pos..];

    if let Some(hex) = rest.strip_prefix("#x") {
        let digits = hex.bytes().take_while(u8::is_ascii_hexdigit).count();
        if digits > 0 {
            let code = &rest[..2 + digits];
            return char_code(code)
                .map(|c| (c, code.len()))
                .map_err(|e| DecodeError {
                    range: pos..pos + code.len(),
                    ..e
                });
        }
    }

    match rest.chars().next() {
        Some(c) => Ok((c, c.len_utf8())),
        None => Err(DecodeError::new(
            DiagnosticKind::InvalidCharClass,
            pos..pos,
            "expected a character",
        )),
    }
}
