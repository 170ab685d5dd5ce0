//! Spreadsheet id extraction
//!
//! Structural match only: the id is whatever sits between a `/d/` and the
//! next `/`, whatever the scheme, host or trailing path. An id never spans a
//! line break; when one intervenes, matching resumes at the next `/d/`.

use crate::error::{IngestError, MSG_INVALID_URL};

const ID_MARKER: &str = "/d/";

fn is_line_break(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Extract the spreadsheet id from a sheet URL
pub fn locate(url: &str) -> Result<&str, IngestError> {
    let mut from = 0;

    while let Some(pos) = url[from..].find(ID_MARKER) {
        let marker = from + pos;
        let rest = &url[marker + ID_MARKER.len()..];

        if let Some(end) = rest.find(|c: char| c == '/' || is_line_break(c)) {
            if rest[end..].starts_with('/') {
                let id = &rest[..end];
                if id.is_empty() {
                    return Err(IngestError::InvalidInput(MSG_INVALID_URL));
                }
                return Ok(id);
            }
        }

        // '/' is one byte, so marker + 1 is a char boundary
        from = marker + 1;
    }

    Err(IngestError::InvalidInput(MSG_INVALID_URL))
}
