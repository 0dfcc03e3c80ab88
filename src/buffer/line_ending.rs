//! Line ending detection and conversion
//!
//! Text inside a buffer is always LF-normalized. The style found on disk is
//! remembered so that it can be re-applied when the buffer is written back.

use std::fmt;

/// Line terminator convention of a document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r`
    Cr,
    /// `\r\n`
    Crlf,
    /// No terminator found when the document was loaded
    None,
}

impl LineEnding {
    /// Detect the convention from the first terminator in `bytes`
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Self {
        match bytes.iter().position(|&b| b == b'\r' || b == b'\n') {
            Some(i) if bytes[i] == b'\n' => LineEnding::Lf,
            Some(i) if bytes.get(i + 1) == Some(&b'\n') => LineEnding::Crlf,
            Some(_) => LineEnding::Cr,
            None => LineEnding::None,
        }
    }

    /// Bytes written for each logical `\n`
    #[must_use]
    pub fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::Lf | LineEnding::None => b"\n",
            LineEnding::Cr => b"\r",
            LineEnding::Crlf => b"\r\n",
        }
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineEnding::Lf => write!(f, "lf"),
            LineEnding::Cr => write!(f, "cr"),
            LineEnding::Crlf => write!(f, "crlf"),
            LineEnding::None => write!(f, "none"),
        }
    }
}

/// Collapse every terminator into a single LF.
///
/// Pairs follow the line index: CRLF and LFCR are one terminator each, a
/// lone CR is one terminator.
#[must_use]
pub fn normalize(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut iter = bytes.iter().copied().peekable();
    while let Some(b) = iter.next() {
        let pair = match b {
            b'\r' => b'\n',
            b'\n' => b'\r',
            _ => {
                out.push(b);
                continue;
            }
        };
        if iter.peek() == Some(&pair) {
            iter.next();
        }
        out.push(b'\n');
    }
    out
}

/// Expand every LF in `bytes` to `ending`
#[must_use]
pub fn apply(bytes: &[u8], ending: LineEnding) -> Vec<u8> {
    let terminator = ending.as_bytes();
    if terminator == b"\n" {
        return bytes.to_vec();
    }
    let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
    let mut out = Vec::with_capacity(bytes.len() + newlines * (terminator.len() - 1));
    for &b in bytes {
        if b == b'\n' {
            out.extend_from_slice(terminator);
        } else {
            out.push(b);
        }
    }
    out
}
