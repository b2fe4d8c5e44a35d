//! Dotted paths into a document, e.g. `author[0].givenName` or `keywords.-1`.
//!
//! ```text
//! path    := segment ("." segment)*
//! segment := key ("[" integer "]")?
//!          | integer                  (index of the preceding key)
//! ```
//!
//! An index of `-1` is [`Index::Last`]. Keys cannot contain `.` or `[`; there
//! is no escaping.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An array index within a path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Index {
    At(usize),
    /// Written as `-1`: the last element for removal, the append position for
    /// updates.
    Last,
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Index::At(i) => write!(f, "{}", i),
            Index::Last => write!(f, "-1"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub key: String,
    pub index: Option<Index>,
}

impl Segment {
    pub fn key(key: impl Into<String>) -> Self {
        Segment {
            key: key.into(),
            index: None,
        }
    }

    pub fn indexed(key: impl Into<String>, index: Index) -> Self {
        Segment {
            key: key.into(),
            index: Some(index),
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "{}[{}]", self.key, index),
            None => write!(f, "{}", self.key),
        }
    }
}

/// A parsed, non-empty path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Path(Vec<Segment>);

impl Path {
    pub fn segments(&self) -> &[Segment] {
        &self.0
    }

    /// The segments to descend through, and the terminal segment.
    pub fn split_last(&self) -> (&[Segment], &Segment) {
        match self.0.split_last() {
            Some((last, intermediate)) => (intermediate, last),
            None => unreachable!("Path is never empty"),
        }
    }
}

impl TryFrom<Vec<Segment>> for Path {
    type Error = Error;

    fn try_from(segments: Vec<Segment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(invalid("", "path is empty"));
        }
        Ok(Path(segments))
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for Path {
    type Err = Error;

    fn from_str(text: &str) -> Result<Self> {
        parse(text)
    }
}

/// Parse the textual path syntax.
pub fn parse(text: &str) -> Result<Path> {
    if text.is_empty() {
        return Err(invalid(text, "path is empty"));
    }

    let mut segments: Vec<Segment> = Vec::new();
    for part in text.split('.') {
        if part.is_empty() {
            return Err(invalid(text, "path contains an empty segment"));
        }

        if is_integer(part) {
            let index = parse_index(text, part)?;
            match segments.last_mut() {
                None => return Err(invalid(text, "path cannot start with an index")),
                Some(Segment { index: Some(_), .. }) => {
                    return Err(invalid(text, "only one index per segment is supported"))
                }
                Some(previous) => previous.index = Some(index),
            }
            continue;
        }

        let segment = match part.split_once('[') {
            Some((key, rest)) => {
                let inner = rest
                    .strip_suffix(']')
                    .ok_or_else(|| invalid(text, "unterminated `[` in segment"))?;
                if key.is_empty() {
                    return Err(invalid(text, "index without a key"));
                }
                if key.contains(']') {
                    return Err(invalid(text, "unmatched `]` in segment"));
                }
                if inner.contains('[') || inner.contains(']') {
                    return Err(invalid(text, "only one index per segment is supported"));
                }
                Segment::indexed(key, parse_index(text, inner)?)
            }
            None => {
                if part.contains(']') {
                    return Err(invalid(text, "unmatched `]` in segment"));
                }
                Segment::key(part)
            }
        };
        segments.push(segment);
    }

    Ok(Path(segments))
}

fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

fn parse_index(path: &str, s: &str) -> Result<Index> {
    let n: i64 = s
        .parse()
        .map_err(|_| invalid(path, &format!("index `{}` is not an integer", s)))?;
    match n {
        -1 => Ok(Index::Last),
        n if n < 0 => Err(invalid(
            path,
            &format!("negative index {} (only -1 is allowed)", n),
        )),
        n => usize::try_from(n)
            .map(Index::At)
            .map_err(|_| invalid(path, &format!("index {} is too large", n))),
    }
}

fn invalid(path: &str, reason: &str) -> Error {
    Error::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
