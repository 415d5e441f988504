//! Flat tag/text tokenization of article HTML.
//!
//! Article bodies use a small, well-formed vocabulary (`<h1>`–`<h6>`, `<p>`,
//! `<a>`, `<strong>`, `<em>`, lists), so the scanner treats markup as a flat
//! stream rather than building a tree. A tag is `<`, one or more characters
//! other than `>`, then `>`; everything else is text.

/// One piece of an HTML string, borrowed from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Tag(&'a str),
    Text(&'a str),
}

/// A segment together with its byte offset in the source string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spanned<'a> {
    pub offset: usize,
    pub segment: Segment<'a>,
}

/// Iterator over the tag and text segments of an HTML string.
///
/// Concatenating every yielded segment reproduces the input exactly.
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    src: &'a str,
    pos: usize,
}

/// Splits `html` into tag and text segments, left to right.
#[must_use]
pub fn segments(html: &str) -> Segments<'_> {
    Segments { src: html, pos: 0 }
}

impl<'a> Iterator for Segments<'a> {
    type Item = Spanned<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.src.len() {
            return None;
        }

        let src = self.src;
        let start = self.pos;
        let rest = &src[start..];

        if let Some(len) = tag_len(rest) {
            self.pos = start + len;
            return Some(Spanned {
                offset: start,
                segment: Segment::Tag(&rest[..len]),
            });
        }

        // Text runs until the next position where a complete tag begins.
        let mut end = rest.len();
        let mut search = rest.chars().next().map_or(1, char::len_utf8);
        while let Some(rel) = rest[search..].find('<') {
            let candidate = search + rel;
            if tag_len(&rest[candidate..]).is_some() {
                end = candidate;
                break;
            }
            search = candidate + 1;
        }

        self.pos = start + end;
        Some(Spanned {
            offset: start,
            segment: Segment::Text(&rest[..end]),
        })
    }
}

/// Length of the tag at the start of `s`, if `s` starts with one.
fn tag_len(s: &str) -> Option<usize> {
    if !s.starts_with('<') {
        return None;
    }
    let close = s[1..].find('>')? + 1;
    // `<>` has an empty body and is not a tag.
    (close > 1).then_some(close + 1)
}

/// Classifies a tag as a heading boundary.
///
/// Returns `Some(true)` for an opening `<h1>`–`<h6>` (with or without
/// attributes), `Some(false)` for the matching closing tag, and `None` for
/// anything else.
#[must_use]
pub fn heading_boundary(tag: &str) -> Option<bool> {
    let inner = tag.strip_prefix('<')?.strip_suffix('>')?;
    let (closing, name_part) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };

    let mut chars = name_part.chars();
    let h = chars.next()?;
    let level = chars.next()?;
    if !h.eq_ignore_ascii_case(&'h') || !('1'..='6').contains(&level) {
        return None;
    }

    let after = chars.as_str();
    let boundary_ok = if closing {
        after.trim().is_empty()
    } else {
        after.is_empty() || after.starts_with(|c: char| c.is_ascii_whitespace() || c == '/')
    };

    boundary_ok.then_some(!closing)
}
