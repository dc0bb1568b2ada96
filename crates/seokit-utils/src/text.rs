//! Span-based text editing.
//!
//! Matches are located once against an unmodified string and expressed as
//! byte ranges into it. All edits for one pass are then applied together by
//! [`apply_edits`], so no edit ever has to account for the length change of
//! another.

use std::ops::Range;

/// Replace `range` of the source text with `replacement`.
///
/// An empty range is an insertion, an empty replacement is a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
  pub range:       Range<usize>,
  pub replacement: String,
}

impl Edit {
  #[must_use]
  pub fn replace(range: Range<usize>, replacement: impl Into<String>) -> Self {
    Self {
      range,
      replacement: replacement.into(),
    }
  }

  #[must_use]
  pub fn insert(at: usize, text: impl Into<String>) -> Self {
    Self::replace(at..at, text)
  }

  #[must_use]
  pub fn delete(range: Range<usize>) -> Self {
    Self::replace(range, String::new())
  }
}

/// Apply non-overlapping edits, all expressed against the original `text`.
///
/// Edits may be given in any order. Insertions at the same offset keep their
/// relative order. An edit overlapping an earlier one (by start offset) is
/// dropped, as are edits reaching past the end of the text.
#[must_use]
pub fn apply_edits(text: &str, mut edits: Vec<Edit>) -> String {
  edits.sort_by_key(|edit| edit.range.start);

  let mut out = String::with_capacity(text.len());
  let mut cursor = 0;

  for edit in edits {
    let Range { start, end } = edit.range;
    if start < cursor
      || end < start
      || !text.is_char_boundary(start)
      || !text.is_char_boundary(end)
    {
      continue;
    }
    out.push_str(&text[cursor..start]);
    out.push_str(&edit.replacement);
    cursor = end;
  }

  out.push_str(text.get(cursor..).unwrap_or_default());
  out
}

/// Byte offset of the start of the line containing `pos`.
#[must_use]
pub fn line_start(text: &str, pos: usize) -> usize {
  text[..pos].rfind('\n').map_or(0, |i| i + 1)
}

/// Byte offset of the `\n` ending the line containing `pos`, or the text
/// length on the last line.
#[must_use]
pub fn line_end(text: &str, pos: usize) -> usize {
  text[pos..].find('\n').map_or(text.len(), |i| pos + i)
}

/// Whitespace preceding `pos` on its line, if nothing else precedes it.
#[must_use]
pub fn leading_indent(text: &str, pos: usize) -> Option<&str> {
  let prefix = &text[line_start(text, pos)..pos];
  prefix
    .chars()
    .all(|c| c == ' ' || c == '\t')
    .then_some(prefix)
}

/// Grow `range` to cover its whole lines, trailing newline included, when
/// the lines hold nothing but the range and surrounding blanks.
///
/// Otherwise the range is returned unchanged.
#[must_use]
pub fn expand_to_lines(text: &str, range: Range<usize>) -> Range<usize> {
  if leading_indent(text, range.start).is_none() {
    return range;
  }
  let end = line_end(text, range.end);
  if !text[range.end..end].trim().is_empty() {
    return range;
  }

  let start = line_start(text, range.start);
  let end = if end < text.len() { end + 1 } else { end };
  start..end
}
