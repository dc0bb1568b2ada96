//! Locating imports, metadata blocks and headings in page source text.
//!
//! Page sources are component templates rather than well-formed HTML, so
//! they are scanned for tags instead of parsed. Every scan returns its
//! matches as byte ranges in document order: index 0 is the primary match,
//! and callers act on matches by index against the text that was scanned.

use std::ops::Range;

use regex::Regex;

use crate::error::RewriteError;

/// One heading element of a given rank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingMatch {
  /// The opening tag, e.g. `<h1 className="x">`, attributes included.
  pub open:  Range<usize>,
  /// The closing tag, when one follows before the next opening tag.
  pub close: Option<Range<usize>>,
}

impl HeadingMatch {
  /// Content between the opening and closing tags.
  #[must_use]
  pub fn inner(&self) -> Option<Range<usize>> {
    self.close.as_ref().map(|close| self.open.end..close.start)
  }

  /// Tag name range inside the opening tag (`h1` in `<h1 ...>`).
  #[must_use]
  pub const fn open_name(&self) -> Range<usize> {
    let start = self.open.start + 1;
    start..start + 2
  }

  /// Tag name range inside the closing tag (`h1` in `</h1>`).
  #[must_use]
  pub fn close_name(&self) -> Option<Range<usize>> {
    self.close.as_ref().map(|close| close.start + 2..close.start + 4)
  }
}

/// Compiled patterns for one component name.
#[derive(Debug, Clone)]
pub struct Scanner {
  import_line:   Regex,
  block:         Regex,
  fallback_tag:  Regex,
  heading_open:  Vec<Regex>,
  heading_close: Vec<Regex>,
}

impl Scanner {
  /// Build the patterns for metadata blocks named `component`.
  ///
  /// # Errors
  ///
  /// Returns [`RewriteError::Pattern`] if a pattern fails to compile.
  pub fn new(component: &str) -> Result<Self, RewriteError> {
    let component = regex::escape(component);

    // Heading ranks 1 through 6, indexed by rank - 1. Only the start of an
    // opening tag is matched here, its end is found by `tag_end`.
    let mut heading_open = Vec::with_capacity(6);
    let mut heading_close = Vec::with_capacity(6);
    for level in 1..=6 {
      heading_open.push(Regex::new(&format!(r"<h{level}\b"))?);
      heading_close.push(Regex::new(&format!(r"</h{level}\s*>"))?);
    }

    Ok(Self {
      import_line: Regex::new(r"(?m)^import .*;.*$")?,
      block: Regex::new(&format!(r"(?s)<{component}(?:\s.*?)?/>"))?,
      fallback_tag: Regex::new(r"\n[ \t]*(<[A-Za-z>])")?,
      heading_open,
      heading_close,
    })
  }

  /// The last import declaration line, if any.
  #[must_use]
  pub fn last_import(&self, text: &str) -> Option<Range<usize>> {
    self.import_line.find_iter(text).last().map(|m| m.range())
  }

  /// Every self-closing metadata block, in document order.
  #[must_use]
  pub fn blocks(&self, text: &str) -> Vec<Range<usize>> {
    self.block.find_iter(text).map(|m| m.range()).collect()
  }

  /// Start of the first opening tag that begins an indented line.
  #[must_use]
  pub fn fallback_anchor(&self, text: &str) -> Option<usize> {
    self
      .fallback_tag
      .captures(text)
      .and_then(|caps| caps.get(1))
      .map(|tag| tag.start())
  }

  /// Every heading of `level` (1..=6), in document order.
  ///
  /// Each opening tag is paired with the first closing tag after it, unless
  /// another opening tag of the same rank comes first.
  #[must_use]
  pub fn headings(&self, text: &str, level: u8) -> Vec<HeadingMatch> {
    let index = usize::from(level.clamp(1, 6) - 1);
    let mut opens: Vec<Range<usize>> = Vec::new();
    for start in self.heading_open[index].find_iter(text) {
      if opens.last().is_some_and(|prev| start.start() < prev.end) {
        continue;
      }
      if let Some(end) = tag_end(text, start.end()) {
        opens.push(start.start()..end);
      }
    }
    let closes: Vec<Range<usize>> = self.heading_close[index]
      .find_iter(text)
      .map(|m| m.range())
      .collect();

    let mut next_close = closes.iter().peekable();
    opens
      .iter()
      .enumerate()
      .map(|(i, open)| {
        let limit = opens.get(i + 1).map_or(text.len(), |next| next.start);
        while next_close.next_if(|c| c.start < open.end).is_some() {}
        let close = next_close.next_if(|c| c.end <= limit).cloned();
        HeadingMatch {
          open: open.clone(),
          close,
        }
      })
      .collect()
  }
}

/// Offset just past the `>` closing the tag whose name ends at `from`.
///
/// A `>` inside a quoted string or a `{...}` expression does not close the
/// tag, so attributes such as `onClick={() => go()}` stay inside it.
fn tag_end(text: &str, from: usize) -> Option<usize> {
  let mut depth = 0_usize;
  let mut quote = None;
  let mut escaped = false;

  for (offset, c) in text[from..].char_indices() {
    if let Some(open) = quote {
      if escaped {
        escaped = false;
      } else if c == '\\' {
        escaped = true;
      } else if c == open {
        quote = None;
      }
      continue;
    }
    match c {
      '"' | '\'' | '`' => quote = Some(c),
      '{' => depth += 1,
      '}' => depth = depth.saturating_sub(1),
      '>' if depth == 0 => return Some(from + offset + 1),
      _ => {},
    }
  }
  None
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  fn scanner() -> Scanner {
    Scanner::new("Seo").unwrap()
  }

  #[test]
  fn test_last_import() {
    let text = "import a from \"a\";\nimport { b } from \"b\"; // note\n\nconst x = 1;\n";
    let range = scanner().last_import(text).unwrap();
    assert_eq!(&text[range], "import { b } from \"b\"; // note");
    assert_eq!(scanner().last_import("const x = 1;"), None);
  }

  #[test]
  fn test_blocks_multiline_and_word_boundary() {
    let text = r#"<Seo
  title="a"
/>
<SeoHelper />
<Seo title="b" />"#;
    let blocks = scanner().blocks(text);
    assert_eq!(blocks.len(), 2);
    assert!(text[blocks[0].clone()].contains("title=\"a\""));
    assert_eq!(&text[blocks[1].clone()], "<Seo title=\"b\" />");
  }

  #[test]
  fn test_blocks_ignore_namespaced_components() {
    let text = "<Seo.Provider value={x} />\n<Seo/>\n<Seo title=\"a\" />";
    let blocks = scanner().blocks(text);
    assert_eq!(blocks.len(), 2);
    assert_eq!(&text[blocks[0].clone()], "<Seo/>");
    assert_eq!(&text[blocks[1].clone()], "<Seo title=\"a\" />");
  }

  #[test]
  fn test_heading_open_tag_spans_expressions_and_strings() {
    let text = r#"<h1 onClick={() => go(a > b)} title="x > y" data-s='}'>Old</h1>"#;
    let headings = scanner().headings(text, 1);
    assert_eq!(headings.len(), 1);
    assert_eq!(
      &text[headings[0].open.clone()],
      r#"<h1 onClick={() => go(a > b)} title="x > y" data-s='}'>"#
    );
    assert_eq!(&text[headings[0].inner().unwrap()], "Old");
  }

  #[test]
  fn test_component_name_is_escaped() {
    let scanner = Scanner::new("Head.Meta").unwrap();
    assert_eq!(scanner.blocks("<Head.Meta /><HeadXMeta />").len(), 1);
  }

  #[test]
  fn test_headings_pairing() {
    let text = r#"<h1 className="a">One</h1>
<h1>Two
<h1 id="c">Three</h1 >
<h10>not a heading</h10>"#;
    let headings = scanner().headings(text, 1);
    assert_eq!(headings.len(), 3);

    assert_eq!(&text[headings[0].inner().unwrap()], "One");
    // An unclosed heading does not steal the next heading's closing tag
    assert_eq!(headings[1].close, None);
    assert_eq!(&text[headings[2].inner().unwrap()], "Three");
    assert_eq!(&text[headings[2].close.clone().unwrap()], "</h1 >");
  }

  #[test]
  fn test_heading_name_ranges() {
    let text = "<h2 id=\"x\">T</h2>";
    let heading = &scanner().headings(text, 2)[0];
    assert_eq!(&text[heading.open_name()], "h2");
    assert_eq!(&text[heading.close_name().unwrap()], "h2");
  }

  #[test]
  fn test_fallback_anchor() {
    let text = "export default function Page() {\n  return (\n    <main>\n";
    let anchor = scanner().fallback_anchor(text).unwrap();
    assert_eq!(&text[anchor..anchor + 6], "<main>");

    let fragment = "return (\n  <>\n";
    let anchor = scanner().fallback_anchor(fragment).unwrap();
    assert_eq!(&fragment[anchor..anchor + 2], "<>");
  }
}
