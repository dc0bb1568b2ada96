//! The rewrite stages. Each stage is a pure function from text to text that
//! scans its input once and applies all of its edits together.

use seokit_config::MetaSpec;
use seokit_utils::{
  Edit,
  apply_edits,
  text::{expand_to_lines, line_start},
};

use crate::scan::Scanner;

/// Stage A: make sure `import` is present, right after the last import line
/// or at the very top when the file has none.
#[must_use]
pub fn ensure_import(text: &str, scanner: &Scanner, import: &str) -> String {
  if text.contains(import) {
    return text.to_string();
  }

  let edit = scanner.last_import(text).map_or_else(
    || Edit::insert(0, format!("{import}\n")),
    |last| Edit::insert(last.end, format!("\n{import}")),
  );
  apply_edits(text, vec![edit])
}

/// Promote the first heading of rank `level + 1` to `level` when no heading
/// of rank `level` exists.
#[must_use]
pub fn promote_subheading(text: &str, scanner: &Scanner, level: u8) -> String {
  if !scanner.headings(text, level).is_empty() {
    return text.to_string();
  }
  let Some(first) = scanner.headings(text, level + 1).into_iter().next()
  else {
    return text.to_string();
  };

  let name = format!("h{level}");
  let mut edits = vec![Edit::replace(first.open_name(), name.clone())];
  if let Some(close) = first.close_name() {
    edits.push(Edit::replace(close, name));
  }
  apply_edits(text, edits)
}

/// Stage B: leave exactly one metadata block carrying the page's values.
///
/// The first existing block is replaced in place and every later one is
/// deleted. Without any block, one is inserted above the first top-level
/// heading, or above the first indented opening tag as a fallback. When the
/// page has neither a title nor a description the text is returned as-is.
#[must_use]
pub fn upsert_metadata_block(
  text: &str,
  scanner: &Scanner,
  component: &str,
  level: u8,
  spec: &MetaSpec,
) -> String {
  if !spec.has_seo() {
    return text.to_string();
  }
  let title = spec.seo_title.as_deref().unwrap_or_default();
  let description = spec.seo_description.as_deref().unwrap_or_default();

  let blocks = scanner.blocks(text);
  if let Some((first, rest)) = blocks.split_first() {
    let indent = line_indent(text, first.start);
    let mut edits = vec![Edit::replace(
      first.clone(),
      render_block(component, title, description, indent),
    )];
    edits.extend(
      rest
        .iter()
        .map(|block| Edit::delete(expand_to_lines(text, block.clone()))),
    );
    return apply_edits(text, edits);
  }

  let anchor = scanner
    .headings(text, level)
    .first()
    .map(|heading| heading.open.start)
    .or_else(|| scanner.fallback_anchor(text));
  let Some(anchor) = anchor else {
    log::debug!("No heading or tag to anchor a metadata block on");
    return text.to_string();
  };

  let indent = line_indent(text, anchor);
  let block = render_block(component, title, description, indent);
  apply_edits(text, vec![Edit::insert(anchor, format!("{block}\n{indent}"))])
}

/// Stage C: set the text of the first top-level heading and demote every
/// later top-level heading by one rank.
///
/// With `keep_second_heading`, the second top-level heading is left alone
/// and demotion starts at the third. Headings are identified purely by
/// position. Without a heading text the text is returned as-is.
#[must_use]
pub fn set_primary_heading(
  text: &str,
  scanner: &Scanner,
  level: u8,
  spec: &MetaSpec,
) -> String {
  let Some(heading_text) = spec.heading.as_deref() else {
    return text.to_string();
  };
  let headings = scanner.headings(text, level);
  let Some((primary, rest)) = headings.split_first() else {
    log::debug!("No h{level} heading to set");
    return text.to_string();
  };

  let mut edits = Vec::new();
  if let Some(inner) = primary.inner() {
    edits.push(Edit::replace(inner, heading_text));
  }

  let demoted = format!("h{}", level + 1);
  let skip = usize::from(spec.keep_second_heading);
  for heading in rest.iter().skip(skip) {
    edits.push(Edit::replace(heading.open_name(), demoted.clone()));
    if let Some(close) = heading.close_name() {
      edits.push(Edit::replace(close, demoted.clone()));
    }
  }

  apply_edits(text, edits)
}

/// Render a metadata block whose first line starts at the insertion point
/// and whose remaining lines are indented relative to `indent`.
#[must_use]
pub fn render_block(
  component: &str,
  title: &str,
  description: &str,
  indent: &str,
) -> String {
  format!(
    "<{component}\n{indent}  title=\"{}\"\n{indent}  description=\"{}\"\n{indent}/>",
    escape_quotes(title),
    escape_quotes(description),
  )
}

fn escape_quotes(value: &str) -> String {
  value.replace('"', "\\\"")
}

/// Leading whitespace of the line containing `pos`.
fn line_indent(text: &str, pos: usize) -> &str {
  let start = line_start(text, pos);
  let line = &text[start..pos];
  let width = line.len() - line.trim_start_matches([' ', '\t']).len();
  &line[..width]
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  const IMPORT: &str = r#"import Seo from "@/components/Seo";"#;

  fn scanner() -> Scanner {
    Scanner::new("Seo").unwrap()
  }

  fn seo(title: &str, description: &str) -> MetaSpec {
    MetaSpec {
      seo_title: Some(title.to_string()),
      seo_description: Some(description.to_string()),
      ..Default::default()
    }
  }

  #[test]
  fn test_ensure_import_after_last_import() {
    let text = "import React from \"react\";\nimport { X } from \"x\";\n\nexport default 1;\n";
    let out = ensure_import(text, &scanner(), IMPORT);
    assert_eq!(
      out,
      format!(
        "import React from \"react\";\nimport {{ X }} from \"x\";\n{IMPORT}\n\nexport default 1;\n"
      )
    );
    assert_eq!(ensure_import(&out, &scanner(), IMPORT), out);
  }

  #[test]
  fn test_ensure_import_without_imports() {
    let text = "export default function Page() {}\n";
    let out = ensure_import(text, &scanner(), IMPORT);
    assert_eq!(out, format!("{IMPORT}\n{text}"));
  }

  #[test]
  fn test_upsert_replaces_first_and_deletes_rest() {
    let text = r#"    <main>
      <Seo title="one" description="1" />
      <p>body</p>
      <Seo
        title="two"
      />
      <footer><Seo title="three" /></footer>
    </main>"#;
    let out =
      upsert_metadata_block(text, &scanner(), "Seo", 1, &seo("New", "Desc"));

    assert_eq!(
      out,
      r#"    <main>
      <Seo
        title="New"
        description="Desc"
      />
      <p>body</p>
      <footer></footer>
    </main>"#
    );
  }

  #[test]
  fn test_upsert_inserts_above_first_heading() {
    let text = "  return (\n    <div>\n      <h1 className=\"t\">Hi</h1>\n    </div>\n";
    let out = upsert_metadata_block(
      text,
      &scanner(),
      "Seo",
      1,
      &MetaSpec {
        seo_title: Some("Say \"hi\"".to_string()),
        ..Default::default()
      },
    );
    assert_eq!(
      out,
      "  return (\n    <div>\n      <Seo\n        title=\"Say \\\"hi\\\"\"\n        description=\"\"\n      />\n      <h1 className=\"t\">Hi</h1>\n    </div>\n"
    );
  }

  #[test]
  fn test_upsert_fallback_anchor() {
    let text = "export default () => (\n  <section>\n    <p>x</p>\n  </section>\n);\n";
    let out = upsert_metadata_block(text, &scanner(), "Seo", 1, &seo("T", "D"));
    assert_eq!(
      out,
      "export default () => (\n  <Seo\n    title=\"T\"\n    description=\"D\"\n  />\n  <section>\n    <p>x</p>\n  </section>\n);\n"
    );
  }

  #[test]
  fn test_upsert_without_values_is_noop() {
    let text = "<Seo title=\"keep\" />\n<Seo title=\"also keep\" />";
    let out =
      upsert_metadata_block(text, &scanner(), "Seo", 1, &MetaSpec::default());
    assert_eq!(out, text);
  }

  #[test]
  fn test_set_primary_heading_demotes_later_headings() {
    let text = r#"<h1 className="a">Old</h1>
<h1 id="b">Second</h1>
<h1 className="c" data-x="1">Third</h1>"#;
    let spec = MetaSpec {
      heading: Some("New".to_string()),
      ..Default::default()
    };
    let out = set_primary_heading(text, &scanner(), 1, &spec);
    assert_eq!(
      out,
      r#"<h1 className="a">New</h1>
<h2 id="b">Second</h2>
<h2 className="c" data-x="1">Third</h2>"#
    );
  }

  #[test]
  fn test_set_primary_heading_keeps_second() {
    let text = "<h1>Old</h1>\n<h1>Second</h1>\n<h1>Third</h1>";
    let spec = MetaSpec {
      heading: Some("New".to_string()),
      keep_second_heading: true,
      ..Default::default()
    };
    let out = set_primary_heading(text, &scanner(), 1, &spec);
    assert_eq!(out, "<h1>New</h1>\n<h1>Second</h1>\n<h2>Third</h2>");
  }

  #[test]
  fn test_set_primary_heading_keeps_expression_attributes() {
    let text = "<h1 onClick={() => go()} className=\"t\">Old</h1>\n<h1 hidden={n > 1}>Two</h1>";
    let spec = MetaSpec {
      heading: Some("New".to_string()),
      ..Default::default()
    };
    let out = set_primary_heading(text, &scanner(), 1, &spec);
    assert_eq!(
      out,
      "<h1 onClick={() => go()} className=\"t\">New</h1>\n<h2 hidden={n > 1}>Two</h2>"
    );
  }

  #[test]
  fn test_set_primary_heading_multiline_inner() {
    let text = "<h1 className=\"x\">\n  Your website,\n  <span>done</span>\n</h1>";
    let spec = MetaSpec {
      heading: Some("Done for you".to_string()),
      ..Default::default()
    };
    let out = set_primary_heading(text, &scanner(), 1, &spec);
    assert_eq!(out, "<h1 className=\"x\">Done for you</h1>");
  }

  #[test]
  fn test_set_primary_heading_respects_level() {
    let text = "<h2>Old</h2><h2>Next</h2><h1>Untouched</h1>";
    let spec = MetaSpec {
      heading: Some("New".to_string()),
      ..Default::default()
    };
    let out = set_primary_heading(text, &scanner(), 2, &spec);
    assert_eq!(out, "<h2>New</h2><h3>Next</h3><h1>Untouched</h1>");
  }

  #[test]
  fn test_promote_subheading() {
    let text = "<h2 className=\"t\">Title</h2>\n<h2>Other</h2>";
    let out = promote_subheading(text, &scanner(), 1);
    assert_eq!(out, "<h1 className=\"t\">Title</h1>\n<h2>Other</h2>");
    // A top-level heading now exists, so promotion does not repeat
    assert_eq!(promote_subheading(&out, &scanner(), 1), out);
  }
}
