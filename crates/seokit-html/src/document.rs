//! Head-element helpers on a parsed kuchikikiki document.
//!
//! Every lookup returns the first matching element in document order, and a
//! missing element is reported as `false`/`None` rather than an error: an
//! absent optional tag must not stop the remaining edits.

use kuchikikiki::{Attribute, ElementData, ExpandedName, NodeDataRef, NodeRef};
use markup5ever::{QualName, local_name, ns};
use tendril::TendrilSink;

/// Parse a full HTML document.
#[must_use]
pub fn parse(html: &str) -> NodeRef {
  kuchikikiki::parse_html().one(html)
}

/// Serialize a document back to HTML text.
///
/// # Errors
///
/// Returns an error if serialization fails or produces invalid UTF-8.
pub fn serialize(document: &NodeRef) -> Result<String, crate::MaterializeError> {
  let mut out = Vec::new();
  document.serialize(&mut out)?;
  Ok(String::from_utf8(out)?)
}

/// First `<meta>` whose `attr` equals `value` (ASCII case-insensitive) and
/// which carries a `content` attribute.
#[must_use]
pub fn find_meta(
  document: &NodeRef,
  attr: &str,
  value: &str,
) -> Option<NodeDataRef<ElementData>> {
  document.select("meta").ok()?.find(|meta| {
    let attributes = meta.attributes.borrow();
    attributes
      .get(attr)
      .is_some_and(|v| v.trim().eq_ignore_ascii_case(value))
      && attributes.contains("content")
  })
}

/// Set the `content` of the first matching `<meta>`. Returns whether an
/// element was found.
pub fn set_meta_content(
  document: &NodeRef,
  attr: &str,
  value: &str,
  content: &str,
) -> bool {
  let Some(meta) = find_meta(document, attr, value) else {
    return false;
  };
  meta
    .attributes
    .borrow_mut()
    .insert("content", content.to_string());
  true
}

/// Replace the text of the first `<title>`. Returns whether one was found.
pub fn set_title(document: &NodeRef, text: &str) -> bool {
  let Ok(title) = document.select_first("title") else {
    return false;
  };
  let node = title.as_node();

  // Collect first, detaching while iterating would skip siblings
  let children: Vec<NodeRef> = node.children().collect();
  for child in children {
    child.detach();
  }
  node.append(NodeRef::new_text(text));
  true
}

/// First `<link>` with `canonical` among its `rel` tokens.
#[must_use]
pub fn find_canonical(document: &NodeRef) -> Option<NodeDataRef<ElementData>> {
  document.select("link").ok()?.find(|link| {
    link.attributes.borrow().get("rel").is_some_and(|rel| {
      rel
        .split_ascii_whitespace()
        .any(|token| token.eq_ignore_ascii_case("canonical"))
    })
  })
}

#[must_use]
pub fn has_canonical(document: &NodeRef) -> bool {
  find_canonical(document).is_some()
}

/// `href` of the first canonical link, if any.
#[must_use]
pub fn canonical_href(document: &NodeRef) -> Option<String> {
  let link = find_canonical(document)?;
  let attributes = link.attributes.borrow();
  attributes.get("href").map(str::to_string)
}

/// `content` of the first matching `<meta>`, if any.
#[must_use]
pub fn meta_content(
  document: &NodeRef,
  attr: &str,
  value: &str,
) -> Option<String> {
  let meta = find_meta(document, attr, value)?;
  let attributes = meta.attributes.borrow();
  attributes.get("content").map(str::to_string)
}

/// Text of the first `<title>`, if any.
#[must_use]
pub fn title_text(document: &NodeRef) -> Option<String> {
  document
    .select_first("title")
    .ok()
    .map(|title| title.as_node().text_contents())
}

/// Append `<link rel="canonical" href="...">` as the last child of `<head>`.
/// Returns whether a head element was found.
pub fn append_canonical(document: &NodeRef, href: &str) -> bool {
  let Ok(head) = document.select_first("head") else {
    return false;
  };

  let link = NodeRef::new_element(
    QualName::new(None, ns!(html), local_name!("link")),
    vec![
      (ExpandedName::new("", "rel"), Attribute {
        prefix: None,
        value:  "canonical".into(),
      }),
      (ExpandedName::new("", "href"), Attribute {
        prefix: None,
        value:  href.to_string(),
      }),
    ],
  );
  head.as_node().append(link);
  true
}
