use std::{fs, io, path::Path};

/// Write `contents` to `path`, creating parent directories as needed.
///
/// Existing files are overwritten unconditionally.
///
/// # Errors
///
/// Returns an error if a directory cannot be created or the file cannot be
/// written.
pub fn write_output(path: &Path, contents: &str) -> io::Result<()> {
  if let Some(parent) = path.parent()
    && !parent.as_os_str().is_empty()
  {
    fs::create_dir_all(parent)?;
  }
  fs::write(path, contents)
}

/// Write `after` to `path` only when it differs from `before`.
///
/// Returns whether the file was written. Unchanged files keep their
/// modification time.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub fn write_if_changed(
  path: &Path,
  before: &str,
  after: &str,
) -> io::Result<bool> {
  if before == after {
    return Ok(false);
  }
  fs::write(path, after)?;
  Ok(true)
}

#[cfg(test)]
mod tests {
  #![allow(clippy::expect_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn test_write_output_creates_directories() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("a/b/index.html");

    write_output(&path, "one").expect("Failed to write");
    write_output(&path, "two").expect("Failed to overwrite");

    assert_eq!(fs::read_to_string(&path).expect("Failed to read"), "two");
  }

  #[test]
  fn test_write_if_changed_skips_identical_content() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("page.tsx");

    assert!(!write_if_changed(&path, "same", "same").expect("write"));
    assert!(!path.exists());

    assert!(write_if_changed(&path, "old", "new").expect("write"));
    assert_eq!(fs::read_to_string(&path).expect("Failed to read"), "new");
  }
}
