/// Per-run item counts for summary lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
  /// Items written (created or updated).
  pub changed:   usize,
  /// Items processed that needed no write.
  pub unchanged: usize,
  /// Items skipped because their input was missing.
  pub skipped:   usize,
  /// Items that failed.
  pub failed:    usize,
}

impl Tally {
  #[must_use]
  pub const fn has_failures(&self) -> bool {
    self.failed > 0
  }
}
