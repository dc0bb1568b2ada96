//! Console logging.
//!
//! Progress lines go to stdout exactly as written, so `Created: /faq/index.html`
//! and friends can be read (or grepped) without a logger prefix in the way.

use std::io::Write;

use log::{Level, LevelFilter};

/// Prefix printed before a record of `level`.
#[must_use]
pub const fn line_prefix(level: Level) -> &'static str {
  match level {
    Level::Error => "error: ",
    Level::Warn | Level::Info => "",
    Level::Debug => "debug: ",
    Level::Trace => "trace: ",
  }
}

/// Install the global logger. Must be called once, before any logging.
pub fn init(verbose: bool) {
  env_logger::Builder::new()
    .filter_level(if verbose {
      LevelFilter::Debug
    } else {
      LevelFilter::Info
    })
    .target(env_logger::Target::Stdout)
    .format(|buf, record| {
      writeln!(buf, "{}{}", line_prefix(record.level()), record.args())
    })
    .init();
}
