//! The per-session activity log shown from the "logs" menu entry.
//!
//! A [`SessionLog`] is created by the entry point and lent to whatever needs
//! to record activity. It only grows, and it is dropped with the process.
//! Every entry is mirrored to `tracing` for diagnostics.

use std::fmt::{self, Write as _};

use chrono::{DateTime, Local};
use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum LogLevel {
  Info,
  Debug,
  Error,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
  pub at:      DateTime<Local>,
  pub level:   LogLevel,
  pub message: String,
}

impl fmt::Display for LogEntry {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} [{}] {}",
      self.at.format("%Y-%m-%d %H:%M:%S"),
      self.level,
      self.message
    )
  }
}

#[derive(Debug, Default)]
pub struct SessionLog {
  entries: Vec<LogEntry>,
}

impl SessionLog {
  pub fn new() -> Self { Self::default() }

  pub fn record(&mut self, level: LogLevel, message: impl Into<String>) {
    let message = message.into();
    match level {
      LogLevel::Info => tracing::info!(target: "session", "{message}"),
      LogLevel::Debug => tracing::debug!(target: "session", "{message}"),
      LogLevel::Error => tracing::error!(target: "session", "{message}"),
    }
    self.entries.push(LogEntry { at: Local::now(), level, message });
  }

  pub fn info(&mut self, message: impl Into<String>) {
    self.record(LogLevel::Info, message);
  }

  pub fn debug(&mut self, message: impl Into<String>) {
    self.record(LogLevel::Debug, message);
  }

  pub fn error(&mut self, message: impl Into<String>) {
    self.record(LogLevel::Error, message);
  }

  pub fn entries(&self) -> &[LogEntry] { &self.entries }

  /// All entries, oldest first, one per line.
  pub fn render(&self) -> String {
    self.entries.iter().fold(String::new(), |mut out, entry| {
      let _ = writeln!(out, "{entry}");
      out
    })
  }
}
