//! Line-oriented terminal I/O: numbered prompts in, plain text out.

use std::{
  fmt::Display,
  io::{self, BufRead, Write},
};

pub struct Console<R, W> {
  input:  R,
  output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
  pub fn new(input: R, output: W) -> Self { Self { input, output } }

  /// Write `text` followed by a newline, unless it already ends in one.
  pub fn say(&mut self, text: impl Display) -> io::Result<()> {
    let text = text.to_string();
    if text.ends_with('\n') {
      self.output.write_all(text.as_bytes())
    } else {
      writeln!(self.output, "{text}")
    }
  }

  /// Print `label` and read one line. Returns `None` once input is exhausted.
  pub fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
    write!(self.output, "{label}")?;
    self.output.flush()?;

    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      return Ok(None);
    }
    Ok(Some(
      line
        .trim_end_matches('\n')
        .trim_end_matches('\r')
        .to_string(),
    ))
  }

  #[cfg(test)]
  pub fn output(&self) -> &W { &self.output }
}
