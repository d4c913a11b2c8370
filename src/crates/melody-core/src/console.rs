//! Line-oriented prompt/answer console
//!
//! Both tools drive their sessions through this type so the same code runs
//! against stdin/stdout in the binaries and against in-memory buffers in tests.

use std::fmt::Display;
use std::io::{self, BufRead, Write};

pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Console { input, output }
    }

    /// Print `prompt` without a newline and read one answer line.
    ///
    /// Returns `None` once input is exhausted. The trailing line ending is
    /// stripped, everything else is returned as typed.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }

    /// Like [`Console::ask`], but trimmed and lowercased for matching menu choices
    pub fn choose(&mut self, prompt: &str) -> io::Result<Option<String>> {
        Ok(self.ask(prompt)?.map(|answer| answer.trim().to_lowercase()))
    }

    pub fn say(&mut self, message: impl Display) -> io::Result<()> {
        writeln!(self.output, "{}", message)
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl Console<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio() -> Self {
        Console::new(io::stdin().lock(), io::stdout())
    }
}
