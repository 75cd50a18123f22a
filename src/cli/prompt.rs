use std::fmt::Display;
use std::io::{self, BufRead, Write};

/// Line-based prompts and narration over any reader/writer pair, so the
/// commands can be driven from tests as well as from a terminal.
pub struct Console<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }

    /// Print `label`, read one line, strip the line ending.
    pub fn ask(&mut self, label: &str) -> io::Result<String> {
        write!(self.out, "{label}")?;
        self.out.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!("no input for prompt '{}'", label.trim_end()),
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Use `given` when present, otherwise prompt. Surrounding whitespace is
    /// dropped from prompted answers.
    pub fn resolve(&mut self, given: Option<String>, label: &str) -> io::Result<String> {
        match given {
            Some(v) => Ok(v),
            None => Ok(self.ask(label)?.trim().to_string()),
        }
    }

    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }

    pub fn into_output(self) -> W {
        self.out
    }
}
