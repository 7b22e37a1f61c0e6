use anyhow::{Context, Result};
use std::io::{BufRead, Write};

/// Line-oriented prompt over any reader/writer pair.
///
/// The binary wraps stdin/stdout; tests feed a `Cursor` and a `Vec<u8>`.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print one line.
    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text).context("Failed to write prompt output")
    }

    /// Prompt user with a message and return their trimmed input.
    /// End of input is an error so callers never loop forever.
    pub fn ask(&mut self, message: &str) -> Result<String> {
        write!(self.output, "{}", message).context("Failed to write prompt")?;
        self.output.flush().context("Failed to flush prompt")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            anyhow::bail!("Input closed before the questionnaire was finished");
        }
        Ok(line.trim().to_string())
    }

    /// Prompt with a default value. Returns default if input is empty.
    pub fn ask_with_default(&mut self, message: &str, default: &str) -> Result<String> {
        let input = if default.is_empty() {
            self.ask(&format!("{}: ", message))?
        } else {
            self.ask(&format!("{} [{}]: ", message, default))?
        };
        if input.is_empty() {
            Ok(default.to_string())
        } else {
            Ok(input)
        }
    }

    /// Yes/no question. Empty input takes the default.
    pub fn ask_yes_no(&mut self, message: &str, default_yes: bool) -> Result<bool> {
        let hint = if default_yes { "Y/n" } else { "y/N" };
        let input = self.ask(&format!("{} [{}]: ", message, hint))?.to_lowercase();
        if input.is_empty() {
            Ok(default_yes)
        } else {
            Ok(input == "y" || input == "yes")
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}
