//! Terminal rendering of confirmation prompts.
//!
//! Prompts go to stderr, answers come from stdin. With `--yes` every prompt
//! is still printed but approved without waiting for input.

use std::io::{self, BufRead, Write};

use nem_transfer::confirm::{ConfirmationUi, Prompt};

/// A [`ConfirmationUi`] over a line-oriented reader and writer.
pub struct TerminalUi<R, W> {
    input: R,
    output: W,
    auto_approve: bool,
}

impl TerminalUi<io::StdinLock<'static>, io::Stderr> {
    /// A UI on the process stdin and stderr.
    pub fn stdio(auto_approve: bool) -> Self {
        Self::new(io::stdin().lock(), io::stderr(), auto_approve)
    }
}

impl<R: BufRead, W: Write> TerminalUi<R, W> {
    pub fn new(input: R, output: W, auto_approve: bool) -> Self {
        Self {
            input,
            output,
            auto_approve,
        }
    }

    fn render(&mut self, prompt: &Prompt) -> io::Result<()> {
        writeln!(self.output, "== {} ==", prompt.title())?;
        writeln!(self.output, "{prompt}")?;
        if self.auto_approve {
            writeln!(self.output, "[approved]")?;
        } else {
            write!(self.output, "Approve? [y/N] ")?;
        }
        self.output.flush()
    }

    fn read_answer(&mut self) -> io::Result<bool> {
        let mut line = String::new();
        self.input.read_line(&mut line)?;
        Ok(matches!(line.trim().to_lowercase().as_str(), "y" | "yes"))
    }
}

impl<R: BufRead, W: Write> ConfirmationUi for TerminalUi<R, W> {
    fn confirm(&mut self, prompt: &Prompt) -> bool {
        if let Err(e) = self.render(prompt) {
            tracing::error!(error = %e, "failed to render prompt");
            return false;
        }
        if self.auto_approve {
            return true;
        }
        // EOF and read errors count as a decline.
        self.read_answer().unwrap_or(false)
    }
}
