//! Line based console input and output.

use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

/// Where the menus read input from and print to.
pub trait Console {
    /// Print `text` followed by a new line.
    fn print(&mut self, text: &str) -> io::Result<()>;

    /// Print `prompt` and read one line of input without its line ending.
    ///
    /// Returns `None` when there is no more input.
    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;

    /// Like [Console::read_line], but the input should not be echoed where possible.
    fn read_password(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.read_line(prompt)
    }
}

/// A [Console] over any buffered reader and writer.
///
/// Use [LineConsole::stdio] for the terminal. Passwords are only hidden when stdin is a terminal.
pub struct LineConsole<R, W> {
    input: R,
    output: W,
    hide_passwords: bool,
}

impl LineConsole<StdinLock<'static>, Stdout> {
    /// A console on stdin and stdout.
    pub fn stdio() -> Self {
        let stdin = io::stdin();
        let hide_passwords = stdin.is_terminal();

        Self {
            input: stdin.lock(),
            output: io::stdout(),
            hide_passwords,
        }
    }
}

impl<R: BufRead, W: Write> LineConsole<R, W> {
    /// A console that reads from `input` and writes to `output`. Passwords are echoed.
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            hide_passwords: false,
        }
    }

    /// Consume the console and return the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> Console for LineConsole<R, W> {
    fn print(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        let line = line.trim_end_matches(['\r', '\n']);

        Ok(Some(line.to_owned()))
    }

    fn read_password(&mut self, prompt: &str) -> io::Result<Option<String>> {
        if !self.hide_passwords {
            return self.read_line(prompt);
        }

        self.output.flush()?;

        match rpassword::prompt_password(prompt) {
            Ok(password) => Ok(Some(password)),
            Err(error) if error.kind() == io::ErrorKind::UnexpectedEof => Ok(None),
            Err(error) => Err(error),
        }
    }
}
