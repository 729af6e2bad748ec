use std::io::{self, BufRead, Write};

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Line-oriented prompts over any input and output pair.
///
/// Parsing helpers return `None` both for unparsable input and for end of
/// input; use `is_closed` to tell the two apart.
pub struct Console<R, W> {
    input: R,
    output: W,
    closed: bool,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            closed: false,
        }
    }

    /// Whether end of input has been reached.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        write!(self.output, "{}", CLEAR_SCREEN)?;
        self.output.flush()
    }

    pub fn println(&mut self, line: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", line.as_ref())
    }

    /// Prints `prompt` and returns the next line with surrounding whitespace
    /// removed, or `None` at end of input.
    pub fn read_string(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", prompt)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            self.closed = true;
            return Ok(None);
        }

        Ok(Some(line.trim().to_string()))
    }

    pub fn read_int(&mut self, prompt: &str) -> io::Result<Option<u32>> {
        Ok(self
            .read_string(prompt)?
            .and_then(|line| line.parse().ok()))
    }

    pub fn read_float(&mut self, prompt: &str) -> io::Result<Option<f64>> {
        Ok(self
            .read_string(prompt)?
            .and_then(|line| line.parse().ok()))
    }

    pub fn press_enter_to_continue(&mut self) -> io::Result<()> {
        self.read_string("\nPress Enter to continue...")?;
        Ok(())
    }
}
