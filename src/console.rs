use std::io::{self, Write};

/// Where `print` and `clear` send their output.
pub trait Console {
    fn write_line(&mut self, line: &str);
    fn clear_screen(&mut self);
}

/// Writes to standard output.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn write_line(&mut self, line: &str) {
        let mut out = io::stdout().lock();
        if let Err(err) = writeln!(out, "{}", line) {
            log::warn!("failed to write to stdout: {}", err);
        }
    }

    fn clear_screen(&mut self) {
        let mut out = io::stdout().lock();
        // Erase display, then home the cursor.
        if let Err(err) = write!(out, "\x1b[2J\x1b[H").and_then(|_| out.flush()) {
            log::warn!("failed to clear screen: {}", err);
        }
    }
}

/// Records output in memory.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct BufferConsole {
    pub lines: Vec<String>,
    pub clears: usize,
}

impl Console for BufferConsole {
    fn write_line(&mut self, line: &str) {
        self.lines.push(line.to_string());
    }

    fn clear_screen(&mut self) {
        self.clears += 1;
    }
}
