// src/system/console.rs

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

/// The line-oriented terminal a menu system talks to.
pub trait Console {
    /// Reads one line without its line terminator. `Ok(None)` means the input
    /// is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Writes `text` as is.
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    /// Makes everything written so far visible. Called after every write,
    /// since prompts do not end with a newline.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Stdin and stdout of the current process.
#[derive(Debug, Default)]
pub struct StdConsole;

impl Console for StdConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if io::stdin().lock().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        io::stdout().lock().write_all(text.as_bytes())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

/// Everything written to a [`ScriptedConsole`], readable while the console is
/// owned by a menu system.
#[derive(Debug, Clone, Default)]
pub struct Transcript(Rc<RefCell<String>>);

impl Transcript {
    /// Everything written so far.
    pub fn contents(&self) -> String {
        self.0.borrow().clone()
    }

    /// How many times `needle` was written.
    pub fn count(&self, needle: &str) -> usize {
        self.0.borrow().matches(needle).count()
    }

    /// Drops the recorded output.
    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

/// A console fed from a fixed list of lines, recording all output.
///
/// Used to drive menus in tests and in non-interactive runs. Input runs out
/// like a closed stdin.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    input: VecDeque<String>,
    transcript: Transcript,
}

impl ScriptedConsole {
    /// A console that will answer with `lines`, in order.
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            input: lines.into_iter().map(Into::into).collect(),
            transcript: Transcript::default(),
        }
    }

    /// A handle on the output, shared with this console.
    pub fn transcript(&self) -> Transcript {
        self.transcript.clone()
    }
}

impl Console for ScriptedConsole {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.input.pop_front())
    }

    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.transcript.0.borrow_mut().push_str(text);
        Ok(())
    }
}
