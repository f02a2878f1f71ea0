// Output regions
use crate::domain::traits::OutputRegion;
use std::io::Write;
use std::sync::Mutex;

/// Region backed by the terminal
pub struct TerminalRegion {
    clear_screen: bool,
}

impl TerminalRegion {
    pub fn new(clear_screen: bool) -> Self {
        Self { clear_screen }
    }
}

impl OutputRegion for TerminalRegion {
    fn replace(&self, content: String) {
        // Holding the lock keeps two responses from interleaving
        let mut stdout = std::io::stdout().lock();
        if self.clear_screen {
            // ANSI escape sequence: clear screen and move cursor to top-left
            let _ = write!(stdout, "\x1B[2J\x1B[1;1H");
        }
        let _ = writeln!(stdout, "{}", content);
        let _ = stdout.flush();
    }
}

/// Region that keeps its content in memory
#[derive(Default)]
pub struct MemoryRegion {
    content: Mutex<String>,
    writes: Mutex<usize>,
}

impl MemoryRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content(&self) -> String {
        self.content
            .lock()
            .map(|c| c.clone())
            .unwrap_or_else(|e| e.into_inner().clone())
    }

    /// Number of times the content was replaced
    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl OutputRegion for MemoryRegion {
    fn replace(&self, content: String) {
        *self.content.lock().unwrap_or_else(|e| e.into_inner()) = content;
        *self.writes.lock().unwrap_or_else(|e| e.into_inner()) += 1;
    }
}
