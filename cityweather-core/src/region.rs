use std::io;

use crate::render::Line;

/// The area that shows the current display state. Each call replaces all
/// previous content.
pub trait OutputRegion {
    fn replace(&mut self, lines: &[Line]) -> io::Result<()>;
}

/// Region that keeps its content in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryRegion {
    lines: Vec<Line>,
    writes: usize,
}

impl MemoryRegion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Current content, one line per entry.
    pub fn text(&self) -> Vec<&str> {
        self.lines.iter().map(|l| l.text.as_str()).collect()
    }

    /// Number of times the content was replaced.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl OutputRegion for MemoryRegion {
    fn replace(&mut self, lines: &[Line]) -> io::Result<()> {
        self.lines = lines.to_vec();
        self.writes += 1;
        Ok(())
    }
}
