//! G-code program storage.
//!
//! Lines are opaque: nothing is parsed. Playback only counts them.

use cncsim_core::SimulationError;
use std::path::Path;

/// A loaded program as its non-blank lines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GcodeProgram {
    lines: Vec<String>,
}

impl GcodeProgram {
    /// Keep every line with non-whitespace content, unmodified
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect();
        Self { lines }
    }

    /// Read a UTF-8 program file
    pub fn load_file(path: &Path) -> Result<Self, SimulationError> {
        let content = std::fs::read_to_string(path).map_err(|e| SimulationError::File {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Ok(Self::from_text(&content))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line at zero-based `index`
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    /// The program text with blank lines removed
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }
}
