//! Source location attached to every expression node
//!
//! The VHDL parser only tracks file and line for expressions, which is
//! all the diagnostics of this crate print.

use crate::ident::Ident;
use std::fmt;

/// File and line of the source text an expression was parsed from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LineInfo {
    /// File name (if available)
    pub file: Option<Ident>,
    /// Line number (1-indexed, 0 when unknown)
    pub line: u32,
}

impl LineInfo {
    /// Create a location in a named file
    pub fn new(file: &str, line: u32) -> Self {
        Self {
            file: Some(Ident::new(file)),
            line,
        }
    }

    /// Location with only a line number
    pub fn at_line(line: u32) -> Self {
        Self { file: None, line }
    }

    /// Format as "file:line" for error messages
    pub fn display(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for LineInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.file {
            Some(file) => write!(f, "{}:{}", file, self.line),
            None => write!(f, "<unknown>:{}", self.line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_info_display() {
        let loc = LineInfo::new("counter.vhd", 12);
        assert_eq!(loc.display(), "counter.vhd:12");
    }

    #[test]
    fn test_line_info_without_file() {
        assert_eq!(LineInfo::at_line(3).display(), "<unknown>:3");
        assert_eq!(LineInfo::default().display(), "<unknown>:0");
    }
}
