//! Error types for expression elaboration and emission
//!
//! Errors here never abort translation. Each operation returns the number
//! of errors it found and records a [`Diagnostic`] for each of them, so the
//! caller can keep going with sibling expressions.

use crate::ident::Ident;
use crate::span::LineInfo;
use std::fmt;
use thiserror::Error;

/// Errors reported while elaborating or emitting an expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ElabError {
    /// Name is neither a port nor a declaration in scope
    #[error("Signal/variable {0} not found in this context")]
    UnresolvedName(Ident),

    /// Expression kind can't be the target of an assignment
    #[error("Expression is not a valid l-value")]
    NotAnLvalue,

    /// Name resolves to something that can't be assigned
    #[error("Can't assign to {what} {name}")]
    NotWritable { name: Ident, what: &'static str },

    /// Attribute outside the supported vocabulary
    #[error("Unsupported attribute '{attribute} on {base}")]
    UnsupportedAttribute { base: Ident, attribute: Ident },

    /// Name with characters a Verilog identifier can't hold
    #[error("Name \"{0}\" can't be written as a Verilog identifier")]
    UnrepresentableName(Ident),

    /// Character literal outside the 8-bit range of Verilog strings
    #[error("Character {0:?} can't be written as a Verilog string")]
    UnrepresentableCharacter(char),

    /// The `all` keyword used where a real name is required
    #[error("Invalid use of \"all\" keyword")]
    InvalidAll,

    /// The output sink refused the translated text
    #[error("Failed to write translated output")]
    Output,
}

/// Kind of an [`ElabError`], without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    UnresolvedName,
    NotAnLvalue,
    NotWritable,
    UnsupportedAttribute,
    UnrepresentableName,
    UnrepresentableCharacter,
    InvalidAll,
    Output,
}

impl ElabError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ElabError::UnresolvedName(_) => ErrorKind::UnresolvedName,
            ElabError::NotAnLvalue => ErrorKind::NotAnLvalue,
            ElabError::NotWritable { .. } => ErrorKind::NotWritable,
            ElabError::UnsupportedAttribute { .. } => ErrorKind::UnsupportedAttribute,
            ElabError::UnrepresentableName(_) => ErrorKind::UnrepresentableName,
            ElabError::UnrepresentableCharacter(_) => ErrorKind::UnrepresentableCharacter,
            ElabError::InvalidAll => ErrorKind::InvalidAll,
            ElabError::Output => ErrorKind::Output,
        }
    }
}

/// An error together with the location of the offending expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub error: ElabError,
    pub span: LineInfo,
}

impl Diagnostic {
    pub fn kind(&self) -> ErrorKind {
        self.error.kind()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: error: {}", self.span, self.error)
    }
}

/// Ordered collection of reported diagnostics
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Kinds of all diagnostics, in report order
    pub fn kinds(&self) -> Vec<ErrorKind> {
        self.items.iter().map(Diagnostic::kind).collect()
    }

    pub fn has(&self, kind: ErrorKind) -> bool {
        self.items.iter().any(|d| d.kind() == kind)
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Errors building a declaration table
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScopeError {
    #[error("Duplicate declaration of '{0}'")]
    Duplicate(Ident),
}

/// Errors loading an [`EmitConfig`](crate::config::EmitConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error reading the config file
    #[error("I/O error: {0}")]
    Io(String),

    /// TOML parsing error
    #[error("Failed to parse config: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_display() {
        let diag = Diagnostic {
            error: ElabError::UnresolvedName(Ident::new("count")),
            span: LineInfo::new("top.vhd", 7),
        };
        assert_eq!(
            diag.to_string(),
            "top.vhd:7: error: Signal/variable count not found in this context"
        );
    }

    #[test]
    fn test_not_writable_message() {
        let err = ElabError::NotWritable {
            name: Ident::new("clk"),
            what: "input port",
        };
        assert_eq!(err.to_string(), "Can't assign to input port clk");
        assert_eq!(err.kind(), ErrorKind::NotWritable);
    }

    #[test]
    fn test_diagnostics_collection() {
        let mut diags = Diagnostics::new();
        assert!(diags.is_empty());
        diags.push(Diagnostic {
            error: ElabError::NotAnLvalue,
            span: LineInfo::default(),
        });
        diags.push(Diagnostic {
            error: ElabError::InvalidAll,
            span: LineInfo::default(),
        });
        assert_eq!(diags.len(), 2);
        assert_eq!(
            diags.kinds(),
            vec![ErrorKind::NotAnLvalue, ErrorKind::InvalidAll]
        );
        assert!(diags.has(ErrorKind::InvalidAll));
        assert!(!diags.has(ErrorKind::Output));

        diags.clear();
        assert!(diags.is_empty());
        assert!(!diags.has(ErrorKind::InvalidAll));
    }
}
