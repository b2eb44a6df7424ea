//! Interned identifiers
//!
//! Names in the VHDL tree are interned once and compared by symbol.
//! The interner is shared by the whole process so that trees built on
//! one thread can be emitted or evaluated on another.

use string_interner::{DefaultBackend, DefaultSymbol, StringInterner};
use std::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

type Interner = StringInterner<DefaultBackend>;

static INTERNER: OnceLock<RwLock<Interner>> = OnceLock::new();

fn interner() -> &'static RwLock<Interner> {
    INTERNER.get_or_init(|| RwLock::new(StringInterner::new()))
}

/// An interned name
///
/// The empty identifier is reserved for the `all` / `others` keyword.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ident(DefaultSymbol);

impl Ident {
    /// Intern a string
    pub fn new(name: &str) -> Self {
        if let Some(sym) = interner()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return Ident(sym);
        }
        let sym = interner()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_intern(name);
        Ident(sym)
    }

    /// The empty identifier
    pub fn empty() -> Self {
        Self::new("")
    }

    pub fn is_empty(self) -> bool {
        self.with_str(str::is_empty)
    }

    /// Run `f` on the interned text without copying it out
    pub fn with_str<R>(self, f: impl FnOnce(&str) -> R) -> R {
        let guard = interner().read().unwrap_or_else(PoisonError::into_inner);
        f(guard.resolve(self.0).unwrap_or(""))
    }

    /// Copy the interned text
    pub fn as_string(self) -> String {
        self.with_str(str::to_string)
    }

    /// Case-insensitive comparison, as VHDL compares identifiers
    pub fn eq_ignore_case(self, other: &str) -> bool {
        self.with_str(|s| s.eq_ignore_ascii_case(other))
    }
}

impl From<&str> for Ident {
    fn from(name: &str) -> Self {
        Ident::new(name)
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|s| f.write_str(s))
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_str(|s| write!(f, "Ident({:?})", s))
    }
}
