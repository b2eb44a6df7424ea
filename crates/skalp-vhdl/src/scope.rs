//! Name resolution contract
//!
//! The expression engine does not own a symbol table. It asks a [`Scope`]
//! for declarations by name, and the elaborator decides what the scopes
//! look like. [`Entity`], [`Architecture`] and [`DeclTable`] are simple
//! `IndexMap` backed scopes for the common VHDL design units.

use crate::config::EmitConfig;
use crate::error::{Diagnostic, Diagnostics, ElabError, ScopeError};
use crate::expr::Expression;
use crate::ident::Ident;
use crate::span::LineInfo;
use indexmap::IndexMap;

/// Direction of an entity port
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortMode {
    In,
    Out,
    InOut,
    Buffer,
}

/// What a name in scope refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Port(PortMode),
    Signal,
    Variable,
    Constant,
    Generic,
}

impl DeclKind {
    /// Whether a sequential assignment may target this declaration
    pub fn is_writable(self) -> bool {
        match self {
            DeclKind::Port(mode) => mode != PortMode::In,
            DeclKind::Signal | DeclKind::Variable => true,
            DeclKind::Constant | DeclKind::Generic => false,
        }
    }

    /// Whether the declaration may carry a compile-time value
    pub fn is_constant(self) -> bool {
        matches!(self, DeclKind::Constant | DeclKind::Generic)
    }

    /// Noun used in diagnostics
    pub fn describe(self) -> &'static str {
        match self {
            DeclKind::Port(PortMode::In) => "input port",
            DeclKind::Port(PortMode::Out) => "output port",
            DeclKind::Port(PortMode::InOut) => "inout port",
            DeclKind::Port(PortMode::Buffer) => "buffer port",
            DeclKind::Signal => "signal",
            DeclKind::Variable => "variable",
            DeclKind::Constant => "constant",
            DeclKind::Generic => "generic",
        }
    }
}

/// A declaration as seen by the expression engine
#[derive(Debug, Clone, Copy)]
pub struct Declaration<'s> {
    pub name: Ident,
    pub kind: DeclKind,
    /// Type mark as written in the source
    pub type_name: &'s str,
    /// Value expression of a constant or generic (default), if known
    pub constant: Option<&'s Expression<'s>>,
}

impl Declaration<'_> {
    pub fn is_writable(&self) -> bool {
        self.kind.is_writable()
    }
}

/// Name lookup supplied by the elaborator
pub trait Scope {
    /// Find the declaration visible under `name`
    fn lookup(&self, name: Ident) -> Option<Declaration<'_>>;

    /// Value expression of a constant visible under `name`
    fn find_constant(&self, name: Ident) -> Option<&Expression<'_>> {
        self.lookup(name)
            .filter(|decl| decl.kind.is_constant())
            .and_then(|decl| decl.constant)
    }
}

#[derive(Debug)]
struct Decl<'a> {
    kind: DeclKind,
    type_name: String,
    value: Option<Expression<'a>>,
}

/// Flat declaration table with insertion order preserved
#[derive(Debug, Default)]
pub struct DeclTable<'a> {
    decls: IndexMap<Ident, Decl<'a>>,
}

impl<'a> DeclTable<'a> {
    pub fn new() -> Self {
        Self {
            decls: IndexMap::new(),
        }
    }

    /// Define a name in this table
    pub fn declare(
        &mut self,
        name: impl Into<Ident>,
        kind: DeclKind,
        type_name: &str,
        value: Option<Expression<'a>>,
    ) -> Result<(), ScopeError> {
        let name = name.into();
        if self.decls.contains_key(&name) {
            return Err(ScopeError::Duplicate(name));
        }
        self.decls.insert(
            name,
            Decl {
                kind,
                type_name: type_name.to_string(),
                value,
            },
        );
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Declared names, in declaration order
    pub fn names(&self) -> impl Iterator<Item = Ident> + '_ {
        self.decls.keys().copied()
    }
}

impl Scope for DeclTable<'_> {
    fn lookup(&self, name: Ident) -> Option<Declaration<'_>> {
        self.decls.get(&name).map(|decl| Declaration {
            name,
            kind: decl.kind,
            type_name: &decl.type_name,
            constant: decl.value.as_ref(),
        })
    }
}

/// Entity interface: generics and ports
#[derive(Debug)]
pub struct Entity<'a> {
    name: Ident,
    decls: DeclTable<'a>,
}

impl<'a> Entity<'a> {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            decls: DeclTable::new(),
        }
    }

    pub fn name(&self) -> Ident {
        self.name
    }

    pub fn add_port(
        &mut self,
        name: impl Into<Ident>,
        mode: PortMode,
        type_name: &str,
    ) -> Result<(), ScopeError> {
        self.decls
            .declare(name, DeclKind::Port(mode), type_name, None)
    }

    /// Add a generic with an optional default value
    pub fn add_generic(
        &mut self,
        name: impl Into<Ident>,
        type_name: &str,
        default: Option<Expression<'a>>,
    ) -> Result<(), ScopeError> {
        self.decls
            .declare(name, DeclKind::Generic, type_name, default)
    }
}

impl Scope for Entity<'_> {
    fn lookup(&self, name: Ident) -> Option<Declaration<'_>> {
        self.decls.lookup(name)
    }
}

/// Architecture body: signals, variables and constants
#[derive(Debug)]
pub struct Architecture<'a> {
    name: Ident,
    decls: DeclTable<'a>,
}

impl<'a> Architecture<'a> {
    pub fn new(name: impl Into<Ident>) -> Self {
        Self {
            name: name.into(),
            decls: DeclTable::new(),
        }
    }

    pub fn name(&self) -> Ident {
        self.name
    }

    pub fn add_signal(&mut self, name: impl Into<Ident>, type_name: &str) -> Result<(), ScopeError> {
        self.decls.declare(name, DeclKind::Signal, type_name, None)
    }

    pub fn add_variable(
        &mut self,
        name: impl Into<Ident>,
        type_name: &str,
    ) -> Result<(), ScopeError> {
        self.decls.declare(name, DeclKind::Variable, type_name, None)
    }

    pub fn add_constant(
        &mut self,
        name: impl Into<Ident>,
        type_name: &str,
        value: Expression<'a>,
    ) -> Result<(), ScopeError> {
        self.decls
            .declare(name, DeclKind::Constant, type_name, Some(value))
    }
}

impl Scope for Architecture<'_> {
    fn lookup(&self, name: Ident) -> Option<Declaration<'_>> {
        self.decls.lookup(name)
    }
}

/// Everything an expression needs while it is elaborated or emitted
///
/// Lookups see the architecture first, then the entity, so that
/// architecture declarations hide entity ones of the same name.
pub struct ElabContext<'s> {
    entity: &'s dyn Scope,
    architecture: &'s dyn Scope,
    config: EmitConfig,
    diagnostics: Diagnostics,
}

impl<'s> ElabContext<'s> {
    pub fn new(entity: &'s dyn Scope, architecture: &'s dyn Scope) -> Self {
        Self {
            entity,
            architecture,
            config: EmitConfig::default(),
            diagnostics: Diagnostics::new(),
        }
    }

    pub fn with_config(mut self, config: EmitConfig) -> Self {
        self.config = config;
        self
    }

    pub fn entity(&self) -> &'s dyn Scope {
        self.entity
    }

    pub fn architecture(&self) -> &'s dyn Scope {
        self.architecture
    }

    pub fn config(&self) -> &EmitConfig {
        &self.config
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Take the collected diagnostics, leaving the context empty
    pub fn take_diagnostics(&mut self) -> Diagnostics {
        std::mem::take(&mut self.diagnostics)
    }

    /// Record an error at `span`
    pub fn report(&mut self, span: LineInfo, error: ElabError) {
        let diagnostic = Diagnostic { error, span };
        if self.config.log_diagnostics {
            log::error!("{}", diagnostic);
        }
        self.diagnostics.push(diagnostic);
    }
}

impl Scope for ElabContext<'_> {
    fn lookup(&self, name: Ident) -> Option<Declaration<'_>> {
        self.architecture
            .lookup(name)
            .or_else(|| self.entity.lookup(name))
    }
}
