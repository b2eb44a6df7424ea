//! SKALP VHDL Frontend - Expression Engine
//!
//! This crate handles the expression trees produced by the VHDL parser:
//! - Translation of each expression to Verilog text
//! - Best-effort compile-time constant folding
//! - Legality checks for sequential assignment targets
//! - Structural comparison of expression trees
//!
//! Name resolution is delegated to the surrounding elaborator through the
//! [`Scope`] trait. Errors are counted and collected into [`Diagnostics`]
//! instead of aborting, so one pass reports as many problems as possible.

pub mod attribute;
pub mod config;
pub mod dump;
pub mod elaborate;
pub mod emit;
pub mod error;
pub mod eval;
pub mod expr;
pub mod ident;
pub mod scope;
pub mod span;

pub use attribute::AttributeKind;
pub use config::{EmitConfig, EscapeMode};
pub use error::{ConfigError, Diagnostic, Diagnostics, ElabError, ErrorKind, ScopeError};
pub use expr::{
    ArithOp, Attribute, Binary, EdgeKind, ExprKind, Expression, LogicOp, NameRef, RelOp, Unary,
};
pub use ident::Ident;
pub use scope::{
    Architecture, DeclKind, DeclTable, Declaration, ElabContext, Entity, PortMode, Scope,
};
pub use span::LineInfo;
